use chrono::DateTime;
use chrono::FixedOffset;
use gantry_document::Document;
use gantry_fields::CUSTOM_FIELD_PREFIX;
use gantry_fields::CustomFields;
use gantry_fields::canonical;
use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;
use serde::de;
use serde::ser;
use serde_json::Map;
use serde_json::Value;

/// A user reference as the service encodes it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Status {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Priority {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Resolution {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IssueType {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtask: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectRef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Component {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// The `fields` object of an issue: the fixed schema plus the server-defined
/// custom fields, one flat JSON object on the wire.
///
/// Encoding writes the fixed fields first, then lays every custom entry into
/// the same object, custom values winning on key collision. Decoding runs a
/// normalization pass that rewrites any top-level string value in a
/// recognized date/time shape to RFC 3339 (which is how `duedate` accepts
/// `2025-10-30` as well as full timestamps), decodes the fixed schema
/// strictly, and copies every `customfield_`-prefixed key into
/// [`CustomFields`]. The store is always present after a decode, possibly
/// empty.
///
/// The normalization pass is applied to every string field, not only to the
/// date/time ones, so a summary that happens to look like a date is rewritten
/// too. Long-standing wire behavior; fixtures depend on it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IssueFields {
    pub summary: Option<String>,
    pub description: Option<Document>,
    pub environment: Option<Document>,
    pub issue_type: Option<IssueType>,
    pub project: Option<ProjectRef>,
    pub status: Option<Status>,
    pub priority: Option<Priority>,
    pub resolution: Option<Resolution>,
    pub assignee: Option<User>,
    pub reporter: Option<User>,
    pub creator: Option<User>,
    pub labels: Vec<String>,
    pub components: Vec<Component>,
    pub created: Option<DateTime<FixedOffset>>,
    pub updated: Option<DateTime<FixedOffset>>,
    pub due_date: Option<DateTime<FixedOffset>>,
    pub custom: CustomFields,
}

/// Wire mirror of the fixed schema. Decoding is strict: a value that does
/// not match its declared type after normalization fails the whole decode.
#[derive(Debug, Default, Serialize, Deserialize)]
struct Schema {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<Document>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    environment: Option<Document>,
    #[serde(rename = "issuetype", default, skip_serializing_if = "Option::is_none")]
    issue_type: Option<IssueType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    project: Option<ProjectRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    status: Option<Status>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    priority: Option<Priority>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    resolution: Option<Resolution>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    assignee: Option<User>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    reporter: Option<User>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    creator: Option<User>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    labels: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    components: Vec<Component>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    created: Option<DateTime<FixedOffset>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    updated: Option<DateTime<FixedOffset>>,
    #[serde(rename = "duedate", default, skip_serializing_if = "Option::is_none")]
    due_date: Option<DateTime<FixedOffset>>,
}

impl IssueFields {
    fn to_schema(&self) -> Schema {
        Schema {
            summary: self.summary.clone(),
            description: self.description.clone(),
            environment: self.environment.clone(),
            issue_type: self.issue_type.clone(),
            project: self.project.clone(),
            status: self.status.clone(),
            priority: self.priority.clone(),
            resolution: self.resolution.clone(),
            assignee: self.assignee.clone(),
            reporter: self.reporter.clone(),
            creator: self.creator.clone(),
            labels: self.labels.clone(),
            components: self.components.clone(),
            created: self.created,
            updated: self.updated,
            due_date: self.due_date,
        }
    }

    fn from_schema(schema: Schema, custom: CustomFields) -> Self {
        IssueFields {
            summary: schema.summary,
            description: schema.description,
            environment: schema.environment,
            issue_type: schema.issue_type,
            project: schema.project,
            status: schema.status,
            priority: schema.priority,
            resolution: schema.resolution,
            assignee: schema.assignee,
            reporter: schema.reporter,
            creator: schema.creator,
            labels: schema.labels,
            components: schema.components,
            created: schema.created,
            updated: schema.updated,
            due_date: schema.due_date,
            custom,
        }
    }
}

impl Serialize for IssueFields {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.custom.is_empty() {
            return self.to_schema().serialize(serializer);
        }
        let fixed = serde_json::to_value(self.to_schema()).map_err(ser::Error::custom)?;
        let Value::Object(mut merged) = fixed else {
            return Err(ser::Error::custom("issue fields did not encode to an object"));
        };
        for (id, value) in self.custom.iter() {
            merged.insert(id.clone(), value.clone());
        }
        Value::Object(merged).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for IssueFields {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut raw = Map::<String, Value>::deserialize(deserializer)?;
        for value in raw.values_mut() {
            if let Value::String(text) = value
                && let Some(rewritten) = canonical(text)
            {
                *value = Value::String(rewritten);
            }
        }
        let schema: Schema =
            serde_json::from_value(Value::Object(raw.clone())).map_err(de::Error::custom)?;
        let mut custom = CustomFields::new();
        for (key, value) in raw {
            if key.starts_with(CUSTOM_FIELD_PREFIX) {
                custom.insert(key, value);
            }
        }
        Ok(IssueFields::from_schema(schema, custom))
    }
}

/// One issue as returned by the read endpoints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(rename = "self", default, skip_serializing_if = "Option::is_none")]
    pub self_url: Option<String>,
    #[serde(default)]
    pub fields: IssueFields,
}

/// Response of the create endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CreatedIssue {
    pub id: String,
    pub key: String,
    #[serde(rename = "self")]
    pub self_url: String,
}

/// One page of search results.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResults {
    #[serde(default)]
    pub start_at: u32,
    #[serde(default)]
    pub max_results: u32,
    #[serde(default)]
    pub total: u32,
    #[serde(default)]
    pub issues: Vec<Issue>,
}

/// Request body wrapper for the create/edit endpoints.
#[derive(Serialize)]
pub(crate) struct IssuePayload<'a> {
    pub fields: &'a IssueFields,
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn empty_store_serializes_fixed_fields_only() {
        let fields = IssueFields {
            summary: Some("A".to_string()),
            ..Default::default()
        };
        assert_eq!(serde_json::to_value(&fields).unwrap(), json!({"summary": "A"}));
    }

    #[test]
    fn custom_fields_sit_beside_fixed_fields() {
        let fields = IssueFields {
            summary: Some("A".to_string()),
            labels: vec!["wire".to_string()],
            custom: CustomFields::new()
                .set_string("customfield_10001", "Sprint 1")
                .set_number("customfield_10002", 42.5),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&fields).unwrap(),
            json!({
                "summary": "A",
                "labels": ["wire"],
                "customfield_10001": "Sprint 1",
                "customfield_10002": 42.5
            })
        );
    }

    #[test]
    fn custom_value_wins_on_key_collision() {
        let fields = IssueFields {
            summary: Some("fixed".to_string()),
            custom: CustomFields::new().set_string("summary", "dynamic"),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&fields).unwrap(),
            json!({"summary": "dynamic"})
        );
    }

    #[test]
    fn decode_classifies_custom_fields_by_prefix() {
        let fields: IssueFields = serde_json::from_value(json!({
            "summary": "S",
            "customfield_10001": "Sprint 1",
            "customfield_10002": 42.5
        }))
        .unwrap();
        assert_eq!(fields.summary.as_deref(), Some("S"));
        assert_eq!(fields.custom.len(), 2);
        assert_eq!(fields.custom.get_string("customfield_10001"), Some("Sprint 1"));
        assert_eq!(fields.custom.get_number("customfield_10002"), Some(42.5));
    }

    #[test]
    fn store_is_present_even_when_nothing_matches() {
        let fields: IssueFields = serde_json::from_value(json!({"summary": "S"})).unwrap();
        assert!(fields.custom.is_empty());
    }

    #[test]
    fn prefix_match_is_case_sensitive() {
        let fields: IssueFields =
            serde_json::from_value(json!({"Customfield_10001": "nope"})).unwrap();
        assert!(fields.custom.is_empty());
    }

    #[test]
    fn due_date_accepts_date_only_and_full_timestamps() {
        let fields: IssueFields =
            serde_json::from_value(json!({"duedate": "2025-10-30"})).unwrap();
        assert_eq!(
            fields.due_date.unwrap().to_rfc3339(),
            "2025-10-30T00:00:00+00:00"
        );

        let fields: IssueFields =
            serde_json::from_value(json!({"duedate": "2025-10-30T15:04:05Z"})).unwrap();
        assert_eq!(
            fields.due_date.unwrap().to_rfc3339(),
            "2025-10-30T15:04:05+00:00"
        );
    }

    #[test]
    fn vendor_timestamps_decode_into_created_and_updated() {
        let fields: IssueFields = serde_json::from_value(json!({
            "created": "2025-01-02T03:04:05.000+0000",
            "updated": "2025-01-02T03:04:06.000+0200"
        }))
        .unwrap();
        assert_eq!(
            fields.created.unwrap().to_rfc3339(),
            "2025-01-02T03:04:05+00:00"
        );
        assert_eq!(
            fields.updated.unwrap().to_rfc3339(),
            "2025-01-02T03:04:06+02:00"
        );
    }

    #[test]
    fn date_shaped_summary_is_rewritten_by_normalization() {
        // Every top-level string runs through the date/time pass, not just the
        // date fields. Compatibility behavior, asserted on purpose.
        let fields: IssueFields =
            serde_json::from_value(json!({"summary": "2024-01-01"})).unwrap();
        assert_eq!(fields.summary.as_deref(), Some("2024-01-01T00:00:00+00:00"));
    }

    #[test]
    fn custom_date_entries_normalize_for_typed_reads() {
        let fields: IssueFields =
            serde_json::from_value(json!({"customfield_20001": "2025-10-30"})).unwrap();
        let parsed = fields.custom.get_datetime("customfield_20001").unwrap();
        assert_eq!(parsed.to_rfc3339(), "2025-10-30T00:00:00+00:00");
    }

    #[test]
    fn mistyped_fixed_field_fails_the_whole_decode() {
        // `labels` declared as an array; a quoted string is a decode error,
        // not a silent coercion.
        assert!(serde_json::from_value::<IssueFields>(json!({"labels": "oops"})).is_err());
        assert!(serde_json::from_value::<IssueFields>(json!({"duedate": "tomorrow"})).is_err());
        assert!(serde_json::from_str::<IssueFields>("{not json").is_err());
    }

    #[test]
    fn description_round_trips_as_a_document() {
        let fields = IssueFields {
            description: Some(Document::from_plain_text("First\n\nSecond")),
            ..Default::default()
        };
        let encoded = serde_json::to_value(&fields).unwrap();
        assert_eq!(encoded["description"]["type"], "doc");
        let decoded: IssueFields = serde_json::from_value(encoded).unwrap();
        assert_eq!(
            decoded.description.as_ref().map(Document::to_plain_text),
            Some("First\nSecond".to_string())
        );
        assert_eq!(decoded, fields);
    }

    #[test]
    fn full_issue_decode() {
        let issue: Issue = serde_json::from_value(json!({
            "id": "10002",
            "key": "PROJ-7",
            "self": "https://gantry.example.com/rest/api/3/issue/10002",
            "fields": {
                "summary": "Crash on save",
                "issuetype": {"id": "1", "name": "Bug", "subtask": false},
                "status": {"id": "3", "name": "In Progress"},
                "assignee": {"accountId": "acct-1", "displayName": "Dana"},
                "labels": ["crash", "p1"],
                "customfield_10001": "Sprint 4"
            }
        }))
        .unwrap();
        assert_eq!(issue.key.as_deref(), Some("PROJ-7"));
        assert_eq!(issue.fields.status.unwrap().name.as_deref(), Some("In Progress"));
        assert_eq!(issue.fields.assignee.unwrap().account_id.as_deref(), Some("acct-1"));
        assert_eq!(issue.fields.custom.get_string("customfield_10001"), Some("Sprint 4"));
    }
}
