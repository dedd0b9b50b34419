use std::collections::BTreeMap;

use chrono::DateTime;
use chrono::FixedOffset;
use chrono::NaiveDate;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use serde_json::json;

use crate::datetime;

/// Typed store over the server-defined fields of a record.
///
/// On the wire the store is the flat object `{"customfield_10001": ..., ...}`
/// with no per-entry type tags; the logical type of a value is re-inferred on
/// every typed read. A getter returns `None` both when the id is absent and
/// when the stored value does not have the requested shape — a type mismatch
/// is a negative lookup, not an error.
///
/// Setters consume and return the store for chaining:
///
/// ```
/// use gantry_fields::CustomFields;
///
/// let fields = CustomFields::new()
///     .set_string("customfield_10001", "Sprint 1")
///     .set_number("customfield_10002", 42.5);
/// assert_eq!(fields.get_string("customfield_10001"), Some("Sprint 1"));
/// assert_eq!(fields.get_number("customfield_10002"), Some(42.5));
/// assert_eq!(fields.get_number("customfield_10001"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomFields {
    entries: BTreeMap<String, Value>,
}

impl CustomFields {
    pub fn new() -> Self {
        Self::default()
    }

    fn with(mut self, id: impl Into<String>, value: Value) -> Self {
        self.entries.insert(id.into(), value);
        self
    }

    pub fn set_string(self, id: impl Into<String>, value: impl Into<String>) -> Self {
        self.with(id, Value::String(value.into()))
    }

    pub fn set_number(self, id: impl Into<String>, value: f64) -> Self {
        self.with(id, json!(value))
    }

    /// Stored as a `YYYY-MM-DD` string.
    pub fn set_date(self, id: impl Into<String>, date: NaiveDate) -> Self {
        self.with(id, Value::String(date.format("%Y-%m-%d").to_string()))
    }

    /// Stored as an RFC 3339 offset timestamp string.
    pub fn set_datetime(self, id: impl Into<String>, value: DateTime<FixedOffset>) -> Self {
        self.with(id, Value::String(value.to_rfc3339()))
    }

    /// Stored as `{"accountId": ...}`, the service's user-reference shape.
    pub fn set_user(self, id: impl Into<String>, account_id: impl Into<String>) -> Self {
        self.with(id, json!({ "accountId": account_id.into() }))
    }

    /// Stored as `{"value": ...}`, the single-select option shape.
    pub fn set_select(self, id: impl Into<String>, value: impl Into<String>) -> Self {
        self.with(id, json!({ "value": value.into() }))
    }

    /// Stored as an array of `{"value": ...}` option objects.
    pub fn set_multi_select<I, S>(self, id: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let options = values
            .into_iter()
            .map(|value| json!({ "value": value.into() }))
            .collect();
        self.with(id, Value::Array(options))
    }

    /// Stored as a plain string array.
    pub fn set_labels<I, S>(self, id: impl Into<String>, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let labels = labels
            .into_iter()
            .map(|label| Value::String(label.into()))
            .collect();
        self.with(id, Value::Array(labels))
    }

    /// Value passed through unchanged.
    pub fn set_raw(self, id: impl Into<String>, value: Value) -> Self {
        self.with(id, value)
    }

    pub fn get_string(&self, id: &str) -> Option<&str> {
        self.entries.get(id)?.as_str()
    }

    /// Any JSON number reads back as `f64`.
    pub fn get_number(&self, id: &str) -> Option<f64> {
        self.entries.get(id)?.as_f64()
    }

    /// Applies [`crate::coerce`] to the stored string, so any recognized
    /// date/time shape reads back, not just `YYYY-MM-DD`.
    pub fn get_date(&self, id: &str) -> Option<NaiveDate> {
        datetime::coerce(self.get_string(id)?).map(|parsed| parsed.date_naive())
    }

    pub fn get_datetime(&self, id: &str) -> Option<DateTime<FixedOffset>> {
        datetime::coerce(self.get_string(id)?)
    }

    pub fn get_user(&self, id: &str) -> Option<&str> {
        self.entries.get(id)?.get("accountId")?.as_str()
    }

    pub fn get_select(&self, id: &str) -> Option<&str> {
        self.entries.get(id)?.get("value")?.as_str()
    }

    /// Every element must be an option object with a string `value`, whether
    /// it was built by [`CustomFields::set_multi_select`] or decoded from
    /// JSON; otherwise the lookup fails as a whole.
    pub fn get_multi_select(&self, id: &str) -> Option<Vec<String>> {
        let options = self.entries.get(id)?.as_array()?;
        options
            .iter()
            .map(|option| option.get("value")?.as_str().map(str::to_string))
            .collect()
    }

    pub fn get_labels(&self, id: &str) -> Option<Vec<String>> {
        let labels = self.entries.get(id)?.as_array()?;
        labels
            .iter()
            .map(|label| label.as_str().map(str::to_string))
            .collect()
    }

    pub fn get_raw(&self, id: &str) -> Option<&Value> {
        self.entries.get(id)
    }

    /// Entry-wise overwrite with `other`'s values; the last merge wins.
    pub fn merge(mut self, other: CustomFields) -> Self {
        self.entries.extend(other.entries);
        self
    }

    pub fn insert(&mut self, id: impl Into<String>, value: Value) {
        self.entries.insert(id.into(), value);
    }

    pub fn remove(&mut self, id: &str) -> Option<Value> {
        self.entries.remove(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.entries.iter()
    }

    pub fn into_map(self) -> BTreeMap<String, Value> {
        self.entries
    }

    pub fn from_map(entries: BTreeMap<String, Value>) -> Self {
        CustomFields { entries }
    }
}
