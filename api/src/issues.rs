use serde::Serialize;

use crate::client::Client;
use crate::error::Result;
use crate::models::CreatedIssue;
use crate::models::Issue;
use crate::models::IssueFields;
use crate::models::IssuePayload;
use crate::models::SearchResults;

/// Body of the search endpoint. Only the offsets the SDK itself needs;
/// general pagination lives with the caller.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub jql: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_at: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_results: Option<u32>,
}

impl Client {
    /// Fetch one issue by key or numeric id.
    pub async fn get_issue(&self, key: &str) -> Result<Issue> {
        self.get_json(&["rest", "api", "3", "issue", key]).await
    }

    /// Create an issue from a field set; returns the assigned id and key.
    pub async fn create_issue(&self, fields: &IssueFields) -> Result<CreatedIssue> {
        self.post_json(&["rest", "api", "3", "issue"], &IssuePayload { fields })
            .await
    }

    /// Overwrite the given fields of an existing issue.
    pub async fn edit_issue(&self, key: &str, fields: &IssueFields) -> Result<()> {
        self.put_no_content(&["rest", "api", "3", "issue", key], &IssuePayload { fields })
            .await
    }

    /// Run a JQL search and return one page of matches.
    pub async fn search(&self, request: &SearchRequest) -> Result<SearchResults> {
        self.post_json(&["rest", "api", "3", "search"], request).await
    }
}
