use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use reqwest::Method;
use reqwest::header::AUTHORIZATION;
use serde::Deserialize;
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::error::Error;
use crate::error::Result;

/// How requests authenticate against the service.
#[derive(Debug, Clone)]
pub enum Credentials {
    /// HTTP basic auth with account email and API token.
    Basic { email: String, token: String },
    /// Bearer token (personal access token).
    Bearer(String),
    /// No `Authorization` header. Anonymous instances and tests.
    Anonymous,
}

/// Thin HTTP client: base URL, credentials, and a JSON dispatch helper the
/// resource methods build on.
#[derive(Debug, Clone)]
pub struct Client {
    base_url: Url,
    http: reqwest::Client,
    credentials: Credentials,
}

impl Client {
    pub fn new(base_url: &str, credentials: Credentials) -> Result<Self> {
        Ok(Client {
            base_url: Url::parse(base_url)?,
            http: reqwest::Client::new(),
            credentials,
        })
    }

    /// Replace the underlying HTTP client (custom TLS, proxies, timeouts).
    pub fn with_http_client(mut self, http: reqwest::Client) -> Self {
        self.http = http;
        self
    }

    fn auth_header(&self) -> Option<String> {
        match &self.credentials {
            Credentials::Basic { email, token } => {
                let raw = format!("{email}:{token}");
                Some(format!("Basic {}", BASE64.encode(raw)))
            }
            Credentials::Bearer(token) => Some(format!("Bearer {token}")),
            Credentials::Anonymous => None,
        }
    }

    /// Endpoint URL for the given path segments. Each segment is
    /// percent-encoded, so a caller-supplied issue key containing `/` or `?`
    /// stays one segment instead of reshaping the path.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T> {
        let url = self.endpoint(segments)?;
        let body = self.dispatch(Method::GET, url, None::<&()>).await?;
        Ok(serde_json::from_str(&body)?)
    }

    pub(crate) async fn post_json<B, T>(&self, segments: &[&str], body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint(segments)?;
        let body = self.dispatch(Method::POST, url, Some(body)).await?;
        Ok(serde_json::from_str(&body)?)
    }

    pub(crate) async fn put_no_content<B>(&self, segments: &[&str], body: &B) -> Result<()>
    where
        B: Serialize + ?Sized,
    {
        let url = self.endpoint(segments)?;
        self.dispatch(Method::PUT, url, Some(body)).await?;
        Ok(())
    }

    async fn dispatch<B: Serialize + ?Sized>(
        &self,
        method: Method,
        url: Url,
        body: Option<&B>,
    ) -> Result<String> {
        tracing::debug!(%method, %url, "dispatching request");
        let mut request = self.http.request(method, url);
        if let Some(header) = self.auth_header() {
            request = request.header(AUTHORIZATION, header);
        }
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            tracing::debug!(status = status.as_u16(), "service returned an error");
            return Err(Error::Api {
                status: status.as_u16(),
                messages: error_messages(&text),
            });
        }
        tracing::trace!(bytes = text.len(), "response received");
        Ok(text)
    }
}

/// Error bodies look like `{"errorMessages": [...], "errors": {"field": "why"}}`,
/// both parts optional. Anything else is reported verbatim.
fn error_messages(body: &str) -> Vec<String> {
    #[derive(Default, Deserialize)]
    #[serde(rename_all = "camelCase", default)]
    struct ErrorBody {
        error_messages: Vec<String>,
        errors: std::collections::BTreeMap<String, String>,
    }

    let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) else {
        if body.is_empty() {
            return Vec::new();
        }
        return vec![body.to_string()];
    };
    let mut messages = parsed.error_messages;
    messages.extend(
        parsed
            .errors
            .into_iter()
            .map(|(field, reason)| format!("{field}: {reason}")),
    );
    messages
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn endpoint_appends_to_any_base_path() {
        let bare = Client::new("https://gantry.example.com", Credentials::Anonymous).unwrap();
        assert_eq!(
            bare.endpoint(&["rest", "api", "3", "issue"]).unwrap().as_str(),
            "https://gantry.example.com/rest/api/3/issue"
        );
        // A context path keeps its trailing-slash form either way.
        let context = Client::new("https://gantry.example.com/gantry/", Credentials::Anonymous)
            .unwrap();
        assert_eq!(
            context.endpoint(&["rest", "api", "3", "search"]).unwrap().as_str(),
            "https://gantry.example.com/gantry/rest/api/3/search"
        );
    }

    #[test]
    fn endpoint_segments_are_percent_encoded() {
        let client = Client::new("https://gantry.example.com", Credentials::Anonymous).unwrap();
        let url = client
            .endpoint(&["rest", "api", "3", "issue", "PROJ/1?x"])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://gantry.example.com/rest/api/3/issue/PROJ%2F1%3Fx"
        );
    }

    #[test]
    fn basic_credentials_encode_as_expected() {
        let client = Client::new(
            "https://gantry.example.com",
            Credentials::Basic {
                email: "dev@example.com".to_string(),
                token: "token123".to_string(),
            },
        )
        .unwrap();
        assert_eq!(
            client.auth_header().unwrap(),
            format!("Basic {}", BASE64.encode("dev@example.com:token123"))
        );
    }

    #[test]
    fn error_body_field_messages_are_flattened() {
        let messages = error_messages(
            r#"{"errorMessages": ["boom"], "errors": {"summary": "is required"}}"#,
        );
        assert_eq!(messages, vec!["boom".to_string(), "summary: is required".to_string()]);
        assert_eq!(error_messages(""), Vec::<String>::new());
        assert_eq!(error_messages("gateway timeout"), vec!["gateway timeout".to_string()]);
    }
}
