//! Outbound Asana task-list client.

use crate::runtime::UpstreamConfig;
use crate::tasks::handler::HandlerError;
use crate::tasks::model::TaskList;
use async_trait::async_trait;
use reqwest::Url;
use std::time::Duration;
use tracing::{debug, warn};

/// Fixed query: open tasks only, with just the fields the filter reads.
const TASK_LIST_QUERY: &[(&str, &str)] = &[
    ("completed_since", "now"),
    ("opt_fields", "name,assignee_status"),
];

/// Longest upstream body slice quoted in an error message.
const BODY_SNIPPET_LEN: usize = 200;

/// Source of the upstream task list.
///
/// The seam between the handler and the network; tests substitute a
/// canned implementation.
#[async_trait]
pub trait TaskSource: Send + Sync {
    /// Fetch the current task list from the upstream.
    async fn fetch_task_list(&self) -> Result<TaskList, HandlerError>;
}

/// Asana-backed task source.
pub struct AsanaClient {
    http: reqwest::Client,
    config: UpstreamConfig,
}

impl AsanaClient {
    /// Create a client for the configured upstream.
    ///
    /// The timeout applies to the whole upstream round-trip, so a slow
    /// upstream cannot hold a handler indefinitely.
    pub fn new(config: UpstreamConfig) -> Result<Self, HandlerError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout))
            .build()
            .map_err(|e| HandlerError::RequestBuild(e.to_string()))?;

        Ok(Self { http, config })
    }

    /// Task-list URL with the fixed query attached.
    fn task_list_url(&self) -> Result<Url, HandlerError> {
        Url::parse_with_params(&self.config.task_list_url, TASK_LIST_QUERY)
            .map_err(|e| HandlerError::RequestBuild(e.to_string()))
    }
}

#[async_trait]
impl TaskSource for AsanaClient {
    async fn fetch_task_list(&self) -> Result<TaskList, HandlerError> {
        let url = self.task_list_url()?;

        debug!(
            "Fetching task list from {}",
            url.host_str().unwrap_or("<unknown-host>")
        );

        let response = self
            .http
            .get(url)
            .bearer_auth(&self.config.access_token)
            .send()
            .await
            .map_err(|e| {
                if e.is_builder() {
                    HandlerError::RequestBuild(e.to_string())
                } else {
                    HandlerError::UpstreamUnavailable(e.to_string())
                }
            })?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| HandlerError::UpstreamUnavailable(e.to_string()))?;

        if status != reqwest::StatusCode::OK {
            warn!("Upstream answered {}", status);
            return Err(HandlerError::UpstreamStatus {
                status: status.as_u16(),
                snippet: body_snippet(&body),
            });
        }

        decode_task_list(&body)
    }
}

/// Decode the upstream body in two phases so an invalid JSON body and a
/// valid body with the wrong shape fail as distinct errors.
pub(crate) fn decode_task_list(body: &[u8]) -> Result<TaskList, HandlerError> {
    let value: serde_json::Value = serde_json::from_slice(body)
        .map_err(|e| HandlerError::MalformedResponse(e.to_string()))?;

    serde_json::from_value(value).map_err(|e| HandlerError::Schema(e.to_string()))
}

fn body_snippet(body: &[u8]) -> String {
    let text = String::from_utf8_lossy(body);
    if text.len() <= BODY_SNIPPET_LEN {
        return text.into_owned();
    }

    let mut end = BODY_SNIPPET_LEN;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &text[..end])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tasks::model::Task;

    fn client(url: &str) -> AsanaClient {
        let config = UpstreamConfig {
            task_list_url: url.to_string(),
            access_token: "test-token".to_string(),
            request_timeout: 5,
        };
        AsanaClient::new(config).unwrap()
    }

    #[test]
    fn test_task_list_url_carries_fixed_query() {
        let client = client("https://app.asana.com/api/1.0/user_task_lists/42/tasks");
        let url = client.task_list_url().unwrap();

        assert_eq!(url.host_str(), Some("app.asana.com"));
        assert_eq!(url.path(), "/api/1.0/user_task_lists/42/tasks");

        let query: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert!(query.contains(&("completed_since".to_string(), "now".to_string())));
        assert!(query.contains(&("opt_fields".to_string(), "name,assignee_status".to_string())));
    }

    #[test]
    fn test_task_list_url_rejects_malformed_base() {
        let client = client("not a url");
        let err = client.task_list_url().unwrap_err();

        assert!(matches!(err, HandlerError::RequestBuild(_)));
    }

    #[test]
    fn test_decode_valid_body() {
        let body = br#"{"data":[{"gid":"1","assignee_status":"today","name":"A"}]}"#;
        let list = decode_task_list(body).unwrap();

        assert_eq!(
            list.data,
            vec![Task {
                gid: "1".to_string(),
                assignee_status: "today".to_string(),
                name: "A".to_string(),
            }]
        );
    }

    #[test]
    fn test_decode_invalid_json_is_malformed() {
        let err = decode_task_list(b"not json at all").unwrap_err();
        assert!(matches!(err, HandlerError::MalformedResponse(_)));
    }

    #[test]
    fn test_decode_wrong_shape_is_schema_error() {
        // Valid JSON, but `data` is not a task array.
        let err = decode_task_list(br#"{"data":{"gid":"1"}}"#).unwrap_err();
        assert!(matches!(err, HandlerError::Schema(_)));

        // Valid JSON with no `data` field at all.
        let err = decode_task_list(br#"{"tasks":[]}"#).unwrap_err();
        assert!(matches!(err, HandlerError::Schema(_)));
    }

    #[test]
    fn test_body_snippet_truncates() {
        let short = body_snippet(b"short body");
        assert_eq!(short, "short body");

        let long = body_snippet("x".repeat(500).as_bytes());
        assert_eq!(long.len(), BODY_SNIPPET_LEN + 3);
        assert!(long.ends_with("..."));
    }
}
