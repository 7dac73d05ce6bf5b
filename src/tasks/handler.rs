//! Fetch-and-filter handler and its error taxonomy.

use crate::http::{ApiResponse, StatusCode};
use crate::tasks::client::TaskSource;
use crate::tasks::model::due_today_names;
use std::sync::Arc;
use tracing::debug;

/// Handler for `GET /`.
///
/// One upstream fetch, one filter, one JSON array. Holds no mutable
/// state, so concurrent invocations need no synchronization.
pub struct TodayHandler {
    source: Arc<dyn TaskSource>,
}

impl TodayHandler {
    /// Create a handler backed by the given task source.
    pub fn new(source: Arc<dyn TaskSource>) -> Self {
        Self { source }
    }

    /// Run the fetch-and-filter pipeline.
    pub async fn handle(&self) -> Result<ApiResponse, HandlerError> {
        let list = self.source.fetch_task_list().await?;
        let names = due_today_names(&list);

        debug!("Kept {} of {} tasks", names.len(), list.data.len());

        Ok(ApiResponse::json(&names)?)
    }
}

/// Request-scoped pipeline failure.
///
/// Every variant maps to a 400 or 422 response with a `{"message": ...}`
/// body; none crash the process and none are retried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerError {
    /// The outbound request could not be constructed.
    RequestBuild(String),
    /// The upstream could not be reached (DNS, refused connection, timeout).
    UpstreamUnavailable(String),
    /// The upstream answered with a non-200 status.
    UpstreamStatus {
        /// Status code the upstream actually returned.
        status: u16,
        /// Bounded slice of the upstream body.
        snippet: String,
    },
    /// The upstream body was not valid JSON.
    MalformedResponse(String),
    /// The upstream body was valid JSON with an unexpected shape.
    Schema(String),
}

impl HandlerError {
    /// HTTP status this error surfaces as.
    pub fn status(&self) -> StatusCode {
        match self {
            HandlerError::RequestBuild(_)
            | HandlerError::MalformedResponse(_)
            | HandlerError::Schema(_) => StatusCode::UNPROCESSABLE_ENTITY,
            HandlerError::UpstreamUnavailable(_) | HandlerError::UpstreamStatus { .. } => {
                StatusCode::BAD_REQUEST
            }
        }
    }
}

impl std::fmt::Display for HandlerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HandlerError::RequestBuild(msg) => {
                write!(f, "failed to build upstream request: {}", msg)
            }
            HandlerError::UpstreamUnavailable(msg) => {
                write!(f, "upstream request failed: {}", msg)
            }
            HandlerError::UpstreamStatus { status, snippet } => {
                write!(f, "upstream answered {}: {}", status, snippet)
            }
            HandlerError::MalformedResponse(msg) => {
                write!(f, "upstream body is not valid JSON: {}", msg)
            }
            HandlerError::Schema(msg) => {
                write!(f, "unexpected upstream response shape: {}", msg)
            }
        }
    }
}

impl std::error::Error for HandlerError {}

impl From<HandlerError> for ApiResponse {
    fn from(err: HandlerError) -> Self {
        ApiResponse::error(err.status(), err.to_string())
    }
}

impl From<serde_json::Error> for HandlerError {
    fn from(err: serde_json::Error) -> Self {
        HandlerError::MalformedResponse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            HandlerError::RequestBuild("bad url".into()).status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            HandlerError::MalformedResponse("eof".into()).status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            HandlerError::Schema("data missing".into()).status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            HandlerError::UpstreamUnavailable("refused".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            HandlerError::UpstreamStatus {
                status: 500,
                snippet: String::new()
            }
            .status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_upstream_status_message_reports_received_code() {
        let err = HandlerError::UpstreamStatus {
            status: 401,
            snippet: r#"{"errors":[{"message":"Not Authorized"}]}"#.to_string(),
        };

        let message = err.to_string();
        assert!(message.contains("401"));
        assert!(message.contains("Not Authorized"));
    }

    #[test]
    fn test_error_into_response() {
        let err = HandlerError::UpstreamUnavailable("connection refused".into());
        let response: ApiResponse = err.into();

        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        let body: serde_json::Value = response.json_body().unwrap().unwrap();
        assert_eq!(
            body["message"],
            "upstream request failed: connection refused"
        );
    }
}
