use std::fmt;

use serde::{Deserialize, Serialize};

pub const INCOMPLETE_CONFIGURATION: &str =
    "incomplete configuration: site or token not set, skipping push";
pub const UNKNOWN_ERROR: &str = "unknown error";

/// JSON body returned by the link-submission API. Every field is optional:
/// success responses carry `success`/`remain`, failures `error`/`message`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PushResponse {
    pub success: Option<i64>,
    pub remain: Option<i64>,
    pub message: Option<String>,
    pub error: Option<i64>,
}

/// Empty, non-JSON or non-object bodies carry no structured result.
pub fn parse_response(body: &str) -> Option<PushResponse> {
    let body = body.trim();
    if body.is_empty() {
        return None;
    }
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(value) if value.is_object() => serde_json::from_value(value).ok(),
        _ => None,
    }
}

/// Everything observed about one POST. `status` is `None` when the request
/// never produced a response.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SubmissionResult {
    pub api_url: String,
    pub status: Option<u16>,
    pub response: Option<PushResponse>,
    pub transport_error: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Transport,
    RemoteRejection,
    MalformedResponse,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::Transport => write!(f, "transport error"),
            FailureKind::RemoteRejection => write!(f, "remote rejection"),
            FailureKind::MalformedResponse => write!(f, "malformed response"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Accepted { success: i64, remain: i64 },
    Failed { kind: FailureKind, message: String },
}

impl SubmissionResult {
    pub fn outcome(&self) -> Outcome {
        let accepted = self
            .response
            .as_ref()
            .filter(|_| self.status == Some(200))
            .and_then(|resp| {
                resp.success
                    .filter(|count| *count > 0)
                    .map(|success| (success, resp.remain.unwrap_or(0)))
            });
        if let Some((success, remain)) = accepted {
            return Outcome::Accepted { success, remain };
        }

        let kind = if self.transport_error.is_some() {
            FailureKind::Transport
        } else if self.response.is_none() {
            FailureKind::MalformedResponse
        } else {
            FailureKind::RemoteRejection
        };
        let message = self
            .response
            .as_ref()
            .and_then(|resp| resp.message.clone())
            .unwrap_or_else(|| UNKNOWN_ERROR.to_string());
        Outcome::Failed { kind, message }
    }
}

/// One human-readable outcome line, without the timestamp.
pub fn describe_submission(urls: &[String], result: &SubmissionResult) -> String {
    let url_list = urls.join(", ");
    let status = result
        .status
        .map(|code| code.to_string())
        .unwrap_or_else(|| "unset".to_string());

    match result.outcome() {
        Outcome::Accepted { success, remain } => format!(
            "push succeeded | URL: {url_list} | status: {status} | success: {success} | remain: {remain}"
        ),
        Outcome::Failed { message, .. } => {
            let detail = result
                .transport_error
                .as_deref()
                .map(|err| format!(" | transport error: {err}"))
                .unwrap_or_default();
            format!(
                "push failed | URL: {url_list} | status: {status} | error: {message}{detail} | request: {}",
                result.api_url
            )
        }
    }
}
