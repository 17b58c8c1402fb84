use pretty_assertions::assert_eq;
use push_core::{
    describe_submission, parse_response, FailureKind, Outcome, PushConfig, PushResponse,
    SubmissionResult, SETTINGS_FIELDS,
};

const API_URL: &str = "http://data.zz.baidu.com/urls?site=https://example.com&token=t";

fn urls() -> Vec<String> {
    vec!["https://example.com/archives/1.html".to_string()]
}

fn result(status: Option<u16>, body: &str) -> SubmissionResult {
    SubmissionResult {
        api_url: API_URL.to_string(),
        status,
        response: parse_response(body),
        transport_error: None,
    }
}

#[test]
fn success_line_reports_count_and_quota() {
    let result = result(Some(200), r#"{"success":1,"remain":99}"#);
    assert_eq!(
        result.outcome(),
        Outcome::Accepted {
            success: 1,
            remain: 99
        }
    );
    assert_eq!(
        describe_submission(&urls(), &result),
        "push succeeded | URL: https://example.com/archives/1.html | status: 200 | success: 1 | remain: 99"
    );
}

#[test]
fn missing_remain_defaults_to_zero() {
    let result = result(Some(200), r#"{"success":2}"#);
    assert_eq!(
        result.outcome(),
        Outcome::Accepted {
            success: 2,
            remain: 0
        }
    );
}

#[test]
fn rejection_line_carries_message_status_and_request() {
    let result = result(Some(400), r#"{"error":401,"message":"invalid token"}"#);
    let line = describe_submission(&urls(), &result);
    assert!(line.starts_with("push failed"));
    assert!(line.contains("status: 400"));
    assert!(line.contains("error: invalid token"));
    assert!(line.ends_with(&format!("request: {API_URL}")));
    assert!(!line.contains("transport error"));
}

#[test]
fn zero_success_on_200_is_a_rejection() {
    let result = result(Some(200), r#"{"success":0,"remain":10}"#);
    assert_eq!(
        result.outcome(),
        Outcome::Failed {
            kind: FailureKind::RemoteRejection,
            message: "unknown error".to_string()
        }
    );
}

#[test]
fn non_json_body_is_malformed_with_default_message() {
    assert_eq!(parse_response(""), None);
    assert_eq!(parse_response("<html>bad gateway</html>"), None);
    assert_eq!(parse_response("[1,2]"), None);

    let result = result(Some(502), "<html>bad gateway</html>");
    assert_eq!(
        result.outcome(),
        Outcome::Failed {
            kind: FailureKind::MalformedResponse,
            message: "unknown error".to_string()
        }
    );
}

#[test]
fn transport_failure_has_unset_status_and_error_text() {
    let result = SubmissionResult {
        api_url: API_URL.to_string(),
        status: None,
        response: None,
        transport_error: Some("operation timed out".to_string()),
    };
    let line = describe_submission(&urls(), &result);
    assert!(line.contains("status: unset"));
    assert!(line.contains("transport error: operation timed out"));
    assert!(matches!(
        result.outcome(),
        Outcome::Failed {
            kind: FailureKind::Transport,
            ..
        }
    ));
}

#[test]
fn unknown_fields_are_ignored() {
    let parsed =
        parse_response(r#"{"success":1,"remain":4,"not_same_site":[],"not_valid":[]}"#).unwrap();
    assert_eq!(
        parsed,
        PushResponse {
            success: Some(1),
            remain: Some(4),
            ..PushResponse::default()
        }
    );
}

#[test]
fn config_completeness() {
    assert!(!PushConfig::default().is_complete());
    assert!(!PushConfig::new("https://example.com", "  ").is_complete());
    assert!(!PushConfig::new("", "token").is_complete());
    assert!(PushConfig::new("https://example.com", "token").is_complete());
}

#[test]
fn settings_fields_describe_site_and_token() {
    let names: Vec<_> = SETTINGS_FIELDS.iter().map(|field| field.name).collect();
    assert_eq!(names, vec!["site", "token"]);
}
