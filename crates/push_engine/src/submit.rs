use std::error::Error as _;
use std::time::Duration;

use reqwest::header::CONTENT_TYPE;

use push_core::{build_api_url, parse_response, SubmissionResult, DEFAULT_ENDPOINT};

/// The API has been seen to answer inconsistently without a browser agent.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

#[derive(Debug, Clone)]
pub struct SubmitSettings {
    pub endpoint: String,
    pub request_timeout: Duration,
    /// Skip certificate validation on the outbound call. On by default because
    /// the endpoint fails verification in some environments.
    pub accept_invalid_certs: bool,
    pub user_agent: String,
}

impl Default for SubmitSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            request_timeout: Duration::from_secs(10),
            accept_invalid_certs: true,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Sends a list of URLs to the link-submission API.
///
/// Implementations never fail: every problem ends up in the returned
/// [`SubmissionResult`] so the caller can log it and move on.
#[async_trait::async_trait]
pub trait Submitter: Send + Sync {
    async fn submit(&self, urls: &[String], site: &str, token: &str) -> SubmissionResult;
}

#[derive(Debug, Clone, Default)]
pub struct ReqwestSubmitter {
    settings: SubmitSettings,
}

impl ReqwestSubmitter {
    pub fn new(settings: SubmitSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &SubmitSettings {
        &self.settings
    }

    fn build_client(&self) -> Result<reqwest::Client, String> {
        reqwest::Client::builder()
            .timeout(self.settings.request_timeout)
            .user_agent(self.settings.user_agent.as_str())
            .danger_accept_invalid_certs(self.settings.accept_invalid_certs)
            .build()
            .map_err(|err| describe_reqwest_error(&err))
    }
}

#[async_trait::async_trait]
impl Submitter for ReqwestSubmitter {
    async fn submit(&self, urls: &[String], site: &str, token: &str) -> SubmissionResult {
        let api_url = build_api_url(&self.settings.endpoint, site, token);
        let mut result = SubmissionResult {
            api_url: api_url.clone(),
            ..SubmissionResult::default()
        };

        let client = match self.build_client() {
            Ok(client) => client,
            Err(err) => {
                result.transport_error = Some(err);
                return result;
            }
        };

        let response = match client
            .post(api_url.as_str())
            .header(CONTENT_TYPE, "text/plain")
            .body(urls.join("\n"))
            .send()
            .await
        {
            Ok(response) => response,
            Err(err) => {
                result.transport_error = Some(describe_reqwest_error(&err));
                return result;
            }
        };

        result.status = Some(response.status().as_u16());
        match response.text().await {
            Ok(body) => result.response = parse_response(&body),
            Err(err) => result.transport_error = Some(describe_reqwest_error(&err)),
        }
        result
    }
}

/// reqwest's top-level message hides the cause; append the source chain.
fn describe_reqwest_error(err: &reqwest::Error) -> String {
    let mut text = if err.is_timeout() {
        format!("timeout: {err}")
    } else {
        err.to_string()
    };
    let mut source = err.source();
    while let Some(cause) = source {
        text.push_str(": ");
        text.push_str(&cause.to_string());
        source = cause.source();
    }
    text
}
