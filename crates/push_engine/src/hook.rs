use std::fmt;
use std::thread;

use push_core::{
    describe_submission, normalize_permalink, ConfigSource, FailureKind, Outcome,
    INCOMPLETE_CONFIGURATION,
};
use push_logging::{push_debug, push_error, push_info, push_warn};

use crate::{OutcomeLog, Submitter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Post,
    Page,
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentKind::Post => write!(f, "post"),
            ContentKind::Page => write!(f, "page"),
        }
    }
}

/// What the host hands over after a successful publish.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedPost {
    pub permalink: String,
    pub kind: ContentKind,
}

impl PublishedPost {
    pub fn new(permalink: impl Into<String>, kind: ContentKind) -> Self {
        Self {
            permalink: permalink.into(),
            kind,
        }
    }
}

/// Entry point the host calls after a post or page is published.
///
/// Every call makes one independent attempt. Nothing is ever returned to the
/// host except the content it passed in; the outcome only goes to the log.
pub struct PublishHook<C, S> {
    config: C,
    submitter: S,
    log: OutcomeLog,
}

impl<C: ConfigSource, S: Submitter> PublishHook<C, S> {
    pub fn new(config: C, submitter: S, log: OutcomeLog) -> Self {
        Self {
            config,
            submitter,
            log,
        }
    }

    pub fn outcome_log(&self) -> &OutcomeLog {
        &self.log
    }

    pub async fn on_publish<T>(&self, content: T, post: &PublishedPost) -> T {
        self.push(post).await;
        content
    }

    /// Same as [`Self::on_publish`] for synchronous hosts. Blocks for at most
    /// the submitter's timeout. When the calling thread already runs inside a
    /// tokio runtime the push is driven from a scoped thread instead, since
    /// nesting `block_on` would panic.
    pub fn on_publish_blocking<T>(&self, content: T, post: &PublishedPost) -> T {
        if tokio::runtime::Handle::try_current().is_ok() {
            let pushed = thread::scope(|scope| scope.spawn(|| self.push_blocking(post)).join());
            if pushed.is_err() {
                push_error!("Push thread for {} panicked", post.permalink);
            }
        } else {
            self.push_blocking(post);
        }
        content
    }

    fn push_blocking(&self, post: &PublishedPost) {
        match tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime.block_on(self.push(post)),
            Err(err) => {
                push_error!("Cannot start runtime for push: {}", err);
                self.log
                    .append(&format!("push skipped: cannot start runtime: {err}"));
            }
        }
    }

    async fn push(&self, post: &PublishedPost) {
        let config = self.config.config();
        if !config.is_complete() {
            push_warn!("Push skipped for {}: site or token not configured", post.permalink);
            self.log.append(INCOMPLETE_CONFIGURATION);
            return;
        }
        let site = config.site.trim();
        let token = config.token.trim();

        let url = match normalize_permalink(&post.permalink, site) {
            Ok(url) => url,
            Err(err) => {
                push_warn!("Push skipped: {}", err);
                self.log.append(&format!("push skipped: {err}"));
                return;
            }
        };
        push_debug!("Pushing {} {} as {}", post.kind, post.permalink, url);

        let urls = vec![url];
        let result = self.submitter.submit(&urls, site, token).await;
        match result.outcome() {
            Outcome::Accepted { success, remain } => {
                push_info!("Pushed {} (success {}, remain {})", urls[0], success, remain);
            }
            Outcome::Failed { kind, message } => {
                push_warn!(
                    "{}",
                    failure_diagnostic(&urls[0], kind, &message, result.transport_error.as_deref())
                );
            }
        }
        self.log.append(&describe_submission(&urls, &result));
    }
}

fn failure_diagnostic(
    url: &str,
    kind: FailureKind,
    message: &str,
    transport_error: Option<&str>,
) -> String {
    match transport_error {
        Some(transport) => format!("Push of {url} failed ({kind}): {message}: {transport}"),
        None => format!("Push of {url} failed ({kind}): {message}"),
    }
}
