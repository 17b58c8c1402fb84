//! Push engine: the HTTP submission, the outcome log file and the publish hook.
mod hook;
mod outcome_log;
mod submit;

pub use hook::{ContentKind, PublishHook, PublishedPost};
pub use outcome_log::{format_entry, OutcomeLog, OutcomeLogError};
pub use submit::{ReqwestSubmitter, SubmitSettings, Submitter, DEFAULT_USER_AGENT};
