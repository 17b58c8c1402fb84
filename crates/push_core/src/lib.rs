//! Push core: configuration, URL normalization and outcome formatting. No I/O.
mod config;
mod normalize;
mod outcome;

pub use config::{ConfigSource, PushConfig, SettingField, SETTINGS_FIELDS};
pub use normalize::{
    build_api_url, clean_site, normalize_permalink, NormalizeError, DEFAULT_ENDPOINT,
};
pub use outcome::{
    describe_submission, parse_response, FailureKind, Outcome, PushResponse, SubmissionResult,
    INCOMPLETE_CONFIGURATION, UNKNOWN_ERROR,
};
