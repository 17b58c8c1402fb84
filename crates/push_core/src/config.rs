use serde::{Deserialize, Serialize};

/// The two settings an administrator provides. Empty means unset.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PushConfig {
    pub site: String,
    pub token: String,
}

impl PushConfig {
    pub fn new(site: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            site: site.into(),
            token: token.into(),
        }
    }

    /// Both values present. Whitespace-only counts as unset.
    pub fn is_complete(&self) -> bool {
        !self.site.trim().is_empty() && !self.token.trim().is_empty()
    }
}

/// Whatever store the embedding application keeps the settings in.
pub trait ConfigSource: Send + Sync {
    fn config(&self) -> PushConfig;
}

impl ConfigSource for PushConfig {
    fn config(&self) -> PushConfig {
        self.clone()
    }
}

/// Description of one setting, for a host settings form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettingField {
    pub name: &'static str,
    pub label: &'static str,
    pub help: &'static str,
}

pub const SETTINGS_FIELDS: &[SettingField] = &[
    SettingField {
        name: "site",
        label: "Site origin",
        help: "e.g. https://www.example.com (must match the site verified on the search console exactly)",
    },
    SettingField {
        name: "token",
        label: "Push token",
        help: "obtain it from https://ziyuan.baidu.com/linksubmit/index",
    },
];
