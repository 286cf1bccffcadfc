use serde::{Deserialize, Serialize};

pub const CURRENT_SCHEMA_VERSION: u32 = 1;

/// User settings read by onboarding.
///
/// The store may hold more than this; unknown fields are ignored and missing
/// ones fall back to defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "current_schema_version")]
    pub schema_version: u32,

    #[serde(default)]
    pub developer_mode: bool,

    /// Only honored together with `developer_mode`.
    #[serde(default)]
    pub skip_seed_phrase_dialogs: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: CURRENT_SCHEMA_VERSION,
            developer_mode: false,
            skip_seed_phrase_dialogs: false,
        }
    }
}

impl Settings {
    pub fn bypasses_seed_ceremony(&self) -> bool {
        should_bypass_ceremony(self.developer_mode, self.skip_seed_phrase_dialogs)
    }
}

fn current_schema_version() -> u32 {
    CURRENT_SCHEMA_VERSION
}

/// The seed ceremony is skipped only when both flags are set.
pub fn should_bypass_ceremony(developer_mode: bool, skip_seed_phrase_dialogs: bool) -> bool {
    developer_mode && skip_seed_phrase_dialogs
}
