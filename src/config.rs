use serde::Deserialize;
use tracing::{debug, info};

/// Names of the Notion database properties the synchroniser writes to.
/// Injectable so the same pipeline works against differently named
/// schemas; the defaults are the stable contract.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PropertyNames {
    pub title: String,
    pub status: String,
    pub url: String,
    pub assignee: String,
    pub issue_id: String,
}

impl Default for PropertyNames {
    fn default() -> Self {
        PropertyNames {
            title: "Title".to_string(),
            status: "Status".to_string(),
            url: "URL".to_string(),
            assignee: "Assignee".to_string(),
            issue_id: "Issue ID".to_string(),
        }
    }
}

/// Exit-code policy when a page write fails. The lookup is always
/// fatal; this only governs the create/update calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum WriteFailurePolicy {
    /// Log the failure and still exit 0 (best-effort sync, does not fail CI).
    #[default]
    Ignore,
    /// Propagate the failure so the process exits non-zero.
    Fail,
}

/// Runtime configuration, assembled once at startup by
/// [`crate::load_config::load_config`] and passed by reference into the
/// pipeline.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    pub notion_token: String,
    pub database_id: String,
    pub api_base: String,
    pub properties: PropertyNames,
    pub on_write_failure: WriteFailurePolicy,
}

impl SyncConfig {
    /// Logs the effective configuration. The token is deliberately absent.
    pub fn trace_loaded(&self) {
        info!(
            database_id = %self.database_id,
            api_base = %self.api_base,
            on_write_failure = ?self.on_write_failure,
            "Loaded SyncConfig"
        );
        debug!(properties = ?self.properties, "Property mapping in effect");
    }
}
