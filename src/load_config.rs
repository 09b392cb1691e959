use std::fs;
use std::path::Path;

use anyhow::Result;
use serde::Deserialize;
use tracing::{error, info};

use crate::config::{PropertyNames, SyncConfig, WriteFailurePolicy};
use crate::notion::DEFAULT_API_BASE;

#[derive(Deserialize, Default)]
struct StaticConfig {
    #[serde(default)]
    properties: PropertyNames,
    #[serde(default)]
    on_write_failure: WriteFailurePolicy,
}

/// Loads the optional static YAML mapping file (no secrets) and injects
/// required env vars for secrets. Returns a fully merged SyncConfig or
/// an error.
pub fn load_config(path: Option<&Path>) -> Result<SyncConfig> {
    let static_conf = match path {
        Some(path) => {
            info!(config_path = ?path, "Loading schema mapping from file");
            let config_content = match fs::read_to_string(path) {
                Ok(content) => {
                    info!(config_path = ?path, "Config file read successfully");
                    content
                }
                Err(e) => {
                    error!(error = ?e, config_path = ?path, "Failed to read config file");
                    return Err(anyhow::anyhow!(
                        "Failed to read config file {:?}: {}",
                        path,
                        e
                    ));
                }
            };
            match serde_yaml::from_str::<StaticConfig>(&config_content) {
                Ok(conf) => {
                    info!(config_path = ?path, "Parsed config YAML successfully");
                    conf
                }
                Err(e) => {
                    error!(error = ?e, config_path = ?path, "Failed to parse config YAML");
                    return Err(anyhow::anyhow!("Failed to parse config YAML: {e}"));
                }
            }
        }
        None => {
            info!("No config file given, using the default schema mapping");
            StaticConfig::default()
        }
    };

    let notion_token = match std::env::var("NOTION_TOKEN") {
        Ok(token) => {
            info!("NOTION_TOKEN found in env");
            token
        }
        Err(e) => {
            error!(error = ?e, "NOTION_TOKEN environment variable not set");
            return Err(anyhow::anyhow!(
                "NOTION_TOKEN environment variable not set: {e}"
            ));
        }
    };

    let database_id = match std::env::var("NOTION_DATABASE_ID") {
        Ok(id) => id,
        Err(e) => {
            error!(error = ?e, "NOTION_DATABASE_ID environment variable not set");
            return Err(anyhow::anyhow!(
                "NOTION_DATABASE_ID environment variable not set: {e}"
            ));
        }
    };

    let api_base =
        std::env::var("NOTION_API_BASE").unwrap_or_else(|_| DEFAULT_API_BASE.to_string());

    info!(
        database_id = %database_id,
        api_base = %api_base,
        on_write_failure = ?static_conf.on_write_failure,
        "Config loaded and merged successfully"
    );

    Ok(SyncConfig {
        notion_token,
        database_id,
        api_base,
        properties: static_conf.properties,
        on_write_failure: static_conf.on_write_failure,
    })
}
