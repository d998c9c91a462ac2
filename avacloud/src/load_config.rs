/// `load_config` module: merges the optional YAML settings file with the
/// client credentials taken from the environment.
///
/// # Responsibilities
/// - Parse the user-supplied YAML file into [`AvaCloudConfig`]; every key is optional
///   and falls back to the public AVACloud endpoints.
/// - Read `AVACLOUD_CLIENT_ID` / `AVACLOUD_CLIENT_SECRET` from the environment.
///   Secrets never live in the YAML file.
///
/// Missing credentials are not an error here: token acquisition rejects them
/// before any request is sent, which keeps the failure in one place.
///
/// # Errors
/// Unreadable or invalid YAML surfaces as `anyhow::Error` at the CLI boundary.
use anyhow::Result;
use avacloud_core::config::{AvaCloudConfig, Credentials};
use std::fs;
use std::path::Path;
use tracing::{error, info, warn};

pub const CLIENT_ID_VAR: &str = "AVACLOUD_CLIENT_ID";
pub const CLIENT_SECRET_VAR: &str = "AVACLOUD_CLIENT_SECRET";

#[derive(Debug, Clone)]
pub struct CliConfig {
    pub avacloud: AvaCloudConfig,
    pub credentials: Credentials,
}

/// Loads settings from `path` (or the defaults when `None`) and injects credentials from env.
pub fn load_config(path: Option<&Path>) -> Result<CliConfig> {
    let avacloud = match path {
        Some(path) => read_settings(path)?,
        None => {
            info!("No config file given, using default AVACloud endpoints");
            AvaCloudConfig::default()
        }
    };
    avacloud.trace_loaded();

    Ok(CliConfig {
        avacloud,
        credentials: credentials_from_env(),
    })
}

fn read_settings(path: &Path) -> Result<AvaCloudConfig> {
    info!(config_path = ?path, "Loading configuration from file");

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

    // An empty file is a valid "all defaults" config.
    if config_content.trim().is_empty() {
        return Ok(AvaCloudConfig::default());
    }

    match serde_yaml::from_str(&config_content) {
        Ok(conf) => {
            info!(config_path = ?path, "Parsed config YAML successfully");
            Ok(conf)
        }
        Err(e) => {
            error!(error = ?e, config_path = ?path, "Failed to parse config YAML");
            Err(anyhow::anyhow!("Failed to parse config YAML: {e}"))
        }
    }
}

fn credentials_from_env() -> Credentials {
    let read = |name: &str| match std::env::var(name) {
        Ok(value) => value,
        Err(e) => {
            warn!(var = name, error = ?e, "Credential variable not set");
            String::new()
        }
    };
    let credentials = Credentials::new(read(CLIENT_ID_VAR), read(CLIENT_SECRET_VAR));
    info!(
        client_id_set = !credentials.client_id.is_empty(),
        client_secret_set = !credentials.client_secret.is_empty(),
        "Read client credentials from environment"
    );
    credentials
}
