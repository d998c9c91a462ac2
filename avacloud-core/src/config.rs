use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info};

pub const DEFAULT_IDENTITY_TOKEN_URL: &str = "https://identity.dangl-it.com/connect/token";
pub const DEFAULT_AVACLOUD_BASE_URL: &str = "https://avacloud-api.dangl-it.com";
pub const DEFAULT_SCOPE: &str = "avacloud";

/// Non-secret settings for talking to the identity provider and AVACloud.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AvaCloudConfig {
    pub identity_token_url: String,
    pub avacloud_base_url: String,
    pub scope: String,
}

impl Default for AvaCloudConfig {
    fn default() -> Self {
        Self {
            identity_token_url: DEFAULT_IDENTITY_TOKEN_URL.to_string(),
            avacloud_base_url: DEFAULT_AVACLOUD_BASE_URL.to_string(),
            scope: DEFAULT_SCOPE.to_string(),
        }
    }
}

impl AvaCloudConfig {
    pub fn trace_loaded(&self) {
        info!(
            identity_token_url = %self.identity_token_url,
            avacloud_base_url = %self.avacloud_base_url,
            scope = %self.scope,
            "Loaded AvaCloudConfig"
        );
        debug!(?self, "AvaCloudConfig loaded (full debug)");
    }
}

/// OAuth2 client credentials. The secret never shows up in `Debug` output.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
}

impl Credentials {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }

    /// Both the identifier and the secret are present and non-blank.
    pub fn is_complete(&self) -> bool {
        !self.client_id.trim().is_empty() && !self.client_secret.trim().is_empty()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"***")
            .finish()
    }
}
