use tracing::info;

use crate::config::{AvaCloudConfig, Credentials};
use crate::contract::TokenTransport;
use crate::error::TokenError;
use crate::token::{get_oauth2_access_token, AccessToken};

/// Authenticated context for one run: the service base URL and the token
/// obtained at startup. Built once by the entry point and handed to the
/// conversion client; never refreshed.
#[derive(Debug, Clone)]
pub struct Session {
    pub base_url: String,
    pub token: AccessToken,
}

impl Session {
    pub fn new(base_url: impl Into<String>, token: AccessToken) -> Self {
        Self {
            base_url: base_url.into(),
            token,
        }
    }

    /// Acquires a token with `credentials` and binds it to the configured base URL.
    pub async fn connect<T>(
        transport: &T,
        config: &AvaCloudConfig,
        credentials: &Credentials,
    ) -> Result<Self, TokenError>
    where
        T: TokenTransport + ?Sized,
    {
        let token = get_oauth2_access_token(
            transport,
            credentials,
            &config.identity_token_url,
            &config.scope,
        )
        .await?;
        info!(base_url = %config.avacloud_base_url, "AVACloud session established");
        Ok(Self::new(config.avacloud_base_url.clone(), token))
    }

    /// `base_url` joined with an absolute endpoint path.
    pub fn endpoint_url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}
