//! OAuth2 client-credentials token acquisition.
//!
//! [`get_oauth2_access_token`] validates the credentials, posts the grant via a
//! [`TokenTransport`] and extracts `access_token` from the JSON answer. Each
//! failure maps to its own [`TokenError`] variant so the caller can decide how
//! to abort; nothing is retried.

use async_trait::async_trait;
use serde::Deserialize;
use std::fmt;
use tracing::{error, info};

use crate::config::Credentials;
use crate::contract::{TokenRequest, TokenTransport, TransportResponse};
use crate::error::{BoxError, TokenError};

/// Bearer token for the conversion service. `Debug` does not reveal it.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(***)")
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponseBody {
    #[serde(default)]
    access_token: Option<String>,
    // Logged only; servers disagree on their JSON types.
    #[serde(default)]
    token_type: Option<serde_json::Value>,
    #[serde(default)]
    expires_in: Option<serde_json::Value>,
}

/// Exchanges `credentials` for an access token at `identity_token_url`.
pub async fn get_oauth2_access_token<T>(
    transport: &T,
    credentials: &Credentials,
    identity_token_url: &str,
    scope: &str,
) -> Result<AccessToken, TokenError>
where
    T: TokenTransport + ?Sized,
{
    if !credentials.is_complete() {
        error!("Client id or client secret missing; not requesting an access token");
        return Err(TokenError::Configuration(
            "client id and client secret must be provided".to_string(),
        ));
    }

    let request = TokenRequest {
        url: identity_token_url.to_string(),
        client_id: credentials.client_id.clone(),
        client_secret: credentials.client_secret.clone(),
        scope: scope.to_string(),
    };
    info!(url = %request.url, client_id = %request.client_id, scope = %request.scope, "Requesting OAuth2 access token");

    let response = transport.post_form(&request).await.map_err(|e| {
        error!(error = %e, url = %request.url, "Identity endpoint unreachable");
        TokenError::Network(e)
    })?;

    if !(200..300).contains(&response.status) {
        error!(status = response.status, url = %request.url, "Identity endpoint rejected token request");
        return Err(TokenError::TokenRequestFailed {
            status: response.status,
        });
    }

    let body: TokenResponseBody = serde_json::from_str(&response.body).map_err(|e| {
        error!(error = %e, "Token response is not valid JSON");
        TokenError::ResponseParse(e)
    })?;

    match body.access_token.filter(|token| !token.is_empty()) {
        Some(token) => {
            info!(
                token_type = ?body.token_type,
                expires_in = ?body.expires_in,
                "Obtained OAuth2 access token"
            );
            Ok(AccessToken(token))
        }
        None => {
            error!("Token response did not contain an access_token");
            Err(TokenError::TokenMissingInResponse)
        }
    }
}

/// [`TokenTransport`] over reqwest: Basic auth plus an url-encoded form body.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTokenTransport {
    client: reqwest::Client,
}

impl ReqwestTokenTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// POST with Basic credentials and the url-encoded grant form.
    pub fn build_request(&self, request: &TokenRequest) -> reqwest::RequestBuilder {
        self.client
            .post(&request.url)
            .basic_auth(&request.client_id, Some(&request.client_secret))
            .form(&request.form())
    }
}

#[async_trait]
impl TokenTransport for ReqwestTokenTransport {
    async fn post_form(&self, request: &TokenRequest) -> Result<TransportResponse, BoxError> {
        let response = self.build_request(request).send().await?;

        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(TransportResponse { status, body })
    }
}
