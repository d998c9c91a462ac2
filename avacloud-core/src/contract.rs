#![allow(unused)]

//! # contract: seams between the core and the network
//!
//! Two async traits separate the core logic from HTTP:
//! - [`TokenTransport`] posts the client-credentials form to the identity provider.
//! - [`ConversionApi`] covers the AVACloud conversion endpoints used by the workflows.
//!
//! Both are annotated for `mockall`, so tests can drive the token flow and the
//! workflows without a server. Real implementations live in
//! [`crate::token::ReqwestTokenTransport`] and in the CLI crate.

use async_trait::async_trait;
use std::fmt;

use mockall::{automock, predicate::*};

use crate::error::{ApiError, BoxError};
use crate::model::{AvaProjectWrapper, Invoice, ProjectDto};

/// Everything the identity endpoint needs for a client-credentials grant.
#[derive(Clone, PartialEq, Eq)]
pub struct TokenRequest {
    /// Identity provider token endpoint.
    pub url: String,
    /// Sent as the Basic auth user name.
    pub client_id: String,
    /// Sent as the Basic auth password.
    pub client_secret: String,
    pub scope: String,
}

impl TokenRequest {
    pub const GRANT_TYPE: &'static str = "client_credentials";

    /// Form fields, sent url-encoded.
    pub fn form(&self) -> [(&'static str, &str); 2] {
        [("grant_type", Self::GRANT_TYPE), ("scope", &self.scope)]
    }
}

impl fmt::Debug for TokenRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenRequest")
            .field("url", &self.url)
            .field("client_id", &self.client_id)
            .field("client_secret", &"***")
            .field("scope", &self.scope)
            .finish()
    }
}

/// Raw answer of the identity endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

/// Sends the token request. Errors are transport-level only: any HTTP status
/// counts as a response.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait TokenTransport: Send + Sync {
    async fn post_form(&self, request: &TokenRequest) -> Result<TransportResponse, BoxError>;
}

/// A file to upload, named as the service should see it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileParameter {
    pub file_name: String,
    pub data: Vec<u8>,
}

/// Options for the GAEB → Excel conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExcelOptions {
    pub write_prices: bool,
    pub write_long_texts: bool,
    /// Culture for number and date formatting, e.g. `de`.
    pub conversion_culture: Option<String>,
}

impl Default for ExcelOptions {
    fn default() -> Self {
        Self {
            write_prices: true,
            write_long_texts: true,
            conversion_culture: None,
        }
    }
}

/// The AVACloud conversion endpoints. Implementors attach authentication.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait ConversionApi: Send + Sync {
    /// GAEB file → Excel workbook bytes.
    async fn gaeb_to_excel(
        &self,
        file: FileParameter,
        options: ExcelOptions,
    ) -> Result<Vec<u8>, ApiError>;

    /// GAEB file → unified AVA project.
    async fn gaeb_to_ava(&self, file: FileParameter) -> Result<ProjectDto, ApiError>;

    /// AVA project → GAEB file bytes.
    async fn ava_to_gaeb(&self, project: &ProjectDto) -> Result<Vec<u8>, ApiError>;

    /// Invoice → XRechnung XML bytes.
    async fn invoice_to_xrechnung(&self, invoice: &Invoice) -> Result<Vec<u8>, ApiError>;

    /// AVA project wrapper → XRechnung XML bytes.
    async fn ava_to_xrechnung(&self, wrapper: &AvaProjectWrapper) -> Result<Vec<u8>, ApiError>;

    /// XRechnung file → invoice.
    async fn xrechnung_to_invoice(&self, file: FileParameter) -> Result<Invoice, ApiError>;

    /// XRechnung file → AVA project wrapper.
    async fn xrechnung_to_ava(&self, file: FileParameter)
        -> Result<AvaProjectWrapper, ApiError>;
}
