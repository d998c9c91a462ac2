#![doc = "Conversion client: implements the core ConversionApi trait against the AVACloud REST API."]
//
//! # Conversion client (CLI <-> Core)
//!
//! Bridges the [`ConversionApi`] contract from `avacloud-core` to the real
//! service. Every request carries the bearer token of the [`Session`] it was
//! built with; the session is created once by the CLI and never refreshed.
//!
//! - File uploads are sent as `multipart/form-data`.
//! - Project, invoice and wrapper documents are sent as JSON.
//! - Non-success statuses become [`ApiError::Status`] with the response body for diagnostics.

use async_trait::async_trait;
use avacloud_core::contract::{ConversionApi, ExcelOptions, FileParameter};
use avacloud_core::error::ApiError;
use avacloud_core::model::{AvaProjectWrapper, Invoice, ProjectDto};
use avacloud_core::session::Session;
use reqwest::multipart::{Form, Part};
use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;

pub const GAEB_TO_EXCEL: &str = "/conversion/gaeb/excel";
pub const GAEB_TO_AVA: &str = "/conversion/gaeb/ava";
pub const AVA_TO_GAEB: &str = "/conversion/ava/gaeb";
pub const INVOICE_TO_XRECHNUNG: &str = "/conversion/xrechnung/invoice-to-xrechnung";
pub const AVA_TO_XRECHNUNG: &str = "/conversion/xrechnung/ava-to-xrechnung";
pub const XRECHNUNG_TO_INVOICE: &str = "/conversion/xrechnung/xrechnung-to-invoice";
pub const XRECHNUNG_TO_AVA: &str = "/conversion/xrechnung/xrechnung-to-ava";

pub struct AvaCloudClient {
    http: reqwest::Client,
    session: Session,
}

impl AvaCloudClient {
    pub fn new(session: Session) -> Self {
        Self::with_client(reqwest::Client::new(), session)
    }

    pub fn with_client(http: reqwest::Client, session: Session) -> Self {
        tracing::info!(base_url = %session.base_url, "Initialized AvaCloudClient");
        Self { http, session }
    }

    fn post(&self, endpoint: &str) -> RequestBuilder {
        self.http
            .post(self.session.endpoint_url(endpoint))
            .bearer_auth(self.session.token.as_str())
    }

    async fn send(&self, endpoint: &str, request: RequestBuilder) -> Result<reqwest::Response, ApiError> {
        tracing::info!(endpoint, "Calling AVACloud");
        let response = request.send().await.map_err(|e| {
            tracing::error!(error = ?e, endpoint, "AVACloud request failed");
            ApiError::Network {
                endpoint: endpoint.to_string(),
                source: Box::new(e),
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| String::from("<Failed to decode response body>"));
            tracing::error!(status = %status, endpoint, "AVACloud returned error. Response body: {body}");
            return Err(ApiError::Status {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    async fn bytes(&self, endpoint: &str, request: RequestBuilder) -> Result<Vec<u8>, ApiError> {
        let response = self.send(endpoint, request).await?;
        let bytes = response.bytes().await.map_err(|e| {
            tracing::error!(error = ?e, endpoint, "Failed to read AVACloud response body");
            ApiError::Network {
                endpoint: endpoint.to_string(),
                source: Box::new(e),
            }
        })?;
        tracing::info!(endpoint, bytes = bytes.len(), "Received converted document");
        Ok(bytes.to_vec())
    }

    async fn json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        request: RequestBuilder,
    ) -> Result<T, ApiError> {
        let raw = self.bytes(endpoint, request).await?;
        serde_json::from_slice(&raw).map_err(|e| {
            tracing::error!(error = ?e, endpoint, "Failed to decode AVACloud JSON response");
            ApiError::Decode {
                endpoint: endpoint.to_string(),
                source: Box::new(e),
            }
        })
    }
}

fn file_form(field: &'static str, file: FileParameter) -> Form {
    let part = Part::bytes(file.data).file_name(file.file_name);
    Form::new().part(field, part)
}

fn excel_query(options: &ExcelOptions) -> Vec<(&'static str, String)> {
    let mut query = vec![
        ("writePrices", options.write_prices.to_string()),
        ("writeLongTexts", options.write_long_texts.to_string()),
    ];
    if let Some(culture) = &options.conversion_culture {
        query.push(("conversionCulture", culture.clone()));
    }
    query
}

#[async_trait]
impl ConversionApi for AvaCloudClient {
    async fn gaeb_to_excel(
        &self,
        file: FileParameter,
        options: ExcelOptions,
    ) -> Result<Vec<u8>, ApiError> {
        let request = self
            .post(GAEB_TO_EXCEL)
            .query(&excel_query(&options))
            .multipart(file_form("gaebFile", file));
        self.bytes(GAEB_TO_EXCEL, request).await
    }

    async fn gaeb_to_ava(&self, file: FileParameter) -> Result<ProjectDto, ApiError> {
        let request = self
            .post(GAEB_TO_AVA)
            .multipart(file_form("gaebFile", file));
        self.json(GAEB_TO_AVA, request).await
    }

    async fn ava_to_gaeb(&self, project: &ProjectDto) -> Result<Vec<u8>, ApiError> {
        let request = self.post(AVA_TO_GAEB).json(project);
        self.bytes(AVA_TO_GAEB, request).await
    }

    async fn invoice_to_xrechnung(&self, invoice: &Invoice) -> Result<Vec<u8>, ApiError> {
        let request = self.post(INVOICE_TO_XRECHNUNG).json(invoice);
        self.bytes(INVOICE_TO_XRECHNUNG, request).await
    }

    async fn ava_to_xrechnung(&self, wrapper: &AvaProjectWrapper) -> Result<Vec<u8>, ApiError> {
        let request = self.post(AVA_TO_XRECHNUNG).json(wrapper);
        self.bytes(AVA_TO_XRECHNUNG, request).await
    }

    async fn xrechnung_to_invoice(&self, file: FileParameter) -> Result<Invoice, ApiError> {
        let request = self
            .post(XRECHNUNG_TO_INVOICE)
            .multipart(file_form("xRechnungFile", file));
        self.json(XRECHNUNG_TO_INVOICE, request).await
    }

    async fn xrechnung_to_ava(
        &self,
        file: FileParameter,
    ) -> Result<AvaProjectWrapper, ApiError> {
        let request = self
            .post(XRECHNUNG_TO_AVA)
            .multipart(file_form("xRechnungFile", file));
        self.json(XRECHNUNG_TO_AVA, request).await
    }
}
