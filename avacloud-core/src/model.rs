//! # model: AVACloud data transfer objects
//!
//! Typed counterparts of the JSON documents exchanged with the conversion
//! service. Field names follow the service's camelCase wire format; every
//! optional field is skipped on serialization so that hand-built projects
//! stay as small as the service allows.
//!
//! ## Element tree
//! [`ElementDto`] is a closed sum type discriminated by the
//! `elementTypeDiscriminator` field. Element kinds this client does not know
//! about deserialize into [`ElementDto::Unknown`] instead of failing.

use serde::{Deserialize, Deserializer, Serialize};

/// The unified AVA project model returned by GAEB → AVA conversions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_information: Option<ProjectInformationDto>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_specifications: Option<Vec<ServiceSpecificationDto>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectInformationDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buyer: Option<Organization>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceSpecificationDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_title: Option<String>,
    /// Net total as computed by the service; `null` reads as 0.
    #[serde(default, deserialize_with = "null_as_zero")]
    pub total_price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elements: Option<Vec<ElementDto>>,
}

/// A node of the service specification tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "elementTypeDiscriminator")]
pub enum ElementDto {
    #[serde(rename = "PositionDto")]
    Position(PositionDto),
    #[serde(rename = "ServiceSpecificationGroupDto")]
    Group(ServiceSpecificationGroupDto),
    /// Any element kind not modelled here (notes, execution descriptions, ...).
    #[serde(other)]
    Unknown,
}

/// A billable line item.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_number: Option<ItemNumberDto>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_tag: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity_components: Option<Vec<CalculationDto>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_components: Option<Vec<PriceComponentDto>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity_override: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_price_override: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_price: Option<f64>,
}

/// A container of further elements. `elements` may be absent on the wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceSpecificationGroupDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_number: Option<ItemNumberDto>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elements: Option<Vec<ElementDto>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemNumberDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub string_representation: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formula: Option<String>,
}

impl CalculationDto {
    pub fn formula(formula: impl Into<String>) -> Self {
        Self {
            formula: Some(formula.into()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceComponentDto {
    #[serde(default)]
    pub values: Vec<CalculationDto>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Organization {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
        }
    }
}

/// Who issued the invoice relative to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceType {
    #[serde(rename = "Self")]
    Own,
    Other,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvoiceType {
    CommercialInvoice,
    PartialInvoice,
    CreditNote,
    FinalInvoice,
    CorrectedInvoice,
    /// Invoice types added to the service after this client.
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceTotals {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_net: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_gross: Option<f64>,
}

/// A standalone electronic invoice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_type: Option<SourceType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invoice_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invoice_type: Option<InvoiceType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buyer: Option<Organization>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub totals: Option<InvoiceTotals>,
}

/// An AVA project carrying the invoice metadata needed for XRechnung.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvaProjectWrapper {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invoice_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invoice_type: Option<InvoiceType>,
    #[serde(default)]
    pub project: ProjectDto,
}

fn null_as_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or_default())
}
