//! Example conversion workflows: GAEB and XRechnung.
//!
//! Each workflow drives a [`ConversionApi`] step by step, writes the returned
//! documents into an output directory and returns a report of what it did.
//!
//! # Major Types
//! - [`ExampleFiles`]: input document and output directory for a run
//! - [`GaebReport`], [`XRechnungReport`]: what a run produced
//!
//! # Ordering
//! Steps run strictly one after another; every call is awaited before the
//! next one starts. The first failing step aborts the workflow.
//!
//! # Navigation
//! - Entrypoints: [`run_gaeb_example`], [`run_xrechnung_example`]
//! - Sample documents: [`sample_project`], [`sample_invoice`], [`sample_ava_wrapper`]

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info};

use crate::contract::{ConversionApi, ExcelOptions, FileParameter};
use crate::error::WorkflowError;
use crate::model::{
    AvaProjectWrapper, CalculationDto, ElementDto, Invoice, InvoiceTotals, InvoiceType,
    Organization, PositionDto, PriceComponentDto, ProjectDto, ProjectInformationDto,
    ServiceSpecificationDto, SourceType,
};
use crate::positions::{project_position_count, project_total_price};

pub const DEFAULT_GAEB_INPUT: &str = "GAEBXML_EN.X86";
pub const DEFAULT_XRECHNUNG_INPUT: &str = "UblXRechnungSample.xml";
pub const CREATED_GAEB_FILE: &str = "CreatedGaebFile.X86";
pub const ROUNDTRIP_GAEB_FILE: &str = "Roundtrip.X86";
pub const XRECHNUNG_FROM_INVOICE_FILE: &str = "XRechnung.xml";
pub const XRECHNUNG_FROM_AVA_FILE: &str = "XRechnungFromAva.xml";
pub const SAMPLE_INVOICE_NUMBER: &str = "12-34/2024";
pub const SAMPLE_BUYER: &str = "Dangl IT GmbH";

/// Input document and output directory of a workflow run.
#[derive(Debug, Clone)]
pub struct ExampleFiles {
    pub input: PathBuf,
    pub output_dir: PathBuf,
}

impl ExampleFiles {
    pub fn new(input: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output_dir: output_dir.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectSummary {
    pub total_price: f64,
    pub position_count: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GaebReport {
    pub excel_file: PathBuf,
    pub summary: ProjectSummary,
    pub created_gaeb_file: PathBuf,
    pub roundtrip_file: PathBuf,
}

#[derive(Debug, Clone, PartialEq)]
pub struct XRechnungReport {
    pub from_invoice_file: PathBuf,
    pub from_ava_file: PathBuf,
    pub invoice_total_net: Option<f64>,
    pub wrapper_total_price: f64,
}

/// Reads `path` into a [`FileParameter`] named after the file.
pub fn read_file_parameter(path: &Path) -> Result<FileParameter, WorkflowError> {
    let data = fs::read(path).map_err(|e| {
        error!(error = ?e, path = ?path, "Failed to read input document");
        WorkflowError::Read {
            path: path.to_path_buf(),
            source: e,
        }
    })?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document".to_string());
    Ok(FileParameter { file_name, data })
}

fn write_output(path: &Path, bytes: &[u8]) -> Result<(), WorkflowError> {
    let result = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent),
        _ => Ok(()),
    }
    .and_then(|_| fs::write(path, bytes));

    result.map_err(|e| {
        error!(error = ?e, path = ?path, "Failed to write output file");
        WorkflowError::Write {
            path: path.to_path_buf(),
            source: e,
        }
    })?;
    info!(path = ?path, bytes = bytes.len(), "Saved conversion result");
    Ok(())
}

/// Converts the GAEB input to Excel and saves it as `<input name>.xlsx`.
pub async fn transform_gaeb_to_excel<A>(
    api: &A,
    files: &ExampleFiles,
) -> Result<PathBuf, WorkflowError>
where
    A: ConversionApi + ?Sized,
{
    info!(input = ?files.input, "Transforming GAEB file to Excel");
    let file = read_file_parameter(&files.input)?;
    let target = files.output_dir.join(format!("{}.xlsx", file.file_name));
    let options = ExcelOptions {
        conversion_culture: Some("de".to_string()),
        ..ExcelOptions::default()
    };
    let workbook = api.gaeb_to_excel(file, options).await?;
    write_output(&target, &workbook)?;
    Ok(target)
}

/// Converts the GAEB input to an AVA project and reads its net total and position count.
pub async fn project_total_price_and_position_count<A>(
    api: &A,
    input: &Path,
) -> Result<ProjectSummary, WorkflowError>
where
    A: ConversionApi + ?Sized,
{
    info!(input = ?input, "Transforming GAEB file to AVA Project");
    let file = read_file_parameter(input)?;
    let project = api.gaeb_to_ava(file).await?;
    let summary = ProjectSummary {
        total_price: project_total_price(&project),
        position_count: project_position_count(&project),
    };
    info!(
        total_price = summary.total_price,
        position_count = summary.position_count,
        "Read project totals"
    );
    Ok(summary)
}

/// A one-position project: 10 m² of concrete wall at 80 per unit.
pub fn sample_project() -> ProjectDto {
    let position = PositionDto {
        short_text: Some("Concrete Wall".to_string()),
        unit_tag: Some("m²".to_string()),
        quantity_components: Some(vec![CalculationDto::formula("10")]),
        price_components: Some(vec![PriceComponentDto {
            values: vec![CalculationDto::formula("80")],
        }]),
        ..PositionDto::default()
    };
    ProjectDto {
        project_information: None,
        service_specifications: Some(vec![ServiceSpecificationDto {
            elements: Some(vec![ElementDto::Position(position)]),
            ..ServiceSpecificationDto::default()
        }]),
    }
}

/// Creates a GAEB file from [`sample_project`].
pub async fn create_new_gaeb_file<A>(api: &A, output_dir: &Path) -> Result<PathBuf, WorkflowError>
where
    A: ConversionApi + ?Sized,
{
    info!("Creating new GAEB file from project");
    let gaeb = api.ava_to_gaeb(&sample_project()).await?;
    let target = output_dir.join(CREATED_GAEB_FILE);
    write_output(&target, &gaeb)?;
    Ok(target)
}

/// GAEB → AVA → GAEB, saved as [`ROUNDTRIP_GAEB_FILE`].
pub async fn roundtrip_gaeb_file<A>(api: &A, files: &ExampleFiles) -> Result<PathBuf, WorkflowError>
where
    A: ConversionApi + ?Sized,
{
    info!(input = ?files.input, "Converting GAEB file to AVA Project and back to GAEB");
    let file = read_file_parameter(&files.input)?;
    let project = api.gaeb_to_ava(file).await?;
    let gaeb = api.ava_to_gaeb(&project).await?;
    let target = files.output_dir.join(ROUNDTRIP_GAEB_FILE);
    write_output(&target, &gaeb)?;
    Ok(target)
}

pub async fn run_gaeb_example<A>(api: &A, files: &ExampleFiles) -> Result<GaebReport, WorkflowError>
where
    A: ConversionApi + ?Sized,
{
    info!("[GAEB] Starting GAEB example");
    let excel_file = transform_gaeb_to_excel(api, files).await?;
    let summary = project_total_price_and_position_count(api, &files.input).await?;
    let created_gaeb_file = create_new_gaeb_file(api, &files.output_dir).await?;
    let roundtrip_file = roundtrip_gaeb_file(api, files).await?;
    info!("[GAEB] Finished GAEB example");

    Ok(GaebReport {
        excel_file,
        summary,
        created_gaeb_file,
        roundtrip_file,
    })
}

/// Invoice `12-34/2024` over a net total of 100, issued by the caller.
pub fn sample_invoice() -> Invoice {
    Invoice {
        source_type: Some(SourceType::Own),
        invoice_number: Some(SAMPLE_INVOICE_NUMBER.to_string()),
        invoice_type: None,
        buyer: Some(Organization::named(SAMPLE_BUYER)),
        totals: Some(InvoiceTotals {
            total_net: Some(100.0),
            total_gross: None,
        }),
    }
}

/// Commercial invoice for a single fridge, priced through unit overrides.
pub fn sample_ava_wrapper() -> AvaProjectWrapper {
    let position = PositionDto {
        short_text: Some("Fridge".to_string()),
        unit_tag: Some("pcs".to_string()),
        quantity_override: Some(1.0),
        unit_price_override: Some(299.95),
        ..PositionDto::default()
    };
    AvaProjectWrapper {
        invoice_number: Some(SAMPLE_INVOICE_NUMBER.to_string()),
        invoice_type: Some(InvoiceType::CommercialInvoice),
        project: ProjectDto {
            project_information: Some(ProjectInformationDto {
                name: None,
                buyer: Some(Organization::named(SAMPLE_BUYER)),
            }),
            service_specifications: Some(vec![ServiceSpecificationDto {
                elements: Some(vec![ElementDto::Position(position)]),
                ..ServiceSpecificationDto::default()
            }]),
        },
    }
}

pub async fn create_xrechnung_from_invoice<A>(
    api: &A,
    output_dir: &Path,
) -> Result<PathBuf, WorkflowError>
where
    A: ConversionApi + ?Sized,
{
    info!("Creating XRechnung from Invoice");
    let xml = api.invoice_to_xrechnung(&sample_invoice()).await?;
    let target = output_dir.join(XRECHNUNG_FROM_INVOICE_FILE);
    write_output(&target, &xml)?;
    Ok(target)
}

pub async fn create_xrechnung_from_ava_wrapper<A>(
    api: &A,
    output_dir: &Path,
) -> Result<PathBuf, WorkflowError>
where
    A: ConversionApi + ?Sized,
{
    info!("Creating XRechnung from AVA Wrapper");
    let xml = api.ava_to_xrechnung(&sample_ava_wrapper()).await?;
    let target = output_dir.join(XRECHNUNG_FROM_AVA_FILE);
    write_output(&target, &xml)?;
    Ok(target)
}

/// Net total of the invoice parsed from the XRechnung input, if it has one.
pub async fn convert_xrechnung_to_invoice<A>(
    api: &A,
    input: &Path,
) -> Result<Option<f64>, WorkflowError>
where
    A: ConversionApi + ?Sized,
{
    info!(input = ?input, "Converting XRechnung to Invoice");
    let file = read_file_parameter(input)?;
    let invoice = api.xrechnung_to_invoice(file).await?;
    let total_net = invoice.totals.and_then(|totals| totals.total_net);
    info!(total_net = ?total_net, "Read invoice totals");
    Ok(total_net)
}

/// Project total of the AVA wrapper parsed from the XRechnung input.
pub async fn convert_xrechnung_to_ava_wrapper<A>(
    api: &A,
    input: &Path,
) -> Result<f64, WorkflowError>
where
    A: ConversionApi + ?Sized,
{
    info!(input = ?input, "Converting XRechnung to AVA Wrapper");
    let file = read_file_parameter(input)?;
    let wrapper = api.xrechnung_to_ava(file).await?;
    let total_price = project_total_price(&wrapper.project);
    info!(total_price, "Read wrapper project totals");
    Ok(total_price)
}

pub async fn run_xrechnung_example<A>(
    api: &A,
    files: &ExampleFiles,
) -> Result<XRechnungReport, WorkflowError>
where
    A: ConversionApi + ?Sized,
{
    info!("[XRECHNUNG] Starting XRechnung example");
    let from_invoice_file = create_xrechnung_from_invoice(api, &files.output_dir).await?;
    let from_ava_file = create_xrechnung_from_ava_wrapper(api, &files.output_dir).await?;
    let invoice_total_net = convert_xrechnung_to_invoice(api, &files.input).await?;
    let wrapper_total_price = convert_xrechnung_to_ava_wrapper(api, &files.input).await?;
    info!("[XRECHNUNG] Finished XRechnung example");

    Ok(XRechnungReport {
        from_invoice_file,
        from_ava_file,
        invoice_total_net,
        wrapper_total_price,
    })
}
