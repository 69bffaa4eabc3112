//! Top-level generation driver.
//!
//! Reads the registry and the metric documents, resolves the metric sets and
//! renders both artifacts. Artifacts are only written once every input has
//! been resolved, so a fatal error leaves existing outputs untouched.

use std::fs;
use std::path::{Path, PathBuf};

use oa_metrics::{resolve_documents, Document, GuidRegistry, MetricSet, PipelineConfig, Warning};
use tracing::debug;

use crate::codegen::Codegen;
use crate::emit::{emit, EmitOptions};
use crate::error::GenerateError;

/// Inputs and outputs of one generation run.
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    /// Metric-description documents, in order.
    pub metrics: Vec<PathBuf>,
    /// GUID registry document.
    pub guids: PathBuf,
    /// Selection criteria.
    pub config: PipelineConfig,
    /// Destination of the C source; `None` discards it.
    pub c_out: Option<PathBuf>,
    /// Destination of the C header; `None` discards it.
    pub h_out: Option<PathBuf>,
    /// Emission switches.
    pub options: EmitOptions,
}

/// Outcome of a successful run.
#[derive(Debug, Clone)]
pub struct GenerateResult {
    /// Emitted metric sets in output order.
    pub sets: Vec<MetricSet>,
    /// Sets skipped with a warning.
    pub warnings: Vec<Warning>,
    /// Rendered C source.
    pub source: Codegen,
    /// Rendered C header.
    pub header: Codegen,
}

/// Runs the whole generator.
///
/// # Errors
///
/// Returns [`GenerateError::Read`] when an input cannot be read,
/// [`GenerateError::Metrics`] when the inputs violate a structural invariant
/// and [`GenerateError::Write`] when an artifact cannot be written.
pub fn generate(request: &GenerateRequest) -> Result<GenerateResult, GenerateError> {
    let registry_text = read(&request.guids)?;
    let registry = GuidRegistry::parse(&request.guids.to_string_lossy(), &registry_text)?;

    let texts = request
        .metrics
        .iter()
        .map(|path| Ok((path.to_string_lossy().into_owned(), read(path)?)))
        .collect::<Result<Vec<_>, GenerateError>>()?;
    let documents: Vec<Document<'_>> = texts
        .iter()
        .map(|(name, text)| Document { name, text })
        .collect();

    let resolution = resolve_documents(&request.config, &registry, &documents)?;
    debug!(
        resolved = resolution.sets.len(),
        skipped = resolution.warnings.len(),
        "resolution finished"
    );

    let mut source = Codegen::new(request.c_out.clone()).with_tabs();
    let mut header = Codegen::new(request.h_out.clone()).with_tabs();
    emit(
        &resolution.sets,
        &request.config.chipset,
        request.options,
        &mut source,
        &mut header,
    );

    write(&header)?;
    write(&source)?;

    Ok(GenerateResult {
        sets: resolution.sets,
        warnings: resolution.warnings,
        source,
        header,
    })
}

fn read(path: &Path) -> Result<String, GenerateError> {
    fs::read_to_string(path).map_err(|source| GenerateError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn write(artifact: &Codegen) -> Result<(), GenerateError> {
    artifact.finish().map_err(|source| GenerateError::Write {
        path: artifact.path().map(Path::to_path_buf).unwrap_or_default(),
        source,
    })
}
