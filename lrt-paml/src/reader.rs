//! Read a codeml results directory into a model result.
//!
//! Directory layout:
//! ```text
//! <dir>/codeml.ctl
//! <dir>/<dir name>_out.paml     (or the control file's `outfile`)
//! ```

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::Serialize;
use tracing::{debug, info, warn};

use lrt_core::compare::{Comparison, ModelSummary};

use crate::control::{ControlFile, CONTROL_FILE_NAME};
use crate::error::PamlError;
use crate::output::OutputFile;
use crate::site_class::site_class_model;

/// Suffix appended to the directory name to form the output file name.
pub const OUTPUT_SUFFIX: &str = "_out.paml";

/// A fitted site model read from a results directory.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelResult {
    /// Model name (e.g. "M8").
    pub name: String,
    /// NSsites code the model was resolved from.
    pub ns_sites: u8,
    /// Free parameters of the site model.
    pub degrees_of_freedom: u32,
    /// Maximised log-likelihood.
    pub log_likelihood: f64,
    /// `np` from the lnL line.
    pub n_params: Option<u32>,
    /// `ntime` from the lnL line.
    pub n_branches: Option<u32>,
    /// Output file the log-likelihood was read from.
    pub output_file: PathBuf,
}

impl ModelResult {
    pub fn summary(&self) -> ModelSummary {
        ModelSummary {
            name: self.name.clone(),
            degrees_of_freedom: self.degrees_of_freedom,
            log_likelihood: self.log_likelihood,
        }
    }
}

/// Read the model name, degrees of freedom and log-likelihood from a
/// codeml results directory.
pub fn read_model_result<P: AsRef<Path>>(dir: P) -> Result<ModelResult> {
    let dir = dir.as_ref();
    if !dir.is_dir() {
        bail!("Results directory not found: {}", dir.display());
    }

    let ctl = ControlFile::parse(dir.join(CONTROL_FILE_NAME))?;
    let codes = ctl
        .ns_sites()
        .with_context(|| format!("Invalid control file in {}", dir.display()))?;
    let code = codes[0];
    if codes.len() > 1 {
        debug!(
            "{}: NSsites lists {:?}, using the first model",
            dir.display(),
            codes
        );
    }

    let model = site_class_model(code)?;
    let output_path = locate_output_file(dir, &ctl)?;
    let output = OutputFile::parse(&output_path, code)?;

    let fit = output.first().ok_or(PamlError::EmptyOutput)?;
    if fit.ns_sites != code {
        warn!(
            "{}: control file selects NSsites = {} ({}) but the first model in {} is NSsites = {}",
            dir.display(),
            code,
            model.description,
            output_path.display(),
            fit.ns_sites
        );
    }
    let log_likelihood = fit
        .lnl()
        .with_context(|| format!("No log-likelihood in {}", output_path.display()))?;

    info!(
        "Read {} (NSsites = {}, df = {}, lnL = {}) from {}",
        model.name,
        code,
        model.degrees_of_freedom,
        log_likelihood,
        output_path.display()
    );

    Ok(ModelResult {
        name: model.name.to_string(),
        ns_sites: code,
        degrees_of_freedom: model.degrees_of_freedom,
        log_likelihood,
        n_params: fit.n_params,
        n_branches: fit.n_branches,
        output_file: output_path,
    })
}

/// Find the main result file: `<dir>/<dir name>_out.paml`, falling back to
/// the control file's `outfile`.
fn locate_output_file(dir: &Path, ctl: &ControlFile) -> Result<PathBuf> {
    let mut tried = Vec::new();

    let canonical = dir
        .canonicalize()
        .with_context(|| format!("Failed to resolve directory: {}", dir.display()))?;
    if let Some(name) = canonical.file_name() {
        let candidate = dir.join(format!("{}{}", name.to_string_lossy(), OUTPUT_SUFFIX));
        if candidate.is_file() {
            return Ok(candidate);
        }
        tried.push(candidate);
    }

    if let Some(outfile) = ctl.outfile() {
        let candidate = dir.join(outfile);
        if candidate.is_file() {
            debug!("Using outfile from control file: {}", candidate.display());
            return Ok(candidate);
        }
        tried.push(candidate);
    }

    let tried: Vec<String> = tried.iter().map(|p| p.display().to_string()).collect();
    bail!(
        "No codeml output file found in {} (tried: {})",
        dir.display(),
        tried.join(", ")
    )
}

/// Both model results and the test between them.
#[derive(Debug, Clone, Serialize)]
pub struct DirectoryComparison {
    pub null: ModelResult,
    pub alternate: ModelResult,
    pub comparison: Comparison,
}

/// Run the likelihood ratio test for two codeml results directories.
pub fn compare_directories<P: AsRef<Path>, Q: AsRef<Path>>(
    h0_dir: P,
    h1_dir: Q,
    alpha: f64,
) -> Result<DirectoryComparison> {
    let null = read_model_result(h0_dir.as_ref())
        .with_context(|| format!("Failed to read H0 results: {}", h0_dir.as_ref().display()))?;
    let alternate = read_model_result(h1_dir.as_ref())
        .with_context(|| format!("Failed to read H1 results: {}", h1_dir.as_ref().display()))?;

    let comparison = Comparison::new(null.summary(), alternate.summary(), alpha)?;

    Ok(DirectoryComparison {
        null,
        alternate,
        comparison,
    })
}
