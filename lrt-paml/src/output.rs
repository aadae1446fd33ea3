//! codeml main result file parser.
//!
//! When several NSsites values are run together, codeml writes one block
//! per site model, each opened by a header line:
//! ```text
//! Model 7: beta
//! ...
//! lnL(ntime:  9  np: 12):  -2014.424218      +0.000000
//! ...
//! Model 8: beta&w>1
//! ...
//! lnL(ntime:  9  np: 14):  -2010.143759      +0.000000
//! ```
//! A single-model run has no such header; the whole file is then one block
//! and its code comes from the control file.

use std::path::Path;

use anyhow::{Context, Result};

use crate::error::PamlError;

/// Fit of one site model as reported in the output file.
#[derive(Debug, Clone, PartialEq)]
pub struct SiteModelFit {
    /// NSsites code of the block.
    pub ns_sites: u8,
    /// Description from the block header (e.g. "beta&w>1").
    pub description: Option<String>,
    /// Log-likelihood, if the block reached the lnL line.
    pub log_likelihood: Option<f64>,
    /// Number of branch lengths estimated (`ntime`).
    pub n_branches: Option<u32>,
    /// Total number of free parameters (`np`).
    pub n_params: Option<u32>,
}

impl SiteModelFit {
    fn new(ns_sites: u8, description: Option<String>) -> Self {
        Self {
            ns_sites,
            description,
            log_likelihood: None,
            n_branches: None,
            n_params: None,
        }
    }

    /// Log-likelihood, or an error if the block has none.
    pub fn lnl(&self) -> Result<f64, PamlError> {
        self.log_likelihood
            .ok_or(PamlError::MissingLogLikelihood(self.ns_sites))
    }
}

/// Site-model fits in the order they appear in the file.
#[derive(Debug, Clone)]
pub struct OutputFile {
    pub fits: Vec<SiteModelFit>,
}

impl OutputFile {
    /// Read and parse a codeml output file.
    ///
    /// `default_code` keys the single block of a file without model headers.
    pub fn parse<P: AsRef<Path>>(path: P, default_code: u8) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read codeml output file: {}", path.display()))?;
        Self::parse_str(&contents, default_code)
            .with_context(|| format!("Malformed codeml output file: {}", path.display()))
    }

    pub fn parse_str(contents: &str, default_code: u8) -> Result<Self, PamlError> {
        let mut fits: Vec<SiteModelFit> = Vec::new();
        let has_headers = contents.lines().any(|l| parse_model_header(l).is_some());
        if !has_headers {
            fits.push(SiteModelFit::new(default_code, None));
        }

        for line in contents.lines() {
            if let Some((code, description)) = parse_model_header(line) {
                fits.push(SiteModelFit::new(code, Some(description)));
                continue;
            }

            let Some(current) = fits.last_mut() else {
                // Preamble before the first model header
                continue;
            };
            if current.log_likelihood.is_some() {
                continue;
            }
            if let Some(lnl) = parse_lnl_line(line)? {
                current.log_likelihood = Some(lnl.value);
                current.n_branches = lnl.ntime;
                current.n_params = lnl.np;
            }
        }

        if !has_headers && fits[0].log_likelihood.is_none() {
            return Err(PamlError::EmptyOutput);
        }

        Ok(Self { fits })
    }

    /// The first site model in the file.
    pub fn first(&self) -> Option<&SiteModelFit> {
        self.fits.first()
    }

    /// The fit for a given NSsites code.
    pub fn get(&self, ns_sites: u8) -> Option<&SiteModelFit> {
        self.fits.iter().find(|f| f.ns_sites == ns_sites)
    }
}

/// Parse a `Model <n>: <description>` header.
fn parse_model_header(line: &str) -> Option<(u8, String)> {
    let rest = line.strip_prefix("Model ")?;
    let (code, description) = rest.split_once(':')?;
    let code = code.trim().parse::<u8>().ok()?;
    Some((code, description.trim().to_string()))
}

struct LnlLine {
    value: f64,
    ntime: Option<u32>,
    np: Option<u32>,
}

/// Parse `lnL(ntime:  9  np: 12):  -2014.424218  +0.000000`.
/// Returns `Ok(None)` for lines that are not lnL lines.
fn parse_lnl_line(line: &str) -> Result<Option<LnlLine>, PamlError> {
    let trimmed = line.trim_start();
    let Some(inner) = trimmed.strip_prefix("lnL(") else {
        return Ok(None);
    };
    let malformed = || PamlError::MalformedLogLikelihood(trimmed.to_string());

    let (counts, rest) = inner.split_once("):").ok_or_else(malformed)?;
    let value = rest
        .split_whitespace()
        .next()
        .and_then(|tok| tok.parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .ok_or_else(malformed)?;

    Ok(Some(LnlLine {
        value,
        ntime: count_after(counts, "ntime:"),
        np: count_after(counts, "np:"),
    }))
}

fn count_after(text: &str, key: &str) -> Option<u32> {
    let start = text.find(key)? + key.len();
    text[start..]
        .split_whitespace()
        .next()
        .and_then(|tok| tok.parse().ok())
}
