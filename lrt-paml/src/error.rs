use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PamlError {
    #[error("unsupported site-class model: NSsites = {0} (supported: 0, 1, 2, 7, 8)")]
    UnsupportedSiteClass(u8),

    #[error("option '{0}' not found in control file")]
    MissingOption(String),

    #[error("invalid value for option '{option}': '{value}'")]
    InvalidOption { option: String, value: String },

    #[error("line {line}: expected 'key = value', got '{text}'")]
    MalformedLine { line: usize, text: String },

    #[error("no lnL line found for site model NSsites = {0}")]
    MissingLogLikelihood(u8),

    #[error("could not parse lnL line: '{0}'")]
    MalformedLogLikelihood(String),

    #[error("output contains no site-model results")]
    EmptyOutput,
}
