//! lrt-paml: codeml (PAML) result readers
//!
//! Parses codeml control files and main output files, resolves NSsites
//! codes to named site-class models, and reads a results directory into
//! a `ModelResult` ready for a likelihood ratio test.

pub mod control;
pub mod error;
pub mod output;
pub mod reader;
pub mod site_class;

pub use control::ControlFile;
pub use error::PamlError;
pub use output::{OutputFile, SiteModelFit};
pub use reader::{compare_directories, read_model_result, DirectoryComparison, ModelResult};
pub use site_class::{site_class_model, SiteClassModel, SITE_CLASS_MODELS};
