//! codeml site-class models.
//!
//! The NSsites control option selects how dN/dS varies among codon sites.
//! Only the models used in the standard nested pairs (M0, M1a/M2a, M7/M8)
//! are supported; df counts the free parameters of each site model.

use serde::Serialize;

use crate::error::PamlError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SiteClassModel {
    /// NSsites code in the control file.
    pub ns_sites: u8,
    /// Conventional model name.
    pub name: &'static str,
    /// Free parameters of the site model.
    pub degrees_of_freedom: u32,
    /// Name codeml gives the model in its output.
    pub description: &'static str,
}

pub const SITE_CLASS_MODELS: [SiteClassModel; 5] = [
    SiteClassModel {
        ns_sites: 0,
        name: "M0",
        degrees_of_freedom: 1,
        description: "one-ratio",
    },
    SiteClassModel {
        ns_sites: 1,
        name: "M1a",
        degrees_of_freedom: 2,
        description: "NearlyNeutral",
    },
    SiteClassModel {
        ns_sites: 2,
        name: "M2a",
        degrees_of_freedom: 4,
        description: "PositiveSelection",
    },
    SiteClassModel {
        ns_sites: 7,
        name: "M7",
        degrees_of_freedom: 2,
        description: "beta",
    },
    SiteClassModel {
        ns_sites: 8,
        name: "M8",
        degrees_of_freedom: 4,
        description: "beta&w>1",
    },
];

/// Look up the site-class model for an NSsites code.
pub fn site_class_model(ns_sites: u8) -> Result<SiteClassModel, PamlError> {
    SITE_CLASS_MODELS
        .iter()
        .find(|m| m.ns_sites == ns_sites)
        .copied()
        .ok_or(PamlError::UnsupportedSiteClass(ns_sites))
}
