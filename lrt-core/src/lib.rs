//! lrt-core: Likelihood ratio testing for nested models
//!
//! Chi-squared LRT statistic and survival-function p-value, plus the
//! null-vs-alternate comparison and its significance verdict.

pub mod compare;
pub mod lrt;

pub use compare::{format_p_value, Comparison, ModelSummary, DEFAULT_ALPHA};
pub use lrt::{chi2_sf, likelihood_ratio_test, LrtError, LrtOutcome};
