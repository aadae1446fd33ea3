//! Comparison of a null and an alternate model with a significance verdict.

use std::fmt;

use serde::Serialize;

use crate::lrt::{likelihood_ratio_test, LrtError, LrtOutcome};

/// Significance threshold used when none is given.
pub const DEFAULT_ALPHA: f64 = 0.05;

/// What the test needs to know about a fitted model.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelSummary {
    /// Model name (e.g. "M7").
    pub name: String,
    /// Number of free parameters distinguishing the model.
    pub degrees_of_freedom: u32,
    /// Maximised log-likelihood.
    pub log_likelihood: f64,
}

/// A finished null-vs-alternate test.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison {
    pub null: ModelSummary,
    pub alternate: ModelSummary,
    pub alpha: f64,
    #[serde(flatten)]
    pub outcome: LrtOutcome,
    pub null_rejected: bool,
}

impl Comparison {
    /// Test `alternate` against `null` at significance level `alpha`.
    pub fn new(null: ModelSummary, alternate: ModelSummary, alpha: f64) -> Result<Self, LrtError> {
        let outcome = likelihood_ratio_test(
            null.log_likelihood,
            alternate.log_likelihood,
            null.degrees_of_freedom,
            alternate.degrees_of_freedom,
        )?;
        Ok(Self {
            null,
            alternate,
            alpha,
            null_rejected: outcome.p_value < alpha,
            outcome,
        })
    }

    pub fn p_value(&self) -> f64 {
        self.outcome.p_value
    }

    pub fn rejects_null(&self) -> bool {
        self.null_rejected
    }

    /// One-sentence interpretation of the p-value.
    pub fn verdict(&self) -> String {
        if self.rejects_null() {
            format!(
                "The null model can be rejected at the {} significance level.",
                self.alpha
            )
        } else {
            format!(
                "The null model cannot be rejected at the {} significance level.",
                self.alpha
            )
        }
    }
}

/// Shortest round-trip form, in exponent notation below 1e-4.
pub fn format_p_value(p: f64) -> String {
    if p > 0.0 && p < 1e-4 {
        format!("{:e}", p)
    } else {
        format!("{:?}", p)
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Model comparison summary:")?;
        writeln!(f, "Null model (H0): {}", self.null.name)?;
        writeln!(f, "Degrees of freedom: {}", self.null.degrees_of_freedom)?;
        writeln!(f, "log-likelihood: {:?}", self.null.log_likelihood)?;
        writeln!(f)?;
        writeln!(f, "Alternate model (H1): {}", self.alternate.name)?;
        writeln!(f, "Degrees of freedom: {}", self.alternate.degrees_of_freedom)?;
        writeln!(f, "log-likelihood: {:?}", self.alternate.log_likelihood)?;
        writeln!(f)?;
        writeln!(
            f,
            "LRT statistic (D): {:.6} (df = {})",
            self.outcome.test_statistic, self.outcome.degrees_of_freedom_diff
        )?;
        writeln!(
            f,
            "p-value of the chi-squared survival-function test: {}",
            format_p_value(self.outcome.p_value)
        )?;
        writeln!(f)?;
        write!(f, "{}", self.verdict())
    }
}
