//! Likelihood ratio test between two nested models.
//!
//! For a null model with log-likelihood lnL0 and df0 free parameters and an
//! alternate model (a superset of the null) with lnL1 and df1:
//!   D  = -2 * (lnL0 - lnL1)
//!   df = df1 - df0
//!   p  = P(X >= D),  X ~ chi-sq(df)
//!
//! The p-value is the upper-tail survival function of the chi-squared
//! distribution, taken from statrs.

use serde::Serialize;
use statrs::distribution::{ChiSquared, ContinuousCDF};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LrtError {
    #[error(
        "alternate model has fewer free parameters than the null model \
         (df_null = {df_null}, df_alternate = {df_alternate})"
    )]
    NotNested { df_null: u32, df_alternate: u32 },

    #[error("log-likelihood must be finite (lnL_null = {null}, lnL_alternate = {alternate})")]
    NonFiniteLikelihood { null: f64, alternate: f64 },

    #[error("test statistic must be finite, got {0}")]
    NonFiniteStatistic(f64),

    #[error("invalid chi-squared distribution with {df} degrees of freedom: {reason}")]
    Distribution { df: u32, reason: String },
}

/// Result of a likelihood ratio test.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LrtOutcome {
    /// D = -2 * (lnL_null - lnL_alternate).
    pub test_statistic: f64,
    /// df_alternate - df_null.
    pub degrees_of_freedom_diff: u32,
    /// Upper-tail chi-squared probability of `test_statistic`, in [0, 1].
    pub p_value: f64,
}

/// Run a likelihood ratio test.
///
/// # Arguments
/// - `ln_likelihood_null`: log-likelihood of the null model
/// - `ln_likelihood_alternate`: log-likelihood of the alternate model
/// - `df_null`: free parameters of the null model
/// - `df_alternate`: free parameters of the alternate model
///
/// Identical parameter counts give p = 1. A statistic at or below zero
/// (alternate fits no better than the null) also gives p = 1.
pub fn likelihood_ratio_test(
    ln_likelihood_null: f64,
    ln_likelihood_alternate: f64,
    df_null: u32,
    df_alternate: u32,
) -> Result<LrtOutcome, LrtError> {
    if !ln_likelihood_null.is_finite() || !ln_likelihood_alternate.is_finite() {
        return Err(LrtError::NonFiniteLikelihood {
            null: ln_likelihood_null,
            alternate: ln_likelihood_alternate,
        });
    }

    let df = df_alternate
        .checked_sub(df_null)
        .ok_or(LrtError::NotNested {
            df_null,
            df_alternate,
        })?;

    let test_statistic = -2.0 * (ln_likelihood_null - ln_likelihood_alternate);
    let p_value = chi2_sf(test_statistic, df)?;

    Ok(LrtOutcome {
        test_statistic,
        degrees_of_freedom_diff: df,
        p_value,
    })
}

/// Survival function P(X >= statistic) of a chi-squared distribution.
///
/// df = 0 is the point mass at zero, so every statistic gets p = 1.
pub fn chi2_sf(statistic: f64, df: u32) -> Result<f64, LrtError> {
    if statistic.is_nan() || statistic == f64::INFINITY {
        return Err(LrtError::NonFiniteStatistic(statistic));
    }
    if df == 0 || statistic <= 0.0 {
        return Ok(1.0);
    }

    let chi2 = ChiSquared::new(df as f64).map_err(|e| LrtError::Distribution {
        df,
        reason: e.to_string(),
    })?;

    Ok(chi2.sf(statistic).clamp(0.0, 1.0))
}
