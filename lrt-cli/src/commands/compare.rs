//! Compare a null and an alternate codeml run.
//!
//! codeml-lrt -0 <H0 dir> -1 <H1 dir> [--alpha 0.05] [--json]

use anyhow::Result;
use clap::Args;
use tracing::info;

use lrt_core::compare::DEFAULT_ALPHA;
use lrt_paml::reader::compare_directories;

#[derive(Args)]
pub struct CompareArgs {
    /// Directory containing H0 model results
    #[arg(short = '0', long = "H0_dir", visible_alias = "h0-dir", value_name = "DIR")]
    h0_dir: String,

    /// Directory containing H1 model results
    #[arg(short = '1', long = "H1_dir", visible_alias = "h1-dir", value_name = "DIR")]
    h1_dir: String,

    /// Significance level for rejecting the null model
    #[arg(long, default_value_t = DEFAULT_ALPHA, value_parser = parse_alpha)]
    alpha: f64,

    /// Print the comparison as JSON
    #[arg(long)]
    json: bool,
}

fn parse_alpha(s: &str) -> Result<f64, String> {
    let alpha: f64 = s.parse().map_err(|_| format!("'{}' is not a number", s))?;
    if alpha > 0.0 && alpha < 1.0 {
        Ok(alpha)
    } else {
        Err(format!("significance level must lie in (0, 1), got {}", alpha))
    }
}

pub fn run(args: CompareArgs) -> Result<()> {
    info!("H0 directory: {}", args.h0_dir);
    info!("H1 directory: {}", args.h1_dir);

    let res = compare_directories(&args.h0_dir, &args.h1_dir, args.alpha)?;
    info!(
        "D = {:.6}, df = {}, p = {:e}",
        res.comparison.outcome.test_statistic,
        res.comparison.outcome.degrees_of_freedom_diff,
        res.comparison.p_value()
    );

    if args.json {
        println!("{}", serde_json::to_string_pretty(&res)?);
    } else {
        println!("{}", res.comparison);
    }

    Ok(())
}
