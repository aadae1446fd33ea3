//! Integration tests against codeml result directories.
//!
//! Fixture runs live in tests/fixtures/ at the workspace root, one
//! directory per codeml run.

use std::path::{Path, PathBuf};

use lrt_paml::{compare_directories, read_model_result, ControlFile, OutputFile};

/// Helper to get the path to a fixture run directory.
fn fixture(name: &str) -> PathBuf {
    Path::new(concat!(env!("CARGO_MANIFEST_DIR"), "/../tests/fixtures")).join(name)
}

mod model_reader {
    use super::*;

    #[test]
    fn test_read_m7() {
        let res = read_model_result(fixture("m7")).unwrap();
        assert_eq!(res.name, "M7");
        assert_eq!(res.degrees_of_freedom, 2);
        assert_eq!(res.log_likelihood, -2014.424218);
        assert_eq!(res.n_branches, Some(9));
        assert_eq!(res.n_params, Some(13));
    }

    #[test]
    fn test_read_m8() {
        let res = read_model_result(fixture("m8")).unwrap();
        assert_eq!(res.name, "M8");
        assert_eq!(res.degrees_of_freedom, 4);
        assert_eq!(res.log_likelihood, -2010.143759);
    }

    #[test]
    fn test_read_m1a_from_ctl_outfile() {
        let res = read_model_result(fixture("m1a")).unwrap();
        assert_eq!(res.name, "M1a");
        assert_eq!(res.degrees_of_freedom, 2);
        assert_eq!(res.log_likelihood, -1980.5);
        assert!(res.output_file.ends_with("mlc"));
    }

    #[test]
    fn test_multi_model_run_uses_first_model() {
        let res = read_model_result(fixture("sites_multi")).unwrap();
        assert_eq!(res.name, "M7");
        assert_eq!(res.ns_sites, 7);
        assert_eq!(res.log_likelihood, -2014.424218);
    }
}

mod file_parsers {
    use super::*;

    #[test]
    fn test_fixture_control_file() {
        let ctl = ControlFile::parse(fixture("sites_multi").join("codeml.ctl")).unwrap();
        assert_eq!(ctl.ns_sites().unwrap(), vec![7, 8]);
        assert_eq!(ctl.get("seqtype"), Some("1"));
        assert_eq!(ctl.get("Small_Diff"), None);
    }

    #[test]
    fn test_fixture_multi_output() {
        let out = OutputFile::parse(
            fixture("sites_multi").join("sites_multi_out.paml"),
            7,
        )
        .unwrap();
        assert_eq!(out.fits.len(), 2);
        let m8 = out.get(8).unwrap();
        assert_eq!(m8.description.as_deref(), Some("beta&w>1 (11 categories)"));
        assert_eq!(m8.log_likelihood, Some(-2010.143759));
        assert_eq!(m8.n_params, Some(15));
    }
}

mod lrt_for_codeml {
    use super::*;

    #[test]
    fn test_m7_vs_m8() {
        let res = compare_directories(fixture("m7"), fixture("m8"), 0.05).unwrap();
        let cmp = &res.comparison;
        assert!((cmp.outcome.test_statistic - 8.560918).abs() < 1e-6);
        assert_eq!(cmp.outcome.degrees_of_freedom_diff, 2);
        assert!((cmp.p_value() - 0.013836309762550788).abs() < 1e-9);
        assert!(cmp.rejects_null());
    }

    #[test]
    fn test_m1a_vs_m2a() {
        let res = compare_directories(fixture("m1a"), fixture("m2a"), 0.05).unwrap();
        let cmp = &res.comparison;
        assert_eq!(cmp.null.name, "M1a");
        assert_eq!(cmp.alternate.name, "M2a");
        assert!((cmp.p_value() - (-0.4_f64).exp()).abs() < 1e-9);
        assert!(!cmp.rejects_null());
    }

    #[test]
    fn test_same_directory_twice() {
        let res = compare_directories(fixture("m8"), fixture("m8"), 0.05).unwrap();
        assert_eq!(res.comparison.outcome.degrees_of_freedom_diff, 0);
        assert_eq!(res.comparison.p_value(), 1.0);
    }

    #[test]
    fn test_missing_h1_directory_names_it() {
        let err = compare_directories(fixture("m7"), fixture("does_not_exist"), 0.05).unwrap_err();
        assert!(err.to_string().contains("Failed to read H1 results"), "{}", err);
    }
}
