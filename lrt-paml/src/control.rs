//! codeml control file (codeml.ctl) parser.
//!
//! ```text
//!       seqfile = alignment.phy   * sequence data file name
//!      treefile = species.tree    * tree structure file name
//!       outfile = mlc             * main result file name
//!       NSsites = 7 8             * 0:one w; 1:neutral; 2:selection; 7:beta; 8:beta&w
//! ```
//!
//! One assignment per line, split at the first '='. Anything after '*' is
//! a comment.

use std::path::Path;

use anyhow::{Context, Result};

use crate::error::PamlError;

/// Control file name codeml expects in a run directory.
pub const CONTROL_FILE_NAME: &str = "codeml.ctl";

/// Parsed control file options in file order.
#[derive(Debug, Clone, Default)]
pub struct ControlFile {
    options: Vec<(String, String)>,
}

impl ControlFile {
    /// Read and parse a control file.
    pub fn parse<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read control file: {}", path.display()))?;
        Self::parse_str(&contents)
            .with_context(|| format!("Malformed control file: {}", path.display()))
    }

    pub fn parse_str(contents: &str) -> Result<Self, PamlError> {
        let mut options = Vec::new();

        for (line_num, raw) in contents.lines().enumerate() {
            let uncommented = raw.split('*').next().unwrap_or("").trim();
            if uncommented.is_empty() {
                continue;
            }

            let (key, value) =
                uncommented
                    .split_once('=')
                    .ok_or_else(|| PamlError::MalformedLine {
                        line: line_num + 1,
                        text: raw.trim().to_string(),
                    })?;
            let key = key.trim();
            if key.is_empty() {
                return Err(PamlError::MalformedLine {
                    line: line_num + 1,
                    text: raw.trim().to_string(),
                });
            }
            options.push((key.to_string(), value.trim().to_string()));
        }

        Ok(Self { options })
    }

    /// Value of an option; the last assignment wins.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.options
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Site-class model codes from `NSsites`, in the order listed.
    pub fn ns_sites(&self) -> Result<Vec<u8>, PamlError> {
        let value = self
            .get("NSsites")
            .ok_or_else(|| PamlError::MissingOption("NSsites".to_string()))?;

        let invalid = || PamlError::InvalidOption {
            option: "NSsites".to_string(),
            value: value.to_string(),
        };

        let codes = value
            .split_whitespace()
            .map(|tok| tok.parse::<u8>().map_err(|_| invalid()))
            .collect::<Result<Vec<_>, _>>()?;

        if codes.is_empty() {
            return Err(invalid());
        }
        Ok(codes)
    }

    /// Main result file name, if the control file sets one.
    pub fn outfile(&self) -> Option<&str> {
        self.get("outfile").filter(|v| !v.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const CTL: &str = "\
      seqfile = alignment.phy   * sequence data file name
     treefile = species.tree    * tree structure file name
      outfile = mlc             * main result file name

        noisy = 9  * 0,1,2,3,9: how much rubbish on the screen
      verbose = 1  * 1: detailed output, 0: concise output
      runmode = 0  * 0: user tree

      seqtype = 1  * 1:codons; 2:AAs; 3:codons-->AAs
    CodonFreq = 2  * 0:1/61 each, 1:F1X4, 2:F3X4, 3:codon table
        model = 0
      NSsites = 7 8 * 0:one w;1:neutral;2:selection; 7:beta; 8:beta&w
        icode = 0  * 0:universal code
* fix_omega = 1
        omega = .4 * initial or fixed omega
";

    #[test]
    fn test_parse_options() {
        let ctl = ControlFile::parse_str(CTL).unwrap();
        assert_eq!(ctl.get("seqfile"), Some("alignment.phy"));
        assert_eq!(ctl.get("omega"), Some(".4"));
        assert_eq!(ctl.outfile(), Some("mlc"));
        // Commented-out line is not an option
        assert_eq!(ctl.get("fix_omega"), None);
        assert_eq!(ctl.get("icode"), Some("0"));
    }

    #[test]
    fn test_ns_sites_list() {
        let ctl = ControlFile::parse_str(CTL).unwrap();
        assert_eq!(ctl.ns_sites().unwrap(), vec![7, 8]);
    }

    #[test]
    fn test_ns_sites_single() {
        let ctl = ControlFile::parse_str("NSsites = 2\n").unwrap();
        assert_eq!(ctl.ns_sites().unwrap(), vec![2]);
    }

    #[test]
    fn test_ns_sites_missing() {
        let ctl = ControlFile::parse_str("model = 0\n").unwrap();
        assert_eq!(
            ctl.ns_sites(),
            Err(PamlError::MissingOption("NSsites".to_string()))
        );
    }

    #[test]
    fn test_ns_sites_invalid() {
        let ctl = ControlFile::parse_str("NSsites = 1 two\n").unwrap();
        assert!(matches!(ctl.ns_sites(), Err(PamlError::InvalidOption { .. })));

        let ctl = ControlFile::parse_str("NSsites = \n").unwrap();
        assert!(ctl.ns_sites().is_err());
    }

    #[test]
    fn test_last_assignment_wins() {
        let ctl = ControlFile::parse_str("NSsites = 1\nNSsites = 8\n").unwrap();
        assert_eq!(ctl.ns_sites().unwrap(), vec![8]);
    }

    #[test]
    fn test_malformed_line() {
        let err = ControlFile::parse_str("model = 0\nthis line has no equals\n").unwrap_err();
        assert_eq!(
            err,
            PamlError::MalformedLine {
                line: 2,
                text: "this line has no equals".to_string()
            }
        );
        assert!(ControlFile::parse_str(" = 3\n").is_err());
    }

    #[test]
    fn test_parse_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONTROL_FILE_NAME);
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(CTL.as_bytes()).unwrap();

        let ctl = ControlFile::parse(&path).unwrap();
        assert_eq!(ctl.ns_sites().unwrap(), vec![7, 8]);
    }

    #[test]
    fn test_parse_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = ControlFile::parse(dir.path().join(CONTROL_FILE_NAME)).unwrap_err();
        assert!(err.to_string().contains("Failed to read control file"));
    }
}
