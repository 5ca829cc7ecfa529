//! CI step-output sink.
//!
//! GitHub Actions reads step outputs from the file named by the
//! `GITHUB_OUTPUT` environment variable, written as heredoc blocks with a
//! random delimiter so values may span lines. Outside of Actions the
//! outputs go to stdout as plain `key=value` lines.

use crate::error::Result;
use std::env;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use uuid::Uuid;

pub fn write_output(key: &str, value: &str) -> Result<()> {
    match env::var("GITHUB_OUTPUT") {
        Ok(path) if !path.is_empty() => append_to_file(Path::new(&path), key, value),
        _ => {
            println!("{}={}", key, value);
            Ok(())
        }
    }
}

fn append_to_file(path: &Path, key: &str, value: &str) -> Result<()> {
    let mut file = OpenOptions::new().append(true).open(path)?;

    let delimiter = format!("ghadelimiter_{}", Uuid::new_v4());
    write!(file, "{}<<{}\n{}\n{}\n", key, delimiter, value, delimiter)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::fs;
    use std::io::Write as _;
    use tempfile::NamedTempFile;

    #[test]
    fn test_append_writes_heredoc_block() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"").unwrap();

        append_to_file(file.path(), "SEMVER_TAG", "v1.2.3").unwrap();

        let contents = fs::read_to_string(file.path()).unwrap();
        let mut lines = contents.lines();

        let header = lines.next().unwrap();
        assert!(header.starts_with("SEMVER_TAG<<ghadelimiter_"));
        assert_eq!(lines.next().unwrap(), "v1.2.3");

        let delimiter = header.split("<<").nth(1).unwrap();
        assert_eq!(lines.next().unwrap(), delimiter);
    }

    #[test]
    fn test_append_accumulates_entries() {
        let file = NamedTempFile::new().unwrap();

        append_to_file(file.path(), "PREVIOUS_TAG", "v1.0.0").unwrap();
        append_to_file(file.path(), "IS_PRERELEASE", "true").unwrap();

        let contents = fs::read_to_string(file.path()).unwrap();
        assert!(contents.contains("PREVIOUS_TAG<<"));
        assert!(contents.contains("IS_PRERELEASE<<"));
    }

    #[test]
    fn test_append_missing_file_is_io_error() {
        let result = append_to_file(Path::new("/nonexistent/output"), "K", "v");
        assert!(result.is_err());
    }

    #[test]
    #[serial]
    fn test_write_output_targets_github_output_file() {
        let file = NamedTempFile::new().unwrap();
        env::set_var("GITHUB_OUTPUT", file.path());

        write_output("SEMVER_TAG", "v2.0.0").unwrap();
        env::remove_var("GITHUB_OUTPUT");

        let contents = fs::read_to_string(file.path()).unwrap();
        assert!(contents.contains("SEMVER_TAG<<"));
        assert!(contents.contains("v2.0.0"));
    }

    #[test]
    #[serial]
    fn test_write_output_falls_back_to_stdout() {
        env::remove_var("GITHUB_OUTPUT");
        assert!(write_output("SEMVER_TAG", "v2.0.0").is_ok());
    }
}
