pub mod output;

pub use output::{create_writer, report, OutputFormat, OutputWriter};

use crate::errors::{FlopmapError, Result};
use std::fs;
use std::io::Write;
use std::path::Path;

pub fn write_file(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content)
        .map_err(|e| FlopmapError::io("Failed to write file", Some(path.to_path_buf()), e))
}

/// Report destination: the given file, or stdout.
pub fn open_destination(path: Option<&Path>) -> Result<Box<dyn Write>> {
    match path {
        Some(path) => {
            let file = fs::File::create(path).map_err(|e| {
                FlopmapError::io("Failed to create output file", Some(path.to_path_buf()), e)
            })?;
            Ok(Box::new(std::io::BufWriter::new(file)))
        }
        None => Ok(Box::new(std::io::stdout())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_file_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.txt");
        write_file(&path, "hello").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "hello");
    }

    #[test]
    fn test_open_destination_missing_dir_fails_with_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("out.txt");
        let err = open_destination(Some(&path)).err().unwrap();
        assert_eq!(err.path(), Some(&path));
    }
}
