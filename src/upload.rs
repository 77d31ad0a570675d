//! Client-side checks for CSV uploads before anything is sent.

use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("Please select a CSV file first.")]
    NoFile,
    #[error("Please select a CSV file.")]
    NotCsv,
    #[error("CSV file is empty")]
    Empty,
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// A validated CSV file held in memory, ready for `/predict_csv`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CsvUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl CsvUpload {
    /// Read and validate a CSV from disk.
    pub fn from_path(path: &Path) -> Result<Self, UploadError> {
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or_default()
            .to_string();
        check_extension(&file_name)?;
        let bytes = std::fs::read(path).map_err(|source| UploadError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_bytes(file_name, bytes)
    }

    pub fn from_bytes(file_name: impl Into<String>, bytes: Vec<u8>) -> Result<Self, UploadError> {
        let file_name = file_name.into();
        check_extension(&file_name)?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Err(UploadError::Empty);
        }
        Ok(Self { file_name, bytes })
    }

    /// Size as shown next to the file name, e.g. `"1.5 KB"`.
    pub fn size_label(&self) -> String {
        format_size(self.bytes.len())
    }
}

fn check_extension(file_name: &str) -> Result<(), UploadError> {
    if file_name.to_ascii_lowercase().ends_with(".csv") {
        Ok(())
    } else {
        Err(UploadError::NotCsv)
    }
}

pub fn format_size(bytes: usize) -> String {
    format!("{:.1} KB", bytes as f64 / 1024.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn extension_check_ignores_case() {
        assert!(CsvUpload::from_bytes("KOI.CSV", b"a,b\n1,2\n".to_vec()).is_ok());
        let err = CsvUpload::from_bytes("koi.txt", b"a,b\n".to_vec()).unwrap_err();
        assert_eq!(err.to_string(), "Please select a CSV file.");
    }

    #[test]
    fn whitespace_only_file_is_empty() {
        let err = CsvUpload::from_bytes("koi.csv", b" \n\r\n".to_vec()).unwrap_err();
        assert!(matches!(err, UploadError::Empty));
    }

    #[test]
    fn wrong_extension_is_rejected_before_reading() {
        let err = CsvUpload::from_path(Path::new("/definitely/missing/data.xlsx")).unwrap_err();
        assert!(matches!(err, UploadError::NotCsv));
    }

    #[test]
    fn reads_file_from_disk() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tess.csv");
        std::fs::write(&path, "toi,pl_orbper\n101.01,3.2\n").unwrap();
        let upload = CsvUpload::from_path(&path).unwrap();
        assert_eq!(upload.file_name, "tess.csv");
        assert_eq!(upload.size_label(), "0.0 KB");
    }

    #[test]
    fn size_label_uses_one_decimal_kilobytes() {
        assert_eq!(format_size(1536), "1.5 KB");
        assert_eq!(format_size(10 * 1024), "10.0 KB");
    }
}
