//! Output format identifiers and rendered file metadata

use crate::OutputError;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Encodings a table can be converted into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Csv,
    Xlsx,
    Pdf,
    Json,
    Html,
}

impl OutputFormat {
    /// File extension, without the leading dot
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Xlsx => "xlsx",
            Self::Pdf => "pdf",
            Self::Json => "json",
            Self::Html => "html",
        }
    }

    /// MIME type served with downloads of this format
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Csv => "text/csv",
            Self::Xlsx => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
            Self::Pdf => "application/pdf",
            Self::Json => "application/json",
            Self::Html => "text/html",
        }
    }

    /// Returns all supported formats
    pub fn all() -> [Self; 5] {
        [Self::Csv, Self::Xlsx, Self::Pdf, Self::Json, Self::Html]
    }
}

impl FromStr for OutputFormat {
    type Err = OutputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "xlsx" => Ok(Self::Xlsx),
            "pdf" => Ok(Self::Pdf),
            "json" => Ok(Self::Json),
            "html" => Ok(Self::Html),
            _ => Err(OutputError::UnsupportedFormat(s.to_string())),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.extension())
    }
}

/// A fully rendered file, ready to be stored as an artifact
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFile {
    pub bytes: Vec<u8>,
    pub mime_type: String,
    pub filename: String,
}

/// Builds `<prefix>_<YYYY-MM-DD_HH-MM-SS>.<ext>`
pub fn suggested_filename(prefix: &str, format: OutputFormat, now: DateTime<Local>) -> String {
    format!(
        "{}_{}.{}",
        prefix,
        now.format("%Y-%m-%d_%H-%M-%S"),
        format.extension()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_formats() {
        assert_eq!("csv".parse::<OutputFormat>().unwrap(), OutputFormat::Csv);
        assert_eq!("XLSX".parse::<OutputFormat>().unwrap(), OutputFormat::Xlsx);
        assert_eq!(" pdf ".parse::<OutputFormat>().unwrap(), OutputFormat::Pdf);
        assert_eq!("Json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("html".parse::<OutputFormat>().unwrap(), OutputFormat::Html);
    }

    #[test]
    fn test_parse_unsupported_format() {
        assert!(matches!(
            "docx".parse::<OutputFormat>(),
            Err(OutputError::UnsupportedFormat(_))
        ));
        assert!("".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_extension_matches_display() {
        for format in OutputFormat::all() {
            assert_eq!(format.to_string(), format.extension());
            assert_eq!(format.extension().parse::<OutputFormat>().unwrap(), format);
        }
    }

    #[test]
    fn test_mime_types() {
        assert_eq!(OutputFormat::Csv.mime_type(), "text/csv");
        assert_eq!(OutputFormat::Pdf.mime_type(), "application/pdf");
        assert!(OutputFormat::Xlsx.mime_type().contains("spreadsheetml"));
    }

    #[test]
    fn test_suggested_filename() {
        let now = Local.with_ymd_and_hms(2024, 3, 9, 7, 5, 2).unwrap();
        assert_eq!(
            suggested_filename("output", OutputFormat::Json, now),
            "output_2024-03-09_07-05-02.json"
        );
    }
}
