//! Export entry point: dataset in, `{ fileName, base64 }` out
//!
//! Nothing here touches the file system except [`XlsxExport::save_to_dir`],
//! which callers use when they want the workbook on disk.

use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine as _;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::ExportOptions;
use crate::error::Result;
use crate::package::build_xlsx;
use crate::types::Dataset;

/// File extension appended by [`normalize_file_name`]
pub const XLSX_EXTENSION: &str = ".xlsx";

/// Result of an export: final file name and base64 of the ZIP bytes
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct XlsxExport {
    pub file_name: String,
    pub base64: String,
}

impl XlsxExport {
    /// Decode the payload back into the `.xlsx` bytes
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(BASE64_STANDARD.decode(&self.base64)?)
    }

    /// Write the workbook as `<dir>/<file_name>`, creating `dir` if needed
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use excelexport::{generate_xlsx, Dataset};
    ///
    /// let export = generate_xlsx(&Dataset::new(), "report")?;
    /// let path = export.save_to_dir("report")?;
    /// assert!(path.ends_with("report.xlsx"));
    /// # Ok::<(), excelexport::ExcelError>(())
    /// ```
    pub fn save_to_dir<P: AsRef<Path>>(&self, dir: P) -> Result<PathBuf> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;
        let path = dir.join(&self.file_name);
        fs::write(&path, self.to_bytes()?)?;
        log::debug!("saved {}", path.display());
        Ok(path)
    }
}

/// Append `.xlsx` unless the name already contains it
///
/// The check is a substring test, so `report.xlsx.bak` is left untouched.
pub fn normalize_file_name(file_name: &str) -> String {
    if file_name.contains(XLSX_EXTENSION) {
        file_name.to_string()
    } else {
        format!("{}{}", file_name, XLSX_EXTENSION)
    }
}

/// Encode `dataset` as raw `.xlsx` bytes with explicit options
pub fn generate_xlsx_bytes(dataset: &Dataset, options: &ExportOptions) -> Result<Vec<u8>> {
    build_xlsx(dataset, options)
}

/// Export `dataset` with default options
///
/// # Examples
///
/// ```
/// use excelexport::types::{record, CellValue};
/// use excelexport::{generate_xlsx, Dataset};
///
/// let dataset = Dataset::from_records(vec![
///     record([("name", CellValue::from("Alice")), ("age", CellValue::from(30))]),
///     record([("name", CellValue::from("Bob")), ("age", CellValue::from(25))]),
/// ]);
///
/// let export = generate_xlsx(&dataset, "report")?;
/// assert_eq!(export.file_name, "report.xlsx");
/// # Ok::<(), excelexport::ExcelError>(())
/// ```
pub fn generate_xlsx(dataset: &Dataset, file_name: &str) -> Result<XlsxExport> {
    generate_xlsx_with_options(dataset, file_name, &ExportOptions::default())
}

/// Export `dataset` with explicit options
pub fn generate_xlsx_with_options(
    dataset: &Dataset,
    file_name: &str,
    options: &ExportOptions,
) -> Result<XlsxExport> {
    let file_name = normalize_file_name(file_name);
    let bytes = build_xlsx(dataset, options)?;
    log::debug!("export {}: {} bytes", file_name, bytes.len());

    Ok(XlsxExport {
        file_name,
        base64: BASE64_STANDARD.encode(bytes),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::record;

    #[test]
    fn test_normalize_file_name() {
        assert_eq!(normalize_file_name("report"), "report.xlsx");
        assert_eq!(normalize_file_name("report.xlsx"), "report.xlsx");
        assert_eq!(normalize_file_name("report.xlsx.bak"), "report.xlsx.bak");
        assert_eq!(normalize_file_name("report.xls"), "report.xls.xlsx");
        assert_eq!(normalize_file_name(""), ".xlsx");
    }

    #[test]
    fn test_base64_payload_decodes_to_zip() {
        let dataset = Dataset::from_records(vec![record([("a", 1)])]);
        let export = generate_xlsx(&dataset, "out").unwrap();

        let bytes = export.to_bytes().unwrap();
        assert_eq!(&bytes[..4], b"PK\x03\x04");
        assert_eq!(
            bytes,
            generate_xlsx_bytes(&dataset, &ExportOptions::default()).unwrap()
        );
    }

    #[test]
    fn test_output_is_deterministic() {
        let dataset = Dataset::from_records(vec![record([("k", "v")])]);
        let first = generate_xlsx(&dataset, "x").unwrap();
        let second = generate_xlsx(&dataset, "x").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_invalid_payload() {
        let export = XlsxExport {
            file_name: "broken.xlsx".to_string(),
            base64: "***".to_string(),
        };
        assert!(matches!(
            export.to_bytes(),
            Err(crate::ExcelError::Base64(_))
        ));
    }

    #[cfg(feature = "json")]
    #[test]
    fn test_serializes_camel_case() {
        let export = generate_xlsx(&Dataset::new(), "empty").unwrap();
        let json = serde_json::to_value(&export).unwrap();
        assert_eq!(json["fileName"], "empty.xlsx");
        assert!(json["base64"].as_str().unwrap().starts_with("UEsDB"));
    }
}
