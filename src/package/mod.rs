//! Minimal XLSX package encoder
//!
//! This module provides the pieces that turn a dataset into `.xlsx` bytes
//! without any compression or spreadsheet library:
//! - CRC-32 checksums
//! - A stored-only ZIP container writer (and a reader for verification)
//! - Direct XML generation for the five OOXML parts of a one-sheet workbook

pub mod crc32;
pub mod workbook;
pub mod worksheet;
pub mod xml_writer;
pub mod zip_reader;
pub mod zip_writer;

use crate::config::ExportOptions;
use crate::error::Result;
use crate::types::Dataset;

pub use crc32::{crc32, Crc32};
pub use workbook::create_xlsx;
pub use worksheet::{cell_reference, column_letter, Worksheet};
pub use xml_writer::{escape_xml, XmlWriter};
pub use zip_reader::{ZipEntryInfo, ZipReader};
pub use zip_writer::{create_zip, ZipEntry};

/// Encode `dataset` as the raw bytes of an `.xlsx` file
///
/// # Examples
///
/// ```
/// use excelexport::package::build_xlsx;
/// use excelexport::types::{record, Dataset};
/// use excelexport::ExportOptions;
///
/// let dataset = Dataset::from_records(vec![record([("name", "Alice")])]);
/// let bytes = build_xlsx(&dataset, &ExportOptions::default())?;
/// assert_eq!(&bytes[..2], b"PK");
/// # Ok::<(), excelexport::ExcelError>(())
/// ```
pub fn build_xlsx(dataset: &Dataset, options: &ExportOptions) -> Result<Vec<u8>> {
    let entries = create_xlsx(dataset, options)?;
    create_zip(&entries)
}
