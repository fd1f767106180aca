//! # excelexport
//!
//! A small Rust library that turns tabular records into a single-sheet
//! `.xlsx` workbook, with its own ZIP and OOXML encoder.
//!
//! ## Features
//!
//! - **No compression library**: entries are written as ZIP "stored" data
//!   with table-driven CRC-32 checksums
//! - **Minimal OOXML**: exactly five parts, inline-string and numeric cells
//! - **Ordered columns**: the first record's key order defines the header row
//! - **Base64 output**: ready to hand to an HTTP response or a process variable
//! - **JSON input** (feature `json`, on by default): arrays of flat objects
//!
//! ## Quick Start
//!
//! ```rust
//! use excelexport::{generate_xlsx, Dataset};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let dataset = Dataset::from_json_str(
//!     r#"[{"name": "Alice", "age": 30}, {"name": "Bob", "age": 25}]"#,
//! )?;
//!
//! let export = generate_xlsx(&dataset, "report")?;
//! assert_eq!(export.file_name, "report.xlsx");
//!
//! // persist it wherever the caller wants
//! let bytes = export.to_bytes()?;
//! assert_eq!(&bytes[..2], b"PK");
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod package;
pub mod types;
pub mod writer;

pub use config::{ExportOptions, TextEncoding};
pub use error::{ExcelError, Result};
pub use types::{CellValue, Dataset, Record};
pub use writer::{
    generate_xlsx, generate_xlsx_bytes, generate_xlsx_with_options, normalize_file_name,
    XlsxExport,
};
