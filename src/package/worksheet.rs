//! Worksheet part (`xl/worksheets/sheet1.xml`) with inline-string and numeric cells

use super::xml_writer::{XmlWriter, XML_DECLARATION};
use crate::error::{ExcelError, Result};
use crate::types::{CellValue, Dataset};

/// Largest integer an `f64` holds exactly
const MAX_EXACT_INT: f64 = 9_007_199_254_740_992.0;

/// Convert a 0-based column index to its letters (0 -> A, 25 -> Z, 26 -> AA)
pub fn column_letter(index: usize) -> String {
    let mut letters = Vec::new();
    let mut n = index + 1;
    while n > 0 {
        n -= 1;
        letters.push(b'A' + (n % 26) as u8);
        n /= 26;
    }
    letters.reverse();
    letters.into_iter().map(char::from).collect()
}

/// A1-style reference for a 0-based column and a 1-based row
pub fn cell_reference(col: usize, row: u32) -> String {
    let mut reference = column_letter(col);
    let mut digits = itoa::Buffer::new();
    reference.push_str(digits.format(row));
    reference
}

/// Text for a number cell's `<v>`, `None` for NaN and infinities
///
/// Integral values are written without a fraction, everything else with the
/// shortest representation that round-trips.
fn format_number(value: f64) -> Option<String> {
    if !value.is_finite() {
        return None;
    }
    if value.fract() == 0.0 && value.abs() < MAX_EXACT_INT {
        let mut digits = itoa::Buffer::new();
        Some(digits.format(value as i64).to_string())
    } else {
        Some(value.to_string())
    }
}

/// Row-by-row worksheet builder
pub struct Worksheet {
    xml: XmlWriter,
    columns: usize,
    row_count: u32,
}

impl Worksheet {
    pub fn new(columns: usize) -> Self {
        let mut xml = XmlWriter::with_capacity(4096);
        xml.write_str(XML_DECLARATION);
        xml.start_element("worksheet");
        xml.attribute(
            "xmlns",
            "http://schemas.openxmlformats.org/spreadsheetml/2006/main",
        );
        xml.close_start_tag();
        xml.start_element("sheetData");
        xml.close_start_tag();

        Worksheet {
            xml,
            columns,
            row_count: 0,
        }
    }

    fn start_row(&mut self) -> u32 {
        self.row_count += 1;
        self.xml.start_element("row");
        self.xml.attribute_int("r", u64::from(self.row_count));
        self.xml.close_start_tag();
        self.row_count
    }

    fn write_inline_string(&mut self, reference: &str, text: &str) {
        self.xml.start_element("c");
        self.xml.attribute("r", reference);
        self.xml.attribute("t", "inlineStr");
        self.xml.write_str("><is><t>");
        self.xml.write_escaped(text);
        self.xml.write_str("</t></is></c>");
    }

    /// Write the header row of column names
    pub fn write_header(&mut self, headers: &[&str]) {
        let row = self.start_row();
        for (col, name) in headers.iter().enumerate() {
            let reference = cell_reference(col, row);
            self.write_inline_string(&reference, name);
        }
        self.xml.end_element("row");
    }

    /// Write one row of values; the slice should hold one value per column
    pub fn write_row(&mut self, values: &[&CellValue]) -> Result<()> {
        let row = self.start_row();
        for (col, value) in values.iter().take(self.columns).enumerate() {
            let reference = cell_reference(col, row);
            match value {
                CellValue::Number(n) => {
                    let Some(number) = format_number(*n) else {
                        return Err(ExcelError::InvalidNumber { cell: reference });
                    };
                    self.xml.start_element("c");
                    self.xml.attribute("r", &reference);
                    self.xml.write_str("><v>");
                    self.xml.write_str(&number);
                    self.xml.write_str("</v></c>");
                }
                CellValue::Text(s) => self.write_inline_string(&reference, s),
                CellValue::Empty => self.write_inline_string(&reference, ""),
            }
        }
        self.xml.end_element("row");
        Ok(())
    }

    /// Finish writing the worksheet
    pub fn finish(mut self) -> String {
        self.xml.end_element("sheetData");
        self.xml.end_element("worksheet");
        self.xml.into_string()
    }

    pub fn row_count(&self) -> u32 {
        self.row_count
    }
}

/// Render the worksheet XML for a dataset
///
/// Row 1 holds the column names from the first record, record `i` lands on
/// row `i + 2`. An empty dataset produces only an empty header row.
pub fn render_worksheet(dataset: &Dataset) -> Result<String> {
    let headers = dataset.headers();
    let mut sheet = Worksheet::new(headers.len());
    sheet.write_header(&headers);

    let mut values = Vec::with_capacity(headers.len());
    for record in dataset.records() {
        values.clear();
        values.extend(headers.iter().map(|h| Dataset::value(record, h)));
        sheet.write_row(&values)?;
    }

    log::debug!(
        "worksheet rendered: {} columns, {} rows",
        headers.len(),
        sheet.row_count()
    );
    Ok(sheet.finish())
}
