//! Package assembly: the fixed OOXML parts around a single worksheet

use super::worksheet::render_worksheet;
use super::xml_writer::XmlWriter;
use super::zip_writer::ZipEntry;
use crate::config::ExportOptions;
use crate::error::Result;
use crate::types::Dataset;

pub const CONTENT_TYPES_PART: &str = "[Content_Types].xml";
pub const ROOT_RELS_PART: &str = "_rels/.rels";
pub const WORKBOOK_PART: &str = "xl/workbook.xml";
pub const WORKBOOK_RELS_PART: &str = "xl/_rels/workbook.xml.rels";
pub const WORKSHEET_PART: &str = "xl/worksheets/sheet1.xml";

/// Worksheet target, relative to `xl/`
const WORKSHEET_TARGET: &str = "worksheets/sheet1.xml";

/// Relationship id shared by the workbook's sheet and its rels entry
pub const SHEET_REL_ID: &str = "rId1";

pub const SHEET_NAME: &str = "Sheet1";

const NS_MAIN: &str = "http://schemas.openxmlformats.org/spreadsheetml/2006/main";
const NS_RELATIONSHIPS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";
const NS_DOC_RELATIONSHIPS: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

fn content_types_xml() -> String {
    let mut xml = XmlWriter::with_declaration();
    xml.start_element("Types");
    xml.attribute(
        "xmlns",
        "http://schemas.openxmlformats.org/package/2006/content-types",
    );
    xml.close_start_tag();

    for (extension, content_type) in [
        ("rels", "application/vnd.openxmlformats-package.relationships+xml"),
        ("xml", "application/xml"),
    ] {
        xml.start_element("Default");
        xml.attribute("Extension", extension);
        xml.attribute("ContentType", content_type);
        xml.close_empty_tag();
    }

    for (part, content_type) in [
        (
            WORKBOOK_PART,
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml",
        ),
        (
            WORKSHEET_PART,
            "application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml",
        ),
    ] {
        xml.start_element("Override");
        xml.attribute("PartName", &format!("/{}", part));
        xml.attribute("ContentType", content_type);
        xml.close_empty_tag();
    }

    xml.end_element("Types");
    xml.into_string()
}

fn relationships_xml(rel_type: &str, target: &str) -> String {
    let mut xml = XmlWriter::with_declaration();
    xml.start_element("Relationships");
    xml.attribute("xmlns", NS_RELATIONSHIPS);
    xml.close_start_tag();

    xml.start_element("Relationship");
    xml.attribute("Id", SHEET_REL_ID);
    xml.attribute("Type", rel_type);
    xml.attribute("Target", target);
    xml.close_empty_tag();

    xml.end_element("Relationships");
    xml.into_string()
}

fn root_rels_xml() -> String {
    relationships_xml(
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument",
        WORKBOOK_PART,
    )
}

fn workbook_rels_xml() -> String {
    relationships_xml(
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet",
        WORKSHEET_TARGET,
    )
}

fn workbook_xml() -> String {
    let mut xml = XmlWriter::with_declaration();
    xml.start_element("workbook");
    xml.attribute("xmlns", NS_MAIN);
    xml.attribute("xmlns:r", NS_DOC_RELATIONSHIPS);
    xml.close_start_tag();

    xml.start_element("sheets");
    xml.close_start_tag();
    xml.start_element("sheet");
    xml.attribute("name", SHEET_NAME);
    xml.attribute_int("sheetId", 1);
    xml.attribute("r:id", SHEET_REL_ID);
    xml.close_empty_tag();
    xml.end_element("sheets");

    xml.end_element("workbook");
    xml.into_string()
}

/// Build the five package parts for `dataset`, in package order
pub fn create_xlsx(dataset: &Dataset, options: &ExportOptions) -> Result<Vec<ZipEntry>> {
    let sheet = render_worksheet(dataset)?;
    let encoding = options.encoding;

    let parts = [
        (CONTENT_TYPES_PART, content_types_xml()),
        (ROOT_RELS_PART, root_rels_xml()),
        (WORKBOOK_PART, workbook_xml()),
        (WORKBOOK_RELS_PART, workbook_rels_xml()),
        (WORKSHEET_PART, sheet),
    ];

    log::debug!(
        "assembling package: {} records, {:?} text",
        dataset.len(),
        encoding
    );

    Ok(parts
        .into_iter()
        .map(|(name, xml)| ZipEntry::new(name, encoding.encode(&xml)))
        .collect())
}
