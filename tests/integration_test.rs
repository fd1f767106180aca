//! Integration tests for excelexport

use excelexport::package::{crc32, create_zip, ZipEntry, ZipReader};
use excelexport::types::{record, CellValue};
use excelexport::{
    generate_xlsx, generate_xlsx_with_options, Dataset, ExcelError, ExportOptions, TextEncoding,
};
use std::io::{Cursor, Read};
use tempfile::tempdir;

const PACKAGE_PARTS: [&str; 5] = [
    "[Content_Types].xml",
    "_rels/.rels",
    "xl/workbook.xml",
    "xl/_rels/workbook.xml.rels",
    "xl/worksheets/sheet1.xml",
];

fn people() -> Dataset {
    Dataset::from_records(vec![
        record([("name", CellValue::from("Alice")), ("age", CellValue::from(30))]),
        record([("name", CellValue::from("Bob")), ("age", CellValue::from(25))]),
    ])
}

/// Read every entry with the `zip` crate, in archive order
fn read_with_zip_crate(bytes: &[u8]) -> Vec<(String, Vec<u8>, u32)> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
    let mut out = Vec::new();
    for i in 0..archive.len() {
        let mut file = archive.by_index(i).unwrap();
        assert_eq!(file.compression(), zip::CompressionMethod::Stored);
        let mut data = Vec::new();
        file.read_to_end(&mut data).unwrap();
        out.push((file.name().to_string(), data, file.crc32()));
    }
    out
}

#[test]
fn test_crc32_matches_crc32fast() {
    let samples: [&[u8]; 4] = [b"", b"123456789", b"<sheetData/>", &[0xFF; 1024]];
    for sample in samples {
        assert_eq!(crc32(sample), crc32fast::hash(sample));
    }
    assert_eq!(crc32(b"123456789"), 0xCBF43926);
}

#[test]
fn test_zip_roundtrip_with_standard_reader() {
    let entries = vec![
        ZipEntry::new("a.txt", "first"),
        ZipEntry::new("dir/b.xml", "<b>second</b>"),
        ZipEntry::new("empty", ""),
    ];
    let bytes = create_zip(&entries).unwrap();

    let read = read_with_zip_crate(&bytes);
    assert_eq!(read.len(), entries.len());
    for (entry, (name, data, stored_crc)) in entries.iter().zip(&read) {
        assert_eq!(&entry.name, name);
        assert_eq!(&entry.data, data);
        assert_eq!(*stored_crc, crc32fast::hash(data));
    }
}

#[test]
fn test_package_contains_exactly_five_parts() {
    let export = generate_xlsx(&people(), "report").unwrap();
    let bytes = export.to_bytes().unwrap();

    let read = read_with_zip_crate(&bytes);
    let names: Vec<&str> = read.iter().map(|(n, _, _)| n.as_str()).collect();
    assert_eq!(names, PACKAGE_PARTS);

    for (_, data, stored_crc) in &read {
        assert_eq!(*stored_crc, crc32fast::hash(data));
    }
}

#[test]
fn test_end_to_end_report() {
    let export = generate_xlsx(&people(), "report").unwrap();
    assert_eq!(export.file_name, "report.xlsx");

    let bytes = export.to_bytes().unwrap();
    let reader = ZipReader::new(&bytes).unwrap();
    let sheet = reader.read_text_by_name("xl/worksheets/sheet1.xml").unwrap();

    for cell in [
        r#"<c r="A1" t="inlineStr"><is><t>name</t></is></c>"#,
        r#"<c r="B1" t="inlineStr"><is><t>age</t></is></c>"#,
        r#"<c r="A2" t="inlineStr"><is><t>Alice</t></is></c>"#,
        r#"<c r="B2"><v>30</v></c>"#,
        r#"<c r="A3" t="inlineStr"><is><t>Bob</t></is></c>"#,
        r#"<c r="B3"><v>25</v></c>"#,
    ] {
        assert!(sheet.contains(cell), "missing {cell} in {sheet}");
    }
    assert!(!sheet.contains("<row r=\"4\""));
}

#[test]
fn test_empty_dataset_is_still_a_workbook() {
    let export = generate_xlsx(&Dataset::new(), "empty.xlsx").unwrap();
    assert_eq!(export.file_name, "empty.xlsx");

    let bytes = export.to_bytes().unwrap();
    let read = read_with_zip_crate(&bytes);
    assert_eq!(read.len(), 5);

    let sheet = String::from_utf8(read[4].1.clone()).unwrap();
    assert!(sheet.contains("<sheetData><row r=\"1\"></row></sheetData>"));
    assert!(!sheet.contains("<c "));
}

#[test]
fn test_json_input_to_workbook() {
    let dataset = Dataset::from_json_str(
        r#"[
            {"APLIKACIJA": "Portal", "NAZIV TASKA": "Review <draft>", "count": 3, "active": true},
            {"APLIKACIJA": "Portal", "NAZIV TASKA": null, "count": 1.25}
        ]"#,
    )
    .unwrap();

    let bytes = excelexport::generate_xlsx_bytes(&dataset, &ExportOptions::default()).unwrap();
    let reader = ZipReader::new(&bytes).unwrap();
    let sheet = reader.read_text_by_name("xl/worksheets/sheet1.xml").unwrap();

    assert!(sheet.contains(r#"<c r="B1" t="inlineStr"><is><t>NAZIV TASKA</t></is></c>"#));
    assert!(sheet.contains("<t>Review &lt;draft&gt;</t>"));
    assert!(sheet.contains(r#"<c r="C2"><v>3</v></c>"#));
    assert!(sheet.contains(r#"<c r="D2" t="inlineStr"><is><t>true</t></is></c>"#));
    assert!(sheet.contains(r#"<c r="B3" t="inlineStr"><is><t></t></is></c>"#));
    assert!(sheet.contains(r#"<c r="C3"><v>1.25</v></c>"#));
    // record 1 has no "active" key
    assert!(sheet.contains(r#"<c r="D3" t="inlineStr"><is><t></t></is></c>"#));
}

#[test]
fn test_utf8_text_survives_roundtrip() {
    let dataset = Dataset::from_records(vec![record([("Skupno število", "Žiga")])]);
    let export = generate_xlsx(&dataset, "utf8").unwrap();
    let bytes = export.to_bytes().unwrap();

    let read = read_with_zip_crate(&bytes);
    let sheet = String::from_utf8(read[4].1.clone()).unwrap();
    assert!(sheet.contains("<t>Skupno število</t>"));
    assert!(sheet.contains("<t>Žiga</t>"));
}

#[test]
fn test_latin1_mode_is_byte_per_char() {
    let dataset = Dataset::from_records(vec![record([("café", "x")])]);
    let options = ExportOptions::new().with_encoding(TextEncoding::Latin1);
    let export = generate_xlsx_with_options(&dataset, "legacy", &options).unwrap();
    let bytes = export.to_bytes().unwrap();

    let reader = ZipReader::new(&bytes).unwrap();
    let sheet = reader.read_entry_by_name("xl/worksheets/sheet1.xml").unwrap();
    assert!(sheet.windows(8).any(|w| w == b"<t>caf\xE9<"));
}

#[test]
fn test_invalid_number_aborts_export() {
    let dataset = Dataset::from_records(vec![
        record([("v", 1.0)]),
        record([("v", f64::INFINITY)]),
    ]);
    let err = generate_xlsx(&dataset, "bad").unwrap_err();
    assert!(matches!(err, ExcelError::InvalidNumber { ref cell } if cell == "A3"));
}

#[test]
fn test_invalid_entry_name_is_rejected() {
    let err = create_zip(&[ZipEntry::new("xl/ünicode.xml", "x")]).unwrap_err();
    assert!(matches!(err, ExcelError::InvalidEntryName(_)));
}

#[test]
fn test_save_to_dir() {
    let dir = tempdir().unwrap();
    let target = dir.path().join("report");

    let export = generate_xlsx(&people(), "people").unwrap();
    let path = export.save_to_dir(&target).unwrap();

    assert_eq!(path, target.join("people.xlsx"));
    let on_disk = std::fs::read(&path).unwrap();
    assert_eq!(on_disk, export.to_bytes().unwrap());
    assert_eq!(read_with_zip_crate(&on_disk).len(), 5);
}
