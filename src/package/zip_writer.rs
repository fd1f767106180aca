//! In-memory ZIP writer producing uncompressed ("stored") archives
//!
//! The whole archive is laid out in one pass over a buffer sized up front:
//! local header + data for every entry, then the central directory, then the
//! end-of-central-directory record. No ZIP64, no data descriptors.

use super::crc32::crc32;
use crate::error::{ExcelError, Result};

/// ZIP local file header signature (`PK\x03\x04`)
pub const LOCAL_FILE_HEADER_SIGNATURE: u32 = 0x04034b50;

/// ZIP central directory signature (`PK\x01\x02`)
pub const CENTRAL_DIRECTORY_SIGNATURE: u32 = 0x02014b50;

/// ZIP end of central directory signature (`PK\x05\x06`)
pub const END_OF_CENTRAL_DIRECTORY_SIGNATURE: u32 = 0x06054b50;

/// Fixed part of a local file header
pub const LOCAL_HEADER_LEN: usize = 30;

/// Fixed part of a central directory record
pub const CENTRAL_HEADER_LEN: usize = 46;

/// End of central directory record without comment
pub const END_RECORD_LEN: usize = 22;

/// Version 1.0 is enough for stored entries
const VERSION: u16 = 10;

/// Compression method 0
pub const METHOD_STORED: u16 = 0;

/// A named file to be stored in the archive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZipEntry {
    pub name: String,
    pub data: Vec<u8>,
}

impl ZipEntry {
    pub fn new(name: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        ZipEntry {
            name: name.into(),
            data: data.into(),
        }
    }
}

/// What the central directory needs to remember about a written entry
struct CentralEntry<'a> {
    name: &'a str,
    local_header_offset: u32,
    crc32: u32,
    size: u32,
}

/// Entry names must be non-empty printable ASCII so they are stored
/// byte-for-byte without a language encoding flag.
fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() || !name.bytes().all(|b| (0x20..=0x7E).contains(&b)) {
        return Err(ExcelError::InvalidEntryName(name.to_string()));
    }
    if name.len() > u16::MAX as usize {
        return Err(ExcelError::ZipLimit(format!(
            "entry name is {} bytes long",
            name.len()
        )));
    }
    Ok(())
}

fn to_u32(value: u64, what: &str) -> Result<u32> {
    u32::try_from(value).map_err(|_| ExcelError::ZipLimit(format!("{what} is {value} bytes")))
}

/// Build a stored ZIP archive from `entries`, in order
///
/// # Examples
///
/// ```
/// use excelexport::package::{create_zip, ZipEntry};
///
/// let bytes = create_zip(&[ZipEntry::new("hello.txt", "hi")])?;
/// assert_eq!(&bytes[..4], b"PK\x03\x04");
/// # Ok::<(), excelexport::ExcelError>(())
/// ```
pub fn create_zip(entries: &[ZipEntry]) -> Result<Vec<u8>> {
    let entry_count = u16::try_from(entries.len())
        .map_err(|_| ExcelError::ZipLimit(format!("{} entries", entries.len())))?;

    let mut local_total: u64 = 0;
    let mut central_size: u64 = 0;
    for entry in entries {
        validate_name(&entry.name)?;
        to_u32(entry.data.len() as u64, &entry.name)?;
        local_total += (LOCAL_HEADER_LEN + entry.name.len() + entry.data.len()) as u64;
        central_size += (CENTRAL_HEADER_LEN + entry.name.len()) as u64;
    }
    let central_dir_offset = to_u32(local_total, "central directory offset")?;
    let central_dir_size = to_u32(central_size, "central directory")?;

    let total_len = local_total + central_size + END_RECORD_LEN as u64;
    let mut out = Vec::with_capacity(total_len as usize);
    let mut central = Vec::with_capacity(entries.len());

    for entry in entries {
        let local_header_offset = out.len() as u32;
        let crc = crc32(&entry.data);
        let size = entry.data.len() as u32;

        // Local file header
        out.extend_from_slice(&LOCAL_FILE_HEADER_SIGNATURE.to_le_bytes());
        out.extend_from_slice(&VERSION.to_le_bytes()); // version needed
        out.extend_from_slice(&0u16.to_le_bytes()); // general purpose bit flag
        out.extend_from_slice(&METHOD_STORED.to_le_bytes());
        out.extend_from_slice(&0u16.to_le_bytes()); // mod time
        out.extend_from_slice(&0u16.to_le_bytes()); // mod date
        out.extend_from_slice(&crc.to_le_bytes());
        out.extend_from_slice(&size.to_le_bytes()); // compressed size
        out.extend_from_slice(&size.to_le_bytes()); // uncompressed size
        out.extend_from_slice(&(entry.name.len() as u16).to_le_bytes());
        out.extend_from_slice(&0u16.to_le_bytes()); // extra len
        out.extend_from_slice(entry.name.as_bytes());

        out.extend_from_slice(&entry.data);

        central.push(CentralEntry {
            name: &entry.name,
            local_header_offset,
            crc32: crc,
            size,
        });
    }

    debug_assert_eq!(out.len() as u64, local_total);

    for entry in &central {
        out.extend_from_slice(&CENTRAL_DIRECTORY_SIGNATURE.to_le_bytes());
        out.extend_from_slice(&VERSION.to_le_bytes()); // version made by
        out.extend_from_slice(&VERSION.to_le_bytes()); // version needed
        out.extend_from_slice(&0u16.to_le_bytes()); // general purpose bit flag
        out.extend_from_slice(&METHOD_STORED.to_le_bytes());
        out.extend_from_slice(&0u16.to_le_bytes()); // mod time
        out.extend_from_slice(&0u16.to_le_bytes()); // mod date
        out.extend_from_slice(&entry.crc32.to_le_bytes());
        out.extend_from_slice(&entry.size.to_le_bytes());
        out.extend_from_slice(&entry.size.to_le_bytes());
        out.extend_from_slice(&(entry.name.len() as u16).to_le_bytes());
        out.extend_from_slice(&0u16.to_le_bytes()); // extra len
        out.extend_from_slice(&0u16.to_le_bytes()); // file comment len
        out.extend_from_slice(&0u16.to_le_bytes()); // disk number start
        out.extend_from_slice(&0u16.to_le_bytes()); // internal attrs
        out.extend_from_slice(&0u32.to_le_bytes()); // external attrs
        out.extend_from_slice(&entry.local_header_offset.to_le_bytes());
        out.extend_from_slice(entry.name.as_bytes());
    }

    // End of central directory
    out.extend_from_slice(&END_OF_CENTRAL_DIRECTORY_SIGNATURE.to_le_bytes());
    out.extend_from_slice(&0u16.to_le_bytes()); // disk number
    out.extend_from_slice(&0u16.to_le_bytes()); // disk with central dir
    out.extend_from_slice(&entry_count.to_le_bytes());
    out.extend_from_slice(&entry_count.to_le_bytes());
    out.extend_from_slice(&central_dir_size.to_le_bytes());
    out.extend_from_slice(&central_dir_offset.to_le_bytes());
    out.extend_from_slice(&0u16.to_le_bytes()); // comment len

    debug_assert_eq!(out.len() as u64, total_len);
    log::debug!("zip archive built: {} entries, {} bytes", entries.len(), out.len());

    Ok(out)
}
