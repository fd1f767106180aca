//! Minimal in-memory ZIP reader for stored archives
//!
//! Reads the central directory of a package produced by
//! [`create_zip`](super::create_zip) (or any other stored-only archive) and
//! extracts entries, checking each one against its recorded CRC-32.

use super::crc32::crc32;
use super::zip_writer::{
    CENTRAL_DIRECTORY_SIGNATURE, CENTRAL_HEADER_LEN, END_OF_CENTRAL_DIRECTORY_SIGNATURE,
    END_RECORD_LEN, LOCAL_FILE_HEADER_SIGNATURE, LOCAL_HEADER_LEN, METHOD_STORED,
};
use crate::error::{ExcelError, Result};

/// Entry in the ZIP central directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZipEntryInfo {
    pub name: String,
    pub crc32: u32,
    pub compressed_size: u32,
    pub uncompressed_size: u32,
    pub compression_method: u16,
    pub offset: u32,
}

/// ZIP archive reader over a byte slice
pub struct ZipReader<'a> {
    data: &'a [u8],
    entries: Vec<ZipEntryInfo>,
}

fn read_u16(data: &[u8], pos: usize) -> Result<u16> {
    data.get(pos..pos + 2)
        .map(|b| u16::from_le_bytes([b[0], b[1]]))
        .ok_or_else(|| ExcelError::ReadError(format!("unexpected end of archive at {pos}")))
}

fn read_u32(data: &[u8], pos: usize) -> Result<u32> {
    data.get(pos..pos + 4)
        .map(|b| u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
        .ok_or_else(|| ExcelError::ReadError(format!("unexpected end of archive at {pos}")))
}

fn read_bytes(data: &[u8], pos: usize, len: usize) -> Result<&[u8]> {
    data.get(pos..pos + len)
        .ok_or_else(|| ExcelError::ReadError(format!("unexpected end of archive at {pos}")))
}

impl<'a> ZipReader<'a> {
    /// Parse the central directory of `data`
    pub fn new(data: &'a [u8]) -> Result<Self> {
        let entries = Self::read_central_directory(data)?;
        Ok(ZipReader { data, entries })
    }

    /// Get list of all entries in the ZIP
    pub fn entries(&self) -> &[ZipEntryInfo] {
        &self.entries
    }

    /// Entry names, in central directory order
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.name.as_str()).collect()
    }

    /// Find an entry by name
    pub fn find_entry(&self, name: &str) -> Option<&ZipEntryInfo> {
        self.entries.iter().find(|e| e.name == name)
    }

    /// Read an entry's data, verifying its CRC-32
    pub fn read_entry(&self, entry: &ZipEntryInfo) -> Result<&'a [u8]> {
        let pos = entry.offset as usize;
        if read_u32(self.data, pos)? != LOCAL_FILE_HEADER_SIGNATURE {
            return Err(ExcelError::ReadError(format!(
                "Invalid local file header signature for {}",
                entry.name
            )));
        }

        if entry.compression_method != METHOD_STORED {
            return Err(ExcelError::NotSupported(format!(
                "compression method {} for {}",
                entry.compression_method, entry.name
            )));
        }

        let filename_len = read_u16(self.data, pos + 26)? as usize;
        let extra_len = read_u16(self.data, pos + 28)? as usize;
        let start = pos + LOCAL_HEADER_LEN + filename_len + extra_len;
        let data = read_bytes(self.data, start, entry.compressed_size as usize)?;

        let actual = crc32(data);
        if actual != entry.crc32 {
            return Err(ExcelError::ReadError(format!(
                "CRC mismatch for {}: stored {:08x}, computed {:08x}",
                entry.name, entry.crc32, actual
            )));
        }

        Ok(data)
    }

    /// Read an entry by name
    pub fn read_entry_by_name(&self, name: &str) -> Result<&'a [u8]> {
        let entry = self
            .find_entry(name)
            .ok_or_else(|| ExcelError::ReadError(format!("Entry not found: {}", name)))?;
        self.read_entry(entry)
    }

    /// Read an entry as UTF-8 text
    pub fn read_text_by_name(&self, name: &str) -> Result<&'a str> {
        let data = self.read_entry_by_name(name)?;
        std::str::from_utf8(data)
            .map_err(|e| ExcelError::ReadError(format!("{name} is not UTF-8: {e}")))
    }

    fn find_end_record(data: &[u8]) -> Result<usize> {
        if data.len() < END_RECORD_LEN {
            return Err(ExcelError::ReadError("File too small to be a ZIP".to_string()));
        }

        // The record is followed by at most a 64 KiB comment
        let lowest = data.len().saturating_sub(END_RECORD_LEN + u16::MAX as usize);
        let mut pos = data.len() - END_RECORD_LEN;
        loop {
            if read_u32(data, pos)? == END_OF_CENTRAL_DIRECTORY_SIGNATURE {
                return Ok(pos);
            }
            if pos == lowest {
                break;
            }
            pos -= 1;
        }

        Err(ExcelError::ReadError(
            "End of central directory not found".to_string(),
        ))
    }

    fn read_central_directory(data: &[u8]) -> Result<Vec<ZipEntryInfo>> {
        let end = Self::find_end_record(data)?;

        let total_entries = read_u16(data, end + 10)? as usize;
        let cd_size = read_u32(data, end + 12)? as usize;
        let cd_offset = read_u32(data, end + 16)? as usize;

        if cd_offset + cd_size > end {
            return Err(ExcelError::ReadError(
                "Central directory overlaps end record".to_string(),
            ));
        }

        let mut entries = Vec::with_capacity(total_entries);
        let mut pos = cd_offset;
        for _ in 0..total_entries {
            if read_u32(data, pos)? != CENTRAL_DIRECTORY_SIGNATURE {
                return Err(ExcelError::ReadError(
                    "Invalid central directory signature".to_string(),
                ));
            }

            let compression_method = read_u16(data, pos + 10)?;
            let crc32 = read_u32(data, pos + 16)?;
            let compressed_size = read_u32(data, pos + 20)?;
            let uncompressed_size = read_u32(data, pos + 24)?;
            let filename_len = read_u16(data, pos + 28)? as usize;
            let extra_len = read_u16(data, pos + 30)? as usize;
            let comment_len = read_u16(data, pos + 32)? as usize;
            let offset = read_u32(data, pos + 42)?;

            let name_bytes = read_bytes(data, pos + CENTRAL_HEADER_LEN, filename_len)?;
            let name = String::from_utf8_lossy(name_bytes).into_owned();

            entries.push(ZipEntryInfo {
                name,
                crc32,
                compressed_size,
                uncompressed_size,
                compression_method,
                offset,
            });

            pos += CENTRAL_HEADER_LEN + filename_len + extra_len + comment_len;
        }

        if pos != cd_offset + cd_size {
            return Err(ExcelError::ReadError(format!(
                "Central directory size mismatch: recorded {cd_size}, walked {}",
                pos - cd_offset
            )));
        }

        Ok(entries)
    }
}
