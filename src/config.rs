//! Export configuration

/// Environment variable consulted by [`ExportOptions::from_env`]
pub const TEXT_ENCODING_ENV: &str = "EXCELEXPORT_TEXT_ENCODING";

/// How XML text is turned into the bytes stored in the ZIP entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextEncoding {
    /// Proper UTF-8, matching the `encoding="UTF-8"` XML declaration
    #[default]
    Utf8,
    /// One byte per UTF-16 code unit, keeping only its low 8 bits.
    /// Characters above U+00FF are mangled and characters above U+FFFF take
    /// two bytes, one per surrogate. U+0080..=U+00FF produce bytes that are
    /// not valid UTF-8.
    Latin1,
}

impl TextEncoding {
    /// Parse a name such as `utf8`, `UTF-8`, `latin1` or `latin-1`
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "utf8" | "utf-8" => Some(TextEncoding::Utf8),
            "latin1" | "latin-1" | "iso-8859-1" => Some(TextEncoding::Latin1),
            _ => None,
        }
    }

    /// Encode text into entry bytes
    pub fn encode(&self, text: &str) -> Vec<u8> {
        match self {
            TextEncoding::Utf8 => text.as_bytes().to_vec(),
            TextEncoding::Latin1 => {
                let bytes: Vec<u8> = text.encode_utf16().map(|u| u as u8).collect();
                if text.encode_utf16().any(|u| u > 0xFF) {
                    log::warn!("latin-1 export truncated characters above U+00FF");
                }
                bytes
            }
        }
    }
}

/// Options for a single export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExportOptions {
    pub encoding: TextEncoding,
}

impl ExportOptions {
    pub fn new() -> Self {
        ExportOptions::default()
    }

    /// Set the text encoding
    pub fn with_encoding(mut self, encoding: TextEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Detect from environment variable `EXCELEXPORT_TEXT_ENCODING`
    pub fn from_env() -> Self {
        let encoding = std::env::var(TEXT_ENCODING_ENV)
            .ok()
            .and_then(|s| TextEncoding::from_name(&s))
            .unwrap_or_default();
        ExportOptions { encoding }
    }
}
