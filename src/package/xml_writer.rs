//! Small XML writer that builds a part in a single growing `String`

use std::borrow::Cow;

/// XML declaration shared by every package part
pub const XML_DECLARATION: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n";

#[inline]
fn entity(c: char) -> Option<&'static str> {
    match c {
        '&' => Some("&amp;"),
        '<' => Some("&lt;"),
        '>' => Some("&gt;"),
        '"' => Some("&quot;"),
        '\'' => Some("&apos;"),
        _ => None,
    }
}

/// Escape the five reserved XML characters
///
/// Each character is replaced exactly once, so entities produced for one
/// character are never escaped again. Text without reserved characters is
/// returned borrowed.
///
/// ```
/// use excelexport::package::escape_xml;
///
/// assert_eq!(escape_xml("a < b & c"), "a &lt; b &amp; c");
/// assert_eq!(escape_xml("plain"), "plain");
/// ```
pub fn escape_xml(text: &str) -> Cow<'_, str> {
    let Some(first) = text.find(|c: char| entity(c).is_some()) else {
        return Cow::Borrowed(text);
    };

    let mut escaped = String::with_capacity(text.len() + 16);
    escaped.push_str(&text[..first]);
    for c in text[first..].chars() {
        match entity(c) {
            Some(e) => escaped.push_str(e),
            None => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

/// XML writer over an owned `String` buffer
pub struct XmlWriter {
    buffer: String,
}

impl XmlWriter {
    pub fn new() -> Self {
        XmlWriter::with_capacity(1024)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        XmlWriter {
            buffer: String::with_capacity(capacity),
        }
    }

    /// Start a part with the standard XML declaration
    pub fn with_declaration() -> Self {
        let mut writer = XmlWriter::new();
        writer.write_str(XML_DECLARATION);
        writer
    }

    /// Write raw markup
    #[inline]
    pub fn write_str(&mut self, s: &str) {
        self.buffer.push_str(s);
    }

    /// Write XML element start tag (left open for attributes)
    #[inline]
    pub fn start_element(&mut self, name: &str) {
        self.buffer.push('<');
        self.buffer.push_str(name);
    }

    /// Write XML element end tag
    #[inline]
    pub fn end_element(&mut self, name: &str) {
        self.buffer.push_str("</");
        self.buffer.push_str(name);
        self.buffer.push('>');
    }

    /// Close a start tag as self-closing
    #[inline]
    pub fn close_empty_tag(&mut self) {
        self.buffer.push_str("/>");
    }

    /// Write attribute
    #[inline]
    pub fn attribute(&mut self, name: &str, value: &str) {
        self.buffer.push(' ');
        self.buffer.push_str(name);
        self.buffer.push_str("=\"");
        self.write_escaped(value);
        self.buffer.push('"');
    }

    /// Write attribute with integer value
    #[inline]
    pub fn attribute_int(&mut self, name: &str, value: u64) {
        let mut digits = itoa::Buffer::new();
        self.buffer.push(' ');
        self.buffer.push_str(name);
        self.buffer.push_str("=\"");
        self.buffer.push_str(digits.format(value));
        self.buffer.push('"');
    }

    /// Close start tag
    #[inline]
    pub fn close_start_tag(&mut self) {
        self.buffer.push('>');
    }

    /// Write text content with XML escaping
    #[inline]
    pub fn write_escaped(&mut self, text: &str) {
        self.buffer.push_str(&escape_xml(text));
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Finish and return the markup
    pub fn into_string(self) -> String {
        self.buffer
    }
}

impl Default for XmlWriter {
    fn default() -> Self {
        XmlWriter::new()
    }
}
