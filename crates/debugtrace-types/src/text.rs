use std::ffi::OsString;

/// Raw text as captured from the host, before transcoding to UTF-8.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextSource {
    /// Already canonical
    Utf8(String),
    /// Null-terminated narrow bytes (`CStr`), not validated yet
    Bytes(Vec<u8>),
    /// Platform string (`OsStr`, `Path`)
    Os(OsString),
    /// UTF-16 code units
    Utf16(Vec<u16>),
    /// UTF-32 code units
    Utf32(Vec<u32>),
}

impl TextSource {
    /// Human-readable name of the source representation, used in conversion placeholders.
    pub fn kind_name(&self) -> &'static str {
        match self {
            TextSource::Utf8(_) => "string",
            TextSource::Bytes(_) => "C string",
            TextSource::Os(_) => "OS string",
            TextSource::Utf16(_) => "wide string",
            TextSource::Utf32(_) => "u32 string",
        }
    }
}

/// Borrowed UTF-16 text, e.g. a buffer handed over from a Windows API.
///
/// The slice stops at the first NUL unit, like a null-terminated wide string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WideStr<'a>(&'a [u16]);

impl<'a> WideStr<'a> {
    pub fn new(units: &'a [u16]) -> Self {
        let end = units.iter().position(|&u| u == 0).unwrap_or(units.len());
        Self(&units[..end])
    }

    pub fn units(&self) -> &'a [u16] {
        self.0
    }
}

/// Owned UTF-16 text.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WideString(Vec<u16>);

impl WideString {
    pub fn new(units: Vec<u16>) -> Self {
        Self(units)
    }

    pub fn units(&self) -> &[u16] {
        &self.0
    }
}

impl From<&str> for WideString {
    fn from(s: &str) -> Self {
        Self(s.encode_utf16().collect())
    }
}

/// Borrowed UTF-32 text. Units are not guaranteed to be valid scalar values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct U32Str<'a>(&'a [u32]);

impl<'a> U32Str<'a> {
    pub fn new(units: &'a [u32]) -> Self {
        let end = units.iter().position(|&u| u == 0).unwrap_or(units.len());
        Self(&units[..end])
    }

    pub fn units(&self) -> &'a [u32] {
        self.0
    }
}
