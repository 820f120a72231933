use debugtrace_types::TextSource;
use std::fmt;

/// Windows code page identifier for UTF-8 (the canonical narrow encoding).
pub const CP_UTF8: u32 = 65001;
/// Windows code page identifier for 7-bit US-ASCII.
pub const CP_US_ASCII: u32 = 20127;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodingError {
    /// Narrow bytes (C string, OS string) that are not valid UTF-8
    InvalidUtf8,
    /// Unpaired UTF-16 surrogate
    InvalidUtf16 { unit: u16 },
    /// UTF-32 unit outside the Unicode scalar range
    InvalidScalar(u32),
    /// Character has no mapping in the target code page
    Unrepresentable { ch: char, code_page: u32 },
    UnsupportedCodePage(u32),
}

impl fmt::Display for EncodingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EncodingError::InvalidUtf8 => write!(f, "invalid UTF-8 sequence"),
            EncodingError::InvalidUtf16 { unit } => {
                write!(f, "unpaired UTF-16 surrogate 0x{:04x}", unit)
            }
            EncodingError::InvalidScalar(unit) => {
                write!(f, "invalid UTF-32 code unit 0x{:x}", unit)
            }
            EncodingError::Unrepresentable { ch, code_page } => {
                write!(f, "{:?} cannot be represented in code page {}", ch, code_page)
            }
            EncodingError::UnsupportedCodePage(code_page) => {
                write!(f, "unsupported code page {}", code_page)
            }
        }
    }
}

impl std::error::Error for EncodingError {}

/// Converts non-canonical text into the canonical narrow form.
pub trait TextEncoder: Send + Sync {
    fn to_narrow(&self, source: &TextSource) -> Result<String, EncodingError>;
}

/// Encoder driven by a Windows-style code page number.
///
/// Canonical UTF-8 input passes through untouched. Narrow byte and OS
/// strings are validated as UTF-8. Wide input (UTF-16/UTF-32) is decoded and
/// then checked against the target code page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodePageEncoder {
    code_page: u32,
}

impl CodePageEncoder {
    pub fn new(code_page: u32) -> Self {
        Self { code_page }
    }

    /// Like [`CodePageEncoder::new`], but rejects code pages it cannot encode to.
    pub fn try_new(code_page: u32) -> Result<Self, EncodingError> {
        match code_page {
            CP_UTF8 | CP_US_ASCII => Ok(Self::new(code_page)),
            other => Err(EncodingError::UnsupportedCodePage(other)),
        }
    }

    pub fn code_page(&self) -> u32 {
        self.code_page
    }

    fn encode_wide<I>(&self, chars: I) -> Result<String, EncodingError>
    where
        I: Iterator<Item = Result<char, EncodingError>>,
    {
        match self.code_page {
            CP_UTF8 => chars.collect(),
            CP_US_ASCII => chars
                .map(|ch| {
                    let ch = ch?;
                    if ch.is_ascii() {
                        Ok(ch)
                    } else {
                        Err(EncodingError::Unrepresentable {
                            ch,
                            code_page: self.code_page,
                        })
                    }
                })
                .collect(),
            other => Err(EncodingError::UnsupportedCodePage(other)),
        }
    }
}

impl Default for CodePageEncoder {
    fn default() -> Self {
        Self::new(CP_UTF8)
    }
}

impl TextEncoder for CodePageEncoder {
    fn to_narrow(&self, source: &TextSource) -> Result<String, EncodingError> {
        match source {
            TextSource::Utf8(text) => Ok(text.clone()),
            TextSource::Bytes(bytes) => std::str::from_utf8(bytes)
                .map(str::to_owned)
                .map_err(|_| EncodingError::InvalidUtf8),
            TextSource::Os(text) => text
                .to_str()
                .map(str::to_owned)
                .ok_or(EncodingError::InvalidUtf8),
            TextSource::Utf16(units) => self.encode_wide(
                char::decode_utf16(units.iter().copied()).map(|ch| {
                    ch.map_err(|err| EncodingError::InvalidUtf16 {
                        unit: err.unpaired_surrogate(),
                    })
                }),
            ),
            TextSource::Utf32(units) => self.encode_wide(
                units
                    .iter()
                    .map(|&unit| char::from_u32(unit).ok_or(EncodingError::InvalidScalar(unit))),
            ),
        }
    }
}

/// Transcode, substituting a fixed placeholder when the text cannot be converted.
pub fn to_narrow_or_placeholder(encoder: &dyn TextEncoder, source: &TextSource) -> String {
    encoder
        .to_narrow(source)
        .unwrap_or_else(|_| format!("<Cannot convert the {} to string>", source.kind_name()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;

    #[test]
    fn test_utf8_passes_through() {
        let encoder = CodePageEncoder::new(CP_US_ASCII);
        let source = TextSource::Utf8("héllo".to_string());
        assert_eq!(encoder.to_narrow(&source), Ok("héllo".to_string()));
    }

    #[test]
    fn test_utf16_to_utf8() {
        let encoder = CodePageEncoder::default();
        let units: Vec<u16> = "日本語".encode_utf16().collect();
        assert_eq!(
            encoder.to_narrow(&TextSource::Utf16(units)),
            Ok("日本語".to_string())
        );
    }

    #[test]
    fn test_unpaired_surrogate_fails() {
        let encoder = CodePageEncoder::default();
        let result = encoder.to_narrow(&TextSource::Utf16(vec![0x61, 0xd800]));
        assert_eq!(result, Err(EncodingError::InvalidUtf16 { unit: 0xd800 }));
    }

    #[test]
    fn test_utf32_invalid_scalar() {
        let encoder = CodePageEncoder::default();
        assert_eq!(
            encoder.to_narrow(&TextSource::Utf32(vec![0x41, 0x11_0000])),
            Err(EncodingError::InvalidScalar(0x11_0000))
        );
        assert_eq!(
            encoder.to_narrow(&TextSource::Utf32(vec![0x41, 0x1f600])),
            Ok("A\u{1f600}".to_string())
        );
    }

    #[test]
    fn test_ascii_code_page_rejects_non_ascii() {
        let encoder = CodePageEncoder::new(CP_US_ASCII);
        let units: Vec<u16> = "abc".encode_utf16().collect();
        assert_eq!(
            encoder.to_narrow(&TextSource::Utf16(units)),
            Ok("abc".to_string())
        );

        let units: Vec<u16> = "é".encode_utf16().collect();
        assert_eq!(
            encoder.to_narrow(&TextSource::Utf16(units)),
            Err(EncodingError::Unrepresentable {
                ch: 'é',
                code_page: CP_US_ASCII
            })
        );
    }

    #[test]
    fn test_unsupported_code_page() {
        let encoder = CodePageEncoder::new(932);
        assert_eq!(
            encoder.to_narrow(&TextSource::Utf16(vec![0x41])),
            Err(EncodingError::UnsupportedCodePage(932))
        );
    }

    #[test]
    fn test_try_new_checks_code_page() {
        assert!(CodePageEncoder::try_new(CP_UTF8).is_ok());
        assert!(CodePageEncoder::try_new(CP_US_ASCII).is_ok());
        assert_eq!(
            CodePageEncoder::try_new(1252),
            Err(EncodingError::UnsupportedCodePage(1252))
        );
    }

    #[test]
    fn test_narrow_bytes_are_validated() {
        let encoder = CodePageEncoder::default();
        assert_eq!(
            encoder.to_narrow(&TextSource::Bytes(b"abc".to_vec())),
            Ok("abc".to_string())
        );
        assert_eq!(
            encoder.to_narrow(&TextSource::Bytes(vec![0xff, 0xfe])),
            Err(EncodingError::InvalidUtf8)
        );
        assert_eq!(
            encoder.to_narrow(&TextSource::Os(OsString::from("tmp"))),
            Ok("tmp".to_string())
        );
    }

    #[test]
    fn test_placeholder_on_failure() {
        let encoder = CodePageEncoder::default();
        let source = TextSource::Utf16(vec![0xdc00]);
        assert_eq!(
            to_narrow_or_placeholder(&encoder, &source),
            "<Cannot convert the wide string to string>"
        );
    }
}
