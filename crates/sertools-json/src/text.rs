//! Byte/string conversion under explicit text encodings.
//!
//! The JSON engine always produces UTF-8 bytes; these conversions sit at the
//! outer boundary where callers ask for the serialized form as a string, or
//! hand in a string to decode. A failed conversion is the one error this
//! layer invents: [`JsonCodecError::TextConversion`] carrying the attempted
//! encoding.

use std::fmt;

use crate::error::JsonCodecError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextEncoding {
    #[default]
    Utf8,
    Utf16Le,
    Utf16Be,
    Ascii,
    Latin1,
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TextEncoding::Utf8 => "UTF-8",
            TextEncoding::Utf16Le => "UTF-16LE",
            TextEncoding::Utf16Be => "UTF-16BE",
            TextEncoding::Ascii => "US-ASCII",
            TextEncoding::Latin1 => "ISO-8859-1",
        };
        f.write_str(name)
    }
}

/// Interprets `bytes` as a string under `encoding`.
pub fn bytes_to_string(bytes: &[u8], encoding: TextEncoding) -> Result<String, JsonCodecError> {
    let fail = || JsonCodecError::TextConversion { encoding };
    match encoding {
        TextEncoding::Utf8 => String::from_utf8(bytes.to_vec()).map_err(|_| fail()),
        TextEncoding::Ascii => {
            if bytes.is_ascii() {
                // ASCII is a UTF-8 subset.
                Ok(String::from_utf8_lossy(bytes).into_owned())
            } else {
                Err(fail())
            }
        }
        TextEncoding::Latin1 => Ok(bytes.iter().map(|&b| char::from(b)).collect()),
        TextEncoding::Utf16Le | TextEncoding::Utf16Be => {
            if bytes.len() % 2 != 0 {
                return Err(fail());
            }
            let units: Vec<u16> = bytes
                .chunks_exact(2)
                .map(|pair| {
                    if encoding == TextEncoding::Utf16Le {
                        u16::from_le_bytes([pair[0], pair[1]])
                    } else {
                        u16::from_be_bytes([pair[0], pair[1]])
                    }
                })
                .collect();
            String::from_utf16(&units).map_err(|_| fail())
        }
    }
}

/// Renders `text` as bytes under `encoding`.
pub fn string_to_bytes(text: &str, encoding: TextEncoding) -> Result<Vec<u8>, JsonCodecError> {
    let fail = || JsonCodecError::TextConversion { encoding };
    match encoding {
        TextEncoding::Utf8 => Ok(text.as_bytes().to_vec()),
        TextEncoding::Ascii => {
            if text.is_ascii() {
                Ok(text.as_bytes().to_vec())
            } else {
                Err(fail())
            }
        }
        TextEncoding::Latin1 => text
            .chars()
            .map(|c| u8::try_from(u32::from(c)).map_err(|_| fail()))
            .collect(),
        TextEncoding::Utf16Le => Ok(text
            .encode_utf16()
            .flat_map(|unit| unit.to_le_bytes())
            .collect()),
        TextEncoding::Utf16Be => Ok(text
            .encode_utf16()
            .flat_map(|unit| unit.to_be_bytes())
            .collect()),
    }
}
