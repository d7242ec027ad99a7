//! Encoding/decoding policy options.
//!
//! An options record is constructed fresh per call and never mutated after
//! construction. Both directions of a round trip must use byte-identical
//! options.

/// How opaque byte blobs are rendered in JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlobFormat {
    /// A base64 string.
    #[default]
    Base64,
    /// An array of byte numbers.
    ByteArray,
    /// A `data:application/octet-stream;base64,` URI string.
    DataUri,
}

/// How timestamps are rendered in JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimestampFormat {
    /// An ISO-8601 / RFC 3339 string in UTC.
    #[default]
    Iso8601,
    /// Fractional seconds since the Unix epoch, as a JSON number.
    EpochSeconds,
    /// Whole milliseconds since the Unix epoch, as a JSON integer.
    EpochMillis,
}

/// How structural field names map to JSON object keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyCaseFormat {
    #[default]
    Verbatim,
    SnakeCase,
    CamelCase,
}

/// How non-finite floats are rendered, since JSON has no native token for
/// them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NonFiniteFormat {
    /// Render non-finite floats as literal string tokens, and parse the same
    /// tokens back.
    Tokens {
        positive_infinity: String,
        negative_infinity: String,
        nan: String,
    },
    /// Refuse to encode non-finite floats.
    Reject,
}

impl NonFiniteFormat {
    /// The JavaScript convention: `Infinity`, `-Infinity`, `NaN`.
    pub fn javascript() -> Self {
        NonFiniteFormat::Tokens {
            positive_infinity: "Infinity".to_owned(),
            negative_infinity: "-Infinity".to_owned(),
            nan: "NaN".to_owned(),
        }
    }
}

impl Default for NonFiniteFormat {
    fn default() -> Self {
        Self::javascript()
    }
}

/// The full options record for one encode or decode call.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct JsonOptions {
    pub blobs: BlobFormat,
    pub timestamps: TimestampFormat,
    pub keys: KeyCaseFormat,
    pub floats: NonFiniteFormat,
}
