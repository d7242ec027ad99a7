//! Opinionated JSON conveniences over `serde_json`.
//!
//! Encode any [`Encodable`] value to JSON bytes or text, and decode JSON
//! bytes or text back into a [`Decodable`] type, with configurable policies
//! for binary blobs, timestamps, field-name casing, non-finite floats, and
//! the byte/text boundary encoding. The JSON engine does all the token
//! work; this crate only plumbs options and strategy renderings around it.
//!
//! ```
//! use sertools_core::{Encodable, Value};
//! use sertools_json::{to_json_string, JsonOptions, TextEncoding};
//!
//! let value = Value::Object(vec![("pi".into(), Value::Float(f64::INFINITY))]);
//! let json = to_json_string(&value, &JsonOptions::default(), TextEncoding::Utf8).unwrap();
//! assert_eq!(json, r#"{"pi":"Infinity"}"#);
//! ```

mod case;
mod decoder;
mod encoder;
mod error;
mod options;
mod text;

pub use decoder::JsonDecoder;
pub use encoder::JsonEncoder;
pub use error::JsonCodecError;
pub use options::{BlobFormat, JsonOptions, KeyCaseFormat, NonFiniteFormat, TimestampFormat};
pub use text::TextEncoding;

use sertools_core::{Decodable, Encodable};

/// Encodes `value` to JSON bytes.
pub fn to_json_bytes<T: Encodable>(
    value: &T,
    options: &JsonOptions,
) -> Result<Vec<u8>, JsonCodecError> {
    JsonEncoder::new(options.clone()).encode(value)
}

/// Encodes `value` to a JSON string under `encoding`.
pub fn to_json_string<T: Encodable>(
    value: &T,
    options: &JsonOptions,
    encoding: TextEncoding,
) -> Result<String, JsonCodecError> {
    JsonEncoder::new(options.clone()).encode_to_string(value, encoding)
}

/// Decodes JSON bytes into a `T`.
pub fn from_json_bytes<T: Decodable>(
    bytes: &[u8],
    options: &JsonOptions,
) -> Result<T, JsonCodecError> {
    JsonDecoder::new(options.clone()).decode(bytes)
}

/// Decodes a JSON string into a `T`, converting through `encoding` first.
pub fn from_json_str<T: Decodable>(
    json: &str,
    options: &JsonOptions,
    encoding: TextEncoding,
) -> Result<T, JsonCodecError> {
    JsonDecoder::new(options.clone()).decode_str(json, encoding)
}
