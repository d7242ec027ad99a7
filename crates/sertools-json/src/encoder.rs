//! Options-driven JSON encoder.
//!
//! Field traversal and token writing belong to `serde_json`; this layer owns
//! only the strategy renderings (blobs, timestamps, key casing, non-finite
//! floats) and the byte-to-string boundary.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{Map, Number, Value as JsonValue};
use sertools_core::{Encodable, Value};

use crate::case;
use crate::error::JsonCodecError;
use crate::options::{BlobFormat, JsonOptions, NonFiniteFormat, TimestampFormat};
use crate::text::{self, TextEncoding};

pub(crate) const DATA_URI_PREFIX: &str = "data:application/octet-stream;base64,";

pub struct JsonEncoder {
    options: JsonOptions,
}

impl Default for JsonEncoder {
    fn default() -> Self {
        Self::new(JsonOptions::default())
    }
}

impl JsonEncoder {
    pub fn new(options: JsonOptions) -> Self {
        Self { options }
    }

    /// Encodes `value` to JSON bytes.
    pub fn encode<T: Encodable>(&self, value: &T) -> Result<Vec<u8>, JsonCodecError> {
        let tree = self.to_json(&value.to_value(), "")?;
        Ok(serde_json::to_vec(&tree)?)
    }

    /// Encodes `value` to a JSON string under `encoding`.
    pub fn encode_to_string<T: Encodable>(
        &self,
        value: &T,
        encoding: TextEncoding,
    ) -> Result<String, JsonCodecError> {
        let bytes = self.encode(value)?;
        text::bytes_to_string(&bytes, encoding)
    }

    fn to_json(&self, value: &Value, path: &str) -> Result<JsonValue, JsonCodecError> {
        Ok(match value {
            Value::Null => JsonValue::Null,
            Value::Bool(b) => JsonValue::Bool(*b),
            Value::Int(n) => JsonValue::Number((*n).into()),
            Value::UInt(n) => JsonValue::Number((*n).into()),
            Value::Float(f) => self.float_to_json(*f, path)?,
            Value::Str(s) => JsonValue::String(s.clone()),
            Value::Bytes(bytes) => self.blob_to_json(bytes),
            Value::Timestamp(dt) => self.timestamp_to_json(dt),
            Value::Array(items) => {
                let mut out = Vec::with_capacity(items.len());
                for (i, item) in items.iter().enumerate() {
                    out.push(self.to_json(item, &format!("{path}/{i}"))?);
                }
                JsonValue::Array(out)
            }
            Value::Object(fields) => {
                let mut map = Map::with_capacity(fields.len());
                for (name, field) in fields {
                    let key = case::convert_key(name, self.options.keys);
                    let child = self.to_json(field, &format!("{path}/{key}"))?;
                    map.insert(key, child);
                }
                JsonValue::Object(map)
            }
        })
    }

    fn float_to_json(&self, f: f64, path: &str) -> Result<JsonValue, JsonCodecError> {
        if let Some(n) = Number::from_f64(f) {
            return Ok(JsonValue::Number(n));
        }
        // `from_f64` only fails for non-finite values.
        match &self.options.floats {
            NonFiniteFormat::Tokens {
                positive_infinity,
                negative_infinity,
                nan,
            } => {
                let token = if f.is_nan() {
                    nan
                } else if f.is_sign_positive() {
                    positive_infinity
                } else {
                    negative_infinity
                };
                Ok(JsonValue::String(token.clone()))
            }
            NonFiniteFormat::Reject => Err(JsonCodecError::NonFiniteFloat {
                path: path.to_owned(),
            }),
        }
    }

    fn blob_to_json(&self, bytes: &[u8]) -> JsonValue {
        match self.options.blobs {
            BlobFormat::Base64 => JsonValue::String(BASE64.encode(bytes)),
            BlobFormat::ByteArray => {
                JsonValue::Array(bytes.iter().map(|&b| JsonValue::Number(b.into())).collect())
            }
            BlobFormat::DataUri => {
                JsonValue::String(format!("{DATA_URI_PREFIX}{}", BASE64.encode(bytes)))
            }
        }
    }

    fn timestamp_to_json(&self, dt: &DateTime<Utc>) -> JsonValue {
        match self.options.timestamps {
            TimestampFormat::Iso8601 => {
                JsonValue::String(dt.to_rfc3339_opts(SecondsFormat::AutoSi, true))
            }
            TimestampFormat::EpochSeconds => {
                let secs =
                    dt.timestamp() as f64 + f64::from(dt.timestamp_subsec_nanos()) / 1e9;
                Number::from_f64(secs).map_or(JsonValue::Null, JsonValue::Number)
            }
            TimestampFormat::EpochMillis => JsonValue::Number(dt.timestamp_millis().into()),
        }
    }
}
