//! Schema-driven JSON decoder.
//!
//! Parsing is `serde_json`'s; this layer walks the parsed tree against a
//! [`FieldType`] descriptor, undoing the strategy renderings the encoder
//! applied. Options must mirror the encode side.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use chrono::{DateTime, Utc};
use serde_json::Value as JsonValue;
use sertools_core::{Decodable, FieldType, Value};

use crate::case;
use crate::encoder::DATA_URI_PREFIX;
use crate::error::JsonCodecError;
use crate::options::{BlobFormat, JsonOptions, NonFiniteFormat, TimestampFormat};
use crate::text::{self, TextEncoding};

pub struct JsonDecoder {
    options: JsonOptions,
}

impl Default for JsonDecoder {
    fn default() -> Self {
        Self::new(JsonOptions::default())
    }
}

impl JsonDecoder {
    pub fn new(options: JsonOptions) -> Self {
        Self { options }
    }

    /// Decodes JSON bytes into a `T`.
    pub fn decode<T: Decodable>(&self, bytes: &[u8]) -> Result<T, JsonCodecError> {
        let value = self.decode_value(bytes, &T::field_type())?;
        Ok(T::from_value(value)?)
    }

    /// Decodes a JSON string into a `T`, converting through `encoding`
    /// first.
    pub fn decode_str<T: Decodable>(
        &self,
        json: &str,
        encoding: TextEncoding,
    ) -> Result<T, JsonCodecError> {
        let bytes = text::string_to_bytes(json, encoding)?;
        self.decode(&bytes)
    }

    /// Decodes JSON bytes against an explicit type descriptor.
    pub fn decode_value(&self, bytes: &[u8], ty: &FieldType) -> Result<Value, JsonCodecError> {
        let json: JsonValue = serde_json::from_slice(bytes)?;
        self.from_json(&json, ty, "")
    }

    fn from_json(
        &self,
        json: &JsonValue,
        ty: &FieldType,
        path: &str,
    ) -> Result<Value, JsonCodecError> {
        match ty {
            FieldType::Optional(inner) => {
                if json.is_null() {
                    Ok(Value::Null)
                } else {
                    self.from_json(json, inner, path)
                }
            }
            FieldType::Bool => match json.as_bool() {
                Some(b) => Ok(Value::Bool(b)),
                None => Err(mismatch(path, "boolean", json)),
            },
            FieldType::Int => match json.as_i64() {
                Some(n) => Ok(Value::Int(n)),
                None => Err(mismatch(path, "integer", json)),
            },
            FieldType::UInt => match json.as_u64() {
                Some(n) => Ok(Value::UInt(n)),
                None => Err(mismatch(path, "unsigned integer", json)),
            },
            FieldType::Float => self.float_from_json(json, path),
            FieldType::Str => match json.as_str() {
                Some(s) => Ok(Value::Str(s.to_owned())),
                None => Err(mismatch(path, "string", json)),
            },
            FieldType::Bytes => self.blob_from_json(json, path),
            FieldType::Timestamp => self.timestamp_from_json(json, path),
            FieldType::Array(element) => match json.as_array() {
                Some(items) => {
                    let mut out = Vec::with_capacity(items.len());
                    for (i, item) in items.iter().enumerate() {
                        out.push(self.from_json(item, element, &format!("{path}/{i}"))?);
                    }
                    Ok(Value::Array(out))
                }
                None => Err(mismatch(path, "array", json)),
            },
            FieldType::Object(schema) => {
                let Some(obj) = json.as_object() else {
                    return Err(mismatch(path, "object", json));
                };
                let mut out = Vec::with_capacity(schema.fields.len());
                for field in &schema.fields {
                    let key = case::convert_key(&field.name, self.options.keys);
                    match obj.get(&key) {
                        Some(child) => {
                            let child_path = format!("{path}/{key}");
                            out.push((
                                field.name.clone(),
                                self.from_json(child, &field.ty, &child_path)?,
                            ));
                        }
                        None if matches!(field.ty, FieldType::Optional(_)) => {
                            out.push((field.name.clone(), Value::Null));
                        }
                        None => {
                            return Err(JsonCodecError::MissingField {
                                path: path.to_owned(),
                                field: key,
                            });
                        }
                    }
                }
                Ok(Value::Object(out))
            }
        }
    }

    fn float_from_json(&self, json: &JsonValue, path: &str) -> Result<Value, JsonCodecError> {
        // `as_f64` also widens integer JSON numbers.
        if let Some(f) = json.as_f64() {
            return Ok(Value::Float(f));
        }
        if let Some(s) = json.as_str() {
            if let NonFiniteFormat::Tokens {
                positive_infinity,
                negative_infinity,
                nan,
            } = &self.options.floats
            {
                if s == positive_infinity {
                    return Ok(Value::Float(f64::INFINITY));
                }
                if s == negative_infinity {
                    return Ok(Value::Float(f64::NEG_INFINITY));
                }
                if s == nan {
                    return Ok(Value::Float(f64::NAN));
                }
            }
        }
        Err(mismatch(path, "number", json))
    }

    fn blob_from_json(&self, json: &JsonValue, path: &str) -> Result<Value, JsonCodecError> {
        let blob_err = |detail: String| JsonCodecError::Blob {
            path: path.to_owned(),
            detail,
        };
        match self.options.blobs {
            BlobFormat::Base64 => {
                let s = json
                    .as_str()
                    .ok_or_else(|| mismatch(path, "base64 string", json))?;
                BASE64
                    .decode(s)
                    .map(Value::Bytes)
                    .map_err(|e| blob_err(e.to_string()))
            }
            BlobFormat::ByteArray => {
                let items = json
                    .as_array()
                    .ok_or_else(|| mismatch(path, "byte array", json))?;
                items
                    .iter()
                    .map(|item| {
                        item.as_u64()
                            .and_then(|n| u8::try_from(n).ok())
                            .ok_or_else(|| blob_err(format!("not a byte: {item}")))
                    })
                    .collect::<Result<Vec<u8>, _>>()
                    .map(Value::Bytes)
            }
            BlobFormat::DataUri => {
                let s = json
                    .as_str()
                    .ok_or_else(|| mismatch(path, "data URI string", json))?;
                let b64 = s
                    .strip_prefix(DATA_URI_PREFIX)
                    .ok_or_else(|| blob_err("missing data URI prefix".to_owned()))?;
                BASE64
                    .decode(b64)
                    .map(Value::Bytes)
                    .map_err(|e| blob_err(e.to_string()))
            }
        }
    }

    fn timestamp_from_json(&self, json: &JsonValue, path: &str) -> Result<Value, JsonCodecError> {
        let ts_err = |detail: String| JsonCodecError::Timestamp {
            path: path.to_owned(),
            detail,
        };
        match self.options.timestamps {
            TimestampFormat::Iso8601 => {
                let s = json
                    .as_str()
                    .ok_or_else(|| mismatch(path, "ISO-8601 string", json))?;
                DateTime::parse_from_rfc3339(s)
                    .map(|dt| Value::Timestamp(dt.with_timezone(&Utc)))
                    .map_err(|e| ts_err(e.to_string()))
            }
            TimestampFormat::EpochSeconds => {
                let secs = json
                    .as_f64()
                    .ok_or_else(|| mismatch(path, "epoch seconds number", json))?;
                if !secs.is_finite() {
                    return Err(ts_err(format!("epoch seconds out of range: {secs}")));
                }
                // Split whole and fractional parts so large epochs keep
                // their sub-second precision through the f64.
                let mut whole = secs.trunc() as i64;
                let mut nanos = ((secs - secs.trunc()) * 1e9).round() as i64;
                if nanos < 0 {
                    whole -= 1;
                    nanos += 1_000_000_000;
                }
                DateTime::from_timestamp(whole, nanos as u32)
                    .map(Value::Timestamp)
                    .ok_or_else(|| ts_err(format!("epoch seconds out of range: {secs}")))
            }
            TimestampFormat::EpochMillis => {
                let millis = json
                    .as_i64()
                    .ok_or_else(|| mismatch(path, "epoch milliseconds integer", json))?;
                DateTime::from_timestamp_millis(millis)
                    .map(Value::Timestamp)
                    .ok_or_else(|| ts_err(format!("epoch milliseconds out of range: {millis}")))
            }
        }
    }
}

fn mismatch(path: &str, expected: &'static str, json: &JsonValue) -> JsonCodecError {
    JsonCodecError::TypeMismatch {
        path: path.to_owned(),
        expected,
        found: json_type_name(json),
    }
}

fn json_type_name(json: &JsonValue) -> &'static str {
    match json {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}
