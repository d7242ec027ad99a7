//! Encode/decode capability traits.
//!
//! A type participates in serialization by declaring, explicitly, which of
//! its fields map into the [`Value`] tree and in what order. There is no
//! reflection: user structs implement both traits by hand, listing fields in
//! their declared order.

use chrono::{DateTime, Utc};

use crate::{Blob, Field, FieldType, Schema, Value, ValueError};

/// A value that can render itself into a [`Value`] tree.
pub trait Encodable {
    fn to_value(&self) -> Value;
}

/// A value reconstructible from a [`Value`] tree, with a structural
/// descriptor that drives schema-aware decoding.
pub trait Decodable: Sized {
    fn field_type() -> FieldType;
    fn from_value(value: Value) -> Result<Self, ValueError>;
}

impl Encodable for Value {
    fn to_value(&self) -> Value {
        self.clone()
    }
}

impl Encodable for bool {
    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }
}

impl Decodable for bool {
    fn field_type() -> FieldType {
        FieldType::Bool
    }

    fn from_value(value: Value) -> Result<Self, ValueError> {
        match value {
            Value::Bool(b) => Ok(b),
            other => Err(mismatch("boolean", &other)),
        }
    }
}

macro_rules! impl_signed {
    ($($ty:ty),*) => {$(
        impl Encodable for $ty {
            fn to_value(&self) -> Value {
                Value::Int(i64::from(*self))
            }
        }

        impl Decodable for $ty {
            fn field_type() -> FieldType {
                FieldType::Int
            }

            fn from_value(value: Value) -> Result<Self, ValueError> {
                match value {
                    Value::Int(n) => {
                        <$ty>::try_from(n).map_err(|_| ValueError::OutOfRange { ty: stringify!($ty) })
                    }
                    Value::UInt(n) => {
                        <$ty>::try_from(n).map_err(|_| ValueError::OutOfRange { ty: stringify!($ty) })
                    }
                    other => Err(mismatch("integer", &other)),
                }
            }
        }
    )*};
}

impl_signed!(i8, i16, i32, i64);

macro_rules! impl_unsigned {
    ($($ty:ty),*) => {$(
        impl Encodable for $ty {
            fn to_value(&self) -> Value {
                Value::UInt(u64::from(*self))
            }
        }

        impl Decodable for $ty {
            fn field_type() -> FieldType {
                FieldType::UInt
            }

            fn from_value(value: Value) -> Result<Self, ValueError> {
                match value {
                    Value::UInt(n) => {
                        <$ty>::try_from(n).map_err(|_| ValueError::OutOfRange { ty: stringify!($ty) })
                    }
                    Value::Int(n) => {
                        <$ty>::try_from(n).map_err(|_| ValueError::OutOfRange { ty: stringify!($ty) })
                    }
                    other => Err(mismatch("unsigned integer", &other)),
                }
            }
        }
    )*};
}

impl_unsigned!(u8, u16, u32, u64);

impl Encodable for f32 {
    fn to_value(&self) -> Value {
        Value::Float(f64::from(*self))
    }
}

impl Decodable for f32 {
    fn field_type() -> FieldType {
        FieldType::Float
    }

    fn from_value(value: Value) -> Result<Self, ValueError> {
        f64::from_value(value).map(|f| f as f32)
    }
}

impl Encodable for f64 {
    fn to_value(&self) -> Value {
        Value::Float(*self)
    }
}

impl Decodable for f64 {
    fn field_type() -> FieldType {
        FieldType::Float
    }

    fn from_value(value: Value) -> Result<Self, ValueError> {
        match value {
            Value::Float(f) => Ok(f),
            // Numeric widening only; nothing else coerces.
            Value::Int(n) => Ok(n as f64),
            Value::UInt(n) => Ok(n as f64),
            other => Err(mismatch("float", &other)),
        }
    }
}

impl Encodable for String {
    fn to_value(&self) -> Value {
        Value::Str(self.clone())
    }
}

impl Encodable for &str {
    fn to_value(&self) -> Value {
        Value::Str((*self).to_owned())
    }
}

impl Decodable for String {
    fn field_type() -> FieldType {
        FieldType::Str
    }

    fn from_value(value: Value) -> Result<Self, ValueError> {
        match value {
            Value::Str(s) => Ok(s),
            other => Err(mismatch("string", &other)),
        }
    }
}

impl Encodable for Blob {
    fn to_value(&self) -> Value {
        Value::Bytes(self.0.clone())
    }
}

impl Decodable for Blob {
    fn field_type() -> FieldType {
        FieldType::Bytes
    }

    fn from_value(value: Value) -> Result<Self, ValueError> {
        match value {
            Value::Bytes(b) => Ok(Blob(b)),
            other => Err(mismatch("bytes", &other)),
        }
    }
}

impl Encodable for DateTime<Utc> {
    fn to_value(&self) -> Value {
        Value::Timestamp(*self)
    }
}

impl Decodable for DateTime<Utc> {
    fn field_type() -> FieldType {
        FieldType::Timestamp
    }

    fn from_value(value: Value) -> Result<Self, ValueError> {
        match value {
            Value::Timestamp(dt) => Ok(dt),
            other => Err(mismatch("timestamp", &other)),
        }
    }
}

impl<T: Encodable> Encodable for Option<T> {
    fn to_value(&self) -> Value {
        match self {
            Some(inner) => inner.to_value(),
            None => Value::Null,
        }
    }
}

impl<T: Decodable> Decodable for Option<T> {
    fn field_type() -> FieldType {
        FieldType::optional(T::field_type())
    }

    fn from_value(value: Value) -> Result<Self, ValueError> {
        match value {
            Value::Null => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }
}

impl<T: Encodable> Encodable for Vec<T> {
    fn to_value(&self) -> Value {
        Value::Array(self.iter().map(Encodable::to_value).collect())
    }
}

impl<T: Decodable> Decodable for Vec<T> {
    fn field_type() -> FieldType {
        FieldType::array(T::field_type())
    }

    fn from_value(value: Value) -> Result<Self, ValueError> {
        match value {
            Value::Array(items) => items.into_iter().map(T::from_value).collect(),
            other => Err(mismatch("array", &other)),
        }
    }
}

/// Reads a field out of a decoded object value, consuming it.
///
/// Convenience for hand-written `Decodable::from_value` impls on structs.
pub fn take_field<T: Decodable>(
    fields: &mut Vec<(String, Value)>,
    name: &str,
) -> Result<T, ValueError> {
    match fields.iter().position(|(k, _)| k == name) {
        Some(idx) => T::from_value(fields.remove(idx).1),
        None => Err(ValueError::MissingField(name.to_owned())),
    }
}

/// Builds the object [`FieldType`] for a struct from `(name, type)` pairs.
pub fn object_type(fields: Vec<(&str, FieldType)>) -> FieldType {
    FieldType::Object(Schema::new(
        fields
            .into_iter()
            .map(|(name, ty)| Field::new(name, ty))
            .collect(),
    ))
}

fn mismatch(expected: &'static str, found: &Value) -> ValueError {
    ValueError::TypeMismatch {
        expected,
        found: found.type_name(),
    }
}
