//! Structural type descriptors.
//!
//! Decoding is schema-driven: a [`FieldType`] tells the decoder what shape
//! to expect at each position, so ambiguous JSON forms (a string that is
//! really a base64 blob, a number that is really an epoch timestamp) resolve
//! without guessing.

/// Structural type of a single value position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldType {
    Bool,
    Int,
    UInt,
    Float,
    Str,
    Bytes,
    Timestamp,
    /// Accepts JSON `null` and missing object keys.
    Optional(Box<FieldType>),
    Array(Box<FieldType>),
    Object(Schema),
}

impl FieldType {
    pub fn optional(inner: FieldType) -> Self {
        FieldType::Optional(Box::new(inner))
    }

    pub fn array(element: FieldType) -> Self {
        FieldType::Array(Box::new(element))
    }
}

/// A named, typed field of an object schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    pub ty: FieldType,
}

impl Field {
    pub fn new(name: impl Into<String>, ty: FieldType) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

/// Ordered field list of an object. The declared order is the order fields
/// are written out, which keeps encoding deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Schema {
    pub fields: Vec<Field>,
}

impl Schema {
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }
}
