//! Core primitives for sertools: the value tree, the structural schema that
//! drives decoding, and the encode/decode capability traits.

mod error;
mod schema;
mod traits;
mod value;

pub use error::ValueError;
pub use schema::{Field, FieldType, Schema};
pub use traits::{object_type, take_field, Decodable, Encodable};
pub use value::{Blob, Value};
