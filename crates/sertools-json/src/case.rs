//! Field-name case conversion.
//!
//! Both directions of a round trip apply the same conversion: the encoder
//! converts struct field names into JSON keys, and the decoder converts
//! schema field names the same way before looking keys up.

use crate::options::KeyCaseFormat;

/// Converts a structural field name into a JSON key under `format`.
pub fn convert_key(name: &str, format: KeyCaseFormat) -> String {
    match format {
        KeyCaseFormat::Verbatim => name.to_owned(),
        KeyCaseFormat::SnakeCase => to_snake_case(name),
        KeyCaseFormat::CamelCase => to_camel_case(name),
    }
}

fn to_snake_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    let mut prev_lower = false;
    for ch in name.chars() {
        if ch.is_uppercase() {
            // Only break at a lower-to-upper boundary, so acronym runs stay
            // together.
            if prev_lower {
                out.push('_');
            }
            out.extend(ch.to_lowercase());
            prev_lower = false;
        } else {
            prev_lower = ch.is_lowercase() || ch.is_ascii_digit();
            out.push(ch);
        }
    }
    out
}

fn to_camel_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper_next = false;
    for ch in name.chars() {
        if ch == '_' {
            upper_next = !out.is_empty();
        } else if upper_next {
            out.extend(ch.to_uppercase());
            upper_next = false;
        } else {
            out.push(ch);
        }
    }
    out
}
