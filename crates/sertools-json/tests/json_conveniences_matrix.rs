//! End-to-end round trips through the convenience API with a hand-written
//! structural type, across the option matrix.

use chrono::{DateTime, TimeZone, Utc};
use sertools_core::{object_type, take_field, Blob, Decodable, Encodable, FieldType, Value, ValueError};
use sertools_json::{
    from_json_bytes, from_json_str, to_json_bytes, to_json_string, BlobFormat, JsonCodecError,
    JsonOptions, KeyCaseFormat, TextEncoding, TimestampFormat,
};

#[derive(Debug, Clone)]
struct Sample {
    active: bool,
    title: String,
    subtitle: Option<String>,
    count: i64,
    retries: Option<i64>,
    level: u8,
    ratio: f32,
    precise: f64,
    scores: Vec<i64>,
    created_at: DateTime<Utc>,
    payload: Blob,
    custom: Custom,
}

#[derive(Debug, Clone, PartialEq)]
struct Custom {
    content: String,
}

impl Encodable for Sample {
    fn to_value(&self) -> Value {
        Value::Object(vec![
            ("active".into(), self.active.to_value()),
            ("title".into(), self.title.to_value()),
            ("subtitle".into(), self.subtitle.to_value()),
            ("count".into(), self.count.to_value()),
            ("retries".into(), self.retries.to_value()),
            ("level".into(), self.level.to_value()),
            ("ratio".into(), self.ratio.to_value()),
            ("precise".into(), self.precise.to_value()),
            ("scores".into(), self.scores.to_value()),
            ("createdAt".into(), self.created_at.to_value()),
            ("payload".into(), self.payload.to_value()),
            ("custom".into(), self.custom.to_value()),
        ])
    }
}

impl Decodable for Sample {
    fn field_type() -> FieldType {
        object_type(vec![
            ("active", bool::field_type()),
            ("title", String::field_type()),
            ("subtitle", Option::<String>::field_type()),
            ("count", i64::field_type()),
            ("retries", Option::<i64>::field_type()),
            ("level", u8::field_type()),
            ("ratio", f32::field_type()),
            ("precise", f64::field_type()),
            ("scores", Vec::<i64>::field_type()),
            ("createdAt", DateTime::<Utc>::field_type()),
            ("payload", Blob::field_type()),
            ("custom", Custom::field_type()),
        ])
    }

    fn from_value(value: Value) -> Result<Self, ValueError> {
        let Value::Object(mut fields) = value else {
            return Err(ValueError::TypeMismatch {
                expected: "object",
                found: value.type_name(),
            });
        };
        Ok(Sample {
            active: take_field(&mut fields, "active")?,
            title: take_field(&mut fields, "title")?,
            subtitle: take_field(&mut fields, "subtitle")?,
            count: take_field(&mut fields, "count")?,
            retries: take_field(&mut fields, "retries")?,
            level: take_field(&mut fields, "level")?,
            ratio: take_field(&mut fields, "ratio")?,
            precise: take_field(&mut fields, "precise")?,
            scores: take_field(&mut fields, "scores")?,
            created_at: take_field(&mut fields, "createdAt")?,
            payload: take_field(&mut fields, "payload")?,
            custom: take_field(&mut fields, "custom")?,
        })
    }
}

impl Encodable for Custom {
    fn to_value(&self) -> Value {
        Value::Object(vec![("content".into(), self.content.to_value())])
    }
}

impl Decodable for Custom {
    fn field_type() -> FieldType {
        object_type(vec![("content", String::field_type())])
    }

    fn from_value(value: Value) -> Result<Self, ValueError> {
        let Value::Object(mut fields) = value else {
            return Err(ValueError::TypeMismatch {
                expected: "object",
                found: value.type_name(),
            });
        };
        Ok(Custom {
            content: take_field(&mut fields, "content")?,
        })
    }
}

/// NaN-aware float comparison, since `NaN != NaN` under ordinary equality.
fn float_eq(a: f64, b: f64) -> bool {
    a == b || (a.is_nan() && b.is_nan())
}

fn assert_samples_eq(a: &Sample, b: &Sample) {
    assert_eq!(a.active, b.active);
    assert_eq!(a.title, b.title);
    assert_eq!(a.subtitle, b.subtitle);
    assert_eq!(a.count, b.count);
    assert_eq!(a.retries, b.retries);
    assert_eq!(a.level, b.level);
    assert!(
        float_eq(f64::from(a.ratio), f64::from(b.ratio)),
        "ratio: {} vs {}",
        a.ratio,
        b.ratio
    );
    assert!(
        float_eq(a.precise, b.precise),
        "precise: {} vs {}",
        a.precise,
        b.precise
    );
    assert_eq!(a.scores, b.scores);
    assert_eq!(a.created_at, b.created_at);
    assert_eq!(a.payload, b.payload);
    assert_eq!(a.custom, b.custom);
}

fn sample() -> Sample {
    Sample {
        active: true,
        title: "Strung".to_owned(),
        subtitle: None,
        count: -40,
        retries: Some(29),
        level: 42,
        ratio: 525_600.0,
        precise: 3.14159,
        scores: vec![2, 4, 6, 8],
        created_at: Utc.with_ymd_and_hms(2020, 12, 14, 8, 30, 0).unwrap(),
        payload: Blob("Rust \u{1f9e1}\u{1f49b} JSON".as_bytes().to_vec()),
        custom: Custom {
            content: "Quite content indeed".to_owned(),
        },
    }
}

#[test]
fn round_trip_bytes_with_default_options() {
    let original = sample();
    let opts = JsonOptions::default();
    let bytes = to_json_bytes(&original, &opts).unwrap();
    let reconstructed: Sample = from_json_bytes(&bytes, &opts).unwrap();
    assert_samples_eq(&original, &reconstructed);
}

#[test]
fn round_trip_string_with_default_options() {
    let original = Sample {
        title: "l\u{e5}mp".to_owned(),
        subtitle: Some("\u{2744}".to_owned()),
        ..sample()
    };
    let opts = JsonOptions::default();
    let json = to_json_string(&original, &opts, TextEncoding::Utf8).unwrap();
    let reconstructed: Sample = from_json_str(&json, &opts, TextEncoding::Utf8).unwrap();
    assert_samples_eq(&original, &reconstructed);
}

#[test]
fn round_trip_with_non_finite_floats() {
    let original = Sample {
        ratio: f32::INFINITY,
        precise: f64::NAN,
        ..sample()
    };
    let opts = JsonOptions::default();
    let json = to_json_string(&original, &opts, TextEncoding::Utf8).unwrap();
    assert!(json.contains("\"Infinity\""), "got: {json}");
    assert!(json.contains("\"NaN\""), "got: {json}");
    let reconstructed: Sample = from_json_str(&json, &opts, TextEncoding::Utf8).unwrap();
    assert_samples_eq(&original, &reconstructed);
}

#[test]
fn positive_infinity_reconstructs_exactly() {
    let opts = JsonOptions::default();
    let bytes = to_json_bytes(&f64::INFINITY, &opts).unwrap();
    assert_eq!(bytes, b"\"Infinity\"");
    let back: f64 = from_json_bytes(&bytes, &opts).unwrap();
    assert_eq!(back, f64::INFINITY);
}

#[test]
fn round_trip_across_the_option_matrix() {
    let blob_formats = [BlobFormat::Base64, BlobFormat::ByteArray, BlobFormat::DataUri];
    let timestamp_formats = [
        TimestampFormat::Iso8601,
        TimestampFormat::EpochSeconds,
        TimestampFormat::EpochMillis,
    ];
    let key_formats = [
        KeyCaseFormat::Verbatim,
        KeyCaseFormat::SnakeCase,
        KeyCaseFormat::CamelCase,
    ];

    let original = sample();
    for blobs in blob_formats {
        for timestamps in timestamp_formats {
            for keys in key_formats {
                let opts = JsonOptions {
                    blobs,
                    timestamps,
                    keys,
                    ..Default::default()
                };
                let bytes = to_json_bytes(&original, &opts).unwrap();
                let reconstructed: Sample = from_json_bytes(&bytes, &opts)
                    .unwrap_or_else(|e| panic!("decode failed for {opts:?}: {e}"));
                assert_samples_eq(&original, &reconstructed);
            }
        }
    }
}

#[test]
fn snake_case_keys_appear_in_the_output() {
    let opts = JsonOptions {
        keys: KeyCaseFormat::SnakeCase,
        ..Default::default()
    };
    let json = to_json_string(&sample(), &opts, TextEncoding::Utf8).unwrap();
    assert!(json.contains("\"created_at\""), "got: {json}");
    assert!(!json.contains("\"createdAt\""), "got: {json}");
}

#[test]
fn invalid_json_fails_instead_of_defaulting() {
    let opts = JsonOptions::default();
    let result: Result<Sample, _> = from_json_bytes(b"not json at all", &opts);
    assert!(matches!(result, Err(JsonCodecError::Parse(_))));
}

#[test]
fn wrong_shape_fails_with_a_structural_error() {
    let opts = JsonOptions::default();
    let result: Result<Sample, _> = from_json_bytes(b"[1,2,3]", &opts);
    assert!(matches!(result, Err(JsonCodecError::TypeMismatch { .. })));
}

#[test]
fn text_conversion_failure_carries_the_encoding() {
    let opts = JsonOptions::default();

    // Encode side: the serialized form holds non-ASCII content.
    let err = to_json_string(&sample(), &opts, TextEncoding::Ascii).unwrap_err();
    assert!(matches!(
        err,
        JsonCodecError::TextConversion {
            encoding: TextEncoding::Ascii
        }
    ));

    // Decode side: the input string cannot be rendered in Latin-1.
    let result: Result<String, _> =
        from_json_str("\"\u{221e}\"", &opts, TextEncoding::Latin1);
    assert!(matches!(
        result,
        Err(JsonCodecError::TextConversion {
            encoding: TextEncoding::Latin1
        })
    ));
}

#[test]
fn latin1_string_round_trip() {
    // Latin-1 maps every byte to a char and back, so the string form is an
    // exact reinterpretation of the UTF-8 JSON bytes in both directions.
    let opts = JsonOptions::default();
    let original = sample();
    let json = to_json_string(&original, &opts, TextEncoding::Latin1).unwrap();
    let reconstructed: Sample = from_json_str(&json, &opts, TextEncoding::Latin1).unwrap();
    assert_samples_eq(&original, &reconstructed);
}
