//! Best-effort extraction of structured JSON from free-text answers.
//!
//! The answer model is instructed to reply with JSON, but in practice it
//! wraps the payload in prose, markdown fences, or both. This module
//! recovers a [`serde_json::Value`] of the expected shape by trying
//! progressively looser strategies, first success wins:
//!
//! 1. parse the entire text;
//! 2. parse the inner content of a fenced block labeled ```` ```json ````;
//! 3. parse the inner content of any ```` ``` ```` fenced block;
//! 4. slice from the first opening to the last closing delimiter of the
//!    expected shape (`{`/`}` for objects, `[`/`]` for arrays), inclusive,
//!    and parse the slice.
//!
//! A candidate that fails to parse falls through to the next strategy, so a
//! well-delimited fence holding malformed JSON does not abort extraction.
//!
//! When every strategy fails, object-shaped extractions degrade into a
//! fallback record carrying the raw text verbatim; array-shaped extractions
//! fail with [`ExtractError::Unprocessable`].
//!
//! Known approximation: strategy 4 takes the *first* opening and the *last*
//! closing delimiter, which over-captures when the text contains several
//! independent JSON blobs. See `slice_over_capture_is_accepted` below; this
//! is documented behavior, not a guaranteed-correct parser.

use serde_json::{Map, Value};
use thiserror::Error;

/// Which record family an array-shaped extraction carries.
///
/// Selects the unprocessable-content message and names the identifier field
/// that gets stringified during normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Product,
    Update,
}

impl RecordKind {
    /// Identifier field rewritten to its string form when present.
    pub const fn id_field(self) -> &'static str {
        "id"
    }

    fn describe(self) -> &'static str {
        match self {
            Self::Product => "product data",
            Self::Update => "product updates",
        }
    }
}

/// Expected top-level shape of the extracted value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    /// A single JSON object (comparison result).
    Object,
    /// A JSON array of records of the given kind.
    Array(RecordKind),
}

/// Terminal extraction failure for array-shaped answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ExtractError {
    #[error("Failed to parse {} from API response", .0.describe())]
    Unprocessable(RecordKind),
}

/// Field holding the verbatim answer text in the object-shape fallback.
pub const RAW_CONTENT_FIELD: &str = "rawContent";

/// Marker message set alongside [`RAW_CONTENT_FIELD`] in the fallback.
pub const PARSE_ERROR_MESSAGE: &str = "Could not parse structured data";

/// Coerces `raw` into a JSON value of the expected `shape`.
///
/// On success the value is normalized: a lone object where an array was
/// expected is wrapped in a one-element array, and every array record's
/// identifier field is rewritten to its string form (see [`stringify_id`]).
///
/// # Errors
/// [`ExtractError::Unprocessable`] when `shape` is an array and no strategy
/// yields parseable JSON. Object shapes never fail; they degrade into
/// `{ "rawContent": <raw>, "error": "Could not parse structured data" }`.
pub fn extract_value(raw: &str, shape: Shape) -> Result<Value, ExtractError> {
    let parsed = candidates(raw, shape)
        .into_iter()
        .flatten()
        .find_map(|text| serde_json::from_str::<Value>(text.trim()).ok());

    match parsed {
        Some(value) => Ok(normalize(value, shape)),
        None => match shape {
            Shape::Object => Ok(fallback_record(raw)),
            Shape::Array(kind) => Err(ExtractError::Unprocessable(kind)),
        },
    }
}

/// Candidate substrings in strategy order.
fn candidates(raw: &str, shape: Shape) -> [Option<&str>; 4] {
    [
        Some(raw),
        fenced_block(raw, "```json"),
        fenced_block(raw, "```"),
        delimiter_slice(raw, shape),
    ]
}

/// Inner content of the first fenced block opened by `marker`, up to the
/// next fence marker (or the end of the text when the fence is unclosed).
fn fenced_block<'a>(raw: &'a str, marker: &str) -> Option<&'a str> {
    let (_, rest) = raw.split_once(marker)?;
    Some(rest.split("```").next().unwrap_or(rest))
}

/// Substring from the first opening to the last closing delimiter of the
/// expected shape, inclusive. `None` when either is missing or the last
/// closing delimiter precedes the first opening one.
fn delimiter_slice(raw: &str, shape: Shape) -> Option<&str> {
    let (open, close) = match shape {
        Shape::Object => ('{', '}'),
        Shape::Array(_) => ('[', ']'),
    };
    let start = raw.find(open)?;
    let end = raw.rfind(close)?;
    (end >= start).then(|| &raw[start..=end])
}

fn normalize(value: Value, shape: Shape) -> Value {
    match shape {
        Shape::Object => value,
        Shape::Array(kind) => {
            // A lone record where a list was expected still counts.
            let records = match value {
                Value::Array(items) => items,
                other => vec![other],
            };
            Value::Array(
                records
                    .into_iter()
                    .map(|record| stringify_id(record, kind))
                    .collect(),
            )
        }
    }
}

/// Rewrites the record's identifier field to its string form, when present.
///
/// The upstream model emits ids inconsistently as numbers or strings, while
/// downstream consumers assume strings. A record with no identifier field is
/// left as-is; one is never synthesized. Non-object records pass through.
fn stringify_id(record: Value, kind: RecordKind) -> Value {
    let Value::Object(mut map) = record else {
        return record;
    };
    if let Some(id) = map.get_mut(kind.id_field()) {
        if !id.is_string() {
            *id = Value::String(id_text(id));
        }
    }
    Value::Object(map)
}

/// String form of a non-string id: numbers via their display form, anything
/// else via its compact JSON text.
fn id_text(id: &Value) -> String {
    match id {
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

fn fallback_record(raw: &str) -> Value {
    let mut map = Map::new();
    map.insert(RAW_CONTENT_FIELD.into(), Value::String(raw.to_string()));
    map.insert("error".into(), Value::String(PARSE_ERROR_MESSAGE.into()));
    Value::Object(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const PRODUCTS: Shape = Shape::Array(RecordKind::Product);

    #[test]
    fn plain_json_object_passes_through() {
        let raw = r#"{"product1": {"name": "A"}, "product2": {"name": "B"}}"#;
        let value = extract_value(raw, Shape::Object).unwrap();
        assert_eq!(value["product1"]["name"], "A");
        assert_eq!(value["product2"]["name"], "B");
    }

    #[test]
    fn plain_json_array_passes_through_with_string_ids() {
        let raw = r#"[{"id": "7", "name": "A", "rating": 4.5}]"#;
        let value = extract_value(raw, PRODUCTS).unwrap();
        assert_eq!(value, json!([{"id": "7", "name": "A", "rating": 4.5}]));
    }

    #[test]
    fn labeled_fence_matches_unwrapped_result() {
        let inner = r#"[{"id":"1","name":"X"}]"#;
        let fenced = format!("Here you go:\n```json\n{inner}\n```\nHope that helps!");
        assert_eq!(
            extract_value(&fenced, PRODUCTS).unwrap(),
            extract_value(inner, PRODUCTS).unwrap()
        );
    }

    #[test]
    fn generic_fence_is_accepted() {
        let raw = "Sure:\n```\n{\"comparisonMetrics\": []}\n```";
        let value = extract_value(raw, Shape::Object).unwrap();
        assert_eq!(value["comparisonMetrics"], json!([]));
    }

    #[test]
    fn unclosed_fence_still_parses() {
        let raw = "```json\n{\"name\": \"open ended\"}";
        let value = extract_value(raw, Shape::Object).unwrap();
        assert_eq!(value["name"], "open ended");
    }

    #[test]
    fn malformed_fence_falls_through_to_slicing() {
        // The fence holds no JSON at all; the object after it is recovered
        // by the delimiter slice instead of aborting at the fence.
        let raw = "```json\nnot json at all\n```\n{\"ok\": true}";
        let value = extract_value(raw, Shape::Object).unwrap();
        assert_eq!(value["ok"], true);
    }

    #[test]
    fn brace_slicing_recovers_embedded_object() {
        let raw = "The verdict: {\"winner\": \"B\", \"score\": 3} overall.";
        let value = extract_value(raw, Shape::Object).unwrap();
        assert_eq!(value["winner"], "B");
    }

    #[test]
    fn slice_over_capture_is_accepted() {
        // Two independent blobs: first-`{`/last-`}` spans both, which is not
        // valid JSON, so extraction falls back. Documented approximation.
        let raw = "a {\"x\": 1} b {\"y\": 2} c";
        let value = extract_value(raw, Shape::Object).unwrap();
        assert_eq!(value["error"], PARSE_ERROR_MESSAGE);
    }

    #[test]
    fn unparseable_object_text_degrades_to_fallback() {
        let raw = "I could not find reliable data on these products.";
        let value = extract_value(raw, Shape::Object).unwrap();
        assert_eq!(value[RAW_CONTENT_FIELD], raw);
        assert_eq!(value["error"], PARSE_ERROR_MESSAGE);
    }

    #[test]
    fn unparseable_array_text_is_unprocessable() {
        let raw = "No matching products were found.";
        let err = extract_value(raw, PRODUCTS).unwrap_err();
        assert_eq!(err, ExtractError::Unprocessable(RecordKind::Product));
        assert_eq!(
            err.to_string(),
            "Failed to parse product data from API response"
        );
    }

    #[test]
    fn update_kind_has_its_own_message() {
        let err = extract_value("nope", Shape::Array(RecordKind::Update)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Failed to parse product updates from API response"
        );
    }

    #[test]
    fn numeric_and_string_ids_both_normalize() {
        let raw = r#"[{"id": 42, "name": "A"}, {"id": "42", "name": "B"}]"#;
        let value = extract_value(raw, PRODUCTS).unwrap();
        assert_eq!(value[0]["id"], "42");
        assert_eq!(value[1]["id"], "42");
    }

    #[test]
    fn missing_id_is_not_synthesized() {
        let raw = r#"[{"name": "anonymous"}]"#;
        let value = extract_value(raw, PRODUCTS).unwrap();
        assert_eq!(value, json!([{"name": "anonymous"}]));
    }

    #[test]
    fn lone_object_is_wrapped_for_array_shapes() {
        let raw = r#"{"id": 3, "title": "New release"}"#;
        let value = extract_value(raw, Shape::Array(RecordKind::Update)).unwrap();
        assert_eq!(value, json!([{"id": "3", "title": "New release"}]));
    }

    #[test]
    fn other_fields_survive_normalization_untouched() {
        let raw = r#"[{"id": 1, "rating": 4.5, "features": ["a", "b"], "price": null}]"#;
        let value = extract_value(raw, PRODUCTS).unwrap();
        assert_eq!(
            value,
            json!([{"id": "1", "rating": 4.5, "features": ["a", "b"], "price": null}])
        );
    }

    #[test]
    fn worked_example_from_the_wild() {
        let raw = "Here is the result:\n```json\n[{\"id\":1,\"name\":\"X\"}]\n```\n";
        let value = extract_value(raw, PRODUCTS).unwrap();
        assert_eq!(value, json!([{"id": "1", "name": "X"}]));
    }
}
