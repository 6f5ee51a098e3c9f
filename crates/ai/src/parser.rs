//! Tolerant extraction of a forecast from model output.
//!
//! Models wrap JSON in prose or code fences and drift on field names between prompt
//! revisions, so extraction is lenient; validation of the extracted values is not.

use serde_json::{Map, Value as JsonValue};
use thiserror::Error;

use citysim_core::forecast::round_cents;
use citysim_core::{PredictionResult, PredictionStatus};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// No JSON object could be located or decoded.
    #[error("could not parse AI response: {0}")]
    Parse(String),

    /// A JSON object was found but a required field is missing or invalid.
    #[error("AI response failed schema validation: {0}")]
    Schema(String),
}

/// Accepted spellings per canonical field, in priority order. Keys are compared after
/// [`normalize_key`].
const ALIASES: [(&str, &[&str]); 4] = [
    (
        "predicted_price",
        &["predictedprice", "futureprice", "prediction", "price"],
    ),
    ("confidence", &["confidence", "confidencescore"]),
    ("factors", &["factors", "keyfactors"]),
    ("analysis", &["analysis", "summary", "explanation"]),
];

/// Extract and validate a forecast from raw model text.
pub fn parse_prediction(text: &str) -> Result<PredictionResult, ParseError> {
    let block = extract_json_block(text)
        .ok_or_else(|| ParseError::Parse("no JSON object found in response".to_string()))?;

    let value: JsonValue =
        serde_json::from_str(block).map_err(|e| ParseError::Parse(e.to_string()))?;
    let JsonValue::Object(object) = value else {
        return Err(ParseError::Parse("response JSON is not an object".to_string()));
    };
    let fields = normalize_fields(object);

    let predicted_price = require(&fields, "predicted_price").and_then(|v| {
        coerce_number(v)
            .filter(|p| *p >= 0.0)
            .map(round_cents)
            .filter(|p| p.is_finite())
            .ok_or_else(|| schema("predicted_price must be a non-negative number"))
    })?;

    // Out-of-range confidence is a formatting slip, not a failure.
    let confidence = require(&fields, "confidence").and_then(|v| {
        coerce_number(v)
            .map(|c| c.clamp(0.0, 1.0))
            .ok_or_else(|| schema("confidence must be a number"))
    })?;

    let factors = require(&fields, "factors").and_then(coerce_factors)?;

    let analysis = require(&fields, "analysis").and_then(|v| {
        v.as_str()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .ok_or_else(|| schema("analysis must be a non-empty string"))
    })?;

    Ok(PredictionResult {
        predicted_price,
        confidence_score: confidence,
        factors,
        analysis,
        status: PredictionStatus::Success,
    })
}

/// Interior of a ```` ```json ```` fence if present, else the outermost `{...}` span.
fn extract_json_block(text: &str) -> Option<&str> {
    const FENCE: &str = "```json";

    if let Some(start) = text.find(FENCE) {
        let body = &text[start + FENCE.len()..];
        if let Some(end) = body.find("```") {
            return Some(body[..end].trim());
        }
    }

    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

fn normalize_key(key: &str) -> String {
    key.chars()
        .filter(|c| !matches!(c, '_' | '-' | ' '))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Map the object onto canonical field names via [`ALIASES`].
fn normalize_fields(object: Map<String, JsonValue>) -> Map<String, JsonValue> {
    let by_key: Map<String, JsonValue> = object
        .into_iter()
        .map(|(k, v)| (normalize_key(&k), v))
        .collect();

    let mut out = Map::new();
    for (canonical, aliases) in ALIASES {
        if let Some(v) = aliases.iter().find_map(|a| by_key.get(*a)) {
            out.insert(canonical.to_string(), v.clone());
        }
    }
    out
}

fn schema(msg: &str) -> ParseError {
    ParseError::Schema(msg.to_string())
}

fn require<'a>(fields: &'a Map<String, JsonValue>, name: &str) -> Result<&'a JsonValue, ParseError> {
    fields
        .get(name)
        .filter(|v| !v.is_null())
        .ok_or_else(|| ParseError::Schema(format!("missing required field `{name}`")))
}

/// Numbers, or numeric strings such as `"$1,250.50"`.
fn coerce_number(value: &JsonValue) -> Option<f64> {
    let n = match value {
        JsonValue::Number(n) => n.as_f64(),
        JsonValue::String(s) => s
            .trim()
            .trim_start_matches('$')
            .replace(',', "")
            .parse::<f64>()
            .ok(),
        _ => None,
    }?;
    n.is_finite().then_some(n)
}

fn coerce_factors(value: &JsonValue) -> Result<Vec<String>, ParseError> {
    let items = value
        .as_array()
        .ok_or_else(|| schema("factors must be a list of strings"))?;

    let mut factors = Vec::with_capacity(items.len());
    for item in items {
        let s = item
            .as_str()
            .ok_or_else(|| schema("factors must be a list of strings"))?
            .trim();
        if !s.is_empty() {
            factors.push(s.to_string());
        }
    }

    if factors.is_empty() {
        return Err(schema("factors must not be empty"));
    }
    Ok(factors)
}
