//! Order notes codec.
//!
//! A paella row has a single nullable `notes` column that carries three
//! logical fields: the staff's free-text remarks, the deposit collected and
//! the final price. The current wire format is a JSON object with exactly the
//! keys `notes`, `deposit` and `price`, where unset amounts are written as an
//! explicit `null` so that "unset" stays distinguishable from `0`.
//!
//! Rows written before the structured format existed hold arbitrary free
//! text. Those decode with the whole text as remarks, and amounts are
//! recovered best-effort from keyword + number fragments such as
//! `"fianza: 15"` or `"precio 42,50"`. Decoding never fails.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};

use crate::error::CoreError;
use crate::orders::DEFAULT_DEPOSIT;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Key holding the free-text remarks.
pub const KEY_NOTES: &str = "notes";

/// Key holding the deposit amount (number or `null`).
pub const KEY_DEPOSIT: &str = "deposit";

/// Key holding the final price (number or `null`).
pub const KEY_PRICE: &str = "price";

/// Keywords that introduce a deposit amount in legacy free-text notes.
pub const DEPOSIT_KEYWORDS: &[&str] = &["fianza"];

/// Keywords that introduce a price in legacy free-text notes.
pub const PRICE_KEYWORDS: &[&str] = &["precio"];

/// Keyword, optional colon/whitespace run, then the numeric token.
const AMOUNT_AFTER_KEYWORD: &str = r"[:\s]*([0-9.,]+)";

static DEFAULT_VOCABULARY: LazyLock<LegacyVocabulary> = LazyLock::new(|| {
    LegacyVocabulary::new(DEPOSIT_KEYWORDS, PRICE_KEYWORDS).expect("valid keyword table")
});

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// The logical content of a paella's `notes` column.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderAnnotation {
    /// User-entered remarks, possibly empty.
    pub free_text: String,
    /// Deposit collected. `None` means the default deposit applies.
    pub deposit: Option<f64>,
    /// Final price. `None` means the order has not been priced yet.
    pub price: Option<f64>,
}

impl OrderAnnotation {
    pub fn new(free_text: impl Into<String>, deposit: Option<f64>, price: Option<f64>) -> Self {
        Self {
            free_text: free_text.into(),
            deposit,
            price,
        }
    }

    /// Deposit to display and total: the stored one, or [`DEFAULT_DEPOSIT`].
    pub fn effective_deposit(&self) -> f64 {
        self.deposit.unwrap_or(DEFAULT_DEPOSIT)
    }

    /// Serialize into the text stored in the `notes` column.
    pub fn encode(&self) -> String {
        encode(self)
    }
}

/// Result of the single try-parse step over a stored `notes` value.
#[derive(Debug, Clone, PartialEq)]
pub enum StoredNotes<'a> {
    /// Absent or empty column.
    Empty,
    /// A JSON object in the current format (possibly with missing or extra keys).
    Structured(Map<String, Value>),
    /// Anything that is not a JSON object: legacy free text.
    Unstructured(&'a str),
}

impl<'a> StoredNotes<'a> {
    /// Classify a stored value without interpreting its fields.
    ///
    /// JSON scalars and arrays are treated as free text: only an object can
    /// carry the three keys.
    pub fn parse(text: Option<&'a str>) -> Self {
        let Some(text) = text.filter(|t| !t.is_empty()) else {
            return Self::Empty;
        };

        match serde_json::from_str::<Value>(text) {
            Ok(Value::Object(fields)) => Self::Structured(fields),
            _ => Self::Unstructured(text),
        }
    }
}

/// Keyword table used to recover amounts from legacy free text.
///
/// Each field accepts any of its keywords, matched case-insensitively.
#[derive(Debug, Clone)]
pub struct LegacyVocabulary {
    deposit: Regex,
    price: Regex,
}

impl LegacyVocabulary {
    /// Build a vocabulary from keyword lists. Keywords are matched literally.
    pub fn new(deposit_keywords: &[&str], price_keywords: &[&str]) -> Result<Self, CoreError> {
        Ok(Self {
            deposit: keyword_pattern(deposit_keywords)?,
            price: keyword_pattern(price_keywords)?,
        })
    }

    /// The built-in Spanish vocabulary (`fianza`, `precio`).
    pub fn default_table() -> &'static Self {
        &DEFAULT_VOCABULARY
    }

    /// First deposit amount mentioned in `text`, if any.
    pub fn recover_deposit(&self, text: &str) -> Option<f64> {
        capture_amount(&self.deposit, text)
    }

    /// First price mentioned in `text`, if any.
    pub fn recover_price(&self, text: &str) -> Option<f64> {
        capture_amount(&self.price, text)
    }
}

// ---------------------------------------------------------------------------
// Codec
// ---------------------------------------------------------------------------

/// Encode an annotation as the JSON object stored in the `notes` column.
///
/// Unset amounts become explicit `null`s. Non-finite amounts cannot be
/// represented in JSON and are also written as `null`.
pub fn encode(annotation: &OrderAnnotation) -> String {
    serde_json::json!({
        "notes": annotation.free_text,
        "deposit": annotation.deposit,
        "price": annotation.price,
    })
    .to_string()
}

/// Decode a stored `notes` value using the built-in legacy vocabulary.
pub fn decode(text: Option<&str>) -> OrderAnnotation {
    decode_with(text, LegacyVocabulary::default_table())
}

/// Decode a stored `notes` value, recovering legacy amounts with `vocabulary`.
pub fn decode_with(text: Option<&str>, vocabulary: &LegacyVocabulary) -> OrderAnnotation {
    match StoredNotes::parse(text) {
        StoredNotes::Empty => OrderAnnotation::default(),
        StoredNotes::Structured(fields) => OrderAnnotation {
            free_text: fields
                .get(KEY_NOTES)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            deposit: coerce_amount(fields.get(KEY_DEPOSIT)),
            price: coerce_amount(fields.get(KEY_PRICE)),
        },
        StoredNotes::Unstructured(raw) => OrderAnnotation {
            free_text: raw.to_string(),
            deposit: vocabulary.recover_deposit(raw),
            price: vocabulary.recover_price(raw),
        },
    }
}

/// Parse an amount typed into a create/edit form.
///
/// Empty input means "unset". A single `,` is accepted as the decimal
/// separator. Anything else that is not a finite, non-negative number is
/// rejected so the whole edit can be refused before any row is written.
pub fn parse_amount_input(raw: &str) -> Result<Option<f64>, CoreError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    match parse_number(&trimmed.replacen(',', ".", 1)) {
        Some(value) if value >= 0.0 => Ok(Some(value)),
        _ => Err(CoreError::Validation(format!(
            "Check the amounts entered for deposit or price: '{trimmed}' is not a valid amount"
        ))),
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Number passthrough, then numeric-string coercion, otherwise unset.
fn coerce_amount(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => parse_number(text),
        Value::Null | Value::Bool(_) | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Parse a trimmed decimal number. Blank, `inf` and `NaN` are rejected.
fn parse_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

fn keyword_pattern(keywords: &[&str]) -> Result<Regex, CoreError> {
    if keywords.is_empty() || keywords.iter().any(|k| k.trim().is_empty()) {
        return Err(CoreError::Validation(
            "Legacy keyword lists must contain non-empty keywords".to_string(),
        ));
    }

    let alternatives = keywords
        .iter()
        .map(|k| regex::escape(k))
        .collect::<Vec<_>>()
        .join("|");

    Regex::new(&format!("(?i)(?:{alternatives}){AMOUNT_AFTER_KEYWORD}"))
        .map_err(|e| CoreError::Internal(format!("Invalid keyword pattern: {e}")))
}

/// Only the first `,` is normalised, so `"1.234,5"` stays unparseable.
fn capture_amount(pattern: &Regex, text: &str) -> Option<f64> {
    let token = pattern.captures(text)?.get(1)?.as_str();
    parse_number(&token.replacen(',', ".", 1))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn roundtrip(annotation: &OrderAnnotation) -> OrderAnnotation {
        decode(Some(&encode(annotation)))
    }

    #[test]
    fn roundtrip_preserves_all_fields() {
        let cases = [
            OrderAnnotation::new("Sin gluten", Some(15.0), Some(42.5)),
            OrderAnnotation::new("", Some(0.0), Some(0.0)),
            OrderAnnotation::new("llevar paellera grande", Some(19.99), None),
            OrderAnnotation::new("ñ \"quoted\" \n línea", None, Some(120.0)),
        ];
        for case in &cases {
            assert_eq!(&roundtrip(case), case);
        }
    }

    #[test]
    fn unset_amounts_stay_distinct_from_zero() {
        let unset = roundtrip(&OrderAnnotation::new("x", None, None));
        let zero = roundtrip(&OrderAnnotation::new("x", Some(0.0), Some(0.0)));

        assert_eq!(unset.deposit, None);
        assert_eq!(unset.price, None);
        assert_eq!(zero.deposit, Some(0.0));
        assert_eq!(zero.price, Some(0.0));
    }

    #[test]
    fn encode_writes_explicit_nulls() {
        let text = encode(&OrderAnnotation::new("", None, None));
        let value: Value = serde_json::from_str(&text).unwrap();

        assert_eq!(value[KEY_NOTES], "");
        assert!(value.as_object().unwrap().contains_key(KEY_DEPOSIT));
        assert!(value[KEY_DEPOSIT].is_null());
        assert!(value[KEY_PRICE].is_null());
    }

    #[test]
    fn empty_and_absent_decode_to_default() {
        assert_eq!(decode(None), OrderAnnotation::default());
        assert_eq!(decode(Some("")), OrderAnnotation::default());
    }

    #[test]
    fn legacy_text_recovers_amounts() {
        let text = "Sin gluten, fianza: 15, precio 42,50";
        let annotation = decode(Some(text));

        assert_eq!(annotation.free_text, text);
        assert_eq!(annotation.deposit, Some(15.0));
        assert_eq!(annotation.price, Some(42.5));
    }

    #[test]
    fn legacy_keywords_are_case_insensitive() {
        let annotation = decode(Some("FIANZA 20 y Precio:35"));
        assert_eq!(annotation.deposit, Some(20.0));
        assert_eq!(annotation.price, Some(35.0));
    }

    #[test]
    fn legacy_text_without_keywords() {
        let text = "random text with no keywords";
        assert_eq!(
            decode(Some(text)),
            OrderAnnotation::new(text, None, None)
        );
    }

    #[test]
    fn legacy_unparseable_amount_is_unset() {
        let annotation = decode(Some("fianza: 1.234,5 precio ."));
        assert_eq!(annotation.deposit, None);
        assert_eq!(annotation.price, None);
    }

    #[test]
    fn repeated_roundtrip_is_stable() {
        let first = roundtrip(&OrderAnnotation::new("", Some(10.0), None));
        let second = roundtrip(&first);

        assert_eq!(first, second);
        assert_eq!(second, OrderAnnotation::new("", Some(10.0), None));
    }

    #[test]
    fn malformed_json_falls_back_to_legacy() {
        let text = r#"{"notes": "mixta", "deposit": 12"#;
        let annotation = decode(Some(text));

        assert_eq!(annotation.free_text, text);
        assert_eq!(annotation.deposit, None);
        assert_eq!(annotation.price, None);
    }

    #[test]
    fn json_scalars_are_treated_as_free_text() {
        assert_matches!(StoredNotes::parse(Some("42")), StoredNotes::Unstructured("42"));
        assert_matches!(StoredNotes::parse(Some("null")), StoredNotes::Unstructured(_));
        assert_eq!(decode(Some("42")).free_text, "42");
    }

    #[test]
    fn structured_fields_are_coerced() {
        let annotation = decode(Some(
            r#"{"notes": 7, "deposit": "12.5", "price": "abc", "extra": true}"#,
        ));
        assert_eq!(annotation.free_text, "");
        assert_eq!(annotation.deposit, Some(12.5));
        assert_eq!(annotation.price, None);
    }

    #[test]
    fn structured_explicit_null_and_odd_types_are_unset() {
        let annotation = decode(Some(
            r#"{"notes": "a", "deposit": null, "price": true}"#,
        ));
        assert_eq!(annotation.deposit, None);
        assert_eq!(annotation.price, None);

        let blank = decode(Some(r#"{"deposit": "  ", "price": "NaN"}"#));
        assert_eq!(blank.deposit, None);
        assert_eq!(blank.price, None);
    }

    #[test]
    fn deposit_only_format_decodes() {
        let annotation = decode(Some(r#"{"deposit":10}"#));
        assert_eq!(annotation, OrderAnnotation::new("", Some(10.0), None));
    }

    #[test]
    fn custom_vocabulary_swaps_keywords() {
        let vocabulary = LegacyVocabulary::new(&["deposit", "fianza"], &["price"]).unwrap();
        let annotation = decode_with(Some("Deposit 5, price: 30.5 precio 99"), &vocabulary);

        assert_eq!(annotation.deposit, Some(5.0));
        assert_eq!(annotation.price, Some(30.5));
    }

    #[test]
    fn empty_vocabulary_is_rejected() {
        assert_matches!(
            LegacyVocabulary::new(&[], &["precio"]),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn effective_deposit_falls_back_to_default() {
        assert_eq!(OrderAnnotation::default().effective_deposit(), DEFAULT_DEPOSIT);
        assert_eq!(
            OrderAnnotation::new("", Some(0.0), None).effective_deposit(),
            0.0
        );
    }

    #[test]
    fn amount_input_parsing() {
        assert_eq!(parse_amount_input("").unwrap(), None);
        assert_eq!(parse_amount_input("  ").unwrap(), None);
        assert_eq!(parse_amount_input("12").unwrap(), Some(12.0));
        assert_eq!(parse_amount_input("12,5").unwrap(), Some(12.5));
        assert_eq!(parse_amount_input("0").unwrap(), Some(0.0));
        assert_matches!(parse_amount_input("doce"), Err(CoreError::Validation(_)));
        assert_matches!(parse_amount_input("-3"), Err(CoreError::Validation(_)));
    }
}
