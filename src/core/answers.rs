use std::collections::BTreeMap;

use serde::Serialize;

use super::schema;

/// One value per declared field id. Built from the schema defaults, so no id
/// is ever missing; unknown ids are refused at the wizard boundary.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct AnswerRecord {
    values: BTreeMap<&'static str, f64>,
}

impl Default for AnswerRecord {
    fn default() -> Self {
        let values = schema::all_fields().map(|field| (field.id, field.default)).collect();
        Self { values }
    }
}

impl AnswerRecord {
    pub fn get(&self, field_id: &str) -> Option<f64> {
        self.values.get(field_id).copied()
    }

    /// Returns false when the id is not declared in the schema.
    pub(crate) fn set(&mut self, field_id: &str, value: f64) -> bool {
        match self.values.get_mut(field_id) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        self.values.iter().map(|(id, value)| (*id, *value))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Fields holding NaN or an infinity after coercion.
    pub fn invalid_fields(&self) -> Vec<&'static str> {
        self.values.iter().filter(|(_, value)| !value.is_finite()).map(|(id, _)| *id).collect()
    }
}

/// Raw edit coming from the form.
#[derive(Debug, Clone, PartialEq)]
pub enum RawInput {
    /// Text typed into a numeric box.
    Text(String),
    /// Code picked from a choice selector.
    Code(i64),
    Number(f64),
}

impl RawInput {
    pub fn coerce(&self) -> f64 {
        match self {
            RawInput::Text(text) => coerce_numeric(text),
            RawInput::Code(code) => *code as f64,
            RawInput::Number(value) => *value,
        }
    }
}

/// Parses the longest leading decimal number in `raw`, ignoring leading
/// whitespace. Anything without a numeric prefix becomes NaN.
///
/// `"72.5kg"` gives 72.5, `"  -3"` gives -3, `"abc"` and `""` give NaN.
pub fn coerce_numeric(raw: &str) -> f64 {
    let trimmed = raw.trim_start();
    let bytes = trimmed.as_bytes();
    let mut end = 0;

    if end < bytes.len() && (bytes[end] == b'+' || bytes[end] == b'-') {
        end += 1;
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        if digits > 0 || frac_end > frac_start {
            digits += frac_end - frac_start;
            end = frac_end;
        }
    }

    if digits == 0 {
        if trimmed[int_start..].starts_with("Infinity") {
            return if trimmed.starts_with('-') { f64::NEG_INFINITY } else { f64::INFINITY };
        }
        return f64::NAN;
    }

    // Exponent only counts when at least one digit follows it.
    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && (bytes[exp_end] == b'+' || bytes[exp_end] == b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    trimmed[..end].parse::<f64>().unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_cover_every_field() {
        let record = AnswerRecord::default();
        for field in schema::all_fields() {
            assert_eq!(record.get(field.id), Some(field.default));
        }
        assert_eq!(record.len(), schema::all_fields().count());
        assert!(record.invalid_fields().is_empty());
    }

    #[test]
    fn test_set_refuses_unknown_ids() {
        let mut record = AnswerRecord::default();
        assert!(!record.set("bmi", 22.0));
        assert!(record.get("bmi").is_none());
        assert!(record.set("age", 61.0));
        assert_eq!(record.get("age"), Some(61.0));
    }

    #[test]
    fn test_coerce_numeric_prefixes() {
        assert_eq!(coerce_numeric("72"), 72.0);
        assert_eq!(coerce_numeric("  -3"), -3.0);
        assert_eq!(coerce_numeric("72.5kg"), 72.5);
        assert_eq!(coerce_numeric(".5"), 0.5);
        assert_eq!(coerce_numeric("5."), 5.0);
        assert_eq!(coerce_numeric("1e3"), 1000.0);
        assert_eq!(coerce_numeric("2e"), 2.0);
        assert_eq!(coerce_numeric("+8"), 8.0);
        assert_eq!(coerce_numeric("Infinity"), f64::INFINITY);
    }

    #[test]
    fn test_coerce_numeric_garbage_is_nan() {
        assert!(coerce_numeric("").is_nan());
        assert!(coerce_numeric("abc").is_nan());
        assert!(coerce_numeric("-").is_nan());
        assert!(coerce_numeric(".").is_nan());
        assert!(coerce_numeric("kg72").is_nan());
    }

    #[test]
    fn test_invalid_fields_flags_nan() {
        let mut record = AnswerRecord::default();
        record.set("height", RawInput::Text("tall".into()).coerce());
        assert_eq!(record.invalid_fields(), vec!["height"]);
    }

    #[test]
    fn test_serializes_as_flat_object() {
        let record = AnswerRecord::default();
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["age"], 50.0);
        assert_eq!(json["active"], 1.0);
        assert_eq!(json.as_object().unwrap().len(), 11);
    }
}
