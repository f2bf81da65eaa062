//! Verification of extracted receipt fields against caller expectations.

use crate::models::{ExpectedFields, ExtractedFields, FieldValue};

/// Typed equality between two optional values.
///
/// Text compares to text (case-sensitive), numbers compare to numbers with integer/decimal
/// coercion. Every other pairing, including a missing side, is unequal.
pub fn equals(a: Option<&FieldValue>, b: Option<&FieldValue>) -> bool {
    match (a, b) {
        (Some(FieldValue::Text(x)), Some(FieldValue::Text(y))) => x == y,
        (Some(FieldValue::Integer(x)), Some(FieldValue::Integer(y))) => x == y,
        (Some(x), Some(y)) => match (x.as_f64(), y.as_f64()) {
            (Some(x), Some(y)) => x == y,
            _ => false,
        },
        _ => false,
    }
}

/// A parsed receipt paired with the values the caller expects to find on it.
#[derive(Debug, Clone, Default)]
pub struct Receipt {
    pub parsed: ExtractedFields,
    pub expected: ExpectedFields,
}

impl Receipt {
    pub fn new(parsed: ExtractedFields, expected: ExpectedFields) -> Self {
        Self { parsed, expected }
    }

    /// Runs an arbitrary check over (parsed, expected).
    pub fn verify<F>(&self, predicate: F) -> bool
    where
        F: Fn(&ExtractedFields, &ExpectedFields) -> bool,
    {
        predicate(&self.parsed, &self.expected)
    }

    /// Every expected key not in `exclude` must be present in the parsed fields and equal.
    /// An empty parse never verifies.
    pub fn verify_all<S: AsRef<str>>(&self, exclude: &[S]) -> bool {
        if self.parsed.is_empty() {
            return false;
        }
        self.expected
            .iter()
            .filter(|(key, _)| !exclude.iter().any(|e| e.as_ref() == key.as_str()))
            .all(|(key, value)| equals(self.parsed.get(key), Some(value)))
    }

    /// Every named field must be present on both sides and equal. An empty list never verifies.
    pub fn verify_only<S: AsRef<str>>(&self, field_names: &[S]) -> bool {
        if field_names.is_empty() {
            return false;
        }
        field_names.iter().all(|name| {
            let name = name.as_ref();
            equals(self.parsed.get(name), self.expected.get(name))
        })
    }

    /// Keys whose expected value is not matched by the parsed value, sorted.
    pub fn mismatches<S: AsRef<str>>(&self, exclude: &[S]) -> Vec<String> {
        let mut keys: Vec<String> = self
            .expected
            .iter()
            .filter(|(key, _)| !exclude.iter().any(|e| e.as_ref() == key.as_str()))
            .filter(|(key, value)| !equals(self.parsed.get(*key), Some(*value)))
            .map(|(key, _)| key.clone())
            .collect();
        keys.sort();
        keys
    }

    /// Named fields that fail [`Receipt::verify_only`], in the order given.
    pub fn mismatches_only<S: AsRef<str>>(&self, field_names: &[S]) -> Vec<String> {
        field_names
            .iter()
            .map(|name| name.as_ref())
            .filter(|name| !equals(self.parsed.get(*name), self.expected.get(*name)))
            .map(str::to_string)
            .collect()
    }
}
