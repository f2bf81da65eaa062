use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::fmt;

pub const DEFAULT_BASE_URL: &str = "https://transactioninfo.ethiotelecom.et/receipt/";
pub const BASE_URL_ENV: &str = "TELEBIRR_RECEIPT_BASE_URL";

/// Canonical field names used as keys in [`ExtractedFields`].
pub mod fields {
    pub const PAYER_NAME: &str = "payer_name";
    pub const PAYER_PHONE: &str = "payer_phone";
    pub const PAYER_ACC_TYPE: &str = "payer_acc_type";
    pub const CREDITED_PARTY_NAME: &str = "credited_party_name";
    pub const CREDITED_PARTY_ACC_NO: &str = "credited_party_acc_no";
    pub const TRANSACTION_STATUS: &str = "transaction_status";
    pub const BANK_ACC_NO: &str = "bank_acc_no";
    pub const TO: &str = "to";
    pub const RECEIPT_NO: &str = "receiptNo";
    pub const DATE: &str = "date";
    pub const SETTLED_AMOUNT: &str = "settled_amount";
    pub const DISCOUNT_AMOUNT: &str = "discount_amount";
    pub const VAT_AMOUNT: &str = "vat_amount";
    pub const TOTAL_AMOUNT: &str = "total_amount";
    pub const AMOUNT_IN_WORD: &str = "amount_in_word";
    pub const PAYMENT_MODE: &str = "payment_mode";
    pub const PAYMENT_REASON: &str = "payment_reason";
    pub const PAYMENT_CHANNEL: &str = "payment_channel";
}

/// A single extracted or expected value.
///
/// Extraction only ever produces `Text` and `Decimal`; `Integer` exists so callers can
/// state expectations like `100` and still compare equal against `100.0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Integer(i64),
    Decimal(f64),
}

impl FieldValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Integer(i) => Some(*i as f64),
            FieldValue::Decimal(d) => Some(*d),
            FieldValue::Text(_) => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => write!(f, "{}", s),
            FieldValue::Integer(i) => write!(f, "{}", i),
            FieldValue::Decimal(d) => write!(f, "{}", d),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<i64> for FieldValue {
    fn from(i: i64) -> Self {
        FieldValue::Integer(i)
    }
}

impl From<f64> for FieldValue {
    fn from(d: f64) -> Self {
        FieldValue::Decimal(d)
    }
}

/// Canonical field name to value, as produced by one parse call.
pub type ExtractedFields = HashMap<String, FieldValue>;

/// Caller-supplied values to verify against, same shape as [`ExtractedFields`].
pub type ExpectedFields = HashMap<String, FieldValue>;

/// How the two extraction strategies are combined for a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionPolicy {
    /// Structural row scan only.
    RowScan,
    /// Flat label-sequence scan only.
    LabelSequence,
    /// Row scan, then label-sequence scan for whatever key fields are still missing.
    #[default]
    Fallback,
    /// Run both; row scan wins on conflicting keys.
    Merge,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ParserConfig {
    pub policy: ExtractionPolicy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoaderConfig {
    pub base_url: String,
    /// Request timeout in milliseconds.
    pub timeout_ms: Option<u64>,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        let base_url = env::var(BASE_URL_ENV).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self {
            base_url,
            timeout_ms: None,
        }
    }
}
