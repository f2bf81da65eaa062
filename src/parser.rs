use crate::error::{ReceiptError, Result};
use crate::extraction_strategy::{
    apply_defaults, ExtractionStrategy, LabelSequenceStrategy, RowScanStrategy,
};
use crate::models::{fields, ExtractedFields, ExtractionPolicy, ParserConfig};
use kuchiki::traits::*;
use log::{debug, info};

/// Fields whose absence after the row scan triggers the label-sequence fallback.
pub const KEY_FIELDS: &[&str] = &[fields::RECEIPT_NO, fields::DATE, fields::SETTLED_AMOUNT];

/// Turns receipt markup into [`ExtractedFields`] according to an [`ExtractionPolicy`].
#[derive(Debug, Clone, Default)]
pub struct ReceiptParser {
    config: ParserConfig,
}

impl ReceiptParser {
    pub fn new(config: ParserConfig) -> Self {
        Self { config }
    }

    pub fn with_policy(policy: ExtractionPolicy) -> Self {
        Self::new(ParserConfig { policy })
    }

    pub fn policy(&self) -> ExtractionPolicy {
        self.config.policy
    }

    /// Parses raw bytes. Anything that is not valid UTF-8 is rejected as malformed before
    /// any field is extracted.
    pub fn parse_bytes(&self, bytes: &[u8]) -> Result<ExtractedFields> {
        let html = std::str::from_utf8(bytes)
            .map_err(|e| ReceiptError::MalformedMarkup(e.to_string()))?;
        self.parse(html)
    }

    pub fn parse(&self, html: &str) -> Result<ExtractedFields> {
        let document = kuchiki::parse_html().one(html);

        let row_scan = RowScanStrategy::new();
        let result = match self.config.policy {
            ExtractionPolicy::RowScan => row_scan.extract(&document),
            ExtractionPolicy::LabelSequence => LabelSequenceStrategy::default().extract(&document),
            ExtractionPolicy::Fallback => {
                let mut primary = row_scan.extract_without_defaults(&document);
                let missing: Vec<&str> = KEY_FIELDS
                    .iter()
                    .copied()
                    .filter(|f| !primary.contains_key(*f))
                    .collect();
                if !missing.is_empty() {
                    let fallback = LabelSequenceStrategy::new(false);
                    info!(
                        "{} missed {:?}, falling back to {}",
                        row_scan.name(),
                        missing,
                        fallback.name()
                    );
                    fill_missing(&mut primary, fallback.extract(&document));
                }
                apply_defaults(&mut primary);
                primary
            }
            ExtractionPolicy::Merge => {
                let mut primary = row_scan.extract_without_defaults(&document);
                let secondary = LabelSequenceStrategy::new(false).extract(&document);
                fill_missing(&mut primary, secondary);
                apply_defaults(&mut primary);
                primary
            }
        };

        debug!("extracted {} fields with {:?}", result.len(), self.config.policy);
        Ok(result)
    }
}

/// Copies entries from `secondary` whose keys `primary` does not have yet.
fn fill_missing(primary: &mut ExtractedFields, secondary: ExtractedFields) {
    for (key, value) in secondary {
        primary.entry(key).or_insert(value);
    }
}

/// Parses with the default policy.
pub fn parse_html(html: &str) -> Result<ExtractedFields> {
    ReceiptParser::default().parse(html)
}
