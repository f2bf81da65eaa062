use crate::labels::{is_amount_field, match_bilingual, match_english};
use crate::models::{fields, ExtractedFields, FieldValue};
use crate::normalize::{english_part, flatten_text, loose, parse_amount, strict};
use kuchiki::NodeRef;
use log::{debug, warn};

/// Section title that precedes the receipt number / date / settled amount table.
pub const DETAILS_SECTION_TITLE: &str = "Transaction details";
/// Cell text marking the row whose third cell holds the total paid amount.
pub const TOTAL_PAID_MARKER: &str = "Total Paid Amount";

pub const DEFAULT_TRANSACTION_STATUS: &str = "Completed";
pub const DEFAULT_PAYMENT_MODE: &str = "telebirr";
pub const DEFAULT_PAYMENT_REASON: &str = "Buy Package Mini APP";

/// A way of pulling receipt fields out of a parsed document.
pub trait ExtractionStrategy {
    fn name(&self) -> &'static str;

    fn extract(&self, document: &NodeRef) -> ExtractedFields;
}

/// Direct `<td>` children of a row, in order.
fn row_cells(row: &NodeRef) -> Vec<NodeRef> {
    row.children()
        .filter(|child| {
            child
                .as_element()
                .map(|e| &*e.name.local == "td")
                .unwrap_or(false)
        })
        .collect()
}

fn select_all(document: &NodeRef, selector: &str) -> Vec<NodeRef> {
    match document.select(selector) {
        Ok(selection) => selection.map(|n| n.as_node().clone()).collect(),
        Err(_) => Vec::new(),
    }
}

/// Structural row scan over `<tr>` elements.
///
/// The first data row after the details section header is read positionally, then every
/// row with at least two cells is treated as a `label | value` pair. Amounts that fail to
/// parse are left out rather than zeroed. Missing status, mode and reason get fixed defaults.
#[derive(Debug, Clone, Default)]
pub struct RowScanStrategy;

impl RowScanStrategy {
    pub fn new() -> Self {
        Self
    }

    fn extract_details(&self, rows: &[NodeRef], out: &mut ExtractedFields) {
        let mut details = Vec::new();
        let mut in_details = false;
        for row in rows {
            if flatten_text(row).contains(DETAILS_SECTION_TITLE) {
                in_details = true;
                continue;
            }
            if in_details {
                details.push(row);
            }
        }

        // details[0] holds the column titles
        let Some(data_row) = details.get(1) else {
            return;
        };
        let cells = row_cells(data_row);
        if cells.len() < 3 {
            debug!("details row has {} cells, expected 3", cells.len());
            return;
        }

        out.insert(
            fields::RECEIPT_NO.to_string(),
            FieldValue::Text(flatten_text(&cells[0])),
        );
        out.insert(
            fields::DATE.to_string(),
            FieldValue::Text(flatten_text(&cells[1])),
        );
        let amount = flatten_text(&cells[2]);
        match parse_amount(&amount) {
            Some(v) => {
                out.insert(fields::SETTLED_AMOUNT.to_string(), FieldValue::Decimal(v));
            }
            None => warn!("dropping unparsable settled amount {:?}", amount),
        }
    }

    fn extract_labeled(&self, rows: &[NodeRef], out: &mut ExtractedFields) {
        for row in rows {
            let cells = row_cells(row);
            if cells.len() < 2 {
                continue;
            }
            let label_text = flatten_text(&cells[0]);
            let value_text = flatten_text(&cells[1]);
            let value = loose(&value_text);

            if value.contains(TOTAL_PAID_MARKER) {
                if let Some(cell) = cells.get(2) {
                    let amount = flatten_text(cell);
                    match parse_amount(&amount) {
                        Some(v) => {
                            out.insert(fields::TOTAL_AMOUNT.to_string(), FieldValue::Decimal(v));
                        }
                        None => warn!("dropping unparsable total amount {:?}", amount),
                    }
                }
                continue;
            }

            let label = english_part(loose(&label_text));
            let Some(field) = match_english(label) else {
                continue;
            };
            debug!("label {:?} -> {}", label, field);

            if is_amount_field(field) {
                match parse_amount(value) {
                    Some(v) => {
                        out.insert(field.to_string(), FieldValue::Decimal(v));
                    }
                    None => warn!("dropping unparsable {} {:?}", field, value),
                }
            } else {
                out.insert(field.to_string(), FieldValue::Text(value.to_string()));
            }
        }
    }

    /// Row scan without the status/mode/reason placeholders, for callers that merge in
    /// other sources before defaulting.
    pub fn extract_without_defaults(&self, document: &NodeRef) -> ExtractedFields {
        let rows = select_all(document, "tr");
        debug!("row scan found {} rows", rows.len());

        let mut out = ExtractedFields::new();
        self.extract_details(&rows, &mut out);
        self.extract_labeled(&rows, &mut out);
        out
    }
}

/// Fills transaction status, payment mode and payment reason when absent.
pub fn apply_defaults(out: &mut ExtractedFields) {
    let defaults = [
        (fields::TRANSACTION_STATUS, DEFAULT_TRANSACTION_STATUS),
        (fields::PAYMENT_MODE, DEFAULT_PAYMENT_MODE),
        (fields::PAYMENT_REASON, DEFAULT_PAYMENT_REASON),
    ];
    for (field, value) in defaults {
        out.entry(field.to_string())
            .or_insert_with(|| FieldValue::Text(value.to_string()));
    }
}

impl ExtractionStrategy for RowScanStrategy {
    fn name(&self) -> &'static str {
        "row_scan"
    }

    fn extract(&self, document: &NodeRef) -> ExtractedFields {
        let mut out = self.extract_without_defaults(document);
        apply_defaults(&mut out);
        out
    }
}

/// Flat scan over every `<td>` in document order, where a cell holding a combined
/// bilingual label token is followed by its value cell.
#[derive(Debug, Clone)]
pub struct LabelSequenceStrategy {
    /// Record unparsable amounts as `0.0` instead of leaving them out.
    pub zero_on_parse_failure: bool,
}

impl Default for LabelSequenceStrategy {
    fn default() -> Self {
        Self {
            zero_on_parse_failure: true,
        }
    }
}

impl LabelSequenceStrategy {
    pub fn new(zero_on_parse_failure: bool) -> Self {
        Self {
            zero_on_parse_failure,
        }
    }

    fn store(&self, field: &str, value: &str, out: &mut ExtractedFields) {
        if field == fields::BANK_ACC_NO {
            let (account, name) = split_bank_account(value);
            out.insert(fields::BANK_ACC_NO.to_string(), FieldValue::Text(account));
            out.insert(fields::TO.to_string(), FieldValue::Text(name));
        } else if is_amount_field(field) {
            match parse_amount(value) {
                Some(v) => {
                    out.insert(field.to_string(), FieldValue::Decimal(v));
                }
                None if self.zero_on_parse_failure => {
                    out.insert(field.to_string(), FieldValue::Decimal(0.0));
                }
                None => warn!("dropping unparsable {} {:?}", field, value),
            }
        } else {
            out.insert(field.to_string(), FieldValue::Text(value.trim().to_string()));
        }
    }
}

impl ExtractionStrategy for LabelSequenceStrategy {
    fn name(&self) -> &'static str {
        "label_sequence"
    }

    fn extract(&self, document: &NodeRef) -> ExtractedFields {
        let cells = select_all(document, "td");
        debug!("label sequence scan found {} cells", cells.len());

        let mut out = ExtractedFields::new();
        for (i, cell) in cells.iter().enumerate() {
            let token = strict(&flatten_text(cell));
            let Some(field) = match_bilingual(&token) else {
                continue;
            };
            let Some(value_cell) = cells.get(i + 1) else {
                continue;
            };
            debug!("token {:?} -> {}", token, field);
            self.store(field, &flatten_text(value_cell), &mut out);
        }
        out
    }
}

/// Splits `"1000123456 John Doe"` into the digits (account number) and the letters and
/// spaces (recipient name).
pub fn split_bank_account(value: &str) -> (String, String) {
    let account: String = value.chars().filter(|c| c.is_ascii_digit()).collect();
    let name: String = value
        .chars()
        .filter(|c| c.is_alphabetic() || *c == ' ')
        .collect();
    (account, name.trim().to_string())
}
