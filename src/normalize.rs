//! Label and value text normalization.
//!
//! Only ASCII whitespace and case are touched; Ethiopic script, digits and punctuation
//! pass through unchanged so bilingual labels keep matching.

use kuchiki::NodeRef;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref CURRENCY_SUFFIX: Regex = Regex::new(r"(?i)\s*birr\s*$").unwrap();
}

/// Loose mode: trim surrounding whitespace only.
pub fn loose(text: &str) -> &str {
    text.trim()
}

/// Strict mode: lowercase, then drop every space, tab, newline and carriage return.
pub fn strict(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .filter(|c| !matches!(c, ' ' | '\t' | '\n' | '\r'))
        .collect()
}

/// Keeps the text after the last `/`, which is the English half of a `local/English` label.
pub fn english_part(label: &str) -> &str {
    match label.rfind('/') {
        Some(idx) => label[idx + 1..].trim(),
        None => label,
    }
}

/// Removes a trailing currency unit (`Birr`, any case) and the whitespace around it.
pub fn strip_currency(text: &str) -> &str {
    let trimmed = text.trim();
    match CURRENCY_SUFFIX.find(trimmed) {
        Some(m) => trimmed[..m.start()].trim(),
        None => trimmed,
    }
}

/// Parses an amount cell like `"1,234.50 Birr"`. Returns `None` for anything that is not a
/// finite number once the currency unit and thousands separators are gone.
pub fn parse_amount(text: &str) -> Option<f64> {
    let digits = strip_currency(text).replace(',', "");
    match digits.parse::<f64>() {
        Ok(v) if v.is_finite() => Some(v),
        _ => None,
    }
}

/// Concatenated text of every descendant of `node`, with each element's contribution trimmed.
pub fn flatten_text(node: &NodeRef) -> String {
    let mut text = String::new();
    for child in node.children() {
        if let Some(t) = child.as_text() {
            text.push_str(&t.borrow());
        } else {
            text.push_str(&flatten_text(&child));
        }
    }
    text.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use kuchiki::traits::*;

    #[test]
    fn test_strict_keeps_ethiopic() {
        assert_eq!(strict("የከፋይ ስም\n Payer\tName\r"), "የከፋይስምpayername");
        assert_eq!(strict("15% VAT"), "15%vat");
    }

    #[test]
    fn test_loose_trims_only() {
        assert_eq!(loose("  Payer Name \n"), "Payer Name");
    }

    #[test]
    fn test_english_part_uses_last_slash() {
        assert_eq!(english_part("የክፍያቀን/Payment date"), "Payment date");
        assert_eq!(english_part("a/b/ Receipt No"), "Receipt No");
        assert_eq!(english_part("Receipt No"), "Receipt No");
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("1234.50 Birr"), Some(1234.5));
        assert_eq!(parse_amount("  20.00birr  "), Some(20.0));
        assert_eq!(parse_amount("1,000.00 BIRR"), Some(1000.0));
        assert_eq!(parse_amount("abc Birr"), None);
        assert_eq!(parse_amount("inf"), None);
        assert_eq!(parse_amount(""), None);
    }

    #[test]
    fn test_flatten_text_nested() {
        let doc = kuchiki::parse_html()
            .one("<table><tr><td> <b>1234.50</b> <span>Birr </span></td></tr></table>");
        let td = doc.select_first("td").unwrap();
        assert_eq!(flatten_text(td.as_node()), "1234.50 Birr");
    }
}
