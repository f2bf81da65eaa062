//! Label vocabularies for the two receipt label conventions.
//!
//! Both tables are ordered; the first matching entry wins.

use crate::models::fields;
use lazy_static::lazy_static;
use std::collections::HashMap;

/// English labels, matched by case-insensitive substring against the English half of a
/// `local/English` label cell.
pub const ENGLISH_LABELS: &[(&str, &str)] = &[
    ("Receipt No", fields::RECEIPT_NO),
    ("Payment date", fields::DATE),
    ("Settled Amount", fields::SETTLED_AMOUNT),
    ("Total Paid Amount", fields::TOTAL_AMOUNT),
    ("Payer Name", fields::PAYER_NAME),
    ("Payer telebirr no", fields::PAYER_PHONE),
    ("Payer account type", fields::PAYER_ACC_TYPE),
    ("Credited Party name", fields::CREDITED_PARTY_NAME),
    ("Credited party account no", fields::CREDITED_PARTY_ACC_NO),
    ("transaction status", fields::TRANSACTION_STATUS),
    ("Payment Mode", fields::PAYMENT_MODE),
    ("Payment channel", fields::PAYMENT_CHANNEL),
    ("Payment Reason", fields::PAYMENT_REASON),
    ("Total Amount in word", fields::AMOUNT_IN_WORD),
];

/// Combined Amharic+English label tokens, already in strict-normalized form
/// (lowercase, no whitespace), matched by exact lookup.
pub const BILINGUAL_LABELS: &[(&str, &str)] = &[
    ("የከፋይስምpayername", fields::PAYER_NAME),
    ("የከፋይቴሌብርቁ.payertelebirrno.", fields::PAYER_PHONE),
    ("የከፋይአካውንትአይነትpayeraccounttype", fields::PAYER_ACC_TYPE),
    ("የገንዘብተቀባይስምcreditedpartyname", fields::CREDITED_PARTY_NAME),
    ("የገንዘብተቀባይቴሌብርቁ.creditedpartyaccountno", fields::CREDITED_PARTY_ACC_NO),
    ("የክፍያውሁኔታtransactionstatus", fields::TRANSACTION_STATUS),
    ("የባንክአካውንትቁጥርbankaccountnumber", fields::BANK_ACC_NO),
    ("የክፍያቁጥርreceiptno.", fields::RECEIPT_NO),
    ("የክፍያቀንpaymentdate", fields::DATE),
    ("የተከፈለውመጠንsettledamount", fields::SETTLED_AMOUNT),
    ("ቅናሽdiscountamount", fields::DISCOUNT_AMOUNT),
    ("15%ቫት/vat", fields::VAT_AMOUNT),
    ("15%ቫትvat", fields::VAT_AMOUNT),
    ("ጠቅላላየተክፈለtotalpaidamount", fields::TOTAL_AMOUNT),
    ("የገንዘቡልክበፊደልtotalamountinword", fields::AMOUNT_IN_WORD),
    ("የክፍያዘዴpaymentmode", fields::PAYMENT_MODE),
    ("የክፍያምክንያትpaymentreason", fields::PAYMENT_REASON),
    ("የክፍያመንገድpaymentchannel", fields::PAYMENT_CHANNEL),
];

lazy_static! {
    static ref BILINGUAL_INDEX: HashMap<&'static str, &'static str> =
        BILINGUAL_LABELS.iter().copied().collect();
}

/// Finds the canonical field for an English label by substring containment.
/// Both the lowercased label and the label as written are tried against each key.
pub fn match_english(label: &str) -> Option<&'static str> {
    let lower = label.to_lowercase();
    ENGLISH_LABELS
        .iter()
        .find(|(key, _)| lower.contains(&key.to_lowercase()) || label.contains(key))
        .map(|(_, field)| *field)
}

/// Exact lookup of a strict-normalized bilingual token.
pub fn match_bilingual(token: &str) -> Option<&'static str> {
    BILINGUAL_INDEX.get(token).copied()
}

/// Field names ending in `amount` carry a currency-suffixed decimal value.
pub fn is_amount_field(field: &str) -> bool {
    field.ends_with("amount")
}
