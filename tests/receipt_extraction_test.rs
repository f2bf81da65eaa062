use telebirr_verifier_rs::models::{ExtractionPolicy, FieldValue};
use telebirr_verifier_rs::parser::{parse_html, ReceiptParser};
use telebirr_verifier_rs::ReceiptError;

const SLASH_RECEIPT: &str = r#"
<html>
<head><title>telebirr receipt</title></head>
<body>
  <table class="main">
    <tr><td colspan="2"><img src="logo.png"></td></tr>
    <tr>
      <td>የከፋይ ስም/Payer Name</td>
      <td> Abebe Kebede Tesfaye </td>
    </tr>
    <tr><td>የከፋይ ቴሌብር ቁ./Payer telebirr no.</td><td>2519****1234</td></tr>
    <tr><td>የከፋይ አካውንት አይነት/Payer account type</td><td>Customer</td></tr>
    <tr><td>የገንዘብ ተቀባይ ስም/Credited Party name</td><td>Ethio telecom</td></tr>
    <tr><td>የገንዘብ ተቀባይ ቴሌብር ቁ./Credited party account no</td><td>220001</td></tr>
    <tr><td>የክፍያው ሁኔታ/transaction status</td><td>Completed</td></tr>
  </table>
  <table class="details">
    <tr><td colspan="3"><b>የክፍያ ዝርዝር/ Transaction details</b></td></tr>
    <tr><td>የክፍያ ቁጥር/Invoice No.</td><td>የክፍያ ቀን/Payment date</td><td>የተከፈለው መጠን/Settled Amount</td></tr>
    <tr><td>CE12AB34CD</td><td>15-03-2024 14:22:05</td><td><span>1,234.50</span> Birr</td></tr>
    <tr><td></td><td>ጠቅላላ የተክፈለ/Total Paid Amount</td><td>1,244.50 Birr</td></tr>
    <tr><td>የገንዘቡ ልክ በፊደል/Total Amount in word</td><td>One Thousand Two Hundred Forty Four Birr</td></tr>
    <tr><td>የክፍያ ዘዴ/Payment Mode</td><td>telebirr</td></tr>
    <tr><td>የክፍያ ምክንያት/Payment Reason</td><td>Airtime</td></tr>
    <tr><td>የክፍያ መንገድ/Payment channel</td><td>USSD</td></tr>
  </table>
</body>
</html>
"#;

const COMBINED_RECEIPT: &str = r#"
<html><body>
<table>
  <tr><td>የከፋይ ስም Payer Name</td><td>Abebe Kebede</td></tr>
  <tr><td>የባንክ አካውንት ቁጥር
      Bank Account Number</td><td>1000123456 John Doe</td></tr>
  <tr><td>የክፍያ ቁጥር Receipt No.</td><td>CE99ZZ00YY</td></tr>
  <tr><td>የክፍያ ቀን Payment Date</td><td>16-03-2024</td></tr>
  <tr><td>የተከፈለው መጠን Settled Amount</td><td>500.00 Birr</td></tr>
  <tr><td>ቅናሽ Discount Amount</td><td>0.00 Birr</td></tr>
  <tr><td>15% ቫት VAT</td><td>not applicable</td></tr>
</table>
</body></html>
"#;

fn text(s: &str) -> FieldValue {
    FieldValue::Text(s.to_string())
}

#[test]
fn test_slash_receipt_row_scan() {
    let fields = ReceiptParser::with_policy(ExtractionPolicy::RowScan)
        .parse(SLASH_RECEIPT)
        .unwrap();

    assert_eq!(fields["payer_name"], text("Abebe Kebede Tesfaye"));
    assert_eq!(fields["payer_phone"], text("2519****1234"));
    assert_eq!(fields["payer_acc_type"], text("Customer"));
    assert_eq!(fields["credited_party_name"], text("Ethio telecom"));
    assert_eq!(fields["credited_party_acc_no"], text("220001"));
    assert_eq!(fields["transaction_status"], text("Completed"));
    assert_eq!(fields["receiptNo"], text("CE12AB34CD"));
    assert_eq!(fields["date"], text("15-03-2024 14:22:05"));
    assert_eq!(fields["settled_amount"], FieldValue::Decimal(1234.5));
    assert_eq!(fields["total_amount"], FieldValue::Decimal(1244.5));
    assert_eq!(
        fields["amount_in_word"],
        text("One Thousand Two Hundred Forty Four Birr")
    );
    assert_eq!(fields["payment_mode"], text("telebirr"));
    assert_eq!(fields["payment_reason"], text("Airtime"));
    assert_eq!(fields["payment_channel"], text("USSD"));
}

#[test]
fn test_slash_receipt_default_policy_matches_row_scan() {
    let row_scan = ReceiptParser::with_policy(ExtractionPolicy::RowScan)
        .parse(SLASH_RECEIPT)
        .unwrap();
    let fallback = parse_html(SLASH_RECEIPT).unwrap();
    assert_eq!(row_scan, fallback);
}

#[test]
fn test_combined_receipt_label_sequence() {
    let fields = ReceiptParser::with_policy(ExtractionPolicy::LabelSequence)
        .parse(COMBINED_RECEIPT)
        .unwrap();

    assert_eq!(fields["payer_name"], text("Abebe Kebede"));
    assert_eq!(fields["bank_acc_no"], text("1000123456"));
    assert_eq!(fields["to"], text("John Doe"));
    assert_eq!(fields["receiptNo"], text("CE99ZZ00YY"));
    assert_eq!(fields["date"], text("16-03-2024"));
    assert_eq!(fields["settled_amount"], FieldValue::Decimal(500.0));
    assert_eq!(fields["discount_amount"], FieldValue::Decimal(0.0));
    // unparsable amount recorded as zero in this strategy
    assert_eq!(fields["vat_amount"], FieldValue::Decimal(0.0));
    assert!(!fields.contains_key("payment_mode"));
}

#[test]
fn test_combined_receipt_merge() {
    let fields = ReceiptParser::with_policy(ExtractionPolicy::Merge)
        .parse(COMBINED_RECEIPT)
        .unwrap();

    assert_eq!(fields["receiptNo"], text("CE99ZZ00YY"));
    assert_eq!(fields["settled_amount"], FieldValue::Decimal(500.0));
    assert_eq!(fields["to"], text("John Doe"));
    assert_eq!(fields["discount_amount"], FieldValue::Decimal(0.0));
    // no false zero when the row scan result is merged
    assert!(!fields.contains_key("vat_amount"));
    assert_eq!(fields["transaction_status"], text("Completed"));
    assert_eq!(fields["payment_mode"], text("telebirr"));
    assert_eq!(fields["payment_reason"], text("Buy Package Mini APP"));
}

#[test]
fn test_fallback_skipped_when_key_fields_found() {
    // the English halves are enough for the row scan to find receipt, date and amount
    let fields = parse_html(COMBINED_RECEIPT).unwrap();
    assert_eq!(fields["receiptNo"], text("CE99ZZ00YY"));
    assert_eq!(fields["date"], text("16-03-2024"));
    assert_eq!(fields["settled_amount"], FieldValue::Decimal(500.0));
    assert!(!fields.contains_key("to"));
}

#[test]
fn test_fallback_runs_when_key_fields_missing() {
    let html = r#"
        <table>
          <tr><td>የባንክ አካውንት ቁጥር Bank Account Number</td><td>1000555000 Sara Alemu</td></tr>
          <tr><td>ቅናሽ Discount Amount</td><td>--</td></tr>
        </table>
    "#;
    let fields = parse_html(html).unwrap();
    assert_eq!(fields["bank_acc_no"], text("1000555000"));
    assert_eq!(fields["to"], text("Sara Alemu"));
    assert!(!fields.contains_key("discount_amount"));
    assert_eq!(fields["transaction_status"], text("Completed"));
}

#[test]
fn test_minimal_two_row_table() {
    let html = "<table><tr><td>Receipt No</td><td>12345</td></tr>\
                <tr><td>Payer Name</td><td>John Doe</td></tr></table>";
    let fields = ReceiptParser::with_policy(ExtractionPolicy::RowScan)
        .parse(html)
        .unwrap();

    assert_eq!(fields.len(), 5);
    assert_eq!(fields["receiptNo"], text("12345"));
    assert_eq!(fields["payer_name"], text("John Doe"));
    assert_eq!(fields["transaction_status"], text("Completed"));
    assert_eq!(fields["payment_mode"], text("telebirr"));
    assert_eq!(fields["payment_reason"], text("Buy Package Mini APP"));
}

#[test]
fn test_malformed_bytes_yield_no_fields() {
    let mut bytes = SLASH_RECEIPT.as_bytes().to_vec();
    bytes.insert(10, 0xC3);
    bytes.insert(11, 0x28);
    let result = ReceiptParser::default().parse_bytes(&bytes);
    assert!(matches!(result, Err(ReceiptError::MalformedMarkup(_))));
}
