use anyhow::{anyhow, Context, Result};
use clap::{Parser, ValueEnum};
use log::{error, info};
use std::fs;
use std::path::PathBuf;
use telebirr_verifier_rs::labels::is_amount_field;
use telebirr_verifier_rs::loader::{ReceiptLoader, ReceiptSource};
use telebirr_verifier_rs::models::{
    ExpectedFields, ExtractedFields, ExtractionPolicy, FieldValue, LoaderConfig, ParserConfig,
};
use telebirr_verifier_rs::parser::ReceiptParser;
use telebirr_verifier_rs::receipt::Receipt;

#[derive(Parser, Debug)]
#[command(author, version, about = "Fetch, parse and verify telebirr receipts", long_about = None)]
struct Args {
    /// Receipt number, appended to the base URL
    receipt_no: Option<String>,

    /// Full receipt URL (used when no receipt number is given)
    #[arg(long)]
    url: Option<String>,

    /// Parse a local HTML file instead of fetching
    #[arg(long, conflicts_with_all = ["receipt_no", "url"])]
    file: Option<PathBuf>,

    /// Override the receipt base URL
    #[arg(long)]
    base_url: Option<String>,

    /// Request timeout in milliseconds
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// How the two extraction strategies are combined
    #[arg(long, value_enum, default_value_t = PolicyArg::Fallback)]
    policy: PolicyArg,

    /// Expected value as key=value (repeatable); `*amount` keys are compared numerically
    #[arg(short, long, value_name = "KEY=VALUE")]
    expect: Vec<String>,

    /// JSON file with expected values
    #[arg(long)]
    expected: Option<PathBuf>,

    /// Field to leave out of the full comparison (repeatable)
    #[arg(long)]
    exclude: Vec<String>,

    /// Only compare these fields (repeatable)
    #[arg(long)]
    only: Vec<String>,

    /// Output format for the extracted fields
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    /// Output file path (optional)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum, Debug)]
enum PolicyArg {
    RowScan,
    LabelSequence,
    Fallback,
    Merge,
}

impl From<PolicyArg> for ExtractionPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::RowScan => ExtractionPolicy::RowScan,
            PolicyArg::LabelSequence => ExtractionPolicy::LabelSequence,
            PolicyArg::Fallback => ExtractionPolicy::Fallback,
            PolicyArg::Merge => ExtractionPolicy::Merge,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum, Debug)]
enum OutputFormat {
    Json,
    Table,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let html = match read_receipt(&args).await {
        Ok(html) => html,
        Err(e) => {
            error!("Loading receipt failed: {:#}", e);
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    };

    let parser = ReceiptParser::new(ParserConfig {
        policy: args.policy.into(),
    });
    let parsed = parser.parse_bytes(&html)?;
    info!("Extracted {} fields ({:?})", parsed.len(), parser.policy());

    handle_output(&parsed, &args)?;

    let expected = collect_expected(&args)?;
    if expected.is_empty() {
        return Ok(());
    }

    let receipt = Receipt::new(parsed, expected);
    let verified = if args.only.is_empty() {
        receipt.verify_all(&args.exclude)
    } else {
        receipt.verify_only(&args.only)
    };

    if verified {
        println!("Receipt verification successful!");
        Ok(())
    } else {
        let mismatched = if args.only.is_empty() {
            receipt.mismatches(&args.exclude)
        } else {
            receipt.mismatches_only(&args.only)
        };
        println!("Receipt verification failed! Mismatched: {}", mismatched.join(", "));
        std::process::exit(1);
    }
}

async fn read_receipt(args: &Args) -> Result<Vec<u8>> {
    if let Some(path) = &args.file {
        return fs::read(path).with_context(|| format!("reading {:?}", path));
    }

    let source = ReceiptSource::from_parts(args.receipt_no.as_deref(), args.url.as_deref())?;
    let mut config = LoaderConfig::default();
    if let Some(base_url) = &args.base_url {
        config.base_url = base_url.clone();
    }
    config.timeout_ms = args.timeout_ms;

    Ok(ReceiptLoader::new(config).load(&source).await?)
}

fn collect_expected(args: &Args) -> Result<ExpectedFields> {
    let mut expected = ExpectedFields::new();
    if let Some(path) = &args.expected {
        let raw = fs::read_to_string(path).with_context(|| format!("reading {:?}", path))?;
        expected = serde_json::from_str(&raw).with_context(|| format!("parsing {:?}", path))?;
    }
    for pair in &args.expect {
        let (key, value) = pair
            .split_once('=')
            .ok_or_else(|| anyhow!("expected KEY=VALUE, got {:?}", pair))?;
        let key = key.trim();
        expected.insert(key.to_string(), parse_expected_value(key, value.trim()));
    }
    Ok(expected)
}

/// Only amount fields are compared numerically; receipt and account numbers stay text.
fn parse_expected_value(key: &str, raw: &str) -> FieldValue {
    if !is_amount_field(key) {
        FieldValue::Text(raw.to_string())
    } else if let Ok(i) = raw.parse::<i64>() {
        FieldValue::Integer(i)
    } else if let Some(d) = raw.parse::<f64>().ok().filter(|d| d.is_finite()) {
        FieldValue::Decimal(d)
    } else {
        FieldValue::Text(raw.to_string())
    }
}

fn handle_output(parsed: &ExtractedFields, args: &Args) -> Result<()> {
    let content = match args.format {
        OutputFormat::Json => serde_json::to_string_pretty(parsed)?,
        OutputFormat::Table => {
            let mut keys: Vec<&String> = parsed.keys().collect();
            keys.sort();
            keys.iter()
                .map(|k| format!("{:<24}{}", k, parsed[*k]))
                .collect::<Vec<_>>()
                .join("\n")
        }
    };

    if let Some(path) = &args.output {
        fs::write(path, content)?;
        println!("Output written to {:?}", path);
    } else {
        println!("{}", content);
    }

    Ok(())
}
