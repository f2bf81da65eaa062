use crate::error::LoaderError;
use crate::models::LoaderConfig;
use log::{debug, info};
use std::time::Duration;
use url::Url;

/// Where a receipt page lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReceiptSource {
    /// Receipt number, appended to the loader's base URL.
    Number(String),
    /// Full receipt page URL.
    Url(String),
}

impl ReceiptSource {
    /// A non-empty receipt number takes precedence over a URL.
    pub fn from_parts(receipt_no: Option<&str>, url: Option<&str>) -> Result<Self, LoaderError> {
        fn non_empty(s: Option<&str>) -> Option<&str> {
            s.map(str::trim).filter(|s| !s.is_empty())
        }
        if let Some(no) = non_empty(receipt_no) {
            Ok(ReceiptSource::Number(no.to_string()))
        } else if let Some(url) = non_empty(url) {
            Ok(ReceiptSource::Url(url.to_string()))
        } else {
            Err(LoaderError::MissingSource)
        }
    }
}

/// Fetches receipt markup over HTTP.
#[derive(Debug, Clone)]
pub struct ReceiptLoader {
    config: LoaderConfig,
    client: reqwest::Client,
}

impl Default for ReceiptLoader {
    fn default() -> Self {
        Self::new(LoaderConfig::default())
    }
}

impl ReceiptLoader {
    pub fn new(config: LoaderConfig) -> Self {
        let mut builder = reqwest::Client::builder();
        if let Some(ms) = config.timeout_ms {
            builder = builder.timeout(Duration::from_millis(ms));
        }
        // build() only fails when the TLS backend cannot initialise
        let client = builder.build().unwrap_or_else(|_| reqwest::Client::new());
        Self { config, client }
    }

    pub fn resolve(&self, source: &ReceiptSource) -> Result<Url, LoaderError> {
        match source {
            ReceiptSource::Number(no) => {
                let mut base = self.config.base_url.clone();
                if !base.ends_with('/') {
                    base.push('/');
                }
                Ok(Url::parse(&base)?.join(no)?)
            }
            ReceiptSource::Url(url) => Ok(Url::parse(url)?),
        }
    }

    /// Returns the body undecoded; UTF-8 validation is left to
    /// [`ReceiptParser::parse_bytes`](crate::parser::ReceiptParser::parse_bytes).
    pub async fn load(&self, source: &ReceiptSource) -> Result<Vec<u8>, LoaderError> {
        let url = self.resolve(source)?;
        info!("Fetching receipt from {}", url);

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(LoaderError::HttpStatusCode(status.as_u16()));
        }

        let body = response.bytes().await?.to_vec();
        debug!("received {} bytes", body.len());
        Ok(body)
    }
}
