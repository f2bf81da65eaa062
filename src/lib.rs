pub mod error;
pub mod extraction_strategy;
pub mod labels;
pub mod loader;
pub mod models;
pub mod normalize;
pub mod parser;
pub mod receipt;

pub use error::{LoaderError, ReceiptError};
pub use loader::{ReceiptLoader, ReceiptSource};
pub use models::{ExpectedFields, ExtractedFields, ExtractionPolicy, FieldValue};
pub use parser::{parse_html, ReceiptParser};
pub use receipt::{equals, Receipt};
