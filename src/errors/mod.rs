pub mod types;
pub mod classification;

pub use types::ReportError;
pub use classification::{ErrorClassification, ErrorScope};
