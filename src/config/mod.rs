pub mod parser;
pub mod types;

pub use types::*;
pub use parser::{parse_config, parse_config_str, validate_settings};
