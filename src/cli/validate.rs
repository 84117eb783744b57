use std::path::PathBuf;
use crate::cli::commands::ValidateArgs;
use crate::config;
use crate::errors::ReportError;

pub async fn handle_validate(args: ValidateArgs) -> Result<(), ReportError> {
    let path = PathBuf::from(&args.config);
    let settings = config::parse_config(&path).await?.resolve();
    println!("Configuration is valid: {}", args.config);
    println!("{}", serde_yaml::to_string(&settings)?);
    Ok(())
}
