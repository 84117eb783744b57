use clap::{Parser, Subcommand, Args};

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("GIT_HASH"),
    ", built ",
    env!("BUILD_TIMESTAMP"),
    ")"
);

#[derive(Parser)]
#[command(
    name = "cosmetics-report",
    version,
    long_version = LONG_VERSION,
    about = "Aggregate cosmetic product data and render summary charts"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Seed the store, aggregate, and write all charts
    Run(RunArgs),
    /// Validate a configuration file
    Validate(ValidateArgs),
}

#[derive(Args, Clone, Default)]
pub struct RunArgs {
    /// Output directory for charts and summary.json
    #[arg(short, long)]
    pub output: Option<String>,

    /// SQLite database path (`:memory:` for no file)
    #[arg(long)]
    pub db: Option<String>,

    /// YAML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Open each chart in the system image viewer after writing it
    #[arg(long)]
    pub show: bool,

    /// Draw reports one at a time instead of in parallel
    #[arg(long)]
    pub sequential: bool,

    /// Print the run summary as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Clone)]
pub struct ValidateArgs {
    /// Config file to validate
    pub config: String,
}
