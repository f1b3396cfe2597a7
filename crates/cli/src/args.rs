use clap::Parser;
use std::path::PathBuf;

/// Command-line options.
#[derive(Parser, Debug)]
#[command(name = "alastlog")]
#[command(about = "Report the most recent login of every account, or of one account", long_about = None)]
pub struct Cli {
    /// Print the lastlog record for user LOGIN (name or numeric UID)
    #[arg(short = 'u', value_name = "LOGIN")]
    pub user: Option<String>,

    /// Print only records more recent than DAYS
    #[arg(short = 't', value_name = "DAYS", value_parser = parse_days, allow_negative_numbers = true)]
    pub days: Option<i64>,

    /// Read data from FILE instead of the configured lastlog
    #[arg(short = 'f', value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Log store activity to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

fn parse_days(raw: &str) -> Result<i64, String> {
    raw.trim()
        .parse()
        .map_err(|_| format!("invalid numeric argument '{}'", raw))
}
