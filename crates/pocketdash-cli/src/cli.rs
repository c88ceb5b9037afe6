use clap::{Parser, Subcommand};
use pocketdash_client::ledger::date::parse_now;

pub fn parse_now_value(value: &str) -> Result<String, String> {
    if parse_now(value).is_none() {
        return Err("must use YYYY-MM-DD or YYYY-MM-DDTHH:MM".to_string());
    }
    Ok(value.to_string())
}

pub fn parse_positive_count(value: &str) -> Result<usize, String> {
    match value.parse::<usize>() {
        Ok(count) if count > 0 => Ok(count),
        _ => Err("must be a whole number of at least 1".to_string()),
    }
}

/// Extended help shown after `pocketdash show --help`.
pub const SHOW_AFTER_HELP: &str = "\
Where the CSV comes from (first match wins):
  --file <path>   a local file, or `-` for stdin
  --url <url>     a published spreadsheet CSV endpoint
  source_url      from the config file

Expected columns (case-sensitive, extra columns ignored):
  Timestamp,Name,Amount,Category

How rows are counted:
  Categories listed in `income_categories` are income; everything else is spend.
  Only rows dated in the current month feed the totals and the chart.
  Rows with a non-numeric or non-positive amount are left out and counted.
  Rows with an unreadable timestamp still appear under \"Other\" in the list.

Config file:
  --config <path>, then $POCKETDASH_CONFIG, then ~/.pocketdash/config.toml.
  Run `pocketdash config` to see the effective settings.
";

#[derive(Debug, Parser)]
#[command(
    name = "pocketdash",
    version,
    about = "monthly spending dashboard for a published transactions sheet",
    disable_help_subcommand = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Fetch the sheet once and render this month's dashboard
    #[command(after_long_help = SHOW_AFTER_HELP)]
    Show {
        #[command(flatten)]
        source: SourceArgs,
        /// Emit the render model as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the effective configuration and where it was loaded from
    Config {
        /// Path to a TOML config file
        #[arg(long)]
        config: Option<String>,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
    /// Refresh the dashboard on an interval, dropping overlapping triggers
    Watch {
        #[command(flatten)]
        source: SourceArgs,
        /// Seconds between refresh triggers
        #[arg(long, default_value_t = 30)]
        interval_secs: u64,
        /// Number of refresh triggers to fire before exiting
        #[arg(long, default_value_t = 3, value_parser = parse_positive_count)]
        count: usize,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Clone, clap::Args)]
pub struct SourceArgs {
    /// Published CSV endpoint; overrides `source_url` from the config
    #[arg(long, conflicts_with = "file")]
    pub url: Option<String>,
    /// Local CSV file, or `-` for stdin
    #[arg(long)]
    pub file: Option<String>,
    /// Path to a TOML config file
    #[arg(long)]
    pub config: Option<String>,
    /// Pin "now" for month scoping and date labels (YYYY-MM-DD[THH:MM])
    #[arg(long, value_parser = parse_now_value)]
    pub now: Option<String>,
}

#[cfg(test)]
pub fn parse_from<I, T>(itr: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(itr)
}
