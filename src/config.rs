use crate::operations::export::DEFAULT_DATE_FORMAT;
use clap::Parser;
use std::path::PathBuf;

/// Track income and expenses from the terminal
#[derive(Parser, Debug)]
#[command(name = "pledger")]
#[command(about = "Track income and expenses from the terminal", long_about = None)]
pub struct AppConfig {
    /// SQLite file the ledger is stored in
    #[arg(long, value_name = "PATH", env = "POCKET_LEDGER_DB", default_value = "pocket_ledger.db")]
    pub db: PathBuf,

    /// chrono format string for the Date column of CSV exports
    #[arg(long = "date-format", value_name = "FMT", default_value = DEFAULT_DATE_FORMAT)]
    pub date_format: String,

    /// Log filter, e.g. `info` or `pocket_ledger=debug`
    #[arg(long, value_name = "FILTER", env = "POCKET_LEDGER_LOG", default_value = "info")]
    pub log: String,
}
