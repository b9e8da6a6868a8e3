//! CLI argument definitions for the freight dashboards.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use freight_common::parse_date_str;
use freight_model::{ColumnMatchMode, CompanyMatchMode, Role};

#[derive(Parser)]
#[command(
    name = "freight",
    version,
    about = "Tonnage dashboards for freight dispatch exports",
    long_about = "Explore a freight dispatch export (CSV saved from the tonnage spreadsheet).\n\n\
                  Columns are matched to roles (date, product, tonnage, company, destination,\n\
                  duration) by keyword, and company spellings are collapsed to canonical names\n\
                  using the configured alias table."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow cell values (company names, products) in logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,

    /// Dashboard config (TOML). Defaults to $FREIGHT_DASHBOARD_CONFIG, then
    /// the built-in config.
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Company alias sheet (CSV with `canonical` and `variant` columns)
    /// replacing the configured alias table.
    #[arg(long = "aliases", value_name = "PATH", global = true)]
    pub aliases: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Preview a file and show which column was picked for each role.
    Inspect(InspectArgs),

    /// List distinct company spellings and their canonical names.
    Normalize(NormalizeArgs),

    /// Totals, statistics and correlations for one day.
    Dashboard(DashboardArgs),

    /// Compare a product's tonnage with the previous day.
    Compare(CompareArgs),

    /// Print the effective configuration as TOML.
    Config(ConfigArgs),
}

/// Input file and matching overrides shared by the data commands.
#[derive(Args)]
pub struct InputArgs {
    /// Dispatch export (CSV, `,` or `;` separated).
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// How column names are compared with role keywords.
    #[arg(long = "column-match", value_enum)]
    pub column_match: Option<ColumnMatchArg>,

    /// How company names are compared with the alias table.
    #[arg(long = "company-match", value_enum)]
    pub company_match: Option<CompanyMatchArg>,
}

#[derive(Args)]
pub struct InspectArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Number of rows to preview.
    #[arg(long = "rows", default_value_t = 5)]
    pub rows: usize,
}

#[derive(Args)]
pub struct NormalizeArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Print JSON instead of a table.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Args)]
pub struct DashboardArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Day to show (default: earliest date in the file).
    #[arg(long = "date", value_name = "DATE", value_parser = parse_date_arg)]
    pub date: Option<NaiveDate>,

    /// Only include these companies (any known spelling; repeatable).
    #[arg(long = "company", value_name = "NAME")]
    pub companies: Vec<String>,

    /// Stop when any of these roles cannot be resolved (comma separated).
    #[arg(long = "require", value_name = "ROLE", value_delimiter = ',')]
    pub require: Vec<Role>,

    /// Number of entries in value-count tables.
    #[arg(long = "top", default_value_t = 10)]
    pub top: usize,

    /// Print JSON instead of tables.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Args)]
pub struct CompareArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Product code to compare (default from config).
    #[arg(long = "product", value_name = "CODE")]
    pub product: Option<String>,

    /// Day to report (default: latest date for the product).
    #[arg(long = "today", value_name = "DATE", value_parser = parse_date_arg)]
    pub today: Option<NaiveDate>,

    /// Print JSON instead of tables.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Args)]
pub struct ConfigArgs {
    /// Print the built-in config, ignoring --config and the environment.
    #[arg(long = "default")]
    pub default: bool,
}

fn parse_date_arg(value: &str) -> Result<NaiveDate, String> {
    parse_date_str(value).ok_or_else(|| format!("unrecognized date: {value}"))
}

/// CLI column matching choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum ColumnMatchArg {
    Exact,
    Loose,
}

impl From<ColumnMatchArg> for ColumnMatchMode {
    fn from(arg: ColumnMatchArg) -> Self {
        match arg {
            ColumnMatchArg::Exact => ColumnMatchMode::Exact,
            ColumnMatchArg::Loose => ColumnMatchMode::Loose,
        }
    }
}

/// CLI company matching choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum CompanyMatchArg {
    Strict,
    Lenient,
}

impl From<CompanyMatchArg> for CompanyMatchMode {
    fn from(arg: CompanyMatchArg) -> Self {
        match arg {
            CompanyMatchArg::Strict => CompanyMatchMode::Strict,
            CompanyMatchArg::Lenient => CompanyMatchMode::Lenient,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
