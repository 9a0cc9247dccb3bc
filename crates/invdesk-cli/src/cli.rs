//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

/// Default file for persisted selections.
pub const DEFAULT_STATE_FILE: &str = "invdesk-selection.json";

#[derive(Parser)]
#[command(
    name = "invdesk",
    version,
    about = "Inventory desk tools - input masks, cross-page selection and bulk delete",
    long_about = "Drive the inventory desk's input masks and list-view selection from the \
                  command line.\n\n\
                  Replays keystrokes through the numeric, date and document masks, keeps a \
                  persisted selection per list view, and runs bulk deletes against the server \
                  with outcome reconciliation."
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

    /// Include field values in log output.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Replay TEXT as keystrokes through a field mask.
    Mask(FieldArgs),

    /// Finalize TEXT as the field would on blur.
    Blur(FieldArgs),

    /// Change or show the persisted selection of a list view.
    Select(SelectArgs),

    /// Delete the selected records of a list view.
    Delete(DeleteArgs),
}

#[derive(Args)]
pub struct FieldArgs {
    /// Field content to mask.
    #[arg(value_name = "TEXT", allow_hyphen_values = true)]
    pub text: String,

    /// Kind of field.
    #[arg(long = "kind", value_enum, default_value = "number")]
    pub kind: FieldKindArg,

    /// Decimal places of a numeric field (at most 18).
    #[arg(
        long = "decimals",
        value_name = "N",
        conflicts_with = "column",
        value_parser = clap::value_parser!(u32).range(0..=18)
    )]
    pub decimals: Option<u32>,

    /// Take decimal places from a column name (`peso*` has three).
    #[arg(long = "column", value_name = "NAME")]
    pub column: Option<String>,

    /// Display locale of a numeric field.
    #[arg(long = "locale", value_enum, default_value = "pt-br")]
    pub locale: LocaleArg,
}

#[derive(Args)]
pub struct ViewArgs {
    /// List view key (for example `entrada_nf`).
    #[arg(long = "view", value_name = "VIEW")]
    pub view: String,

    /// Selection state file.
    #[arg(long = "state", value_name = "PATH", default_value = DEFAULT_STATE_FILE)]
    pub state: PathBuf,

    /// Search term the view is filtered by.
    #[arg(long = "q", value_name = "TERM", default_value = "")]
    pub q: String,

    /// Structured filter, repeatable.
    #[arg(long = "filter", value_name = "KEY=VALUE")]
    pub filters: Vec<String>,
}

#[derive(Args)]
pub struct SelectArgs {
    /// What to do with the selection.
    #[arg(value_enum)]
    pub action: SelectAction,

    /// Record ids for `toggle`, `page` and `unpage`.
    #[arg(value_name = "ID")]
    pub ids: Vec<String>,

    #[command(flatten)]
    pub view: ViewArgs,
}

#[derive(Args)]
pub struct DeleteArgs {
    #[command(flatten)]
    pub view: ViewArgs,

    /// Page currently shown, refreshed after an uncertain outcome.
    #[arg(long = "page", value_name = "N", default_value_t = 1)]
    pub page: u32,

    /// JSON client configuration file.
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Server base URL (overrides the config file).
    #[arg(long = "base-url", value_name = "URL")]
    pub base_url: Option<String>,

    /// CSRF token sent with every request.
    #[arg(long = "csrf-token", value_name = "TOKEN")]
    pub csrf_token: Option<String>,

    /// Request timeout in seconds.
    #[arg(long = "timeout", value_name = "SECS")]
    pub timeout_secs: Option<u64>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum SelectAction {
    /// Flip one id.
    Toggle,
    /// Select every id shown on a page.
    Page,
    /// Deselect every id shown on a page.
    Unpage,
    /// Select every record matching the filter.
    All,
    /// Clear the selection.
    Clear,
    /// Print the selection.
    Show,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum FieldKindArg {
    Number,
    Date,
    Document,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LocaleArg {
    #[value(name = "pt-br")]
    PtBr,
    #[value(name = "en-us")]
    EnUs,
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
