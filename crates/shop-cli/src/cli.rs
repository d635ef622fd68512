use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "shop", author, version, about, long_about = None)]
pub struct Cli {
    /// Set the logging level
    #[arg(long, global = true, default_value = "info")]
    pub log_level: tracing::Level,

    /// Configuration file (defaults to ~/.shop/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Engine time string conversion
    Time {
        #[command(subcommand)]
        command: TimeCommands,
    },
    /// Attribute access on a snapshot
    Attr {
        #[command(subcommand)]
        command: AttrCommands,
    },
    /// Print the time resolution of a snapshot
    Timeres {
        /// JSON snapshot file
        #[arg(long)]
        snapshot: PathBuf,
        /// Output format (defaults to the configured one)
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
    },
    /// LP model inspection
    Lp {
        #[command(subcommand)]
        command: LpCommands,
    },
    /// Generate shell completion scripts
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum TimeCommands {
    /// Decode an engine time string (YYYYMMDD[HH[MM[SS]]])
    Decode {
        time_string: String,
        /// IANA time zone to attach (defaults to the configured one)
        #[arg(long)]
        tz: Option<String>,
    },
    /// Encode a timestamp (RFC 3339 or "YYYY-MM-DD HH:MM[:SS]")
    Encode { timestamp: String },
}

#[derive(Subcommand, Debug)]
pub enum AttrCommands {
    /// Read one attribute and print it
    Get {
        /// JSON snapshot file
        #[arg(long)]
        snapshot: PathBuf,
        #[arg(long)]
        object_type: String,
        #[arg(long)]
        object_name: String,
        #[arg(long)]
        attr: String,
        /// Attribute kind: int, int_array, double, double_array, string,
        /// string_array, xy, sy, xy_array or txy
        #[arg(long)]
        kind: String,
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
    },
}

#[derive(Subcommand, Debug)]
pub enum LpCommands {
    /// List LP variables
    Vars {
        /// JSON snapshot file
        #[arg(long)]
        snapshot: PathBuf,
        /// Only variables of this type id
        #[arg(long)]
        var_type: Option<usize>,
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}
