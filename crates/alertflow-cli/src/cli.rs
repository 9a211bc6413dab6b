use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Aggregate, lay out and summarize workflow alert records.
#[derive(Debug, Parser)]
#[command(name = "alertflow", version, about)]
pub struct Cli {
    /// Config file (defaults to <config dir>/alertflow/config.toml if present).
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// JSON file of records. The built-in sample dataset is used when omitted.
    #[arg(long, global = true, value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// Treat --input as raw spreadsheet rows with arbitrary column headers.
    #[arg(long, global = true)]
    pub raw: bool,

    /// Restrict records, e.g. --filter project=Fraud. Repeatable.
    #[arg(long = "filter", global = true, value_name = "LEVEL=VALUE")]
    pub filters: Vec<String>,

    /// Keep records where any text field contains TEXT, ignoring case.
    #[arg(long, global = true, value_name = "TEXT")]
    pub search: Option<String>,

    /// Enable debug logging.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the hierarchy as an indented tree with alert totals.
    Tree,

    /// Print positioned nodes and edges as JSON.
    Layout {
        /// Expand every node.
        #[arg(long)]
        expand_all: bool,

        /// Expand all nodes shallower than this depth.
        #[arg(long, value_name = "DEPTH", conflicts_with = "expand_all")]
        depth: Option<usize>,

        /// Expand a single node by id. Repeatable.
        #[arg(long = "expand", value_name = "NODE_ID")]
        expand: Vec<String>,
    },

    /// Print the summary report as JSON.
    Summary {
        /// Report name (overrides the config).
        #[arg(long)]
        name: Option<String>,
    },

    /// Print a coverage matrix of two levels as JSON.
    Matrix {
        #[arg(long, default_value = "feed")]
        rows: String,
        #[arg(long, default_value = "matchProcess")]
        columns: String,
    },

    /// Print an alert density heatmap of two levels as JSON.
    Heatmap {
        #[arg(long, default_value = "project")]
        rows: String,
        #[arg(long, default_value = "state")]
        columns: String,
    },

    /// Print column flows as JSON (project → workflow → state unless --stage is given).
    Sankey {
        /// Level for each column, in order. Repeatable.
        #[arg(long = "stage", value_name = "LEVEL")]
        stages: Vec<String>,
    },

    /// Print the records sorted by one column as JSON.
    Table {
        /// Column to sort by, e.g. project, state or alertCount.
        #[arg(long, default_value = "project", value_name = "FIELD")]
        sort: String,

        /// Sort descending.
        #[arg(long)]
        desc: bool,
    },

    /// List the distinct values of one level.
    Values {
        level: String,
    },
}
