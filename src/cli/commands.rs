//! CLI commands and argument parsing

use crate::types::Sphere;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Query and describe pipeline objects
#[derive(Parser, Debug)]
#[command(name = "pipeline-query")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Client configuration file (YAML or JSON)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Provider region
    #[arg(long, global = true)]
    pub region: Option<String>,

    /// Endpoint URL, overriding the regional default
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    /// Use the offline backend, which implements no operations
    #[arg(long, global = true)]
    pub mock: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Describe objects of a pipeline by id (at most 25)
    Describe {
        /// Pipeline id
        pipeline_id: String,

        /// Object ids
        #[arg(required = true)]
        object_ids: Vec<String>,

        /// Evaluate expressions in field values
        #[arg(long)]
        evaluate_expressions: bool,
    },

    /// Fetch a single page of object ids
    Query {
        #[command(flatten)]
        query: QueryArgs,

        /// Cursor returned by a previous page
        #[arg(long)]
        marker: Option<String>,
    },

    /// Fetch every page of object ids
    QueryAll {
        #[command(flatten)]
        query: QueryArgs,

        /// Stop with an error after this many pages
        #[arg(long)]
        max_pages: Option<u32>,
    },
}

/// Arguments shared by the query commands
#[derive(clap::Args, Debug, Clone)]
pub struct QueryArgs {
    /// Pipeline id
    pub pipeline_id: String,

    /// Entity category: COMPONENT, INSTANCE or ATTEMPT
    #[arg(short, long)]
    pub sphere: Sphere,

    /// Maximum ids per page
    #[arg(short, long)]
    pub limit: Option<u32>,

    /// Selector as JSON, e.g. '{"fieldName":"@status","operator":{"type":"EQ","values":["FAILED"]}}'
    #[arg(long = "selector")]
    pub selectors: Vec<String>,
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// Human-readable output
    Pretty,
}
