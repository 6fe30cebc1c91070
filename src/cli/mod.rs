//! CLI module
//!
//! Command-line interface over the client.
//!
//! # Commands
//!
//! - `describe` - Describe objects by id
//! - `query` - Fetch one page of a query
//! - `query-all` - Follow the cursor and print every id

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat, QueryArgs};
pub use runner::Runner;
