//! Pagination module
//!
//! Follows the QueryObjects continuation cursor until the server reports
//! no more results.
//!
//! # Overview
//!
//! [`QueryCollector`] composes the single-page `query_objects` operation of a
//! backend. It can hand back the pages as a stream or concatenate their
//! identifiers into one list. An optional page bound turns a server that
//! never stops reporting more results into an error instead of an endless
//! loop.

mod collector;
mod types;

pub use collector::{query_all_objects, QueryCollector};
pub use types::{NextPage, PaginationConfig};

#[cfg(test)]
mod tests;
