// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::match_wildcard_for_single_variants)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # pipeline-query
//!
//! Client for the AWS Data Pipeline object query and describe operations.
//!
//! ## Features
//!
//! - **DescribeObjects**: Fetch object definitions by id (up to 25 per call)
//! - **QueryObjects**: Fetch one page of object ids matching a selector filter
//! - **Cursor following**: Collect every page of a query into one id list
//! - **Swappable backends**: Real HTTP backend or a mock that implements nothing
//! - **Retry and throttling**: Backoff and token-bucket rate limiting in the transport
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use pipeline_query::{ClientConfig, DataPipelineClient, QueryObjectsRequest, Selector, Sphere};
//!
//! #[tokio::main]
//! async fn main() -> pipeline_query::Result<()> {
//!     let config = ClientConfig::load("pipeline-query.yaml")?;
//!     let client = DataPipelineClient::from_config(&config)?;
//!
//!     let request = QueryObjectsRequest::new("df-0123456789", Sphere::Instance)
//!         .selector(Selector::equals("@status", "FAILED"));
//!     let ids = client.query_all_objects(&request).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                   DataPipelineClient                     │
//! │  describe_objects()   query_objects()   query_all_objects│
//! └──────────────────────────────────────────────────────────┘
//!              │                                 │
//!              │                        ┌────────┴────────┐
//!              │                        │ QueryCollector  │
//!              │                        │ (cursor loop)   │
//!              │                        └────────┬────────┘
//! ┌────────────┴─────────────────────────────────┴───────────┐
//! │               DataPipelineBackend (trait)                │
//! ├─────────────────────────────┬────────────────────────────┤
//! │ HttpBackend                 │ MockBackend                │
//! │ JSON 1.1 / retry / throttle │ always NotImplemented      │
//! └─────────────────────────────┴────────────────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and wire enums
pub mod types;

/// HTTP transport with retry and rate limiting
pub mod http;

/// Backend trait and implementations
pub mod backend;

/// Cursor-following query collection
pub mod pagination;

/// Client configuration
pub mod config;

/// Client facade
pub mod client;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use backend::{
    DataPipelineBackend, DescribeObjectsOutput, DescribeObjectsRequest, HttpBackend, MockBackend,
    PipelineObject, Query, QueryObjectsPage, QueryObjectsRequest, Selector,
};
pub use client::DataPipelineClient;
pub use config::ClientConfig;
pub use error::{Error, Result};
pub use pagination::{query_all_objects, PaginationConfig, QueryCollector};
pub use types::{OperatorType, Sphere};
