//! Backends that answer object query and describe calls
//!
//! Calling code talks to a [`DataPipelineBackend`] and never to a concrete
//! transport, so a stand-in can be swapped in without touching callers.
//!
//! - [`HttpBackend`] posts JSON 1.1 requests to the provider endpoint
//! - [`MockBackend`] answers every operation with [`Error::NotImplemented`]
//!
//! [`Error::NotImplemented`]: crate::error::Error::NotImplemented

mod http;
mod mock;
mod types;

pub use http::HttpBackend;
pub use mock::MockBackend;
pub use types::{
    DescribeObjectsOutput, DescribeObjectsRequest, Field, Operator, PipelineObject, Query,
    QueryObjectsPage, QueryObjectsRequest, Selector,
};

use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// The operations a pipeline API backend provides
#[async_trait]
pub trait DataPipelineBackend: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Describe up to 25 objects by id
    async fn describe_objects(
        &self,
        request: &DescribeObjectsRequest,
    ) -> Result<DescribeObjectsOutput>;

    /// Fetch exactly one page of a query, without following the cursor
    async fn query_objects(&self, request: &QueryObjectsRequest) -> Result<QueryObjectsPage>;
}

#[async_trait]
impl<B: DataPipelineBackend + ?Sized> DataPipelineBackend for Box<B> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    async fn describe_objects(
        &self,
        request: &DescribeObjectsRequest,
    ) -> Result<DescribeObjectsOutput> {
        (**self).describe_objects(request).await
    }

    async fn query_objects(&self, request: &QueryObjectsRequest) -> Result<QueryObjectsPage> {
        (**self).query_objects(request).await
    }
}

#[async_trait]
impl<B: DataPipelineBackend + ?Sized> DataPipelineBackend for Arc<B> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    async fn describe_objects(
        &self,
        request: &DescribeObjectsRequest,
    ) -> Result<DescribeObjectsOutput> {
        (**self).describe_objects(request).await
    }

    async fn query_objects(&self, request: &QueryObjectsRequest) -> Result<QueryObjectsPage> {
        (**self).query_objects(request).await
    }
}
