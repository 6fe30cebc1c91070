//! Stand-in backend for environments without a provider endpoint

use super::types::{
    DescribeObjectsOutput, DescribeObjectsRequest, QueryObjectsPage, QueryObjectsRequest,
};
use super::DataPipelineBackend;
use crate::error::{Error, Result};
use crate::types::{DESCRIBE_OBJECTS_TARGET, QUERY_OBJECTS_TARGET};
use async_trait::async_trait;

/// Backend that refuses every operation with [`Error::NotImplemented`]
///
/// Never fabricates a successful response.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockBackend;

impl MockBackend {
    /// Create the mock backend
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl DataPipelineBackend for MockBackend {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn describe_objects(
        &self,
        _request: &DescribeObjectsRequest,
    ) -> Result<DescribeObjectsOutput> {
        Err(Error::not_implemented(DESCRIBE_OBJECTS_TARGET))
    }

    async fn query_objects(&self, _request: &QueryObjectsRequest) -> Result<QueryObjectsPage> {
        Err(Error::not_implemented(QUERY_OBJECTS_TARGET))
    }
}
