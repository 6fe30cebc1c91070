//! Backend that talks to the provider over HTTP

use super::types::{
    DescribeObjectsOutput, DescribeObjectsRequest, QueryObjectsPage, QueryObjectsRequest,
};
use super::DataPipelineBackend;
use crate::error::Result;
use crate::http::{HttpClient, HttpClientConfig};
use crate::types::{DESCRIBE_OBJECTS_TARGET, QUERY_OBJECTS_TARGET};
use async_trait::async_trait;
use tracing::debug;

/// Real backend: serializes each request and posts it with its target header
#[derive(Debug)]
pub struct HttpBackend {
    client: HttpClient,
}

impl HttpBackend {
    /// Build a backend from transport settings
    pub fn with_config(config: HttpClientConfig) -> Result<Self> {
        Ok(Self {
            client: HttpClient::with_config(config)?,
        })
    }
}

#[async_trait]
impl DataPipelineBackend for HttpBackend {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn describe_objects(
        &self,
        request: &DescribeObjectsRequest,
    ) -> Result<DescribeObjectsOutput> {
        debug!(
            pipeline_id = %request.pipeline_id,
            objects = request.object_ids.len(),
            "DescribeObjects"
        );
        self.client.send(DESCRIBE_OBJECTS_TARGET, request).await
    }

    async fn query_objects(&self, request: &QueryObjectsRequest) -> Result<QueryObjectsPage> {
        debug!(
            pipeline_id = %request.pipeline_id,
            sphere = %request.sphere,
            marker = ?request.marker,
            "QueryObjects"
        );
        self.client.send(QUERY_OBJECTS_TARGET, request).await
    }
}
