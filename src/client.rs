//! Client facade over a pipeline API backend
//!
//! Validates arguments, fills in configured defaults, and delegates to the
//! backend. The aggregated query runs through [`QueryCollector`].

use crate::backend::{
    DataPipelineBackend, DescribeObjectsOutput, DescribeObjectsRequest, HttpBackend, MockBackend,
    QueryObjectsPage, QueryObjectsRequest,
};
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::pagination::{PaginationConfig, QueryCollector};
use crate::types::MAX_DESCRIBE_OBJECT_IDS;

/// Pipeline object query client
///
/// # Example
///
/// ```no_run
/// use pipeline_query::{ClientConfig, DataPipelineClient, QueryObjectsRequest, Sphere};
///
/// # async fn example() -> pipeline_query::Result<()> {
/// let client = DataPipelineClient::from_config(&ClientConfig::default())?;
/// let ids = client
///     .query_all_objects(&QueryObjectsRequest::new("df-0123456789", Sphere::Instance))
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct DataPipelineClient<B = HttpBackend> {
    backend: B,
    pagination: PaginationConfig,
    page_limit: Option<u32>,
}

impl DataPipelineClient<HttpBackend> {
    /// Build an HTTP client from settings
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        config.validate()?;
        let backend = HttpBackend::with_config(config.http_config())?;
        Ok(Self {
            backend,
            pagination: config.pagination(),
            page_limit: config.page_limit,
        })
    }
}

impl DataPipelineClient<MockBackend> {
    /// Client whose every operation reports "not implemented"
    pub fn mock() -> Self {
        Self::new(MockBackend::new())
    }
}

impl<B: DataPipelineBackend> DataPipelineClient<B> {
    /// Wrap a backend with unbounded pagination and server-chosen page size
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            pagination: PaginationConfig::default(),
            page_limit: None,
        }
    }

    /// Set pagination settings
    #[must_use]
    pub fn with_pagination(mut self, pagination: PaginationConfig) -> Self {
        self.pagination = pagination;
        self
    }

    /// Page size applied to queries that do not set one
    #[must_use]
    pub fn with_page_limit(mut self, limit: u32) -> Self {
        self.page_limit = Some(limit);
        self
    }

    /// Backend in use
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Describe up to 25 objects of a pipeline
    pub async fn describe_objects(
        &self,
        request: &DescribeObjectsRequest,
    ) -> Result<DescribeObjectsOutput> {
        validate_pipeline_id(&request.pipeline_id)?;
        if request.object_ids.is_empty() {
            return Err(Error::invalid_argument(
                "object_ids",
                "at least one object id is required",
            ));
        }
        if request.object_ids.len() > MAX_DESCRIBE_OBJECT_IDS {
            return Err(Error::invalid_argument(
                "object_ids",
                format!(
                    "at most {MAX_DESCRIBE_OBJECT_IDS} object ids per call, got {}",
                    request.object_ids.len()
                ),
            ));
        }

        self.backend.describe_objects(request).await
    }

    /// Fetch one page of a query
    pub async fn query_objects(&self, request: &QueryObjectsRequest) -> Result<QueryObjectsPage> {
        let request = self.prepare(request)?;
        self.backend.query_objects(&request).await
    }

    /// Fetch every page of a query and return all identifiers in order
    pub async fn query_all_objects(&self, request: &QueryObjectsRequest) -> Result<Vec<String>> {
        let request = self.prepare(request)?;
        self.collector().collect(&request).await
    }

    /// Collector bound to this client's backend and pagination settings
    pub fn collector(&self) -> QueryCollector<'_, B> {
        QueryCollector::with_config(&self.backend, self.pagination)
    }

    fn prepare(&self, request: &QueryObjectsRequest) -> Result<QueryObjectsRequest> {
        validate_pipeline_id(&request.pipeline_id)?;
        let mut request = request.clone();
        if request.limit.is_none() {
            request.limit = self.page_limit;
        }
        Ok(request)
    }
}

fn validate_pipeline_id(pipeline_id: &str) -> Result<()> {
    if pipeline_id.trim().is_empty() {
        return Err(Error::invalid_argument("pipeline_id", "must not be empty"));
    }
    Ok(())
}
