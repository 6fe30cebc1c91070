//! Cursor-following query collector
//!
//! Pages are fetched strictly in sequence: the cursor returned by page N is
//! the marker of request N+1, so nothing can be prefetched. Each request is a
//! fresh value derived from the caller's request; the caller's value is
//! never modified.

use super::types::{NextPage, PaginationConfig};
use crate::backend::{DataPipelineBackend, QueryObjectsPage, QueryObjectsRequest};
use crate::error::Result;
use futures::stream::{self, Stream, TryStreamExt};
use std::pin::pin;
use tracing::{debug, info};

/// Request for the next page plus the number of pages already fetched
#[derive(Debug)]
struct Cursor {
    request: QueryObjectsRequest,
    pages_fetched: u32,
}

/// Collects every identifier matching a query by following its cursor
#[derive(Debug)]
pub struct QueryCollector<'a, B: ?Sized> {
    backend: &'a B,
    config: PaginationConfig,
}

impl<'a, B: DataPipelineBackend + ?Sized> QueryCollector<'a, B> {
    /// Create an unbounded collector over a backend
    pub fn new(backend: &'a B) -> Self {
        Self::with_config(backend, PaginationConfig::default())
    }

    /// Create a collector with explicit pagination settings
    pub fn with_config(backend: &'a B, config: PaginationConfig) -> Self {
        Self { backend, config }
    }

    /// Pagination settings in effect
    pub fn config(&self) -> &PaginationConfig {
        &self.config
    }

    /// Stream the pages of a query, one request per page
    ///
    /// The stream ends after the last page or after the first error.
    pub fn pages(
        &self,
        request: &QueryObjectsRequest,
    ) -> impl Stream<Item = Result<QueryObjectsPage>> + 'a {
        let backend = self.backend;
        let config = self.config;
        let start = Cursor {
            request: request.clone(),
            pages_fetched: 0,
        };

        stream::try_unfold(Some(start), move |cursor| {
            fetch_page(backend, config, cursor)
        })
    }

    /// Fetch every page and return the identifiers in server order
    ///
    /// Any failure discards the identifiers gathered so far.
    pub async fn collect(&self, request: &QueryObjectsRequest) -> Result<Vec<String>> {
        let mut pages = pin!(self.pages(request));
        let mut ids = Vec::new();
        let mut page_count = 0u32;

        while let Some(page) = pages.try_next().await? {
            page_count += 1;
            ids.extend(page.ids);
        }

        info!(
            pipeline_id = %request.pipeline_id,
            sphere = %request.sphere,
            pages = page_count,
            ids = ids.len(),
            "Query complete"
        );
        Ok(ids)
    }
}

/// One step of the page stream
async fn fetch_page<B: DataPipelineBackend + ?Sized>(
    backend: &B,
    config: PaginationConfig,
    cursor: Option<Cursor>,
) -> Result<Option<(QueryObjectsPage, Option<Cursor>)>> {
    let Some(Cursor {
        request,
        pages_fetched,
    }) = cursor
    else {
        return Ok(None);
    };

    config.check(pages_fetched)?;

    let page = backend.query_objects(&request).await?;
    let pages_fetched = pages_fetched + 1;
    let next = NextPage::from_page(&page)?;

    debug!(
        backend = backend.name(),
        page = pages_fetched,
        ids = page.ids.len(),
        more = !next.is_done(),
        "Fetched query page"
    );

    let cursor = match next {
        NextPage::Continue { marker } => Some(Cursor {
            request: request.with_marker(marker),
            pages_fetched,
        }),
        NextPage::Done => None,
    };

    Ok(Some((page, cursor)))
}

/// Collect all identifiers matching `request` with the given bound
pub async fn query_all_objects<B: DataPipelineBackend + ?Sized>(
    backend: &B,
    request: &QueryObjectsRequest,
    config: PaginationConfig,
) -> Result<Vec<String>> {
    QueryCollector::with_config(backend, config)
        .collect(request)
        .await
}
