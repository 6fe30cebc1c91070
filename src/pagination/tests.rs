//! Tests for pagination module

use super::*;
use crate::backend::{
    DataPipelineBackend, DescribeObjectsOutput, DescribeObjectsRequest, MockBackend,
    QueryObjectsPage, QueryObjectsRequest,
};
use crate::error::{Error, Result};
use crate::types::Sphere;
use async_trait::async_trait;
use futures::TryStreamExt;
use pretty_assertions::assert_eq;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Backend that replays a fixed sequence of page results and records requests
#[derive(Default)]
struct ScriptedBackend {
    script: Mutex<VecDeque<Result<QueryObjectsPage>>>,
    requests: Mutex<Vec<QueryObjectsRequest>>,
}

impl ScriptedBackend {
    fn new(script: Vec<Result<QueryObjectsPage>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    fn requests(&self) -> Vec<QueryObjectsRequest> {
        self.requests.lock().unwrap().clone()
    }

    fn markers(&self) -> Vec<Option<String>> {
        self.requests().into_iter().map(|r| r.marker).collect()
    }
}

#[async_trait]
impl DataPipelineBackend for ScriptedBackend {
    fn name(&self) -> &'static str {
        "scripted"
    }

    async fn describe_objects(
        &self,
        _request: &DescribeObjectsRequest,
    ) -> Result<DescribeObjectsOutput> {
        Err(Error::not_implemented("DataPipeline.DescribeObjects"))
    }

    async fn query_objects(&self, request: &QueryObjectsRequest) -> Result<QueryObjectsPage> {
        self.requests.lock().unwrap().push(request.clone());
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(Error::Other("script exhausted".to_string())))
    }
}

/// Backend that always reports another page
struct EndlessBackend {
    calls: Mutex<u32>,
}

#[async_trait]
impl DataPipelineBackend for EndlessBackend {
    fn name(&self) -> &'static str {
        "endless"
    }

    async fn describe_objects(
        &self,
        _request: &DescribeObjectsRequest,
    ) -> Result<DescribeObjectsOutput> {
        Err(Error::not_implemented("DataPipeline.DescribeObjects"))
    }

    async fn query_objects(&self, _request: &QueryObjectsRequest) -> Result<QueryObjectsPage> {
        let mut calls = self.calls.lock().unwrap();
        *calls += 1;
        Ok(QueryObjectsPage::more(
            vec![format!("id-{calls}")],
            format!("m-{calls}"),
        ))
    }
}

fn ids(values: &[&str]) -> Vec<String> {
    values.iter().map(ToString::to_string).collect()
}

fn request() -> QueryObjectsRequest {
    QueryObjectsRequest::new("df-0001", Sphere::Instance).limit(2)
}

// ============================================================================
// NextPage Tests
// ============================================================================

#[test]
fn test_next_page_done_ignores_marker() {
    let page = QueryObjectsPage {
        ids: ids(&["a"]),
        has_more_results: false,
        marker: Some("stale".to_string()),
    };
    assert_eq!(NextPage::from_page(&page).unwrap(), NextPage::Done);
}

#[test]
fn test_next_page_continue_echoes_marker() {
    let page = QueryObjectsPage::more(ids(&["a"]), "X");
    assert_eq!(
        NextPage::from_page(&page).unwrap(),
        NextPage::Continue {
            marker: "X".to_string()
        }
    );
}

#[test]
fn test_next_page_missing_marker_is_an_error() {
    let page = QueryObjectsPage {
        ids: ids(&["a"]),
        has_more_results: true,
        marker: None,
    };
    let err = NextPage::from_page(&page).unwrap_err();
    assert!(matches!(err, Error::MissingField { ref field, .. } if field == "marker"));
}

// ============================================================================
// PaginationConfig Tests
// ============================================================================

#[test]
fn test_pagination_config_default_is_unbounded() {
    let config = PaginationConfig::default();
    assert_eq!(config, PaginationConfig::unbounded());
    assert!(config.check(u32::MAX).is_ok());
}

#[test]
fn test_pagination_config_bound() {
    let config = PaginationConfig::with_max_pages(3);
    assert!(config.check(0).is_ok());
    assert!(config.check(2).is_ok());
    assert!(matches!(
        config.check(3),
        Err(Error::PageLimitExceeded { max_pages: 3 })
    ));
}

// ============================================================================
// Collector Tests
// ============================================================================

#[tokio::test]
async fn test_collect_follows_marker() {
    let backend = ScriptedBackend::new(vec![
        Ok(QueryObjectsPage::more(ids(&["a", "b"]), "X")),
        Ok(QueryObjectsPage::last(ids(&["c"]))),
    ]);

    let result = QueryCollector::new(&backend).collect(&request()).await.unwrap();

    assert_eq!(result, ids(&["a", "b", "c"]));
    assert_eq!(backend.markers(), vec![None, Some("X".to_string())]);
}

#[tokio::test]
async fn test_collect_single_empty_page() {
    let backend = ScriptedBackend::new(vec![Ok(QueryObjectsPage::last(Vec::new()))]);

    let result = QueryCollector::new(&backend).collect(&request()).await.unwrap();

    assert!(result.is_empty());
    assert_eq!(backend.requests().len(), 1);
}

#[tokio::test]
async fn test_collect_single_page_returns_that_page() {
    let backend = ScriptedBackend::new(vec![Ok(QueryObjectsPage::last(ids(&["x", "y", "z"])))]);

    let result = QueryCollector::new(&backend).collect(&request()).await.unwrap();

    assert_eq!(result, ids(&["x", "y", "z"]));
}

#[tokio::test]
async fn test_collect_concatenates_pages_in_order_without_dedup() {
    let backend = ScriptedBackend::new(vec![
        Ok(QueryObjectsPage::more(ids(&["a", "b"]), "m1")),
        Ok(QueryObjectsPage::more(ids(&["b"]), "m2")),
        Ok(QueryObjectsPage::more(Vec::new(), "m3")),
        Ok(QueryObjectsPage::last(ids(&["d", "e"]))),
    ]);

    let result = QueryCollector::new(&backend).collect(&request()).await.unwrap();

    assert_eq!(result, ids(&["a", "b", "b", "d", "e"]));
    assert_eq!(
        backend.markers(),
        vec![
            None,
            Some("m1".to_string()),
            Some("m2".to_string()),
            Some("m3".to_string())
        ]
    );
}

#[tokio::test]
async fn test_collect_keeps_other_options_on_every_page() {
    let backend = ScriptedBackend::new(vec![
        Ok(QueryObjectsPage::more(ids(&["a"]), "X")),
        Ok(QueryObjectsPage::last(ids(&["b"]))),
    ]);
    let first = request().marker("start");

    QueryCollector::new(&backend).collect(&first).await.unwrap();

    let requests = backend.requests();
    assert_eq!(requests[0], first);
    assert_eq!(requests[1], first.with_marker("X"));
    assert_eq!(first.marker.as_deref(), Some("start"));
}

#[tokio::test]
async fn test_collect_propagates_mid_sequence_error() {
    let backend = ScriptedBackend::new(vec![
        Ok(QueryObjectsPage::more(ids(&["a", "b"]), "X")),
        Err(Error::Io(std::io::Error::new(
            std::io::ErrorKind::ConnectionRefused,
            "connection refused",
        ))),
        Ok(QueryObjectsPage::last(ids(&["c"]))),
    ]);

    let err = QueryCollector::new(&backend)
        .collect(&request())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Io(_)));
    assert_eq!(backend.requests().len(), 2);
}

#[tokio::test]
async fn test_collect_missing_marker_fails() {
    let backend = ScriptedBackend::new(vec![Ok(QueryObjectsPage {
        ids: ids(&["a"]),
        has_more_results: true,
        marker: None,
    })]);

    let err = QueryCollector::new(&backend)
        .collect(&request())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::MissingField { .. }));
    assert_eq!(backend.requests().len(), 1);
}

#[tokio::test]
async fn test_collect_page_bound_stops_endless_server() {
    let backend = EndlessBackend {
        calls: Mutex::new(0),
    };

    let err = QueryCollector::with_config(&backend, PaginationConfig::with_max_pages(4))
        .collect(&request())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::PageLimitExceeded { max_pages: 4 }));
    assert_eq!(*backend.calls.lock().unwrap(), 4);
}

#[tokio::test]
async fn test_collect_page_bound_allows_exact_fit() {
    let backend = ScriptedBackend::new(vec![
        Ok(QueryObjectsPage::more(ids(&["a"]), "X")),
        Ok(QueryObjectsPage::last(ids(&["b"]))),
    ]);

    let result = QueryCollector::with_config(&backend, PaginationConfig::with_max_pages(2))
        .collect(&request())
        .await
        .unwrap();

    assert_eq!(result, ids(&["a", "b"]));
}

#[tokio::test]
async fn test_collect_against_mock_backend_is_not_implemented() {
    let err = query_all_objects(&MockBackend::new(), &request(), PaginationConfig::default())
        .await
        .unwrap_err();

    assert!(err.is_not_implemented());
}

// ============================================================================
// Page Stream Tests
// ============================================================================

#[tokio::test]
async fn test_pages_exposes_page_boundaries() {
    let backend = ScriptedBackend::new(vec![
        Ok(QueryObjectsPage::more(ids(&["a", "b"]), "X")),
        Ok(QueryObjectsPage::last(ids(&["c"]))),
    ]);

    let pages: Vec<QueryObjectsPage> = QueryCollector::new(&backend)
        .pages(&request())
        .try_collect()
        .await
        .unwrap();

    assert_eq!(pages.len(), 2);
    assert_eq!(pages[0].ids, ids(&["a", "b"]));
    assert_eq!(pages[1].ids, ids(&["c"]));
}

#[tokio::test]
async fn test_pages_stream_ends_after_error() {
    let backend = ScriptedBackend::new(vec![
        Ok(QueryObjectsPage::more(ids(&["a"]), "X")),
        Err(Error::Timeout { timeout_ms: 100 }),
        Ok(QueryObjectsPage::last(ids(&["c"]))),
    ]);

    let collector = QueryCollector::new(&backend);
    let mut pages = Box::pin(collector.pages(&request()));

    assert!(pages.try_next().await.unwrap().is_some());
    assert!(pages.try_next().await.is_err());
    assert!(pages.try_next().await.unwrap().is_none());
    assert_eq!(backend.requests().len(), 2);
}
