//! Request and response shapes for the object query and describe operations
//!
//! Field names follow the provider's camelCase JSON. Optional request
//! fields are omitted from the body when unset.

use crate::types::{OperatorType, Sphere};
use serde::{Deserialize, Serialize};

// ============================================================================
// Query Selectors
// ============================================================================

/// Comparison half of a selector
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operator {
    /// Comparison type
    #[serde(rename = "type")]
    pub operator_type: OperatorType,
    /// Values compared against
    #[serde(default)]
    pub values: Vec<String>,
}

/// A single field/operator/value filter condition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Selector {
    /// Field the condition applies to
    pub field_name: String,
    /// Comparison and operands
    pub operator: Operator,
}

impl Selector {
    /// Create a selector
    pub fn new<I, S>(field_name: impl Into<String>, operator_type: OperatorType, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            field_name: field_name.into(),
            operator: Operator {
                operator_type,
                values: values.into_iter().map(Into::into).collect(),
            },
        }
    }

    /// `field_name == value`
    pub fn equals(field_name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(field_name, OperatorType::Eq, [value.into()])
    }
}

/// Structured filter applied by a query
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    /// Conditions, all of which must match
    #[serde(default)]
    pub selectors: Vec<Selector>,
}

// ============================================================================
// QueryObjects
// ============================================================================

/// Parameters of one QueryObjects call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryObjectsRequest {
    /// Pipeline to query
    pub pipeline_id: String,
    /// Entity category to query
    pub sphere: Sphere,
    /// Maximum identifiers per page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    /// Continuation cursor from a previous page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marker: Option<String>,
    /// Selector filter
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<Query>,
}

impl QueryObjectsRequest {
    /// Create a request for the first page of a query
    pub fn new(pipeline_id: impl Into<String>, sphere: Sphere) -> Self {
        Self {
            pipeline_id: pipeline_id.into(),
            sphere,
            limit: None,
            marker: None,
            query: None,
        }
    }

    /// Set the page size
    #[must_use]
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Set the starting cursor
    #[must_use]
    pub fn marker(mut self, marker: impl Into<String>) -> Self {
        self.marker = Some(marker.into());
        self
    }

    /// Replace the selector filter
    #[must_use]
    pub fn query(mut self, query: Query) -> Self {
        self.query = Some(query);
        self
    }

    /// Append one selector to the filter
    #[must_use]
    pub fn selector(mut self, selector: Selector) -> Self {
        self.query
            .get_or_insert_with(Query::default)
            .selectors
            .push(selector);
        self
    }

    /// Request for the page that follows `marker`, leaving `self` untouched
    pub fn with_marker(&self, marker: impl Into<String>) -> Self {
        Self {
            marker: Some(marker.into()),
            ..self.clone()
        }
    }
}

/// One page of QueryObjects results
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryObjectsPage {
    /// Matching identifiers, in server order
    pub ids: Vec<String>,
    /// Whether another page is available
    pub has_more_results: bool,
    /// Cursor for the next page, meaningful only when `has_more_results`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marker: Option<String>,
}

impl QueryObjectsPage {
    /// A page with no continuation
    pub fn last(ids: Vec<String>) -> Self {
        Self {
            ids,
            has_more_results: false,
            marker: None,
        }
    }

    /// A page continued at `marker`
    pub fn more(ids: Vec<String>, marker: impl Into<String>) -> Self {
        Self {
            ids,
            has_more_results: true,
            marker: Some(marker.into()),
        }
    }
}

// ============================================================================
// DescribeObjects
// ============================================================================

/// Parameters of one DescribeObjects call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DescribeObjectsRequest {
    /// Pipeline owning the objects
    pub pipeline_id: String,
    /// Objects to describe (at most 25)
    pub object_ids: Vec<String>,
    /// Evaluate field expressions server-side
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evaluate_expressions: Option<bool>,
    /// Continuation cursor from a previous call
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marker: Option<String>,
}

impl DescribeObjectsRequest {
    /// Create a describe request
    pub fn new<I, S>(pipeline_id: impl Into<String>, object_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            pipeline_id: pipeline_id.into(),
            object_ids: object_ids.into_iter().map(Into::into).collect(),
            evaluate_expressions: None,
            marker: None,
        }
    }

    /// Ask the server to evaluate expressions in field values
    #[must_use]
    pub fn evaluate_expressions(mut self, evaluate: bool) -> Self {
        self.evaluate_expressions = Some(evaluate);
        self
    }

    /// Set the continuation cursor
    #[must_use]
    pub fn marker(mut self, marker: impl Into<String>) -> Self {
        self.marker = Some(marker.into());
        self
    }
}

/// A key/value pair on a pipeline object
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    /// Field name
    pub key: String,
    /// Literal value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub string_value: Option<String>,
    /// Id of a referenced object
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ref_value: Option<String>,
}

/// Definition of one pipeline object
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineObject {
    /// Object id
    pub id: String,
    /// Object name
    pub name: String,
    /// Object fields
    #[serde(default)]
    pub fields: Vec<Field>,
}

impl PipelineObject {
    /// First field with the given key
    pub fn field(&self, key: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.key == key)
    }
}

/// Result of a DescribeObjects call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DescribeObjectsOutput {
    /// Object definitions
    pub pipeline_objects: Vec<PipelineObject>,
    /// Cursor for the remaining objects
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marker: Option<String>,
    /// Whether more objects are available
    #[serde(default)]
    pub has_more_results: bool,
}
