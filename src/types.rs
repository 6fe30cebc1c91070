//! Common types used throughout pipeline-query
//!
//! Operation targets and the enums that appear on the wire.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Operation Targets
// ============================================================================

/// `X-Amz-Target` value for describing objects by id
pub const DESCRIBE_OBJECTS_TARGET: &str = "DataPipeline.DescribeObjects";

/// `X-Amz-Target` value for a single page of an object query
pub const QUERY_OBJECTS_TARGET: &str = "DataPipeline.QueryObjects";

/// Maximum number of object ids accepted by one DescribeObjects call
pub const MAX_DESCRIBE_OBJECT_IDS: usize = 25;

// ============================================================================
// Sphere
// ============================================================================

/// Category of pipeline entity a query applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Sphere {
    /// Pipeline definition components
    Component,
    /// Scheduled instances of components
    Instance,
    /// Execution attempts of instances
    Attempt,
}

impl Sphere {
    /// Wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Sphere::Component => "COMPONENT",
            Sphere::Instance => "INSTANCE",
            Sphere::Attempt => "ATTEMPT",
        }
    }
}

impl fmt::Display for Sphere {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sphere {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "COMPONENT" => Ok(Sphere::Component),
            "INSTANCE" => Ok(Sphere::Instance),
            "ATTEMPT" => Ok(Sphere::Attempt),
            other => Err(Error::invalid_argument(
                "sphere",
                format!("expected COMPONENT, INSTANCE or ATTEMPT, got '{other}'"),
            )),
        }
    }
}

// ============================================================================
// Selector Operators
// ============================================================================

/// Comparison applied by a query selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OperatorType {
    /// Field equals one of the values
    Eq,
    /// Reference field equals one of the values
    RefEq,
    /// Field is less than or equal to the value
    Le,
    /// Field is greater than or equal to the value
    Ge,
    /// Field lies between two values
    Between,
}

// ============================================================================
// Backoff Type
// ============================================================================

/// Type of backoff for retries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackoffType {
    /// Constant delay between retries
    Constant,
    /// Linear increase in delay
    Linear,
    /// Exponential increase in delay
    #[default]
    Exponential,
}
