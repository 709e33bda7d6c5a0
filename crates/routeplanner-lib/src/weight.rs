//! Weight metrics and edge weight parsing.
//!
//! Edge weights arrive from the data loader as raw text. A weight is only
//! usable under a metric when its text parses as a finite, non-negative number;
//! anything else is [`Weight::Unusable`] and the edge is excluded from search.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Edge attribute used for cost comparison in a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightMetric {
    /// Travel distance along the edge.
    Distance,
    /// Travel time along the edge.
    #[default]
    Duration,
}

impl fmt::Display for WeightMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            WeightMetric::Distance => "distance",
            WeightMetric::Duration => "duration",
        };
        f.write_str(value)
    }
}

impl FromStr for WeightMetric {
    type Err = String;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "distance" | "shortest" => Ok(WeightMetric::Distance),
            "duration" | "fastest" => Ok(WeightMetric::Duration),
            other => Err(format!("unknown weight metric '{other}'")),
        }
    }
}

/// Parsed weight of an edge under one metric.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Weight {
    Usable(f64),
    Unusable,
}

impl Weight {
    /// Parse raw weight text. Negative, non-finite and non-numeric values are unusable.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().parse::<f64>() {
            Ok(value) if value.is_finite() && value >= 0.0 => Weight::Usable(value),
            _ => Weight::Unusable,
        }
    }

    /// The numeric value when usable.
    pub fn value(self) -> Option<f64> {
        match self {
            Weight::Usable(value) => Some(value),
            Weight::Unusable => None,
        }
    }

    pub fn is_usable(self) -> bool {
        matches!(self, Weight::Usable(_))
    }
}

/// Raw weight text as supplied by the data loader.
///
/// The text is kept verbatim so diagnostics can echo malformed values.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawWeight(String);

impl RawWeight {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn parse(&self) -> Weight {
        Weight::parse(&self.0)
    }
}

impl From<&str> for RawWeight {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for RawWeight {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<f64> for RawWeight {
    fn from(value: f64) -> Self {
        Self(value.to_string())
    }
}

impl From<i32> for RawWeight {
    fn from(value: i32) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for RawWeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
