use std::cmp::Ordering;
use std::sync::Arc;

use serde::{Serialize, Serializer};

use super::stats::AggregatedStats;

/// Which side of a comparison has the larger value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Winner {
    Tie,
    First,
    Second,
}

impl Winner {
    pub fn from_values(a: u64, b: u64) -> Self {
        match a.cmp(&b) {
            Ordering::Greater => Winner::First,
            Ordering::Less => Winner::Second,
            Ordering::Equal => Winner::Tie,
        }
    }

    /// 0 for a tie, 1 when the first account wins, 2 when the second does.
    pub fn as_index(self) -> u8 {
        match self {
            Winner::Tie => 0,
            Winner::First => 1,
            Winner::Second => 2,
        }
    }
}

impl Serialize for Winner {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.as_index())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MetricComparison {
    pub value_a: u64,
    pub value_b: u64,
    pub difference: i64,
    pub winner: Winner,
}

impl MetricComparison {
    pub fn new(value_a: u64, value_b: u64) -> Self {
        Self {
            value_a,
            value_b,
            difference: value_a as i64 - value_b as i64,
            winner: Winner::from_values(value_a, value_b),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComparisonResult {
    pub followers: MetricComparison,
    pub repos: MetricComparison,
    pub stars: MetricComparison,
    pub forks: MetricComparison,
    pub languages: MetricComparison,
}

impl ComparisonResult {
    pub fn metrics(&self) -> [(&'static str, &MetricComparison); 5] {
        [
            ("Followers", &self.followers),
            ("Repositories", &self.repos),
            ("Stars", &self.stars),
            ("Forks", &self.forks),
            ("Languages", &self.languages),
        ]
    }
}

/// A comparison together with the two stats bundles it was built from.
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonReport {
    pub comparison: ComparisonResult,
    pub first: Arc<AggregatedStats>,
    pub second: Arc<AggregatedStats>,
}
