//! Scoring criteria: weighted dimensions with qualifying thresholds.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// The five dimensions every submission is scored on.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum Dimension {
    CodeQuality,
    Completeness,
    Documentation,
    Performance,
    Security,
}

impl Dimension {
    /// All dimensions in canonical report order.
    pub const ALL: [Dimension; 5] = [
        Dimension::CodeQuality,
        Dimension::Completeness,
        Dimension::Documentation,
        Dimension::Performance,
        Dimension::Security,
    ];

    /// Wire name — the camelCase key used in metrics maps and JSON payloads.
    pub fn as_str(&self) -> &'static str {
        match self {
            Dimension::CodeQuality => "codeQuality",
            Dimension::Completeness => "completeness",
            Dimension::Documentation => "documentation",
            Dimension::Performance => "performance",
            Dimension::Security => "security",
        }
    }

    /// Human-readable name used in audit reports.
    pub fn display_name(&self) -> &'static str {
        match self {
            Dimension::CodeQuality => "Code Quality",
            Dimension::Completeness => "Completeness",
            Dimension::Documentation => "Documentation",
            Dimension::Performance => "Performance",
            Dimension::Security => "Security",
        }
    }
}

impl std::fmt::Display for Dimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single scoring criterion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Criterion {
    /// Relative weight (>= 0). Weights need not sum to 1; the weighted
    /// average divides by the total weight, so only ratios matter.
    pub weight: f64,

    /// Minimum score (0–100) for the dimension to contribute to the
    /// weighted aggregate. Below it the dimension scores 0.
    pub threshold: f64,
}

/// Immutable criteria configuration, one [`Criterion`] per dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriteriaSet {
    criteria: BTreeMap<Dimension, Criterion>,
}

impl CriteriaSet {
    /// The fixed default criteria used for bounty reviews.
    pub fn default_set() -> Self {
        let mut criteria = BTreeMap::new();
        criteria.insert(
            Dimension::CodeQuality,
            Criterion {
                weight: 0.25,
                threshold: 50.0,
            },
        );
        criteria.insert(
            Dimension::Completeness,
            Criterion {
                weight: 0.25,
                threshold: 60.0,
            },
        );
        criteria.insert(
            Dimension::Documentation,
            Criterion {
                weight: 0.15,
                threshold: 40.0,
            },
        );
        criteria.insert(
            Dimension::Performance,
            Criterion {
                weight: 0.20,
                threshold: 50.0,
            },
        );
        criteria.insert(
            Dimension::Security,
            Criterion {
                weight: 0.15,
                threshold: 60.0,
            },
        );
        Self { criteria }
    }

    /// Look up the criterion for a dimension.
    pub fn criterion(&self, dimension: Dimension) -> Option<&Criterion> {
        self.criteria.get(&dimension)
    }

    /// Iterate over all configured criteria.
    pub fn iter(&self) -> impl Iterator<Item = (&Dimension, &Criterion)> {
        self.criteria.iter()
    }
}

impl Default for CriteriaSet {
    fn default() -> Self {
        Self::default_set()
    }
}
