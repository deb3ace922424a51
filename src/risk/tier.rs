//! Three ordered risk tiers and the score cutoffs that produce them.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskTier {
    Low,
    Moderate,
    High,
}

impl RiskTier {
    pub const ALL: [RiskTier; 3] = [RiskTier::Low, RiskTier::Moderate, RiskTier::High];

    pub fn index(&self) -> usize {
        match self {
            RiskTier::Low => 0,
            RiskTier::Moderate => 1,
            RiskTier::High => 2,
        }
    }

    pub fn from_index(i: usize) -> Option<Self> {
        Self::ALL.get(i).copied()
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskTier::Low => write!(f, "LOW"),
            RiskTier::Moderate => write!(f, "MODERATE"),
            RiskTier::High => write!(f, "HIGH"),
        }
    }
}

/// Integer boundaries partitioning a cumulative score. A score equal to a
/// cutoff belongs to the lower tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cutoffs {
    pub low: u32,
    pub high: u32,
}

impl Cutoffs {
    pub const fn new(low: u32, high: u32) -> Self {
        Self { low, high }
    }

    pub fn tier(&self, score: u32) -> RiskTier {
        if score <= self.low {
            RiskTier::Low
        } else if score <= self.high {
            RiskTier::Moderate
        } else {
            RiskTier::High
        }
    }
}
