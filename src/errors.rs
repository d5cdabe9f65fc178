use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::cost::CostBreakdown;

/// One violated setup field. Violations are collected, never short-circuited,
/// so a form can show every problem at once.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

/// Blocks the Setup -> Planning transition. Recoverable: fix the fields and
/// advance again.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("setup validation failed on {} field(s)", .violations.len())]
pub struct ValidationError {
    pub violations: Vec<FieldViolation>,
}

impl ValidationError {
    pub fn field_names(&self) -> Vec<&str> {
        self.violations.iter().map(|v| v.field.as_str()).collect()
    }
}

/// Structural preconditions of the pricing engine. Unreachable once the
/// builder guards are respected, but checked defensively anyway.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum InvalidInputError {
    #[error("party size must be at least 1")]
    NonPositivePartySize,
    #[error("tour has no days to price")]
    EmptyDayList,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SaveError {
    #[error("tours can only be saved from the review stage")]
    NotInReview,
    #[error("no priced breakdown is available to save")]
    PricingUnavailable,
    #[error("repository rejected the tour: {0}")]
    Repository(String),
}

/// What the cost display currently shows. `Empty` is the readiness guard's
/// "not enough data yet" state and is not an error; `Unavailable` is a
/// downgraded engine failure.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub enum CostSignal {
    #[default]
    Empty,
    Ready(CostBreakdown),
    Unavailable,
}

impl CostSignal {
    pub fn breakdown(&self) -> Option<&CostBreakdown> {
        match self {
            CostSignal::Ready(breakdown) => Some(breakdown),
            _ => None,
        }
    }
}
