use serde::{Deserialize, Serialize};

use super::rates::RateTier;

/// Per-day category subtotals. `daily_total` always equals the sum of the six
/// category fields.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct DailyCost {
    pub day_number: u32,
    pub accommodation: f64,
    pub meals: f64,
    pub guide: f64,
    pub transportation: f64,
    pub entrances: f64,
    pub additional_services: f64,
    pub daily_total: f64,
}

impl DailyCost {
    pub fn category_sum(&self) -> f64 {
        self.accommodation
            + self.meals
            + self.guide
            + self.transportation
            + self.entrances
            + self.additional_services
    }
}

/// Category totals across all days, plus the grand and per-person totals.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct CostTotals {
    pub accommodation: f64,
    pub meals: f64,
    pub guide: f64,
    pub transportation: f64,
    pub entrances: f64,
    pub additional_services: f64,
    pub grand_total: f64,
    pub per_person: f64,
}

/// The full computed result of one pricing pass. Always rebuilt whole, never
/// patched in place.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct CostBreakdown {
    pub daily: Vec<DailyCost>,
    pub totals: CostTotals,
    pub party_size: u32,
    pub tier: RateTier,
}
