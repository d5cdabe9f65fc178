use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The two parallel price columns on every catalog record. One flag covers an
/// entire computation; mixing tiers within a single pass is impossible because
/// the tier is a parameter, never per-record state.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
pub enum RateTier {
    #[serde(rename = "tier_a")]
    TierA,
    #[serde(rename = "tier_b")]
    TierB,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RateKind {
    #[serde(rename = "accommodation")]
    Accommodation,
    #[serde(rename = "meal")]
    Meal,
    #[serde(rename = "guide")]
    Guide,
    #[serde(rename = "transportation")]
    Transportation,
    #[serde(rename = "entrance_fee")]
    EntranceFee,
    #[serde(rename = "service")]
    Service,
}

/// How a rate multiplies into a total. `PerDay` only appears on generic
/// service records and prices with `PerGroup` semantics.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AllocationKind {
    #[serde(rename = "per_room")]
    PerRoom,
    #[serde(rename = "per_person")]
    PerPerson,
    #[serde(rename = "per_group")]
    PerGroup,
    #[serde(rename = "per_day")]
    PerDay,
    #[serde(rename = "per_vehicle")]
    PerVehicle,
}

/// A priced service record resolved from the rate catalog. Immutable once
/// fetched; itinerary days hold value copies, so later catalog edits never
/// retroactively change a planned tour.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct RateRecord {
    pub id: Uuid,
    pub city: String,
    pub name: String,
    pub kind: RateKind,
    pub allocation: AllocationKind,
    pub price_tier_a: f64,
    pub price_tier_b: f64,
}

impl RateRecord {
    pub fn new(
        kind: RateKind,
        city: impl Into<String>,
        name: impl Into<String>,
        allocation: AllocationKind,
        price_tier_a: f64,
        price_tier_b: f64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            city: city.into(),
            name: name.into(),
            kind,
            allocation,
            price_tier_a,
            price_tier_b,
        }
    }

    /// Select the price column for the given traveler tier.
    pub fn rate(&self, tier: RateTier) -> f64 {
        match tier {
            RateTier::TierA => self.price_tier_a,
            RateTier::TierB => self.price_tier_b,
        }
    }
}

/// An additional-service selection on a day. `quantity` is only meaningful
/// for `PerVehicle` records and defaults to 1.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct SelectedService {
    pub record: RateRecord,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
}

impl SelectedService {
    pub fn new(record: RateRecord) -> Self {
        Self {
            record,
            quantity: None,
        }
    }

    pub fn with_quantity(record: RateRecord, quantity: u32) -> Self {
        Self {
            record,
            quantity: Some(quantity),
        }
    }

    /// Quantity must stay a positive integer, so an unset or zero value
    /// resolves to 1.
    pub fn effective_quantity(&self) -> u32 {
        self.quantity.unwrap_or(1).max(1)
    }
}
