use std::sync::Mutex;

use futures::future::BoxFuture;
use rand::distributions::Alphanumeric;
use rand::Rng;
use serde_json::{json, Value};

use crate::errors::SaveError;
use crate::models::cost::CostBreakdown;
use crate::models::rates::RateTier;
use crate::models::tour::Tour;

const TOUR_CODE_LEN: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedTour {
    pub tour_code: String,
    pub tour_name: String,
}

/// Persistence seam. The builder calls this from the Review stage only,
/// handing over the tour together with the breakdown it was priced with.
pub trait TourRepository: Send + Sync {
    fn save_tour<'a>(
        &'a self,
        tour: &'a Tour,
        party_size: u32,
        tier: RateTier,
        breakdown: &'a CostBreakdown,
    ) -> BoxFuture<'a, Result<SavedTour, SaveError>>;
}

/// Short human-readable booking reference, e.g. `TR-X4K9QZ`.
pub fn generate_tour_code() -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(TOUR_CODE_LEN)
        .map(char::from)
        .collect();
    format!("TR-{}", suffix.to_uppercase())
}

#[derive(Debug)]
struct StoredTour {
    tour_code: String,
    tour: Tour,
    party_size: u32,
    tier: RateTier,
    breakdown: CostBreakdown,
}

/// In-memory repository for tests and in-process wiring.
#[derive(Debug, Default)]
pub struct InMemoryTourRepository {
    stored: Mutex<Vec<StoredTour>>,
}

impl InMemoryTourRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> usize {
        self.stored.lock().map(|stored| stored.len()).unwrap_or(0)
    }

    pub fn saved_codes(&self) -> Vec<String> {
        self.stored
            .lock()
            .map(|stored| stored.iter().map(|s| s.tour_code.clone()).collect())
            .unwrap_or_default()
    }

    /// Look a saved tour back up by its code.
    pub fn find(&self, tour_code: &str) -> Option<(Tour, u32, RateTier, CostBreakdown)> {
        self.stored.lock().ok().and_then(|stored| {
            stored
                .iter()
                .find(|s| s.tour_code == tour_code)
                .map(|s| (s.tour.clone(), s.party_size, s.tier, s.breakdown.clone()))
        })
    }
}

impl TourRepository for InMemoryTourRepository {
    fn save_tour<'a>(
        &'a self,
        tour: &'a Tour,
        party_size: u32,
        tier: RateTier,
        breakdown: &'a CostBreakdown,
    ) -> BoxFuture<'a, Result<SavedTour, SaveError>> {
        Box::pin(async move {
            let tour_code = generate_tour_code();
            let mut stored = self
                .stored
                .lock()
                .map_err(|_| SaveError::Repository("repository lock poisoned".to_string()))?;
            stored.push(StoredTour {
                tour_code: tour_code.clone(),
                tour: tour.clone(),
                party_size,
                tier,
                breakdown: breakdown.clone(),
            });

            Ok(SavedTour {
                tour_code,
                tour_name: tour.name.clone(),
            })
        })
    }
}

/// Render a breakdown into an export-ready document. Pure consumer of the
/// engine's output; layout and file format belong to the caller.
pub fn summary_document(
    tour: &Tour,
    party_size: u32,
    tier: RateTier,
    breakdown: &CostBreakdown,
) -> Value {
    let days: Vec<Value> = breakdown
        .daily
        .iter()
        .map(|day| {
            let city = tour
                .days
                .iter()
                .find(|d| d.day_number == day.day_number)
                .map(|d| d.city.as_str())
                .unwrap_or("");
            json!({
                "day": day.day_number,
                "city": city,
                "accommodation": day.accommodation,
                "meals": day.meals,
                "guide": day.guide,
                "transportation": day.transportation,
                "entrances": day.entrances,
                "additional_services": day.additional_services,
                "daily_total": day.daily_total,
            })
        })
        .collect();

    json!({
        "tour_name": tour.name,
        "tour_type": tour.tour_type,
        "duration_days": tour.duration_days,
        "cities": tour.cities,
        "party_size": party_size,
        "tier": tier,
        "days": days,
        "grand_total": breakdown.totals.grand_total,
        "per_person": breakdown.totals.per_person,
    })
}
