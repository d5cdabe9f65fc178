use std::time::Duration;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::errors::{CostSignal, SaveError, ValidationError};
use crate::models::rates::{RateRecord, RateTier, SelectedService};
use crate::models::tour::{Activity, DaySlot, Tour, TourType};
use crate::services::pricing_service::PricingService;
use crate::services::tour_service::{SavedTour, TourRepository};
use crate::services::validation::validate_setup;

const DEFAULT_DEBOUNCE_MS: u64 = 300;

#[derive(Debug, Clone)]
pub struct BuilderConfig {
    /// Quiet period between the last edit and the recompute.
    pub debounce_ms: u64,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_DEBOUNCE_MS,
        }
    }
}

impl BuilderConfig {
    /// Create the config from environment variables or use defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            debounce_ms: std::env::var("TOUR_BUILDER_DEBOUNCE_MS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.debounce_ms),
        }
    }
}

/// Linear editing flow. Setup collects the header fields, Planning edits the
/// days, Review is where saving happens. No skipping Setup -> Review.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
pub enum BuilderStage {
    #[serde(rename = "setup")]
    Setup,
    #[serde(rename = "planning")]
    Planning,
    #[serde(rename = "review")]
    Review,
}

/// Drives creation and mutation of a tour across the three stages, owns the
/// day-count reconciliation on duration changes, and schedules the debounced
/// cost recomputation after every relevant edit.
///
/// Must live inside a tokio runtime: the quiet-period timer is a spawned
/// task whose handle is aborted and replaced on every newer mutation.
pub struct TourBuilder {
    stage: BuilderStage,
    tour: Tour,
    party_size: u32,
    tier: RateTier,
    config: BuilderConfig,
    pending: Option<JoinHandle<()>>,
    cost_tx: watch::Sender<CostSignal>,
    cost_rx: watch::Receiver<CostSignal>,
}

impl TourBuilder {
    pub fn new() -> Self {
        Self::with_config(BuilderConfig::default())
    }

    pub fn with_config(config: BuilderConfig) -> Self {
        let (cost_tx, cost_rx) = watch::channel(CostSignal::Empty);
        Self {
            stage: BuilderStage::Setup,
            tour: Tour::new("", 1, Vec::new(), TourType::Custom),
            party_size: 1,
            tier: RateTier::TierA,
            config,
            pending: None,
            cost_tx,
            cost_rx,
        }
    }

    pub fn stage(&self) -> BuilderStage {
        self.stage
    }

    pub fn tour(&self) -> &Tour {
        &self.tour
    }

    pub fn party_size(&self) -> u32 {
        self.party_size
    }

    pub fn tier(&self) -> RateTier {
        self.tier
    }

    /// Subscribe to cost updates. The receiver sees the latest published
    /// signal only; superseded results are overwritten, never replayed.
    pub fn subscribe_cost(&self) -> watch::Receiver<CostSignal> {
        self.cost_rx.clone()
    }

    pub fn current_cost(&self) -> CostSignal {
        self.cost_rx.borrow().clone()
    }

    // ---- stage navigation ----

    /// Move one stage forward. Leaving Setup validates every header field at
    /// once and synchronizes the day list to the configured duration.
    pub fn advance(&mut self) -> Result<BuilderStage, ValidationError> {
        match self.stage {
            BuilderStage::Setup => {
                validate_setup(
                    &self.tour.name,
                    self.tour.duration_days,
                    &self.tour.cities,
                    self.party_size,
                )?;
                self.tour = self.tour.resize_days(self.tour.duration_days);
                self.stage = BuilderStage::Planning;
                info!(
                    "tour '{}' entered planning with {} day(s)",
                    self.tour.name, self.tour.duration_days
                );
                self.schedule_recompute();
            }
            BuilderStage::Planning => {
                // A day may remain empty; review has no extra precondition.
                self.stage = BuilderStage::Review;
                info!("tour '{}' entered review", self.tour.name);
            }
            BuilderStage::Review => {}
        }
        Ok(self.stage)
    }

    /// Move one stage back. A no-op in Setup.
    pub fn back(&mut self) -> BuilderStage {
        self.stage = match self.stage {
            BuilderStage::Setup => BuilderStage::Setup,
            BuilderStage::Planning => BuilderStage::Setup,
            BuilderStage::Review => BuilderStage::Planning,
        };
        self.stage
    }

    // ---- setup-stage fields ----

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.tour.name = name.into();
    }

    /// Update the duration. Once planning has begun the day list is
    /// reconciled immediately; in Setup the sync happens on advance.
    pub fn set_duration(&mut self, duration_days: u32) {
        if self.stage == BuilderStage::Setup {
            self.tour.duration_days = duration_days;
        } else {
            self.tour = self.tour.resize_days(duration_days);
            self.schedule_recompute();
        }
    }

    pub fn set_cities(&mut self, cities: Vec<String>) {
        self.tour.cities = cities;
    }

    pub fn set_tour_type(&mut self, tour_type: TourType) {
        self.tour.tour_type = tour_type;
    }

    pub fn set_party_size(&mut self, party_size: u32) {
        self.party_size = party_size;
        self.schedule_recompute();
    }

    pub fn set_tier(&mut self, tier: RateTier) {
        self.tier = tier;
        self.schedule_recompute();
    }

    // ---- day editing ----

    pub fn set_day_city(&mut self, day_index: usize, city: impl Into<String>) {
        let city = city.into();
        self.apply(|tour| tour.set_day_city(day_index, city));
    }

    pub fn replace_day_slot(&mut self, day_index: usize, slot: DaySlot, record: Option<RateRecord>) {
        self.apply(|tour| tour.replace_day_slot(day_index, slot, record));
    }

    pub fn set_guide_required(&mut self, day_index: usize, required: bool) {
        self.apply(|tour| {
            let mut next = tour.clone();
            if let Some(day) = next.days.get_mut(day_index) {
                day.guide_required = required;
            }
            next
        });
    }

    pub fn push_activity(&mut self, day_index: usize, activity: Activity) {
        self.apply(|tour| tour.push_activity(day_index, activity));
    }

    pub fn remove_activity(&mut self, day_index: usize, activity_index: usize) {
        self.apply(|tour| tour.remove_activity(day_index, activity_index));
    }

    pub fn reorder_activity(&mut self, day_index: usize, from: usize, to: usize) {
        self.apply(|tour| tour.reorder_activity(day_index, from, to));
    }

    pub fn push_service(&mut self, day_index: usize, service: SelectedService) {
        self.apply(|tour| tour.push_service(day_index, service));
    }

    pub fn remove_service(&mut self, day_index: usize, service_index: usize) {
        self.apply(|tour| tour.remove_service(day_index, service_index));
    }

    pub fn set_day_notes(&mut self, day_index: usize, notes: impl Into<String>) {
        let notes = notes.into();
        self.apply(|tour| tour.set_day_notes(day_index, notes));
    }

    // ---- recomputation ----

    /// Run any scheduled recompute now instead of waiting out the quiet
    /// period. Deterministic hook for tests and synchronous callers.
    pub fn flush(&mut self) -> CostSignal {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
        let signal = evaluate_cost(&self.tour, self.party_size, self.tier);
        let _ = self.cost_tx.send(signal.clone());
        signal
    }

    // ---- saving ----

    /// Persist the tour with a freshly computed breakdown. Legal only from
    /// the Review stage; never called automatically.
    pub async fn save<R: TourRepository + ?Sized>(
        &mut self,
        repository: &R,
    ) -> Result<SavedTour, SaveError> {
        if self.stage != BuilderStage::Review {
            return Err(SaveError::NotInReview);
        }
        let breakdown = match evaluate_cost(&self.tour, self.party_size, self.tier) {
            CostSignal::Ready(breakdown) => breakdown,
            CostSignal::Empty | CostSignal::Unavailable => {
                return Err(SaveError::PricingUnavailable)
            }
        };

        repository
            .save_tour(&self.tour, self.party_size, self.tier, &breakdown)
            .await
    }

    /// Apply a day mutation, scheduling a recompute only when the tour value
    /// actually changed.
    fn apply(&mut self, mutate: impl FnOnce(&Tour) -> Tour) {
        let next = mutate(&self.tour);
        let changed = next.days != self.tour.days;
        self.tour = next;
        if changed {
            self.schedule_recompute();
        }
    }

    /// Replace any pending scheduled computation with a new one that fires
    /// after the quiet period. A computation that already started keeps
    /// running; its result is simply superseded by the next publish.
    fn schedule_recompute(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }

        let tour = self.tour.clone();
        let party_size = self.party_size;
        let tier = self.tier;
        let cost_tx = self.cost_tx.clone();
        let quiet = Duration::from_millis(self.config.debounce_ms);

        debug!("recompute scheduled in {}ms", self.config.debounce_ms);
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(quiet).await;
            let _ = cost_tx.send(evaluate_cost(&tour, party_size, tier));
        }));
    }
}

impl Default for TourBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TourBuilder {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

/// Readiness guard plus engine invocation. With no populated slot, activity,
/// or service anywhere, the display is cleared rather than surfacing a
/// not-enough-data error; real engine failures are downgraded to
/// `Unavailable` instead of crashing the editing session.
pub fn evaluate_cost(tour: &Tour, party_size: u32, tier: RateTier) -> CostSignal {
    if !tour.days.iter().any(|day| day.has_selections()) {
        return CostSignal::Empty;
    }

    match PricingService::compute_itinerary_cost(tour, party_size, tier) {
        Ok(breakdown) => CostSignal::Ready(breakdown),
        Err(err) => {
            warn!("cost computation unavailable: {}", err);
            CostSignal::Unavailable
        }
    }
}
