pub mod errors;
pub mod models;
pub mod services;

pub use errors::{CostSignal, FieldViolation, InvalidInputError, SaveError, ValidationError};
pub use models::cost::{CostBreakdown, CostTotals, DailyCost};
pub use models::rates::{AllocationKind, RateKind, RateRecord, RateTier, SelectedService};
pub use models::tour::{default_day, Activity, DaySlot, Tour, TourDay, TourType};
pub use services::pricing_service::PricingService;
pub use services::rate_catalog::{InMemoryRateCatalog, RateCatalog};
pub use services::tour_builder::{BuilderConfig, BuilderStage, TourBuilder};
pub use services::tour_service::{InMemoryTourRepository, SavedTour, TourRepository};

use env_logger::Env;

/// Initialise env-filtered logging for binaries and tests embedding the core.
/// Safe to call more than once.
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(Env::default().default_filter_or("info")).try_init();
}
