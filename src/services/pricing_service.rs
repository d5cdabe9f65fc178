use crate::errors::InvalidInputError;
use crate::models::cost::{CostBreakdown, CostTotals, DailyCost};
use crate::models::rates::{AllocationKind, RateTier, SelectedService};
use crate::models::tour::{Tour, TourDay};

/// Fixed rooming policy: two travelers share a room, an odd traveler takes a
/// single. Not derived from the rate record.
pub const ROOM_OCCUPANCY: u32 = 2;

pub struct PricingService;

impl PricingService {
    /// Compute the full cost breakdown for a tour. Pure and deterministic:
    /// no catalog access, no mutation of the input, fresh output every call.
    ///
    /// Fails only on the structural preconditions; business completeness is
    /// not validated here (a day with no accommodation simply contributes 0
    /// to that category).
    pub fn compute_itinerary_cost(
        tour: &Tour,
        party_size: u32,
        tier: RateTier,
    ) -> Result<CostBreakdown, InvalidInputError> {
        if party_size == 0 {
            return Err(InvalidInputError::NonPositivePartySize);
        }
        if tour.days.is_empty() {
            return Err(InvalidInputError::EmptyDayList);
        }

        let daily: Vec<DailyCost> = tour
            .days
            .iter()
            .map(|day| Self::compute_day_cost(day, party_size, tier))
            .collect();

        let mut totals = CostTotals::default();
        for day in &daily {
            totals.accommodation += day.accommodation;
            totals.meals += day.meals;
            totals.guide += day.guide;
            totals.transportation += day.transportation;
            totals.entrances += day.entrances;
            totals.additional_services += day.additional_services;
        }
        totals.grand_total = totals.accommodation
            + totals.meals
            + totals.guide
            + totals.transportation
            + totals.entrances
            + totals.additional_services;
        totals.per_person = totals.grand_total / party_size as f64;

        Ok(CostBreakdown {
            daily,
            totals,
            party_size,
            tier,
        })
    }

    /// Rooms for a party under the fixed two-per-room policy.
    pub fn rooms_needed(party_size: u32) -> u32 {
        party_size.div_ceil(ROOM_OCCUPANCY)
    }

    /// Price one day independently of every other day. Breakfast is bundled
    /// into the accommodation's board basis and never priced separately.
    fn compute_day_cost(day: &TourDay, party_size: u32, tier: RateTier) -> DailyCost {
        let party = party_size as f64;

        let accommodation = day
            .accommodation
            .as_ref()
            .map(|room| Self::rooms_needed(party_size) as f64 * room.rate(tier))
            .unwrap_or(0.0);

        let meals: f64 = [&day.lunch, &day.dinner]
            .into_iter()
            .flatten()
            .map(|meal| party * meal.rate(tier))
            .sum();

        // Flat group rate, only when the day both requires and has a guide.
        let guide = if day.guide_required {
            day.guide.as_ref().map(|g| g.rate(tier)).unwrap_or(0.0)
        } else {
            0.0
        };

        let mut entrances = 0.0;
        let mut transportation = 0.0;
        for activity in &day.activities {
            for fee in &activity.entrances {
                entrances += party * fee.rate(tier);
            }
            // Vehicle charge, not seat charge.
            if let Some(transport) = &activity.transport {
                transportation += transport.rate(tier);
            }
        }

        let additional_services: f64 = day
            .services
            .iter()
            .map(|service| Self::service_cost(service, party_size, tier))
            .sum();

        let daily_total =
            accommodation + meals + guide + transportation + entrances + additional_services;

        DailyCost {
            day_number: day.day_number,
            accommodation,
            meals,
            guide,
            transportation,
            entrances,
            additional_services,
            daily_total,
        }
    }

    /// Allocation-kind dispatch for additional services. `PerDay` prices with
    /// `PerGroup` semantics.
    fn service_cost(service: &SelectedService, party_size: u32, tier: RateTier) -> f64 {
        let rate = service.record.rate(tier);
        match service.record.allocation {
            AllocationKind::PerPerson => party_size as f64 * rate,
            AllocationKind::PerGroup | AllocationKind::PerDay => rate,
            AllocationKind::PerVehicle => service.effective_quantity() as f64 * rate,
            AllocationKind::PerRoom => Self::rooms_needed(party_size) as f64 * rate,
        }
    }
}
