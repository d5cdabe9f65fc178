use tour_cost_core::{
    default_day, Activity, AllocationKind, PricingService, RateKind, RateRecord, RateTier,
    SelectedService, Tour, TourType,
};

fn record(kind: RateKind, allocation: AllocationKind, tier_a: f64, tier_b: f64) -> RateRecord {
    RateRecord::new(kind, "Arequipa", "fixture rate", allocation, tier_a, tier_b)
}

/// Three days with mixed content: a fully planned day, a partially planned
/// day, and an untouched one.
fn mixed_tour() -> Tour {
    let mut tour = Tour::new(
        "Colca Canyon Circuit",
        3,
        vec!["Arequipa".to_string(), "Chivay".to_string()],
        TourType::Adventure,
    );

    let mut day1 = default_day(1, "Arequipa");
    day1.accommodation = Some(record(
        RateKind::Accommodation,
        AllocationKind::PerRoom,
        120.0,
        95.0,
    ));
    day1.lunch = Some(record(RateKind::Meal, AllocationKind::PerPerson, 18.0, 14.0));
    day1.dinner = Some(record(RateKind::Meal, AllocationKind::PerPerson, 32.0, 26.0));
    day1.guide = Some(record(RateKind::Guide, AllocationKind::PerGroup, 80.0, 65.0));
    let mut walk = Activity::new(1, "monastery walk");
    walk.entrances.push(record(
        RateKind::EntranceFee,
        AllocationKind::PerPerson,
        12.0,
        9.0,
    ));
    walk.entrances.push(record(
        RateKind::EntranceFee,
        AllocationKind::PerPerson,
        7.0,
        5.0,
    ));
    walk.transport = Some(record(
        RateKind::Transportation,
        AllocationKind::PerGroup,
        45.0,
        38.0,
    ));
    day1.activities.push(walk);
    day1.services.push(SelectedService::with_quantity(
        record(
            RateKind::Transportation,
            AllocationKind::PerVehicle,
            60.0,
            50.0,
        ),
        2,
    ));

    let mut day2 = default_day(2, "Chivay");
    day2.dinner = Some(record(RateKind::Meal, AllocationKind::PerPerson, 25.0, 20.0));
    day2.services.push(SelectedService::new(record(
        RateKind::Service,
        AllocationKind::PerDay,
        40.0,
        35.0,
    )));

    let day3 = default_day(3, "Chivay");

    tour.days = vec![day1, day2, day3];
    tour
}

#[test]
fn additivity_holds_per_day_and_overall() {
    let tour = mixed_tour();
    let breakdown = PricingService::compute_itinerary_cost(&tour, 7, RateTier::TierA).unwrap();

    for day in &breakdown.daily {
        assert_eq!(day.daily_total, day.category_sum());
    }

    let daily_sum: f64 = breakdown.daily.iter().map(|d| d.daily_total).sum();
    assert_eq!(breakdown.totals.grand_total, daily_sum);

    let category_sum = breakdown.totals.accommodation
        + breakdown.totals.meals
        + breakdown.totals.guide
        + breakdown.totals.transportation
        + breakdown.totals.entrances
        + breakdown.totals.additional_services;
    assert_eq!(breakdown.totals.grand_total, category_sum);
}

#[test]
fn recomputation_is_bit_identical() {
    let tour = mixed_tour();
    let first = PricingService::compute_itinerary_cost(&tour, 7, RateTier::TierB).unwrap();
    let second = PricingService::compute_itinerary_cost(&tour, 7, RateTier::TierB).unwrap();
    assert_eq!(first, second);
}

#[test]
fn per_person_law() {
    let tour = mixed_tour();
    for party in [1, 3, 7, 16] {
        let breakdown = PricingService::compute_itinerary_cost(&tour, party, RateTier::TierA).unwrap();
        let reconstructed = breakdown.totals.per_person * party as f64;
        assert!(
            (reconstructed - breakdown.totals.grand_total).abs() < 1e-9,
            "per_person x party drifted: {} vs {}",
            reconstructed,
            breakdown.totals.grand_total
        );
    }
}

#[test]
fn breakdown_keeps_day_order_and_count() {
    let tour = mixed_tour();
    let breakdown = PricingService::compute_itinerary_cost(&tour, 4, RateTier::TierA).unwrap();

    assert_eq!(breakdown.daily.len(), tour.days.len());
    let numbers: Vec<u32> = breakdown.daily.iter().map(|d| d.day_number).collect();
    assert_eq!(numbers, vec![1, 2, 3]);
    // the untouched third day is priced at zero, not dropped
    assert_eq!(breakdown.daily[2].daily_total, 0.0);
}

#[test]
fn tier_flag_switches_every_lookup_at_once() {
    let tour = mixed_tour();
    let tier_a = PricingService::compute_itinerary_cost(&tour, 7, RateTier::TierA).unwrap();
    let tier_b = PricingService::compute_itinerary_cost(&tour, 7, RateTier::TierB).unwrap();

    // every populated category moves with the flag
    assert!(tier_b.totals.accommodation < tier_a.totals.accommodation);
    assert!(tier_b.totals.meals < tier_a.totals.meals);
    assert!(tier_b.totals.guide < tier_a.totals.guide);
    assert!(tier_b.totals.transportation < tier_a.totals.transportation);
    assert!(tier_b.totals.entrances < tier_a.totals.entrances);
    assert!(tier_b.totals.additional_services < tier_a.totals.additional_services);

    // while the structure of the computation stays the same
    for breakdown in [&tier_a, &tier_b] {
        for day in &breakdown.daily {
            assert_eq!(day.daily_total, day.category_sum());
        }
    }
}
