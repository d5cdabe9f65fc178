use std::collections::HashMap;

use crate::models::rates::{RateKind, RateRecord};

/// Read-only seam onto the rate catalog, keyed by slot kind and city.
/// Results are a snapshot: the core copies records into the itinerary and
/// re-queries only when a day's city changes.
pub trait RateCatalog {
    fn fetch_rates(&self, kind: RateKind, city: &str) -> Vec<RateRecord>;
}

/// In-memory catalog for tests and in-process wiring.
#[derive(Debug, Default)]
pub struct InMemoryRateCatalog {
    records: HashMap<(RateKind, String), Vec<RateRecord>>,
}

impl InMemoryRateCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, record: RateRecord) {
        self.records
            .entry((record.kind, record.city.clone()))
            .or_default()
            .push(record);
    }

    pub fn len(&self) -> usize {
        self.records.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl RateCatalog for InMemoryRateCatalog {
    fn fetch_rates(&self, kind: RateKind, city: &str) -> Vec<RateRecord> {
        self.records
            .get(&(kind, city.to_string()))
            .cloned()
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::rates::AllocationKind;

    #[test]
    fn fetch_is_scoped_by_kind_and_city() {
        let mut catalog = InMemoryRateCatalog::new();
        catalog.insert(RateRecord::new(
            RateKind::Meal,
            "Cusco",
            "Lunch menu",
            AllocationKind::PerPerson,
            15.0,
            12.0,
        ));
        catalog.insert(RateRecord::new(
            RateKind::Meal,
            "Lima",
            "Seafood lunch",
            AllocationKind::PerPerson,
            22.0,
            18.0,
        ));
        catalog.insert(RateRecord::new(
            RateKind::Guide,
            "Cusco",
            "City guide",
            AllocationKind::PerGroup,
            50.0,
            45.0,
        ));

        let cusco_meals = catalog.fetch_rates(RateKind::Meal, "Cusco");
        assert_eq!(cusco_meals.len(), 1);
        assert_eq!(cusco_meals[0].name, "Lunch menu");

        assert!(catalog.fetch_rates(RateKind::EntranceFee, "Cusco").is_empty());
        assert_eq!(catalog.len(), 3);
    }
}
