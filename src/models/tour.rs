use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::rates::{RateRecord, SelectedService};

/// Descriptive tag on a tour. Carries no pricing behavior.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
pub enum TourType {
    #[serde(rename = "cultural")]
    Cultural,
    #[serde(rename = "adventure")]
    Adventure,
    #[serde(rename = "leisure")]
    Leisure,
    #[serde(rename = "pilgrimage")]
    Pilgrimage,
    #[serde(rename = "custom")]
    Custom,
}

/// The single-record slots a day can bind.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
pub enum DaySlot {
    #[serde(rename = "accommodation")]
    Accommodation,
    #[serde(rename = "lunch")]
    Lunch,
    #[serde(rename = "dinner")]
    Dinner,
    #[serde(rename = "guide")]
    Guide,
}

/// An ordered unit within a day: any number of entrance fees, at most one
/// transportation record, free-text notes. `order` is 1-based and contiguous
/// within the day.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Activity {
    pub order: u32,
    pub name: String,
    pub entrances: Vec<RateRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transport: Option<RateRecord>,
    pub notes: String,
}

impl Activity {
    pub fn new(order: u32, name: impl Into<String>) -> Self {
        Self {
            order,
            name: name.into(),
            entrances: Vec::new(),
            transport: None,
            notes: String::new(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct TourDay {
    pub day_number: u32,
    pub city: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accommodation: Option<RateRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lunch: Option<RateRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dinner: Option<RateRecord>,
    pub breakfast_included: bool,
    pub guide_required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guide: Option<RateRecord>,
    pub activities: Vec<Activity>,
    pub services: Vec<SelectedService>,
    pub notes: String,
}

impl TourDay {
    /// True when the day binds at least one priced input: a slot record, an
    /// activity, or an additional service.
    pub fn has_selections(&self) -> bool {
        self.accommodation.is_some()
            || self.lunch.is_some()
            || self.dinner.is_some()
            || self.guide.is_some()
            || !self.activities.is_empty()
            || !self.services.is_empty()
    }

    /// A day with no city and no selections. Not an error, just excluded
    /// from pricing.
    pub fn is_empty(&self) -> bool {
        self.city.trim().is_empty() && !self.has_selections()
    }
}

/// The one constructor every code path uses when it needs a fresh day, so
/// new-day defaults cannot drift between call sites.
pub fn default_day(day_number: u32, city_fallback: &str) -> TourDay {
    TourDay {
        day_number,
        city: city_fallback.to_string(),
        accommodation: None,
        lunch: None,
        dinner: None,
        breakfast_included: true,
        guide_required: true,
        guide: None,
        activities: Vec::new(),
        services: Vec::new(),
        notes: String::new(),
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Tour {
    pub name: String,
    pub duration_days: u32,
    pub cities: Vec<String>,
    pub tour_type: TourType,
    pub days: Vec<TourDay>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Tour {
    pub fn new(
        name: impl Into<String>,
        duration_days: u32,
        cities: Vec<String>,
        tour_type: TourType,
    ) -> Self {
        Self {
            name: name.into(),
            duration_days,
            cities,
            tour_type,
            days: Vec::new(),
            created_at: Some(Utc::now()),
            updated_at: Some(Utc::now()),
        }
    }

    pub fn first_city(&self) -> &str {
        self.cities.first().map(String::as_str).unwrap_or("")
    }

    /// Truncate or append days so that `days.len() == new_duration`. Existing
    /// days are preserved by index; appended days come from `default_day`
    /// with the tour's first city as fallback.
    pub fn resize_days(&self, new_duration: u32) -> Tour {
        let mut days: Vec<TourDay> = self
            .days
            .iter()
            .take(new_duration as usize)
            .cloned()
            .collect();
        for day_number in (days.len() as u32 + 1)..=new_duration {
            days.push(default_day(day_number, self.first_city()));
        }

        Tour {
            duration_days: new_duration,
            days,
            updated_at: Some(Utc::now()),
            ..self.clone()
        }
    }

    /// Move an activity within a day and renumber the whole list 1..N.
    /// Out-of-range indices leave the tour unchanged.
    pub fn reorder_activity(&self, day_index: usize, from: usize, to: usize) -> Tour {
        self.with_day(day_index, |day| {
            if from < day.activities.len() && to < day.activities.len() {
                let activity = day.activities.remove(from);
                day.activities.insert(to, activity);
                renumber_activities(day);
            }
        })
    }

    /// Set or clear one of the day's single-record slots. Idempotent: setting
    /// the same record twice, or clearing an already-empty slot, is a no-op.
    pub fn replace_day_slot(
        &self,
        day_index: usize,
        slot: DaySlot,
        record: Option<RateRecord>,
    ) -> Tour {
        self.with_day(day_index, |day| match slot {
            DaySlot::Accommodation => day.accommodation = record,
            DaySlot::Lunch => day.lunch = record,
            DaySlot::Dinner => day.dinner = record,
            DaySlot::Guide => day.guide = record,
        })
    }

    /// Append an activity, numbered after the current last.
    pub fn push_activity(&self, day_index: usize, activity: Activity) -> Tour {
        self.with_day(day_index, |day| {
            let mut activity = activity;
            activity.order = day.activities.len() as u32 + 1;
            day.activities.push(activity);
        })
    }

    pub fn remove_activity(&self, day_index: usize, activity_index: usize) -> Tour {
        self.with_day(day_index, |day| {
            if activity_index < day.activities.len() {
                day.activities.remove(activity_index);
                renumber_activities(day);
            }
        })
    }

    pub fn push_service(&self, day_index: usize, service: SelectedService) -> Tour {
        self.with_day(day_index, |day| day.services.push(service))
    }

    pub fn remove_service(&self, day_index: usize, service_index: usize) -> Tour {
        self.with_day(day_index, |day| {
            if service_index < day.services.len() {
                day.services.remove(service_index);
            }
        })
    }

    pub fn set_day_city(&self, day_index: usize, city: impl Into<String>) -> Tour {
        let city = city.into();
        self.with_day(day_index, |day| day.city = city)
    }

    pub fn set_day_notes(&self, day_index: usize, notes: impl Into<String>) -> Tour {
        let notes = notes.into();
        self.with_day(day_index, |day| day.notes = notes)
    }

    /// All day mutations return a fresh tour value so callers can diff the
    /// old and new tours for change detection.
    fn with_day(&self, day_index: usize, mutate: impl FnOnce(&mut TourDay)) -> Tour {
        let mut next = self.clone();
        if let Some(day) = next.days.get_mut(day_index) {
            mutate(day);
            next.updated_at = Some(Utc::now());
        }
        next
    }
}

fn renumber_activities(day: &mut TourDay) {
    for (index, activity) in day.activities.iter_mut().enumerate() {
        activity.order = index as u32 + 1;
    }
}
