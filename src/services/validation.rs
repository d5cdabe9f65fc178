use crate::errors::{FieldViolation, ValidationError};

pub const MIN_DURATION_DAYS: u32 = 1;
pub const MAX_DURATION_DAYS: u32 = 30;

/// Check the Setup-stage fields before planning begins. Collects every
/// violation instead of stopping at the first, so the form can flag all
/// fields at once.
pub fn validate_setup(
    name: &str,
    duration_days: u32,
    cities: &[String],
    party_size: u32,
) -> Result<(), ValidationError> {
    let mut violations = Vec::new();

    if name.trim().is_empty() {
        violations.push(violation("name", "tour name is required"));
    }
    if !(MIN_DURATION_DAYS..=MAX_DURATION_DAYS).contains(&duration_days) {
        violations.push(violation(
            "duration_days",
            "duration must be between 1 and 30 days",
        ));
    }
    if cities.iter().all(|city| city.trim().is_empty()) {
        violations.push(violation("cities", "at least one city is required"));
    }
    if party_size == 0 {
        violations.push(violation("party_size", "party size must be at least 1"));
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(ValidationError { violations })
    }
}

fn violation(field: &str, message: &str) -> FieldViolation {
    FieldViolation {
        field: field.to_string(),
        message: message.to_string(),
    }
}
