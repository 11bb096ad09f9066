//! Itinerary prompt construction
//!
//! Turns an extracted [`TravelRequest`] into the one-paragraph prompt handed
//! to the generative service. Validation happens here and nowhere else in the
//! pipeline: each gate is a typed error whose message is the fixed string
//! shown to the user.

use crate::{join_labels, TravelRequest};
use chrono::NaiveDate;
use thiserror::Error;

/// Marker the CLI prints in front of a validation message, matching the
/// warning banner of the original form
pub const VALIDATION_MARKER: &str = "Error❗Error❗Error❗";

/// Validation failures raised while building the itinerary prompt
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptError {
    #[error("Please specify a Destination place.")]
    MissingDestination,

    #[error("Please specify a Start Date.")]
    MissingStartDate,

    #[error("Start Date should not be in the past.")]
    StartDateInPast,

    #[error("Enter the correct dates.")]
    InvalidDuration,

    #[error("Please specify your budget as a range (e.g., 1000-2000).")]
    NonNumericBudget,

    #[error("At least one adult or a child should be there for the trip.")]
    NoTravelers,
}

/// Build the itinerary prompt for an extracted record.
///
/// `today` is the reference date for the past-date gate; injected so callers
/// and tests stay deterministic.
pub fn build_prompt(request: &TravelRequest, today: NaiveDate) -> Result<String, PromptError> {
    let destination = request
        .destination
        .as_deref()
        .ok_or(PromptError::MissingDestination)?;
    let start_date = request.start_date.ok_or(PromptError::MissingStartDate)?;
    if start_date < today {
        return Err(PromptError::StartDateInPast);
    }
    if matches!(request.duration_days, Some(days) if days <= 0) {
        return Err(PromptError::InvalidDuration);
    }
    if !request.budget.has_amount() {
        return Err(PromptError::NonNumericBudget);
    }
    if request.travelers.adults == 0 && request.travelers.children == 0 {
        return Err(PromptError::NoTravelers);
    }

    let mut prompt = format!(
        "Generate a detailed itinerary for a {} trip to {} for {} adult",
        join_labels(&request.trip_types, "Leisure"),
        destination,
        request.travelers.adults,
    );
    if request.travelers.adults != 1 {
        prompt.push('s');
    }
    if request.travelers.children > 0 {
        prompt.push_str(&format!(" and {} children", request.travelers.children));
    }
    if request.travelers.infants > 0 {
        prompt.push_str(&format!(" and {} infants", request.travelers.infants));
    }

    match &request.starting_location {
        Some(start) => prompt.push_str(&format!(
            ", starting from {} and departing on {}",
            start, start_date
        )),
        None => prompt.push_str(&format!(", departing on {}", start_date)),
    }
    if let Some(end_date) = request.end_date {
        prompt.push_str(&format!(". The trip ends on {}.", end_date));
    }

    prompt.push_str(&format!(
        " Please consider a {} budget and provide accommodation, dining, and activity recommendations.",
        request.budget,
    ));

    if !request.transport.is_empty() {
        prompt.push_str(&format!(
            " Suggested transportation methods include: {}.",
            join_labels(&request.transport, "Any"),
        ));
    }
    if !request.accommodation.is_empty() {
        prompt.push_str(&format!(
            " Preferred accommodation: {}.",
            join_labels(&request.accommodation, "Not specified"),
        ));
    }
    if !request.special_requirements.is_empty() {
        prompt.push_str(&format!(
            " Special requirements: {}.",
            join_labels(&request.special_requirements, "Not specified"),
        ));
    }

    Ok(prompt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        AccommodationType, Budget, SpecialRequirement, TransportMode, Travelers, TripCategory,
    };

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()
    }

    fn valid_request() -> TravelRequest {
        TravelRequest {
            starting_location: Some("Delhi".to_string()),
            destination: Some("Tokyo".to_string()),
            start_date: NaiveDate::from_ymd_opt(2025, 4, 13),
            end_date: NaiveDate::from_ymd_opt(2025, 4, 19),
            duration_days: Some(7),
            trip_types: vec![TripCategory::Leisure],
            travelers: Travelers {
                adults: 2,
                children: 1,
                infants: 0,
            },
            budget: Budget::Amount {
                amount: 3000,
                symbol: Some("$".to_string()),
                currency: None,
            },
            transport: vec![TransportMode::Flight],
            accommodation: vec![AccommodationType::Hostel],
            special_requirements: vec![SpecialRequirement::VegetarianMeals],
        }
    }

    #[test]
    fn test_full_prompt() {
        let prompt = build_prompt(&valid_request(), today()).unwrap();
        assert_eq!(
            prompt,
            "Generate a detailed itinerary for a Leisure trip to Tokyo for 2 adults \
             and 1 children, starting from Delhi and departing on 2025-04-13. \
             The trip ends on 2025-04-19. Please consider a $3000 budget and provide \
             accommodation, dining, and activity recommendations. \
             Suggested transportation methods include: flight. \
             Preferred accommodation: Hostels. \
             Special requirements: vegetarian meals."
        );
    }

    #[test]
    fn test_singular_adult_without_starting_location() {
        let mut request = valid_request();
        request.starting_location = None;
        request.travelers = Travelers {
            adults: 1,
            children: 0,
            infants: 0,
        };
        let prompt = build_prompt(&request, today()).unwrap();
        assert!(prompt.contains("for 1 adult,"));
        assert!(prompt.contains(", departing on 2025-04-13"));
        assert!(!prompt.contains("starting from"));
    }

    #[test]
    fn test_missing_destination() {
        let mut request = valid_request();
        request.destination = None;
        let err = build_prompt(&request, today()).unwrap_err();
        assert_eq!(err, PromptError::MissingDestination);
        assert_eq!(err.to_string(), "Please specify a Destination place.");
    }

    #[test]
    fn test_missing_start_date() {
        let mut request = valid_request();
        request.start_date = None;
        let err = build_prompt(&request, today()).unwrap_err();
        assert_eq!(err.to_string(), "Please specify a Start Date.");
    }

    #[test]
    fn test_start_date_in_past() {
        let mut request = valid_request();
        request.start_date = NaiveDate::from_ymd_opt(2024, 12, 25);
        let err = build_prompt(&request, today()).unwrap_err();
        assert_eq!(err.to_string(), "Start Date should not be in the past.");
    }

    #[test]
    fn test_non_positive_duration() {
        let mut request = valid_request();
        request.duration_days = Some(-6);
        let err = build_prompt(&request, today()).unwrap_err();
        assert_eq!(err.to_string(), "Enter the correct dates.");
    }

    #[test]
    fn test_budget_without_amount() {
        let mut request = valid_request();
        request.budget = Budget::Tier(crate::BudgetTier::Luxury);
        let err = build_prompt(&request, today()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Please specify your budget as a range (e.g., 1000-2000)."
        );
    }

    #[test]
    fn test_no_adults_or_children() {
        let mut request = valid_request();
        request.travelers = Travelers {
            adults: 0,
            children: 0,
            infants: 1,
        };
        let err = build_prompt(&request, today()).unwrap_err();
        assert_eq!(err, PromptError::NoTravelers);
    }

    #[test]
    fn test_unknown_duration_passes_gate() {
        let mut request = valid_request();
        request.duration_days = None;
        request.end_date = None;
        assert!(build_prompt(&request, today()).is_ok());
    }
}
