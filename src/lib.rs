//! # Travel Planner Library
//!
//! Extracts structured travel details from a free-text trip request and turns
//! them into an itinerary prompt for a hosted generative text service. The
//! extraction pipeline is a fixed-order battery of regex matchers, a city
//! gazetteer and a date parser; unmatched fields silently fall back to
//! defaults rather than erroring.

pub mod dashboard;
pub mod dates;
pub mod extract;
pub mod gazetteer;
pub mod generate;
pub mod prompt;

use chrono::NaiveDate;
use serde::{Serialize, Serializer};
use std::fmt;
use thiserror::Error;

// Re-export main types for convenience
pub use dates::{DateParser, DateSpan};
pub use extract::DetailExtractor;
pub use gazetteer::Gazetteer;
pub use generate::ItineraryClient;
pub use prompt::{build_prompt, PromptError};

/// Error types for the travel planner library
#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Pattern compilation failed: {0}")]
    PatternError(#[from] regex::Error),

    #[error("JSON serialization failed: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("API key not configured: set the {0} environment variable")]
    MissingApiKey(&'static str),

    #[error("Itinerary generation failed: {0}")]
    GenerationError(String),

    #[error(transparent)]
    PromptError(#[from] PromptError),
}

/// Traveler head-count split the way the extractor reports it
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Travelers {
    #[serde(rename = "Adults")]
    pub adults: u32,
    #[serde(rename = "Children")]
    pub children: u32,
    #[serde(rename = "Infants")]
    pub infants: u32,
}

impl Travelers {
    pub fn total(&self) -> u32 {
        self.adults + self.children + self.infants
    }
}

/// Budget classification tiers recognized by keyword
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetTier {
    Low,
    MidRange,
    Luxury,
}

impl BudgetTier {
    pub fn label(&self) -> &'static str {
        match self {
            BudgetTier::Low => "Low Budget",
            BudgetTier::MidRange => "Mid-range",
            BudgetTier::Luxury => "Luxury",
        }
    }
}

impl fmt::Display for BudgetTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Budget as extracted: a concrete amount, a classification tier, or unknown
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Budget {
    Amount {
        amount: u64,
        /// Currency symbol as written in the text (e.g. "$")
        symbol: Option<String>,
        /// Currency name or code as written in the text (e.g. "dollars", "INR")
        currency: Option<String>,
    },
    Tier(BudgetTier),
    #[default]
    Unknown,
}

impl Budget {
    /// Whether a numeric amount was extracted (the prompt builder requires one)
    pub fn has_amount(&self) -> bool {
        matches!(self, Budget::Amount { .. })
    }
}

/// Map a written currency name or code to its display symbol
pub(crate) fn currency_symbol(name: &str) -> Option<&'static str> {
    match name.to_lowercase().as_str() {
        "usd" | "dollar" | "dollars" => Some("$"),
        "eur" | "euro" | "euros" => Some("€"),
        "jpy" | "yen" => Some("¥"),
        "inr" | "rupee" | "rupees" => Some("₹"),
        "gbp" | "pound" | "pounds" => Some("£"),
        "cny" | "yuan" | "rmb" => Some("¥"),
        _ => None,
    }
}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Budget::Amount {
                amount,
                symbol,
                currency,
            } => match (symbol, currency) {
                (Some(sym), _) => write!(f, "{}{}", sym, amount),
                (None, Some(name)) => {
                    let sym = currency_symbol(name).unwrap_or("");
                    write!(f, "{}{} ({})", sym, amount, name)
                }
                (None, None) => write!(f, "{} (Specify currency)", amount),
            },
            Budget::Tier(tier) => f.write_str(tier.label()),
            Budget::Unknown => f.write_str("Unknown"),
        }
    }
}

impl Serialize for Budget {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Trip categories matched against the keyword table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TripCategory {
    Adventure,
    Ecotourism,
    Cultural,
    Historical,
    Luxury,
    Wildlife,
    Sustainable,
    Volunteer,
    Medical,
    Educational,
    Business,
    Solo,
    Group,
    Backpacking,
    Food,
    Religious,
    DigitalNomad,
    Family,
    Leisure,
}

impl TripCategory {
    pub fn label(&self) -> &'static str {
        match self {
            TripCategory::Adventure => "Adventure Travel",
            TripCategory::Ecotourism => "Ecotourism",
            TripCategory::Cultural => "Cultural Tourism",
            TripCategory::Historical => "Historical Tourism",
            TripCategory::Luxury => "Luxury Travel",
            TripCategory::Wildlife => "Wildlife Tourism",
            TripCategory::Sustainable => "Sustainable Tourism",
            TripCategory::Volunteer => "Volunteer Tourism",
            TripCategory::Medical => "Medical Tourism",
            TripCategory::Educational => "Educational Tourism",
            TripCategory::Business => "Business Travel",
            TripCategory::Solo => "Solo Travel",
            TripCategory::Group => "Group Travel",
            TripCategory::Backpacking => "Backpacking",
            TripCategory::Food => "Food Tourism",
            TripCategory::Religious => "Religious Tourism",
            TripCategory::DigitalNomad => "Digital Nomadism",
            TripCategory::Family => "Family Travel",
            TripCategory::Leisure => "Leisure",
        }
    }
}

impl fmt::Display for TripCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for TripCategory {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Transportation modes matched against the keyword table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportMode {
    Flight,
    Train,
    Bus,
    Car,
    Boat,
    Bike,
    Subway,
    Tram,
}

impl TransportMode {
    pub fn label(&self) -> &'static str {
        match self {
            TransportMode::Flight => "flight",
            TransportMode::Train => "train",
            TransportMode::Bus => "bus",
            TransportMode::Car => "car",
            TransportMode::Boat => "boat",
            TransportMode::Bike => "bike",
            TransportMode::Subway => "subway",
            TransportMode::Tram => "tram",
        }
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for TransportMode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Accommodation categories matched against the keyword table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccommodationType {
    BoutiqueHotel,
    Resort,
    Hostel,
    BedAndBreakfast,
    Motel,
    Guesthouse,
    VacationRental,
    Camping,
}

impl AccommodationType {
    pub fn label(&self) -> &'static str {
        match self {
            AccommodationType::BoutiqueHotel => "Boutique hotels",
            AccommodationType::Resort => "Resorts",
            AccommodationType::Hostel => "Hostels",
            AccommodationType::BedAndBreakfast => "Bed and breakfasts",
            AccommodationType::Motel => "Motels",
            AccommodationType::Guesthouse => "Guesthouses",
            AccommodationType::VacationRental => "Vacation rentals",
            AccommodationType::Camping => "Camping",
        }
    }
}

impl fmt::Display for AccommodationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for AccommodationType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Special requirements recognized from the fixed list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecialRequirement {
    WheelchairAccess,
    VegetarianMeals,
    Vegan,
    GlutenFree,
}

impl SpecialRequirement {
    pub fn label(&self) -> &'static str {
        match self {
            SpecialRequirement::WheelchairAccess => "wheelchair access",
            SpecialRequirement::VegetarianMeals => "vegetarian meals",
            SpecialRequirement::Vegan => "vegan",
            SpecialRequirement::GlutenFree => "gluten-free",
        }
    }
}

impl fmt::Display for SpecialRequirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for SpecialRequirement {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Flat travel-request record produced by one extraction pass.
///
/// Serialized field labels match the tabular rendering, so the JSON export
/// reads the same as the displayed table.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TravelRequest {
    #[serde(rename = "Starting Location")]
    pub starting_location: Option<String>,
    #[serde(rename = "Destination")]
    pub destination: Option<String>,
    #[serde(rename = "Start Date")]
    pub start_date: Option<NaiveDate>,
    #[serde(rename = "End Date")]
    pub end_date: Option<NaiveDate>,
    /// Day count of the trip; non-positive values come from inverted explicit
    /// ranges and are rejected by the prompt builder.
    #[serde(rename = "Trip Duration")]
    pub duration_days: Option<i64>,
    #[serde(rename = "Trip Type")]
    pub trip_types: Vec<TripCategory>,
    #[serde(rename = "Number of Travelers")]
    pub travelers: Travelers,
    #[serde(rename = "Budget Range")]
    pub budget: Budget,
    #[serde(rename = "Transportation Preferences")]
    pub transport: Vec<TransportMode>,
    #[serde(rename = "Accommodation Preferences")]
    pub accommodation: Vec<AccommodationType>,
    #[serde(rename = "Special Requirements")]
    pub special_requirements: Vec<SpecialRequirement>,
}

pub(crate) fn join_labels<T: fmt::Display>(items: &[T], empty: &str) -> String {
    if items.is_empty() {
        empty.to_string()
    } else {
        items
            .iter()
            .map(|i| i.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl TravelRequest {
    /// Tabular rendering of the record, defaults filled in for missed fields
    pub fn to_rows(&self) -> Vec<(&'static str, String)> {
        vec![
            (
                "Starting Location",
                self.starting_location
                    .clone()
                    .unwrap_or_else(|| "Not specified".to_string()),
            ),
            (
                "Destination",
                self.destination
                    .clone()
                    .unwrap_or_else(|| "Not specified".to_string()),
            ),
            (
                "Start Date",
                self.start_date
                    .map(|d| d.to_string())
                    .unwrap_or_else(|| "Not specified".to_string()),
            ),
            (
                "End Date",
                self.end_date
                    .map(|d| d.to_string())
                    .unwrap_or_else(|| "Not specified".to_string()),
            ),
            (
                "Trip Duration",
                self.duration_days
                    .map(|d| format!("{} days", d))
                    .unwrap_or_else(|| "Not specified".to_string()),
            ),
            ("Trip Type", join_labels(&self.trip_types, "Leisure")),
            (
                "Number of Travelers",
                format!(
                    "{} adults, {} children, {} infants",
                    self.travelers.adults, self.travelers.children, self.travelers.infants
                ),
            ),
            ("Budget Range", self.budget.to_string()),
            (
                "Transportation Preferences",
                join_labels(&self.transport, "Any"),
            ),
            (
                "Accommodation Preferences",
                join_labels(&self.accommodation, "Not specified"),
            ),
            (
                "Special Requirements",
                join_labels(&self.special_requirements, "Not specified"),
            ),
        ]
    }
}

/// Extract a travel-request record from one free-text sentence.
///
/// Builds a fresh extractor per call; hold a [`DetailExtractor`] when parsing
/// more than one request.
pub fn extract_request(text: &str) -> Result<TravelRequest, PlannerError> {
    let extractor = DetailExtractor::new()?;
    Ok(extractor.extract(text))
}

/// Full pipeline: extract details, build the itinerary prompt and ask the
/// generative service for prose.
///
/// # Example
/// ```rust,no_run
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let itinerary = travel_planner::plan_trip(
///     "2 adults going from Delhi to Tokyo for a week from 13th april, budget of $3000",
/// )
/// .await?;
/// println!("{}", itinerary);
/// # Ok(())
/// # }
/// ```
pub async fn plan_trip(text: &str) -> Result<String, PlannerError> {
    let extractor = DetailExtractor::new()?;
    let request = extractor.extract(text);
    let prompt = build_prompt(&request, chrono::Local::now().date_naive())?;
    let client = ItineraryClient::from_env()?;
    client.generate(&prompt).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_travelers_default() {
        let travelers = Travelers::default();
        assert_eq!(travelers.adults, 0);
        assert_eq!(travelers.children, 0);
        assert_eq!(travelers.infants, 0);
        assert_eq!(travelers.total(), 0);
    }

    #[test]
    fn test_budget_display() {
        let amount = Budget::Amount {
            amount: 3000,
            symbol: Some("$".to_string()),
            currency: None,
        };
        assert_eq!(amount.to_string(), "$3000");

        let named = Budget::Amount {
            amount: 50000,
            symbol: None,
            currency: Some("rupees".to_string()),
        };
        assert_eq!(named.to_string(), "₹50000 (rupees)");

        let bare = Budget::Amount {
            amount: 1200,
            symbol: None,
            currency: None,
        };
        assert_eq!(bare.to_string(), "1200 (Specify currency)");

        assert_eq!(Budget::Tier(BudgetTier::Luxury).to_string(), "Luxury");
        assert_eq!(Budget::Unknown.to_string(), "Unknown");
    }

    #[test]
    fn test_record_rows_use_defaults() {
        let request = TravelRequest::default();
        let rows = request.to_rows();
        let value = |label: &str| {
            rows.iter()
                .find(|(l, _)| *l == label)
                .map(|(_, v)| v.clone())
                .unwrap()
        };

        assert_eq!(value("Destination"), "Not specified");
        assert_eq!(value("Trip Type"), "Leisure");
        assert_eq!(value("Transportation Preferences"), "Any");
        assert_eq!(value("Budget Range"), "Unknown");
    }

    #[test]
    fn test_record_json_labels() {
        let request = TravelRequest {
            destination: Some("Paris".to_string()),
            start_date: NaiveDate::from_ymd_opt(2025, 4, 13),
            duration_days: Some(7),
            trip_types: vec![TripCategory::Luxury],
            travelers: Travelers {
                adults: 2,
                children: 0,
                infants: 0,
            },
            budget: Budget::Tier(BudgetTier::Luxury),
            ..Default::default()
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["Destination"], "Paris");
        assert_eq!(json["Start Date"], "2025-04-13");
        assert_eq!(json["Trip Duration"], 7);
        assert_eq!(json["Trip Type"][0], "Luxury Travel");
        assert_eq!(json["Number of Travelers"]["Adults"], 2);
        assert_eq!(json["Budget Range"], "Luxury");
    }
}
