//! Detail extraction from free-text travel requests
//!
//! Every field has its own extractor: a regex or keyword table applied to the
//! same input sentence, in a fixed priority order, first match wins. The
//! extractors never fail — a field that cannot be read is left at its
//! default. All patterns and the gazetteer are compiled once in
//! [`DetailExtractor::new`] and shared read-only afterwards.

use crate::dates::{month_number, word_to_number, DateParser};
use crate::gazetteer::Gazetteer;
use crate::{
    AccommodationType, Budget, BudgetTier, PlannerError, SpecialRequirement, TransportMode,
    TravelRequest, Travelers, TripCategory,
};
use chrono::NaiveDate;
use regex::Regex;
use tracing::{debug, instrument};

const TRANSPORT_KEYWORDS: &[(TransportMode, &[&str])] = &[
    (
        TransportMode::Flight,
        &["flight", "fly", "airplane", "airlines", "airline", "aeroplane"],
    ),
    (TransportMode::Train, &["train", "railway"]),
    (TransportMode::Bus, &["bus", "coach"]),
    (
        TransportMode::Car,
        &["car", "auto", "automobile", "vehicle", "road trip", "drive"],
    ),
    (TransportMode::Boat, &["boat", "ship", "cruise", "ferry"]),
    (TransportMode::Bike, &["bike", "bicycle", "cycling"]),
    (TransportMode::Subway, &["subway", "metro", "underground"]),
    (TransportMode::Tram, &["tram", "streetcar", "trolley"]),
];

const TRIP_TYPE_KEYWORDS: &[(TripCategory, &[&str])] = &[
    (
        TripCategory::Adventure,
        &[
            "surfing",
            "cycling",
            "scuba diving",
            "hiking",
            "trekking",
            "camping",
            "skiing",
            "ski",
            "backpacking",
            "extreme sports",
        ],
    ),
    (
        TripCategory::Ecotourism,
        &["wildlife watching", "nature walks", "eco-lodging"],
    ),
    (
        TripCategory::Cultural,
        &["museum visits", "historical site tours", "local festivals"],
    ),
    (
        TripCategory::Historical,
        &["castle tours", "archaeological site visits", "war memorial tours"],
    ),
    (
        TripCategory::Luxury,
        &[
            "luxury",
            "luxurious",
            "private island stays",
            "first-class flights",
            "fine dining experiences",
        ],
    ),
    (
        TripCategory::Wildlife,
        &["safari tours", "whale watching", "birdwatching"],
    ),
    (
        TripCategory::Sustainable,
        &["eco-resorts", "community-based tourism", "carbon-neutral travel"],
    ),
    (
        TripCategory::Volunteer,
        &["teaching abroad", "wildlife conservation", "disaster relief work"],
    ),
    (
        TripCategory::Medical,
        &["cosmetic surgery", "dental care", "alternative medicine retreats"],
    ),
    (
        TripCategory::Educational,
        &["study abroad programs", "language immersion", "historical research"],
    ),
    (
        TripCategory::Business,
        &["corporate meetings", "networking events", "industry trade shows"],
    ),
    (
        TripCategory::Solo,
        &["self-guided tours", "meditation retreats", "budget backpacking"],
    ),
    (
        TripCategory::Group,
        &["guided tours", "cruise trips", "family reunions"],
    ),
    (
        TripCategory::Backpacking,
        &["hostel stays", "hitchhiking", "long-term travel"],
    ),
    (
        TripCategory::Food,
        &["food tasting tours", "cooking classes", "street food exploration"],
    ),
    (
        TripCategory::Religious,
        &["pilgrimages", "monastery visits", "religious festivals"],
    ),
    (
        TripCategory::DigitalNomad,
        &["co-working spaces", "long-term stays", "remote work-friendly cafes"],
    ),
    (
        TripCategory::Family,
        &[
            "family trip",
            "theme parks",
            "honeymoon",
            "kid-friendly resorts",
            "multi-generational travel",
            "family vacation",
        ],
    ),
];

const ACCOMMODATION_KEYWORDS: &[(AccommodationType, &[&str])] = &[
    (
        AccommodationType::BoutiqueHotel,
        &["hotel", "boutique hotel", "small hotel", "intimate hotel"],
    ),
    (
        AccommodationType::Resort,
        &["resort", "holiday resort", "self-contained resort", "luxury resort"],
    ),
    (
        AccommodationType::Hostel,
        &["hostel", "hostels", "dormitory", "shared accommodation"],
    ),
    (
        AccommodationType::BedAndBreakfast,
        &["bed and breakfast", "b&b", "guesthouse"],
    ),
    (
        AccommodationType::Motel,
        &["motel", "motor lodge", "roadside motel"],
    ),
    (
        AccommodationType::Guesthouse,
        &["guesthouse", "private guesthouse", "pension"],
    ),
    (
        AccommodationType::VacationRental,
        &["vacation rental", "holiday rental", "short-term rental", "airbnb"],
    ),
    (
        AccommodationType::Camping,
        &["camping", "campground", "tent", "camp"],
    ),
];

/// Tier keywords in priority order; the first hit wins when no numeric
/// amount is present
const BUDGET_TIER_KEYWORDS: &[(BudgetTier, &str)] = &[
    (BudgetTier::MidRange, "friendly budget"),
    (BudgetTier::MidRange, "mid-range budget"),
    (BudgetTier::Luxury, "luxury"),
    (BudgetTier::Low, "cheap"),
    (BudgetTier::Luxury, "expensive"),
    (BudgetTier::Luxury, "premium"),
    (BudgetTier::Luxury, "high-range"),
];

const SPECIAL_REQUIREMENTS: &[(SpecialRequirement, &str)] = &[
    (SpecialRequirement::WheelchairAccess, "wheelchair access"),
    (SpecialRequirement::VegetarianMeals, "vegetarian meals"),
    (SpecialRequirement::Vegan, "vegan"),
    (SpecialRequirement::GlutenFree, "gluten-free"),
];

const CURRENCY_NAMES: &str = "USD|dollars?|yen|JPY|euro|EUR|euros|rupees?|INR|pounds?|GBP|CNY|yuan|RMB";

fn keyword_pattern(keywords: &[&str]) -> String {
    format!(r"(?i)\b(?:{})\b", keywords.join("|"))
}

fn keyword_table<T: Copy>(
    table: &[(T, &[&str])],
) -> Result<Vec<(T, Regex)>, regex::Error> {
    table
        .iter()
        .map(|(item, keywords)| Ok((*item, Regex::new(&keyword_pattern(keywords))?)))
        .collect()
}

/// All field extractors, pre-compiled once per process
pub struct DetailExtractor {
    gazetteer: Gazetteer,
    dates: DateParser,
    from_place: Regex,
    to_place: Regex,
    place_hint: Regex,
    adults: Regex,
    children: Regex,
    infants: Regex,
    solo: Regex,
    duo: Regex,
    trio: Regex,
    group: Regex,
    budget_context: Regex,
    budget_direct: Regex,
    budget_tiers: Vec<(BudgetTier, Regex)>,
    transport: Vec<(TransportMode, Regex)>,
    trip_types: Vec<(TripCategory, Regex)>,
    accommodations: Vec<(AccommodationType, Regex)>,
}

impl DetailExtractor {
    pub fn new() -> Result<Self, PlannerError> {
        debug!("Compiling detail extractor patterns");

        // Capitalized phrase after a travel preposition
        const PLACE: &str = r"([A-Z][a-z]+(?:\s[A-Z][a-z]+)*)";
        const COUNT: &str = r"(\d+|one|two|three|four|five|six|seven|eight|nine|ten)";

        Ok(Self {
            gazetteer: Gazetteer::new(),
            dates: DateParser::new()?,
            from_place: Regex::new(&format!(r"\bfrom\s+{PLACE}"))?,
            to_place: Regex::new(&format!(r"\bto(?:ward)?\s+(?:the\s+)?{PLACE}"))?,
            place_hint: Regex::new(&format!(
                r"\b(?:from|to|visit|traveling to|heading to|going to|in|at|of|to the|toward the)\s+{PLACE}"
            ))?,
            adults: Regex::new(&format!(
                r"(?i)\b{COUNT}\s*(?:people|persons|adults|adult|person|man|men|woman|women|lady|ladies|climber|travelers|traveler)\b"
            ))?,
            children: Regex::new(&format!(r"(?i)\b{COUNT}\s*(?:children|child)\b"))?,
            infants: Regex::new(&format!(r"(?i)\b{COUNT}\s*(?:infants|infant)\b"))?,
            solo: Regex::new(r"(?i)\b(?:solo|alone|i|me)\b")?,
            duo: Regex::new(
                r"(?i)\b(?:duo|honeymoon|couple|pair|my partner and i|my wife and i|my husband and i)\b",
            )?,
            trio: Regex::new(r"(?i)\btrio\b")?,
            group: Regex::new(r"(?i)\b(?:family|group)\s+of\s+(\d+)\b")?,
            budget_context: Regex::new(&format!(
                r"(?i)\b(?:budget|cost|expense|spending cap|max limit|is|cost limit|amount|price)\s*(?:of\s*)?(\$|€|¥|₹|£)?\s*([\d,]+)\s*({CURRENCY_NAMES})?\b"
            ))?,
            budget_direct: Regex::new(&format!(
                r"(?i)(\$|€|¥|₹|£)\s*([\d,]+)|\b([\d,]+)\s*({CURRENCY_NAMES})\b"
            ))?,
            budget_tiers: BUDGET_TIER_KEYWORDS
                .iter()
                .map(|(tier, keyword)| Ok((*tier, Regex::new(&keyword_pattern(&[keyword]))?)))
                .collect::<Result<_, regex::Error>>()?,
            transport: keyword_table(TRANSPORT_KEYWORDS)?,
            trip_types: keyword_table(TRIP_TYPE_KEYWORDS)?,
            accommodations: keyword_table(ACCOMMODATION_KEYWORDS)?,
        })
    }

    /// Extract a record using the current local date as reference
    pub fn extract(&self, text: &str) -> TravelRequest {
        self.extract_at(text, chrono::Local::now().date_naive())
    }

    /// Extract a record against an explicit reference date
    #[instrument(level = "debug", skip(self, text))]
    pub fn extract_at(&self, text: &str, today: NaiveDate) -> TravelRequest {
        let (starting_location, destination) = self.extract_locations(text);

        let fallback_duration = self.dates.extract_duration(text);
        let span = self.dates.extract(text, today, fallback_duration);
        let (start_date, end_date, duration_days) = match span {
            Some(span) => (
                Some(span.start),
                span.end,
                span.duration_days.or(fallback_duration),
            ),
            None => (None, None, fallback_duration),
        };

        let request = TravelRequest {
            starting_location,
            destination,
            start_date,
            end_date,
            duration_days,
            trip_types: self.extract_trip_types(text),
            travelers: self.extract_travelers(text),
            budget: self.extract_budget(text),
            transport: self.extract_transport(text),
            accommodation: self.extract_accommodation(text),
            special_requirements: self.extract_special_requirements(text),
        };

        debug!(
            destination = request.destination.as_deref().unwrap_or("-"),
            start_date = ?request.start_date,
            duration_days = ?request.duration_days,
            "Extraction completed"
        );

        request
    }

    /// Starting location and destination.
    ///
    /// Gazetteer-validated "from"/"to" captures take priority; otherwise the
    /// pooled candidates (prepositional captures plus gazetteer hits) are
    /// assigned positionally: two or more → (start, destination), one →
    /// destination only.
    fn extract_locations(&self, text: &str) -> (Option<String>, Option<String>) {
        let validated = |re: &Regex| {
            re.captures(text)
                .and_then(|caps| caps.get(1))
                .and_then(|m| self.gazetteer.canonical(m.as_str()))
                .map(str::to_string)
        };
        let start = validated(&self.from_place);
        let destination = validated(&self.to_place);
        if start.is_some() || destination.is_some() {
            return (start, destination);
        }

        let mut candidates: Vec<String> = Vec::new();
        let mut push = |candidate: &str| {
            if !candidates.iter().any(|c| c == candidate) {
                candidates.push(candidate.to_string());
            }
        };
        for caps in self.place_hint.captures_iter(text) {
            if let Some(m) = caps.get(1) {
                // Month and season names also follow these prepositions
                if !is_date_word(m.as_str()) {
                    push(m.as_str());
                }
            }
        }
        for city in self.gazetteer.find_all(text) {
            push(&city);
        }

        let mut candidates = candidates.into_iter();
        match (candidates.next(), candidates.next()) {
            (Some(first), Some(second)) => (Some(first), Some(second)),
            (Some(only), None) => (None, Some(only)),
            _ => (None, None),
        }
    }

    fn extract_travelers(&self, text: &str) -> Travelers {
        let count = |re: &Regex| {
            re.captures(text)
                .and_then(|caps| caps.get(1))
                .map(|m| word_to_number(m.as_str()) as u32)
                .unwrap_or(0)
        };
        let mut travelers = Travelers {
            adults: count(&self.adults),
            children: count(&self.children),
            infants: count(&self.infants),
        };

        if self.solo.is_match(text) {
            travelers.adults = 1;
        } else if self.duo.is_match(text) {
            travelers.adults = 2;
        } else if self.trio.is_match(text) {
            travelers.adults = 3;
        } else if let Some(caps) = self.group.captures(text) {
            let total: u32 = caps
                .get(1)
                .and_then(|m| m.as_str().parse().ok())
                .unwrap_or(0);
            if total > 2 {
                let remaining = total.saturating_sub(travelers.children + travelers.infants);
                travelers.adults = remaining.max(2);
            }
        }

        travelers
    }

    /// Amount with context word, then bare currency amount, then tier keyword
    fn extract_budget(&self, text: &str) -> Budget {
        if let Some(budget) = self.context_amount(text) {
            return budget;
        }
        if let Some(budget) = self.direct_amount(text) {
            return budget;
        }
        self.budget_tiers
            .iter()
            .find(|(_, re)| re.is_match(text))
            .map(|(tier, _)| Budget::Tier(*tier))
            .unwrap_or(Budget::Unknown)
    }

    fn context_amount(&self, text: &str) -> Option<Budget> {
        let caps = self.budget_context.captures(text)?;
        let amount = caps.get(2)?.as_str().replace(',', "").parse().ok()?;
        Some(Budget::Amount {
            amount,
            symbol: caps.get(1).map(|m| m.as_str().to_string()),
            currency: caps.get(3).map(|m| m.as_str().to_string()),
        })
    }

    fn direct_amount(&self, text: &str) -> Option<Budget> {
        let caps = self.budget_direct.captures(text)?;
        if let (Some(symbol), Some(amount)) = (caps.get(1), caps.get(2)) {
            return Some(Budget::Amount {
                amount: amount.as_str().replace(',', "").parse().ok()?,
                symbol: Some(symbol.as_str().to_string()),
                currency: None,
            });
        }
        Some(Budget::Amount {
            amount: caps.get(3)?.as_str().replace(',', "").parse().ok()?,
            symbol: None,
            currency: caps.get(4).map(|m| m.as_str().to_string()),
        })
    }

    fn extract_transport(&self, text: &str) -> Vec<TransportMode> {
        self.transport
            .iter()
            .filter(|(_, re)| re.is_match(text))
            .map(|(mode, _)| *mode)
            .collect()
    }

    fn extract_trip_types(&self, text: &str) -> Vec<TripCategory> {
        let mut matches: Vec<TripCategory> = self
            .trip_types
            .iter()
            .filter(|(_, re)| re.is_match(text))
            .map(|(category, _)| *category)
            .collect();
        if matches.is_empty() {
            matches.push(TripCategory::Leisure);
        }
        matches
    }

    fn extract_accommodation(&self, text: &str) -> Vec<AccommodationType> {
        self.accommodations
            .iter()
            .filter(|(_, re)| re.is_match(text))
            .map(|(accommodation, _)| *accommodation)
            .collect()
    }

    fn extract_special_requirements(&self, text: &str) -> Vec<SpecialRequirement> {
        let lower = text.to_lowercase();
        SPECIAL_REQUIREMENTS
            .iter()
            .filter(|(_, phrase)| lower.contains(phrase))
            .map(|(requirement, _)| *requirement)
            .collect()
    }
}

/// Capitalized month and season names must not become location candidates
fn is_date_word(phrase: &str) -> bool {
    let lower = phrase.to_lowercase();
    month_number(&lower).is_some()
        || matches!(
            lower.as_str(),
            "summer" | "autumn" | "fall" | "winter" | "spring" | "monsoon"
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> DetailExtractor {
        DetailExtractor::new().unwrap()
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()
    }

    #[test]
    fn test_from_to_locations() {
        let request = extractor().extract_at("flying from Delhi to Tokyo next month", today());
        assert_eq!(request.starting_location.as_deref(), Some("Delhi"));
        assert_eq!(request.destination.as_deref(), Some("Tokyo"));
    }

    #[test]
    fn test_single_location_is_destination() {
        let request = extractor().extract_at("luxury honeymoon in Bali", today());
        assert_eq!(request.starting_location, None);
        assert_eq!(request.destination.as_deref(), Some("Bali"));
    }

    #[test]
    fn test_month_name_is_not_a_destination() {
        let request = extractor().extract_at("visiting Rome in May", today());
        assert_eq!(request.destination.as_deref(), Some("Rome"));
        assert_eq!(request.starting_location, None);
    }

    #[test]
    fn test_counted_travelers() {
        let request = extractor().extract_at("2 adults and 1 child and one infant", today());
        assert_eq!(request.travelers.adults, 2);
        assert_eq!(request.travelers.children, 1);
        assert_eq!(request.travelers.infants, 1);
    }

    #[test]
    fn test_solo_and_trio() {
        let solo = extractor().extract_at("traveling solo through Vienna", today());
        assert_eq!(solo.travelers.adults, 1);

        let trio = extractor().extract_at("a trio heading to Lisbon", today());
        assert_eq!(trio.travelers.adults, 3);
    }

    #[test]
    fn test_honeymoon_means_two_adults() {
        let request = extractor().extract_at("honeymoon in Bali", today());
        assert_eq!(request.travelers.adults, 2);
        assert!(request.trip_types.contains(&TripCategory::Family));
    }

    #[test]
    fn test_family_of_n() {
        let request = extractor().extract_at("family of 5 going to Paris with 2 children", today());
        assert_eq!(request.travelers.children, 2);
        assert_eq!(request.travelers.adults, 3);
    }

    #[test]
    fn test_budget_with_context_word() {
        let request = extractor().extract_at("a budget of $3,000 for the trip", today());
        assert_eq!(
            request.budget,
            Budget::Amount {
                amount: 3000,
                symbol: Some("$".to_string()),
                currency: None,
            }
        );
    }

    #[test]
    fn test_budget_with_currency_name() {
        let request = extractor().extract_at("we can spend 50000 rupees overall", today());
        assert_eq!(
            request.budget,
            Budget::Amount {
                amount: 50000,
                symbol: None,
                currency: Some("rupees".to_string()),
            }
        );
    }

    #[test]
    fn test_budget_amount_without_currency() {
        let request = extractor().extract_at("our budget is 1200", today());
        assert_eq!(
            request.budget,
            Budget::Amount {
                amount: 1200,
                symbol: None,
                currency: None,
            }
        );
        assert_eq!(request.budget.to_string(), "1200 (Specify currency)");
    }

    #[test]
    fn test_budget_tier_keyword() {
        let request = extractor().extract_at("something cheap near Prague", today());
        assert_eq!(request.budget, Budget::Tier(BudgetTier::Low));
    }

    #[test]
    fn test_budget_defaults_to_unknown() {
        let request = extractor().extract_at("just a quiet getaway", today());
        assert_eq!(request.budget, Budget::Unknown);
    }

    #[test]
    fn test_transport_modes() {
        let request = extractor().extract_at("we want to fly there and use the metro", today());
        assert_eq!(
            request.transport,
            vec![TransportMode::Flight, TransportMode::Subway]
        );
    }

    #[test]
    fn test_trip_type_default_is_leisure() {
        let request = extractor().extract_at("a few days in Oslo", today());
        assert_eq!(request.trip_types, vec![TripCategory::Leisure]);
    }

    #[test]
    fn test_trip_type_keywords() {
        let request = extractor().extract_at("hiking and camping near Queenstown", today());
        assert!(request.trip_types.contains(&TripCategory::Adventure));
    }

    #[test]
    fn test_accommodation_and_special_requirements() {
        let request = extractor().extract_at(
            "staying in hostels, we need vegetarian meals and wheelchair access",
            today(),
        );
        assert_eq!(request.accommodation, vec![AccommodationType::Hostel]);
        assert_eq!(
            request.special_requirements,
            vec![
                SpecialRequirement::WheelchairAccess,
                SpecialRequirement::VegetarianMeals,
            ]
        );
    }

    #[test]
    fn test_dates_flow_into_record() {
        let request = extractor().extract_at("a week from 13th april", today());
        assert_eq!(request.start_date, NaiveDate::from_ymd_opt(2025, 4, 13));
        assert_eq!(request.end_date, NaiveDate::from_ymd_opt(2025, 4, 19));
        assert_eq!(request.duration_days, Some(7));
    }

    #[test]
    fn test_standalone_duration_without_date() {
        let request = extractor().extract_at("going to Paris for 2 weeks", today());
        assert_eq!(request.start_date, None);
        assert_eq!(request.duration_days, Some(14));
    }
}
