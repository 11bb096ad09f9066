//! Bundled Japan trip itinerary
//!
//! Static data behind the demo dashboard: a five-day Tokyo trip with a
//! parameterless plain-text export. Rendering (tabs, charts, currency table)
//! is a display concern and lives outside this crate.

use chrono::NaiveDate;
use serde::Serialize;

/// Trip-level facts shown on the overview tab
#[derive(Debug, Clone, Serialize)]
pub struct TripOverview {
    pub title: &'static str,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub duration: &'static str,
    pub budget: &'static str,
    pub best_time: &'static str,
    pub language: &'static str,
    pub currency: &'static str,
}

/// Meals planned for one itinerary day
#[derive(Debug, Clone, Serialize)]
pub struct Meals {
    pub breakfast: &'static str,
    pub lunch: &'static str,
    pub dinner: Option<&'static str>,
}

/// One day of the itinerary
#[derive(Debug, Clone, Serialize)]
pub struct ItineraryDay {
    pub title: &'static str,
    pub morning: &'static str,
    pub afternoon: &'static str,
    pub evening: Option<&'static str>,
    pub meals: Meals,
    pub accommodation: Option<&'static str>,
}

/// The complete hard-coded trip
#[derive(Debug, Clone, Serialize)]
pub struct JapanTrip {
    pub overview: TripOverview,
    pub days: Vec<ItineraryDay>,
}

const ACCOMMODATION: &str =
    "Shinjuku Kuyakusho-mae Capsule Hotel (Capsule Hotel, budget-friendly, around ¥4,000 per night)";

impl JapanTrip {
    pub fn new() -> Self {
        Self {
            overview: TripOverview {
                title: "Leisure Trip to Japan (April 6-10, 2025)",
                start_date: NaiveDate::from_ymd_opt(2025, 4, 6).expect("valid trip start date"),
                end_date: NaiveDate::from_ymd_opt(2025, 4, 10).expect("valid trip end date"),
                duration: "5 days, 4 nights",
                budget: "₹50,000 (¥85,000-¥90,000)",
                best_time: "Cherry blossom season",
                language: "Japanese",
                currency: "Japanese Yen (¥)",
            },
            days: vec![
                ItineraryDay {
                    title: "Day 1: Arrival in Tokyo & Shinjuku Exploration",
                    morning: "Arrive at Narita (NRT) or Haneda (HND) airport. Take the Narita \
                              Express or Limousine Bus to Shinjuku (¥3,000-¥4,000). Check in to \
                              your accommodation.",
                    afternoon: "Explore Shinjuku Gyoen National Garden (¥500), a beautiful oasis \
                                offering diverse garden styles. Ascend the Tokyo Metropolitan \
                                Government Building for panoramic city views (Free).",
                    evening: Some(
                        "Enjoy dinner in Shinjuku's vibrant entertainment district, Kabukicho.",
                    ),
                    meals: Meals {
                        breakfast: "On the plane or grab a quick bite at the airport.",
                        lunch: "Convenience store like 7-Eleven or FamilyMart (¥500-¥800).",
                        dinner: Some(
                            "Omoide Yokocho (memory lane) for yakitori skewers (¥1,500-¥2,500) \
                             or Ichiran Ramen (¥1,000).",
                        ),
                    },
                    accommodation: Some(ACCOMMODATION),
                },
                ItineraryDay {
                    title: "Day 2: Culture & Trendy Vibes",
                    morning: "Immerse yourself in the Tsukiji Outer Market (free entry, but food \
                              costs vary). Sample fresh seafood, street food, and local produce.",
                    afternoon: "Explore the trendy Harajuku district, known for its unique street \
                                style and Takeshita Street's quirky shops. Visit Meiji Jingu \
                                Shrine, a peaceful oasis dedicated to Emperor Meiji and Empress \
                                Shoken (Free).",
                    evening: Some("Enjoy dinner and explore the vibrant Shibuya crossing."),
                    meals: Meals {
                        breakfast: "Bakery near your accommodation (¥500).",
                        lunch: "Tsukiji Outer Market – Sushi, Ramen, or various street food \
                                options (¥1,000-¥2,000).",
                        dinner: Some(
                            "Shibuya – Genki Sushi (Conveyor belt sushi, affordable) or a ramen \
                             shop (¥800-¥1,500).",
                        ),
                    },
                    accommodation: Some("Same as Day 1."),
                },
                ItineraryDay {
                    title: "Day 3: Day Trip to Hakone",
                    morning: "Take a scenic train ride to Hakone (approx. ¥2,000 roundtrip).",
                    afternoon: "Cruise across Lake Ashi, surrounded by stunning views of Mt. Fuji \
                                (weather permitting). Ride the Hakone Ropeway, offering volcanic \
                                hot spring views.",
                    evening: Some("Return to Tokyo."),
                    meals: Meals {
                        breakfast: "Convenience store near your accommodation.",
                        lunch: "Restaurant near Lake Ashi offering Hoto noodles or other local \
                                specialties (¥1,500-¥2,500).",
                        dinner: Some("Shinjuku – Dinner near your accommodation."),
                    },
                    accommodation: Some("Same as Day 1."),
                },
                ItineraryDay {
                    title: "Day 4: Ancient & Modern Tokyo",
                    morning: "Visit Sensō-ji Temple, Tokyo's oldest temple, and explore the \
                              Nakamise-dori market.",
                    afternoon: "Explore the Imperial Palace East Garden (Free). Visit the \
                                Edo-Tokyo Museum (¥600) to learn about Tokyo's history.",
                    evening: Some(
                        "Enjoy dinner in the Asakusa area and see Tokyo Skytree illuminated.",
                    ),
                    meals: Meals {
                        breakfast: "Onigiri from a convenience store.",
                        lunch: "Monjayaki (savory pancake) in Asakusa (¥1,000-¥1,500).",
                        dinner: Some("Asakusa - Ramen or other local dishes."),
                    },
                    accommodation: Some("Same as Day 1."),
                },
                ItineraryDay {
                    title: "Day 5: Departure",
                    morning: "Last-minute souvenir shopping at a Don Quijote store.",
                    afternoon: "Travel to Narita (NRT) or Haneda (HND) airport for your \
                                departure.",
                    evening: None,
                    meals: Meals {
                        breakfast: "Near your accommodation.",
                        lunch: "At the airport.",
                        dinner: None,
                    },
                    accommodation: None,
                },
            ],
        }
    }

    /// Days until the trip begins; negative once it has started
    pub fn countdown_days(&self, today: NaiveDate) -> i64 {
        (self.overview.start_date - today).num_days()
    }

    /// The downloadable plain-text rendering of the itinerary
    pub fn to_plain_text(&self) -> String {
        let mut text = String::from("Japan Travel Itinerary (April 6-10, 2025)\n\n");
        for day in &self.days {
            text.push_str(day.title);
            text.push('\n');
            text.push_str(&format!("Morning: {}\n", day.morning));
            text.push_str(&format!("Afternoon: {}\n", day.afternoon));
            if let Some(evening) = day.evening {
                text.push_str(&format!("Evening: {}\n", evening));
            }
            text.push_str("Meals:\n");
            text.push_str(&format!("  Breakfast: {}\n", day.meals.breakfast));
            text.push_str(&format!("  Lunch: {}\n", day.meals.lunch));
            if let Some(dinner) = day.meals.dinner {
                text.push_str(&format!("  Dinner: {}\n", dinner));
            }
            if let Some(accommodation) = day.accommodation {
                text.push_str(&format!("Accommodation: {}\n", accommodation));
            }
            text.push('\n');
        }
        text
    }
}

impl Default for JapanTrip {
    fn default() -> Self {
        Self::new()
    }
}
