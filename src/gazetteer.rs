//! City gazetteer for place-name lookup
//!
//! Backed by an embedded list of world cities plus a handful of destination
//! phrases that are not cities proper. Loaded once per process and shared
//! read-only; lookups are case-insensitive over phrases of up to three words.

use std::collections::HashMap;

static CITY_DATA: &str = include_str!("../data/cities.txt");

/// Popular destinations the city list does not cover
const EXTRA_DESTINATIONS: &[&str] = &[
    "Goa",
    "Bali",
    "Maldives",
    "Hakone",
    "French countryside",
    "Swiss Alps",
];

/// Longest phrase, in words, the scanner will try to match
const MAX_PHRASE_WORDS: usize = 3;

/// Lookup table of known place names, keyed by lowercased phrase
pub struct Gazetteer {
    places: HashMap<String, String>,
}

impl Gazetteer {
    pub fn new() -> Self {
        let mut places = HashMap::new();
        for line in CITY_DATA.lines() {
            let name = line.trim();
            if name.is_empty() || name.starts_with('#') {
                continue;
            }
            places.insert(name.to_lowercase(), name.to_string());
        }
        for name in EXTRA_DESTINATIONS {
            places.insert(name.to_lowercase(), name.to_string());
        }
        Self { places }
    }

    pub fn len(&self) -> usize {
        self.places.len()
    }

    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }

    /// Canonical name for a phrase, if it is a known place
    pub fn canonical(&self, phrase: &str) -> Option<&str> {
        self.places
            .get(phrase.trim().to_lowercase().as_str())
            .map(|s| s.as_str())
    }

    /// All known places mentioned in the text, in order of first appearance.
    ///
    /// Scans word windows of up to [`MAX_PHRASE_WORDS`] words so multi-word
    /// names like "New York" are found; duplicates are dropped while
    /// preserving order.
    pub fn find_all(&self, text: &str) -> Vec<String> {
        let words: Vec<&str> = text
            .split_whitespace()
            .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()))
            .collect();

        let mut found = Vec::new();
        for i in 0..words.len() {
            for j in i..(i + MAX_PHRASE_WORDS).min(words.len()) {
                let phrase = words[i..=j].join(" ");
                if let Some(name) = self.canonical(&phrase) {
                    if !found.iter().any(|f| f == name) {
                        found.push(name.to_string());
                    }
                }
            }
        }
        found
    }
}

impl Default for Gazetteer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gazetteer_loads_cities() {
        let gazetteer = Gazetteer::new();
        assert!(!gazetteer.is_empty());
        assert!(gazetteer.len() > 100);
    }

    #[test]
    fn test_canonical_is_case_insensitive() {
        let gazetteer = Gazetteer::new();
        assert_eq!(gazetteer.canonical("paris"), Some("Paris"));
        assert_eq!(gazetteer.canonical("NEW YORK"), Some("New York"));
        assert_eq!(gazetteer.canonical("Atlantis"), None);
    }

    #[test]
    fn test_find_all_multi_word_and_order() {
        let gazetteer = Gazetteer::new();
        let found = gazetteer.find_all("flying from New York to Tokyo and back to New York");
        assert_eq!(found, vec!["New York".to_string(), "Tokyo".to_string()]);
    }

    #[test]
    fn test_find_all_trims_punctuation() {
        let gazetteer = Gazetteer::new();
        let found = gazetteer.find_all("A long weekend in Paris, then home.");
        assert_eq!(found, vec!["Paris".to_string()]);
    }

    #[test]
    fn test_extra_destinations_present() {
        let gazetteer = Gazetteer::new();
        assert_eq!(gazetteer.canonical("bali"), Some("Bali"));
        assert_eq!(
            gazetteer.canonical("french countryside"),
            Some("French countryside")
        );
    }
}
