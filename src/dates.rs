//! Date extraction for free-text travel requests
//!
//! A fixed-order battery of range and duration patterns is tried first; a
//! generic fuzzy single-date search and the seasonal keyword mapping act as
//! fallbacks. The first pattern that structurally matches wins, even when its
//! captures fail to resolve to a calendar date. Trip days are counted
//! inclusively: a one-week trip starting on the 13th ends on the 19th.

use crate::PlannerError;
use chrono::{Datelike, Duration, NaiveDate};
use regex::{Captures, Regex};
use std::collections::HashMap;
use tracing::debug;

// Shared pattern fragments
const NUM: &str = r"(\d+|a|an|one|two|three|four|five|six|seven|eight|nine|ten)";
const UNIT: &str = r"(day|days|week|weeks|month|months)";
const DAY: &str = r"(\d{1,2})(?:st|nd|rd|th)?";
const MONTH: &str = r"([A-Za-z]+)";
const YEAR: &str = r"(?:\s+(\d{4}))?";

/// Start date plus whatever the matched pattern said about the trip's extent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateSpan {
    pub start: NaiveDate,
    pub end: Option<NaiveDate>,
    pub duration_days: Option<i64>,
}

/// Fixed calendar dates assigned to named seasons, most specific first so
/// "mid summer" is not shadowed by "summer"
const SEASONS: &[(&str, u32, u32)] = &[
    ("mid summer", 7, 15),
    ("end of summer", 8, 25),
    ("early winter", 11, 15),
    ("late winter", 1, 15),
    ("summer", 6, 1),
    ("autumn", 9, 15),
    ("fall", 9, 15),
    ("monsoon", 9, 10),
    ("winter", 12, 1),
    ("spring", 4, 1),
];

/// Pre-compiled date patterns, built once and shared read-only
pub struct DateParser {
    range_ordinal: Regex,           // from 3-13th april 2025
    date_to_date: Regex,            // from 22nd june 2025 to 29th june 2025
    numeric_range: Regex,           // from 02-04-2025 to 29-04-2025
    date_for_duration: Regex,       // from 12th march for two weeks
    duration_from_date: Regex,      // (for) a week from 13th april
    duration_on_date: Regex,        // for two weeks on 3rd april
    on_date_for_duration: Regex,    // on 13th march for a week
    duration_on_numeric: Regex,     // for 2 weeks on 20/05/2025
    on_numeric_for_duration: Regex, // on 05/06/2025 for two weeks
    fuzzy_numeric: Regex,
    fuzzy_day_month: Regex,
    fuzzy_month_day: Regex,
    duration: Regex,
    season: Regex,
    season_dates: HashMap<&'static str, (u32, u32)>,
}

impl DateParser {
    pub fn new() -> Result<Self, PlannerError> {
        let season_alternation = SEASONS
            .iter()
            .map(|(name, _, _)| *name)
            .collect::<Vec<_>>()
            .join("|");

        Ok(Self {
            range_ordinal: Regex::new(&format!(r"(?i)from\s+{DAY}\s*-\s*{DAY}\s+{MONTH}{YEAR}"))?,
            date_to_date: Regex::new(&format!(
                r"(?i)from\s+{DAY}\s+{MONTH}{YEAR}\s+to\s+{DAY}\s+{MONTH}{YEAR}"
            ))?,
            numeric_range: Regex::new(
                r"(?i)from\s+(\d{1,2})-(\d{1,2})-(\d{4})\s+to\s+(\d{1,2})-(\d{1,2})-(\d{4})",
            )?,
            date_for_duration: Regex::new(&format!(
                r"(?i)from\s+{DAY}\s+{MONTH}{YEAR}\s+for\s+{NUM}\s+{UNIT}"
            ))?,
            duration_from_date: Regex::new(&format!(
                r"(?i)(?:for\s+)?\b{NUM}\s+{UNIT}\s+from\s+{DAY}\s+{MONTH}{YEAR}"
            ))?,
            duration_on_date: Regex::new(&format!(
                r"(?i)for\s+{NUM}\s+{UNIT}\s+on\s+{DAY}\s+{MONTH}{YEAR}"
            ))?,
            on_date_for_duration: Regex::new(&format!(
                r"(?i)on\s+{DAY}\s+{MONTH}{YEAR}\s+for\s+{NUM}\s+{UNIT}"
            ))?,
            duration_on_numeric: Regex::new(&format!(
                r"(?i)for\s+{NUM}\s+{UNIT}\s+on\s+(\d{{1,2}})[/-](\d{{1,2}})[/-](\d{{4}})"
            ))?,
            on_numeric_for_duration: Regex::new(&format!(
                r"(?i)on\s+(\d{{1,2}})[/-](\d{{1,2}})[/-](\d{{4}})\s+for\s+{NUM}\s+{UNIT}"
            ))?,
            fuzzy_numeric: Regex::new(r"\b(\d{1,2})[/-](\d{1,2})[/-](\d{4})\b")?,
            fuzzy_day_month: Regex::new(&format!(r"(?i)\b{DAY}\s+{MONTH}{YEAR}"))?,
            fuzzy_month_day: Regex::new(&format!(r"(?i)\b{MONTH}\s+{DAY}(?:,?\s+(\d{{4}}))?"))?,
            duration: Regex::new(&format!(
                r"(?i)\b{NUM}\s*-?\s*(day|days|night|nights|week|weeks|month|months)\b"
            ))?,
            season: Regex::new(&format!(r"(?i)\b({season_alternation})\b"))?,
            season_dates: SEASONS.iter().map(|(n, m, d)| (*n, (*m, *d))).collect(),
        })
    }

    /// Run the full cascade: range/duration battery, then fuzzy single-date
    /// search, then seasonal mapping. `fallback_duration` (from the
    /// standalone duration extractor) fills in the end date when only a start
    /// could be found.
    pub fn extract(
        &self,
        text: &str,
        today: NaiveDate,
        fallback_duration: Option<i64>,
    ) -> Option<DateSpan> {
        if let Some(caps) = self.range_ordinal.captures(text) {
            debug!("date pattern matched: ordinal range");
            return self.explicit_range_span(&caps, today, 1, 2, 3, 3, 4, 4);
        }
        if let Some(caps) = self.date_to_date.captures(text) {
            debug!("date pattern matched: date to date");
            return self.explicit_range_span(&caps, today, 1, 4, 2, 5, 3, 6);
        }
        if let Some(caps) = self.numeric_range.captures(text) {
            debug!("date pattern matched: numeric range");
            let start = numeric_date(&caps, 1, 2, 3)?;
            let end = numeric_date(&caps, 4, 5, 6)?;
            return Some(range_span(start, end));
        }
        if let Some(caps) = self.date_for_duration.captures(text) {
            debug!("date pattern matched: date for duration");
            return self.anchored_span(&caps, today, 1, 2, 3, 4, 5);
        }
        if let Some(caps) = self.duration_from_date.captures(text) {
            debug!("date pattern matched: duration from date");
            return self.anchored_span(&caps, today, 3, 4, 5, 1, 2);
        }
        if let Some(caps) = self.duration_on_date.captures(text) {
            debug!("date pattern matched: duration on date");
            return self.anchored_span(&caps, today, 3, 4, 5, 1, 2);
        }
        if let Some(caps) = self.on_date_for_duration.captures(text) {
            debug!("date pattern matched: on date for duration");
            return self.anchored_span(&caps, today, 1, 2, 3, 4, 5);
        }
        if let Some(caps) = self.duration_on_numeric.captures(text) {
            debug!("date pattern matched: duration on numeric date");
            let start = numeric_date(&caps, 3, 4, 5)?;
            let days = captured_duration(&caps, 1, 2);
            return Some(duration_span(start, days));
        }
        if let Some(caps) = self.on_numeric_for_duration.captures(text) {
            debug!("date pattern matched: numeric date for duration");
            let start = numeric_date(&caps, 1, 2, 3)?;
            let days = captured_duration(&caps, 4, 5);
            return Some(duration_span(start, days));
        }

        if let Some(start) = self.fuzzy_date(text, today) {
            debug!(%start, "fuzzy date fallback matched");
            return Some(partial_span(start, fallback_duration));
        }
        if let Some(start) = self.seasonal_start(text, today) {
            debug!(%start, "seasonal fallback matched");
            return Some(partial_span(start, fallback_duration));
        }

        None
    }

    /// Standalone trip-duration extraction, independent of any date
    pub fn extract_duration(&self, text: &str) -> Option<i64> {
        if let Some(caps) = self.duration.captures(text) {
            let value = word_to_number(caps.get(1).map_or("", |m| m.as_str()));
            let unit = caps.get(2).map_or("", |m| m.as_str());
            return Some(unit_to_days(value, unit));
        }

        // Unit mentioned without a number
        let lower = text.to_lowercase();
        if lower.contains("week") {
            Some(7)
        } else if lower.contains("month") {
            Some(30)
        } else if lower.contains("day") || lower.contains("night") {
            Some(1)
        } else {
            None
        }
    }

    /// First season keyword in the text, mapped to its fixed date in the
    /// reference year
    pub fn seasonal_start(&self, text: &str, today: NaiveDate) -> Option<NaiveDate> {
        let caps = self.season.captures(text)?;
        let name = caps.get(1)?.as_str().to_lowercase();
        let (month, day) = self.season_dates.get(name.as_str())?;
        NaiveDate::from_ymd_opt(today.year(), *month, *day)
    }

    /// Generic single-date scan: numeric, then day-month, then month-day.
    /// Iterates candidates because arbitrary words can sit where a month name
    /// is expected.
    fn fuzzy_date(&self, text: &str, today: NaiveDate) -> Option<NaiveDate> {
        for caps in self.fuzzy_numeric.captures_iter(text) {
            if let Some(date) = numeric_date(&caps, 1, 2, 3) {
                return Some(date);
            }
        }
        for caps in self.fuzzy_day_month.captures_iter(text) {
            if let Some(date) = self.named_date(&caps, today, 1, 2, 3) {
                return Some(date);
            }
        }
        for caps in self.fuzzy_month_day.captures_iter(text) {
            if let Some(date) = self.named_date(&caps, today, 2, 1, 3) {
                return Some(date);
            }
        }
        None
    }

    /// Day + month-name + optional year from the given capture groups
    fn named_date(
        &self,
        caps: &Captures<'_>,
        today: NaiveDate,
        day_idx: usize,
        month_idx: usize,
        year_idx: usize,
    ) -> Option<NaiveDate> {
        let day: u32 = caps.get(day_idx)?.as_str().parse().ok()?;
        let month = month_number(caps.get(month_idx)?.as_str())?;
        let year = caps.get(year_idx).and_then(|m| m.as_str().parse().ok());
        resolve_date(day, month, year, today)
    }

    /// Explicit start/end range; both endpoints count toward the duration
    #[allow(clippy::too_many_arguments)]
    fn explicit_range_span(
        &self,
        caps: &Captures<'_>,
        today: NaiveDate,
        start_day: usize,
        end_day: usize,
        start_month: usize,
        end_month: usize,
        start_year: usize,
        end_year: usize,
    ) -> Option<DateSpan> {
        let start = self.named_date(caps, today, start_day, start_month, start_year)?;
        // End month/year fall back to the start's when absent
        let end_day_num: u32 = caps.get(end_day)?.as_str().parse().ok()?;
        let end_month_num = caps
            .get(end_month)
            .and_then(|m| month_number(m.as_str()))
            .or_else(|| caps.get(start_month).and_then(|m| month_number(m.as_str())))?;
        let end_year_num = caps
            .get(end_year)
            .and_then(|m| m.as_str().parse().ok())
            .or_else(|| caps.get(start_year).and_then(|m| m.as_str().parse().ok()));
        let end = resolve_date(end_day_num, end_month_num, end_year_num, today)?;
        Some(range_span(start, end))
    }

    /// Start date + captured duration
    fn anchored_span(
        &self,
        caps: &Captures<'_>,
        today: NaiveDate,
        day_idx: usize,
        month_idx: usize,
        year_idx: usize,
        num_idx: usize,
        unit_idx: usize,
    ) -> Option<DateSpan> {
        let start = self.named_date(caps, today, day_idx, month_idx, year_idx)?;
        let days = captured_duration(caps, num_idx, unit_idx);
        Some(duration_span(start, days))
    }
}

fn range_span(start: NaiveDate, end: NaiveDate) -> DateSpan {
    DateSpan {
        start,
        end: Some(end),
        duration_days: Some((end - start).num_days() + 1),
    }
}

fn duration_span(start: NaiveDate, days: i64) -> DateSpan {
    DateSpan {
        start,
        end: Some(start + Duration::days(days - 1)),
        duration_days: Some(days),
    }
}

fn partial_span(start: NaiveDate, fallback_duration: Option<i64>) -> DateSpan {
    DateSpan {
        start,
        end: fallback_duration.map(|d| start + Duration::days(d - 1)),
        duration_days: fallback_duration,
    }
}

fn captured_duration(caps: &Captures<'_>, num_idx: usize, unit_idx: usize) -> i64 {
    let value = word_to_number(caps.get(num_idx).map_or("", |m| m.as_str()));
    let unit = caps.get(unit_idx).map_or("", |m| m.as_str());
    unit_to_days(value, unit)
}

fn numeric_date(caps: &Captures<'_>, day_idx: usize, month_idx: usize, year_idx: usize) -> Option<NaiveDate> {
    let day: u32 = caps.get(day_idx)?.as_str().parse().ok()?;
    let month: u32 = caps.get(month_idx)?.as_str().parse().ok()?;
    let year: i32 = caps.get(year_idx)?.as_str().parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Resolve a day/month with the year defaulted to the reference year and
/// bumped forward when the result would already have passed
fn resolve_date(day: u32, month: u32, year: Option<i32>, today: NaiveDate) -> Option<NaiveDate> {
    match year {
        Some(y) => NaiveDate::from_ymd_opt(y, month, day),
        None => {
            let date = NaiveDate::from_ymd_opt(today.year(), month, day)?;
            if date < today {
                NaiveDate::from_ymd_opt(today.year() + 1, month, day)
            } else {
                Some(date)
            }
        }
    }
}

pub(crate) fn month_number(name: &str) -> Option<u32> {
    let month = match name.to_lowercase().as_str() {
        "jan" | "january" => 1,
        "feb" | "february" => 2,
        "mar" | "march" => 3,
        "apr" | "april" => 4,
        "may" => 5,
        "jun" | "june" => 6,
        "jul" | "july" => 7,
        "aug" | "august" => 8,
        "sep" | "sept" | "september" => 9,
        "oct" | "october" => 10,
        "nov" | "november" => 11,
        "dec" | "december" => 12,
        _ => return None,
    };
    Some(month)
}

/// Written numbers up to ten; "a"/"an" count as one
pub(crate) fn word_to_number(text: &str) -> i64 {
    match text.to_lowercase().as_str() {
        "a" | "an" | "one" => 1,
        "two" => 2,
        "three" => 3,
        "four" => 4,
        "five" => 5,
        "six" => 6,
        "seven" => 7,
        "eight" => 8,
        "nine" => 9,
        "ten" => 10,
        other => other.parse().unwrap_or(1),
    }
}

fn unit_to_days(value: i64, unit: &str) -> i64 {
    let unit = unit.to_lowercase();
    if unit.contains("week") {
        value * 7
    } else if unit.contains("month") {
        value * 30
    } else {
        value
    }
}
