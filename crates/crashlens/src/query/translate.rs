//! Heuristic free-text to filter translation.
//!
//! Each detector is independent, case-insensitive, and deterministic: tables
//! are scanned in declaration order and the first hit wins, so a phrase like
//! "Brooklyn 2021 pedestrian crashes" can populate several dimensions at
//! once while ambiguous text always resolves the same way.

use crate::query::criteria::InjuryType;

/// Canonical borough names (exact dataset casing) with the text fragments
/// that select them.
const BOROUGH_SYNONYMS: &[(&str, &[&str])] = &[
    ("Brooklyn", &["brooklyn", "bk", "bklyn", "kings"]),
    ("Queens", &["queens", "qn", "qns"]),
    ("Manhattan", &["manhattan", "mhtn", "nyc", "new york city", "man"]),
    ("Bronx", &["bronx", "bx"]),
    ("Staten Island", &["staten island", "staten", "si", "staten is", "richmond"]),
];

const INJURED_WORDS: &[&str] = &["injured", "injury", "injuries", "hurt"];
const KILLED_WORDS: &[&str] = &["killed", "fatal", "fatality", "death", "dead"];
const NO_INJURY_PHRASES: &[&str] = &["no injury", "uninjured"];

/// Keyword to canonical vehicle type, most specific phrases first so that
/// "pickup truck" lands on Pick-up Truck rather than Truck. "bike" maps to
/// Motorcycle on purpose; the source data files most motorbike rows under
/// that label.
const VEHICLE_KEYWORDS: &[(&str, &str)] = &[
    ("station wagon", "Station Wagon/Sport Utility Vehicle"),
    ("sport utility", "Station Wagon/Sport Utility Vehicle"),
    ("suv", "Station Wagon/Sport Utility Vehicle"),
    ("pickup truck", "Pick-up Truck"),
    ("pickup", "Pick-up Truck"),
    ("sedan", "Sedan"),
    ("car", "Sedan"),
    ("van", "Van"),
    ("taxi", "Taxi"),
    ("motorcycle", "Motorcycle"),
    ("bike", "Motorcycle"),
    ("bus", "Bus"),
    ("truck", "Truck"),
    ("bicycle", "Bicycle"),
    ("pedestrian", "Pedestrian"),
];

/// Canonical contributing factor names with their trigger keywords.
const FACTOR_KEYWORDS: &[(&str, &[&str])] = &[
    ("Unsafe Speed", &["unsafe speed", "speeding", "speed", "too fast"]),
    (
        "Failure To Yield Right-Of-Way",
        &["failure to yield", "yield", "right of way"],
    ),
    (
        "Driver Inattention/Distraction",
        &["driver inattention", "inattention", "distraction", "distracted", "phone"],
    ),
    (
        "Following Too Closely",
        &["following too closely", "tailgating", "tailgate"],
    ),
    (
        "Backing Unsafely",
        &["backing unsafely", "backing", "reverse"],
    ),
];

/// Partial criteria extracted from free text. At most one value per
/// dimension; a dimension no detector fired for stays unset, which is not an
/// error.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedQuery {
    pub borough: Option<String>,
    pub year: Option<i32>,
    pub vehicle_type: Option<String>,
    pub contributing_factor: Option<String>,
    pub injury_type: Option<InjuryType>,
}

/// Translate free text like "Brooklyn 2021 pedestrian crashes" into a
/// best-effort [`ParsedQuery`].
pub fn translate(text: &str) -> ParsedQuery {
    let text = text.to_lowercase();
    ParsedQuery {
        borough: detect_borough(&text),
        year: detect_year(&text),
        vehicle_type: detect_vehicle_type(&text),
        contributing_factor: detect_contributing_factor(&text),
        injury_type: detect_injury_type(&text),
    }
}

fn detect_borough(text: &str) -> Option<String> {
    BOROUGH_SYNONYMS
        .iter()
        .find(|(_, synonyms)| synonyms.iter().any(|synonym| text.contains(synonym)))
        .map(|(borough, _)| (*borough).to_string())
}

/// First 4-digit number in 2000–2099, anywhere in the text.
fn detect_year(text: &str) -> Option<i32> {
    let bytes = text.as_bytes();
    for index in 0..bytes.len().saturating_sub(3) {
        let window = &bytes[index..index + 4];
        if window[0] == b'2'
            && window[1] == b'0'
            && window[2].is_ascii_digit()
            && window[3].is_ascii_digit()
        {
            let year = std::str::from_utf8(window).ok()?;
            return year.parse().ok();
        }
    }
    None
}

fn detect_vehicle_type(text: &str) -> Option<String> {
    VEHICLE_KEYWORDS
        .iter()
        .find(|(keyword, _)| text.contains(keyword))
        .map(|(_, vehicle_type)| (*vehicle_type).to_string())
}

fn detect_contributing_factor(text: &str) -> Option<String> {
    FACTOR_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|keyword| text.contains(keyword)))
        .map(|(factor, _)| (*factor).to_string())
}

/// Fixed priority: Injured beats Killed beats None, first match only.
fn detect_injury_type(text: &str) -> Option<InjuryType> {
    if INJURED_WORDS.iter().any(|word| text.contains(word)) {
        Some(InjuryType::Injured)
    } else if KILLED_WORDS.iter().any(|word| text.contains(word)) {
        Some(InjuryType::Killed)
    } else if NO_INJURY_PHRASES.iter().any(|phrase| text.contains(phrase)) {
        Some(InjuryType::None)
    } else {
        None
    }
}
