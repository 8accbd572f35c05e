use chrono::{NaiveDateTime, Timelike};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Iconographic category of a weather description
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IconCategory {
    Clear,
    Cloudy,
    Rain,
    Thunder,
    Snow,
    Fog,
    Unknown,
}

/// Time-of-day bucket of a forecast slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeriodLabel {
    Morning,
    Afternoon,
    Evening,
    Unknown,
}

/// Glyph set and wording used when a view model is displayed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum IconStyleTheme {
    /// Emoji icons with Traditional Chinese labels
    #[default]
    Emoji,
    /// Plain English words, no emoji
    Text,
}

// First match wins; a description may mention several conditions.
// CJK tokens match anywhere, ASCII tokens only as whole words.
const ICON_RULES: &[(IconCategory, &[&str])] = &[
    (IconCategory::Clear, &["晴", "clear", "sunny"]),
    (IconCategory::Cloudy, &["多雲", "陰", "cloud", "clouds", "cloudy", "overcast"]),
    (
        IconCategory::Rain,
        &["雨", "rain", "rainy", "shower", "showers", "drizzle"],
    ),
    (
        IconCategory::Thunder,
        &["雷", "thunder", "thunderstorm", "thunderstorms"],
    ),
    (IconCategory::Snow, &["雪", "snow", "snowy"]),
    (IconCategory::Fog, &["霧", "fog", "foggy", "mist", "misty"]),
];

const TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y/%m/%d %H:%M:%S",
];

/// Maps a free-text weather description to an icon category
pub fn classify_icon(weather: &str) -> IconCategory {
    let lowered = weather.to_lowercase();
    let words: Vec<&str> = lowered
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|word| !word.is_empty())
        .collect();

    let matches = |token: &&str| {
        if token.is_ascii() {
            words.contains(token)
        } else {
            lowered.contains(*token)
        }
    };

    ICON_RULES
        .iter()
        .find(|(_, tokens)| tokens.iter().any(matches))
        .map(|(category, _)| *category)
        .unwrap_or(IconCategory::Unknown)
}

/// Buckets a `YYYY-MM-DD HH:MM:SS` timestamp by its hour of day.
///
/// Malformed input yields [`PeriodLabel::Unknown`] rather than an error.
pub fn classify_period(start_time: &str) -> PeriodLabel {
    match parse_hour(start_time) {
        Some(6..=11) => PeriodLabel::Morning,
        Some(12..=17) => PeriodLabel::Afternoon,
        Some(18..=23) | Some(0..=5) => PeriodLabel::Evening,
        _ => PeriodLabel::Unknown,
    }
}

fn parse_hour(start_time: &str) -> Option<u32> {
    let trimmed = start_time.trim();
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
        .map(|parsed| parsed.hour())
}

impl IconStyleTheme {
    pub fn icon(&self, category: IconCategory) -> &'static str {
        match self {
            Self::Emoji => match category {
                IconCategory::Clear => "☀️",
                IconCategory::Cloudy => "☁️",
                IconCategory::Rain => "🌧️",
                IconCategory::Thunder => "⛈️",
                IconCategory::Snow => "❄️",
                IconCategory::Fog => "🌫️",
                IconCategory::Unknown => "❓",
            },
            Self::Text => match category {
                IconCategory::Clear => "Sunny",
                IconCategory::Cloudy => "Cloudy",
                IconCategory::Rain => "Rain",
                IconCategory::Thunder => "Thunder",
                IconCategory::Snow => "Snow",
                IconCategory::Fog => "Fog",
                IconCategory::Unknown => "?",
            },
        }
    }

    pub fn period(&self, label: PeriodLabel) -> &'static str {
        match self {
            Self::Emoji => match label {
                PeriodLabel::Morning => "🌅 早晨",
                PeriodLabel::Afternoon => "🏙️ 下午",
                PeriodLabel::Evening => "🌃 晚上",
                PeriodLabel::Unknown => "時段",
            },
            Self::Text => match label {
                PeriodLabel::Morning => "Morning",
                PeriodLabel::Afternoon => "Afternoon",
                PeriodLabel::Evening => "Evening",
                PeriodLabel::Unknown => "Period",
            },
        }
    }

    /// Parses a theme name as used in environment configuration
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "emoji" => Some(Self::Emoji),
            "text" => Some(Self::Text),
            _ => None,
        }
    }
}
