use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::classifier::{classify_icon, classify_period, IconCategory, IconStyleTheme, PeriodLabel};
use crate::constants::TEMPERATURE_UNIT_SUFFIX;

// ============================================================================
// Forecast API Models
// ============================================================================

/// Top-level response envelope. `data` is decoded only once `success` is known.
#[derive(Debug, Deserialize)]
pub struct ApiEnvelope {
    pub success: Option<bool>,
    pub data: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
pub struct ForecastData {
    pub city: String,
    #[serde(rename = "updateTime")]
    pub update_time: Option<String>,
    /// Absent and `null` both mean no slots
    #[serde(default)]
    pub forecasts: Option<Vec<RawForecastSlot>>,
}

impl ForecastData {
    pub fn slots(&self) -> &[RawForecastSlot] {
        self.forecasts.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawForecastSlot {
    #[serde(rename = "startTime")]
    pub start_time: String,
    pub weather: String,
    #[serde(rename = "minTemp")]
    pub min_temp: String,
    #[serde(rename = "maxTemp")]
    pub max_temp: String,
    pub rain: String,
    pub comfort: String,
}

// ============================================================================
// View Models
// ============================================================================

/// A forecast slot with its display classification attached
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassifiedSlot {
    pub start_time: String,
    pub weather: String,
    /// Minimum temperature with the unit suffix removed
    pub min_temp: String,
    pub max_temp: String,
    pub rain: String,
    pub comfort: String,
    pub icon: IconCategory,
    pub period: PeriodLabel,
}

impl ClassifiedSlot {
    pub fn from_raw(raw: &RawForecastSlot) -> Self {
        Self {
            start_time: raw.start_time.clone(),
            weather: raw.weather.clone(),
            min_temp: raw.min_temp.replacen(TEMPERATURE_UNIT_SUFFIX, "", 1),
            max_temp: raw.max_temp.clone(),
            rain: raw.rain.clone(),
            comfort: raw.comfort.clone(),
            icon: classify_icon(&raw.weather),
            period: classify_period(&raw.start_time),
        }
    }

    /// `min~max`, e.g. `18~24°C`
    pub fn temperature_range(&self) -> String {
        format!("{}~{}", self.min_temp, self.max_temp)
    }
}

/// Everything a render sink needs to draw the widget
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewModel {
    pub city_name: String,
    pub update_notice: Option<String>,
    pub current: ClassifiedSlot,
    pub future: Vec<ClassifiedSlot>,
}

// ============================================================================
// MCP Tool Request Models
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Default, Deserialize, Serialize, JsonSchema)]
pub struct GetWidgetRequest {
    /// Rendering of the result: "text" (default) or "json"
    pub format: Option<OutputFormat>,
    /// Icon and label style: "emoji" or "text"
    pub theme: Option<IconStyleTheme>,
    /// Show only the first N forecast slots and require at least N
    pub slots: Option<usize>,
}
