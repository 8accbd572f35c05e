use anyhow::{Context, Result};
use serde::Deserialize;
use std::time::Duration;

use crate::classifier::IconStyleTheme;
use crate::constants::{DEFAULT_API_URL, DEFAULT_TIMEOUT_SECS};
use crate::pipeline::{MinimumSlotPolicy, Pipeline};

/// Widget configuration
#[derive(Debug, Clone, Deserialize)]
pub struct WidgetConfig {
    /// Forecast endpoint (default: the Kaohsiung forecast API)
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// HTTP timeout in seconds (default: 10)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    #[serde(default)]
    pub theme: IconStyleTheme,

    #[serde(default)]
    pub slot_policy: MinimumSlotPolicy,

    /// Show the payload's update time above the forecast (default: true)
    #[serde(default = "default_show_update_notice")]
    pub show_update_notice: bool,
}

fn default_endpoint() -> String {
    DEFAULT_API_URL.to_string()
}

const fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

const fn default_show_update_notice() -> bool {
    true
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout_secs: default_timeout(),
            theme: IconStyleTheme::default(),
            slot_policy: MinimumSlotPolicy::default(),
            show_update_notice: default_show_update_notice(),
        }
    }
}

impl WidgetConfig {
    /// Defaults overlaid with `FORECAST_WIDGET_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(endpoint) = lookup("FORECAST_WIDGET_URL") {
            config.endpoint = endpoint;
        }
        if let Some(timeout) = lookup("FORECAST_WIDGET_TIMEOUT_SECS") {
            config.timeout_secs = timeout
                .trim()
                .parse()
                .with_context(|| format!("Invalid FORECAST_WIDGET_TIMEOUT_SECS: {}", timeout))?;
        }
        if let Some(theme) = lookup("FORECAST_WIDGET_THEME") {
            config.theme = IconStyleTheme::from_name(&theme)
                .with_context(|| format!("Unknown FORECAST_WIDGET_THEME: {}", theme))?;
        }
        if let Some(slots) = lookup("FORECAST_WIDGET_SLOTS") {
            config.slot_policy = match slots.trim() {
                "" | "all" => MinimumSlotPolicy::All,
                "compact" => MinimumSlotPolicy::compact(),
                count => MinimumSlotPolicy::FirstN {
                    count: count
                        .parse()
                        .with_context(|| format!("Invalid FORECAST_WIDGET_SLOTS: {}", slots))?,
                },
            };
        }
        if let Some(flag) = lookup("FORECAST_WIDGET_UPDATE_NOTICE") {
            config.show_update_notice = match flag.trim().to_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" => false,
                _ => anyhow::bail!("Invalid FORECAST_WIDGET_UPDATE_NOTICE: {}", flag),
            };
        }

        Ok(config)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn pipeline(&self) -> Pipeline {
        Pipeline::new(self.endpoint.clone())
            .with_policy(self.slot_policy)
            .with_update_notice(self.show_update_notice)
    }
}
