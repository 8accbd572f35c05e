/// User agent string for HTTP requests
pub const USER_AGENT: &str = "forecast-widget/0.1.0";

/// Forecast endpoint queried when no override is configured
pub const DEFAULT_API_URL: &str = "https://nutc-web-vic-peng.zeabur.app/api/weather/kaohsiung";

/// HTTP timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Window size of the compact three-slot layout
pub const COMPACT_SLOT_COUNT: usize = 3;

/// Unit suffix stripped from the minimum temperature in `min~max` ranges
pub const TEMPERATURE_UNIT_SUFFIX: &str = "°C";
