use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    COUNTDOWN_START, COUNTDOWN_TICK_MS, DEFAULT_LAT, DEFAULT_LNG, DEFAULT_LOCATION,
    RECENT_REPORTS_ON_HOME, REPORT_ID_YEAR, SPLASH_DELAY_MS,
};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{field} must be > 0")]
    Zero { field: &'static str },

    #[error("report_year {0} is not a four-digit year")]
    InvalidYear(u16),

    #[error("default coordinates out of range: lat={lat}, lng={lng}")]
    InvalidCoordinates { lat: f64, lng: f64 },
}

/// Tunables for the controller. Travels inside the `Model`, so a restored
/// snapshot keeps the delays and id format it was created with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub splash_delay_ms: u64,
    pub countdown_start: u8,
    pub countdown_tick_ms: u64,
    pub report_year: u16,
    pub default_location: String,
    pub default_lat: f64,
    pub default_lng: f64,
    pub recent_reports_on_home: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            splash_delay_ms: SPLASH_DELAY_MS,
            countdown_start: COUNTDOWN_START,
            countdown_tick_ms: COUNTDOWN_TICK_MS,
            report_year: REPORT_ID_YEAR,
            default_location: DEFAULT_LOCATION.into(),
            default_lat: DEFAULT_LAT,
            default_lng: DEFAULT_LNG,
            recent_reports_on_home: RECENT_REPORTS_ON_HOME,
        }
    }
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.splash_delay_ms == 0 {
            return Err(ConfigError::Zero {
                field: "splash_delay_ms",
            });
        }
        if self.countdown_start == 0 {
            return Err(ConfigError::Zero {
                field: "countdown_start",
            });
        }
        if self.countdown_tick_ms == 0 {
            return Err(ConfigError::Zero {
                field: "countdown_tick_ms",
            });
        }
        if !(1000..=9999).contains(&self.report_year) {
            return Err(ConfigError::InvalidYear(self.report_year));
        }
        if !self.default_lat.is_finite()
            || !self.default_lng.is_finite()
            || !(-90.0..=90.0).contains(&self.default_lat)
            || !(-180.0..=180.0).contains(&self.default_lng)
        {
            return Err(ConfigError::InvalidCoordinates {
                lat: self.default_lat,
                lng: self.default_lng,
            });
        }
        Ok(())
    }
}
