use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One entry of the provider's condition list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Condition {
    /// Short machine category, e.g. "Clear", "Clouds", "Rain", "Snow".
    pub category: String,
    /// Human-readable description, e.g. "scattered clouds".
    pub description: String,
    /// Provider icon identifier, e.g. "04d".
    pub icon: String,
}

impl Condition {
    /// URL of the provider-hosted icon image for this condition.
    pub fn icon_url(&self) -> String {
        format!("https://openweathermap.org/img/wn/{}@2x.png", self.icon)
    }
}

/// Immutable snapshot of one successful lookup.
///
/// Created fresh on every fetch, never mutated, replaced wholesale by the
/// next fetch or discarded on error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherRecord {
    pub city: String,
    pub country: String,
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub humidity_pct: u8,
    pub pressure_hpa: f64,
    pub wind_speed_mps: f64,
    /// Epoch seconds, as reported by the provider.
    pub sunrise: i64,
    /// Epoch seconds, as reported by the provider.
    pub sunset: i64,
    /// One or more entries; only the first drives display accents.
    pub conditions: Vec<Condition>,
}

impl WeatherRecord {
    pub fn first_condition(&self) -> Option<&Condition> {
        self.conditions.first()
    }

    pub fn sunrise_utc(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.sunrise, 0)
    }

    pub fn sunset_utc(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.sunset, 0)
    }
}
