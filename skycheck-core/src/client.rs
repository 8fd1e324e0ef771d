use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::{
    config::Config,
    error::WeatherError,
    model::{Condition, WeatherRecord},
};

const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org";

/// HTTP client for the provider's current-weather-by-city endpoint.
///
/// One network round trip per [`WeatherClient::fetch_weather`] call. No
/// retries, no caching; timeouts are whatever the transport defaults to.
#[derive(Debug, Clone)]
pub struct WeatherClient {
    api_key: String,
    http: Client,
    base_url: String,
}

impl WeatherClient {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            http: Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Build a client from config. Fails up front when no key is available,
    /// rather than surfacing a provider 401 on the first lookup.
    pub fn from_config(config: &Config) -> Result<Self, WeatherError> {
        let api_key = config.api_key().ok_or(WeatherError::MissingApiKey)?;
        Ok(Self::new(api_key))
    }

    /// Point the client at a different host. Tests use this to target a mock
    /// server.
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            api_key,
            http: Client::new(),
            base_url,
        }
    }

    /// Fetch current weather for a city, in metric units.
    ///
    /// The city name is passed verbatim as the `q` query parameter; the
    /// caller is responsible for rejecting blank input before calling this.
    pub async fn fetch_weather(&self, city: &str) -> Result<WeatherRecord, WeatherError> {
        let url = format!("{}/data/2.5/weather", self.base_url);

        debug!(city, "requesting current weather");

        let res = self
            .http
            .get(&url)
            .query(&[
                ("q", city),
                ("units", "metric"),
                ("appid", self.api_key.as_str()),
            ])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            warn!(city, %status, "provider rejected current weather request");
            return Err(WeatherError::Status {
                status,
                body: truncate_body(&body),
            });
        }

        let parsed: OwmCurrent = serde_json::from_str(&body)?;
        Ok(parsed.into_record())
    }
}

#[derive(Debug, Deserialize)]
struct OwmMain {
    temp: f64,
    feels_like: f64,
    humidity: u8,
    pressure: f64,
}

#[derive(Debug, Deserialize)]
struct OwmWeather {
    main: String,
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwmWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwmSys {
    country: String,
    sunrise: i64,
    sunset: i64,
}

#[derive(Debug, Deserialize)]
struct OwmCurrent {
    name: String,
    sys: OwmSys,
    main: OwmMain,
    weather: Vec<OwmWeather>,
    wind: OwmWind,
}

impl OwmCurrent {
    fn into_record(self) -> WeatherRecord {
        WeatherRecord {
            city: self.name,
            country: self.sys.country,
            temperature_c: self.main.temp,
            feels_like_c: self.main.feels_like,
            humidity_pct: self.main.humidity,
            pressure_hpa: self.main.pressure,
            wind_speed_mps: self.wind.speed,
            sunrise: self.sys.sunrise,
            sunset: self.sys.sunset,
            conditions: self
                .weather
                .into_iter()
                .map(|w| Condition {
                    category: w.main,
                    description: w.description,
                    icon: w.icon,
                })
                .collect(),
        }
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        format!("{}...", &body[..MAX])
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn current_weather_body() -> serde_json::Value {
        serde_json::json!({
            "name": "London",
            "sys": {"country": "GB", "sunrise": 1_700_000_000i64, "sunset": 1_700_030_000i64},
            "main": {"temp": 11.32, "feels_like": 10.05, "humidity": 81, "pressure": 1012},
            "weather": [{"main": "Clouds", "description": "overcast clouds", "icon": "04d"}],
            "wind": {"speed": 4.12}
        })
    }

    #[tokio::test]
    async fn fetch_weather_parses_success_body() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/data/2.5/weather"))
            .and(query_param("q", "London"))
            .and(query_param("units", "metric"))
            .and(query_param("appid", "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(current_weather_body()))
            .mount(&server)
            .await;

        let client = WeatherClient::with_base_url("test-key".to_string(), server.uri());
        let record = client.fetch_weather("London").await.expect("fetch succeeds");

        assert_eq!(record.city, "London");
        assert_eq!(record.country, "GB");
        assert_eq!(record.temperature_c, 11.32);
        assert_eq!(record.feels_like_c, 10.05);
        assert_eq!(record.humidity_pct, 81);
        assert_eq!(record.pressure_hpa, 1012.0);
        assert_eq!(record.wind_speed_mps, 4.12);
        assert_eq!(record.sunrise, 1_700_000_000);
        assert_eq!(record.sunset, 1_700_030_000);

        let condition = record.first_condition().expect("one condition entry");
        assert_eq!(condition.category, "Clouds");
        assert_eq!(condition.description, "overcast clouds");
        assert_eq!(condition.icon, "04d");
    }

    #[tokio::test]
    async fn non_success_status_maps_to_status_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/data/2.5/weather"))
            .respond_with(
                ResponseTemplate::new(404)
                    .set_body_json(serde_json::json!({"cod": "404", "message": "city not found"})),
            )
            .mount(&server)
            .await;

        let client = WeatherClient::with_base_url("test-key".to_string(), server.uri());
        let err = client.fetch_weather("Zzzznotacity").await.unwrap_err();

        assert!(matches!(
            err,
            WeatherError::Status { status, .. } if status == StatusCode::NOT_FOUND
        ));
    }

    // A 2xx body that does not decode is a distinct error, not a later
    // field-access fault.
    #[tokio::test]
    async fn malformed_success_body_maps_to_malformed_response() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/data/2.5/weather"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"name": "London"})),
            )
            .mount(&server)
            .await;

        let client = WeatherClient::with_base_url("test-key".to_string(), server.uri());
        let err = client.fetch_weather("London").await.unwrap_err();

        assert!(matches!(err, WeatherError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn connection_failure_maps_to_transport_error() {
        // Nothing listens on this port.
        let client =
            WeatherClient::with_base_url("test-key".to_string(), "http://127.0.0.1:9".to_string());
        let err = client.fetch_weather("London").await.unwrap_err();

        assert!(matches!(err, WeatherError::Transport(_)));
    }

    #[test]
    fn from_config_requires_an_api_key() {
        let cfg = Config::default();
        // Only meaningful when the env override is not set in the test
        // environment.
        if cfg.api_key().is_none() {
            let err = WeatherClient::from_config(&cfg).unwrap_err();
            assert!(matches!(err, WeatherError::MissingApiKey));
        }
    }

    #[test]
    fn long_error_bodies_are_truncated() {
        let long = "x".repeat(500);
        let truncated = truncate_body(&long);
        assert!(truncated.len() < long.len());
        assert!(truncated.ends_with("..."));
    }
}
