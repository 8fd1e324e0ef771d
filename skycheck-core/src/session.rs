//! In-memory session state: the query lifecycle, recent-search history,
//! favorites, and the condition-keyed background class.
//!
//! Nothing here is persisted; all lifetimes are bounded by the running
//! session.

use tracing::warn;

use crate::{client::WeatherClient, model::WeatherRecord};

/// Shown when a lookup is submitted with a blank city name.
pub const VALIDATION_MESSAGE: &str = "Please enter a valid city name.";

/// Shown when a lookup fails, whatever the underlying cause.
pub const FETCH_ERROR_MESSAGE: &str = "City not found or API error.";

/// Lifecycle of the current query.
///
/// Exactly one variant holds at a time, so combinations like "pending with a
/// stale result" are unrepresentable.
#[derive(Debug, Clone, Default)]
pub enum QueryState {
    #[default]
    Idle,
    Pending,
    Succeeded(WeatherRecord),
    Failed(String),
}

impl QueryState {
    pub fn is_pending(&self) -> bool {
        matches!(self, QueryState::Pending)
    }

    pub fn record(&self) -> Option<&WeatherRecord> {
        match self {
            QueryState::Succeeded(record) => Some(record),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            QueryState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// Display accent derived from the leading condition category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackgroundClass {
    Sunny,
    Cloudy,
    Rainy,
    Snowy,
    Default,
}

impl BackgroundClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            BackgroundClass::Sunny => "sunny",
            BackgroundClass::Cloudy => "cloudy",
            BackgroundClass::Rainy => "rainy",
            BackgroundClass::Snowy => "snowy",
            BackgroundClass::Default => "default",
        }
    }
}

/// Background class for a (possibly absent) record.
///
/// Only the first condition entry is consulted, even when several are
/// present; the category match is case-insensitive.
pub fn background_class_for(record: Option<&WeatherRecord>) -> BackgroundClass {
    let Some(condition) = record.and_then(WeatherRecord::first_condition) else {
        return BackgroundClass::Default;
    };

    match condition.category.to_lowercase().as_str() {
        "clear" => BackgroundClass::Sunny,
        "clouds" => BackgroundClass::Cloudy,
        "rain" => BackgroundClass::Rainy,
        "snow" => BackgroundClass::Snowy,
        _ => BackgroundClass::Default,
    }
}

/// Most-recent-first list of searched city names.
///
/// Case-insensitively deduplicated: re-searching a city moves it to the
/// front under its newest spelling instead of duplicating it. Capped at
/// [`SearchHistory::CAP`] entries, oldest evicted first.
#[derive(Debug, Clone, Default)]
pub struct SearchHistory {
    entries: Vec<String>,
}

impl SearchHistory {
    pub const CAP: usize = 5;

    /// Record a successfully searched city.
    pub fn record(&mut self, city: &str) {
        let lowered = city.to_lowercase();
        self.entries.retain(|entry| entry.to_lowercase() != lowered);
        self.entries.insert(0, city.to_string());
        self.entries.truncate(Self::CAP);
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// City names the user chose to keep, in insertion order.
///
/// Names are compared exactly as the provider returned them: "paris" and
/// "Paris" are distinct entries here even though history folds them.
#[derive(Debug, Clone, Default)]
pub struct Favorites {
    names: Vec<String>,
}

impl Favorites {
    /// Append a name unless already present. Returns true if newly added.
    pub fn add(&mut self, name: &str) -> bool {
        if self.names.iter().any(|existing| existing == name) {
            return false;
        }
        self.names.push(name.to_string());
        true
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// One user session: the current query plus its derived lists.
///
/// Owned by a single logical flow; `submit_query` takes `&mut self`, so
/// overlapping submissions cannot be expressed from safe code.
#[derive(Debug)]
pub struct SessionState {
    client: WeatherClient,
    query: QueryState,
    history: SearchHistory,
    favorites: Favorites,
}

impl SessionState {
    pub fn new(client: WeatherClient) -> Self {
        Self {
            client,
            query: QueryState::Idle,
            history: SearchHistory::default(),
            favorites: Favorites::default(),
        }
    }

    pub fn query(&self) -> &QueryState {
        &self.query
    }

    pub fn history(&self) -> &SearchHistory {
        &self.history
    }

    pub fn favorites(&self) -> &Favorites {
        &self.favorites
    }

    /// Background class for whatever is currently displayed.
    pub fn background_class(&self) -> BackgroundClass {
        background_class_for(self.query.record())
    }

    /// Validate the city name, fetch, and settle the query state.
    ///
    /// Blank input fails locally without touching the network. A submission
    /// arriving while a previous one is still pending is ignored rather than
    /// raced. `Pending` is entered before the fetch and replaced once it
    /// settles, on the success and the failure path alike.
    pub async fn submit_query(&mut self, city: &str) {
        let city = city.trim();
        if city.is_empty() {
            self.query = QueryState::Failed(VALIDATION_MESSAGE.to_string());
            return;
        }
        if self.query.is_pending() {
            return;
        }

        self.query = QueryState::Pending;
        self.query = match self.client.fetch_weather(city).await {
            Ok(record) => {
                self.history.record(city);
                QueryState::Succeeded(record)
            }
            Err(err) => {
                warn!(city, error = %err, "weather lookup failed");
                QueryState::Failed(FETCH_ERROR_MESSAGE.to_string())
            }
        };
    }

    /// Save the displayed location under favorites. No-op without a result;
    /// returns true if the name was newly added.
    pub fn add_current_to_favorites(&mut self) -> bool {
        match self.query.record() {
            Some(record) => self.favorites.add(&record.city),
            None => false,
        }
    }

    /// Replay a saved city. Always re-fetches; a stale favorite reflects
    /// updated weather rather than a cached record.
    pub async fn select_favorite(&mut self, name: &str) {
        self.submit_query(name).await;
    }
}
