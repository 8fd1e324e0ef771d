//! Core library for the `skycheck` CLI.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The HTTP client for the weather provider
//! - Session state: query lifecycle, search history, favorites
//!
//! It is used by `skycheck-cli`, but can also be reused by other binaries or services.

pub mod client;
pub mod config;
pub mod error;
pub mod model;
pub mod session;

pub use client::WeatherClient;
pub use config::Config;
pub use error::WeatherError;
pub use model::{Condition, WeatherRecord};
pub use session::{
    BackgroundClass, FETCH_ERROR_MESSAGE, Favorites, QueryState, SearchHistory, SessionState,
    VALIDATION_MESSAGE, background_class_for,
};
