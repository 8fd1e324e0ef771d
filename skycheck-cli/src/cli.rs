use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use inquire::{Password, Select, Text};
use skycheck_core::{Config, SessionState, WeatherClient};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skycheck", version, about = "City weather lookup")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the weather provider API key.
    Configure,

    /// Look up current weather for a city and exit.
    Lookup {
        /// City name, e.g. "London".
        city: String,
    },

    /// Interactive session with search history and favorites.
    Interactive,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command.unwrap_or(Command::Interactive) {
            Command::Configure => configure(),
            Command::Lookup { city } => lookup(&city).await,
            Command::Interactive => interactive().await,
        }
    }
}

fn new_session() -> Result<SessionState> {
    let config = Config::load()?;
    let client = WeatherClient::from_config(&config)?;
    Ok(SessionState::new(client))
}

fn configure() -> Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("Weather provider API key:")
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    config.set_api_key(api_key.trim().to_string());
    config.save()?;

    println!("Saved API key to {}", Config::config_file_path()?.display());
    Ok(())
}

async fn lookup(city: &str) -> Result<()> {
    let mut session = new_session()?;
    session.submit_query(city).await;

    if let Some(record) = session.query().record() {
        render::print_record(record);
        return Ok(());
    }
    if let Some(message) = session.query().error() {
        anyhow::bail!("{message}");
    }
    Ok(())
}

const SEARCH: &str = "Search a city";
const SAVE_FAVORITE: &str = "Save to favorites";
const HISTORY: &str = "Recent searches";
const FAVORITES: &str = "Favorites";
const QUIT: &str = "Quit";

async fn interactive() -> Result<()> {
    let mut session = new_session()?;

    println!("skycheck — current weather by city name.");

    loop {
        let mut options = vec![SEARCH];
        if session.query().record().is_some() {
            options.push(SAVE_FAVORITE);
        }
        if !session.history().is_empty() {
            options.push(HISTORY);
        }
        if !session.favorites().is_empty() {
            options.push(FAVORITES);
        }
        options.push(QUIT);

        let choice = Select::new("What next?", options).prompt()?;
        match choice {
            SEARCH => {
                let city = Text::new("City name:").prompt()?;
                session.submit_query(&city).await;
                render::print_query(session.query());
            }
            SAVE_FAVORITE => {
                if session.add_current_to_favorites() {
                    println!("Saved.");
                } else {
                    println!("Already in favorites.");
                }
            }
            HISTORY => {
                let entries = session.history().entries().to_vec();
                let city = Select::new("Recent searches:", entries).prompt()?;
                session.submit_query(&city).await;
                render::print_query(session.query());
            }
            FAVORITES => {
                let names = session.favorites().names().to_vec();
                let name = Select::new("Favorites:", names).prompt()?;
                session.select_favorite(&name).await;
                render::print_query(session.query());
            }
            _ => break,
        }
    }

    Ok(())
}
