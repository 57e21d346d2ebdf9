use anyhow::Context;
use clap::{ArgAction, Parser, Subcommand};
use std::{
    io::{self, Write},
    path::PathBuf,
};
use weather_core::{Config, Credential, Session};

use crate::{interactive, output};

/// Key baked in at build time, used when none is supplied at runtime.
const BUILD_TIME_API_KEY: Option<&str> = option_env!("OPENWEATHER_API_KEY");

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Real-time weather data for any city in the world")]
pub struct Cli {
    /// OpenWeatherMap API key. Held in memory only.
    #[arg(long, global = true, env = "OPENWEATHER_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Endpoint settings file; defaults to the platform config directory.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// More log output (-v debug, -vv trace).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show current weather for a city.
    Show {
        /// City name.
        city: String,

        /// Also show the previous 7 days.
        #[arg(long)]
        history: bool,

        /// Print JSON instead of the weather card.
        #[arg(long)]
        json: bool,
    },

    /// Search cities one after another, with the previous-week report on demand.
    Interactive,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let config = match &self.config {
            Some(path) => Config::load_from(path)?,
            None => Config::load()?,
        };

        let credential = Credential::first_present([
            self.api_key.clone(),
            BUILD_TIME_API_KEY.map(str::to_string),
        ]);
        tracing::debug!(?credential, ?config, "starting session");

        let session = Session::from_config(&config, credential)
            .context("Failed to set up weather session")?;

        match self.command {
            Command::Show { city, history, json } => {
                show(&session, &city, history, json, &mut io::stdout(), &mut io::stderr()).await
            }
            Command::Interactive => interactive::run(session).await,
        }
    }
}

async fn show(
    session: &Session,
    city: &str,
    with_history: bool,
    json: bool,
    out: &mut impl Write,
    err_out: &mut impl Write,
) -> anyhow::Result<()> {
    let snapshot = match session.search(city).await {
        None => {
            writeln!(out, "{}", output::EMPTY_STATE)?;
            return Ok(());
        }
        Some(result) => result?,
    };

    if !json {
        writeln!(out, "{}", output::render_snapshot(&snapshot))?;
    }

    // A history failure is reported next to the card; the lookup itself succeeded.
    let history = if with_history { session.previous_report().await } else { None };

    if json {
        let (days, history_error) = match &history {
            Some(Ok(days)) => (Some(days), None),
            Some(Err(err)) => (None, Some(err.to_string())),
            None => (None, None),
        };
        let report = serde_json::json!({
            "current": snapshot,
            "history": days,
            "history_error": history_error,
        });
        writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
        return Ok(());
    }

    match history {
        Some(Ok(days)) => {
            writeln!(out)?;
            writeln!(out, "{}", output::render_history(&snapshot.location_name, &days))?;
        }
        Some(Err(err)) => writeln!(err_out, "{}", output::render_error(&err))?,
        None => {}
    }

    Ok(())
}
