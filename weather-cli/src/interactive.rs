use inquire::{Password, PasswordDisplayMode, Select, Text};
use weather_core::{Credential, QueryInput, Session, WeatherError};

use crate::output;

const SHOW_REPORT: &str = "Previous Weather Report";
const HIDE_REPORT: &str = "Hide Previous Weather Report";
const NEW_SEARCH: &str = "Search another city";
const QUIT: &str = "Quit";

/// Prompt loop: search, then optionally show/hide the previous week, repeat.
///
/// Esc on any prompt ends the session.
pub async fn run(mut session: Session) -> anyhow::Result<()> {
    if session.credential().is_empty() {
        ask_for_key(&mut session)?;
    }

    let mut input = QueryInput::default();

    loop {
        let Some(text) = Text::new("City:")
            .with_placeholder("Search city name...")
            .prompt_skippable()?
        else {
            return Ok(());
        };

        input.set_text(text);
        let Some(city) = input.submit(session.is_busy()) else {
            println!("{}", output::EMPTY_STATE);
            continue;
        };

        println!("{}", output::LOADING);
        let snapshot = match session.search(&city).await {
            None => continue,
            Some(Ok(snapshot)) => snapshot,
            Some(Err(err)) => {
                eprintln!("{}", output::render_error(&err));
                if matches!(err, WeatherError::MissingCredential | WeatherError::InvalidCredential) {
                    ask_for_key(&mut session)?;
                }
                continue;
            }
        };

        println!("{}", output::render_snapshot(&snapshot));

        loop {
            let toggle = if session.history().is_visible() { HIDE_REPORT } else { SHOW_REPORT };
            let Some(choice) = Select::new("Next:", vec![toggle, NEW_SEARCH, QUIT])
                .prompt_skippable()?
            else {
                return Ok(());
            };

            match choice {
                SHOW_REPORT | HIDE_REPORT => match session.previous_report().await {
                    Some(Ok(_)) => {
                        if let Some(days) = session.history().visible_days() {
                            println!("{}", output::render_history(&snapshot.location_name, &days));
                        }
                    }
                    Some(Err(err)) => eprintln!("{}", output::render_error(&err)),
                    None => break,
                },
                NEW_SEARCH => break,
                _ => return Ok(()),
            }
        }
    }
}

fn ask_for_key(session: &mut Session) -> anyhow::Result<()> {
    let key = Password::new("OpenWeatherMap API key:")
        .without_confirmation()
        .with_display_mode(PasswordDisplayMode::Masked)
        .with_help_message("Get a free key at https://openweathermap.org/api")
        .prompt_skippable()?;

    if let Some(key) = key {
        session.set_credential(Credential::new(key));
    }
    Ok(())
}
