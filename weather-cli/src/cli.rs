use std::{fmt, sync::Arc};

use anyhow::{Context, anyhow};
use clap::{Parser, Subcommand};
use inquire::{Password, PasswordDisplayMode, Select, Text};
use tracing::debug;
use weather_core::{
    Config, ForecastTask, QueryCoordinator, display::submit_label, provider_from_config,
};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "City weather: current conditions and 5-day forecast")]
pub struct Cli {
    /// Log query progress to stderr (RUST_LOG takes precedence).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeatherMap API key.
    Configure,

    /// Show weather for one city and exit.
    Show {
        /// City name, e.g. "Pune" or "New Delhi".
        city: String,
    },

    /// Pick or type cities interactively (default).
    Interactive,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command.unwrap_or(Command::Interactive) {
            Command::Configure => configure(),
            Command::Show { city } => show(&city).await,
            Command::Interactive => interactive().await,
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("OpenWeatherMap API key:")
        .without_confirmation()
        .with_display_mode(PasswordDisplayMode::Masked)
        .prompt()
        .context("Failed to read API key")?;

    config.set_api_key(api_key.trim().to_string());
    config.save()?;

    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}

fn coordinator(config: &Config) -> anyhow::Result<QueryCoordinator> {
    let provider = provider_from_config(config)?;
    debug!(base_url = provider.base_url(), "Using OpenWeatherMap provider");
    Ok(QueryCoordinator::new(Arc::new(provider)))
}

/// Print the primary result, then the forecast strip once it settles.
async fn report(coord: &QueryCoordinator, task: Option<ForecastTask>) {
    print!("{}", render::primary(&coord.snapshot().await));

    if let Some(task) = task {
        task.settled().await;
        if let Some(strip) = render::forecast_strip(&coord.snapshot().await.forecast) {
            println!();
            print!("{strip}");
        }
    }
}

async fn show(city: &str) -> anyhow::Result<()> {
    let config = Config::load()?;
    let coord = coordinator(&config)?;

    eprintln!("{}", submit_label(true));
    let task = coord.submit_query(city).await;

    if let Some(err) = coord.snapshot().await.query.error() {
        return Err(anyhow!(err.to_string()));
    }
    report(&coord, task).await;

    Ok(())
}

/// One entry of the city selector.
#[derive(Debug, Clone, PartialEq)]
enum Choice {
    Placeholder,
    City(String),
    Type,
    Quit,
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Choice::Placeholder => f.write_str("📍 Select City"),
            Choice::City(name) => f.write_str(name),
            Choice::Type => f.write_str("✏ Or type city name"),
            Choice::Quit => f.write_str("Quit"),
        }
    }
}

fn choices(cities: &[String]) -> Vec<Choice> {
    let mut out = vec![Choice::Placeholder];
    out.extend(cities.iter().cloned().map(Choice::City));
    out.push(Choice::Type);
    out.push(Choice::Quit);
    out
}

async fn interactive() -> anyhow::Result<()> {
    let config = Config::load()?;
    let coord = coordinator(&config)?;
    let cities = config.cities();

    loop {
        let picked = Select::new("City:", choices(&cities))
            .with_page_size(10)
            .prompt_skippable()?;

        let task = match picked {
            None | Some(Choice::Quit) => break,
            Some(Choice::Placeholder) => {
                coord.select_city(None).await;
                continue;
            }
            Some(Choice::City(city)) => {
                eprintln!("{}", submit_label(true));
                coord.select_city(Some(&city)).await
            }
            Some(Choice::Type) => {
                let typed = coord.snapshot().await.typed;
                let Some(text) = Text::new("City name:")
                    .with_initial_value(&typed)
                    .with_help_message(&format!("Enter to {}", submit_label(false)))
                    .prompt_skippable()?
                else {
                    continue;
                };

                coord.set_typed(&text).await;
                eprintln!("{}", submit_label(true));
                coord.submit_typed().await
            }
        };

        report(&coord, task).await;
        println!();
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selector_starts_with_placeholder_and_ends_with_actions() {
        let list = choices(&["Delhi".to_string(), "Goa".to_string()]);

        assert_eq!(list.first(), Some(&Choice::Placeholder));
        assert_eq!(list[1], Choice::City("Delhi".into()));
        assert_eq!(list[list.len() - 2], Choice::Type);
        assert_eq!(list.last(), Some(&Choice::Quit));
        assert_eq!(Choice::Placeholder.to_string(), "📍 Select City");
    }

    #[test]
    fn no_subcommand_means_interactive() {
        let cli = Cli::try_parse_from(["weather"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn show_takes_city_with_spaces() {
        let cli = Cli::try_parse_from(["weather", "-v", "show", "New Delhi"]).unwrap();
        assert!(cli.verbose);
        match cli.command {
            Some(Command::Show { city }) => assert_eq!(city, "New Delhi"),
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
