use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use inquire::{Password, PasswordDisplayMode, Text};
use weatherboard_core::{Config, Dashboard, fetch_cycle, source_from_config};

use crate::{interactive, render};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weatherboard", version, about = "Terminal weather dashboard")]
pub struct Cli {
    /// Increase log verbosity (-v, -vv, -vvv). RUST_LOG takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key and default city.
    Configure,

    /// Print the board for a city once and exit.
    Show {
        /// City name; defaults to the configured city.
        city: Option<String>,

        /// Print the board as JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// Interactive dashboard: type a city and press enter to search.
    Board {
        /// City shown first; defaults to the configured city.
        city: Option<String>,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { city, json } => show(city, json).await,
            Command::Board { city } => {
                let config = Config::load()?;
                let city = city.unwrap_or_else(|| config.default_city.clone());
                interactive::run(&config, city).await
            }
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("OpenWeather API key:")
        .without_confirmation()
        .with_display_mode(PasswordDisplayMode::Masked)
        .prompt()
        .context("Failed to read API key")?;

    let default_city = Text::new("Default city:")
        .with_default(&config.default_city)
        .prompt()
        .context("Failed to read default city")?;

    let api_key = api_key.trim();
    if !api_key.is_empty() {
        config.api_key = Some(api_key.to_string());
    }
    let default_city = default_city.trim();
    if !default_city.is_empty() {
        config.default_city = default_city.to_string();
    }

    config.save()?;
    println!("Saved configuration to {}", Config::config_file_path()?.display());

    Ok(())
}

async fn show(city: Option<String>, json: bool) -> anyhow::Result<()> {
    let config = Config::load()?;
    let source = source_from_config(&config)?;

    let mut app = Dashboard::new(city.unwrap_or_else(|| config.default_city.clone()));
    let request = app.request_refresh();
    let result = fetch_cycle(&source, &request.city).await;
    app.apply(&request, result);

    let Some(board) = app.board() else {
        bail!("{}", app.error().unwrap_or(weatherboard_core::LOOKUP_FAILED_MESSAGE));
    };

    if json {
        println!("{}", serde_json::to_string_pretty(board)?);
    } else {
        print!("{}", render::render_board(board));
    }

    Ok(())
}
