use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use inquire::{Select, Text};

use skycast_core::config::Config;
use skycast_core::model::Units;
use skycast_core::provider::{WeatherSource, source_from_config};

use crate::{app, render};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skycast", version, about = "Weather in your terminal")]
pub struct Cli {
    /// Temperature units, overriding the configured default.
    #[arg(short, long, global = true, value_enum)]
    pub units: Option<UnitsArg>,

    /// Without a subcommand, opens the interactive city view.
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum UnitsArg {
    /// Celsius
    C,
    /// Fahrenheit
    F,
}

impl From<UnitsArg> for Units {
    fn from(arg: UnitsArg) -> Self {
        match arg {
            UnitsArg::C => Units::Celsius,
            UnitsArg::F => Units::Fahrenheit,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the WeatherAPI.com key and defaults interactively.
    Configure,

    /// Print current conditions for a city and exit.
    Current {
        /// City name, "City, Country", postcode or "lat,lon".
        city: String,
    },

    /// Print the multi-day forecast for a city and exit.
    Forecast {
        city: String,

        /// Days to fetch; defaults to the configured value.
        #[arg(short, long)]
        days: Option<u8>,
    },

    /// List places matching a query.
    Search { query: String },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        let config = Config::load()?;
        let units = self.units.map_or(config.units, Units::from);
        let style = render::Style::detect();

        match self.command {
            Some(Command::Configure) => configure(config),

            Some(Command::Current { city }) => {
                let source = source_from_config(&config)?;
                let weather = source.current(&city).await?;
                print!("{}", render::current_panel(&weather, units, style));
                Ok(())
            }

            Some(Command::Forecast { city, days }) => {
                let source = source_from_config(&config)?;
                let forecast = source.forecast(&city, days.unwrap_or(config.forecast_days)).await?;
                print!("{}", render::forecast_detail(&forecast, units, style));
                Ok(())
            }

            Some(Command::Search { query }) => {
                let source = source_from_config(&config)?;
                let hits = source.search(&query).await?;
                print!("{}", render::search_results(&hits));
                Ok(())
            }

            None => {
                let source: Arc<dyn WeatherSource> = Arc::new(source_from_config(&config)?);
                app::run(source, units, config.forecast_days, config.start_city()).await
            }
        }
    }
}

fn configure(mut config: Config) -> Result<()> {
    let key = Text::new("WeatherAPI.com key:")
        .with_initial_value(config.api_key.as_deref().unwrap_or(""))
        .with_help_message("stored in the skycast config file")
        .prompt()?;

    let city = Text::new("Default city:")
        .with_initial_value(config.default_city.as_deref().unwrap_or(""))
        .with_help_message("blank keeps the built-in default (Bogota)")
        .prompt()?;

    let units = Select::new("Units:", vec![Units::Celsius, Units::Fahrenheit])
        .with_starting_cursor(match config.units {
            Units::Celsius => 0,
            Units::Fahrenheit => 1,
        })
        .prompt()?;

    config.api_key = Some(key.trim().to_string()).filter(|k| !k.is_empty());
    config.default_city = Some(city.trim().to_string()).filter(|c| !c.is_empty());
    config.units = units;
    config.save()?;

    println!("Saved to {}", Config::config_file_path()?.display());
    Ok(())
}
