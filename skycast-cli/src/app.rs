//! Interactive city view: current panel, forecast strip, type-ahead prompt.

use std::sync::Arc;

use anyhow::Result;
use inquire::{InquireError, Text};
use tokio::runtime::Handle;
use tracing::debug;

use skycast_core::model::Units;
use skycast_core::provider::WeatherSource;
use skycast_core::suggest::TypeAhead;

use crate::render::{self, Style};
use crate::search::CityCompleter;

pub async fn run(
    source: Arc<dyn WeatherSource>,
    units: Units,
    days: u8,
    start_city: String,
) -> Result<()> {
    let typeahead = TypeAhead::spawn(Arc::clone(&source));
    let handle = Handle::current();

    // inquire owns the terminal and blocks, so the loop lives on a blocking
    // thread and calls back into the runtime for the fetches.
    tokio::task::spawn_blocking(move || {
        city_loop(&handle, source.as_ref(), typeahead, units, days, start_city)
    })
    .await?
}

fn city_loop(
    handle: &Handle,
    source: &dyn WeatherSource,
    typeahead: TypeAhead,
    units: Units,
    days: u8,
    start_city: String,
) -> Result<()> {
    let style = Style::detect();
    let completer = CityCompleter::new(typeahead);
    let mut city = start_city;

    loop {
        show_city(handle, source, &city, units, days, style);

        match next_city(&completer)? {
            Some(next) if !next.trim().is_empty() => city = next,
            _ => return Ok(()),
        }
    }
}

fn show_city(
    handle: &Handle,
    source: &dyn WeatherSource,
    city: &str,
    units: Units,
    days: u8,
    style: Style,
) {
    debug!(city, "loading panels");

    // Both panels fetch concurrently and fail independently.
    let (current, forecast) =
        handle.block_on(async { tokio::join!(source.current(city), source.forecast(city, days)) });

    println!();
    match current {
        Ok(weather) => print!("{}", render::current_panel(&weather, units, style)),
        Err(error) => print!("{}", render::error_panel("Weather unavailable", &error, style)),
    }

    println!();
    match forecast {
        Ok(forecast) => print!("{}", render::forecast_strip(&forecast, units, style)),
        Err(error) => print!("{}", render::error_panel("No forecast", &error, style)),
    }
    println!();
}

fn next_city(completer: &CityCompleter) -> Result<Option<String>> {
    let answer = Text::new("City")
        .with_placeholder("City...")
        .with_autocomplete(completer.clone())
        .with_help_message("type to search, Enter to accept, Esc to quit")
        .prompt_skippable();

    match answer {
        Ok(answer) => Ok(answer),
        // Ctrl-C quits like Esc instead of bubbling up as an error.
        Err(InquireError::OperationInterrupted) => Ok(None),
        Err(error) => Err(error.into()),
    }
}
