//! Pure render functions for the panels the app prints.
//!
//! Everything here returns a `String`; printing and prompting stay in the
//! callers. Color is gated on [`Style`] so tests and pipes get plain text.

use std::io::IsTerminal;

use skycast_core::WeatherError;
use skycast_core::model::{SearchHit, Units, Weather, WeatherForecast};

#[derive(Debug, Clone, Copy)]
pub struct Style {
    pub color: bool,
}

impl Style {
    /// Color only when stdout is a terminal and NO_COLOR is unset.
    pub fn detect() -> Self {
        Self { color: std::io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none() }
    }

    fn bold(self, text: &str) -> String {
        if self.color { format!("\u{1b}[1m{text}\u{1b}[0m") } else { text.to_string() }
    }

    fn dim(self, text: &str) -> String {
        if self.color { format!("\u{1b}[2m{text}\u{1b}[0m") } else { text.to_string() }
    }
}

/// Current conditions block: glyph, temperature, place, details line.
pub fn current_panel(weather: &Weather, units: Units, style: Style) -> String {
    let current = &weather.current;
    let glyph = current.condition.kind().glyph(current.is_daytime());
    let temp = format!("{:.1} {}", current.temp(units), units.suffix());

    let (wind_speed, wind_unit) = match units {
        Units::Celsius => (current.wind_kph, "km/h"),
        Units::Fahrenheit => (current.wind_mph, "mph"),
    };

    let mut out = String::new();
    out.push_str(&format!("  {}  {}\n", glyph, style.bold(&temp)));
    out.push_str(&format!("     {}\n", current.condition.text));
    out.push_str(&format!("  {}\n", style.bold(&weather.location.label())));
    out.push_str(&format!(
        "  feels like {:.1} {}   humidity {}%   wind {:.0} {} {} {}\n",
        current.feels_like(units),
        units.suffix(),
        current.humidity,
        wind_speed,
        wind_unit,
        wind_arrow(&current.wind_dir),
        current.wind_dir,
    ));
    out.push_str(&style.dim(&format!("  updated {}", current.last_updated)));
    out.push('\n');
    out
}

/// One line per forecast day: weekday, glyph, high/low, rain chance.
pub fn forecast_strip(forecast: &WeatherForecast, units: Units, style: Style) -> String {
    let mut out = String::new();
    out.push_str(&style.bold("  Forecast"));
    out.push('\n');

    for day in &forecast.forecast.forecastday {
        out.push_str(&format!(
            "  {:<9}  {}  {:>5.1}{suffix} / {:>5.1}{suffix}   rain {:>3}%\n",
            day.weekday(),
            day.day.condition.kind().glyph(true),
            day.day.high(units),
            day.day.low(units),
            day.day.daily_chance_of_rain,
            suffix = units.suffix(),
        ));
    }
    out
}

/// Per-day breakdown with astro times and three-hourly slots.
pub fn forecast_detail(forecast: &WeatherForecast, units: Units, style: Style) -> String {
    let mut out = String::new();
    out.push_str(&format!("  {}\n", style.bold(&forecast.location.label())));

    for day in &forecast.forecast.forecastday {
        let d = &day.day;
        out.push('\n');
        out.push_str(&format!(
            "  {}  {} {}   {:.1}{suffix} / {:.1}{suffix}   rain {}%\n",
            style.bold(&day.weekday()),
            d.condition.kind().glyph(true),
            d.condition.text,
            d.high(units),
            d.low(units),
            d.daily_chance_of_rain,
            suffix = units.suffix(),
        ));
        out.push_str(&style.dim(&format!(
            "  {}   sunrise {}   sunset {}   moon {} ({}%)",
            day.date,
            day.astro.sunrise,
            day.astro.sunset,
            day.astro.moon_phase,
            day.astro.moon_illumination,
        )));
        out.push('\n');

        for hour in day.hour.iter().step_by(3) {
            out.push_str(&format!(
                "    {}  {}  {:>5.1}{}   rain {:>3}%\n",
                hour.clock(),
                hour.condition.kind().glyph(hour.is_daytime()),
                hour.temp(units),
                units.suffix(),
                hour.chance_of_rain,
            ));
        }
    }
    out
}

/// Place search listing, "No results" when nothing matched.
pub fn search_results(hits: &[SearchHit]) -> String {
    if hits.is_empty() {
        return "No results\n".to_string();
    }

    let mut out = String::new();
    for hit in hits {
        out.push_str(&format!(
            "  {}, {}, {}  ({:.2}, {:.2})\n",
            hit.name, hit.region, hit.country, hit.lat, hit.lon,
        ));
    }
    out
}

/// Static error block shown in place of a panel that failed to load.
pub fn error_panel(title: &str, error: &WeatherError, style: Style) -> String {
    format!("  {}\n  {}\n", style.bold(title), error.user_message())
}

// Arrows point where the wind blows to, the names say where it comes from.
fn wind_arrow(dir: &str) -> &'static str {
    match dir {
        "N" | "NNE" => "↓",
        "NE" | "ENE" => "↙",
        "E" | "ESE" => "←",
        "SE" | "SSE" => "↖",
        "S" | "SSW" => "↑",
        "SW" | "WSW" => "↗",
        "W" | "WNW" => "→",
        "NW" | "NNW" => "↘",
        _ => " ",
    }
}
