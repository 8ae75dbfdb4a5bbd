use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Response shape of the `current.json` endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct Weather {
    pub location: Location,
    pub current: Current,
}

/// Response shape of the `forecast.json` endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct WeatherForecast {
    pub location: Location,
    pub current: Current,
    pub forecast: Forecast,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Location {
    pub name: String,
    pub region: String,
    pub country: String,
    pub lat: f64,
    pub lon: f64,
    pub tz_id: String,
    pub localtime_epoch: i64,
    pub localtime: String,
}

impl Location {
    /// Canonical "Name, Country" label, also accepted back as a query.
    pub fn label(&self) -> String {
        format!("{}, {}", self.name, self.country)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Condition {
    pub text: String,
    pub icon: String,
    pub code: i32,
}

impl Condition {
    pub fn kind(&self) -> ConditionKind {
        ConditionKind::from_code(self.code)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Current {
    pub last_updated_epoch: i64,
    pub last_updated: String,
    pub temp_c: f64,
    pub temp_f: f64,
    pub is_day: u8,
    pub condition: Condition,
    pub wind_mph: f64,
    pub wind_kph: f64,
    pub wind_degree: u16,
    pub wind_dir: String,
    pub pressure_mb: f64,
    pub pressure_in: f64,
    pub precip_mm: f64,
    pub precip_in: f64,
    pub humidity: u8,
    pub cloud: u8,
    pub feelslike_c: f64,
    pub feelslike_f: f64,
    pub vis_km: f64,
    pub vis_miles: f64,
    pub uv: f64,
    pub gust_mph: f64,
    pub gust_kph: f64,
}

impl Current {
    pub fn temp(&self, units: Units) -> f64 {
        match units {
            Units::Celsius => self.temp_c,
            Units::Fahrenheit => self.temp_f,
        }
    }

    pub fn feels_like(&self, units: Units) -> f64 {
        match units {
            Units::Celsius => self.feelslike_c,
            Units::Fahrenheit => self.feelslike_f,
        }
    }

    pub fn is_daytime(&self) -> bool {
        self.is_day == 1
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Forecast {
    pub forecastday: Vec<ForecastDay>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ForecastDay {
    pub date: String,
    pub date_epoch: i64,
    pub day: Day,
    pub astro: Astro,
    pub hour: Vec<Hour>,
}

impl ForecastDay {
    /// Full weekday name ("Monday") of this forecast date, falling back to
    /// the raw date string when it does not parse.
    pub fn weekday(&self) -> String {
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d")
            .map(|d| d.format("%A").to_string())
            .unwrap_or_else(|_| self.date.clone())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Day {
    pub maxtemp_c: f64,
    pub maxtemp_f: f64,
    pub mintemp_c: f64,
    pub mintemp_f: f64,
    pub avgtemp_c: f64,
    pub avgtemp_f: f64,
    pub maxwind_mph: f64,
    pub maxwind_kph: f64,
    pub totalprecip_mm: f64,
    pub totalprecip_in: f64,
    pub avgvis_km: f64,
    pub avgvis_miles: f64,
    pub avghumidity: f64,
    pub daily_will_it_rain: u8,
    /// Percentage, served as a quoted number on the wire.
    pub daily_chance_of_rain: String,
    pub daily_will_it_snow: u8,
    pub daily_chance_of_snow: String,
    pub condition: Condition,
    pub uv: f64,
}

impl Day {
    pub fn high(&self, units: Units) -> f64 {
        match units {
            Units::Celsius => self.maxtemp_c,
            Units::Fahrenheit => self.maxtemp_f,
        }
    }

    pub fn low(&self, units: Units) -> f64 {
        match units {
            Units::Celsius => self.mintemp_c,
            Units::Fahrenheit => self.mintemp_f,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Astro {
    pub sunrise: String,
    pub sunset: String,
    pub moonrise: String,
    pub moonset: String,
    pub moon_phase: String,
    pub moon_illumination: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Hour {
    pub time_epoch: i64,
    pub time: String,
    pub temp_c: f64,
    pub temp_f: f64,
    pub is_day: u8,
    pub condition: Condition,
    pub wind_mph: f64,
    pub wind_kph: f64,
    pub wind_degree: u16,
    pub wind_dir: String,
    pub pressure_mb: f64,
    pub pressure_in: f64,
    pub precip_mm: f64,
    pub precip_in: f64,
    pub humidity: u8,
    pub cloud: u8,
    pub feelslike_c: f64,
    pub feelslike_f: f64,
    pub windchill_c: f64,
    pub windchill_f: f64,
    pub heatindex_c: f64,
    pub heatindex_f: f64,
    pub dewpoint_c: f64,
    pub dewpoint_f: f64,
    pub will_it_rain: u8,
    pub chance_of_rain: String,
    pub will_it_snow: u8,
    pub chance_of_snow: String,
    pub vis_km: f64,
    pub vis_miles: f64,
    pub gust_mph: f64,
    pub gust_kph: f64,
    pub uv: f64,
}

impl Hour {
    pub fn temp(&self, units: Units) -> f64 {
        match units {
            Units::Celsius => self.temp_c,
            Units::Fahrenheit => self.temp_f,
        }
    }

    pub fn is_daytime(&self) -> bool {
        self.is_day == 1
    }

    /// "HH:MM" part of the slot time ("2024-05-06 09:00" -> "09:00").
    pub fn clock(&self) -> &str {
        self.time.split_once(' ').map_or(self.time.as_str(), |(_, hm)| hm)
    }
}

/// One match returned by the `search.json` place-autocomplete endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchHit {
    pub id: i64,
    pub name: String,
    pub region: String,
    pub country: String,
    pub lat: f64,
    pub lon: f64,
    pub url: String,
}

impl SearchHit {
    /// "Name, Country" form that the app submits as the next query.
    pub fn label(&self) -> String {
        format!("{}, {}", self.name, self.country)
    }
}

/// Error payload WeatherAPI.com ships alongside non-2xx statuses.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ErrorDetail {
    pub code: i32,
    pub message: String,
}

/// Display units for temperatures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    #[default]
    Celsius,
    Fahrenheit,
}

impl Units {
    pub fn suffix(self) -> &'static str {
        match self {
            Units::Celsius => "°C",
            Units::Fahrenheit => "°F",
        }
    }
}

impl std::fmt::Display for Units {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Units::Celsius => write!(f, "celsius"),
            Units::Fahrenheit => write!(f, "fahrenheit"),
        }
    }
}

/// Coarse weather condition classes used to pick a terminal glyph.
///
/// WeatherAPI.com condition codes are grouped; codes this table does not
/// know about fall back to `Clear`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConditionKind {
    Clear,
    PartlyCloudy,
    Cloudy,
    Fog,
    Drizzle,
    Rain,
    HeavyRain,
    Snow,
    Sleet,
    Thunderstorm,
}

impl ConditionKind {
    pub fn from_code(code: i32) -> Self {
        match code {
            1003 => ConditionKind::PartlyCloudy,
            1006 | 1009 => ConditionKind::Cloudy,
            1030 | 1135 | 1147 => ConditionKind::Fog,
            1063 | 1150 | 1153 => ConditionKind::Drizzle,
            1180 | 1183 | 1186 | 1189 | 1240 => ConditionKind::Rain,
            1192 | 1195 | 1243 | 1246 => ConditionKind::HeavyRain,
            1066 | 1114 | 1117 | 1210 | 1213 | 1216 | 1219 | 1222 | 1225 | 1255 | 1258 => {
                ConditionKind::Snow
            }
            1069 | 1072 | 1168 | 1171 | 1198 | 1201 | 1204 | 1207 | 1237 | 1249 | 1252 | 1261
            | 1264 => ConditionKind::Sleet,
            1087 | 1273 | 1276 | 1279 | 1282 => ConditionKind::Thunderstorm,
            _ => ConditionKind::Clear,
        }
    }

    pub fn glyph(self, is_day: bool) -> &'static str {
        match self {
            ConditionKind::Clear => {
                if is_day {
                    "☀"
                } else {
                    "🌙"
                }
            }
            ConditionKind::PartlyCloudy => {
                if is_day {
                    "⛅"
                } else {
                    "☁"
                }
            }
            ConditionKind::Cloudy => "☁",
            ConditionKind::Fog => "🌫",
            ConditionKind::Drizzle => "🌦",
            ConditionKind::Rain | ConditionKind::HeavyRain => "🌧",
            ConditionKind::Snow => "❄",
            ConditionKind::Sleet => "🌨",
            ConditionKind::Thunderstorm => "⛈",
        }
    }
}
