//! Weather record and the upstream payload it is extracted from.

use serde::{Deserialize, Serialize};

// == Weather Record ==
/// Current conditions for one city, as served to clients and cached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherRecord {
    pub city_name: String,
    pub description: String,
    /// Celsius
    pub temperature: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    /// Percent
    pub humidity: u32,
    /// Metres per second
    pub wind_speed: f64,
    /// Unix seconds, UTC
    pub sunrise: i64,
    pub sunset: i64,
}

// == Upstream Payload ==
// Only the fields we extract. Everything except the description is required;
// a payload missing any of them fails to deserialize.

#[derive(Debug, Deserialize)]
pub(crate) struct OwmResponse {
    name: String,
    #[serde(default)]
    weather: Vec<OwmCondition>,
    main: OwmMain,
    wind: OwmWind,
    sys: OwmSys,
}

#[derive(Debug, Deserialize)]
struct OwmCondition {
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwmMain {
    temp: f64,
    temp_min: f64,
    temp_max: f64,
    humidity: u32,
}

#[derive(Debug, Deserialize)]
struct OwmWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwmSys {
    sunrise: i64,
    sunset: i64,
}

impl From<OwmResponse> for WeatherRecord {
    fn from(payload: OwmResponse) -> Self {
        let description = payload
            .weather
            .into_iter()
            .next()
            .map(|condition| condition.description)
            .unwrap_or_default();

        Self {
            city_name: payload.name,
            description,
            temperature: payload.main.temp,
            temp_min: payload.main.temp_min,
            temp_max: payload.main.temp_max,
            humidity: payload.main.humidity,
            wind_speed: payload.wind.speed,
            sunrise: payload.sys.sunrise,
            sunset: payload.sys.sunset,
        }
    }
}
