//! Presentational mapping from weather data to display strings.

use chrono::{DateTime, Local, TimeZone};

use crate::model::{CurrentConditions, ForecastSample};

/// Themed background image for a condition category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WeatherImage {
    Sunny,
    Cloudy,
    Rainy,
    Snow,
    Stormy,
    Mist,
    Haze,
}

impl WeatherImage {
    /// Case-insensitive lookup; unknown categories get the sunny image.
    pub fn from_condition(condition: &str) -> Self {
        match condition.to_lowercase().as_str() {
            "clear" => WeatherImage::Sunny,
            "clouds" => WeatherImage::Cloudy,
            "rain" | "drizzle" => WeatherImage::Rainy,
            "snow" => WeatherImage::Snow,
            "thunderstorm" => WeatherImage::Stormy,
            "mist" => WeatherImage::Mist,
            "haze" => WeatherImage::Haze,
            _ => WeatherImage::Sunny,
        }
    }

    pub fn asset(&self) -> &'static str {
        match self {
            WeatherImage::Sunny => "/sunny.jpg",
            WeatherImage::Cloudy => "/cloudy.jpg",
            WeatherImage::Rainy => "/rainy.jpg",
            WeatherImage::Snow => "/snow.jpg",
            WeatherImage::Stormy => "/stormy.jpg",
            WeatherImage::Mist => "/mist.jpg",
            WeatherImage::Haze => "/Haze.jpg",
        }
    }

    /// Terminal stand-in for the image.
    pub fn glyph(&self) -> &'static str {
        match self {
            WeatherImage::Sunny => "☀",
            WeatherImage::Cloudy => "☁",
            WeatherImage::Rainy => "🌧",
            WeatherImage::Snow => "❄",
            WeatherImage::Stormy => "⛈",
            WeatherImage::Mist | WeatherImage::Haze => "🌫",
        }
    }
}

/// Round half up, so `-2.5` becomes `-2` and `2.5` becomes `3`.
pub fn round_half_up(value: f64) -> i64 {
    let rounded = value.round();
    // `round` breaks ties away from zero; negative ties go up instead.
    if rounded - value == -0.5 {
        (rounded + 1.0) as i64
    } else {
        rounded as i64
    }
}

pub fn celsius(value: f64) -> String {
    format!("{}°C", round_half_up(value))
}

/// `HH:MM` of an epoch-seconds instant in the viewer's local zone.
pub fn format_time(ts: i64) -> String {
    format_time_in(ts, &Local)
}

pub fn format_time_in<Tz: TimeZone>(ts: i64, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    match DateTime::from_timestamp(ts, 0) {
        Some(utc) => utc.with_timezone(tz).format("%H:%M").to_string(),
        None => "--:--".to_string(),
    }
}

/// Label of the submit control.
pub fn submit_label(loading: bool) -> &'static str {
    if loading { "Loading..." } else { "Get Weather" }
}

/// Display strings for the primary result panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentView {
    pub location: String,
    pub image: WeatherImage,
    pub temperature: String,
    pub condition: String,
    pub feels_like: String,
    pub high_low: String,
    pub humidity: String,
    pub wind: String,
    pub sunrise: String,
    pub sunset: String,
}

impl CurrentView {
    pub fn new<Tz: TimeZone>(c: &CurrentConditions, tz: &Tz) -> Self
    where
        Tz::Offset: std::fmt::Display,
    {
        Self {
            location: format!("{}, {}", c.location_name, c.country),
            image: WeatherImage::from_condition(&c.condition),
            temperature: celsius(c.temperature_c),
            condition: format!("{} — {}", c.condition, c.description),
            feels_like: celsius(c.feels_like_c),
            high_low: format!(
                "{}° / {}°C",
                round_half_up(c.temp_max_c),
                round_half_up(c.temp_min_c)
            ),
            humidity: format!("{}%", c.humidity_pct),
            wind: format!("{} m/s", c.wind_speed_mps),
            sunrise: format_time_in(c.sunrise, tz),
            sunset: format_time_in(c.sunset, tz),
        }
    }
}

impl From<&CurrentConditions> for CurrentView {
    fn from(c: &CurrentConditions) -> Self {
        Self::new(c, &Local)
    }
}

/// One cell of the forecast strip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForecastDayView {
    pub date: String,
    pub condition: String,
    pub temperature: String,
}

impl From<&ForecastSample> for ForecastDayView {
    fn from(s: &ForecastSample) -> Self {
        let date = s
            .date()
            .map(|d| d.format("%d/%m/%Y").to_string())
            .unwrap_or_else(|| s.dt_txt.clone());

        Self {
            date,
            condition: s.condition.clone(),
            temperature: format!("🌡 {}", celsius(s.temperature_c)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    fn paris() -> CurrentConditions {
        CurrentConditions {
            location_name: "Paris".into(),
            country: "FR".into(),
            condition: "Clear".into(),
            description: "clear sky".into(),
            temperature_c: 18.4,
            feels_like_c: 17.9,
            temp_min_c: 16.0,
            temp_max_c: 20.1,
            humidity_pct: 55,
            wind_speed_mps: 3.1,
            sunrise: 1_700_000_000,
            sunset: 1_700_040_000,
        }
    }

    #[test]
    fn image_lookup_is_case_insensitive() {
        assert_eq!(WeatherImage::from_condition("Clear"), WeatherImage::Sunny);
        assert_eq!(WeatherImage::from_condition("CLOUDS"), WeatherImage::Cloudy);
        assert_eq!(WeatherImage::from_condition("drizzle"), WeatherImage::Rainy);
        assert_eq!(WeatherImage::from_condition("Rain"), WeatherImage::Rainy);
        assert_eq!(WeatherImage::from_condition("Thunderstorm"), WeatherImage::Stormy);
        assert_eq!(WeatherImage::from_condition("haze").asset(), "/Haze.jpg");
    }

    #[test]
    fn unknown_condition_uses_clear_asset() {
        assert_eq!(
            WeatherImage::from_condition("TORNADO").asset(),
            WeatherImage::from_condition("Clear").asset()
        );
        assert_eq!(WeatherImage::from_condition("").asset(), "/sunny.jpg");
    }

    #[test]
    fn rounding_is_half_up() {
        assert_eq!(round_half_up(18.4), 18);
        assert_eq!(round_half_up(17.9), 18);
        assert_eq!(round_half_up(2.5), 3);
        assert_eq!(round_half_up(-2.5), -2);
        assert_eq!(round_half_up(-0.4), 0);
        assert_eq!(round_half_up(-3.5), -3);
        assert_eq!(round_half_up(0.499_999_999_999_999_94), 0);
    }

    #[test]
    fn current_view_matches_panel_layout() {
        let view = CurrentView::new(&paris(), &Utc);

        assert_eq!(view.location, "Paris, FR");
        assert_eq!(view.temperature, "18°C");
        assert_eq!(view.feels_like, "18°C");
        assert_eq!(view.high_low, "20° / 16°C");
        assert_eq!(view.humidity, "55%");
        assert_eq!(view.wind, "3.1 m/s");
        assert_eq!(view.condition, "Clear — clear sky");
        assert_eq!(view.image.asset(), "/sunny.jpg");
        assert_eq!(view.sunrise, "22:13");
        assert_eq!(view.sunset, "09:20");
    }

    #[test]
    fn whole_wind_speed_has_no_decimals() {
        let mut c = paris();
        c.wind_speed_mps = 3.0;
        assert_eq!(CurrentView::new(&c, &Utc).wind, "3 m/s");
    }

    #[test]
    fn time_follows_viewer_zone() {
        let ist = FixedOffset::east_opt(5 * 3600 + 1800).unwrap();
        assert_eq!(format_time_in(1_700_000_000, &ist), "03:43");
    }

    #[test]
    fn local_time_is_hour_and_minute() {
        let text = format_time(1_700_000_000);
        assert_eq!(text.len(), 5);
        assert_eq!(text.as_bytes()[2], b':');
    }

    #[test]
    fn forecast_day_view() {
        let sample = ForecastSample {
            dt: 1_714_564_800,
            dt_txt: "2024-05-01 12:00:00".into(),
            condition: "Rain".into(),
            temperature_c: 14.6,
        };
        let view = ForecastDayView::from(&sample);

        assert_eq!(view.date, "01/05/2024");
        assert_eq!(view.condition, "Rain");
        assert_eq!(view.temperature, "🌡 15°C");
    }

    #[test]
    fn submit_label_reflects_loading() {
        assert_eq!(submit_label(true), "Loading...");
        assert_eq!(submit_label(false), "Get Weather");
    }
}
