use std::fmt::Write;

use weather_core::{
    CurrentConditions, ForecastSeries, Session,
    display::{CurrentView, ForecastDayView},
};

/// Primary result panel.
pub fn current_panel(view: &CurrentView) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "📍 {}", view.location);
    let _ = writeln!(out, "{}  {}", view.image.glyph(), view.temperature);
    let _ = writeln!(out, "{}", view.condition);
    let _ = writeln!(out);

    let rows = [
        ("Feels like", &view.feels_like),
        ("High / Low", &view.high_low),
        ("Humidity", &view.humidity),
        ("Wind", &view.wind),
        ("Sunrise", &view.sunrise),
        ("Sunset", &view.sunset),
    ];
    for (label, value) in rows {
        let _ = writeln!(out, "  {label:<12}{value}");
    }

    out
}

/// Forecast strip, latest day first. `None` when there is nothing to show.
pub fn forecast_strip(forecast: &ForecastSeries) -> Option<String> {
    if forecast.is_empty() {
        return None;
    }

    let mut out = String::from("📅 5-Day Forecast\n");
    for day in forecast.latest_first().map(ForecastDayView::from) {
        let _ = writeln!(
            out,
            "  {:<12}{:<14}{}",
            day.date, day.condition, day.temperature
        );
    }

    Some(out)
}

fn conditions_panel(c: &CurrentConditions) -> String {
    current_panel(&CurrentView::from(c))
}

/// Error line and result panel of a session; the forecast is rendered separately.
pub fn primary(session: &Session) -> String {
    let mut out = String::new();

    if let Some(err) = session.query.error() {
        let _ = writeln!(out, "{err}");
    }
    if let Some(c) = session.query.conditions() {
        out.push_str(&conditions_panel(c));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use weather_core::{ForecastSample, QueryState};

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
    fn panel_lists_highlights() {
        let view = CurrentView::new(&paris(), &chrono::Utc);
        let panel = current_panel(&view);

        assert!(panel.starts_with("📍 Paris, FR\n"));
        assert!(panel.contains("18°C"));
        assert!(panel.contains("Clear — clear sky"));
        assert!(panel.contains("High / Low  20° / 16°C"));
        assert!(panel.contains("Humidity    55%"));
        assert!(panel.contains("Wind        3.1 m/s"));
        assert!(panel.contains("Sunrise     22:13"));
    }

    #[test]
    fn error_line_only_when_present() {
        let mut session = Session::default();
        assert_eq!(primary(&session), "");

        session.query = QueryState::Error("❌ city not found".into());
        assert_eq!(primary(&session), "❌ city not found\n");

        session.query = QueryState::Success(paris());
        assert!(!primary(&session).contains('❌'));
    }

    #[test]
    fn strip_is_hidden_when_empty_and_reversed_otherwise() {
        assert!(forecast_strip(&ForecastSeries::default()).is_none());

        let samples = ["2024-05-01 12:00:00", "2024-05-02 12:00:00"]
            .iter()
            .map(|t| ForecastSample {
                dt: 0,
                dt_txt: t.to_string(),
                condition: "Clouds".into(),
                temperature_c: 21.5,
            })
            .collect();
        let strip = forecast_strip(&ForecastSeries::new(1, samples)).expect("non-empty");

        let first = strip.find("02/05/2024").expect("second day shown");
        let second = strip.find("01/05/2024").expect("first day shown");
        assert!(first < second);
        assert!(strip.contains("🌡 22°C"));
    }
}
