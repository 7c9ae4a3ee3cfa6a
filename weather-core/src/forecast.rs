//! Reduction of the 3-hour forecast series to one sample per day.

use crate::model::ForecastSample;

/// Time-of-day stamp of the representative daily sample.
pub const MIDDAY: &str = "12:00:00";

/// Keep the midday sample of each day, preserving provider order.
pub fn daily_samples(samples: Vec<ForecastSample>) -> Vec<ForecastSample> {
    samples
        .into_iter()
        .filter(|s| s.time_of_day() == Some(MIDDAY))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Five days of 3-hour samples starting at `2024-05-01 00:00:00`.
    fn five_day_series() -> Vec<ForecastSample> {
        let start = 1_714_521_600; // 2024-05-01T00:00:00Z
        (0..40)
            .map(|i| {
                let dt = start + i * 3 * 3600;
                let day = 1 + i / 8;
                let hour = (i % 8) * 3;
                ForecastSample {
                    dt,
                    dt_txt: format!("2024-05-{day:02} {hour:02}:00:00"),
                    condition: "Clouds".to_string(),
                    temperature_c: i as f64,
                }
            })
            .collect()
    }

    #[test]
    fn keeps_one_midday_sample_per_day() {
        let daily = daily_samples(five_day_series());

        assert_eq!(daily.len(), 5);
        for (i, s) in daily.iter().enumerate() {
            assert_eq!(s.dt_txt, format!("2024-05-{:02} 12:00:00", i + 1));
        }
    }

    #[test]
    fn preserves_order() {
        let daily = daily_samples(five_day_series());
        assert!(daily.windows(2).all(|w| w[0].dt < w[1].dt));
    }

    #[test]
    fn is_idempotent() {
        let once = daily_samples(five_day_series());
        let twice = daily_samples(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn partial_stamp_match_is_not_enough() {
        let samples = vec![ForecastSample {
            dt: 0,
            dt_txt: "2024-05-01 12:00:001".to_string(),
            condition: "Rain".to_string(),
            temperature_c: 10.0,
        }];
        assert!(daily_samples(samples).is_empty());
    }

    #[test]
    fn empty_series_stays_empty() {
        assert!(daily_samples(Vec::new()).is_empty());
    }
}
