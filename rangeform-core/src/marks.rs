//! Tick marks — evenly spaced labeled positions along the track.

use crate::config::RangeSettings;

/// A labeled tick position. Lookup is by position; emission order is just
/// ascending for convenience.
#[derive(Debug, Clone, PartialEq)]
pub struct Mark {
    pub position: f64,
    pub label: String,
}

/// Evenly spaced marks across the configured range.
///
/// Non-empty only when minimum and maximum are present, minimum is below
/// maximum, and at least two markers are requested; anything else yields an
/// empty set, never an error. Positions are rounded to the configured number
/// of decimal places and labeled with the rounded number.
pub fn marks(settings: &RangeSettings) -> Vec<Mark> {
    let (Some(min), Some(max)) = (settings.minimum, settings.maximum) else {
        return Vec::new();
    };
    if min >= max || settings.marker_count < 2 {
        return Vec::new();
    }

    let interval = (max - min) / (settings.marker_count - 1) as f64;
    (0..settings.marker_count)
        .map(|i| {
            let position = round_to(min + i as f64 * interval, settings.decimal_places);
            Mark {
                position,
                label: position.to_string(),
            }
        })
        .collect()
}

/// Round to a fixed number of decimal places.
pub fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(min: f64, max: f64, markers: u32, decimals: u32) -> RangeSettings {
        RangeSettings {
            minimum: Some(min),
            maximum: Some(max),
            step: 1.0,
            marker_count: markers,
            decimal_places: decimals,
        }
    }

    fn positions(marks: &[Mark]) -> Vec<f64> {
        marks.iter().map(|m| m.position).collect()
    }

    #[test]
    fn five_markers_zero_to_hundred() {
        let marks = marks(&settings(0.0, 100.0, 5, 0));
        assert_eq!(positions(&marks), vec![0.0, 25.0, 50.0, 75.0, 100.0]);
        assert_eq!(marks[1].label, "25");
    }

    #[test]
    fn fewer_than_two_markers_yields_nothing() {
        assert!(marks(&settings(0.0, 100.0, 1, 0)).is_empty());
        assert!(marks(&settings(0.0, 100.0, 0, 0)).is_empty());
    }

    #[test]
    fn inverted_range_yields_nothing() {
        assert!(marks(&settings(50.0, 30.0, 5, 0)).is_empty());
        assert!(marks(&settings(10.0, 10.0, 5, 0)).is_empty());
    }

    #[test]
    fn missing_bounds_yield_nothing() {
        let partial = RangeSettings {
            minimum: None,
            maximum: Some(100.0),
            step: 1.0,
            marker_count: 5,
            decimal_places: 0,
        };
        assert!(marks(&partial).is_empty());
    }

    #[test]
    fn positions_round_to_decimal_places() {
        let marks = marks(&settings(0.0, 1.0, 3, 2));
        assert_eq!(positions(&marks), vec![0.0, 0.5, 1.0]);
        assert_eq!(marks[1].label, "0.5");

        // Thirds at two decimal places land on the rounded grid.
        let thirds = super::marks(&settings(0.0, 1.0, 4, 2));
        assert_eq!(positions(&thirds), vec![0.0, 0.33, 0.67, 1.0]);
    }

    #[test]
    fn round_to_places() {
        assert_eq!(round_to(0.125, 2), 0.13);
        assert_eq!(round_to(99.994, 2), 99.99);
        assert_eq!(round_to(7.5, 0), 8.0);
    }
}
