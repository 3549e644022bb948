use crate::geo::Coordinate;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One unsigned EXIF rational field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct Rational {
    pub num: u32,
    pub denom: u32,
}

impl Rational {
    pub const fn new(num: u32, denom: u32) -> Self {
        Self { num, denom }
    }

    /// Evaluates the fraction. `None` when the denominator is zero.
    pub fn to_f64(self) -> Option<f64> {
        (self.denom != 0).then(|| f64::from(self.num) / f64::from(self.denom))
    }
}

/// Hemisphere reference stored next to each GPS angle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum Hemisphere {
    North,
    South,
    East,
    West,
}

impl Hemisphere {
    /// Parses the single-letter reference tag. EXIF stores it as a
    /// NUL-terminated ASCII string.
    pub fn from_ascii(value: &str) -> Option<Self> {
        match value.trim_end_matches('\0').trim() {
            "N" => Some(Self::North),
            "S" => Some(Self::South),
            "E" => Some(Self::East),
            "W" => Some(Self::West),
            _ => None,
        }
    }

    /// Sign applied to the decimal angle: South and West negate.
    pub const fn sign(self) -> f64 {
        match self {
            Self::North | Self::East => 1.0,
            Self::South | Self::West => -1.0,
        }
    }
}

/// Decoded GPS data of a single photo. Each field is present only when its
/// EXIF tags were, so any subset can occur.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GpsLocation {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub altitude: Option<f64>,
    pub timestamp: Option<DateTime<Utc>>,
}

impl GpsLocation {
    /// True when latitude, longitude and altitude are all absent. Such a
    /// record counts as "no location data".
    pub fn is_empty(&self) -> bool {
        self.latitude.is_none() && self.longitude.is_none() && self.altitude.is_none()
    }

    /// Both halves of the coordinate, when present.
    pub fn coordinate(&self) -> Option<Coordinate> {
        match (self.latitude, self.longitude) {
            (Some(latitude), Some(longitude)) => Some(Coordinate::new(latitude, longitude)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rational_evaluates_fraction() {
        assert_eq!(Rational::new(2655, 10).to_f64(), Some(265.5));
        assert_eq!(Rational::new(0, 1).to_f64(), Some(0.0));
    }

    #[test]
    fn test_rational_zero_denominator_is_none() {
        assert_eq!(Rational::new(37, 0).to_f64(), None);
    }

    #[test]
    fn test_hemisphere_parsing_handles_nul_terminator() {
        assert_eq!(Hemisphere::from_ascii("N"), Some(Hemisphere::North));
        assert_eq!(Hemisphere::from_ascii("S\0"), Some(Hemisphere::South));
        assert_eq!(Hemisphere::from_ascii("W "), Some(Hemisphere::West));
        assert_eq!(Hemisphere::from_ascii("NE"), None);
        assert_eq!(Hemisphere::from_ascii(""), None);
    }

    #[test]
    fn test_hemisphere_sign_convention() {
        assert_eq!(Hemisphere::North.sign(), 1.0);
        assert_eq!(Hemisphere::East.sign(), 1.0);
        assert_eq!(Hemisphere::South.sign(), -1.0);
        assert_eq!(Hemisphere::West.sign(), -1.0);
    }

    #[test]
    fn test_location_with_only_altitude_is_not_empty() {
        let location = GpsLocation {
            latitude: None,
            longitude: None,
            altitude: Some(12.0),
            timestamp: None,
        };
        assert!(!location.is_empty());
        assert!(location.coordinate().is_none());
    }

    #[test]
    fn test_coordinate_requires_both_halves() {
        let location = GpsLocation {
            latitude: Some(52.4),
            longitude: None,
            altitude: None,
            timestamp: None,
        };
        assert!(location.coordinate().is_none());
    }
}
