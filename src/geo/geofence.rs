use crate::geo::distance::{Coordinate, haversine_km};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Whether the fence keeps points within the radius or the ones beyond it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GeofenceMode {
    Inside,
    Outside,
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("Invalid geofence mode {0:?}, expected \"inside\" or \"outside\"")]
pub struct ParseGeofenceModeError(pub String);

impl FromStr for GeofenceMode {
    type Err = ParseGeofenceModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("inside") {
            Ok(Self::Inside)
        } else if s.eq_ignore_ascii_case("outside") {
            Ok(Self::Outside)
        } else {
            Err(ParseGeofenceModeError(s.to_owned()))
        }
    }
}

impl fmt::Display for GeofenceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Inside => "inside",
            Self::Outside => "outside",
        })
    }
}

/// A circular region around a center point.
///
/// A negative radius is accepted mechanically: no distance is ever at or below
/// it, so `Inside` matches nothing and `Outside` matches everything.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Geofence {
    pub center: Coordinate,
    pub radius_km: f64,
    pub mode: GeofenceMode,
}

impl Geofence {
    pub const fn new(center: Coordinate, radius_km: f64, mode: GeofenceMode) -> Self {
        Self {
            center,
            radius_km,
            mode,
        }
    }

    /// Distance from the center plus the membership decision. A point exactly
    /// on the boundary belongs inside.
    pub fn evaluate(&self, point: Coordinate) -> GeofenceResult {
        let distance_km = haversine_km(self.center, point);
        let matched = match self.mode {
            GeofenceMode::Inside => distance_km <= self.radius_km,
            GeofenceMode::Outside => distance_km > self.radius_km,
        };
        GeofenceResult {
            distance_km,
            matched,
        }
    }
}

/// Classification of a single point against a [`Geofence`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeofenceResult {
    /// Unrounded distance from the fence center, in kilometers.
    pub distance_km: f64,
    /// True when the point belongs to the side the fence mode selects.
    pub matched: bool,
}
