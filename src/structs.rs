use crate::geo::{Geofence, GeofenceResult};
use crate::gps::{GpsDecodeError, GpsLocation};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Outcome of one decode-and-classify operation.
///
/// Serialized with an explicit `status` discriminant so callers branch on the
/// tag instead of sniffing message strings. "No location data" and "the tag
/// data was malformed" are separate variants on purpose.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum LocationOutcome {
    /// The photo carried usable GPS data.
    Located(LocationReport),
    /// The photo genuinely has no GPS data.
    NoLocation,
    /// A geofence request targeted a record missing latitude or longitude.
    IncompleteLocation,
    /// The GPS tag data was malformed.
    DecodeError { message: String },
}

impl LocationOutcome {
    /// Maps the decoder's three-way result into the tagged outcome.
    pub fn from_decode(decoded: Result<Option<GpsLocation>, GpsDecodeError>) -> Self {
        match decoded {
            Ok(Some(location)) => Self::Located(LocationReport::new(&location)),
            Ok(None) => Self::NoLocation,
            Err(err) => Self::DecodeError {
                message: err.to_string(),
            },
        }
    }

    /// Same mapping, but located records are additionally classified against
    /// `fence`. A record missing either coordinate half cannot be classified
    /// and becomes [`LocationOutcome::IncompleteLocation`], never "outside".
    pub fn from_decode_with_geofence(
        decoded: Result<Option<GpsLocation>, GpsDecodeError>,
        fence: &Geofence,
    ) -> Self {
        match decoded {
            Ok(Some(location)) => match location.coordinate() {
                Some(point) => {
                    let mut report = LocationReport::new(&location);
                    report.geofence = Some(GeofenceSummary::new(&fence.evaluate(point)));
                    Self::Located(report)
                }
                None => Self::IncompleteLocation,
            },
            Ok(None) => Self::NoLocation,
            Err(err) => Self::DecodeError {
                message: err.to_string(),
            },
        }
    }

    pub fn is_located(&self) -> bool {
        matches!(self, Self::Located(_))
    }

    /// True for located photos whose geofence classification agreed with the
    /// fence mode.
    pub fn matched_geofence(&self) -> bool {
        match self {
            Self::Located(report) => report.geofence.is_some_and(|summary| summary.matched),
            _ => false,
        }
    }
}

/// Location data of one photo, shaped for transport-layer serialization.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub altitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maps_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geofence: Option<GeofenceSummary>,
}

impl LocationReport {
    pub fn new(location: &GpsLocation) -> Self {
        // The maps link needs both halves of the coordinate.
        let maps_url = location.coordinate().map(|point| {
            format!(
                "https://www.google.com/maps?q={},{}",
                point.latitude, point.longitude
            )
        });
        Self {
            latitude: location.latitude,
            longitude: location.longitude,
            altitude: location.altitude,
            timestamp: location.timestamp,
            maps_url,
            geofence: None,
        }
    }
}

/// Geofence classification of one photo, for display.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeofenceSummary {
    /// Distance from the fence center, rounded to 2 decimals.
    pub distance_km: f64,
    pub matched: bool,
}

impl GeofenceSummary {
    pub fn new(result: &GeofenceResult) -> Self {
        Self {
            distance_km: round_to_centi(result.distance_km),
            matched: result.matched,
        }
    }
}

fn round_to_centi(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// One photo plus its outcome, as reported by the locator.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoReport {
    pub path: PathBuf,
    #[serde(flatten)]
    pub outcome: LocationOutcome,
}

impl PhotoReport {
    pub fn new(path: &Path, outcome: LocationOutcome) -> Self {
        Self {
            path: path.to_path_buf(),
            outcome,
        }
    }
}

/// Result of a directory sweep.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchReport {
    pub directory: PathBuf,
    /// Number of scanned photos that carried a usable location.
    pub with_location: usize,
    pub photos: Vec<PhotoReport>,
}

/// Result of a directory sweep classified against a geofence.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeofenceReport {
    pub directory: PathBuf,
    pub fence: Geofence,
    /// Number of photos whose classification agreed with the fence mode.
    pub matched: usize,
    pub photos: Vec<PhotoReport>,
}
