//! Module for great-circle distance and circular geofence classification.
pub mod distance;
pub mod geofence;

pub use distance::{Coordinate, EARTH_RADIUS_KM, haversine_km};
pub use geofence::{Geofence, GeofenceMode, GeofenceResult, ParseGeofenceModeError};
