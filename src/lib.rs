//! # Photo Location
//!
//! Extract GPS location data embedded in photo files.
//!
//! This crate decodes the EXIF GPS tag group — sexagesimal rational angles,
//! hemisphere references, altitude and its sign byte — into signed decimal
//! coordinates, and builds distance and geofence classification on top of the
//! decoded records.
//!
//! ## Key Features
//!
//! - **GPS Decoding**: Converts raw GPS-IFD rationals into decimal latitude, longitude and altitude, keeping "no location data" and "malformed tag data" apart.
//! - **Distance**: Great-circle distance between two coordinate pairs via the haversine formula.
//! - **Geofencing**: Classifies photos as inside or outside a circular region around a center point.
//! - **Directory Sweeps**: Scans photo folders in parallel, isolating per-photo failures.
//! - **Structured Results**: Every operation returns a serializable, status-tagged report for a transport layer to pass on.
//!
//! ## Usage
//!
//! Create a [`PhotoLocator`] and point it at a photo or a folder.
//!
//! ```rust,no_run
//! use photo_location::PhotoLocator;
//! use std::path::Path;
//!
//! fn main() -> Result<(), photo_location::PhotoLocationError> {
//!     let locator = PhotoLocator::builder().build();
//!
//!     // Extract the location of a single photo.
//!     let report = locator.photo_location(Path::new("assets/sunset.jpg"))?;
//!     println!("{report:?}");
//!
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod geo;
pub mod gps;
pub mod photo_locator;
pub mod structs;
pub mod utils;

pub use error::PhotoLocationError;
pub use photo_locator::PhotoLocator;
