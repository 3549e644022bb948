//! Module for decoding the EXIF GPS tag group into decimal coordinates.
pub mod decode;
pub mod error;
pub mod structs;
pub mod tags;

pub use decode::decode_gps;
pub use error::GpsDecodeError;
pub use structs::{GpsLocation, Hemisphere, Rational};
pub use tags::{GpsIfd, TagValue};
