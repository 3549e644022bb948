//! The GPS-IFD modeled as a typed container instead of a raw tag dictionary.
//!
//! EXIF addresses GPS data by numeric tag ID. Readers that poke at the raw
//! mapping have to re-check the value shape on every access; here each access
//! goes through an accessor that distinguishes "tag absent" (`Ok(None)`) from
//! "tag present with the wrong shape" (`Err`).

use crate::gps::error::GpsDecodeError;
use crate::gps::structs::Rational;
use std::collections::BTreeMap;

pub const VERSION_ID: u16 = 0x0000;
pub const LATITUDE_REF: u16 = 0x0001;
pub const LATITUDE: u16 = 0x0002;
pub const LONGITUDE_REF: u16 = 0x0003;
pub const LONGITUDE: u16 = 0x0004;
pub const ALTITUDE_REF: u16 = 0x0005;
pub const ALTITUDE: u16 = 0x0006;
pub const TIME_STAMP: u16 = 0x0007;
pub const DATE_STAMP: u16 = 0x001d;

/// Display name of a GPS tag, for error messages.
pub fn name(tag: u16) -> &'static str {
    match tag {
        VERSION_ID => "GPSVersionID",
        LATITUDE_REF => "GPSLatitudeRef",
        LATITUDE => "GPSLatitude",
        LONGITUDE_REF => "GPSLongitudeRef",
        LONGITUDE => "GPSLongitude",
        ALTITUDE_REF => "GPSAltitudeRef",
        ALTITUDE => "GPSAltitude",
        TIME_STAMP => "GPSTimeStamp",
        DATE_STAMP => "GPSDateStamp",
        _ => "unknown GPS tag",
    }
}

/// Raw value of one GPS tag, in the shapes the GPS-IFD actually uses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagValue {
    Rational(Rational),
    RationalTriple([Rational; 3]),
    Byte(u8),
    ByteString(Vec<u8>),
}

/// The GPS tag group of one photo, keyed by numeric tag ID.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GpsIfd {
    entries: BTreeMap<u16, TagValue>,
}

impl GpsIfd {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, tag: u16, value: TagValue) {
        self.entries.insert(tag, value);
    }

    /// True when the photo carried no GPS tags at all.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn rational(&self, tag: u16) -> Result<Option<Rational>, GpsDecodeError> {
        match self.entries.get(&tag) {
            None => Ok(None),
            Some(TagValue::Rational(value)) => Ok(Some(*value)),
            Some(_) => Err(GpsDecodeError::UnexpectedType { tag: name(tag) }),
        }
    }

    pub fn rational_triple(&self, tag: u16) -> Result<Option<[Rational; 3]>, GpsDecodeError> {
        match self.entries.get(&tag) {
            None => Ok(None),
            Some(TagValue::RationalTriple(value)) => Ok(Some(*value)),
            Some(_) => Err(GpsDecodeError::UnexpectedType { tag: name(tag) }),
        }
    }

    pub fn byte(&self, tag: u16) -> Result<Option<u8>, GpsDecodeError> {
        match self.entries.get(&tag) {
            None => Ok(None),
            Some(TagValue::Byte(value)) => Ok(Some(*value)),
            Some(_) => Err(GpsDecodeError::UnexpectedType { tag: name(tag) }),
        }
    }

    /// Byte-string tags decoded as UTF-8. EXIF restricts them to ASCII, so a
    /// decode failure means the tag data is malformed.
    pub fn text(&self, tag: u16) -> Result<Option<String>, GpsDecodeError> {
        match self.entries.get(&tag) {
            None => Ok(None),
            Some(TagValue::ByteString(bytes)) => match std::str::from_utf8(bytes) {
                Ok(text) => Ok(Some(text.to_owned())),
                Err(_) => Err(GpsDecodeError::InvalidText { tag: name(tag) }),
            },
            Some(_) => Err(GpsDecodeError::UnexpectedType { tag: name(tag) }),
        }
    }
}
