use crate::error::PhotoLocationError;
use crate::geo::Geofence;
use crate::gps::decode::decode_gps;
use crate::gps::structs::Rational;
use crate::gps::tags::{self, GpsIfd, TagValue};
use crate::structs::{BatchReport, GeofenceReport, LocationOutcome, PhotoReport};
use crate::utils::list_files_filtered;
use bon::bon;
use exif::{In, Reader, Tag, Value};
use rayon::prelude::*;
use std::ffi::OsStr;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Photo formats the locator reads GPS data from.
pub const SUPPORTED_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "tif", "tiff", "png"];

/// The main entry point for extracting photo locations.
///
/// A locator is cheap to build and holds only sweep configuration, so one
/// instance can serve any number of photos; every operation is an independent,
/// stateless computation.
///
/// Use the builder pattern to construct an instance:
/// ```rust
/// # use photo_location::PhotoLocator;
/// let locator = PhotoLocator::builder()
///     .recursive(true) // Optionally configure parameters
///     .build();
/// ```
pub struct PhotoLocator {
    recursive: bool,
    include_hidden: bool,
}

#[bon]
impl PhotoLocator {
    /// Constructs a `PhotoLocator` via a builder pattern.
    ///
    /// # Builder Arguments
    ///
    /// * `recursive: bool` - (Default: `false`) Whether directory sweeps descend into subdirectories.
    /// * `include_hidden: bool` - (Default: `false`) Whether hidden files and directories are scanned.
    #[builder]
    pub fn new(
        #[builder(default = false)] recursive: bool,
        #[builder(default = false)] include_hidden: bool,
    ) -> Self {
        Self {
            recursive,
            include_hidden,
        }
    }

    /// Extracts the GPS location of a single photo.
    ///
    /// The returned report carries a tagged outcome: located, no location
    /// data, or a decode error when the photo's GPS tags are malformed.
    ///
    /// # Errors
    ///
    /// * [`PhotoLocationError::PathNotFound`] / [`PhotoLocationError::NotAFile`] when `photo` does not point at a file.
    /// * [`PhotoLocationError::UnsupportedFormat`] when the extension is not one of [`SUPPORTED_EXTENSIONS`].
    /// * [`PhotoLocationError::Io`] when the file cannot be opened.
    pub fn photo_location(&self, photo: &Path) -> Result<PhotoReport, PhotoLocationError> {
        check_photo_path(photo)?;
        Ok(PhotoReport::new(photo, decode_outcome(photo, None)?))
    }

    /// Like [`PhotoLocator::photo_location`], but a located photo is also
    /// classified against `fence`. A photo whose record is missing either
    /// coordinate half reports an incomplete-location outcome.
    pub fn photo_geofence(
        &self,
        photo: &Path,
        fence: &Geofence,
    ) -> Result<PhotoReport, PhotoLocationError> {
        check_photo_path(photo)?;
        Ok(PhotoReport::new(photo, decode_outcome(photo, Some(fence))?))
    }

    /// Extracts GPS locations from every supported photo in a directory.
    ///
    /// Photos are processed in parallel. Per-photo failures (unreadable file,
    /// malformed GPS tags) are isolated into that photo's outcome and never
    /// abort the rest of the sweep.
    ///
    /// # Errors
    ///
    /// * [`PhotoLocationError::PathNotFound`] / [`PhotoLocationError::NotADirectory`] when `directory` does not point at a directory.
    /// * [`PhotoLocationError::Walk`] when traversal itself fails.
    pub fn batch_photo_locations(
        &self,
        directory: &Path,
    ) -> Result<BatchReport, PhotoLocationError> {
        let photos = self.scan_photos(directory)?;
        let photos: Vec<PhotoReport> = photos
            .par_iter()
            .map(|photo| photo_report(photo, None))
            .collect();
        let with_location = photos
            .iter()
            .filter(|report| report.outcome.is_located())
            .count();

        Ok(BatchReport {
            directory: directory.to_path_buf(),
            with_location,
            photos,
        })
    }

    /// Sweeps a directory and classifies every located photo against `fence`.
    ///
    /// Same traversal and isolation rules as
    /// [`PhotoLocator::batch_photo_locations`].
    pub fn geofence_photos(
        &self,
        directory: &Path,
        fence: &Geofence,
    ) -> Result<GeofenceReport, PhotoLocationError> {
        let photos = self.scan_photos(directory)?;
        let photos: Vec<PhotoReport> = photos
            .par_iter()
            .map(|photo| photo_report(photo, Some(fence)))
            .collect();
        let matched = photos
            .iter()
            .filter(|report| report.outcome.matched_geofence())
            .count();

        Ok(GeofenceReport {
            directory: directory.to_path_buf(),
            fence: *fence,
            matched,
            photos,
        })
    }

    fn scan_photos(&self, directory: &Path) -> Result<Vec<PathBuf>, PhotoLocationError> {
        if !directory.exists() {
            return Err(PhotoLocationError::PathNotFound(directory.to_path_buf()));
        }
        if !directory.is_dir() {
            return Err(PhotoLocationError::NotADirectory(directory.to_path_buf()));
        }
        let files = list_files_filtered(directory, self.recursive, self.include_hidden)?;
        Ok(files
            .into_iter()
            .filter(|file| has_supported_extension(file))
            .collect())
    }
}

impl Default for PhotoLocator {
    fn default() -> Self {
        Self::builder().build()
    }
}

fn check_photo_path(photo: &Path) -> Result<(), PhotoLocationError> {
    if !photo.exists() {
        return Err(PhotoLocationError::PathNotFound(photo.to_path_buf()));
    }
    if !photo.is_file() {
        return Err(PhotoLocationError::NotAFile(photo.to_path_buf()));
    }
    if !has_supported_extension(photo) {
        let extension = photo
            .extension()
            .and_then(OsStr::to_str)
            .unwrap_or_default()
            .to_owned();
        return Err(PhotoLocationError::UnsupportedFormat {
            path: photo.to_path_buf(),
            extension,
        });
    }
    Ok(())
}

fn has_supported_extension(path: &Path) -> bool {
    path.extension()
        .and_then(OsStr::to_str)
        .is_some_and(|ext| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|supported| ext.eq_ignore_ascii_case(supported))
        })
}

/// Per-photo worker for directory sweeps: any failure becomes that photo's
/// outcome so the sweep itself never stops.
fn photo_report(photo: &Path, fence: Option<&Geofence>) -> PhotoReport {
    let outcome = decode_outcome(photo, fence).unwrap_or_else(|err| LocationOutcome::DecodeError {
        message: err.to_string(),
    });
    PhotoReport::new(photo, outcome)
}

fn decode_outcome(
    photo: &Path,
    fence: Option<&Geofence>,
) -> Result<LocationOutcome, PhotoLocationError> {
    let file = File::open(photo)?;
    let mut reader = BufReader::new(file);

    Ok(match Reader::new().read_from_container(&mut reader) {
        Ok(container) => {
            let decoded = decode_gps(&gps_ifd_from_exif(&container));
            match fence {
                Some(fence) => LocationOutcome::from_decode_with_geofence(decoded, fence),
                None => LocationOutcome::from_decode(decoded),
            }
        }
        // A photo without any EXIF block has no GPS group, which is an
        // expected outcome rather than an error.
        Err(exif::Error::NotFound(_)) => LocationOutcome::NoLocation,
        Err(err) => LocationOutcome::DecodeError {
            message: err.to_string(),
        },
    })
}

/// Collects the GPS tags of a parsed EXIF container into the typed GPS-IFD
/// the decoder works on.
fn gps_ifd_from_exif(container: &exif::Exif) -> GpsIfd {
    let mappings = [
        (tags::LATITUDE_REF, Tag::GPSLatitudeRef),
        (tags::LATITUDE, Tag::GPSLatitude),
        (tags::LONGITUDE_REF, Tag::GPSLongitudeRef),
        (tags::LONGITUDE, Tag::GPSLongitude),
        (tags::ALTITUDE_REF, Tag::GPSAltitudeRef),
        (tags::ALTITUDE, Tag::GPSAltitude),
        (tags::TIME_STAMP, Tag::GPSTimeStamp),
        (tags::DATE_STAMP, Tag::GPSDateStamp),
    ];

    let mut ifd = GpsIfd::new();
    for (id, tag) in mappings {
        let Some(field) = container.get_field(tag, In::PRIMARY) else {
            continue;
        };
        if let Some(value) = tag_value(&field.value) {
            ifd.insert(id, value);
        }
    }
    ifd
}

fn tag_value(value: &Value) -> Option<TagValue> {
    match value {
        Value::Rational(parts) => match parts.as_slice() {
            [single] => Some(TagValue::Rational(Rational::new(single.num, single.denom))),
            [degrees, minutes, seconds] => Some(TagValue::RationalTriple([
                Rational::new(degrees.num, degrees.denom),
                Rational::new(minutes.num, minutes.denom),
                Rational::new(seconds.num, seconds.denom),
            ])),
            _ => None,
        },
        Value::Byte(bytes) => bytes.first().map(|byte| TagValue::Byte(*byte)),
        Value::Ascii(lines) => lines.first().map(|line| TagValue::ByteString(line.clone())),
        _ => None,
    }
}
