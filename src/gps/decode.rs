//! Conversion of raw GPS-IFD tag values into signed decimal coordinates.

use crate::gps::error::GpsDecodeError;
use crate::gps::structs::{GpsLocation, Hemisphere, Rational};
use crate::gps::tags::{self, GpsIfd};
use chrono::{DateTime, NaiveDate, Utc};

/// Decodes the GPS tag group of one photo.
///
/// Returns `Ok(None)` when the photo genuinely has no location data: the GPS
/// group is absent or empty, or latitude, longitude and altitude are all
/// missing after the presence rules below. Malformed tag data is a
/// [`GpsDecodeError`] instead, so callers can tell the two apart.
///
/// An angle is decoded only when both its tag and its hemisphere-reference tag
/// are present; a lone half leaves that field absent rather than zero.
/// Altitude needs only its own tag, with the sign-reference byte defaulting to
/// above sea level. Out-of-range angles from malformed EXIF are passed through
/// unmodified.
pub fn decode_gps(ifd: &GpsIfd) -> Result<Option<GpsLocation>, GpsDecodeError> {
    if ifd.is_empty() {
        return Ok(None);
    }

    let location = GpsLocation {
        latitude: signed_angle(ifd, tags::LATITUDE, tags::LATITUDE_REF)?,
        longitude: signed_angle(ifd, tags::LONGITUDE, tags::LONGITUDE_REF)?,
        altitude: altitude(ifd)?,
        timestamp: timestamp(ifd)?,
    };

    if location.is_empty() {
        return Ok(None);
    }
    Ok(Some(location))
}

fn signed_angle(
    ifd: &GpsIfd,
    angle_tag: u16,
    ref_tag: u16,
) -> Result<Option<f64>, GpsDecodeError> {
    let (Some(angle), Some(reference)) = (ifd.rational_triple(angle_tag)?, ifd.text(ref_tag)?)
    else {
        return Ok(None);
    };

    let hemisphere =
        Hemisphere::from_ascii(&reference).ok_or_else(|| GpsDecodeError::InvalidHemisphere {
            tag: tags::name(ref_tag),
            value: reference.clone(),
        })?;

    Ok(Some(hemisphere.sign() * sexagesimal_degrees(angle, angle_tag)?))
}

/// `deg + min/60 + sec/3600` over the three rationals of an angle tag.
fn sexagesimal_degrees(angle: [Rational; 3], tag: u16) -> Result<f64, GpsDecodeError> {
    let [degrees, minutes, seconds] = angle.map(Rational::to_f64);
    match (degrees, minutes, seconds) {
        (Some(degrees), Some(minutes), Some(seconds)) => {
            Ok(degrees + minutes / 60.0 + seconds / 3600.0)
        }
        _ => Err(GpsDecodeError::ZeroDenominator { tag: tags::name(tag) }),
    }
}

fn altitude(ifd: &GpsIfd) -> Result<Option<f64>, GpsDecodeError> {
    let Some(raw) = ifd.rational(tags::ALTITUDE)? else {
        return Ok(None);
    };
    let magnitude = raw.to_f64().ok_or(GpsDecodeError::ZeroDenominator {
        tag: tags::name(tags::ALTITUDE),
    })?;

    // Reference byte 1 means below sea level; any other value, or no byte at
    // all, is treated as above.
    let below_sea_level = ifd.byte(tags::ALTITUDE_REF)? == Some(1);
    Ok(Some(if below_sea_level { -magnitude } else { magnitude }))
}

/// Capture moment from `GPSDateStamp` ("YYYY:MM:DD") plus the `GPSTimeStamp`
/// rational triple. Both tags must be present; a value that parses but does
/// not form a valid date or time yields absence rather than an error.
fn timestamp(ifd: &GpsIfd) -> Result<Option<DateTime<Utc>>, GpsDecodeError> {
    let (Some(time), Some(date)) = (
        ifd.rational_triple(tags::TIME_STAMP)?,
        ifd.text(tags::DATE_STAMP)?,
    ) else {
        return Ok(None);
    };

    let [hours, minutes, seconds] = time.map(Rational::to_f64);
    let (Some(hours), Some(minutes), Some(seconds)) = (hours, minutes, seconds) else {
        return Err(GpsDecodeError::ZeroDenominator {
            tag: tags::name(tags::TIME_STAMP),
        });
    };

    let Ok(day) = NaiveDate::parse_from_str(date.trim_end_matches('\0').trim(), "%Y:%m:%d") else {
        return Ok(None);
    };
    let micros = ((seconds - seconds.trunc()) * 1_000_000.0).round() as u32;
    let moment = day.and_hms_micro_opt(
        hours as u32,
        minutes as u32,
        seconds.trunc() as u32,
        micros,
    );
    Ok(moment.map(|naive| naive.and_utc()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gps::tags::TagValue;

    fn triple(d: u32, m: u32, s: u32) -> TagValue {
        TagValue::RationalTriple([
            Rational::new(d, 1),
            Rational::new(m, 1),
            Rational::new(s, 1),
        ])
    }

    fn reference(letter: &str) -> TagValue {
        TagValue::ByteString(letter.as_bytes().to_vec())
    }

    /// 37°33'54" N, 126°58'0" E with a 265.5 m altitude: a full, well-formed
    /// GPS group.
    fn full_ifd() -> GpsIfd {
        let mut ifd = GpsIfd::new();
        ifd.insert(tags::LATITUDE_REF, reference("N"));
        ifd.insert(tags::LATITUDE, triple(37, 33, 54));
        ifd.insert(tags::LONGITUDE_REF, reference("E"));
        ifd.insert(tags::LONGITUDE, triple(126, 58, 0));
        ifd.insert(tags::ALTITUDE_REF, TagValue::Byte(0));
        ifd.insert(tags::ALTITUDE, TagValue::Rational(Rational::new(2655, 10)));
        ifd
    }

    #[test]
    fn test_full_group_decodes_to_decimal_degrees() {
        let location = decode_gps(&full_ifd()).unwrap().unwrap();

        assert!((location.latitude.unwrap() - 37.565).abs() < 1e-9);
        assert!((location.longitude.unwrap() - (126.0 + 58.0 / 60.0)).abs() < 1e-9);
        assert_eq!(location.altitude, Some(265.5));
        assert!(location.timestamp.is_none());
    }

    #[test]
    fn test_south_and_west_references_negate() {
        let mut ifd = full_ifd();
        ifd.insert(tags::LATITUDE_REF, reference("S"));
        ifd.insert(tags::LONGITUDE_REF, reference("W"));

        let location = decode_gps(&ifd).unwrap().unwrap();
        assert!((location.latitude.unwrap() + 37.565).abs() < 1e-9);
        assert!(location.longitude.unwrap() < 0.0);
    }

    #[test]
    fn test_empty_group_is_no_location() {
        assert_eq!(decode_gps(&GpsIfd::new()), Ok(None));
    }

    #[test]
    fn test_angle_without_reference_leaves_field_absent() {
        let mut ifd = GpsIfd::new();
        ifd.insert(tags::LATITUDE, triple(37, 33, 54));
        ifd.insert(tags::LONGITUDE_REF, reference("E"));
        ifd.insert(tags::LONGITUDE, triple(126, 58, 0));

        let location = decode_gps(&ifd).unwrap().unwrap();
        assert_eq!(location.latitude, None, "latitude must be absent, not zero");
        assert!(location.longitude.is_some());
    }

    #[test]
    fn test_reference_without_angle_is_no_location() {
        let mut ifd = GpsIfd::new();
        ifd.insert(tags::LATITUDE_REF, reference("N"));

        assert_eq!(decode_gps(&ifd), Ok(None));
    }

    #[test]
    fn test_altitude_alone_is_a_location() {
        let mut ifd = GpsIfd::new();
        ifd.insert(tags::ALTITUDE, TagValue::Rational(Rational::new(120, 1)));

        let location = decode_gps(&ifd).unwrap().unwrap();
        assert_eq!(location.altitude, Some(120.0));
        assert_eq!(location.latitude, None);
    }

    #[test]
    fn test_altitude_reference_one_negates() {
        let mut ifd = full_ifd();
        ifd.insert(tags::ALTITUDE_REF, TagValue::Byte(1));

        let location = decode_gps(&ifd).unwrap().unwrap();
        assert_eq!(location.altitude, Some(-265.5));
    }

    #[test]
    fn test_altitude_reference_other_values_stay_positive() {
        // Only a reference byte of exactly 1 negates; other values fall back
        // to above sea level. A missing byte is covered by
        // test_altitude_alone_is_a_location.
        let mut ifd = full_ifd();
        ifd.insert(tags::ALTITUDE, TagValue::Rational(Rational::new(12, 1)));
        ifd.insert(tags::ALTITUDE_REF, TagValue::Byte(2));

        assert_eq!(decode_gps(&ifd).unwrap().unwrap().altitude, Some(12.0));
    }

    #[test]
    fn test_zero_denominator_is_a_decode_error() {
        let mut ifd = full_ifd();
        ifd.insert(
            tags::LATITUDE,
            TagValue::RationalTriple([
                Rational::new(37, 1),
                Rational::new(33, 0),
                Rational::new(54, 1),
            ]),
        );

        assert_eq!(
            decode_gps(&ifd),
            Err(GpsDecodeError::ZeroDenominator { tag: "GPSLatitude" })
        );
    }

    #[test]
    fn test_unknown_hemisphere_letter_is_a_decode_error() {
        let mut ifd = full_ifd();
        ifd.insert(tags::LATITUDE_REF, reference("X"));

        assert_eq!(
            decode_gps(&ifd),
            Err(GpsDecodeError::InvalidHemisphere {
                tag: "GPSLatitudeRef",
                value: "X".to_owned(),
            })
        );
    }

    #[test]
    fn test_wrong_tag_shape_is_a_decode_error() {
        let mut ifd = full_ifd();
        ifd.insert(tags::LATITUDE, TagValue::Byte(37));

        assert!(matches!(
            decode_gps(&ifd),
            Err(GpsDecodeError::UnexpectedType { .. })
        ));
    }

    #[test]
    fn test_out_of_range_angle_passes_through() {
        // Malformed EXIF can encode a latitude beyond 90 degrees; the decoder
        // hands it on unclamped.
        let mut ifd = GpsIfd::new();
        ifd.insert(tags::LATITUDE_REF, reference("N"));
        ifd.insert(tags::LATITUDE, triple(95, 30, 0));

        let location = decode_gps(&ifd).unwrap().unwrap();
        assert!((location.latitude.unwrap() - 95.5).abs() < 1e-9);
    }

    #[test]
    fn test_timestamp_decodes_when_both_tags_present() {
        let mut ifd = full_ifd();
        ifd.insert(tags::TIME_STAMP, triple(12, 34, 56));
        ifd.insert(tags::DATE_STAMP, TagValue::ByteString(b"2024:06:01".to_vec()));

        let location = decode_gps(&ifd).unwrap().unwrap();
        let expected = NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_micro_opt(12, 34, 56, 0)
            .unwrap()
            .and_utc();
        assert_eq!(location.timestamp, Some(expected));
    }

    #[test]
    fn test_unparseable_date_stamp_yields_absent_timestamp() {
        let mut ifd = full_ifd();
        ifd.insert(tags::TIME_STAMP, triple(12, 34, 56));
        ifd.insert(tags::DATE_STAMP, TagValue::ByteString(b"last tuesday".to_vec()));

        let location = decode_gps(&ifd).unwrap().unwrap();
        assert_eq!(location.timestamp, None);
    }

    #[test]
    fn test_timestamp_alone_is_still_no_location() {
        let mut ifd = GpsIfd::new();
        ifd.insert(tags::TIME_STAMP, triple(12, 34, 56));
        ifd.insert(tags::DATE_STAMP, TagValue::ByteString(b"2024:06:01".to_vec()));

        assert_eq!(decode_gps(&ifd), Ok(None));
    }

    #[test]
    fn test_zero_denominator_in_time_stamp_is_a_decode_error() {
        let mut ifd = full_ifd();
        ifd.insert(
            tags::TIME_STAMP,
            TagValue::RationalTriple([
                Rational::new(12, 1),
                Rational::new(34, 1),
                Rational::new(56, 0),
            ]),
        );
        ifd.insert(tags::DATE_STAMP, TagValue::ByteString(b"2024:06:01".to_vec()));

        assert_eq!(
            decode_gps(&ifd),
            Err(GpsDecodeError::ZeroDenominator { tag: "GPSTimeStamp" })
        );
    }
}
