use photo_location::PhotoLocator;
use photo_location::geo::{Coordinate, Geofence, GeofenceMode};
use std::env;
use std::path::PathBuf;

/// Scan a folder of photos and print the location report as JSON. Pass a
/// center "lat,lon" and a radius in km as extra arguments to geofence the
/// folder instead.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = env::args().skip(1);
    let directory = args.next().map(PathBuf::from).unwrap_or_else(|| PathBuf::from("."));

    let locator = PhotoLocator::builder().recursive(true).build();

    match (args.next(), args.next()) {
        (Some(center), Some(radius)) => {
            let (latitude, longitude) = center
                .split_once(',')
                .ok_or("center must be given as lat,lon")?;
            let mode = args
                .next()
                .map(|raw| raw.parse::<GeofenceMode>())
                .transpose()?
                .unwrap_or(GeofenceMode::Inside);
            let fence = Geofence::new(
                Coordinate::new(latitude.trim().parse()?, longitude.trim().parse()?),
                radius.parse()?,
                mode,
            );
            let report = locator.geofence_photos(&directory, &fence)?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        _ => {
            let report = locator.batch_photo_locations(&directory)?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}
