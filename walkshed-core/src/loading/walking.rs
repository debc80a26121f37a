use crate::{Error, model::StreetGraph};

/// Distance covered in one minute at `speed_kmh`
pub fn meters_per_minute(speed_kmh: f64) -> f64 {
    speed_kmh * 1000.0 / 60.0
}

/// Sets the walking time (minutes) of every edge from its length.
///
/// # Errors
///
/// Returns an error if the speed is not a finite positive number
pub fn annotate_walking_time(streets: &mut StreetGraph, speed_kmh: f64) -> Result<(), Error> {
    if !speed_kmh.is_finite() || speed_kmh <= 0.0 {
        return Err(Error::InvalidParameter(format!(
            "walking speed must be positive, got {speed_kmh} km/h"
        )));
    }

    let meters_per_minute = meters_per_minute(speed_kmh);
    for edge in streets.edge_weights_mut() {
        edge.time = edge.length / meters_per_minute;
    }

    Ok(())
}
