use log::info;

use super::config::LoadConfig;
use super::geocode::Geocoder;
use super::osm::{MapDataSource, amenities_from_elements, bbox_around, create_street_graph};
use super::walking::annotate_walking_time;
use crate::{Error, model::CityData};

/// Loads the walking network and amenities around the configured center
///
/// # Errors
///
/// Returns an error if the center cannot be geocoded, a provider request
/// fails, or the provider returns no walkable streets
pub fn load_city_data(
    config: &LoadConfig,
    source: &dyn MapDataSource,
    geocoder: &dyn Geocoder,
) -> Result<CityData, Error> {
    validate_config(config)?;

    info!("Geocoding center address: {}", config.center_address);
    let center = geocoder.geocode(&config.center_address)?;
    let bbox = bbox_around(center, config.network_dist_m);
    let amenity_bbox = bbox_around(center, config.amenity_dist_m);

    // Amenities are fetched while the street graph is being built
    let (streets, amenities) = std::thread::scope(|scope| {
        let amenity_handle = scope.spawn(|| {
            info!(
                "Fetching amenities within {} m of the center",
                config.amenity_dist_m
            );
            source
                .amenity_elements(amenity_bbox)
                .map(|elements| amenities_from_elements(&elements))
        });

        info!(
            "Processing street data (OSM) within {} m of the center",
            config.network_dist_m
        );
        let streets = source
            .street_elements(bbox)
            .and_then(|elements| create_street_graph(&elements, bbox))
            .and_then(|mut streets| {
                annotate_walking_time(&mut streets, config.walking_speed_kmh)?;
                Ok(streets)
            });

        let amenities = amenity_handle
            .join()
            .map_err(|_| Error::NetworkError("amenity fetch thread panicked".to_string()))?;

        Ok::<_, Error>((streets?, amenities?))
    })?;

    info!(
        "City data loaded: {} street nodes, {} street edges, {} amenities",
        streets.node_count(),
        streets.edge_count(),
        amenities.len()
    );

    Ok(CityData::new(streets, amenities, config.key()))
}

fn validate_config(config: &LoadConfig) -> Result<(), Error> {
    if config.center_address.trim().is_empty() {
        return Err(Error::InvalidParameter(
            "center address must not be empty".to_string(),
        ));
    }

    for (name, value) in [
        ("network distance", config.network_dist_m),
        ("amenity distance", config.amenity_dist_m),
        ("walking speed", config.walking_speed_kmh),
    ] {
        if !value.is_finite() || value <= 0.0 {
            return Err(Error::InvalidParameter(format!(
                "{name} must be positive, got {value}"
            )));
        }
    }

    Ok(())
}
