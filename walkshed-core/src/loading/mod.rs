//! This module is responsible for fetching street and amenity data from
//! OpenStreetMap providers, geocoding addresses and building the cached
//! city data the isochrone engine works on.

mod builder;
mod cache;
mod config;
pub mod geocode;
pub mod osm;
mod walking;

pub use builder::load_city_data;
pub use cache::CityDataCache;
pub use config::{LoadConfig, LoadKey};
pub use geocode::{Geocoder, NominatimGeocoder, StaticGeocoder};
pub use osm::{MapDataSource, OverpassClient};
pub use walking::{annotate_walking_time, meters_per_minute};
