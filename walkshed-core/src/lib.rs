//! Walking isochrones over OpenStreetMap street networks.
//!
//! The crate loads a walkable street graph and the amenities around a
//! center address, finds the part of the network reachable on foot within
//! a time budget from a geocoded origin, and filters the amenities to the
//! bounding box of that reachable area.

pub mod algo;
pub mod config;
mod error;
pub mod loading;
pub mod model;
pub mod prelude;
pub mod render;
pub mod routing;
pub mod snapshot;
pub mod summary;

pub use error::Error;

pub use algo::isochrone::{Isochrone, bulk_isochrones, walking_isochrone};
pub use loading::{
    CityDataCache, Geocoder, LoadConfig, LoadKey, MapDataSource, NominatimGeocoder,
    OverpassClient, load_city_data,
};
pub use model::{Amenity, CityData, StreetGraph};

/// Index of a node in the street graph
pub type StreetNodeId = petgraph::graph::NodeIndex;

/// Walking time in minutes
pub type Minutes = f64;

/// Address the street network and amenities are fetched around
pub const DEFAULT_CENTER_ADDRESS: &str = "2001 Woodward Ave, Detroit, MI 48226";

/// Assumed walking speed used to turn segment lengths into walking times.
pub const DEFAULT_WALKING_SPEED_KMH: f64 = 4.5;

/// Street network search distance around the center address, meters
pub const DEFAULT_NETWORK_DIST_M: f64 = 2000.0;

/// Amenity search distance around the center address, meters
pub const DEFAULT_AMENITY_DIST_M: f64 = 1000.0;
