pub use crate::DEFAULT_WALKING_SPEED_KMH;

// Re-export key components
pub use crate::algo::{BoundingBox, Isochrone, Subgraph, ego_subgraph, isochrone_from_point};
pub use crate::algo::isochrone::{bulk_isochrones, walking_isochrone};
pub use crate::config::{Garage, Settings};
pub use crate::loading::{
    CityDataCache, Geocoder, LoadConfig, MapDataSource, NominatimGeocoder, OverpassClient,
    load_city_data,
};
pub use crate::model::{Amenity, CityData, StreetGraph};
pub use crate::render::{RenderOptions, render_isochrone_svg, save_isochrone_svg};
pub use crate::summary::AmenityTally;

// Core types for the street network
pub use crate::Minutes;
pub use crate::StreetNodeId;
