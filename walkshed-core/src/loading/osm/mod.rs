//! OpenStreetMap data: Overpass queries, street graph construction and
//! amenity geometry assembly

mod amenities;
mod elements;
mod overpass;
mod processor;

pub use amenities::amenities_from_elements;
pub use elements::{ElementMember, LatLon, OsmElement};
pub use overpass::{MapDataSource, OVERPASS_URL, OverpassClient, amenity_query, street_query};
pub use processor::{bbox_around, create_street_graph};
