//! Data model for walking isochrones
//!
//! Contains the street network, the amenity collection and the cached
//! pair of both.

pub mod amenity;
pub mod city;
pub mod streets;

pub use amenity::{Amenity, OsmElementType, amenities_to_geojson};
pub use city::CityData;
pub use streets::{LocalProjection, StreetEdge, StreetGraph, StreetNode};
