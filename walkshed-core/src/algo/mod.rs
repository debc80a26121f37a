//! Isochrone computation and bounding-box filtering

pub mod bbox;
pub mod isochrone;

pub use bbox::BoundingBox;
pub use isochrone::{Isochrone, Subgraph, ego_subgraph, isochrone_from_point};
