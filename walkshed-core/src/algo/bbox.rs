//! Bounding boxes of reachable areas and amenity filtering

use geo::{Intersects, Point, Rect, coord};
use rayon::prelude::*;
use serde::Serialize;

use crate::model::Amenity;

/// Latitude/longitude extent of a set of points
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoundingBox {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
}

impl BoundingBox {
    /// Smallest box holding every point, `None` when there are no points
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Point<f64>>,
    {
        points.into_iter().fold(None, |bbox, p| {
            Some(match bbox {
                None => Self {
                    north: p.y(),
                    south: p.y(),
                    east: p.x(),
                    west: p.x(),
                },
                Some(b) => Self {
                    north: b.north.max(p.y()),
                    south: b.south.min(p.y()),
                    east: b.east.max(p.x()),
                    west: b.west.min(p.x()),
                },
            })
        })
    }

    pub fn to_rect(&self) -> Rect<f64> {
        Rect::new(
            coord! { x: self.west, y: self.south },
            coord! { x: self.east, y: self.north },
        )
    }

    /// Inclusive containment test
    pub fn contains(&self, point: &Point<f64>) -> bool {
        (self.south..=self.north).contains(&point.y()) && (self.west..=self.east).contains(&point.x())
    }

    /// Amenities whose geometry touches the box.
    ///
    /// The box over-approximates the reachable area: anything in its
    /// corners is kept even if no reachable street passes nearby.
    pub fn filter_amenities(&self, amenities: &[Amenity]) -> Vec<Amenity> {
        let rect = self.to_rect();
        amenities
            .par_iter()
            .filter(|amenity| amenity.geometry.intersects(&rect))
            .cloned()
            .collect()
    }
}
