#![allow(dead_code)]

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use geo::{Point, Rect, point};
use walkshed_core::loading::StaticGeocoder;
use walkshed_core::loading::osm::OsmElement;
use walkshed_core::{DEFAULT_CENTER_ADDRESS, Error, MapDataSource};

pub const SIDE: usize = 9;
pub const LON0: f64 = -83.053;
pub const LAT0: f64 = 42.3325;
pub const DLON: f64 = 0.001;
pub const DLAT: f64 = 0.0007;

pub const LIBRARY: &str = "1234 Library St, Detroit, MI 48226";
pub const FARMER: &str = "1188 Farmer St, Detroit, MI 48226";
pub const BRICKTOWN: &str = "419 E Fort St, Detroit, MI 48226";

pub fn grid_point(row: usize, col: usize) -> Point<f64> {
    point!(x: LON0 + col as f64 * DLON, y: LAT0 + row as f64 * DLAT)
}

fn node_id(row: usize, col: usize) -> i64 {
    (row * SIDE + col) as i64 + 1
}

/// Downtown-sized street grid with one `amenity` node per street corner
/// on the diagonal and one far outside the grid.
#[derive(Default)]
pub struct GridSource {
    pub street_calls: AtomicUsize,
    pub amenity_calls: AtomicUsize,
    pub street_boxes: Mutex<Vec<Rect<f64>>>,
    pub amenity_boxes: Mutex<Vec<Rect<f64>>>,
}

impl MapDataSource for GridSource {
    fn street_elements(&self, bbox: Rect<f64>) -> Result<Vec<OsmElement>, Error> {
        self.street_calls.fetch_add(1, Ordering::SeqCst);
        self.street_boxes.lock().unwrap().push(bbox);

        let mut elements = Vec::new();
        for row in 0..SIDE {
            for col in 0..SIDE {
                let p = grid_point(row, col);
                elements.push(OsmElement::node(node_id(row, col), p.y(), p.x()));
            }
        }
        for i in 0..SIDE {
            let street: Vec<i64> = (0..SIDE).map(|col| node_id(i, col)).collect();
            let avenue: Vec<i64> = (0..SIDE).map(|row| node_id(row, i)).collect();
            elements.push(OsmElement::way(1000 + i as i64, street).with_tag("highway", "residential"));
            elements.push(OsmElement::way(2000 + i as i64, avenue).with_tag("highway", "footway"));
        }
        Ok(elements)
    }

    fn amenity_elements(&self, bbox: Rect<f64>) -> Result<Vec<OsmElement>, Error> {
        self.amenity_calls.fetch_add(1, Ordering::SeqCst);
        self.amenity_boxes.lock().unwrap().push(bbox);

        let categories = ["cafe", "restaurant", "bar", "cafe", "bank", "cafe", "restaurant", "parking", "cafe"];
        let mut elements: Vec<OsmElement> = categories
            .iter()
            .enumerate()
            .map(|(i, category)| {
                let p = grid_point(i, i);
                OsmElement::node(5000 + i as i64, p.y() + 0.0001, p.x() + 0.0001)
                    .with_tag("amenity", category)
            })
            .collect();
        elements.push(OsmElement::node(6000, LAT0 + 0.05, LON0 + 0.05).with_tag("amenity", "fuel"));
        Ok(elements)
    }
}

pub fn geocoder() -> StaticGeocoder {
    StaticGeocoder::new()
        .with(DEFAULT_CENTER_ADDRESS, grid_point(4, 4))
        .with(LIBRARY, grid_point(4, 4))
        .with(FARMER, grid_point(1, 7))
        .with(BRICKTOWN, grid_point(7, 2))
}
