mod common;

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use common::{BRICKTOWN, FARMER, GridSource, LIBRARY, SIDE, geocoder, grid_point};
use geo::{Intersects, Point};
use walkshed_core::algo::ego_subgraph;
use walkshed_core::loading::meters_per_minute;
use walkshed_core::loading::osm::bbox_around;
use walkshed_core::{
    CityDataCache, Error, Geocoder, LoadConfig, bulk_isochrones, load_city_data, walking_isochrone,
};

#[test]
fn loads_grid_with_walking_times() {
    let city = load_city_data(&LoadConfig::default(), &GridSource::default(), &geocoder()).unwrap();

    assert_eq!(city.streets.node_count(), SIDE * SIDE);
    // every segment in both directions
    assert_eq!(city.streets.edge_count(), 2 * 2 * SIDE * (SIDE - 1));
    assert_eq!(city.amenities.len(), SIDE + 1);

    let speed = meters_per_minute(4.5);
    for edge in city.streets.graph().edge_references() {
        let weight = edge.weight();
        assert!(weight.length > 0.0);
        assert!(weight.time >= 0.0);
        assert!((weight.time - weight.length / speed).abs() < 1e-9);
    }
}

#[test]
fn amenities_are_fetched_from_their_own_square() {
    let config = LoadConfig { network_dist_m: 2000.0, amenity_dist_m: 1000.0, ..LoadConfig::default() };
    let source = GridSource::default();
    load_city_data(&config, &source, &geocoder()).unwrap();

    let center = grid_point(4, 4);
    let streets = source.street_boxes.lock().unwrap();
    let amenities = source.amenity_boxes.lock().unwrap();
    assert_eq!(streets.as_slice(), &[bbox_around(center, 2000.0)]);
    assert_eq!(amenities.as_slice(), &[bbox_around(center, 1000.0)]);
    // half the reach in every direction
    let ratio = amenities[0].width() / streets[0].width();
    assert!((ratio - 0.5).abs() < 1e-3);
}

#[test]
fn five_minutes_from_library_street() {
    let city = load_city_data(&LoadConfig::default(), &GridSource::default(), &geocoder()).unwrap();
    let iso = walking_isochrone(&city, &geocoder(), LIBRARY, 5.0, "1234 Library St").unwrap();

    let bbox = iso.bbox;
    assert!(bbox.north >= bbox.south);
    assert!(bbox.east >= bbox.west);
    let origin = iso.subgraph.streets.graph()[iso.subgraph.origin].geometry;
    assert_eq!(origin, grid_point(4, 4));
    assert!(bbox.contains(&origin));

    // 5 minutes cover a few blocks but not the whole grid
    assert!(iso.subgraph.node_count() > 1);
    assert!(iso.subgraph.node_count() < SIDE * SIDE);

    let ids: Vec<i64> = iso.amenities.iter().map(|a| a.osm_id).collect();
    assert!(ids.contains(&5004));
    assert!(!ids.contains(&6000));
    assert!(iso.amenities.iter().all(|a| a.geometry.intersects(&bbox.to_rect())));
    assert_eq!(bbox.filter_amenities(&iso.amenities), iso.amenities);
    assert_eq!(iso.tally().total(), iso.amenities.len());
}

#[test]
fn reachable_area_grows_with_budget() {
    let city = load_city_data(&LoadConfig::default(), &GridSource::default(), &geocoder()).unwrap();
    let origin = city.streets.nearest_node(&grid_point(1, 7)).unwrap();

    let subgraphs: Vec<_> = (1..=15)
        .map(|minutes| ego_subgraph(&city.streets, origin, f64::from(minutes)).unwrap())
        .collect();

    for pair in subgraphs.windows(2) {
        assert!(pair[0].osm_node_ids().is_subset(&pair[1].osm_node_ids()));
        assert!(pair[0].osm_edges().is_subset(&pair[1].osm_edges()));
    }
    assert!(subgraphs[14].node_count() > subgraphs[0].node_count());
}

#[test]
fn all_garages_in_parallel() {
    let city = load_city_data(&LoadConfig::default(), &GridSource::default(), &geocoder()).unwrap();
    let origins: Vec<(String, String)> = [
        ("1234 Library St", LIBRARY),
        ("1188 Farmer St", FARMER),
        ("Bricktown Parking Garage", BRICKTOWN),
    ]
    .iter()
    .map(|(label, address)| (label.to_string(), address.to_string()))
    .collect();

    let isochrones = bulk_isochrones(&city, &geocoder(), &origins, 3.0).unwrap();
    let labels: Vec<&str> = isochrones.iter().map(|iso| iso.label.as_str()).collect();
    assert_eq!(labels, ["1234 Library St", "1188 Farmer St", "Bricktown Parking Garage"]);

    let unknown = vec![("Nowhere".to_string(), "1 Nowhere Rd".to_string())];
    assert!(matches!(
        bulk_isochrones(&city, &geocoder(), &unknown, 3.0),
        Err(Error::AddressNotFound(_))
    ));
}

/// Geocoder that records how many lookups overlap
struct OneAtATime {
    inner: walkshed_core::loading::StaticGeocoder,
    in_flight: AtomicUsize,
    peak: AtomicUsize,
    lookups: Mutex<Vec<String>>,
}

impl Geocoder for OneAtATime {
    fn geocode(&self, address: &str) -> Result<Point<f64>, Error> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        self.lookups.lock().unwrap().push(address.to_string());
        std::thread::sleep(Duration::from_millis(20));
        let result = self.inner.geocode(address);
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        result
    }
}

#[test]
fn bulk_geocodes_sequentially_in_order() {
    let city = load_city_data(&LoadConfig::default(), &GridSource::default(), &geocoder()).unwrap();
    let geocoder = OneAtATime {
        inner: geocoder(),
        in_flight: AtomicUsize::new(0),
        peak: AtomicUsize::new(0),
        lookups: Mutex::new(Vec::new()),
    };
    let origins: Vec<(String, String)> = [LIBRARY, FARMER, BRICKTOWN, FARMER, LIBRARY]
        .iter()
        .enumerate()
        .map(|(i, address)| (format!("garage {i}"), address.to_string()))
        .collect();

    let isochrones = bulk_isochrones(&city, &geocoder, &origins, 2.0).unwrap();

    assert_eq!(geocoder.peak.load(Ordering::SeqCst), 1);
    assert_eq!(
        *geocoder.lookups.lock().unwrap(),
        [LIBRARY, FARMER, BRICKTOWN, FARMER, LIBRARY]
    );
    assert_eq!(isochrones.len(), 5);
    assert_eq!(isochrones[2].label, "garage 2");
    assert_eq!(isochrones[2].location, grid_point(7, 2));
}

#[test]
fn cache_hits_providers_once() {
    let source = GridSource::default();
    let cache = CityDataCache::new(None);
    let config = LoadConfig::default();

    let first = cache.load(&config, &source, &geocoder()).unwrap();
    let second = cache.load(&config, &source, &geocoder()).unwrap();
    assert!(std::sync::Arc::ptr_eq(&first, &second));
    assert_eq!(source.street_calls.load(Ordering::SeqCst), 1);
    assert_eq!(source.amenity_calls.load(Ordering::SeqCst), 1);

    let faster = LoadConfig {
        walking_speed_kmh: 6.0,
        ..config
    };
    let reloaded = cache.load(&faster, &source, &geocoder()).unwrap();
    assert_eq!(reloaded.key.walking_speed_kmh, 6.0);
    assert_eq!(source.street_calls.load(Ordering::SeqCst), 2);
}
