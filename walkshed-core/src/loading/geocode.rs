//! Address geocoding

use std::time::Duration;

use geo::Point;
use hashbrown::HashMap;
use log::debug;
use serde::Deserialize;

use crate::Error;

pub const NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org/search";

/// Resolves a free-text address to a point (`x` = longitude, `y` = latitude)
pub trait Geocoder: Send + Sync {
    fn geocode(&self, address: &str) -> Result<Point<f64>, Error>;
}

/// Geocoder backed by the Nominatim search API
#[derive(Debug, Clone)]
pub struct NominatimGeocoder {
    client: reqwest::blocking::Client,
    url: String,
}

#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
}

impl NominatimGeocoder {
    pub fn new(url: impl Into<String>, user_agent: &str) -> Result<Self, Error> {
        let client = reqwest::blocking::Client::builder()
            .connect_timeout(Duration::from_secs(30))
            .timeout(Duration::from_secs(60))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

impl Geocoder for NominatimGeocoder {
    fn geocode(&self, address: &str) -> Result<Point<f64>, Error> {
        debug!("Geocoding '{address}' with {}", self.url);

        let response = self
            .client
            .get(&self.url)
            .query(&[("q", address), ("format", "json"), ("limit", "1")])
            .send()?;

        if !response.status().is_success() {
            return Err(Error::NetworkError(format!(
                "Nominatim returned status {}",
                response.status()
            )));
        }

        let places: Vec<NominatimPlace> = response.json()?;
        let place = places
            .into_iter()
            .next()
            .ok_or_else(|| Error::AddressNotFound(address.to_string()))?;

        parse_place(&place)
    }
}

fn parse_place(place: &NominatimPlace) -> Result<Point<f64>, Error> {
    let lat = place
        .lat
        .parse::<f64>()
        .map_err(|e| Error::ProviderResponse(format!("bad latitude '{}': {e}", place.lat)))?;
    let lon = place
        .lon
        .parse::<f64>()
        .map_err(|e| Error::ProviderResponse(format!("bad longitude '{}': {e}", place.lon)))?;
    Ok(Point::new(lon, lat))
}

/// Geocoder answering from a fixed table of known addresses
#[derive(Debug, Clone, Default)]
pub struct StaticGeocoder {
    locations: HashMap<String, Point<f64>>,
}

impl StaticGeocoder {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, address: impl Into<String>, location: Point<f64>) -> Self {
        self.locations.insert(address.into(), location);
        self
    }
}

impl Geocoder for StaticGeocoder {
    fn geocode(&self, address: &str) -> Result<Point<f64>, Error> {
        self.locations
            .get(address)
            .copied()
            .ok_or_else(|| Error::AddressNotFound(address.to_string()))
    }
}
