//! TOML settings shared by the server and the command line

use std::path::Path;

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::loading::geocode::NOMINATIM_URL;
use crate::loading::osm::OVERPASS_URL;
use crate::{
    DEFAULT_AMENITY_DIST_M, DEFAULT_CENTER_ADDRESS, DEFAULT_NETWORK_DIST_M,
    DEFAULT_WALKING_SPEED_KMH, Error, LoadConfig, NominatimGeocoder, OverpassClient,
};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub server: ServerSettings,
    pub data: DataSettings,
    /// Parking structures offered as origins, in display order
    pub garages: Vec<Garage>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerSettings {
    pub bind: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:8080".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DataSettings {
    pub center_address: String,
    pub network_dist_m: f64,
    pub amenity_dist_m: f64,
    pub walking_speed_kmh: f64,
    pub overpass_url: String,
    pub nominatim_url: String,
    pub user_agent: String,
    /// Cached city data older than this is reloaded; never expires when unset
    pub max_age_minutes: Option<i64>,
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            center_address: DEFAULT_CENTER_ADDRESS.to_string(),
            network_dist_m: DEFAULT_NETWORK_DIST_M,
            amenity_dist_m: DEFAULT_AMENITY_DIST_M,
            walking_speed_kmh: DEFAULT_WALKING_SPEED_KMH,
            overpass_url: OVERPASS_URL.to_string(),
            nominatim_url: NOMINATIM_URL.to_string(),
            user_agent: concat!("walkshed/", env!("CARGO_PKG_VERSION")).to_string(),
            max_age_minutes: None,
        }
    }
}

/// A named origin and the address it geocodes from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Garage {
    pub name: String,
    pub address: String,
}

impl Garage {
    pub fn new(name: &str, address: &str) -> Self {
        Self {
            name: name.to_string(),
            address: address.to_string(),
        }
    }
}

/// The Bedrock parking structures of downtown Detroit
pub fn default_garages() -> Vec<Garage> {
    vec![
        Garage::new("1234 Library St", "1234 Library St, Detroit, MI 48226"),
        Garage::new("1188 Farmer St", "1188 Farmer St, Detroit, MI 48226"),
        Garage::new("Bricktown Parking Garage", "419 E Fort St, Detroit, MI 48226"),
    ]
}

impl Settings {
    /// Parses settings, filling every missing field with its default
    ///
    /// # Errors
    ///
    /// Fails on malformed TOML, unknown keys, or invalid values
    pub fn from_toml_str(text: &str) -> Result<Self, Error> {
        let mut settings: Self = toml::from_str(text).map_err(|e| Error::Config(e.to_string()))?;
        if settings.garages.is_empty() {
            settings.garages = default_garages();
        }
        settings.validate()?;
        Ok(settings)
    }

    pub fn from_file(path: &Path) -> Result<Self, Error> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("failed to read {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&text)
    }

    /// Settings from `path` when given, defaults otherwise
    pub fn load(path: Option<&Path>) -> Result<Self, Error> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::with_defaults()),
        }
    }

    pub fn with_defaults() -> Self {
        Self {
            garages: default_garages(),
            ..Self::default()
        }
    }

    fn validate(&self) -> Result<(), Error> {
        let data = &self.data;
        for (name, value) in [
            ("network_dist_m", data.network_dist_m),
            ("amenity_dist_m", data.amenity_dist_m),
            ("walking_speed_kmh", data.walking_speed_kmh),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(Error::Config(format!("data.{name} must be positive, got {value}")));
            }
        }
        if let Some(minutes) = data.max_age_minutes
            && (minutes < 0 || Duration::try_minutes(minutes).is_none())
        {
            return Err(Error::Config(format!(
                "data.max_age_minutes must be a non-negative duration, got {minutes}"
            )));
        }
        for (i, garage) in self.garages.iter().enumerate() {
            if self.garages[..i].iter().any(|other| other.name == garage.name) {
                return Err(Error::Config(format!("duplicate garage name {:?}", garage.name)));
            }
        }
        Ok(())
    }

    pub fn load_config(&self) -> LoadConfig {
        LoadConfig {
            center_address: self.data.center_address.clone(),
            network_dist_m: self.data.network_dist_m,
            amenity_dist_m: self.data.amenity_dist_m,
            walking_speed_kmh: self.data.walking_speed_kmh,
        }
    }

    pub fn max_age(&self) -> Option<Duration> {
        self.data.max_age_minutes.and_then(Duration::try_minutes)
    }

    pub fn garage(&self, name: &str) -> Option<&Garage> {
        self.garages.iter().find(|garage| garage.name == name)
    }

    pub fn overpass_client(&self) -> Result<OverpassClient, Error> {
        OverpassClient::new(self.data.overpass_url.as_str(), &self.data.user_agent)
    }

    pub fn nominatim_geocoder(&self) -> Result<NominatimGeocoder, Error> {
        NominatimGeocoder::new(self.data.nominatim_url.as_str(), &self.data.user_agent)
    }
}
