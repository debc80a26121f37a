use crate::{
    DEFAULT_AMENITY_DIST_M, DEFAULT_CENTER_ADDRESS, DEFAULT_NETWORK_DIST_M, DEFAULT_WALKING_SPEED_KMH,
};

/// Parameters for loading city data around a center address
#[derive(Debug, Clone, PartialEq)]
pub struct LoadConfig {
    pub center_address: String,
    /// Street network search distance, meters
    pub network_dist_m: f64,
    /// Amenity search distance, meters
    pub amenity_dist_m: f64,
    pub walking_speed_kmh: f64,
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            center_address: DEFAULT_CENTER_ADDRESS.to_string(),
            network_dist_m: DEFAULT_NETWORK_DIST_M,
            amenity_dist_m: DEFAULT_AMENITY_DIST_M,
            walking_speed_kmh: DEFAULT_WALKING_SPEED_KMH,
        }
    }
}

impl LoadConfig {
    pub fn key(&self) -> LoadKey {
        LoadKey {
            center_address: self.center_address.clone(),
            network_dist_m: self.network_dist_m,
            amenity_dist_m: self.amenity_dist_m,
            walking_speed_kmh: self.walking_speed_kmh,
        }
    }
}

/// Identity of a loaded data set; cached data is reused only for an equal key.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadKey {
    pub center_address: String,
    pub network_dist_m: f64,
    pub amenity_dist_m: f64,
    pub walking_speed_kmh: f64,
}
