use chrono::{DateTime, Utc};

use super::{Amenity, StreetGraph};
use crate::loading::LoadKey;

/// Street network and amenities loaded around one center address.
///
/// Shared read-only behind an `Arc` once loaded.
#[derive(Debug, Clone)]
pub struct CityData {
    pub streets: StreetGraph,
    pub amenities: Vec<Amenity>,
    pub key: LoadKey,
    pub loaded_at: DateTime<Utc>,
}

impl CityData {
    pub fn new(streets: StreetGraph, amenities: Vec<Amenity>, key: LoadKey) -> Self {
        Self {
            streets,
            amenities,
            key,
            loaded_at: Utc::now(),
        }
    }

    /// Age of the data at `now`
    pub fn age(&self, now: DateTime<Utc>) -> chrono::Duration {
        now.signed_duration_since(self.loaded_at)
    }
}
