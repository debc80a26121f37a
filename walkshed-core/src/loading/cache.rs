//! Shared, explicitly invalidated city data cache

use std::sync::{Arc, Mutex, PoisonError, RwLock};

use chrono::{Duration, Utc};
use log::{debug, info};

use super::builder::load_city_data;
use super::config::{LoadConfig, LoadKey};
use super::geocode::Geocoder;
use super::osm::MapDataSource;
use crate::{Error, model::CityData};

/// Holds at most one loaded [`CityData`] and hands out shared snapshots.
///
/// An entry is reused while its [`LoadKey`] matches the request and it is
/// younger than `max_age`. Failed loads are not cached. Loads are
/// serialized so concurrent first requests hit the providers once.
#[derive(Debug, Default)]
pub struct CityDataCache {
    entry: RwLock<Option<Arc<CityData>>>,
    loading: Mutex<()>,
    max_age: Option<Duration>,
}

impl CityDataCache {
    pub fn new(max_age: Option<Duration>) -> Self {
        Self {
            entry: RwLock::new(None),
            loading: Mutex::new(()),
            max_age,
        }
    }

    /// Current entry regardless of key or age
    pub fn current(&self) -> Option<Arc<CityData>> {
        self.entry
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn invalidate(&self) {
        let mut entry = self.entry.write().unwrap_or_else(PoisonError::into_inner);
        if entry.take().is_some() {
            info!("City data cache invalidated");
        }
    }

    /// Returns the cached data for `key`, calling `load` when there is none,
    /// the key changed, or the entry expired.
    ///
    /// # Errors
    ///
    /// Propagates the error of `load`
    pub fn get_or_load<F>(&self, key: &LoadKey, load: F) -> Result<Arc<CityData>, Error>
    where
        F: FnOnce() -> Result<CityData, Error>,
    {
        if let Some(data) = self.fresh_entry(key) {
            debug!("Using cached city data for {}", key.center_address);
            return Ok(data);
        }

        let _guard = self.loading.lock().unwrap_or_else(PoisonError::into_inner);

        // Another caller may have finished loading while we waited
        if let Some(data) = self.fresh_entry(key) {
            debug!("Using cached city data for {}", key.center_address);
            return Ok(data);
        }

        info!("Loading city data for {}", key.center_address);
        let data = Arc::new(load()?);
        *self.entry.write().unwrap_or_else(PoisonError::into_inner) = Some(Arc::clone(&data));

        Ok(data)
    }

    /// [`get_or_load`](Self::get_or_load) with the default loader
    pub fn load(
        &self,
        config: &LoadConfig,
        source: &dyn MapDataSource,
        geocoder: &dyn Geocoder,
    ) -> Result<Arc<CityData>, Error> {
        self.get_or_load(&config.key(), || load_city_data(config, source, geocoder))
    }

    fn fresh_entry(&self, key: &LoadKey) -> Option<Arc<CityData>> {
        let entry = self.entry.read().unwrap_or_else(PoisonError::into_inner);
        let data = entry.as_ref()?;

        if &data.key != key {
            debug!("Cached city data was loaded for a different key");
            return None;
        }
        if let Some(max_age) = self.max_age
            && data.age(Utc::now()) >= max_age
        {
            debug!("Cached city data expired");
            return None;
        }

        Some(Arc::clone(data))
    }
}
