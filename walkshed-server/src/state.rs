use std::sync::Arc;

use walkshed_core::config::{Garage, Settings};
use walkshed_core::{CityDataCache, Error, Geocoder, Isochrone, MapDataSource, walking_isochrone};

/// Everything a request needs, shared between handlers
pub struct AppState {
    pub settings: Settings,
    pub cache: CityDataCache,
    pub geocoder: Arc<dyn Geocoder>,
    pub source: Arc<dyn MapDataSource>,
}

impl AppState {
    pub fn new(
        settings: Settings,
        geocoder: Arc<dyn Geocoder>,
        source: Arc<dyn MapDataSource>,
    ) -> Self {
        let cache = CityDataCache::new(settings.max_age());
        Self {
            settings,
            cache,
            geocoder,
            source,
        }
    }

    /// State backed by Nominatim and Overpass as configured in `settings`
    pub fn from_settings(settings: Settings) -> Result<Self, Error> {
        let geocoder = Arc::new(settings.nominatim_geocoder()?);
        let source = Arc::new(settings.overpass_client()?);
        Ok(Self::new(settings, geocoder, source))
    }

    /// Loads (or reuses) the city data and computes the isochrone of `garage`.
    /// Blocking.
    pub fn isochrone(&self, garage: &Garage, minutes: u32) -> Result<Isochrone, Error> {
        let city = self.cache.load(
            &self.settings.load_config(),
            self.source.as_ref(),
            self.geocoder.as_ref(),
        )?;
        walking_isochrone(
            &city,
            self.geocoder.as_ref(),
            &garage.address,
            f64::from(minutes),
            &garage.name,
        )
    }
}
