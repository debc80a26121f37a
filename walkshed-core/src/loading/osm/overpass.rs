//! Overpass API access

use std::time::Duration;

use geo::Rect;
use log::{debug, info};

use super::elements::{OsmElement, OverpassResponse};
use crate::Error;

pub const OVERPASS_URL: &str = "https://overpass-api.de/api/interpreter";

/// Highway values that are never walkable
const EXCLUDED_HIGHWAYS: &str = "abandoned|bus_guideway|construction|cycleway|motor|no|planned|platform|proposed|raceway|razed";

/// Source of raw OpenStreetMap elements
pub trait MapDataSource: Send + Sync {
    /// Walkable ways inside `bbox` together with the nodes they reference
    fn street_elements(&self, bbox: Rect<f64>) -> Result<Vec<OsmElement>, Error>;

    /// Elements tagged `amenity` inside `bbox`, with geometry
    fn amenity_elements(&self, bbox: Rect<f64>) -> Result<Vec<OsmElement>, Error>;
}

/// Overpass query selecting the pedestrian network inside a bounding box
pub fn street_query(bbox: Rect<f64>) -> String {
    format!(
        r#"[out:json][timeout:180];
(
  way["highway"]["area"!~"yes"]["highway"!~"{EXCLUDED_HIGHWAYS}"]["foot"!~"no"]["service"!~"private"]["access"!~"private"]
    ({south},{west},{north},{east});
);
(._;>;);
out body;"#,
        south = bbox.min().y,
        west = bbox.min().x,
        north = bbox.max().y,
        east = bbox.max().x,
    )
}

/// Overpass query selecting every amenity inside a bounding box
pub fn amenity_query(bbox: Rect<f64>) -> String {
    format!(
        r#"[out:json][timeout:180];
nwr["amenity"]({south},{west},{north},{east});
out geom;"#,
        south = bbox.min().y,
        west = bbox.min().x,
        north = bbox.max().y,
        east = bbox.max().x,
    )
}

/// Blocking Overpass API client
#[derive(Debug, Clone)]
pub struct OverpassClient {
    client: reqwest::blocking::Client,
    url: String,
}

impl OverpassClient {
    pub fn new(url: impl Into<String>, user_agent: &str) -> Result<Self, Error> {
        let client = reqwest::blocking::Client::builder()
            .connect_timeout(Duration::from_secs(30))
            .timeout(Duration::from_secs(180))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }

    fn run(&self, query: String) -> Result<Vec<OsmElement>, Error> {
        debug!("Overpass query:\n{query}");

        let response = self
            .client
            .post(&self.url)
            .header("Content-Type", "text/plain")
            .body(query)
            .send()?;

        if !response.status().is_success() {
            return Err(Error::NetworkError(format!(
                "Overpass API returned status {}",
                response.status()
            )));
        }

        let data: OverpassResponse = response
            .json()
            .map_err(|e| Error::ProviderResponse(e.to_string()))?;
        info!("Downloaded {} OSM elements", data.elements.len());

        Ok(data.elements)
    }
}

impl MapDataSource for OverpassClient {
    fn street_elements(&self, bbox: Rect<f64>) -> Result<Vec<OsmElement>, Error> {
        self.run(street_query(bbox))
    }

    fn amenity_elements(&self, bbox: Rect<f64>) -> Result<Vec<OsmElement>, Error> {
        self.run(amenity_query(bbox))
    }
}

#[cfg(test)]
mod tests {
    use geo::coord;

    use super::*;
    use crate::model::OsmElementType;

    #[test]
    fn street_query_orders_bbox_south_west_north_east() {
        let bbox = Rect::new(coord! { x: -83.1, y: 42.3 }, coord! { x: -83.0, y: 42.4 });
        let query = street_query(bbox);
        assert!(query.contains("(42.3,-83.1,42.4,-83)"));
        assert!(query.contains(r#"["foot"!~"no"]"#));
        assert!(query.contains(r#"["access"!~"private"]"#));
    }

    #[test]
    fn amenity_query_covers_the_whole_square() {
        let bbox = Rect::new(coord! { x: -83.1, y: 42.3 }, coord! { x: -83.0, y: 42.4 });
        let query = amenity_query(bbox);
        assert!(query.contains("nwr[\"amenity\"](42.3,-83.1,42.4,-83);"));
        assert!(!query.contains("around:"));
        assert!(query.ends_with("out geom;"));
    }

    #[test]
    fn parses_overpass_payload() {
        let payload = r#"{
            "version": 0.6,
            "elements": [
                {"type": "node", "id": 1, "lat": 42.33, "lon": -83.05},
                {"type": "way", "id": 2, "nodes": [1, 3], "tags": {"highway": "footway"}},
                {"type": "relation", "id": 4, "members": [
                    {"type": "way", "ref": 5, "role": "outer",
                     "geometry": [{"lat": 42.0, "lon": -83.0}]}
                ]}
            ]
        }"#;

        let response: OverpassResponse = serde_json::from_str(payload).unwrap();
        assert_eq!(response.elements.len(), 3);
        assert_eq!(response.elements[1].elem_type, OsmElementType::Way);
        assert_eq!(response.elements[1].tag("highway"), Some("footway"));
        let members = response.elements[2].members.as_ref().unwrap();
        assert_eq!(members[0].role, "outer");
    }
}
