//! GeoJSON-shaped feature types.

use serde::ser::{Serialize, SerializeStruct, Serializer};
use serde_json::{Map, Value};

/// Feature geometry, serialized as a GeoJSON geometry object.
///
/// Polygon rings are closed: the first and last position are equal.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(tag = "type", content = "coordinates")]
pub enum Geometry {
    Point([f64; 2]),
    MultiPoint(Vec<[f64; 2]>),
    LineString(Vec<[f64; 2]>),
    MultiLineString(Vec<Vec<[f64; 2]>>),
    Polygon(Vec<Vec<[f64; 2]>>),
    MultiPolygon(Vec<Vec<Vec<[f64; 2]>>>),
}

impl Geometry {
    pub fn type_name(&self) -> &'static str {
        match self {
            Geometry::Point(_) => "Point",
            Geometry::MultiPoint(_) => "MultiPoint",
            Geometry::LineString(_) => "LineString",
            Geometry::MultiLineString(_) => "MultiLineString",
            Geometry::Polygon(_) => "Polygon",
            Geometry::MultiPolygon(_) => "MultiPolygon",
        }
    }
}

/// A single decoded feature.
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    /// Name of the source layer the feature came from
    pub layer: String,
    pub id: Option<u64>,
    pub geometry: Geometry,
    pub properties: Map<String, Value>,
}

impl Serialize for Feature {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let fields = if self.id.is_some() { 5 } else { 4 };
        let mut state = serializer.serialize_struct("Feature", fields)?;
        state.serialize_field("type", "Feature")?;
        if let Some(id) = self.id {
            state.serialize_field("id", &id)?;
        }
        state.serialize_field("layer", &self.layer)?;
        state.serialize_field("geometry", &self.geometry)?;
        state.serialize_field("properties", &self.properties)?;
        state.end()
    }
}

/// All features decoded from one vector tile, across layers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureCollection {
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    pub fn new(features: Vec<Feature>) -> Self {
        Self { features }
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Distinct layer names in first-seen order.
    pub fn layers(&self) -> Vec<&str> {
        let mut layers: Vec<&str> = Vec::new();
        for feature in &self.features {
            if !layers.contains(&feature.layer.as_str()) {
                layers.push(&feature.layer);
            }
        }
        layers
    }

    /// Features belonging to one layer.
    pub fn in_layer<'a>(&'a self, layer: &'a str) -> impl Iterator<Item = &'a Feature> + 'a {
        self.features.iter().filter(move |f| f.layer == layer)
    }

    /// Serializes the collection as a GeoJSON document.
    pub fn to_geojson(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl Serialize for FeatureCollection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("FeatureCollection", 2)?;
        state.serialize_field("type", "FeatureCollection")?;
        state.serialize_field("features", &self.features)?;
        state.end()
    }
}
