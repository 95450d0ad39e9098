use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use geo::{Centroid, Geometry, Point};
use geojson::JsonObject;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ExtractError, Result};

/// Reference system written into every output collection.
pub const OUTPUT_CRS: &str = "urn:ogc:def:crs:OGC:1.3:CRS84";

/// One input record, kept as raw JSON so that everything except
/// `properties` passes through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Feature {
    object: JsonObject,
}

impl Feature {
    pub fn new(object: JsonObject) -> Self {
        Self { object }
    }

    pub fn properties(&self) -> Option<&JsonObject> {
        self.object.get("properties").and_then(Value::as_object)
    }

    pub fn property(&self, key: &str) -> Option<&Value> {
        self.properties().and_then(|props| props.get(key))
    }

    pub fn set_properties(&mut self, properties: JsonObject) {
        self.object
            .insert("properties".to_string(), Value::Object(properties));
    }

    /// The point used for the containment test: the coordinate itself for
    /// point geometries, the centroid for anything else.
    ///
    /// Returns `None` when the geometry or its coordinates are missing or
    /// cannot be interpreted.
    pub fn representative_point(&self) -> Option<Point<f64>> {
        let value = self.object.get("geometry")?;
        if !value.is_object() {
            return None;
        }

        let geometry = geojson::Geometry::from_json_value(value.clone()).ok()?;
        match Geometry::<f64>::try_from(geometry.value).ok()? {
            Geometry::Point(point) => Some(point),
            other => other.centroid(),
        }
    }
}

/// A parsed input document: its declared category name and its features.
#[derive(Debug, Clone)]
pub struct InputCollection {
    pub name: String,
    pub features: Vec<Feature>,
}

#[derive(Deserialize)]
struct RawCollection {
    name: Option<String>,
    features: Option<Vec<Feature>>,
}

impl InputCollection {
    pub fn from_reader(reader: impl std::io::Read) -> Result<Self> {
        let raw: RawCollection = serde_json::from_reader(reader)?;
        Self::from_raw(raw)
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        let raw: RawCollection = serde_json::from_str(text)?;
        Self::from_raw(raw)
    }

    fn from_raw(raw: RawCollection) -> Result<Self> {
        let name = raw.name.ok_or_else(|| {
            ExtractError::MalformedDocument("File does not contain a 'name' element.".to_string())
        })?;
        let features = raw.features.ok_or_else(|| {
            ExtractError::MalformedDocument(
                "File does not contain a 'features' element.".to_string(),
            )
        })?;
        Ok(Self { name, features })
    }
}

/// Loads the input document from disk.
pub fn read_input(path: &Path) -> Result<InputCollection> {
    if !path.exists() {
        return Err(ExtractError::InputNotFound(path.to_path_buf()));
    }
    log::info!("Loading file: {}", path.display());
    let file = File::open(path).map_err(|e| ExtractError::filesystem(path, e))?;
    InputCollection::from_reader(BufReader::new(file))
}

#[derive(Debug, Serialize)]
struct CrsProperties {
    name: &'static str,
}

#[derive(Debug, Serialize)]
struct Crs {
    #[serde(rename = "type")]
    kind: &'static str,
    properties: CrsProperties,
}

/// On-disk form of one output group.
#[derive(Debug, Serialize)]
pub struct OutputCollection<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    name: &'a str,
    crs: Crs,
    features: &'a [Feature],
}

impl<'a> OutputCollection<'a> {
    pub fn new(name: &'a str, features: &'a [Feature]) -> Self {
        Self {
            kind: "FeatureCollection",
            name,
            crs: Crs {
                kind: "name",
                properties: CrsProperties { name: OUTPUT_CRS },
            },
            features,
        }
    }

    pub fn write_to(&self, path: &Path) -> Result<()> {
        let file = File::create(path).map_err(|e| ExtractError::filesystem(path, e))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer
            .flush()
            .map_err(|e| ExtractError::filesystem(path, e))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use serde_json::json;

    fn feature(value: Value) -> Feature {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn missing_fields_are_malformed() {
        let no_features = InputCollection::from_json_str(r#"{ "name": "Runways" }"#);
        assert!(matches!(no_features, Err(ExtractError::MalformedDocument(_))));

        let no_name = InputCollection::from_json_str(r#"{ "features": [] }"#);
        assert!(matches!(no_name, Err(ExtractError::MalformedDocument(_))));
    }

    #[test]
    fn point_is_its_own_anchor() {
        let f = feature(json!({
            "geometry": { "type": "Point", "coordinates": [3.5, -1.0] },
            "properties": {}
        }));
        assert_eq!(f.representative_point(), Some(Point::new(3.5, -1.0)));
    }

    #[test]
    fn polygon_uses_centroid() {
        let f = feature(json!({
            "type": "Feature",
            "geometry": {
                "type": "Polygon",
                "coordinates": [[[0.0, 0.0], [4.0, 0.0], [4.0, 2.0], [0.0, 2.0], [0.0, 0.0]]]
            },
            "properties": {}
        }));
        let anchor = f.representative_point().unwrap();
        assert_relative_eq!(anchor.x(), 2.0);
        assert_relative_eq!(anchor.y(), 1.0);
    }

    #[test]
    fn line_uses_centroid() {
        let f = feature(json!({
            "geometry": { "type": "LineString", "coordinates": [[0.0, 0.0], [2.0, 0.0]] },
            "properties": {}
        }));
        let anchor = f.representative_point().unwrap();
        assert_relative_eq!(anchor.x(), 1.0);
        assert_relative_eq!(anchor.y(), 0.0);
    }

    #[test]
    fn unusable_geometry_has_no_anchor() {
        let null_geometry = feature(json!({ "geometry": null, "properties": {} }));
        let null_coords = feature(json!({
            "geometry": { "type": "Point", "coordinates": null },
            "properties": {}
        }));
        let absent = feature(json!({ "properties": {} }));
        assert_eq!(null_geometry.representative_point(), None);
        assert_eq!(null_coords.representative_point(), None);
        assert_eq!(absent.representative_point(), None);
    }

    #[test]
    fn replacing_properties_keeps_other_members() {
        let mut f = feature(json!({
            "type": "Feature",
            "id": 7,
            "geometry": { "type": "Point", "coordinates": [0.0, 0.0] },
            "properties": { "A": 1 }
        }));
        let mut props = JsonObject::new();
        props.insert("name".to_string(), json!("X"));
        f.set_properties(props);

        let value = serde_json::to_value(&f).unwrap();
        assert_eq!(value["id"], json!(7));
        assert_eq!(value["type"], json!("Feature"));
        assert_eq!(value["properties"], json!({ "name": "X" }));
    }

    #[test]
    fn output_collection_has_fixed_crs() {
        let features = vec![feature(json!({ "geometry": null, "properties": {} }))];
        let value = serde_json::to_value(OutputCollection::new("Runways", &features)).unwrap();
        assert_eq!(value["type"], json!("FeatureCollection"));
        assert_eq!(value["name"], json!("Runways"));
        assert_eq!(
            value["crs"],
            json!({ "type": "name", "properties": { "name": OUTPUT_CRS } })
        );
        assert_eq!(value["features"].as_array().unwrap().len(), 1);
    }
}
