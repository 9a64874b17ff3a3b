use crate::geo::error::GeoError;
use log::{debug, warn};
use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// A GeoJSON FeatureCollection indexed by one string property of its features.
///
/// Lookups are exact: the location names produced by the dashboard must match
/// the property values byte for byte.
#[derive(Debug, Clone)]
pub struct GeoReference {
    join_attribute: String,
    collection: Value,
    index: HashMap<String, usize>,
}

impl GeoReference {
    /// Parses `json` as a FeatureCollection keyed by `join_attribute`.
    ///
    /// Features without the attribute are kept in the collection but cannot be
    /// looked up. A collection in which no feature has the attribute is
    /// rejected. `origin` is only used in error messages.
    pub fn from_json(json: &str, join_attribute: &str, origin: &Path) -> Result<Self, GeoError> {
        let collection: Value =
            serde_json::from_str(json).map_err(|e| GeoError::Parse(origin.to_path_buf(), e))?;

        let features = match (
            collection.get("type").and_then(Value::as_str),
            collection.get("features").and_then(Value::as_array),
        ) {
            (Some("FeatureCollection"), Some(features)) => features,
            _ => return Err(GeoError::NotFeatureCollection(origin.to_path_buf())),
        };

        let mut index = HashMap::with_capacity(features.len());
        for (position, feature) in features.iter().enumerate() {
            let name = feature
                .get("properties")
                .and_then(|p| p.get(join_attribute))
                .and_then(Value::as_str);
            match name {
                Some(name) => {
                    if index.insert(name.to_string(), position).is_some() {
                        debug!("Duplicate {} '{}' in {}", join_attribute, name, origin.display());
                    }
                }
                None => warn!(
                    "Feature {} in {} has no '{}' property",
                    position,
                    origin.display(),
                    join_attribute
                ),
            }
        }

        if index.is_empty() && !features.is_empty() {
            return Err(GeoError::MissingJoinAttribute {
                path: origin.to_path_buf(),
                attribute: join_attribute.to_string(),
            });
        }

        Ok(Self {
            join_attribute: join_attribute.to_string(),
            collection,
            index,
        })
    }

    pub async fn load(path: impl AsRef<Path>, join_attribute: &str) -> Result<Self, GeoError> {
        let path: PathBuf = path.as_ref().to_path_buf();
        let json = tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| GeoError::Read(path.clone(), e))?;
        let reference = Self::from_json(&json, join_attribute, &path)?;
        debug!(
            "Loaded {} boundaries from {}",
            reference.len(),
            path.display()
        );
        Ok(reference)
    }

    pub fn join_attribute(&self) -> &str {
        &self.join_attribute
    }

    /// The Plotly `featureidkey` for this collection, e.g. `properties.ST_NM`.
    pub fn feature_id_key(&self) -> String {
        format!("properties.{}", self.join_attribute)
    }

    pub fn contains(&self, location: &str) -> bool {
        self.index.contains_key(location)
    }

    /// The geometry object of the feature named `location`.
    pub fn geometry(&self, location: &str) -> Option<&Value> {
        let position = *self.index.get(location)?;
        self.collection
            .get("features")?
            .get(position)?
            .get("geometry")
    }

    /// The whole FeatureCollection, as embedded in a choropleth trace.
    pub fn as_geojson(&self) -> &Value {
        &self.collection
    }

    /// Number of features that can be looked up by name.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}
