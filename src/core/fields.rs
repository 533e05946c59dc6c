use std::collections::BTreeMap;

use serde_json::Value;

use crate::core::approach::CloseApproach;
use crate::core::error::ModelError;
use crate::core::neo::NearEarthObject;

/// One source row: field name -> loosely typed value.
///
/// Keys are folded to lower case on insert so lookups are case-insensitive.
/// CSV rows arrive as all-string values, JSON rows may also carry numbers,
/// booleans and nulls. A null is treated the same as an absent field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawFields {
    fields: BTreeMap<String, Value>,
}

impl RawFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: &str, value: impl Into<Value>) -> &mut Self {
        self.fields.insert(key.to_lowercase(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields
            .get(&key.to_lowercase())
            .filter(|v| !v.is_null())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Scalar coerced to a string; arrays and objects are rejected.
    pub(crate) fn text(&self, key: &'static str) -> Result<Option<String>, ModelError> {
        match self.get(key) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(Value::Number(n)) => Ok(Some(n.to_string())),
            Some(Value::Bool(b)) => Ok(Some(b.to_string())),
            Some(other) => Err(ModelError::format(key, other.to_string(), "expected a scalar value")),
        }
    }

    /// Like [`RawFields::text`] but an empty string counts as absent.
    pub(crate) fn non_empty_text(&self, key: &'static str) -> Result<Option<String>, ModelError> {
        Ok(self.text(key)?.filter(|s| !s.is_empty()))
    }

    pub(crate) fn required_text(&self, key: &'static str) -> Result<String, ModelError> {
        self.non_empty_text(key)?
            .ok_or(ModelError::MissingField { field: key })
    }

    /// Numeric field; `None` when absent or an empty string.
    pub(crate) fn float(&self, key: &'static str) -> Result<Option<f64>, ModelError> {
        match self.get(key) {
            Some(Value::Number(n)) => n
                .as_f64()
                .map(Some)
                .ok_or_else(|| ModelError::format(key, n.to_string(), "not representable as f64")),
            _ => match self.non_empty_text(key)? {
                None => Ok(None),
                Some(s) => s
                    .trim()
                    .parse::<f64>()
                    .map(Some)
                    .map_err(|e| ModelError::format(key, s, e)),
            },
        }
    }

    pub(crate) fn required_float(&self, key: &'static str) -> Result<f64, ModelError> {
        self.float(key)?.ok_or(ModelError::MissingField { field: key })
    }
}

impl<K: AsRef<str>, V: Into<Value>> FromIterator<(K, V)> for RawFields {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut fields = RawFields::new();
        for (k, v) in iter {
            fields.insert(k.as_ref(), v);
        }
        fields
    }
}

impl TryFrom<Value> for RawFields {
    type Error = ModelError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(map.into_iter().collect()),
            other => Err(ModelError::format("row", other.to_string(), "expected a JSON object")),
        }
    }
}

/// Any record the loader can hand to the model layer.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogRecord {
    Neo(NearEarthObject),
    Approach(CloseApproach),
}

impl CatalogRecord {
    pub fn kind(&self) -> &'static str {
        match self {
            CatalogRecord::Neo(_) => "near-Earth object",
            CatalogRecord::Approach(_) => "close approach",
        }
    }
}

impl From<NearEarthObject> for CatalogRecord {
    fn from(neo: NearEarthObject) -> Self {
        CatalogRecord::Neo(neo)
    }
}

impl From<CloseApproach> for CatalogRecord {
    fn from(approach: CloseApproach) -> Self {
        CatalogRecord::Approach(approach)
    }
}
