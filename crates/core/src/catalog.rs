use serde_json::Value;

use crate::error::CatalogError;
use crate::models::ItemRecord;

/// Records in the order they appeared in the source document, each paired
/// with its key (or array index for list-shaped catalogs).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    entries: Vec<(String, ItemRecord)>,
}

impl Catalog {
    pub fn from_json_str(raw: &str) -> Result<Self, CatalogError> {
        let document: Value = serde_json::from_str(raw)?;
        Self::from_value(document)
    }

    pub fn from_value(document: Value) -> Result<Self, CatalogError> {
        let raw_entries: Vec<(String, Value)> = match document {
            Value::Object(map) => map.into_iter().collect(),
            Value::Array(items) => items
                .into_iter()
                .enumerate()
                .map(|(index, item)| (index.to_string(), item))
                .collect(),
            other => {
                return Err(CatalogError::UnsupportedShape {
                    found: json_kind(&other),
                })
            }
        };

        let entries = raw_entries
            .into_iter()
            .map(|(key, value)| match serde_json::from_value::<ItemRecord>(value) {
                Ok(record) => Ok((key, record)),
                Err(source) => Err(CatalogError::InvalidRecord { key, source }),
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn records(&self) -> impl Iterator<Item = &ItemRecord> {
        self.entries.iter().map(|(_, record)| record)
    }

    pub fn entries(&self) -> &[(String, ItemRecord)] {
        &self.entries
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
