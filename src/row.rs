//! Ordered row representation.
//!
//! A [`Row`] maps field names to [`CellValue`]s and preserves insertion
//! order. Order matters here: the CSV exporter takes its header from the
//! first row's fields, and default column layouts follow field order.

use crate::value::CellValue;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// One record in a tabular dataset, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    fields: Vec<(String, CellValue)>,
}

impl Row {
    pub fn new() -> Self {
        Row { fields: Vec::new() }
    }

    /// Builder form of [`Row::set`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<CellValue>) -> Self {
        self.set(key, value);
        self
    }

    /// Set a field. Replaces in place when the key exists, appends otherwise.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<CellValue>) {
        let key = key.into();
        let value = value.into();
        match self.fields.iter().position(|(k, _)| *k == key) {
            Some(i) => self.fields[i].1 = value,
            None => self.fields.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&CellValue> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Field names in insertion order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    /// `(name, value)` pairs in insertion order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &CellValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Serialize for Row {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (key, value) in &self.fields {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Row {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RowVisitor;

        impl<'de> Visitor<'de> for RowVisitor {
            type Value = Row;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of field names to cell values")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Row, A::Error> {
                let mut row = Row::new();
                while let Some((key, value)) = access.next_entry::<String, CellValue>()? {
                    row.set(key, value);
                }
                Ok(row)
            }
        }

        deserializer.deserialize_map(RowVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preserves_insertion_order() {
        let row = Row::new()
            .with("name", "Ana")
            .with("email", "ana@ui.ac.id")
            .with("balance", 125000.0);
        let names: Vec<&str> = row.field_names().collect();
        assert_eq!(names, vec!["name", "email", "balance"]);
    }

    #[test]
    fn set_replaces_in_place() {
        let mut row = Row::new().with("a", 1.0).with("b", 2.0);
        row.set("a", 9.0);
        let names: Vec<&str> = row.field_names().collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(row.get("a"), Some(&CellValue::Number(9.0)));
    }

    #[test]
    fn missing_field_is_none() {
        let row = Row::new().with("name", "Cici");
        assert!(row.get("email").is_none());
    }

    #[test]
    fn serializes_as_object() {
        let row = Row::new()
            .with("name", "Bima")
            .with("amount", 100.0)
            .with("note", None::<String>);
        let json = serde_json::to_string(&row).unwrap();
        assert_eq!(json, r#"{"name":"Bima","amount":100.0,"note":null}"#);

        let back: Row = serde_json::from_str(&json).unwrap();
        assert_eq!(back, row);
    }
}
