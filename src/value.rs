//! Cell values for dashboard rows.
//!
//! Every row field holds one [`CellValue`]: the value union the remote store
//! can produce (text, number, boolean, or null). The engine never enforces a
//! schema, so anything it needs to search or compare is coerced through the
//! value's default string form.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single field value in a dashboard row.
///
/// Serializes untagged, so JSON strings, numbers, booleans, and nulls map
/// directly onto the four variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Bool(bool),
    Null,
}

impl CellValue {
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(v) => Some(v),
            _ => None,
        }
    }

    /// Numeric value, if this cell is a number. Booleans are not numeric.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            CellValue::Bool(v) => Some(*v),
            _ => None,
        }
    }
}

/// The default string form: text as-is, numbers and booleans via their
/// `Display` impls, null as the empty string. Search and CSV export both
/// serialize through this.
impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(v) => f.write_str(v),
            CellValue::Number(v) => write!(f, "{}", v),
            CellValue::Bool(v) => write!(f, "{}", v),
            CellValue::Null => Ok(()),
        }
    }
}

impl From<&str> for CellValue {
    fn from(v: &str) -> Self {
        CellValue::Text(v.to_string())
    }
}

impl From<String> for CellValue {
    fn from(v: String) -> Self {
        CellValue::Text(v)
    }
}

impl From<f64> for CellValue {
    fn from(v: f64) -> Self {
        CellValue::Number(v)
    }
}

impl From<i64> for CellValue {
    fn from(v: i64) -> Self {
        CellValue::Number(v as f64)
    }
}

impl From<i32> for CellValue {
    fn from(v: i32) -> Self {
        CellValue::Number(v as f64)
    }
}

impl From<u32> for CellValue {
    fn from(v: u32) -> Self {
        CellValue::Number(v as f64)
    }
}

impl From<bool> for CellValue {
    fn from(v: bool) -> Self {
        CellValue::Bool(v)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(inner) => inner.into(),
            None => CellValue::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_forms() {
        assert_eq!(CellValue::Text("Bima".to_string()).to_string(), "Bima");
        assert_eq!(CellValue::Number(100.0).to_string(), "100");
        assert_eq!(CellValue::Number(10.5).to_string(), "10.5");
        assert_eq!(CellValue::Bool(true).to_string(), "true");
        assert_eq!(CellValue::Null.to_string(), "");
    }

    #[test]
    fn booleans_are_not_numeric() {
        assert_eq!(CellValue::Bool(true).as_number(), None);
        assert_eq!(CellValue::Number(1.0).as_number(), Some(1.0));
    }

    #[test]
    fn option_conversions() {
        assert_eq!(CellValue::from(None::<f64>), CellValue::Null);
        assert_eq!(CellValue::from(Some(50.0)), CellValue::Number(50.0));
    }

    #[test]
    fn untagged_json_round_trip() {
        let values = vec![
            CellValue::Text("ana@ui.ac.id".to_string()),
            CellValue::Number(42.5),
            CellValue::Bool(false),
            CellValue::Null,
        ];
        let json = serde_json::to_string(&values).unwrap();
        assert_eq!(json, r#"["ana@ui.ac.id",42.5,false,null]"#);
        let back: Vec<CellValue> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, values);
    }
}
