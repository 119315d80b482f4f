//! Attribute value types, as resolved from plain schemas.
//!
//! The encoder only cares whether a property is numeric or boolean; the
//! remaining variants carry what an editing UI needs to present values.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Value type of a plain schema attribute
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AttrSchemaType {
    #[default]
    String,
    Long,
    Double,
    Boolean,
    Date {
        /// Conversion pattern, e.g. `yyyy-MM-dd`
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pattern: Option<String>,
    },
    Enum {
        /// Value to display label, in display order
        #[serde(default)]
        labels: BTreeMap<String, String>,
    },
}

impl AttrSchemaType {
    pub fn is_numeric(&self) -> bool {
        matches!(self, AttrSchemaType::Long | AttrSchemaType::Double)
    }
}

/// Maps an attribute property name to its value type
pub trait SchemaTypeResolver {
    fn schema_type(&self, property: &str) -> Option<&AttrSchemaType>;
}

impl SchemaTypeResolver for BTreeMap<String, AttrSchemaType> {
    fn schema_type(&self, property: &str) -> Option<&AttrSchemaType> {
        self.get(property)
    }
}

/// Resolver that knows no schema: every attribute is compared as a string
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSchema;

impl SchemaTypeResolver for NoSchema {
    fn schema_type(&self, _property: &str) -> Option<&AttrSchemaType> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_resolver() {
        let mut types = BTreeMap::new();
        types.insert("age".to_string(), AttrSchemaType::Long);
        assert_eq!(types.schema_type("age"), Some(&AttrSchemaType::Long));
        assert_eq!(types.schema_type("email"), None);
        assert_eq!(NoSchema.schema_type("age"), None);
    }

    #[test]
    fn test_json_tagging() {
        let parsed: BTreeMap<String, AttrSchemaType> = serde_json::from_str(
            r#"{
                "age": {"type": "LONG"},
                "born": {"type": "DATE", "pattern": "yyyy-MM-dd"},
                "color": {"type": "ENUM", "labels": {"r": "Red"}}
            }"#,
        )
        .unwrap();
        assert!(parsed["age"].is_numeric());
        assert_eq!(
            parsed["born"],
            AttrSchemaType::Date {
                pattern: Some("yyyy-MM-dd".to_string())
            }
        );
        assert!(matches!(&parsed["color"], AttrSchemaType::Enum { labels } if labels["r"] == "Red"));
    }
}
