//! Loading of the collected properties and of scheme documents.
//!
//! The properties document is either a mapping of property names to label
//! lists, or a list of elements carrying property values:
//!
//! ```json
//! { "status": ["open", "closed"], "size": ["1", "5", "10"] }
//! ```
//!
//! ```json
//! [ { "name": "Billing", "properties": { "status": "open", "size": "5" } } ]
//! ```
//!
//! Labels collected from elements keep their first-seen order per property.

use indexmap::IndexMap;
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info};

use crate::error::{ColorwizError, Result};
use crate::model::CollectedProperties;
use crate::scheme::ColorScheme;

/// A diagram element and its property values
#[derive(Debug, Clone, Deserialize)]
pub struct ElementRecord {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub properties: IndexMap<String, String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum InputDocument {
    Properties(CollectedProperties),
    Elements(Vec<ElementRecord>),
}

/// Load the collected properties from a JSON document
pub fn load_properties(path: &Path) -> Result<CollectedProperties> {
    let content = read_file(path)?;
    let collected = parse_properties(&content)?;
    info!(
        "Loaded {} properties from {}",
        collected.len(),
        path.display()
    );
    Ok(collected)
}

/// Parse a properties document from JSON text
pub fn parse_properties(json: &str) -> Result<CollectedProperties> {
    let document: InputDocument = serde_json::from_str(json)?;
    let collected = match document {
        InputDocument::Properties(collected) => collected,
        InputDocument::Elements(elements) => collect_labels(&elements),
    };
    validate_properties(&collected)?;
    Ok(collected)
}

/// Distinct, non-empty labels per property, in first-seen order
pub fn collect_labels(elements: &[ElementRecord]) -> CollectedProperties {
    let mut collected = CollectedProperties::new();
    for element in elements {
        for (property, value) in &element.properties {
            let labels = collected.entry(property.clone()).or_default();
            if !value.is_empty() && !labels.contains(value) {
                labels.push(value.clone());
            }
        }
    }
    debug!(
        elements = elements.len(),
        properties = collected.len(),
        "Collected labels from elements"
    );
    collected
}

/// Load one scheme document
pub fn load_scheme(path: &Path) -> Result<ColorScheme> {
    let content = read_file(path)?;
    ColorScheme::from_json(&content).map_err(|err| ColorwizError::SchemeLoad {
        property: path.display().to_string(),
        message: err.to_string(),
    })
}

fn read_file(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(ColorwizError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("File not found: {}", path.display()),
        )));
    }
    Ok(std::fs::read_to_string(path)?)
}

fn validate_properties(collected: &CollectedProperties) -> Result<()> {
    if collected.is_empty() {
        return Err(ColorwizError::InvalidParameter {
            param: "input".to_string(),
            message: "No property found in the input document".to_string(),
        });
    }
    for (property, labels) in collected {
        if property.is_empty() {
            return Err(ColorwizError::InvalidParameter {
                param: "input".to_string(),
                message: "Property names cannot be empty".to_string(),
            });
        }
        if labels.iter().any(String::is_empty) {
            return Err(ColorwizError::InvalidParameter {
                param: "input".to_string(),
                message: format!("Property '{}' has an empty label", property),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_property_mapping() {
        let collected =
            parse_properties(r#"{"status": ["open", "closed"], "size": ["1", "5"]}"#).unwrap();
        assert_eq!(collected.keys().collect::<Vec<_>>(), vec!["status", "size"]);
        assert_eq!(collected["size"], vec!["1", "5"]);
    }

    #[test]
    fn test_parse_element_list() {
        let collected = parse_properties(
            r#"[
                {"name": "Billing", "properties": {"status": "open", "size": "5"}},
                {"name": "CRM", "properties": {"status": "closed"}},
                {"properties": {"status": "open", "size": "1"}}
            ]"#,
        )
        .unwrap();
        assert_eq!(collected["status"], vec!["open", "closed"]);
        assert_eq!(collected["size"], vec!["5", "1"]);
    }

    #[test]
    fn test_empty_values_are_skipped() {
        let elements = vec![ElementRecord {
            name: None,
            properties: [("status".to_string(), String::new())].into_iter().collect(),
        }];
        let collected = collect_labels(&elements);
        assert!(collected["status"].is_empty());
    }

    #[test]
    fn test_invalid_documents() {
        assert!(parse_properties("{}").is_err());
        assert!(parse_properties(r#"{"": ["a"]}"#).is_err());
        assert!(parse_properties(r#"{"status": ["open", ""]}"#).is_err());
        assert!(parse_properties("42").is_err());
    }

    #[test]
    fn test_missing_file() {
        let err = load_properties(Path::new("/nonexistent/colorwiz.json")).unwrap_err();
        assert!(matches!(err, ColorwizError::Io(_)));
    }
}
