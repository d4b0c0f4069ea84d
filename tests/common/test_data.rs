//! Test data generation utilities.
//!
//! This module provides fixture builders for collected properties, input
//! documents written to temporary files, and observers recording events.

use colorwiz::{CollectedProperties, ColorMapSubset};
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// Labels of every event received by an observer, in delivery order
pub type Events = Rc<RefCell<Vec<Vec<String>>>>;

/// Build collected properties from `(property, labels)` pairs
pub fn collected(entries: &[(&str, &[&str])]) -> CollectedProperties {
    entries
        .iter()
        .map(|(name, labels)| {
            (
                name.to_string(),
                labels.iter().map(|label| label.to_string()).collect(),
            )
        })
        .collect()
}

/// An observer callback together with the events it records
pub fn recorder() -> (Events, impl FnMut(&ColorMapSubset<'_>) + 'static) {
    let events: Events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    let callback = move |changed: &ColorMapSubset<'_>| {
        sink.borrow_mut().push(
            changed
                .labels()
                .iter()
                .map(|label| label.to_string())
                .collect(),
        );
    };
    (events, callback)
}

/// Writes an element-list input document with a status and a size property.
///
/// # Returns
///
/// * `PathBuf` - The path of the written document
pub fn create_elements_file(dir: &Path) -> PathBuf {
    let elements = serde_json::json!([
        { "name": "Billing", "properties": { "status": "open", "size": "1" } },
        { "name": "CRM", "properties": { "status": "closed", "size": "5" } },
        { "name": "Portal", "properties": { "status": "pending", "size": "10" } },
        { "name": "Archive", "properties": { "status": "closed", "size": "n/a" } },
        { "name": "Ledger", "properties": { "status": "open" } }
    ]);
    write_json(dir, "elements.json", &elements)
}

/// Writes a continuous scheme document for the size property
pub fn create_size_scheme_file(dir: &Path) -> PathBuf {
    let scheme = serde_json::json!({
        "name": "size",
        "type": "Continuous",
        "resetDefault": false,
        "colormap": { "1": "#FF0000", "5": "#8E0071", "10": "#0000FF" },
        "continuous": {
            "start": { "value": 1, "color": "#FF0000" },
            "end": { "value": 10, "color": "#0000FF" }
        }
    });
    write_json(dir, "size-scheme.json", &scheme)
}

fn write_json(dir: &Path, name: &str, value: &serde_json::Value) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, serde_json::to_string_pretty(value).unwrap()).unwrap();
    path
}
