//! The color model: one color map per property, the current property, and
//! the observers notified of label changes.
//!
//! A model is an explicitly constructed value owned by whatever drives the
//! coloring flow, and handed to each view by reference.

use indexmap::IndexMap;
use std::cell::RefCell;
use std::rc::Rc;
use tracing::{debug, info, trace, warn};

use crate::colormap::{ColorMap, ColorMapSubset};
use crate::error::{ColorwizError, Result};
use crate::logging::log_collection_stats;
use crate::observer::{notify_registry, Notifier, ObserverId, ObserverRegistry};
use crate::scheme::SchemeStore;

/// Candidate labels per property name, in collection order
pub type CollectedProperties = IndexMap<String, Vec<String>>;

/// Color maps keyed by property name, with change notification
#[derive(Debug)]
pub struct ColorModel {
    colormaps: IndexMap<String, ColorMap>,
    /// Index of the current property in `colormaps`
    current: usize,
    observers: Rc<RefCell<ObserverRegistry>>,
}

impl ColorModel {
    /// Build one color map per collected property. The first property
    /// becomes the current one.
    pub fn new(collected: CollectedProperties) -> Result<Self> {
        if collected.is_empty() {
            return Err(ColorwizError::precondition("No property found"));
        }

        let observers = Rc::new(RefCell::new(ObserverRegistry::new()));
        let mut colormaps = IndexMap::with_capacity(collected.len());
        for (name, labels) in collected {
            let mut colormap = ColorMap::new(name.clone(), labels)?;
            colormap.attach(Notifier::attached(&observers));
            log_collection_stats(&name, &colormap.labels(false));
            colormaps.insert(name, colormap);
        }
        debug!(
            "properties collected: {:?}",
            colormaps.keys().collect::<Vec<_>>()
        );

        Ok(Self {
            colormaps,
            current: 0,
            observers,
        })
    }

    /// Build the model, load the saved scheme of every property when there is
    /// one, and select `property` if it was collected
    pub fn load(
        collected: CollectedProperties,
        store: &dyn SchemeStore,
        property: Option<&str>,
    ) -> Result<Self> {
        let mut model = Self::new(collected)?;
        for colormap in model.colormaps.values_mut() {
            colormap.load_saved_scheme(store);
        }

        if let Some(property) = property {
            if model.set_property(property) {
                info!("Property {} selected", property);
            } else {
                warn!(
                    "Requested property '{}' does not exist among the collected",
                    property
                );
            }
        }
        Ok(model)
    }

    /// All property names, in collection order
    pub fn properties(&self) -> Vec<&str> {
        self.colormaps.keys().map(String::as_str).collect()
    }

    /// The current property name
    pub fn property(&self) -> &str {
        self.colormap().name()
    }

    /// Change the current property. Unknown names are ignored and false is
    /// returned.
    pub fn set_property(&mut self, name: &str) -> bool {
        match self.colormaps.get_index_of(name) {
            Some(index) => {
                self.current = index;
                true
            }
            None => {
                debug!("Ignoring unknown property '{}'", name);
                false
            }
        }
    }

    /// The color map of the current property
    pub fn colormap(&self) -> &ColorMap {
        &self.colormaps[self.current]
    }

    pub fn colormap_mut(&mut self) -> &mut ColorMap {
        &mut self.colormaps[self.current]
    }

    pub fn get(&self, property: &str) -> Option<&ColorMap> {
        self.colormaps.get(property)
    }

    pub fn get_mut(&mut self, property: &str) -> Option<&mut ColorMap> {
        self.colormaps.get_mut(property)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ColorMap> + '_ {
        self.colormaps.values()
    }

    /// Make `callback` the only observer of the model (last registered wins)
    pub fn register_observer<F>(&mut self, callback: F) -> ObserverId
    where
        F: FnMut(&ColorMapSubset<'_>) + 'static,
    {
        self.observers.borrow_mut().register(Box::new(callback))
    }

    /// Add `callback` next to the current observers; the caller removes it
    /// with [`remove_observer`](Self::remove_observer)
    pub fn add_observer<F>(&mut self, callback: F) -> ObserverId
    where
        F: FnMut(&ColorMapSubset<'_>) + 'static,
    {
        self.observers.borrow_mut().add(Box::new(callback))
    }

    pub fn remove_observer(&mut self, id: ObserverId) -> bool {
        self.observers.borrow_mut().remove(id)
    }

    pub fn observer_count(&self) -> usize {
        self.observers.borrow().len()
    }

    /// Notify the observers that `labels` of the current color map changed.
    /// Does nothing without observers.
    pub fn notify_change<S: AsRef<str>>(&self, labels: &[S]) -> Result<()> {
        if self.observers.borrow().is_empty() {
            trace!("No observers declared for event firing");
            return Ok(());
        }
        let changed = self.colormap().subset(labels)?;
        notify_registry(&self.observers, &changed);
        Ok(())
    }

    /// The current color map can be applied: some label is included, all
    /// included labels have a color, and the scale is complete
    pub fn can_finish(&self) -> bool {
        let colormap = self.colormap();
        colormap.some_included() && colormap.is_applicable() && colormap.scale().is_defined()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::HexColor;
    use crate::scale::{Edge, ScaleKind};
    use crate::scheme::MemorySchemeStore;

    fn collected(entries: &[(&str, &[&str])]) -> CollectedProperties {
        entries
            .iter()
            .map(|(name, labels)| {
                (
                    name.to_string(),
                    labels.iter().map(|l| l.to_string()).collect(),
                )
            })
            .collect()
    }

    type Seen = Rc<RefCell<Vec<Vec<String>>>>;

    fn recorder() -> (Seen, impl FnMut(&ColorMapSubset<'_>) + 'static) {
        let seen: Seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let callback = move |changed: &ColorMapSubset<'_>| {
            sink.borrow_mut()
                .push(changed.labels().iter().map(|l| l.to_string()).collect());
        };
        (seen, callback)
    }

    #[test]
    fn test_empty_model_is_rejected() {
        assert!(matches!(
            ColorModel::new(CollectedProperties::new()),
            Err(ColorwizError::Precondition { .. })
        ));
    }

    #[test]
    fn test_property_selection() {
        let mut model = ColorModel::new(collected(&[
            ("status", &["open", "closed"]),
            ("size", &["1", "2"]),
        ]))
        .unwrap();
        assert_eq!(model.properties(), vec!["status", "size"]);
        assert_eq!(model.property(), "status");

        assert!(model.set_property("size"));
        assert_eq!(model.property(), "size");
        assert_eq!(model.colormap().labels(false), vec!["1", "2"]);

        assert!(!model.set_property("owner"));
        assert_eq!(model.property(), "size");
    }

    #[test]
    fn test_notify_without_observers() {
        let model = ColorModel::new(collected(&[("status", &["open"])])).unwrap();
        assert!(model.notify_change(&["open"]).is_ok());
        // No observer, so the unknown label is never looked up
        assert!(model.notify_change(&["unknown"]).is_ok());
    }

    #[test]
    fn test_mutations_notify_changed_labels() {
        let mut model =
            ColorModel::new(collected(&[("status", &["open", "closed", "pending"])])).unwrap();
        let (seen, callback) = recorder();
        model.register_observer(callback);

        model.colormap_mut().set_selection(&["open"], false).unwrap();
        model.colormap_mut().set_selection(&["open"], true).unwrap();
        assert!(model.colormap().get("open").unwrap().included());
        assert_eq!(
            seen.borrow().as_slice(),
            &[vec!["open".to_string()], vec!["open".to_string()]]
        );

        model
            .colormap_mut()
            .set_color(&["closed", "pending"], HexColor::WHITE)
            .unwrap();
        assert_eq!(seen.borrow().len(), 3);
        assert_eq!(seen.borrow()[2], vec!["closed", "pending"]);
    }

    #[test]
    fn test_failed_mutation_does_not_notify() {
        let mut model = ColorModel::new(collected(&[("status", &["open"])])).unwrap();
        let (seen, callback) = recorder();
        model.register_observer(callback);

        assert!(model.colormap_mut().set_color(&["nope"], HexColor::BLACK).is_err());
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn test_register_observer_replaces_previous() {
        let mut model = ColorModel::new(collected(&[("status", &["open"])])).unwrap();
        let (first, cb1) = recorder();
        let (second, cb2) = recorder();
        model.register_observer(cb1);
        model.register_observer(cb2);
        assert_eq!(model.observer_count(), 1);

        model.notify_change(&["open"]).unwrap();
        assert!(first.borrow().is_empty());
        assert_eq!(second.borrow().len(), 1);
    }

    #[test]
    fn test_added_observers_coexist() {
        let mut model = ColorModel::new(collected(&[("status", &["open"])])).unwrap();
        let (first, cb1) = recorder();
        let (second, cb2) = recorder();
        let id = model.add_observer(cb1);
        model.add_observer(cb2);

        model.notify_change(&["open"]).unwrap();
        assert!(model.remove_observer(id));
        model.notify_change(&["open"]).unwrap();

        assert_eq!(first.borrow().len(), 1);
        assert_eq!(second.borrow().len(), 2);
    }

    #[test]
    fn test_gradient_changes_notify_selection() {
        let mut model = ColorModel::new(collected(&[("size", &["1", "5", "10", "n/a"])])).unwrap();
        model.colormap_mut().set_selection(&["n/a"], false).unwrap();
        let (seen, callback) = recorder();
        model.register_observer(callback);

        let colormap = model.colormap_mut();
        colormap.set_scale_kind(ScaleKind::Continuous).unwrap();
        colormap.set_gradient_color(Edge::Start, HexColor::BLACK).unwrap();
        assert_eq!(seen.borrow().len(), 2);
        assert_eq!(seen.borrow()[1], vec!["1", "5", "10"]);

        // Disabled pivot: nothing recomputed, nothing fired
        colormap.set_middle_position(0.5, false).unwrap();
        assert_eq!(seen.borrow().len(), 2);
    }

    #[test]
    fn test_load_with_store() {
        let mut store = MemorySchemeStore::new();
        store.insert_json(
            "status",
            r##"{"name": "Status", "type": "Categorical", "resetDefault": false,
                "colormap": {"open": "#00FF00", "closed": "#FF0000"}}"##,
        );
        store.insert_json("size", "not a scheme");

        let model = ColorModel::load(
            collected(&[("Status", &["open", "closed"]), ("size", &["1"])]),
            &store,
            Some("size"),
        )
        .unwrap();

        assert_eq!(model.property(), "size");
        let status = model.get("Status").unwrap();
        assert!(status.is_applicable());
        assert!(!status.reset_default());
        // The unreadable scheme leaves defaults in place
        assert!(!model.get("size").unwrap().is_applicable());
        assert!(model.get("size").unwrap().reset_default());
    }

    #[test]
    fn test_load_ignores_unknown_default_property() {
        let model = ColorModel::load(
            collected(&[("status", &["open"])]),
            &MemorySchemeStore::new(),
            Some("owner"),
        )
        .unwrap();
        assert_eq!(model.property(), "status");
    }

    #[test]
    fn test_can_finish() {
        let mut model = ColorModel::new(collected(&[("status", &["open", "closed"])])).unwrap();
        assert!(!model.can_finish());
        model
            .colormap_mut()
            .set_color(&["open", "closed"], HexColor::from_rgb(0x11, 0x22, 0x33))
            .unwrap();
        assert!(model.can_finish());
    }
}
