//! Change notification for the views observing a color model.
//!
//! The [`ColorModel`](crate::ColorModel) owns an [`ObserverRegistry`]; each of
//! its color maps holds a [`Notifier`], a weak handle on that registry, and
//! reports every label-level mutation through it. Delivery is synchronous and
//! in registration order.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};
use tracing::{debug, trace, warn};
use uuid::Uuid;

use crate::colormap::ColorMapSubset;

/// Callback receiving the changed labels, restricted to the affected ones
pub type ObserverCallback = Box<dyn FnMut(&ColorMapSubset<'_>)>;

/// Handle returned on registration, used to remove the observer later
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(Uuid);

impl fmt::Display for ObserverId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// The set of observers of one color model
#[derive(Default)]
pub struct ObserverRegistry {
    observers: Vec<(ObserverId, ObserverCallback)>,
}

impl ObserverRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `callback` the only observer. Previously registered observers,
    /// including those added with [`add`](Self::add), are dropped.
    pub fn register(&mut self, callback: ObserverCallback) -> ObserverId {
        if !self.observers.is_empty() {
            debug!(dropped = self.observers.len(), "Replacing observers");
        }
        self.observers.clear();
        self.add(callback)
    }

    /// Add `callback` next to the existing observers
    pub fn add(&mut self, callback: ObserverCallback) -> ObserverId {
        let id = ObserverId(Uuid::new_v4());
        debug!(observer = %id, "Adding observer");
        self.observers.push((id, callback));
        id
    }

    /// Remove an observer; returns false if it was not registered
    pub fn remove(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(observer, _)| *observer != id);
        let removed = self.observers.len() != before;
        debug!(observer = %id, removed, "Removing observer");
        removed
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    /// Invoke every observer with `changed`
    pub fn notify(&mut self, changed: &ColorMapSubset<'_>) {
        debug!("Firing event for {:?}", changed.labels());
        for (id, callback) in self.observers.iter_mut() {
            trace!(observer = %id, "... handled by callback");
            callback(changed);
        }
    }
}

impl fmt::Debug for ObserverRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObserverRegistry")
            .field(
                "observers",
                &self.observers.iter().map(|(id, _)| id).collect::<Vec<_>>(),
            )
            .finish()
    }
}

/// Weak handle through which a color map reaches its model's observers.
/// A detached notifier (the default) delivers nothing.
#[derive(Debug, Clone, Default)]
pub struct Notifier(Weak<RefCell<ObserverRegistry>>);

impl Notifier {
    pub(crate) fn attached(registry: &Rc<RefCell<ObserverRegistry>>) -> Self {
        Notifier(Rc::downgrade(registry))
    }

    /// Whether a notification would reach at least one observer. A registry
    /// busy delivering another notification counts as observed.
    pub fn has_observers(&self) -> bool {
        let Some(registry) = self.0.upgrade() else {
            return false;
        };
        let listening = registry.try_borrow().map(|r| !r.is_empty()).unwrap_or(true);
        listening
    }

    pub(crate) fn notify(&self, changed: &ColorMapSubset<'_>) {
        let Some(registry) = self.0.upgrade() else {
            debug!("No associated model, not firing event");
            return;
        };
        notify_registry(&registry, changed);
    }
}

/// Deliver `changed` to the observers of `registry`. A notification raised
/// from inside an observer callback is dropped.
pub(crate) fn notify_registry(registry: &RefCell<ObserverRegistry>, changed: &ColorMapSubset<'_>) {
    match registry.try_borrow_mut() {
        Ok(mut observers) => {
            if observers.is_empty() {
                trace!("No observers declared for event firing");
            } else {
                observers.notify(changed);
            }
        }
        Err(_) => warn!(
            labels = ?changed.labels(),
            "Nested change notification dropped"
        ),
    }
}
