//! Color maps: the labels of one property with their colors and scale.
//!
//! Every label-level mutation on a [`ColorMap`] ends with a notification to
//! the observers of the owning model, carrying a [`ColorMapSubset`] restricted
//! to the labels that changed.

use indexmap::IndexMap;
use serde::Serialize;
use tracing::{debug, info, trace, warn};

use crate::colors::{ColorLabel, HexColor};
use crate::error::{ColorwizError, Result};
use crate::logging::log_scheme_warning;
use crate::observer::Notifier;
use crate::scale::{ContinuousScale, Edge, Scale, ScaleKind};
use crate::scheme::{scheme_key, ColorScheme, ContinuousExtremities, SchemeEdge, SchemeStore};

/// Label entries keyed by their text, in collection order
pub(crate) type LabelEntries = IndexMap<String, ColorLabel>;

/// How an element carrying a given label is to be painted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "action", content = "color", rename_all = "snake_case")]
pub enum Fill {
    /// Paint with this color
    Color(HexColor),
    /// Restore the element's default color
    ResetDefault,
    /// Leave the element untouched
    Keep,
}

/// The labels of one property, their colors, and the scale deriving them
#[derive(Debug)]
pub struct ColorMap {
    name: String,
    entries: LabelEntries,
    reset_default: bool,
    scale: Scale,
    notifier: Notifier,
}

impl ColorMap {
    /// Create a categorical color map with every label included and uncolored.
    /// Duplicate labels collapse into one entry.
    pub fn new<I, S>(name: impl Into<String>, labels: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let name = name.into();
        if name.is_empty() {
            return Err(ColorwizError::precondition("Property name cannot be empty"));
        }

        let mut entries = LabelEntries::new();
        for label in labels {
            let label = label.into();
            let entry = ColorLabel::new(label.clone(), None)?;
            entries.insert(label, entry);
        }

        Ok(Self {
            name,
            entries,
            reset_default: true,
            scale: Scale::default(),
            notifier: Notifier::default(),
        })
    }

    pub(crate) fn attach(&mut self, notifier: Notifier) {
        self.notifier = notifier;
    }

    /// The property name
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, label: &str) -> bool {
        self.entries.contains_key(label)
    }

    pub fn get(&self, label: &str) -> Option<&ColorLabel> {
        self.entries.get(label)
    }

    /// All entries in collection order
    pub fn iter(&self) -> impl Iterator<Item = &ColorLabel> + '_ {
        self.entries.values()
    }

    /// Label texts, optionally restricted to the included ones
    pub fn labels(&self, selected_only: bool) -> Vec<&str> {
        self.entries
            .values()
            .filter(|label| !selected_only || label.included())
            .map(ColorLabel::text)
            .collect()
    }

    /// Included entries in collection order
    pub fn selection(&self) -> Vec<&ColorLabel> {
        self.entries.values().filter(|label| label.included()).collect()
    }

    pub fn all_excluded(&self) -> bool {
        self.entries.values().all(ColorLabel::excluded)
    }

    pub fn all_included(&self) -> bool {
        self.entries.values().all(ColorLabel::included)
    }

    pub fn some_included(&self) -> bool {
        self.entries.values().any(ColorLabel::included)
    }

    /// Every included label reads as a number (vacuously true when none is)
    pub fn all_included_numeric(&self) -> bool {
        self.entries
            .values()
            .filter(|label| label.included())
            .all(ColorLabel::is_numeric)
    }

    /// At least one label is included and every included label has a color
    pub fn is_applicable(&self) -> bool {
        let selection = self.selection();
        !selection.is_empty() && selection.iter().all(|label| label.color().is_some())
    }

    /// Elements whose label is not colored get their default color back
    pub fn reset_default(&self) -> bool {
        self.reset_default
    }

    pub fn set_reset_default(&mut self, reset_default: bool) {
        self.reset_default = reset_default;
    }

    pub fn scale(&self) -> &Scale {
        &self.scale
    }

    pub fn scale_kind(&self) -> ScaleKind {
        self.scale.kind()
    }

    pub fn continuous(&self) -> Option<&ContinuousScale> {
        self.scale.as_continuous()
    }

    /// A view on the given labels, borrowing the live entries
    pub fn subset<S: AsRef<str>>(&self, labels: &[S]) -> Result<ColorMapSubset<'_>> {
        let mut entries: Vec<&ColorLabel> = Vec::with_capacity(labels.len());
        for label in labels {
            let entry = self.entry(label.as_ref())?;
            if !entries.iter().any(|e| e.text() == entry.text()) {
                entries.push(entry);
            }
        }
        trace!(property = %self.name, labels = entries.len(), "ColorMap subset");
        Ok(ColorMapSubset {
            name: &self.name,
            entries,
        })
    }

    /// Include or exclude labels from colorization
    pub fn set_selection<S: AsRef<str>>(&mut self, labels: &[S], included: bool) -> Result<()> {
        self.check_labels(labels)?;
        debug!(
            property = %self.name,
            labels = ?labels.iter().map(|l| l.as_ref()).collect::<Vec<&str>>(),
            included,
            "changing selection"
        );
        for label in labels {
            let label: &str = label.as_ref();
            if let Some(entry) = self.entries.get_mut(label) {
                entry.set_included(included);
            }
        }
        self.fire(labels);
        Ok(())
    }

    /// Assign one color to labels
    pub fn set_color<S: AsRef<str>>(&mut self, labels: &[S], color: HexColor) -> Result<()> {
        self.check_labels(labels)?;
        debug!(
            property = %self.name,
            labels = ?labels.iter().map(|l| l.as_ref()).collect::<Vec<&str>>(),
            color = %color,
            "changing color"
        );
        for label in labels {
            let label: &str = label.as_ref();
            if let Some(entry) = self.entries.get_mut(label) {
                entry.set_color(Some(color));
            }
        }
        self.fire(labels);
        Ok(())
    }

    /// Switch the scale. A continuous scale needs a non-empty, all-numeric
    /// selection; asking for the current kind changes nothing.
    pub fn set_scale_kind(&mut self, kind: ScaleKind) -> Result<()> {
        if kind == self.scale_kind() {
            trace!(property = %self.name, scale = %kind, "No scale change");
            return Ok(());
        }
        if kind == ScaleKind::Continuous && !(self.some_included() && self.all_included_numeric()) {
            return Err(ColorwizError::precondition(format!(
                "Continuous scale for '{}' needs included labels that are all numeric",
                self.name
            )));
        }

        debug!(
            property = %self.name,
            from = %self.scale_kind(),
            to = %kind,
            "Setting scale"
        );
        self.scale = Scale::build(kind, &self.entries)?;
        if kind == ScaleKind::Continuous {
            self.apply_colors();
        }
        Ok(())
    }

    /// Derive the continuous edges again from the current selection
    pub fn reset_edges(&mut self) -> Result<()> {
        let scale = self
            .scale
            .as_continuous_mut()
            .ok_or_else(|| not_continuous(&self.name))?;
        scale.reset_edges(&self.entries)?;
        self.apply_colors();
        Ok(())
    }

    /// Set the color of one gradient edge
    pub fn set_gradient_color(&mut self, edge: Edge, color: HexColor) -> Result<()> {
        let scale = self
            .scale
            .as_continuous_mut()
            .ok_or_else(|| not_continuous(&self.name))?;
        scale.set_edge_color(edge, Some(color));
        self.apply_colors();
        Ok(())
    }

    /// Turn the middle pivot on or off
    pub fn enable_middle_color(&mut self, enabled: bool) -> Result<()> {
        let scale = self
            .scale
            .as_continuous_mut()
            .ok_or_else(|| not_continuous(&self.name))?;
        scale.enable_middle_color(enabled);
        self.apply_colors();
        Ok(())
    }

    /// Move the middle pivot to the value `x`, or to the ratio `x` of the
    /// range when not `absolute`. Ignored while the pivot is disabled.
    pub fn set_middle_position(&mut self, x: f64, absolute: bool) -> Result<()> {
        let scale = self
            .scale
            .as_continuous_mut()
            .ok_or_else(|| not_continuous(&self.name))?;
        if scale.set_middle_position(x, absolute)? {
            self.apply_colors();
        }
        Ok(())
    }

    /// The persisted form of the current selection and scale
    pub fn color_scheme(&self) -> Result<ColorScheme> {
        if !self.is_applicable() || !self.scale.is_defined() {
            return Err(ColorwizError::precondition(format!(
                "Color map for '{}' is not fully colored",
                self.name
            )));
        }

        let colormap = self
            .selection()
            .into_iter()
            .filter_map(|label| label.color().map(|c| (label.text().to_string(), c)))
            .collect();

        let continuous = match self.scale.as_continuous() {
            Some(scale) => Some(ContinuousExtremities {
                start: scheme_edge(scale.start())?,
                end: scheme_edge(scale.end())?,
                middle: if scale.is_middle_color_enabled() {
                    Some(scheme_edge(scale.middle())?)
                } else {
                    None
                },
            }),
            None => None,
        };

        Ok(ColorScheme {
            name: self.name.clone(),
            scale: self.scale_kind(),
            reset_default: self.reset_default,
            colormap,
            continuous,
        })
    }

    /// Apply a persisted scheme. Labels absent from the scheme keep their
    /// color; inclusion flags are not touched. On error (a continuous scheme
    /// over a non-numeric selection, a non-finite middle value) the map is
    /// left unchanged.
    pub fn load_color_scheme(&mut self, scheme: &ColorScheme) -> Result<()> {
        if scheme.scale == ScaleKind::Continuous
            && !(self.some_included() && self.all_included_numeric())
        {
            return Err(ColorwizError::SchemeLoad {
                property: self.name.clone(),
                message: "continuous scheme but the selected labels are not all numeric"
                    .to_string(),
            });
        }

        // Work on copies so that a failing step leaves the map untouched
        let mut entries = self.entries.clone();
        for (label, color) in &scheme.colormap {
            if let Some(entry) = entries.get_mut(label) {
                entry.set_color(Some(*color));
            }
        }

        let mut scale = Scale::build(scheme.scale, &entries)?;
        if let (Some(continuous), Some(extremities)) =
            (scale.as_continuous_mut(), scheme.continuous.as_ref())
        {
            continuous.set_edge_color(Edge::Start, Some(extremities.start.color));
            continuous.set_edge_color(Edge::End, Some(extremities.end.color));
            if let Some(middle) = &extremities.middle {
                continuous.enable_middle_color(true);
                continuous.set_middle_position(middle.value, true)?;
                continuous.set_edge_color(Edge::Middle, Some(middle.color));
                trace!(
                    "Middle color enabled and loaded: {}: {}",
                    middle.value,
                    middle.color
                );
            }
        }
        scale.recompute(&mut entries);

        self.reset_default = scheme.reset_default;
        self.entries = entries;
        self.scale = scale;

        let labels = self.labels(false);
        self.fire(&labels);
        Ok(())
    }

    /// Best-effort load of the scheme saved for this property. Failures are
    /// logged as warnings and leave the map as it was.
    pub fn load_saved_scheme(&mut self, store: &dyn SchemeStore) -> bool {
        debug!("trying to load scheme for {}", self.name);
        let key = scheme_key(&self.name);
        match store
            .load(&key)
            .and_then(|scheme| self.load_color_scheme(&scheme))
        {
            Ok(()) => {
                info!("Color scheme for {} loaded", self.name);
                true
            }
            Err(err) => {
                log_scheme_warning(&self.name, &err);
                false
            }
        }
    }

    /// Save the current scheme under this property's key
    pub fn save_color_scheme(&self, store: &mut dyn SchemeStore) -> Result<()> {
        let scheme = self.color_scheme()?;
        info!(property = %self.name, scale = %scheme.scale, "Saving color scheme");
        store.save(&scheme_key(&self.name), &scheme)
    }

    /// How an element carrying `label` is to be painted
    pub fn fill_for(&self, label: &str) -> Fill {
        match self.entries.get(label) {
            Some(entry) if entry.included() => match entry.color() {
                Some(color) => Fill::Color(color),
                None if self.reset_default => Fill::ResetDefault,
                None => Fill::Keep,
            },
            _ if self.reset_default => Fill::ResetDefault,
            _ => Fill::Keep,
        }
    }

    fn entry(&self, label: &str) -> Result<&ColorLabel> {
        self.entries
            .get(label)
            .ok_or_else(|| ColorwizError::LabelNotFound {
                property: self.name.clone(),
                label: label.to_string(),
            })
    }

    fn check_labels<S: AsRef<str>>(&self, labels: &[S]) -> Result<()> {
        for label in labels {
            self.entry(label.as_ref())?;
        }
        Ok(())
    }

    /// Recompute the derived colors and notify for the whole selection
    fn apply_colors(&mut self) {
        self.scale.recompute(&mut self.entries);
        let labels = self.labels(true);
        self.fire(&labels);
    }

    fn fire<S: AsRef<str>>(&self, labels: &[S]) {
        if !self.notifier.has_observers() {
            trace!("No observers declared for event firing");
            return;
        }
        match self.subset(labels) {
            Ok(changed) => self.notifier.notify(&changed),
            Err(err) => warn!(error = %err, "Cannot build change notification"),
        }
    }
}

fn not_continuous(name: &str) -> ColorwizError {
    ColorwizError::precondition(format!("Color map for '{}' has no continuous scale", name))
}

fn scheme_edge(label: &ColorLabel) -> Result<SchemeEdge> {
    match (label.numeric_value(), label.color()) {
        (Some(value), Some(color)) => Ok(SchemeEdge { value, color }),
        _ => Err(ColorwizError::precondition(format!(
            "Gradient edge '{}' has no value or color",
            label.text()
        ))),
    }
}

/// The changed part of a color map, as delivered to observers.
///
/// It borrows the live entries of the map, so it cannot outlive the
/// notification call.
#[derive(Debug, Clone)]
pub struct ColorMapSubset<'a> {
    name: &'a str,
    entries: Vec<&'a ColorLabel>,
}

impl<'a> ColorMapSubset<'a> {
    /// The property name of the originating map
    pub fn name(&self) -> &'a str {
        self.name
    }

    pub fn labels(&self) -> Vec<&'a str> {
        self.entries.iter().map(|label| label.text()).collect()
    }

    pub fn get(&self, label: &str) -> Option<&'a ColorLabel> {
        self.entries.iter().copied().find(|e| e.text() == label)
    }

    pub fn contains(&self, label: &str) -> bool {
        self.get(label).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a ColorLabel> + '_ {
        self.entries.iter().copied()
    }

    /// Included entries among the changed ones
    pub fn selection(&self) -> Vec<&'a ColorLabel> {
        self.iter().filter(|label| label.included()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
