//! Gradient scale over numeric labels, with an optional middle pivot.
//!
//! The start and end edges are detached copies of the lowest and highest
//! selected labels; the middle edge is a synthetic label whose text reads
//! `"<value> - middle color"`. Colors of the selected labels are interpolated
//! over one segment (start to end) or two (start to middle to end).

use serde::Serialize;
use tracing::{debug, info, trace};

use super::gradient::{lerp_color, ratio_to_value, value_to_ratio};
use super::Edge;
use crate::colormap::LabelEntries;
use crate::colors::{ColorLabel, HexColor};
use crate::error::{ColorwizError, Result};

const MIDDLE_SUFFIX: &str = "middle color";

/// An enabled edge as a relative position in the gradient, for drawing stops
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RelativeEdge {
    pub color: Option<HexColor>,
    pub x: f64,
}

/// Linear color scale computed from the included numeric labels
#[derive(Debug, Clone, PartialEq)]
pub struct ContinuousScale {
    start: ColorLabel,
    middle: ColorLabel,
    end: ColorLabel,
    /// Keys of the included numeric labels, ascending by value
    selection: Vec<String>,
}

impl ContinuousScale {
    /// Build the scale and derive its edges from the current selection
    pub(crate) fn new(entries: &LabelEntries) -> Result<Self> {
        let mut middle = ColorLabel::new(format!("unset - {}", MIDDLE_SUFFIX), None)?;
        middle.set_included(false);
        let mut scale = Self {
            start: middle.clone(),
            end: middle.clone(),
            middle,
            selection: Vec::new(),
        };
        scale.reset_edges(entries)?;
        Ok(scale)
    }

    /// Sort the selection again and take new copies of the extreme labels.
    ///
    /// The middle value is kept when already numeric, otherwise it is set to 0
    /// when the range crosses zero, or to the midpoint of the range.
    pub(crate) fn reset_edges(&mut self, entries: &LabelEntries) -> Result<()> {
        trace!("resetting continuous scale edges");
        let mut sorted: Vec<(f64, &String, &ColorLabel)> = entries
            .iter()
            .filter(|(_, label)| label.included())
            .filter_map(|(key, label)| label.numeric_value().map(|v| (v, key, label)))
            .collect();
        sorted.sort_by(|a, b| a.0.total_cmp(&b.0));

        let (first, last) = match (sorted.first(), sorted.last()) {
            (Some(first), Some(last)) => (*first, *last),
            _ => {
                return Err(ColorwizError::precondition(
                    "No included numeric label to derive a continuous scale from",
                ))
            }
        };
        let (start_value, end_value) = (first.0, last.0);

        self.start = first.2.clone();
        self.end = last.2.clone();
        self.selection = sorted.iter().map(|(_, key, _)| (*key).clone()).collect();

        if !self.middle.is_numeric() {
            let value = if start_value < 0.0 && end_value > 0.0 {
                0.0
            } else {
                (start_value + end_value) / 2.0
            };
            self.middle.set_text(middle_text(value))?;
        }
        debug!(
            start = start_value,
            end = end_value,
            middle = ?self.middle.numeric_value(),
            selected = self.selection.len(),
            "Continuous scale edges reset"
        );
        Ok(())
    }

    /// Keys of the selected numeric labels, ascending by value
    pub fn selection(&self) -> &[String] {
        &self.selection
    }

    pub fn start(&self) -> &ColorLabel {
        &self.start
    }

    pub fn middle(&self) -> &ColorLabel {
        &self.middle
    }

    pub fn end(&self) -> &ColorLabel {
        &self.end
    }

    pub fn edge(&self, edge: Edge) -> &ColorLabel {
        match edge {
            Edge::Start => &self.start,
            Edge::Middle => &self.middle,
            Edge::End => &self.end,
        }
    }

    pub fn is_middle_color_enabled(&self) -> bool {
        self.middle.included()
    }

    pub(crate) fn enable_middle_color(&mut self, enabled: bool) {
        debug!("middle included <- {}", enabled);
        self.middle.set_included(enabled);
    }

    pub(crate) fn set_edge_color(&mut self, edge: Edge, color: Option<HexColor>) {
        let label = match edge {
            Edge::Start => &mut self.start,
            Edge::Middle => &mut self.middle,
            Edge::End => &mut self.end,
        };
        label.set_color(color);
        trace!(edge = ?edge, color = ?color, "gradient edge color set");
    }

    /// Move the middle pivot, either to the value `x` (`absolute`) or to the
    /// ratio `x` of the range. Returns false when the pivot is disabled.
    pub(crate) fn set_middle_position(&mut self, x: f64, absolute: bool) -> Result<bool> {
        if !self.is_middle_color_enabled() {
            trace!("Middle color not enabled, not changing position");
            return Ok(false);
        }
        if !x.is_finite() {
            return Err(ColorwizError::InvalidParameter {
                param: "middle position".to_string(),
                message: format!("{} is not a finite number", x),
            });
        }
        let value = if absolute { x } else { self.ratio_to_value(x) };
        self.middle.set_text(middle_text(value))?;
        debug!("Middle position <- {}", value);
        Ok(true)
    }

    /// Enabled edges in gradient order: start, middle when enabled, end
    pub fn edges(&self) -> Vec<&ColorLabel> {
        let mut edges = vec![&self.start];
        if self.is_middle_color_enabled() {
            edges.push(&self.middle);
        }
        edges.push(&self.end);
        edges
    }

    /// Enabled edges as relative positions between start (0) and end (1)
    pub fn relative_edges(&self) -> Vec<RelativeEdge> {
        self.edges()
            .into_iter()
            .map(|edge| RelativeEdge {
                color: edge.color(),
                x: self.value_to_ratio(bound(edge)),
            })
            .collect()
    }

    /// Start and end colors are set, and the middle one too when enabled
    pub fn is_defined(&self) -> bool {
        self.start.color().is_some()
            && self.end.color().is_some()
            && (!self.is_middle_color_enabled() || self.middle.color().is_some())
    }

    /// Absolute value at `ratio` of the range. Not clamped.
    pub fn ratio_to_value(&self, ratio: f64) -> f64 {
        ratio_to_value(ratio, bound(&self.start), bound(&self.end))
    }

    /// Relative position of `value` in the range. Not clamped.
    pub fn value_to_ratio(&self, value: f64) -> f64 {
        value_to_ratio(value, bound(&self.start), bound(&self.end))
    }

    /// Interpolate the colors of the selected labels over the enabled edges.
    /// Without a complete set of edge colors, the selection loses its colors.
    pub(crate) fn calc_selection_colors(&self, entries: &mut LabelEntries) {
        if !self.is_defined() {
            info!("Undefined color at gradient extremity. Gradient colors not calculated");
            for key in &self.selection {
                if let Some(label) = entries.get_mut(key) {
                    label.set_color(None);
                }
            }
            return;
        }

        for pair in self.edges().windows(2) {
            let (a, b) = (pair[0], pair[1]);
            let (Some(a_color), Some(b_color)) = (a.color(), b.color()) else {
                continue;
            };
            let (a_value, b_value) = (bound(a), bound(b));
            trace!("Segment {} -> {}", a_value, b_value);

            for key in &self.selection {
                let Some(label) = entries.get_mut(key) else {
                    continue;
                };
                let Some(value) = label.numeric_value() else {
                    continue;
                };
                if value < a_value || value > b_value {
                    continue;
                }
                let color = if b_value > a_value {
                    lerp_color(a_color, b_color, (value - a_value) / (b_value - a_value))
                } else {
                    a_color
                };
                trace!("Color for {}: {}", label.text(), color);
                label.set_color(Some(color));
            }
        }
    }
}

fn middle_text(value: f64) -> String {
    format!("{} - {}", value, MIDDLE_SUFFIX)
}

// Edges always carry a numeric text once the scale is built
fn bound(label: &ColorLabel) -> f64 {
    label.numeric_value().unwrap_or_default()
}
