//! Rendering of a color map for the command line: a plain text table or a
//! JSON report describing every label and how it would be painted.

use serde::Serialize;
use std::fmt::Write;
use tracing::debug;

use crate::colormap::{ColorMap, Fill};
use crate::scale::{RelativeEdge, ScaleKind};

/// Description of one color map
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColorMapReport {
    pub property: String,
    pub scale: ScaleKind,
    pub reset_default: bool,
    pub applicable: bool,
    pub labels: Vec<LabelReport>,
    /// Gradient stops, for a continuous scale
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gradient: Option<Vec<RelativeEdge>>,
}

/// One label row of a report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelReport {
    pub text: String,
    pub included: bool,
    pub value: Option<f64>,
    pub fill: Fill,
}

impl ColorMapReport {
    pub fn from_colormap(colormap: &ColorMap) -> Self {
        let labels: Vec<LabelReport> = colormap
            .iter()
            .map(|label| LabelReport {
                text: label.text().to_string(),
                included: label.included(),
                value: label.numeric_value(),
                fill: colormap.fill_for(label.text()),
            })
            .collect();

        debug!(
            property = colormap.name(),
            label_count = labels.len(),
            "Built color map report"
        );

        Self {
            property: colormap.name().to_string(),
            scale: colormap.scale_kind(),
            reset_default: colormap.reset_default(),
            applicable: colormap.is_applicable(),
            labels,
            gradient: colormap.continuous().map(|scale| scale.relative_edges()),
        }
    }

    /// Aligned text table, one row per label
    pub fn render_table(&self) -> String {
        let width = self
            .labels
            .iter()
            .map(|label| label.text.chars().count())
            .max()
            .unwrap_or(0)
            .max("LABEL".len());

        let mut out = String::new();
        let _ = writeln!(
            out,
            "{} ({} scale, reset default: {})",
            self.property,
            self.scale,
            if self.reset_default { "yes" } else { "no" }
        );
        let _ = writeln!(out, "{:<width$}  {:<8}  FILL", "LABEL", "INCLUDED");
        for label in &self.labels {
            let fill = match label.fill {
                Fill::Color(color) => color.to_string(),
                Fill::ResetDefault => "default".to_string(),
                Fill::Keep => "-".to_string(),
            };
            let included = if label.included { "yes" } else { "no" };
            let _ = writeln!(out, "{:<width$}  {:<8}  {}", label.text, included, fill);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::HexColor;
    use crate::scale::Edge;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_report_from_colormap() {
        let mut colormap = ColorMap::new("status", ["open", "closed"]).unwrap();
        colormap.set_color(&["open"], HexColor::WHITE).unwrap();
        colormap.set_selection(&["closed"], false).unwrap();

        let report = ColorMapReport::from_colormap(&colormap);
        assert_eq!(report.property, "status");
        assert_eq!(report.scale, ScaleKind::Categorical);
        assert!(report.applicable);
        assert!(report.gradient.is_none());
        assert_eq!(report.labels[0].fill, Fill::Color(HexColor::WHITE));
        assert_eq!(report.labels[1].fill, Fill::ResetDefault);
    }

    #[test]
    fn test_render_table() {
        let mut colormap = ColorMap::new("status", ["open", "in progress"]).unwrap();
        colormap.set_color(&["open"], HexColor::from_rgb(0xFF, 0, 0)).unwrap();
        colormap.set_reset_default(false);

        let table = ColorMapReport::from_colormap(&colormap).render_table();
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines[0], "status (Categorical scale, reset default: no)");
        assert_eq!(lines[1], "LABEL        INCLUDED  FILL");
        assert_eq!(lines[2], "open         yes       #FF0000");
        assert_eq!(lines[3], "in progress  yes       -");
    }

    #[test]
    fn test_json_report_includes_gradient() {
        let mut colormap = ColorMap::new("size", ["0", "10"]).unwrap();
        colormap.set_scale_kind(ScaleKind::Continuous).unwrap();
        colormap.set_gradient_color(Edge::Start, HexColor::BLACK).unwrap();
        colormap.set_gradient_color(Edge::End, HexColor::WHITE).unwrap();

        let json = serde_json::to_value(ColorMapReport::from_colormap(&colormap)).unwrap();
        assert_eq!(json["scale"], "Continuous");
        assert_eq!(json["gradient"][0]["x"], 0.0);
        assert_eq!(json["gradient"][1]["x"], 1.0);
        assert_eq!(json["labels"][0]["fill"]["action"], "color");
        assert_eq!(json["labels"][0]["fill"]["color"], "#000000");
    }
}
