//! Color scales: how colors are derived for the selected labels.
//!
//! A [`Scale`] is either categorical (colors are assigned label by label and
//! nothing is computed) or continuous (colors are interpolated along a
//! gradient over numeric labels, see [`ContinuousScale`]).

pub mod continuous;
pub mod gradient;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::colormap::LabelEntries;
use crate::error::{ColorwizError, Result};

pub use continuous::{ContinuousScale, RelativeEdge};

/// The scale variants, as named in persisted schemes
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
pub enum ScaleKind {
    #[default]
    Categorical,
    Continuous,
}

impl ScaleKind {
    pub fn label(&self) -> &'static str {
        match self {
            ScaleKind::Categorical => "Categorical",
            ScaleKind::Continuous => "Continuous",
        }
    }
}

impl fmt::Display for ScaleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ScaleKind {
    type Err = ColorwizError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "categorical" => Ok(ScaleKind::Categorical),
            "continuous" => Ok(ScaleKind::Continuous),
            _ => Err(ColorwizError::InvalidParameter {
                param: "scale".to_string(),
                message: format!("Unknown scale type: {}", s),
            }),
        }
    }
}

/// Gradient anchors of a continuous scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Edge {
    Start,
    Middle,
    End,
}

/// The strategy attached to a color map
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Scale {
    #[default]
    Categorical,
    Continuous(ContinuousScale),
}

impl Scale {
    /// Build a scale of the given kind over the current entries
    pub(crate) fn build(kind: ScaleKind, entries: &LabelEntries) -> Result<Self> {
        match kind {
            ScaleKind::Categorical => Ok(Scale::Categorical),
            ScaleKind::Continuous => Ok(Scale::Continuous(ContinuousScale::new(entries)?)),
        }
    }

    pub fn kind(&self) -> ScaleKind {
        match self {
            Scale::Categorical => ScaleKind::Categorical,
            Scale::Continuous(_) => ScaleKind::Continuous,
        }
    }

    pub fn name(&self) -> &'static str {
        self.kind().label()
    }

    /// Whether the scale has everything it needs to color the selection
    pub fn is_defined(&self) -> bool {
        match self {
            Scale::Categorical => true,
            Scale::Continuous(scale) => scale.is_defined(),
        }
    }

    /// Recompute the derived colors of the selected entries
    pub(crate) fn recompute(&self, entries: &mut LabelEntries) {
        match self {
            Scale::Categorical => {}
            Scale::Continuous(scale) => scale.calc_selection_colors(entries),
        }
    }

    pub fn as_continuous(&self) -> Option<&ContinuousScale> {
        match self {
            Scale::Continuous(scale) => Some(scale),
            Scale::Categorical => None,
        }
    }

    pub(crate) fn as_continuous_mut(&mut self) -> Option<&mut ContinuousScale> {
        match self {
            Scale::Continuous(scale) => Some(scale),
            Scale::Categorical => None,
        }
    }
}
