//! # colorwiz
//!
//! Color diagram elements according to the value of one of their properties.
//!
//! The labels (distinct values) collected for every property form a
//! [`ColorMap`]. A label can be included or excluded and carries an optional
//! color. Colors are either assigned label by label (categorical scale) or
//! interpolated along a gradient over numeric labels (continuous scale, with
//! an optional middle pivot).
//!
//! ## Key Features
//!
//! - **Color model**: one color map per property, a current property, and
//!   synchronous change notification restricted to the labels that changed
//! - **Continuous scales**: linear gradients between the lowest and highest
//!   selected values, with an optional movable middle color
//! - **Color schemes**: save and restore a color map as a JSON document
//!
//! ## Example
//!
//! ```
//! use colorwiz::{CollectedProperties, ColorModel, HexColor};
//!
//! let mut collected = CollectedProperties::new();
//! collected.insert("status".to_string(), vec!["open".to_string(), "closed".to_string()]);
//!
//! let mut model = ColorModel::new(collected).unwrap();
//! model.register_observer(|changed| println!("changed: {:?}", changed.labels()));
//! model.colormap_mut().set_color(&["open"], HexColor::from_rgb(0, 128, 0)).unwrap();
//! assert_eq!(model.colormap().get("open").unwrap().color().unwrap().to_string(), "#008000");
//! ```

pub mod colormap;
pub mod colors;
pub mod config;
pub mod error;
pub mod input;
pub mod logging;
pub mod model;
pub mod observer;
pub mod report;
pub mod scale;
pub mod scheme;

pub use colormap::{ColorMap, ColorMapSubset, Fill};
pub use colors::{ColorLabel, HexColor};
pub use config::{Config, OutputFormat};
pub use error::{ColorwizError, Result};
pub use logging::{
    init_tracing, log_error, log_operation_end, log_operation_start, log_timed_operation,
};
pub use model::{CollectedProperties, ColorModel};
pub use observer::ObserverId;
pub use scale::{ContinuousScale, Edge, RelativeEdge, Scale, ScaleKind};
pub use scheme::{ColorScheme, MemorySchemeStore, SchemeStore};
