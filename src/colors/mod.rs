//! Color values and label entries.

pub mod hex;
pub mod label;

pub use hex::HexColor;
pub use label::{parse_leading_float, ColorLabel};
