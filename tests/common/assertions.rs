//! Assertion utilities for testing.
//!
//! This module provides helper functions for comparing interpolated colors,
//! where rounding may differ by one unit per channel.

use colorwiz::{ColorMap, HexColor};

/// Default per-channel tolerance for color comparisons
pub const DEFAULT_TOLERANCE: u8 = 0;

/// Assert that two colors are equal channel by channel, within `tolerance`.
///
/// # Panics
///
/// Panics if any channel differs by more than `tolerance` (default: 0).
pub fn assert_color_approx_eq(actual: HexColor, expected: HexColor, tolerance: Option<u8>) {
    let tolerance = tolerance.unwrap_or(DEFAULT_TOLERANCE);
    let channels = ["red", "green", "blue"];

    for ((channel, a), e) in channels
        .iter()
        .zip(actual.to_rgb())
        .zip(expected.to_rgb())
    {
        let diff = a.abs_diff(e);
        assert!(
            diff <= tolerance,
            "Colors differ on {}: actual = {}, expected = {}, diff = {}, tolerance = {}",
            channel,
            actual,
            expected,
            diff,
            tolerance
        );
    }
}

/// Assert the color of `label` in `colormap`.
///
/// # Panics
///
/// Panics if the label is unknown, uncolored, or colored differently.
pub fn assert_label_color(colormap: &ColorMap, label: &str, expected: &str) {
    let entry = colormap
        .get(label)
        .unwrap_or_else(|| panic!("Label '{}' not found in {}", label, colormap.name()));
    let expected: HexColor = expected.parse().expect("Invalid expected color");
    assert_eq!(
        entry.color(),
        Some(expected),
        "Unexpected color for label '{}'",
        label
    );
}
