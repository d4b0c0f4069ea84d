//! Label entries: one categorical value, its color and its inclusion flag.

use super::hex::HexColor;
use crate::error::{ColorwizError, Result};

/// Association of a label with an optional color and an inclusion flag.
///
/// The numeric reading of the text is parsed once, when the text is set.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorLabel {
    text: String,
    numeric: Option<f64>,
    color: Option<HexColor>,
    included: bool,
}

impl ColorLabel {
    /// Create an included label. The text must not be empty.
    pub fn new(text: impl Into<String>, color: Option<HexColor>) -> Result<Self> {
        let text = text.into();
        check_text(&text)?;
        Ok(Self {
            numeric: parse_leading_float(&text),
            text,
            color,
            included: true,
        })
    }

    /// Copy of this label carrying another text. Color and inclusion are kept.
    pub fn with_text(&self, text: impl Into<String>) -> Result<Self> {
        let mut copy = self.clone();
        copy.set_text(text)?;
        Ok(copy)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the text and parse its numeric value again
    pub fn set_text(&mut self, text: impl Into<String>) -> Result<()> {
        let text = text.into();
        check_text(&text)?;
        self.numeric = parse_leading_float(&text);
        self.text = text;
        Ok(())
    }

    /// The numeric reading of the text, if it starts with a number
    pub fn numeric_value(&self) -> Option<f64> {
        self.numeric
    }

    pub fn is_numeric(&self) -> bool {
        self.numeric.is_some()
    }

    pub fn color(&self) -> Option<HexColor> {
        self.color
    }

    pub fn set_color(&mut self, color: Option<HexColor>) {
        self.color = color;
    }

    pub fn included(&self) -> bool {
        self.included
    }

    pub fn excluded(&self) -> bool {
        !self.included
    }

    pub fn set_included(&mut self, included: bool) {
        self.included = included;
    }

    pub fn set_excluded(&mut self, excluded: bool) {
        self.included = !excluded;
    }
}

fn check_text(text: &str) -> Result<()> {
    if text.is_empty() {
        return Err(ColorwizError::precondition("Color label text cannot be empty"));
    }
    Ok(())
}

/// Read the longest floating-point literal at the start of `text`.
///
/// Leading whitespace is skipped and trailing characters are ignored, so
/// `"10 kg"` reads as `10` and `"2.5 - middle color"` as `2.5`. Returns `None`
/// when the text does not start with a number.
pub fn parse_leading_float(text: &str) -> Option<f64> {
    let s = text.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }
    if s[end..].starts_with("Infinity") {
        return s[..end + "Infinity".len()].parse::<f64>().ok();
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;
    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }
    if digits == 0 {
        return None;
    }

    // Exponent only counts when followed by at least one digit
    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && (bytes[exp_end] == b'+' || bytes[exp_end] == b'-') {
            exp_end += 1;
        }
        let exp_digits = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_leading_float() {
        assert_eq!(parse_leading_float("5"), Some(5.0));
        assert_eq!(parse_leading_float("-2.5"), Some(-2.5));
        assert_eq!(parse_leading_float("  .5"), Some(0.5));
        assert_eq!(parse_leading_float("10 kg"), Some(10.0));
        assert_eq!(parse_leading_float("1e3"), Some(1000.0));
        assert_eq!(parse_leading_float("1e"), Some(1.0));
        assert_eq!(parse_leading_float("3. apples"), Some(3.0));
        assert_eq!(parse_leading_float("2.5 - middle color"), Some(2.5));
        assert_eq!(parse_leading_float("-Infinity"), Some(f64::NEG_INFINITY));
        assert_eq!(parse_leading_float("open"), None);
        assert_eq!(parse_leading_float("."), None);
        assert_eq!(parse_leading_float("-"), None);
        assert_eq!(parse_leading_float(""), None);
    }

    #[test]
    fn test_new_label() {
        let label = ColorLabel::new("42", None).unwrap();
        assert_eq!(label.text(), "42");
        assert_eq!(label.numeric_value(), Some(42.0));
        assert!(label.is_numeric());
        assert!(label.included());
        assert!(label.color().is_none());

        let label = ColorLabel::new("open", Some(HexColor::WHITE)).unwrap();
        assert!(!label.is_numeric());
        assert_eq!(label.color(), Some(HexColor::WHITE));

        assert!(ColorLabel::new("", None).is_err());
    }

    #[test]
    fn test_inclusion_views() {
        let mut label = ColorLabel::new("a", None).unwrap();
        label.set_excluded(true);
        assert!(label.excluded());
        assert!(!label.included());
        label.set_included(true);
        assert!(!label.excluded());
    }

    #[test]
    fn test_set_text_reparses() {
        let mut label = ColorLabel::new("1", None).unwrap();
        label.set_text("7.5 - middle color").unwrap();
        assert_eq!(label.numeric_value(), Some(7.5));
        label.set_text("none").unwrap();
        assert_eq!(label.numeric_value(), None);
        assert!(label.set_text("").is_err());
        assert_eq!(label.text(), "none");
    }

    #[test]
    fn test_with_text_is_detached() {
        let mut original = ColorLabel::new("3", Some(HexColor::BLACK)).unwrap();
        original.set_included(false);

        let copy = original.with_text("9").unwrap();
        assert_eq!(copy.numeric_value(), Some(9.0));
        assert_eq!(copy.color(), Some(HexColor::BLACK));
        assert!(copy.excluded());

        original.set_color(None);
        assert_eq!(copy.color(), Some(HexColor::BLACK));
        assert_eq!(original.text(), "3");
    }
}
