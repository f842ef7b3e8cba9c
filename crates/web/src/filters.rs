//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

/// Renders a two-letter country code as its flag emoji.
///
/// Each ASCII letter maps onto a Unicode regional indicator symbol;
/// browsers combine the resulting pair into a single flag glyph.
///
/// Usage in templates: `{{ code|flag }}`
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn flag(code: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    const REGIONAL_INDICATOR_A: u32 = 0x1F1E6;
    const ASCII_A: u32 = 'A' as u32;

    let code = code.to_string();
    let mut out = String::with_capacity(8);
    for c in code.chars() {
        if !c.is_ascii_uppercase() {
            // Not a country code; show the raw text rather than half a glyph.
            return Ok(code);
        }
        if let Some(indicator) = char::from_u32(REGIONAL_INDICATOR_A + (c as u32 - ASCII_A)) {
            out.push(indicator);
        }
    }
    Ok(out)
}

/// Returns the current year.
///
/// Usage in templates: `{{ ""|current_year }}`
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    use chrono::Datelike;
    Ok(chrono::Utc::now().year())
}
