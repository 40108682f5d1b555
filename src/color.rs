//! Hex color helpers for the bar gradient.

#[cfg(test)]
#[path = "color_test.rs"]
mod color_test;

fn channel(hex: &str) -> Option<u8> {
    u8::from_str_radix(hex, 16).ok()
}

/// Parse `#RGB` or `#RRGGBB` values into RGB channels.
#[must_use]
pub fn parse_hex_rgb(raw: &str) -> Option<(u8, u8, u8)> {
    let hex = raw.trim().strip_prefix('#')?;
    if !hex.is_ascii() {
        return None;
    }
    match hex.len() {
        3 => Some((
            channel(&hex[0..1].repeat(2))?,
            channel(&hex[1..2].repeat(2))?,
            channel(&hex[2..3].repeat(2))?,
        )),
        6 => Some((channel(&hex[0..2])?, channel(&hex[2..4])?, channel(&hex[4..6])?)),
        _ => None,
    }
}

/// The same color at `alpha` as a CSS `rgba()` string.
///
/// Colors that are not hex are returned unchanged; the gradient then has no
/// faint end but still renders.
#[must_use]
pub fn with_alpha(color: &str, alpha: f64) -> String {
    match parse_hex_rgb(color) {
        Some((r, g, b)) => format!("rgba({r},{g},{b},{})", alpha.clamp(0.0, 1.0)),
        None => color.to_owned(),
    }
}
