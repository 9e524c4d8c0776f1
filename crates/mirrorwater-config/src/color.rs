//! CSS-style color strings, as hosts usually hand them over.

use crate::error::ConfigError;

/// Parse `rgba(r, g, b, a)`, `rgb(r, g, b)`, `#rrggbb` or `#rrggbbaa` into
/// normalized RGBA.
///
/// Color channels are 0-255, alpha in `rgba()` is 0.0-1.0.
pub fn parse_rgba(input: &str) -> Result<[f32; 4], ConfigError> {
    let invalid = || ConfigError::InvalidColor(input.to_string());
    let s = input.trim();

    if let Some(hex) = s.strip_prefix('#') {
        return parse_hex(hex).ok_or_else(invalid);
    }

    let (body, want_alpha) = if let Some(rest) = s.strip_prefix("rgba(") {
        (rest, true)
    } else if let Some(rest) = s.strip_prefix("rgb(") {
        (rest, false)
    } else {
        return Err(invalid());
    };
    let body = body.strip_suffix(')').ok_or_else(invalid)?;

    let parts: Vec<&str> = body.split(',').map(str::trim).collect();
    let expected = if want_alpha { 4 } else { 3 };
    if parts.len() != expected {
        return Err(invalid());
    }

    let mut rgba = [0.0, 0.0, 0.0, 1.0];
    for (i, part) in parts[..3].iter().enumerate() {
        let channel: f32 = part.parse().map_err(|_| invalid())?;
        if !(0.0..=255.0).contains(&channel) {
            return Err(invalid());
        }
        rgba[i] = channel / 255.0;
    }
    if want_alpha {
        let alpha: f32 = parts[3].parse().map_err(|_| invalid())?;
        if !(0.0..=1.0).contains(&alpha) {
            return Err(invalid());
        }
        rgba[3] = alpha;
    }
    Ok(rgba)
}

fn parse_hex(hex: &str) -> Option<[f32; 4]> {
    if (hex.len() != 6 && hex.len() != 8) || !hex.is_ascii() {
        return None;
    }
    let mut rgba = [0.0, 0.0, 0.0, 1.0];
    for (i, slot) in rgba.iter_mut().enumerate().take(hex.len() / 2) {
        let byte = u8::from_str_radix(&hex[i * 2..i * 2 + 2], 16).ok()?;
        *slot = f32::from(byte) / 255.0;
    }
    Some(rgba)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: [f32; 4], b: [f32; 4]) -> bool {
        a.iter().zip(b.iter()).all(|(x, y)| (x - y).abs() < 1e-6)
    }

    #[test]
    fn test_default_water_color_string() {
        let rgba = parse_rgba("rgba(45, 95, 146, 1.0)").unwrap();
        assert!(approx(rgba, [45.0 / 255.0, 95.0 / 255.0, 146.0 / 255.0, 1.0]));
    }

    #[test]
    fn test_rgb_has_opaque_alpha() {
        let rgba = parse_rgba("rgb(255,0,0)").unwrap();
        assert!(approx(rgba, [1.0, 0.0, 0.0, 1.0]));
    }

    #[test]
    fn test_hex_forms() {
        assert!(approx(parse_rgba("#ff0000").unwrap(), [1.0, 0.0, 0.0, 1.0]));
        assert!(approx(parse_rgba("#00ff0080").unwrap(), [0.0, 1.0, 0.0, 128.0 / 255.0]));
    }

    #[test]
    fn test_rejects_malformed() {
        for bad in [
            "",
            "blue",
            "rgba(1, 2, 3)",
            "rgb(1, 2, 3, 4)",
            "rgb(300, 0, 0)",
            "rgba(0, 0, 0, 2.0)",
            "rgb(a, b, c)",
            "rgb(1, 2, 3",
            "#fff",
            "#gg0000",
        ] {
            assert!(
                matches!(parse_rgba(bad), Err(ConfigError::InvalidColor(_))),
                "{bad:?} should be rejected"
            );
        }
    }
}
