//! Colour strings and the toolbar palette.
//!
//! Colours travel through the overlay as CSS colour strings (`"red"`,
//! `"#1bfff7ff"`, `"rgb(0, 128, 255)"`) because the surface stores them
//! verbatim in stroke/fill attributes.

/// Predefined red
pub const RED: &str = "red";

/// Fill value meaning "no fill"
pub const TRANSPARENT: &str = "transparent";

/// Returns true if `value` looks like a CSS colour the surface can store.
///
/// Accepts hex notation (`#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`), functional
/// notation (`rgb()`, `rgba()`, `hsl()`, `hsla()`) and bare keywords such as
/// `red` or `transparent`. Anything that could break out of an attribute or a
/// style declaration is rejected.
pub fn is_color(value: &str) -> bool {
    let value = value.trim();
    if value.is_empty() || value.contains(['"', '\'', '<', '>', ';', '&']) {
        return false;
    }

    if let Some(hex) = value.strip_prefix('#') {
        return matches!(hex.len(), 3 | 4 | 6 | 8) && hex.chars().all(|c| c.is_ascii_hexdigit());
    }

    let lower = value.to_ascii_lowercase();
    for func in ["rgba(", "rgb(", "hsla(", "hsl("] {
        if let Some(args) = lower.strip_prefix(func) {
            return args.ends_with(')')
                && args[..args.len() - 1]
                    .chars()
                    .all(|c| c.is_ascii_digit() || matches!(c, '.' | ',' | '%' | ' ' | '/' | '-'));
        }
    }

    lower.chars().all(|c| c.is_ascii_alphabetic())
}

/// Converts 0-255 RGB components to `#rrggbb`.
pub fn rgb_to_hex(rgb: [u8; 3]) -> String {
    format!("#{:02x}{:02x}{:02x}", rgb[0], rgb[1], rgb[2])
}
