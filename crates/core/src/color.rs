//! RGBA color record to hex string conversion.

use tokenbake_interchange::Rgba;

/// Convert a color record to a lower-case hex string.
///
/// Opaque colors (alpha absent or exactly 1) become `#rrggbb`; anything
/// else becomes `#rrggbbaa`. Each channel is `round(c * 255)` with halves
/// rounded away from zero, clamped to `0..=255`.
pub fn rgba_to_hex(c: &Rgba) -> String {
    let (r, g, b) = (channel(c.r), channel(c.g), channel(c.b));
    match c.a {
        Some(a) if a != 1.0 => format!("#{:02x}{:02x}{:02x}{:02x}", r, g, b, channel(a)),
        _ => format!("#{:02x}{:02x}{:02x}", r, g, b),
    }
}

fn channel(v: f64) -> u8 {
    // NaN saturates to 0 in the cast.
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}
