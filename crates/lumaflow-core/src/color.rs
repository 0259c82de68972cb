//! Packed 24-bit RGB color math.
//!
//! Colors travel through the system as `0xRRGGBB` integers; the helpers
//! here convert between that form, 8-bit channel triples, HSV and the
//! `#RRGGBB` strings used on the wire.

use crate::{CoreError, Result};

/// Pack 8-bit channels into `0xRRGGBB`.
pub fn pack_rgb(r: u8, g: u8, b: u8) -> u32 {
    ((r as u32) << 16) | ((g as u32) << 8) | b as u32
}

/// Unpack `0xRRGGBB` into 8-bit channels.
pub fn unpack_rgb(color: u32) -> (u8, u8, u8) {
    (
        ((color >> 16) & 0xFF) as u8,
        ((color >> 8) & 0xFF) as u8,
        (color & 0xFF) as u8,
    )
}

/// Per-channel linear interpolation between two packed colors.
///
/// The interpolated float is truncated, not rounded, so `t = 1.0` may land
/// one count below the target channel value.
pub fn interpolate(from: u32, to: u32, t: f32) -> u32 {
    let (r1, g1, b1) = unpack_rgb(from);
    let (r2, g2, b2) = unpack_rgb(to);
    let lerp = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t) as u32;
    (lerp(r1, r2) << 16) | (lerp(g1, g2) << 8) | lerp(b1, b2)
}

/// Six-sector HSV to packed RGB.
///
/// `h` is taken as degrees by the sector split (`h / 60`); the animator
/// passes its raw 0..255 hue accumulator straight through, which sweeps
/// about four sectors and restarts — that truncated sweep is the intended
/// full-spectrum look. `s` and `v` are 0..255 and normalized internally.
pub fn hsv_to_rgb(h: f32, s: u8, v: u8) -> u32 {
    let s = s as f32 / 255.0;
    let v = v as f32 / 255.0;
    let hi = (h / 60.0) as i32 % 6;
    let f = h / 60.0 - (h / 60.0).floor();
    let p = v * (1.0 - s);
    let q = v * (1.0 - f * s);
    let t = v * (1.0 - (1.0 - f) * s);
    let (r, g, b) = match hi {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };
    pack_rgb((r * 255.0) as u8, (g * 255.0) as u8, (b * 255.0) as u8)
}

/// Parse a strict `#RRGGBB` string into a packed color.
pub fn parse_hex(s: &str) -> Result<u32> {
    let digits = s
        .strip_prefix('#')
        .filter(|d| d.len() == 6)
        .ok_or_else(|| CoreError::InvalidColor(s.to_string()))?;
    let value =
        u32::from_str_radix(digits, 16).map_err(|_| CoreError::InvalidColor(s.to_string()))?;
    Ok(value)
}

/// Format a packed color as the lowercase `#rrggbb` wire form.
pub fn format_hex(color: u32) -> String {
    format!("#{:06x}", color & 0xFFFFFF)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_pack_unpack() {
        assert_eq!(pack_rgb(0x12, 0x34, 0x56), 0x123456);
        assert_eq!(unpack_rgb(0x123456), (0x12, 0x34, 0x56));
        assert_eq!(unpack_rgb(pack_rgb(255, 0, 255)), (255, 0, 255));
    }

    #[test]
    fn test_interpolate_endpoints() {
        assert_eq!(interpolate(0x112233, 0x445566, 0.0), 0x112233);
        // t = 1.0 lands exactly on the target (integer deltas, exact floats)
        assert_eq!(interpolate(0x000000, 0xFFFFFF, 1.0), 0xFFFFFF);
    }

    #[test]
    fn test_interpolate_midpoint_truncates() {
        // 0x00 -> 0xFF at t = 0.5 is 127.5, truncated to 127
        assert_eq!(interpolate(0x000000, 0xFFFFFF, 0.5), 0x7F7F7F);
    }

    #[test]
    fn test_hsv_primary_colors() {
        assert_eq!(hsv_to_rgb(0.0, 255, 255), 0xFF0000);
        assert_eq!(hsv_to_rgb(120.0, 255, 255), 0x00FF00);
        assert_eq!(hsv_to_rgb(240.0, 255, 255), 0x0000FF);
    }

    #[test]
    fn test_hsv_zero_saturation_is_gray() {
        assert_eq!(hsv_to_rgb(200.0, 0, 255), 0xFFFFFF);
        assert_eq!(hsv_to_rgb(50.0, 0, 0), 0x000000);
    }

    #[test]
    fn test_parse_hex() {
        assert_eq!(parse_hex("#112233").unwrap(), 0x112233);
        assert_eq!(parse_hex("#AABBCC").unwrap(), 0xAABBCC);
        assert_eq!(parse_hex("#aabbcc").unwrap(), 0xAABBCC);
        assert!(parse_hex("112233").is_err());
        assert!(parse_hex("#11223").is_err());
        assert!(parse_hex("#1122334").is_err());
        assert!(parse_hex("#11223g").is_err());
        assert!(parse_hex("").is_err());
    }

    #[test]
    fn test_format_hex() {
        assert_eq!(format_hex(0xFFFFFF), "#ffffff");
        assert_eq!(format_hex(0x000102), "#000102");
        assert_eq!(format_hex(0xAABBCC), "#aabbcc");
    }

    proptest! {
        #[test]
        fn prop_pack_unpack_roundtrip(r: u8, g: u8, b: u8) {
            prop_assert_eq!(unpack_rgb(pack_rgb(r, g, b)), (r, g, b));
        }

        #[test]
        fn prop_interpolate_identity(c in 0u32..=0xFFFFFF, t in 0.0f32..=1.0) {
            prop_assert_eq!(interpolate(c, c, t), c);
        }

        #[test]
        fn prop_interpolate_end_within_one(
            c1 in 0u32..=0xFFFFFF,
            c2 in 0u32..=0xFFFFFF,
        ) {
            prop_assert_eq!(interpolate(c1, c2, 0.0), c1);
            let (r2, g2, b2) = unpack_rgb(c2);
            let (r, g, b) = unpack_rgb(interpolate(c1, c2, 1.0));
            prop_assert!((r as i32 - r2 as i32).abs() <= 1);
            prop_assert!((g as i32 - g2 as i32).abs() <= 1);
            prop_assert!((b as i32 - b2 as i32).abs() <= 1);
        }

        #[test]
        fn prop_hex_roundtrip(c in 0u32..=0xFFFFFF) {
            prop_assert_eq!(parse_hex(&format_hex(c)).unwrap(), c);
        }
    }
}
