//! Text shadow codec.
//!
//! Shadows are stored on text layers as CSS-like strings. Two input forms are
//! understood:
//!
//! - `2px 4px 6px rgba(0, 0, 0, 0.5)` (also `rgb(...)`, alpha optional)
//! - `2px 4px 6px #000000` (also `#000`, implicit opacity 1)
//!
//! Encoding always produces the `rgba(...)` form.

use std::sync::LazyLock;

use regex::Regex;

use super::color::{hex_to_rgb, rgb_to_hex};

const NUMBER: &str = r"(-?[0-9]+(?:\.[0-9]+)?)";

static RGBA_SHADOW: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"^{n}px\s+{n}px\s+{n}px\s+rgba?\(\s*([0-9]+(?:\.[0-9]+)?)\s*,\s*([0-9]+(?:\.[0-9]+)?)\s*,\s*([0-9]+(?:\.[0-9]+)?)\s*(?:,\s*{n}\s*)?\)$",
        n = NUMBER
    ))
    .expect("rgba shadow pattern is valid")
});

static HEX_SHADOW: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"^{n}px\s+{n}px\s+{n}px\s+(#[0-9a-fA-F]{{6}}|#[0-9a-fA-F]{{3}})$",
        n = NUMBER
    ))
    .expect("hex shadow pattern is valid")
});

/// Structured shadow parameters
#[derive(Debug, Clone, PartialEq)]
pub struct ShadowParams {
    pub offset_x: f64,
    pub offset_y: f64,
    pub blur_radius: f64,
    /// Lowercase `#rrggbb`
    pub color: String,
    /// 0.0 to 1.0
    pub opacity: f64,
}

impl Default for ShadowParams {
    fn default() -> Self {
        Self {
            offset_x: 0.0,
            offset_y: 0.0,
            blur_radius: 0.0,
            color: "#000000".to_string(),
            opacity: 0.5,
        }
    }
}

/// Parse a shadow string. Never fails: absent, `"none"` and unparseable
/// input all decode to [`ShadowParams::default`].
pub fn decode_shadow(shadow: Option<&str>) -> ShadowParams {
    let Some(raw) = shadow.map(str::trim) else {
        return ShadowParams::default();
    };
    if raw.is_empty() || raw.eq_ignore_ascii_case("none") {
        return ShadowParams::default();
    }

    parse_rgba_form(raw)
        .or_else(|| parse_hex_form(raw))
        .unwrap_or_default()
}

/// Render shadow parameters in the `rgba(...)` functional form.
pub fn encode_shadow(params: &ShadowParams) -> String {
    let [r, g, b] = hex_to_rgb(&params.color).unwrap_or([0, 0, 0]);
    format!(
        "{}px {}px {}px rgba({}, {}, {}, {})",
        params.offset_x,
        params.offset_y,
        params.blur_radius,
        r,
        g,
        b,
        params.opacity.clamp(0.0, 1.0)
    )
}

fn parse_rgba_form(raw: &str) -> Option<ShadowParams> {
    let caps = RGBA_SHADOW.captures(raw)?;
    let number = |i: usize| caps.get(i)?.as_str().parse::<f64>().ok();
    let channel = |i: usize| number(i).map(|v| v.round().clamp(0.0, 255.0) as u8);

    let opacity = match caps.get(7) {
        Some(alpha) => alpha.as_str().parse::<f64>().ok()?.clamp(0.0, 1.0),
        None => 1.0,
    };

    Some(ShadowParams {
        offset_x: number(1)?,
        offset_y: number(2)?,
        blur_radius: number(3)?,
        color: rgb_to_hex([channel(4)?, channel(5)?, channel(6)?]),
        opacity,
    })
}

fn parse_hex_form(raw: &str) -> Option<ShadowParams> {
    let caps = HEX_SHADOW.captures(raw)?;
    let number = |i: usize| caps.get(i)?.as_str().parse::<f64>().ok();
    let rgb = hex_to_rgb(caps.get(4)?.as_str())?;

    Some(ShadowParams {
        offset_x: number(1)?,
        offset_y: number(2)?,
        blur_radius: number(3)?,
        color: rgb_to_hex(rgb),
        opacity: 1.0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(x: f64, y: f64, blur: f64, color: &str, opacity: f64) -> ShadowParams {
        ShadowParams {
            offset_x: x,
            offset_y: y,
            blur_radius: blur,
            color: color.to_string(),
            opacity,
        }
    }

    #[test]
    fn test_decode_absent_is_default() {
        assert_eq!(decode_shadow(None), ShadowParams::default());
        assert_eq!(decode_shadow(Some("none")), ShadowParams::default());
        assert_eq!(decode_shadow(Some("  ")), ShadowParams::default());
    }

    #[test]
    fn test_default_values() {
        assert_eq!(ShadowParams::default(), params(0.0, 0.0, 0.0, "#000000", 0.5));
    }

    #[test]
    fn test_decode_rgba_form() {
        let decoded = decode_shadow(Some("2px 4px 8px rgba(255, 0, 128, 0.75)"));
        assert_eq!(decoded, params(2.0, 4.0, 8.0, "#ff0080", 0.75));
    }

    #[test]
    fn test_decode_rgba_without_alpha_is_opaque() {
        let decoded = decode_shadow(Some("-3px 0px 5px rgb(16, 32, 48)"));
        assert_eq!(decoded, params(-3.0, 0.0, 5.0, "#102030", 1.0));
    }

    #[test]
    fn test_decode_hex_form_has_full_opacity() {
        let decoded = decode_shadow(Some("1px 1px 2px #FFAA00"));
        assert_eq!(decoded, params(1.0, 1.0, 2.0, "#ffaa00", 1.0));
    }

    #[test]
    fn test_decode_short_hex_form() {
        let decoded = decode_shadow(Some("1px 1px 2px #fa0"));
        assert_eq!(decoded.color, "#ffaa00");
    }

    #[test]
    fn test_decode_garbage_falls_back_to_default() {
        for input in ["blue", "2px 2px", "2px 2px 2px hsl(0, 0%, 0%)", "2 2 2 #000000"] {
            assert_eq!(decode_shadow(Some(input)), ShadowParams::default(), "{}", input);
        }
    }

    #[test]
    fn test_decode_rejects_non_ascii_digits() {
        for input in [
            "\u{0662}px 2px 4px #000000",
            "2px 2px 4px rgba(\u{0661}\u{0660}, 0, 0, 0.5)",
            "\u{FF12}px 2px 4px #000",
        ] {
            assert_eq!(decode_shadow(Some(input)), ShadowParams::default(), "{}", input);
        }
    }

    #[test]
    fn test_encode_rgba_form() {
        let encoded = encode_shadow(&params(2.0, -4.0, 6.0, "#102030", 0.5));
        assert_eq!(encoded, "2px -4px 6px rgba(16, 32, 48, 0.5)");
    }

    #[test]
    fn test_roundtrip_integer_params() {
        let cases = [
            params(0.0, 0.0, 0.0, "#000000", 0.5),
            params(2.0, 2.0, 4.0, "#ffffff", 1.0),
            params(-10.0, 7.0, 20.0, "#3a7bd5", 0.0),
            params(5.0, -5.0, 1.0, "#00ff7f", 0.35),
        ];
        for original in cases {
            assert_eq!(decode_shadow(Some(encode_shadow(&original).as_str())), original);
        }
    }

    #[test]
    fn test_encode_of_hex_input_is_equivalent() {
        let source = "3px 3px 6px #336699";
        let reencoded = encode_shadow(&decode_shadow(Some(source)));
        assert_eq!(reencoded, "3px 3px 6px rgba(51, 102, 153, 1)");
        assert_eq!(decode_shadow(Some(reencoded.as_str())), decode_shadow(Some(source)));
    }
}
