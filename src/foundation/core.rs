use crate::foundation::error::{IrError, IrResult};
use crate::foundation::math::Fnv1a64;

pub use kurbo::{Affine, BezPath, Point, Rect, Size, Vec2};

/// Straight-alpha RGBA color with components in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Color {
    /// Red.
    pub r: f64,
    /// Green.
    pub g: f64,
    /// Blue.
    pub b: f64,
    /// Alpha; defaults to opaque when omitted.
    #[serde(default = "Color::opaque_alpha")]
    pub a: f64,
}

impl Color {
    /// Opaque black.
    pub const BLACK: Color = Color::rgba(0.0, 0.0, 0.0, 1.0);
    /// Opaque white.
    pub const WHITE: Color = Color::rgba(1.0, 1.0, 1.0, 1.0);

    /// Build a color from straight-alpha components.
    pub const fn rgba(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    fn opaque_alpha() -> f64 {
        1.0
    }

    /// Parse `#rrggbb` or `#rrggbbaa`.
    pub fn from_hex(s: &str) -> IrResult<Self> {
        let hex = s
            .strip_prefix('#')
            .ok_or_else(|| IrError::validation(format!("color \"{s}\" must start with '#'")))?;
        if !hex.is_ascii() || (hex.len() != 6 && hex.len() != 8) {
            return Err(IrError::validation(format!(
                "color \"{s}\" must have 6 or 8 hex digits"
            )));
        }
        let channel = |i: usize| -> IrResult<f64> {
            let byte = u8::from_str_radix(&hex[i..i + 2], 16)
                .map_err(|_| IrError::validation(format!("color \"{s}\" is not valid hex")))?;
            Ok(f64::from(byte) / 255.0)
        };
        let a = if hex.len() == 8 { channel(6)? } else { 1.0 };
        Ok(Self::rgba(channel(0)?, channel(2)?, channel(4)?, a))
    }

    /// Stable fingerprint, used to dedupe brushes within one translation.
    pub fn fingerprint(&self) -> u64 {
        let mut h = Fnv1a64::new_default();
        for c in [self.r, self.g, self.b, self.a] {
            h.write_f64(c);
        }
        h.finish()
    }
}

/// Rotation in degrees. Accumulation is plain addition; no wrapping into `[0, 360)`.
pub type Degrees = f64;

/// Opacity as a fraction in `[0, 1]`.
pub type Opacity = f64;

/// Scale as a percentage per axis; `(100, 100)` is the identity.
pub type ScalePercent = Vec2;

pub(crate) const IDENTITY_SCALE: Vec2 = Vec2::new(100.0, 100.0);

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
