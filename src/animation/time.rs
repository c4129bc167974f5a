use crate::foundation::error::{IrError, IrResult};

/// Affine map from a local timeline into its parent timeline: `parent = offset + stretch * local`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TimeMapping {
    /// Parent frame of local frame zero.
    pub offset: f64,
    /// Parent frames per local frame.
    pub stretch: f64,
}

impl Default for TimeMapping {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl TimeMapping {
    /// Local and parent frames coincide.
    pub const IDENTITY: TimeMapping = TimeMapping {
        offset: 0.0,
        stretch: 1.0,
    };

    /// Validated constructor; `stretch` must be finite and strictly positive.
    pub fn new(offset: f64, stretch: f64) -> IrResult<Self> {
        if !offset.is_finite() {
            return Err(IrError::validation("time offset must be finite"));
        }
        if !stretch.is_finite() || stretch <= 0.0 {
            return Err(IrError::validation(format!(
                "time stretch must be finite and > 0, got {stretch}"
            )));
        }
        Ok(Self { offset, stretch })
    }

    /// Whether this maps every frame to itself.
    pub fn is_identity(self) -> bool {
        self == Self::IDENTITY
    }

    /// Local frame to parent frame.
    pub fn apply(self, frame: f64) -> f64 {
        self.offset + self.stretch * frame
    }

    /// Parent frame to local frame.
    pub fn invert(self, frame: f64) -> f64 {
        (frame - self.offset) / self.stretch
    }

    /// Nest a `TimeOffset(offset)` inside this mapping.
    pub fn then_offset(self, offset: f64) -> IrResult<Self> {
        Self::new(self.offset + self.stretch * offset, self.stretch)
    }

    /// Nest a `TimeStretch(stretch)` inside this mapping.
    pub fn then_stretch(self, stretch: f64) -> IrResult<Self> {
        if !stretch.is_finite() || stretch <= 0.0 {
            return Err(IrError::validation(format!(
                "time stretch must be finite and > 0, got {stretch}"
            )));
        }
        Self::new(self.offset, self.stretch * stretch)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/time.rs"]
mod tests;
