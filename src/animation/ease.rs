use serde::{Deserialize, Serialize};

/// Interpolation curve used on the segment that ends at a keyframe.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Ease {
    /// Keep the previous value until the keyframe is reached.
    Hold,
    /// Straight-line interpolation.
    #[default]
    Linear,
    /// CSS-style cubic bezier through `(0,0)`, `(x1,y1)`, `(x2,y2)`, `(1,1)`.
    CubicBezier {
        /// First control point, x.
        x1: f64,
        /// First control point, y.
        y1: f64,
        /// Second control point, x.
        x2: f64,
        /// Second control point, y.
        y2: f64,
    },
}

impl Ease {
    /// Map normalized segment progress `t` to eased progress.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Hold => 0.0,
            Self::Linear => t,
            Self::CubicBezier { x1, y1, x2, y2 } => cubic_bezier_ease(t, x1, y1, x2, y2),
        }
    }
}

impl Serialize for Ease {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        #[derive(Serialize)]
        #[serde(untagged)]
        enum Repr {
            Str(&'static str),
            CubicBezier { cubic_bezier: [f64; 4] },
        }

        let repr = match *self {
            Self::Hold => Repr::Str("hold"),
            Self::Linear => Repr::Str("linear"),
            Self::CubicBezier { x1, y1, x2, y2 } => Repr::CubicBezier {
                cubic_bezier: [x1, y1, x2, y2],
            },
        };
        repr.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Ease {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Str(String),
            CubicBezier { cubic_bezier: [f64; 4] },
        }

        match Repr::deserialize(deserializer)? {
            Repr::Str(s) => match s.as_str() {
                "hold" => Ok(Self::Hold),
                "linear" => Ok(Self::Linear),
                other => Err(serde::de::Error::custom(format!("unknown ease \"{other}\""))),
            },
            Repr::CubicBezier { cubic_bezier } => {
                let [x1, y1, x2, y2] = cubic_bezier;
                if !(0.0..=1.0).contains(&x1) || !(0.0..=1.0).contains(&x2) {
                    return Err(serde::de::Error::custom(
                        "cubic_bezier x control points must be in [0, 1]",
                    ));
                }
                Ok(Self::CubicBezier { x1, y1, x2, y2 })
            }
        }
    }
}

fn cubic_bezier_ease(x: f64, x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    if x <= 0.0 {
        return 0.0;
    }
    if x >= 1.0 {
        return 1.0;
    }
    // Solve bx(u) = x for u, then return by(u).
    fn sample_curve(a1: f64, a2: f64, t: f64) -> f64 {
        let omt = 1.0 - t;
        3.0 * omt * omt * t * a1 + 3.0 * omt * t * t * a2 + t * t * t
    }
    fn sample_curve_derivative(a1: f64, a2: f64, t: f64) -> f64 {
        let omt = 1.0 - t;
        3.0 * omt * omt * a1 + 6.0 * omt * t * (a2 - a1) + 3.0 * t * t * (1.0 - a2)
    }

    // Newton-Raphson first; fall back to bisection when it stalls.
    let mut t = x;
    for _ in 0..8 {
        let x_t = sample_curve(x1, x2, t) - x;
        if x_t.abs() < 1e-9 {
            return sample_curve(y1, y2, t);
        }
        let d = sample_curve_derivative(x1, x2, t);
        if d.abs() < 1e-7 {
            break;
        }
        t = (t - x_t / d).clamp(0.0, 1.0);
    }

    let mut lo = 0.0;
    let mut hi = 1.0;
    t = x;
    for _ in 0..40 {
        let x_t = sample_curve(x1, x2, t);
        if (x_t - x).abs() < 1e-9 {
            break;
        }
        if x_t < x {
            lo = t;
        } else {
            hi = t;
        }
        t = 0.5 * (lo + hi);
    }

    sample_curve(y1, y2, t)
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
