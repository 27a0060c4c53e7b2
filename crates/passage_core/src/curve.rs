//! Animation curves
//!
//! Curves are platform-neutral; each backend maps them onto its own
//! interpolator type.

use serde::Deserialize;

/// Easing curve applied to a native transition
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AnimationCurve {
    Linear,
    EaseIn,
    EaseOut,
    /// Accelerate then decelerate (the platform default interpolator)
    #[default]
    EaseInOut,
    /// Overshooting spring-like curve
    Spring,
    /// Cubic bezier with control points (x1, y1) and (x2, y2)
    CubicBezier { x1: f32, y1: f32, x2: f32, y2: f32 },
}

impl AnimationCurve {
    /// Create a cubic bezier curve
    pub fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        AnimationCurve::CubicBezier { x1, y1, x2, y2 }
    }

    /// Short name used in transition logs
    pub fn name(&self) -> &'static str {
        match self {
            AnimationCurve::Linear => "linear",
            AnimationCurve::EaseIn => "easeIn",
            AnimationCurve::EaseOut => "easeOut",
            AnimationCurve::EaseInOut => "easeInOut",
            AnimationCurve::Spring => "spring",
            AnimationCurve::CubicBezier { .. } => "cubicBezier",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_curve_is_ease_in_out() {
        assert_eq!(AnimationCurve::default(), AnimationCurve::EaseInOut);
    }

    #[test]
    fn test_cubic_bezier_name() {
        assert_eq!(
            AnimationCurve::cubic_bezier(0.4, 0.0, 0.2, 1.0).name(),
            "cubicBezier"
        );
    }
}
