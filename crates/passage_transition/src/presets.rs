//! Built-in animator factories
//!
//! Flip and the un-animated `none` kind are routed through the custom slot
//! path, so they are expressed as [`CustomTransition`] factories.

use passage_core::{
    AnimatedProperty, AnimationCurve, AnimatorPhase, AnimatorSpec, CustomTransition, Direction,
    PropertyTrack,
};

use crate::config::PRESET_DURATION_MS;

/// 3D flip around the axis implied by the direction
///
/// Left/right flips rotate around the Y axis, top/bottom around the X axis.
/// Content swaps visibility halfway through the rotation.
#[derive(Clone, Debug)]
pub struct FlipTransition {
    direction: Direction,
    duration_ms: u32,
    curve: Option<AnimationCurve>,
}

impl FlipTransition {
    pub fn new(direction: Direction) -> Self {
        Self {
            direction,
            duration_ms: PRESET_DURATION_MS,
            curve: None,
        }
    }

    pub fn with_duration(mut self, duration_ms: u32) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    pub fn with_curve(mut self, curve: AnimationCurve) -> Self {
        self.curve = Some(curve);
        self
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    fn axis(&self) -> AnimatedProperty {
        match self.direction {
            Direction::Left | Direction::Right => AnimatedProperty::RotationY,
            Direction::Top | Direction::Bottom => AnimatedProperty::RotationX,
        }
    }

    fn sign(&self) -> f32 {
        match self.direction {
            Direction::Right | Direction::Bottom => 1.0,
            Direction::Left | Direction::Top => -1.0,
        }
    }
}

impl CustomTransition for FlipTransition {
    fn name(&self) -> &str {
        "FlipTransition"
    }

    fn duration(&self) -> Option<u32> {
        Some(self.duration_ms)
    }

    fn curve(&self) -> Option<AnimationCurve> {
        self.curve
    }

    fn create_animator(&self, phase: AnimatorPhase) -> AnimatorSpec {
        let half = self.duration_ms / 2;
        let sign = self.sign();

        let (rotation, alpha) = match phase {
            AnimatorPhase::Enter => ([180.0 * sign, 0.0], [0.0, 1.0]),
            AnimatorPhase::Exit => ([0.0, -180.0 * sign], [1.0, 0.0]),
            AnimatorPhase::PopEnter => ([-180.0 * sign, 0.0], [0.0, 1.0]),
            AnimatorPhase::PopExit => ([0.0, 180.0 * sign], [1.0, 0.0]),
        };

        let mut animator = AnimatorSpec::new(self.duration_ms)
            .track(self.axis(), rotation)
            .with_track(PropertyTrack::new(AnimatedProperty::Alpha, alpha).duration(1).delay(half));
        if let Some(curve) = self.curve {
            animator = animator.with_curve(curve);
        }
        animator
    }
}

/// Zero-duration transition for un-animated navigation
///
/// Produces no visible change but still fires start and end events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoTransition;

impl CustomTransition for NoTransition {
    fn name(&self) -> &str {
        "NoTransition"
    }

    fn duration(&self) -> Option<u32> {
        Some(0)
    }

    fn create_animator(&self, _phase: AnimatorPhase) -> AnimatorSpec {
        AnimatorSpec::zero_duration()
    }
}
