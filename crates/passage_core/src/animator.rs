//! Platform-neutral animator descriptions
//!
//! Custom transitions do not talk to the platform directly. They describe the
//! animator for each navigation phase as an [`AnimatorSpec`], and the backend
//! builds the native animator (e.g. an `AnimatorSet` of `ObjectAnimator`s on
//! Android) from it.
//!
//! ```rust
//! use passage_core::{AnimatedProperty, AnimatorSpec};
//!
//! let fade_in = AnimatorSpec::new(300).track(AnimatedProperty::Alpha, [0.0, 1.0]);
//! assert_eq!(fade_in.tracks().len(), 1);
//! ```

use std::fmt;

use smallvec::SmallVec;

use crate::curve::AnimationCurve;

/// Navigation phase an animator is created for
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AnimatorPhase {
    /// Incoming content on forward navigation
    Enter,
    /// Outgoing content on forward navigation
    Exit,
    /// Previous content coming back on back navigation
    PopEnter,
    /// Current content leaving on back navigation
    PopExit,
}

impl AnimatorPhase {
    pub fn as_str(self) -> &'static str {
        match self {
            AnimatorPhase::Enter => "enter",
            AnimatorPhase::Exit => "exit",
            AnimatorPhase::PopEnter => "popEnter",
            AnimatorPhase::PopExit => "popExit",
        }
    }
}

impl fmt::Display for AnimatorPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// View property driven by an animator track
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AnimatedProperty {
    Alpha,
    TranslationX,
    TranslationY,
    ScaleX,
    ScaleY,
    RotationX,
    RotationY,
}

impl AnimatedProperty {
    /// Property name as understood by the platform's property animators
    pub fn platform_name(self) -> &'static str {
        match self {
            AnimatedProperty::Alpha => "alpha",
            AnimatedProperty::TranslationX => "translationX",
            AnimatedProperty::TranslationY => "translationY",
            AnimatedProperty::ScaleX => "scaleX",
            AnimatedProperty::ScaleY => "scaleY",
            AnimatedProperty::RotationX => "rotationX",
            AnimatedProperty::RotationY => "rotationY",
        }
    }
}

/// Keyframed values for one property
#[derive(Clone, Debug, PartialEq)]
pub struct PropertyTrack {
    pub property: AnimatedProperty,
    /// Evenly spaced keyframe values
    pub values: SmallVec<[f32; 4]>,
    /// Overrides the animator duration for this track
    pub duration_ms: Option<u32>,
    pub start_delay_ms: u32,
}

impl PropertyTrack {
    pub fn new(property: AnimatedProperty, values: impl IntoIterator<Item = f32>) -> Self {
        Self {
            property,
            values: values.into_iter().collect(),
            duration_ms: None,
            start_delay_ms: 0,
        }
    }

    pub fn duration(mut self, duration_ms: u32) -> Self {
        self.duration_ms = Some(duration_ms);
        self
    }

    pub fn delay(mut self, start_delay_ms: u32) -> Self {
        self.start_delay_ms = start_delay_ms;
        self
    }

    /// Effective duration given the owning animator's duration
    pub fn effective_duration(&self, animator_duration_ms: u32) -> u32 {
        self.duration_ms.unwrap_or(animator_duration_ms)
    }
}

/// Description of a native animator: tracks played together
#[derive(Clone, Debug, PartialEq)]
pub struct AnimatorSpec {
    tracks: SmallVec<[PropertyTrack; 2]>,
    duration_ms: u32,
    curve: Option<AnimationCurve>,
}

impl AnimatorSpec {
    pub fn new(duration_ms: u32) -> Self {
        Self {
            tracks: SmallVec::new(),
            duration_ms,
            curve: None,
        }
    }

    /// A single zero-duration alpha animation
    ///
    /// Produces no visible change but still fires start/end events, which
    /// keeps waiting-queue bookkeeping consistent for un-animated navigation.
    pub fn zero_duration() -> Self {
        Self::new(0).track(AnimatedProperty::Alpha, [0.0, 0.0, 255.0])
    }

    /// Add a track animating `property` through `values`
    pub fn track(mut self, property: AnimatedProperty, values: impl IntoIterator<Item = f32>) -> Self {
        self.tracks.push(PropertyTrack::new(property, values));
        self
    }

    /// Add a fully configured track
    pub fn with_track(mut self, track: PropertyTrack) -> Self {
        self.tracks.push(track);
        self
    }

    pub fn with_curve(mut self, curve: AnimationCurve) -> Self {
        self.curve = Some(curve);
        self
    }

    pub fn tracks(&self) -> &[PropertyTrack] {
        &self.tracks
    }

    pub fn duration_ms(&self) -> u32 {
        self.duration_ms
    }

    pub fn curve(&self) -> Option<AnimationCurve> {
        self.curve
    }

    /// Total running time including track delays
    pub fn total_duration_ms(&self) -> u32 {
        self.tracks
            .iter()
            .map(|t| t.start_delay_ms + t.effective_duration(self.duration_ms))
            .max()
            .unwrap_or(self.duration_ms)
    }
}

/// A user-supplied transition that builds one animator per navigation phase
///
/// Each phase gets an independently constructed animator so the platform
/// never sees the same animator object in two slots.
pub trait CustomTransition: Send + Sync {
    /// Name used to label the native transitions built from this factory
    fn name(&self) -> &str;

    /// Duration in milliseconds, `None` for the configured default
    fn duration(&self) -> Option<u32> {
        None
    }

    /// Easing curve, `None` for the platform default
    fn curve(&self) -> Option<AnimationCurve> {
        None
    }

    /// Build the animator for one navigation phase
    fn create_animator(&self, phase: AnimatorPhase) -> AnimatorSpec;
}
