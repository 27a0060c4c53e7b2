//! Native transition abstraction

use std::fmt;

use passage_core::{AnimationCurve, AnimatorSpec, Direction};

use crate::error::Result;
use crate::fragment::Fragment;

/// Opaque handle identifying a registered transition listener
///
/// Backends hand this back with every listener callback; the orchestrator
/// resolves it to its listener record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerHandle(pub u64);

impl fmt::Display for ListenerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "listener#{:x}", self.0)
    }
}

/// Screen edge a slide transition moves towards
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Edge {
    Left,
    Right,
    Top,
    Bottom,
}

impl Edge {
    /// Android `Gravity` constant for this edge
    pub fn gravity(self) -> i32 {
        match self {
            Edge::Left => 3,
            Edge::Right => 5,
            Edge::Top => 48,
            Edge::Bottom => 80,
        }
    }
}

impl From<Direction> for Edge {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Left => Edge::Left,
            Direction::Right => Edge::Right,
            Direction::Top => Edge::Top,
            Direction::Bottom => Edge::Bottom,
        }
    }
}

/// Fade direction
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FadeMode {
    In,
    Out,
}

impl FadeMode {
    /// Android `Fade.IN` / `Fade.OUT` constant
    pub fn mode(self) -> i32 {
        match self {
            FadeMode::In => 1,
            FadeMode::Out => 2,
        }
    }
}

/// What kind of native transition to create
#[derive(Clone, Debug, PartialEq)]
pub enum TransitionSpec {
    Slide(Edge),
    Fade(FadeMode),
    Explode,
    /// Transition wrapping an animator built from a custom factory
    ///
    /// `name` is unique per phase so the platform never confuses cloned
    /// transitions of different phases.
    Custom { animator: AnimatorSpec, name: String },
}

impl TransitionSpec {
    /// Short class-like name used in logs
    pub fn class_name(&self) -> &str {
        match self {
            TransitionSpec::Slide(_) => "Slide",
            TransitionSpec::Fade(_) => "Fade",
            TransitionSpec::Explode => "Explode",
            TransitionSpec::Custom { .. } => "CustomTransition",
        }
    }
}

/// A platform transition object that can be assigned to a fragment slot
///
/// Implementations are cheap handles; cloning refers to the same native object.
pub trait NativeTransition: Clone {
    fn set_duration(&self, duration_ms: u32) -> Result<()>;

    fn set_interpolator(&self, curve: AnimationCurve) -> Result<()>;

    /// Register a listener; the backend reports its events with `listener`
    fn add_listener(&self, listener: ListenerHandle) -> Result<()>;

    /// Unregister a listener; unknown handles are ignored
    fn remove_listener(&self, listener: ListenerHandle) -> Result<()>;

    /// Whether both handles refer to the same native object
    fn same_as(&self, other: &Self) -> bool;

    /// `ClassName@hash` form used in transition logs
    fn short_string(&self) -> String;
}

/// Platform backend that creates native transitions
pub trait TransitionBackend {
    /// The native transition type
    type Transition: NativeTransition;
    /// The native fragment type transitions are assigned to
    type Fragment: Fragment<Transition = Self::Transition>;

    /// Create a new, unconfigured native transition
    fn create_transition(&self, spec: &TransitionSpec) -> Result<Self::Transition>;

    /// Get the backend name, e.g. "android" or "headless"
    fn name(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_gravity_constants() {
        assert_eq!(Edge::Left.gravity(), 3);
        assert_eq!(Edge::Right.gravity(), 5);
        assert_eq!(Edge::Top.gravity(), 48);
        assert_eq!(Edge::Bottom.gravity(), 80);
    }

    #[test]
    fn test_edge_from_direction() {
        assert_eq!(Edge::from(Direction::Bottom), Edge::Bottom);
    }
}
