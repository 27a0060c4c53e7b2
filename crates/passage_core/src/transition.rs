//! Navigation transition descriptors and kind resolution

use std::fmt;
use std::sync::Arc;

use crate::animator::CustomTransition;
use crate::curve::AnimationCurve;

/// Edge or axis direction of a directional preset
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    Top,
    Bottom,
}

impl Direction {
    /// Parse the suffix of a preset name (`"slideRight"` → `"right"`)
    ///
    /// An empty suffix selects `default`; an unknown suffix yields `None`.
    fn from_suffix(suffix: &str, default: Direction) -> Option<Direction> {
        match suffix {
            "" => Some(default),
            "left" => Some(Direction::Left),
            "right" => Some(Direction::Right),
            "top" => Some(Direction::Top),
            "bottom" => Some(Direction::Bottom),
            _ => None,
        }
    }

    /// The direction on the opposite edge
    pub fn opposite(self) -> Direction {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::Top => Direction::Bottom,
            Direction::Bottom => Direction::Top,
        }
    }
}

/// Resolved transition family applied to one navigation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TransitionKind {
    /// Not animated; zero-duration no-op transitions
    None,
    /// User supplied [`CustomTransition`]
    Custom,
    /// Short fade used when nothing else matches
    Default,
    Slide(Direction),
    Fade,
    Explode,
    Flip(Direction),
}

impl TransitionKind {
    /// Match a built-in preset name, case-insensitively
    ///
    /// Recognizes `slide*`, `fade`, `flip*` and `explode*`. Directional
    /// presets default to `left` (slide) and `right` (flip) when the name
    /// carries no direction.
    pub fn from_name(name: &str) -> Option<TransitionKind> {
        let name = name.to_ascii_lowercase();
        if name == "fade" {
            return Some(TransitionKind::Fade);
        }
        if name.starts_with("explode") {
            return Some(TransitionKind::Explode);
        }
        if let Some(suffix) = name.strip_prefix("slide") {
            return Direction::from_suffix(suffix, Direction::Left).map(TransitionKind::Slide);
        }
        if let Some(suffix) = name.strip_prefix("flip") {
            return Direction::from_suffix(suffix, Direction::Right).map(TransitionKind::Flip);
        }
        None
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TransitionKind::None => "none",
            TransitionKind::Custom => "custom",
            TransitionKind::Default => "default",
            TransitionKind::Slide(Direction::Left) => "slideLeft",
            TransitionKind::Slide(Direction::Right) => "slideRight",
            TransitionKind::Slide(Direction::Top) => "slideTop",
            TransitionKind::Slide(Direction::Bottom) => "slideBottom",
            TransitionKind::Fade => "fade",
            TransitionKind::Explode => "explode",
            TransitionKind::Flip(Direction::Left) => "flipLeft",
            TransitionKind::Flip(Direction::Right) => "flipRight",
            TransitionKind::Flip(Direction::Top) => "flipTop",
            TransitionKind::Flip(Direction::Bottom) => "flipBottom",
        }
    }
}

impl fmt::Display for TransitionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Requested transition for a navigation
///
/// Immutable once handed to the orchestrator. Either names a built-in preset
/// or carries a [`CustomTransition`] instance; duration and curve apply to
/// both.
#[derive(Clone, Default)]
pub struct NavigationTransition {
    pub name: Option<String>,
    pub instance: Option<Arc<dyn CustomTransition>>,
    pub duration_ms: Option<u32>,
    pub curve: Option<AnimationCurve>,
}

impl NavigationTransition {
    /// A built-in preset by name (`"slideLeft"`, `"fade"`, `"explode"`, `"flipRight"`, ...)
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    /// A user supplied transition
    pub fn custom(instance: Arc<dyn CustomTransition>) -> Self {
        Self {
            duration_ms: instance.duration(),
            curve: instance.curve(),
            instance: Some(instance),
            ..Default::default()
        }
    }

    pub fn with_duration(mut self, duration_ms: u32) -> Self {
        self.duration_ms = Some(duration_ms);
        self
    }

    pub fn with_curve(mut self, curve: AnimationCurve) -> Self {
        self.curve = Some(curve);
        self
    }

    /// Whether both descriptors carry the same custom instance (or neither does)
    pub fn same_instance(a: Option<&Arc<dyn CustomTransition>>, b: Option<&Arc<dyn CustomTransition>>) -> bool {
        match (a, b) {
            (None, None) => true,
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Debug for NavigationTransition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NavigationTransition")
            .field("name", &self.name)
            .field("instance", &self.instance.as_ref().map(|i| i.name().to_string()))
            .field("duration_ms", &self.duration_ms)
            .field("curve", &self.curve)
            .finish()
    }
}

/// Resolve the transition kind for a navigation
///
/// 1. not animated → [`TransitionKind::None`]
/// 2. a custom instance → [`TransitionKind::Custom`]
/// 3. a recognized preset name → that preset
/// 4. anything else → [`TransitionKind::Default`]
pub fn resolve_kind(animated: bool, transition: Option<&NavigationTransition>) -> TransitionKind {
    if !animated {
        return TransitionKind::None;
    }

    let Some(transition) = transition else {
        return TransitionKind::Default;
    };

    if transition.instance.is_some() {
        return TransitionKind::Custom;
    }

    match transition.name.as_deref() {
        Some(name) => TransitionKind::from_name(name).unwrap_or_else(|| {
            tracing::trace!(target: "passage::transition", "unknown transition {:?}, using default", name);
            TransitionKind::Default
        }),
        None => TransitionKind::Default,
    }
}
