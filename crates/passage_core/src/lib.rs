//! Passage Core
//!
//! Leaf types shared by every Passage crate:
//!
//! - **Identity**: [`HostId`] for navigation containers, [`EntryId`] for backstack entries
//! - **Navigation**: [`NavigationType`] and the host's [`NavigationContext`]
//! - **Transitions**: the [`NavigationTransition`] descriptor and [`TransitionKind`] resolution
//! - **Animators**: platform-neutral [`AnimatorSpec`] descriptions produced by
//!   [`CustomTransition`] factories
//!
//! # Example
//!
//! ```rust
//! use passage_core::{resolve_kind, Direction, NavigationTransition, TransitionKind};
//!
//! let slide = NavigationTransition::named("slideRight");
//! assert_eq!(resolve_kind(true, Some(&slide)), TransitionKind::Slide(Direction::Right));
//! assert_eq!(resolve_kind(false, Some(&slide)), TransitionKind::None);
//! ```

pub mod animator;
pub mod curve;
pub mod ids;
pub mod navigation;
pub mod slot;
pub mod transition;

pub use animator::{AnimatedProperty, AnimatorPhase, AnimatorSpec, CustomTransition, PropertyTrack};
pub use curve::AnimationCurve;
pub use ids::{EntryId, HostId};
pub use navigation::{NavigationContext, NavigationType};
pub use slot::TransitionSlot;
pub use transition::{resolve_kind, Direction, NavigationTransition, TransitionKind};
