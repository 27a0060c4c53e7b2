//! Navigation direction and context

use std::fmt;

/// Kind of navigation a host is executing
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum NavigationType {
    /// Pushing a new entry
    Forward,
    /// Popping back to a previous entry
    #[default]
    Back,
    /// Replacing the current entry
    Replace,
}

impl fmt::Display for NavigationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NavigationType::Forward => "forward",
            NavigationType::Back => "back",
            NavigationType::Replace => "replace",
        };
        f.write_str(name)
    }
}

/// The navigation a host is currently executing
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavigationContext {
    pub navigation_type: NavigationType,
}

impl NavigationContext {
    pub fn new(navigation_type: NavigationType) -> Self {
        Self { navigation_type }
    }
}
