//! Transition slots of a fragment

use std::fmt;

/// One of the four transition phases a fragment can carry
///
/// `Enter`/`Exit` run on forward navigation, `Reenter`/`Return` run when
/// navigating back.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TransitionSlot {
    Enter,
    Exit,
    Reenter,
    Return,
}

impl TransitionSlot {
    /// All slots, in the order they are cleared
    pub const ALL: [TransitionSlot; 4] = [
        TransitionSlot::Exit,
        TransitionSlot::Reenter,
        TransitionSlot::Enter,
        TransitionSlot::Return,
    ];

    /// Dense index for slot-keyed arrays
    pub fn index(self) -> usize {
        match self {
            TransitionSlot::Enter => 0,
            TransitionSlot::Exit => 1,
            TransitionSlot::Reenter => 2,
            TransitionSlot::Return => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TransitionSlot::Enter => "enter",
            TransitionSlot::Exit => "exit",
            TransitionSlot::Reenter => "popEnter",
            TransitionSlot::Return => "popExit",
        }
    }
}

impl fmt::Display for TransitionSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_indices_are_dense() {
        let mut seen = [false; 4];
        for slot in TransitionSlot::ALL {
            seen[slot.index()] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }
}
