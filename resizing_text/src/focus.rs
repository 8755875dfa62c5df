// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Whether the control holds keyboard focus.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum FocusState {
    /// Not focused.
    #[default]
    Unfocused,
    /// Focused.
    Focused,
}

impl FocusState {
    /// Returns `true` for [`FocusState::Focused`].
    pub fn is_focused(self) -> bool {
        self == Self::Focused
    }
}

impl From<bool> for FocusState {
    fn from(focused: bool) -> Self {
        if focused {
            Self::Focused
        } else {
            Self::Unfocused
        }
    }
}

/// Direction of keyboard focus traversal.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum FocusDirection {
    /// The next focusable control.
    Next,
    /// The previous focusable control.
    Previous,
}

/// Collapses the widget's focus notifications into transitions.
///
/// Native widgets may report gaining or losing focus more than once for a
/// single change. Only reports that change the state produce a transition.
#[derive(Clone, Debug, Default)]
pub struct FocusTracker {
    state: FocusState,
}

impl FocusTracker {
    /// A tracker in the unfocused state.
    pub fn new() -> Self {
        Self::default()
    }

    /// The current state.
    pub fn state(&self) -> FocusState {
        self.state
    }

    /// Records a focus report and returns the new state if it changed.
    pub fn report(&mut self, focused: bool) -> Option<FocusState> {
        let next = FocusState::from(focused);
        if next == self.state {
            return None;
        }
        self.state = next;
        Some(next)
    }
}

#[cfg(test)]
mod tests {
    use super::{FocusState, FocusTracker};

    #[test]
    fn repeated_reports_collapse() {
        let mut tracker = FocusTracker::new();
        assert_eq!(tracker.report(false), None);
        assert_eq!(tracker.report(true), Some(FocusState::Focused));
        assert_eq!(tracker.report(true), None);
        assert_eq!(tracker.report(false), Some(FocusState::Unfocused));
        assert_eq!(tracker.report(false), None);
    }
}
