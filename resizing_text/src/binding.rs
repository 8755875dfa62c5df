// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// A shared, two-way handle to the text a control edits.
///
/// The host keeps one clone and hands another to the control. Whoever writes
/// last wins; within one UI turn either the control writes after user input
/// or the host renders a new value, never both.
#[derive(Clone, Default)]
pub struct TextBinding(Rc<RefCell<String>>);

impl TextBinding {
    /// A binding holding `text`.
    pub fn new(text: impl Into<String>) -> Self {
        Self(Rc::new(RefCell::new(text.into())))
    }

    /// A copy of the current text.
    pub fn get(&self) -> String {
        self.0.borrow().clone()
    }

    /// Calls `f` with the current text without copying it.
    pub fn with<R>(&self, f: impl FnOnce(&str) -> R) -> R {
        f(&self.0.borrow())
    }

    /// Replaces the text.
    pub fn set(&self, text: impl Into<String>) {
        *self.0.borrow_mut() = text.into();
    }

    /// Returns `true` if the text is empty.
    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    /// Returns `true` if both handles refer to the same text.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for TextBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TextBinding").field(&*self.0.borrow()).finish()
    }
}

impl From<&str> for TextBinding {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

#[cfg(test)]
mod tests {
    use super::TextBinding;

    #[test]
    fn clones_share_text() {
        let a = TextBinding::new("hi");
        let b = a.clone();
        b.set("bye");
        assert_eq!(a.get(), "bye");
        assert!(a.ptr_eq(&b));
        assert!(!a.ptr_eq(&TextBinding::new("bye")));
    }
}
