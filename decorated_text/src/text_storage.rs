// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;
use alloc::sync::Arc;

/// A block of text that decorations can be resolved against.
///
/// Decorations are addressed in logical characters while styling happens on
/// UTF-8 byte offsets, so implementors provide the mapping between the two.
pub trait TextStorage {
    /// The length of the underlying text in bytes.
    fn len(&self) -> usize;

    /// Return `true` if the underlying text is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Return whether `index` is a UTF-8 character boundary in the text.
    fn is_char_boundary(&self, index: usize) -> bool;

    /// The number of logical characters in the text.
    fn char_count(&self) -> usize;

    /// The byte offset of the character at `char_index`.
    ///
    /// `char_index == char_count()` maps to [`len`](Self::len). Returns `None`
    /// past the end.
    fn byte_offset(&self, char_index: usize) -> Option<usize>;
}

impl TextStorage for str {
    fn len(&self) -> usize {
        Self::len(self)
    }

    fn is_char_boundary(&self, index: usize) -> bool {
        Self::is_char_boundary(self, index)
    }

    fn char_count(&self) -> usize {
        self.chars().count()
    }

    fn byte_offset(&self, char_index: usize) -> Option<usize> {
        self.char_indices()
            .map(|(offset, _)| offset)
            .chain(core::iter::once(self.len()))
            .nth(char_index)
    }
}

impl TextStorage for String {
    fn len(&self) -> usize {
        Self::len(self)
    }

    fn is_char_boundary(&self, index: usize) -> bool {
        self.as_str().is_char_boundary(index)
    }

    fn char_count(&self) -> usize {
        self.as_str().char_count()
    }

    fn byte_offset(&self, char_index: usize) -> Option<usize> {
        self.as_str().byte_offset(char_index)
    }
}

impl TextStorage for &str {
    fn len(&self) -> usize {
        str::len(self)
    }

    fn is_char_boundary(&self, index: usize) -> bool {
        str::is_char_boundary(self, index)
    }

    fn char_count(&self) -> usize {
        str::char_count(self)
    }

    fn byte_offset(&self, char_index: usize) -> Option<usize> {
        str::byte_offset(self, char_index)
    }
}

impl TextStorage for Arc<str> {
    fn len(&self) -> usize {
        str::len(self)
    }

    fn is_char_boundary(&self, index: usize) -> bool {
        str::is_char_boundary(self, index)
    }

    fn char_count(&self) -> usize {
        str::char_count(self)
    }

    fn byte_offset(&self, char_index: usize) -> Option<usize> {
        str::byte_offset(self, char_index)
    }
}
