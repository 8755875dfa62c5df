// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Small configuration values shared by the control, the adapters and the
//! sizing node.

use core::num::NonZeroUsize;

/// Maximum number of displayed lines.
///
/// Text beyond the limit is truncated at the tail of the last visible line.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum LineLimit {
    /// No limit.
    #[default]
    Unbounded,
    /// At most this many lines.
    Lines(NonZeroUsize),
}

impl LineLimit {
    /// A limit of `lines`, where `0` means unbounded.
    pub fn new(lines: usize) -> Self {
        NonZeroUsize::new(lines).map_or(Self::Unbounded, Self::Lines)
    }

    /// The maximum number of lines, if bounded.
    pub fn get(self) -> Option<usize> {
        match self {
            Self::Unbounded => None,
            Self::Lines(n) => Some(n.get()),
        }
    }

    /// Returns `true` if a limit is set.
    pub fn is_bounded(self) -> bool {
        matches!(self, Self::Lines(_))
    }
}

impl From<usize> for LineLimit {
    fn from(lines: usize) -> Self {
        Self::new(lines)
    }
}

impl From<Option<usize>> for LineLimit {
    fn from(lines: Option<usize>) -> Self {
        lines.map_or(Self::Unbounded, Self::new)
    }
}

/// Automatic capitalization of typed text, on widget families with a
/// software keyboard.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Autocapitalization {
    /// Never capitalize.
    None,
    /// Capitalize the first letter of each word.
    Words,
    /// Capitalize the first letter of each sentence.
    #[default]
    Sentences,
    /// Capitalize every letter.
    AllCharacters,
}

/// Software keyboard layout requested for the control.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum KeyboardType {
    /// The default keyboard.
    #[default]
    Default,
    /// ASCII only.
    Ascii,
    /// URL entry.
    Url,
    /// Email address entry.
    EmailAddress,
    /// Digits and punctuation.
    NumbersAndPunctuation,
    /// Phone numbers.
    PhonePad,
}

/// Direction of the surrounding layout.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum LayoutDirection {
    /// Leading edge on the left.
    #[default]
    LeftToRight,
    /// Leading edge on the right.
    RightToLeft,
}
