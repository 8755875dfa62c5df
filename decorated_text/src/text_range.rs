// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::ops::Range;

use crate::{Endpoint, Error, RangeUnit, TextStorage};

/// A validated byte range into a UTF-8 text buffer.
///
/// - `start <= end`
/// - `start` and `end` are within the text bounds
/// - `start` and `end` lie on UTF-8 codepoint boundaries
///
/// `TextRange` does not encode which text buffer it was validated against. It
/// is the caller's responsibility to only reuse a `TextRange` with the text it
/// was validated for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TextRange {
    start: usize,
    end: usize,
}

impl TextRange {
    /// Returns a validated `TextRange` for the provided text.
    #[inline]
    pub fn new<T: TextStorage + ?Sized>(text: &T, range: Range<usize>) -> Result<Self, Error> {
        validate_range(text, &range)?;
        Ok(Self {
            start: range.start,
            end: range.end,
        })
    }

    /// Creates a `TextRange` without validation.
    #[must_use]
    #[inline]
    pub const fn new_unchecked(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// The start byte offset.
    #[must_use]
    #[inline]
    pub const fn start(self) -> usize {
        self.start
    }

    /// The end byte offset (exclusive).
    #[must_use]
    #[inline]
    pub const fn end(self) -> usize {
        self.end
    }

    /// Returns `true` if the range covers no bytes.
    #[must_use]
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.start == self.end
    }

    /// Returns this range as a `Range<usize>`.
    #[must_use]
    #[inline]
    pub fn as_range(self) -> Range<usize> {
        self.start..self.end
    }

    /// The overlap of two ranges, or `None` if they share no bytes.
    #[must_use]
    pub fn intersect(self, other: Self) -> Option<Self> {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        (start < end).then_some(Self { start, end })
    }
}

impl From<TextRange> for Range<usize> {
    #[inline]
    fn from(value: TextRange) -> Self {
        value.as_range()
    }
}

/// A half-open span of logical characters.
///
/// Decorations address text in characters rather than encoding units so a
/// range computed by application code keeps its meaning independent of how
/// the text is stored. A `CharRange` is not tied to any text; it is resolved
/// against the current text with [`resolve`](Self::resolve) right before use,
/// which fails if the text has since become too short.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CharRange {
    /// First character covered.
    pub start: usize,
    /// One past the last character covered.
    pub end: usize,
}

impl CharRange {
    /// Creates a range over characters `start..end`.
    #[must_use]
    #[inline]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Returns `true` if the range covers no characters.
    #[must_use]
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.start >= self.end
    }

    /// Maps this range onto byte offsets of `text`.
    pub fn resolve<T: TextStorage + ?Sized>(self, text: &T) -> Result<TextRange, Error> {
        if self.start > self.end {
            return Err(Error::invalid_range(
                RangeUnit::Chars,
                self.start,
                self.end,
                text.char_count(),
            ));
        }
        let (Some(start), Some(end)) = (text.byte_offset(self.start), text.byte_offset(self.end))
        else {
            return Err(Error::invalid_bounds(
                RangeUnit::Chars,
                self.start,
                self.end,
                text.char_count(),
            ));
        };
        Ok(TextRange::new_unchecked(start, end))
    }
}

impl From<Range<usize>> for CharRange {
    #[inline]
    fn from(value: Range<usize>) -> Self {
        Self::new(value.start, value.end)
    }
}

#[inline]
pub(crate) fn validate_range<T: TextStorage + ?Sized>(
    text: &T,
    range: &Range<usize>,
) -> Result<(), Error> {
    let text_len = text.len();
    if range.start > range.end {
        return Err(Error::invalid_range(
            RangeUnit::Bytes,
            range.start,
            range.end,
            text_len,
        ));
    }
    if range.end > text_len {
        return Err(Error::invalid_bounds(
            RangeUnit::Bytes,
            range.start,
            range.end,
            text_len,
        ));
    }
    if !text.is_char_boundary(range.start) {
        return Err(Error::not_on_char_boundary(
            text,
            range.start,
            range.end,
            Endpoint::Start,
            range.start,
        ));
    }
    if !text.is_char_boundary(range.end) {
        return Err(Error::not_on_char_boundary(
            text,
            range.start,
            range.end,
            Endpoint::End,
            range.end,
        ));
    }
    Ok(())
}
