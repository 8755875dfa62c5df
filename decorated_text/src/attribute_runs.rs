// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Computed attributes of a text as contiguous, non-overlapping runs.
//!
//! Decorations may overlap; the painted result may not. [`AttributeRuns`]
//! stores the result of applying defaults and decorations: a sequence of
//! runs that together cover every byte of the text exactly once, where no two
//! neighboring runs carry equal attributes. Each run is therefore the
//! *effective range* of the attributes it carries.

use alloc::vec::Vec;
use core::ops::Range;

use crate::{Attributes, TextRange};

/// A maximal span of text sharing identical attributes.
#[derive(Clone, Debug, PartialEq)]
pub struct AttributeRun {
    /// Byte range of the run.
    pub range: Range<usize>,
    /// Attributes in effect over the whole range.
    pub attributes: Attributes,
}

/// Painted attributes of a text, as coalesced runs.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AttributeRuns {
    runs: Vec<AttributeRun>,
    len: usize,
}

impl AttributeRuns {
    /// Runs for a text of `len` bytes with no attributes.
    pub fn new(len: usize) -> Self {
        let mut runs = Vec::new();
        if len > 0 {
            runs.push(AttributeRun {
                range: 0..len,
                attributes: Attributes::new(),
            });
        }
        Self { runs, len }
    }

    /// The length in bytes of the text these runs cover.
    pub fn text_len(&self) -> usize {
        self.len
    }

    /// The number of runs.
    pub fn len(&self) -> usize {
        self.runs.len()
    }

    /// Returns `true` if the covered text is empty.
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// Iterates the runs in text order.
    pub fn iter(&self) -> core::slice::Iter<'_, AttributeRun> {
        self.runs.iter()
    }

    /// The attributes in effect at byte `index`.
    pub fn attributes_at(&self, index: usize) -> Option<&Attributes> {
        self.run_at(index).map(|run| &run.attributes)
    }

    /// The attributes at byte `index` together with the maximal range around
    /// `index` over which they are identical.
    pub fn effective_range(&self, index: usize) -> Option<(&Attributes, Range<usize>)> {
        self.run_at(index)
            .map(|run| (&run.attributes, run.range.clone()))
    }

    fn run_at(&self, index: usize) -> Option<&AttributeRun> {
        if index >= self.len {
            return None;
        }
        let ix = self.runs.partition_point(|run| run.range.end <= index);
        self.runs.get(ix)
    }

    /// Replaces the bytes in `range` with `inserted_len` unstyled bytes,
    /// shifting every run after the edit.
    ///
    /// `range` must lie within the covered text.
    pub fn splice(&mut self, range: Range<usize>, inserted_len: usize) {
        debug_assert!(
            range.start <= range.end && range.end <= self.len,
            "splice range {range:?} out of bounds for {}",
            self.len
        );
        let first = self.split_at(range.start);
        let last = self.split_at(range.end);
        self.runs.drain(first..last);
        let removed = range.end - range.start;
        let mut next = first;
        if inserted_len > 0 {
            self.runs.insert(
                first,
                AttributeRun {
                    range: range.start..range.start + inserted_len,
                    attributes: Attributes::new(),
                },
            );
            next += 1;
        }
        for run in &mut self.runs[next..] {
            run.range.start = run.range.start - removed + inserted_len;
            run.range.end = run.range.end - removed + inserted_len;
        }
        self.len = self.len - removed + inserted_len;
        self.coalesce();
    }

    /// Replaces all attributes over `range` with `attributes`.
    pub fn set(&mut self, range: TextRange, attributes: &Attributes) {
        if range.is_empty() {
            return;
        }
        let first = self.split_at(range.start());
        let last = self.split_at(range.end());
        self.runs.splice(
            first..last,
            [AttributeRun {
                range: range.as_range(),
                attributes: attributes.clone(),
            }],
        );
        self.coalesce();
    }

    /// Adds `attributes` over `range`, replacing values for keys it sets and
    /// keeping every other key.
    pub fn merge(&mut self, range: TextRange, attributes: &Attributes) {
        if range.is_empty() || attributes.is_empty() {
            return;
        }
        let first = self.split_at(range.start());
        let last = self.split_at(range.end());
        for run in &mut self.runs[first..last] {
            run.attributes.extend(attributes);
        }
        self.coalesce();
    }

    /// Ensures a run boundary at `offset` and returns the index of the run
    /// starting there (or the run count when `offset` is the end).
    fn split_at(&mut self, offset: usize) -> usize {
        if offset >= self.len {
            return self.runs.len();
        }
        let ix = self.runs.partition_point(|run| run.range.end <= offset);
        let run = &mut self.runs[ix];
        if run.range.start == offset {
            return ix;
        }
        let tail = AttributeRun {
            range: offset..run.range.end,
            attributes: run.attributes.clone(),
        };
        run.range.end = offset;
        self.runs.insert(ix + 1, tail);
        ix + 1
    }

    fn coalesce(&mut self) {
        self.runs.dedup_by(|next, prev| {
            if prev.attributes == next.attributes {
                prev.range.end = next.range.end;
                true
            } else {
                false
            }
        });
    }
}

impl<'a> IntoIterator for &'a AttributeRuns {
    type Item = &'a AttributeRun;
    type IntoIter = core::slice::Iter<'a, AttributeRun>;

    fn into_iter(self) -> Self::IntoIter {
        self.runs.iter()
    }
}
