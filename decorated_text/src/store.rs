// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The styled text store.
//!
//! Every mutation records the byte ranges whose painted attributes may no
//! longer match the desired [`DecorationMap`]. A single reconciliation pass,
//! [`StyledTextStore::reapply_if_needed`], repaints exactly those ranges and
//! then records the map as applied.

use alloc::string::String;
use alloc::vec::Vec;
use core::ops::Range;

use crate::{AttributeRuns, Attributes, DecorationMap, Error, TextRange};

/// Mutable text with defaults and range decorations painted over it.
///
/// The store separates the *desired* decoration map from the one last
/// painted. Styling is applied lazily: edits and map changes only mark ranges
/// dirty, and [`reapply_if_needed`](Self::reapply_if_needed) paints them. Once
/// it returns with no composition in progress, the applied map equals the
/// desired one.
///
/// While an input method composition is in progress (see
/// [`set_marked_range`](Self::set_marked_range)) painting is deferred, since
/// changing attributes under marked text disturbs the composition session.
#[derive(Clone, Debug, Default)]
pub struct StyledTextStore {
    text: String,
    runs: AttributeRuns,
    decoration_map: DecorationMap,
    applied_decoration_map: DecorationMap,
    /// Sorted, disjoint, non-adjacent byte ranges awaiting repaint.
    dirty: Vec<Range<usize>>,
    marked: Option<Range<usize>>,
    /// Set when edits have moved painted attributes relative to the
    /// character offsets decorations are expressed in. Cleared by a repaint
    /// of the whole text.
    drifted: bool,
}

impl StyledTextStore {
    /// An empty store with an empty decoration map.
    pub fn new() -> Self {
        Self::default()
    }

    /// A store holding `text`, not yet painted.
    pub fn with_text(text: impl Into<String>) -> Self {
        let text = text.into();
        let len = text.len();
        let mut store = Self {
            runs: AttributeRuns::new(len),
            text,
            ..Self::default()
        };
        store.mark_dirty(0..len);
        store
    }

    /// The current text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The desired decoration map.
    pub fn decoration_map(&self) -> &DecorationMap {
        &self.decoration_map
    }

    /// The decoration map that was last painted.
    pub fn applied_decoration_map(&self) -> &DecorationMap {
        &self.applied_decoration_map
    }

    /// The painted attribute runs.
    pub fn runs(&self) -> &AttributeRuns {
        &self.runs
    }

    /// Byte ranges waiting to be repainted.
    pub fn dirty_ranges(&self) -> &[Range<usize>] {
        &self.dirty
    }

    /// The painted attributes at byte `index`.
    pub fn attributes_at(&self, index: usize) -> Option<&Attributes> {
        self.runs.attributes_at(index)
    }

    /// The painted attributes at byte `index` and the maximal range sharing
    /// them.
    pub fn effective_range(&self, index: usize) -> Option<(&Attributes, Range<usize>)> {
        self.runs.effective_range(index)
    }

    /// Returns `true` if a call to [`reapply_if_needed`](Self::reapply_if_needed)
    /// would change anything.
    pub fn needs_reapply(&self) -> bool {
        !self.dirty.is_empty() || self.applied_decoration_map != self.decoration_map
    }

    /// Replaces the bytes in `range` with `new_text`.
    ///
    /// The inserted text is unstyled until the next reapplication, which
    /// repaints it. Fails without modifying anything if `range` is out of
    /// bounds or splits a character.
    pub fn replace_range(&mut self, range: Range<usize>, new_text: &str) -> Result<(), Error> {
        let range = TextRange::new(&self.text, range)?;
        self.splice(range.as_range(), new_text);
        Ok(())
    }

    /// Replaces the whole text.
    pub fn set_text(&mut self, text: &str) {
        if self.text == text {
            return;
        }
        self.splice(0..self.text.len(), text);
    }

    fn splice(&mut self, range: Range<usize>, new_text: &str) {
        let inserted = new_text.len();
        self.text.replace_range(range.clone(), new_text);
        self.runs.splice(range.clone(), inserted);

        let shift = |offset: usize| {
            if offset <= range.start {
                offset
            } else if offset >= range.end {
                offset - (range.end - range.start) + inserted
            } else {
                range.start
            }
        };
        for dirty in &mut self.dirty {
            *dirty = shift(dirty.start)..shift(dirty.end);
        }
        self.dirty.retain(|dirty| !dirty.is_empty());
        self.marked = self
            .marked
            .take()
            .map(|marked| shift(marked.start)..shift(marked.end))
            .filter(|marked| !marked.is_empty());

        // A deletion only shifts painted runs, so nothing is dirtied here.
        // `drifted` makes the next map change repaint the whole text.
        if inserted > 0 {
            self.mark_dirty(range.start..range.start + inserted);
        }
        self.drifted = true;
    }

    /// Replaces the desired decoration map.
    ///
    /// Does nothing if `map` equals the current one. Otherwise marks the
    /// ranges whose painting may change: the whole text when the defaults
    /// changed or edits moved painted attributes since the last full repaint,
    /// and only the ranges of decorations that differ by position in the list
    /// otherwise.
    pub fn set_decoration_map(&mut self, map: DecorationMap) {
        if map == self.decoration_map {
            return;
        }
        if self.drifted || map.defaults_differ(&self.decoration_map) {
            self.invalidate_all();
        } else {
            let old = &self.decoration_map.decorations;
            let new = &map.decorations;
            let mut changed = Vec::new();
            for ix in 0..old.len().max(new.len()) {
                let (before, after) = (old.get(ix), new.get(ix));
                if before == after {
                    continue;
                }
                changed.extend(
                    before
                        .into_iter()
                        .chain(after)
                        .filter_map(|decoration| decoration.resolve(&self.text)),
                );
            }
            for range in changed {
                self.mark_dirty(range.as_range());
            }
        }
        self.decoration_map = map;
    }

    /// Marks the whole text for repaint.
    pub fn invalidate_all(&mut self) {
        self.mark_dirty(0..self.text.len());
    }

    /// Records the input method's marked (uncommitted) text range.
    ///
    /// `None` or an empty range ends the composition; call
    /// [`reapply_if_needed`](Self::reapply_if_needed) afterwards to paint
    /// anything deferred during it.
    pub fn set_marked_range(&mut self, range: Option<Range<usize>>) {
        self.marked = range.filter(|range| !range.is_empty() && range.end <= self.text.len());
    }

    /// The marked text range, if a composition is in progress.
    pub fn marked_range(&self) -> Option<Range<usize>> {
        self.marked.clone()
    }

    /// Returns `true` while an input method composition is in progress.
    pub fn is_composing(&self) -> bool {
        self.marked.is_some()
    }

    /// Repaints every dirty range and records the desired map as applied.
    ///
    /// Each dirty range is cleared, given the default font and color, then
    /// every decoration overlapping it is merged in list order, clipped to
    /// the range. Decorations whose range no longer fits the text are
    /// skipped.
    ///
    /// Returns `true` if anything was repainted. Does nothing while composing.
    pub fn reapply_if_needed(&mut self) -> bool {
        if self.is_composing() {
            if self.needs_reapply() {
                log::trace!("deferring restyle until composition ends");
            }
            return false;
        }
        if self.dirty.is_empty() {
            if self.applied_decoration_map != self.decoration_map {
                self.applied_decoration_map = self.decoration_map.clone();
            }
            if self.text.is_empty() {
                self.drifted = false;
            }
            return false;
        }

        let full = self.dirty.len() == 1 && self.dirty[0] == (0..self.text.len());
        let base = self.decoration_map.base_attributes();
        let dirty = core::mem::take(&mut self.dirty);
        log::trace!("restyling {} range(s), full = {full}", dirty.len());
        for range in dirty {
            self.paint(TextRange::new_unchecked(range.start, range.end), &base);
        }
        if full {
            self.drifted = false;
        }
        self.applied_decoration_map = self.decoration_map.clone();
        true
    }

    fn paint(&mut self, range: TextRange, base: &Attributes) {
        self.runs.set(range, base);
        for decoration in &self.decoration_map.decorations {
            let Some(overlap) = decoration
                .resolve(&self.text)
                .and_then(|deco_range| deco_range.intersect(range))
            else {
                continue;
            };
            self.runs.merge(overlap, &decoration.attributes);
        }
    }

    fn mark_dirty(&mut self, range: Range<usize>) {
        if range.is_empty() {
            return;
        }
        // Merge with every range it overlaps or touches.
        let first = self.dirty.partition_point(|dirty| dirty.end < range.start);
        let last = self.dirty.partition_point(|dirty| dirty.start <= range.end);
        let mut merged = range;
        if first < last {
            merged.start = merged.start.min(self.dirty[first].start);
            merged.end = merged.end.max(self.dirty[last - 1].end);
        }
        self.dirty.splice(first..last, [merged]);
    }
}
