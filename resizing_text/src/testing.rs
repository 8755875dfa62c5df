// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deterministic stand-ins for a text layout engine and a native widget.
//!
//! These are used by this crate's tests and are public so hosts can test
//! their own control configurations without fonts or a windowing system.

use std::ops::Range;

use decorated_text::{AttributeRuns, Attributes, Font};
use peniko::kurbo::Size;

use crate::widget::{NativeTextWidget, SelectionRanges, WidgetConfig};
use crate::{FocusDirection, MeasureRequest, TextMeasurer, TextMetrics};

/// A measurer for monospaced text with fixed metrics.
///
/// Every character advances half its font size and every line is 1.2 em
/// tall, using the tallest font on the line. Lines break at `\n` and at the
/// character that would overflow the width.
#[derive(Clone, Copy, Debug, Default)]
pub struct FixedAdvanceMeasurer;

impl FixedAdvanceMeasurer {
    /// Creates the measurer.
    pub fn new() -> Self {
        Self
    }

    /// Horizontal advance of one character in `font`.
    pub fn advance(font: &Font) -> f64 {
        f64::from(font.size) / 2.0
    }

    /// Height of a line set in `font`.
    pub fn line_height(font: &Font) -> f64 {
        f64::from(font.size) * 6.0 / 5.0
    }
}

impl TextMeasurer for FixedAdvanceMeasurer {
    fn measure(&mut self, request: &MeasureRequest<'_>) -> TextMetrics {
        let mut lines: Vec<Size> = Vec::new();
        let mut offset = 0;
        for hard_line in request.text.split('\n') {
            let mut width = 0.0;
            let mut height = 0.0_f64;
            let mut empty = true;
            for (ix, _) in hard_line.char_indices() {
                let font = request
                    .runs
                    .attributes_at(offset + ix)
                    .and_then(Attributes::font)
                    .unwrap_or(request.default_font);
                let advance = Self::advance(font);
                if let Some(max_width) = request.max_width {
                    if !empty && width + advance > max_width {
                        lines.push(Size::new(width, height));
                        width = 0.0;
                        height = 0.0;
                    }
                }
                width += advance;
                height = height.max(Self::line_height(font));
                empty = false;
            }
            if empty {
                height = Self::line_height(request.default_font);
            }
            lines.push(Size::new(width, height));
            offset += hard_line.len() + 1;
        }

        let line_count = lines.len();
        let visible_lines = request
            .line_limit
            .get()
            .map_or(line_count, |limit| limit.min(line_count));
        let size = lines[..visible_lines]
            .iter()
            .fold(Size::ZERO, |acc, line| {
                Size::new(acc.width.max(line.width), acc.height + line.height)
            });
        TextMetrics {
            size,
            line_count,
            visible_lines,
        }
    }
}

/// An in-memory [`NativeTextWidget`] that records what it was told.
///
/// It behaves like the native widgets where that matters to the adapters:
/// replacing the whole text collapses the selection to a caret at the end,
/// and input method composition leaves marked text in the buffer.
#[derive(Clone, Debug)]
pub struct HeadlessTextWidget {
    text: String,
    selection: SelectionRanges,
    marked: Option<Range<usize>>,
    runs: AttributeRuns,
    typing_attributes: Attributes,
    config: Option<WidgetConfig>,
    content_size: Size,
    viewport_size: Size,
    focus_traversal: bool,
    focus_moves: Vec<FocusDirection>,
    set_text_calls: usize,
    configure_calls: usize,
    style_applications: usize,
    intrinsic_size_invalidations: usize,
}

impl Default for HeadlessTextWidget {
    fn default() -> Self {
        Self {
            text: String::new(),
            selection: smallvec::smallvec![0..0],
            marked: None,
            runs: AttributeRuns::default(),
            typing_attributes: Attributes::new(),
            config: None,
            content_size: Size::ZERO,
            viewport_size: Size::ZERO,
            focus_traversal: true,
            focus_moves: Vec::new(),
            set_text_calls: 0,
            configure_calls: 0,
            style_applications: 0,
            intrinsic_size_invalidations: 0,
        }
    }
}

impl HeadlessTextWidget {
    /// An empty widget.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the marked text of a composition, replacing the current marked
    /// text or the selection, like an input method does.
    pub fn set_marked_text(&mut self, text: &str) {
        let range = self
            .marked
            .take()
            .unwrap_or_else(|| self.primary_selection());
        self.text.replace_range(range.clone(), text);
        let end = range.start + text.len();
        self.marked = (!text.is_empty()).then_some(range.start..end);
        self.selection = smallvec::smallvec![end..end];
    }

    /// Commits the marked text.
    pub fn unmark_text(&mut self) {
        self.marked = None;
    }

    /// The painted runs last applied.
    pub fn runs(&self) -> &AttributeRuns {
        &self.runs
    }

    /// The typing attributes last set.
    pub fn typing_attributes(&self) -> &Attributes {
        &self.typing_attributes
    }

    /// The configuration last applied.
    pub fn config(&self) -> Option<&WidgetConfig> {
        self.config.as_ref()
    }

    /// The placeholder the widget would draw.
    pub fn visible_placeholder(&self) -> Option<&str> {
        let placeholder = self.config.as_ref()?.placeholder.as_ref()?;
        self.text.is_empty().then_some(placeholder.text.as_str())
    }

    /// Sets the size reported as content size.
    pub fn set_content_size(&mut self, size: Size) {
        self.content_size = size;
    }

    /// Sets the size reported as viewport size.
    pub fn set_viewport_size(&mut self, size: Size) {
        self.viewport_size = size;
    }

    /// Whether the widget takes part in a focus order.
    pub fn set_focus_traversal(&mut self, enabled: bool) {
        self.focus_traversal = enabled;
    }

    /// Focus moves requested so far.
    pub fn focus_moves(&self) -> &[FocusDirection] {
        &self.focus_moves
    }

    /// How many times the whole text was replaced.
    pub fn set_text_calls(&self) -> usize {
        self.set_text_calls
    }

    /// How many times configuration was applied.
    pub fn configure_calls(&self) -> usize {
        self.configure_calls
    }

    /// How many times styles were applied.
    pub fn style_applications(&self) -> usize {
        self.style_applications
    }

    /// How many times intrinsic size was invalidated.
    pub fn intrinsic_size_invalidations(&self) -> usize {
        self.intrinsic_size_invalidations
    }

    fn primary_selection(&self) -> Range<usize> {
        let len = self.text.len();
        self.selection
            .first()
            .map_or(len..len, |range| range.start.min(len)..range.end.min(len))
    }
}

impl NativeTextWidget for HeadlessTextWidget {
    fn text(&self) -> &str {
        &self.text
    }

    fn set_text(&mut self, text: &str) {
        self.text.clear();
        self.text.push_str(text);
        self.marked = None;
        let end = self.text.len();
        self.selection = smallvec::smallvec![end..end];
        self.set_text_calls += 1;
    }

    fn replace_selection(&mut self, text: &str) {
        let range = self
            .marked
            .take()
            .unwrap_or_else(|| self.primary_selection());
        self.text.replace_range(range.clone(), text);
        let caret = range.start + text.len();
        self.selection = smallvec::smallvec![caret..caret];
    }

    fn selected_ranges(&self) -> SelectionRanges {
        self.selection.clone()
    }

    fn set_selected_ranges(&mut self, ranges: &[Range<usize>]) {
        let text = &self.text;
        self.selection = ranges
            .iter()
            .map(|range| {
                let (a, b) = (floor_boundary(text, range.start), floor_boundary(text, range.end));
                a.min(b)..a.max(b)
            })
            .collect();
        if self.selection.is_empty() {
            self.selection.push(0..0);
        }
    }

    fn marked_range(&self) -> Option<Range<usize>> {
        self.marked.clone()
    }

    fn apply_styles(&mut self, runs: &AttributeRuns) {
        self.runs.clone_from(runs);
        self.style_applications += 1;
    }

    fn set_typing_attributes(&mut self, attributes: &Attributes) {
        self.typing_attributes.clone_from(attributes);
    }

    fn configure(&mut self, config: &WidgetConfig) {
        self.config = Some(config.clone());
        self.configure_calls += 1;
    }

    fn content_size(&self) -> Size {
        self.content_size
    }

    fn viewport_size(&self) -> Size {
        self.viewport_size
    }

    fn invalidate_intrinsic_size(&mut self) {
        self.intrinsic_size_invalidations += 1;
    }

    fn move_focus(&mut self, direction: FocusDirection) -> bool {
        if self.focus_traversal {
            self.focus_moves.push(direction);
        }
        self.focus_traversal
    }
}

/// `offset` clamped to `text` and moved back to a char boundary.
fn floor_boundary(text: &str, offset: usize) -> usize {
    let mut offset = offset.min(text.len());
    while !text.is_char_boundary(offset) {
        offset -= 1;
    }
    offset
}

#[cfg(test)]
mod tests {
    use super::{FixedAdvanceMeasurer, HeadlessTextWidget};
    use crate::widget::NativeTextWidget;
    use crate::{LineLimit, MeasureRequest, TextMeasurer};
    use decorated_text::{AttributeRuns, Font};

    fn measure(text: &str, max_width: Option<f64>, line_limit: LineLimit) -> crate::TextMetrics {
        let runs = AttributeRuns::new(text.len());
        FixedAdvanceMeasurer::new().measure(&MeasureRequest {
            text,
            runs: &runs,
            default_font: &Font::new("mono", 10.0),
            max_width,
            line_limit,
        })
    }

    #[test]
    fn wraps_at_overflowing_character() {
        let metrics = measure("abcdefg", Some(15.0), LineLimit::Unbounded);
        assert_eq!(metrics.line_count, 3);
        assert_eq!(metrics.size.width, 15.0);
        assert_eq!(metrics.size.height, 36.0);
    }

    #[test]
    fn line_limit_keeps_first_lines() {
        let metrics = measure("a\nb\nc", None, LineLimit::new(2));
        assert_eq!(metrics.line_count, 3);
        assert_eq!(metrics.visible_lines, 2);
        assert!(metrics.is_truncated());
        assert_eq!(metrics.size.height, 24.0);
    }

    #[test]
    fn empty_line_has_height() {
        let metrics = measure("", None, LineLimit::Unbounded);
        assert_eq!(metrics.line_count, 1);
        assert_eq!(metrics.size.height, 12.0);
    }

    #[test]
    fn set_text_moves_caret_to_end() {
        let mut widget = HeadlessTextWidget::new();
        widget.set_text("hello");
        widget.set_selected_ranges(&[1..3]);
        widget.set_text("hey");
        assert_eq!(widget.selected_ranges().as_slice(), [3..3]);
    }

    #[test]
    fn selection_is_ordered_and_on_char_boundaries() {
        let mut widget = HeadlessTextWidget::new();
        widget.set_text("aéb");
        widget.set_selected_ranges(&[4..2, 9..9]);
        assert_eq!(widget.selected_ranges().as_slice(), [1..4, 4..4]);
        widget.replace_selection("x");
        assert_eq!(widget.text(), "ax");
    }

    #[test]
    fn composition_replaces_marked_text() {
        let mut widget = HeadlessTextWidget::new();
        widget.set_text("a");
        widget.set_marked_text("k");
        widget.set_marked_text("ka");
        assert_eq!(widget.text(), "aka");
        assert_eq!(widget.marked_range(), Some(1..3));
        widget.unmark_text();
        assert_eq!(widget.marked_range(), None);
    }
}
