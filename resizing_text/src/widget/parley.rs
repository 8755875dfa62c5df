// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::fmt;
use std::ops::Range;

use decorated_text::{AttributeRuns, Attributes, Font};
use parley::PlainEditor;
use parley::{FontContext, Layout, LayoutContext};
use peniko::kurbo::Size;

use super::{NativeTextWidget, SelectionRanges, WidgetConfig};
use crate::measure::parley::{build_layout, TextBrush};
use crate::FocusDirection;

/// A text widget built on Parley's [`PlainEditor`].
///
/// The editor owns text, selection and composition; drawing uses a separate
/// layout built from the painted runs, since the editor itself only knows a
/// single default style. Focus moves requested by tab traversal are queued for
/// the host, see [`take_focus_request`](Self::take_focus_request).
pub struct ParleyTextWidget {
    editor: PlainEditor<TextBrush>,
    font_cx: FontContext,
    layout_cx: LayoutContext<TextBrush>,
    runs: AttributeRuns,
    typing_attributes: Attributes,
    config: Option<WidgetConfig>,
    default_font: Font,
    viewport: Size,
    focus_request: Option<FocusDirection>,
    needs_intrinsic_size: bool,
}

impl ParleyTextWidget {
    /// A widget using the system fonts, with `default_font` until styles are
    /// applied.
    pub fn new(default_font: Font) -> Self {
        Self::with_contexts(FontContext::new(), LayoutContext::new(), default_font)
    }

    /// A widget using existing Parley contexts.
    pub fn with_contexts(
        font_cx: FontContext,
        layout_cx: LayoutContext<TextBrush>,
        default_font: Font,
    ) -> Self {
        Self {
            editor: PlainEditor::new(default_font.size),
            font_cx,
            layout_cx,
            runs: AttributeRuns::default(),
            typing_attributes: Attributes::new(),
            config: None,
            default_font,
            viewport: Size::ZERO,
            focus_request: None,
            needs_intrinsic_size: false,
        }
    }

    /// The underlying editor, for forwarding keyboard and pointer input.
    pub fn editor_mut(&mut self) -> &mut PlainEditor<TextBrush> {
        &mut self.editor
    }

    /// Sets the visible area, which also fixes the wrapping width.
    pub fn set_viewport(&mut self, viewport: Size) {
        self.viewport = viewport;
        let width = self.content_width();
        self.editor.set_width(width);
    }

    /// The last configuration applied.
    pub fn config(&self) -> Option<&WidgetConfig> {
        self.config.as_ref()
    }

    /// Attributes newly typed text starts with.
    pub fn typing_attributes(&self) -> &Attributes {
        &self.typing_attributes
    }

    /// Takes the pending focus move requested by tab traversal.
    pub fn take_focus_request(&mut self) -> Option<FocusDirection> {
        self.focus_request.take()
    }

    /// Takes the pending intrinsic size invalidation.
    pub fn take_intrinsic_size_invalidation(&mut self) -> bool {
        std::mem::take(&mut self.needs_intrinsic_size)
    }

    /// The styled layout of the text, broken at the content width.
    pub fn layout(&mut self) -> Layout<TextBrush> {
        let text = self.editor.raw_text().to_owned();
        let mut layout = build_layout(
            &mut self.layout_cx,
            &mut self.font_cx,
            &text,
            &self.runs,
            &self.default_font,
            1.0,
        );
        layout.break_all_lines(self.content_width());
        layout
    }

    /// The placeholder text to draw, if the text is empty and one is set.
    pub fn visible_placeholder(&self) -> Option<&str> {
        let placeholder = self.config.as_ref()?.placeholder.as_ref()?;
        self.editor
            .raw_text()
            .is_empty()
            .then_some(placeholder.text.as_str())
    }

    #[expect(clippy::cast_possible_truncation, reason = "Parley lays out in f32.")]
    fn content_width(&self) -> Option<f32> {
        let config = self.config.as_ref()?;
        if self.viewport.width <= 0.0 {
            return None;
        }
        let horizontal = config.insets.x_value() + 2.0 * config.line_fragment_padding;
        Some((self.viewport.width - horizontal).max(0.0) as f32)
    }
}

impl fmt::Debug for ParleyTextWidget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParleyTextWidget")
            .field("text", &self.editor.raw_text())
            .field("runs", &self.runs)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl NativeTextWidget for ParleyTextWidget {
    fn text(&self) -> &str {
        self.editor.raw_text()
    }

    fn set_text(&mut self, text: &str) {
        self.editor.set_text(text);
        self.editor
            .driver(&mut self.font_cx, &mut self.layout_cx)
            .move_to_text_end();
    }

    fn replace_selection(&mut self, text: &str) {
        self.editor
            .driver(&mut self.font_cx, &mut self.layout_cx)
            .insert_or_replace_selection(text);
    }

    fn selected_ranges(&self) -> SelectionRanges {
        smallvec::smallvec![self.editor.raw_selection().text_range()]
    }

    fn set_selected_ranges(&mut self, ranges: &[Range<usize>]) {
        let range = ranges.first().cloned().unwrap_or(0..0);
        self.editor
            .driver(&mut self.font_cx, &mut self.layout_cx)
            .select_byte_range(range.start, range.end);
    }

    fn marked_range(&self) -> Option<Range<usize>> {
        self.editor.raw_compose().clone()
    }

    fn apply_styles(&mut self, runs: &AttributeRuns) {
        self.runs.clone_from(runs);
    }

    fn set_typing_attributes(&mut self, attributes: &Attributes) {
        self.typing_attributes.clone_from(attributes);
        if let Some(font) = attributes.font() {
            self.default_font = font.clone();
        }
    }

    fn configure(&mut self, config: &WidgetConfig) {
        self.config = Some(config.clone());
        let width = self.content_width();
        self.editor.set_width(width);
    }

    fn content_size(&self) -> Size {
        let insets = self
            .config
            .as_ref()
            .map(|config| config.insets)
            .unwrap_or_default();
        let Some(layout) = self.editor.try_layout() else {
            return Size::new(insets.x_value(), insets.y_value());
        };
        Size::new(
            f64::from(layout.width()) + insets.x_value(),
            f64::from(layout.height()) + insets.y_value(),
        )
    }

    fn viewport_size(&self) -> Size {
        self.viewport
    }

    fn invalidate_intrinsic_size(&mut self) {
        self.needs_intrinsic_size = true;
    }

    fn move_focus(&mut self, direction: FocusDirection) -> bool {
        self.focus_request = Some(direction);
        true
    }
}
