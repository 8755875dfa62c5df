// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The surface of a native multi-line text widget, as the adapters see it.

#[cfg(feature = "parley")]
mod parley;

#[cfg(feature = "parley")]
pub use self::parley::ParleyTextWidget;

use std::ops::Range;

use decorated_text::{AttributeRuns, Attributes, Color, Font};
use peniko::kurbo::{Insets, Size};
use smallvec::SmallVec;

use crate::{Autocapitalization, FocusDirection, KeyboardType, LineLimit};

/// Selected byte ranges; almost always exactly one.
pub type SelectionRanges = SmallVec<[Range<usize>; 1]>;

/// Placeholder drawn by the widget itself while its text is empty.
#[derive(Clone, Debug, PartialEq)]
pub struct Placeholder {
    /// The placeholder text.
    pub text: String,
    /// Font to draw it in.
    pub font: Font,
    /// Color to draw it in.
    pub color: Color,
}

/// Appearance of the scroll bars of a scrolling widget.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ScrollerStyle {
    /// Thin bars drawn over the content, shown while scrolling.
    #[default]
    Overlay,
    /// Permanent bars beside the content.
    Legacy,
}

/// Scrolling setup of the widget's enclosing scroll view.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ScrollConfig {
    /// The widget scrolls its own content.
    pub enabled: bool,
    /// A vertical scroll bar is shown.
    pub shows_vertical_scroller: bool,
    /// How the scroll bar is drawn.
    pub style: ScrollerStyle,
}

/// Everything the adapter configures on the widget besides text, styles and
/// selection. Pushed as a whole when any field changes.
#[derive(Clone, Debug, PartialEq)]
pub struct WidgetConfig {
    /// Typing is allowed.
    pub editable: bool,
    /// Text can be selected.
    pub selectable: bool,
    /// Maximum displayed lines.
    pub line_limit: LineLimit,
    /// Overflowing text is truncated with an ellipsis at the tail.
    pub truncates_tail: bool,
    /// Space between the widget's edges and its text container.
    pub insets: Insets,
    /// Horizontal padding inside each line.
    pub line_fragment_padding: f64,
    /// The widget draws its background.
    pub draws_background: bool,
    /// Scroll behavior.
    pub scroll: ScrollConfig,
    /// The widget's intrinsic height follows its content height.
    pub dynamic_height: bool,
    /// Content outside the widget's bounds is clipped.
    pub clips_to_bounds: bool,
    /// Placeholder the widget draws itself, if any.
    pub placeholder: Option<Placeholder>,
    /// Keyboard capitalization.
    pub autocapitalization: Autocapitalization,
    /// Keyboard layout.
    pub keyboard_type: KeyboardType,
}

/// A native multi-line editable text widget.
///
/// Implementations wrap one widget instance. Programmatic calls made through
/// this trait must not report back through the adapter's event methods; the
/// platform glue forwards only user-originated events.
pub trait NativeTextWidget {
    /// The full text, including any marked (uncommitted) text.
    fn text(&self) -> &str;

    /// Replaces the whole text.
    ///
    /// Like native widgets, this may reset the selection to a caret.
    fn set_text(&mut self, text: &str);

    /// Replaces the primary selection with `text`, leaving the caret after it.
    fn replace_selection(&mut self, text: &str);

    /// The selected byte ranges.
    fn selected_ranges(&self) -> SelectionRanges;

    /// Selects `ranges`. Families with a single selection use the first.
    fn set_selected_ranges(&mut self, ranges: &[Range<usize>]);

    /// The marked text range of an input method composition, if any.
    fn marked_range(&self) -> Option<Range<usize>>;

    /// Draws the text with `runs`.
    fn apply_styles(&mut self, runs: &AttributeRuns);

    /// Attributes given to newly typed text.
    fn set_typing_attributes(&mut self, attributes: &Attributes);

    /// Applies configuration.
    fn configure(&mut self, config: &WidgetConfig);

    /// Size of the laid out content, including insets.
    fn content_size(&self) -> Size;

    /// Size of the visible area.
    fn viewport_size(&self) -> Size;

    /// Asks the host layout to query the widget's intrinsic size again.
    fn invalidate_intrinsic_size(&mut self);

    /// Moves keyboard focus to another control. Returns `false` if the widget
    /// has no notion of focus order.
    fn move_focus(&mut self, direction: FocusDirection) -> bool;
}
