// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Native editing adapters.
//!
//! An adapter owns one native widget and the [`StyledTextStore`] it renders
//! from, and keeps both in sync with the external [`TextBinding`]. Platform
//! glue forwards the widget's user-originated events to the adapter's event
//! methods; the hosting control calls [`EditingAdapter::update`] on every
//! render with fresh [`AdapterProps`].
//!
//! [`TextBinding`]: crate::TextBinding

mod desktop;
mod mobile;
mod shared;

pub use self::desktop::DesktopAdapter;
pub use self::mobile::MobileAdapter;

use std::cell::{Ref, RefMut};
use std::fmt;
use std::ops::Range;
use std::rc::Rc;

use decorated_text::{DecorationMap, StyledTextStore};
use peniko::kurbo::Insets;

use crate::widget::NativeTextWidget;
use crate::{
    Autocapitalization, FocusState, KeyboardType, LineLimit, TextBinding, UiQueue, WidgetFamily,
};

/// Called with `true` when the control gains focus and `false` when it loses it.
pub type FocusCallback = Rc<dyn Fn(bool)>;

/// Called when return is pressed; returning `true` suppresses the newline.
pub type NewlineCallback = Rc<dyn Fn() -> bool>;

/// Configuration the adapter applies on every refresh.
#[derive(Clone)]
pub struct AdapterProps {
    /// Default font and color plus range decorations.
    pub decoration_map: DecorationMap,
    /// Text shown while the content is empty.
    pub placeholder: Option<String>,
    /// Typing is allowed.
    pub is_editable: bool,
    /// The widget scrolls its own content.
    pub is_scrollable: bool,
    /// Text can be selected.
    pub is_selectable: bool,
    /// Maximum displayed lines.
    pub line_limit: LineLimit,
    /// Newlines may be entered.
    pub can_have_newlines: bool,
    /// Text container insets.
    pub insets: Insets,
    /// Tab moves focus instead of inserting a tab, where supported.
    pub focus_by_tab: bool,
    /// Keyboard capitalization, where supported.
    pub autocapitalization: Autocapitalization,
    /// Keyboard layout, where supported.
    pub keyboard_type: KeyboardType,
    /// Focus transition callback.
    pub on_focus_changed: Option<FocusCallback>,
    /// Return key interception.
    pub on_insert_newline: Option<NewlineCallback>,
}

impl Default for AdapterProps {
    fn default() -> Self {
        Self {
            decoration_map: DecorationMap::new(),
            placeholder: None,
            is_editable: true,
            is_scrollable: false,
            is_selectable: true,
            line_limit: LineLimit::Unbounded,
            can_have_newlines: true,
            insets: Insets::ZERO,
            focus_by_tab: true,
            autocapitalization: Autocapitalization::default(),
            keyboard_type: KeyboardType::default(),
            on_focus_changed: None,
            on_insert_newline: None,
        }
    }
}

impl fmt::Debug for AdapterProps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdapterProps")
            .field("decoration_map", &self.decoration_map)
            .field("placeholder", &self.placeholder)
            .field("is_editable", &self.is_editable)
            .field("is_scrollable", &self.is_scrollable)
            .field("is_selectable", &self.is_selectable)
            .field("line_limit", &self.line_limit)
            .field("can_have_newlines", &self.can_have_newlines)
            .field("insets", &self.insets)
            .field("focus_by_tab", &self.focus_by_tab)
            .field("autocapitalization", &self.autocapitalization)
            .field("keyboard_type", &self.keyboard_type)
            .finish_non_exhaustive()
    }
}

/// Editing commands the widget asks about before performing them.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum KeyCommand {
    /// Tab.
    InsertTab,
    /// Shift-tab.
    InsertBacktab,
    /// Return.
    InsertNewline,
}

impl KeyCommand {
    /// Text the widget inserts when the command is not intercepted.
    pub fn default_text(self) -> Option<&'static str> {
        match self {
            Self::InsertTab => Some("\t"),
            Self::InsertBacktab => None,
            Self::InsertNewline => Some("\n"),
        }
    }
}

/// What the widget should do with a scroll wheel event.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ScrollDisposition {
    /// Scroll the widget's own content.
    Consume,
    /// Pass the event to the enclosing scrollable ancestor.
    ForwardToParent,
}

/// The bridge between one native text widget and the declarative control.
///
/// The event methods (`should_change_text` through
/// `storage_did_process_editing`) are called by platform glue for events the
/// user caused. None of them may be called while another adapter call is in
/// progress, and the widget must not report events synchronously from calls
/// the adapter makes into it.
pub trait EditingAdapter {
    /// The wrapped widget.
    type Widget: NativeTextWidget;

    /// The widget family this adapter implements.
    fn family(&self) -> WidgetFamily;

    /// Borrows the widget.
    fn widget(&self) -> Ref<'_, Self::Widget>;

    /// Mutably borrows the widget.
    fn widget_mut(&self) -> RefMut<'_, Self::Widget>;

    /// Borrows the styled text store the widget renders from.
    fn store(&self) -> Ref<'_, StyledTextStore>;

    /// The current focus state.
    fn focus_state(&self) -> FocusState;

    /// Applies `props` and reconciles widget text, styles, configuration and
    /// selection with the binding.
    fn update(&mut self, props: AdapterProps);

    /// Asks whether `replacement` may replace `range`. Returning `false`
    /// drops the edit before it reaches the text.
    fn should_change_text(&mut self, range: Range<usize>, replacement: &str) -> bool;

    /// The user changed the text.
    fn text_did_change(&mut self);

    /// The user changed the selection.
    fn selection_did_change(&mut self);

    /// The widget gained or lost focus. Repeated reports are ignored.
    fn focus_changed(&mut self, focused: bool);

    /// Offers `command` for interception. Returns `true` if it was handled
    /// and the widget must not perform its default action.
    fn handle_command(&mut self, command: KeyCommand) -> bool;

    /// Routing for a scroll wheel event over the widget.
    fn scroll_wheel(&self) -> ScrollDisposition;

    /// The widget's content size changed during its own layout.
    fn content_size_changed(&mut self);

    /// The widget's text storage processed an edit, including ones that do
    /// not report through [`text_did_change`](Self::text_did_change).
    fn storage_did_process_editing(&mut self);

    /// Inserts `text` at the selection through the widget's input path, as
    /// typing or pasting would.
    fn insert_text(&mut self, text: &str) {
        let range = {
            let widget = self.widget();
            primary_range(&widget.selected_ranges(), widget.text().len())
        };
        if self.should_change_text(range, text) {
            self.widget_mut().replace_selection(text);
            self.text_did_change();
        }
    }

    /// A key press: offers the command for interception, then performs the
    /// default insertion if it was not handled.
    fn key_down(&mut self, command: KeyCommand) {
        if self.handle_command(command) {
            return;
        }
        if let Some(text) = command.default_text() {
            self.insert_text(text);
        }
    }
}

/// Creates the adapter for `family` around `widget`.
pub fn new_adapter<W: NativeTextWidget + 'static>(
    family: WidgetFamily,
    widget: W,
    binding: TextBinding,
    queue: UiQueue,
) -> Box<dyn EditingAdapter<Widget = W>> {
    match family {
        WidgetFamily::Desktop => Box::new(DesktopAdapter::new(widget, binding, queue)),
        WidgetFamily::Mobile => Box::new(MobileAdapter::new(widget, binding, queue)),
    }
}

fn primary_range(ranges: &[Range<usize>], len: usize) -> Range<usize> {
    ranges.first().cloned().unwrap_or(len..len)
}

/// The byte ranges that differ between `old` and `new`, as the replaced range
/// of `old` and the inserted range of `new`.
pub(crate) fn text_edit(old: &str, new: &str) -> (Range<usize>, Range<usize>) {
    let prefix = old
        .char_indices()
        .zip(new.chars())
        .find(|((_, a), b)| a != b)
        .map_or(old.len().min(new.len()), |((ix, _), _)| ix);
    let suffix: usize = old[prefix..]
        .chars()
        .rev()
        .zip(new[prefix..].chars().rev())
        .take_while(|(a, b)| a == b)
        .map(|(a, _)| a.len_utf8())
        .sum();
    (prefix..old.len() - suffix, prefix..new.len() - suffix)
}

/// Returns `true` for the characters a single-line control drops: `\n`, and
/// `\r` so that pasted `\r\n` line ends leave nothing behind.
pub(crate) fn is_line_break(c: char) -> bool {
    matches!(c, '\n' | '\r')
}

/// `text` without line break characters.
pub(crate) fn strip_newlines(text: &str) -> String {
    text.chars().filter(|&c| !is_line_break(c)).collect()
}

/// Where byte `offset` of `text` lands once line breaks are stripped.
pub(crate) fn offset_without_newlines(text: &str, offset: usize) -> usize {
    let offset = offset.min(text.len());
    offset
        - text.as_bytes()[..offset]
            .iter()
            .filter(|&&b| b == b'\n' || b == b'\r')
            .count()
}

#[cfg(test)]
mod tests {
    use super::{offset_without_newlines, strip_newlines, text_edit};

    #[test]
    fn edit_of_insertion() {
        assert_eq!(text_edit("hello", "help me"), (3..5, 3..7));
        assert_eq!(text_edit("ab", "abc"), (2..2, 2..3));
        assert_eq!(text_edit("", "x"), (0..0, 0..1));
    }

    #[test]
    fn edit_of_deletion_keeps_suffix() {
        assert_eq!(text_edit("abcabc", "abc"), (3..6, 3..3));
        assert_eq!(text_edit("xaby", "xy"), (1..3, 1..1));
    }

    #[test]
    fn edit_respects_char_boundaries() {
        // "é" and "è" share their first UTF-8 byte.
        assert_eq!(text_edit("é", "è"), (0..2, 0..2));
        assert_eq!(text_edit("aé", "aéé"), (3..3, 3..5));
    }

    #[test]
    fn newline_stripping() {
        assert_eq!(strip_newlines("a\nb\n"), "ab");
        assert_eq!(offset_without_newlines("a\nb", 3), 2);
        assert_eq!(offset_without_newlines("a\nb", 1), 1);
    }

    #[test]
    fn carriage_returns_stripped_with_newlines() {
        assert_eq!(strip_newlines("a\r\nb\rc"), "abc");
        assert_eq!(offset_without_newlines("a\r\nb", 4), 2);
    }
}
