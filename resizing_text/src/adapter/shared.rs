// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! State and synchronization steps common to every adapter.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use decorated_text::{Attributes, StyledTextStore};

use super::{
    is_line_break, offset_without_newlines, strip_newlines, text_edit, AdapterProps,
    ScrollDisposition,
};
use crate::widget::{NativeTextWidget, SelectionRanges, WidgetConfig};
use crate::{FocusTracker, TextBinding, UiQueue, WidgetFamily};

pub(super) type SharedCore<W> = Rc<RefCell<AdapterCore<W>>>;

/// Everything an adapter owns. Adapters keep it behind a shared cell so
/// deferred tasks can reach it through a weak handle.
#[derive(Debug)]
pub(super) struct AdapterCore<W> {
    pub(super) widget: W,
    pub(super) family: WidgetFamily,
    pub(super) store: StyledTextStore,
    pub(super) binding: TextBinding,
    pub(super) props: AdapterProps,
    pub(super) focus: FocusTracker,
    queue: UiQueue,
    selection: SelectionCache,
    pushed: Option<WidgetConfig>,
    typing: Option<Attributes>,
}

impl<W: NativeTextWidget + 'static> AdapterCore<W> {
    pub(super) fn new(
        widget: W,
        family: WidgetFamily,
        binding: TextBinding,
        queue: UiQueue,
    ) -> SharedCore<W> {
        let store = StyledTextStore::with_text(widget.text());
        Rc::new(RefCell::new(Self {
            widget,
            family,
            store,
            binding,
            props: AdapterProps::default(),
            focus: FocusTracker::new(),
            queue,
            selection: SelectionCache::default(),
            pushed: None,
            typing: None,
        }))
    }

    /// Runs `task` on the next UI turn if the adapter still exists then.
    pub(super) fn defer(&self, this: Weak<RefCell<Self>>, task: impl FnOnce(&mut Self) + 'static) {
        self.queue
            .schedule_for(this, move |core: &RefCell<Self>| match core.try_borrow_mut() {
                Ok(mut core) => task(&mut *core),
                Err(_) => log::warn!("adapter busy, dropping deferred task"),
            });
    }

    /// Brings widget text and styles in line with the binding and `props`.
    ///
    /// The binding wins when it disagrees with the widget: during typing the
    /// widget writes the binding first, so a difference here means the text
    /// was changed from outside.
    pub(super) fn sync_external(&mut self, props: &AdapterProps) {
        let mut external = self.binding.get();
        if !props.can_have_newlines && external.contains(is_line_break) {
            log::debug!("stripping newlines from bound text");
            external = strip_newlines(&external);
            self.binding.set(external.clone());
        }
        if self.widget.text() != external {
            log::debug!("bound text changed outside the control, replacing widget text");
            self.widget.set_text(&external);
            self.store.set_marked_range(None);
            self.store.set_text(&external);
        } else if self.store.text() != external {
            self.store.set_text(&external);
        }

        self.store.set_decoration_map(props.decoration_map.clone());
        self.repaint();

        let typing = props.decoration_map.base_attributes();
        if self.typing.as_ref() != Some(&typing) {
            self.widget.set_typing_attributes(&typing);
            self.typing = Some(typing);
        }
    }

    /// Pushes `config` to the widget if it differs from the last one pushed.
    pub(super) fn apply_config(&mut self, config: WidgetConfig) -> bool {
        if self.pushed.as_ref() == Some(&config) {
            return false;
        }
        self.widget.configure(&config);
        self.pushed = Some(config);
        true
    }

    /// The configuration last pushed.
    pub(super) fn pushed_config(&self) -> Option<&WidgetConfig> {
        self.pushed.as_ref()
    }

    /// Restores the cached selection, clamped to the current text, and
    /// records `props` as current.
    pub(super) fn finish_update(&mut self, props: AdapterProps) {
        if let Some(wanted) = self.selection.clamped(self.widget.text()) {
            if self.widget.selected_ranges() != wanted {
                log::debug!("restoring selection {wanted:?}");
                self.widget.set_selected_ranges(&wanted);
            }
        }
        self.props = props;
    }

    /// Whether `replacement` may be typed. A single-line control rejects a
    /// bare line break; breaks inside longer input are stripped afterwards.
    pub(super) fn allows(&self, replacement: &str) -> bool {
        let line_break = !replacement.is_empty() && replacement.chars().all(is_line_break);
        if line_break && !self.props.can_have_newlines {
            log::trace!("rejecting newline");
            return false;
        }
        true
    }

    /// Copies a user edit from the widget into the store and the binding.
    ///
    /// Returns `true` if the binding changed.
    pub(super) fn sync_from_widget(&mut self) -> bool {
        if !self.props.can_have_newlines && self.widget.text().contains(is_line_break) {
            log::debug!("stripping newlines that bypassed the input filter");
            let text = self.widget.text().to_owned();
            let selection: SelectionRanges = self
                .widget
                .selected_ranges()
                .iter()
                .map(|range| {
                    offset_without_newlines(&text, range.start)
                        ..offset_without_newlines(&text, range.end)
                })
                .collect();
            self.widget.set_text(&strip_newlines(&text));
            self.widget.set_selected_ranges(&selection);
        }

        let text = self.widget.text().to_owned();
        if self.store.text() != text {
            let (replaced, inserted) = text_edit(self.store.text(), &text);
            if let Err(err) = self.store.replace_range(replaced, &text[inserted]) {
                log::warn!("store out of step with widget, resetting: {err}");
                self.store.set_text(&text);
            }
        }
        self.store.set_marked_range(self.widget.marked_range());
        self.repaint();
        self.cache_selection();

        let changed = self.binding.with(|bound| bound != text);
        if changed {
            self.binding.set(text);
        }
        changed
    }

    /// Gives newly typed text the default attributes again.
    pub(super) fn reset_typing_attributes(&mut self) {
        let typing = self.store.decoration_map().base_attributes();
        self.widget.set_typing_attributes(&typing);
        self.typing = Some(typing);
    }

    pub(super) fn cache_selection(&mut self) {
        self.selection.store(
            self.widget.selected_ranges(),
            self.family.supports_multiple_selection(),
        );
    }

    pub(super) fn forget_selection(&mut self) {
        self.selection.clear();
    }

    pub(super) fn scroll_disposition(&self) -> ScrollDisposition {
        if self.props.is_scrollable {
            ScrollDisposition::Consume
        } else {
            ScrollDisposition::ForwardToParent
        }
    }

    fn repaint(&mut self) {
        if self.store.reapply_if_needed() {
            self.widget.apply_styles(self.store.runs());
        }
    }
}

/// Records a focus report and notifies the focus callback once per real
/// transition.
///
/// Losing focus forgets the cached selection and collapses the widget's
/// selection on the next turn, unless focus came back in the meantime.
pub(super) fn report_focus<W: NativeTextWidget + 'static>(core: &SharedCore<W>, focused: bool) {
    let callback = {
        let mut this = core.borrow_mut();
        let Some(state) = this.focus.report(focused) else {
            log::trace!("ignoring repeated focus report");
            return;
        };
        if state.is_focused() {
            // Desktop widgets draw no caret in an empty text view until
            // something selects the start of it.
            if this.family == WidgetFamily::Desktop && this.widget.text().is_empty() {
                this.widget.set_selected_ranges(&[0..0]);
            }
        } else {
            this.forget_selection();
            this.defer(Rc::downgrade(core), |this| {
                if !this.focus.state().is_focused() {
                    this.widget.set_selected_ranges(&[0..0]);
                }
            });
        }
        this.props.on_focus_changed.clone()
    };
    if let Some(callback) = callback {
        callback(focused);
    }
}

/// Offers a return key press to the newline callback.
pub(super) fn intercept_newline<W: NativeTextWidget + 'static>(core: &SharedCore<W>) -> bool {
    let callback = core.borrow().props.on_insert_newline.clone();
    callback.is_some_and(|callback| callback())
}

/// The last selection the user made, reapplied after programmatic text
/// replacement.
#[derive(Clone, Debug, Default)]
struct SelectionCache {
    ranges: SelectionRanges,
}

impl SelectionCache {
    fn store(&mut self, mut ranges: SelectionRanges, multiple: bool) {
        if !multiple {
            ranges.truncate(1);
        }
        self.ranges = ranges;
    }

    fn clear(&mut self) {
        self.ranges.clear();
    }

    /// The cached ranges clamped to `text`, or `None` if nothing is cached.
    fn clamped(&self, text: &str) -> Option<SelectionRanges> {
        if self.ranges.is_empty() {
            return None;
        }
        Some(
            self.ranges
                .iter()
                .map(|range| clamp_offset(text, range.start)..clamp_offset(text, range.end))
                .collect(),
        )
    }
}

fn clamp_offset(text: &str, offset: usize) -> usize {
    let mut offset = offset.min(text.len());
    while !text.is_char_boundary(offset) {
        offset -= 1;
    }
    offset
}

#[cfg(test)]
mod tests {
    use super::SelectionCache;
    use smallvec::smallvec;

    #[test]
    fn clamps_to_shorter_text() {
        let mut cache = SelectionCache::default();
        assert!(cache.clamped("abc").is_none());
        cache.store(smallvec![2..5], true);
        assert_eq!(cache.clamped("help").unwrap().as_slice(), [2..4]);
        assert_eq!(cache.clamped("hello").unwrap().as_slice(), [2..5]);
    }

    #[test]
    fn clamps_to_char_boundary() {
        let mut cache = SelectionCache::default();
        cache.store(smallvec![0..2], true);
        assert_eq!(cache.clamped("aé").unwrap().as_slice(), [0..1]);
    }

    #[test]
    fn single_selection_keeps_first_range() {
        let mut cache = SelectionCache::default();
        cache.store(smallvec![0..1, 3..4], false);
        assert_eq!(cache.clamped("hello").unwrap().len(), 1);
    }
}
