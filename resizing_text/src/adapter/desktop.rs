// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::cell::{Ref, RefMut};
use std::ops::Range;
use std::rc::Rc;

use decorated_text::{Color, Font, StyledTextStore};

use super::shared::{intercept_newline, report_focus, AdapterCore, SharedCore};
use super::{AdapterProps, EditingAdapter, KeyCommand, ScrollDisposition};
use crate::widget::{NativeTextWidget, Placeholder, ScrollConfig, ScrollerStyle, WidgetConfig};
use crate::{
    Autocapitalization, FocusDirection, FocusState, KeyboardType, TextBinding, UiQueue,
    WidgetFamily,
};

/// Placeholder text color: black at a quarter opacity.
const PLACEHOLDER_COLOR: Color = Color::from_rgba8(0, 0, 0, 64);

/// Adapter for desktop text views embedded in a scroll view.
///
/// The widget draws its own placeholder, supports several selection ranges and
/// can move keyboard focus on tab. Edits that bypass the text change
/// notification (undo while the view is not focused) are picked up from
/// [`storage_did_process_editing`](EditingAdapter::storage_did_process_editing)
/// on the next turn.
#[derive(Debug)]
pub struct DesktopAdapter<W> {
    core: SharedCore<W>,
}

impl<W: NativeTextWidget + 'static> DesktopAdapter<W> {
    /// Wraps `widget`, mirroring `binding`.
    pub fn new(widget: W, binding: TextBinding, queue: UiQueue) -> Self {
        Self {
            core: AdapterCore::new(widget, WidgetFamily::Desktop, binding, queue),
        }
    }
}

fn widget_config<W: NativeTextWidget>(props: &AdapterProps, widget: &W) -> WidgetConfig {
    let overflowing = widget.content_size().height > widget.viewport_size().height;
    let placeholder = props.placeholder.as_ref().map(|text| Placeholder {
        text: text.clone(),
        font: props
            .decoration_map
            .default_font
            .clone()
            .unwrap_or_else(Font::body),
        color: PLACEHOLDER_COLOR,
    });
    WidgetConfig {
        editable: props.is_editable,
        selectable: props.is_selectable,
        line_limit: props.line_limit,
        truncates_tail: props.line_limit.is_bounded(),
        insets: props.insets,
        line_fragment_padding: WidgetFamily::Desktop.line_fragment_padding(),
        draws_background: props.is_editable,
        scroll: ScrollConfig {
            enabled: props.is_scrollable,
            shows_vertical_scroller: props.is_scrollable,
            style: if props.is_scrollable && overflowing {
                ScrollerStyle::Legacy
            } else {
                ScrollerStyle::Overlay
            },
        },
        dynamic_height: false,
        clips_to_bounds: true,
        placeholder,
        autocapitalization: Autocapitalization::default(),
        keyboard_type: KeyboardType::default(),
    }
}

impl<W: NativeTextWidget + 'static> EditingAdapter for DesktopAdapter<W> {
    type Widget = W;

    fn family(&self) -> WidgetFamily {
        WidgetFamily::Desktop
    }

    fn widget(&self) -> Ref<'_, W> {
        Ref::map(self.core.borrow(), |core| &core.widget)
    }

    fn widget_mut(&self) -> RefMut<'_, W> {
        RefMut::map(self.core.borrow_mut(), |core| &mut core.widget)
    }

    fn store(&self) -> Ref<'_, StyledTextStore> {
        Ref::map(self.core.borrow(), |core| &core.store)
    }

    fn focus_state(&self) -> FocusState {
        self.core.borrow().focus.state()
    }

    fn update(&mut self, props: AdapterProps) {
        let mut core = self.core.borrow_mut();
        core.sync_external(&props);
        let config = widget_config(&props, &core.widget);
        core.apply_config(config);
        core.finish_update(props);
    }

    fn should_change_text(&mut self, _range: Range<usize>, replacement: &str) -> bool {
        self.core.borrow().allows(replacement)
    }

    fn text_did_change(&mut self) {
        let mut core = self.core.borrow_mut();
        if core.sync_from_widget() {
            core.reset_typing_attributes();
        }
    }

    fn selection_did_change(&mut self) {
        self.core.borrow_mut().cache_selection();
    }

    fn focus_changed(&mut self, focused: bool) {
        report_focus(&self.core, focused);
    }

    fn handle_command(&mut self, command: KeyCommand) -> bool {
        let direction = match command {
            KeyCommand::InsertTab => FocusDirection::Next,
            KeyCommand::InsertBacktab => FocusDirection::Previous,
            KeyCommand::InsertNewline => return intercept_newline(&self.core),
        };
        let mut core = self.core.borrow_mut();
        if !core.props.focus_by_tab {
            return false;
        }
        // Consumed even when there is nowhere to move.
        if !core.widget.move_focus(direction) {
            log::trace!("no focus target for {direction:?}");
        }
        true
    }

    fn scroll_wheel(&self) -> ScrollDisposition {
        self.core.borrow().scroll_disposition()
    }

    fn content_size_changed(&mut self) {
        // The scroller style follows whether the content overflows.
        let mut core = self.core.borrow_mut();
        if core.pushed_config().is_none() {
            return;
        }
        let config = widget_config(&core.props, &core.widget);
        core.apply_config(config);
    }

    fn storage_did_process_editing(&mut self) {
        let core = self.core.borrow();
        if core.focus.state().is_focused() {
            return;
        }
        core.defer(Rc::downgrade(&self.core), |core| {
            if core.sync_from_widget() {
                log::debug!("picked up an edit made while unfocused");
                core.reset_typing_attributes();
            }
        });
    }
}
