// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::cell::{Ref, RefMut};
use std::ops::Range;
use std::rc::Rc;

use decorated_text::StyledTextStore;
use peniko::kurbo::Size;

use super::shared::{intercept_newline, report_focus, AdapterCore, SharedCore};
use super::{AdapterProps, EditingAdapter, KeyCommand, ScrollDisposition};
use crate::widget::{NativeTextWidget, ScrollConfig, ScrollerStyle, WidgetConfig};
use crate::{FocusState, TextBinding, UiQueue, WidgetFamily};

/// Adapter for touch text views that grow with their content.
///
/// The widget has a single selection range and draws no placeholder; the
/// composite control overlays one. Non-scrolling views report their content
/// height as intrinsic height, so content size changes invalidate it.
#[derive(Debug)]
pub struct MobileAdapter<W> {
    core: SharedCore<W>,
    last_content_size: Option<Size>,
}

impl<W: NativeTextWidget + 'static> MobileAdapter<W> {
    /// Wraps `widget`, mirroring `binding`.
    pub fn new(widget: W, binding: TextBinding, queue: UiQueue) -> Self {
        Self {
            core: AdapterCore::new(widget, WidgetFamily::Mobile, binding, queue),
            last_content_size: None,
        }
    }
}

fn widget_config(props: &AdapterProps) -> WidgetConfig {
    WidgetConfig {
        editable: props.is_editable,
        selectable: props.is_selectable,
        line_limit: props.line_limit,
        truncates_tail: props.line_limit.is_bounded(),
        insets: props.insets,
        line_fragment_padding: WidgetFamily::Mobile.line_fragment_padding(),
        draws_background: false,
        scroll: ScrollConfig {
            // Scrolling stays on so the widget can scroll the caret into view.
            enabled: true,
            shows_vertical_scroller: props.is_scrollable,
            style: ScrollerStyle::Overlay,
        },
        dynamic_height: !props.is_scrollable,
        clips_to_bounds: props.is_scrollable,
        placeholder: None,
        autocapitalization: props.autocapitalization,
        keyboard_type: props.keyboard_type,
    }
}

impl<W: NativeTextWidget + 'static> EditingAdapter for MobileAdapter<W> {
    type Widget = W;

    fn family(&self) -> WidgetFamily {
        WidgetFamily::Mobile
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
        core.apply_config(widget_config(&props));
        // A static label never reports content size changes by itself.
        if !props.is_editable && !props.is_scrollable {
            core.widget.invalidate_intrinsic_size();
        }
        core.finish_update(props);
    }

    fn should_change_text(&mut self, _range: Range<usize>, replacement: &str) -> bool {
        let mut core = self.core.borrow_mut();
        if !core.allows(replacement) {
            return false;
        }
        core.reset_typing_attributes();
        true
    }

    fn text_did_change(&mut self) {
        let mut core = self.core.borrow_mut();
        core.sync_from_widget();
        core.widget.invalidate_intrinsic_size();
    }

    fn selection_did_change(&mut self) {
        self.core.borrow_mut().cache_selection();
    }

    fn focus_changed(&mut self, focused: bool) {
        report_focus(&self.core, focused);
    }

    fn handle_command(&mut self, command: KeyCommand) -> bool {
        match command {
            // Touch keyboards have no focus order to walk.
            KeyCommand::InsertTab | KeyCommand::InsertBacktab => false,
            KeyCommand::InsertNewline => intercept_newline(&self.core),
        }
    }

    fn scroll_wheel(&self) -> ScrollDisposition {
        self.core.borrow().scroll_disposition()
    }

    fn content_size_changed(&mut self) {
        let core = self.core.borrow();
        let size = core.widget.content_size();
        if self.last_content_size == Some(size) {
            return;
        }
        self.last_content_size = Some(size);
        let dynamic = core
            .pushed_config()
            .is_some_and(|config| config.dynamic_height);
        if dynamic {
            // Invalidating during the widget's own layout pass is ignored.
            core.defer(Rc::downgrade(&self.core), |core| {
                core.widget.invalidate_intrinsic_size();
            });
        }
    }

    fn storage_did_process_editing(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::MobileAdapter;
    use crate::adapter::{AdapterProps, EditingAdapter, KeyCommand};
    use crate::testing::HeadlessTextWidget;
    use crate::widget::NativeTextWidget;
    use crate::{KeyboardType, TextBinding, UiQueue};
    use peniko::kurbo::Size;

    fn adapter(text: &str) -> (MobileAdapter<HeadlessTextWidget>, UiQueue) {
        let queue = UiQueue::new();
        let mut adapter =
            MobileAdapter::new(HeadlessTextWidget::new(), TextBinding::new(text), queue.clone());
        adapter.update(AdapterProps::default());
        (adapter, queue)
    }

    #[test]
    fn tab_is_inserted() {
        let (mut adapter, _) = adapter("");
        adapter.key_down(KeyCommand::InsertTab);
        assert_eq!(adapter.widget().text(), "\t");
        assert!(adapter.widget().focus_moves().is_empty());
    }

    #[test]
    fn keyboard_settings_are_forwarded() {
        let (mut adapter, _) = adapter("");
        adapter.update(AdapterProps {
            keyboard_type: KeyboardType::EmailAddress,
            placeholder: Some("Email".into()),
            ..AdapterProps::default()
        });
        let widget = adapter.widget();
        let config = widget.config().unwrap();
        assert_eq!(config.keyboard_type, KeyboardType::EmailAddress);
        assert!(config.placeholder.is_none());
        assert!(config.dynamic_height);
    }

    #[test]
    fn content_growth_invalidates_on_next_turn() {
        let (mut adapter, queue) = adapter("hi");
        let before = adapter.widget().intrinsic_size_invalidations();
        adapter
            .widget_mut()
            .set_content_size(Size::new(100.0, 40.0));
        adapter.content_size_changed();
        assert_eq!(adapter.widget().intrinsic_size_invalidations(), before);
        queue.run_pending();
        assert_eq!(adapter.widget().intrinsic_size_invalidations(), before + 1);

        // Same size again: nothing to do.
        adapter.content_size_changed();
        assert_eq!(queue.pending(), 0);
    }

    #[test]
    fn typing_invalidates_intrinsic_size() {
        let (mut adapter, _) = adapter("");
        let before = adapter.widget().intrinsic_size_invalidations();
        adapter.insert_text("a");
        assert_eq!(adapter.widget().intrinsic_size_invalidations(), before + 1);
    }
}
