// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::cell::RefCell;
use std::rc::Rc;

use resizing_text::testing::{FixedAdvanceMeasurer, HeadlessTextWidget};
use resizing_text::widget::NativeTextWidget;
use resizing_text::{
    Font, MountedTextView, ProposedSize, ResizingTextView, TextBinding, UiQueue, WidgetFamily,
};

/// Font used by every test control: 5 px advance, 12 px lines.
pub(crate) const TEST_FONT_SIZE: f32 = 10.0;

pub(crate) struct TestEnv {
    test_name: String,
    family: WidgetFamily,
    queue: UiQueue,
    focus_events: Rc<RefCell<Vec<bool>>>,
}

impl TestEnv {
    pub(crate) fn new(test_name: &str, family: WidgetFamily) -> Self {
        log::debug!("{test_name}: mounting on {family:?}");
        Self {
            test_name: test_name.to_owned(),
            family,
            queue: UiQueue::new(),
            focus_events: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub(crate) fn font() -> Font {
        Font::new("mono", TEST_FONT_SIZE)
    }

    /// A control on `binding` in the test font that records focus callbacks.
    pub(crate) fn view(&self, binding: &TextBinding) -> ResizingTextView {
        let events = self.focus_events.clone();
        ResizingTextView::new(binding.clone())
            .font(Self::font())
            .on_focus_changed(move |focused| events.borrow_mut().push(focused))
    }

    pub(crate) fn mount(&self, view: ResizingTextView) -> MountedTextView<HeadlessTextWidget> {
        self.mount_on(view, HeadlessTextWidget::new())
    }

    pub(crate) fn mount_on<W: NativeTextWidget + 'static>(
        &self,
        view: ResizingTextView,
        widget: W,
    ) -> MountedTextView<W> {
        MountedTextView::new(self.family, view, widget, self.queue.clone())
    }

    pub(crate) fn size(
        &self,
        control: &mut MountedTextView<HeadlessTextWidget>,
        proposal: ProposedSize,
    ) -> (f64, f64) {
        let size = control.intrinsic_size(&mut FixedAdvanceMeasurer::new(), proposal);
        log::debug!("{}: measured {size:?}", self.test_name);
        (size.width, size.height)
    }

    /// Runs the work deferred to the next UI turn.
    pub(crate) fn next_turn(&self) -> usize {
        self.queue.run_pending()
    }

    pub(crate) fn pending(&self) -> usize {
        self.queue.pending()
    }

    pub(crate) fn focus_events(&self) -> Vec<bool> {
        self.focus_events.borrow().clone()
    }
}
