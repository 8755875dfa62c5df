// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Synchronization between the binding and the widget, and widget events.

use std::cell::Cell;
use std::rc::Rc;

use resizing_text::widget::NativeTextWidget;
use resizing_text::{KeyCommand, ScrollDisposition, TextBinding, WidgetFamily};

use crate::test_name;
use crate::util::TestEnv;

const FAMILIES: [WidgetFamily; 2] = [WidgetFamily::Desktop, WidgetFamily::Mobile];

#[test]
fn adapter_newlines_filtered_from_inserted_text() {
    for family in FAMILIES {
        let env = TestEnv::new(test_name!(), family);
        let binding = TextBinding::new("");
        let mut control = env.mount(env.view(&binding).can_have_newlines(false));

        control.adapter_mut().insert_text("a\nb");
        assert_eq!(binding.get(), "ab", "{family:?}");
        assert_eq!(control.adapter().store().text(), "ab");
        assert_eq!(control.adapter().widget().selected_ranges().as_slice(), [2..2]);

        control.adapter_mut().key_down(KeyCommand::InsertNewline);
        assert_eq!(binding.get(), "ab", "{family:?}");
    }
}

#[test]
fn adapter_carriage_returns_filtered_from_pasted_text() {
    for family in FAMILIES {
        let env = TestEnv::new(test_name!(), family);
        let binding = TextBinding::new("");
        let mut control = env.mount(env.view(&binding).can_have_newlines(false));

        control.adapter_mut().insert_text("a\r\nb");
        assert_eq!(binding.get(), "ab", "{family:?}");
        assert_eq!(control.adapter().widget().selected_ranges().as_slice(), [2..2]);

        control.adapter_mut().insert_text("\r");
        assert_eq!(binding.get(), "ab", "{family:?}");
    }
}

#[test]
fn adapter_newlines_filtered_from_bound_text() {
    let env = TestEnv::new(test_name!(), WidgetFamily::Desktop);
    let binding = TextBinding::new("one\ntwo");
    let control = env.mount(env.view(&binding).can_have_newlines(false));
    assert_eq!(control.adapter().widget().text(), "onetwo");
    assert_eq!(binding.get(), "onetwo");
}

#[test]
fn adapter_newline_callback_intercepts_return() {
    for family in FAMILIES {
        let env = TestEnv::new(test_name!(), family);
        let binding = TextBinding::new("hi");
        let submitted = Rc::new(Cell::new(0));
        let counter = submitted.clone();
        let view = env.view(&binding).on_insert_newline(move || {
            counter.set(counter.get() + 1);
            true
        });
        let mut control = env.mount(view);
        control.adapter_mut().key_down(KeyCommand::InsertNewline);
        assert_eq!(submitted.get(), 1);
        assert_eq!(binding.get(), "hi", "{family:?}");

        control.update(env.view(&binding).on_insert_newline(|| false));
        control.adapter_mut().key_down(KeyCommand::InsertNewline);
        assert_eq!(binding.get(), "hi\n", "{family:?}");
    }
}

#[test]
fn adapter_selection_kept_for_same_text() {
    let env = TestEnv::new(test_name!(), WidgetFamily::Desktop);
    let binding = TextBinding::new("hello");
    let mut control = env.mount(env.view(&binding));
    control.adapter().widget_mut().set_selected_ranges(&[2..5]);
    control.adapter_mut().selection_did_change();

    binding.set("hello");
    assert!(!control.update(env.view(&binding)));
    // Force a pass with the same text.
    assert!(control.update(env.view(&binding).placeholder("Type here")));
    let widget = control.adapter().widget();
    assert_eq!(widget.selected_ranges().as_slice(), [2..5]);
    assert_eq!(widget.set_text_calls(), 1);
}

#[test]
fn adapter_selection_clamped_for_shorter_text() {
    for family in FAMILIES {
        let env = TestEnv::new(test_name!(), family);
        let binding = TextBinding::new("hello");
        let mut control = env.mount(env.view(&binding));
        control.adapter().widget_mut().set_selected_ranges(&[2..5]);
        control.adapter_mut().selection_did_change();

        binding.set("help");
        assert!(control.update(env.view(&binding)));
        let widget = control.adapter().widget();
        assert_eq!(widget.text(), "help");
        assert_eq!(widget.selected_ranges().as_slice(), [2..4], "{family:?}");
    }
}

#[test]
fn adapter_mobile_keeps_single_selection() {
    let env = TestEnv::new(test_name!(), WidgetFamily::Mobile);
    let binding = TextBinding::new("hello world");
    let mut control = env.mount(env.view(&binding));
    control
        .adapter()
        .widget_mut()
        .set_selected_ranges(&[0..1, 6..11]);
    control.adapter_mut().selection_did_change();

    binding.set("hello there");
    control.update(env.view(&binding));
    assert_eq!(control.adapter().widget().selected_ranges().as_slice(), [0..1]);
}

#[test]
fn adapter_focus_transitions_reported_once() {
    for family in FAMILIES {
        let env = TestEnv::new(test_name!(), family);
        let binding = TextBinding::new("text");
        let mut control = env.mount(env.view(&binding));

        control.focus();
        control.focus();
        control.blur();
        control.blur();
        assert_eq!(env.focus_events(), [true, false], "{family:?}");
        assert!(!control.is_focused());
    }
}

#[test]
fn adapter_selection_cleared_after_focus_loss() {
    let env = TestEnv::new(test_name!(), WidgetFamily::Desktop);
    let binding = TextBinding::new("hello");
    let mut control = env.mount(env.view(&binding));
    control.focus();
    control.adapter().widget_mut().set_selected_ranges(&[1..4]);
    control.adapter_mut().selection_did_change();
    control.blur();

    assert_eq!(env.pending(), 1);
    assert_eq!(env.next_turn(), 1);
    assert_eq!(control.adapter().widget().selected_ranges().as_slice(), [0..0]);

    // A later external update does not bring the old selection back.
    binding.set("hello!");
    control.update(env.view(&binding));
    assert_eq!(control.adapter().widget().selected_ranges().as_slice(), [6..6]);
}

#[test]
fn adapter_deferred_work_is_dropped_with_control() {
    let env = TestEnv::new(test_name!(), WidgetFamily::Desktop);
    let binding = TextBinding::new("hello");
    let mut control = env.mount(env.view(&binding));
    control.focus();
    control.blur();
    drop(control);
    assert_eq!(env.next_turn(), 1);
}

#[test]
fn adapter_tab_traversal() {
    let env = TestEnv::new(test_name!(), WidgetFamily::Desktop);
    let binding = TextBinding::new("");
    let mut control = env.mount(env.view(&binding));
    control.adapter_mut().key_down(KeyCommand::InsertTab);
    assert_eq!(control.adapter().widget().focus_moves().len(), 1);
    assert_eq!(binding.get(), "");

    control.update(env.view(&binding).focus_by_tab(false));
    control.adapter_mut().key_down(KeyCommand::InsertTab);
    assert_eq!(binding.get(), "\t");
}

#[test]
fn adapter_tab_inserts_on_mobile() {
    let env = TestEnv::new(test_name!(), WidgetFamily::Mobile);
    let binding = TextBinding::new("");
    let mut control = env.mount(env.view(&binding).focus_by_tab(true));
    control.adapter_mut().key_down(KeyCommand::InsertTab);
    assert_eq!(binding.get(), "\t");
}

#[test]
fn adapter_scroll_forwarding() {
    for family in FAMILIES {
        let env = TestEnv::new(test_name!(), family);
        let binding = TextBinding::new("");
        let mut control = env.mount(env.view(&binding));
        assert_eq!(control.adapter().scroll_wheel(), ScrollDisposition::ForwardToParent);
        control.update(env.view(&binding).scrollable(true));
        assert_eq!(control.adapter().scroll_wheel(), ScrollDisposition::Consume);
    }
}

#[test]
fn adapter_chrome_follows_editability() {
    let env = TestEnv::new(test_name!(), WidgetFamily::Desktop);
    let binding = TextBinding::new("");
    let mut control = env.mount(env.view(&binding));
    assert!(control.adapter().widget().config().unwrap().draws_background);
    control.update(env.view(&binding).editable(false));
    let widget = control.adapter().widget();
    let config = widget.config().unwrap();
    assert!(!config.draws_background);
    assert!(!config.editable);
}

#[test]
fn adapter_configuration_pushed_only_on_change() {
    let env = TestEnv::new(test_name!(), WidgetFamily::Desktop);
    let binding = TextBinding::new("a");
    let mut control = env.mount(env.view(&binding));
    let calls = control.adapter().widget().configure_calls();
    binding.set("ab");
    control.update(env.view(&binding));
    assert_eq!(control.adapter().widget().configure_calls(), calls);
    control.update(env.view(&binding).selectable(false));
    assert_eq!(control.adapter().widget().configure_calls(), calls + 1);
}
