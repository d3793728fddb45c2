/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Keyboard shortcuts for the editor.
//!
//! Pointer interaction (drag, connect, pan) reaches the app as intents from
//! the canvas layer; only key presses are mapped here.

use keyboard_types::{Code, Key, KeyState, KeyboardEvent, Modifiers, NamedKey};

use crate::app::MindMapIntent;

/// Keyboard actions collected from one key press.
///
/// Detection (which keys were pressed) is kept apart from application
/// (which intents that produces) so both halves are testable on their own.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct KeyboardActions {
    pub undo: bool,
    pub redo: bool,
    pub delete_selected: bool,
    pub open_search: bool,
    pub fit_view: bool,
}

/// Collect actions from a key event. Releases, IME composition and any
/// event arriving while a text field has focus produce nothing.
pub fn collect_actions(event: &KeyboardEvent, text_input_focused: bool) -> KeyboardActions {
    if event.state != KeyState::Down || event.is_composing {
        return KeyboardActions::default();
    }
    collect_key_actions(&event.key, event.code, event.modifiers, text_input_focused)
}

pub fn collect_key_actions(
    key: &Key,
    code: Code,
    modifiers: Modifiers,
    text_input_focused: bool,
) -> KeyboardActions {
    let mut actions = KeyboardActions::default();
    // Label editing owns the keyboard; Backspace there must not delete nodes.
    if text_input_focused {
        return actions;
    }

    // Ctrl on most platforms, Cmd on macOS.
    let command = modifiers.intersects(Modifiers::CONTROL | Modifiers::META);
    let shift = modifiers.contains(Modifiers::SHIFT);

    match key {
        Key::Named(NamedKey::Delete | NamedKey::Backspace) if !command => {
            actions.delete_selected = true;
        },
        Key::Character(text) if command => {
            if text.eq_ignore_ascii_case("z") {
                if shift {
                    actions.redo = true;
                } else {
                    actions.undo = true;
                }
            } else if text.eq_ignore_ascii_case("y") {
                actions.redo = true;
            } else if text.eq_ignore_ascii_case("f") {
                actions.open_search = true;
            }
        },
        // Shift+1 arrives as "!" on most layouts; match the physical key too.
        Key::Character(text) if shift && (text == "!" || code == Code::Digit1) => {
            actions.fit_view = true;
        },
        _ => {},
    }

    actions
}

/// Convert keyboard actions to intents without applying them.
pub fn intents_from_actions(actions: &KeyboardActions) -> Vec<MindMapIntent> {
    let mut intents = Vec::new();
    if actions.undo {
        intents.push(MindMapIntent::Undo);
    }
    if actions.redo {
        intents.push(MindMapIntent::Redo);
    }
    if actions.delete_selected {
        intents.push(MindMapIntent::DeleteSelection);
    }
    if actions.open_search {
        intents.push(MindMapIntent::RequestSearchFocus);
    }
    if actions.fit_view {
        intents.push(MindMapIntent::RequestFitView);
    }
    intents
}
