use eframe::egui::{Context, Modifiers};

use crate::command::{CommandId, CommandRegistry};

pub struct ShortcutManager;

impl ShortcutManager {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_shortcuts(&self, ctx: &Context, registry: &CommandRegistry) -> Option<CommandId> {
        let wants_keyboard_input = ctx.wants_keyboard_input();

        for cmd in &registry.commands {
            let Some((modifiers, key)) = cmd.shortcut else {
                continue;
            };
            // While typing, only shortcuts with a strong modifier fire.
            if wants_keyboard_input && !(modifiers.command || modifiers.ctrl || modifiers.alt) {
                continue;
            }
            if ctx.input(|i| i.key_pressed(key) && modifiers_match(i.modifiers, modifiers)) {
                return Some(cmd.id);
            }
        }
        None
    }
}

fn modifiers_match(event_modifiers: Modifiers, expected_modifiers: Modifiers) -> bool {
    if event_modifiers == expected_modifiers {
        return true;
    }

    // COMMAND covers Ctrl (Win/Linux) or Cmd (Mac); the event carries both
    // the logical and the physical flag, so only Alt and Shift must agree.
    if expected_modifiers.command {
        return event_modifiers.command
            && event_modifiers.alt == expected_modifiers.alt
            && event_modifiers.shift == expected_modifiers.shift;
    }

    false
}
