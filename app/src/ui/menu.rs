use eframe::egui::{self, Button};

use crate::command::{CommandId, CommandRegistry};

pub fn menu_bar(
    ui: &mut egui::Ui,
    command_registry: &CommandRegistry,
    triggered_action: &mut Option<CommandId>,
) {
    egui::MenuBar::new().ui(ui, |ui| {
        command_menu(ui, "File", &[CommandId::Quit], command_registry, triggered_action);
        command_menu(
            ui,
            "View",
            &[CommandId::ZoomIn, CommandId::ZoomOut, CommandId::ResetZoom],
            command_registry,
            triggered_action,
        );
    });
}

fn command_menu(
    ui: &mut egui::Ui,
    title: &str,
    commands: &[CommandId],
    command_registry: &CommandRegistry,
    triggered_action: &mut Option<CommandId>,
) {
    ui.menu_button(title, |ui| {
        for cmd_id in commands {
            if let Some(cmd) = command_registry.find(*cmd_id) {
                let button = Button::new(cmd.text).shortcut_text(cmd.shortcut_text);
                if ui.add(button).clicked() {
                    *triggered_action = Some(cmd.id);
                    ui.close();
                }
            }
        }
    });
}
