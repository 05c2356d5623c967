use eframe::egui::{self, Visuals};
use egui_node_editor::{FlowViewState, FlowViewTheme};
use log::{error, info, warn};
use nodes::FlowScene;
use uuid::Uuid;

use crate::command::{CommandId, CommandRegistry};
use crate::config::EditorConfig;
use crate::models::ImageLoaderModel;
use crate::shortcut::ShortcutManager;
use crate::textures::TextureCache;
use crate::ui::menu::menu_bar;
use crate::ui::panels::node_editor::node_editor_panel;
use crate::ui::panels::status_bar::status_bar;

pub struct FlowEditorApp {
    scene: FlowScene,
    view_state: FlowViewState,
    theme: FlowViewTheme,
    textures: TextureCache,
    shortcut_manager: ShortcutManager,
    command_registry: CommandRegistry,
}

impl FlowEditorApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: &EditorConfig) -> Self {
        configure_context(&cc.egui_ctx);

        let app = Self {
            scene: FlowScene::default(),
            view_state: FlowViewState::new(),
            theme: config.theme(),
            textures: TextureCache::default(),
            shortcut_manager: ShortcutManager::new(),
            command_registry: CommandRegistry::new(),
        };
        cc.egui_ctx.request_repaint();
        app
    }

    /// Double-click handler: image sources ask for a file, other nodes ignore it.
    fn activate_node(&mut self, node_id: Uuid) {
        let is_loader = self
            .scene
            .node(node_id)
            .and_then(|n| n.model_as::<ImageLoaderModel>())
            .is_some();
        if !is_loader {
            return;
        }

        let Some(path) = rfd::FileDialog::new()
            .add_filter("Images", &["png", "jpg", "jpeg", "bmp", "gif"])
            .pick_file()
        else {
            return;
        };

        let Some(loader) = self
            .scene
            .node_mut(node_id)
            .and_then(|n| n.model_as_mut::<ImageLoaderModel>())
        else {
            return;
        };
        if let Err(e) = loader.load_file(&path) {
            error!("{:#}", e);
            return;
        }
        if let Err(e) = self.scene.update_node(node_id) {
            warn!("Failed to propagate new image: {}", e);
        }
    }
}

/// Ctrl+=, Ctrl+- and Ctrl+0 drive the canvas zoom, so egui's own UI zoom is disabled.
fn configure_context(ctx: &egui::Context) {
    ctx.set_visuals(Visuals::dark());
    ctx.options_mut(|o| o.zoom_with_keyboard = false);
}

impl eframe::App for FlowEditorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // 1. Shortcuts
        let mut triggered_action = self
            .shortcut_manager
            .handle_shortcuts(ctx, &self.command_registry);

        // 2. Menu Bar
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            menu_bar(ui, &self.command_registry, &mut triggered_action);
        });

        // 3. Status Bar
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            status_bar(ui, &self.scene, &self.view_state);
        });

        // 4. Canvas
        self.textures.sync(ctx, &self.scene);
        let activated = egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                node_editor_panel(
                    ui,
                    &mut self.scene,
                    &mut self.view_state,
                    &self.theme,
                    &self.textures,
                )
            })
            .inner;
        for node_id in activated {
            self.activate_node(node_id);
        }

        // --- Deferred Action Execution ---
        if let Some(action) = triggered_action {
            match action {
                CommandId::ZoomIn => self.view_state.scale_up(),
                CommandId::ZoomOut => self.view_state.scale_down(),
                CommandId::ResetZoom => self.view_state.reset_zoom(),
                CommandId::Quit => {
                    info!("Quit requested");
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eframe::egui::{Key, Modifiers};
    use egui_kittest::Harness;

    #[test]
    fn zoom_shortcuts_leave_ui_scale_alone() {
        let registry = CommandRegistry::new();
        let shortcuts = ShortcutManager::new();
        let mut harness = Harness::builder().build_state(
            move |ctx, fired: &mut Vec<CommandId>| {
                if let Some(command) = shortcuts.handle_shortcuts(ctx, &registry) {
                    fired.push(command);
                }
            },
            Vec::new(),
        );
        configure_context(&harness.ctx);

        for key in [Key::Equals, Key::Minus, Key::Num0, Key::Equals] {
            harness.key_press_modifiers(Modifiers::COMMAND, key);
            harness.step();
        }

        assert_eq!(
            harness.state(),
            &vec![
                CommandId::ZoomIn,
                CommandId::ZoomOut,
                CommandId::ResetZoom,
                CommandId::ZoomIn
            ]
        );
        assert_eq!(harness.ctx.zoom_factor(), 1.0);
    }
}
