pub mod adapter;

use adapter::{SceneMutator, SceneSource};
use egui_node_editor::{FlowView, FlowViewState, FlowViewTheme};
use nodes::FlowScene;
use uuid::Uuid;

use crate::textures::TextureCache;

/// Flow view panel. Returns the nodes double-clicked this frame.
pub fn node_editor_panel(
    ui: &mut egui::Ui,
    scene: &mut FlowScene,
    state: &mut FlowViewState,
    theme: &FlowViewTheme,
    textures: &TextureCache,
) -> Vec<Uuid> {
    let pending = {
        let source = SceneSource {
            scene: &*scene,
            textures,
        };
        FlowView::new(state, theme).show(ui, &source)
    };

    let activated = pending.activated_nodes();
    if !pending.is_empty() {
        let mut mutator = SceneMutator { scene };
        pending.apply(&mut mutator);
    }
    activated
}
