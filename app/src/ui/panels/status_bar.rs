use egui_node_editor::{DragMode, FlowViewState};
use nodes::FlowScene;

/// One-line summary of the scene and the view.
pub fn status_text(scene: &FlowScene, state: &FlowViewState) -> String {
    let mode = match state.drag_mode {
        DragMode::ScrollPan => "Pan",
        DragMode::RubberBandSelect => "Select",
    };
    format!(
        "Nodes: {}  |  Connections: {}  |  Selected: {}  |  Zoom: {:.0}%  |  Drag: {}",
        scene.node_count(),
        scene.connections().len(),
        scene.selected_items().len(),
        state.zoom() * 100.0,
        mode
    )
}

pub fn status_bar(ui: &mut egui::Ui, scene: &FlowScene, state: &FlowViewState) {
    ui.horizontal(|ui| {
        ui.label(status_text(scene, state));
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use egui_kittest::kittest::Queryable;
    use egui_kittest::Harness;
    use nodes::DataModelRegistry;

    use crate::models::{register_data_models, ImageShowModel};

    fn scene_with_one_node() -> FlowScene {
        let registry = DataModelRegistry::new();
        register_data_models(&registry).expect("register models");
        let mut scene = FlowScene::new(Arc::new(registry));
        let model = scene.registry().create(ImageShowModel::NAME).expect("model");
        scene.create_node(model);
        scene
    }

    #[test]
    fn status_reports_counts_zoom_and_mode() {
        let scene = scene_with_one_node();
        let mut state = FlowViewState::new();
        assert_eq!(
            status_text(&scene, &state),
            "Nodes: 1  |  Connections: 0  |  Selected: 0  |  Zoom: 100%  |  Drag: Pan"
        );
        state.set_shift_held(true);
        assert!(status_text(&scene, &state).ends_with("Drag: Select"));
    }

    #[test]
    fn status_bar_renders_label() {
        let scene = scene_with_one_node();
        let state = FlowViewState::new();
        let expected = status_text(&scene, &state);
        let harness = Harness::builder()
            .with_size(egui::vec2(600.0, 40.0))
            .build_ui(move |ui| {
                status_bar(ui, &scene, &state);
            });
        assert!(harness.query_by_label(&expected).is_some());
    }
}
