//! Adapter connecting the `nodes` scene to egui_node_editor traits.

use egui::{Pos2, Rect};
use egui_node_editor::{
    ConnectionView, FlowSceneMutator, FlowSceneSource, ItemId, NodeDisplay, NodeStatus,
    PortAddress, PortInfo, PortSide,
};
use log::debug;
use nodes::{
    FlowScene, NodeDataModel, NodeValidationState, Point, PortId, PortType, SceneItem, SceneRect,
};
use uuid::Uuid;

use crate::textures::TextureCache;

fn to_scene_item(item: ItemId) -> SceneItem {
    match item {
        ItemId::Node(id) => SceneItem::Node(id),
        ItemId::Connection(id) => SceneItem::Connection(id),
    }
}

fn to_item_id(item: SceneItem) -> ItemId {
    match item {
        SceneItem::Node(id) => ItemId::Node(id),
        SceneItem::Connection(id) => ItemId::Connection(id),
    }
}

fn ports(model: &dyn NodeDataModel, port_type: PortType) -> Vec<PortInfo> {
    (0..model.n_ports(port_type))
        .map(|i| {
            PortInfo::new(
                &model.port_caption(port_type, i),
                &model.data_type(port_type, i).id,
            )
        })
        .collect()
}

/// Read-only data source backed by a FlowScene + preview textures.
pub(crate) struct SceneSource<'a> {
    pub(crate) scene: &'a FlowScene,
    pub(crate) textures: &'a TextureCache,
}

impl FlowSceneSource for SceneSource<'_> {
    fn node_ids(&self) -> Vec<Uuid> {
        self.scene.nodes().map(|n| n.id()).collect()
    }

    fn node_display(&self, id: Uuid) -> Option<NodeDisplay> {
        let model = self.scene.node(id)?.model();
        let status = match model.validation_state() {
            NodeValidationState::Valid => NodeStatus::Valid,
            NodeValidationState::Warning => NodeStatus::Warning,
            NodeValidationState::Error => NodeStatus::Error,
        };
        Some(NodeDisplay {
            caption: model.caption(),
            caption_visible: model.caption_visible(),
            inputs: ports(model, PortType::In),
            outputs: ports(model, PortType::Out),
            status,
            status_message: model.validation_message(),
            description: model.description(),
            preview: self.textures.preview(id),
        })
    }

    fn node_position(&self, id: Uuid) -> Option<Pos2> {
        let p = self.scene.node(id)?.position();
        Some(Pos2::new(p.x, p.y))
    }

    fn connections(&self) -> Vec<ConnectionView> {
        self.scene
            .connections()
            .iter()
            .map(|c| ConnectionView {
                id: c.id,
                from_node: c.out.node_id,
                from_port: c.out.index,
                to_node: c.input.node_id,
                to_port: c.input.index,
                type_id: c.data_type.id.clone(),
            })
            .collect()
    }

    fn registered_model_names(&self) -> Vec<String> {
        self.scene.registry().registered_model_names()
    }

    fn selected_items(&self) -> Vec<ItemId> {
        self.scene
            .selected_items()
            .into_iter()
            .map(to_item_id)
            .collect()
    }

    fn is_selected(&self, item: ItemId) -> bool {
        self.scene.is_selected(to_scene_item(item))
    }
}

/// Mutator applying view actions to a FlowScene.
pub(crate) struct SceneMutator<'a> {
    pub(crate) scene: &'a mut FlowScene,
}

impl FlowSceneMutator for SceneMutator<'_> {
    fn create_node(&mut self, model_name: &str, scene_pos: Pos2) -> Result<Uuid, String> {
        let node = self
            .scene
            .create_node_by_name(model_name)
            .map_err(|e| e.to_string())?;
        node.set_position(Point::new(scene_pos.x, scene_pos.y));
        Ok(node.id())
    }

    fn remove_node(&mut self, node_id: Uuid) -> Result<(), String> {
        self.scene.remove_node(node_id).map_err(|e| e.to_string())
    }

    fn move_node(&mut self, node_id: Uuid, scene_pos: Pos2) -> Result<(), String> {
        let node = self
            .scene
            .node_mut(node_id)
            .ok_or_else(|| format!("Node not found: {}", node_id))?;
        node.set_position(Point::new(scene_pos.x, scene_pos.y));
        Ok(())
    }

    fn create_connection(&mut self, from: PortAddress, to: PortAddress) -> Result<Uuid, String> {
        if from.side != PortSide::Out || to.side != PortSide::In {
            return Err("Connections run from an output port to an input port".to_string());
        }
        self.scene
            .create_connection(
                PortId::new(from.node_id, from.index),
                PortId::new(to.node_id, to.index),
            )
            .map_err(|e| e.to_string())
    }

    fn delete_connection(&mut self, connection_id: Uuid) -> Result<(), String> {
        self.scene
            .delete_connection(connection_id)
            .map_err(|e| e.to_string())
    }

    fn set_selected(&mut self, item: ItemId, selected: bool) {
        if !self.scene.set_selected(to_scene_item(item), selected) {
            debug!("Ignoring selection of missing item {:?}", item);
        }
    }

    fn clear_selection(&mut self) {
        self.scene.clear_selection();
    }

    fn set_scene_rect(&mut self, rect: Rect) {
        self.scene.set_scene_rect(SceneRect::new(
            rect.min.x,
            rect.min.y,
            rect.width(),
            rect.height(),
        ));
    }
}
