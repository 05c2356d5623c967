//! Seam between the flow view and whatever owns the graph.

use egui::{Pos2, Rect};
use uuid::Uuid;

use crate::types::{ConnectionView, ItemId, NodeDisplay, PortAddress};

/// Read-only access to the scene.
pub trait FlowSceneSource {
    /// Node ids in drawing order (last is on top).
    fn node_ids(&self) -> Vec<Uuid>;

    fn node_display(&self, id: Uuid) -> Option<NodeDisplay>;

    /// Top-left corner of the node in scene coordinates.
    fn node_position(&self, id: Uuid) -> Option<Pos2>;

    fn connections(&self) -> Vec<ConnectionView>;

    /// Names offered by the creation menu.
    fn registered_model_names(&self) -> Vec<String>;

    fn selected_items(&self) -> Vec<ItemId>;

    fn is_selected(&self, item: ItemId) -> bool {
        self.selected_items().contains(&item)
    }
}

/// Mutation interface for the scene.
pub trait FlowSceneMutator {
    /// Instantiate a registered model and place it at `scene_pos`.
    fn create_node(&mut self, model_name: &str, scene_pos: Pos2) -> Result<Uuid, String>;

    fn remove_node(&mut self, node_id: Uuid) -> Result<(), String>;

    fn move_node(&mut self, node_id: Uuid, scene_pos: Pos2) -> Result<(), String>;

    /// `from` is an output port, `to` an input port.
    fn create_connection(&mut self, from: PortAddress, to: PortAddress) -> Result<Uuid, String>;

    fn delete_connection(&mut self, connection_id: Uuid) -> Result<(), String>;

    fn set_selected(&mut self, item: ItemId, selected: bool);

    fn clear_selection(&mut self);

    fn set_scene_rect(&mut self, rect: Rect);
}
