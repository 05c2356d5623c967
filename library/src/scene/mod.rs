//! The scene: nodes, connections, selection.

mod dataflow;
mod selection;

pub use selection::SceneItem;

use std::collections::HashMap;
use std::sync::Arc;

use log::{debug, warn};
use uuid::Uuid;

use crate::error::NodesError;
use crate::graph_analysis;
use crate::model::connection::Connection;
use crate::model::data_model::NodeDataModel;
use crate::model::geometry::SceneRect;
use crate::model::node::Node;
use crate::model::node_data::PortId;
use crate::registry::{DataModelRegistry, global_registry};
use selection::Selection;

/// Owns every node and connection of one flow graph.
pub struct FlowScene {
    registry: Arc<DataModelRegistry>,
    nodes: HashMap<Uuid, Node>,
    /// Creation order, also the drawing order.
    node_order: Vec<Uuid>,
    connections: Vec<Connection>,
    selection: Selection,
    scene_rect: SceneRect,
}

impl FlowScene {
    pub fn new(registry: Arc<DataModelRegistry>) -> Self {
        Self {
            registry,
            nodes: HashMap::new(),
            node_order: Vec::new(),
            connections: Vec::new(),
            selection: Selection::default(),
            scene_rect: SceneRect::default(),
        }
    }

    pub fn registry(&self) -> &DataModelRegistry {
        &self.registry
    }

    // -----------------------------------------------------------------------
    // Nodes
    // -----------------------------------------------------------------------

    /// Place a new node wrapping `model` at the scene origin.
    pub fn create_node(&mut self, model: Box<dyn NodeDataModel>) -> &mut Node {
        let node = Node::new(model);
        let id = node.id();
        debug!("Created node {} ({})", id, node.model().name());
        self.node_order.push(id);
        self.nodes.entry(id).or_insert(node)
    }

    /// Instantiate the model registered as `name` and place it in the scene.
    pub fn create_node_by_name(&mut self, name: &str) -> Result<&mut Node, NodesError> {
        let model = self.registry.create(name).ok_or_else(|| {
            warn!("Model not found: {}", name);
            NodesError::ModelNotFound(name.to_string())
        })?;
        Ok(self.create_node(model))
    }

    /// Remove a node together with every connection attached to it.
    pub fn remove_node(&mut self, node_id: Uuid) -> Result<(), NodesError> {
        if !self.nodes.contains_key(&node_id) {
            return Err(NodesError::NodeNotFound(node_id));
        }

        let attached: Vec<Uuid> = self
            .connections
            .iter()
            .filter(|c| c.touches(node_id))
            .map(|c| c.id)
            .collect();
        for conn_id in attached {
            self.delete_connection(conn_id)?;
        }

        self.selection.remove(&SceneItem::Node(node_id));
        self.node_order.retain(|id| *id != node_id);
        self.nodes.remove(&node_id);
        debug!("Removed node {}", node_id);
        Ok(())
    }

    pub fn node(&self, node_id: Uuid) -> Option<&Node> {
        self.nodes.get(&node_id)
    }

    pub fn node_mut(&mut self, node_id: Uuid) -> Option<&mut Node> {
        self.nodes.get_mut(&node_id)
    }

    /// Nodes in drawing order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.node_order.iter().filter_map(|id| self.nodes.get(id))
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Re-deliver a node's outputs after its model changed outside the scene.
    pub fn update_node(&mut self, node_id: Uuid) -> Result<(), NodesError> {
        if !self.nodes.contains_key(&node_id) {
            return Err(NodesError::NodeNotFound(node_id));
        }
        dataflow::propagate_from(self, node_id);
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Connections
    // -----------------------------------------------------------------------

    /// Link an output port to an input port and push the current value through.
    pub fn create_connection(&mut self, out: PortId, input: PortId) -> Result<Uuid, NodesError> {
        let data_type = graph_analysis::validate_connection(self, out, input)?;
        let conn = Connection::new(out, input, data_type);
        let conn_id = conn.id;
        self.connections.push(conn);
        debug!(
            "Connected {}:{} -> {}:{}",
            out.node_id, out.index, input.node_id, input.index
        );

        dataflow::propagate_from(self, out.node_id);
        Ok(conn_id)
    }

    /// Remove a connection; the former input receives `None`.
    pub fn delete_connection(&mut self, connection_id: Uuid) -> Result<(), NodesError> {
        let pos = self
            .connections
            .iter()
            .position(|c| c.id == connection_id)
            .ok_or(NodesError::ConnectionNotFound(connection_id))?;
        let conn = self.connections.remove(pos);
        self.selection.remove(&SceneItem::Connection(connection_id));

        let target = conn.input.node_id;
        if let Some(node) = self.nodes.get_mut(&target) {
            node.model_mut().set_in_data(None, conn.input.index);
            dataflow::propagate_from(self, target);
        }
        debug!("Deleted connection {}", connection_id);
        Ok(())
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    pub fn connection(&self, connection_id: Uuid) -> Option<&Connection> {
        self.connections.iter().find(|c| c.id == connection_id)
    }

    pub fn connections_of_node(&self, node_id: Uuid) -> Vec<&Connection> {
        self.connections.iter().filter(|c| c.touches(node_id)).collect()
    }

    pub fn connection_at_input(&self, input: PortId) -> Option<&Connection> {
        self.connections.iter().find(|c| c.input == input)
    }

    // -----------------------------------------------------------------------
    // Selection
    // -----------------------------------------------------------------------

    pub fn selected_items(&self) -> Vec<SceneItem> {
        self.selection.items()
    }

    pub fn is_selected(&self, item: SceneItem) -> bool {
        self.selection.contains(&item)
    }

    /// Returns false when the item does not exist.
    pub fn set_selected(&mut self, item: SceneItem, selected: bool) -> bool {
        let exists = match item {
            SceneItem::Node(id) => self.nodes.contains_key(&id),
            SceneItem::Connection(id) => self.connection(id).is_some(),
        };
        if !exists {
            return false;
        }
        if selected {
            self.selection.insert(item);
        } else {
            self.selection.remove(&item);
        }
        true
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    // -----------------------------------------------------------------------
    // Scene rectangle
    // -----------------------------------------------------------------------

    pub fn set_scene_rect(&mut self, rect: SceneRect) {
        self.scene_rect = rect;
    }

    pub fn scene_rect(&self) -> SceneRect {
        self.scene_rect
    }
}

impl Default for FlowScene {
    fn default() -> Self {
        Self::new(global_registry())
    }
}
