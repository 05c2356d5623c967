//! Lightweight data types exchanged between the view and the scene.

use uuid::Uuid;

/// Selectable scene item, as seen by the view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ItemId {
    Node(Uuid),
    Connection(Uuid),
}

/// Which side of a node a port sits on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PortSide {
    In,
    Out,
}

impl PortSide {
    pub fn opposite(self) -> Self {
        match self {
            PortSide::In => PortSide::Out,
            PortSide::Out => PortSide::In,
        }
    }
}

/// A concrete port on a concrete node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PortAddress {
    pub node_id: Uuid,
    pub side: PortSide,
    pub index: usize,
}

/// Information about a port for rendering.
#[derive(Clone, Debug)]
pub struct PortInfo {
    pub caption: String,
    /// Data type id, used for colouring.
    pub type_id: String,
}

impl PortInfo {
    pub fn new(caption: &str, type_id: &str) -> Self {
        Self {
            caption: caption.to_string(),
            type_id: type_id.to_string(),
        }
    }
}

/// Validation badge drawn under a node.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NodeStatus {
    #[default]
    Valid,
    Warning,
    Error,
}

/// An image drawn inside the node body.
#[derive(Clone, Copy, Debug)]
pub struct NodePreview {
    pub texture: egui::TextureId,
    /// Size in scene units.
    pub size: egui::Vec2,
}

/// How a node should be displayed.
#[derive(Clone, Debug, Default)]
pub struct NodeDisplay {
    pub caption: String,
    pub caption_visible: bool,
    pub inputs: Vec<PortInfo>,
    pub outputs: Vec<PortInfo>,
    pub status: NodeStatus,
    pub status_message: String,
    pub description: Option<String>,
    pub preview: Option<NodePreview>,
}

/// A connection between two ports (view data).
#[derive(Clone, Debug)]
pub struct ConnectionView {
    pub id: Uuid,
    pub from_node: Uuid,
    pub from_port: usize,
    pub to_node: Uuid,
    pub to_port: usize,
    pub type_id: String,
}
