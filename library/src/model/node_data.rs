//! Data flowing between node ports.

use std::any::Any;
use std::fmt::Debug;

use uuid::Uuid;

/// Index of a port on one side of a node.
pub type PortIndex = usize;

/// Side of a node a port lives on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PortType {
    In,
    Out,
}

/// Kind of data carried by a port.
///
/// `id` decides compatibility; `name` is the short label shown next to ports.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct NodeDataType {
    pub id: String,
    pub name: String,
}

impl NodeDataType {
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
        }
    }

    pub fn is_compatible_with(&self, other: &NodeDataType) -> bool {
        self.id == other.id
    }
}

/// A value produced by an output port.
pub trait NodeData: Any + Debug + Send + Sync {
    fn data_type(&self) -> NodeDataType;

    fn as_any(&self) -> &dyn Any;
}

/// Identifies a port on a specific node. The side is implied by where it is used.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PortId {
    pub node_id: Uuid,
    pub index: PortIndex,
}

impl PortId {
    pub fn new(node_id: Uuid, index: PortIndex) -> Self {
        Self { node_id, index }
    }
}
