//! Links between an output port and an input port.

use uuid::Uuid;

use super::node_data::{NodeDataType, PortId};

/// An edge in the flow graph. Data travels from `out` to `input`.
#[derive(Clone, Debug, PartialEq)]
pub struct Connection {
    pub id: Uuid,
    /// Output port on the upstream node.
    pub out: PortId,
    /// Input port on the downstream node.
    pub input: PortId,
    /// Type shared by both ends, fixed when the connection was validated.
    pub data_type: NodeDataType,
}

impl Connection {
    pub fn new(out: PortId, input: PortId, data_type: NodeDataType) -> Self {
        Self {
            id: Uuid::new_v4(),
            out,
            input,
            data_type,
        }
    }

    pub fn touches(&self, node_id: Uuid) -> bool {
        self.out.node_id == node_id || self.input.node_id == node_id
    }
}
