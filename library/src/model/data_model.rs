//! Behaviour of a node type.

use std::any::Any;
use std::sync::Arc;

use super::node_data::{NodeData, NodeDataType, PortIndex, PortType};

/// Validation status reported by a model, shown under the node.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NodeValidationState {
    #[default]
    Valid,
    Warning,
    Error,
}

/// Implemented by every node type that can be registered and placed in a scene.
///
/// Port layout must stay fixed for the lifetime of an instance; connection
/// validation relies on `n_ports` and `data_type` being stable.
pub trait NodeDataModel: Any {
    /// Unique name used as the registry key and shown in the creation menu.
    fn name(&self) -> String;

    /// Title drawn in the node header.
    fn caption(&self) -> String {
        self.name()
    }

    fn caption_visible(&self) -> bool {
        true
    }

    fn n_ports(&self, port_type: PortType) -> usize;

    fn data_type(&self, port_type: PortType, index: PortIndex) -> NodeDataType;

    fn port_caption(&self, port_type: PortType, index: PortIndex) -> String {
        self.data_type(port_type, index).name
    }

    /// Receive data on an input port. `None` means the link was removed.
    fn set_in_data(&mut self, data: Option<Arc<dyn NodeData>>, index: PortIndex);

    fn out_data(&self, index: PortIndex) -> Option<Arc<dyn NodeData>>;

    fn validation_state(&self) -> NodeValidationState {
        NodeValidationState::Valid
    }

    fn validation_message(&self) -> String {
        String::new()
    }

    /// Optional line of text drawn in the node body.
    fn description(&self) -> Option<String> {
        None
    }

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}
