//! Flow graph model for the node editor.
//!
//! A [`FlowScene`] owns nodes and the connections between their ports. Each node
//! wraps a [`NodeDataModel`] created from a [`DataModelRegistry`] by type name.
//! Connections are type-checked and kept acyclic, and data written to an output
//! port is pushed downstream whenever the graph changes.

pub mod error;
pub mod graph_analysis;
pub mod model;
pub mod registry;
pub mod scene;

pub use error::{ConnectionError, NodesError};
pub use model::connection::Connection;
pub use model::data_model::{NodeDataModel, NodeValidationState};
pub use model::geometry::{Point, SceneRect};
pub use model::node::Node;
pub use model::node_data::{NodeData, NodeDataType, PortId, PortIndex, PortType};
pub use registry::{DataModelRegistry, ModelFactory, global_registry};
pub use scene::{FlowScene, SceneItem};
