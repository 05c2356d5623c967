use thiserror::Error;
use uuid::Uuid;

use crate::model::node_data::PortIndex;

#[derive(Error, Debug)]
pub enum NodesError {
    #[error("Model '{0}' is already registered")]
    DuplicateModel(String),
    #[error("Model '{0}' not found")]
    ModelNotFound(String),
    #[error("Node {0} not found")]
    NodeNotFound(Uuid),
    #[error("Connection {0} not found")]
    ConnectionNotFound(Uuid),
    #[error("Invalid connection: {0}")]
    InvalidConnection(#[from] ConnectionError),
    #[error("Registry lock poisoned")]
    LockPoisoned,
}

/// Reasons a connection between two ports is refused.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConnectionError {
    #[error("source node {0} not found")]
    MissingSource(Uuid),
    #[error("destination node {0} not found")]
    MissingDestination(Uuid),
    #[error("cannot connect a node to itself")]
    SelfConnection,
    #[error("node {node_id} has no output port {index}")]
    NoSuchOutput { node_id: Uuid, index: PortIndex },
    #[error("node {node_id} has no input port {index}")]
    NoSuchInput { node_id: Uuid, index: PortIndex },
    #[error("data type '{output}' cannot feed an input of type '{input}'")]
    TypeMismatch { output: String, input: String },
    #[error("input port {index} of node {node_id} already has a connection")]
    InputOccupied { node_id: Uuid, index: PortIndex },
    #[error("connection would create a cycle")]
    Cycle,
}
