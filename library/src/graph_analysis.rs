//! Connection legality and traversal order for the flow graph.

use std::collections::{HashMap, HashSet, VecDeque};
use uuid::Uuid;

use crate::error::ConnectionError;
use crate::model::node_data::{NodeDataType, PortId, PortType};
use crate::scene::FlowScene;

/// Check whether `out` may feed `input`. Returns the shared data type.
pub fn validate_connection(
    scene: &FlowScene,
    out: PortId,
    input: PortId,
) -> Result<NodeDataType, ConnectionError> {
    let source = scene
        .node(out.node_id)
        .ok_or(ConnectionError::MissingSource(out.node_id))?;
    let destination = scene
        .node(input.node_id)
        .ok_or(ConnectionError::MissingDestination(input.node_id))?;

    if out.node_id == input.node_id {
        return Err(ConnectionError::SelfConnection);
    }

    if out.index >= source.model().n_ports(PortType::Out) {
        return Err(ConnectionError::NoSuchOutput {
            node_id: out.node_id,
            index: out.index,
        });
    }
    if input.index >= destination.model().n_ports(PortType::In) {
        return Err(ConnectionError::NoSuchInput {
            node_id: input.node_id,
            index: input.index,
        });
    }

    let out_type = source.model().data_type(PortType::Out, out.index);
    let in_type = destination.model().data_type(PortType::In, input.index);
    if !out_type.is_compatible_with(&in_type) {
        return Err(ConnectionError::TypeMismatch {
            output: out_type.name,
            input: in_type.name,
        });
    }

    // Inputs accept a single link; outputs fan out freely.
    if scene.connection_at_input(input).is_some() {
        return Err(ConnectionError::InputOccupied {
            node_id: input.node_id,
            index: input.index,
        });
    }

    if would_create_cycle(scene, out.node_id, input.node_id) {
        return Err(ConnectionError::Cycle);
    }

    Ok(out_type)
}

/// True if `to_node` already reaches `from_node`, so linking from→to closes a loop.
pub fn would_create_cycle(scene: &FlowScene, from_node: Uuid, to_node: Uuid) -> bool {
    let mut visited = HashSet::new();
    let mut queue = VecDeque::new();
    queue.push_back(to_node);

    while let Some(current) = queue.pop_front() {
        if current == from_node {
            return true;
        }
        if !visited.insert(current) {
            continue;
        }
        for conn in scene.connections() {
            if conn.out.node_id == current {
                queue.push_back(conn.input.node_id);
            }
        }
    }
    false
}

/// Nodes ordered so every node comes after all of its upstream nodes.
///
/// Ties keep scene order. Nodes caught in a cycle (which the scene never
/// creates) are left out.
pub fn evaluation_order(scene: &FlowScene) -> Vec<Uuid> {
    let ids: Vec<Uuid> = scene.nodes().map(|n| n.id()).collect();
    let mut in_degree: HashMap<Uuid, usize> = ids.iter().map(|id| (*id, 0)).collect();
    for conn in scene.connections() {
        if let Some(d) = in_degree.get_mut(&conn.input.node_id) {
            *d += 1;
        }
    }

    let mut queue: VecDeque<Uuid> = ids
        .iter()
        .copied()
        .filter(|id| in_degree.get(id) == Some(&0))
        .collect();
    let mut order = Vec::with_capacity(ids.len());

    while let Some(id) = queue.pop_front() {
        order.push(id);
        for conn in scene.connections().iter().filter(|c| c.out.node_id == id) {
            if let Some(d) = in_degree.get_mut(&conn.input.node_id) {
                *d -= 1;
                if *d == 0 {
                    queue.push_back(conn.input.node_id);
                }
            }
        }
    }

    order
}
