//! Pushes output data along connections.

use std::collections::{HashSet, VecDeque};
use uuid::Uuid;

use super::FlowScene;
use crate::graph_analysis::evaluation_order;

/// Re-deliver outputs of `start` and of everything downstream of it.
pub(super) fn propagate_from(scene: &mut FlowScene, start: Uuid) {
    let affected = downstream_of(scene, start);
    for node_id in evaluation_order(scene) {
        if affected.contains(&node_id) {
            deliver_outputs(scene, node_id);
        }
    }
}

/// Copy each output value of `node_id` into the inputs it is linked to.
pub(super) fn deliver_outputs(scene: &mut FlowScene, node_id: Uuid) {
    let Some(node) = scene.nodes.get(&node_id) else {
        return;
    };
    let deliveries: Vec<_> = scene
        .connections
        .iter()
        .filter(|c| c.out.node_id == node_id)
        .map(|c| (c.input, node.model().out_data(c.out.index)))
        .collect();

    for (target, data) in deliveries {
        if let Some(target_node) = scene.nodes.get_mut(&target.node_id) {
            target_node.model_mut().set_in_data(data, target.index);
        }
    }
}

fn downstream_of(scene: &FlowScene, start: Uuid) -> HashSet<Uuid> {
    let mut visited = HashSet::new();
    let mut queue = VecDeque::from([start]);
    while let Some(current) = queue.pop_front() {
        if !visited.insert(current) {
            continue;
        }
        for conn in scene.connections.iter().filter(|c| c.out.node_id == current) {
            queue.push_back(conn.input.node_id);
        }
    }
    visited
}
