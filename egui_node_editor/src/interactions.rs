//! Pointer and keyboard handling for the flow view, one handler per gesture.

use egui::{self, Pos2};
use uuid::Uuid;

use crate::context_menu::{self, MenuOutcome, ModelMenuState};
use crate::drawing::{bezier_intersects_rect, distance_to_bezier};
use crate::state::{
    ConnectingState, ContextMenuState, DragMode, DragState, FlowViewState, RubberBandState,
};
use crate::traits::FlowSceneSource;
use crate::types::{ItemId, PortAddress, PortSide};
use crate::widget::{ConnectionScreen, NodeInteraction, PendingActions, PortScreen, ViewAction};

/// Pixels within which a click picks a connection.
const CONNECTION_HIT_PX: f32 = 6.0;

/// Context passed to interaction handlers (avoids threading many parameters).
pub(crate) struct InteractionContext<'a> {
    pub ui: &'a egui::Ui,
    pub canvas_response: &'a egui::Response,
    pub source: &'a dyn FlowSceneSource,
    pub nodes: &'a [NodeInteraction],
    pub ports: &'a [PortScreen],
    pub connections: &'a [ConnectionScreen],
    pub hit_radius: f32,
}

impl InteractionContext<'_> {
    fn canvas_min(&self) -> Pos2 {
        self.canvas_response.rect.min
    }

    fn command_held(&self) -> bool {
        self.ui.input(|i| i.modifiers.command)
    }

    fn node_at(&self, pos: Pos2) -> Option<&NodeInteraction> {
        self.nodes.iter().rev().find(|n| n.rect.contains(pos))
    }

    fn connection_at(&self, pos: Pos2) -> Option<&ConnectionScreen> {
        self.connections
            .iter()
            .map(|c| (distance_to_bezier(pos, c.from, c.to), c))
            .filter(|(d, _)| *d < CONNECTION_HIT_PX)
            .min_by(|a, b| a.0.total_cmp(&b.0))
            .map(|(_, c)| c)
    }
}

/// Apply a wheel event: only the sign of the vertical delta matters.
pub(crate) fn handle_wheel(
    state: &mut FlowViewState,
    ui: &egui::Ui,
    canvas_response: &egui::Response,
) {
    if !canvas_response.hovered() {
        return;
    }
    let Some(hover) = ui.input(|i| i.pointer.hover_pos()) else {
        return;
    };
    let delta_y = ui.input(|i| i.raw_scroll_delta.y);
    if state
        .transform
        .apply_wheel(delta_y, hover - canvas_response.rect.min)
    {
        log::trace!("Zoom -> {:.3}", state.transform.scale);
    }
}

/// Main entry point for everything except the wheel.
pub(crate) fn handle_interactions(
    state: &mut FlowViewState,
    ctx: &InteractionContext,
    pending: &mut PendingActions,
) {
    let pointer_pos = ctx.ui.input(|i| i.pointer.hover_pos());

    state.set_shift_held(ctx.ui.input(|i| i.modifiers.shift));

    handle_active_drag(state, ctx, pointer_pos, pending);
    handle_drag_stop(state, ctx, pointer_pos, pending);
    handle_drag_start(state, ctx, pointer_pos, pending);
    handle_double_click(ctx, pointer_pos, pending);
    handle_single_click(state, ctx, pointer_pos, pending);
    handle_right_click(state, ctx, pointer_pos);
    render_context_menu(state, ctx, pending);
    handle_keys(state, ctx, pending);
}

// ---------------------------------------------------------------------------
// Hit-testing helpers
// ---------------------------------------------------------------------------

/// Find the closest port within hit_radius of pos.
pub(crate) fn find_nearest_port(
    ports: &[PortScreen],
    pos: Pos2,
    hit_radius: f32,
    exclude_node: Option<Uuid>,
    require_side: Option<PortSide>,
) -> Option<&PortScreen> {
    ports
        .iter()
        .filter(|p| exclude_node != Some(p.address.node_id))
        .filter(|p| require_side.is_none_or(|side| p.address.side == side))
        .map(|p| (pos.distance(p.pos), p))
        .filter(|(d, _)| *d < hit_radius)
        .min_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, p)| p)
}

/// Order two ports as (output, input). `None` unless they sit on opposite
/// sides of different nodes.
pub(crate) fn link_endpoints(a: PortAddress, b: PortAddress) -> Option<(PortAddress, PortAddress)> {
    if a.node_id == b.node_id {
        return None;
    }
    match (a.side, b.side) {
        (PortSide::Out, PortSide::In) => Some((a, b)),
        (PortSide::In, PortSide::Out) => Some((b, a)),
        _ => None,
    }
}

/// Removals for a selection: every node first, then every connection.
pub(crate) fn collect_deletions(selected: &[ItemId]) -> Vec<ViewAction> {
    let nodes = selected.iter().filter_map(|item| match item {
        ItemId::Node(id) => Some(ViewAction::RemoveNode(*id)),
        ItemId::Connection(_) => None,
    });
    let connections = selected.iter().filter_map(|item| match item {
        ItemId::Connection(id) => Some(ViewAction::DeleteConnection(*id)),
        ItemId::Node(_) => None,
    });
    nodes.chain(connections).collect()
}

/// Select `item` the way a click does: toggle with the command key, replace otherwise.
fn click_select(ctx: &InteractionContext, item: ItemId, pending: &mut PendingActions) {
    if ctx.command_held() {
        let selected = !ctx.source.is_selected(item);
        pending.push(ViewAction::Select { item, selected });
    } else {
        pending.push(ViewAction::ClearSelection);
        pending.push(ViewAction::Select {
            item,
            selected: true,
        });
    }
}

// ---------------------------------------------------------------------------
// Individual interaction handlers
// ---------------------------------------------------------------------------

fn handle_active_drag(
    state: &mut FlowViewState,
    ctx: &InteractionContext,
    pointer_pos: Option<Pos2>,
    pending: &mut PendingActions,
) {
    if !ctx.canvas_response.dragged_by(egui::PointerButton::Primary) {
        return;
    }

    if state.panning {
        state.transform.pan(ctx.canvas_response.drag_delta());
        return;
    }

    let Some(pos) = pointer_pos else { return };

    if let Some(drag) = &state.dragging {
        let offset = (pos - drag.mouse_start) / state.transform.scale;
        for (node_id, start) in drag.node_ids.iter().zip(&drag.start_positions) {
            pending.push(ViewAction::MoveNode {
                node_id: *node_id,
                scene_pos: *start + offset,
            });
        }
    } else if let Some(band) = &mut state.rubber_band {
        band.current = pos;
    } else if let Some(connecting) = &mut state.connecting {
        connecting.mouse_pos = pos;
    }
}

fn handle_drag_stop(
    state: &mut FlowViewState,
    ctx: &InteractionContext,
    pointer_pos: Option<Pos2>,
    pending: &mut PendingActions,
) {
    if !ctx
        .canvas_response
        .drag_stopped_by(egui::PointerButton::Primary)
    {
        return;
    }

    // Finish connection: only ports on the other side of another node qualify
    if let (Some(connecting), Some(pos)) = (state.connecting.take(), pointer_pos) {
        let target = find_nearest_port(
            ctx.ports,
            pos,
            ctx.hit_radius,
            Some(connecting.from.node_id),
            Some(connecting.from.side.opposite()),
        );
        if let Some((from, to)) = target.and_then(|t| link_endpoints(connecting.from, t.address)) {
            pending.push(ViewAction::CreateConnection { from, to });
        }
    }

    // Finish rubber band
    if let Some(band) = state.rubber_band.take() {
        let rect = band.rect();
        if !ctx.command_held() {
            pending.push(ViewAction::ClearSelection);
        }
        for node in ctx.nodes.iter().filter(|n| rect.intersects(n.rect)) {
            pending.push(ViewAction::Select {
                item: ItemId::Node(node.id),
                selected: true,
            });
        }
        for conn in ctx
            .connections
            .iter()
            .filter(|c| bezier_intersects_rect(rect, c.from, c.to))
        {
            pending.push(ViewAction::Select {
                item: ItemId::Connection(conn.id),
                selected: true,
            });
        }
    }

    state.dragging = None;
    state.panning = false;
    state.connecting = None;
}

fn handle_drag_start(
    state: &mut FlowViewState,
    ctx: &InteractionContext,
    pointer_pos: Option<Pos2>,
    pending: &mut PendingActions,
) {
    if !ctx
        .canvas_response
        .drag_started_by(egui::PointerButton::Primary)
    {
        return;
    }
    let Some(pos) = pointer_pos else { return };
    state.context_menu = None;

    // 1. Port: start a pending link
    if let Some(port) = find_nearest_port(ctx.ports, pos, ctx.hit_radius, None, None) {
        state.connecting = Some(ConnectingState {
            from: port.address,
            mouse_pos: pos,
        });
        return;
    }

    // 2. Node: move the selection
    if let Some(node) = ctx.node_at(pos) {
        let item = ItemId::Node(node.id);
        let mut drag_ids: Vec<Uuid> = if ctx.source.is_selected(item) {
            selected_node_ids(ctx.source)
        } else if ctx.command_held() {
            pending.push(ViewAction::Select {
                item,
                selected: true,
            });
            selected_node_ids(ctx.source)
        } else {
            pending.push(ViewAction::ClearSelection);
            pending.push(ViewAction::Select {
                item,
                selected: true,
            });
            Vec::new()
        };
        if !drag_ids.contains(&node.id) {
            drag_ids.push(node.id);
        }

        let start_positions = drag_ids
            .iter()
            .map(|id| {
                ctx.nodes
                    .iter()
                    .find(|n| n.id == *id)
                    .map(|n| n.scene_pos)
                    .or_else(|| ctx.source.node_position(*id))
                    .unwrap_or(Pos2::ZERO)
            })
            .collect();
        state.dragging = Some(DragState {
            node_ids: drag_ids,
            start_positions,
            mouse_start: pos,
        });
        return;
    }

    // 3. Empty space
    match state.drag_mode {
        DragMode::ScrollPan => state.panning = true,
        DragMode::RubberBandSelect => {
            state.rubber_band = Some(RubberBandState {
                start: pos,
                current: pos,
            });
        }
    }
}

fn selected_node_ids(source: &dyn FlowSceneSource) -> Vec<Uuid> {
    source
        .selected_items()
        .into_iter()
        .filter_map(|item| match item {
            ItemId::Node(id) => Some(id),
            ItemId::Connection(_) => None,
        })
        .collect()
}

fn handle_double_click(
    ctx: &InteractionContext,
    pointer_pos: Option<Pos2>,
    pending: &mut PendingActions,
) {
    if !ctx.canvas_response.double_clicked() {
        return;
    }
    let Some(pos) = pointer_pos else { return };
    if let Some(node) = ctx.node_at(pos) {
        pending.push(ViewAction::ActivateNode(node.id));
    }
}

fn handle_single_click(
    state: &mut FlowViewState,
    ctx: &InteractionContext,
    pointer_pos: Option<Pos2>,
    pending: &mut PendingActions,
) {
    if !ctx.canvas_response.clicked() {
        return;
    }
    let Some(pos) = pointer_pos else { return };
    state.context_menu = None;

    if let Some(node) = ctx.node_at(pos) {
        click_select(ctx, ItemId::Node(node.id), pending);
    } else if let Some(conn) = ctx.connection_at(pos) {
        click_select(ctx, ItemId::Connection(conn.id), pending);
    } else if !ctx.command_held() {
        pending.push(ViewAction::ClearSelection);
    }
}

fn handle_right_click(
    state: &mut FlowViewState,
    ctx: &InteractionContext,
    pointer_pos: Option<Pos2>,
) {
    if !ctx.canvas_response.secondary_clicked() {
        return;
    }
    let Some(pos) = pointer_pos else { return };

    state.context_menu = Some(ContextMenuState {
        screen_pos: pos,
        scene_pos: state.transform.map_to_scene(ctx.canvas_min(), pos),
        menu: ModelMenuState::default(),
    });
}

fn render_context_menu(
    state: &mut FlowViewState,
    ctx: &InteractionContext,
    pending: &mut PendingActions,
) {
    let Some(menu) = state.context_menu.as_mut() else {
        return;
    };

    let names = ctx.source.registered_model_names();
    let popup_id = ctx.ui.make_persistent_id("flow_view_context_menu");
    let outcome = egui::Area::new(popup_id)
        .order(egui::Order::Foreground)
        .fixed_pos(menu.screen_pos)
        .show(ctx.ui.ctx(), |ui| {
            egui::Frame::menu(ui.style())
                .show(ui, |ui| {
                    ui.set_max_width(250.0);
                    context_menu::show_model_menu(ui, &mut menu.menu, &names)
                })
                .inner
        })
        .inner;

    match outcome {
        MenuOutcome::Open => {}
        MenuOutcome::Picked(model_name) => {
            pending.push(ViewAction::CreateNode {
                model_name,
                scene_pos: menu.scene_pos,
            });
            state.context_menu = None;
        }
        MenuOutcome::Closed => state.context_menu = None,
    }
}

fn handle_keys(state: &mut FlowViewState, ctx: &InteractionContext, pending: &mut PendingActions) {
    if ctx.ui.ctx().wants_keyboard_input() {
        return;
    }
    if ctx.ui.input(|i| i.key_pressed(egui::Key::Escape)) {
        pending.push(ViewAction::ClearSelection);
        state.context_menu = None;
    }
    if ctx.ui.input(|i| i.key_pressed(egui::Key::Delete)) {
        let actions = collect_deletions(&ctx.source.selected_items());
        if !actions.is_empty() {
            log::debug!("Deleting {} selected item(s)", actions.len());
        }
        pending.actions.extend(actions);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn port(node_id: Uuid, side: PortSide, index: usize) -> PortAddress {
        PortAddress {
            node_id,
            side,
            index,
        }
    }

    #[test]
    fn deletions_put_nodes_before_connections() {
        let (n1, n2) = (Uuid::new_v4(), Uuid::new_v4());
        let (c1, c2) = (Uuid::new_v4(), Uuid::new_v4());
        let selection = [
            ItemId::Connection(c1),
            ItemId::Node(n1),
            ItemId::Connection(c2),
            ItemId::Node(n2),
        ];
        assert_eq!(
            collect_deletions(&selection),
            vec![
                ViewAction::RemoveNode(n1),
                ViewAction::RemoveNode(n2),
                ViewAction::DeleteConnection(c1),
                ViewAction::DeleteConnection(c2),
            ]
        );
        assert!(collect_deletions(&[]).is_empty());
    }

    #[test]
    fn link_is_ordered_output_to_input() {
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        let out = port(a, PortSide::Out, 0);
        let input = port(b, PortSide::In, 1);
        assert_eq!(link_endpoints(out, input), Some((out, input)));
        assert_eq!(link_endpoints(input, out), Some((out, input)));
    }

    #[test]
    fn link_needs_opposite_sides_on_different_nodes() {
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        assert_eq!(link_endpoints(port(a, PortSide::Out, 0), port(b, PortSide::Out, 0)), None);
        assert_eq!(link_endpoints(port(a, PortSide::Out, 0), port(a, PortSide::In, 0)), None);
    }

    #[test]
    fn nearest_port_respects_filters() {
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        let ports = vec![
            PortScreen {
                pos: Pos2::new(0.0, 0.0),
                address: port(a, PortSide::Out, 0),
            },
            PortScreen {
                pos: Pos2::new(4.0, 0.0),
                address: port(b, PortSide::In, 0),
            },
        ];
        let hit = find_nearest_port(&ports, Pos2::new(1.0, 0.0), 10.0, None, None);
        assert_eq!(hit.map(|p| p.address.node_id), Some(a));

        let hit = find_nearest_port(&ports, Pos2::new(1.0, 0.0), 10.0, Some(a), None);
        assert_eq!(hit.map(|p| p.address.node_id), Some(b));

        let hit = find_nearest_port(&ports, Pos2::new(1.0, 0.0), 10.0, None, Some(PortSide::In));
        assert_eq!(hit.map(|p| p.address.node_id), Some(b));

        assert!(find_nearest_port(&ports, Pos2::new(50.0, 0.0), 10.0, None, None).is_none());
    }

    #[test]
    fn link_drop_skips_closer_port_on_the_same_side() {
        let (a, b, c) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
        let from = port(a, PortSide::Out, 0);
        let ports = vec![
            PortScreen {
                pos: Pos2::new(1.0, 0.0),
                address: port(b, PortSide::Out, 0),
            },
            PortScreen {
                pos: Pos2::new(6.0, 0.0),
                address: port(c, PortSide::In, 0),
            },
        ];
        let hit = find_nearest_port(
            &ports,
            Pos2::ZERO,
            10.0,
            Some(from.node_id),
            Some(from.side.opposite()),
        )
        .expect("input port in range");
        assert_eq!(link_endpoints(from, hit.address), Some((from, port(c, PortSide::In, 0))));
    }
}
