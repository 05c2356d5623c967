//! Main flow view widget.

use egui::{self, Pos2, Rect, Stroke, StrokeKind};
use std::collections::HashMap;
use uuid::Uuid;

use crate::drawing::{draw_bezier_connection, draw_grid};
use crate::interactions::{self, InteractionContext};
use crate::node_rendering::{self, NodeGeometry, NodeLayout};
use crate::state::FlowViewState;
use crate::theme::FlowViewTheme;
use crate::traits::{FlowSceneMutator, FlowSceneSource};
use crate::types::{ItemId, NodeDisplay, PortAddress, PortSide};

// ---------------------------------------------------------------------------
// ViewAction / PendingActions
// ---------------------------------------------------------------------------

/// A scene mutation requested by the view.
#[derive(Clone, Debug, PartialEq)]
pub enum ViewAction {
    CreateNode { model_name: String, scene_pos: Pos2 },
    RemoveNode(Uuid),
    DeleteConnection(Uuid),
    /// `from` is an output port, `to` an input port.
    CreateConnection { from: PortAddress, to: PortAddress },
    MoveNode { node_id: Uuid, scene_pos: Pos2 },
    Select { item: ItemId, selected: bool },
    ClearSelection,
    /// Logical scene rectangle, in pixels with origin (0, 0).
    SetSceneRect(Rect),
    /// Node was double-clicked. Left to the host application.
    ActivateNode(Uuid),
}

/// Pending mutations collected during the render phase, applied after.
#[derive(Debug, Default)]
pub struct PendingActions {
    pub actions: Vec<ViewAction>,
}

impl PendingActions {
    pub fn push(&mut self, action: ViewAction) {
        self.actions.push(action);
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Nodes that were double-clicked this frame.
    pub fn activated_nodes(&self) -> Vec<Uuid> {
        self.actions
            .iter()
            .filter_map(|a| match a {
                ViewAction::ActivateNode(id) => Some(*id),
                _ => None,
            })
            .collect()
    }

    /// Apply every action in order. Refused actions are logged and skipped.
    pub fn apply(self, mutator: &mut dyn FlowSceneMutator) {
        for action in self.actions {
            match action {
                ViewAction::CreateNode {
                    model_name,
                    scene_pos,
                } => match mutator.create_node(&model_name, scene_pos) {
                    Ok(id) => log::debug!("Created {} node {}", model_name, id),
                    Err(e) => log::warn!("Could not create node: {}", e),
                },
                ViewAction::RemoveNode(id) => {
                    if let Err(e) = mutator.remove_node(id) {
                        log::warn!("Could not remove node: {}", e);
                    }
                }
                ViewAction::DeleteConnection(id) => {
                    // Connections attached to a removed node are already gone.
                    if let Err(e) = mutator.delete_connection(id) {
                        log::debug!("Skipping connection delete: {}", e);
                    }
                }
                ViewAction::CreateConnection { from, to } => {
                    if let Err(e) = mutator.create_connection(from, to) {
                        log::warn!("Connection refused: {}", e);
                    }
                }
                ViewAction::MoveNode { node_id, scene_pos } => {
                    if let Err(e) = mutator.move_node(node_id, scene_pos) {
                        log::warn!("Could not move node: {}", e);
                    }
                }
                ViewAction::Select { item, selected } => mutator.set_selected(item, selected),
                ViewAction::ClearSelection => mutator.clear_selection(),
                ViewAction::SetSceneRect(rect) => mutator.set_scene_rect(rect),
                ViewAction::ActivateNode(_) => {}
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Hit-test records
// ---------------------------------------------------------------------------

/// Screen position of a rendered port.
pub(crate) struct PortScreen {
    pub pos: Pos2,
    pub address: PortAddress,
}

pub(crate) struct NodeInteraction {
    pub id: Uuid,
    pub rect: Rect,
    /// Scene position of the top-left corner.
    pub scene_pos: Pos2,
}

/// Screen endpoints of a rendered connection.
pub(crate) struct ConnectionScreen {
    pub id: Uuid,
    pub from: Pos2,
    pub to: Pos2,
}

// ---------------------------------------------------------------------------
// FlowView
// ---------------------------------------------------------------------------

pub struct FlowView<'a> {
    state: &'a mut FlowViewState,
    theme: &'a FlowViewTheme,
}

impl<'a> FlowView<'a> {
    pub fn new(state: &'a mut FlowViewState, theme: &'a FlowViewTheme) -> Self {
        Self { state, theme }
    }

    /// Show the flow view. Returns pending actions to apply via the mutator.
    pub fn show(&mut self, ui: &mut egui::Ui, source: &dyn FlowSceneSource) -> PendingActions {
        let mut pending = PendingActions::default();

        let available = ui.available_rect_before_wrap();
        let (canvas_response, painter) =
            ui.allocate_painter(available.size(), egui::Sense::click_and_drag());
        let canvas_rect = canvas_response.rect;
        let painter = painter.with_clip_rect(canvas_rect);

        self.state.canvas_rect = Some(canvas_rect);
        if !self.state.shown {
            self.state.shown = true;
            pending.push(ViewAction::SetSceneRect(Rect::from_min_size(
                Pos2::ZERO,
                canvas_rect.size(),
            )));
        }

        // Wheel zoom before layout so this frame draws with the new scale.
        interactions::handle_wheel(self.state, ui, &canvas_response);

        // Background
        painter.rect_filled(canvas_rect, 0.0, self.theme.background_color);
        draw_grid(
            &painter,
            canvas_rect,
            &self.state.transform,
            self.theme.fine_grid_step,
            Stroke::new(1.0, self.theme.fine_grid_color),
            self.theme.min_grid_spacing_px,
        );
        draw_grid(
            &painter,
            canvas_rect,
            &self.state.transform,
            self.theme.coarse_grid_step,
            Stroke::new(1.0, self.theme.coarse_grid_color),
            self.theme.min_grid_spacing_px,
        );

        // ---- Phase 1: Lay out nodes ----
        let placed = self.layout_nodes(source, canvas_rect.min);
        let theme = self.theme;
        let port_positions: HashMap<PortAddress, Pos2> = placed
            .iter()
            .flat_map(|(id, layout, display)| {
                let ins = (0..display.inputs.len()).map(move |i| (PortSide::In, i));
                let outs = (0..display.outputs.len()).map(move |i| (PortSide::Out, i));
                ins.chain(outs).map(move |(side, index)| {
                    (
                        PortAddress {
                            node_id: *id,
                            side,
                            index,
                        },
                        layout.port_pos(side, index, theme),
                    )
                })
            })
            .collect();

        // ---- Phase 2: Connections below nodes ----
        let connection_screens = self.draw_connections(&painter, source, &port_positions);

        // ---- Phase 3: Nodes ----
        let mut port_screens: Vec<PortScreen> = Vec::new();
        let mut node_interactions: Vec<NodeInteraction> = Vec::new();
        for (id, layout, display) in &placed {
            let is_selected = source.is_selected(ItemId::Node(*id));
            node_rendering::draw_node_body(&painter, layout, self.theme, display, is_selected);
            node_rendering::draw_ports(&painter, layout, self.theme, *id, display, &mut port_screens);
            node_interactions.push(NodeInteraction {
                id: *id,
                rect: layout.rect(),
                scene_pos: self
                    .state
                    .transform
                    .map_to_scene(canvas_rect.min, layout.screen_pos),
            });
        }

        self.draw_connecting_line(&painter, &port_positions);
        self.draw_rubber_band(&painter);

        // ---- Phase 4: Handle interactions ----
        let hit_radius = (self.theme.port_radius * self.state.transform.scale * 2.0).max(6.0);
        let ctx = InteractionContext {
            ui,
            canvas_response: &canvas_response,
            source,
            nodes: &node_interactions,
            ports: &port_screens,
            connections: &connection_screens,
            hit_radius,
        };
        interactions::handle_interactions(self.state, &ctx, &mut pending);
        pending
    }

    // -----------------------------------------------------------------------
    // Drawing helpers
    // -----------------------------------------------------------------------

    fn layout_nodes(
        &self,
        source: &dyn FlowSceneSource,
        canvas_min: Pos2,
    ) -> Vec<(Uuid, NodeLayout, NodeDisplay)> {
        let transform = &self.state.transform;
        source
            .node_ids()
            .into_iter()
            .filter_map(|id| {
                let display = source.node_display(id)?;
                let pos = source.node_position(id).unwrap_or(Pos2::ZERO);
                let layout = NodeLayout {
                    screen_pos: transform.map_from_scene(canvas_min, pos),
                    scale: transform.scale,
                    geometry: NodeGeometry::measure(&display, self.theme),
                };
                Some((id, layout, display))
            })
            .collect()
    }

    fn draw_connections(
        &self,
        painter: &egui::Painter,
        source: &dyn FlowSceneSource,
        port_positions: &HashMap<PortAddress, Pos2>,
    ) -> Vec<ConnectionScreen> {
        let mut screens = Vec::new();
        for conn in source.connections() {
            let from = PortAddress {
                node_id: conn.from_node,
                side: PortSide::Out,
                index: conn.from_port,
            };
            let to = PortAddress {
                node_id: conn.to_node,
                side: PortSide::In,
                index: conn.to_port,
            };
            let (Some(&from_p), Some(&to_p)) = (port_positions.get(&from), port_positions.get(&to))
            else {
                continue;
            };
            let color = if source.is_selected(ItemId::Connection(conn.id)) {
                self.theme.connection_selected_color
            } else {
                (self.theme.port_color)(&conn.type_id)
            };
            draw_bezier_connection(
                painter,
                from_p,
                to_p,
                color,
                self.theme.connection_width * self.state.transform.scale.max(0.5),
            );
            screens.push(ConnectionScreen {
                id: conn.id,
                from: from_p,
                to: to_p,
            });
        }
        screens
    }

    fn draw_connecting_line(
        &self,
        painter: &egui::Painter,
        port_positions: &HashMap<PortAddress, Pos2>,
    ) {
        let Some(connecting) = &self.state.connecting else {
            return;
        };
        let Some(&start) = port_positions.get(&connecting.from) else {
            return;
        };
        let (from, to) = match connecting.from.side {
            PortSide::Out => (start, connecting.mouse_pos),
            PortSide::In => (connecting.mouse_pos, start),
        };
        draw_bezier_connection(
            painter,
            from,
            to,
            self.theme.pending_connection_color,
            self.theme.connection_width,
        );
    }

    fn draw_rubber_band(&self, painter: &egui::Painter) {
        if let Some(band) = &self.state.rubber_band {
            let rect = band.rect();
            painter.rect_filled(rect, 0.0, self.theme.selection_color.gamma_multiply(0.12));
            painter.rect_stroke(
                rect,
                0.0,
                Stroke::new(1.0, self.theme.selection_color),
                StrokeKind::Inside,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ConnectionView;
    use egui_kittest::Harness;
    use egui_kittest::kittest::Queryable;

    #[derive(Default)]
    struct RecordingMutator {
        created: Vec<String>,
        removed_nodes: Vec<Uuid>,
        known_connections: Vec<Uuid>,
        deleted_connections: Vec<Uuid>,
        selection_cleared: bool,
    }

    impl FlowSceneMutator for RecordingMutator {
        fn create_node(&mut self, model_name: &str, _scene_pos: Pos2) -> Result<Uuid, String> {
            if model_name == "Known" {
                self.created.push(model_name.to_string());
                Ok(Uuid::new_v4())
            } else {
                Err(format!("Model not found: {}", model_name))
            }
        }
        fn remove_node(&mut self, node_id: Uuid) -> Result<(), String> {
            self.removed_nodes.push(node_id);
            // Removing a node takes its connections with it.
            self.known_connections.clear();
            Ok(())
        }
        fn move_node(&mut self, _node_id: Uuid, _scene_pos: Pos2) -> Result<(), String> {
            Ok(())
        }
        fn create_connection(&mut self, _from: PortAddress, _to: PortAddress) -> Result<Uuid, String> {
            Err("unsupported".into())
        }
        fn delete_connection(&mut self, connection_id: Uuid) -> Result<(), String> {
            let before = self.known_connections.len();
            self.known_connections.retain(|c| *c != connection_id);
            if self.known_connections.len() == before {
                return Err("Connection not found".into());
            }
            self.deleted_connections.push(connection_id);
            Ok(())
        }
        fn set_selected(&mut self, _item: ItemId, _selected: bool) {}
        fn clear_selection(&mut self) {
            self.selection_cleared = true;
        }
        fn set_scene_rect(&mut self, _rect: Rect) {}
    }

    #[test]
    fn unknown_model_is_skipped() {
        let mut mutator = RecordingMutator::default();
        let mut pending = PendingActions::default();
        pending.push(ViewAction::CreateNode {
            model_name: "Missing".into(),
            scene_pos: Pos2::ZERO,
        });
        pending.push(ViewAction::CreateNode {
            model_name: "Known".into(),
            scene_pos: Pos2::ZERO,
        });
        pending.apply(&mut mutator);
        assert_eq!(mutator.created, vec!["Known".to_string()]);
    }

    #[test]
    fn failed_connection_delete_does_not_stop_batch() {
        let attached = Uuid::new_v4();
        let mut mutator = RecordingMutator {
            known_connections: vec![attached],
            ..Default::default()
        };
        let node = Uuid::new_v4();
        let mut pending = PendingActions::default();
        pending.push(ViewAction::RemoveNode(node));
        pending.push(ViewAction::DeleteConnection(attached));
        pending.push(ViewAction::ClearSelection);
        pending.apply(&mut mutator);

        assert_eq!(mutator.removed_nodes, vec![node]);
        assert!(mutator.deleted_connections.is_empty());
        assert!(mutator.selection_cleared);
    }

    #[test]
    fn activated_nodes_are_reported() {
        let id = Uuid::new_v4();
        let mut pending = PendingActions::default();
        assert!(pending.is_empty());
        pending.push(ViewAction::ClearSelection);
        pending.push(ViewAction::ActivateNode(id));
        assert_eq!(pending.activated_nodes(), vec![id]);
    }

    #[derive(Default)]
    struct StubScene {
        names: Vec<String>,
        selected: Vec<ItemId>,
    }

    impl FlowSceneSource for StubScene {
        fn node_ids(&self) -> Vec<Uuid> {
            Vec::new()
        }
        fn node_display(&self, _id: Uuid) -> Option<NodeDisplay> {
            None
        }
        fn node_position(&self, _id: Uuid) -> Option<Pos2> {
            None
        }
        fn connections(&self) -> Vec<ConnectionView> {
            Vec::new()
        }
        fn registered_model_names(&self) -> Vec<String> {
            self.names.clone()
        }
        fn selected_items(&self) -> Vec<ItemId> {
            self.selected.clone()
        }
    }

    struct ViewFixture {
        state: FlowViewState,
        theme: FlowViewTheme,
        scene: StubScene,
        actions: Vec<ViewAction>,
    }

    fn view_harness(scene: StubScene) -> Harness<'static, ViewFixture> {
        Harness::builder()
            .with_size(egui::vec2(800.0, 600.0))
            .build_ui_state(
                |ui, fixture: &mut ViewFixture| {
                    let pending =
                        FlowView::new(&mut fixture.state, &fixture.theme).show(ui, &fixture.scene);
                    fixture.actions.extend(pending.actions);
                },
                ViewFixture {
                    state: FlowViewState::new(),
                    theme: FlowViewTheme::default(),
                    scene,
                    actions: Vec::new(),
                },
            )
    }

    fn secondary_click(harness: &Harness<'_, ViewFixture>, pos: Pos2) {
        harness.hover_at(pos);
        for pressed in [true, false] {
            harness.event(egui::Event::PointerButton {
                pos,
                button: egui::PointerButton::Secondary,
                pressed,
                modifiers: egui::Modifiers::NONE,
            });
        }
    }

    #[test]
    fn first_frame_reports_scene_rect_once() {
        let mut harness = view_harness(StubScene::default());
        harness.run_steps(3);

        let rects: Vec<Rect> = harness
            .state()
            .actions
            .iter()
            .filter_map(|a| match a {
                ViewAction::SetSceneRect(rect) => Some(*rect),
                _ => None,
            })
            .collect();
        assert_eq!(rects.len(), 1);
        assert_eq!(rects[0].min, Pos2::ZERO);

        let canvas = harness.state().state.canvas_rect.expect("canvas laid out");
        assert_eq!(rects[0].size(), canvas.size());
    }

    #[test]
    fn context_menu_creates_filtered_model_at_click_point() {
        let mut harness = view_harness(StubScene {
            names: vec!["ImageLoaderModel".into(), "ImageShowModel".into()],
            ..Default::default()
        });
        harness.step();

        let click = Pos2::new(100.0, 80.0);
        secondary_click(&harness, click);
        harness.step();
        harness.run_steps(2);
        assert!(harness.state().state.context_menu.is_some());
        assert!(harness.query_by_label("ImageLoaderModel").is_some());

        harness.event(egui::Event::Text("show".into()));
        harness.run_steps(2);
        assert!(harness.query_by_value("show").is_some());
        assert!(harness.query_by_label("ImageShowModel").is_some());
        assert!(harness.query_by_label("ImageLoaderModel").is_none());

        harness.key_press(egui::Key::Enter);
        harness.step();

        let canvas_min = harness.state().state.canvas_rect.expect("canvas laid out").min;
        let expected = ViewAction::CreateNode {
            model_name: "ImageShowModel".into(),
            scene_pos: (click - canvas_min).to_pos2(),
        };
        assert!(harness.state().actions.contains(&expected));
        assert!(harness.state().state.context_menu.is_none());
    }

    #[test]
    fn delete_and_escape_act_on_selection() {
        let (node, connection) = (Uuid::new_v4(), Uuid::new_v4());
        let mut harness = view_harness(StubScene {
            selected: vec![ItemId::Connection(connection), ItemId::Node(node)],
            ..Default::default()
        });
        harness.step();
        harness.state_mut().actions.clear();

        harness.key_press(egui::Key::Delete);
        harness.step();
        assert_eq!(
            harness.state().actions,
            vec![
                ViewAction::RemoveNode(node),
                ViewAction::DeleteConnection(connection),
            ]
        );

        harness.state_mut().actions.clear();
        harness.key_press(egui::Key::Escape);
        harness.step();
        assert_eq!(harness.state().actions, vec![ViewAction::ClearSelection]);
    }
}
