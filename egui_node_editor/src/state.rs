//! UI state for the flow view.

use egui::{Pos2, Rect, Vec2};
use uuid::Uuid;

use crate::context_menu::ModelMenuState;
use crate::transform::ViewTransform;
use crate::types::PortAddress;

/// What a primary drag on empty canvas does.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DragMode {
    /// Drag pans the view.
    #[default]
    ScrollPan,
    /// Drag draws a selection rectangle.
    RubberBandSelect,
}

impl DragMode {
    /// Mode implied by the Shift key state.
    pub fn from_shift(shift_held: bool) -> Self {
        if shift_held {
            Self::RubberBandSelect
        } else {
            Self::ScrollPan
        }
    }
}

/// UI state for one flow view.
#[derive(Default)]
pub struct FlowViewState {
    pub transform: ViewTransform,
    pub drag_mode: DragMode,
    /// Open node-creation menu, if any.
    pub context_menu: Option<ContextMenuState>,
    pub dragging: Option<DragState>,
    pub panning: bool,
    pub rubber_band: Option<RubberBandState>,
    pub connecting: Option<ConnectingState>,
    pub(crate) shown: bool,
    pub(crate) canvas_rect: Option<Rect>,
}

pub struct DragState {
    pub node_ids: Vec<Uuid>,
    /// Scene positions at drag start.
    pub start_positions: Vec<Pos2>,
    /// Screen position at drag start.
    pub mouse_start: Pos2,
}

pub struct ConnectingState {
    pub from: PortAddress,
    pub mouse_pos: Pos2,
}

#[derive(Clone)]
pub struct ContextMenuState {
    pub screen_pos: Pos2,
    /// Where a node picked from the menu will be placed.
    pub scene_pos: Pos2,
    pub menu: ModelMenuState,
}

pub struct RubberBandState {
    pub start: Pos2,
    pub current: Pos2,
}

impl RubberBandState {
    pub fn rect(&self) -> Rect {
        Rect::from_two_pos(self.start, self.current)
    }
}

impl FlowViewState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Track the Shift key. Returns true if the drag mode changed.
    pub fn set_shift_held(&mut self, held: bool) -> bool {
        let mode = DragMode::from_shift(held);
        let changed = mode != self.drag_mode;
        if changed {
            log::trace!("Drag mode -> {:?}", mode);
        }
        self.drag_mode = mode;
        changed
    }

    /// Current horizontal scale.
    pub fn zoom(&self) -> f32 {
        self.transform.m11()
    }

    /// Zoom in one step around the canvas centre.
    pub fn scale_up(&mut self) {
        let anchor = self.canvas_center();
        self.transform.scale_up(anchor);
    }

    /// Zoom out one step around the canvas centre.
    pub fn scale_down(&mut self) {
        let anchor = self.canvas_center();
        self.transform.scale_down(anchor);
    }

    pub fn reset_zoom(&mut self) {
        self.transform.reset();
    }

    pub fn close_context_menu(&mut self) {
        self.context_menu = None;
    }

    fn canvas_center(&self) -> Vec2 {
        self.canvas_rect
            .map(|r| r.size() * 0.5)
            .unwrap_or(Vec2::ZERO)
    }
}
