//! Standalone egui flow view: a zoomable, pannable node canvas.
//!
//! The view owns only UI state ([`FlowViewState`]). The graph lives elsewhere and
//! is reached through [`FlowSceneSource`] for reading and [`FlowSceneMutator`] for
//! the changes the view collects each frame in [`PendingActions`].

pub mod context_menu;
pub mod drawing;
mod interactions;
mod node_rendering;
pub mod state;
pub mod theme;
pub mod traits;
pub mod transform;
pub mod types;
pub mod widget;

pub use state::{DragMode, FlowViewState};
pub use theme::FlowViewTheme;
pub use traits::{FlowSceneMutator, FlowSceneSource};
pub use transform::{MAX_ZOOM, ViewTransform, ZOOM_STEP};
pub use types::*;
pub use widget::{FlowView, PendingActions, ViewAction};
