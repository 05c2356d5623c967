//! Theming for the flow view.

use egui::Color32;

use crate::types::NodeStatus;

/// Theme configuration for the flow view. Sizes are in scene units.
pub struct FlowViewTheme {
    /// Port and connection color based on the data type id.
    pub port_color: Box<dyn Fn(&str) -> Color32>,
    pub background_color: Color32,
    pub fine_grid_color: Color32,
    pub coarse_grid_color: Color32,
    pub fine_grid_step: f32,
    pub coarse_grid_step: f32,
    /// Grid levels closer together than this (in pixels) are not drawn.
    pub min_grid_spacing_px: f32,
    pub node_width: f32,
    pub header_height: f32,
    pub port_row_height: f32,
    pub port_radius: f32,
    pub port_margin: f32,
    pub text_row_height: f32,
    pub node_padding: f32,
    pub node_rounding: f32,
    pub node_body_color: Color32,
    pub node_header_color: Color32,
    pub node_border_color: Color32,
    pub selection_color: Color32,
    pub caption_color: Color32,
    pub port_label_color: Color32,
    pub description_color: Color32,
    pub warning_color: Color32,
    pub error_color: Color32,
    pub connection_width: f32,
    pub connection_selected_color: Color32,
    pub pending_connection_color: Color32,
}

impl Default for FlowViewTheme {
    fn default() -> Self {
        Self {
            port_color: Box::new(default_port_color),
            background_color: Color32::from_rgb(53, 53, 53),
            fine_grid_color: Color32::from_rgb(60, 60, 60),
            coarse_grid_color: Color32::from_rgb(25, 25, 25),
            fine_grid_step: 15.0,
            coarse_grid_step: 150.0,
            min_grid_spacing_px: 2.0,
            node_width: 160.0,
            header_height: 24.0,
            port_row_height: 20.0,
            port_radius: 5.0,
            port_margin: 0.0,
            text_row_height: 16.0,
            node_padding: 6.0,
            node_rounding: 4.0,
            node_body_color: Color32::from_rgb(70, 70, 78),
            node_header_color: Color32::from_rgb(50, 50, 58),
            node_border_color: Color32::from_rgb(30, 30, 30),
            selection_color: Color32::from_rgb(255, 165, 0),
            caption_color: Color32::WHITE,
            port_label_color: Color32::from_rgb(200, 200, 200),
            description_color: Color32::from_rgb(160, 160, 160),
            warning_color: Color32::from_rgb(238, 200, 80),
            error_color: Color32::from_rgb(220, 70, 70),
            connection_width: 2.0,
            connection_selected_color: Color32::from_rgb(255, 165, 0),
            pending_connection_color: Color32::from_rgb(200, 200, 200),
        }
    }
}

impl FlowViewTheme {
    pub fn status_color(&self, status: NodeStatus) -> Option<Color32> {
        match status {
            NodeStatus::Valid => None,
            NodeStatus::Warning => Some(self.warning_color),
            NodeStatus::Error => Some(self.error_color),
        }
    }
}

/// Stable color per type id, so every port of one type shares a hue.
fn default_port_color(type_id: &str) -> Color32 {
    const PALETTE: [Color32; 6] = [
        Color32::from_rgb(109, 200, 238),
        Color32::from_rgb(238, 207, 109),
        Color32::from_rgb(109, 238, 150),
        Color32::from_rgb(238, 130, 109),
        Color32::from_rgb(180, 109, 238),
        Color32::from_rgb(238, 109, 170),
    ];
    if type_id.is_empty() {
        return Color32::from_rgb(150, 150, 150);
    }
    let hash = type_id
        .bytes()
        .fold(0u32, |acc, b| acc.wrapping_mul(31).wrapping_add(b as u32));
    PALETTE[hash as usize % PALETTE.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_grid_steps() {
        let theme = FlowViewTheme::default();
        assert_eq!(theme.fine_grid_step, 15.0);
        assert_eq!(theme.coarse_grid_step, 150.0);
    }

    #[test]
    fn port_color_is_stable_per_type() {
        let theme = FlowViewTheme::default();
        assert_eq!((theme.port_color)("pixmap"), (theme.port_color)("pixmap"));
        assert_eq!(theme.status_color(NodeStatus::Valid), None);
    }
}
