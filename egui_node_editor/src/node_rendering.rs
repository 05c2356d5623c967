//! Node layout computation and drawing primitives.

use egui::{self, Color32, Pos2, Rect, Stroke, StrokeKind, Vec2};
use uuid::Uuid;

use crate::theme::FlowViewTheme;
use crate::types::{NodeDisplay, PortAddress, PortInfo, PortSide};
use crate::widget::PortScreen;

/// Below this font size (pixels) text is skipped.
const MIN_FONT_PX: f32 = 3.0;

/// Node layout in scene units, relative to the node's top-left corner.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct NodeGeometry {
    pub size: Vec2,
    pub header_h: f32,
    pub ports_top: f32,
    pub description_top: Option<f32>,
    pub preview_rect: Option<Rect>,
    pub footer_top: Option<f32>,
}

impl NodeGeometry {
    pub fn measure(display: &NodeDisplay, theme: &FlowViewTheme) -> Self {
        let pad = theme.node_padding;
        let header_h = if display.caption_visible {
            theme.header_height
        } else {
            pad
        };
        let rows = display.inputs.len().max(display.outputs.len());
        let ports_top = header_h + pad;
        let mut y = ports_top + rows as f32 * theme.port_row_height;

        let mut width = theme.node_width;

        let description_top = display.description.as_ref().map(|_| {
            let top = y;
            y += theme.text_row_height;
            top
        });

        let preview_rect = display.preview.map(|preview| {
            width = width.max(preview.size.x + 2.0 * pad);
            let rect = Rect::from_min_size(
                Pos2::new((width - preview.size.x) * 0.5, y + pad),
                preview.size,
            );
            y += preview.size.y + 2.0 * pad;
            rect
        });

        let footer_top = theme.status_color(display.status).map(|_| {
            let top = y;
            y += theme.text_row_height;
            top
        });

        Self {
            size: Vec2::new(width, y + pad),
            header_h,
            ports_top,
            description_top,
            preview_rect,
            footer_top,
        }
    }

    /// Offset of a port centre from the node's top-left corner.
    pub fn port_offset(&self, side: PortSide, index: usize, theme: &FlowViewTheme) -> Vec2 {
        let y = self.ports_top + (index as f32 + 0.5) * theme.port_row_height;
        let x = match side {
            PortSide::In => theme.port_margin,
            PortSide::Out => self.size.x - theme.port_margin,
        };
        Vec2::new(x, y)
    }
}

/// A node placed on screen for this frame.
pub(crate) struct NodeLayout {
    pub screen_pos: Pos2,
    pub scale: f32,
    pub geometry: NodeGeometry,
}

impl NodeLayout {
    pub fn rect(&self) -> Rect {
        Rect::from_min_size(self.screen_pos, self.geometry.size * self.scale)
    }

    pub fn port_pos(&self, side: PortSide, index: usize, theme: &FlowViewTheme) -> Pos2 {
        self.screen_pos + self.geometry.port_offset(side, index, theme) * self.scale
    }

    fn font(&self, size: f32) -> Option<egui::FontId> {
        let px = size * self.scale;
        (px >= MIN_FONT_PX).then(|| egui::FontId::proportional(px))
    }
}

/// Draw body, header, selection outline and the optional text rows.
pub(crate) fn draw_node_body(
    painter: &egui::Painter,
    layout: &NodeLayout,
    theme: &FlowViewTheme,
    display: &NodeDisplay,
    is_selected: bool,
) {
    let s = layout.scale;
    let rect = layout.rect();
    let rounding = theme.node_rounding * s;

    painter.rect_filled(rect, rounding, theme.node_body_color);

    if display.caption_visible {
        let header_rect =
            Rect::from_min_size(rect.min, Vec2::new(rect.width(), layout.geometry.header_h * s));
        painter.rect_filled(
            header_rect,
            egui::CornerRadius {
                nw: rounding as u8,
                ne: rounding as u8,
                sw: 0,
                se: 0,
            },
            theme.node_header_color,
        );
        if let Some(font) = layout.font(12.0) {
            painter.text(
                header_rect.center(),
                egui::Align2::CENTER_CENTER,
                &display.caption,
                font,
                theme.caption_color,
            );
        }
    }

    let (border_width, border_color) = if is_selected {
        (2.0, theme.selection_color)
    } else {
        (1.0, theme.node_border_color)
    };
    painter.rect_stroke(
        rect,
        rounding,
        Stroke::new(border_width, border_color),
        StrokeKind::Outside,
    );

    if let (Some(top), Some(text)) = (layout.geometry.description_top, &display.description) {
        if let Some(font) = layout.font(10.0) {
            painter.text(
                rect.min + Vec2::new(rect.width() * 0.5, (top + theme.text_row_height * 0.5) * s),
                egui::Align2::CENTER_CENTER,
                text,
                font,
                theme.description_color,
            );
        }
    }

    if let (Some(preview_rect), Some(preview)) = (layout.geometry.preview_rect, display.preview) {
        let screen_rect = Rect::from_min_size(
            rect.min + preview_rect.min.to_vec2() * s,
            preview_rect.size() * s,
        );
        painter.image(
            preview.texture,
            screen_rect,
            Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0)),
            Color32::WHITE,
        );
    }

    if let (Some(top), Some(color)) = (
        layout.geometry.footer_top,
        theme.status_color(display.status),
    ) {
        let footer = Rect::from_min_size(
            Pos2::new(rect.min.x, rect.min.y + top * s),
            Vec2::new(rect.width(), theme.text_row_height * s),
        );
        painter.rect_filled(footer.shrink(2.0 * s), 2.0 * s, color.gamma_multiply(0.25));
        if let Some(font) = layout.font(10.0) {
            let text = if display.status_message.is_empty() {
                format!("{:?}", display.status)
            } else {
                display.status_message.clone()
            };
            painter.text(footer.center(), egui::Align2::CENTER_CENTER, text, font, color);
        }
    }
}

/// Draw input and output ports, pushing a `PortScreen` for each.
pub(crate) fn draw_ports(
    painter: &egui::Painter,
    layout: &NodeLayout,
    theme: &FlowViewTheme,
    node_id: Uuid,
    display: &NodeDisplay,
    port_screens: &mut Vec<PortScreen>,
) {
    draw_port_column(painter, layout, theme, node_id, PortSide::In, &display.inputs, port_screens);
    draw_port_column(painter, layout, theme, node_id, PortSide::Out, &display.outputs, port_screens);
}

fn draw_port_column(
    painter: &egui::Painter,
    layout: &NodeLayout,
    theme: &FlowViewTheme,
    node_id: Uuid,
    side: PortSide,
    ports: &[PortInfo],
    port_screens: &mut Vec<PortScreen>,
) {
    let s = layout.scale;
    let r = theme.port_radius * s;
    for (index, port) in ports.iter().enumerate() {
        let p = layout.port_pos(side, index, theme);
        painter.circle_filled(p, r, (theme.port_color)(&port.type_id));
        painter.circle_stroke(p, r, Stroke::new(1.0, theme.node_border_color));

        if let Some(font) = layout.font(10.0) {
            let (offset, align) = match side {
                PortSide::In => (Vec2::new(r + 4.0 * s, 0.0), egui::Align2::LEFT_CENTER),
                PortSide::Out => (Vec2::new(-r - 4.0 * s, 0.0), egui::Align2::RIGHT_CENTER),
            };
            painter.text(p + offset, align, &port.caption, font, theme.port_label_color);
        }

        port_screens.push(PortScreen {
            pos: p,
            address: PortAddress {
                node_id,
                side,
                index,
            },
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{NodePreview, NodeStatus};

    fn display(inputs: usize, outputs: usize) -> NodeDisplay {
        NodeDisplay {
            caption: "Test".into(),
            caption_visible: true,
            inputs: (0..inputs).map(|_| PortInfo::new("P", "pixmap")).collect(),
            outputs: (0..outputs).map(|_| PortInfo::new("P", "pixmap")).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn height_grows_with_port_rows() {
        let theme = FlowViewTheme::default();
        let one = NodeGeometry::measure(&display(1, 1), &theme);
        let three = NodeGeometry::measure(&display(3, 1), &theme);
        assert_eq!(
            three.size.y - one.size.y,
            2.0 * theme.port_row_height
        );
        assert_eq!(one.size.x, theme.node_width);
    }

    #[test]
    fn ports_sit_on_node_edges() {
        let theme = FlowViewTheme::default();
        let geometry = NodeGeometry::measure(&display(2, 2), &theme);
        let input = geometry.port_offset(PortSide::In, 1, &theme);
        let output = geometry.port_offset(PortSide::Out, 1, &theme);
        assert_eq!(input.x, theme.port_margin);
        assert_eq!(output.x, geometry.size.x - theme.port_margin);
        assert_eq!(input.y, output.y);
        assert!(input.y < geometry.size.y);
    }

    #[test]
    fn preview_and_footer_extend_node() {
        let theme = FlowViewTheme::default();
        let plain = NodeGeometry::measure(&display(1, 1), &theme);

        let mut rich = display(1, 1);
        rich.status = NodeStatus::Warning;
        rich.preview = Some(NodePreview {
            texture: egui::TextureId::Managed(0),
            size: Vec2::new(300.0, 100.0),
        });
        let geometry = NodeGeometry::measure(&rich, &theme);

        assert!(geometry.size.x >= 300.0);
        assert!(geometry.footer_top.is_some());
        let preview = geometry.preview_rect.expect("preview rect");
        assert!((preview.center().x - geometry.size.x * 0.5).abs() < 1e-4);
        assert!(geometry.size.y > plain.size.y + 100.0);
    }

    #[test]
    fn layout_scales_to_screen() {
        let theme = FlowViewTheme::default();
        let layout = NodeLayout {
            screen_pos: Pos2::new(10.0, 20.0),
            scale: 0.5,
            geometry: NodeGeometry::measure(&display(1, 1), &theme),
        };
        assert_eq!(layout.rect().width(), theme.node_width * 0.5);
        assert_eq!(layout.rect().min, Pos2::new(10.0, 20.0));
    }
}
