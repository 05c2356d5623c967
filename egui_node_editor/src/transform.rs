//! Viewport transform: scene coordinates <-> canvas pixels.

use egui::{Pos2, Rect, Vec2};

/// Multiplicative zoom step per wheel notch.
pub const ZOOM_STEP: f32 = 1.2;
/// Scale-up stops here. Scale-down has no floor.
pub const MAX_ZOOM: f32 = 2.0;

/// Uniform scale plus translation, relative to the canvas top-left corner.
///
/// `canvas = translation + scene * scale`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewTransform {
    pub scale: f32,
    pub translation: Vec2,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self {
            scale: 1.0,
            translation: Vec2::ZERO,
        }
    }
}

impl ViewTransform {
    /// Horizontal scale component.
    pub fn m11(&self) -> f32 {
        self.scale
    }

    /// Map a screen position to the scene, given the canvas origin on screen.
    pub fn map_to_scene(&self, canvas_min: Pos2, screen: Pos2) -> Pos2 {
        ((screen - canvas_min - self.translation) / self.scale).to_pos2()
    }

    pub fn map_from_scene(&self, canvas_min: Pos2, scene: Pos2) -> Pos2 {
        canvas_min + self.translation + scene.to_vec2() * self.scale
    }

    /// Scene rectangle currently covered by `canvas_rect`.
    pub fn visible_scene_rect(&self, canvas_rect: Rect) -> Rect {
        Rect::from_min_max(
            self.map_to_scene(canvas_rect.min, canvas_rect.min),
            self.map_to_scene(canvas_rect.min, canvas_rect.max),
        )
    }

    pub fn pan(&mut self, delta: Vec2) {
        self.translation += delta;
    }

    /// Change the scale while keeping the scene point under `anchor` in place.
    /// `anchor` is relative to the canvas origin.
    pub fn set_scale_about(&mut self, new_scale: f32, anchor: Vec2) {
        let scene_anchor = (anchor - self.translation) / self.scale;
        self.scale = new_scale;
        self.translation = anchor - scene_anchor * new_scale;
    }

    /// Zoom in one step, capped at [`MAX_ZOOM`]. Returns false if already capped.
    pub fn scale_up(&mut self, anchor: Vec2) -> bool {
        if self.scale >= MAX_ZOOM {
            return false;
        }
        let target = (self.scale * ZOOM_STEP).min(MAX_ZOOM);
        self.set_scale_about(target, anchor);
        true
    }

    pub fn scale_down(&mut self, anchor: Vec2) {
        let target = self.scale / ZOOM_STEP;
        self.set_scale_about(target, anchor);
    }

    /// Apply a wheel event. Only the sign of `delta_y` matters; zero is ignored.
    pub fn apply_wheel(&mut self, delta_y: f32, anchor: Vec2) -> bool {
        if delta_y > 0.0 {
            self.scale_up(anchor)
        } else if delta_y < 0.0 {
            self.scale_down(anchor);
            true
        } else {
            false
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_wheel_delta_keeps_transform() {
        let mut t = ViewTransform {
            scale: 1.3,
            translation: Vec2::new(12.0, -4.0),
        };
        let before = t;
        assert!(!t.apply_wheel(0.0, Vec2::new(100.0, 100.0)));
        assert_eq!(t, before);
    }

    #[test]
    fn scale_up_never_exceeds_cap() {
        let mut t = ViewTransform::default();
        for _ in 0..20 {
            t.apply_wheel(120.0, Vec2::new(40.0, 30.0));
            assert!(t.m11() <= MAX_ZOOM);
        }
        assert_eq!(t.m11(), MAX_ZOOM);
        assert!(!t.scale_up(Vec2::ZERO));
    }

    #[test]
    fn scale_down_is_uncapped() {
        let mut t = ViewTransform::default();
        for _ in 0..30 {
            t.apply_wheel(-120.0, Vec2::ZERO);
        }
        assert!(t.m11() < 0.01);
        assert!(t.m11() > 0.0);
    }

    #[test]
    fn zoom_keeps_point_under_anchor() {
        let mut t = ViewTransform {
            scale: 1.0,
            translation: Vec2::new(50.0, 20.0),
        };
        let origin = Pos2::new(10.0, 10.0);
        let anchor_screen = Pos2::new(210.0, 160.0);
        let scene_before = t.map_to_scene(origin, anchor_screen);

        t.scale_up(anchor_screen - origin);
        let scene_after = t.map_to_scene(origin, anchor_screen);

        assert!((scene_before - scene_after).length() < 1e-3);
        assert!((t.m11() - ZOOM_STEP).abs() < 1e-6);
    }

    #[test]
    fn map_round_trip() {
        let t = ViewTransform {
            scale: 0.5,
            translation: Vec2::new(-30.0, 8.0),
        };
        let origin = Pos2::new(100.0, 50.0);
        let scene = Pos2::new(42.0, -17.0);
        let back = t.map_to_scene(origin, t.map_from_scene(origin, scene));
        assert!((back - scene).length() < 1e-4);
    }

    #[test]
    fn visible_rect_follows_scale() {
        let t = ViewTransform {
            scale: 2.0,
            translation: Vec2::ZERO,
        };
        let canvas = Rect::from_min_size(Pos2::new(0.0, 0.0), Vec2::new(800.0, 600.0));
        let visible = t.visible_scene_rect(canvas);
        assert_eq!(visible.min, Pos2::ZERO);
        assert_eq!(visible.max, Pos2::new(400.0, 300.0));
    }
}
