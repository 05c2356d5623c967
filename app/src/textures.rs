//! GPU textures for node previews, uploaded once per pixmap revision.

use std::collections::HashMap;

use eframe::egui::{self, ColorImage, TextureHandle, TextureOptions, Vec2};
use egui_node_editor::NodePreview;
use log::debug;
use nodes::FlowScene;
use uuid::Uuid;

use crate::models::{node_pixmap, PixmapData};

/// Largest preview drawn inside a node, in scene units.
const MAX_PREVIEW: Vec2 = Vec2::new(200.0, 150.0);

struct CachedTexture {
    revision: Uuid,
    handle: TextureHandle,
    size: Vec2,
}

#[derive(Default)]
pub struct TextureCache {
    entries: HashMap<Uuid, CachedTexture>,
}

impl TextureCache {
    /// Bring the cache in line with the images currently held by the scene.
    pub fn sync(&mut self, ctx: &egui::Context, scene: &FlowScene) {
        let mut live = Vec::new();
        for node in scene.nodes() {
            let Some(pixmap) = node_pixmap(node) else {
                continue;
            };
            live.push(node.id());
            let stale = self
                .entries
                .get(&node.id())
                .is_none_or(|e| e.revision != pixmap.revision());
            if stale {
                debug!("Uploading preview for node {}", node.id());
                let entry = upload(ctx, node.id(), pixmap);
                self.entries.insert(node.id(), entry);
            }
        }
        self.entries.retain(|id, _| live.contains(id));
    }

    pub fn preview(&self, node_id: Uuid) -> Option<NodePreview> {
        self.entries.get(&node_id).map(|e| NodePreview {
            texture: e.handle.id(),
            size: e.size,
        })
    }
}

fn upload(ctx: &egui::Context, node_id: Uuid, pixmap: &PixmapData) -> CachedTexture {
    let (w, h) = pixmap.size();
    let image = ColorImage::from_rgba_unmultiplied([w as usize, h as usize], pixmap.image().as_raw());
    CachedTexture {
        revision: pixmap.revision(),
        handle: ctx.load_texture(format!("preview-{}", node_id), image, TextureOptions::LINEAR),
        size: fit_within(Vec2::new(w as f32, h as f32), MAX_PREVIEW),
    }
}

/// Scale `size` down (never up) to fit `bounds`, keeping the aspect ratio.
pub fn fit_within(size: Vec2, bounds: Vec2) -> Vec2 {
    if size.x <= 0.0 || size.y <= 0.0 {
        return Vec2::ZERO;
    }
    let factor = (bounds.x / size.x).min(bounds.y / size.y).min(1.0);
    size * factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn large_images_shrink_to_bounds() {
        let fitted = fit_within(Vec2::new(800.0, 300.0), MAX_PREVIEW);
        assert_eq!(fitted, Vec2::new(200.0, 75.0));
    }

    #[test]
    fn small_images_keep_their_size() {
        assert_eq!(fit_within(Vec2::new(40.0, 30.0), MAX_PREVIEW), Vec2::new(40.0, 30.0));
        assert_eq!(fit_within(Vec2::new(0.0, 30.0), MAX_PREVIEW), Vec2::ZERO);
    }
}
