use std::any::Any;
use std::sync::Arc;

use image::RgbaImage;
use nodes::{NodeData, NodeDataType};
use uuid::Uuid;

/// A decoded RGBA image travelling between nodes.
///
/// `revision` changes whenever a new image is produced, so views can tell
/// when a cached texture is stale.
#[derive(Debug, Clone)]
pub struct PixmapData {
    image: Arc<RgbaImage>,
    revision: Uuid,
}

impl PixmapData {
    pub fn new(image: RgbaImage) -> Self {
        Self {
            image: Arc::new(image),
            revision: Uuid::new_v4(),
        }
    }

    pub fn data_type() -> NodeDataType {
        NodeDataType::new("pixmap", "P")
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn revision(&self) -> Uuid {
        self.revision
    }

    pub fn size(&self) -> (u32, u32) {
        self.image.dimensions()
    }
}

impl NodeData for PixmapData {
    fn data_type(&self) -> NodeDataType {
        Self::data_type()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
