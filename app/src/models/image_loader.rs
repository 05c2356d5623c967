use std::any::Any;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use image::RgbaImage;
use log::info;
use nodes::{NodeData, NodeDataModel, NodeDataType, PortIndex, PortType};

use super::pixmap_data::PixmapData;

/// Source node: holds an image loaded from disk and offers it on its output.
#[derive(Default)]
pub struct ImageLoaderModel {
    pixmap: Option<Arc<PixmapData>>,
    source_path: Option<PathBuf>,
}

impl ImageLoaderModel {
    pub const NAME: &'static str = "ImageLoaderModel";

    /// Decode `path` and make it the current output.
    pub fn load_file(&mut self, path: &Path) -> anyhow::Result<()> {
        let image = image::open(path)
            .with_context(|| format!("Failed to decode image {}", path.display()))?
            .to_rgba8();
        info!(
            "Loaded {} ({}x{})",
            path.display(),
            image.width(),
            image.height()
        );
        self.set_image(image);
        self.source_path = Some(path.to_path_buf());
        Ok(())
    }

    pub fn set_image(&mut self, image: RgbaImage) {
        self.pixmap = Some(Arc::new(PixmapData::new(image)));
        self.source_path = None;
    }

    pub fn pixmap(&self) -> Option<&PixmapData> {
        self.pixmap.as_deref()
    }

    pub fn source_path(&self) -> Option<&Path> {
        self.source_path.as_deref()
    }
}

impl NodeDataModel for ImageLoaderModel {
    fn name(&self) -> String {
        Self::NAME.to_string()
    }

    fn caption(&self) -> String {
        "Image Source".to_string()
    }

    fn n_ports(&self, port_type: PortType) -> usize {
        match port_type {
            PortType::In => 0,
            PortType::Out => 1,
        }
    }

    fn data_type(&self, _port_type: PortType, _index: PortIndex) -> NodeDataType {
        PixmapData::data_type()
    }

    fn set_in_data(&mut self, _data: Option<Arc<dyn NodeData>>, _index: PortIndex) {}

    fn out_data(&self, _index: PortIndex) -> Option<Arc<dyn NodeData>> {
        self.pixmap.clone().map(|p| p as Arc<dyn NodeData>)
    }

    fn description(&self) -> Option<String> {
        match (&self.pixmap, &self.source_path) {
            (None, _) => Some("Double click to load image".to_string()),
            (Some(_), Some(path)) => path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned()),
            (Some(_), None) => None,
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_loader_has_no_output() {
        let model = ImageLoaderModel::default();
        assert!(model.out_data(0).is_none());
        assert_eq!(model.n_ports(PortType::In), 0);
        assert_eq!(model.n_ports(PortType::Out), 1);
        assert_eq!(
            model.description().as_deref(),
            Some("Double click to load image")
        );
    }

    #[test]
    fn set_image_publishes_pixmap() {
        let mut model = ImageLoaderModel::default();
        model.set_image(RgbaImage::new(3, 2));
        let out = model.out_data(0).expect("output");
        assert_eq!(out.data_type(), PixmapData::data_type());
        let pixmap = out.as_any().downcast_ref::<PixmapData>().expect("pixmap");
        assert_eq!(pixmap.size(), (3, 2));
    }

    #[test]
    fn missing_file_is_an_error() {
        let mut model = ImageLoaderModel::default();
        let err = model
            .load_file(Path::new("/definitely/not/here.png"))
            .unwrap_err();
        assert!(err.to_string().contains("Failed to decode image"));
        assert!(model.pixmap().is_none());
    }

    #[test]
    fn load_file_round_trips_png() {
        let path = std::env::temp_dir().join(format!("flow_editor_{}.png", uuid::Uuid::new_v4()));
        RgbaImage::new(5, 4).save(&path).expect("write png");

        let mut model = ImageLoaderModel::default();
        model.load_file(&path).expect("load");
        assert_eq!(model.pixmap().map(PixmapData::size), Some((5, 4)));
        assert_eq!(model.source_path(), Some(path.as_path()));
        assert!(model.description().is_some_and(|d| d.ends_with(".png")));

        let _ = std::fs::remove_file(&path);
    }
}
