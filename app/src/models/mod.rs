//! Example node types: an image source and an image display.

pub mod image_loader;
pub mod image_show;
pub mod pixmap_data;

pub use image_loader::ImageLoaderModel;
pub use image_show::ImageShowModel;
pub use pixmap_data::PixmapData;

use nodes::{DataModelRegistry, Node, NodesError};

/// Register every node type the editor offers.
pub fn register_data_models(registry: &DataModelRegistry) -> Result<(), NodesError> {
    registry.register_model::<ImageShowModel>()?;
    registry.register_model::<ImageLoaderModel>()?;
    Ok(())
}

/// Image currently held by a node, if its model carries one.
pub fn node_pixmap(node: &Node) -> Option<&PixmapData> {
    if let Some(loader) = node.model_as::<ImageLoaderModel>() {
        return loader.pixmap();
    }
    node.model_as::<ImageShowModel>()?.pixmap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registers_both_models_once() {
        let registry = DataModelRegistry::new();
        register_data_models(&registry).expect("first registration");
        assert_eq!(
            registry.registered_model_names(),
            vec![
                ImageLoaderModel::NAME.to_string(),
                ImageShowModel::NAME.to_string()
            ]
        );
        assert!(matches!(
            register_data_models(&registry),
            Err(NodesError::DuplicateModel(_))
        ));
    }
}
