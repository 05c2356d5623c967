use std::any::Any;
use std::sync::Arc;

use nodes::{NodeData, NodeDataModel, NodeDataType, NodeValidationState, PortIndex, PortType};

use super::pixmap_data::PixmapData;

/// Display node: shows the incoming image and passes it through unchanged.
#[derive(Default)]
pub struct ImageShowModel {
    data: Option<Arc<dyn NodeData>>,
}

impl ImageShowModel {
    pub const NAME: &'static str = "ImageShowModel";

    pub fn pixmap(&self) -> Option<&PixmapData> {
        self.data.as_ref()?.as_any().downcast_ref::<PixmapData>()
    }
}

impl NodeDataModel for ImageShowModel {
    fn name(&self) -> String {
        Self::NAME.to_string()
    }

    fn caption(&self) -> String {
        "Image Display".to_string()
    }

    fn n_ports(&self, _port_type: PortType) -> usize {
        1
    }

    fn data_type(&self, _port_type: PortType, _index: PortIndex) -> NodeDataType {
        PixmapData::data_type()
    }

    fn set_in_data(&mut self, data: Option<Arc<dyn NodeData>>, _index: PortIndex) {
        // Only pixmaps are accepted; anything else clears the display.
        self.data = data.filter(|d| d.as_any().is::<PixmapData>());
    }

    fn out_data(&self, _index: PortIndex) -> Option<Arc<dyn NodeData>> {
        self.data.clone()
    }

    fn validation_state(&self) -> NodeValidationState {
        if self.data.is_some() {
            NodeValidationState::Valid
        } else {
            NodeValidationState::Warning
        }
    }

    fn validation_message(&self) -> String {
        if self.data.is_some() {
            String::new()
        } else {
            "Missing input image".to_string()
        }
    }

    fn description(&self) -> Option<String> {
        match self.pixmap() {
            Some(p) => {
                let (w, h) = p.size();
                Some(format!("{} x {}", w, h))
            }
            None => Some("Image will appear here".to_string()),
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
