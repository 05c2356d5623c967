//! Small numeric node models shared by the integration tests.

#![allow(dead_code)]

use std::any::Any;
use std::sync::Arc;

use nodes::{
    DataModelRegistry, NodeData, NodeDataModel, NodeDataType, NodeValidationState, PortIndex,
    PortType,
};

#[derive(Debug)]
pub struct DecimalData(pub f64);

impl NodeData for DecimalData {
    fn data_type(&self) -> NodeDataType {
        decimal_type()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

pub fn decimal_type() -> NodeDataType {
    NodeDataType::new("decimal", "Decimal")
}

pub fn text_type() -> NodeDataType {
    NodeDataType::new("text", "Text")
}

fn value_of(data: &Option<Arc<dyn NodeData>>) -> Option<f64> {
    data.as_ref()
        .and_then(|d| d.as_any().downcast_ref::<DecimalData>())
        .map(|d| d.0)
}

/// Emits a fixed number.
#[derive(Default)]
pub struct NumberSource {
    pub value: f64,
}

impl NodeDataModel for NumberSource {
    fn name(&self) -> String {
        "NumberSource".into()
    }

    fn n_ports(&self, port_type: PortType) -> usize {
        match port_type {
            PortType::In => 0,
            PortType::Out => 1,
        }
    }

    fn data_type(&self, _: PortType, _: PortIndex) -> NodeDataType {
        decimal_type()
    }

    fn set_in_data(&mut self, _: Option<Arc<dyn NodeData>>, _: PortIndex) {}

    fn out_data(&self, _: PortIndex) -> Option<Arc<dyn NodeData>> {
        Some(Arc::new(DecimalData(self.value)))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Doubles its input.
#[derive(Default)]
pub struct Doubler {
    input: Option<f64>,
}

impl NodeDataModel for Doubler {
    fn name(&self) -> String {
        "Doubler".into()
    }

    fn n_ports(&self, _: PortType) -> usize {
        1
    }

    fn data_type(&self, _: PortType, _: PortIndex) -> NodeDataType {
        decimal_type()
    }

    fn set_in_data(&mut self, data: Option<Arc<dyn NodeData>>, _: PortIndex) {
        self.input = value_of(&data);
    }

    fn out_data(&self, _: PortIndex) -> Option<Arc<dyn NodeData>> {
        self.input
            .map(|v| Arc::new(DecimalData(v * 2.0)) as Arc<dyn NodeData>)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Records the last value it received.
#[derive(Default)]
pub struct NumberSink {
    pub received: Option<f64>,
}

impl NodeDataModel for NumberSink {
    fn name(&self) -> String {
        "NumberSink".into()
    }

    fn n_ports(&self, port_type: PortType) -> usize {
        match port_type {
            PortType::In => 1,
            PortType::Out => 0,
        }
    }

    fn data_type(&self, _: PortType, _: PortIndex) -> NodeDataType {
        decimal_type()
    }

    fn set_in_data(&mut self, data: Option<Arc<dyn NodeData>>, _: PortIndex) {
        self.received = value_of(&data);
    }

    fn out_data(&self, _: PortIndex) -> Option<Arc<dyn NodeData>> {
        None
    }

    fn validation_state(&self) -> NodeValidationState {
        if self.received.is_some() {
            NodeValidationState::Valid
        } else {
            NodeValidationState::Warning
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Accepts text only.
#[derive(Default)]
pub struct TextSink;

impl NodeDataModel for TextSink {
    fn name(&self) -> String {
        "TextSink".into()
    }

    fn n_ports(&self, port_type: PortType) -> usize {
        match port_type {
            PortType::In => 1,
            PortType::Out => 0,
        }
    }

    fn data_type(&self, _: PortType, _: PortIndex) -> NodeDataType {
        text_type()
    }

    fn set_in_data(&mut self, _: Option<Arc<dyn NodeData>>, _: PortIndex) {}

    fn out_data(&self, _: PortIndex) -> Option<Arc<dyn NodeData>> {
        None
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

pub fn make_registry() -> Arc<DataModelRegistry> {
    let registry = DataModelRegistry::new();
    registry.register_model::<NumberSource>().unwrap();
    registry.register_model::<Doubler>().unwrap();
    registry.register_model::<NumberSink>().unwrap();
    registry.register_model::<TextSink>().unwrap();
    Arc::new(registry)
}
