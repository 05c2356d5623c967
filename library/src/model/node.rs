//! A node placed in the scene.

use uuid::Uuid;

use super::data_model::NodeDataModel;
use super::geometry::Point;

/// A node instance: a data model plus where it sits on the canvas.
pub struct Node {
    id: Uuid,
    model: Box<dyn NodeDataModel>,
    position: Point,
}

impl Node {
    pub fn new(model: Box<dyn NodeDataModel>) -> Self {
        Self {
            id: Uuid::new_v4(),
            model,
            position: Point::ZERO,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn model(&self) -> &dyn NodeDataModel {
        self.model.as_ref()
    }

    pub fn model_mut(&mut self) -> &mut dyn NodeDataModel {
        self.model.as_mut()
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    /// Downcast the model to a concrete type.
    pub fn model_as<M: NodeDataModel>(&self) -> Option<&M> {
        self.model.as_any().downcast_ref::<M>()
    }

    pub fn model_as_mut<M: NodeDataModel>(&mut self) -> Option<&mut M> {
        self.model.as_any_mut().downcast_mut::<M>()
    }
}

impl std::fmt::Debug for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Node")
            .field("id", &self.id)
            .field("model", &self.model.name())
            .field("position", &self.position)
            .finish()
    }
}
