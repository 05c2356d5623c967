pub mod connection;
pub mod data_model;
pub mod geometry;
pub mod node;
pub mod node_data;
