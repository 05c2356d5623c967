pub mod node_editor;
pub mod status_bar;
