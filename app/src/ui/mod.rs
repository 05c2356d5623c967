pub mod menu;
pub mod panels;
