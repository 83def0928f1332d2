pub mod classify;
pub mod cli;
pub mod error;
pub mod label;
pub mod loader;
pub mod model;
pub mod render;
pub mod sort;
pub mod state;
pub mod view;
