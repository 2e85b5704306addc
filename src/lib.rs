pub mod camera;
pub mod cli;
pub mod config;
pub mod controls;
pub mod core;
pub mod frame;
pub mod math;
pub mod page;
pub mod renderer;
pub mod scene;
pub mod state;
pub mod timeline;
pub mod types;

pub use state::{AppState, Stage};
