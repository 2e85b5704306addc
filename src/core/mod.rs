pub mod controller;
pub mod gpu_context;
pub mod input_adapter;
pub mod viewport;

pub use controller::{Button, Controller, InputAction, ScrollTarget};
pub use gpu_context::GpuContext;
pub use input_adapter::WinitController;
pub use viewport::{Viewport, MAX_PIXEL_RATIO};
