mod color;

pub use color::{srgb_to_linear, Color};

/// Clamp `t` into [0, 1]; NaN maps to 0
pub fn saturate(t: f32) -> f32 {
    if t.is_nan() {
        0.0
    } else {
        t.clamp(0.0, 1.0)
    }
}
