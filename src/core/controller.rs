/// Input button identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    MouseLeft,
    MouseRight,
    Control,
}

/// Where a jump scroll lands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollTarget {
    Home,
    End,
}

/// High-level action derived from raw window input
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputAction {
    /// Scroll the page by logical pixels (positive is down)
    ScrollBy(f32),
    ScrollTo(ScrollTarget),
    /// Orbit drag in logical pixels
    Orbit(f32, f32),
    /// Pan drag in logical pixels
    Pan(f32, f32),
    /// Dolly steps; positive moves toward the target
    Dolly(f32),
    Quit,
}

/// Controller - handles button input states
pub trait Controller {
    /// Check if button is currently down
    fn is_down(&self, button: Button) -> bool;
}
