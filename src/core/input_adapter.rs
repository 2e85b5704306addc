use winit::dpi::PhysicalPosition;
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use super::controller::{Button, Controller, InputAction, ScrollTarget};
use super::viewport::Viewport;

pub const DEFAULT_LINE_HEIGHT: f32 = 100.0;
pub const DEFAULT_PAGE_FRACTION: f32 = 0.9;

/// Adapter that turns Winit events into `InputAction`s
#[derive(Debug, Clone)]
pub struct WinitController {
    /// Currently pressed buttons
    pressed: Vec<Button>,
    /// Last cursor position in logical pixels
    mouse_position: Option<(f32, f32)>,
    /// Logical pixels scrolled per wheel line or arrow key
    line_height: f32,
    /// Fraction of the viewport scrolled by page keys
    page_fraction: f32,
}

impl WinitController {
    pub fn new(line_height: f32, page_fraction: f32) -> Self {
        Self {
            pressed: Vec::new(),
            mouse_position: None,
            line_height,
            page_fraction,
        }
    }

    /// Process a Winit WindowEvent, returning the action it maps to
    pub fn process_event(&mut self, event: &WindowEvent, viewport: &Viewport) -> Option<InputAction> {
        match event {
            WindowEvent::CloseRequested => Some(InputAction::Quit),
            WindowEvent::KeyboardInput { event, .. } => match (event.state, event.physical_key) {
                (ElementState::Pressed, PhysicalKey::Code(code)) => self.key(code, viewport.height),
                _ => None,
            },
            WindowEvent::ModifiersChanged(modifiers) => {
                self.set_down(Button::Control, modifiers.state().control_key());
                None
            }
            WindowEvent::MouseInput { state, button, .. } => {
                self.mouse_button(*button, *state);
                None
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor_moved(*position, viewport.scale_factor)
            }
            WindowEvent::CursorLeft { .. } => {
                self.mouse_position = None;
                None
            }
            WindowEvent::MouseWheel { delta, .. } => self.wheel(*delta, viewport.scale_factor),
            _ => None,
        }
    }

    pub fn key(&self, code: KeyCode, viewport_height: f32) -> Option<InputAction> {
        let page = viewport_height * self.page_fraction;
        match code {
            KeyCode::Escape => Some(InputAction::Quit),
            KeyCode::ArrowDown => Some(InputAction::ScrollBy(self.line_height)),
            KeyCode::ArrowUp => Some(InputAction::ScrollBy(-self.line_height)),
            KeyCode::PageDown | KeyCode::Space => Some(InputAction::ScrollBy(page)),
            KeyCode::PageUp => Some(InputAction::ScrollBy(-page)),
            KeyCode::Home => Some(InputAction::ScrollTo(ScrollTarget::Home)),
            KeyCode::End => Some(InputAction::ScrollTo(ScrollTarget::End)),
            _ => None,
        }
    }

    pub fn mouse_button(&mut self, button: MouseButton, state: ElementState) {
        let button = match button {
            MouseButton::Left => Button::MouseLeft,
            MouseButton::Right => Button::MouseRight,
            _ => return,
        };
        self.set_down(button, state.is_pressed());
    }

    /// Drag deltas become orbit (left button) or pan (right button)
    pub fn cursor_moved(&mut self, position: PhysicalPosition<f64>, scale_factor: f64) -> Option<InputAction> {
        let logical = position.to_logical::<f64>(scale_factor);
        let new_pos = (logical.x as f32, logical.y as f32);
        let old_pos = self.mouse_position.replace(new_pos)?;
        let (dx, dy) = (new_pos.0 - old_pos.0, new_pos.1 - old_pos.1);

        if self.is_down(Button::MouseLeft) {
            Some(InputAction::Orbit(dx, dy))
        } else if self.is_down(Button::MouseRight) {
            Some(InputAction::Pan(dx, dy))
        } else {
            None
        }
    }

    /// Wheel scrolls the page; with control held it dollies the camera
    pub fn wheel(&self, delta: MouseScrollDelta, scale_factor: f64) -> Option<InputAction> {
        // winit reports positive y when the wheel turns away from the user
        let pixels = match delta {
            MouseScrollDelta::LineDelta(_, y) => y * self.line_height,
            MouseScrollDelta::PixelDelta(p) => p.to_logical::<f64>(scale_factor).y as f32,
        };
        if pixels == 0.0 {
            return None;
        }
        if self.is_down(Button::Control) {
            Some(InputAction::Dolly(pixels.signum()))
        } else {
            Some(InputAction::ScrollBy(-pixels))
        }
    }

    pub fn mouse_position(&self) -> Option<(f32, f32)> {
        self.mouse_position
    }

    fn set_down(&mut self, button: Button, down: bool) {
        if down {
            if !self.pressed.contains(&button) {
                self.pressed.push(button);
            }
        } else {
            self.pressed.retain(|&b| b != button);
        }
    }
}

impl Default for WinitController {
    fn default() -> Self {
        Self::new(DEFAULT_LINE_HEIGHT, DEFAULT_PAGE_FRACTION)
    }
}

impl Controller for WinitController {
    fn is_down(&self, button: Button) -> bool {
        self.pressed.contains(&button)
    }
}
