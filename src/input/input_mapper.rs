//! Input mapping from raw events to semantic actions
//!
//! Maps keyboard and mouse input to high-level actions like camera switches,
//! clock control and display toggles. Camera movement keys (WASD, Shift,
//! Ctrl) are NOT mapped here - they go directly to CameraController.

use winit::event::{ElementState, MouseButton};
use winit::keyboard::KeyCode;

/// Actions triggered by special input (not movement)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    /// Toggle cursor capture (Escape when captured, click in free camera)
    ToggleCursor,
    /// Exit application (Escape when not captured)
    Exit,
    /// Reset camera to the overview pose (R key)
    ResetCamera,
    /// Toggle fullscreen mode (F key)
    ToggleFullscreen,
    /// Switch to the free camera (F1)
    FreeCamera,
    /// Switch to the overview camera (Space)
    OverviewCamera,
    /// Follow the n-th trackable body, 1-based (number keys 1-9)
    TrackBody(usize),
    /// Swap the sky palette (E key)
    ToggleSkybox,
    /// Stop or restart the clock (P key)
    TogglePause,
    /// Double the time scale (+)
    SpeedUp,
    /// Halve the time scale (-)
    SlowDown,
    /// Show or hide orbit guides (O key)
    ToggleOrbits,
    /// Toggle input smoothing (G key)
    ToggleSmoothing,
}

/// Maps raw input events to semantic actions
///
/// Movement keys are NOT mapped here. This mapper handles "special" keys only.
pub struct InputMapper;

impl InputMapper {
    /// Map keyboard input to an action
    ///
    /// Returns `Some(action)` for special keys, `None` for movement keys
    pub fn map_keyboard(
        key: KeyCode,
        state: ElementState,
        cursor_captured: bool,
    ) -> Option<InputAction> {
        // Only handle key presses, not releases
        if state != ElementState::Pressed {
            return None;
        }

        match key {
            KeyCode::Escape => {
                if cursor_captured {
                    Some(InputAction::ToggleCursor)
                } else {
                    Some(InputAction::Exit)
                }
            }
            KeyCode::KeyR => Some(InputAction::ResetCamera),
            KeyCode::KeyF => Some(InputAction::ToggleFullscreen),
            KeyCode::F1 => Some(InputAction::FreeCamera),
            KeyCode::Space => Some(InputAction::OverviewCamera),
            KeyCode::KeyE => Some(InputAction::ToggleSkybox),
            KeyCode::KeyP => Some(InputAction::TogglePause),
            KeyCode::Equal | KeyCode::NumpadAdd => Some(InputAction::SpeedUp),
            KeyCode::Minus | KeyCode::NumpadSubtract => Some(InputAction::SlowDown),
            KeyCode::KeyO => Some(InputAction::ToggleOrbits),
            KeyCode::KeyG => Some(InputAction::ToggleSmoothing),
            _ => Self::digit(key).map(InputAction::TrackBody),
        }
    }

    /// Map mouse button to an action
    ///
    /// Left click captures the cursor, but only when `capture_allowed`
    /// (the free camera); in the overview the left button drags the orbit.
    pub fn map_mouse_button(
        button: MouseButton,
        state: ElementState,
        cursor_captured: bool,
        capture_allowed: bool,
    ) -> Option<InputAction> {
        if button == MouseButton::Left
            && state == ElementState::Pressed
            && !cursor_captured
            && capture_allowed
        {
            Some(InputAction::ToggleCursor)
        } else {
            None
        }
    }

    /// 1-9 from the top row or the keypad
    fn digit(key: KeyCode) -> Option<usize> {
        let n = match key {
            KeyCode::Digit1 | KeyCode::Numpad1 => 1,
            KeyCode::Digit2 | KeyCode::Numpad2 => 2,
            KeyCode::Digit3 | KeyCode::Numpad3 => 3,
            KeyCode::Digit4 | KeyCode::Numpad4 => 4,
            KeyCode::Digit5 | KeyCode::Numpad5 => 5,
            KeyCode::Digit6 | KeyCode::Numpad6 => 6,
            KeyCode::Digit7 | KeyCode::Numpad7 => 7,
            KeyCode::Digit8 | KeyCode::Numpad8 => 8,
            KeyCode::Digit9 | KeyCode::Numpad9 => 9,
            _ => return None,
        };
        Some(n)
    }
}
