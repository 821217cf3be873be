//! Window management system
//!
//! Handles window creation, cursor capture/release, fullscreen toggle, and
//! the title, which doubles as the overlay text display.

use std::sync::Arc;
use winit::{
    event_loop::ActiveEventLoop,
    window::{CursorGrabMode, Fullscreen, Window},
};
use crate::config::WindowConfig;

/// Manages the application window and cursor state
pub struct WindowSystem {
    window: Arc<Window>,
    cursor_captured: bool,
    base_title: String,
}

impl WindowSystem {
    /// Create window from config
    pub fn create(
        event_loop: &ActiveEventLoop,
        config: &WindowConfig,
    ) -> Result<Self, WindowError> {
        let mut attrs = Window::default_attributes()
            .with_title(&config.title)
            .with_inner_size(winit::dpi::LogicalSize::new(
                config.width,
                config.height,
            ));

        if config.fullscreen {
            attrs = attrs.with_fullscreen(Some(Fullscreen::Borderless(None)));
        }

        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .map_err(|e| WindowError::CreationFailed(e.to_string()))?,
        );

        Ok(Self {
            window,
            cursor_captured: false,
            base_title: config.title.clone(),
        })
    }

    /// Get window reference (for RenderContext creation)
    pub fn window(&self) -> &Arc<Window> {
        &self.window
    }

    /// Check if cursor is captured
    pub fn is_cursor_captured(&self) -> bool {
        self.cursor_captured
    }

    /// Capture cursor for free-camera mouse look
    pub fn capture_cursor(&mut self) -> bool {
        let grab_result = self.window
            .set_cursor_grab(CursorGrabMode::Locked)
            .or_else(|_| self.window.set_cursor_grab(CursorGrabMode::Confined));

        if grab_result.is_ok() {
            self.window.set_cursor_visible(false);
            self.cursor_captured = true;
            log::info!("Cursor captured - Escape to release");
            true
        } else {
            log::warn!("Failed to capture cursor");
            false
        }
    }

    /// Release cursor
    pub fn release_cursor(&mut self) {
        if !self.cursor_captured {
            return;
        }
        let _ = self.window.set_cursor_grab(CursorGrabMode::None);
        self.window.set_cursor_visible(true);
        self.cursor_captured = false;
        log::info!("Cursor released");
    }

    /// Toggle fullscreen mode
    pub fn toggle_fullscreen(&self) {
        let new_fullscreen = if self.window.fullscreen().is_some() {
            None
        } else {
            Some(Fullscreen::Borderless(None))
        };
        self.window.set_fullscreen(new_fullscreen);
    }

    /// Show the overlay lines in the title
    pub fn update_title(&self, overlay: &[String]) {
        self.window
            .set_title(&compose_title(&self.base_title, overlay, self.cursor_captured));
    }

    /// Request a redraw
    pub fn request_redraw(&self) {
        self.window.request_redraw();
    }
}

/// Window title for the given overlay lines
fn compose_title(base: &str, overlay: &[String], cursor_captured: bool) -> String {
    let mut title = base.to_string();
    for line in overlay {
        title.push_str(" | ");
        title.push_str(line);
    }
    if cursor_captured {
        title.push_str(" [Esc to release]");
    }
    title
}

#[derive(Debug)]
pub enum WindowError {
    CreationFailed(String),
}

impl std::fmt::Display for WindowError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WindowError::CreationFailed(msg) => write!(f, "Window creation failed: {}", msg),
        }
    }
}

impl std::error::Error for WindowError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_joins_overlay_lines() {
        let lines = vec!["SOLAR SYSTEM".to_string(), "STATIC CAM".to_string()];
        assert_eq!(
            compose_title("Orrery", &lines, false),
            "Orrery | SOLAR SYSTEM | STATIC CAM"
        );
    }

    #[test]
    fn test_title_formatting_captured() {
        let title = compose_title("Orrery", &["FREE CAM".to_string()], true);
        assert!(title.ends_with("[Esc to release]"));
    }

    #[test]
    fn test_title_without_overlay() {
        assert_eq!(compose_title("Orrery", &[], false), "Orrery");
    }

    #[test]
    fn test_window_error_display() {
        let e = WindowError::CreationFailed("no display".to_string());
        assert_eq!(e.to_string(), "Window creation failed: no display");
    }
}
