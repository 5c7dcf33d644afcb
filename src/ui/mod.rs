//! UI rendering module for weatherview
//!
//! This module contains all the rendering logic for the terminal user interface,
//! using the ratatui library for TUI components.

pub mod help_overlay;
pub mod weather_view;

use ratatui::Frame;

use crate::app::App;

pub use help_overlay::render as render_help_overlay;
pub use weather_view::render as render_weather_view;

/// Renders the full screen for the current application state
pub fn render(frame: &mut Frame, app: &App) {
    render_weather_view(frame, app);

    if app.show_help {
        render_help_overlay(frame);
    }
}
