use crossterm::event::Event;
use ratatui::Frame;

use crate::tui::Tui;

/// Trait for applications driven by [`Tui::run`].
pub trait App {
    /// Returns whether the application should exit.
    fn should_exit(&self) -> bool;

    /// Handles terminal events (key input, resize, etc.).
    fn handle_event(&mut self, tui: &mut Tui, event: &Event);

    /// Called once when a timer set with [`Tui::schedule_timer`] expires.
    fn on_timer(&mut self, tui: &mut Tui);

    /// Draws the screen. Called only after something changed.
    fn draw(&self, frame: &mut Frame);
}
