use crossterm::event::Event as CrosstermEvent;

/// Events processed by TUI applications.
#[derive(Debug, Clone, derive_more::IsVariant, derive_more::From)]
pub(super) enum TuiEvent {
    /// A timer scheduled with `Tui::schedule_timer` has expired.
    Timer,
    /// The screen is out of date and should be redrawn.
    Render,
    /// Terminal events such as key input and resize.
    Crossterm(CrosstermEvent),
}
