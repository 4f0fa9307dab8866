use std::time::Duration;

use anyhow::Context as _;

use crate::tui::{App, TerminalGuard, event::TuiEvent, event_loop::EventLoop};

/// TUI application runtime.
///
/// Owns the terminal for the duration of [`Self::run`] and dispatches events
/// to an [`App`].
#[derive(Default, Debug)]
pub struct Tui {
    events: EventLoop,
}

impl Tui {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests a single [`App::on_timer`] call after `delay`.
    pub fn schedule_timer(&mut self, delay: Duration) {
        self.events.schedule(delay);
    }

    pub fn cancel_timer(&mut self) {
        self.events.cancel();
    }

    /// Runs the application until `app.should_exit()` returns true.
    ///
    /// The terminal is restored on every way out of this function, including
    /// errors from drawing or reading input.
    pub fn run<A>(mut self, app: &mut A) -> anyhow::Result<()>
    where
        A: App,
    {
        let mut guard = TerminalGuard::acquire().context("failed to initialize terminal")?;

        while !app.should_exit() {
            match self.events.next().context("failed to read terminal event")? {
                TuiEvent::Timer => app.on_timer(&mut self),
                TuiEvent::Render => {
                    guard
                        .terminal()
                        .draw(|frame| app.draw(frame))
                        .context("failed to draw")?;
                }
                TuiEvent::Crossterm(event) => app.handle_event(&mut self, &event),
            }
        }

        guard.release();
        Ok(())
    }
}
