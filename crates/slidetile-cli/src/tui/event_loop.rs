use std::{
    io,
    time::{Duration, Instant},
};

use crossterm::event;

use crate::tui::event::TuiEvent;

/// Event loop state management.
///
/// Redraws only after a state change, and supports a single one-shot timer.
/// Without a pending timer, `next()` blocks on terminal input.
#[derive(Debug)]
pub(super) struct EventLoop {
    timer: Option<Instant>,
    dirty: bool,
}

impl Default for EventLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl EventLoop {
    pub(super) fn new() -> Self {
        Self {
            timer: None,
            dirty: true, // first frame
        }
    }

    /// Arms the timer to fire once after `delay`, replacing any pending one.
    pub(super) fn schedule(&mut self, delay: Duration) {
        self.timer = Some(Instant::now() + delay);
    }

    pub(super) fn cancel(&mut self) {
        self.timer = None;
    }

    /// Returns the next event.
    ///
    /// Order of precedence: an expired timer, then a pending redraw, then
    /// terminal input (waited for until the timer is due).
    pub(super) fn next(&mut self) -> io::Result<TuiEvent> {
        loop {
            let now = Instant::now();
            if let Some(at) = self.timer
                && now >= at
            {
                self.timer = None;
                self.dirty = true;
                return Ok(TuiEvent::Timer);
            }

            if self.dirty {
                self.dirty = false;
                return Ok(TuiEvent::Render);
            }

            if let Some(at) = self.timer
                && !event::poll(at.saturating_duration_since(now))?
            {
                continue;
            }

            self.dirty = true;
            return Ok(event::read()?.into());
        }
    }
}
