//! Minimal terminal runtime for the play screen.

mod app;
mod event;
mod event_loop;
mod runner;
mod terminal;

pub use self::{app::App, runner::Tui, terminal::TerminalGuard};
