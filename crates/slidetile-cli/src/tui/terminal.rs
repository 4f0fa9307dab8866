use std::io;

use ratatui::DefaultTerminal;

/// Raw-mode alternate-screen terminal, restored when dropped.
///
/// Release is idempotent, so an explicit [`Self::release`] followed by the
/// drop restores the terminal only once. The panic hook installed by
/// [`ratatui::try_init`] covers the panic path.
#[derive(Debug)]
pub struct TerminalGuard {
    terminal: DefaultTerminal,
    released: bool,
}

impl TerminalGuard {
    /// Switches the terminal to raw mode and the alternate screen.
    pub fn acquire() -> io::Result<Self> {
        let terminal = ratatui::try_init()?;
        Ok(Self {
            terminal,
            released: false,
        })
    }

    pub fn terminal(&mut self) -> &mut DefaultTerminal {
        &mut self.terminal
    }

    /// Leaves raw mode and the alternate screen, showing the cursor again.
    pub fn release(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        if let Err(err) = ratatui::try_restore() {
            log::warn!("failed to restore terminal: {err}");
        }
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        self.release();
    }
}
