use std::io;

use ratatui::DefaultTerminal;

/// Terminal the game loop draws into.
pub type AppTerminal = DefaultTerminal;

/// Raw-mode alternate-screen session, restored when dropped.
///
/// Entering also installs ratatui's panic hook, so a panic mid-game leaves
/// the shell usable before the message is printed.
pub struct TerminalSession {
    terminal: AppTerminal,
}

impl TerminalSession {
    pub fn enter() -> io::Result<Self> {
        let terminal = ratatui::try_init()?;
        Ok(Self { terminal })
    }

    pub fn terminal_mut(&mut self) -> &mut AppTerminal {
        &mut self.terminal
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        if let Err(error) = ratatui::try_restore() {
            log::warn!("failed to restore terminal: {error}");
        }
    }
}
