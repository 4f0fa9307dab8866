use std::{path::PathBuf, time::Duration};

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout},
    text::Line,
};
use slidetile_engine::{Direction, GameSession, ScoreLog};

use crate::{
    tui::{App, Tui},
    ui::{
        color_scheme::ColorScheme,
        widgets::{KeyBinding, KeyBindingDisplay, SessionDisplay, style},
    },
};

/// Time between a slide and the appearance of its new tile.
const SPAWN_DELAY: Duration = Duration::from_millis(150);

const PLAY_BINDINGS: &[KeyBinding] = &[
    (&["←", "↑", "→", "↓"], "move"),
    (&["u"], "undo"),
    (&["r"], "restart"),
    (&["S"], "save & quit"),
    (&["q"], "quit"),
];
const PROMPT_BINDINGS: &[KeyBinding] = &[(&["y"], "confirm"), (&["any"], "cancel")];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ExitReason {
    /// Quit after confirmation; the score was logged.
    Quit,
    /// The game was saved to be resumed on the next launch.
    Suspended,
    /// Ctrl-C; nothing was saved or logged.
    Interrupted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Prompt {
    Quit,
    Restart,
}

impl Prompt {
    const fn text(self) -> &'static str {
        match self {
            Self::Quit => "QUIT? (y/n)",
            Self::Restart => "RESTART? (y/n)",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Move(Direction),
    Undo,
    Restart,
    Quit,
    Suspend,
}

fn is_interrupt(key: &KeyEvent) -> bool {
    key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
}

fn command_for_key(key: &KeyEvent) -> Option<Command> {
    if key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
        return None;
    }
    let command = match key.code {
        KeyCode::Left | KeyCode::Char('a' | 'h') => Command::Move(Direction::Left),
        KeyCode::Right | KeyCode::Char('d' | 'l') => Command::Move(Direction::Right),
        KeyCode::Up | KeyCode::Char('w' | 'k') => Command::Move(Direction::Up),
        KeyCode::Down | KeyCode::Char('s' | 'j') => Command::Move(Direction::Down),
        KeyCode::Char('u') => Command::Undo,
        KeyCode::Char('r') => Command::Restart,
        KeyCode::Char('q') => Command::Quit,
        KeyCode::Char('S') => Command::Suspend,
        _ => return None,
    };
    Some(command)
}

#[derive(Debug)]
pub(crate) struct PlayApp {
    session: GameSession,
    scheme: ColorScheme,
    score_log: ScoreLog,
    state_path: PathBuf,
    best: Option<u32>,
    prompt: Option<Prompt>,
    notice: Option<String>,
    exit: Option<ExitReason>,
}

impl PlayApp {
    pub(crate) fn new(
        session: GameSession,
        scheme: ColorScheme,
        score_log: ScoreLog,
        state_path: PathBuf,
    ) -> Self {
        let best = match score_log.best() {
            Ok(best) => best.map(|entry| entry.score),
            Err(err) => {
                log::warn!("cannot read {}: {err}", score_log.path().display());
                None
            }
        };
        Self {
            session,
            scheme,
            score_log,
            state_path,
            best,
            prompt: None,
            notice: None,
            exit: None,
        }
    }

    pub(crate) fn session(&self) -> &GameSession {
        &self.session
    }

    pub(crate) fn exit_reason(&self) -> Option<ExitReason> {
        self.exit
    }

    /// Shows a one-line message under the grid until the next key press.
    pub(crate) fn set_notice(&mut self, notice: impl Into<String>) {
        self.notice = Some(notice.into());
    }

    fn record_score(&mut self) {
        let score = self.session.score();
        match self
            .score_log
            .append(chrono::Utc::now().timestamp(), score)
        {
            Ok(()) => self.best = Some(self.best.map_or(score, |best| best.max(score))),
            Err(err) => {
                log::warn!(
                    "cannot write score to {}: {err}",
                    self.score_log.path().display()
                );
            }
        }
    }

    fn suspend(&mut self) {
        match self.session.save(&self.state_path) {
            Ok(()) => {
                log::info!(
                    "saved game with {} points to {}",
                    self.session.score(),
                    self.state_path.display()
                );
                self.exit = Some(ExitReason::Suspended);
            }
            Err(err) => {
                log::warn!("cannot save game to {}: {err}", self.state_path.display());
                self.set_notice(format!("Save failed: {err}"));
            }
        }
    }

    fn confirm(&mut self, prompt: Prompt) {
        self.record_score();
        match prompt {
            Prompt::Quit => {
                log::info!("quit with {} points", self.session.score());
                self.exit = Some(ExitReason::Quit);
            }
            Prompt::Restart => {
                log::info!("restarted, abandoning {} points", self.session.score());
                self.session.restart(rand::random());
                self.set_notice("New game");
            }
        }
    }

    fn execute(&mut self, tui: &mut Tui, command: Command) {
        match command {
            Command::Move(direction) => {
                if self.session.try_move(direction) {
                    tui.schedule_timer(SPAWN_DELAY);
                }
            }
            Command::Undo => {
                if self.session.undo() {
                    tui.cancel_timer();
                } else {
                    self.set_notice("Nothing to undo");
                }
            }
            Command::Restart => self.prompt = Some(Prompt::Restart),
            Command::Quit => self.prompt = Some(Prompt::Quit),
            Command::Suspend => self.suspend(),
        }
    }
}

impl App for PlayApp {
    fn should_exit(&self) -> bool {
        self.exit.is_some()
    }

    fn handle_event(&mut self, tui: &mut Tui, event: &Event) {
        let Some(key) = event.as_key_press_event() else {
            return;
        };
        if is_interrupt(&key) {
            log::info!("interrupted with {} points", self.session.score());
            self.exit = Some(ExitReason::Interrupted);
            return;
        }
        // Any key finishes a move whose tile is still pending
        if self.session.session_state().is_awaiting_spawn() {
            self.session.complete_move();
            tui.cancel_timer();
        }
        if let Some(prompt) = self.prompt.take() {
            if matches!(key.code, KeyCode::Char('y' | 'Y')) {
                self.confirm(prompt);
            }
            return;
        }

        self.notice = None;
        if let Some(command) = command_for_key(&key) {
            self.execute(tui, command);
        }
    }

    fn on_timer(&mut self, _tui: &mut Tui) {
        self.session.complete_move();
    }

    fn draw(&self, frame: &mut Frame) {
        let session_display = SessionDisplay::new(&self.session, self.scheme)
            .best(self.best)
            .prompt(self.prompt.map(Prompt::text));
        let bindings = if self.prompt.is_some() {
            PROMPT_BINDINGS
        } else {
            PLAY_BINDINGS
        };

        let [main_area, notice_area, help_area] = Layout::vertical([
            Constraint::Length(session_display.height()),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .flex(Flex::Center)
        .areas(frame.area());

        let [main_area] = Layout::horizontal([Constraint::Length(session_display.width())])
            .flex(Flex::Center)
            .areas(main_area);
        frame.render_widget(session_display, main_area);
        if let Some(notice) = &self.notice {
            frame.render_widget(
                Line::styled(notice.as_str(), style::NOTICE).centered(),
                notice_area,
            );
        }
        frame.render_widget(KeyBindingDisplay::new(bindings), help_area);
    }
}
