use slidetile_engine::{GameSeed, GameSession, GameStart, ReseedMode};

use crate::{
    command::play::app::{ExitReason, PlayApp},
    tui::Tui,
    ui::color_scheme::ColorScheme,
    util::{self, DataDirArg},
};

mod app;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    /// Color scheme for the tiles
    #[clap(long, value_enum, default_value_t)]
    scheme: ColorScheme,
    /// Start a fresh game from this seed instead of resuming a saved one
    #[clap(long)]
    seed: Option<u64>,
    /// Take each new seed from the clock, so an undone move spawns differently
    #[clap(long)]
    seed_hack: bool,
    /// Start a fresh game and leave any saved one untouched
    #[clap(long)]
    no_resume: bool,
    #[clap(flatten)]
    data_dir: DataDirArg,
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let PlayArg {
        scheme,
        seed,
        seed_hack,
        no_resume,
        data_dir,
    } = arg;

    let data_dir = data_dir.resolve();
    if let Err(err) = util::init_file_logger(&data_dir.log_path()) {
        eprintln!(
            "warning: cannot open {}, logging disabled: {err}",
            data_dir.log_path().display()
        );
    }

    log::info!("using data directory {}", data_dir.root().display());

    let reseed_mode = if *seed_hack {
        ReseedMode::WallClock
    } else {
        ReseedMode::Chained
    };
    let state_path = data_dir.state_path();

    let mut notice = None;
    let session = match seed {
        Some(seed) => GameSession::new(GameSeed::new(*seed), reseed_mode),
        None if *no_resume => GameSession::new(rand::random(), reseed_mode),
        None => {
            let (session, start) =
                GameSession::resume_or_new(&state_path, rand::random(), reseed_mode);
            match start {
                GameStart::Restored => {
                    log::info!("resumed saved game from {}", state_path.display());
                    notice = Some("Saved game resumed".to_owned());
                }
                GameStart::Fresh => {}
                GameStart::DiscardedCorrupt(err) => {
                    log::warn!("discarded saved game {}: {err}", state_path.display());
                    notice = Some("Saved game was unreadable, started a new one".to_owned());
                }
            }
            session
        }
    };
    log::info!(
        "starting with seed {:016x} ({reseed_mode:?})",
        session.state().seed().value()
    );

    let mut app = PlayApp::new(session, *scheme, data_dir.score_log(), state_path);
    if let Some(notice) = notice {
        app.set_notice(notice);
    }
    Tui::new().run(&mut app)?;

    let score = app.session().score();
    match app.exit_reason() {
        Some(ExitReason::Suspended) => {
            println!("Game saved with {score} points. Run again to continue.");
        }
        Some(ExitReason::Quit | ExitReason::Interrupted) | None => {
            println!("Final score: {score}");
        }
    }
    Ok(())
}
