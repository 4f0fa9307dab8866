use std::{
    env,
    ffi::OsString,
    fs::{self, OpenOptions},
    io::{self, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use env_logger::{Env, Target};
use slidetile_engine::ScoreLog;

const APP_DIR: &str = "slidetile";
const STATE_FILE: &str = "state.bin";
const SCORES_FILE: &str = "scores.tsv";
const LOG_FILE: &str = "slidetile.log";

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct DataDirArg {
    /// Directory holding the saved game, the score log and the log file
    /// [default: $XDG_CONFIG_HOME/slidetile or ~/.config/slidetile]
    #[clap(long)]
    data_dir: Option<PathBuf>,
}

impl DataDirArg {
    pub(crate) fn resolve(&self) -> DataDir {
        DataDir::resolve(
            self.data_dir.clone(),
            env::var_os("XDG_CONFIG_HOME"),
            env::var_os("HOME"),
        )
    }
}

/// Location of every file the game writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DataDir {
    root: PathBuf,
}

impl DataDir {
    /// Picks the first of: the explicit directory, `$XDG_CONFIG_HOME/slidetile`,
    /// `$HOME/.config/slidetile`, `./.slidetile`. Empty variables count as unset.
    fn resolve(
        explicit: Option<PathBuf>,
        xdg_config_home: Option<OsString>,
        home: Option<OsString>,
    ) -> Self {
        let non_empty = |value: Option<OsString>| value.filter(|value| !value.is_empty());
        let root = explicit
            .or_else(|| non_empty(xdg_config_home).map(|xdg| PathBuf::from(xdg).join(APP_DIR)))
            .or_else(|| {
                non_empty(home).map(|home| PathBuf::from(home).join(".config").join(APP_DIR))
            })
            .unwrap_or_else(|| PathBuf::from(format!(".{APP_DIR}")));
        Self { root }
    }

    pub(crate) fn root(&self) -> &Path {
        &self.root
    }

    pub(crate) fn state_path(&self) -> PathBuf {
        self.root.join(STATE_FILE)
    }

    pub(crate) fn log_path(&self) -> PathBuf {
        self.root.join(LOG_FILE)
    }

    pub(crate) fn score_log(&self) -> ScoreLog {
        ScoreLog::new(self.root.join(SCORES_FILE))
    }
}

/// Sends log records to `path`, since the terminal belongs to the TUI.
///
/// The filter comes from `RUST_LOG` and defaults to `info`.
pub(crate) fn init_file_logger(path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

/// Pretty-prints `value` as JSON to stdout, followed by a newline.
pub(crate) fn print_json<T>(value: &T) -> anyhow::Result<()>
where
    T: serde::Serialize,
{
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value).context("Failed to write JSON to stdout")?;
    writeln!(stdout).context("Failed to write newline after JSON to stdout")?;
    Ok(())
}
