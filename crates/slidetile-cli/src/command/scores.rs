use anyhow::Context as _;
use chrono::{DateTime, Local, Utc};
use serde::Serialize;
use slidetile_engine::ScoreEntry;

use crate::util::{self, DataDirArg};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct ScoresArg {
    /// Print the history as JSON
    #[clap(long)]
    json: bool,
    /// Show only the most recent N games
    #[clap(long)]
    limit: Option<usize>,
    #[clap(flatten)]
    data_dir: DataDirArg,
}

/// A log entry together with its time as a calendar date.
#[derive(Debug, Serialize)]
struct ScoreRow {
    #[serde(flatten)]
    entry: ScoreEntry,
    ended_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
struct ScoreReport {
    games: usize,
    best: Option<ScoreRow>,
    recent: Vec<ScoreRow>,
}

impl ScoreRow {
    fn from_entry(entry: ScoreEntry) -> Option<Self> {
        Some(Self {
            ended_at: DateTime::from_timestamp(entry.timestamp, 0)?,
            entry,
        })
    }
}

impl ScoreReport {
    fn new(entries: &[ScoreEntry], limit: Option<usize>) -> Self {
        let skip = limit.map_or(0, |limit| entries.len().saturating_sub(limit));
        Self {
            games: entries.len(),
            best: entries
                .iter()
                .copied()
                .max_by_key(|entry| entry.score)
                .and_then(ScoreRow::from_entry),
            recent: entries
                .iter()
                .skip(skip)
                .copied()
                .filter_map(ScoreRow::from_entry)
                .collect(),
        }
    }

    fn print_table(&self) {
        if self.games == 0 {
            println!("No games recorded yet.");
            return;
        }
        println!("{:<19}  {:>10}", "ended at", "score");
        for row in &self.recent {
            println!("{:<19}  {:>10}", format_time(row.ended_at), row.entry.score);
        }
        println!();
        print!("{} games", self.games);
        if let Some(best) = &self.best {
            print!(", best {} ({})", best.entry.score, format_time(best.ended_at));
        }
        println!();
    }
}

fn format_time(time: DateTime<Utc>) -> String {
    time.with_timezone(&Local)
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}

pub(crate) fn run(arg: &ScoresArg) -> anyhow::Result<()> {
    let ScoresArg {
        json,
        limit,
        data_dir,
    } = arg;

    let score_log = data_dir.resolve().score_log();
    let entries = score_log
        .entries()
        .with_context(|| format!("Failed to read {}", score_log.path().display()))?;
    let report = ScoreReport::new(&entries, *limit);

    if *json {
        util::print_json(&report)?;
    } else {
        report.print_table();
    }
    Ok(())
}
