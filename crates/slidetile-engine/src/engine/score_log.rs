use std::{
    fs::{self, OpenOptions},
    io::{self, BufRead as _, BufReader, Write as _},
    path::{Path, PathBuf},
};

use serde::Serialize;

/// One finished session in the score log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScoreEntry {
    /// Seconds since the unix epoch when the session ended.
    pub timestamp: i64,
    pub score: u32,
}

impl ScoreEntry {
    fn parse(line: &str) -> Option<Self> {
        let (timestamp, score) = line.split_once('\t')?;
        Some(Self {
            timestamp: timestamp.trim().parse().ok()?,
            score: score.trim().parse().ok()?,
        })
    }
}

/// Append-only text log with one `<unix-timestamp>\t<score>` line per
/// finished session.
///
/// # Example
///
/// ```no_run
/// use slidetile_engine::ScoreLog;
///
/// let log = ScoreLog::new("/tmp/slidetile/scores.tsv");
/// log.append(1_700_000_000, 2048)?;
/// assert_eq!(log.entries()?.last().map(|entry| entry.score), Some(2048));
/// # Ok::<_, std::io::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct ScoreLog {
    path: PathBuf,
}

impl ScoreLog {
    pub fn new<P>(path: P) -> Self
    where
        P: Into<PathBuf>,
    {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends one line, creating the file and its directory if needed.
    pub fn append(&self, timestamp: i64, score: u32) -> io::Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{timestamp}\t{score}")?;
        log::info!("logged score {score} to {}", self.path.display());
        Ok(())
    }

    /// Reads every entry in file order.
    ///
    /// A missing file is an empty log. Lines that do not parse are skipped.
    pub fn entries(&self) -> io::Result<Vec<ScoreEntry>> {
        let file = match fs::File::open(&self.path) {
            Ok(file) => file,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(vec![]),
            Err(err) => return Err(err),
        };

        let mut entries = vec![];
        for (i, line) in BufReader::new(file).lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            match ScoreEntry::parse(&line) {
                Some(entry) => entries.push(entry),
                None => log::warn!(
                    "skipping malformed line {} of {}: {line:?}",
                    i + 1,
                    self.path.display()
                ),
            }
        }
        Ok(entries)
    }

    /// Returns the highest score ever logged.
    pub fn best(&self) -> io::Result<Option<ScoreEntry>> {
        Ok(self.entries()?.into_iter().max_by_key(|entry| entry.score))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_writes_tab_separated_lines() {
        let dir = tempfile::tempdir().unwrap();
        let log = ScoreLog::new(dir.path().join("sub").join("scores.tsv"));

        log.append(1_700_000_000, 512).unwrap();
        log.append(1_700_000_100, 4096).unwrap();

        let content = fs::read_to_string(log.path()).unwrap();
        assert_eq!(content, "1700000000\t512\n1700000100\t4096\n");
    }

    #[test]
    fn test_entries_and_best() {
        let dir = tempfile::tempdir().unwrap();
        let log = ScoreLog::new(dir.path().join("scores.tsv"));
        fs::write(log.path(), "10\t300\nnot a line\n\n20\t900\n30\t100\n").unwrap();

        let entries = log.entries().unwrap();
        assert_eq!(
            entries,
            vec![
                ScoreEntry {
                    timestamp: 10,
                    score: 300
                },
                ScoreEntry {
                    timestamp: 20,
                    score: 900
                },
                ScoreEntry {
                    timestamp: 30,
                    score: 100
                },
            ]
        );
        assert_eq!(log.best().unwrap().map(|entry| entry.timestamp), Some(20));
    }

    #[test]
    fn test_missing_log_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let log = ScoreLog::new(dir.path().join("absent.tsv"));
        assert!(log.entries().unwrap().is_empty());
        assert_eq!(log.best().unwrap(), None);
    }

    #[test]
    fn test_append_to_unwritable_location_fails() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, b"file").unwrap();
        let log = ScoreLog::new(blocker.join("scores.tsv"));
        assert!(log.append(0, 1).is_err());
    }
}
