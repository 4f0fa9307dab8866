use clap::{Parser, Subcommand};

use self::{play::PlayArg, scores::ScoresArg};

mod play;
mod scores;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Play in the terminal (default)
    Play(#[clap(flatten)] PlayArg),
    /// Show the history of finished games
    Scores(#[clap(flatten)] ScoresArg),
    /// Check the merge rules against known slides
    SelfTest,
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode.unwrap_or(Mode::Play(PlayArg::default())) {
        Mode::Play(arg) => play::run(&arg)?,
        Mode::Scores(arg) => scores::run(&arg)?,
        Mode::SelfTest => self_test::run()?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory as _;

    use super::*;

    #[test]
    fn test_command_definition_is_valid() {
        CommandArgs::command().debug_assert();
    }

    #[test]
    fn test_no_subcommand_means_play() {
        let args = CommandArgs::try_parse_from(["slidetile"]).unwrap();
        assert!(args.mode.is_none());

        let args = CommandArgs::try_parse_from([
            "slidetile",
            "play",
            "--scheme",
            "blue-red",
            "--seed",
            "42",
            "--seed-hack",
        ])
        .unwrap();
        assert!(matches!(args.mode, Some(Mode::Play(_))));
    }

    #[test]
    fn test_scores_and_self_test_parse() {
        let args =
            CommandArgs::try_parse_from(["slidetile", "scores", "--json", "--limit", "5"]).unwrap();
        assert!(matches!(args.mode, Some(Mode::Scores(_))));

        let args = CommandArgs::try_parse_from(["slidetile", "self-test"]).unwrap();
        assert!(matches!(args.mode, Some(Mode::SelfTest)));
    }

    #[test]
    fn test_unknown_scheme_is_rejected() {
        assert!(CommandArgs::try_parse_from(["slidetile", "play", "--scheme", "neon"]).is_err());
    }
}
