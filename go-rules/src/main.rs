use std::fmt;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use go_rules::{BoardSetup, MoveRecord, Replay, ReplayError, SetupError};
use serde::Deserialize;

/// Replay a stored problem attempt and print the resulting board.
#[derive(Debug, Parser)]
#[command(name = "go-replay", version)]
struct Cli {
    /// JSON document `{ "setup": {..}, "moves": [{ "x", "y" }, ..] }`
    problem: PathBuf,
}

/// A stored problem attempt: the setup plus the submitted moves.
#[derive(Debug, Deserialize)]
struct Problem {
    setup: BoardSetup,
    #[serde(default)]
    moves: Vec<MoveRecord>,
}

#[derive(Debug)]
enum CliError {
    Io(std::io::Error),
    Json(serde_json::Error),
    Setup(SetupError),
    Rejected(ReplayError),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Io(e) => write!(f, "cannot read problem: {e}"),
            CliError::Json(e) => write!(f, "invalid problem document: {e}"),
            CliError::Setup(e) => write!(f, "invalid setup: {e}"),
            CliError::Rejected(e) => write!(
                f,
                "move {} at ({}, {}) rejected: {}",
                e.index + 1,
                e.x,
                e.y,
                e.reason.code()
            ),
        }
    }
}

impl std::error::Error for CliError {}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        CliError::Io(e)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Json(e)
    }
}

impl From<SetupError> for CliError {
    fn from(e: SetupError) -> Self {
        CliError::Setup(e)
    }
}

impl From<ReplayError> for CliError {
    fn from(e: ReplayError) -> Self {
        CliError::Rejected(e)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "go_rules=info,go_replay=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let path = cli.problem.display();
    match std::fs::read_to_string(&cli.problem)
        .map_err(CliError::from)
        .and_then(|text| render(&text))
    {
        Ok(output) => {
            print!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("{path}: {e}");
            eprintln!("{}", failure_line(&cli.problem, &e));
            ExitCode::FAILURE
        }
    }
}

fn failure_line(path: &Path, e: &CliError) -> String {
    format!("{}: {e}", path.display())
}

/// Replay a problem document and render the final board, ko point and side to move.
fn render(text: &str) -> Result<String, CliError> {
    let problem: Problem = serde_json::from_str(text)?;
    let board = problem.setup.to_board()?;
    tracing::info!(size = board.size(), moves = problem.moves.len(), "replaying");

    let replay = Replay::with_moves(board, problem.setup.first_player, &problem.moves)?;
    let mut output = replay.board().to_string();
    if let Some((x, y)) = replay.ko() {
        output.push_str(&format!("ko at ({x}, {y})\n"));
    }
    output.push_str(&format!("{} to play\n", replay.next_stone()));
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn cli_requires_problem_path() {
        assert!(Cli::try_parse_from(["go-replay"]).is_err());
        let cli = Cli::try_parse_from(["go-replay", "attempt.json"]).unwrap();
        assert_eq!(cli.problem, PathBuf::from("attempt.json"));
    }

    #[test]
    fn renders_final_board() {
        let text = r#"{"setup":{"size":3},"moves":[{"x":1,"y":1},{"x":0,"y":0}]}"#;
        assert_eq!(render(text).unwrap(), "W++\n+B+\n+++\nBlack to play\n");
    }

    #[test]
    fn rejection_reports_move_point_and_code() {
        let text = r#"{"setup":{"size":3},"moves":[{"x":1,"y":1},{"x":1,"y":1}]}"#;
        let err = render(text).unwrap_err();
        assert!(matches!(err, CliError::Rejected(_)));
        assert_eq!(
            failure_line(Path::new("attempt.json"), &err),
            "attempt.json: move 2 at (1, 1) rejected: OCCUPIED"
        );
    }

    #[test]
    fn off_board_setup_is_reported() {
        let text = r#"{"setup":{"size":3,"stones":[{"x":3,"y":0,"color":"black"}]}}"#;
        let err = render(text).unwrap_err();
        assert_eq!(err.to_string(), "invalid setup: setup stone (3, 0) is off the board");
    }
}
