//! Interactive human-vs-engine session over line-based I/O.

use anyhow::Result;
use rand::Rng;
use serde::Serialize;
use std::io::{BufRead, Write};
use strictly_minimax::Engine;
use strictly_tictactoe::{Game, GameStatus, Position};
use tracing::{debug, info, instrument};

/// Results across every finished game of a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SessionSummary {
    /// Games won by the human.
    pub human_wins: usize,
    /// Games won by the engine.
    pub engine_wins: usize,
    /// Drawn games.
    pub draws: usize,
}

/// Commands accepted at the human's prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Place a mark.
    Place(Position),
    /// Cycle the engine's difficulty.
    CycleDifficulty,
    /// Start a new game.
    Restart,
    /// Leave the session.
    Quit,
}

impl Command {
    /// Parses a prompt line; `None` for unrecognized input.
    pub fn parse(line: &str) -> Option<Self> {
        match line.trim().to_lowercase().as_str() {
            "q" | "quit" => Some(Self::Quit),
            "d" | "difficulty" => Some(Self::CycleDifficulty),
            "r" | "restart" => Some(Self::Restart),
            other => Position::from_label_or_number(other).map(Self::Place),
        }
    }
}

/// Runs games between a human reading from `input` and `engine` until the
/// human quits or input ends.
///
/// Every move, from either side, is applied to the authoritative [`Game`]
/// first and then reported to the engine.
#[instrument(skip_all)]
pub fn run_session<R, I, W>(engine: &mut Engine<R>, input: I, mut output: W) -> Result<SessionSummary>
where
    R: Rng,
    I: BufRead,
    W: Write,
{
    let mut summary = SessionSummary::default();
    let mut game = Game::starting_with(*engine.config().starting_player());
    let mut lines = input.lines();
    engine.reset_tree();
    writeln!(
        output,
        "You are {}. Enter 1-9 to move, d to change difficulty, r to restart, q to quit.",
        engine.ai_player().opponent()
    )?;

    loop {
        if !game.is_over() && game.to_move() == engine.ai_player() {
            let Some(pos) = engine.select_move() else {
                anyhow::bail!("Engine found no move in a running game");
            };
            game.make_move(pos)?;
            engine.report_move(pos);
            writeln!(output, "AI plays at: {} (row {}, col {})", pos, pos.row(), pos.col())?;
            if record_result(&game, engine, &mut summary, &mut output)? {
                continue;
            }
        }

        writeln!(output, "\n{}\n[{}] > ", game.board(), engine.difficulty().label())?;
        output.flush()?;
        let Some(line) = lines.next().transpose()? else {
            break;
        };

        match Command::parse(&line) {
            Some(Command::Quit) => break,
            Some(Command::CycleDifficulty) => {
                let next = engine.difficulty().cycle();
                engine.set_difficulty(next);
                writeln!(output, "Difficulty changed to: {}", next.label())?;
            }
            Some(Command::Restart) => {
                game.reset();
                engine.reset_tree();
                writeln!(output, "New game.")?;
            }
            Some(Command::Place(_)) if game.is_over() => {
                writeln!(output, "Game is over. Press r to play again.")?;
            }
            Some(Command::Place(pos)) => match game.make_move(pos) {
                Ok(_) => {
                    debug!(%pos, "Human moved");
                    engine.report_move(pos);
                    record_result(&game, engine, &mut summary, &mut output)?;
                }
                Err(e) => writeln!(output, "{e}")?,
            },
            None => writeln!(output, "Unrecognized input: {:?}", line.trim())?,
        }
    }

    info!(?summary, "Session finished");
    Ok(summary)
}

/// Announces a finished game. Returns whether the game just ended.
fn record_result<R: Rng, W: Write>(
    game: &Game,
    engine: &Engine<R>,
    summary: &mut SessionSummary,
    output: &mut W,
) -> Result<bool> {
    match game.status() {
        GameStatus::InProgress => return Ok(false),
        GameStatus::Won(p) if p == engine.ai_player() => {
            summary.engine_wins += 1;
            writeln!(output, "\n{}\nGame Over! {} (AI) wins!", game.board(), p)?;
        }
        GameStatus::Won(p) => {
            summary.human_wins += 1;
            writeln!(output, "\n{}\nGame Over! {} (you) win!", game.board(), p)?;
        }
        GameStatus::Draw => {
            summary.draws += 1;
            writeln!(output, "\n{}\nGame Over! It's a draw!", game.board())?;
        }
    }
    writeln!(output, "Press r to play again or q to quit.")?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse("q"), Some(Command::Quit));
        assert_eq!(Command::parse(" D "), Some(Command::CycleDifficulty));
        assert_eq!(Command::parse("r"), Some(Command::Restart));
        assert_eq!(Command::parse("5"), Some(Command::Place(Position::Center)));
        assert_eq!(Command::parse("top-left"), Some(Command::Place(Position::TopLeft)));
        assert_eq!(Command::parse("x"), None);
    }
}
