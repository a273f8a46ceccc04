use serde::{Deserialize, Serialize};

use crate::Point;
use crate::board::Board;
use crate::error::{Reason, ReplayError, SetupError};
use crate::rules::apply_move;
use crate::setup::BoardSetup;
use crate::stone::Stone;

/// A stored move. Its color is implied by its index in the move list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MoveRecord {
    pub x: i32,
    pub y: i32,
}

impl MoveRecord {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<Point> for MoveRecord {
    fn from((x, y): Point) -> Self {
        Self::new(x.into(), y.into())
    }
}

/// Color of the move at `index` when play alternates starting with `first`.
pub fn color_for(index: usize, first: Stone) -> Stone {
    if index % 2 == 0 { first } else { first.opp() }
}

/// A board together with the state carried into the next move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub board: Board,
    pub ko: Option<Point>,
    /// Stones removed by the move that produced this position.
    pub captured: Vec<Point>,
    pub last_move: Option<Point>,
}

impl Position {
    pub fn start(board: Board) -> Self {
        Self {
            board,
            ko: None,
            captured: Vec::new(),
            last_move: None,
        }
    }

    /// Apply one move, producing the following position.
    pub fn play(&self, x: i32, y: i32, stone: Stone) -> Result<Position, Reason> {
        let placement = apply_move(&self.board, x, y, stone, self.ko).into_result()?;
        Ok(Position {
            board: placement.board,
            ko: placement.ko,
            captured: placement.captured,
            last_move: self.board.point(x, y),
        })
    }
}

/// Replay `moves` from `board`, alternating colors from `first`.
pub fn replay(board: &Board, moves: &[MoveRecord], first: Stone) -> Result<Position, ReplayError> {
    let mut position = Position::start(board.clone());
    for (index, m) in moves.iter().enumerate() {
        position = position
            .play(m.x, m.y, color_for(index, first))
            .map_err(|reason| replay_error(index, m, reason))?;
    }
    Ok(position)
}

fn replay_error(index: usize, m: &MoveRecord, reason: Reason) -> ReplayError {
    tracing::debug!(index, x = m.x, y = m.y, reason = reason.code(), "replay stopped");
    ReplayError {
        index,
        x: m.x,
        y: m.y,
        reason,
    }
}

/// A move sequence with a navigation cursor.
///
/// Every position along the line is kept, so stepping back and forth never
/// replays. Playing while viewing an earlier position discards the moves
/// after it.
#[derive(Debug, Clone)]
pub struct Replay {
    first: Stone,
    moves: Vec<MoveRecord>,
    /// `positions[i]` is the board after `i` moves; `positions[0]` is the setup.
    positions: Vec<Position>,
    view: usize,
}

impl Replay {
    pub fn new(board: Board, first: Stone) -> Self {
        Self {
            first,
            moves: Vec::new(),
            positions: vec![Position::start(board)],
            view: 0,
        }
    }

    pub fn from_setup(setup: &BoardSetup) -> Result<Self, SetupError> {
        Ok(Self::new(setup.to_board()?, setup.first_player))
    }

    /// Build a replay positioned after the last of `moves`.
    pub fn with_moves(board: Board, first: Stone, moves: &[MoveRecord]) -> Result<Self, ReplayError> {
        let mut replay = Self::new(board, first);
        for (index, m) in moves.iter().enumerate() {
            replay
                .try_play(m.x, m.y)
                .map_err(|reason| replay_error(index, m, reason))?;
        }
        Ok(replay)
    }

    /// Replace the whole move list, keeping the setup. On error the replay is left unchanged.
    pub fn replace_moves(&mut self, moves: &[MoveRecord]) -> Result<(), ReplayError> {
        *self = Self::with_moves(self.positions[0].board.clone(), self.first, moves)?;
        Ok(())
    }

    // -- Game actions --

    /// Play the next stone at the viewed position, colored by alternation.
    pub fn try_play(&mut self, x: i32, y: i32) -> Result<&Position, Reason> {
        let next = self.current().play(x, y, self.next_stone())?;

        self.moves.truncate(self.view);
        self.positions.truncate(self.view + 1);
        self.moves.push(MoveRecord::new(x, y));
        self.positions.push(next);
        self.view += 1;

        Ok(self.current())
    }

    /// Remove the last move of the line. Returns false when there is none.
    pub fn undo(&mut self) -> bool {
        if self.moves.pop().is_none() {
            return false;
        }
        self.positions.pop();
        self.view = self.view.min(self.moves.len());
        true
    }

    // -- Navigation --

    pub fn back(&mut self) -> bool {
        if self.view == 0 {
            return false;
        }
        self.view -= 1;
        true
    }

    pub fn forward(&mut self) -> bool {
        if self.is_at_latest() {
            return false;
        }
        self.view += 1;
        true
    }

    pub fn to_start(&mut self) {
        self.view = 0;
    }

    pub fn to_latest(&mut self) {
        self.view = self.moves.len();
    }

    // -- Accessors --

    pub fn current(&self) -> &Position {
        &self.positions[self.view]
    }

    pub fn board(&self) -> &Board {
        &self.current().board
    }

    pub fn ko(&self) -> Option<Point> {
        self.current().ko
    }

    pub fn first_player(&self) -> Stone {
        self.first
    }

    /// Color of the stone the next `try_play` will place.
    pub fn next_stone(&self) -> Stone {
        color_for(self.view, self.first)
    }

    /// Whether the next stone could be played at `(x, y)` in the viewed position.
    pub fn is_legal(&self, x: i32, y: i32) -> bool {
        let position = self.current();
        crate::rules::is_legal(&position.board, x, y, self.next_stone(), position.ko)
    }

    pub fn moves(&self) -> &[MoveRecord] {
        &self.moves
    }

    pub fn view_index(&self) -> usize {
        self.view
    }

    pub fn total_moves(&self) -> usize {
        self.moves.len()
    }

    pub fn is_at_start(&self) -> bool {
        self.view == 0
    }

    pub fn is_at_latest(&self) -> bool {
        self.view == self.moves.len()
    }
}
