//! Single-ply rule application: placement, captures, suicide and simple ko.

use serde::{Deserialize, Serialize};

use crate::Point;
use crate::board::Board;
use crate::error::Reason;
use crate::stone::Stone;

/// Result of a legal move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    /// The position after the stone is placed and captures are removed.
    pub board: Board,
    /// Every opponent stone removed by the move.
    pub captured: Vec<Point>,
    /// The point the opponent may not play on next, if any.
    pub ko: Option<Point>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    Legal(Placement),
    Illegal(Reason),
}

impl MoveOutcome {
    pub fn is_legal(&self) -> bool {
        matches!(self, MoveOutcome::Legal(_))
    }

    pub fn reason(&self) -> Option<Reason> {
        match self {
            MoveOutcome::Legal(_) => None,
            MoveOutcome::Illegal(reason) => Some(*reason),
        }
    }

    /// The board the caller should hold after this outcome: the new position
    /// for a legal move, `prev` otherwise.
    pub fn board_or<'a>(&'a self, prev: &'a Board) -> &'a Board {
        match self {
            MoveOutcome::Legal(placement) => &placement.board,
            MoveOutcome::Illegal(_) => prev,
        }
    }

    pub fn into_result(self) -> Result<Placement, Reason> {
        match self {
            MoveOutcome::Legal(placement) => Ok(placement),
            MoveOutcome::Illegal(reason) => Err(reason),
        }
    }
}

impl From<Result<Placement, Reason>> for MoveOutcome {
    fn from(result: Result<Placement, Reason>) -> Self {
        match result {
            Ok(placement) => MoveOutcome::Legal(placement),
            Err(reason) => MoveOutcome::Illegal(reason),
        }
    }
}

/// Place `stone` at `(x, y)` on `board`, honoring the ko point carried over
/// from the previous move. The input board is never modified.
pub fn apply_move(board: &Board, x: i32, y: i32, stone: Stone, ko: Option<Point>) -> MoveOutcome {
    let outcome = MoveOutcome::from(place(board, x, y, stone, ko));
    if let MoveOutcome::Illegal(reason) = outcome {
        tracing::debug!(x, y, %stone, reason = reason.code(), "move rejected");
    }
    outcome
}

/// Whether `apply_move` would accept the move.
pub fn is_legal(board: &Board, x: i32, y: i32, stone: Stone, ko: Option<Point>) -> bool {
    place(board, x, y, stone, ko).is_ok()
}

impl Board {
    /// Method form of [`apply_move`].
    pub fn play(&self, x: i32, y: i32, stone: Stone, ko: Option<Point>) -> MoveOutcome {
        apply_move(self, x, y, stone, ko)
    }
}

fn place(board: &Board, x: i32, y: i32, stone: Stone, ko: Option<Point>) -> Result<Placement, Reason> {
    let point = board.point(x, y).ok_or(Reason::OutOfRange)?;

    if board.stone_at(point).is_some() {
        return Err(Reason::Occupied);
    }

    if ko == Some(point) {
        return Err(Reason::Ko);
    }

    let mut next = board.with_stone(point, stone);

    // Liberties are judged before anything is removed, so every dying group is found.
    let captured: Vec<Point> = next
        .opponent_neighbor_chains(point)
        .into_iter()
        .filter(|chain| next.chain_liberties(chain).is_empty())
        .flatten()
        .collect();
    next.clear_stones(&captured);

    let own_chain = next.chain(point);
    let liberties = next.chain_liberties(&own_chain);
    if liberties.is_empty() {
        return Err(Reason::Suicide);
    }

    if !captured.is_empty() {
        tracing::trace!(x, y, %stone, count = captured.len(), "stones captured");
    }

    let ko = (captured.len() == 1 && own_chain.len() == 1 && liberties.len() == 1)
        .then(|| captured[0]);

    Ok(Placement {
        board: next,
        captured,
        ko,
    })
}
