use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::error::SetupError;
use crate::stone::Stone;

/// A stone placed before the first move of a problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetupStone {
    pub x: i32,
    pub y: i32,
    pub color: Stone,
}

/// The stored starting position of a problem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSetup {
    pub size: u8,
    #[serde(default)]
    pub stones: Vec<SetupStone>,
    /// Color of the first recorded move; later moves alternate.
    #[serde(default = "default_first_player", alias = "firstPlayer")]
    pub first_player: Stone,
}

fn default_first_player() -> Stone {
    Stone::Black
}

impl BoardSetup {
    pub fn new(size: u8) -> Self {
        Self {
            size,
            stones: Vec::new(),
            first_player: default_first_player(),
        }
    }

    pub fn stone(mut self, x: i32, y: i32, color: Stone) -> Self {
        self.stones.push(SetupStone { x, y, color });
        self
    }

    pub fn with_first_player(mut self, stone: Stone) -> Self {
        self.first_player = stone;
        self
    }

    /// Build the starting board. A later stone on the same point replaces an earlier one.
    pub fn to_board(&self) -> Result<Board, SetupError> {
        if self.size == 0 {
            return Err(SetupError::InvalidSize(self.size));
        }

        let mut board = Board::empty(self.size);
        for s in &self.stones {
            let point = board
                .point(s.x, s.y)
                .ok_or(SetupError::StoneOffBoard { x: s.x, y: s.y })?;
            board.set_stone(point, s.color);
        }
        Ok(board)
    }
}
