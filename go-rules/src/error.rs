use serde::{Deserialize, Serialize};
use std::fmt;

use crate::Point;

/// Why a move was rejected. The string codes are stable and shared with the
/// presentation layer, which maps them to localized messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Reason {
    OutOfRange,
    Occupied,
    Ko,
    Suicide,
}

impl Reason {
    pub fn code(self) -> &'static str {
        match self {
            Reason::OutOfRange => "OUT_OF_RANGE",
            Reason::Occupied => "OCCUPIED",
            Reason::Ko => "KO",
            Reason::Suicide => "SUICIDE",
        }
    }
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reason::OutOfRange => write!(f, "point is off the board"),
            Reason::Occupied => write!(f, "point is already occupied"),
            Reason::Ko => write!(f, "immediate recapture of a ko"),
            Reason::Suicide => write!(f, "suicide"),
        }
    }
}

impl std::error::Error for Reason {}

/// A persisted board setup that cannot be turned into a board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetupError {
    InvalidSize(u8),
    MalformedBoard,
    StoneOffBoard { x: i32, y: i32 },
}

impl fmt::Display for SetupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SetupError::InvalidSize(size) => write!(f, "invalid board size {size}"),
            SetupError::MalformedBoard => write!(f, "board rows must form a non-empty square"),
            SetupError::StoneOffBoard { x, y } => write!(f, "setup stone ({x}, {y}) is off the board"),
        }
    }
}

impl std::error::Error for SetupError {}

/// A move in a recorded sequence was rejected by the rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayError {
    /// 0-based position of the offending move in the list.
    pub index: usize,
    pub x: i32,
    pub y: i32,
    pub reason: Reason,
}

impl ReplayError {
    /// The offending point, if it lies on some board at all.
    pub fn point(&self) -> Option<Point> {
        Some((u8::try_from(self.x).ok()?, u8::try_from(self.y).ok()?))
    }
}

impl fmt::Display for ReplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "move {} at ({}, {}) rejected: {}",
            self.index + 1,
            self.x,
            self.y,
            self.reason
        )
    }
}

impl std::error::Error for ReplayError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.reason)
    }
}
