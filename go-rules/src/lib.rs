pub mod board;
pub mod error;
pub mod replay;
pub mod rules;
pub mod setup;
pub mod stone;

/// A board coordinate `(x, y)`, 0-indexed from the top-left corner.
pub type Point = (u8, u8);

pub use board::Board;
pub use error::{Reason, ReplayError, SetupError};
pub use replay::{MoveRecord, Position, Replay, color_for, replay};
pub use rules::{MoveOutcome, Placement, apply_move, is_legal};
pub use setup::{BoardSetup, SetupStone};
pub use stone::Stone;
