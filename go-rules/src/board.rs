use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::Point;
use crate::error::SetupError;
use crate::stone::Stone;

/// A square Go board stored as a flat array of cells.
///
/// Boards are treated as immutable snapshots: rule application always
/// produces a new board and leaves the input untouched.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "Vec<Vec<i8>>", try_from = "Vec<Vec<i8>>")]
pub struct Board {
    cells: Vec<i8>,
    size: u8,
}

impl Board {
    /// Create a board from a matrix of rows (`1` black, `-1` white, `0` empty).
    ///
    /// Panics if the matrix is empty or not square.
    pub fn new(board: Vec<Vec<i8>>) -> Self {
        match Board::try_from(board) {
            Ok(board) => board,
            Err(e) => panic!("malformed board: {e}"),
        }
    }

    /// Create an empty board. Panics on a zero size.
    pub fn empty(size: u8) -> Self {
        assert!(size > 0, "malformed board: size must be positive");
        Board {
            cells: vec![0i8; size as usize * size as usize],
            size,
        }
    }

    // -- Accessors --

    pub fn size(&self) -> u8 {
        self.size
    }

    pub fn cells(&self) -> &[i8] {
        &self.cells
    }

    pub fn stone_at(&self, point: Point) -> Option<Stone> {
        if self.on_board(point) {
            Stone::from_int(self.cells[self.idx(point)])
        } else {
            None
        }
    }

    pub fn on_board(&self, (x, y): Point) -> bool {
        x < self.size && y < self.size
    }

    /// Convert raw request coordinates to a point on this board.
    pub fn point(&self, x: i32, y: i32) -> Option<Point> {
        let point = (u8::try_from(x).ok()?, u8::try_from(y).ok()?);
        self.on_board(point).then_some(point)
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|&c| c == 0)
    }

    /// All stones on the board in row-major order.
    pub fn stones(&self) -> impl Iterator<Item = (Point, Stone)> + '_ {
        let size = self.size as usize;
        self.cells.iter().enumerate().filter_map(move |(i, &c)| {
            Stone::from_int(c).map(|s| (((i % size) as u8, (i / size) as u8), s))
        })
    }

    pub fn to_matrix(&self) -> Vec<Vec<i8>> {
        self.cells
            .chunks(self.size as usize)
            .map(|row| row.to_vec())
            .collect()
    }

    /// Copy of this board with `stone` set at `point`, overwriting whatever was there.
    /// Off-board points leave the copy unchanged.
    pub fn with_stone(&self, point: Point, stone: Stone) -> Board {
        let mut board = self.clone();
        board.set_stone(point, stone);
        board
    }

    // -- Graph algorithms --

    /// Up to four adjacent points, clipped at the edges.
    pub fn neighbors(&self, (x, y): Point) -> ArrayVec<Point, 4> {
        let mut result = ArrayVec::new();
        if x > 0 {
            result.push((x - 1, y));
        }
        if x + 1 < self.size {
            result.push((x + 1, y));
        }
        if y > 0 {
            result.push((x, y - 1));
        }
        if y + 1 < self.size {
            result.push((x, y + 1));
        }
        result
    }

    /// Every stone reachable from `point` through same-colored neighbors.
    /// Empty for an empty point.
    pub fn chain(&self, point: Point) -> Vec<Point> {
        let mut visited = vec![false; self.cells.len()];
        self.chain_from(point, &mut visited)
    }

    /// Liberties of the group containing `point`.
    pub fn liberties(&self, point: Point) -> Vec<Point> {
        let chain = self.chain(point);
        self.chain_liberties(&chain)
    }

    /// Empty points touching `chain`, each listed once.
    pub fn chain_liberties(&self, chain: &[Point]) -> Vec<Point> {
        let mut seen = vec![false; self.cells.len()];
        let mut libs = Vec::new();
        for &p in chain {
            for n in self.neighbors(p) {
                let ni = self.idx(n);
                if !seen[ni] && self.stone_at(n).is_none() {
                    seen[ni] = true;
                    libs.push(n);
                }
            }
        }
        libs
    }

    /// Opponent groups touching the stone at `point`, each reported once.
    pub(crate) fn opponent_neighbor_chains(&self, point: Point) -> Vec<Vec<Point>> {
        let Some(stone) = self.stone_at(point) else {
            return Vec::new();
        };
        let opponent = stone.opp();

        let mut chains = Vec::new();
        let mut visited = vec![false; self.cells.len()];

        for n in self.neighbors(point) {
            if self.stone_at(n) != Some(opponent) || visited[self.idx(n)] {
                continue;
            }
            chains.push(self.chain_from(n, &mut visited));
        }

        chains
    }

    /// Stack-based fill; `visited` is shared so callers can skip groups already walked.
    fn chain_from(&self, point: Point, visited: &mut [bool]) -> Vec<Point> {
        let Some(stone) = self.stone_at(point) else {
            return Vec::new();
        };

        let mut result = Vec::new();
        let mut stack = vec![point];

        while let Some(p) = stack.pop() {
            let vi = self.idx(p);
            if visited[vi] {
                continue;
            }
            visited[vi] = true;
            result.push(p);
            for n in self.neighbors(p) {
                if self.stone_at(n) == Some(stone) && !visited[self.idx(n)] {
                    stack.push(n);
                }
            }
        }

        result
    }

    // -- Internal helpers --

    #[inline]
    fn idx(&self, (x, y): Point) -> usize {
        y as usize * self.size as usize + x as usize
    }

    pub(crate) fn set_stone(&mut self, point: Point, stone: Stone) {
        if self.on_board(point) {
            let i = self.idx(point);
            self.cells[i] = stone.to_int();
        }
    }

    pub(crate) fn clear_stones(&mut self, points: &[Point]) {
        for &p in points {
            if self.on_board(p) {
                let i = self.idx(p);
                self.cells[i] = 0;
            }
        }
    }
}

impl TryFrom<Vec<Vec<i8>>> for Board {
    type Error = SetupError;

    fn try_from(rows: Vec<Vec<i8>>) -> Result<Self, Self::Error> {
        let size = u8::try_from(rows.len()).map_err(|_| SetupError::MalformedBoard)?;
        if size == 0 || rows.iter().any(|row| row.len() != size as usize) {
            return Err(SetupError::MalformedBoard);
        }

        Ok(Board {
            cells: rows.into_iter().flatten().map(i8::signum).collect(),
            size,
        })
    }
}

impl From<Board> for Vec<Vec<i8>> {
    fn from(board: Board) -> Self {
        board.to_matrix()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.size {
            for x in 0..self.size {
                let c = self.stone_at((x, y)).map_or('+', Stone::letter);
                write!(f, "{c}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
