use go_rules::{Board, BoardSetup, MoveOutcome, MoveRecord, Point, Reason, Replay, Stone};
use serde::Serialize;
use wasm_bindgen::prelude::*;

#[derive(Serialize)]
#[serde(untagged)]
enum OutcomeJson {
    Legal {
        legal: bool,
        board: Board,
        captured: Vec<Point>,
        ko: Option<Point>,
    },
    Illegal {
        legal: bool,
        reason: Reason,
    },
}

impl From<MoveOutcome> for OutcomeJson {
    fn from(outcome: MoveOutcome) -> Self {
        match outcome {
            MoveOutcome::Legal(p) => OutcomeJson::Legal {
                legal: true,
                board: p.board,
                captured: p.captured,
                ko: p.ko,
            },
            MoveOutcome::Illegal(reason) => OutcomeJson::Illegal {
                legal: false,
                reason,
            },
        }
    }
}

fn error_json(e: impl std::fmt::Display) -> String {
    serde_json::json!({ "error": e.to_string() }).to_string()
}

/// Apply one move to a board given as a JSON matrix of rows.
/// `ko_json` is `null` or `[x, y]`.
/// Returns `{ legal: true, board, captured, ko }`, `{ legal: false, reason }`,
/// or `{ error }` when the inputs cannot be decoded.
#[wasm_bindgen]
pub fn apply_move(board_json: &str, x: i32, y: i32, stone: &str, ko_json: &str) -> String {
    let board: Board = match serde_json::from_str(board_json) {
        Ok(b) => b,
        Err(e) => return error_json(e),
    };
    let stone: Stone = match stone.parse() {
        Ok(s) => s,
        Err(e) => return error_json(e),
    };
    let ko: Option<Point> = match serde_json::from_str(ko_json) {
        Ok(k) => k,
        Err(e) => return error_json(e),
    };

    let outcome = OutcomeJson::from(go_rules::apply_move(&board, x, y, stone, ko));
    serde_json::to_string(&outcome).unwrap_or_else(error_json)
}

/// Browser-side problem board: a setup plus the moves played on it.
#[wasm_bindgen]
pub struct WasmReplay {
    inner: Replay,
    last_reason: Option<Reason>,
}

#[wasm_bindgen]
impl WasmReplay {
    /// Build from a stored setup (`{ size, stones, first_player }`).
    #[wasm_bindgen(constructor)]
    pub fn new(setup_json: &str) -> Result<WasmReplay, JsError> {
        let setup: BoardSetup = serde_json::from_str(setup_json)?;
        Ok(Self {
            inner: Replay::from_setup(&setup)?,
            last_reason: None,
        })
    }

    /// Replace the move list with a stored one (`[{ x, y }, ...]`).
    pub fn load_moves(&mut self, moves_json: &str) -> Result<(), JsError> {
        let moves: Vec<MoveRecord> = serde_json::from_str(moves_json)?;
        self.inner.replace_moves(&moves)?;
        self.last_reason = None;
        Ok(())
    }

    pub fn moves_json(&self) -> String {
        serde_json::to_string(self.inner.moves()).unwrap_or_else(|_| "[]".to_string())
    }

    // -- Game actions --

    pub fn try_play(&mut self, x: i32, y: i32) -> bool {
        match self.inner.try_play(x, y) {
            Ok(_) => {
                self.last_reason = None;
                true
            }
            Err(reason) => {
                self.last_reason = Some(reason);
                false
            }
        }
    }

    /// Code of the most recent rejection (`"KO"`, `"SUICIDE"`, ...), or empty.
    pub fn last_reason(&self) -> String {
        self.last_reason
            .map(|r| r.code().to_string())
            .unwrap_or_default()
    }

    pub fn undo(&mut self) -> bool {
        self.inner.undo()
    }

    pub fn is_legal(&self, x: i32, y: i32) -> bool {
        self.inner.is_legal(x, y)
    }

    // -- Navigation --

    pub fn back(&mut self) -> bool {
        self.inner.back()
    }

    pub fn forward(&mut self) -> bool {
        self.inner.forward()
    }

    pub fn to_start(&mut self) {
        self.inner.to_start();
    }

    pub fn to_latest(&mut self) {
        self.inner.to_latest();
    }

    pub fn view_index(&self) -> usize {
        self.inner.view_index()
    }

    pub fn total_moves(&self) -> usize {
        self.inner.total_moves()
    }

    // -- Board accessors --

    pub fn board(&self) -> js_sys::Int8Array {
        js_sys::Int8Array::from(self.inner.board().cells())
    }

    pub fn size(&self) -> u8 {
        self.inner.board().size()
    }

    pub fn next_stone(&self) -> i8 {
        self.inner.next_stone().to_int()
    }

    pub fn ko_x(&self) -> i32 {
        self.inner.ko().map_or(-1, |(x, _)| x.into())
    }

    pub fn ko_y(&self) -> i32 {
        self.inner.ko().map_or(-1, |(_, y)| y.into())
    }

    pub fn last_move_x(&self) -> i32 {
        self.inner.current().last_move.map_or(-1, |(x, _)| x.into())
    }

    pub fn last_move_y(&self) -> i32 {
        self.inner.current().last_move.map_or(-1, |(_, y)| y.into())
    }

    /// Points captured by the move that produced the viewed position, as `[[x, y], ...]`.
    pub fn captured_json(&self) -> String {
        serde_json::to_string(&self.inner.current().captured).unwrap_or_else(|_| "[]".to_string())
    }
}
