use go_rules::{Board, MoveOutcome, Point, Reason, Stone, apply_move, color_for, is_legal};
use proptest::prelude::*;

const SIZE: u8 = 7;

/// Play `moves` from an empty board, skipping illegal ones, so every
/// generated position is reachable in a real game.
fn play_out(moves: &[(i32, i32)]) -> (Board, Option<Point>, Stone) {
    let mut board = Board::empty(SIZE);
    let mut ko = None;
    let mut turn = 0;
    for &(x, y) in moves {
        if let MoveOutcome::Legal(p) = apply_move(&board, x, y, color_for(turn, Stone::Black), ko) {
            board = p.board;
            ko = p.ko;
            turn += 1;
        }
    }
    (board, ko, color_for(turn, Stone::Black))
}

/// One of the eight rotations/reflections of the square.
fn transform((x, y): Point, t: u8) -> Point {
    let m = SIZE - 1;
    let (x, y) = if t & 4 != 0 { (y, x) } else { (x, y) };
    let x = if t & 1 != 0 { m - x } else { x };
    let y = if t & 2 != 0 { m - y } else { y };
    (x, y)
}

fn transform_board(board: &Board, t: u8) -> Board {
    let mut rows = vec![vec![0i8; SIZE as usize]; SIZE as usize];
    for ((x, y), stone) in board.stones() {
        let (tx, ty) = transform((x, y), t);
        rows[ty as usize][tx as usize] = stone.to_int();
    }
    Board::new(rows)
}

fn moves_strategy() -> impl Strategy<Value = Vec<(i32, i32)>> {
    prop::collection::vec((0..SIZE as i32, 0..SIZE as i32), 0..60)
}

fn stone_strategy() -> impl Strategy<Value = Stone> {
    prop_oneof![Just(Stone::Black), Just(Stone::White)]
}

proptest! {
    #[test]
    fn outcome_matches_legality_check(
        moves in moves_strategy(),
        x in -2..SIZE as i32 + 2,
        y in -2..SIZE as i32 + 2,
        stone in stone_strategy(),
    ) {
        let (board, ko, _) = play_out(&moves);
        let outcome = apply_move(&board, x, y, stone, ko);
        prop_assert_eq!(is_legal(&board, x, y, stone, ko), outcome.is_legal());

        match outcome.clone().into_result() {
            Ok(placement) => {
                let point = board.point(x, y).expect("legal move lies on the board");
                prop_assert_eq!(board.stone_at(point), None);
                prop_assert_eq!(placement.board.stone_at(point), Some(stone));
                prop_assert_eq!(outcome.board_or(&board), &placement.board);
                for &c in &placement.captured {
                    prop_assert_eq!(board.stone_at(c), Some(stone.opp()));
                    prop_assert_eq!(placement.board.stone_at(c), None);
                }
                for (p, s) in board.stones().filter(|(p, _)| !placement.captured.contains(p)) {
                    prop_assert_eq!(placement.board.stone_at(p), Some(s));
                }
                prop_assert_eq!(
                    placement.board.stones().count(),
                    board.stones().count() + 1 - placement.captured.len()
                );
            }
            Err(reason) => {
                prop_assert_eq!(outcome.reason(), Some(reason));
                prop_assert!(std::ptr::eq(outcome.board_or(&board), &board));
            }
        }
    }

    #[test]
    fn no_dead_group_survives(moves in moves_strategy()) {
        let (board, _, _) = play_out(&moves);
        for (point, _) in board.stones() {
            prop_assert!(!board.liberties(point).is_empty(), "{point:?} has no liberties\n{board}");
        }
    }

    #[test]
    fn occupied_points_always_rejected(
        moves in moves_strategy(),
        stone in stone_strategy(),
        with_ko in any::<bool>(),
    ) {
        let (board, _, _) = play_out(&moves);
        for ((x, y), _) in board.stones() {
            let ko = with_ko.then_some((x, y));
            let outcome = apply_move(&board, x.into(), y.into(), stone, ko);
            prop_assert_eq!(outcome, MoveOutcome::Illegal(Reason::Occupied));
        }
    }

    #[test]
    fn ko_blocks_only_its_point(moves in moves_strategy()) {
        let (board, ko, to_play) = play_out(&moves);
        if let Some((kx, ky)) = ko {
            let retake = apply_move(&board, kx.into(), ky.into(), to_play, ko);
            prop_assert_eq!(retake, MoveOutcome::Illegal(Reason::Ko));

            for y in 0..SIZE {
                for x in 0..SIZE {
                    if (x, y) == (kx, ky) {
                        continue;
                    }
                    let with_ko = apply_move(&board, x.into(), y.into(), to_play, ko);
                    let without = apply_move(&board, x.into(), y.into(), to_play, None);
                    prop_assert_eq!(with_ko, without);
                }
            }
        }
    }

    #[test]
    fn outcome_is_symmetric(
        moves in moves_strategy(),
        x in 0..SIZE,
        y in 0..SIZE,
        t in 0u8..8,
    ) {
        let (board, ko, to_play) = play_out(&moves);
        let outcome = apply_move(&board, x.into(), y.into(), to_play, ko);

        let (tx, ty) = transform((x, y), t);
        let t_board = transform_board(&board, t);
        let t_ko = ko.map(|p| transform(p, t));
        let t_outcome = apply_move(&t_board, tx.into(), ty.into(), to_play, t_ko);

        match (outcome, t_outcome) {
            (MoveOutcome::Legal(a), MoveOutcome::Legal(b)) => {
                prop_assert_eq!(transform_board(&a.board, t), b.board);
                prop_assert_eq!(a.ko.map(|p| transform(p, t)), b.ko);
                let mut expected: Vec<Point> = a.captured.iter().map(|&p| transform(p, t)).collect();
                let mut actual = b.captured;
                expected.sort();
                actual.sort();
                prop_assert_eq!(expected, actual);
            }
            (MoveOutcome::Illegal(a), MoveOutcome::Illegal(b)) => prop_assert_eq!(a, b),
            (a, b) => prop_assert!(false, "asymmetric outcomes: {a:?} vs {b:?}"),
        }
    }
}
