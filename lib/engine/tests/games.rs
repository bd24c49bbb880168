use engine::board::{Board, Piece, Position, Side};
use engine::engine::{ClickEvent, Controller};
use engine::error::LoadError;
use engine::layout::{export_layout, load_layout, parse_layout};
use engine::rules::GameState;

fn board_with(pieces: &[((i32, i32), Piece)]) -> Board {
    let mut board = Board::empty();
    for (pos, piece) in pieces {
        board.set_piece((*pos).into(), *piece);
    }
    board
}

fn kings(board: &Board) -> usize {
    board.occupied().filter(|(_, piece)| piece.is_king()).count()
}

// 当前走棋方所有可走的（起点，终点）
fn all_moves(state: &GameState) -> Vec<(Position, Position)> {
    state
        .board
        .occupied()
        .flat_map(|(from, _)| {
            state
                .legal_destinations(from)
                .into_iter()
                .map(move |to| (from, to))
        })
        .collect()
}

#[test]
fn scripted_games_keep_invariants() {
    for seed in 1..=12usize {
        let mut state = GameState::new(Board::init(), Side::White);
        for ply in 0..300usize {
            if state.winner().is_some() {
                break;
            }
            let moves = all_moves(&state);
            if moves.is_empty() {
                break;
            }

            if let Some(chained) = state.chain {
                assert!(moves.iter().all(|(from, _)| *from == chained));
            }

            let (from, to) = moves[(ply * 7 + seed * 13) % moves.len()];
            let (next, outcome) = state.apply_move(from, to).unwrap();

            assert!(next.board.total_pieces() <= state.board.total_pieces());
            let lost_king = matches!(outcome.captured, Some((_, piece)) if piece.is_king());
            assert!(kings(&next.board) + usize::from(lost_king) >= kings(&state.board));
            for (pos, _) in next.board.occupied() {
                assert!(pos.is_dark(), "piece on light square {pos}\n{}", next.board);
            }
            if outcome.captured.is_some() {
                assert_eq!(next.board.total_pieces() + 1, state.board.total_pieces());
            }
            if next.board.winner().is_some() {
                assert_eq!(next.chain, None);
            }
            state = next;
        }
    }
}

#[test]
fn red_opening_move() {
    let state = GameState::new(Board::init(), Side::Red);
    let from = Position::new(1, 2);
    let to = Position::new(0, 3);
    assert!(state.legal_destinations(from).contains(&to));
    let (next, _) = state.apply_move(from, to).unwrap();
    assert_eq!(next.board.piece_at(to), Piece::Red);
    assert_eq!(next.turn, Side::White);
}

#[test]
fn capture_removes_jumped_piece_and_keeps_turn_while_chaining() {
    let board = board_with(&[
        ((1, 2), Piece::Red),
        ((2, 3), Piece::White),
        ((4, 5), Piece::White),
        ((7, 6), Piece::White),
    ]);
    let state = GameState::new(board, Side::Red);
    assert!(state
        .legal_destinations(Position::new(1, 2))
        .contains(&Position::new(3, 4)));

    let (next, outcome) = state
        .apply_move(Position::new(1, 2), Position::new(3, 4))
        .unwrap();
    assert_eq!(next.board.piece_at(Position::new(2, 3)), Piece::Empty);
    assert_eq!(next.board.piece_at(Position::new(3, 4)), Piece::Red);
    assert!(outcome.chain_continues);
    assert_eq!(next.turn, Side::Red);
}

#[test]
fn bad_layout_leaves_existing_board_alone() {
    let board = Board::init();
    let grid = vec![vec![-1; 8]; 7];
    assert_eq!(load_layout(&grid), Err(LoadError::RowCount { found: 7 }));
    assert_eq!(board, Board::init());
}

#[test]
fn loaded_layout_plays_through_the_controller() {
    let text = "\
-1,-1,-1,-1,-1,-1,-1,-1
-1,-1,-1,-1,-1,-1,-1,-1
-1,-1,-1,-1,-1,-1,-1,-1
-1,-1,-1,-1,-1,-1,-1,-1
-1,-1,-1,-1,-1,-1,-1,-1
-1,-1,-1,-1,-1,-1,-1,-1
-1,-1,-1,-1,-1,1,-1,-1
-1,-1,-1,-1,-1,-1,0,-1
";
    // 白兵在 (5,6)，红兵在 (6,7)
    let board = parse_layout(text).unwrap();
    assert_eq!(board.piece_at(Position::new(5, 6)), Piece::White);
    assert_eq!(board.piece_at(Position::new(6, 7)), Piece::Red);

    let mut controller = Controller::new(GameState::new(board, Side::White));
    // 白兵不能向后吃
    let event = controller.click(Position::new(5, 6));
    assert_eq!(
        event,
        ClickEvent::Selected {
            from: Position::new(5, 6),
            targets: vec![Position::new(4, 5), Position::new(6, 5)]
        }
    );
    controller.click(Position::new(4, 5));
    assert_eq!(controller.state().turn, Side::Red);
    // 红兵已在底线，没有任何走法
    assert_eq!(controller.click(Position::new(6, 7)), ClickEvent::Ignored);
    assert_eq!(export_layout(&controller.state().board).lines().count(), 8);
}

#[test]
fn last_capture_wins_immediately() {
    let board = board_with(&[((4, 5), Piece::WhiteKing), ((3, 6), Piece::Red)]);
    let mut controller = Controller::new(GameState::new(board, Side::White));
    controller.click(Position::new(4, 5));
    let event = controller.click(Position::new(2, 7));
    assert!(matches!(
        event,
        ClickEvent::GameOver {
            winner: Side::White,
            ..
        }
    ));
    assert_eq!(controller.state().board.winner(), Some(Side::White));
}
