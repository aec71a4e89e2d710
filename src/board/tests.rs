use super::*;

#[test]
fn test_stone_opponent() {
    assert_eq!(Stone::Black.opponent(), Stone::White);
    assert_eq!(Stone::White.opponent(), Stone::Black);
    assert_eq!(Stone::Empty.opponent(), Stone::Empty);
}

#[test]
fn test_stone_codes() {
    for stone in [Stone::Empty, Stone::Black, Stone::White] {
        assert_eq!(Stone::from_code(stone.code()), Some(stone));
    }
    assert_eq!(Stone::from_code(3), None);
}

#[test]
fn test_pos_conversion() {
    let pos = Pos::new(7, 7);
    assert_eq!(pos.to_index(15), 112);
    assert_eq!(Pos::from_index(112, 15), pos);
}

#[test]
fn test_pos_ordering() {
    let pos1 = Pos::new(0, 0);
    let pos2 = Pos::new(0, 1);
    let pos3 = Pos::new(1, 0);

    assert!(pos1 < pos2);
    assert!(pos2 < pos3);
    assert!(pos1 < pos3);
}

#[test]
fn test_new_board() {
    let board = Board::new(DEFAULT_BOARD_SIZE);
    assert_eq!(board.size(), 15);
    assert_eq!(board.current_player(), Stone::Black);
    assert_eq!(board.last_move(), None);
    assert_eq!(board.move_count(), 0);
    assert!(board.is_board_empty());
    assert_eq!(board.center(), Pos::new(7, 7));
}

#[test]
#[should_panic]
fn test_board_too_small() {
    let _ = Board::new(4);
}

#[test]
fn test_place_stone_alternates() {
    let mut board = Board::new(15);
    assert!(board.place_stone(7, 7));
    assert_eq!(board.get(Pos::new(7, 7)), Stone::Black);
    assert_eq!(board.current_player(), Stone::White);
    assert_eq!(board.last_move(), Some(Pos::new(7, 7)));

    assert!(board.place_stone(7, 8));
    assert_eq!(board.get(Pos::new(7, 8)), Stone::White);
    assert_eq!(board.current_player(), Stone::Black);
    assert_eq!(board.move_count(), 2);
}

#[test]
fn test_illegal_placement_leaves_board_unchanged() {
    let mut board = Board::new(15);
    board.place_stone(3, 3);
    board.place_stone(4, 4);
    let before = board.clone();

    assert!(!board.place_stone(3, 3), "occupied");
    assert!(!board.place_stone(15, 0), "row out of bounds");
    assert!(!board.place_stone(0, 15), "col out of bounds");
    assert!(!board.place_stone(usize::MAX, usize::MAX));
    assert_eq!(board, before);
}

#[test]
fn test_apply_revert_restores_every_field() {
    let mut board = Board::new(9);
    for (r, c) in [(4, 4), (4, 5), (3, 3), (5, 5), (2, 6)] {
        assert!(board.place_stone(r, c));
    }
    let before = board.clone();

    for r in 0..9u8 {
        for c in 0..9u8 {
            let pos = Pos::new(r, c);
            if !board.is_empty(pos) {
                assert!(board.apply(pos).is_none());
                assert_eq!(board, before);
                continue;
            }
            let undo = board.apply(pos).expect("empty cell");
            assert_eq!(board.get(pos), before.current_player());
            assert_eq!(board.move_count(), before.move_count() + 1);
            board.revert(undo);
            assert_eq!(board, before, "revert at {pos:?}");
        }
    }
}

#[test]
fn test_nested_apply_revert() {
    let mut board = Board::new(15);
    board.place_stone(7, 7);
    let before = board.clone();

    let outer = board.apply(Pos::new(7, 8)).expect("legal");
    let inner = board.apply(Pos::new(8, 8)).expect("legal");
    assert_eq!(board.get(Pos::new(8, 8)), Stone::Black);
    board.revert(inner);
    let sibling = board.apply(Pos::new(6, 6)).expect("legal");
    board.revert(sibling);
    board.revert(outer);

    assert_eq!(board, before);
}

#[test]
fn test_apply_as_passes_turn_to_opponent() {
    let mut board = Board::new(15);
    let undo = board.apply_as(Pos::new(0, 0), Stone::White).expect("legal");
    assert_eq!(board.current_player(), Stone::Black);
    board.revert(undo);
    assert_eq!(board, Board::new(15));
}

#[test]
fn test_set_stone_keeps_turn() {
    let mut board = Board::with_first_player(15, Stone::White);
    assert!(board.set_stone(Pos::new(1, 1), Stone::Black));
    assert!(!board.set_stone(Pos::new(1, 1), Stone::White));
    assert!(!board.set_stone(Pos::new(2, 2), Stone::Empty));
    assert_eq!(board.current_player(), Stone::White);
    assert_eq!(board.move_count(), 1);
}

#[test]
fn test_is_full() {
    let mut board = Board::new(5);
    for r in 0..5 {
        for c in 0..5 {
            assert!(!board.is_full());
            board.place_stone(r, c);
        }
    }
    assert!(board.is_full());
    assert_eq!(board.move_count(), 25);
}

#[test]
fn test_window_count() {
    // n-4 starts per line; two straight directions, two diagonal ones
    let board = Board::new(15);
    let straight = 2 * 15 * 11;
    let diagonal = 2 * 11 * 11;
    assert_eq!(board.windows().count(), straight + diagonal);

    let small = Board::new(5);
    assert_eq!(small.windows().count(), 5 + 5 + 1 + 1);
}

#[test]
fn test_windows_are_contiguous() {
    let board = Board::new(7);
    for window in board.windows() {
        let dr = window[1].row as i32 - window[0].row as i32;
        let dc = window[1].col as i32 - window[0].col as i32;
        assert!(DIRECTIONS.contains(&(dr, dc)));
        for k in 1..WIN_LENGTH {
            assert_eq!(window[k].row as i32 - window[k - 1].row as i32, dr);
            assert_eq!(window[k].col as i32 - window[k - 1].col as i32, dc);
        }
    }
}

#[test]
fn test_display() {
    let mut board = Board::new(5);
    board.place_stone(0, 0);
    board.place_stone(4, 4);
    let text = board.to_string();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 6);
    assert_eq!(lines[0], "   A B C D E");
    assert_eq!(lines[1], " 1 ● . . . .");
    assert_eq!(lines[5], " 5 . . . . ○");
}
