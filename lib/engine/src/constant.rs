use crate::board::Piece;
use std::{collections::HashMap, sync::LazyLock};

pub const BOARD_SIZE: i32 = 8;

// 开局时双方各占三行
pub const HOME_ROWS: i32 = 3;

// 布局文件中的棋子编码
pub const CODE_EMPTY: i32 = -1;
pub const CODE_RED: i32 = 0;
pub const CODE_WHITE: i32 = 1;
pub const CODE_RED_KING: i32 = 2;
pub const CODE_WHITE_KING: i32 = 3;

pub static CODE_MAP: LazyLock<HashMap<i32, Piece>> = LazyLock::new(|| {
    HashMap::from([
        (CODE_EMPTY, Piece::Empty),
        (CODE_RED, Piece::Red),
        (CODE_WHITE, Piece::White),
        (CODE_RED_KING, Piece::RedKing),
        (CODE_WHITE_KING, Piece::WhiteKing),
    ])
});
