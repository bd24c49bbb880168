/*
 * 棋盘模块（Board 与棋子表示）
 *
 * 设计要点
 * - 棋盘为 8 x 8，x 为列（0 在最左），y 为行（0 在最上）
 * - 只有深色格（x % 2 != y % 2）会放棋子，浅色格永远为空
 * - 红方开局占据 0..3 行，向 y 增大的方向走，到第 7 行升王
 * - 白方开局占据 5..8 行，向 y 减小的方向走，到第 0 行升王
 * - Board 只保存数据，走法规则在 rules 模块里
 */

use std::fmt;

use crate::constant::{BOARD_SIZE, CODE_MAP, HOME_ROWS};

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Side {
    Red,
    White,
}

impl Side {
    pub fn next(&self) -> Side {
        match self {
            Side::Red => Side::White,
            Side::White => Side::Red,
        }
    }
    // 前进方向上 y 的增量
    pub fn forward(&self) -> i32 {
        match self {
            Side::Red => 1,
            Side::White => -1,
        }
    }
    // 底线：兵走到这一行升王
    pub fn far_rank(&self) -> i32 {
        match self {
            Side::Red => BOARD_SIZE - 1,
            Side::White => 0,
        }
    }
    pub fn name(&self) -> &'static str {
        match self {
            Side::Red => "Red",
            Side::White => "White",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub enum Piece {
    #[default]
    Empty,
    Red,
    RedKing,
    White,
    WhiteKing,
}

impl Piece {
    pub fn side(&self) -> Option<Side> {
        match self {
            Piece::Red | Piece::RedKing => Some(Side::Red),
            Piece::White | Piece::WhiteKing => Some(Side::White),
            Piece::Empty => None,
        }
    }
    pub fn belong_to(&self, side: Side) -> bool {
        self.side() == Some(side)
    }
    // 兵和王同属一方，只有对方的棋子才能被吃
    pub fn is_opponent_of(&self, side: Side) -> bool {
        self.side() == Some(side.next())
    }
    pub fn is_empty(&self) -> bool {
        *self == Piece::Empty
    }
    pub fn is_king(&self) -> bool {
        matches!(self, Piece::RedKing | Piece::WhiteKing)
    }
    /// The king of the same side; kings and empty squares are returned unchanged.
    pub fn promoted(&self) -> Piece {
        match self {
            Piece::Red => Piece::RedKing,
            Piece::White => Piece::WhiteKing,
            other => *other,
        }
    }
    /// Integer code used by the layout file format.
    pub fn code(&self) -> i32 {
        CODE_MAP
            .iter()
            .find(|(_, piece)| *piece == self)
            .map(|(code, _)| *code)
            .unwrap_or(crate::constant::CODE_EMPTY)
    }
    pub fn from_code(code: i32) -> Option<Piece> {
        CODE_MAP.get(&code).copied()
    }
    pub fn symbol(&self) -> char {
        match self {
            Piece::Empty => '.',
            Piece::Red => 'r',
            Piece::RedKing => 'R',
            Piece::White => 'w',
            Piece::WhiteKing => 'W',
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl From<(i32, i32)> for Position {
    fn from(value: (i32, i32)) -> Self {
        Position {
            x: value.0,
            y: value.1,
        }
    }
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Position { x, y }
    }
    pub fn step(&self, direction: Direction, distance: i32) -> Self {
        let (dx, dy) = direction.delta();
        Position::new(self.x + dx * distance, self.y + dy * distance)
    }
    pub fn is_dark(&self) -> bool {
        self.x % 2 != self.y % 2
    }
    // 两格斜跳的中点，即被吃的棋子所在位置
    pub fn midpoint(&self, other: Position) -> Position {
        Position::new((self.x + other.x) / 2, (self.y + other.y) / 2)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Direction {
    UpLeft,
    UpRight,
    DownLeft,
    DownRight,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::UpLeft,
        Direction::UpRight,
        Direction::DownLeft,
        Direction::DownRight,
    ];

    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::UpLeft => (-1, -1),
            Direction::UpRight => (1, -1),
            Direction::DownLeft => (-1, 1),
            Direction::DownRight => (1, 1),
        }
    }
    pub fn is_forward_for(&self, side: Side) -> bool {
        self.delta().1 == side.forward()
    }
}

// 坐标是否在棋盘内
pub fn in_board(pos: Position) -> bool {
    pos.x >= 0 && pos.x < BOARD_SIZE && pos.y >= 0 && pos.y < BOARD_SIZE
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Board {
    // 按行存放：pieces[y][x]
    pub pieces: [[Piece; BOARD_SIZE as usize]; BOARD_SIZE as usize],
}

impl Default for Board {
    fn default() -> Self {
        Board::init()
    }
}

impl Board {
    // 标准开局：深色格上，前三行红方，后三行白方，中间两行空
    pub fn init() -> Self {
        let mut board = Board::empty();
        for y in 0..BOARD_SIZE {
            for x in 0..BOARD_SIZE {
                let pos = Position::new(x, y);
                if !pos.is_dark() {
                    continue;
                }
                if y < HOME_ROWS {
                    board.set_piece(pos, Piece::Red);
                } else if y >= BOARD_SIZE - HOME_ROWS {
                    board.set_piece(pos, Piece::White);
                }
            }
        }
        board
    }
    pub fn empty() -> Self {
        Board {
            pieces: [[Piece::Empty; BOARD_SIZE as usize]; BOARD_SIZE as usize],
        }
    }
    /// Checked accessor, `None` when `pos` is off the board.
    pub fn get(&self, pos: Position) -> Option<Piece> {
        if in_board(pos) {
            Some(self.pieces[pos.y as usize][pos.x as usize])
        } else {
            None
        }
    }
    pub fn piece_at(&self, pos: Position) -> Piece {
        self.get(pos).unwrap_or(Piece::Empty)
    }
    pub fn set_piece(&mut self, pos: Position, piece: Piece) {
        self.pieces[pos.y as usize][pos.x as usize] = piece;
    }
    // 遍历所有有棋子的格子
    pub fn occupied(&self) -> impl Iterator<Item = (Position, Piece)> + '_ {
        self.pieces.iter().enumerate().flat_map(|(y, row)| {
            row.iter()
                .enumerate()
                .filter(|(_, piece)| !piece.is_empty())
                .map(move |(x, piece)| (Position::new(x as i32, y as i32), *piece))
        })
    }
    pub fn piece_count(&self, side: Side) -> usize {
        self.occupied()
            .filter(|(_, piece)| piece.belong_to(side))
            .count()
    }
    pub fn total_pieces(&self) -> usize {
        self.occupied().count()
    }
    // 一方棋子被吃光，另一方获胜
    pub fn winner(&self) -> Option<Side> {
        let red = self.piece_count(Side::Red);
        let white = self.piece_count(Side::White);
        match (red, white) {
            (0, 0) => None,
            (_, 0) => Some(Side::Red),
            (0, _) => Some(Side::White),
            _ => None,
        }
    }
    pub fn to_codes(&self) -> [[i32; BOARD_SIZE as usize]; BOARD_SIZE as usize] {
        self.pieces.map(|row| row.map(|piece| piece.code()))
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.pieces.iter() {
            let line: String = row.iter().map(Piece::symbol).collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
