/*
 * 走法规则：普通走子、吃子、连吃、升王、轮换
 *
 * - 兵只能向前斜走一格，吃子也只能向前
 * - 王可以向四个斜方向走一格或吃子
 * - 吃子方向每次从当前棋盘重新计算，不在棋子上缓存任何状态
 * - 开局第一步吃子不是强制的，但连吃过程中必须继续用同一个棋子吃
 */

use tracing::debug;

use crate::board::{Board, Direction, Piece, Position, Side};
use crate::error::{MoveError, MoveResult};

// 棋子可以走的方向：兵只能向前，王四个方向都可以
fn move_directions(piece: Piece) -> Vec<Direction> {
    match piece.side() {
        Some(side) if !piece.is_king() => Direction::ALL
            .into_iter()
            .filter(|dir| dir.is_forward_for(side))
            .collect(),
        Some(_) => Direction::ALL.to_vec(),
        None => vec![],
    }
}

/// Directions in which the neighbour of `from` holds an opposing piece and
/// the square beyond it is an empty on-board square. Does not look at
/// whether the piece is allowed to move that way.
pub fn capture_directions(board: &Board, from: Position) -> Vec<Direction> {
    let Some(side) = board.piece_at(from).side() else {
        return vec![];
    };
    Direction::ALL
        .into_iter()
        .filter(|dir| {
            let over = board.get(from.step(*dir, 1));
            let landing = board.get(from.step(*dir, 2));
            matches!(over, Some(piece) if piece.is_opponent_of(side))
                && landing == Some(Piece::Empty)
        })
        .collect()
}

pub fn simple_destinations(board: &Board, from: Position) -> Vec<Position> {
    move_directions(board.piece_at(from))
        .into_iter()
        .map(|dir| from.step(dir, 1))
        .filter(|to| board.get(*to) == Some(Piece::Empty))
        .collect()
}

pub fn capture_destinations(board: &Board, from: Position) -> Vec<Position> {
    let allowed = move_directions(board.piece_at(from));
    capture_directions(board, from)
        .into_iter()
        .filter(|dir| allowed.contains(dir))
        .map(|dir| from.step(dir, 2))
        .collect()
}

/// What a successful `apply_move` did to the board.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct MoveOutcome {
    pub side: Side,
    pub from: Position,
    pub to: Position,
    pub piece: Piece, // 落子后的棋子，升王后为王
    pub captured: Option<(Position, Piece)>,
    pub promoted: bool,
    pub chain_continues: bool,
}

/// Board plus turn state. Every engine call takes one of these and returns a
/// new one; nothing is mutated behind the caller's back.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct GameState {
    pub board: Board,
    pub turn: Side,
    // 连吃中的棋子位置，None 表示没有在连吃
    pub chain: Option<Position>,
}

impl GameState {
    pub fn new(board: Board, first: Side) -> Self {
        GameState {
            board,
            turn: first,
            chain: None,
        }
    }

    pub fn legal_destinations(&self, from: Position) -> Vec<Position> {
        if !self.board.piece_at(from).belong_to(self.turn) {
            return vec![];
        }
        match self.chain {
            Some(chained) if chained == from => capture_destinations(&self.board, from),
            // 连吃只能由同一个棋子继续
            Some(_) => vec![],
            None => {
                let mut targets = simple_destinations(&self.board, from);
                targets.extend(capture_destinations(&self.board, from));
                targets
            }
        }
    }

    pub fn is_legal_move(&self, from: Position, to: Position) -> bool {
        from != to && self.legal_destinations(from).contains(&to)
    }

    // 检查走子请求，给出具体的拒绝原因
    fn check_move(&self, from: Position, to: Position) -> MoveResult<Piece> {
        if let Some(winner) = self.board.winner() {
            return Err(MoveError::GameOver { winner });
        }
        let piece = self.board.piece_at(from);
        if piece.is_empty() {
            return Err(MoveError::EmptySource { from });
        }
        if !piece.belong_to(self.turn) {
            return Err(MoveError::WrongSide {
                from,
                turn: self.turn,
            });
        }
        if let Some(chained) = self.chain {
            if chained != from {
                return Err(MoveError::ChainInProgress { chained });
            }
        }
        if !self.is_legal_move(from, to) {
            return Err(MoveError::IllegalDestination { from, to });
        }
        Ok(piece)
    }

    pub fn apply_move(&self, from: Position, to: Position) -> MoveResult<(GameState, MoveOutcome)> {
        let piece = self.check_move(from, to)?;
        let mut board = self.board;

        board.set_piece(from, Piece::Empty);

        // 横向跨两格就是吃子，移除中间的棋子
        let captured = if (to.x - from.x).abs() == 2 {
            let over = from.midpoint(to);
            let victim = board.piece_at(over);
            board.set_piece(over, Piece::Empty);
            Some((over, victim))
        } else {
            None
        };

        // 落地即升王，连吃中也一样
        let promoted = !piece.is_king() && to.y == self.turn.far_rank();
        let landed = if promoted { piece.promoted() } else { piece };
        board.set_piece(to, landed);

        let chain_continues =
            captured.is_some() && !capture_destinations(&board, to).is_empty();
        let next = GameState {
            board,
            turn: if chain_continues { self.turn } else { self.turn.next() },
            chain: if chain_continues { Some(to) } else { None },
        };

        debug!(
            side = %self.turn,
            %from,
            %to,
            captured = ?captured,
            promoted,
            chain_continues,
            "move applied"
        );

        Ok((
            next,
            MoveOutcome {
                side: self.turn,
                from,
                to,
                piece: landed,
                captured,
                promoted,
                chain_continues,
            },
        ))
    }

    /// Ends an unfinished capture chain and hands the turn to the opponent.
    /// Returns the state unchanged when no chain is in progress.
    pub fn forfeit_chain(&self) -> GameState {
        match self.chain {
            Some(chained) => {
                debug!(side = %self.turn, %chained, "capture chain abandoned");
                GameState {
                    board: self.board,
                    turn: self.turn.next(),
                    chain: None,
                }
            }
            None => *self,
        }
    }

    pub fn winner(&self) -> Option<Side> {
        self.board.winner()
    }
}
