//! Error types for the draughts engine
//!
//! Illegal moves are an ordinary outcome the caller recovers from; a bad
//! layout is the only hard failure and always prevents the board from being
//! built.

use thiserror::Error;

use crate::board::{Position, Side};

/// Rejected `apply_move` requests
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MoveError {
    #[error("No piece at source square {from}")]
    EmptySource { from: Position },

    #[error("Piece at {from} does not belong to {turn}, it is {turn}'s turn")]
    WrongSide { from: Position, turn: Side },

    #[error("Capture chain in progress, only the piece at {chained} may move")]
    ChainInProgress { chained: Position },

    #[error("Illegal move from {from} to {to}")]
    IllegalDestination { from: Position, to: Position },

    #[error("Game is over, {winner} has won")]
    GameOver { winner: Side },
}

/// Malformed external layouts
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    #[error("Layout has {found} rows, expected 8")]
    RowCount { found: usize },

    #[error("Layout row {row} has {found} columns, expected 8")]
    ColumnCount { row: usize, found: usize },

    #[error("Layout cell at row {row}, column {col} is not an integer: {cell:?}")]
    InvalidCell { row: usize, col: usize, cell: String },

    #[error("Unknown piece code {code} at row {row}, column {col}")]
    UnknownCode { row: usize, col: usize, code: i32 },

    #[error("Piece on light square at row {row}, column {col}")]
    LightSquare { row: usize, col: usize },
}

pub type MoveResult<T> = Result<T, MoveError>;
pub type LoadResult<T> = Result<T, LoadError>;
