/*
 * 布局文件：8 行，每行 8 个用逗号分隔的整数编码，从最上面一行开始
 *   -1 空  0 红兵  1 白兵  2 红王  3 白王
 * 加载失败时不会返回任何半成品棋盘
 */

use tracing::debug;

use crate::board::{Board, Piece, Position};
use crate::constant::BOARD_SIZE;
use crate::error::{LoadError, LoadResult};

/// Builds a board from a grid of piece codes, rejecting anything that is not
/// exactly 8×8 of known codes on dark squares.
pub fn load_layout<R: AsRef<[i32]>>(grid: &[R]) -> LoadResult<Board> {
    if grid.len() != BOARD_SIZE as usize {
        return Err(LoadError::RowCount { found: grid.len() });
    }
    let mut board = Board::empty();
    for (row, codes) in grid.iter().enumerate() {
        let codes = codes.as_ref();
        if codes.len() != BOARD_SIZE as usize {
            return Err(LoadError::ColumnCount {
                row,
                found: codes.len(),
            });
        }
        for (col, &code) in codes.iter().enumerate() {
            let piece = Piece::from_code(code).ok_or(LoadError::UnknownCode { row, col, code })?;
            let pos = Position::new(col as i32, row as i32);
            if !piece.is_empty() && !pos.is_dark() {
                return Err(LoadError::LightSquare { row, col });
            }
            board.set_piece(pos, piece);
        }
    }
    Ok(board)
}

pub fn parse_layout(text: &str) -> LoadResult<Board> {
    let mut lines: Vec<&str> = text.lines().collect();
    // 忽略文件末尾的空行
    while lines.last().is_some_and(|line| line.trim().is_empty()) {
        lines.pop();
    }

    let mut grid = Vec::with_capacity(lines.len());
    for (row, line) in lines.iter().enumerate() {
        let codes = line
            .split(',')
            .enumerate()
            .map(|(col, cell)| {
                cell.trim().parse::<i32>().map_err(|_| LoadError::InvalidCell {
                    row,
                    col,
                    cell: cell.to_owned(),
                })
            })
            .collect::<LoadResult<Vec<i32>>>()?;
        grid.push(codes);
    }

    let board = load_layout(&grid)?;
    debug!(pieces = board.total_pieces(), "layout loaded");
    Ok(board)
}

pub fn export_layout(board: &Board) -> String {
    board
        .to_codes()
        .iter()
        .map(|row| {
            let cells: Vec<String> = row.iter().map(|code| code.to_string()).collect();
            format!("{}\n", cells.join(","))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use crate::board::*;
    use crate::error::LoadError;
    use crate::layout::*;

    const START: &str = "\
-1,0,-1,0,-1,0,-1,0
0,-1,0,-1,0,-1,0,-1
-1,0,-1,0,-1,0,-1,0
-1,-1,-1,-1,-1,-1,-1,-1
-1,-1,-1,-1,-1,-1,-1,-1
1,-1,1,-1,1,-1,1,-1
-1,1,-1,1,-1,1,-1,1
1,-1,1,-1,1,-1,1,-1
";

    #[test]
    fn test_export_initial_layout() {
        assert_eq!(export_layout(&Board::init()), START);
    }

    #[test]
    fn test_parse_initial_layout() {
        assert_eq!(parse_layout(START), Ok(Board::init()));
    }

    #[test]
    fn test_parse_tolerates_whitespace_and_trailing_blank_lines() {
        let text = START.replace(",", " , ").replace("\n", "\r\n") + "\n\n";
        assert_eq!(parse_layout(&text), Ok(Board::init()));
    }

    #[test]
    fn test_kings_survive_export() {
        let mut board = Board::empty();
        board.set_piece(Position::new(0, 7), Piece::RedKing);
        board.set_piece(Position::new(7, 0), Piece::WhiteKing);
        let text = export_layout(&board);
        assert!(text.starts_with("-1,-1,-1,-1,-1,-1,-1,3\n"));
        assert_eq!(parse_layout(&text), Ok(board));
    }

    #[test]
    fn test_seven_rows_rejected() {
        let grid = vec![[-1; 8]; 7];
        assert_eq!(load_layout(&grid), Err(LoadError::RowCount { found: 7 }));
        let text: String = START.lines().take(7).map(|line| format!("{line}\n")).collect();
        assert_eq!(parse_layout(&text), Err(LoadError::RowCount { found: 7 }));
    }

    #[test]
    fn test_short_row_rejected() {
        let mut grid = vec![vec![-1; 8]; 8];
        grid[2].pop();
        assert_eq!(
            load_layout(&grid),
            Err(LoadError::ColumnCount { row: 2, found: 7 })
        );
    }

    #[test]
    fn test_unknown_code_rejected() {
        let mut grid = vec![[-1; 8]; 8];
        grid[0][1] = 4;
        assert_eq!(
            load_layout(&grid),
            Err(LoadError::UnknownCode {
                row: 0,
                col: 1,
                code: 4
            })
        );
    }

    #[test]
    fn test_unparseable_cell_rejected() {
        let text = START.replacen("0", "x", 1);
        assert_eq!(
            parse_layout(&text),
            Err(LoadError::InvalidCell {
                row: 0,
                col: 1,
                cell: "x".to_string()
            })
        );
    }

    #[test]
    fn test_light_square_rejected() {
        let mut grid = vec![[-1; 8]; 8];
        grid[3][3] = 1;
        assert_eq!(
            load_layout(&grid),
            Err(LoadError::LightSquare { row: 3, col: 3 })
        );
    }
}
