use std::{cell::RefCell, fs, path::Path, rc::Rc};

use anyhow::Context;
use engine::{
    board::{Board, Piece, Position, Side},
    constant::BOARD_SIZE,
    engine::{ClickEvent, Controller},
    layout,
};
use fltk::{app, dialog, enums::*, frame::Frame, prelude::*, window::*};
use tracing::{debug, error, info};

use crate::config::{Config, Palette};

const SQUARE_SIZE: i32 = 100;

pub fn ui(controller: Controller, config: &Config) -> anyhow::Result<()> {
    let app = app::App::default().with_scheme(app::Scheme::Gleam);
    let palette = config.palette;
    let controller = Rc::new(RefCell::new(controller));

    let mut window = Window::new(
        100,
        100,
        SQUARE_SIZE * BOARD_SIZE,
        SQUARE_SIZE * BOARD_SIZE,
        "Draughts",
    );

    // 每个格子一个 Frame，点击统一由窗口处理
    let mut squares = Vec::with_capacity((BOARD_SIZE * BOARD_SIZE) as usize);
    for y in 0..BOARD_SIZE {
        for x in 0..BOARD_SIZE {
            let mut square = Frame::new(x * SQUARE_SIZE, y * SQUARE_SIZE, SQUARE_SIZE, SQUARE_SIZE, "");
            square.set_frame(FrameType::FlatBox);
            square.set_label_size(SQUARE_SIZE * 6 / 10);
            squares.push(square);
        }
    }
    window.end();
    window.set_label(&title(&controller.borrow()));
    redrawn(&mut squares, &controller.borrow(), &palette);
    window.show();

    {
        let controller = controller.clone();
        window.handle(move |w, event| {
            if let Event::Push = event {
                let (click_x, click_y) = app::event_coords();
                let Some(pos) = square_at(click_x, click_y) else {
                    return false;
                };
                // 点击棋盘
                let event = controller.borrow_mut().click(pos);
                report(&event);
                redrawn(&mut squares, &controller.borrow(), &palette);
                w.set_label(&title(&controller.borrow()));
                w.redraw();
                if let ClickEvent::GameOver { winner, .. } = event {
                    dialog::message_default(&format!("{winner} wins!"));
                }
                return true;
            }
            false
        });
    }

    let export_path = config.export.clone();
    window.set_callback(move |w| {
        if let Some(path) = &export_path {
            if let Err(err) = export(path, &controller.borrow().state().board) {
                error!("{err:#}");
            }
        }
        w.hide();
    });

    info!("board window opened");
    app.run()
        .map_err(|err| anyhow::anyhow!("fltk event loop failed: {err}"))?;
    Ok(())
}

// 窗口坐标转换为棋盘坐标
fn square_at(x: i32, y: i32) -> Option<Position> {
    if x < 0 || y < 0 {
        return None;
    }
    let pos = Position::new(x / SQUARE_SIZE, y / SQUARE_SIZE);
    if pos.x < BOARD_SIZE && pos.y < BOARD_SIZE {
        Some(pos)
    } else {
        None
    }
}

fn title(controller: &Controller) -> String {
    match controller.winner() {
        Some(winner) => format!("Draughts: {winner} wins"),
        None => format!("Draughts: {}'s turn", controller.state().turn),
    }
}

fn piece_label(piece: Piece) -> &'static str {
    match piece {
        Piece::Empty => "",
        Piece::Red | Piece::White => "●",
        Piece::RedKing | Piece::WhiteKing => "♛",
    }
}

fn redrawn(squares: &mut [Frame], controller: &Controller, palette: &Palette) {
    let board = &controller.state().board;
    let selected = controller.selected();
    let highlighted = controller.highlighted();
    for (index, square) in squares.iter_mut().enumerate() {
        let pos = Position::new(index as i32 % BOARD_SIZE, index as i32 / BOARD_SIZE);
        let piece = board.piece_at(pos);
        let background = if selected == Some(pos) {
            palette.selected
        } else if highlighted.contains(&pos) {
            palette.highlight
        } else if pos.is_dark() {
            palette.dark
        } else {
            palette.light
        };
        square.set_color(background);
        square.set_label(piece_label(piece));
        square.set_label_color(match piece.side() {
            Some(Side::Red) => palette.red,
            _ => palette.white,
        });
        square.redraw();
    }
}

fn report(event: &ClickEvent) {
    match event {
        ClickEvent::Ignored => {}
        ClickEvent::Selected { from, targets } => debug!(%from, ?targets, "piece selected"),
        ClickEvent::Cancelled { from, clicked } => debug!(%from, %clicked, "selection cancelled"),
        ClickEvent::Moved(outcome) => debug!(from = %outcome.from, to = %outcome.to, "moved"),
        ClickEvent::ChainForfeited { side } => info!(%side, "capture chain abandoned"),
        ClickEvent::GameOver { winner, last } => {
            info!(%winner, from = %last.from, to = %last.to, "game over")
        }
    }
}

fn export(path: &Path, board: &Board) -> anyhow::Result<()> {
    fs::write(path, layout::export_layout(board))
        .with_context(|| format!("failed to export layout to {}", path.display()))?;
    info!(path = %path.display(), "layout exported");
    Ok(())
}
