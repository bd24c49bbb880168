use std::fs;

use anyhow::Context;
use clap::Parser;
use engine::{board::Board, engine::Controller, layout, rules::GameState};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod ui;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = config::Args::parse().validate()?;

    // 布局文件有问题时直接退出，不用残缺的棋盘开局
    let board = match &config.layout {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read layout {}", path.display()))?;
            layout::parse_layout(&text)
                .with_context(|| format!("invalid layout {}", path.display()))?
        }
        None => Board::init(),
    };
    info!(first = %config.first, pieces = board.total_pieces(), "starting game");

    let game = Controller::new(GameState::new(board, config.first));
    ui::ui(game, &config)?;
    Ok(())
}
