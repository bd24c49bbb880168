use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use engine::board::Side;
use fltk::enums::Color;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Graphics version {0} does not exist, expected 1 or 2")]
    UnsupportedGraphics(u8),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum FirstSide {
    Red,
    White,
}

impl From<FirstSide> for Side {
    fn from(value: FirstSide) -> Self {
        match value {
            FirstSide::Red => Side::Red,
            FirstSide::White => Side::White,
        }
    }
}

/// Two-player draughts on an 8x8 board
#[derive(Parser, Debug)]
#[command(name = "draughts", version)]
pub struct Args {
    /// Graphics version id (1 or 2)
    #[arg(long, value_name = "VERSION_ID", default_value_t = 1)]
    pub graphics: u8,

    /// Start from the layout stored in this file
    #[arg(long, value_name = "LAYOUT")]
    pub layout: Option<PathBuf>,

    /// Export the layout when the window is closed
    #[arg(short, long)]
    pub export: bool,

    /// Where the exported layout is written
    #[arg(long, value_name = "FILE", default_value = "export.csv")]
    pub export_path: PathBuf,

    /// Side that moves first
    #[arg(long, value_enum, default_value_t = FirstSide::White)]
    pub first: FirstSide,
}

// 棋盘配色，对应不同的图形版本
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Palette {
    pub dark: Color,
    pub light: Color,
    pub selected: Color,
    pub highlight: Color,
    pub red: Color,
    pub white: Color,
}

impl Palette {
    fn for_version(version: u8) -> Result<Palette, ConfigError> {
        match version {
            1 => Ok(Palette {
                dark: Color::from_rgb(139, 90, 43),
                light: Color::from_rgb(240, 217, 181),
                selected: Color::from_rgb(186, 202, 68),
                highlight: Color::from_rgb(246, 246, 105),
                red: Color::from_rgb(200, 30, 30),
                white: Color::from_rgb(250, 250, 250),
            }),
            2 => Ok(Palette {
                dark: Color::from_rgb(60, 60, 60),
                light: Color::from_rgb(200, 200, 200),
                selected: Color::from_rgb(70, 130, 180),
                highlight: Color::from_rgb(100, 180, 255),
                red: Color::from_rgb(230, 60, 60),
                white: Color::from_rgb(240, 240, 240),
            }),
            other => Err(ConfigError::UnsupportedGraphics(other)),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub palette: Palette,
    pub layout: Option<PathBuf>,
    pub export: Option<PathBuf>,
    pub first: Side,
}

impl Args {
    // 在创建引擎之前检查所有参数
    pub fn validate(self) -> Result<Config, ConfigError> {
        let palette = Palette::for_version(self.graphics)?;
        Ok(Config {
            palette,
            layout: self.layout,
            export: self.export.then_some(self.export_path),
            first: self.first.into(),
        })
    }
}
