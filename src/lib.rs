// src/lib.rs

// WASM と JavaScript を繋ぐための基本！
use wasm_bindgen::prelude::*;

pub mod app;
pub mod board;
pub mod components;
pub mod config;
pub mod ecs;
pub mod error;
pub mod logger;
pub mod logic;
pub mod systems;

pub use app::{DragController, GameApp, VisualEffect};
pub use board::{Board, BoardSnapshot, PlacementReport, PlacementResult, RejectReason, SlotView};
pub use components::{CardId, Category, GameStatus, Location, SlotId};
pub use config::GameConfig;
pub use error::{DeckError, GameError, GameResult};
pub use logic::deck::{CardSpec, DeckSpec, SlotSpec};
pub use logic::rules::ScoreChange;

// Wasm がロードされた時に最初に実行される関数だよ。
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    logger::init(log::LevelFilter::Debug);
    log::info!("metamorphosis_match loaded");
}
