// src/app/mod.rs
//! ジェスチャー → 配置リクエストへの変換と、画面への見た目フィードバックを担当するモジュールだよ！

pub mod controller;
pub mod dom_binding;
pub mod effects;
pub mod game_app;

pub use controller::{BoardHandle, DragController};
pub use effects::VisualEffect;
pub use game_app::GameApp;
