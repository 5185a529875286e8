// src/config/mod.rs
//! ゲーム設定と、画面側で使う名前（クラス名・data 属性）の定数。

pub mod classes;
pub mod game;

pub use game::GameConfig;
