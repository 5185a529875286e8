// src/systems/mod.rs
//! World を書き換えるシステムたち。`Board` からしか呼ばれないよ。

pub mod deal_system;
pub mod placement_system;
pub mod win_condition_system;

pub use deal_system::{DealSystem, DealtBoard};
pub use placement_system::{CardMove, PlacementSystem, RejectReason};
pub use win_condition_system::WinConditionSystem;
