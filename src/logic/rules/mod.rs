// src/logic/rules/mod.rs
//! カード配置のルール関連モジュールをまとめるよ！

pub mod compatibility;
pub mod scoring;
pub mod win_condition;

#[cfg(test)]
mod tests;

pub use compatibility::*;
pub use scoring::*;
pub use win_condition::*;
