// src/logic/mod.rs
//! World に触らない純粋なゲームロジック（デッキ定義・シャッフル・ルール判定）。

pub mod deck;
pub mod rules;
pub mod shuffle;
