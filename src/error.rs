// src/error.rs
//! ゲーム内で起きるエラーの種類をまとめたモジュールだよ。
//!
//! どれもローカルで回復可能なもので、致命的なものは無い。
//! カテゴリ違いのドロップはエラーじゃなくて `PlacementResult::Rejected` で返すよ。

use thiserror::Error;

use crate::components::{CardId, Category, SlotId};

/// デッキ定義の検証エラー。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeckError {
    #[error("card id `{0}` appears more than once")]
    DuplicateCard(CardId),
    #[error("slot id `{0}` appears more than once")]
    DuplicateSlot(SlotId),
    #[error("card `{card}` points at unknown correct slot `{slot}`")]
    UnknownCorrectSlot { card: CardId, slot: SlotId },
    #[error("slot `{slot}` is the correct slot of both `{first}` and `{second}`")]
    SharedCorrectSlot {
        slot: SlotId,
        first: CardId,
        second: CardId,
    },
    #[error("card `{card}` ({category}) is not accepted by its own correct slot `{slot}`")]
    UnreachableCorrectSlot {
        card: CardId,
        category: Category,
        slot: SlotId,
    },
    #[error("deck description is not valid JSON: {0}")]
    Json(String),
}

/// 盤面操作・ドラッグ操作のエラー。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// ドラッグ対象が無い・すでにドラッグ中・同じドラッグで二回ドロップ、など。
    #[error("no valid drag subject for this gesture")]
    InvalidDragSource,
    #[error("unknown card `{0}`")]
    UnknownCard(CardId),
    #[error("unknown slot `{0}`")]
    UnknownSlot(SlotId),
    #[error("invalid deck: {0}")]
    InvalidDeck(#[from] DeckError),
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

pub type GameResult<T> = Result<T, GameError>;
