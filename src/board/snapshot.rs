// src/board/snapshot.rs

use serde::{Deserialize, Serialize};

use crate::components::{CardId, GameStatus, SlotId};

/// スロット一つ分の見え方。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotView {
    pub slot: SlotId,
    pub card: Option<CardId>,
}

/// 盤面の読み取り専用ビュー📸
///
/// スロットはデッキで定義された順、プールは並び順。JSON にしてそのまま画面側へ渡せる。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub slots: Vec<SlotView>,
    pub pool: Vec<CardId>,
    /// 今まさに正解スロットにいるカード（ID 順）。勝利でスコアが凍結されていても置き場所に追従する
    pub matched: Vec<CardId>,
    pub score: u32,
    pub matchable: u32,
    pub outcome: GameStatus,
}

impl BoardSnapshot {
    pub fn card_in(&self, slot: &SlotId) -> Option<&CardId> {
        self.slots
            .iter()
            .find(|view| view.slot == *slot)
            .and_then(|view| view.card.as_ref())
    }

    pub fn is_won(&self) -> bool {
        self.outcome == GameStatus::Won
    }

    /// プールとスロットにいるカードを全部並べる（重複チェック用）。
    pub fn all_cards(&self) -> Vec<&CardId> {
        self.pool
            .iter()
            .chain(self.slots.iter().filter_map(|view| view.card.as_ref()))
            .collect()
    }
}
