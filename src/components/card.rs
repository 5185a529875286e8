// src/components/card.rs

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::components::category::Category;
use crate::components::slot::SlotId;
use crate::ecs::component::Component;

/// カードの識別子。画面側の要素 ID (`data-card-id`) と同じ文字列を使うよ。
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(pub String);

impl CardId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CardId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// カードそのものを表すコンポーネントだよ！🃏
///
/// - `category`: どのスロットに置けるかを決めるタグ
/// - `correct_slot`: 正解のスロット。`None` のカードはどこに置いてもスコアに関係しない
/// - `is_matched`: 今まさに正解スロットに収まってスコアに数えられているか
///
/// 「正解済みかどうか」は画面のクラス名じゃなくて、このフラグだけで判断するよ。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub category: Category,
    pub correct_slot: Option<SlotId>,
    pub is_matched: bool,
}

impl Card {
    pub fn new(id: CardId, category: Category, correct_slot: Option<SlotId>) -> Self {
        Self {
            id,
            category,
            correct_slot,
            is_matched: false,
        }
    }

    /// スコア対象のカードか（正解スロットが決まっているか）。
    pub fn is_matchable(&self) -> bool {
        self.correct_slot.is_some()
    }

    pub fn is_correct_slot(&self, slot: &SlotId) -> bool {
        self.correct_slot.as_ref() == Some(slot)
    }
}

impl Component for Card {}
