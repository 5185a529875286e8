// src/logic/deck.rs

use std::collections::{HashMap, HashSet};

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::components::{CardId, Category, SlotId};
use crate::config::GameConfig;
use crate::error::DeckError;
use crate::logic::rules::category_accepted;

/// デッキに入る一枚のカードの定義。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardSpec {
    pub id: CardId,
    pub category: Category,
    #[serde(default)]
    pub correct_slot: Option<SlotId>,
}

/// スロットの定義。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotSpec {
    pub id: SlotId,
    pub accepts: Category,
}

/// ゲーム開始時に渡されるデッキ全体（カードとスロット）だよ🃏
///
/// スロットの並び順がそのままスナップショットの並び順になる。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckSpec {
    pub cards: Vec<CardSpec>,
    pub slots: Vec<SlotSpec>,
}

impl CardSpec {
    pub fn new(id: &str, category: &str, correct_slot: Option<&str>) -> Self {
        Self {
            id: CardId::new(id),
            category: Category::new(category),
            correct_slot: correct_slot.map(SlotId::new),
        }
    }
}

impl SlotSpec {
    pub fn new(id: &str, accepts: &str) -> Self {
        Self {
            id: SlotId::new(id),
            accepts: Category::new(accepts),
        }
    }
}

impl DeckSpec {
    pub fn from_json(json: &str) -> Result<Self, DeckError> {
        serde_json::from_str(json).map_err(|e| DeckError::Json(e.to_string()))
    }

    /// 正解スロットを持つカードの枚数（＝勝利ライン）。
    pub fn matchable_count(&self) -> usize {
        self.cards.iter().filter(|c| c.correct_slot.is_some()).count()
    }

    /// カエルとチョウの成長段階を並べる標準デッキ🐸🦋
    ///
    /// それぞれ4段階 + どこにでも置ける "general" のカードとスロットが一つずつ。
    pub fn metamorphosis() -> Self {
        let frog = ["egg", "tadpole", "froglet", "frog"];
        let butterfly = ["egg", "caterpillar", "chrysalis", "butterfly"];

        let mut cards = Vec::new();
        let mut slots = Vec::new();
        for (i, stage) in frog.iter().enumerate() {
            let slot = format!("F{}", i + 1);
            slots.push(SlotSpec::new(&slot, "frog"));
            cards.push(CardSpec::new(&format!("frog-{}", stage), "frog", Some(&slot)));
        }
        for (i, stage) in butterfly.iter().enumerate() {
            let slot = format!("BF{}", i + 1);
            slots.push(SlotSpec::new(&slot, "butterfly"));
            cards.push(CardSpec::new(&format!("butterfly-{}", stage), "butterfly", Some(&slot)));
        }
        slots.push(SlotSpec::new("G1", "general"));
        cards.push(CardSpec::new("pond", "general", Some("G1")));

        Self { cards, slots }
    }
}

/// デッキが遊べる形になっているかチェックするよ✅
///
/// 勝利ラインに届かないデッキ（正解スロットが無い・二枚で取り合う・カテゴリ的に置けない）は弾く。
pub fn validate_deck(deck: &DeckSpec, config: &GameConfig) -> Result<(), DeckError> {
    if let Some(dup) = deck.cards.iter().map(|c| &c.id).duplicates().next() {
        return Err(DeckError::DuplicateCard(dup.clone()));
    }
    if let Some(dup) = deck.slots.iter().map(|s| &s.id).duplicates().next() {
        return Err(DeckError::DuplicateSlot(dup.clone()));
    }

    let slots: HashMap<&SlotId, &SlotSpec> = deck.slots.iter().map(|s| (&s.id, s)).collect();
    let mut claimed: HashMap<&SlotId, &CardId> = HashMap::new();

    for card in &deck.cards {
        let Some(correct) = card.correct_slot.as_ref() else {
            continue;
        };
        let slot = slots.get(correct).ok_or_else(|| DeckError::UnknownCorrectSlot {
            card: card.id.clone(),
            slot: correct.clone(),
        })?;
        if !category_accepted(&card.category, &slot.accepts, config) {
            return Err(DeckError::UnreachableCorrectSlot {
                card: card.id.clone(),
                category: card.category.clone(),
                slot: correct.clone(),
            });
        }
        if let Some(first) = claimed.insert(correct, &card.id) {
            return Err(DeckError::SharedCorrectSlot {
                slot: correct.clone(),
                first: first.clone(),
                second: card.id.clone(),
            });
        }
    }
    Ok(())
}

/// デッキ内のカテゴリ一覧（重複なし）。デバッグ表示用。
pub fn categories(deck: &DeckSpec) -> HashSet<&Category> {
    deck.cards
        .iter()
        .map(|c| &c.category)
        .chain(deck.slots.iter().map(|s| &s.accepts))
        .collect()
}
