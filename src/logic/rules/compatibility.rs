//! カードがスロットに置けるか（カテゴリが合うか）の判定。

use crate::components::{Card, Category, Slot};
use crate::config::GameConfig;

/// カテゴリ同士の判定。スロット側がワイルドカードなら何でも OK。
pub fn category_accepted(card_category: &Category, slot_accepts: &Category, config: &GameConfig) -> bool {
    slot_accepts == card_category || config.is_wildcard(slot_accepts)
}

/// このカードをこのスロットに置けるか。盤面は一切変更しない。
pub fn can_place(card: &Card, slot: &Slot, config: &GameConfig) -> bool {
    category_accepted(&card.category, &slot.accepts, config)
}
