// src/components/slot.rs

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::components::category::Category;
use crate::ecs::component::Component;

/// スロットの識別子。画面側の `data-slot-id` と同じ文字列。
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlotId(pub String);

impl SlotId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SlotId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// カードを置く場所（ドロップゾーン）を表すコンポーネント📥
///
/// 中に入っているカードはここには持たない。カード側の `Location` が唯一の情報源で、
/// 「1 スロットに 1 枚まで」は配置システムが守るよ。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub id: SlotId,
    pub accepts: Category,
}

impl Slot {
    pub fn new(id: SlotId, accepts: Category) -> Self {
        Self { id, accepts }
    }
}

impl Component for Slot {}
