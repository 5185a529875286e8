// src/components/location.rs

use serde::{Deserialize, Serialize};

use crate::components::slot::SlotId;
use crate::ecs::component::Component;

/// カードが今どこにいるかを示すコンポーネントだよ📍
///
/// カードは必ずどちらか一か所にいる:
/// - `Pool(order)`: まだ置かれていないカードの山。`order` が小さいほど前（左）に並ぶ
/// - `Slot(id)`: どこかのスロットの中
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Location {
    Pool(u32),
    Slot(SlotId),
}

impl Location {
    pub fn is_in_pool(&self) -> bool {
        matches!(self, Location::Pool(_))
    }

    pub fn slot(&self) -> Option<&SlotId> {
        match self {
            Location::Slot(id) => Some(id),
            Location::Pool(_) => None,
        }
    }
}

impl Component for Location {}
