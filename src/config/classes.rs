//! DOM 側で使うクラス名や属性名を定義するよ！
//! スタイルシート側と揃える必要があるので、文字列は全部ここに集める。

/// ドラッグできるカード要素を見つけるための属性。値が `CardId`。
pub const CARD_ID_ATTR: &str = "data-card-id";
/// ドロップゾーン（スロット）要素の属性。値が `SlotId`。
pub const SLOT_ID_ATTR: &str = "data-slot-id";

pub const CARD_SELECTOR: &str = "[data-card-id]";
pub const SLOT_SELECTOR: &str = "[data-slot-id]";
/// 未配置カードを並べるコンテナ。
pub const POOL_SELECTOR: &str = ".mixed-cards";
/// 勝利時に点滅させる要素。
pub const VICTORY_SELECTOR: &str = ".victory";

pub const ACTIVE_ZONE_CLASS: &str = "active-zone";
pub const OVER_ZONE_CLASS: &str = "over-zone";
pub const DRAGGED_CLASS: &str = "dragged";
pub const MATCHED_CLASS: &str = "matched";
pub const BLINK_CLASS: &str = "blink";

/// ドラッグ中のデータ転送に載せる独自 MIME タイプ。
pub const DRAG_DATA_TYPE: &str = "type/dragged-card";
