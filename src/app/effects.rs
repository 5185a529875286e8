// src/app/effects.rs

use serde::{Deserialize, Serialize};

use crate::components::{CardId, Location, SlotId};

/// 画面側に反映してほしい見た目の変化だよ🎨
///
/// コントローラーが溜めておいて、画面側（`dom_binding` や JS）がまとめて取り出して適用する。
/// どれもクラスの付け外しやカード要素の移動に一対一で対応する。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum VisualEffect {
    /// 持ち上げ中のカードの印（`dragged`）
    DragActive { card: CardId, active: bool },
    /// 全スロットの「受け入れ待ち」表示（`active-zone`）
    SlotsReceptive { active: bool },
    /// ホバー中のスロット（`over-zone`）
    SlotHover { slot: SlotId, hovered: bool },
    /// カード要素をスロットかプールへ移す
    CardMoved { card: CardId, to: Location },
    /// 正解フラグの表示（`matched`）
    CardMatched { card: CardId, matched: bool },
    /// 新しいゲーム。プールをこの順に並べ直して、全部の印を消す。勝利の点滅もここで止める
    BoardReset { pool: Vec<CardId> },
    /// 勝利！点滅を開始する。一ゲームにつき一回、次の `BoardReset` まで続く
    VictoryStarted { blink_interval_ms: i32 },
}
