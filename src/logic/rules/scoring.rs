//! 配置・取り外しのたびに、そのカードのスコアがどう動くかを決めるよ。

use serde::{Deserialize, Serialize};

use crate::components::{Card, SlotId};

/// 一枚のカードについて起きたスコア変化。一回の評価でどれか一つだけ起きる。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreChange {
    /// 正解スロットに入った: 正解フラグを立てて +1
    Matched,
    /// 正解スロットから出た: 正解フラグを下ろして -1
    Unmatched,
    Unchanged,
}

impl ScoreChange {
    pub fn delta(self) -> i32 {
        match self {
            ScoreChange::Matched => 1,
            ScoreChange::Unmatched => -1,
            ScoreChange::Unchanged => 0,
        }
    }
}

/// `card` を `target` スロットに置いたときの評価。
pub fn evaluate_placement(card: &Card, target: &SlotId) -> ScoreChange {
    match (card.is_matched, card.is_correct_slot(target)) {
        (false, true) => ScoreChange::Matched,
        (true, false) => ScoreChange::Unmatched,
        _ => ScoreChange::Unchanged,
    }
}

/// `card` がスロットから外れてプールへ戻るとき（自分で戻した・追い出された）の評価。
pub fn evaluate_removal(card: &Card) -> ScoreChange {
    if card.is_matched {
        ScoreChange::Unmatched
    } else {
        ScoreChange::Unchanged
    }
}
