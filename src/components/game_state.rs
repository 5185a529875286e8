// src/components/game_state.rs

use serde::{Deserialize, Serialize};

use crate::ecs::component::Component;

/// ゲーム全体の進行状態だよ！🏁
///
/// `InProgress -> Won` の一方通行。負け状態はない（時間も手数も無制限）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    InProgress,
    /// 勝利！🏆 一度なったら戻らない。
    Won,
}

/// スコアと進行状態を持つコンポーネント。
///
/// World の中でゲーム全体に一つだけある特別なエンティティに付けるよ（シングルトン的な使い方）。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub status: GameStatus,
    pub score: u32,
    /// 勝利ライン。正解スロットを持つカードの枚数。
    pub matchable: u32,
    /// true の間はスコアも正解フラグも動かない（勝利後に立つ）。
    pub scoring_frozen: bool,
}

impl GameState {
    pub fn new(matchable: u32) -> Self {
        Self {
            status: GameStatus::InProgress,
            score: 0,
            matchable,
            scoring_frozen: false,
        }
    }

    pub fn is_won(&self) -> bool {
        self.status == GameStatus::Won
    }
}

impl Component for GameState {}
