// src/systems/win_condition_system.rs

use log::info;

use crate::components::{GameState, GameStatus};
use crate::ecs::{System, World};
use crate::logic::rules::check_win_condition;

/// ゲームの勝利条件をチェックするシステムだよ！🏆
///
/// スコアが勝利ラインに届いていたら `Won` にする。`Won` は終端状態で、
/// もう一度条件を満たしても何も起きない。設定によってはここでスコアを凍結するよ。
pub struct WinConditionSystem {
    freeze_score_on_win: bool,
}

impl WinConditionSystem {
    pub fn new(freeze_score_on_win: bool) -> Self {
        Self { freeze_score_on_win }
    }
}

impl System for WinConditionSystem {
    fn run(&mut self, world: &mut World) {
        let freeze = self.freeze_score_on_win;
        for entity in world.get_all_entities_with_component::<GameState>() {
            let Some(state) = world.get_component_mut::<GameState>(entity) else {
                continue;
            };
            if state.status != GameStatus::InProgress {
                continue;
            }
            if check_win_condition(state.score, state.matchable) {
                state.status = GameStatus::Won;
                state.scoring_frozen = freeze;
                info!("WinConditionSystem: all {} cards matched, game won", state.matchable);
            }
        }
    }
}
