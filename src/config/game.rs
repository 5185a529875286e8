// src/config/game.rs

use serde::{Deserialize, Serialize};

use crate::components::Category;
use crate::error::GameError;

const DEFAULT_WILDCARD: &str = "general";
const DEFAULT_BLINK_INTERVAL_MS: i32 = 500;

/// ゲーム全体の設定だよ⚙️
///
/// JSON から読めて、書かなかった項目はデフォルト値になる。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// どのスロットにも置ける扱いになるカテゴリ。
    pub wildcard_category: Category,
    /// 勝利後の点滅の間隔（ミリ秒）。
    pub blink_interval_ms: i32,
    /// 勝利後にスコアを凍結するか。
    pub freeze_score_on_win: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            wildcard_category: Category::new(DEFAULT_WILDCARD),
            blink_interval_ms: DEFAULT_BLINK_INTERVAL_MS,
            freeze_score_on_win: true,
        }
    }
}

impl GameConfig {
    pub fn from_json(json: &str) -> Result<Self, GameError> {
        let config: GameConfig =
            serde_json::from_str(json).map_err(|e| GameError::InvalidConfig(e.to_string()))?;
        if config.blink_interval_ms <= 0 {
            return Err(GameError::InvalidConfig(format!(
                "blink_interval_ms must be positive, got {}",
                config.blink_interval_ms
            )));
        }
        Ok(config)
    }

    pub fn is_wildcard(&self, category: &Category) -> bool {
        *category == self.wildcard_category
    }
}
