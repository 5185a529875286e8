// src/app/game_app.rs

use std::cell::RefCell;
use std::rc::Rc;

use log::{error, info};
use wasm_bindgen::prelude::*;

use crate::app::controller::{BoardHandle, DragController};
use crate::app::dom_binding::{self, DomBinding};
use crate::board::Board;
use crate::components::{CardId, GameStatus, SlotId};
use crate::config::GameConfig;
use crate::error::GameError;
use crate::logic::deck::DeckSpec;

fn to_js(err: GameError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

// --- ゲーム全体のアプリケーション状態を管理する構造体 ---
/// JavaScript から使う入口だよ！
///
/// 中身はコントローラーへの共有ハンドルだけ。DOM に直接つなぐ場合は `bind_document` を呼ぶ。
/// 自前でイベントを拾う場合は `begin_drag` などを呼んで、`drain_effects_json` で見た目の変化を受け取る。
#[wasm_bindgen]
pub struct GameApp {
    controller: Rc<RefCell<DragController>>,
    // DOM リスナーのクロージャを持っておく（drop されると JS 側から呼べなくなる）
    binding: Option<DomBinding>,
}

#[wasm_bindgen]
impl GameApp {
    /// デッキ JSON と設定 JSON（どちらも省略可）からゲームを作って、カードを配るよ。
    #[wasm_bindgen(constructor)]
    pub fn new(deck_json: Option<String>, config_json: Option<String>) -> Result<GameApp, JsValue> {
        let config = match config_json {
            Some(json) => GameConfig::from_json(&json).map_err(to_js)?,
            None => GameConfig::default(),
        };
        let deck = match deck_json {
            Some(json) => DeckSpec::from_json(&json).map_err(|e| to_js(e.into()))?,
            None => DeckSpec::metamorphosis(),
        };

        let board = Rc::new(RefCell::new(Board::new(config)));
        let mut controller = DragController::new(board);
        controller
            .new_game(&deck, &mut rand::thread_rng())
            .map_err(to_js)?;
        info!("GameApp: initialized with {} cards", deck.cards.len());

        Ok(Self {
            controller: Rc::new(RefCell::new(controller)),
            binding: None,
        })
    }

    /// ページ上の `[data-card-id]` / `[data-slot-id]` 要素にリスナーを付けて、プールを並べ直す。
    #[wasm_bindgen]
    pub fn bind_document(&mut self) -> Result<(), JsValue> {
        if self.binding.is_some() {
            return Ok(());
        }
        let binding = dom_binding::bind_document(Rc::clone(&self.controller))?;
        self.binding = Some(binding);
        Ok(())
    }

    #[wasm_bindgen]
    pub fn new_game(&self, deck_json: Option<String>) -> Result<(), JsValue> {
        let deck = match deck_json {
            Some(json) => DeckSpec::from_json(&json).map_err(|e| to_js(e.into()))?,
            None => DeckSpec::metamorphosis(),
        };
        self.controller
            .borrow_mut()
            .new_game(&deck, &mut rand::thread_rng())
            .map_err(to_js)?;
        if let Some(binding) = &self.binding {
            binding.flush(&self.controller);
        }
        Ok(())
    }

    #[wasm_bindgen]
    pub fn begin_drag(&self, card_id: &str) -> Result<(), JsValue> {
        self.controller
            .borrow_mut()
            .begin_drag(&CardId::new(card_id))
            .map_err(to_js)
    }

    #[wasm_bindgen]
    pub fn enter_slot(&self, slot_id: &str) -> Result<bool, JsValue> {
        self.controller
            .borrow_mut()
            .enter_slot(&SlotId::new(slot_id))
            .map_err(to_js)
    }

    /// `related_slot_id` はポインタの移動先を含むスロットの ID（無ければ undefined）。
    #[wasm_bindgen]
    pub fn leave_slot(&self, slot_id: &str, related_slot_id: Option<String>) -> bool {
        let related = related_slot_id.map(SlotId::new);
        self.controller
            .borrow_mut()
            .leave_slot(&SlotId::new(slot_id), related.as_ref())
    }

    /// カードが動いたら `true`。
    #[wasm_bindgen]
    pub fn drop_on_slot(&self, slot_id: &str) -> Result<bool, JsValue> {
        self.controller
            .borrow_mut()
            .drop_on_slot(&SlotId::new(slot_id))
            .map(|result| result.is_placed())
            .map_err(to_js)
    }

    #[wasm_bindgen]
    pub fn drop_on_pool(&self) -> Result<bool, JsValue> {
        self.controller
            .borrow_mut()
            .drop_on_pool()
            .map(|result| result.is_placed())
            .map_err(to_js)
    }

    #[wasm_bindgen]
    pub fn end_drag(&self) {
        self.controller.borrow_mut().end_drag();
    }

    /// 盤面のスナップショットを JSON 文字列で返すよ📸
    #[wasm_bindgen]
    pub fn snapshot_json(&self) -> Result<String, JsValue> {
        let board = self.board();
        let snapshot = board.borrow().snapshot();
        serde_json::to_string(&snapshot).map_err(|e| {
            error!("GameApp: failed to serialize snapshot: {}", e);
            JsValue::from_str(&e.to_string())
        })
    }

    /// 溜まっている `VisualEffect` を JSON 配列で取り出す。
    #[wasm_bindgen]
    pub fn drain_effects_json(&self) -> Result<String, JsValue> {
        let effects = self.controller.borrow_mut().drain_effects();
        serde_json::to_string(&effects).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    #[wasm_bindgen]
    pub fn score(&self) -> u32 {
        let board = self.board();
        let score = board.borrow().score();
        score
    }

    #[wasm_bindgen]
    pub fn is_won(&self) -> bool {
        let board = self.board();
        let won = board.borrow().outcome() == GameStatus::Won;
        won
    }
}

impl GameApp {
    fn board(&self) -> BoardHandle {
        self.controller.borrow().board()
    }
}
