// src/app/controller.rs
//! Interaction Controller: ドラッグ操作を盤面への配置リクエストに変換するよ。

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use log::{debug, info, warn};
use rand::Rng;

use crate::app::effects::VisualEffect;
use crate::board::{Board, PlacementReport, PlacementResult};
use crate::components::{CardId, SlotId};
use crate::error::{GameError, GameResult};
use crate::logic::deck::DeckSpec;
use crate::systems::CardMove;

/// 盤面への共有ハンドル。Wasm はシングルスレッドなので `Rc<RefCell<>>` で十分。
pub type BoardHandle = Rc<RefCell<Board>>;

/// 一回のドラッグ（begin → end）の間だけ生きている一時データ。
#[derive(Debug, Clone, PartialEq, Eq)]
struct DragSession {
    card: CardId,
    hovered: Option<SlotId>,
    dropped: bool,
}

/// ドラッグ＆ドロップのコントローラー🖱️
///
/// ゲームの正式な状態は持たない（それは `Board` の仕事）。持っているのは
/// 「今どのカードを持ち上げているか」と、画面に流す `VisualEffect` のキューだけ。
pub struct DragController {
    board: BoardHandle,
    session: Option<DragSession>,
    effects: VecDeque<VisualEffect>,
    victory_announced: bool,
}

impl DragController {
    pub fn new(board: BoardHandle) -> Self {
        let victory_announced = board.borrow().snapshot().is_won();
        Self {
            board,
            session: None,
            effects: VecDeque::new(),
            victory_announced,
        }
    }

    pub fn board(&self) -> BoardHandle {
        Rc::clone(&self.board)
    }

    pub fn active_card(&self) -> Option<&CardId> {
        self.session.as_ref().map(|session| &session.card)
    }

    pub fn hovered_slot(&self) -> Option<&SlotId> {
        self.session.as_ref().and_then(|session| session.hovered.as_ref())
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    /// 新しいゲームを配り直す。ドラッグ中のものは捨てる。
    pub fn new_game<R: Rng + ?Sized>(&mut self, deck: &DeckSpec, rng: &mut R) -> GameResult<()> {
        self.board.borrow_mut().initialize(deck, rng)?;
        self.session = None;
        self.victory_announced = false;
        self.effects.clear();
        let pool = self.board.borrow().snapshot().pool;
        self.effects.push_back(VisualEffect::BoardReset { pool });
        info!("DragController: new game started");
        Ok(())
    }

    /// カードを持ち上げる。すでに何か持っていたら `InvalidDragSource`。
    pub fn begin_drag(&mut self, card: &CardId) -> GameResult<()> {
        if let Some(session) = &self.session {
            warn!(
                "DragController: begin_drag({}) while {} is still lifted",
                card, session.card
            );
            return Err(GameError::InvalidDragSource);
        }
        if !self.board.borrow().contains_card(card) {
            return Err(GameError::UnknownCard(card.clone()));
        }

        debug!("DragController: lifted {}", card);
        self.session = Some(DragSession {
            card: card.clone(),
            hovered: None,
            dropped: false,
        });
        self.effects.push_back(VisualEffect::DragActive {
            card: card.clone(),
            active: true,
        });
        self.effects.push_back(VisualEffect::SlotsReceptive { active: true });
        Ok(())
    }

    /// スロットに入った。置けるカードならホバー表示して `true`。
    ///
    /// 判定は毎回その場でやり直す（前のドラッグの結果は使わない）。ドラッグしてなければ何もしない。
    pub fn enter_slot(&mut self, slot: &SlotId) -> GameResult<bool> {
        let Some(session) = self.session.as_mut() else {
            return Ok(false);
        };
        let compatible = self.board.borrow().can_accept(&session.card, slot)?;
        if !compatible {
            return Ok(false);
        }
        if session.hovered.as_ref() == Some(slot) {
            return Ok(true);
        }
        if let Some(previous) = session.hovered.replace(slot.clone()) {
            self.effects.push_back(VisualEffect::SlotHover {
                slot: previous,
                hovered: false,
            });
        }
        self.effects.push_back(VisualEffect::SlotHover {
            slot: slot.clone(),
            hovered: true,
        });
        Ok(true)
    }

    /// スロットから出た。
    ///
    /// `related_slot` はポインタの移動先の要素を含むスロット（画面側で `closest` して解決したもの）。
    /// それが同じスロットなら、子要素に入っただけなので無視する。ホバーを消したら `true`。
    pub fn leave_slot(&mut self, slot: &SlotId, related_slot: Option<&SlotId>) -> bool {
        if related_slot == Some(slot) {
            return false;
        }
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        if session.hovered.as_ref() != Some(slot) {
            return false;
        }
        session.hovered = None;
        self.effects.push_back(VisualEffect::SlotHover {
            slot: slot.clone(),
            hovered: false,
        });
        true
    }

    /// 持ち上げているカードをスロットにドロップする。
    pub fn drop_on_slot(&mut self, slot: &SlotId) -> GameResult<PlacementResult> {
        let card = self.droppable_card()?;
        let result = self.board.borrow_mut().attempt_place(&card, slot)?;
        self.finish_drop(result)
    }

    /// 持ち上げているカードをプール（未配置の山）にドロップする。
    pub fn drop_on_pool(&mut self) -> GameResult<PlacementResult> {
        let card = self.droppable_card()?;
        let result = self.board.borrow_mut().return_to_pool(&card)?;
        self.finish_drop(result)
    }

    /// ドラッグ終了。ドロップしたかどうかに関係なく、全部の印を消す。
    pub fn end_drag(&mut self) {
        let session = self.session.take();
        if let Some(slot) = session.as_ref().and_then(|s| s.hovered.clone()) {
            self.effects.push_back(VisualEffect::SlotHover {
                slot,
                hovered: false,
            });
        }
        self.effects.push_back(VisualEffect::SlotsReceptive { active: false });
        if let Some(session) = session {
            debug!("DragController: released {} (dropped: {})", session.card, session.dropped);
            self.effects.push_back(VisualEffect::DragActive {
                card: session.card,
                active: false,
            });
        }
    }

    /// 溜まった見た目の変化を全部取り出す。
    pub fn drain_effects(&mut self) -> Vec<VisualEffect> {
        self.effects.drain(..).collect()
    }

    fn droppable_card(&self) -> GameResult<CardId> {
        match &self.session {
            Some(session) if !session.dropped => Ok(session.card.clone()),
            _ => Err(GameError::InvalidDragSource),
        }
    }

    fn finish_drop(&mut self, result: PlacementResult) -> GameResult<PlacementResult> {
        if let Some(session) = self.session.as_mut() {
            session.dropped = true;
        }
        if let PlacementResult::Placed(report) = &result {
            self.push_report_effects(report);
        }
        Ok(result)
    }

    fn push_report_effects(&mut self, report: &PlacementReport) {
        if let Some(evicted) = &report.evicted {
            self.push_move_effects(evicted);
        }
        self.push_move_effects(&report.placed);

        if report.snapshot.is_won() && !self.victory_announced {
            self.victory_announced = true;
            let blink_interval_ms = self.board.borrow().config().blink_interval_ms;
            info!("DragController: victory! score {}", report.snapshot.score);
            self.effects.push_back(VisualEffect::VictoryStarted { blink_interval_ms });
        }
    }

    fn push_move_effects(&mut self, card_move: &CardMove) {
        self.effects.push_back(VisualEffect::CardMoved {
            card: card_move.card.clone(),
            to: card_move.to.clone(),
        });
        if let Some(matched) = card_move.matched_flag {
            self.effects.push_back(VisualEffect::CardMatched {
                card: card_move.card.clone(),
                matched,
            });
        }
    }
}
