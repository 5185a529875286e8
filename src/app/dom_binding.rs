// src/app/dom_binding.rs
//! ページ上の要素に HTML5 ドラッグ＆ドロップのリスナーを付けて、`VisualEffect` をクラスの付け外しに変換するよ🖱️
//!
//! ブラウザ専用。カードとスロットの要素はバインド時に data 属性で一度だけ集めて、
//! ID → 要素の名簿にしておく。エフェクトを適用するときはこの名簿だけを引くよ（ページを探し直さない）。

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use log::{debug, error, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{window, Document, DragEvent, Element, Event};

use crate::app::controller::DragController;
use crate::app::effects::VisualEffect;
use crate::components::{CardId, Location, SlotId};
use crate::config::classes::*;

type Listener = Closure<dyn FnMut(Event)>;
type Controller = Rc<RefCell<DragController>>;

/// ページにバインドしている間、リスナーのクロージャと要素の名簿を持ち続ける。
pub struct DomBinding {
    view: Rc<DomView>,
    _closures: Vec<Listener>,
}

impl DomBinding {
    /// DOM イベントを経由しない操作（`GameApp::new_game` など）のあとで、溜まったエフェクトを画面に反映する。
    pub fn flush(&self, controller: &Controller) {
        flush_effects(controller, &self.view);
    }
}

/// バインド時に集めた要素たちと、勝利の点滅タイマー。
struct DomView {
    cards: HashMap<CardId, Element>,
    slots: HashMap<SlotId, Element>,
    pool: Option<Element>,
    victory: Option<Element>,
    blink: RefCell<Option<Blink>>,
}

/// 動いている点滅タイマー。drop されたら interval も止める（クロージャが先に消えないように）。
struct Blink {
    handle: i32,
    _tick: Closure<dyn FnMut()>,
}

impl Drop for Blink {
    fn drop(&mut self) {
        if let Some(window) = window() {
            window.clear_interval_with_handle(self.handle);
        }
    }
}

/// カード・スロット・プールにリスナーを付けて、溜まっているエフェクト
/// （最初の `BoardReset` でプールがシャッフル順に並ぶ）を適用する。
pub fn bind_document(controller: Controller) -> Result<DomBinding, JsValue> {
    let document = document()?;
    let view = Rc::new(collect_elements(&document)?);
    let mut closures = Vec::new();

    for (card_id, card_el) in &view.cards {
        card_el.set_attribute("draggable", "true")?;
        bind_card(card_el, card_id.clone(), &controller, &view, &mut closures)?;
    }
    for (slot_id, slot_el) in &view.slots {
        bind_slot(slot_el, slot_id.clone(), &controller, &view, &mut closures)?;
    }
    match &view.pool {
        Some(pool_el) => bind_pool(pool_el, &controller, &view, &mut closures)?,
        None => warn!("dom_binding: no pool container matches {}", POOL_SELECTOR),
    }

    flush_effects(&controller, &view);
    debug!("dom_binding: attached {} listeners", closures.len());
    Ok(DomBinding {
        view,
        _closures: closures,
    })
}

fn collect_elements(document: &Document) -> Result<DomView, JsValue> {
    let mut cards = HashMap::new();
    for card_el in query_all(document, CARD_SELECTOR)? {
        if let Some(id) = card_el.get_attribute(CARD_ID_ATTR) {
            if cards.insert(CardId::new(id.clone()), card_el).is_some() {
                warn!("dom_binding: card id {} is used by more than one element", id);
            }
        }
    }
    let mut slots = HashMap::new();
    for slot_el in query_all(document, SLOT_SELECTOR)? {
        if let Some(id) = slot_el.get_attribute(SLOT_ID_ATTR) {
            if slots.insert(SlotId::new(id.clone()), slot_el).is_some() {
                warn!("dom_binding: slot id {} is used by more than one element", id);
            }
        }
    }
    Ok(DomView {
        cards,
        slots,
        pool: document.query_selector(POOL_SELECTOR)?,
        victory: document.query_selector(VICTORY_SELECTOR)?,
        blink: RefCell::new(None),
    })
}

fn bind_card(
    card_el: &Element,
    card_id: CardId,
    controller: &Controller,
    view: &Rc<DomView>,
    closures: &mut Vec<Listener>,
) -> Result<(), JsValue> {
    {
        let controller = Rc::clone(controller);
        let view = Rc::clone(view);
        let card_id = card_id.clone();
        listen(card_el, "dragstart", closures, move |event| {
            if let Some(data) = event
                .dyn_ref::<DragEvent>()
                .and_then(|drag| drag.data_transfer())
            {
                // 独自の型を載せておくと、他の要素のドラッグと区別できる
                for format in [DRAG_DATA_TYPE, "text/plain"] {
                    if let Err(e) = data.set_data(format, card_id.as_str()) {
                        warn!("dom_binding: could not set {} drag data: {:?}", format, e);
                    }
                }
            }
            with_controller(&controller, &view, |c| {
                if let Err(e) = c.begin_drag(&card_id) {
                    warn!("dom_binding: dragstart on {} ignored: {}", card_id, e);
                }
            });
        })?;
    }
    {
        let controller = Rc::clone(controller);
        let view = Rc::clone(view);
        listen(card_el, "dragend", closures, move |_event| {
            with_controller(&controller, &view, |c| c.end_drag());
        })?;
    }
    Ok(())
}

fn bind_slot(
    slot_el: &Element,
    slot_id: SlotId,
    controller: &Controller,
    view: &Rc<DomView>,
    closures: &mut Vec<Listener>,
) -> Result<(), JsValue> {
    {
        let controller = Rc::clone(controller);
        let view = Rc::clone(view);
        let slot_id = slot_id.clone();
        listen(slot_el, "dragenter", closures, move |event| {
            let accepted = with_controller(&controller, &view, |c| match c.enter_slot(&slot_id) {
                Ok(accepted) => accepted,
                Err(e) => {
                    warn!("dom_binding: dragenter on {} ignored: {}", slot_id, e);
                    false
                }
            });
            if accepted == Some(true) {
                // dragenter のデフォルト動作はドロップ禁止なので止める
                event.prevent_default();
            }
        })?;
    }
    {
        let controller = Rc::clone(controller);
        let slot_id = slot_id.clone();
        listen(slot_el, "dragover", closures, move |event| {
            let hovering = controller
                .try_borrow()
                .map(|c| c.hovered_slot() == Some(&slot_id))
                .unwrap_or(false);
            if hovering {
                event.prevent_default();
            }
        })?;
    }
    {
        let controller = Rc::clone(controller);
        let view = Rc::clone(view);
        let slot_id = slot_id.clone();
        listen(slot_el, "dragleave", closures, move |event| {
            let related = related_slot(&event);
            with_controller(&controller, &view, |c| c.leave_slot(&slot_id, related.as_ref()));
        })?;
    }
    {
        let controller = Rc::clone(controller);
        let view = Rc::clone(view);
        listen(slot_el, "drop", closures, move |event| {
            event.prevent_default();
            with_controller(&controller, &view, |c| {
                if let Err(e) = c.drop_on_slot(&slot_id) {
                    warn!("dom_binding: drop on {} ignored: {}", slot_id, e);
                }
            });
        })?;
    }
    Ok(())
}

fn bind_pool(
    pool_el: &Element,
    controller: &Controller,
    view: &Rc<DomView>,
    closures: &mut Vec<Listener>,
) -> Result<(), JsValue> {
    {
        let controller = Rc::clone(controller);
        listen(pool_el, "dragover", closures, move |event| {
            let dragging = controller.try_borrow().map(|c| c.is_dragging()).unwrap_or(false);
            if dragging {
                event.prevent_default();
            }
        })?;
    }
    {
        let controller = Rc::clone(controller);
        let view = Rc::clone(view);
        listen(pool_el, "drop", closures, move |event| {
            event.prevent_default();
            with_controller(&controller, &view, |c| {
                if let Err(e) = c.drop_on_pool() {
                    warn!("dom_binding: drop on pool ignored: {}", e);
                }
            });
        })?;
    }
    Ok(())
}

fn listen(
    target: &Element,
    event_type: &str,
    closures: &mut Vec<Listener>,
    handler: impl FnMut(Event) + 'static,
) -> Result<(), JsValue> {
    let closure: Listener = Closure::new(handler);
    target.add_event_listener_with_callback(event_type, closure.as_ref().unchecked_ref())?;
    closures.push(closure);
    Ok(())
}

/// コントローラーを借りて処理して、そのあと溜まったエフェクトを画面に反映する。
///
/// 借用中に別のイベントが来たら（普通は起きない）ログだけ出して捨てる。
fn with_controller<T>(
    controller: &Controller,
    view: &DomView,
    f: impl FnOnce(&mut DragController) -> T,
) -> Option<T> {
    let result = match controller.try_borrow_mut() {
        Ok(mut c) => f(&mut c),
        Err(e) => {
            error!("dom_binding: controller busy: {}", e);
            return None;
        }
    };
    flush_effects(controller, view);
    Some(result)
}

/// エフェクトを一つずつ適用する。失敗したものはログに出して、残りはそのまま続ける。
fn flush_effects(controller: &Controller, view: &DomView) {
    let effects = match controller.try_borrow_mut() {
        Ok(mut c) => c.drain_effects(),
        Err(_) => return,
    };
    for effect in &effects {
        if let Err(e) = view.apply(effect) {
            error!("dom_binding: failed to apply {:?}: {:?}", effect, e);
        }
    }
}

impl DomView {
    fn card(&self, card: &CardId) -> Option<&Element> {
        let el = self.cards.get(card);
        if el.is_none() {
            debug!("dom_binding: no element for card {}", card);
        }
        el
    }

    fn slot(&self, slot: &SlotId) -> Option<&Element> {
        let el = self.slots.get(slot);
        if el.is_none() {
            debug!("dom_binding: no element for slot {}", slot);
        }
        el
    }

    /// `VisualEffect` 一つをクラスの付け外し・要素の移動に変換する。
    fn apply(&self, effect: &VisualEffect) -> Result<(), JsValue> {
        match effect {
            VisualEffect::DragActive { card, active } => {
                if let Some(el) = self.card(card) {
                    el.class_list().toggle_with_force(DRAGGED_CLASS, *active)?;
                }
            }
            VisualEffect::SlotsReceptive { active } => {
                for el in self.slots.values() {
                    el.class_list().toggle_with_force(ACTIVE_ZONE_CLASS, *active)?;
                    if !active {
                        el.class_list().remove_1(OVER_ZONE_CLASS)?;
                    }
                }
            }
            VisualEffect::SlotHover { slot, hovered } => {
                if let Some(el) = self.slot(slot) {
                    el.class_list().toggle_with_force(OVER_ZONE_CLASS, *hovered)?;
                }
            }
            VisualEffect::CardMoved { card, to } => {
                let target = match to {
                    Location::Slot(slot) => self.slot(slot),
                    Location::Pool(_) => self.pool.as_ref(),
                };
                if let (Some(card_el), Some(target)) = (self.card(card), target) {
                    target.append_child(card_el)?;
                }
            }
            VisualEffect::CardMatched { card, matched } => {
                if let Some(el) = self.card(card) {
                    el.class_list().toggle_with_force(MATCHED_CLASS, *matched)?;
                }
            }
            VisualEffect::BoardReset { pool } => {
                self.stop_blinking()?;
                if let Some(pool_el) = &self.pool {
                    for card_el in pool.iter().filter_map(|card| self.card(card)) {
                        card_el.class_list().remove_2(MATCHED_CLASS, DRAGGED_CLASS)?;
                        pool_el.append_child(card_el)?;
                    }
                }
            }
            VisualEffect::VictoryStarted { blink_interval_ms } => {
                self.start_blinking(*blink_interval_ms)?;
            }
        }
        Ok(())
    }

    /// 勝利の点滅を開始する。もう点滅中なら何もしない（タイマーは常に一つだけ）。
    fn start_blinking(&self, interval_ms: i32) -> Result<(), JsValue> {
        let Some(target) = self.victory.clone() else {
            warn!("dom_binding: no element matches {}", VICTORY_SELECTOR);
            return Ok(());
        };
        let mut blink = self.blink.borrow_mut();
        if blink.is_some() {
            return Ok(());
        }
        let tick = Closure::<dyn FnMut()>::new(move || {
            if let Err(e) = target.class_list().toggle(BLINK_CLASS) {
                warn!("dom_binding: blink toggle failed: {:?}", e);
            }
        });
        let handle = window()
            .ok_or_else(|| JsValue::from_str("no window"))?
            .set_interval_with_callback_and_timeout_and_arguments_0(tick.as_ref().unchecked_ref(), interval_ms)?;
        *blink = Some(Blink { handle, _tick: tick });
        Ok(())
    }

    /// 点滅を止めて `blink` クラスを外す（新しいゲームの開始時）。
    fn stop_blinking(&self) -> Result<(), JsValue> {
        // Blink の drop で interval が止まる
        self.blink.borrow_mut().take();
        if let Some(target) = &self.victory {
            target.class_list().remove_1(BLINK_CLASS)?;
        }
        Ok(())
    }
}

/// dragleave の移動先要素から、それを含むスロットの ID を引く。
fn related_slot(event: &Event) -> Option<SlotId> {
    let drag = event.dyn_ref::<DragEvent>()?;
    let related = drag.related_target()?.dyn_into::<Element>().ok()?;
    let slot_el = related.closest(SLOT_SELECTOR).ok()??;
    slot_el.get_attribute(SLOT_ID_ATTR).map(SlotId::new)
}

fn document() -> Result<Document, JsValue> {
    window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document available"))
}

fn query_all(document: &Document, selector: &str) -> Result<Vec<Element>, JsValue> {
    let list = document.query_selector_all(selector)?;
    Ok((0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect())
}
