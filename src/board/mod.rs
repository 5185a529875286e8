// src/board/mod.rs
//! 盤面の状態管理（カードの置き場所・正解フラグ・スコア・勝敗）の唯一の書き手だよ！
//!
//! 中身は自作 ECS の `World` で、ID → エンティティの名簿を持って各システムに処理を振り分ける。

mod snapshot;

use std::collections::HashMap;

use log::{debug, info, warn};
use rand::Rng;
use serde::{Deserialize, Serialize};

pub use snapshot::{BoardSnapshot, SlotView};

use crate::components::{Card, CardId, GameState, GameStatus, Location, Slot, SlotId};
use crate::config::GameConfig;
use crate::ecs::{Entity, System, World};
use crate::error::{GameError, GameResult};
use crate::logic::deck::{self, DeckSpec};
use crate::logic::rules;
use crate::systems::{CardMove, DealSystem, PlacementSystem, WinConditionSystem};

pub use crate::systems::RejectReason;

/// 配置が通ったときの報告。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementReport {
    /// 動かしたカード
    pub placed: CardMove,
    /// 入れ替えでプールに追い出されたカード
    pub evicted: Option<CardMove>,
    /// この操作で初めて `Won` になったら true
    pub newly_won: bool,
    pub snapshot: BoardSnapshot,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlacementResult {
    Placed(PlacementReport),
    Rejected(RejectReason),
}

impl PlacementResult {
    pub fn is_placed(&self) -> bool {
        matches!(self, PlacementResult::Placed(_))
    }
}

/// Board State Manager 本体🎴
pub struct Board {
    config: GameConfig,
    world: World,
    state_entity: Entity,
    cards: HashMap<CardId, Entity>,
    slots: HashMap<SlotId, Entity>,
}

impl Board {
    /// カードもスロットもない空の盤面。`initialize` で中身を配る。
    pub fn new(config: GameConfig) -> Self {
        let mut world = World::new();
        let state_entity = world.create_entity();
        world.add_component(state_entity, GameState::new(0));
        Self {
            config,
            world,
            state_entity,
            cards: HashMap::new(),
            slots: HashMap::new(),
        }
    }

    /// デッキを検証して、全カードをシャッフルしてプールへ。スコア 0、スロットは空。
    ///
    /// 検証に失敗したら今の盤面はそのまま残る。
    pub fn initialize<R: Rng + ?Sized>(&mut self, deck: &DeckSpec, rng: &mut R) -> GameResult<()> {
        deck::validate_deck(deck, &self.config).map_err(|e| {
            warn!("Board: rejected deck: {}", e);
            GameError::from(e)
        })?;

        let mut world = World::new();
        let dealt = DealSystem.execute(&mut world, deck, rng);
        self.world = world;
        self.state_entity = dealt.state_entity;
        self.cards = dealt.cards;
        self.slots = dealt.slots;

        info!(
            "Board: new game with {} cards, {} slots, {} categories, threshold {}",
            self.cards.len(),
            self.slots.len(),
            deck::categories(deck).len(),
            deck.matchable_count()
        );
        Ok(())
    }

    /// カードをスロットに置いてみる。
    ///
    /// 知らない ID はエラー。カテゴリ違い・すでにそこにいる場合は `Rejected` で、盤面は変わらない。
    pub fn attempt_place(&mut self, card: &CardId, slot: &SlotId) -> GameResult<PlacementResult> {
        let card_entity = self.card_entity(card)?;
        let slot_entity = self.slot_entity(slot)?;
        let was_won = self.outcome() == GameStatus::Won;

        let placed = PlacementSystem::new(&self.config).place(
            &mut self.world,
            self.state_entity,
            card_entity,
            slot_entity,
        );
        match placed {
            Ok((placed, evicted)) => Ok(PlacementResult::Placed(self.finish_move(placed, evicted, was_won))),
            Err(reason) => {
                debug!("Board: place {} -> {} rejected: {:?}", card, slot, reason);
                Ok(PlacementResult::Rejected(reason))
            }
        }
    }

    /// スロットにいるカードをプールの末尾に戻す（取り外し）。
    pub fn return_to_pool(&mut self, card: &CardId) -> GameResult<PlacementResult> {
        let card_entity = self.card_entity(card)?;
        let was_won = self.outcome() == GameStatus::Won;

        match PlacementSystem::new(&self.config).return_to_pool(&mut self.world, self.state_entity, card_entity) {
            Ok(placed) => Ok(PlacementResult::Placed(self.finish_move(placed, None, was_won))),
            Err(reason) => {
                debug!("Board: return {} to pool rejected: {:?}", card, reason);
                Ok(PlacementResult::Rejected(reason))
            }
        }
    }

    /// 置けるかどうかだけを調べる。盤面は変更しない。
    pub fn can_accept(&self, card: &CardId, slot: &SlotId) -> GameResult<bool> {
        let card = self.card(card)?;
        let slot_entity = self.slot_entity(slot)?;
        let slot = self
            .world
            .get_component::<Slot>(slot_entity)
            .ok_or_else(|| GameError::UnknownSlot(slot.clone()))?;
        Ok(rules::can_place(card, slot, &self.config))
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        let mut slots = Vec::with_capacity(self.slots.len());
        for (_, slot) in self.world.query::<Slot>() {
            let card = crate::systems::placement_system::occupant_of(&self.world, &Location::Slot(slot.id.clone()))
                .and_then(|entity| self.world.get_component::<Card>(entity))
                .map(|card| card.id.clone());
            slots.push(SlotView {
                slot: slot.id.clone(),
                card,
            });
        }

        let mut pooled: Vec<(u32, CardId)> = Vec::new();
        let mut matched: Vec<CardId> = Vec::new();
        for (entity, card) in self.world.query::<Card>() {
            if let Some(Location::Pool(order)) = self.world.get_component::<Location>(entity) {
                pooled.push((*order, card.id.clone()));
            }
            if card.is_matched {
                matched.push(card.id.clone());
            }
        }
        pooled.sort();
        matched.sort();

        let state = self.state();
        BoardSnapshot {
            slots,
            pool: pooled.into_iter().map(|(_, id)| id).collect(),
            matched,
            score: state.score,
            matchable: state.matchable,
            outcome: state.status,
        }
    }

    pub fn location_of(&self, card: &CardId) -> GameResult<Location> {
        let entity = self.card_entity(card)?;
        self.world
            .get_component::<Location>(entity)
            .cloned()
            .ok_or_else(|| GameError::UnknownCard(card.clone()))
    }

    pub fn is_matched(&self, card: &CardId) -> GameResult<bool> {
        Ok(self.card(card)?.is_matched)
    }

    pub fn score(&self) -> u32 {
        self.state().score
    }

    pub fn outcome(&self) -> GameStatus {
        self.state().status
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn contains_card(&self, card: &CardId) -> bool {
        self.cards.contains_key(card)
    }

    fn finish_move(&mut self, placed: CardMove, evicted: Option<CardMove>, was_won: bool) -> PlacementReport {
        WinConditionSystem::new(self.config.freeze_score_on_win).run(&mut self.world);
        let newly_won = !was_won && self.outcome() == GameStatus::Won;
        if newly_won {
            info!("Board: won with score {}", self.score());
        }
        PlacementReport {
            placed,
            evicted,
            newly_won,
            snapshot: self.snapshot(),
        }
    }

    fn state(&self) -> GameState {
        self.world
            .get_component::<GameState>(self.state_entity)
            .cloned()
            .unwrap_or_else(|| GameState::new(0))
    }

    fn card_entity(&self, card: &CardId) -> GameResult<Entity> {
        self.cards
            .get(card)
            .copied()
            .ok_or_else(|| GameError::UnknownCard(card.clone()))
    }

    fn slot_entity(&self, slot: &SlotId) -> GameResult<Entity> {
        self.slots
            .get(slot)
            .copied()
            .ok_or_else(|| GameError::UnknownSlot(slot.clone()))
    }

    fn card(&self, card: &CardId) -> GameResult<&Card> {
        let entity = self.card_entity(card)?;
        self.world
            .get_component::<Card>(entity)
            .ok_or_else(|| GameError::UnknownCard(card.clone()))
    }
}
