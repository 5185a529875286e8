// src/systems/deal_system.rs

use std::collections::HashMap;

use log::debug;
use rand::Rng;

use crate::components::{Card, CardId, GameState, Location, Slot, SlotId};
use crate::ecs::{Entity, World};
use crate::logic::deck::DeckSpec;
use crate::logic::shuffle::tail_reinsert_shuffle;

/// 配り終わった World の「名簿」だよ。ID からエンティティを引くのに使う。
#[derive(Debug, Clone, Default)]
pub struct DealtBoard {
    pub state_entity: Entity,
    pub cards: HashMap<CardId, Entity>,
    pub slots: HashMap<SlotId, Entity>,
}

/// ゲーム開始時の配置システム🃏
///
/// 空の World に、ゲーム状態・スロット・カードのエンティティを作る。
/// カードは全部シャッフルしてプールに並べる。スコアは 0、スロットは全部空っぽ。
#[derive(Debug, Default, Clone, Copy)]
pub struct DealSystem;

impl DealSystem {
    /// デッキを `world` に配るよ。`world` は空であること（`Board` が毎回作り直してる）。
    pub fn execute<R: Rng + ?Sized>(&self, world: &mut World, deck: &DeckSpec, rng: &mut R) -> DealtBoard {
        world.register_component::<GameState>();
        world.register_component::<Slot>();
        world.register_component::<Card>();
        world.register_component::<Location>();

        let mut order: Vec<usize> = (0..deck.cards.len()).collect();
        tail_reinsert_shuffle(&mut order, rng);
        let shuffled: Vec<Card> = order
            .iter()
            .map(|&index| {
                let spec = &deck.cards[index];
                Card::new(spec.id.clone(), spec.category.clone(), spec.correct_slot.clone())
            })
            .collect();
        let matchable = shuffled.iter().filter(|card| card.is_matchable()).count();

        // ゲーム状態のエンティティを最初に作る（なので Entity(0) になる）
        let state_entity = world.create_entity();
        world.add_component(state_entity, GameState::new(matchable as u32));

        let mut slots = HashMap::with_capacity(deck.slots.len());
        for spec in &deck.slots {
            let entity = world.create_entity();
            world.add_component(entity, Slot::new(spec.id.clone(), spec.accepts.clone()));
            slots.insert(spec.id.clone(), entity);
        }

        let mut cards = HashMap::with_capacity(shuffled.len());
        for (position, card) in shuffled.into_iter().enumerate() {
            let entity = world.create_entity();
            cards.insert(card.id.clone(), entity);
            world.add_component(entity, card);
            world.add_component(entity, Location::Pool(position as u32));
        }

        debug!(
            "DealSystem: dealt {} cards into the pool, {} slots",
            cards.len(),
            slots.len()
        );

        DealtBoard {
            state_entity,
            cards,
            slots,
        }
    }
}
