// src/systems/placement_system.rs

use log::debug;
use serde::{Deserialize, Serialize};

use crate::components::{Card, CardId, GameState, Location, Slot};
use crate::config::GameConfig;
use crate::ecs::{Entity, World};
use crate::logic::rules::{self, ScoreChange};

/// 配置が受け付けられなかった理由。どれも盤面は一切変わらない。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    /// スロットのカテゴリがカードと合わない（ワイルドカードでもない）
    IncompatibleCategory,
    /// もうそのスロットに入っている
    AlreadyInSlot,
    /// もうプールにいる
    AlreadyInPool,
}

/// 一枚のカードの移動結果。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardMove {
    pub card: CardId,
    pub from: Location,
    pub to: Location,
    /// 実際に適用されたスコア変化（凍結中は常に `Unchanged`）
    pub score_change: ScoreChange,
    /// 正解フラグが変わったときだけ、変わった後の値（凍結中もフラグは置き場所に追従する）
    pub matched_flag: Option<bool>,
}

/// 配置・取り外しを実行するシステム🖱️💨
///
/// ルールチェックをして、OK なら `Location`・正解フラグ・スコアを更新する。
/// 勝利判定はここではやらない（`WinConditionSystem` の担当）。
pub struct PlacementSystem<'a> {
    config: &'a GameConfig,
}

impl<'a> PlacementSystem<'a> {
    pub fn new(config: &'a GameConfig) -> Self {
        Self { config }
    }

    /// `card_entity` を `slot_entity` に置く。
    ///
    /// 先客がいたらプールの末尾に追い出す（入れ替え）。戻り値は置いたカードと追い出したカードの移動結果。
    pub fn place(
        &self,
        world: &mut World,
        state_entity: Entity,
        card_entity: Entity,
        slot_entity: Entity,
    ) -> Result<(CardMove, Option<CardMove>), RejectReason> {
        let (card, from) = card_and_location(world, card_entity)
            .ok_or(RejectReason::IncompatibleCategory)?;
        let slot = world
            .get_component::<Slot>(slot_entity)
            .cloned()
            .ok_or(RejectReason::IncompatibleCategory)?;

        if from.slot() == Some(&slot.id) {
            return Err(RejectReason::AlreadyInSlot);
        }
        if !rules::can_place(&card, &slot, self.config) {
            debug!(
                "PlacementSystem: {} ({}) does not fit slot {} ({})",
                card.id, card.category, slot.id, slot.accepts
            );
            return Err(RejectReason::IncompatibleCategory);
        }

        let occupant = occupant_of(world, &Location::Slot(slot.id.clone()));
        let evicted = occupant.map(|occupant| self.send_to_pool(world, state_entity, occupant));

        let to = Location::Slot(slot.id.clone());
        let change = rules::evaluate_placement(&card, &slot.id);
        let (score_change, matched_flag) = apply_score_change(world, state_entity, card_entity, change);
        world.add_component(card_entity, to.clone());

        debug!(
            "PlacementSystem: {} {:?} -> {:?} ({:?})",
            card.id, from, to, score_change
        );

        let placed = CardMove {
            card: card.id,
            from,
            to,
            score_change,
            matched_flag,
        };
        Ok((placed, evicted.flatten()))
    }

    /// スロットにいるカードをプールの末尾に戻す。
    pub fn return_to_pool(
        &self,
        world: &mut World,
        state_entity: Entity,
        card_entity: Entity,
    ) -> Result<CardMove, RejectReason> {
        match world.get_component::<Location>(card_entity) {
            Some(Location::Slot(_)) => {}
            _ => return Err(RejectReason::AlreadyInPool),
        }
        self.send_to_pool(world, state_entity, card_entity)
            .ok_or(RejectReason::AlreadyInPool)
    }

    fn send_to_pool(&self, world: &mut World, state_entity: Entity, card_entity: Entity) -> Option<CardMove> {
        let (card, from) = card_and_location(world, card_entity)?;
        let to = Location::Pool(next_pool_order(world));
        let change = rules::evaluate_removal(&card);
        let (score_change, matched_flag) = apply_score_change(world, state_entity, card_entity, change);
        world.add_component(card_entity, to.clone());

        debug!("PlacementSystem: {} back to pool ({:?})", card.id, score_change);
        Some(CardMove {
            card: card.id,
            from,
            to,
            score_change,
            matched_flag,
        })
    }
}

fn card_and_location(world: &World, card_entity: Entity) -> Option<(Card, Location)> {
    let card = world.get_component::<Card>(card_entity)?.clone();
    let location = world.get_component::<Location>(card_entity)?.clone();
    Some((card, location))
}

/// その場所にいるカードのエンティティ。スロットなら高々一枚。
pub(crate) fn occupant_of(world: &World, location: &Location) -> Option<Entity> {
    world
        .query::<Location>()
        .into_iter()
        .find(|(_, l)| *l == location)
        .map(|(entity, _)| entity)
}

/// プールの末尾に並べるための番号（今いる最大 + 1）。
fn next_pool_order(world: &World) -> u32 {
    world
        .query::<Location>()
        .into_iter()
        .filter_map(|(_, location)| match location {
            Location::Pool(order) => Some(*order + 1),
            Location::Slot(_) => None,
        })
        .max()
        .unwrap_or(0)
}

/// 正解フラグを更新して、スコア変化を適用する。
///
/// フラグは凍結中でも置き場所に合わせて動く（「正解スロットにいる」の意味を保つ）。
/// スコアは凍結中なら動かさず、戻り値のスコア変化は `Unchanged` になるよ。
fn apply_score_change(
    world: &mut World,
    state_entity: Entity,
    card_entity: Entity,
    change: ScoreChange,
) -> (ScoreChange, Option<bool>) {
    if change == ScoreChange::Unchanged {
        return (ScoreChange::Unchanged, None);
    }
    let matched = change == ScoreChange::Matched;
    if let Some(card) = world.get_component_mut::<Card>(card_entity) {
        card.is_matched = matched;
    }

    let Some(state) = world.get_component_mut::<GameState>(state_entity) else {
        return (ScoreChange::Unchanged, Some(matched));
    };
    if state.scoring_frozen {
        return (ScoreChange::Unchanged, Some(matched));
    }
    let score = (i64::from(state.score) + i64::from(change.delta())).clamp(0, i64::from(state.matchable));
    state.score = u32::try_from(score).unwrap_or(state.matchable);
    (change, Some(matched))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::deck::{CardSpec, DeckSpec, SlotSpec};
    use crate::systems::deal_system::{DealSystem, DealtBoard};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn setup() -> (World, DealtBoard) {
        let deck = DeckSpec {
            cards: vec![
                CardSpec::new("A", "frog", Some("F1")),
                CardSpec::new("A2", "frog", Some("F2")),
                CardSpec::new("B", "butterfly", Some("BF1")),
            ],
            slots: vec![
                SlotSpec::new("F1", "frog"),
                SlotSpec::new("F2", "frog"),
                SlotSpec::new("BF1", "butterfly"),
            ],
        };
        let mut world = World::new();
        let dealt = DealSystem.execute(&mut world, &deck, &mut StdRng::seed_from_u64(5));
        (world, dealt)
    }

    fn score(world: &World, dealt: &DealtBoard) -> u32 {
        world.get_component::<GameState>(dealt.state_entity).unwrap().score
    }

    #[test]
    fn correct_placement_scores() {
        let config = GameConfig::default();
        let (mut world, dealt) = setup();
        let system = PlacementSystem::new(&config);

        let (placed, evicted) = system
            .place(&mut world, dealt.state_entity, dealt.cards[&"A".into()], dealt.slots[&"F1".into()])
            .unwrap();
        assert_eq!(placed.score_change, ScoreChange::Matched);
        assert_eq!(placed.matched_flag, Some(true));
        assert_eq!(placed.to, Location::Slot("F1".into()));
        assert!(evicted.is_none());
        assert_eq!(score(&world, &dealt), 1);
    }

    #[test]
    fn incompatible_placement_is_rejected_without_changes() {
        let config = GameConfig::default();
        let (mut world, dealt) = setup();
        let system = PlacementSystem::new(&config);
        let card = dealt.cards[&"B".into()];
        let before = world.get_component::<Location>(card).cloned();

        let result = system.place(&mut world, dealt.state_entity, card, dealt.slots[&"F1".into()]);
        assert_eq!(result, Err(RejectReason::IncompatibleCategory));
        assert_eq!(world.get_component::<Location>(card).cloned(), before);
        assert_eq!(score(&world, &dealt), 0);
    }

    #[test]
    fn swap_evicts_occupant_to_pool_tail() {
        let config = GameConfig::default();
        let (mut world, dealt) = setup();
        let system = PlacementSystem::new(&config);
        let f1 = dealt.slots[&"F1".into()];

        system.place(&mut world, dealt.state_entity, dealt.cards[&"A".into()], f1).unwrap();
        let (placed, evicted) = system
            .place(&mut world, dealt.state_entity, dealt.cards[&"A2".into()], f1)
            .unwrap();

        let evicted = evicted.expect("A should be evicted");
        assert_eq!(evicted.card, CardId::new("A"));
        assert_eq!(evicted.score_change, ScoreChange::Unmatched);
        let Location::Pool(evicted_order) = evicted.to else {
            panic!("evicted card should be in the pool, got {:?}", evicted.to);
        };
        let others_before_it = world
            .query::<Location>()
            .into_iter()
            .filter_map(|(_, l)| match l {
                Location::Pool(order) => Some(*order),
                Location::Slot(_) => None,
            })
            .all(|order| order <= evicted_order);
        assert!(others_before_it, "evicted card goes to the tail of the pool");
        assert_eq!(placed.score_change, ScoreChange::Unchanged);
        assert_eq!(score(&world, &dealt), 0);
    }

    #[test]
    fn return_to_pool_from_pool_is_rejected() {
        let config = GameConfig::default();
        let (mut world, dealt) = setup();
        let system = PlacementSystem::new(&config);
        let result = system.return_to_pool(&mut world, dealt.state_entity, dealt.cards[&"A".into()]);
        assert_eq!(result, Err(RejectReason::AlreadyInPool));
    }

    #[test]
    fn frozen_scoring_moves_cards_but_keeps_score() {
        let config = GameConfig::default();
        let (mut world, dealt) = setup();
        world
            .get_component_mut::<GameState>(dealt.state_entity)
            .unwrap()
            .scoring_frozen = true;
        let system = PlacementSystem::new(&config);

        let (placed, _) = system
            .place(&mut world, dealt.state_entity, dealt.cards[&"A".into()], dealt.slots[&"F1".into()])
            .unwrap();
        assert_eq!(placed.score_change, ScoreChange::Unchanged);
        assert_eq!(placed.to, Location::Slot("F1".into()));
        assert_eq!(placed.matched_flag, Some(true));
        assert_eq!(score(&world, &dealt), 0);
    }

    #[test]
    fn frozen_removal_clears_the_flag_but_keeps_score() {
        let config = GameConfig::default();
        let (mut world, dealt) = setup();
        let system = PlacementSystem::new(&config);
        let a = dealt.cards[&"A".into()];
        system.place(&mut world, dealt.state_entity, a, dealt.slots[&"F1".into()]).unwrap();
        world
            .get_component_mut::<GameState>(dealt.state_entity)
            .unwrap()
            .scoring_frozen = true;

        let removed = system.return_to_pool(&mut world, dealt.state_entity, a).unwrap();
        assert_eq!(removed.score_change, ScoreChange::Unchanged);
        assert_eq!(removed.matched_flag, Some(false));
        assert!(!world.get_component::<Card>(a).unwrap().is_matched, "プールにいるカードは正解扱いしない");
        assert_eq!(score(&world, &dealt), 1);
    }

    #[test]
    fn unchanged_moves_do_not_touch_the_flag() {
        let config = GameConfig::default();
        let (mut world, dealt) = setup();
        let system = PlacementSystem::new(&config);
        let (placed, _) = system
            .place(&mut world, dealt.state_entity, dealt.cards[&"A".into()], dealt.slots[&"F2".into()])
            .unwrap();
        assert_eq!(placed.score_change, ScoreChange::Unchanged);
        assert_eq!(placed.matched_flag, None);
    }
}
