// src/ecs/world_tests.rs
// World のユニットテスト！

use super::component::Component;
use super::entity::Entity;
use super::world::World;

// --- テスト用のダミーコンポーネント ---

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Tag(u32);
impl Component for Tag {}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Label(String);
impl Component for Label {}

#[test]
fn test_new_world_is_empty() {
    let world = World::new();
    assert_eq!(world.entity_count(), 0);
    assert!(world.get_all_entities_with_component::<Tag>().is_empty());
}

#[test]
fn test_create_entity_ids_are_sequential() {
    let mut world = World::new();
    assert_eq!(world.create_entity(), Entity(0));
    assert_eq!(world.create_entity(), Entity(1));
    assert_eq!(world.entity_count(), 2);
}

#[test]
fn test_add_and_get_component() {
    let mut world = World::new();
    world.register_component::<Tag>();
    let entity = world.create_entity();
    world.add_component(entity, Tag(5));

    assert_eq!(world.get_component::<Tag>(entity), Some(&Tag(5)));
    assert_eq!(world.get_component::<Label>(entity), None, "未登録の型は None のはず");
}

#[test]
fn test_add_component_registers_lazily() {
    let mut world = World::new();
    let entity = world.create_entity();
    world.add_component(entity, Label("egg".to_string()));
    assert_eq!(world.get_component::<Label>(entity), Some(&Label("egg".to_string())));
}

#[test]
fn test_add_component_to_dead_entity_is_ignored() {
    let mut world = World::new();
    world.add_component(Entity(42), Tag(1));
    assert!(world.get_all_entities_with_component::<Tag>().is_empty());
}

#[test]
fn test_get_component_mut_updates_value() {
    let mut world = World::new();
    let entity = world.create_entity();
    world.add_component(entity, Tag(1));
    if let Some(tag) = world.get_component_mut::<Tag>(entity) {
        tag.0 = 9;
    }
    assert_eq!(world.get_component::<Tag>(entity), Some(&Tag(9)));
}

#[test]
fn test_remove_component() {
    let mut world = World::new();
    let entity = world.create_entity();
    world.add_component(entity, Tag(3));

    assert_eq!(world.remove_component::<Tag>(entity), Some(Tag(3)));
    assert_eq!(world.remove_component::<Tag>(entity), None);
    assert!(world.is_entity_alive(entity), "コンポーネントを外してもエンティティは生きてる");
}

#[test]
fn test_destroy_entity_removes_all_components() {
    let mut world = World::new();
    let entity = world.create_entity();
    world.add_component(entity, Tag(1));
    world.add_component(entity, Label("tadpole".to_string()));

    assert!(world.destroy_entity(entity));
    assert!(!world.destroy_entity(entity), "二回目は false");
    assert_eq!(world.get_component::<Tag>(entity), None);
    assert_eq!(world.get_component::<Label>(entity), None);
}

#[test]
fn test_query_returns_sorted_pairs() {
    let mut world = World::new();
    let entities: Vec<Entity> = (0..5).map(|_| world.create_entity()).collect();
    for (i, entity) in entities.iter().enumerate().rev() {
        world.add_component(*entity, Tag(i as u32 * 10));
    }
    let pairs: Vec<(Entity, Tag)> = world.query::<Tag>().into_iter().map(|(e, t)| (e, *t)).collect();
    assert_eq!(pairs.len(), 5);
    assert_eq!(pairs[0], (Entity(0), Tag(0)));
    assert_eq!(pairs[4], (Entity(4), Tag(40)));
}
