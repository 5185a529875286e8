// src/ecs/world.rs

use std::any::{Any, TypeId};
use std::collections::{HashMap, HashSet};

use crate::ecs::component::Component;
use crate::ecs::entity::Entity;

/// 型消去されたコンポーネントストレージと、その型専用のお掃除関数をセットで持つよ。
///
/// `storage` の中身は `HashMap<Entity, T>`。`remover` があるおかげで、
/// `destroy_entity` の中で `T` を知らなくてもコンポーネントを消せるんだ😎
struct ComponentStoreEntry {
    storage: Box<dyn Any>,
    remover: fn(&mut Box<dyn Any>, Entity),
}

impl ComponentStoreEntry {
    fn new<T: Component>() -> Self {
        let remover: fn(&mut Box<dyn Any>, Entity) = |storage_any, entity| {
            if let Some(storage) = storage_any.downcast_mut::<HashMap<Entity, T>>() {
                storage.remove(&entity);
            }
        };
        Self {
            storage: Box::new(HashMap::<Entity, T>::new()),
            remover,
        }
    }
}

/// ゲーム世界の全てのエンティティとコンポーネントを管理する自作 ECS のコア！
///
/// ボード上のカード・スロット・ゲーム状態は全部ここに入る。
/// 書き込みは `Board` とシステムからしか行わないよ。
#[derive(Default)]
pub struct World {
    entities: HashSet<Entity>,
    next_entity_id: usize,
    component_stores: HashMap<TypeId, ComponentStoreEntry>,
}

impl World {
    /// 新しい空の World を作成するよ。
    pub fn new() -> Self {
        Self::default()
    }

    /// 新しいエンティティを生成して返す。ID は 0 からの連番。
    pub fn create_entity(&mut self) -> Entity {
        let entity = Entity(self.next_entity_id);
        self.next_entity_id += 1;
        self.entities.insert(entity);
        entity
    }

    pub fn is_entity_alive(&self, entity: Entity) -> bool {
        self.entities.contains(&entity)
    }

    /// エンティティを破棄して、付いてるコンポーネントも全部お掃除する🧹
    ///
    /// 生きていたエンティティなら `true`。
    pub fn destroy_entity(&mut self, entity: Entity) -> bool {
        if !self.entities.remove(&entity) {
            return false;
        }
        for entry in self.component_stores.values_mut() {
            (entry.remover)(&mut entry.storage, entity);
        }
        true
    }

    /// コンポーネント型を登録する。二回目以降の登録は何もしないよ（既存データは残す）。
    pub fn register_component<T: Component>(&mut self) {
        self.component_stores
            .entry(TypeId::of::<T>())
            .or_insert_with(ComponentStoreEntry::new::<T>);
    }

    /// エンティティにコンポーネントを追加（もう付いてたら上書き）する。
    ///
    /// 未登録の型ならここで登録しちゃう。死んでるエンティティには何もしない。
    pub fn add_component<T: Component>(&mut self, entity: Entity, component: T) {
        if !self.is_entity_alive(entity) {
            return;
        }
        self.register_component::<T>();
        if let Some(storage) = self.store_mut::<T>() {
            storage.insert(entity, component);
        }
    }

    pub fn get_component<T: Component>(&self, entity: Entity) -> Option<&T> {
        self.store::<T>().and_then(|storage| storage.get(&entity))
    }

    pub fn get_component_mut<T: Component>(&mut self, entity: Entity) -> Option<&mut T> {
        if !self.is_entity_alive(entity) {
            return None;
        }
        self.store_mut::<T>().and_then(|storage| storage.get_mut(&entity))
    }

    pub fn remove_component<T: Component>(&mut self, entity: Entity) -> Option<T> {
        self.store_mut::<T>().and_then(|storage| storage.remove(&entity))
    }

    /// 指定した型のコンポーネントを持つ、生きているエンティティを ID 順で返すよ。
    ///
    /// HashMap の順番はバラバラなので、毎回ソートして結果を決定的にしてる。
    pub fn get_all_entities_with_component<T: Component>(&self) -> Vec<Entity> {
        let mut entities: Vec<Entity> = self
            .store::<T>()
            .map(|storage| {
                storage
                    .keys()
                    .copied()
                    .filter(|entity| self.is_entity_alive(*entity))
                    .collect()
            })
            .unwrap_or_default();
        entities.sort();
        entities
    }

    /// `(Entity, &T)` のペアを ID 順で返す。
    pub fn query<T: Component>(&self) -> Vec<(Entity, &T)> {
        self.get_all_entities_with_component::<T>()
            .into_iter()
            .filter_map(|entity| self.get_component::<T>(entity).map(|c| (entity, c)))
            .collect()
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    fn store<T: Component>(&self) -> Option<&HashMap<Entity, T>> {
        self.component_stores
            .get(&TypeId::of::<T>())
            .and_then(|entry| entry.storage.downcast_ref::<HashMap<Entity, T>>())
    }

    fn store_mut<T: Component>(&mut self) -> Option<&mut HashMap<Entity, T>> {
        self.component_stores
            .get_mut(&TypeId::of::<T>())
            .and_then(|entry| entry.storage.downcast_mut::<HashMap<Entity, T>>())
    }
}
