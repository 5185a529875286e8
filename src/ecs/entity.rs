// src/ecs/entity.rs

use serde::{Deserialize, Serialize};

/// Entity（エンティティ）は、ゲームに登場する「モノ」を表すただの識別子（ID）だよ！
///
/// カード1枚1枚、スロット1つ1つ、それとゲーム全体の状態を持つ特別なエンティティがこれになる。
/// ID 自体には意味がなくて、コンポーネント（`Card` とか `Slot` とか）を付けることで
/// 「Entity(3) はカエルの卵のカードで、今はプールにいる」みたいに意味を持つんだ✨
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct Entity(pub usize);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entity_ordering_follows_id() {
        assert!(Entity(1) < Entity(2));
        assert_eq!(Entity(7), Entity(7));
    }
}
