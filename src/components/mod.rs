// src/components/mod.rs

// ボード上のエンティティに付けるデータ部品たち！
pub mod card;
pub mod category;
pub mod game_state;
pub mod location;
pub mod slot;

pub use card::{Card, CardId};
pub use category::Category;
pub use game_state::{GameState, GameStatus};
pub use location::Location;
pub use slot::{Slot, SlotId};
