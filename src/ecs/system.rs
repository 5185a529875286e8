// src/ecs/system.rs

use crate::ecs::world::World;

/// System（システム）トレイトだよ！
///
/// World の中のデータ（コンポーネント）を読んで、ルールに従って書き換える役割。
/// 入力を持たない「毎回チェックするだけ」のロジック（勝利判定とか）はこれを実装するよ。
/// カード配置みたいに引数が必要な処理は、各システムの `execute` メソッドで受け取る形にしてる。
pub trait System {
    /// このシステムを実行するよ！
    fn run(&mut self, world: &mut World);
}
