// src/ecs/component.rs

/// Component（コンポーネント）のマーカートレイトだよ！
///
/// 中身は空っぽ。`World` に登録できる型かどうかを示すためだけに使うんだ。
/// `'static` なのは、`World` の中で `TypeId` をキーにして型ごとのストレージを管理するから！
pub trait Component: 'static {}
