// src/logic/shuffle.rs

use rand::Rng;

/// 末尾への再挿入でシャッフルするよ🎲
///
/// `i` を `n` から `1` まで減らしながら、`[0, i)` の中からランダムに一枚選んで末尾に移す。
/// 先頭 `i` 枚が「まだ選ばれていない」カードで、選ばれたものは後ろに順番に溜まっていく。
/// 毎回まだ選ばれていないカードから一様に選ぶので、全ての並びが等確率になる。
pub fn tail_reinsert_shuffle<T, R: Rng + ?Sized>(items: &mut Vec<T>, rng: &mut R) {
    for i in (1..=items.len()).rev() {
        let picked = rng.gen_range(0..i);
        let item = items.remove(picked);
        items.push(item);
    }
}
