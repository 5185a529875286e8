//! ゲームの勝利条件判定ロジック🏆

/// スコアが勝利ライン（正解スロットを持つカードの枚数）に届いたか。
///
/// 正解スロットを持つカードが一枚もないデッキでは勝利にならない。
pub fn check_win_condition(score: u32, matchable: u32) -> bool {
    matchable > 0 && score >= matchable
}
