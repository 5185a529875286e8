// src/logic/rules/tests.rs
//! rules モジュール内の関数のユニットテスト。

use super::*;
use crate::components::{Card, Category, Slot, SlotId};
use crate::config::GameConfig;

fn card(category: &str, correct: Option<&str>) -> Card {
    Card::new("c".into(), category.into(), correct.map(SlotId::from))
}

fn slot(id: &str, accepts: &str) -> Slot {
    Slot::new(id.into(), accepts.into())
}

#[test]
fn test_same_category_is_accepted() {
    let config = GameConfig::default();
    assert!(can_place(&card("frog", None), &slot("F1", "frog"), &config));
    assert!(!can_place(&card("butterfly", None), &slot("F1", "frog"), &config));
}

#[test]
fn test_wildcard_slot_accepts_everything() {
    let config = GameConfig::default();
    assert!(can_place(&card("frog", None), &slot("G1", "general"), &config));
    assert!(can_place(&card("butterfly", None), &slot("G1", "general"), &config));
}

#[test]
fn test_wildcard_card_only_fits_matching_or_wildcard_slots() {
    // ワイルドカードなのはスロット側だけ。"general" のカードは "frog" スロットには入らない
    let config = GameConfig::default();
    assert!(!can_place(&card("general", None), &slot("F1", "frog"), &config));
    assert!(can_place(&card("general", None), &slot("G1", "general"), &config));
}

#[test]
fn test_custom_wildcard_from_config() {
    let config = GameConfig {
        wildcard_category: Category::new("any"),
        ..GameConfig::default()
    };
    assert!(can_place(&card("frog", None), &slot("X", "any"), &config));
    assert!(!can_place(&card("frog", None), &slot("G1", "general"), &config));
}

#[test]
fn test_first_correct_placement_matches() {
    let c = card("frog", Some("F1"));
    assert_eq!(evaluate_placement(&c, &"F1".into()), ScoreChange::Matched);
    assert_eq!(evaluate_placement(&c, &"F2".into()), ScoreChange::Unchanged);
}

#[test]
fn test_matched_card_moving_away_unmatches() {
    let mut c = card("frog", Some("F1"));
    c.is_matched = true;
    assert_eq!(evaluate_placement(&c, &"F2".into()), ScoreChange::Unmatched);
    assert_eq!(evaluate_removal(&c), ScoreChange::Unmatched);
}

#[test]
fn test_unmatchable_card_never_scores() {
    let c = card("general", None);
    assert_eq!(evaluate_placement(&c, &"G1".into()), ScoreChange::Unchanged);
    assert_eq!(evaluate_removal(&c), ScoreChange::Unchanged);
}

#[test]
fn test_score_change_delta() {
    assert_eq!(ScoreChange::Matched.delta(), 1);
    assert_eq!(ScoreChange::Unmatched.delta(), -1);
    assert_eq!(ScoreChange::Unchanged.delta(), 0);
}

#[test]
fn test_win_condition() {
    assert!(check_win_condition(2, 2), "勝利ラインに届いたらクリア🏆");
    assert!(!check_win_condition(1, 2));
    assert!(!check_win_condition(0, 0), "正解のないデッキはクリアにならない");
}
