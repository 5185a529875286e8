// tests/web.rs
// ブラウザ（wasm-pack test）でだけ動く GameApp のテスト。

#![cfg(target_arch = "wasm32")]

use metamorphosis_match::GameApp;
use wasm_bindgen_test::*;
use web_sys::{Document, Element, Event};

wasm_bindgen_test_configure!(run_in_browser);

const DECK: &str = r#"{
    "cards": [
        {"id": "A", "category": "frog", "correct_slot": "F1"},
        {"id": "B", "category": "butterfly", "correct_slot": "BF1"}
    ],
    "slots": [
        {"id": "F1", "accepts": "frog"},
        {"id": "BF1", "accepts": "butterfly"}
    ]
}"#;

#[wasm_bindgen_test]
fn game_app_plays_to_victory() {
    let app = GameApp::new(Some(DECK.to_string()), None).unwrap();
    assert_eq!(app.score(), 0);

    app.begin_drag("A").unwrap();
    assert!(app.enter_slot("F1").unwrap());
    assert!(app.drop_on_slot("F1").unwrap());
    app.end_drag();

    app.begin_drag("B").unwrap();
    assert!(!app.drop_on_slot("F1").unwrap());
    app.end_drag();

    app.begin_drag("B").unwrap();
    assert!(app.drop_on_slot("BF1").unwrap());
    app.end_drag();

    assert_eq!(app.score(), 2);
    assert!(app.is_won());
    let effects = app.drain_effects_json().unwrap();
    assert!(effects.contains("victory_started"));
}

#[wasm_bindgen_test]
fn game_app_rejects_bad_input() {
    assert!(GameApp::new(Some("not json".to_string()), None).is_err());
    let app = GameApp::new(None, Some(r#"{"blink_interval_ms": 250}"#.to_string())).unwrap();
    assert!(app.begin_drag("nobody").is_err());
    assert!(app.drop_on_pool().is_err());
    let snapshot = app.snapshot_json().unwrap();
    assert!(snapshot.contains("\"score\":0"));
}

const QUOTED_ID: &str = r#"egg"\1"#;

fn child(document: &Document, parent: &Element, class: &str, attr: Option<(&str, &str)>) -> Element {
    let el = document.create_element("div").unwrap();
    el.set_class_name(class);
    if let Some((name, value)) = attr {
        el.set_attribute(name, value).unwrap();
    }
    parent.append_child(&el).unwrap();
    el
}

fn fire(target: &Element, event_type: &str) {
    target.dispatch_event(&Event::new(event_type).unwrap()).unwrap();
}

#[wasm_bindgen_test]
fn bound_page_follows_drops_and_new_game() {
    let document = web_sys::window().unwrap().document().unwrap();
    let root = document.create_element("div").unwrap();
    document.body().unwrap().append_child(&root).unwrap();
    let pool = child(&document, &root, "mixed-cards", None);
    let slot = child(&document, &root, "slot", Some(("data-slot-id", "F1")));
    // セレクタに埋め込むと壊れる文字を含む ID でも、名簿から引けば動く
    let card = child(&document, &pool, "card", Some(("data-card-id", QUOTED_ID)));
    child(&document, &root, "victory", None);

    let deck = format!(
        r#"{{"cards":[{{"id":{},"category":"frog","correct_slot":"F1"}}],"slots":[{{"id":"F1","accepts":"frog"}}]}}"#,
        serde_json::to_string(QUOTED_ID).unwrap()
    );
    let mut app = GameApp::new(Some(deck.clone()), None).unwrap();
    app.bind_document().unwrap();

    fire(&card, "dragstart");
    fire(&slot, "drop");
    fire(&card, "dragend");
    assert_eq!(card.parent_element().as_ref(), Some(&slot));
    assert!(card.class_list().contains("matched"));
    assert!(app.is_won());

    // 勝利後に新しいゲーム: カードはプールに戻って、印も点滅も消える
    app.new_game(Some(deck)).unwrap();
    assert_eq!(card.parent_element().as_ref(), Some(&pool));
    assert!(!card.class_list().contains("matched"));
    assert!(!app.is_won());

    root.remove();
}
