//! Tests for the dispatcher endpoint: a Telegram update is fully handled before the endpoint returns.

mod common;

use common::{harness, vex, Lookup, ScriptedCharacterService, SentKind, CHAT_ID, USER_ID};
use ddbot::telegram::handle_update;

const VEX_ID: i64 = 133869351;

fn update(message_id: i32, text: &str) -> teloxide::types::Message {
    serde_json::from_value(serde_json::json!({
        "message_id": message_id,
        "date": 1_700_000_000,
        "chat": { "id": CHAT_ID, "type": "group", "title": "Party" },
        "from": { "id": USER_ID, "is_bot": false, "first_name": "Player" },
        "text": text,
    }))
    .expect("valid Telegram message")
}

/// **Test: Messages in one chat are handled in order.**
///
/// **Setup:** Vex is fetchable; no character bound yet.
/// **Action:** `/character_set` then `/str_check`, each through the endpoint.
/// **Expected:** each reply is recorded when its endpoint call returns; the roll sees the character.
#[tokio::test]
async fn test_endpoint_handles_set_before_roll() {
    let h = harness(ScriptedCharacterService::default().with(VEX_ID, Lookup::Found(vex()))).await;

    handle_update(update(1, &format!("/character_set {VEX_ID}")), h.chain.clone())
        .await
        .unwrap();
    assert_eq!(h.bot.sent().len(), 1);
    assert_eq!(h.bot.last().text, "Current character updated: Vex");

    handle_update(update(2, "/str_check"), h.chain.clone())
        .await
        .unwrap();
    let last = h.bot.last();
    assert_eq!(last.kind, SentKind::Reply);
    assert_eq!(last.text, "4+3=7");
}

/// **Test: Non-text messages never reach the chain.**
#[tokio::test]
async fn test_endpoint_skips_non_text() {
    let h = harness(ScriptedCharacterService::default()).await;
    let renamed: teloxide::types::Message = serde_json::from_value(serde_json::json!({
        "message_id": 3,
        "date": 1_700_000_000,
        "chat": { "id": CHAT_ID, "type": "group", "title": "Party" },
        "from": { "id": USER_ID, "is_bot": false, "first_name": "Player" },
        "new_chat_title": "Renamed party",
    }))
    .expect("valid Telegram message");

    handle_update(renamed, h.chain.clone()).await.unwrap();

    assert!(h.bot.sent().is_empty());
}
