//! Update fixtures

use serde_json::{json, Value};

pub const TEST_USER_ID: i64 = 42;
pub const TEST_SECRET: &str = "test-secret_token";

/// A private-chat text message from [`TEST_USER_ID`]
pub fn text_update(update_id: i64, text: &str) -> Value {
    json!({
        "update_id": update_id,
        "message": {
            "message_id": 1,
            "date": 1441645532,
            "chat": { "id": TEST_USER_ID, "type": "private", "first_name": "Test" },
            "from": {
                "id": TEST_USER_ID,
                "is_bot": false,
                "first_name": "Test",
                "username": "tester",
                "language_code": "en"
            },
            "text": text
        }
    })
}

/// An inline keyboard press carrying `data`
pub fn callback_update(update_id: i64, data: &str) -> Value {
    json!({
        "update_id": update_id,
        "callback_query": {
            "id": "4382bfdwdsb323b2d9",
            "from": {
                "id": TEST_USER_ID,
                "is_bot": false,
                "first_name": "Test",
                "username": "tester"
            },
            "chat_instance": "-8216738497438473",
            "data": data
        }
    })
}

/// A message from a channel: no sender
pub fn anonymous_update(update_id: i64) -> Value {
    json!({
        "update_id": update_id,
        "message": {
            "message_id": 7,
            "date": 1441645532,
            "chat": { "id": -1001234567890_i64, "type": "channel", "title": "News" },
            "text": "/start"
        }
    })
}

/// Parse a fixture the way the webhook route does, from raw JSON text.
/// `Update` only recognizes its kind when deserialized from text; going
/// through `from_value` yields `UpdateKind::Error`.
pub fn parse_update(value: Value) -> teloxide::types::Update {
    serde_json::from_str(&value.to_string()).expect("fixture must be a valid update")
}
