// Change records for crate-level tests, built from the stream's JSON shape.

use ledger_summaries::shared::infrastructure::change_stream::ChangeRecord;

pub fn record(event_id: &str, event_name: &str, key: &str, amount: &str, transaction_type: &str) -> ChangeRecord {
    serde_json::from_value(serde_json::json!({
        "eventID": event_id,
        "eventName": event_name,
        "dynamodb": {
            "NewImage": {
                "PK": { "S": key },
                "Amount": { "N": amount },
                "Type": { "S": transaction_type },
                "Category": { "S": "Inventory" }
            }
        }
    }))
    .unwrap()
}

pub fn created(event_id: &str, key: &str, amount: &str, transaction_type: &str) -> ChangeRecord {
    record(event_id, "INSERT", key, amount, transaction_type)
}
