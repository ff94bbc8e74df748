// Transport shape of a ledger change-stream batch.
//
// Purpose
// - Mirror the DynamoDB Streams envelope delivered to the invocation endpoint.
//
// Boundaries
// - No interpretation here. Turning a record into a transaction event lives in
//   the aggregate_transactions decode step.
// - Reading is lenient per record: a record whose shape cannot be read still
//   deserializes, carrying the reason, so it fails on its own and not the batch.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::HashMap;

pub type AttributeMap = HashMap<String, AttributeValue>;

/// A single attribute value, tagged with its primitive type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttributeValue {
    S(String),
    N(#[serde(deserialize_with = "number_text")] String),
    B(String),
    #[serde(rename = "BOOL")]
    Bool(bool),
    #[serde(rename = "NULL")]
    Null(bool),
    M(AttributeMap),
    L(Vec<AttributeValue>),
    #[serde(rename = "SS")]
    StringSet(Vec<String>),
    #[serde(rename = "NS")]
    NumberSet(Vec<String>),
    #[serde(rename = "BS")]
    BinarySet(Vec<String>),
    /// Any value that is not one of the tags above, kept as raw JSON.
    #[serde(untagged)]
    Unsupported(Value),
}

/// Numbers arrive as text on the stream, but plain JSON numbers are accepted too.
fn number_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberText {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match NumberText::deserialize(deserializer)? {
        NumberText::Text(text) => text,
        NumberText::Number(number) => number.to_string(),
    })
}

impl AttributeValue {
    pub fn type_tag(&self) -> &'static str {
        match self {
            AttributeValue::S(_) => "S",
            AttributeValue::N(_) => "N",
            AttributeValue::B(_) => "B",
            AttributeValue::Bool(_) => "BOOL",
            AttributeValue::Null(_) => "NULL",
            AttributeValue::M(_) => "M",
            AttributeValue::L(_) => "L",
            AttributeValue::StringSet(_) => "SS",
            AttributeValue::NumberSet(_) => "NS",
            AttributeValue::BinarySet(_) => "BS",
            AttributeValue::Unsupported(_) => "unsupported",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamRecord {
    #[serde(rename = "NewImage", default, skip_serializing_if = "Option::is_none")]
    pub new_image: Option<AttributeMap>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Value")]
pub struct ChangeRecord {
    #[serde(rename = "eventID", skip_serializing_if = "Option::is_none")]
    pub event_id: Option<String>,
    #[serde(rename = "eventName")]
    pub event_name: String,
    pub dynamodb: StreamRecord,
    /// Why the record could not be read, when its shape was off.
    #[serde(skip)]
    pub unreadable: Option<String>,
}

#[derive(Deserialize)]
struct WireChangeRecord {
    #[serde(rename = "eventID", default)]
    event_id: Option<String>,
    #[serde(rename = "eventName", default)]
    event_name: String,
    #[serde(default)]
    dynamodb: StreamRecord,
}

impl From<Value> for ChangeRecord {
    fn from(value: Value) -> Self {
        match WireChangeRecord::deserialize(&value) {
            Ok(wire) => Self {
                event_id: wire.event_id,
                event_name: wire.event_name,
                dynamodb: wire.dynamodb,
                unreadable: None,
            },
            Err(error) => Self {
                event_id: value
                    .get("eventID")
                    .and_then(Value::as_str)
                    .map(str::to_string),
                event_name: value
                    .get("eventName")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string(),
                dynamodb: StreamRecord::default(),
                unreadable: Some(error.to_string()),
            },
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamEvent {
    #[serde(rename = "Records", default)]
    pub records: Vec<ChangeRecord>,
}
