// Decode a raw change record into a typed transaction event.
//
// Purpose
// - Keep every stringly-typed lookup of the attribute bag in one place.
//
// Responsibilities
// - Map the stream event name to an EventKind.
// - Extract the user id from the composite partition key `<prefix>#<user_id>`.
// - Parse the amount as an exact decimal.
// - Reject missing or mistyped attributes with a DecodeError.

use rust_decimal::Decimal;
use std::str::FromStr;
use thiserror::Error;

use crate::modules::user_summaries::core::transaction::{
    EventKind, TransactionEvent, TransactionType,
};
use crate::shared::infrastructure::change_stream::{AttributeMap, AttributeValue, ChangeRecord};

pub const PARTITION_KEY_ATTRIBUTE: &str = "PK";
pub const AMOUNT_ATTRIBUTE: &str = "Amount";
pub const TYPE_ATTRIBUTE: &str = "Type";
pub const CATEGORY_ATTRIBUTE: &str = "Category";

const KEY_SEPARATOR: char = '#';

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("unreadable record: {reason}")]
    Unreadable { reason: String },

    #[error("record carries no new image")]
    MissingNewImage,

    #[error("missing attribute {name}")]
    MissingAttribute { name: &'static str },

    #[error("attribute {name} should be of type {expected}, got {actual}")]
    UnexpectedType {
        name: &'static str,
        expected: &'static str,
        actual: &'static str,
    },

    #[error("malformed partition key {key:?}")]
    MalformedKey { key: String },

    #[error("invalid amount {value:?}")]
    InvalidAmount { value: String },
}

pub fn event_kind(record: &ChangeRecord) -> EventKind {
    EventKind::from(record.event_name.as_str())
}

/// The user id is the second `#`-separated segment; further segments are ignored.
pub fn parse_user_id(key: &str) -> Result<&str, DecodeError> {
    match key.split(KEY_SEPARATOR).nth(1) {
        Some(user_id) if !user_id.is_empty() => Ok(user_id),
        _ => Err(DecodeError::MalformedKey {
            key: key.to_string(),
        }),
    }
}

/// Accepts plain decimal text and scientific notation.
pub fn parse_amount(raw: &str) -> Result<Decimal, DecodeError> {
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .map_err(|_| DecodeError::InvalidAmount {
            value: raw.to_string(),
        })
}

pub fn decode(record: &ChangeRecord) -> Result<TransactionEvent, DecodeError> {
    if let Some(reason) = &record.unreadable {
        return Err(DecodeError::Unreadable {
            reason: reason.clone(),
        });
    }

    let image = record
        .dynamodb
        .new_image
        .as_ref()
        .ok_or(DecodeError::MissingNewImage)?;

    let key = string_attribute(image, PARTITION_KEY_ATTRIBUTE)?;
    let user_id = parse_user_id(key)?;
    let amount = parse_amount(number_attribute(image, AMOUNT_ATTRIBUTE)?)?;
    let transaction_type = TransactionType::from(string_attribute(image, TYPE_ATTRIBUTE)?);
    let category = string_attribute(image, CATEGORY_ATTRIBUTE)?;

    Ok(TransactionEvent {
        user_id: user_id.to_string(),
        amount,
        transaction_type,
        category: category.to_string(),
    })
}

fn attribute<'a>(image: &'a AttributeMap, name: &'static str) -> Result<&'a AttributeValue, DecodeError> {
    image.get(name).ok_or(DecodeError::MissingAttribute { name })
}

fn string_attribute<'a>(image: &'a AttributeMap, name: &'static str) -> Result<&'a str, DecodeError> {
    match attribute(image, name)? {
        AttributeValue::S(value) => Ok(value),
        other => Err(DecodeError::UnexpectedType {
            name,
            expected: "S",
            actual: other.type_tag(),
        }),
    }
}

fn number_attribute<'a>(image: &'a AttributeMap, name: &'static str) -> Result<&'a str, DecodeError> {
    match attribute(image, name)? {
        AttributeValue::N(value) => Ok(value),
        other => Err(DecodeError::UnexpectedType {
            name,
            expected: "N",
            actual: other.type_tag(),
        }),
    }
}
