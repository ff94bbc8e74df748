// Shared test fixture for ledger change records.
// The base record is parsed from json/created_record.json so the builder always
// starts from the exact transport shape the stream delivers.

use crate::modules::user_summaries::use_cases::aggregate_transactions::decode::{
    AMOUNT_ATTRIBUTE, CATEGORY_ATTRIBUTE, PARTITION_KEY_ATTRIBUTE, TYPE_ATTRIBUTE,
};
use crate::shared::infrastructure::change_stream::{AttributeValue, ChangeRecord, StreamEvent};

const CREATED_RECORD_JSON: &str = include_str!("json/created_record.json");

pub struct ChangeRecordBuilder {
    inner: ChangeRecord,
}

impl Default for ChangeRecordBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ChangeRecordBuilder {
    pub fn new() -> Self {
        Self {
            inner: serde_json::from_str(CREATED_RECORD_JSON).unwrap(),
        }
    }

    pub fn event_id(mut self, v: impl Into<String>) -> Self {
        self.inner.event_id = Some(v.into());
        self
    }

    pub fn event_name(mut self, v: impl Into<String>) -> Self {
        self.inner.event_name = v.into();
        self
    }

    pub fn key(self, v: impl Into<String>) -> Self {
        self.attribute(PARTITION_KEY_ATTRIBUTE, AttributeValue::S(v.into()))
    }

    pub fn user(self, user_id: &str) -> Self {
        self.key(format!("CUST#{user_id}"))
    }

    pub fn amount(self, v: impl Into<String>) -> Self {
        self.attribute(AMOUNT_ATTRIBUTE, AttributeValue::N(v.into()))
    }

    pub fn transaction_type(self, v: impl Into<String>) -> Self {
        self.attribute(TYPE_ATTRIBUTE, AttributeValue::S(v.into()))
    }

    pub fn category(self, v: impl Into<String>) -> Self {
        self.attribute(CATEGORY_ATTRIBUTE, AttributeValue::S(v.into()))
    }

    pub fn attribute(mut self, name: &str, value: AttributeValue) -> Self {
        self.inner
            .dynamodb
            .new_image
            .get_or_insert_with(Default::default)
            .insert(name.to_string(), value);
        self
    }

    pub fn without(mut self, name: &str) -> Self {
        if let Some(image) = self.inner.dynamodb.new_image.as_mut() {
            image.remove(name);
        }
        self
    }

    pub fn build(self) -> ChangeRecord {
        self.inner
    }
}

pub fn stream_event(records: Vec<ChangeRecord>) -> StreamEvent {
    StreamEvent { records }
}

#[cfg(test)]
mod change_record_builder_tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn default_delegates_to_new_and_parses_json() {
        let record = ChangeRecordBuilder::default().build();
        assert_eq!(record.event_name, "INSERT");
        assert_eq!(
            record.event_id.as_deref(),
            Some("c81e728d9d4c2f636f067f89cc14862c")
        );
        let image = record.dynamodb.new_image.unwrap();
        assert_eq!(
            image[PARTITION_KEY_ATTRIBUTE],
            AttributeValue::S("CUST#user-fixed-0001".into())
        );
        assert_eq!(image[AMOUNT_ATTRIBUTE], AttributeValue::N("100".into()));
    }

    #[rstest]
    fn setters_override_fields_and_build_returns_inner() {
        let record = ChangeRecordBuilder::new()
            .event_id("evt-1")
            .event_name("MODIFY")
            .user("U9")
            .amount("12.5")
            .transaction_type("Credit")
            .category("Udhaar")
            .without("SK")
            .build();

        assert_eq!(record.event_id.as_deref(), Some("evt-1"));
        assert_eq!(record.event_name, "MODIFY");
        let image = record.dynamodb.new_image.unwrap();
        assert_eq!(image[PARTITION_KEY_ATTRIBUTE], AttributeValue::S("CUST#U9".into()));
        assert_eq!(image[AMOUNT_ATTRIBUTE], AttributeValue::N("12.5".into()));
        assert_eq!(image[TYPE_ATTRIBUTE], AttributeValue::S("Credit".into()));
        assert_eq!(image[CATEGORY_ATTRIBUTE], AttributeValue::S("Udhaar".into()));
        assert!(!image.contains_key("SK"));
    }
}
