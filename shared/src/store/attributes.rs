use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde_json::{Map, Number, Value};

use crate::types::UserRecord;

pub type Item = HashMap<String, AttributeValue>;

/// JSON value to DynamoDB attribute
pub fn to_attribute(value: &Value) -> AttributeValue {
    match value {
        Value::Null => AttributeValue::Null(true),
        Value::Bool(b) => AttributeValue::Bool(*b),
        Value::Number(n) => AttributeValue::N(n.to_string()),
        Value::String(s) => AttributeValue::S(s.clone()),
        Value::Array(values) => AttributeValue::L(values.iter().map(to_attribute).collect()),
        Value::Object(map) => AttributeValue::M(to_item(map)),
    }
}

pub fn to_item(map: &Map<String, Value>) -> Item {
    map.iter()
        .map(|(k, v)| (k.clone(), to_attribute(v)))
        .collect()
}

/// DynamoDB attribute to JSON value. Sets become arrays, binary becomes base64.
pub fn from_attribute(attr: &AttributeValue) -> Value {
    match attr {
        AttributeValue::S(s) => Value::String(s.clone()),
        AttributeValue::N(n) => parse_number(n),
        AttributeValue::Bool(b) => Value::Bool(*b),
        AttributeValue::Null(_) => Value::Null,
        AttributeValue::B(blob) => Value::String(STANDARD.encode(blob.as_ref())),
        AttributeValue::Ss(values) => values.iter().cloned().map(Value::String).collect(),
        AttributeValue::Ns(values) => values.iter().map(|n| parse_number(n)).collect(),
        AttributeValue::Bs(values) => values
            .iter()
            .map(|blob| Value::String(STANDARD.encode(blob.as_ref())))
            .collect(),
        AttributeValue::L(values) => values.iter().map(from_attribute).collect(),
        AttributeValue::M(item) => Value::Object(from_item(item)),
        other => {
            tracing::warn!("Unsupported attribute type: {:?}", other);
            Value::Null
        }
    }
}

pub fn from_item(item: &Item) -> Map<String, Value> {
    item.iter()
        .map(|(k, v)| (k.clone(), from_attribute(v)))
        .collect()
}

/// Integers stay integers; anything else that parses becomes a float.
/// A number JSON cannot hold is kept as its text.
fn parse_number(n: &str) -> Value {
    if let Ok(i) = n.parse::<i64>() {
        return Value::from(i);
    }
    if let Ok(u) = n.parse::<u64>() {
        return Value::from(u);
    }
    n.parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .map(Value::Number)
        .unwrap_or_else(|| Value::String(n.to_string()))
}

pub fn record_to_item(record: &UserRecord) -> Item {
    to_item(&record.clone().into_map())
}

pub fn item_to_record(item: &Item) -> Option<UserRecord> {
    UserRecord::from_map(from_item(item))
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_dynamodb::primitives::Blob;
    use serde_json::json;

    #[test]
    fn test_nested_document() {
        let value = json!({
            "name": "A",
            "age": 42,
            "score": 9.5,
            "active": true,
            "nickname": null,
            "tags": ["x", 1],
            "address": {"city": "Hanoi"}
        });
        let attr = to_attribute(&value);

        let AttributeValue::M(item) = &attr else {
            panic!("expected a map attribute");
        };
        assert_eq!(item["name"], AttributeValue::S("A".into()));
        assert_eq!(item["age"], AttributeValue::N("42".into()));
        assert_eq!(item["nickname"], AttributeValue::Null(true));
        assert_eq!(
            item["tags"],
            AttributeValue::L(vec![AttributeValue::S("x".into()), AttributeValue::N("1".into())])
        );

        assert_eq!(from_attribute(&attr), value);
    }

    #[test]
    fn test_sets_and_binary() {
        assert_eq!(
            from_attribute(&AttributeValue::Ss(vec!["a".into(), "b".into()])),
            json!(["a", "b"])
        );
        assert_eq!(
            from_attribute(&AttributeValue::Ns(vec!["1".into(), "2.5".into()])),
            json!([1, 2.5])
        );
        assert_eq!(
            from_attribute(&AttributeValue::B(Blob::new(b"hi".to_vec()))),
            json!("aGk=")
        );
    }

    #[test]
    fn test_huge_number_keeps_text() {
        let n = "1".repeat(30) + "e400";
        assert_eq!(from_attribute(&AttributeValue::N(n.clone())), json!(n));
    }

    #[test]
    fn test_item_round_trip_through_record() {
        let record = UserRecord::from_map(
            json!({"userid": "u1", "timestamp": "2024-01-01T00:00:00.000000+00:00", "name": "A"})
                .as_object()
                .cloned()
                .unwrap(),
        )
        .unwrap();

        let item = record_to_item(&record);
        assert_eq!(item["userid"], AttributeValue::S("u1".into()));
        assert_eq!(item_to_record(&item), Some(record));
    }

    #[test]
    fn test_item_without_key_is_none() {
        let item = Item::from([("name".to_string(), AttributeValue::S("A".into()))]);
        assert_eq!(item_to_record(&item), None);
    }
}
