//! Conversion between SDK attribute values and typed-attribute JSON
//!
//! Uses DynamoDB's own JSON encoding: `{"S": ".."}`, `{"N": "1"}`,
//! `{"BOOL": true}`, `{"NULL": true}`, `{"L": [..]}`, `{"M": {..}}`,
//! `{"SS": [..]}`, `{"NS": [..]}`, with binary (`B`, `BS`) as base64.

use crate::domain::{DynamoDbError, Item};
use aws_sdk_dynamodb::primitives::Blob;
use aws_sdk_dynamodb::types::AttributeValue;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Convert an SDK item into typed-attribute JSON
pub fn item_to_json(item: HashMap<String, AttributeValue>) -> Result<Item, DynamoDbError> {
    item.into_iter()
        .map(|(name, value)| Ok((name, attribute_to_json(&value)?)))
        .collect()
}

/// Convert typed-attribute JSON back into an SDK item
pub fn json_to_item(item: &Item) -> Result<HashMap<String, AttributeValue>, DynamoDbError> {
    item.iter()
        .map(|(name, value)| Ok((name.clone(), json_to_attribute(value)?)))
        .collect()
}

/// Convert a single attribute value
pub fn attribute_to_json(value: &AttributeValue) -> Result<Value, DynamoDbError> {
    let (tag, inner) = match value {
        AttributeValue::S(s) => ("S", Value::String(s.clone())),
        AttributeValue::N(n) => ("N", Value::String(n.clone())),
        AttributeValue::Bool(b) => ("BOOL", Value::Bool(*b)),
        AttributeValue::Null(b) => ("NULL", Value::Bool(*b)),
        AttributeValue::B(blob) => ("B", Value::String(STANDARD.encode(blob.as_ref()))),
        AttributeValue::Ss(values) => ("SS", string_array(values)),
        AttributeValue::Ns(values) => ("NS", string_array(values)),
        AttributeValue::Bs(blobs) => (
            "BS",
            Value::Array(
                blobs
                    .iter()
                    .map(|blob| Value::String(STANDARD.encode(blob.as_ref())))
                    .collect(),
            ),
        ),
        AttributeValue::L(values) => (
            "L",
            Value::Array(
                values
                    .iter()
                    .map(attribute_to_json)
                    .collect::<Result<Vec<_>, _>>()?,
            ),
        ),
        AttributeValue::M(map) => {
            let converted = map
                .iter()
                .map(|(k, v)| Ok((k.clone(), attribute_to_json(v)?)))
                .collect::<Result<Map<String, Value>, DynamoDbError>>()?;
            ("M", Value::Object(converted))
        }
        other => {
            return Err(DynamoDbError::InvalidItem(format!(
                "Unsupported attribute type: {other:?}"
            )))
        }
    };

    let mut typed = Map::new();
    typed.insert(tag.to_string(), inner);
    Ok(Value::Object(typed))
}

/// Convert a single typed-attribute JSON value
pub fn json_to_attribute(value: &Value) -> Result<AttributeValue, DynamoDbError> {
    let typed = value
        .as_object()
        .filter(|map| map.len() == 1)
        .ok_or_else(|| invalid("expected an object with exactly one type tag", value))?;

    let Some((tag, inner)) = typed.iter().next() else {
        return Err(invalid("expected an object with exactly one type tag", value));
    };

    let attribute = match tag.as_str() {
        "S" => AttributeValue::S(expect_str(inner)?.to_string()),
        "N" => AttributeValue::N(expect_str(inner)?.to_string()),
        "BOOL" => AttributeValue::Bool(expect_bool(inner)?),
        "NULL" => AttributeValue::Null(expect_bool(inner)?),
        "B" => AttributeValue::B(decode_blob(inner)?),
        "SS" => AttributeValue::Ss(expect_strings(inner)?),
        "NS" => AttributeValue::Ns(expect_strings(inner)?),
        "BS" => AttributeValue::Bs(
            expect_array(inner)?
                .iter()
                .map(decode_blob)
                .collect::<Result<Vec<_>, _>>()?,
        ),
        "L" => AttributeValue::L(
            expect_array(inner)?
                .iter()
                .map(json_to_attribute)
                .collect::<Result<Vec<_>, _>>()?,
        ),
        "M" => {
            let map = inner
                .as_object()
                .ok_or_else(|| invalid("M must hold an object", inner))?;
            AttributeValue::M(json_to_item(map)?)
        }
        other => {
            return Err(DynamoDbError::InvalidItem(format!(
                "Unknown attribute type tag: {other}"
            )))
        }
    };

    Ok(attribute)
}

fn string_array(values: &[String]) -> Value {
    Value::Array(values.iter().cloned().map(Value::String).collect())
}

fn invalid(reason: &str, value: &Value) -> DynamoDbError {
    DynamoDbError::InvalidItem(format!("{reason}: {value}"))
}

fn expect_str(value: &Value) -> Result<&str, DynamoDbError> {
    value
        .as_str()
        .ok_or_else(|| invalid("expected a string", value))
}

fn expect_bool(value: &Value) -> Result<bool, DynamoDbError> {
    value
        .as_bool()
        .ok_or_else(|| invalid("expected a boolean", value))
}

fn expect_array(value: &Value) -> Result<&Vec<Value>, DynamoDbError> {
    value
        .as_array()
        .ok_or_else(|| invalid("expected an array", value))
}

fn expect_strings(value: &Value) -> Result<Vec<String>, DynamoDbError> {
    expect_array(value)?
        .iter()
        .map(|v| expect_str(v).map(str::to_string))
        .collect()
}

fn decode_blob(value: &Value) -> Result<Blob, DynamoDbError> {
    let encoded = expect_str(value)?;
    STANDARD
        .decode(encoded)
        .map(Blob::new)
        .map_err(|e| DynamoDbError::InvalidItem(format!("Invalid base64 binary value: {e}")))
}
