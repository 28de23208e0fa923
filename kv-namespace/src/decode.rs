// kv-namespace/src/decode.rs
// Remote return values to typed records. A malformed key fails the whole decode.

use serde_json::{Map, Value};
use shared::{Error, Result};

use crate::domain::{ListKey, ListResult};
use crate::ports::RemoteValue;

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Present and not null
fn field<'a>(obj: &'a Map<String, Value>, name: &str) -> Option<&'a Value> {
    obj.get(name).filter(|v| !v.is_null())
}

/// Non-negative whole number, also accepting whole floats such as `1.7e9`
fn as_seconds(value: &Value) -> Option<u64> {
    value.as_u64().or_else(|| {
        value
            .as_f64()
            .filter(|f| f.is_finite() && *f >= 0.0 && f.fract() == 0.0 && *f <= u64::MAX as f64)
            .map(|f| f as u64)
    })
}

pub fn decode_list_key(index: usize, value: &Value) -> Result<ListKey> {
    let context = || format!("keys[{}]", index);

    let obj = value
        .as_object()
        .ok_or_else(|| Error::decode(context(), format!("expected object, got {}", type_name(value))))?;

    let name = match field(obj, "name") {
        Some(Value::String(name)) => name.clone(),
        Some(other) => {
            return Err(Error::decode(
                context(),
                format!("`name` must be a string, got {}", type_name(other)),
            ));
        }
        None => return Err(Error::decode(context(), "missing required field `name`")),
    };

    let expiration = match field(obj, "expiration") {
        None => 0,
        Some(exp) => as_seconds(exp).ok_or_else(|| {
            Error::decode(
                context(),
                format!("`expiration` must be a non-negative integer, got {}", exp),
            )
        })?,
    };

    Ok(ListKey { name, expiration })
}

pub fn decode_list_result(value: &Value) -> Result<ListResult> {
    let obj = value.as_object().ok_or_else(|| {
        Error::decode(
            "list result",
            format!("expected object, got {}", type_name(value)),
        )
    })?;

    let keys = match field(obj, "keys") {
        Some(Value::Array(entries)) => entries
            .iter()
            .enumerate()
            .map(|(i, entry)| decode_list_key(i, entry))
            .collect::<Result<Vec<_>>>()?,
        Some(other) => {
            return Err(Error::decode(
                "keys",
                format!("expected array, got {}", type_name(other)),
            ));
        }
        None => return Err(Error::decode("keys", "missing required field")),
    };

    let list_complete = match field(obj, "list_complete") {
        Some(Value::Bool(complete)) => *complete,
        Some(other) => {
            return Err(Error::decode(
                "list_complete",
                format!("expected boolean, got {}", type_name(other)),
            ));
        }
        None => return Err(Error::decode("list_complete", "missing required field")),
    };

    let cursor = match field(obj, "cursor") {
        None => String::new(),
        Some(Value::String(cursor)) => cursor.clone(),
        Some(other) => {
            return Err(Error::decode(
                "cursor",
                format!("expected string, got {}", type_name(other)),
            ));
        }
    };

    if !list_complete && cursor.is_empty() {
        return Err(Error::decode(
            "cursor",
            "listing is incomplete but no cursor was returned",
        ));
    }

    Ok(ListResult {
        keys,
        list_complete,
        // a finished listing has nothing to continue from
        cursor: if list_complete { String::new() } else { cursor },
    })
}

pub fn decode_list_value(value: RemoteValue) -> Result<ListResult> {
    match value {
        RemoteValue::Json(json) => decode_list_result(&json),
        other => Err(Error::decode(
            "list result",
            format!("expected object, got {}", other.kind()),
        )),
    }
}

/// Text value of a get. A missing value (null or undefined) reads as `""`.
pub fn decode_text(value: RemoteValue) -> Result<String> {
    match value {
        RemoteValue::Json(Value::String(text)) => Ok(text),
        RemoteValue::Json(Value::Null) | RemoteValue::Undefined => Ok(String::new()),
        RemoteValue::Buffer(bytes) => String::from_utf8(bytes.to_vec())
            .map_err(|e| Error::decode("text value", format!("invalid UTF-8: {}", e))),
        other => Err(Error::decode(
            "text value",
            format!("expected string, got {}", other.kind()),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use serde_json::json;

    #[test]
    fn test_decode_list_result_keeps_service_order() {
        let value = json!({
            "keys": [
                {"name": "zeta", "expiration": 1_700_000_000u64},
                {"name": "alpha"},
                {"name": "mid", "expiration": null, "metadata": {"a": 1}}
            ],
            "list_complete": false,
            "cursor": "c1"
        });

        let result = decode_list_result(&value).unwrap();
        assert_eq!(
            result.keys,
            vec![
                ListKey::new("zeta", 1_700_000_000),
                ListKey::new("alpha", 0),
                ListKey::new("mid", 0),
            ]
        );
        assert!(!result.list_complete);
        assert_eq!(result.cursor, "c1");
    }

    #[test]
    fn test_decode_complete_listing_without_cursor() {
        let value = json!({"keys": [{"name": "c"}], "list_complete": true});
        let result = decode_list_result(&value).unwrap();
        assert!(result.list_complete);
        assert_eq!(result.cursor, "");
        assert_eq!(result.keys.len(), 1);
    }

    #[test]
    fn test_decode_float_expiration() {
        let value = json!({"name": "k", "expiration": 1_700_000_000.0});
        assert_eq!(decode_list_key(0, &value).unwrap().expiration, 1_700_000_000);

        let value = json!({"name": "k", "expiration": 1.5});
        assert!(decode_list_key(0, &value).unwrap_err().is_decode());

        let value = json!({"name": "k", "expiration": -1});
        assert!(decode_list_key(0, &value).is_err());
    }

    #[test]
    fn test_missing_name_fails_whole_decode_with_index() {
        let value = json!({
            "keys": [{"name": "a"}, {"expiration": 10}, {"name": "c"}],
            "list_complete": true
        });

        let err = decode_list_result(&value).unwrap_err();
        match err {
            Error::Decode { context, reason } => {
                assert_eq!(context, "keys[1]");
                assert!(reason.contains("name"));
            }
            other => panic!("expected decode error, got {other:?}"),
        }
    }

    #[test]
    fn test_required_top_level_fields() {
        assert!(decode_list_result(&json!({"list_complete": true})).is_err());
        assert!(decode_list_result(&json!({"keys": []})).is_err());
        assert!(decode_list_result(&json!({"keys": {}, "list_complete": true})).is_err());
        assert!(decode_list_result(&json!({"keys": [], "list_complete": "yes"})).is_err());
        assert!(decode_list_result(&json!([])).is_err());
    }

    #[test]
    fn test_incomplete_listing_needs_cursor() {
        let value = json!({"keys": [], "list_complete": false});
        let err = decode_list_result(&value).unwrap_err();
        assert!(matches!(err, Error::Decode { ref context, .. } if context == "cursor"));
    }

    #[test]
    fn test_decode_list_value_rejects_non_json() {
        let err = decode_list_value(RemoteValue::Undefined).unwrap_err();
        assert!(err.is_decode());
    }

    #[test]
    fn test_decode_text() {
        assert_eq!(decode_text(RemoteValue::text("hello")).unwrap(), "hello");
        assert_eq!(decode_text(RemoteValue::Json(Value::Null)).unwrap(), "");
        assert_eq!(decode_text(RemoteValue::Undefined).unwrap(), "");
        assert_eq!(
            decode_text(RemoteValue::Buffer(Bytes::from_static(b"bytes"))).unwrap(),
            "bytes"
        );
        assert!(decode_text(RemoteValue::Buffer(Bytes::from_static(&[0xff, 0xfe]))).is_err());
        assert!(decode_text(RemoteValue::Json(json!(42))).is_err());
    }
}
