// kv-namespace/src/codec.rs
// Option records to remote call parameters. Fields at their unset value
// (`0` or `""`) are left out, so an absent record encodes like an unset one.

use serde_json::{Map, Value};

use crate::domain::{GetOptions, ListOptions, PutOptions, ValueKind};

fn set_number(obj: &mut Map<String, Value>, name: &str, value: u64) {
    if value != 0 {
        obj.insert(name.to_string(), Value::from(value));
    }
}

fn set_string(obj: &mut Map<String, Value>, name: &str, value: &str) {
    if !value.is_empty() {
        obj.insert(name.to_string(), Value::from(value));
    }
}

/// `{type, cacheTtl?}`; `type` is always present
pub fn encode_get_options(opts: Option<&GetOptions>, kind: ValueKind) -> Value {
    let mut obj = Map::new();
    obj.insert("type".to_string(), Value::from(kind.as_str()));
    if let Some(opts) = opts {
        set_number(&mut obj, "cacheTtl", opts.cache_ttl);
    }
    Value::Object(obj)
}

/// `{limit?, prefix?, cursor?}`
pub fn encode_list_options(opts: Option<&ListOptions>) -> Value {
    let mut obj = Map::new();
    if let Some(opts) = opts {
        set_number(&mut obj, "limit", opts.limit);
        set_string(&mut obj, "prefix", &opts.prefix);
        set_string(&mut obj, "cursor", &opts.cursor);
    }
    Value::Object(obj)
}

/// `{expiration?, expirationTtl?}`
pub fn encode_put_options(opts: Option<&PutOptions>) -> Value {
    let mut obj = Map::new();
    if let Some(opts) = opts {
        set_number(&mut obj, "expiration", opts.expiration);
        set_number(&mut obj, "expirationTtl", opts.expiration_ttl);
    }
    Value::Object(obj)
}
