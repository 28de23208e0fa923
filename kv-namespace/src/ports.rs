// kv-namespace/src/ports.rs

#![deny(clippy::all)]

use bytes::Bytes;
use futures::future::BoxFuture;
use serde_json::Value;
use std::fmt;

// Ports are the seams to the host runtime that actually performs namespace calls

/// Rejection reason of a deferred remote result
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RemoteFailure {
    pub message: String,
}

impl RemoteFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for RemoteFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// A remote operation that has been issued but has not settled yet
pub type Deferred<T> = BoxFuture<'static, std::result::Result<T, RemoteFailure>>;

/// Dynamically-typed value crossing the host boundary
pub enum RemoteValue {
    /// No value at all (the remote returned nothing)
    Undefined,
    /// Text, numbers, booleans, null and structured objects
    Json(Value),
    /// Binary buffer
    Buffer(Bytes),
    /// Readable stream handle
    Stream(Box<dyn ChunkSource>),
}

impl RemoteValue {
    pub fn text(value: impl Into<String>) -> Self {
        RemoteValue::Json(Value::String(value.into()))
    }

    /// Short name of the value's shape, used in decode errors and logs
    pub fn kind(&self) -> &'static str {
        match self {
            RemoteValue::Undefined => "undefined",
            RemoteValue::Json(Value::Null) => "null",
            RemoteValue::Json(Value::Bool(_)) => "boolean",
            RemoteValue::Json(Value::Number(_)) => "number",
            RemoteValue::Json(Value::String(_)) => "string",
            RemoteValue::Json(Value::Array(_)) => "array",
            RemoteValue::Json(Value::Object(_)) => "object",
            RemoteValue::Buffer(_) => "buffer",
            RemoteValue::Stream(_) => "stream",
        }
    }
}

impl fmt::Debug for RemoteValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RemoteValue::Undefined => f.write_str("Undefined"),
            RemoteValue::Json(value) => f.debug_tuple("Json").field(value).finish(),
            RemoteValue::Buffer(bytes) => f.debug_tuple("Buffer").field(&bytes.len()).finish(),
            RemoteValue::Stream(_) => f.write_str("Stream(<chunk source>)"),
        }
    }
}

/// One result of reading a remote stream
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Chunk {
    /// Set once the stream has no more data
    pub done: bool,
    pub value: Option<Bytes>,
}

impl Chunk {
    pub fn data(value: impl Into<Bytes>) -> Self {
        Self {
            done: false,
            value: Some(value.into()),
        }
    }

    pub fn done() -> Self {
        Self {
            done: true,
            value: None,
        }
    }
}

/// Port for a remote stream reader: every call requests the next chunk
pub trait ChunkSource: Send + 'static {
    fn read(&mut self) -> Deferred<Chunk>;
}

/// Port for one bound remote namespace.
///
/// Every method issues the remote call immediately and hands back the
/// deferred result; parameters are passed as the dynamically-typed objects
/// the service expects.
pub trait RemoteNamespace: Send + Sync + 'static {
    /// `get(key, {type, cacheTtl?})`
    fn get(&self, key: &str, params: Value) -> Deferred<RemoteValue>;

    /// `list({limit?, prefix?, cursor?})`
    fn list(&self, params: Value) -> Deferred<RemoteValue>;

    /// `put(key, value, {expiration?, expirationTtl?})`
    fn put(&self, key: &str, value: RemoteValue, params: Value) -> Deferred<RemoteValue>;

    /// `delete(key)`
    fn delete(&self, key: &str) -> Deferred<RemoteValue>;
}
