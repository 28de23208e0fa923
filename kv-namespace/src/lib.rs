// kv-namespace/src/lib.rs
// Typed client for a remote key-value namespace reached through deferred,
// dynamically-typed calls.

pub mod bindings;
pub mod bridge;
pub mod codec;
pub mod decode;
pub mod domain;
pub mod namespace;
pub mod ports;
pub mod stream;

#[cfg(test)]
mod testing;

pub use bindings::BindingRegistry;
pub use domain::{GetOptions, ListKey, ListOptions, ListResult, PutOptions, ValueKind};
pub use namespace::{KvNamespace, NamespaceClient};
pub use ports::{Chunk, ChunkSource, Deferred, RemoteFailure, RemoteNamespace, RemoteValue};
pub use shared::config::Config;
pub use shared::{Error, Result};
pub use stream::NamespaceReader;
