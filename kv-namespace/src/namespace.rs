// kv-namespace/src/namespace.rs

use async_trait::async_trait;
use bytes::Bytes;
use shared::config::Config;
use shared::{Error, Result};
use std::fmt;
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncReadExt};
use tracing::{debug, info};

use crate::bindings::BindingRegistry;
use crate::bridge;
use crate::codec;
use crate::decode;
use crate::domain::{GetOptions, ListOptions, ListResult, PutOptions, ValueKind};
use crate::ports::{RemoteNamespace, RemoteValue};
use crate::stream::NamespaceReader;

/// Typed operations on one remote key-value namespace.
///
/// Every call is a single remote round trip: nothing is cached, retried or
/// deduplicated, and pagination state stays with the caller.
#[async_trait]
pub trait KvNamespace: Send + Sync {
    /// Value of `key` as text. A missing key yields whatever the service
    /// returns for it, which is an empty string rather than an error.
    async fn get_string(&self, key: &str, opts: Option<&GetOptions>) -> Result<String>;

    /// Value of `key` as a lazy byte reader; nothing is read until the caller reads.
    async fn get_reader(&self, key: &str, opts: Option<&GetOptions>) -> Result<NamespaceReader>;

    /// One page of keys. Pass the returned cursor back to fetch the next page.
    async fn list(&self, opts: Option<&ListOptions>) -> Result<ListResult>;

    async fn put_string(&self, key: &str, value: &str, opts: Option<&PutOptions>) -> Result<()>;

    /// Store everything `value` yields. The whole payload is buffered in
    /// memory first because the remote put cannot consume a caller stream.
    async fn put_reader(
        &self,
        key: &str,
        value: &mut (dyn AsyncRead + Unpin + Send),
        opts: Option<&PutOptions>,
    ) -> Result<()>;

    async fn delete(&self, key: &str) -> Result<()>;
}

/// Client for one bound namespace
pub struct NamespaceClient {
    binding: String,
    instance: Arc<dyn RemoteNamespace>,
}

impl NamespaceClient {
    /// Resolve `binding` from the registry. Fails if no such binding exists.
    pub fn new(registry: &BindingRegistry, binding: &str) -> Result<Self> {
        let instance = registry.resolve(binding)?;
        info!("Resolved namespace binding '{}'", binding);
        Ok(Self {
            binding: binding.to_string(),
            instance,
        })
    }

    /// Resolve the binding named in `config`
    pub fn from_config(registry: &BindingRegistry, config: &Config) -> Result<Self> {
        Self::new(registry, &config.binding)
    }

    pub fn binding(&self) -> &str {
        &self.binding
    }
}

impl fmt::Debug for NamespaceClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NamespaceClient")
            .field("binding", &self.binding)
            .finish()
    }
}

#[async_trait]
impl KvNamespace for NamespaceClient {
    async fn get_string(&self, key: &str, opts: Option<&GetOptions>) -> Result<String> {
        let params = codec::encode_get_options(opts, ValueKind::Text);
        debug!("GET '{}' from '{}' as text", key, self.binding);

        let value = bridge::resolve("get", self.instance.get(key, params)).await?;
        decode::decode_text(value)
    }

    async fn get_reader(&self, key: &str, opts: Option<&GetOptions>) -> Result<NamespaceReader> {
        let params = codec::encode_get_options(opts, ValueKind::Stream);
        debug!("GET '{}' from '{}' as stream", key, self.binding);

        match bridge::resolve("get", self.instance.get(key, params)).await? {
            RemoteValue::Stream(source) => Ok(NamespaceReader::new(key, source)),
            RemoteValue::Undefined | RemoteValue::Json(serde_json::Value::Null) => {
                debug!("Key '{}' has no value in '{}'", key, self.binding);
                Ok(NamespaceReader::empty(key))
            }
            other => Err(Error::decode(
                "stream value",
                format!("expected stream, got {}", other.kind()),
            )),
        }
    }

    async fn list(&self, opts: Option<&ListOptions>) -> Result<ListResult> {
        let params = codec::encode_list_options(opts);
        debug!("LIST '{}' with {}", self.binding, params);

        let value = bridge::resolve("list", self.instance.list(params)).await?;
        let result = decode::decode_list_value(value)?;

        debug!(
            "LIST '{}' returned {} key(s), complete: {}",
            self.binding,
            result.keys.len(),
            result.list_complete
        );
        Ok(result)
    }

    async fn put_string(&self, key: &str, value: &str, opts: Option<&PutOptions>) -> Result<()> {
        let params = codec::encode_put_options(opts);
        debug!("PUT '{}' into '{}' ({} bytes of text)", key, self.binding, value.len());

        bridge::resolve("put", self.instance.put(key, RemoteValue::text(value), params)).await?;
        Ok(())
    }

    async fn put_reader(
        &self,
        key: &str,
        value: &mut (dyn AsyncRead + Unpin + Send),
        opts: Option<&PutOptions>,
    ) -> Result<()> {
        let mut payload = Vec::new();
        value.read_to_end(&mut payload).await?;

        let params = codec::encode_put_options(opts);
        debug!("PUT '{}' into '{}' ({} bytes buffered)", key, self.binding, payload.len());

        let buffer = RemoteValue::Buffer(Bytes::from(payload));
        bridge::resolve("put", self.instance.put(key, buffer, params)).await?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        debug!("DELETE '{}' from '{}'", key, self.binding);

        bridge::resolve("delete", self.instance.delete(key)).await?;
        Ok(())
    }
}
