// kv-namespace/src/stream.rs
// Remote chunked streams as tokio readers.

use bytes::Bytes;
use futures::future::BoxFuture;
use shared::Result;
use std::fmt;
use std::io;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::io::{AsyncRead, ReadBuf};
use tracing::debug;

use crate::bridge;
use crate::ports::{Chunk, ChunkSource};

enum ReadState {
    /// Nothing buffered, no chunk requested
    Idle,
    /// Waiting for the remote side to deliver the next chunk
    Pending(BoxFuture<'static, Result<Chunk>>),
    /// Unread tail of the last chunk
    Buffered(Bytes),
    Exhausted,
    Errored(String),
}

/// Pull reader over a remote chunked stream.
///
/// Nothing is requested from the remote side until the first read. Chunks
/// larger than the caller's buffer are kept and served before the next chunk
/// is requested. Once the stream has ended (or failed) every further read
/// reports the same outcome.
pub struct NamespaceReader {
    key: String,
    source: Option<Box<dyn ChunkSource>>,
    state: ReadState,
}

impl NamespaceReader {
    pub fn new(key: impl Into<String>, source: Box<dyn ChunkSource>) -> Self {
        Self {
            key: key.into(),
            source: Some(source),
            state: ReadState::Idle,
        }
    }

    /// Reader for a key that has no value
    pub fn empty(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            source: None,
            state: ReadState::Exhausted,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn is_exhausted(&self) -> bool {
        matches!(self.state, ReadState::Exhausted)
    }
}

impl fmt::Debug for NamespaceReader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match &self.state {
            ReadState::Idle => "idle".to_string(),
            ReadState::Pending(_) => "pending".to_string(),
            ReadState::Buffered(rest) => format!("buffered({} bytes)", rest.len()),
            ReadState::Exhausted => "exhausted".to_string(),
            ReadState::Errored(msg) => format!("errored({})", msg),
        };
        f.debug_struct("NamespaceReader")
            .field("key", &self.key)
            .field("state", &state)
            .finish()
    }
}

impl AsyncRead for NamespaceReader {
    fn poll_read(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        let this = &mut *self;

        loop {
            match &mut this.state {
                ReadState::Buffered(rest) => {
                    let n = rest.len().min(buf.remaining());
                    buf.put_slice(&rest.split_to(n));
                    if rest.is_empty() {
                        this.state = ReadState::Idle;
                    }
                    return Poll::Ready(Ok(()));
                }
                ReadState::Idle => {
                    if buf.remaining() == 0 {
                        return Poll::Ready(Ok(()));
                    }
                    let Some(source) = this.source.as_mut() else {
                        this.state = ReadState::Exhausted;
                        continue;
                    };
                    this.state =
                        ReadState::Pending(Box::pin(bridge::resolve("stream read", source.read())));
                }
                ReadState::Pending(read) => {
                    let polled = read.as_mut().poll(cx);
                    match polled {
                        Poll::Pending => return Poll::Pending,
                        Poll::Ready(Ok(chunk)) => match chunk {
                            Chunk { done: true, .. } => {
                                debug!("Stream for key '{}' reached end of data", this.key);
                                this.state = ReadState::Exhausted;
                            }
                            Chunk {
                                value: Some(bytes), ..
                            } if !bytes.is_empty() => this.state = ReadState::Buffered(bytes),
                            _ => {
                                // empty chunk: yield before asking for the next one
                                this.state = ReadState::Idle;
                                cx.waker().wake_by_ref();
                                return Poll::Pending;
                            }
                        },
                        Poll::Ready(Err(err)) => {
                            let msg = err.to_string();
                            this.state = ReadState::Errored(msg.clone());
                            return Poll::Ready(Err(io::Error::other(msg)));
                        }
                    }
                }
                ReadState::Exhausted => return Poll::Ready(Ok(())),
                ReadState::Errored(msg) => {
                    return Poll::Ready(Err(io::Error::other(msg.clone())));
                }
            }
        }
    }
}
