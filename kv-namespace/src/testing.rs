// kv-namespace/src/testing.rs
// In-process fakes for the remote namespace ports

use bytes::Bytes;
use futures::FutureExt;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::ports::{Chunk, ChunkSource, Deferred, RemoteFailure, RemoteNamespace, RemoteValue};

type Outcome = std::result::Result<RemoteValue, RemoteFailure>;

/// Settle on a later poll so callers really suspend
fn settle_later<T: Send + 'static>(outcome: std::result::Result<T, RemoteFailure>) -> Deferred<T> {
    async move {
        tokio::task::yield_now().await;
        outcome
    }
    .boxed()
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Payload {
    Text(String),
    Buffer(Bytes),
    Other(&'static str),
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Call {
    Get { key: String, params: Value },
    List { params: Value },
    Put { key: String, value: Payload, params: Value },
    Delete { key: String },
}

type Responder = Box<dyn Fn(&Call) -> Outcome + Send + Sync>;

/// Records every call and answers through a responder closure
pub(crate) struct FakeNamespace {
    calls: Mutex<Vec<Call>>,
    responder: Responder,
}

impl FakeNamespace {
    pub(crate) fn new<F>(responder: F) -> Self
    where
        F: Fn(&Call) -> Outcome + Send + Sync + 'static,
    {
        Self {
            calls: Mutex::new(Vec::new()),
            responder: Box::new(responder),
        }
    }

    /// Answers calls in order from the given outcomes, then with `Undefined`
    pub(crate) fn scripted(outcomes: Vec<Outcome>) -> Self {
        let queue = Mutex::new(VecDeque::from(outcomes));
        Self::new(move |_| {
            queue
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Ok(RemoteValue::Undefined))
        })
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn answer(&self, call: Call) -> Deferred<RemoteValue> {
        let outcome = (self.responder)(&call);
        self.calls.lock().unwrap().push(call);
        settle_later(outcome)
    }
}

impl RemoteNamespace for FakeNamespace {
    fn get(&self, key: &str, params: Value) -> Deferred<RemoteValue> {
        self.answer(Call::Get {
            key: key.to_string(),
            params,
        })
    }

    fn list(&self, params: Value) -> Deferred<RemoteValue> {
        self.answer(Call::List { params })
    }

    fn put(&self, key: &str, value: RemoteValue, params: Value) -> Deferred<RemoteValue> {
        let value = match value {
            RemoteValue::Json(Value::String(text)) => Payload::Text(text),
            RemoteValue::Buffer(bytes) => Payload::Buffer(bytes),
            other => Payload::Other(other.kind()),
        };
        self.answer(Call::Put {
            key: key.to_string(),
            value,
            params,
        })
    }

    fn delete(&self, key: &str) -> Deferred<RemoteValue> {
        self.answer(Call::Delete {
            key: key.to_string(),
        })
    }
}

#[derive(Clone, Debug, Default)]
pub(crate) struct ReadCounter(Arc<AtomicUsize>);

impl ReadCounter {
    pub(crate) fn get(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

/// Chunked stream that replays fixed chunks and then signals done
pub(crate) struct FakeStream {
    chunks: VecDeque<std::result::Result<Chunk, RemoteFailure>>,
    reads: ReadCounter,
    immediate: bool,
}

impl FakeStream {
    pub(crate) fn chunks<I, B>(chunks: I) -> Self
    where
        I: IntoIterator<Item = B>,
        B: Into<Bytes>,
    {
        Self {
            chunks: chunks.into_iter().map(|c| Ok(Chunk::data(c))).collect(),
            reads: ReadCounter::default(),
            immediate: false,
        }
    }

    /// Replays the chunks, then rejects with `message`
    pub(crate) fn failing_after<I, B>(chunks: I, message: &str) -> Self
    where
        I: IntoIterator<Item = B>,
        B: Into<Bytes>,
    {
        let mut stream = Self::chunks(chunks);
        stream.chunks.push_back(Err(RemoteFailure::new(message)));
        stream
    }

    /// Hand out reads that are already settled
    pub(crate) fn settle_immediately(mut self) -> Self {
        self.immediate = true;
        self
    }

    pub(crate) fn read_counter(&self) -> ReadCounter {
        self.reads.clone()
    }
}

impl ChunkSource for FakeStream {
    fn read(&mut self) -> Deferred<Chunk> {
        self.reads.0.fetch_add(1, Ordering::SeqCst);
        let next = self.chunks.pop_front().unwrap_or(Ok(Chunk::done()));
        if self.immediate {
            futures::future::ready(next).boxed()
        } else {
            settle_later(next)
        }
    }
}
