//! Counting fakes for the gateway's collaborators.
//!
//! The cache-aside properties assert that a second identical request
//! never reaches the origin store or the codec; these fakes count calls
//! so tests can verify that.

use async_trait::async_trait;
use bytes::Bytes;
use darkroom_codec::{CodecError, CodecResult, ImageCodec, TransformRequest};
use darkroom_storage::{ImageStore, MemoryBackend, SourceObject, StorageResult};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Body returned by [`CountingCodec`] for every successful transform.
#[allow(dead_code)]
pub const TRANSFORMED_BODY: &[u8] = b"transformed-bytes";

/// Origin store fake that counts `get` calls.
pub struct CountingStore {
    inner: MemoryBackend,
    gets: AtomicUsize,
}

#[allow(dead_code)]
impl CountingStore {
    pub fn new() -> Self {
        Self {
            inner: MemoryBackend::new(),
            gets: AtomicUsize::new(0),
        }
    }

    /// Number of `get` calls observed so far.
    pub fn gets(&self) -> usize {
        self.gets.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ImageStore for CountingStore {
    async fn get(&self, key: &str) -> StorageResult<SourceObject> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        self.inner.get(key).await
    }

    async fn put(&self, key: &str, data: Bytes, content_type: Option<&str>) -> StorageResult<()> {
        self.inner.put(key, data, content_type).await
    }

    async fn exists(&self, key: &str) -> StorageResult<bool> {
        self.inner.exists(key).await
    }

    fn backend_name(&self) -> &'static str {
        "counting-memory"
    }
}

/// Codec fake that counts calls and records every request it saw.
pub struct CountingCodec {
    calls: AtomicUsize,
    requests: Mutex<Vec<TransformRequest>>,
    fail: bool,
}

#[allow(dead_code)]
impl CountingCodec {
    pub fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
            fail: false,
        }
    }

    /// A codec whose every transform fails, for exercising the 500 path.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new()
        }
    }

    /// Number of transform calls observed so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// The most recent transform request, if any.
    pub fn last_request(&self) -> Option<TransformRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl ImageCodec for CountingCodec {
    async fn transform(&self, request: TransformRequest) -> CodecResult<Bytes> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request);

        if self.fail {
            return Err(CodecError::Decode("synthetic failure".to_string()));
        }
        Ok(Bytes::from_static(TRANSFORMED_BODY))
    }

    fn codec_name(&self) -> &'static str {
        "counting"
    }
}
