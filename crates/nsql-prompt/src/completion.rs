//! The completion-client seam.
//!
//! The chat dialect's schema summary and the evaluation driver both reach a
//! model through [`CompletionClient`]. [`OpenRouterClient`] is the HTTP
//! implementation; [`DiskCachedClient`] wraps any client with a response
//! cache on disk so reruns of an evaluation do not pay for the same request
//! twice.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{ChatCompletion, CompletionRequest, OpenRouterClient};

/// Boxed future returned by [`CompletionClient::complete`].
pub type CompletionFuture<'a> =
    Pin<Box<dyn Future<Output = Result<ChatCompletion, String>> + Send + 'a>>;

/// Anything that can answer a chat-completion request.
pub trait CompletionClient: Send + Sync {
    fn complete<'a>(&'a self, request: &'a CompletionRequest) -> CompletionFuture<'a>;
}

impl CompletionClient for OpenRouterClient {
    fn complete<'a>(&'a self, request: &'a CompletionRequest) -> CompletionFuture<'a> {
        Box::pin(self.chat(request))
    }
}

// ── Disk cache ─────────────────────────────────────────────────────

/// One cached exchange, stored as `<hash>.json`.
#[derive(Serialize, Deserialize, Debug)]
struct CacheEntry {
    request: CompletionRequest,
    response: ChatCompletion,
}

/// Response cache in front of another client.
///
/// Entries are keyed by a hash of the serialized request and checked
/// against the stored request before use, so a hash collision reads as a
/// miss. Unreadable entries are misses; failed writes are logged and the
/// response is still returned.
pub struct DiskCachedClient<C> {
    inner: C,
    dir: PathBuf,
    overwrite: bool,
}

impl<C: CompletionClient> DiskCachedClient<C> {
    pub fn new(inner: C, dir: impl Into<PathBuf>) -> Self {
        Self {
            inner,
            dir: dir.into(),
            overwrite: false,
        }
    }

    /// Ignore existing entries; fresh responses still replace them.
    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn inner(&self) -> &C {
        &self.inner
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{:016x}.json", fnv1a(key)))
    }

    async fn lookup(&self, path: &Path, request: &CompletionRequest) -> Option<ChatCompletion> {
        let data = tokio::fs::read_to_string(path).await.ok()?;
        let entry: CacheEntry = match serde_json::from_str(&data) {
            Ok(entry) => entry,
            Err(e) => {
                debug!("Ignoring unreadable cache entry {}: {e}", path.display());
                return None;
            }
        };
        (entry.request == *request).then_some(entry.response)
    }

    async fn store(
        &self,
        path: &Path,
        request: &CompletionRequest,
        response: &ChatCompletion,
    ) -> Result<(), String> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| format!("failed to create cache dir: {e}"))?;
        let entry = CacheEntry {
            request: request.clone(),
            response: response.clone(),
        };
        let data = serde_json::to_string_pretty(&entry)
            .map_err(|e| format!("failed to serialize cache entry: {e}"))?;
        let tmp_path = path.with_extension("json.tmp");
        tokio::fs::write(&tmp_path, data)
            .await
            .map_err(|e| format!("failed to write cache entry: {e}"))?;
        tokio::fs::rename(&tmp_path, path)
            .await
            .map_err(|e| format!("failed to rename cache entry: {e}"))
    }
}

impl<C: CompletionClient> CompletionClient for DiskCachedClient<C> {
    fn complete<'a>(&'a self, request: &'a CompletionRequest) -> CompletionFuture<'a> {
        Box::pin(async move {
            let key = serde_json::to_string(request)
                .map_err(|e| format!("failed to serialize request: {e}"))?;
            let path = self.entry_path(&key);

            if !self.overwrite
                && let Some(hit) = self.lookup(&path, request).await
            {
                debug!("Completion cache hit: {}", path.display());
                return Ok(hit);
            }

            let response = self.inner.complete(request).await?;
            if let Err(e) = self.store(&path, request, &response).await {
                warn!("Completion cache write failed: {e}");
            }
            Ok(response)
        })
    }
}

/// FNV-1a 64-bit hash.
pub(crate) fn fnv1a(s: &str) -> u64 {
    let mut hash: u64 = 0xcbf29ce484222325;
    for byte in s.bytes() {
        hash ^= byte as u64;
        hash = hash.wrapping_mul(0x100000001b3);
    }
    hash
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Message;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Counting {
        calls: AtomicUsize,
    }

    impl Counting {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl CompletionClient for Counting {
        fn complete<'a>(&'a self, request: &'a CompletionRequest) -> CompletionFuture<'a> {
            Box::pin(async move {
                let n = self.calls.fetch_add(1, Ordering::SeqCst);
                Ok::<_, String>(ChatCompletion {
                    content: Some(format!("{} #{n}", request.messages[0].content)),
                    ..Default::default()
                })
            })
        }
    }

    struct Broken;

    impl CompletionClient for Broken {
        fn complete<'a>(&'a self, _request: &'a CompletionRequest) -> CompletionFuture<'a> {
            Box::pin(async { Err::<ChatCompletion, _>("HTTP 500".to_string()) })
        }
    }

    fn request(text: &str) -> CompletionRequest {
        CompletionRequest {
            model: "test-model".into(),
            messages: vec![Message::user(text)],
            max_tokens: 300,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn second_identical_request_is_served_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let client = DiskCachedClient::new(Counting::new(), dir.path());

        let first = client.complete(&request("q")).await.unwrap();
        let second = client.complete(&request("q")).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(client.inner().calls.load(Ordering::SeqCst), 1);

        client.complete(&request("other")).await.unwrap();
        assert_eq!(client.inner().calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn overwrite_bypasses_existing_entries() {
        let dir = tempfile::tempdir().unwrap();
        let client = DiskCachedClient::new(Counting::new(), dir.path()).with_overwrite(true);

        let first = client.complete(&request("q")).await.unwrap();
        let second = client.complete(&request("q")).await.unwrap();
        assert_ne!(first.text(), second.text());
        assert_eq!(client.inner().calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn corrupt_entry_is_a_miss() {
        let dir = tempfile::tempdir().unwrap();
        let client = DiskCachedClient::new(Counting::new(), dir.path());
        let key = serde_json::to_string(&request("q")).unwrap();
        std::fs::write(client.entry_path(&key), "not json").unwrap();

        let response = client.complete(&request("q")).await.unwrap();
        assert_eq!(response.text(), "q #0");
        assert_eq!(client.inner().calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn errors_are_not_cached() {
        let dir = tempfile::tempdir().unwrap();
        let client = DiskCachedClient::new(Broken, dir.path());
        assert_eq!(client.complete(&request("q")).await.unwrap_err(), "HTTP 500");
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn cache_dir_is_created_on_first_write() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let client = DiskCachedClient::new(Counting::new(), &nested);
        client.complete(&request("q")).await.unwrap();
        assert_eq!(std::fs::read_dir(&nested).unwrap().count(), 1);
    }

    #[test]
    fn fnv1a_deterministic() {
        assert_eq!(fnv1a("hello world"), fnv1a("hello world"));
        assert_ne!(fnv1a("hello world"), fnv1a("different"));
    }
}
