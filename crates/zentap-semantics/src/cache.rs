//! Process-scoped library cache with a single coalescing load.
//!
//! States: `Empty → Loading → Ready | Failed`. The first caller triggers
//! the fetch; callers arriving while the load is in flight attach to the
//! same load through a watch channel instead of issuing a duplicate fetch.
//! A failed load parks the cache in `Failed` and every subsequent caller
//! sees the hard error.

use std::sync::{Arc, Mutex};

use tokio::sync::watch;

use crate::error::{SemanticsError, SemanticsResult};
use crate::source::SemanticSource;
use crate::types::{SemanticLibrary, SemanticRecord};

type LoadOutcome = Option<Result<Arc<SemanticLibrary>, String>>;

enum CacheState {
    Empty,
    Loading(watch::Receiver<LoadOutcome>),
    Ready(Arc<SemanticLibrary>),
    Failed(String),
}

/// What one caller does after inspecting the state, decided entirely
/// under the lock.
enum LoadPlan {
    Done(SemanticsResult<Arc<SemanticLibrary>>),
    Attach(watch::Receiver<LoadOutcome>),
    Lead(watch::Sender<LoadOutcome>),
}

/// Cached, lazily loaded semantic library.
pub struct LibraryCache {
    state: Mutex<CacheState>,
}

impl LibraryCache {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(CacheState::Empty),
        }
    }

    /// Return the loaded library, fetching it on first use. Concurrent
    /// callers coalesce into one fetch.
    ///
    /// The state lock is released before any await so the returned future
    /// stays `Send` and callers can spawn loads onto worker tasks.
    pub async fn get_or_load(
        &self,
        source: &dyn SemanticSource,
    ) -> SemanticsResult<Arc<SemanticLibrary>> {
        let plan = {
            let mut state = self
                .state
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            match &*state {
                CacheState::Ready(library) => LoadPlan::Done(Ok(library.clone())),
                CacheState::Failed(message) => {
                    LoadPlan::Done(Err(SemanticsError::LoadFailed(message.clone())))
                }
                CacheState::Loading(rx) => LoadPlan::Attach(rx.clone()),
                CacheState::Empty => {
                    let (tx, rx) = watch::channel(None);
                    *state = CacheState::Loading(rx);
                    LoadPlan::Lead(tx)
                }
            }
        };

        let sender = match plan {
            LoadPlan::Done(outcome) => return outcome,
            LoadPlan::Attach(rx) => return Self::await_in_flight(rx).await,
            LoadPlan::Lead(tx) => tx,
        };

        let fetched = source.fetch().await;
        let outcome = {
            let mut state = self
                .state
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            match fetched {
                Ok(document) => {
                    let library = Arc::new(SemanticLibrary::from_document(document));
                    *state = CacheState::Ready(library.clone());
                    Ok(library)
                }
                Err(err) => {
                    let message = err.to_string();
                    tracing::warn!(error = %message, "semantic library load failed");
                    *state = CacheState::Failed(message.clone());
                    Err(err)
                }
            }
        };

        let shared = match &outcome {
            Ok(library) => Ok(library.clone()),
            Err(err) => Err(err.to_string()),
        };
        let _ = sender.send(Some(shared));
        outcome
    }

    /// Resolve a key through an already-loaded (or now loading) library.
    pub async fn resolve(
        &self,
        source: &dyn SemanticSource,
        binary_key: &str,
    ) -> SemanticsResult<Option<SemanticRecord>> {
        let library = self.get_or_load(source).await?;
        Ok(library.resolve(binary_key).cloned())
    }

    async fn await_in_flight(
        mut rx: watch::Receiver<LoadOutcome>,
    ) -> SemanticsResult<Arc<SemanticLibrary>> {
        loop {
            if let Some(outcome) = rx.borrow().clone() {
                return outcome.map_err(SemanticsError::LoadFailed);
            }
            if rx.changed().await.is_err() {
                return Err(SemanticsError::LoadFailed(
                    "in-flight load abandoned".to_string(),
                ));
            }
        }
    }
}

impl Default for LibraryCache {
    fn default() -> Self {
        Self::new()
    }
}
