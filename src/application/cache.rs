//! Memoizes one `SessionRuntime` per canonical tool set and remembers which
//! runtime owns each session.

use super::agent::AgentLauncher;
use super::catalog::AgentCatalog;
use super::facilitator::FacilitatorFactory;
use super::runtime::SessionRuntime;
use lru::LruCache;
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::num::NonZeroUsize;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// Order-independent identity of a tool set: the distinct names, sorted and comma-joined.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CacheKey(String);

impl CacheKey {
    pub const SEPARATOR: &'static str = ",";

    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let sorted: BTreeSet<String> = names
            .into_iter()
            .map(|name| name.as_ref().to_string())
            .collect();
        Self(sorted.into_iter().collect::<Vec<_>>().join(Self::SEPARATOR))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Process-wide runtime cache and session index.
///
/// The runtime map is guarded by one mutex held across check-and-build, so a
/// key is built at most once. The key is derived from catalog-resolved names,
/// which bounds the map by the subsets of the catalog. The session index is an
/// LRU; sessions pushed out of it are reported as unknown.
pub struct AgentInstanceCache {
    factory: FacilitatorFactory,
    launcher: Arc<dyn AgentLauncher>,
    runtimes: Mutex<HashMap<CacheKey, Arc<SessionRuntime>>>,
    sessions: Mutex<LruCache<String, CacheKey>>,
}

impl AgentInstanceCache {
    pub fn new(
        factory: FacilitatorFactory,
        launcher: Arc<dyn AgentLauncher>,
        session_capacity: NonZeroUsize,
    ) -> Self {
        Self {
            factory,
            launcher,
            runtimes: Mutex::new(HashMap::new()),
            sessions: Mutex::new(LruCache::new(session_capacity)),
        }
    }

    pub fn catalog(&self) -> &AgentCatalog {
        self.factory.catalog()
    }

    /// Canonical key for a requested selection, after dropping unknown names.
    pub fn key_for<S: AsRef<str>>(&self, tool_names: &[S]) -> CacheKey {
        CacheKey::from_names(
            self.factory
                .resolve(tool_names)
                .iter()
                .map(|tool| tool.name.as_str()),
        )
    }

    /// Return the runtime for this tool set, building it on first use.
    pub async fn get_or_create<S: AsRef<str>>(&self, tool_names: &[S]) -> Arc<SessionRuntime> {
        let tools = self.factory.resolve(tool_names);
        let key = CacheKey::from_names(tools.iter().map(|tool| tool.name.as_str()));

        let mut runtimes = self.runtimes.lock().await;
        if let Some(runtime) = runtimes.get(&key) {
            debug!(key = %key, "Reusing cached agent runtime");
            return Arc::clone(runtime);
        }

        let build = self.factory.assemble(tools);
        let runner = self.launcher.launch(Arc::clone(&build.agent));
        let runtime = Arc::new(SessionRuntime::new(key.clone(), build, runner));
        runtimes.insert(key.clone(), Arc::clone(&runtime));
        info!(key = %key, cached = runtimes.len(), "Built agent runtime");
        runtime
    }

    /// Record which runtime owns `session_id`. Called once, right after creation.
    pub async fn bind_session(&self, session_id: impl Into<String>, key: CacheKey) {
        let session_id = session_id.into();
        let mut sessions = self.sessions.lock().await;
        match sessions.push(session_id.clone(), key) {
            Some((evicted, _)) if evicted != session_id => {
                warn!(session_id = evicted.as_str(), "Evicted least recently used session");
            }
            Some(_) => warn!(session_id = session_id.as_str(), "Session was bound twice"),
            None => {}
        }
    }

    /// Key bound to `session_id`, or `None` for an unknown session.
    pub async fn lookup(&self, session_id: &str) -> Option<CacheKey> {
        self.sessions.lock().await.get(session_id).cloned()
    }

    pub async fn runtime(&self, key: &CacheKey) -> Option<Arc<SessionRuntime>> {
        self.runtimes.lock().await.get(key).cloned()
    }

    /// Runtime owning `session_id`, if the session is known.
    pub async fn runtime_for_session(&self, session_id: &str) -> Option<Arc<SessionRuntime>> {
        let key = self.lookup(session_id).await?;
        self.runtime(&key).await
    }

    pub async fn runtime_count(&self) -> usize {
        self.runtimes.lock().await.len()
    }

    pub async fn session_count(&self) -> usize {
        self.sessions.lock().await.len()
    }
}
