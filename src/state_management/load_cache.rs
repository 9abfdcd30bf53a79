use std::{
    collections::HashSet,
    sync::{Arc, OnceLock},
};

use dioxus::prelude::*;
use parking_lot::RwLock;

/// Set of image sources known to have finished loading at least once.
///
/// Membership is monotonic: a source is never removed once inserted.
pub trait LoadCache: Send + Sync {
    /// Returns `true` only for sources previously passed to [`LoadCache::set_cache`]
    fn has_cache(&self, src: &str) -> bool;
    /// Marks `src` as loaded. Inserting a known source does nothing.
    fn set_cache(&self, src: &str);
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// In-memory cache, kept for the lifetime of the process.
#[derive(Debug, Default)]
pub struct MemoryLoadCache {
    sources: RwLock<HashSet<String>>,
}
impl MemoryLoadCache {
    pub fn new() -> Self {
        Self::default()
    }
}
impl LoadCache for MemoryLoadCache {
    fn has_cache(&self, src: &str) -> bool {
        self.sources.read().contains(src)
    }

    fn set_cache(&self, src: &str) {
        // Most calls are for known sources, avoid the write lock for those
        if self.has_cache(src) {
            return;
        }
        if self.sources.write().insert(src.to_owned()) {
            log::trace!("load_cache - {src} marked as loaded");
        }
    }

    fn len(&self) -> usize {
        self.sources.read().len()
    }
}

/// Cache used where there is no shared global context: nothing is ever
/// remembered, so every image behaves as never loaded before.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopLoadCache;
impl LoadCache for NoopLoadCache {
    fn has_cache(&self, _src: &str) -> bool {
        false
    }
    fn set_cache(&self, _src: &str) {}
    fn len(&self) -> usize {
        0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderEnvironment {
    /// Rendering inside a live client (desktop webview or browser)
    Client,
    /// Rendering without a shared global execution context (server side rendering)
    Server,
}
impl RenderEnvironment {
    pub fn detect() -> Self {
        if cfg!(feature = "ssr") {
            Self::Server
        } else {
            Self::Client
        }
    }

    pub fn has_global_context(self) -> bool {
        matches!(self, Self::Client)
    }
}

/// Handle on a [`LoadCache`] that can be stored in props and contexts.
///
/// Two handles are equal when they point to the same cache instance.
#[derive(Clone)]
pub struct SharedLoadCache(Arc<dyn LoadCache>);
impl SharedLoadCache {
    pub fn new(cache: impl LoadCache + 'static) -> Self {
        Self(Arc::new(cache))
    }

    /// A fresh, empty in-memory cache
    pub fn memory() -> Self {
        Self::new(MemoryLoadCache::new())
    }

    pub fn noop() -> Self {
        Self::new(NoopLoadCache)
    }

    /// Picks the cache implementation supported by `env`
    pub fn for_environment(env: RenderEnvironment) -> Self {
        if env.has_global_context() {
            Self::memory()
        } else {
            Self::noop()
        }
    }
}
impl PartialEq for SharedLoadCache {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::addr_eq(Arc::as_ptr(&self.0), Arc::as_ptr(&other.0))
    }
}
impl core::ops::Deref for SharedLoadCache {
    type Target = dyn LoadCache;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}
impl core::fmt::Debug for SharedLoadCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedLoadCache")
            .field("len", &self.0.len())
            .finish_non_exhaustive()
    }
}

static GLOBAL_LOAD_CACHE: OnceLock<SharedLoadCache> = OnceLock::new();

/// The process-wide cache, created on first use for the detected environment.
pub fn global_load_cache() -> SharedLoadCache {
    GLOBAL_LOAD_CACHE
        .get_or_init(|| {
            let env = RenderEnvironment::detect();
            log::debug!("load_cache - initializing global cache for {env:?}");
            SharedLoadCache::for_environment(env)
        })
        .clone()
}

/// Returns the cache provided by the closest [`LoadCacheProvider`], or the
/// global one.
pub fn use_load_cache() -> SharedLoadCache {
    use_hook(|| try_consume_context::<SharedLoadCache>().unwrap_or_else(global_load_cache))
}

/// Makes every image below it use `cache` instead of the global cache.
#[component]
pub fn LoadCacheProvider(cache: SharedLoadCache, children: Element) -> Element {
    use_context_provider(move || cache);
    rsx! {
        {children}
    }
}
