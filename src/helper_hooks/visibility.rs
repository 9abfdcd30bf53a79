use crate::state_management::{use_load_cache, LoadCache};

/// Whether an image skips lazy loading altogether.
///
/// An explicit `true` wins; otherwise an image whose source already loaded
/// once in this process is visible by default. A missing source is never
/// considered cached.
pub fn resolve_visible_by_default(
    explicit: Option<bool>,
    src: Option<&str>,
    cache: &dyn LoadCache,
) -> bool {
    if explicit == Some(true) {
        return true;
    }
    match src {
        Some(src) => {
            let hit = cache.has_cache(src);
            if hit {
                log::trace!("resolve_visible_by_default - cache hit for {src}");
            }
            hit
        }
        None => false,
    }
}

/// [`resolve_visible_by_default`] against the cache in scope.
///
/// Evaluated on every render since the cache may change between renders.
pub fn use_visible_by_default(explicit: Option<bool>, src: Option<&str>) -> bool {
    let cache = use_load_cache();
    resolve_visible_by_default(explicit, src, &*cache)
}
