mod load_cache;
mod load_state;

pub use load_cache::{
    global_load_cache, use_load_cache, LoadCache, LoadCacheProvider, MemoryLoadCache,
    NoopLoadCache, RenderEnvironment, SharedLoadCache,
};
pub use load_state::{complete_load, LoadState, LoadStateStore};
