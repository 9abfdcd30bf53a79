mod visibility;

pub use visibility::{resolve_visible_by_default, use_visible_by_default};
