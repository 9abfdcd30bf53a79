//! # Lazy Load Image
//!
//! A [Dioxus](https://dioxuslabs.com) image component that only requests its
//! source once it scrolls into view, optionally behind a placeholder with a
//! presentation effect.
//!
//! Sources that finished loading once are remembered in a process-wide
//! [`LoadCache`](state_management::LoadCache): later instances showing the
//! same source render the image right away, without placeholder.
//!
//! ```rust,ignore
//! use lazy_load_image::prelude::*;
//!
//! fn Gallery() -> Element {
//!     rsx! {
//!         EffectStylesheets {}
//!         LazyLoadImage {
//!             src: CCStr::from("photos/large.jpg"),
//!             effect: "blur",
//!             placeholder_src: CCStr::from("photos/tiny.jpg"),
//!             width: "640px",
//!             height: "480px",
//!         }
//!     }
//! }
//! ```

pub mod components;
pub mod helper_hooks;
pub mod state_management;
pub mod utils;

pub mod prelude {
    pub use super::components::{
        effects::{EffectStylesheets, ImageEffect},
        lazy_load_image::{LazyLoadImage, LazyLoadImageProps},
        visibility_gate::{DelayMethod, ScrollPosition, VisibilityGate},
    };
    pub use super::state_management::{LoadCacheProvider, SharedLoadCache};
    pub use super::utils::CCStr;
    pub use dioxus::prelude::*;
}
