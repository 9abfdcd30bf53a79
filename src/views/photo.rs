use crate::prelude::*;

use crate::views::{photo_placeholder_src, photo_src};

#[component]
pub fn PhotoView(photo_id: u32) -> Element {
    log::debug!("PhotoView {photo_id} Rendered");

    use_drop(move || log::debug!("PhotoView {photo_id} Dropped"));

    rsx! {
        h2 { "Photo {photo_id}" }
        // Same source as the gallery thumbnail: renders at once if it loaded there
        LazyLoadImage {
            key: "{photo_id}-thumb",
            src: CCStr::from(photo_src(photo_id, 320, 240)),
            effect: "opacity",
            width: "320px",
            height: "240px",
        }
        LazyLoadImage {
            key: "{photo_id}-full",
            src: CCStr::from(photo_src(photo_id, 1280, 960)),
            alt: CCStr::from(format!("Photo {photo_id}")),
            effect: "blur",
            placeholder_src: CCStr::from(photo_placeholder_src(photo_id)),
            delay_method: DelayMethod::Debounce,
            delay_time: 150,
            width: "1280px",
            height: "960px",
        }
    }
}
