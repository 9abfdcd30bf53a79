use crate::prelude::*;

use crate::{
    views::{photo_placeholder_src, photo_src, PHOTO_IDS},
    Route,
};

/// Grid of lazily loaded photos, one effect per column.
///
/// Coming back to this view after opening a photo shows the already loaded
/// photos right away.
#[component]
pub fn GalleryView() -> Element {
    log::debug!("GalleryView Rendered");

    let mut loaded_count = use_signal(|| 0usize);

    use_drop(|| log::debug!("GalleryView Dropped"));

    let effects = ImageEffect::ALL;

    rsx! {
        p { "{loaded_count} photos loaded since this view opened" }
        div {
            display: "grid",
            grid_template_columns: "repeat(3, 320px)",
            gap: "1rem",
            for (i, photo_id) in PHOTO_IDS.into_iter().enumerate() {
                Link {
                    key: "{photo_id}",
                    to: Route::PhotoView { photo_id },
                    LazyLoadImage {
                        src: CCStr::from(photo_src(photo_id, 320, 240)),
                        alt: CCStr::from(format!("Photo {photo_id}")),
                        effect: effects[i % effects.len()].class(),
                        placeholder_src: CCStr::from(photo_placeholder_src(photo_id)),
                        width: "320px",
                        height: "240px",
                        after_load: move |_| *loaded_count.write() += 1,
                    }
                }
            }
        }
    }
}
