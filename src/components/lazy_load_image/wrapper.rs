use crate::prelude::*;

use crate::utils::CCStr;

pub const WRAPPER_BASE_CLASS: &str = "lazy-load-image-background";
pub const LOADED_CLASS: &str = "lazy-load-image-loaded";

/// Class of the placeholder container: caller class, base class, effect and,
/// once loaded, the loaded marker. Empty parts are skipped.
pub fn wrapper_class(wrapper_class_name: Option<&str>, effect: &str, loaded: bool) -> String {
    [
        wrapper_class_name.unwrap_or_default(),
        WRAPPER_BASE_CLASS,
        effect,
        if loaded { LOADED_CLASS } else { "" },
    ]
    .into_iter()
    .map(str::trim)
    .filter(|part| !part.is_empty())
    .collect::<Vec<_>>()
    .join(" ")
}

pub fn wrapper_background(placeholder_src: Option<&str>) -> Option<String> {
    placeholder_src.map(|src| format!("url({src})"))
}

/// Container showing the placeholder image behind the (not yet loaded) image.
///
/// Its size mirrors the image dimensions so the layout does not shift when the
/// real image appears.
#[component]
pub fn PlaceholderWrapper(
    wrapper_class_name: Option<CCStr>,
    #[props(default)] effect: CCStr,
    placeholder_src: Option<CCStr>,
    #[props(default = false)] loaded: bool,
    width: Option<String>,
    height: Option<String>,
    children: Element,
) -> Element {
    let class = wrapper_class(wrapper_class_name.as_deref(), &effect, loaded);
    let background_image = wrapper_background(placeholder_src.as_deref());

    rsx! {
        span {
            class,
            background_image,
            background_size: "100% 100%",
            color: "transparent",
            display: "inline-block",
            width,
            height,
            {children}
        }
    }
}
