use crate::prelude::*;

pub mod attributes;
pub mod wrapper;

use crate::{
    components::visibility_gate::{DelayMethod, ScrollPosition, VisibilityGate},
    helper_hooks::use_visible_by_default,
    state_management::{
        complete_load, use_load_cache, LoadCache, LoadState, LoadStateStore, SharedLoadCache,
    },
    utils::CCStr,
};

use attributes::ImgAttributes;
use wrapper::PlaceholderWrapper;

/// What a [`LazyLoadImage`] renders on a given render pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderPlan {
    /// The `img` element alone
    Bare,
    /// The `img` element behind a [`VisibilityGate`], inside a placeholder
    /// container
    Wrapped,
}
impl RenderPlan {
    /// Plan of the first render of an instance
    pub fn choose(effect: &str, placeholder_src: Option<&str>, visible_by_default: bool) -> Self {
        let has_placeholder = placeholder_src.is_some_and(|src| !src.is_empty());
        if visible_by_default || (effect.is_empty() && !has_placeholder) {
            Self::Bare
        } else {
            Self::Wrapped
        }
    }

    /// Plan of a later render, given the plan the instance was mounted with.
    ///
    /// A wrapped instance stays wrapped, with the loaded marker once the
    /// image loaded, so the `img` keeps its place in the tree.
    pub fn settle(self, mounted: RenderPlan) -> Self {
        match mounted {
            Self::Wrapped => Self::Wrapped,
            Self::Bare => self,
        }
    }
}

/// Handles the native `load` event of the image: the one-shot transition of
/// the instance, then the caller's own `onload`.
struct ImageLoad<S, E: 'static> {
    load_state: S,
    cache: SharedLoadCache,
    src: Option<CCStr>,
    after_load: Option<EventHandler<()>>,
    onload: Option<EventHandler<E>>,
}
impl<S: LoadStateStore, E: 'static> ImageLoad<S, E> {
    /// Returns `true` if this event completed the load
    fn handle(&mut self, event: E) -> bool {
        let Self {
            load_state,
            cache,
            src,
            after_load,
            onload,
        } = self;
        let completed = complete_load(
            load_state,
            || {
                if let Some(after_load) = after_load {
                    after_load.call(());
                }
            },
            || match src.as_deref() {
                Some(src) => cache.set_cache(src),
                None => log::debug!("LazyLoadImage - loaded without src, nothing to cache"),
            },
        );
        if let Some(onload) = onload {
            onload.call(event);
        }
        completed
    }
}

#[doc = "Properties for the [`LazyLoadImage`] component."]
#[derive(Props, Clone, PartialEq)]
pub struct LazyLoadImageProps {
    /// Image source, also the key of the load cache
    pub src: Option<CCStr>,
    pub alt: Option<CCStr>,
    pub srcset: Option<CCStr>,
    /// Forwarded as the `sizes` attribute of the `img` element
    pub sizes: Option<CCStr>,

    /// Class of a presentation effect, e.g. `blur`
    #[props(into, default)]
    pub effect: CCStr,
    /// Background image of the placeholder container
    pub placeholder_src: Option<CCStr>,
    /// Element shown by the gate while the image is not visible
    pub placeholder: Option<Element>,
    pub wrapper_class_name: Option<CCStr>,
    /// Skip lazy loading. Images already loaded once are visible by default.
    pub visible_by_default: Option<bool>,

    #[props(default = 100)]
    pub threshold: u32,
    #[props(default)]
    pub delay_method: DelayMethod,
    /// Milliseconds
    #[props(default = 300)]
    pub delay_time: u64,
    pub scroll_position: Option<ScrollPosition>,

    pub before_load: Option<EventHandler<()>>,
    /// Called once, when the image finished loading
    pub after_load: Option<EventHandler<()>>,

    pub onload: Option<EventHandler<Event<ImageData>>>,
    pub onerror: Option<EventHandler<Event<ImageData>>>,

    #[props(extends = GlobalAttributes)]
    pub attributes: Vec<Attribute>,
}

/// An image whose source is only requested once it scrolls into view.
///
/// With an `effect` or a `placeholder_src`, the image is wrapped in a
/// placeholder container, marked `lazy-load-image-loaded` once the image
/// loaded. Images already loaded once in the
/// process, or marked `visible_by_default`, render right away without any
/// placeholder.
///
/// # Example
///
/// ```rust,ignore
/// rsx! {
///     LazyLoadImage {
///         src: CCStr::from("photos/large.jpg"),
///         alt: CCStr::from("A mountain"),
///         effect: "blur",
///         placeholder_src: CCStr::from("photos/tiny.jpg"),
///         width: "640px",
///         height: "480px",
///     }
/// }
/// ```
#[allow(non_snake_case)]
pub fn LazyLoadImage(props: LazyLoadImageProps) -> Element {
    let LazyLoadImageProps {
        src,
        alt,
        srcset,
        sizes,
        effect,
        placeholder_src,
        placeholder,
        wrapper_class_name,
        visible_by_default,
        threshold,
        delay_method,
        delay_time,
        scroll_position,
        before_load,
        after_load,
        onload,
        onerror,
        attributes,
    } = props;

    let name = src.clone().unwrap_or_else(|| CCStr::from("<no src>"));
    log::debug!("LazyLoadImage {name} Rendered");

    let cache = use_load_cache();
    let load_state = use_signal(LoadState::default);
    let visible_by_default = use_visible_by_default(visible_by_default, src.as_deref());

    use_drop(move || log::debug!("LazyLoadImage {name} Dropped"));

    let (img_attributes, _lazy_only) = ImgAttributes::partition(attributes);
    let width = img_attributes.width();
    let height = img_attributes.height();
    let class = img_attributes.class().map(CCStr::from);
    let style = img_attributes.style().map(CCStr::from);
    let mut img_attributes = img_attributes.into_inner();
    if let Some(sizes) = sizes {
        img_attributes.push(Attribute::new("sizes", sizes.to_string(), None, false));
    }

    let mut image_load = ImageLoad {
        load_state,
        cache,
        src: src.clone(),
        after_load,
        onload,
    };

    let image = rsx! {
        img {
            src: src.as_deref(),
            alt: alt.as_deref(),
            srcset: srcset.as_deref(),
            onload: move |event: Event<ImageData>| {
                image_load.handle(event);
            },
            onerror: move |event: Event<ImageData>| {
                if let Some(onerror) = onerror {
                    onerror.call(event);
                }
            },
            ..img_attributes,
        }
    };

    let loaded = load_state().is_loaded();
    let current_plan = RenderPlan::choose(&effect, placeholder_src.as_deref(), visible_by_default);
    let mounted_plan = use_hook(|| current_plan);
    match current_plan.settle(mounted_plan) {
        RenderPlan::Bare => image,
        RenderPlan::Wrapped => rsx! {
            PlaceholderWrapper {
                wrapper_class_name,
                effect,
                placeholder_src,
                loaded,
                width: width.clone(),
                height: height.clone(),
                VisibilityGate {
                    threshold,
                    delay_method,
                    delay_time,
                    scroll_position,
                    class,
                    style,
                    width,
                    height,
                    placeholder,
                    before_load,
                    visible_by_default: visible_by_default || loaded,
                    {image}
                }
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::cell::Cell;

    use crate::helper_hooks::resolve_visible_by_default;
    use crate::state_management::{LoadCacheProvider, MemoryLoadCache};

    use wrapper::{LOADED_CLASS, WRAPPER_BASE_CLASS};

    #[derive(Props, Clone, PartialEq)]
    struct HarnessProps {
        cache: SharedLoadCache,
        content: fn() -> Element,
    }

    #[allow(non_snake_case)]
    fn Harness(props: HarnessProps) -> Element {
        rsx! {
            LoadCacheProvider { cache: props.cache, {(props.content)()} }
        }
    }

    fn render(cache: &SharedLoadCache, content: fn() -> Element) -> String {
        let mut dom = VirtualDom::new_with_props(
            Harness,
            HarnessProps {
                cache: cache.clone(),
                content,
            },
        );
        dom.rebuild_in_place();
        dioxus_ssr::render(&dom)
    }

    fn blurred_a() -> Element {
        rsx! {
            LazyLoadImage {
                src: CCStr::from("a.png"),
                alt: CCStr::from("A"),
                effect: "blur",
                placeholder_src: CCStr::from("p.png"),
                width: "300px",
            }
        }
    }

    #[test]
    fn plan_bypasses_the_wrapper_when_visible() {
        assert_eq!(RenderPlan::choose("blur", Some("p.png"), false), RenderPlan::Wrapped);
        assert_eq!(RenderPlan::choose("blur", None, false), RenderPlan::Wrapped);
        assert_eq!(RenderPlan::choose("", Some("p.png"), false), RenderPlan::Wrapped);

        assert_eq!(RenderPlan::choose("blur", Some("p.png"), true), RenderPlan::Bare);
    }

    #[test]
    fn plan_without_presentation_is_always_bare() {
        for visible in [false, true] {
            assert_eq!(RenderPlan::choose("", None, visible), RenderPlan::Bare);
            assert_eq!(RenderPlan::choose("", Some(""), visible), RenderPlan::Bare);
        }
    }

    #[test]
    fn wrapped_instances_stay_wrapped() {
        // The source got cached by this very instance
        let current = RenderPlan::choose("blur", Some("p.png"), true);
        assert_eq!(current, RenderPlan::Bare);
        assert_eq!(current.settle(RenderPlan::Wrapped), RenderPlan::Wrapped);

        assert_eq!(RenderPlan::Bare.settle(RenderPlan::Bare), RenderPlan::Bare);
        assert_eq!(RenderPlan::Wrapped.settle(RenderPlan::Bare), RenderPlan::Wrapped);
    }

    #[test]
    fn first_visit_renders_the_placeholder() {
        let cache = SharedLoadCache::memory();
        let html = render(&cache, blurred_a);

        assert!(html.contains("lazy-load-image-background blur"));
        assert!(!html.contains(LOADED_CLASS));
        assert!(html.contains("url(p.png)"));
        // Gate is closed, the image is not requested yet
        assert!(!html.contains("<img"));
        assert!(!html.contains("a.png"));
    }

    #[test]
    fn cached_source_renders_the_bare_image() {
        let cache = SharedLoadCache::memory();
        cache.set_cache("a.png");
        let html = render(&cache, blurred_a);

        assert!(html.contains("<img"));
        assert!(html.contains("a.png"));
        assert!(html.contains("300px"));
        assert!(!html.contains(WRAPPER_BASE_CLASS));
        assert!(!html.contains("p.png"));
        assert!(!html.contains("blur"));
    }

    #[test]
    fn explicit_visibility_renders_the_bare_image() {
        fn content() -> Element {
            rsx! {
                LazyLoadImage {
                    src: CCStr::from("a.png"),
                    effect: "blur",
                    placeholder_src: CCStr::from("p.png"),
                    visible_by_default: true,
                }
            }
        }
        let html = render(&SharedLoadCache::memory(), content);

        assert!(html.contains("<img"));
        assert!(!html.contains(WRAPPER_BASE_CLASS));
    }

    #[test]
    fn no_presentation_renders_the_bare_image() {
        fn content() -> Element {
            rsx! {
                LazyLoadImage {
                    src: CCStr::from("a.png"),
                    alt: CCStr::from("A"),
                    sizes: CCStr::from("50vw"),
                    class: "rounded",
                }
            }
        }
        let html = render(&SharedLoadCache::memory(), content);

        assert!(html.contains("<img"));
        assert!(html.contains("rounded"));
        assert!(html.contains("alt=\"A\""));
        assert!(html.contains("sizes=\"50vw\""));
        assert!(!html.contains(WRAPPER_BASE_CLASS));
    }

    #[test]
    fn lazy_only_settings_never_reach_the_img() {
        fn content() -> Element {
            rsx! {
                LazyLoadImage {
                    src: CCStr::from("a.png"),
                    effect: "blur",
                    placeholder_src: CCStr::from("p.png"),
                    wrapper_class_name: CCStr::from("frame"),
                    threshold: 50,
                    delay_time: 10,
                    visible_by_default: true,
                }
            }
        }
        let html = render(&SharedLoadCache::memory(), content);

        assert!(html.contains("<img"));
        for leaked in [
            "effect",
            "blur",
            "placeholder",
            "p.png",
            "frame",
            "threshold",
            "delay",
            "visible",
            "wrapper",
        ] {
            assert!(!html.contains(leaked), "`{leaked}` leaked into {html}");
        }
    }

    #[test]
    fn missing_src_does_not_break_rendering() {
        fn content() -> Element {
            rsx! {
                LazyLoadImage { effect: "blur" }
            }
        }
        let html = render(&SharedLoadCache::memory(), content);
        assert!(html.contains("lazy-load-image-background blur"));
    }

    thread_local! {
        static AFTER_LOAD_CALLS: Cell<u32> = const { Cell::new(0) };
        static FORWARDED_LOADS: Cell<u32> = const { Cell::new(0) };
    }

    /// Fires the load handler of a wrapped instance twice, as a browser
    /// sending duplicate `load` events would.
    #[allow(non_snake_case)]
    fn DoubleLoad() -> Element {
        let cache = use_load_cache();
        let load_state = use_signal(LoadState::default);
        let completed = use_hook(move || {
            let mut image_load = ImageLoad {
                load_state,
                cache,
                src: Some(CCStr::from("a.png")),
                after_load: Some(EventHandler::new(|_: ()| {
                    AFTER_LOAD_CALLS.with(|calls| calls.set(calls.get() + 1))
                })),
                onload: Some(EventHandler::new(|event: &'static str| {
                    assert_eq!(event, "load");
                    FORWARDED_LOADS.with(|calls| calls.set(calls.get() + 1))
                })),
            };
            [image_load.handle("load"), image_load.handle("load")]
        });

        rsx! {
            PlaceholderWrapper {
                effect: CCStr::from("blur"),
                placeholder_src: CCStr::from("p.png"),
                loaded: load_state.peek().is_loaded(),
                "{completed:?}"
            }
        }
    }

    #[test]
    fn load_event_completes_once_and_reaches_the_scoped_cache() {
        fn content() -> Element {
            rsx! {
                DoubleLoad {}
            }
        }
        let cache = SharedLoadCache::memory();
        let html = render(&cache, content);

        assert_eq!(AFTER_LOAD_CALLS.with(Cell::get), 1);
        // The caller's onload sees every event
        assert_eq!(FORWARDED_LOADS.with(Cell::get), 2);
        assert!(cache.has_cache("a.png"));
        assert_eq!(cache.len(), 1);

        assert!(html.contains("[true, false]"));
        assert!(html.contains("lazy-load-image-background blur lazy-load-image-loaded"));
    }

    #[test]
    fn load_then_revisit_scenario() {
        let cache = MemoryLoadCache::new();
        let after_load_calls = Cell::new(0);
        let mut state = LoadState::default();

        let visible = resolve_visible_by_default(None, Some("a.png"), &cache);
        assert!(!visible);
        let mounted = RenderPlan::choose("blur", Some("p.png"), visible);
        assert_eq!(mounted, RenderPlan::Wrapped);

        // Native load event fired twice
        for _ in 0..2 {
            complete_load(
                &mut state,
                || after_load_calls.set(after_load_calls.get() + 1),
                || cache.set_cache("a.png"),
            );
        }
        assert_eq!(after_load_calls.get(), 1);
        assert!(state.is_loaded());
        assert!(cache.has_cache("a.png"));
        assert_eq!(cache.len(), 1);

        // The loaded instance keeps its wrapper, now with the loaded marker
        let visible = resolve_visible_by_default(None, Some("a.png"), &cache);
        let current = RenderPlan::choose("blur", Some("p.png"), visible);
        assert_eq!(current.settle(mounted), RenderPlan::Wrapped);
        assert!(wrapper::wrapper_class(None, "blur", state.is_loaded()).ends_with(LOADED_CLASS));

        // A second instance with the same source
        let second = RenderPlan::choose("blur", Some("p.png"), visible);
        assert_eq!(second.settle(second), RenderPlan::Bare);
    }
}
