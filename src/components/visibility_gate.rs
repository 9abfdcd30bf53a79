use crate::prelude::*;

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::utils::{log_error, CCStr};

/// How viewport changes are rate limited before checking visibility
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DelayMethod {
    /// At most one check per delay period
    #[default]
    Throttle,
    /// One check once the viewport stayed still for the delay period
    Debounce,
}

/// Scroll offsets tracked by the caller, used instead of the window ones
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScrollPosition {
    pub x: f64,
    pub y: f64,
}

/// Geometry of the gated element, as reported by the page.
///
/// `top` and `left` are document coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewportSample {
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
    pub scroll_x: f64,
    pub scroll_y: f64,
    pub viewport_width: f64,
    pub viewport_height: f64,
    /// Milliseconds since page load
    pub at_ms: f64,
}
impl ViewportSample {
    /// Whether the element intersects the viewport grown by `threshold` pixels
    /// on every side
    pub fn is_visible(&self, threshold: f64, scroll_position: Option<ScrollPosition>) -> bool {
        let (scroll_x, scroll_y) = scroll_position
            .map(|p| (p.x, p.y))
            .unwrap_or((self.scroll_x, self.scroll_y));

        self.top <= scroll_y + self.viewport_height + threshold
            && self.top + self.height >= scroll_y - threshold
            && self.left <= scroll_x + self.viewport_width + threshold
            && self.left + self.width >= scroll_x - threshold
    }
}

/// Rate limits viewport samples according to a [`DelayMethod`].
///
/// The very first sample always passes so an element already in view is
/// revealed without waiting.
#[derive(Debug, Clone)]
pub struct DelayFilter {
    method: DelayMethod,
    delay: Duration,
    last_accepted_ms: Option<f64>,
    pending: Option<ViewportSample>,
}
impl DelayFilter {
    pub fn new(method: DelayMethod, delay: Duration) -> Self {
        Self {
            method,
            delay,
            last_accepted_ms: None,
            pending: None,
        }
    }

    /// How long to wait for a new sample before flushing the pending one
    pub fn wait_for(&self) -> Duration {
        match (self.method, self.last_accepted_ms, self.pending) {
            (DelayMethod::Throttle, Some(last), Some(pending)) => {
                let elapsed = (pending.at_ms - last).max(0.0) as u64;
                self.delay.saturating_sub(Duration::from_millis(elapsed))
            }
            _ => self.delay,
        }
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Returns the sample to check now, if any.
    ///
    /// A throttled sample is kept as pending so the last viewport change of a
    /// burst is still checked once the period ends.
    pub fn push(&mut self, sample: ViewportSample) -> Option<ViewportSample> {
        let Some(last) = self.last_accepted_ms else {
            return self.accept(sample);
        };
        match self.method {
            DelayMethod::Throttle if sample.at_ms - last >= self.delay.as_millis() as f64 => {
                self.accept(sample)
            }
            DelayMethod::Throttle | DelayMethod::Debounce => {
                self.pending = Some(sample);
                None
            }
        }
    }

    /// Called once no sample arrived for [`DelayFilter::wait_for`]
    pub fn flush(&mut self) -> Option<ViewportSample> {
        let sample = self.pending.take()?;
        self.accept(sample)
    }

    fn accept(&mut self, sample: ViewportSample) -> Option<ViewportSample> {
        self.last_accepted_ms = Some(sample.at_ms);
        self.pending = None;
        Some(sample)
    }
}

const VIEWPORT_WATCH_JS: &str = r#"
    const element = document.getElementById("__GATE_ID__");
    if (element) {
        let stop;
        const stopped = new Promise((resolve) => (stop = resolve));
        const report = () => {
            if (!element.isConnected) {
                stop();
                return;
            }
            const rect = element.getBoundingClientRect();
            dioxus.send({
                top: rect.top + window.scrollY,
                left: rect.left + window.scrollX,
                width: rect.width,
                height: rect.height,
                scrollX: window.scrollX,
                scrollY: window.scrollY,
                viewportWidth: window.innerWidth,
                viewportHeight: window.innerHeight,
                atMs: performance.now(),
            });
        };
        window.addEventListener("__UNMOUNT_EVENT__", stop, { once: true });
        window.addEventListener("scroll", report, { passive: true });
        window.addEventListener("resize", report);
        report();
        await Promise.race([dioxus.recv(), stopped]);
        window.removeEventListener("scroll", report);
        window.removeEventListener("resize", report);
        window.removeEventListener("__UNMOUNT_EVENT__", stop);
    }
"#;

fn unmount_event(id: uuid::Uuid) -> String {
    format!("lazy-load-image-unmount-{id}")
}

fn viewport_watch_script(id: uuid::Uuid) -> String {
    VIEWPORT_WATCH_JS
        .replace("__GATE_ID__", &id.to_string())
        .replace("__UNMOUNT_EVENT__", &unmount_event(id))
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct GateSettings {
    threshold: f64,
    delay_method: DelayMethod,
    delay: Duration,
    scroll_position: Option<ScrollPosition>,
}

/// Resolves once a viewport sample shows the element, or fails if the page
/// stops reporting.
async fn wait_until_visible(
    eval: &mut document::Eval,
    settings: GateSettings,
) -> Result<ViewportSample, document::EvalError> {
    let mut filter = DelayFilter::new(settings.delay_method, settings.delay);
    loop {
        let sample = if filter.has_pending() {
            match tokio::time::timeout(filter.wait_for(), eval.recv::<ViewportSample>()).await {
                Ok(received) => filter.push(received?),
                Err(_quiet_period) => filter.flush(),
            }
        } else {
            filter.push(eval.recv::<ViewportSample>().await?)
        };
        if let Some(sample) = sample {
            if sample.is_visible(settings.threshold, settings.scroll_position) {
                return Ok(sample);
            }
        }
    }
}

/// Renders `children` only once its position enters the viewport.
///
/// Until then a sized `span` holding `placeholder` stands in. `before_load`
/// is called once, right before the children are first rendered.
#[component]
pub fn VisibilityGate(
    #[props(default = 100)] threshold: u32,
    #[props(default)] delay_method: DelayMethod,
    #[props(default = 300)] delay_time: u64,
    scroll_position: Option<ScrollPosition>,
    class: Option<CCStr>,
    style: Option<CCStr>,
    width: Option<String>,
    height: Option<String>,
    placeholder: Option<Element>,
    before_load: Option<EventHandler<()>>,
    #[props(default = false)] visible_by_default: bool,
    children: Element,
) -> Element {
    let id = use_hook(|| uuid::Uuid::new_v4());
    let mut visible = use_signal(|| visible_by_default);

    log::debug!("VisibilityGate {id} Rendered");

    let settings = GateSettings {
        threshold: threshold as f64,
        delay_method,
        delay: Duration::from_millis(delay_time),
        scroll_position,
    };
    use_effect(move || {
        if *visible.peek() {
            if let Some(before_load) = before_load {
                before_load.call(());
            }
            return;
        }
        spawn(async move {
            let mut eval = document::eval(&viewport_watch_script(id));
            match wait_until_visible(&mut eval, settings).await {
                Ok(sample) => {
                    log::debug!("VisibilityGate {id} visible at {sample:?}");
                    if let Err(e) = eval.send(true) {
                        log_error(e);
                    }
                    if let Some(before_load) = before_load {
                        before_load.call(());
                    }
                    visible.set(true);
                }
                Err(e) => {
                    log_error(format!("VisibilityGate {id} stopped watching: {e}"));
                }
            }
        });
    });

    use_drop(move || {
        log::debug!("VisibilityGate {id} Dropped");
        // Releases the page listeners of a watch still waiting for visibility
        document::eval(&format!(
            r#"window.dispatchEvent(new Event("{}"));"#,
            unmount_event(id)
        ));
    });

    if visible() || visible_by_default {
        return children;
    }

    rsx! {
        span {
            id: "{id}",
            class: class.as_deref(),
            style: style.as_deref(),
            display: "inline-block",
            width,
            height,
            if let Some(placeholder) = placeholder {
                {placeholder}
            }
        }
    }
}
