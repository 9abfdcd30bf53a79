#![windows_subsystem = "windows"]
mod views;

mod prelude {
    pub use lazy_load_image::prelude::*;
}

use serde::{Deserialize, Serialize};

use prelude::*;

use views::{gallery::GalleryView, main_layout::MainLayout, photo::PhotoView};

#[derive(Clone, Routable, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[rustfmt::skip]
pub enum Route {
    #[layout(MainLayout)]
        #[route("/")]
        GalleryView {},
        #[route("/photo/:photo_id")]
        PhotoView { photo_id: u32 },
    #[end_layout]
    #[route("/:..route")]
    PageNotFound { route: Vec<String> },
}

static TITLE: &'static str = "Lazy Load Image";

#[allow(non_snake_case)]
fn App() -> Element {
    log::debug!("App reload");

    use_drop(|| log::debug!("App Dropped"));

    rsx! {
        document::Title { "{TITLE}" }
        EffectStylesheets {}

        div { id: "app", Router::<Route> {} }
    }
}

#[component]
fn PageNotFound(route: Vec<String>) -> Element {
    rsx! {
        h1 { "Page not found" }
        p { "We are terribly sorry, but the page you requested doesn't exist." }
        pre { color: "red", "log:\nattemped to navigate to: {route:?}" }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp_micros()
        .init();

    log::info!("starting demo");
    use dioxus::desktop::{Config, WindowBuilder};
    LaunchBuilder::desktop()
        .with_cfg(
            Config::new().with_menu(None).with_window(
                WindowBuilder::new()
                    .with_title(TITLE)
                    .with_inner_size(dioxus::desktop::LogicalSize::new(1280, 800))
                    .with_resizable(true),
            ),
        )
        .launch(App)
}
