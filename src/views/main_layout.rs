use crate::prelude::*;

use crate::Route;

#[component]
pub fn MainLayout() -> Element {
    log::debug!("MainLayout Rendered");

    use_drop(|| log::debug!("MainLayout Dropped"));

    rsx! {
        header { padding: "1rem", border_bottom: "1px solid #ccc",
            Link { to: Route::GalleryView {}, "Gallery" }
        }
        main { padding: "1rem", Outlet::<Route> {} }
    }
}
