use dioxus::prelude::*;
use dioxus_primitives::separator::Separator;

use crate::ui::MOBILE_UI_STYLES;
use crate::views::{CountdownSection, ProductsSection};

#[component]
pub fn App() -> Element {
    rsx! {
        style {
            "{MOBILE_UI_STYLES}"
        }

        div {
            class: "app-shell",

            header {
                class: "app-header",
                h1 { class: "app-title", "Tickshop" }
            }

            Separator {
                decorative: true,
                style: "height: 1px; background: #e5e7eb;",
            }

            main {
                class: "app-content",
                CountdownSection {}
                ProductsSection {}
            }
        }
    }
}
