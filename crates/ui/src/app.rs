use dioxus::prelude::*;
use dioxus_router::Router;

use crate::context::{ThemeSignal, use_theme_provider};
use crate::routes::Route;

#[component]
pub fn App() -> Element {
    let ThemeSignal(theme) = use_theme_provider();

    rsx! {
        document::Stylesheet { href: asset!("/assets/style.css") }

        document::Title { "Exam Prep Dashboard" }

        div { class: "app-root", "data-theme": "{theme}",
            ErrorBoundary {
                handle_error: |errors: ErrorContext| rsx! {
                    div { class: "fatal",
                        h1 { "Something went wrong" }
                        pre { "{errors:?}" }
                    }
                },
                Router::<Route> {}
            }
        }
    }
}
