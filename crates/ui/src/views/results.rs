use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};
use exam_core::model::ResultsHandoff;

use crate::routes::Route;
use crate::vm::map_results;

#[component]
pub fn ResultsView(
    score: String,
    total: String,
    time: String,
    exam: String,
    count: String,
) -> Element {
    let navigator = use_navigator();
    let handoff = ResultsHandoff::from_pairs([
        ("score", score),
        ("total", total),
        ("time", time),
        ("exam", exam),
        ("count", count),
    ]);
    let vm = map_results(&handoff);
    let retry = vm.retry.clone();

    rsx! {
        div { class: "page page--results",
            h2 { "Exam Results" }
            div { class: "circular-progress", style: "{vm.dial_style}",
                span { class: "progress-value", "{vm.percentage_label}" }
            }
            dl { class: "results-stats",
                dt { "Score" }
                dd { id: "score", "{vm.score_label}" }
                dt { "Time Taken" }
                dd { id: "time-taken", "{vm.time_label}" }
            }
            div { class: "results-actions",
                button {
                    class: "btn btn--primary",
                    id: "generate-new-test",
                    onclick: move |_| {
                        navigator.push(Route::exam(&retry));
                    },
                    "Generate New Test"
                }
                Link { class: "btn", to: Route::Dashboard {}, "Back to Dashboard" }
            }
        }
    }
}
