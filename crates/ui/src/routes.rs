use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable};
use exam_core::model::{ExamConfig, ResultsHandoff};

use crate::views::{CommunityView, DashboardView, ExamView, ResultsView, ThemeToggle};

#[derive(Clone, Debug, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", DashboardView)] Dashboard {},
        #[route("/exam?:exam&:count", ExamView)] Exam { exam: String, count: String },
        #[route("/results?:score&:total&:time&:exam&:count", ResultsView)]
        Results { score: String, total: String, time: String, exam: String, count: String },
        #[route("/community", CommunityView)] Community {},
}

impl Route {
    /// Exam route for a configuration.
    #[must_use]
    pub fn exam(config: &ExamConfig) -> Self {
        Self::Exam {
            exam: config.exam_id().to_string(),
            count: config.requested_count().to_string(),
        }
    }

    /// Results route carrying a handoff. Absent fields travel as empty strings.
    #[must_use]
    pub fn results(handoff: &ResultsHandoff) -> Self {
        Self::Results {
            score: handoff.score.to_string(),
            total: handoff.total.to_string(),
            time: handoff.time.to_string(),
            exam: handoff.exam.clone().unwrap_or_default(),
            count: handoff.count.map(|count| count.to_string()).unwrap_or_default(),
        }
    }
}

#[component]
fn Layout() -> Element {
    rsx! {
        div { class: "app",
            Sidebar {}
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}

#[component]
fn Sidebar() -> Element {
    rsx! {
        nav { class: "sidebar",
            h1 { "Exam Prep" }
            ul {
                li { Link { to: Route::Dashboard {}, "Dashboard" } }
                li { Link { to: Route::exam(&ExamConfig::default()), "Practice Exam" } }
                li { Link { to: Route::Community {}, "Community" } }
            }
            ThemeToggle {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use exam_core::model::ExamId;

    #[test]
    fn results_route_round_trips_handoff() {
        let handoff = ResultsHandoff {
            score: 45,
            total: 60,
            time: 754,
            exam: Some("1102".into()),
            count: Some(60),
        };
        let Route::Results {
            score,
            total,
            time,
            exam,
            count,
        } = Route::results(&handoff)
        else {
            panic!("expected results route");
        };
        let decoded = ResultsHandoff::from_pairs([
            ("score", score),
            ("total", total),
            ("time", time),
            ("exam", exam),
            ("count", count),
        ]);
        assert_eq!(decoded, handoff);
    }

    #[test]
    fn exam_route_carries_config() {
        let config = ExamConfig::new(ExamId::new("1102").unwrap(), 20);
        assert_eq!(
            Route::exam(&config),
            Route::Exam {
                exam: "1102".into(),
                count: "20".into()
            }
        );
    }
}
