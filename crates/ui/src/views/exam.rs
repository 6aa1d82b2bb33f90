use std::time::Duration;

use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};
use exam_core::model::{ExamConfig, ResultsHandoff};
use services::ExamController;
use services::exam::{ExamIntent, IntentOutcome, TickOutcome};
use tracing::warn;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{ExamScreenVm, map_exam_screen};

#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::rc::Rc;

const TICK: Duration = Duration::from_secs(1);

fn config_from_route(exam: &str, count: &str) -> ExamConfig {
    let present = |raw: &str| Some(raw.trim().to_string()).filter(|raw| !raw.is_empty());
    ExamConfig::from_query_values(present(exam).as_deref(), present(count).as_deref())
}

/// Keyed by configuration so a route change to another exam remounts the
/// session with fresh state.
#[component]
pub fn ExamView(exam: String, count: String) -> Element {
    rsx! {
        ExamSessionView { key: "{exam}-{count}", exam, count }
    }
}

#[component]
fn ExamSessionView(exam: String, count: String) -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let exam_service = ctx.exam_service();
    let config = config_from_route(&exam, &count);

    let controller = use_signal(|| None::<ExamController>);
    let load_failed = use_signal(|| false);

    #[cfg(test)]
    let handles = try_consume_context::<ExamTestHandles>();
    #[cfg(test)]
    let record_handoff = {
        let handles = handles.clone();
        move |route: &Route| {
            if let Some(handles) = handles.as_ref() {
                handles.record_handoff(route.clone());
            }
        }
    };
    #[cfg(not(test))]
    let record_handoff = |_: &Route| {};

    let resource = use_resource(move || {
        let exam_service = exam_service.clone();
        let config = config.clone();
        let mut controller = controller;
        let mut load_failed = load_failed;
        async move {
            let started = exam_service.start_exam(config).await.map_err(|err| {
                warn!(error = %err, "exam failed to load");
                load_failed.set(true);
                ViewError::ExamLoad
            })?;
            controller.set(Some(started));
            Ok::<_, ViewError>(())
        }
    });
    let state = view_state_from_resource(resource);

    // Scoped to this view: dropped with the component on navigation.
    use_future({
        let record_handoff = record_handoff.clone();
        move || {
            let mut controller = controller;
            let record_handoff = record_handoff.clone();
            async move {
                loop {
                    tokio::time::sleep(TICK).await;
                    if *load_failed.peek() {
                        break;
                    }
                    if controller.peek().is_none() {
                        continue;
                    }
                    let outcome = controller.write().as_mut().map(ExamController::tick);
                    match outcome {
                        None | Some(TickOutcome::Running(_)) => {}
                        Some(TickOutcome::Submitted(result)) => {
                            let route = Route::results(&ResultsHandoff::from(result));
                            record_handoff(&route);
                            navigator.replace(route);
                            break;
                        }
                        Some(TickOutcome::Idle) => break,
                    }
                }
            }
        }
    });

    let dispatch = use_callback(move |intent: ExamIntent| {
        let mut controller = controller;
        let outcome = controller
            .write()
            .as_mut()
            .map(|controller| controller.dispatch(intent));
        if let Some(IntentOutcome::Submitted(result)) = outcome {
            let route = Route::results(&ResultsHandoff::from(result));
            record_handoff(&route);
            navigator.replace(route);
        }
    });

    #[cfg(test)]
    {
        let mut registered = use_signal(|| false);
        if !registered() {
            registered.set(true);
            if let Some(handles) = handles {
                handles.register(dispatch);
            }
        }
    }

    let screen = controller.read().as_ref().map(map_exam_screen);

    rsx! {
        div { class: "page page--exam", id: "exam-root",
            match (state, screen) {
                (ViewState::Ready(()), Some(screen)) => rsx! {
                    ExamScreen { screen, dispatch }
                },
                (ViewState::Error(err), _) => rsx! {
                    div { class: "exam-error",
                        p { "{err.message()}" }
                        Link { to: Route::Dashboard {}, "Back to Dashboard" }
                    }
                },
                (ViewState::Idle, _) => rsx! {},
                _ => rsx! {
                    p { class: "exam-loading", "Loading…" }
                },
            }
        }
    }
}

#[component]
fn ExamScreen(screen: ExamScreenVm, dispatch: Callback<ExamIntent>) -> Element {
    rsx! {
        header { class: "exam-header",
            span { class: "exam-position", "{screen.position_label}" }
            span { class: "exam-timer", id: "exam-timer", "{screen.timer_label}" }
        }
        div { class: "exam-body",
            section { class: "exam-question",
                h3 { "{screen.question_text}" }
                div { class: "exam-options",
                    for option in screen.options.iter().cloned() {
                        button {
                            key: "{option.key}",
                            class: option.class,
                            onclick: move |_| dispatch.call(ExamIntent::Select(option.key)),
                            "{option.label}"
                        }
                    }
                }
                div { class: "exam-controls",
                    button {
                        class: "btn",
                        disabled: !screen.can_go_previous,
                        onclick: move |_| dispatch.call(ExamIntent::Previous),
                        "Previous"
                    }
                    if screen.flagging {
                        button {
                            class: "btn btn--flag",
                            onclick: move |_| dispatch.call(ExamIntent::ToggleFlag),
                            "{screen.flag_label}"
                        }
                    }
                    button {
                        class: "btn",
                        disabled: !screen.can_go_next,
                        onclick: move |_| dispatch.call(ExamIntent::Next),
                        "Next"
                    }
                    button {
                        class: "btn btn--primary",
                        id: "exam-submit",
                        onclick: move |_| dispatch.call(ExamIntent::RequestSubmit),
                        "Submit Exam"
                    }
                }
            }
            aside { class: "exam-sidebar",
                div { class: "exam-navigator",
                    for cell in screen.navigator.iter().cloned() {
                        button {
                            key: "{cell.index}",
                            class: "{cell.class}",
                            onclick: move |_| dispatch.call(ExamIntent::GoTo(cell.index)),
                            "{cell.number}"
                        }
                    }
                }
                if let Some(progress) = screen.domain_progress.as_ref() {
                    ul { class: "domain-progress",
                        for row in progress.iter() {
                            li { key: "{row.label}",
                                span { class: "domain-progress__label", "{row.label}" }
                                span { class: "domain-progress__counts", "{row.counts}" }
                            }
                        }
                    }
                }
            }
        }
        if let Some(confirm) = screen.confirm.as_ref() {
            div { class: "modal-backdrop",
                div { class: "modal", role: "dialog",
                    h3 { "Submit Exam?" }
                    p { "{confirm.answered_label}" }
                    if let Some(unanswered) = confirm.unanswered_label.as_ref() {
                        p { class: "modal__warning", "{unanswered}" }
                    }
                    if let Some(flagged) = confirm.flagged_label.as_ref() {
                        p { class: "modal__warning", "{flagged}" }
                    }
                    div { class: "modal__actions",
                        button {
                            class: "btn",
                            id: "cancel-submit",
                            onclick: move |_| dispatch.call(ExamIntent::CancelSubmit),
                            "Cancel"
                        }
                        button {
                            class: "btn btn--primary",
                            id: "confirm-submit",
                            onclick: move |_| dispatch.call(ExamIntent::ConfirmSubmit),
                            "Submit"
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct ExamTestHandles {
    dispatch: Rc<RefCell<Option<Callback<ExamIntent>>>>,
    handoff: Rc<RefCell<Option<Route>>>,
}

#[cfg(test)]
impl ExamTestHandles {
    pub(crate) fn register(&self, dispatch: Callback<ExamIntent>) {
        *self.dispatch.borrow_mut() = Some(dispatch);
    }

    pub(crate) fn record_handoff(&self, route: Route) {
        *self.handoff.borrow_mut() = Some(route);
    }

    pub(crate) fn handoff(&self) -> Option<Route> {
        self.handoff.borrow().clone()
    }

    pub(crate) fn dispatch(&self) -> Callback<ExamIntent> {
        (*self.dispatch.borrow()).expect("exam dispatch registered")
    }
}

#[cfg(test)]
mod tests {
    use super::config_from_route;

    #[test]
    fn missing_route_values_use_defaults() {
        let config = config_from_route("", "");
        assert_eq!(config.exam_id().as_str(), "1101");
        assert_eq!(config.requested_count(), 90);

        let config = config_from_route("1102", "20");
        assert_eq!(config.exam_id().as_str(), "1102");
        assert_eq!(config.requested_count(), 20);
    }
}
