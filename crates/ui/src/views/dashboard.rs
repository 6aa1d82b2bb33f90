use dioxus::prelude::*;
use dioxus_router::use_navigator;
use exam_core::model::{DEFAULT_QUESTION_COUNT, ExamConfig, ExamId};
use services::{ChatTranscript, PracticeRound};

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState};
use crate::vm::{ChatBody, domain_options, exam_options, map_chat_bubble, map_practice_round};

fn selection(raw: &str) -> Option<&str> {
    Some(raw.trim()).filter(|raw| !raw.is_empty())
}

#[component]
pub fn DashboardView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let catalog = ctx.catalog().clone();

    let mut selected_exam = use_signal(String::new);
    let mut selected_domain = use_signal(String::new);
    let mut practice = use_signal(|| ViewState::<PracticeRound>::Idle);
    let mut notice = use_signal(|| None::<ViewError>);

    let exams = exam_options(&catalog);
    let domains = domain_options(&catalog, &selected_exam());

    let on_generate = {
        let practice_service = ctx.practice_service();
        move |_: MouseEvent| {
            let exam = selected_exam();
            let domain = selected_domain();
            if let Err(err) =
                practice_service.validate_selection(selection(&exam), selection(&domain))
            {
                notice.set(Some(ViewError::from(&err)));
                return;
            }
            notice.set(None);
            practice.set(ViewState::Loading);
            let practice_service = practice_service.clone();
            spawn(async move {
                let next = match practice_service
                    .generate(selection(&exam), selection(&domain))
                    .await
                {
                    Ok(round) => ViewState::Ready(round),
                    Err(err) => ViewState::Error(ViewError::from(&err)),
                };
                practice.set(next);
            });
        }
    };

    let on_start_exam = move |_: MouseEvent| {
        let exam_id = selection(&selected_exam())
            .and_then(|raw| ExamId::new(raw).ok())
            .unwrap_or_else(|| ExamConfig::default().exam_id().clone());
        navigator.push(Route::exam(&ExamConfig::new(exam_id, DEFAULT_QUESTION_COUNT)));
    };

    let current_round = match &*practice.read() {
        ViewState::Ready(round) => Some(round.clone()),
        _ => None,
    };

    rsx! {
        div { class: "page page--dashboard",
            h2 { "Dashboard" }
            section { class: "card exam-picker",
                label { r#for: "exam-select", "Exam" }
                select {
                    id: "exam-select",
                    value: "{selected_exam}",
                    onchange: move |evt| {
                        selected_exam.set(evt.value());
                        selected_domain.set(String::new());
                    },
                    option { value: "", "Select an exam" }
                    for exam in exams {
                        option { key: "{exam.value}", value: "{exam.value}", "{exam.label}" }
                    }
                }
                label { r#for: "domain-select", "Domain" }
                select {
                    id: "domain-select",
                    value: "{selected_domain}",
                    onchange: move |evt| selected_domain.set(evt.value()),
                    option { value: "", "Select a domain" }
                    for domain in domains {
                        option { key: "{domain.value}", value: "{domain.value}", "{domain.label}" }
                    }
                }
                div { class: "exam-picker__actions",
                    button { class: "btn", id: "generate-question", onclick: on_generate,
                        "Generate Question"
                    }
                    button { class: "btn btn--primary", id: "start-exam", onclick: on_start_exam,
                        "Start Practice Exam"
                    }
                }
                if let Some(notice) = notice() {
                    p { class: "notice", role: "alert", "{notice.message()}" }
                }
            }
            PracticeCard { practice }
            TutorChat { current: current_round }
        }
    }
}

#[component]
fn PracticeCard(practice: Signal<ViewState<PracticeRound>>) -> Element {
    let state = practice();
    rsx! {
        section { class: "card practice-card",
            match state {
                ViewState::Idle => rsx! {},
                ViewState::Loading => rsx! {
                    p { "Loading question..." }
                },
                ViewState::Error(err) => rsx! {
                    p { class: "notice", "{err.message()}" }
                },
                ViewState::Ready(round) => {
                    let vm = map_practice_round(&round);
                    rsx! {
                        if let Some(domain) = vm.domain_label.as_ref() {
                            span { class: "practice-domain", "{domain}" }
                        }
                        h3 { "{vm.prompt}" }
                        div { class: "practice-options",
                            for option in vm.options.iter().cloned() {
                                button {
                                    key: "{option.key}",
                                    class: option.class,
                                    disabled: vm.locked,
                                    onclick: move |_| {
                                        let mut practice = practice;
                                        if let ViewState::Ready(round) = &mut *practice.write() {
                                            round.select(option.key);
                                        }
                                    },
                                    "{option.label}"
                                }
                            }
                        }
                        if let Some(verdict) = vm.verdict {
                            p { class: "practice-verdict", "{verdict}" }
                        }
                        if let Some(explanation) = vm.explanation.as_ref() {
                            p { class: "practice-explanation", "{explanation}" }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn TutorChat(current: Option<PracticeRound>) -> Element {
    let ctx = use_context::<AppContext>();
    let mut transcript = use_signal(ChatTranscript::new);
    let mut draft = use_signal(String::new);
    let mut pending = use_signal(|| false);

    let tutor = ctx.tutor_service();
    let mut send = move || {
        let message = draft().trim().to_string();
        if message.is_empty() || pending() {
            return;
        }
        draft.set(String::new());
        transcript.write().push_user(message.clone());
        pending.set(true);
        let tutor = tutor.clone();
        let question = current.as_ref().map(|round| round.question().clone());
        spawn(async move {
            let reply = tutor.ask(&message, question.as_ref()).await;
            transcript.write().push_reply(reply);
            pending.set(false);
        });
    };
    let mut send_on_enter = send.clone();

    let bubbles = transcript
        .read()
        .messages()
        .iter()
        .map(map_chat_bubble)
        .collect::<Vec<_>>();

    rsx! {
        section { class: "card tutor-chat",
            h3 { "Ask the Tutor" }
            div { class: "chat-window", id: "chat-window",
                for (index, bubble) in bubbles.into_iter().enumerate() {
                    match bubble.body {
                        ChatBody::Text(text) => rsx! {
                            div { key: "{index}", class: bubble.class, "{text}" }
                        },
                        ChatBody::Html(html) => rsx! {
                            div {
                                key: "{index}",
                                class: bubble.class,
                                dangerous_inner_html: "{html}",
                            }
                        },
                    }
                }
                if pending() {
                    div { class: "chat-message-assistant chat-pending", "Thinking..." }
                }
            }
            div { class: "chat-input",
                input {
                    id: "user-input",
                    r#type: "text",
                    placeholder: "Ask about any exam topic...",
                    value: "{draft}",
                    oninput: move |evt| draft.set(evt.value()),
                    onkeydown: move |evt| {
                        if evt.key() == Key::Enter {
                            send_on_enter();
                        }
                    },
                }
                button {
                    class: "btn btn--primary",
                    id: "send-btn",
                    onclick: move |_| send(),
                    "Send"
                }
            }
        }
    }
}
