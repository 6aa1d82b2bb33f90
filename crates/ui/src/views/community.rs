use dioxus::prelude::*;
use services::CommunityChat;

use crate::context::AppContext;
use crate::vm::map_community_line;

#[component]
pub fn CommunityView() -> Element {
    let ctx = use_context::<AppContext>();
    let clock = ctx.clock();
    let mut chat = use_signal(|| CommunityChat::new(clock));
    let mut draft = use_signal(String::new);

    let mut send = move || {
        let text = draft();
        if chat.write().post(&text) {
            draft.set(String::new());
        }
    };

    let lines = chat
        .read()
        .messages()
        .iter()
        .map(map_community_line)
        .collect::<Vec<_>>();

    rsx! {
        div { class: "page page--community",
            h2 { "Community Chat" }
            div { class: "chat-window", id: "community-chat",
                if lines.is_empty() {
                    p { class: "chat-empty", "No messages yet." }
                }
                for (index, line) in lines.into_iter().enumerate() {
                    div { key: "{index}", class: "chat-message",
                        span { class: "user-name", "{line.author}" }
                        span { class: "message-content", "{line.text}" }
                        span { class: "message-time", "{line.time}" }
                    }
                }
            }
            div { class: "chat-input",
                input {
                    id: "community-input",
                    r#type: "text",
                    placeholder: "Share a tip or ask the group...",
                    value: "{draft}",
                    oninput: move |evt| draft.set(evt.value()),
                    onkeydown: move |evt| {
                        if evt.key() == Key::Enter {
                            send();
                        }
                    },
                }
                button {
                    class: "btn btn--primary",
                    id: "community-send",
                    onclick: move |_| send(),
                    "Send"
                }
            }
        }
    }
}
