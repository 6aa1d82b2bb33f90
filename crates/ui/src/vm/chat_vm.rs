use services::CommunityMessage;
use services::tutor::{ChatMessage, ChatRole};

use super::markdown_vm::markdown_to_html;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ChatBody {
    Text(String),
    Html(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatBubbleVm {
    pub class: &'static str,
    pub body: ChatBody,
}

/// User turns stay plain text; tutor replies are rendered Markdown.
#[must_use]
pub fn map_chat_bubble(message: &ChatMessage) -> ChatBubbleVm {
    match message.role {
        ChatRole::User => ChatBubbleVm {
            class: "chat-message-user",
            body: ChatBody::Text(message.text.clone()),
        },
        ChatRole::Assistant => ChatBubbleVm {
            class: "chat-message-assistant",
            body: ChatBody::Html(markdown_to_html(&message.text)),
        },
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommunityLineVm {
    pub author: String,
    pub text: String,
    pub time: String,
}

#[must_use]
pub fn map_community_line(message: &CommunityMessage) -> CommunityLineVm {
    CommunityLineVm {
        author: format!("{}:", message.author),
        text: message.text.clone(),
        time: message.time_label(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assistant_markdown_is_rendered() {
        let bubble = map_chat_bubble(&ChatMessage {
            role: ChatRole::Assistant,
            text: "Use **APIPA** when DHCP fails.".into(),
        });
        assert_eq!(bubble.class, "chat-message-assistant");
        let ChatBody::Html(html) = bubble.body else {
            panic!("expected html body");
        };
        assert!(html.contains("<strong>APIPA</strong>"));
    }

    #[test]
    fn user_text_is_not_interpreted() {
        let bubble = map_chat_bubble(&ChatMessage {
            role: ChatRole::User,
            text: "**literal**".into(),
        });
        assert_eq!(bubble.body, ChatBody::Text("**literal**".into()));
    }
}
