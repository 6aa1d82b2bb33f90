use chrono::{DateTime, Local, Utc};
use exam_core::Clock;

pub const LOCAL_AUTHOR: &str = "User";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommunityMessage {
    pub author: String,
    pub text: String,
    pub sent_at: DateTime<Utc>,
}

impl CommunityMessage {
    /// Send time in local `HH:MM:SS`.
    #[must_use]
    pub fn time_label(&self) -> String {
        self.sent_at
            .with_timezone(&Local)
            .format("%H:%M:%S")
            .to_string()
    }
}

/// Process-local chat room. Nothing is sent or stored.
#[derive(Debug, Clone, Default)]
pub struct CommunityChat {
    clock: Clock,
    messages: Vec<CommunityMessage>,
}

impl CommunityChat {
    #[must_use]
    pub fn new(clock: Clock) -> Self {
        Self {
            clock,
            messages: Vec::new(),
        }
    }

    #[must_use]
    pub fn messages(&self) -> &[CommunityMessage] {
        &self.messages
    }

    /// Append a trimmed message. Blank input is ignored and returns `false`.
    pub fn post(&mut self, raw: &str) -> bool {
        let text = raw.trim();
        if text.is_empty() {
            return false;
        }
        self.messages.push(CommunityMessage {
            author: LOCAL_AUTHOR.to_string(),
            text: text.to_string(),
            sent_at: self.clock.now(),
        });
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use exam_core::time::{fixed_clock, fixed_now};

    #[test]
    fn posts_trimmed_messages_as_user() {
        let mut chat = CommunityChat::new(fixed_clock());
        assert!(chat.post("  anyone studying 2.3?  "));

        let messages = chat.messages();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].author, "User");
        assert_eq!(messages[0].text, "anyone studying 2.3?");
        assert_eq!(messages[0].sent_at, fixed_now());
    }

    #[test]
    fn blank_messages_are_ignored() {
        let mut chat = CommunityChat::new(fixed_clock());
        assert!(!chat.post("   "));
        assert!(chat.messages().is_empty());
    }

    #[test]
    fn time_label_is_clock_format() {
        let mut chat = CommunityChat::new(fixed_clock());
        chat.post("hi");
        let label = chat.messages()[0].time_label();
        assert_eq!(label.len(), 8);
        assert_eq!(label.matches(':').count(), 2);
    }
}
