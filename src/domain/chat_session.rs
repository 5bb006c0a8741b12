use super::{ChatMode, Message, MessageRole};

/// The single interactive session: current mode and the visible history.
#[derive(Debug, Clone, Default)]
pub struct ChatSession {
    pub mode: ChatMode,
    pub messages: Vec<Message>,
}

impl ChatSession {
    pub fn new(mode: ChatMode) -> Self {
        Self {
            mode,
            messages: Vec::new(),
        }
    }

    /// Returns `true` when the mode changed. History belongs to a mode and is
    /// dropped on every change.
    pub fn switch_mode(&mut self, mode: ChatMode) -> bool {
        if self.mode == mode {
            return false;
        }
        self.mode = mode;
        self.messages.clear();
        true
    }

    pub fn record_exchange(&mut self, question: String, answer: String) {
        self.messages.push(Message::new(MessageRole::User, question));
        self.messages
            .push(Message::new(MessageRole::Assistant, answer));
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }
}
