use chrono::{DateTime, Utc};

use super::{MessageId, MessageRole};

#[derive(Debug, Clone)]
pub struct Message {
    pub id: MessageId,
    pub role: MessageRole,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl Message {
    pub fn new(role: MessageRole, content: String) -> Self {
        Self {
            id: MessageId::new(),
            role,
            content,
            created_at: Utc::now(),
        }
    }

    /// Renders the message the way it appears in the prompt history.
    pub fn as_history_line(&self) -> String {
        format!("{}: {}", self.role.label(), self.content)
    }
}
