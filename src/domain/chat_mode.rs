use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Which corpus the assistant answers from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatMode {
    #[default]
    Ipc,
    CustomDocument,
}

impl ChatMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatMode::Ipc => "ipc",
            ChatMode::CustomDocument => "custom_document",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ChatMode::Ipc => "Indian Penal Code Mode",
            ChatMode::CustomDocument => "Custom Document Mode",
        }
    }
}

impl FromStr for ChatMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ipc" => Ok(ChatMode::Ipc),
            "custom_document" => Ok(ChatMode::CustomDocument),
            _ => Err(format!("Invalid chat mode: {}", s)),
        }
    }
}

impl fmt::Display for ChatMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
