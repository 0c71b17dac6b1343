use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============= Message Types =============

/// A message appended to a memory thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryMessage {
    pub role: MessageRole,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<MessageMetadata>,
}

impl MemoryMessage {
    /// A message authored by the end user.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
            metadata: None,
        }
    }

    /// A message authored by the assistant.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
            metadata: None,
        }
    }

    pub fn with_metadata(
        mut self,
        message_id: impl Into<String>,
        timestamp: impl Into<String>,
    ) -> Self {
        self.metadata = Some(MessageMetadata {
            message_id: message_id.into(),
            timestamp: timestamp.into(),
        });
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageMetadata {
    pub message_id: String,
    pub timestamp: String,
}

/// Who authored a message. The memory service only accepts these two roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

impl MessageRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageRole::User => "user",
            MessageRole::Assistant => "assistant",
        }
    }
}

impl fmt::Display for MessageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MessageRole {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "user" => Ok(MessageRole::User),
            "assistant" => Ok(MessageRole::Assistant),
            other => Err(AppError::InvalidInput(format!(
                "unknown message role '{}', expected 'user' or 'assistant'",
                other
            ))),
        }
    }
}

// ============= Context Types =============

/// How much context the memory service should assemble for a thread.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContextMode {
    #[default]
    Basic,
    Summary,
}

impl ContextMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContextMode::Basic => "basic",
            ContextMode::Summary => "summary",
        }
    }
}

impl fmt::Display for ContextMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContextMode {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "basic" => Ok(ContextMode::Basic),
            "summary" => Ok(ContextMode::Summary),
            other => Err(AppError::InvalidInput(format!(
                "unknown context mode '{}', expected 'basic' or 'summary'",
                other
            ))),
        }
    }
}

// ============= Error Types =============

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Memory service returned {status}: {body}")]
    Remote { status: u16, body: String },

    #[error("Parse error: {0}")]
    Parse(String),
}

pub type Result<T> = std::result::Result<T, AppError>;
