//! # Value Objects

use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::str::FromStr;

/// How violation messages decorate term names.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageStyle {
    /// `"Name"`, joined with spaces.
    #[default]
    PlainText,
    /// `<b>Name</b>`, joined with `<br>`.
    Markup,
}

impl MessageStyle {
    /// Separator placed between the single-select and required-types messages.
    pub fn line_separator(self) -> &'static str {
        match self {
            MessageStyle::PlainText => " ",
            MessageStyle::Markup => "<br>",
        }
    }
}

impl FromStr for MessageStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "plain" | "plaintext" | "text" => Ok(MessageStyle::PlainText),
            "markup" | "html" => Ok(MessageStyle::Markup),
            other => Err(format!("unknown message style '{other}'")),
        }
    }
}

impl fmt::Display for MessageStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageStyle::PlainText => write!(f, "plain"),
            MessageStyle::Markup => write!(f, "markup"),
        }
    }
}

/// Whether a validation gates a save or only advises an editor.
///
/// Both modes run identical checks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationMode {
    /// Hard gate: an invalid report must block the write.
    #[default]
    Enforce,
    /// Soft check during interactive editing.
    Advisory,
}

/// Configuration for the rule validator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RulesConfig {
    pub message_style: MessageStyle,
}

impl RulesConfig {
    /// Read `AT_MESSAGE_STYLE` (`plain` or `markup`, default: `plain`).
    pub fn from_env() -> Self {
        Self {
            message_style: env::var("AT_MESSAGE_STYLE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_default(),
        }
    }
}
