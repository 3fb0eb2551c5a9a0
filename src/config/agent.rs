//! Conversation agent configuration

use serde::Deserialize;

use crate::domain::conversation::AgentSettings;

use super::error::ValidationError;

/// Conversation agent tuning
#[derive(Debug, Clone, Deserialize)]
pub struct AgentConfig {
    /// Trailing history turns considered for continuation resolution
    #[serde(default = "default_history_window")]
    pub history_window: usize,

    /// Longest reply still treated as a continuation answer
    #[serde(default = "default_short_reply_max_chars")]
    pub short_reply_max_chars: usize,

    /// Audience used when a campaign omits one
    #[serde(default = "default_audience")]
    pub default_audience: String,

    /// Template reference used when a campaign omits one
    #[serde(default = "default_template")]
    pub default_template: String,
}

impl AgentConfig {
    /// Validate agent configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.history_window == 0 {
            return Err(ValidationError::InvalidHistoryWindow);
        }
        if self.short_reply_max_chars == 0 {
            return Err(ValidationError::InvalidShortReplyLimit);
        }
        if self.default_audience.trim().is_empty() {
            return Err(ValidationError::MissingRequired("agent.default_audience"));
        }
        if self.default_template.trim().is_empty() {
            return Err(ValidationError::MissingRequired("agent.default_template"));
        }
        Ok(())
    }

    /// Convert into the domain-level settings struct
    pub fn settings(&self) -> AgentSettings {
        AgentSettings {
            history_window: self.history_window,
            short_reply_max_chars: self.short_reply_max_chars,
            default_audience: self.default_audience.clone(),
            default_template: self.default_template.clone(),
        }
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            history_window: default_history_window(),
            short_reply_max_chars: default_short_reply_max_chars(),
            default_audience: default_audience(),
            default_template: default_template(),
        }
    }
}

fn default_history_window() -> usize {
    6
}

fn default_short_reply_max_chars() -> usize {
    100
}

fn default_audience() -> String {
    "General".to_string()
}

fn default_template() -> String {
    "default-template".to_string()
}
