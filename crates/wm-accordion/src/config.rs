//! Accordion options

use serde::{Deserialize, Serialize};

use crate::transition::OPEN_DURATION_MS;

/// Errors raised while reading accordion options
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Options JSON could not be parsed.
    #[error("invalid accordion options: {0}")]
    Json(#[from] serde_json::Error),
}

/// Selectors and timing for an accordion group
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AccordionOptions {
    /// Group container
    pub root_selector: String,
    /// Disclosure items, matched inside the root
    pub item_selector: String,
    /// Clickable header, matched inside each item
    pub summary_selector: String,
    /// Collapsible body, matched inside each item
    pub body_selector: String,
    /// Open transition duration; close uses the same value clamped to 220..=360
    pub duration_ms: u32,
    /// Close every other item when one opens
    pub single_open: bool,
}

impl Default for AccordionOptions {
    fn default() -> Self {
        Self {
            root_selector: ".wm-faq".to_string(),
            item_selector: "details.wm-faq-item".to_string(),
            summary_selector: "summary".to_string(),
            body_selector: ".wm-faq-body".to_string(),
            duration_ms: OPEN_DURATION_MS,
            single_open: true,
        }
    }
}

impl AccordionOptions {
    /// Parse options from JSON; missing keys keep their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}
