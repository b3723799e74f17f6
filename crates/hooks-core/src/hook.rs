use crate::error::{HookError, Result};
use serde::{Deserialize, Serialize};
use std::io::Read;

// ---------------------------------------------------------------------------
// Incoming event
// ---------------------------------------------------------------------------

/// The JSON document the host assistant writes to a hook's stdin. Every
/// field defaults so partial events from older hosts still parse.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HookEvent {
    #[serde(default)]
    pub hook_event_name: String,
    #[serde(default)]
    pub tool_name: String,
    #[serde(default)]
    pub tool_input: ToolInput,
    #[serde(default)]
    pub prompt: String,
    #[serde(default)]
    pub transcript_path: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ToolInput {
    #[serde(default)]
    pub file_path: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub new_string: Option<String>,
}

impl ToolInput {
    /// The content the tool wrote: full content for Write, replacement text
    /// for Edit.
    pub fn effective_content(&self) -> Option<&str> {
        self.content.as_deref().or(self.new_string.as_deref())
    }
}

/// Read one hook event from the reader. Empty input yields the default
/// event; malformed JSON is a typed error the caller downgrades.
pub fn read_event(mut reader: impl Read) -> Result<HookEvent> {
    let mut buf = String::new();
    reader.read_to_string(&mut buf)?;
    if buf.trim().is_empty() {
        return Ok(HookEvent::default());
    }
    serde_json::from_str(&buf).map_err(|e| HookError::MalformedEvent(e.to_string()))
}

// ---------------------------------------------------------------------------
// Outgoing envelope
// ---------------------------------------------------------------------------

/// The JSON envelope hooks print to hand context back to the assistant.
/// Field names are camelCase on the wire.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HookOutput {
    pub hook_specific_output: HookSpecificOutput,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HookSpecificOutput {
    pub hook_event_name: String,
    pub additional_context: String,
}

impl HookOutput {
    pub fn context(event_name: impl Into<String>, additional: impl Into<String>) -> Self {
        Self {
            hook_specific_output: HookSpecificOutput {
                hook_event_name: event_name.into(),
                additional_context: additional.into(),
            },
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
