//! JSON messages exchanged with the hosted web content.

use serde::{Deserialize, Serialize};

use crate::types::ShortcutConfig;

/// Messages from web content to the shell.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(
    tag = "type",
    rename_all = "camelCase",
    rename_all_fields = "camelCase"
)]
pub enum IncomingMessage {
    /// Request for the full current config, answered with [`OutgoingMessage::Shortcuts`].
    GetShortcuts { request_id: u64 },
    /// Partial config to merge, persist and apply. No reply unless saving fails.
    UpdateShortcuts { shortcuts: ShortcutConfig },
}

impl IncomingMessage {
    pub fn parse(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Messages from the shell to web content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(
    tag = "type",
    rename_all = "camelCase",
    rename_all_fields = "camelCase"
)]
pub enum OutgoingMessage {
    Shortcuts {
        request_id: u64,
        shortcuts: ShortcutConfig,
    },
    /// Stop any speech or audio currently playing.
    StopTts,
    ShortcutsSaveFailed { message: String },
}

impl OutgoingMessage {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
