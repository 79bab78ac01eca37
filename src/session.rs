//! Scripted sessions: a viewport size plus frame-scheduled host events,
//! loaded from JSON and replayed through the render loop.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::engine::HostEvent;
use crate::error::ErrorCode;
use crate::frame_loop::{EventQueue, ScheduledEvent};

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("cannot read session script: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid session script: {0}")]
    Json(#[from] serde_json::Error),
    #[error("viewport must be positive, got {width}x{height}")]
    Viewport { width: f64, height: f64 },
}

impl ErrorCode for SessionError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Io(_) => "E_SESSION_IO",
            Self::Json(_) => "E_SESSION_JSON",
            Self::Viewport { .. } => "E_SESSION_VIEWPORT",
        }
    }
}

/// Initial viewport size in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportSize {
    pub width: f64,
    pub height: f64,
}

impl Default for ViewportSize {
    fn default() -> Self {
        Self { width: 800.0, height: 600.0 }
    }
}

/// A replayable session.
///
/// ```json
/// {
///   "viewport": { "width": 800, "height": 600 },
///   "events": [
///     { "frame": 0, "type": "drop", "x": 400, "y": 300,
///       "payload": { "kind": "crane", "duration_months": 6 } }
///   ]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SessionScript {
    #[serde(default)]
    pub viewport: ViewportSize,
    #[serde(default)]
    pub events: Vec<ScheduledEvent>,
}

impl SessionScript {
    /// # Errors
    ///
    /// Returns [`SessionError::Json`] for malformed input and
    /// [`SessionError::Viewport`] for a non-positive size.
    pub fn from_json(text: &str) -> Result<Self, SessionError> {
        let script: Self = serde_json::from_str(text)?;
        let ViewportSize { width, height } = script.viewport;
        if !(width > 0.0 && height > 0.0) {
            return Err(SessionError::Viewport { width, height });
        }
        Ok(script)
    }

    /// # Errors
    ///
    /// Returns [`SessionError::Io`] if the file cannot be read, otherwise as
    /// [`SessionScript::from_json`].
    pub fn load(path: &Path) -> Result<Self, SessionError> {
        let text = fs::read_to_string(path)?;
        let script = Self::from_json(&text)?;
        tracing::debug!(path = %path.display(), events = script.events.len(), "session script loaded");
        Ok(script)
    }

    /// Frames needed to deliver every event and show its result.
    #[must_use]
    pub fn frames_needed(&self) -> u64 {
        self.events.iter().map(|e| e.frame.saturating_add(1)).max().unwrap_or(1)
    }

    /// The resize that opens the session, followed by the scripted events.
    #[must_use]
    pub fn into_queue(self) -> EventQueue {
        let ViewportSize { width, height } = self.viewport;
        let mut events = Vec::with_capacity(self.events.len() + 1);
        events.push(ScheduledEvent { frame: 0, event: HostEvent::Resize { width, height } });
        events.extend(self.events);
        EventQueue::from_scheduled(events)
    }
}
