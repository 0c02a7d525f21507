use serde::{Deserialize, Serialize};

use crate::foundation::error::{PlotError, PlotResult};

/// Longest message the device accepts in one piece.
pub const MESSAGE_CAPACITY: usize = 80 * 24;

/// Message protocol event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageEvent {
    /// Interpreter is about to emit its own text.
    Ready,
    /// A user message follows.
    Message,
    /// End of a user message.
    Done,
    /// A piece of text.
    Text,
}

/// Message buffering for both passes.
#[derive(Clone, Debug, Default)]
pub struct MessageLog {
    saving: bool,
    logging: bool,
    buffer: String,
}

impl MessageLog {
    /// Live handling. Returns a completed message to forward to the device.
    pub fn live(&mut self, event: MessageEvent, text: &str) -> PlotResult<Option<String>> {
        match event {
            MessageEvent::Ready => self.saving = false,
            MessageEvent::Message => {
                self.saving = true;
                self.buffer.clear();
            }
            MessageEvent::Text if self.saving => {
                if text != "\r\n" {
                    if self.buffer.len() + text.len() > MESSAGE_CAPACITY {
                        return Err(PlotError::capacity(format!(
                            "message longer than {MESSAGE_CAPACITY} bytes"
                        )));
                    }
                    self.buffer.push_str(text);
                }
            }
            MessageEvent::Text => tracing::info!(target: "plotpen::message", "{}", text.trim_end()),
            MessageEvent::Done if self.saving => return Ok(Some(self.buffer.clone())),
            MessageEvent::Done => {}
        }
        Ok(None)
    }

    /// Dry-run handling: text is only logged.
    pub fn diagnostic(&mut self, event: MessageEvent, text: &str) {
        match event {
            MessageEvent::Ready => self.logging = true,
            MessageEvent::Message => self.logging = false,
            MessageEvent::Text if self.logging => {
                tracing::info!(target: "plotpen::message", "{}", text.trim_end())
            }
            MessageEvent::Text | MessageEvent::Done => {}
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/message.rs"]
mod tests;
