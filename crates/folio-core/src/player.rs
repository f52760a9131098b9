//! Control protocol for embedded video players.
//!
//! Messages are fire-and-forget: there is no acknowledgement, and a player
//! that is not ready simply never sees them.

use serde::{Deserialize, Serialize};

/// Play/pause command understood by the embedded player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerCommand {
    Play,
    Pause,
}

impl PlayerCommand {
    /// Player API function name
    pub fn func(self) -> &'static str {
        match self {
            PlayerCommand::Play => "playVideo",
            PlayerCommand::Pause => "pauseVideo",
        }
    }
}

/// Wire message posted to an embedded player frame
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerMessage {
    pub event: String,
    pub func: String,
    #[serde(default)]
    pub args: String,
}

impl PlayerMessage {
    pub fn command(command: PlayerCommand) -> Self {
        Self {
            event: "command".to_string(),
            func: command.func().to_string(),
            args: String::new(),
        }
    }

    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Delivery channel to the player hosted by one gallery instance.
pub trait PlayerTransport {
    /// Post a message to the player at `instance`. Errors are reported to the
    /// caller but carry no delivery guarantee either way.
    fn post(&mut self, instance: usize, message: &PlayerMessage) -> crate::Result<()>;
}

/// Transport that records every posted message as JSON.
///
/// Used by the terminal front end, which has no real player to talk to, and
/// by tests.
#[derive(Debug, Default)]
pub struct RecordingTransport {
    sent: Vec<(usize, String)>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> &[(usize, String)] {
        &self.sent
    }

    /// Take all recorded messages
    pub fn drain(&mut self) -> Vec<(usize, String)> {
        std::mem::take(&mut self.sent)
    }
}

impl PlayerTransport for RecordingTransport {
    fn post(&mut self, instance: usize, message: &PlayerMessage) -> crate::Result<()> {
        self.sent.push((instance, message.to_json()?));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_wire_format() {
        let json = PlayerMessage::command(PlayerCommand::Pause).to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["event"], "command");
        assert_eq!(value["func"], "pauseVideo");
        assert_eq!(value["args"], "");
    }

    #[test]
    fn test_message_parse_without_args() {
        let msg: PlayerMessage =
            serde_json::from_str(r#"{"event":"command","func":"playVideo"}"#).unwrap();
        assert_eq!(msg, PlayerMessage::command(PlayerCommand::Play));
    }

    #[test]
    fn test_recording_transport() {
        let mut transport = RecordingTransport::new();
        transport
            .post(4, &PlayerMessage::command(PlayerCommand::Play))
            .unwrap();
        assert_eq!(transport.sent().len(), 1);
        assert_eq!(transport.sent()[0].0, 4);
        assert!(transport.sent()[0].1.contains("playVideo"));
        assert_eq!(transport.drain().len(), 1);
        assert!(transport.sent().is_empty());
    }
}
