//! Wire Protocol
//!
//! JSON events exchanged with the game server, one object per text frame.
//! The `type` field selects the variant.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// `type` tags the server is allowed to send.
const SERVER_EVENT_TYPES: [&str; 4] = ["init", "play", "win", "error"];

/// One of the two players, carried on the wire as `1` or `2`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Player {
    One,
    Two,
}

impl Player {
    pub fn number(self) -> u8 {
        match self {
            Player::One => 1,
            Player::Two => 2,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Player {}", self.number())
    }
}

impl From<Player> for u8 {
    fn from(player: Player) -> u8 {
        player.number()
    }
}

impl TryFrom<u8> for Player {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Player::One),
            2 => Ok(Player::Two),
            other => Err(format!("invalid player number {}", other)),
        }
    }
}

/// Events sent by the client.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ClientEvent {
    /// Sent once, right after the connection opens.
    Init {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        nickname: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        join: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        watch: Option<String>,
    },
    /// Drop a piece into a column.
    Play { column: usize },
}

/// Events pushed by the server.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ServerEvent {
    /// Identifiers other clients can use to join or watch this game.
    Init { join: String, watch: String },
    /// A piece has been placed.
    Play {
        player: Player,
        column: usize,
        row: usize,
    },
    /// The game is over.
    Win { player: Player },
    /// The server rejected something; the connection stays open.
    Error { message: String },
}

#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("Malformed event: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("Event is not a JSON object")]
    NotAnObject,
    #[error("Event has no type")]
    MissingType,
    #[error("Unsupported event type: {0}")]
    UnknownType(String),
}

/// Serialize a client event into a text frame payload.
pub fn encode(event: &ClientEvent) -> Result<String, ProtocolError> {
    Ok(serde_json::to_string(event)?)
}

/// Parse a text frame payload into a server event.
pub fn decode(text: &str) -> Result<ServerEvent, ProtocolError> {
    let value: Value = serde_json::from_str(text)?;

    let Some(object) = value.as_object() else {
        return Err(ProtocolError::NotAnObject);
    };

    let Some(tag) = object.get("type").and_then(Value::as_str) else {
        return Err(ProtocolError::MissingType);
    };

    if !SERVER_EVENT_TYPES.contains(&tag) {
        return Err(ProtocolError::UnknownType(tag.to_string()));
    }

    Ok(serde_json::from_value(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_play() {
        let text = encode(&ClientEvent::Play { column: 3 }).unwrap();
        assert_eq!(text, r#"{"type":"play","column":3}"#);
    }

    #[test]
    fn test_encode_init_omits_missing_fields() {
        let event = ClientEvent::Init {
            nickname: None,
            join: Some("abc".to_string()),
            watch: None,
        };
        assert_eq!(encode(&event).unwrap(), r#"{"type":"init","join":"abc"}"#);

        let bare = ClientEvent::Init {
            nickname: None,
            join: None,
            watch: None,
        };
        assert_eq!(encode(&bare).unwrap(), r#"{"type":"init"}"#);
    }

    #[test]
    fn test_decode_play() {
        let event = decode(r#"{"type":"play","player":1,"column":2,"row":0}"#).unwrap();
        assert_eq!(
            event,
            ServerEvent::Play {
                player: Player::One,
                column: 2,
                row: 0
            }
        );
    }

    #[test]
    fn test_decode_win_and_error() {
        assert_eq!(
            decode(r#"{"type":"win","player":2}"#).unwrap(),
            ServerEvent::Win { player: Player::Two }
        );
        assert_eq!(
            decode(r#"{"type":"error","message":"Not your turn."}"#).unwrap(),
            ServerEvent::Error {
                message: "Not your turn.".to_string()
            }
        );
    }

    #[test]
    fn test_decode_init_links() {
        assert_eq!(
            decode(r#"{"type":"init","join":"abc","watch":"xyz"}"#).unwrap(),
            ServerEvent::Init {
                join: "abc".to_string(),
                watch: "xyz".to_string()
            }
        );
    }

    #[test]
    fn test_decode_unknown_type() {
        match decode(r#"{"type":"rematch"}"#) {
            Err(ProtocolError::UnknownType(tag)) => assert_eq!(tag, "rematch"),
            other => panic!("expected unknown type, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_missing_type() {
        assert!(matches!(
            decode(r#"{"player":1}"#),
            Err(ProtocolError::MissingType)
        ));
        assert!(matches!(
            decode(r#"{"type":7}"#),
            Err(ProtocolError::MissingType)
        ));
    }

    #[test]
    fn test_decode_rejects_non_objects() {
        assert!(matches!(decode("[1,2]"), Err(ProtocolError::NotAnObject)));
        assert!(matches!(decode("not json"), Err(ProtocolError::Malformed(_))));
    }

    #[test]
    fn test_decode_rejects_bad_player() {
        assert!(matches!(
            decode(r#"{"type":"win","player":3}"#),
            Err(ProtocolError::Malformed(_))
        ));
    }

    #[test]
    fn test_player_display() {
        assert_eq!(Player::Two.to_string(), "Player 2");
    }
}
