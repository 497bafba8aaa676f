use crate::game::types::{FoodDelta, GameStateSnapshot, StateSnapshot};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type")]
pub enum ClientMessage {
  #[serde(rename = "join")]
  Join {
    name: Option<String>,
    color: Option<String>,
  },
  #[serde(rename = "input")]
  Input {
    #[serde(rename = "targetAngle")]
    target_angle: f64,
  },
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub enum ServerMessage {
  #[serde(rename = "init")]
  Init {
    #[serde(rename = "playerId")]
    player_id: String,
    state: GameStateSnapshot,
  },
  #[serde(rename = "state")]
  State(StateSnapshot),
  #[serde(rename = "death")]
  Death {
    #[serde(rename = "killerId")]
    killer_id: Option<String>,
    #[serde(rename = "finalLength")]
    final_length: usize,
  },
  #[serde(rename = "food_update")]
  FoodUpdate(FoodDelta),
}

/// Unknown or malformed frames decode to `None` and are dropped by the caller.
pub fn decode_client_message(text: &str) -> Option<ClientMessage> {
  serde_json::from_str(text).ok()
}

pub fn encode_server_message(message: &ServerMessage) -> Result<String, serde_json::Error> {
  serde_json::to_string(message)
}
