use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector2 {
  pub x: f64,
  pub y: f64,
}

impl Vector2 {
  pub const fn new(x: f64, y: f64) -> Self {
    Self { x, y }
  }

  pub fn is_finite(self) -> bool {
    self.x.is_finite() && self.y.is_finite()
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Food {
  pub id: String,
  pub x: f64,
  pub y: f64,
  pub color: String,
  pub value: u32,
}

impl Food {
  pub fn position(&self) -> Vector2 {
    Vector2::new(self.x, self.y)
  }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActorSnapshot {
  pub id: String,
  pub name: String,
  pub color: String,
  pub head: Vector2,
  #[serde(rename = "angle")]
  pub heading: f64,
  pub length: usize,
  #[serde(rename = "isBot")]
  pub is_bot: bool,
}

/// Actors only, sent at the broadcast rate.
#[derive(Debug, Clone, Serialize)]
pub struct StateSnapshot {
  pub snakes: Vec<ActorSnapshot>,
  pub timestamp: u64,
}

/// Actors plus every food item, sent once on join.
#[derive(Debug, Clone, Serialize)]
pub struct GameStateSnapshot {
  pub snakes: Vec<ActorSnapshot>,
  pub foods: Vec<Food>,
  pub timestamp: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeathEvent {
  #[serde(rename = "actorId")]
  pub actor_id: String,
  #[serde(rename = "killerId")]
  pub killer_id: Option<String>,
  #[serde(rename = "finalLength")]
  pub final_length: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FoodDelta {
  pub added: Vec<Food>,
  #[serde(rename = "removed")]
  pub removed_ids: Vec<String>,
}

impl FoodDelta {
  pub fn is_empty(&self) -> bool {
    self.added.is_empty() && self.removed_ids.is_empty()
  }
}

#[derive(Debug, Clone, Default)]
pub struct TickOutcome {
  pub deaths: Vec<DeathEvent>,
  pub food: Option<FoodDelta>,
}
