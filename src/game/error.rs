use thiserror::Error;

/// Configuration rejected by [`super::config::GameConfig::validate`].
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
  #[error("invalid configuration: {0}")]
  Invalid(&'static str),
  #[error("failed to read config file: {0}")]
  Read(String),
  #[error("failed to parse config file: {0}")]
  Parse(String),
}

/// Broken simulation invariants. These abort the tick instead of reaching a snapshot.
#[derive(Debug, Error, PartialEq)]
pub enum SimulationError {
  #[error(transparent)]
  Config(#[from] ConfigError),
  #[error("actor {actor_id} has non-finite state after advance")]
  NonFiniteActor { actor_id: String },
  #[error("food {food_id} has invalid value {value}")]
  InvalidFood { food_id: String, value: u32 },
  #[error("food position is not finite")]
  NonFiniteFood,
  #[error("bot construction failed: {0}")]
  BotConstruction(&'static str),
  #[error("simulation halted after a failed tick")]
  Halted,
}
