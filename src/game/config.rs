use super::constants::{
  BASE_SPEED, BOT_COUNT, BOT_RESPAWN_DELAY_MS, BOT_SPAWN_MARGIN, BOT_VISION_RANGE, BROADCAST_RATE,
  FOOD_COUNT, FOOD_DROP_JITTER, FOOD_RADIUS, FOOD_SPAWN_MARGIN, FOOD_VALUE, HEAD_RADIUS,
  INITIAL_LENGTH, MAP_HEIGHT, MAP_WIDTH, MAX_LENGTH, PLAYER_SPAWN_MARGIN, SEGMENT_FOOD_VALUE,
  SEGMENT_RADIUS, SEGMENT_SPACING, TICK_RATE, TURN_SPEED,
};
use super::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

/// Every tunable of the simulation. Handed to the world once and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
  pub map_width: f64,
  pub map_height: f64,
  pub segment_radius: f64,
  pub segment_spacing: f64,
  pub head_radius: f64,
  pub initial_length: usize,
  pub max_length: usize,
  pub base_speed: f64,
  /// Maximum heading change per tick, in radians.
  pub turn_speed: f64,
  pub food_radius: f64,
  /// Target size of the food registry after replenishment.
  pub food_count: usize,
  pub food_value: u32,
  pub segment_food_value: u32,
  pub food_spawn_margin: f64,
  pub food_drop_jitter: f64,
  pub player_spawn_margin: f64,
  pub bot_spawn_margin: f64,
  pub bot_count: usize,
  pub bot_vision_range: f64,
  pub bot_respawn_delay_ms: u64,
  pub tick_rate: u32,
  pub broadcast_rate: u32,
  pub rng_seed: Option<u64>,
}

impl Default for GameConfig {
  fn default() -> Self {
    Self {
      map_width: MAP_WIDTH,
      map_height: MAP_HEIGHT,
      segment_radius: SEGMENT_RADIUS,
      segment_spacing: SEGMENT_SPACING,
      head_radius: HEAD_RADIUS,
      initial_length: INITIAL_LENGTH,
      max_length: MAX_LENGTH,
      base_speed: BASE_SPEED,
      turn_speed: TURN_SPEED,
      food_radius: FOOD_RADIUS,
      food_count: FOOD_COUNT,
      food_value: FOOD_VALUE,
      segment_food_value: SEGMENT_FOOD_VALUE,
      food_spawn_margin: FOOD_SPAWN_MARGIN,
      food_drop_jitter: FOOD_DROP_JITTER,
      player_spawn_margin: PLAYER_SPAWN_MARGIN,
      bot_spawn_margin: BOT_SPAWN_MARGIN,
      bot_count: BOT_COUNT,
      bot_vision_range: BOT_VISION_RANGE,
      bot_respawn_delay_ms: BOT_RESPAWN_DELAY_MS,
      tick_rate: TICK_RATE,
      broadcast_rate: BROADCAST_RATE,
      rng_seed: None,
    }
  }
}

impl GameConfig {
  /// Loads `GAME_CONFIG_PATH` when set, then applies per-field environment overrides.
  pub fn from_env() -> Result<Self, ConfigError> {
    let mut config = match env::var("GAME_CONFIG_PATH") {
      Ok(path) if !path.trim().is_empty() => Self::from_file(Path::new(path.trim()))?,
      _ => Self::default(),
    };

    if let Some(value) = env_parse::<usize>("BOT_COUNT") {
      config.bot_count = value;
    }
    if let Some(value) = env_parse::<usize>("FOOD_COUNT") {
      config.food_count = value;
    }
    if let Some(value) = env_parse::<u32>("TICK_RATE") {
      config.tick_rate = value;
    }
    if let Some(value) = env_parse::<u32>("BROADCAST_RATE") {
      config.broadcast_rate = value;
    }
    if let Some(value) = env_parse::<u64>("RNG_SEED") {
      config.rng_seed = Some(value);
    }

    config.validate()?;
    Ok(config)
  }

  pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
    let raw = std::fs::read_to_string(path).map_err(|error| ConfigError::Read(error.to_string()))?;
    serde_json::from_str(&raw).map_err(|error| ConfigError::Parse(error.to_string()))
  }

  pub fn validate(&self) -> Result<(), ConfigError> {
    let positive = [
      (self.map_width, "map_width must be positive"),
      (self.map_height, "map_height must be positive"),
      (self.segment_radius, "segment_radius must be positive"),
      (self.segment_spacing, "segment_spacing must be positive"),
      (self.head_radius, "head_radius must be positive"),
      (self.base_speed, "base_speed must be positive"),
      (self.turn_speed, "turn_speed must be positive"),
      (self.food_radius, "food_radius must be positive"),
      (self.bot_vision_range, "bot_vision_range must be positive"),
    ];
    for (value, message) in positive {
      if !value.is_finite() || value <= 0.0 {
        return Err(ConfigError::Invalid(message));
      }
    }

    let margins = [
      (self.food_spawn_margin, "food_spawn_margin leaves no interior"),
      (self.player_spawn_margin, "player_spawn_margin leaves no interior"),
      (self.bot_spawn_margin, "bot_spawn_margin leaves no interior"),
    ];
    for (margin, message) in margins {
      if !margin.is_finite()
        || margin < 0.0
        || margin * 2.0 >= self.map_width
        || margin * 2.0 >= self.map_height
      {
        return Err(ConfigError::Invalid(message));
      }
    }

    if !self.food_drop_jitter.is_finite() || self.food_drop_jitter < 0.0 {
      return Err(ConfigError::Invalid("food_drop_jitter must be non-negative"));
    }
    if self.max_length == 0 {
      return Err(ConfigError::Invalid("max_length must be positive"));
    }
    if self.initial_length > self.max_length {
      return Err(ConfigError::Invalid("initial_length exceeds max_length"));
    }
    if self.food_value == 0 || self.segment_food_value == 0 {
      return Err(ConfigError::Invalid("food values must be positive"));
    }
    if self.tick_rate == 0 || self.broadcast_rate == 0 {
      return Err(ConfigError::Invalid("tick rates must be positive"));
    }
    Ok(())
  }

  pub fn tick_interval_ms(&self) -> f64 {
    1000.0 / self.tick_rate as f64
  }

  pub fn broadcast_interval_ms(&self) -> f64 {
    1000.0 / self.broadcast_rate as f64
  }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
  env::var(key).ok().and_then(|value| value.trim().parse().ok())
}
