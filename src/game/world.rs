use super::bot::{ActorView, BotController, Surroundings};
use super::collision::{self, ActorFrame, Verdict};
use super::config::GameConfig;
use super::constants::{BOT_NAMES, SNAKE_COLORS};
use super::error::SimulationError;
use super::food::FoodRegistry;
use super::ids::IdGenerator;
use super::snake::Snake;
use super::types::{
  ActorSnapshot, DeathEvent, FoodDelta, GameStateSnapshot, StateSnapshot, TickOutcome, Vector2,
};
use crate::shared::names::{sanitize_color, sanitize_player_name};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::{HashMap, VecDeque};

/// The authoritative simulation. Every mutation of actors and food happens inside `tick`;
/// joins and leaves are queued, inputs are stored last-write-wins until the next tick.
#[derive(Debug)]
pub struct World {
  config: GameConfig,
  ids: IdGenerator,
  rng: StdRng,
  /// Live actors in insertion order. Collision tie-breaks follow this order.
  snakes: Vec<Snake>,
  bots: Vec<BotController>,
  foods: FoodRegistry,
  commands: VecDeque<Command>,
  pending_inputs: HashMap<String, f64>,
  scheduled: Vec<ScheduledEvent>,
  tick_index: u64,
  /// Set once a tick fails. A halted world refuses further ticks and snapshots.
  halted: bool,
}

#[derive(Debug)]
enum Command {
  Join {
    actor_id: String,
    name: String,
    color: Option<String>,
  },
  Leave {
    actor_id: String,
  },
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum ScheduledKind {
  SpawnBot,
}

#[derive(Debug, Clone, Copy)]
struct ScheduledEvent {
  due_ms: f64,
  kind: ScheduledKind,
}

#[derive(Debug, Clone)]
pub struct JoinAccepted {
  pub actor_id: String,
  pub snapshot: GameStateSnapshot,
}

impl World {
  pub fn new(config: GameConfig) -> Result<Self, SimulationError> {
    config.validate()?;
    let rng = match config.rng_seed {
      Some(seed) => StdRng::seed_from_u64(seed),
      None => StdRng::from_entropy(),
    };
    let foods = FoodRegistry::new(&config);
    let mut world = Self {
      config,
      ids: IdGenerator::new(),
      rng,
      snakes: Vec::new(),
      bots: Vec::new(),
      foods,
      commands: VecDeque::new(),
      pending_inputs: HashMap::new(),
      scheduled: Vec::new(),
      tick_index: 0,
      halted: false,
    };

    world.foods.replenish(&mut world.ids, &mut world.rng)?;
    for _ in 0..world.config.bot_count {
      world.spawn_bot()?;
    }
    Ok(world)
  }

  pub fn snakes(&self) -> &[Snake] {
    &self.snakes
  }

  #[cfg(test)]
  pub fn snake(&self, actor_id: &str) -> Option<&Snake> {
    self.snakes.iter().find(|snake| snake.id == actor_id)
  }

  #[cfg(test)]
  pub(crate) fn push_snake(&mut self, snake: Snake) {
    self.snakes.push(snake);
  }

  pub fn foods(&self) -> &FoodRegistry {
    &self.foods
  }

  pub fn tick_index(&self) -> u64 {
    self.tick_index
  }

  pub fn is_halted(&self) -> bool {
    self.halted
  }

  /// Simulation clock in milliseconds, derived from the tick count.
  pub fn now_ms(&self) -> f64 {
    self.tick_index as f64 * 1000.0 / self.config.tick_rate as f64
  }

  /// Reserves an id and queues the actor for insertion at the next tick boundary.
  pub fn join(&mut self, name: &str, color: Option<&str>) -> Result<JoinAccepted, SimulationError> {
    let snapshot = self.snapshot()?;
    let actor_id = self.ids.player();
    self.commands.push_back(Command::Join {
      actor_id: actor_id.clone(),
      name: sanitize_player_name(name, "Player"),
      color: color.and_then(sanitize_color),
    });
    Ok(JoinAccepted { actor_id, snapshot })
  }

  /// Last write wins until the next tick. Non-finite headings are dropped.
  pub fn queue_input(&mut self, actor_id: &str, heading: f64) {
    if !heading.is_finite() {
      return;
    }
    self.pending_inputs.insert(actor_id.to_string(), heading);
  }

  pub fn queue_leave(&mut self, actor_id: &str) {
    self.commands.push_back(Command::Leave {
      actor_id: actor_id.to_string(),
    });
  }

  /// Runs one tick. Any error halts the world for good: the broken state is never
  /// served again.
  pub fn tick(&mut self) -> Result<TickOutcome, SimulationError> {
    if self.halted {
      return Err(SimulationError::Halted);
    }
    let result = self.step();
    if result.is_err() {
      self.halted = true;
    }
    result
  }

  fn step(&mut self) -> Result<TickOutcome, SimulationError> {
    self.tick_index += 1;
    let now = self.now_ms();
    let mut delta = FoodDelta::default();

    self.drain_commands(&mut delta)?;
    self.apply_inputs();
    self.fire_scheduled(now)?;
    self.drive_bots(now);
    self.advance_actors()?;
    let deaths = self.resolve_collisions(&mut delta)?;
    self.remove_dead(now, &mut delta)?;
    delta
      .added
      .extend(self.foods.replenish(&mut self.ids, &mut self.rng)?);

    Ok(TickOutcome {
      deaths,
      food: if delta.is_empty() { None } else { Some(delta) },
    })
  }

  pub fn snapshot(&self) -> Result<GameStateSnapshot, SimulationError> {
    Ok(GameStateSnapshot {
      snakes: self.live_snapshots()?,
      foods: self.foods.all(),
      timestamp: self.now_ms() as u64,
    })
  }

  pub fn broadcast_snapshot(&self) -> Result<StateSnapshot, SimulationError> {
    Ok(StateSnapshot {
      snakes: self.live_snapshots()?,
      timestamp: self.now_ms() as u64,
    })
  }

  fn live_snapshots(&self) -> Result<Vec<ActorSnapshot>, SimulationError> {
    if self.halted {
      return Err(SimulationError::Halted);
    }
    Ok(
      self
        .snakes
        .iter()
        .filter(|snake| !snake.is_dead())
        .map(Snake::snapshot)
        .collect(),
    )
  }

  fn snake_mut(&mut self, actor_id: &str) -> Option<&mut Snake> {
    self.snakes.iter_mut().find(|snake| snake.id == actor_id)
  }

  fn drain_commands(&mut self, delta: &mut FoodDelta) -> Result<(), SimulationError> {
    while let Some(command) = self.commands.pop_front() {
      match command {
        Command::Join {
          actor_id,
          name,
          color,
        } => self.insert_player(actor_id, name, color),
        Command::Leave { actor_id } => {
          if self.remove_actor(&actor_id, delta)? {
            tracing::info!(actor_id = %actor_id, "actor left");
          }
        }
      }
    }
    Ok(())
  }

  fn apply_inputs(&mut self) {
    let inputs = std::mem::take(&mut self.pending_inputs);
    for (actor_id, heading) in inputs {
      let Some(snake) = self.snake_mut(&actor_id) else { continue };
      if snake.is_dead() || snake.is_bot {
        continue;
      }
      snake.set_desired_heading(heading);
    }
  }

  fn fire_scheduled(&mut self, now: f64) -> Result<(), SimulationError> {
    let (due, pending): (Vec<ScheduledEvent>, Vec<ScheduledEvent>) = std::mem::take(&mut self.scheduled)
      .into_iter()
      .partition(|event| event.due_ms <= now);
    self.scheduled = pending;
    for event in due {
      match event.kind {
        ScheduledKind::SpawnBot => {
          let actor_id = self.spawn_bot()?;
          tracing::debug!(actor_id = %actor_id, "bot respawned");
        }
      }
    }
    Ok(())
  }

  fn drive_bots(&mut self, now: f64) {
    if self.bots.is_empty() {
      return;
    }
    let views: Vec<ActorView<'_>> = self
      .snakes
      .iter()
      .filter(|snake| !snake.is_dead())
      .map(ActorView::of)
      .collect();
    let surroundings = Surroundings {
      actors: &views,
      foods: &self.foods,
      config: &self.config,
    };

    let mut headings: Vec<(String, f64)> = Vec::with_capacity(self.bots.len());
    for bot in self.bots.iter_mut() {
      let Some(me) = views.iter().find(|view| view.id == bot.actor_id()) else { continue };
      let before = bot.behavior();
      let heading = bot.update(me, surroundings, now, &mut self.rng);
      if bot.behavior() != before {
        tracing::trace!(
          actor_id = %bot.actor_id(),
          behavior = bot.behavior().as_str(),
          "bot behavior changed"
        );
      }
      headings.push((bot.actor_id().to_string(), heading));
    }

    for (actor_id, heading) in headings {
      if let Some(snake) = self.snake_mut(&actor_id) {
        snake.set_desired_heading(heading);
      }
    }
  }

  fn advance_actors(&mut self) -> Result<(), SimulationError> {
    for snake in self.snakes.iter_mut().filter(|snake| !snake.is_dead()) {
      snake.advance(&self.config);
      if !snake.is_finite() {
        return Err(SimulationError::NonFiniteActor {
          actor_id: snake.id.clone(),
        });
      }
    }
    Ok(())
  }

  /// Applies growth, food removal and deaths from one frozen collision pass.
  fn resolve_collisions(&mut self, delta: &mut FoodDelta) -> Result<Vec<DeathEvent>, SimulationError> {
    let frames: Vec<ActorFrame> = self
      .snakes
      .iter()
      .filter(|snake| !snake.is_dead())
      .map(ActorFrame::capture)
      .collect();
    let results = collision::resolve(&frames, &self.foods, &self.config);

    let mut deaths = Vec::new();
    for result in results {
      let max_length = self.config.max_length;
      let mut growth: u32 = 0;
      for food_id in &result.eaten {
        if let Some(food) = self.foods.remove(food_id) {
          growth = growth.saturating_add(food.value);
          delta.removed_ids.push(food.id);
        }
      }

      let Some(snake) = self.snake_mut(&result.actor_id) else { continue };
      snake.grow(growth, max_length);

      if let Verdict::Dead { killer_id } = result.verdict {
        if snake.mark_dead() {
          tracing::debug!(
            actor_id = %snake.id,
            killer_id = killer_id.as_deref().unwrap_or("wall"),
            final_length = snake.length(),
            "actor died"
          );
          deaths.push(DeathEvent {
            actor_id: snake.id.clone(),
            killer_id,
            final_length: snake.length(),
          });
        }
      }
    }
    Ok(deaths)
  }

  fn remove_dead(&mut self, now: f64, delta: &mut FoodDelta) -> Result<(), SimulationError> {
    let dead: Vec<(String, bool)> = self
      .snakes
      .iter()
      .filter(|snake| snake.is_dead())
      .map(|snake| (snake.id.clone(), snake.is_bot))
      .collect();

    for (actor_id, is_bot) in dead {
      self.remove_actor(&actor_id, delta)?;
      if is_bot {
        self.scheduled.push(ScheduledEvent {
          due_ms: now + self.config.bot_respawn_delay_ms as f64,
          kind: ScheduledKind::SpawnBot,
        });
      }
    }
    Ok(())
  }

  /// Drops the actor and scatters its body as food. Unknown ids are ignored.
  fn remove_actor(&mut self, actor_id: &str, delta: &mut FoodDelta) -> Result<bool, SimulationError> {
    let Some(index) = self.snakes.iter().position(|snake| snake.id == actor_id) else {
      return Ok(false);
    };
    let snake = self.snakes.remove(index);
    self.bots.retain(|bot| bot.actor_id() != actor_id);
    self.pending_inputs.remove(actor_id);

    let dropped = self
      .foods
      .spawn_from_body(&snake.body, &mut self.ids, &mut self.rng)?;
    delta.added.extend(dropped);
    Ok(true)
  }

  fn insert_player(&mut self, actor_id: String, name: String, color: Option<String>) {
    let margin = self.config.player_spawn_margin;
    let head = self.random_point(margin);
    let heading = self.rng.gen::<f64>() * std::f64::consts::TAU;
    let color = color.unwrap_or_else(|| self.random_snake_color());
    tracing::info!(actor_id = %actor_id, name = %name, "player joined");
    let snake = Snake::new(actor_id, name, color, head, heading, false, &self.config);
    self.snakes.push(snake);
  }

  fn spawn_bot(&mut self) -> Result<String, SimulationError> {
    let actor_id = self.ids.bot();
    let margin = self.config.bot_spawn_margin;
    let head = self.random_point(margin);
    let heading = self.rng.gen::<f64>() * std::f64::consts::TAU;
    let name = BOT_NAMES[self.rng.gen_range(0..BOT_NAMES.len())].to_string();
    let color = self.random_snake_color();
    let snake = Snake::new(actor_id.clone(), name, color, head, heading, true, &self.config);
    let bot = BotController::new(&snake, &mut self.rng)?;
    tracing::trace!(
      actor_id = %actor_id,
      personality = bot.personality().as_str(),
      "bot spawned"
    );
    self.snakes.push(snake);
    self.bots.push(bot);
    Ok(actor_id)
  }

  fn random_point(&mut self, margin: f64) -> Vector2 {
    Vector2::new(
      margin + self.rng.gen::<f64>() * (self.config.map_width - margin * 2.0),
      margin + self.rng.gen::<f64>() * (self.config.map_height - margin * 2.0),
    )
  }

  fn random_snake_color(&mut self) -> String {
    SNAKE_COLORS[self.rng.gen_range(0..SNAKE_COLORS.len())].to_string()
  }
}
