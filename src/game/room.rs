use super::config::GameConfig;
use super::error::SimulationError;
use super::types::{GameStateSnapshot, TickOutcome};
use super::world::World;
use crate::protocol::{self, ClientMessage, ServerMessage};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tokio::sync::Mutex;
use uuid::Uuid;

/// One arena: the world behind a lock plus the sessions watching it.
#[derive(Debug)]
pub struct Room {
  state: Mutex<RoomState>,
  running: AtomicBool,
  halted: AtomicBool,
  tick_interval: Duration,
  broadcast_interval: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RoomStats {
  pub sessions: usize,
  pub actors: usize,
  pub foods: usize,
  pub tick: u64,
}

#[derive(Debug)]
struct SessionEntry {
  sender: UnboundedSender<String>,
  actor_id: Option<String>,
}

#[derive(Debug)]
struct RoomState {
  world: World,
  sessions: HashMap<String, SessionEntry>,
}

impl Room {
  pub fn new(config: GameConfig) -> Result<Self, SimulationError> {
    config.validate()?;
    let tick_interval = Duration::from_secs_f64(config.tick_interval_ms() / 1000.0);
    let broadcast_interval = Duration::from_secs_f64(config.broadcast_interval_ms() / 1000.0);
    let world = World::new(config)?;
    Ok(Self {
      state: Mutex::new(RoomState {
        world,
        sessions: HashMap::new(),
      }),
      running: AtomicBool::new(false),
      halted: AtomicBool::new(false),
      tick_interval,
      broadcast_interval,
    })
  }

  pub fn is_running(&self) -> bool {
    self.running.load(Ordering::SeqCst)
  }

  pub fn is_halted(&self) -> bool {
    self.halted.load(Ordering::SeqCst)
  }

  pub async fn add_session(&self, sender: UnboundedSender<String>) -> String {
    let session_id = Uuid::new_v4().to_string();
    let mut state = self.state.lock().await;
    state.sessions.insert(
      session_id.clone(),
      SessionEntry {
        sender,
        actor_id: None,
      },
    );
    session_id
  }

  pub async fn remove_session(&self, session_id: &str) {
    let mut state = self.state.lock().await;
    state.disconnect_session(session_id);
  }

  pub async fn handle_text_message(&self, session_id: &str, text: &str) {
    let Some(message) = protocol::decode_client_message(text) else {
      tracing::debug!(session_id, "dropping malformed client message");
      return;
    };
    let mut state = self.state.lock().await;
    match message {
      ClientMessage::Join { name, color } => {
        state.handle_join(session_id, name, color);
      }
      ClientMessage::Input { target_angle } => {
        state.handle_input(session_id, target_angle);
      }
    }
  }

  /// Fails once the simulation has halted.
  pub async fn snapshot(&self) -> Result<GameStateSnapshot, SimulationError> {
    let state = self.state.lock().await;
    state.world.snapshot()
  }

  pub async fn stats(&self) -> RoomStats {
    let state = self.state.lock().await;
    RoomStats {
      sessions: state.sessions.len(),
      actors: state.world.snakes().len(),
      foods: state.world.foods().len(),
      tick: state.world.tick_index(),
    }
  }

  /// Starts the tick and broadcast loops once. The world keeps running without sessions so
  /// bots stay active. A halted room never starts again.
  pub fn start(self: &Arc<Self>) {
    if self.is_halted() {
      tracing::warn!("refusing to restart a halted room");
      return;
    }
    if self
      .running
      .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
      .is_err()
    {
      return;
    }

    let room = Arc::clone(self);
    tokio::spawn(async move {
      let mut interval = tokio::time::interval(room.tick_interval);
      interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
      while room.is_running() {
        interval.tick().await;
        if !room.is_running() {
          break;
        }
        if let Err(error) = room.tick_once().await {
          tracing::error!(%error, "simulation halted");
        }
      }
    });

    let room = Arc::clone(self);
    tokio::spawn(async move {
      let mut interval = tokio::time::interval(room.broadcast_interval);
      interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
      while room.is_running() {
        interval.tick().await;
        if !room.is_running() {
          break;
        }
        room.broadcast_once().await;
      }
    });
  }

  /// A failed tick halts the room: both loops stop and nothing is broadcast afterwards.
  pub async fn tick_once(&self) -> Result<(), SimulationError> {
    let mut state = self.state.lock().await;
    match state.world.tick() {
      Ok(outcome) => {
        state.dispatch(outcome);
        Ok(())
      }
      Err(error) => {
        self.halted.store(true, Ordering::SeqCst);
        self.running.store(false, Ordering::SeqCst);
        Err(error)
      }
    }
  }

  pub async fn broadcast_once(&self) {
    let mut state = self.state.lock().await;
    let Ok(snapshot) = state.world.broadcast_snapshot() else { return };
    state.broadcast(&ServerMessage::State(snapshot));
  }
}

impl RoomState {
  fn disconnect_session(&mut self, session_id: &str) {
    let Some(entry) = self.sessions.remove(session_id) else { return };
    if let Some(actor_id) = entry.actor_id {
      self.world.queue_leave(&actor_id);
    }
  }

  /// A session may join again after dying; a still-attached actor is released first.
  fn handle_join(&mut self, session_id: &str, name: Option<String>, color: Option<String>) {
    let Some(previous) = self.sessions.get(session_id).map(|entry| entry.actor_id.clone()) else {
      return;
    };
    if let Some(actor_id) = previous {
      self.world.queue_leave(&actor_id);
    }

    let raw_name = name.unwrap_or_else(|| "Player".to_string());
    let accepted = match self.world.join(&raw_name, color.as_deref()) {
      Ok(accepted) => accepted,
      Err(error) => {
        tracing::warn!(%error, session_id, "join rejected");
        return;
      }
    };
    let message = ServerMessage::Init {
      player_id: accepted.actor_id.clone(),
      state: accepted.snapshot,
    };
    let payload = encode(&message);
    if let Some(session) = self.sessions.get_mut(session_id) {
      session.actor_id = Some(accepted.actor_id);
      if let Some(payload) = payload {
        let _ = session.sender.send(payload);
      }
    }
  }

  fn handle_input(&mut self, session_id: &str, target_angle: f64) {
    let Some(actor_id) = self
      .sessions
      .get(session_id)
      .and_then(|entry| entry.actor_id.clone())
    else {
      return;
    };
    self.world.queue_input(&actor_id, target_angle);
  }

  fn dispatch(&mut self, outcome: TickOutcome) {
    for death in outcome.deaths {
      let Some(session) = self
        .sessions
        .values_mut()
        .find(|entry| entry.actor_id.as_deref() == Some(death.actor_id.as_str()))
      else {
        continue;
      };
      session.actor_id = None;
      let message = ServerMessage::Death {
        killer_id: death.killer_id,
        final_length: death.final_length,
      };
      if let Some(payload) = encode(&message) {
        let _ = session.sender.send(payload);
      }
    }

    if let Some(delta) = outcome.food {
      self.broadcast(&ServerMessage::FoodUpdate(delta));
    }
  }

  fn broadcast(&mut self, message: &ServerMessage) {
    let Some(payload) = encode(message) else { return };
    let mut stale = Vec::new();
    for (session_id, session) in &self.sessions {
      if session.sender.send(payload.clone()).is_err() {
        stale.push(session_id.clone());
      }
    }
    for session_id in stale {
      tracing::debug!(session_id = %session_id, "dropping stale session");
      self.disconnect_session(&session_id);
    }
  }
}

fn encode(message: &ServerMessage) -> Option<String> {
  match protocol::encode_server_message(message) {
    Ok(payload) => Some(payload),
    Err(error) => {
      tracing::warn!(%error, "failed to encode server message");
      None
    }
  }
}
