use super::config::GameConfig;
use super::food::FoodRegistry;
use super::math::within;
use super::snake::Snake;
use super::types::Vector2;
use std::collections::HashSet;

/// Positions of one live actor, copied once at the start of the collision phase.
#[derive(Debug, Clone)]
pub struct ActorFrame {
    pub id: String,
    pub head: Vector2,
    pub body: Vec<Vector2>,
}

impl ActorFrame {
    pub fn capture(snake: &Snake) -> Self {
        Self {
            id: snake.id.clone(),
            head: snake.head,
            body: snake.body.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    Alive,
    Dead { killer_id: Option<String> },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ActorCollision {
    pub actor_id: String,
    /// Food ids this actor consumed, in registry order.
    pub eaten: Vec<String>,
    pub verdict: Verdict,
}

pub fn hits_wall(head: Vector2, config: &GameConfig) -> bool {
    let margin = config.head_radius;
    head.x < margin
        || head.x > config.map_width - margin
        || head.y < margin
        || head.y > config.map_height - margin
}

pub fn food_in_reach<'a>(
    head: Vector2,
    foods: &'a FoodRegistry,
    claimed: &HashSet<String>,
    config: &GameConfig,
) -> Vec<&'a str> {
    let reach = config.head_radius + config.food_radius;
    foods
        .iter()
        .filter(|food| !claimed.contains(&food.id))
        .filter(|food| within(head, food.position(), reach))
        .map(|food| food.id.as_str())
        .collect()
}

/// First other actor, in frame order, whose body the head overlaps. No nearest-hit tie-break.
pub fn find_killer<'a>(index: usize, frames: &'a [ActorFrame], config: &GameConfig) -> Option<&'a str> {
    let head = frames[index].head;
    let reach = config.head_radius + config.segment_radius;
    frames
        .iter()
        .enumerate()
        .filter(|(other_index, _)| *other_index != index)
        .find(|(_, other)| other.body.iter().any(|segment| within(head, *segment, reach)))
        .map(|(_, other)| other.id.as_str())
}

/// Resolves one tick of collisions for `frames`, which must be in live-set insertion order.
///
/// Checks run against the frozen frames only, so two actors that enter each other's bodies on
/// the same tick both die. Food is claimed by the first actor (in frame order) that reaches it.
/// An actor's own body is passable and never checked.
pub fn resolve(frames: &[ActorFrame], foods: &FoodRegistry, config: &GameConfig) -> Vec<ActorCollision> {
    let mut claimed: HashSet<String> = HashSet::new();
    let mut results = Vec::with_capacity(frames.len());

    for (index, frame) in frames.iter().enumerate() {
        if hits_wall(frame.head, config) {
            results.push(ActorCollision {
                actor_id: frame.id.clone(),
                eaten: Vec::new(),
                verdict: Verdict::Dead { killer_id: None },
            });
            continue;
        }

        let eaten: Vec<String> = food_in_reach(frame.head, foods, &claimed, config)
            .into_iter()
            .map(str::to_string)
            .collect();
        claimed.extend(eaten.iter().cloned());

        let verdict = match find_killer(index, frames, config) {
            Some(killer) => Verdict::Dead {
                killer_id: Some(killer.to_string()),
            },
            None => Verdict::Alive,
        };

        results.push(ActorCollision {
            actor_id: frame.id.clone(),
            eaten,
            verdict,
        });
    }

    results
}
