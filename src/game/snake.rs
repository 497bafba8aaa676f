use super::config::GameConfig;
use super::math::{distance, normalize_angle, offset, shortest_angle_delta};
use super::types::{ActorSnapshot, Vector2};

#[derive(Debug, Clone)]
pub struct Snake {
    pub id: String,
    pub name: String,
    pub color: String,
    pub head: Vector2,
    /// Current heading in `(-PI, PI]`.
    pub heading: f64,
    /// Last requested heading. Not clamped; `advance` turns toward it.
    pub desired_heading: f64,
    /// Neck to tail.
    pub body: Vec<Vector2>,
    pub is_bot: bool,
    dead: bool,
}

impl Snake {
    /// Builds a snake with a straight tail of `initial_length` segments trailing the head.
    pub fn new(
        id: String,
        name: String,
        color: String,
        head: Vector2,
        heading: f64,
        is_bot: bool,
        config: &GameConfig,
    ) -> Self {
        let heading = normalize_angle(heading);
        let body = (1..=config.initial_length)
            .map(|index| offset(head, heading, -config.segment_spacing * index as f64))
            .collect();
        Self {
            id,
            name,
            color,
            head,
            heading,
            desired_heading: heading,
            body,
            is_bot,
            dead: false,
        }
    }

    pub fn length(&self) -> usize {
        self.body.len()
    }

    pub fn is_dead(&self) -> bool {
        self.dead
    }

    /// Marks the snake dead. Returns false when it already was.
    pub fn mark_dead(&mut self) -> bool {
        if self.dead {
            return false;
        }
        self.dead = true;
        true
    }

    pub fn set_desired_heading(&mut self, heading: f64) {
        if heading.is_finite() {
            self.desired_heading = heading;
        }
    }

    /// One tick of movement: turn (rate limited), step forward, re-thread the body.
    pub fn advance(&mut self, config: &GameConfig) {
        if self.dead {
            return;
        }

        let delta = shortest_angle_delta(self.heading, self.desired_heading);
        let turn = delta.clamp(-config.turn_speed, config.turn_speed);
        self.heading = normalize_angle(self.heading + turn);

        self.head = offset(self.head, self.heading, config.base_speed);

        // Segments only move once their leader is further than one spacing away, which leaves
        // slack in the chain on tight turns.
        let spacing = config.segment_spacing;
        let mut leader = self.head;
        for segment in self.body.iter_mut() {
            let dist = distance(leader, *segment);
            if dist > spacing {
                let ratio = spacing / dist;
                segment.x = leader.x - (leader.x - segment.x) * ratio;
                segment.y = leader.y - (leader.y - segment.y) * ratio;
            }
            leader = *segment;
        }
    }

    /// Appends `amount` segments on top of the current tail, never past `max_length`.
    pub fn grow(&mut self, amount: u32, max_length: usize) {
        let tail = self.body.last().copied().unwrap_or(self.head);
        let room = max_length.saturating_sub(self.body.len());
        let added = (amount as usize).min(room);
        self.body.extend(std::iter::repeat(tail).take(added));
    }

    pub fn is_finite(&self) -> bool {
        self.head.is_finite()
            && self.heading.is_finite()
            && self.body.iter().all(|segment| segment.is_finite())
    }

    pub fn snapshot(&self) -> ActorSnapshot {
        ActorSnapshot {
            id: self.id.clone(),
            name: self.name.clone(),
            color: self.color.clone(),
            head: self.head,
            heading: self.heading,
            length: self.length(),
            is_bot: self.is_bot,
        }
    }
}
