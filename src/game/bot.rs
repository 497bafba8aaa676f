//! Bot pilots. Each bot steers a simulated mouse pointer the way a person would: decisions
//! arrive after a reaction delay, the pointer eases toward its target, and the hand shakes.
//! The snake's desired heading is always read off the pointer, never set from a tactic.

use super::config::GameConfig;
use super::error::SimulationError;
use super::food::FoodRegistry;
use super::math::{clamp, distance, offset};
use super::snake::Snake;
use super::types::Vector2;
use rand::seq::SliceRandom;
use rand::Rng;
use std::f64::consts::PI;

const HARD_WALL_MARGIN: f64 = 100.0;
const SOFT_WALL_MARGIN: f64 = 180.0;
const HARD_WALL_PUSH: f64 = 300.0;
const SOFT_WALL_PUSH: f64 = 150.0;
const DANGER_ZONE: f64 = 100.0;
const LOOK_AHEAD: f64 = 80.0;
const LOOK_AHEAD_SEGMENTS: usize = 50;
const LOOK_AHEAD_RADIUS: f64 = 40.0;
const SIDESTEP_DISTANCE: f64 = 150.0;
const ATTACK_MIN_LENGTH: usize = 15;
const CHAOTIC_ATTACK_MIN_LENGTH: usize = 10;
const ATTACK_RANGE: f64 = 200.0;
const CHAOTIC_ATTACK_RANGE: f64 = 150.0;
const ATTACK_SIZE_RATIO: f64 = 0.9;
const ATTACK_BODY_FRACTION: f64 = 0.4;
const ATTACK_DISTANCE_WEIGHT: f64 = 0.5;
const FOOD_VALUE_WEIGHT: f64 = 30.0;
const FOOD_THREAT_RADIUS: f64 = 80.0;
const FOOD_THREAT_PENALTY: f64 = 200.0;
const POINTER_MARGIN: f64 = 50.0;
const POINTER_LEAD: f64 = 200.0;
const PANIC_DECAY: f64 = 0.1;
const WALL_PANIC: f64 = 0.3;
const FLEE_PANIC: f64 = 0.2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Personality {
    Aggressive,
    Passive,
    Hunter,
    Farmer,
    Chaotic,
}

impl Personality {
    pub const ALL: [Personality; 5] = [
        Personality::Aggressive,
        Personality::Passive,
        Personality::Hunter,
        Personality::Farmer,
        Personality::Chaotic,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Personality::Aggressive => "aggressive",
            Personality::Passive => "passive",
            Personality::Hunter => "hunter",
            Personality::Farmer => "farmer",
            Personality::Chaotic => "chaotic",
        }
    }

    fn attack_min_length(self) -> usize {
        match self {
            Personality::Chaotic => CHAOTIC_ATTACK_MIN_LENGTH,
            _ => ATTACK_MIN_LENGTH,
        }
    }

    fn attack_range(self) -> f64 {
        match self {
            Personality::Chaotic => CHAOTIC_ATTACK_RANGE,
            _ => ATTACK_RANGE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Behavior {
    Idle,
    Wandering,
    HuntingFood,
    Attacking,
    Fleeing,
    AvoidingWall,
    Distracted,
    RandomTurn,
}

impl Behavior {
    pub fn as_str(self) -> &'static str {
        match self {
            Behavior::Idle => "idle",
            Behavior::Wandering => "wandering",
            Behavior::HuntingFood => "hunting_food",
            Behavior::Attacking => "attacking",
            Behavior::Fleeing => "fleeing",
            Behavior::AvoidingWall => "avoiding_wall",
            Behavior::Distracted => "distracted",
            Behavior::RandomTurn => "random",
        }
    }
}

/// Per-bot human factors, rolled once at creation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BotTraits {
    /// Fraction of the remaining pointer distance covered per tick.
    pub mouse_smoothing: f64,
    pub reaction_delay_ms: f64,
    pub accuracy: f64,
    /// Probability of staying focused at each decision.
    pub attention: f64,
    /// +1 or -1.
    pub favorite_direction: f64,
}

impl BotTraits {
    pub fn roll<R: Rng>(rng: &mut R) -> Result<Self, SimulationError> {
        let traits = Self {
            mouse_smoothing: 0.05 + rng.gen::<f64>() * 0.1,
            reaction_delay_ms: 80.0 + rng.gen::<f64>() * 200.0,
            accuracy: 0.6 + rng.gen::<f64>() * 0.35,
            attention: 0.85 + rng.gen::<f64>() * 0.14,
            favorite_direction: if rng.gen_bool(0.5) { 1.0 } else { -1.0 },
        };
        traits.validate()?;
        Ok(traits)
    }

    pub fn validate(&self) -> Result<(), SimulationError> {
        if !(self.mouse_smoothing > 0.0 && self.mouse_smoothing <= 1.0) {
            return Err(SimulationError::BotConstruction("mouse smoothing out of range"));
        }
        if !(self.reaction_delay_ms.is_finite() && self.reaction_delay_ms > 0.0) {
            return Err(SimulationError::BotConstruction("reaction delay must be positive"));
        }
        if !(0.0..=1.0).contains(&self.accuracy) {
            return Err(SimulationError::BotConstruction("accuracy out of range"));
        }
        if !(0.0..=1.0).contains(&self.attention) {
            return Err(SimulationError::BotConstruction("attention out of range"));
        }
        if self.favorite_direction.abs() != 1.0 {
            return Err(SimulationError::BotConstruction("favorite direction must be +1 or -1"));
        }
        Ok(())
    }
}

/// Read-only view of a live actor as bots perceive it.
#[derive(Debug, Clone, Copy)]
pub struct ActorView<'a> {
    pub id: &'a str,
    pub head: Vector2,
    pub heading: f64,
    pub length: usize,
    pub body: &'a [Vector2],
}

impl<'a> ActorView<'a> {
    pub fn of(snake: &'a Snake) -> Self {
        Self {
            id: &snake.id,
            head: snake.head,
            heading: snake.heading,
            length: snake.length(),
            body: &snake.body,
        }
    }
}

/// Everything a bot may look at during one tick.
#[derive(Clone, Copy)]
pub struct Surroundings<'a> {
    pub actors: &'a [ActorView<'a>],
    pub foods: &'a FoodRegistry,
    pub config: &'a GameConfig,
}

#[derive(Debug, Clone)]
pub struct BotController {
    actor_id: String,
    personality: Personality,
    traits: BotTraits,
    behavior: Behavior,
    mouse: Vector2,
    target_mouse: Vector2,
    panic_level: f64,
    next_decision_at: f64,
    distracted_until: Option<f64>,
    last_direction_change: f64,
}

impl BotController {
    pub fn new<R: Rng>(snake: &Snake, rng: &mut R) -> Result<Self, SimulationError> {
        let personality = Personality::ALL
            .choose(rng)
            .copied()
            .ok_or(SimulationError::BotConstruction("no personality available"))?;
        let traits = BotTraits::roll(rng)?;
        Ok(Self::with_traits(snake, personality, traits))
    }

    pub fn with_traits(snake: &Snake, personality: Personality, traits: BotTraits) -> Self {
        let mouse = offset(snake.head, snake.heading, POINTER_LEAD);
        Self {
            actor_id: snake.id.clone(),
            personality,
            traits,
            behavior: Behavior::Idle,
            mouse,
            target_mouse: mouse,
            panic_level: 0.0,
            next_decision_at: 0.0,
            distracted_until: None,
            last_direction_change: 0.0,
        }
    }

    pub fn actor_id(&self) -> &str {
        &self.actor_id
    }

    pub fn personality(&self) -> Personality {
        self.personality
    }

    pub fn behavior(&self) -> Behavior {
        self.behavior
    }

    #[cfg(test)]
    pub fn pointer_target(&self) -> Vector2 {
        self.target_mouse
    }

    #[cfg(test)]
    pub fn panic_level(&self) -> f64 {
        self.panic_level
    }

    /// Runs one tick for this bot and returns the heading its snake should steer toward.
    /// Tactics are only re-evaluated once the reaction delay has elapsed.
    pub fn update<R: Rng>(
        &mut self,
        me: &ActorView<'_>,
        world: Surroundings<'_>,
        now_ms: f64,
        rng: &mut R,
    ) -> f64 {
        self.ease_pointer(rng);

        let hand_shake = (rng.gen::<f64>() - 0.5) * 0.02 * (1.0 + self.panic_level);
        let heading = (self.mouse.y - me.head.y).atan2(self.mouse.x - me.head.x) + hand_shake;

        if now_ms < self.next_decision_at {
            return heading;
        }
        let delay = self.traits.reaction_delay_ms;
        self.next_decision_at = now_ms + delay + delay * 0.5 * rng.gen::<f64>();

        if self.distracted_until.is_none() && rng.gen::<f64>() > self.traits.attention {
            self.distracted_until = Some(now_ms + 500.0 + rng.gen::<f64>() * 1500.0);
            self.behavior = Behavior::Distracted;
        }
        if let Some(until) = self.distracted_until {
            if now_ms > until {
                self.distracted_until = None;
            } else {
                return heading;
            }
        }

        self.decide(me, world, now_ms, rng);
        heading
    }

    fn ease_pointer<R: Rng>(&mut self, rng: &mut R) {
        let smoothing = self.traits.mouse_smoothing * (1.0 + self.panic_level * 0.5);
        self.mouse.x += (self.target_mouse.x - self.mouse.x) * smoothing;
        self.mouse.y += (self.target_mouse.y - self.mouse.y) * smoothing;

        if rng.gen::<f64>() < 0.3 {
            self.mouse.x += (rng.gen::<f64>() - 0.5) * 3.0;
            self.mouse.y += (rng.gen::<f64>() - 0.5) * 3.0;
        }
    }

    fn decide<R: Rng>(&mut self, me: &ActorView<'_>, world: Surroundings<'_>, now_ms: f64, rng: &mut R) {
        self.panic_level = (self.panic_level - PANIC_DECAY).max(0.0);

        if let Some(target) = self.check_walls(me, world.config, rng) {
            self.set_pointer_target(target, world.config);
            self.behavior = Behavior::AvoidingWall;
            self.panic_level = (self.panic_level + WALL_PANIC).min(1.0);
            return;
        }

        if let Some(target) = self.check_danger(me, world, rng) {
            self.set_pointer_target(target, world.config);
            self.behavior = Behavior::Fleeing;
            self.panic_level = (self.panic_level + FLEE_PANIC).min(1.0);
            return;
        }

        let handled = match self.personality {
            Personality::Aggressive => {
                self.try_attack(me, world, rng) || self.try_hunt_food(me, world)
            }
            Personality::Hunter => {
                (rng.gen::<f64>() < 0.7 && self.try_attack(me, world, rng))
                    || self.try_hunt_food(me, world)
            }
            Personality::Farmer => {
                self.try_hunt_food(me, world)
                    || (rng.gen::<f64>() < 0.2 && self.try_attack(me, world, rng))
            }
            Personality::Passive => self.try_hunt_food(me, world),
            Personality::Chaotic => {
                if rng.gen::<f64>() < 0.3 {
                    self.random_turn(me, world.config, now_ms, rng);
                    true
                } else {
                    (rng.gen::<f64>() < 0.5 && self.try_attack(me, world, rng))
                        || self.try_hunt_food(me, world)
                }
            }
        };

        if !handled {
            self.wander(me, world.config, now_ms, rng);
        }
    }

    /// Hard margin pushes twice as far as the soft one; each axis is handled on its own.
    fn check_walls<R: Rng>(&self, me: &ActorView<'_>, config: &GameConfig, rng: &mut R) -> Option<Vector2> {
        let head = me.head;
        let push_x = axis_push(head.x, config.map_width);
        let push_y = axis_push(head.y, config.map_height);
        if push_x == 0.0 && push_y == 0.0 {
            return None;
        }

        let inaccuracy = (1.0 - self.traits.accuracy) * 50.0;
        Some(Vector2::new(
            head.x + push_x + (rng.gen::<f64>() - 0.5) * inaccuracy,
            head.y + push_y + (rng.gen::<f64>() - 0.5) * inaccuracy,
        ))
    }

    fn check_danger<R: Rng>(&self, me: &ActorView<'_>, world: Surroundings<'_>, rng: &mut R) -> Option<Vector2> {
        let head = me.head;
        let ahead = offset(head, me.heading, LOOK_AHEAD);

        for other in world.actors.iter().filter(|other| other.id != me.id) {
            let dx = other.head.x - head.x;
            let dy = other.head.y - head.y;
            if (dx * dx + dy * dy).sqrt() < DANGER_ZONE {
                let panic = (1.0 - self.traits.accuracy) * 80.0;
                return Some(Vector2::new(
                    head.x - dx * 2.0 + (rng.gen::<f64>() - 0.5) * panic,
                    head.y - dy * 2.0 + (rng.gen::<f64>() - 0.5) * panic,
                ));
            }

            let blocked = other
                .body
                .iter()
                .take(LOOK_AHEAD_SEGMENTS)
                .any(|segment| distance(*segment, ahead) < LOOK_AHEAD_RADIUS);
            if blocked {
                let sidestep = me.heading + (PI / 2.0) * self.traits.favorite_direction;
                return Some(offset(head, sidestep, SIDESTEP_DISTANCE));
            }
        }

        None
    }

    /// Aims 40% down the body of the best smaller snake in range.
    fn try_attack<R: Rng>(&mut self, me: &ActorView<'_>, world: Surroundings<'_>, rng: &mut R) -> bool {
        if me.length < self.personality.attack_min_length() {
            return false;
        }
        let range = self.personality.attack_range();

        let mut best: Option<(Vector2, f64)> = None;
        for other in world.actors.iter().filter(|other| other.id != me.id) {
            if other.length as f64 >= me.length as f64 * ATTACK_SIZE_RATIO {
                continue;
            }
            let dist = distance(other.head, me.head);
            if dist > range {
                continue;
            }
            let target_index = (other.body.len() as f64 * ATTACK_BODY_FRACTION).floor() as usize;
            let Some(target) = other.body.get(target_index) else { continue };
            let score = other.length as f64 - dist * ATTACK_DISTANCE_WEIGHT;
            match best {
                Some((_, best_score)) if score <= best_score => {}
                _ => best = Some((*target, score)),
            }
        }

        let Some((target, _)) = best else { return false };
        let inaccuracy = (1.0 - self.traits.accuracy) * 30.0;
        let aimed = Vector2::new(
            target.x + (rng.gen::<f64>() - 0.5) * inaccuracy,
            target.y + (rng.gen::<f64>() - 0.5) * inaccuracy,
        );
        self.set_pointer_target(aimed, world.config);
        self.behavior = Behavior::Attacking;
        true
    }

    fn try_hunt_food(&mut self, me: &ActorView<'_>, world: Surroundings<'_>) -> bool {
        if world.foods.is_empty() {
            return false;
        }
        let vision = self.vision_range(world.config);

        let mut best: Option<(Vector2, f64)> = None;
        for food in world.foods.iter() {
            let position = food.position();
            let dist = distance(position, me.head);
            if dist > vision {
                continue;
            }

            let mut score = (vision - dist) + food.value as f64 * FOOD_VALUE_WEIGHT;
            for other in world.actors.iter().filter(|other| other.id != me.id) {
                if other.length > me.length && distance(other.head, position) < FOOD_THREAT_RADIUS {
                    score -= FOOD_THREAT_PENALTY;
                }
            }

            match best {
                Some((_, best_score)) if score <= best_score => {}
                _ => best = Some((position, score)),
            }
        }

        match best {
            Some((position, score)) if score > 0.0 => {
                self.set_pointer_target(position, world.config);
                self.behavior = Behavior::HuntingFood;
                true
            }
            _ => false,
        }
    }

    fn vision_range(&self, config: &GameConfig) -> f64 {
        config.bot_vision_range * (0.5 + self.traits.accuracy * 0.25)
    }

    /// Picks a new heading every 1-3 s, usually a gentle turn toward the favorite side.
    fn wander<R: Rng>(&mut self, me: &ActorView<'_>, config: &GameConfig, now_ms: f64, rng: &mut R) {
        self.behavior = Behavior::Wandering;
        if now_ms - self.last_direction_change <= 1000.0 + rng.gen::<f64>() * 2000.0 {
            return;
        }
        self.last_direction_change = now_ms;

        let mut turn = if rng.gen::<f64>() < 0.2 {
            (rng.gen::<f64>() - 0.5) * PI
        } else {
            (rng.gen::<f64>() - 0.5) * 0.5
        };
        if rng.gen::<f64>() < 0.6 {
            turn = turn.abs() * self.traits.favorite_direction;
        }

        let reach = 150.0 + rng.gen::<f64>() * 100.0;
        self.set_pointer_target(offset(me.head, me.heading + turn, reach), config);
    }

    fn random_turn<R: Rng>(&mut self, me: &ActorView<'_>, config: &GameConfig, now_ms: f64, rng: &mut R) {
        self.behavior = Behavior::RandomTurn;
        self.last_direction_change = now_ms;

        let turn = (rng.gen::<f64>() - 0.5) * PI;
        let reach = 100.0 + rng.gen::<f64>() * 150.0;
        self.set_pointer_target(offset(me.head, me.heading + turn, reach), config);
    }

    fn set_pointer_target(&mut self, target: Vector2, config: &GameConfig) {
        self.target_mouse = Vector2::new(
            clamp(target.x, POINTER_MARGIN, config.map_width - POINTER_MARGIN),
            clamp(target.y, POINTER_MARGIN, config.map_height - POINTER_MARGIN),
        );
    }
}

fn axis_push(position: f64, extent: f64) -> f64 {
    if position < HARD_WALL_MARGIN {
        HARD_WALL_PUSH
    } else if position > extent - HARD_WALL_MARGIN {
        -HARD_WALL_PUSH
    } else if position < SOFT_WALL_MARGIN {
        SOFT_WALL_PUSH
    } else if position > extent - SOFT_WALL_MARGIN {
        -SOFT_WALL_PUSH
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::ids::IdGenerator;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const STEADY: BotTraits = BotTraits {
        mouse_smoothing: 0.1,
        reaction_delay_ms: 150.0,
        accuracy: 0.8,
        attention: 0.9,
        favorite_direction: 1.0,
    };

    fn make_snake(id: &str, head: Vector2, heading: f64, length: usize) -> Snake {
        let config = GameConfig {
            initial_length: length,
            ..GameConfig::default()
        };
        Snake::new(
            id.to_string(),
            id.to_string(),
            "#ffffff".to_string(),
            head,
            heading,
            true,
            &config,
        )
    }

    fn empty_food(config: &GameConfig) -> FoodRegistry {
        FoodRegistry::new(&GameConfig {
            food_count: 0,
            ..config.clone()
        })
    }

    #[test]
    fn farmer_targets_visible_food_exactly() {
        let config = GameConfig::default();
        let mut foods = empty_food(&config);
        let mut ids = IdGenerator::new();
        let mut rng = StdRng::seed_from_u64(5);
        let food = foods
            .spawn_at(Vector2::new(1600.0, 1540.0), config.food_value, &mut ids, &mut rng)
            .unwrap();

        let snake = make_snake("bot_1", Vector2::new(1500.0, 1500.0), 0.0, 10);
        let mut bot = BotController::with_traits(&snake, Personality::Farmer, STEADY);
        let me = ActorView::of(&snake);
        let actors = [me];
        let world = Surroundings {
            actors: &actors,
            foods: &foods,
            config: &config,
        };

        bot.decide(&me, world, 0.0, &mut rng);
        assert_eq!(bot.behavior(), Behavior::HuntingFood);
        assert_eq!(bot.pointer_target(), food.position());
    }

    #[test]
    fn wall_avoidance_overrides_food_and_raises_panic() {
        let config = GameConfig::default();
        let mut foods = empty_food(&config);
        let mut ids = IdGenerator::new();
        let mut rng = StdRng::seed_from_u64(6);
        foods
            .spawn_at(Vector2::new(90.0, 1500.0), config.food_value, &mut ids, &mut rng)
            .unwrap();

        let snake = make_snake("bot_1", Vector2::new(60.0, 1500.0), PI, 10);
        let mut bot = BotController::with_traits(&snake, Personality::Farmer, STEADY);
        let me = ActorView::of(&snake);
        let actors = [me];
        let world = Surroundings {
            actors: &actors,
            foods: &foods,
            config: &config,
        };

        bot.decide(&me, world, 0.0, &mut rng);
        assert_eq!(bot.behavior(), Behavior::AvoidingWall);
        assert!(bot.pointer_target().x > 300.0);
        assert!((bot.panic_level() - WALL_PANIC).abs() < 1e-12);
    }

    #[test]
    fn nearby_enemy_head_triggers_flight_away_from_it() {
        let config = GameConfig::default();
        let foods = empty_food(&config);
        let mut rng = StdRng::seed_from_u64(7);

        let snake = make_snake("bot_1", Vector2::new(1500.0, 1500.0), 0.0, 10);
        let enemy = make_snake("player_1", Vector2::new(1560.0, 1500.0), PI, 10);
        let mut bot = BotController::with_traits(&snake, Personality::Aggressive, STEADY);
        let me = ActorView::of(&snake);
        let actors = [me, ActorView::of(&enemy)];
        let world = Surroundings {
            actors: &actors,
            foods: &foods,
            config: &config,
        };

        bot.decide(&me, world, 0.0, &mut rng);
        assert_eq!(bot.behavior(), Behavior::Fleeing);
        assert!(bot.pointer_target().x < 1500.0);
        assert!(bot.panic_level() > 0.0);
    }

    #[test]
    fn body_across_the_path_causes_sidestep_to_favorite_side() {
        let config = GameConfig::default();
        let foods = empty_food(&config);
        let mut rng = StdRng::seed_from_u64(8);

        let snake = make_snake("bot_1", Vector2::new(1000.0, 1000.0), 0.0, 10);
        // Vertical wall of body segments 80 units ahead, head far away.
        let blocker = make_snake("player_1", Vector2::new(1080.0, 1300.0), PI / 2.0, 60);
        let me = ActorView::of(&snake);
        let actors = [me, ActorView::of(&blocker)];
        let world = Surroundings {
            actors: &actors,
            foods: &foods,
            config: &config,
        };

        let mut bot = BotController::with_traits(&snake, Personality::Passive, STEADY);
        bot.decide(&me, world, 0.0, &mut rng);
        assert_eq!(bot.behavior(), Behavior::Fleeing);
        let target = bot.pointer_target();
        assert!((target.x - 1000.0).abs() < 1e-6);
        assert!((target.y - 1150.0).abs() < 1e-6);
    }

    #[test]
    fn attack_aims_along_body_of_smaller_snake() {
        let config = GameConfig::default();
        let foods = empty_food(&config);
        let mut rng = StdRng::seed_from_u64(9);

        let snake = make_snake("bot_1", Vector2::new(1000.0, 1000.0), 0.0, 40);
        let prey = make_snake("player_1", Vector2::new(1100.0, 1150.0), 0.0, 20);
        let twin = make_snake("player_2", Vector2::new(1150.0, 800.0), 0.0, 38);
        let me = ActorView::of(&snake);
        let actors = [me, ActorView::of(&prey), ActorView::of(&twin)];
        let world = Surroundings {
            actors: &actors,
            foods: &foods,
            config: &config,
        };

        let traits = BotTraits {
            accuracy: 1.0,
            ..STEADY
        };
        let mut bot = BotController::with_traits(&snake, Personality::Aggressive, traits);
        bot.decide(&me, world, 0.0, &mut rng);
        assert_eq!(bot.behavior(), Behavior::Attacking);
        assert_eq!(bot.pointer_target(), prey.body[8]);
    }

    #[test]
    fn food_near_bigger_snake_is_avoided() {
        let config = GameConfig::default();
        let mut foods = empty_food(&config);
        let mut ids = IdGenerator::new();
        let mut rng = StdRng::seed_from_u64(10);
        foods
            .spawn_at(Vector2::new(1550.0, 1500.0), config.food_value, &mut ids, &mut rng)
            .unwrap();
        let safe = foods
            .spawn_at(Vector2::new(1400.0, 1550.0), config.food_value, &mut ids, &mut rng)
            .unwrap();

        let snake = make_snake("bot_1", Vector2::new(1500.0, 1500.0), PI, 10);
        let giant = make_snake("player_1", Vector2::new(1600.0, 1520.0), 0.0, 80);
        let me = ActorView::of(&snake);
        let actors = [me, ActorView::of(&giant)];
        let world = Surroundings {
            actors: &actors,
            foods: &foods,
            config: &config,
        };

        let mut bot = BotController::with_traits(&snake, Personality::Passive, STEADY);
        assert!(bot.try_hunt_food(&me, world));
        assert_eq!(bot.pointer_target(), safe.position());
    }

    #[test]
    fn pointer_target_is_clamped_inside_map() {
        let config = GameConfig::default();
        let snake = make_snake("bot_1", Vector2::new(1500.0, 1500.0), 0.0, 10);
        let mut bot = BotController::with_traits(&snake, Personality::Passive, STEADY);
        bot.set_pointer_target(Vector2::new(-400.0, 9000.0), &config);
        assert_eq!(bot.pointer_target(), Vector2::new(50.0, 2950.0));
    }

    #[test]
    fn heading_follows_the_smoothed_pointer_not_the_target() {
        let config = GameConfig::default();
        let foods = empty_food(&config);
        let mut rng = StdRng::seed_from_u64(12);

        let snake = make_snake("bot_1", Vector2::new(1500.0, 1500.0), 0.0, 10);
        let mut bot = BotController::with_traits(&snake, Personality::Passive, STEADY);
        bot.next_decision_at = f64::MAX;
        bot.target_mouse = Vector2::new(1500.0, 2500.0);

        let me = ActorView::of(&snake);
        let actors = [me];
        let world = Surroundings {
            actors: &actors,
            foods: &foods,
            config: &config,
        };
        let heading = bot.update(&me, world, 0.0, &mut rng);
        // One easing step covers only a tenth of the way, so the heading is still mostly forward.
        assert!(heading.abs() < PI / 4.0);
        assert!(heading > 0.0);
    }

    #[test]
    fn decisions_wait_for_reaction_delay() {
        let config = GameConfig::default();
        let mut foods = empty_food(&config);
        let mut ids = IdGenerator::new();
        let mut rng = StdRng::seed_from_u64(13);

        let snake = make_snake("bot_1", Vector2::new(1500.0, 1500.0), 0.0, 10);
        let traits = BotTraits {
            attention: 1.0,
            ..STEADY
        };
        let mut bot = BotController::with_traits(&snake, Personality::Farmer, traits);
        bot.next_decision_at = 100.0;

        let food = foods
            .spawn_at(Vector2::new(1550.0, 1500.0), config.food_value, &mut ids, &mut rng)
            .unwrap();
        let me = ActorView::of(&snake);
        let actors = [me];
        let world = Surroundings {
            actors: &actors,
            foods: &foods,
            config: &config,
        };

        bot.update(&me, world, 50.0, &mut rng);
        assert_eq!(bot.behavior(), Behavior::Idle);
        bot.update(&me, world, 100.0, &mut rng);
        assert_eq!(bot.behavior(), Behavior::HuntingFood);
        assert_eq!(bot.pointer_target(), food.position());
        assert!(bot.next_decision_at >= 100.0 + traits.reaction_delay_ms);
        assert!(bot.next_decision_at <= 100.0 + traits.reaction_delay_ms * 1.5);
    }

    #[test]
    fn distraction_freezes_tactics_while_the_pointer_keeps_easing() {
        let config = GameConfig::default();
        let mut foods = empty_food(&config);
        let mut ids = IdGenerator::new();
        let mut rng = StdRng::seed_from_u64(15);
        let food = foods
            .spawn_at(Vector2::new(1600.0, 1540.0), config.food_value, &mut ids, &mut rng)
            .unwrap();

        let snake = make_snake("bot_1", Vector2::new(1500.0, 1500.0), 0.0, 10);
        let traits = BotTraits {
            attention: 0.0,
            ..STEADY
        };
        let mut bot = BotController::with_traits(&snake, Personality::Farmer, traits);
        let me = ActorView::of(&snake);
        let actors = [me];
        let world = Surroundings {
            actors: &actors,
            foods: &foods,
            config: &config,
        };

        bot.update(&me, world, 0.0, &mut rng);
        assert_eq!(bot.behavior(), Behavior::Distracted);
        let until = bot.distracted_until.expect("distracted");
        assert!((500.0..=2000.0).contains(&until));

        let parked = Vector2::new(1500.0, 2500.0);
        bot.target_mouse = parked;
        let before = bot.mouse;
        bot.next_decision_at = 0.0;
        bot.update(&me, world, until - 1.0, &mut rng);
        assert_eq!(bot.behavior(), Behavior::Distracted);
        assert_eq!(bot.pointer_target(), parked);
        assert!(bot.mouse.y > before.y + 90.0);

        bot.next_decision_at = 0.0;
        bot.update(&me, world, until + 1.0, &mut rng);
        assert!(bot.distracted_until.is_none());
        assert_eq!(bot.behavior(), Behavior::HuntingFood);
        assert_eq!(bot.pointer_target(), food.position());
    }

    #[test]
    fn chaotic_bots_sometimes_turn_at_random() {
        let config = GameConfig::default();
        let foods = empty_food(&config);
        let snake = make_snake("bot_1", Vector2::new(1500.0, 1500.0), 0.0, 10);
        let me = ActorView::of(&snake);
        let actors = [me];
        let world = Surroundings {
            actors: &actors,
            foods: &foods,
            config: &config,
        };

        let mut random_turns = 0;
        let mut wanders = 0;
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut bot = BotController::with_traits(&snake, Personality::Chaotic, STEADY);
            bot.decide(&me, world, 5000.0, &mut rng);
            match bot.behavior() {
                Behavior::RandomTurn => {
                    random_turns += 1;
                    assert_eq!(bot.last_direction_change, 5000.0);
                    let reach = distance(bot.pointer_target(), me.head);
                    assert!((100.0 - 1e-9..=250.0 + 1e-9).contains(&reach));
                }
                Behavior::Wandering => wanders += 1,
                other => panic!("unexpected behavior {other:?}"),
            }
        }
        assert!(random_turns > 0);
        assert!(wanders > 0);
    }

    #[test]
    fn wander_retargets_only_after_one_to_three_seconds() {
        let config = GameConfig::default();
        let foods = empty_food(&config);
        let mut rng = StdRng::seed_from_u64(16);
        let snake = make_snake("bot_1", Vector2::new(1500.0, 1500.0), 0.0, 10);
        let me = ActorView::of(&snake);
        let actors = [me];
        let world = Surroundings {
            actors: &actors,
            foods: &foods,
            config: &config,
        };

        let mut bot = BotController::with_traits(&snake, Personality::Passive, STEADY);
        let initial = bot.pointer_target();
        bot.decide(&me, world, 500.0, &mut rng);
        assert_eq!(bot.behavior(), Behavior::Wandering);
        assert_eq!(bot.pointer_target(), initial);
        assert_eq!(bot.last_direction_change, 0.0);

        bot.decide(&me, world, 3001.0, &mut rng);
        let retargeted = bot.pointer_target();
        assert_ne!(retargeted, initial);
        assert_eq!(bot.last_direction_change, 3001.0);

        bot.decide(&me, world, 3001.0 + 999.0, &mut rng);
        assert_eq!(bot.pointer_target(), retargeted);
        assert_eq!(bot.last_direction_change, 3001.0);
    }

    #[test]
    fn wander_leans_toward_the_favorite_side() {
        let config = GameConfig::default();
        let snake = make_snake("bot_1", Vector2::new(1500.0, 1500.0), 0.0, 10);
        let me = ActorView::of(&snake);
        let mut rng = StdRng::seed_from_u64(17);

        let mut favored = 0;
        for _ in 0..200 {
            let mut bot = BotController::with_traits(&snake, Personality::Passive, STEADY);
            bot.wander(&me, &config, 5000.0, &mut rng);
            if bot.pointer_target().y > 1500.0 {
                favored += 1;
            }
        }
        assert!(favored > 120, "only {favored} of 200 turns went to the favorite side");
    }

    #[test]
    fn hunters_mix_attacks_with_foraging_while_passive_bots_only_forage() {
        let config = GameConfig::default();
        let mut foods = empty_food(&config);
        let mut ids = IdGenerator::new();
        let mut rng = StdRng::seed_from_u64(18);
        let food = foods
            .spawn_at(Vector2::new(1050.0, 950.0), config.food_value, &mut ids, &mut rng)
            .unwrap();

        let snake = make_snake("bot_1", Vector2::new(1000.0, 1000.0), 0.0, 40);
        let prey = make_snake("player_1", Vector2::new(1100.0, 1150.0), 0.0, 20);
        let me = ActorView::of(&snake);
        let actors = [me, ActorView::of(&prey)];
        let world = Surroundings {
            actors: &actors,
            foods: &foods,
            config: &config,
        };

        let mut attacks = 0;
        let mut hunts = 0;
        for seed in 0..40 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut hunter = BotController::with_traits(&snake, Personality::Hunter, STEADY);
            hunter.decide(&me, world, 0.0, &mut rng);
            match hunter.behavior() {
                Behavior::Attacking => attacks += 1,
                Behavior::HuntingFood => {
                    hunts += 1;
                    assert_eq!(hunter.pointer_target(), food.position());
                }
                other => panic!("unexpected behavior {other:?}"),
            }

            let mut passive = BotController::with_traits(&snake, Personality::Passive, STEADY);
            passive.decide(&me, world, 0.0, &mut rng);
            assert_eq!(passive.behavior(), Behavior::HuntingFood);
            assert_eq!(passive.pointer_target(), food.position());
        }
        assert!(attacks > 0);
        assert!(hunts > 0);
    }

    #[test]
    fn rolled_traits_are_in_range() {
        let mut rng = StdRng::seed_from_u64(14);
        for _ in 0..200 {
            let traits = BotTraits::roll(&mut rng).unwrap();
            assert!((80.0..=280.0).contains(&traits.reaction_delay_ms));
            assert!((0.85..=0.99).contains(&traits.attention));
        }
        let broken = BotTraits {
            reaction_delay_ms: f64::NAN,
            ..STEADY
        };
        assert!(broken.validate().is_err());
    }
}
