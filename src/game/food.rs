use super::config::GameConfig;
use super::constants::FOOD_COLORS;
use super::error::SimulationError;
use super::ids::IdGenerator;
use super::types::{Food, Vector2};
use rand::Rng;
use std::collections::BTreeMap;

#[derive(Debug, Clone)]
struct FoodSettings {
    map_width: f64,
    map_height: f64,
    margin: f64,
    target_count: usize,
    ambient_value: u32,
    segment_value: u32,
    drop_jitter: f64,
}

/// Live food keyed by id. Iteration is ordered by id so consumption is reproducible.
#[derive(Debug, Clone)]
pub struct FoodRegistry {
    settings: FoodSettings,
    foods: BTreeMap<String, Food>,
}

impl FoodRegistry {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            settings: FoodSettings {
                map_width: config.map_width,
                map_height: config.map_height,
                margin: config.food_spawn_margin,
                target_count: config.food_count,
                ambient_value: config.food_value,
                segment_value: config.segment_food_value,
                drop_jitter: config.food_drop_jitter,
            },
            foods: BTreeMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.foods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.foods.is_empty()
    }

    #[cfg(test)]
    pub fn get(&self, id: &str) -> Option<&Food> {
        self.foods.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Food> {
        self.foods.values()
    }

    pub fn all(&self) -> Vec<Food> {
        self.foods.values().cloned().collect()
    }

    /// Stores a food item, rejecting values the simulation could never have produced.
    pub fn insert(&mut self, food: Food) -> Result<(), SimulationError> {
        if food.value == 0 {
            return Err(SimulationError::InvalidFood {
                food_id: food.id,
                value: food.value,
            });
        }
        if !food.position().is_finite() {
            return Err(SimulationError::NonFiniteFood);
        }
        self.foods.insert(food.id.clone(), food);
        Ok(())
    }

    pub fn spawn_at<R: Rng>(
        &mut self,
        position: Vector2,
        value: u32,
        ids: &mut IdGenerator,
        rng: &mut R,
    ) -> Result<Food, SimulationError> {
        let food = Food {
            id: ids.food(),
            x: position.x,
            y: position.y,
            color: FOOD_COLORS[rng.gen_range(0..FOOD_COLORS.len())].to_string(),
            value,
        };
        self.insert(food.clone())?;
        Ok(food)
    }

    /// Uniform placement inside the spawn margin, ambient value.
    pub fn spawn_ambient<R: Rng>(
        &mut self,
        ids: &mut IdGenerator,
        rng: &mut R,
    ) -> Result<Food, SimulationError> {
        let settings = &self.settings;
        let margin = settings.margin;
        let position = Vector2::new(
            margin + rng.gen::<f64>() * (settings.map_width - margin * 2.0),
            margin + rng.gen::<f64>() * (settings.map_height - margin * 2.0),
        );
        let value = settings.ambient_value;
        self.spawn_at(position, value, ids, rng)
    }

    /// One jittered, segment-valued food item per body segment.
    pub fn spawn_from_body<R: Rng>(
        &mut self,
        segments: &[Vector2],
        ids: &mut IdGenerator,
        rng: &mut R,
    ) -> Result<Vec<Food>, SimulationError> {
        let jitter = self.settings.drop_jitter;
        let value = self.settings.segment_value;
        let mut spawned = Vec::with_capacity(segments.len());
        for segment in segments {
            let position = Vector2::new(
                segment.x + (rng.gen::<f64>() - 0.5) * jitter,
                segment.y + (rng.gen::<f64>() - 0.5) * jitter,
            );
            spawned.push(self.spawn_at(position, value, ids, rng)?);
        }
        Ok(spawned)
    }

    /// Removing an id that is already gone is a no-op.
    pub fn remove(&mut self, id: &str) -> Option<Food> {
        self.foods.remove(id)
    }

    /// Tops the registry up to its target and returns exactly the new items. Never removes, so
    /// body drops may leave the registry above target until they are eaten.
    pub fn replenish<R: Rng>(
        &mut self,
        ids: &mut IdGenerator,
        rng: &mut R,
    ) -> Result<Vec<Food>, SimulationError> {
        let mut added = Vec::new();
        while self.foods.len() < self.settings.target_count {
            added.push(self.spawn_ambient(ids, rng)?);
        }
        Ok(added)
    }
}
