pub const MAP_WIDTH: f64 = 3000.0;
pub const MAP_HEIGHT: f64 = 3000.0;
pub const SEGMENT_RADIUS: f64 = 10.0;
pub const SEGMENT_SPACING: f64 = 8.0;
pub const HEAD_RADIUS: f64 = 12.0;
pub const INITIAL_LENGTH: usize = 10;
pub const MAX_LENGTH: usize = 500;
pub const BASE_SPEED: f64 = 3.0;
pub const TURN_SPEED: f64 = 0.15;
pub const FOOD_RADIUS: f64 = 6.0;
pub const FOOD_COUNT: usize = 300;
pub const FOOD_VALUE: u32 = 1;
pub const SEGMENT_FOOD_VALUE: u32 = 2;
pub const FOOD_SPAWN_MARGIN: f64 = 50.0;
pub const FOOD_DROP_JITTER: f64 = 10.0;
pub const PLAYER_SPAWN_MARGIN: f64 = 200.0;
pub const BOT_SPAWN_MARGIN: f64 = 300.0;
pub const BOT_COUNT: usize = 5;
pub const BOT_VISION_RANGE: f64 = 400.0;
pub const BOT_RESPAWN_DELAY_MS: u64 = 2000;
pub const TICK_RATE: u32 = 60;
pub const BROADCAST_RATE: u32 = 20;
pub const DEFAULT_PORT: u16 = 8080;

pub const SNAKE_COLORS: [&str; 12] = [
  "#FF6B6B",
  "#4ECDC4",
  "#45B7D1",
  "#96CEB4",
  "#FFEAA7",
  "#DDA0DD",
  "#98D8C8",
  "#F7DC6F",
  "#BB8FCE",
  "#85C1E9",
  "#F8B500",
  "#00CED1",
];

pub const FOOD_COLORS: [&str; 8] = [
  "#FF6B6B",
  "#4ECDC4",
  "#45B7D1",
  "#96CEB4",
  "#FFEAA7",
  "#DDA0DD",
  "#98D8C8",
  "#F7DC6F",
];

pub const BOT_NAMES: [&str; 44] = [
  "xXSlitherXx",
  "ProGamer228",
  "SnakeKing",
  "Destroyer",
  "NoobMaster69",
  "CoolDude",
  "FastSnake",
  "BigBoss",
  "Hunter",
  "Killer99",
  "Shadow",
  "NinjaSnek",
  "Dragon",
  "Phoenix",
  "Venom",
  "Alex",
  "Max",
  "John",
  "Mike",
  "Sam",
  "Leo",
  "Dan",
  "Tom",
  "Nick",
  "Emma",
  "Mia",
  "Lily",
  "Anna",
  "Kate",
  "snek",
  "danger noodle",
  "nope rope",
  "wiggle worm",
  "long boi",
  "im new",
  "dont kill me",
  "friendly",
  "help",
  "gg",
  "Змейка",
  "питон",
  "кобра",
  "蛇",
  "へび",
];
