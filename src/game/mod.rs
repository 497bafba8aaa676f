pub mod bot;
pub mod collision;
pub mod config;
pub mod constants;
pub mod error;
pub mod food;
pub mod ids;
pub mod math;
pub mod room;
pub mod snake;
pub mod types;
pub mod world;
