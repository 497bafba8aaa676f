use tracing_subscriber::EnvFilter;

mod game;
mod protocol;
mod room_runtime;
mod shared;
mod transport;

use game::config::GameConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::from_default_env())
    .init();

  let config = GameConfig::from_env()?;
  room_runtime::run_arena_server(config).await
}
