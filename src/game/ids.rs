/// Owned id source for everything the world creates. One sequence per prefix.
#[derive(Debug, Default)]
pub struct IdGenerator {
  next_player: u64,
  next_bot: u64,
  next_food: u64,
}

impl IdGenerator {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn player(&mut self) -> String {
    self.next_player += 1;
    format!("player_{}", self.next_player)
  }

  pub fn bot(&mut self) -> String {
    self.next_bot += 1;
    format!("bot_{}", self.next_bot)
  }

  pub fn food(&mut self) -> String {
    self.next_food += 1;
    format!("food_{}", self.next_food)
  }
}
