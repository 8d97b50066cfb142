mod bullet;
mod enemy;
mod entity;
mod game_state;
mod player;

// Re-export all public types
pub use bullet::{Bullet, Side};
pub use enemy::Enemy;
pub use entity::{Entity, TextureId};
pub use game_state::GameState;
pub use player::Player;
