// Library exports for testing
pub use collision::{Rect, overlaps};
pub use entities::{Bullet, Enemy, Entity, GameState, Player, Side, TextureId};
pub use stage::{NodeId, Stage};
pub use world::{TickInput, World};

pub mod app;
pub mod collision;
pub mod consts;
pub mod entities;
pub mod input;
pub mod renderer;
pub mod stage;
pub mod terminal;
pub mod textures;
pub mod world;
