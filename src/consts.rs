//! Compile-time tuning for the game. All sizes and speeds are in world units
//! of the fixed logical screen; the renderer scales them to the terminal.

use std::time::Duration;

pub const SCREEN_WIDTH: i32 = 1400;
pub const SCREEN_HEIGHT: i32 = 900;

/// Delay between frames (~60 FPS)
pub const FRAME_DELAY: Duration = Duration::from_millis(16);

pub const PLAYER_SIZE: i32 = 75;
pub const PLAYER_SPEED: i32 = 10;
/// Frames between two player shots
pub const PLAYER_RELOAD: u32 = 8;
pub const PLAYER_HEALTH: u32 = 5;
pub const HOME_HEALTH: u32 = 5;

pub const BULLET_SIZE: i32 = 25;
pub const PLAYER_BULLET_SPEED: i32 = 16;
pub const ENEMY_BULLET_SPEED: i32 = 8;

pub const ENEMY_SIZE: i32 = 60;
pub const ENEMY_MIN_SPEED: i32 = 2;
pub const ENEMY_MAX_SPEED: i32 = 6;
/// Frames between enemy spawns, drawn from this range
pub const ENEMY_SPAWN_FRAMES: std::ops::Range<u32> = 30..90;
/// Frames between enemy shots, drawn from this range
pub const ENEMY_RELOAD_FRAMES: std::ops::Range<u32> = 60..180;

/// Background clear colour (r, g, b)
pub const BACKGROUND: (u8, u8, u8) = (20, 20, 20);

pub const ASSET_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/assets");
pub const AIRCRAFT_TEXTURE: &str = "aircraft.png";
pub const BULLET_TEXTURE: &str = "bullet.png";
pub const ENEMY_TEXTURE: &str = "enemy.png";

pub const LOG_FILE: &str = "debug.log";
