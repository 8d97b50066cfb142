//! Fixed timestep simulation. Everything the game does between two frames
//! happens in [`World::tick`]; rendering and input live elsewhere.

use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::collision::{Rect, overlaps};
use crate::consts::{
    ENEMY_MAX_SPEED, ENEMY_MIN_SPEED, ENEMY_RELOAD_FRAMES, ENEMY_SIZE, ENEMY_SPAWN_FRAMES,
    PLAYER_SIZE, SCREEN_HEIGHT, SCREEN_WIDTH,
};
use crate::entities::{Bullet, Enemy, GameState, Player, Side};
use crate::stage::Stage;

/// Held controls for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub fire: bool,
}

pub struct World {
    pub state: GameState,
    pub player: Player,
    pub bullets: Stage<Bullet>,
    pub enemies: Stage<Enemy>,
    pub score: u32,
    pub frame: u64,
    /// Frames until the next enemy appears
    pub spawn_timer: u32,
    rng: StdRng,
}

impl World {
    /// Creates a fresh game. The same seed always plays out the same way.
    pub fn new(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let spawn_timer = rng.random_range(ENEMY_SPAWN_FRAMES);

        Self {
            state: GameState::Playing,
            // Start at the left edge, vertically centred, guarding the home base
            player: Player::new(0, (SCREEN_HEIGHT - PLAYER_SIZE) / 2),
            bullets: Stage::new(),
            enemies: Stage::new(),
            score: 0,
            frame: 0,
            spawn_timer,
            rng,
        }
    }

    pub fn screen() -> Rect {
        Rect::new(0, 0, SCREEN_WIDTH, SCREEN_HEIGHT)
    }

    pub fn pause(&mut self) {
        if self.state == GameState::Playing {
            self.state = GameState::Paused;
            debug!("paused at frame {}", self.frame);
        }
    }

    pub fn resume(&mut self) {
        if self.state == GameState::Paused {
            self.state = GameState::Playing;
            debug!("resumed at frame {}", self.frame);
        }
    }

    /// Starts over with a new seed drawn from the current game
    pub fn restart(&mut self) {
        let seed = self.rng.random();
        *self = Self::new(seed);
        info!("restarted");
    }

    /// Advances the game by one frame. Does nothing unless playing.
    pub fn tick(&mut self, input: &TickInput) {
        if self.state != GameState::Playing {
            return;
        }
        self.frame += 1;

        self.player
            .steer(input.left, input.right, input.up, input.down);
        self.player.update(&Self::screen());

        if input.fire && self.player.can_fire() {
            self.fire_player_bullet();
        }

        self.spawn_enemies();
        self.update_enemies();
        self.update_bullets();
        self.check_collisions();

        if !self.player.is_alive() {
            self.state = GameState::GameOver;
            info!(
                "game over at frame {}: score {}, health {}, home {}",
                self.frame, self.score, self.player.health, self.player.home_health
            );
        }
    }

    fn fire_player_bullet(&mut self) {
        let (x, y) = self.player.muzzle();
        self.bullets.push_back(Bullet::new(x, y, Side::Player));
        self.player.reset_reload();
    }

    fn spawn_enemies(&mut self) {
        if self.spawn_timer > 0 {
            self.spawn_timer -= 1;
            return;
        }

        let y = self.rng.random_range(0..=SCREEN_HEIGHT - ENEMY_SIZE);
        let speed = self.rng.random_range(ENEMY_MIN_SPEED..=ENEMY_MAX_SPEED);
        let reload = self.rng.random_range(ENEMY_RELOAD_FRAMES);
        // Enter from just beyond the right edge
        self.enemies
            .push_back(Enemy::new(SCREEN_WIDTH, y, speed, reload));
        self.spawn_timer = self.rng.random_range(ENEMY_SPAWN_FRAMES);
        debug!("enemy spawned at y={y} speed={speed}");
    }

    fn update_enemies(&mut self) {
        let screen = Self::screen();
        let bullets = &mut self.bullets;
        let player = &mut self.player;
        let rng = &mut self.rng;

        self.enemies.retain_mut(|enemy| {
            enemy.update();

            if enemy.has_reached_home() {
                player.home_hit();
                debug!("enemy reached home base, home health {}", player.home_health);
                return false;
            }

            // Hold fire until the enemy is actually visible
            if enemy.can_fire() && !enemy.rect().is_off_screen(&screen) {
                let (x, y) = enemy.muzzle();
                bullets.push_back(Bullet::new(x, y, Side::Enemy));
                enemy.reload = rng.random_range(ENEMY_RELOAD_FRAMES);
            }
            true
        });
    }

    fn update_bullets(&mut self) {
        let screen = Self::screen();
        self.bullets.retain_mut(|bullet| {
            bullet.update();
            !bullet.rect().is_off_screen(&screen)
        });
    }

    fn check_collisions(&mut self) {
        // Bullets against their targets
        for bullet_id in self.bullets.ids() {
            let (rect, side) = match self.bullets.get(bullet_id) {
                Some(bullet) => (bullet.rect(), bullet.side),
                None => continue,
            };

            match side {
                Side::Player => {
                    let target = self
                        .enemies
                        .iter()
                        .find(|(_, enemy)| overlaps(&rect, &enemy.rect()))
                        .map(|(id, _)| id);

                    if let Some(enemy_id) = target {
                        self.enemies.remove(enemy_id);
                        self.bullets.remove(bullet_id);
                        self.score += 1;
                        debug!("enemy destroyed, score {}", self.score);
                    }
                }
                Side::Enemy => {
                    if overlaps(&rect, &self.player.rect()) {
                        self.bullets.remove(bullet_id);
                        self.player.take_hit();
                        debug!("player hit by bullet, health {}", self.player.health);
                    }
                }
            }
        }

        // Enemies ramming the player
        let player_rect = self.player.rect();
        let player = &mut self.player;
        self.enemies.retain_mut(|enemy| {
            if overlaps(&enemy.rect(), &player_rect) {
                player.take_hit();
                debug!("player rammed, health {}", player.health);
                false
            } else {
                true
            }
        });
    }
}
