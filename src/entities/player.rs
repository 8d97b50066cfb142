use super::entity::{Entity, TextureId};
use crate::collision::Rect;
use crate::consts::{HOME_HEALTH, PLAYER_HEALTH, PLAYER_RELOAD, PLAYER_SIZE, PLAYER_SPEED};

#[derive(Debug, Clone)]
pub struct Player {
    pub entity: Entity,
    /// Velocity applied on the next update
    pub dx: i32,
    pub dy: i32,
    pub health: u32,
    /// Health of the home base behind the player
    pub home_health: u32,
    pub reload: u32,
}

impl Player {
    pub fn new(x: i32, y: i32) -> Self {
        Self {
            entity: Entity::new(x, y, PLAYER_SIZE, PLAYER_SIZE, TextureId::Aircraft),
            dx: 0,
            dy: 0,
            health: PLAYER_HEALTH,
            home_health: HOME_HEALTH,
            reload: 0,
        }
    }

    /// Sets this frame's velocity from the held directions.
    /// Opposite directions cancel out.
    pub fn steer(&mut self, left: bool, right: bool, up: bool, down: bool) {
        self.dx = (right as i32 - left as i32) * PLAYER_SPEED;
        self.dy = (down as i32 - up as i32) * PLAYER_SPEED;
    }

    /// Applies velocity and keeps the aircraft fully inside `bounds`
    pub fn update(&mut self, bounds: &Rect) {
        self.entity.move_by(self.dx, self.dy);

        let max_x = (bounds.right() - self.entity.w).max(bounds.x);
        let max_y = (bounds.bottom() - self.entity.h).max(bounds.y);
        self.entity.x = self.entity.x.clamp(bounds.x, max_x);
        self.entity.y = self.entity.y.clamp(bounds.y, max_y);

        if self.reload > 0 {
            self.reload -= 1;
        }
    }

    pub fn can_fire(&self) -> bool {
        self.reload == 0
    }

    pub fn reset_reload(&mut self) {
        self.reload = PLAYER_RELOAD;
    }

    /// Where a freshly fired bullet's top-left corner goes: just past the
    /// nose, two fifths of the way down the aircraft.
    pub fn muzzle(&self) -> (i32, i32) {
        (
            self.entity.x + self.entity.w,
            self.entity.y + self.entity.h * 2 / 5,
        )
    }

    pub fn take_hit(&mut self) {
        self.health = self.health.saturating_sub(1);
    }

    pub fn home_hit(&mut self) {
        self.home_health = self.home_health.saturating_sub(1);
    }

    /// The game is lost once either the aircraft or the home base falls
    pub fn is_alive(&self) -> bool {
        self.health > 0 && self.home_health > 0
    }

    pub fn rect(&self) -> Rect {
        self.entity.rect()
    }
}
