use super::entity::{Entity, TextureId};
use crate::collision::Rect;
use crate::consts::{BULLET_SIZE, ENEMY_SIZE};

#[derive(Debug, Clone)]
pub struct Enemy {
    pub entity: Entity,
    /// Leftward speed in world units per frame
    pub speed: i32,
    /// Frames until the next shot
    pub reload: u32,
}

impl Enemy {
    pub fn new(x: i32, y: i32, speed: i32, reload: u32) -> Self {
        Self {
            entity: Entity::new(x, y, ENEMY_SIZE, ENEMY_SIZE, TextureId::Enemy),
            speed,
            reload,
        }
    }

    pub fn update(&mut self) {
        self.entity.move_by(-self.speed, 0);
        if self.reload > 0 {
            self.reload -= 1;
        }
    }

    pub fn can_fire(&self) -> bool {
        self.reload == 0
    }

    /// Top-left corner for a bullet leaving the enemy's nose
    pub fn muzzle(&self) -> (i32, i32) {
        (
            self.entity.x - BULLET_SIZE,
            self.entity.y + (self.entity.h - BULLET_SIZE) / 2,
        )
    }

    /// True once the enemy has flown past the left edge, into the home base
    pub fn has_reached_home(&self) -> bool {
        self.entity.x + self.entity.w <= 0
    }

    pub fn rect(&self) -> Rect {
        self.entity.rect()
    }
}
