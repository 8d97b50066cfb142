use super::entity::{Entity, TextureId};
use crate::collision::Rect;
use crate::consts::{BULLET_SIZE, ENEMY_BULLET_SPEED, PLAYER_BULLET_SPEED};

/// Who fired a bullet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Player,
    Enemy,
}

#[derive(Debug, Clone)]
pub struct Bullet {
    pub entity: Entity,
    pub dx: i32,
    pub side: Side,
}

impl Bullet {
    /// Player bullets fly right, enemy bullets fly left
    pub fn new(x: i32, y: i32, side: Side) -> Self {
        let dx = match side {
            Side::Player => PLAYER_BULLET_SPEED,
            Side::Enemy => -ENEMY_BULLET_SPEED,
        };

        Self {
            entity: Entity::new(x, y, BULLET_SIZE, BULLET_SIZE, TextureId::Bullet),
            dx,
            side,
        }
    }

    pub fn update(&mut self) {
        self.entity.move_by(self.dx, 0);
    }

    pub fn rect(&self) -> Rect {
        self.entity.rect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bullet_new() {
        let bullet = Bullet::new(10, 20, Side::Player);
        assert_eq!(bullet.entity.x, 10);
        assert_eq!(bullet.entity.y, 20);
        assert_eq!(bullet.entity.w, BULLET_SIZE);
        assert_eq!(bullet.entity.texture, TextureId::Bullet);
        assert_eq!(bullet.side, Side::Player);
    }

    #[test]
    fn test_player_bullet_moves_right() {
        let mut bullet = Bullet::new(100, 20, Side::Player);
        bullet.update();
        assert_eq!(bullet.entity.x, 100 + PLAYER_BULLET_SPEED);
        assert_eq!(bullet.entity.y, 20);
    }

    #[test]
    fn test_enemy_bullet_moves_left() {
        let mut bullet = Bullet::new(100, 20, Side::Enemy);
        bullet.update();
        assert_eq!(bullet.entity.x, 100 - ENEMY_BULLET_SPEED);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_bullet_moves_in_correct_direction(
                x in -100i32..2000,
                y in 0i32..900,
                side in prop::sample::select(vec![Side::Player, Side::Enemy])
            ) {
                let mut bullet = Bullet::new(x, y, side);
                bullet.update();
                match side {
                    Side::Player => prop_assert!(bullet.entity.x > x),
                    Side::Enemy => prop_assert!(bullet.entity.x < x),
                }
                prop_assert_eq!(bullet.entity.y, y);
            }
        }
    }
}
