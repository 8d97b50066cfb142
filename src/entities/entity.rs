use crate::collision::Rect;

/// Which bundled texture an entity is drawn with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureId {
    Aircraft,
    Bullet,
    Enemy,
}

/// Position, size and texture shared by everything visible on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entity {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
    pub texture: TextureId,
}

impl Entity {
    pub fn new(x: i32, y: i32, w: i32, h: i32, texture: TextureId) -> Self {
        Self {
            x,
            y,
            w,
            h,
            texture,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.w, self.h)
    }

    pub fn move_by(&mut self, dx: i32, dy: i32) {
        self.x += dx;
        self.y += dy;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_rect_matches_fields() {
        let entity = Entity::new(3, 4, 10, 20, TextureId::Bullet);
        assert_eq!(entity.rect(), Rect::new(3, 4, 10, 20));
    }

    #[test]
    fn test_move_by() {
        let mut entity = Entity::new(3, 4, 10, 20, TextureId::Enemy);
        entity.move_by(-5, 2);
        assert_eq!((entity.x, entity.y), (-2, 6));
    }
}
