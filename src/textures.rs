//! Sprite textures. PNGs are decoded once at startup and sampled down to
//! terminal cells on demand, two vertical pixels per cell drawn with half
//! block glyphs.

use std::path::Path;

use color_eyre::{Result, eyre::WrapErr};
use image::{Rgba, RgbaImage};
use log::info;
use ratatui::style::Color;

use crate::consts::{AIRCRAFT_TEXTURE, BULLET_TEXTURE, ENEMY_TEXTURE};
use crate::entities::TextureId;

/// Pixels with less alpha than this are treated as transparent
const ALPHA_CUTOFF: u8 = 128;

/// One rasterised terminal cell. `bg` is `None` when the lower half is
/// transparent and whatever is already in the cell should show through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    pub symbol: char,
    pub fg: Color,
    pub bg: Option<Color>,
}

#[derive(Debug, Clone)]
pub struct Texture {
    image: RgbaImage,
}

impl Texture {
    pub fn load(path: &Path) -> Result<Self> {
        let image = image::open(path)
            .wrap_err_with(|| format!("couldn't load texture {}", path.display()))?
            .to_rgba8();
        Ok(Self::from_image(image))
    }

    pub fn from_image(image: RgbaImage) -> Self {
        Self { image }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Nearest-neighbour samples the texture into `cols x rows` cells,
    /// returned row by row. Fully transparent cells are `None`.
    pub fn cells(&self, cols: u16, rows: u16) -> Vec<Option<Glyph>> {
        let pixel_rows = u32::from(rows) * 2;
        let mut cells = Vec::with_capacity(usize::from(cols) * usize::from(rows));

        for row in 0..u32::from(rows) {
            for col in 0..u32::from(cols) {
                let top = self.sample(col, row * 2, u32::from(cols), pixel_rows);
                let bottom = self.sample(col, row * 2 + 1, u32::from(cols), pixel_rows);

                cells.push(match (top, bottom) {
                    (Some(top), bottom) => Some(Glyph {
                        symbol: '▀',
                        fg: top,
                        bg: bottom,
                    }),
                    (None, Some(bottom)) => Some(Glyph {
                        symbol: '▄',
                        fg: bottom,
                        bg: None,
                    }),
                    (None, None) => None,
                });
            }
        }

        cells
    }

    fn sample(&self, x: u32, y: u32, width: u32, height: u32) -> Option<Color> {
        if width == 0 || height == 0 || self.width() == 0 || self.height() == 0 {
            return None;
        }
        let sx = (x * self.width() / width).min(self.width() - 1);
        let sy = (y * self.height() / height).min(self.height() - 1);
        let Rgba([r, g, b, a]) = *self.image.get_pixel(sx, sy);
        (a >= ALPHA_CUTOFF).then_some(Color::Rgb(r, g, b))
    }
}

/// The three bundled textures
#[derive(Debug, Clone)]
pub struct Textures {
    aircraft: Texture,
    bullet: Texture,
    enemy: Texture,
}

impl Textures {
    /// Loads every texture from `dir`. A missing or corrupt asset is fatal.
    pub fn load(dir: &Path) -> Result<Self> {
        let textures = Self {
            aircraft: Texture::load(&dir.join(AIRCRAFT_TEXTURE))?,
            bullet: Texture::load(&dir.join(BULLET_TEXTURE))?,
            enemy: Texture::load(&dir.join(ENEMY_TEXTURE))?,
        };
        info!("textures loaded from {}", dir.display());
        Ok(textures)
    }

    pub fn from_parts(aircraft: Texture, bullet: Texture, enemy: Texture) -> Self {
        Self {
            aircraft,
            bullet,
            enemy,
        }
    }

    pub fn get(&self, id: TextureId) -> &Texture {
        match id {
            TextureId::Aircraft => &self.aircraft,
            TextureId::Bullet => &self.bullet,
            TextureId::Enemy => &self.enemy,
        }
    }
}
