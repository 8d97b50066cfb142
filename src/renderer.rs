use ratatui::{
    Frame,
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::collision;
use crate::consts::{BACKGROUND, HOME_HEALTH, PLAYER_HEALTH, SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::entities::{Bullet, Enemy, Entity, GameState, Player};
use crate::stage::Stage;
use crate::textures::Textures;

/// View struct that holds all game state needed for rendering
pub struct RenderView<'a> {
    pub game_state: GameState,
    pub player: &'a Player,
    pub enemies: &'a Stage<Enemy>,
    pub bullets: &'a Stage<Bullet>,
    pub score: u32,
    pub area: Rect,
}

/// Cell-space placement of a world rect: origin may lie outside the area
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRect {
    pub x: i32,
    pub y: i32,
    pub cols: u16,
    pub rows: u16,
}

/// Scales a world rect onto `area`. Anything visible is at least one cell.
pub fn to_cells(rect: &collision::Rect, area: Rect) -> CellRect {
    let scale_x = |v: i32| (i64::from(v) * i64::from(area.width) / i64::from(SCREEN_WIDTH)) as i32;
    let scale_y =
        |v: i32| (i64::from(v) * i64::from(area.height) / i64::from(SCREEN_HEIGHT)) as i32;

    let x = scale_x(rect.x);
    let y = scale_y(rect.y);
    let cols = (scale_x(rect.right()) - x).max(1);
    let rows = (scale_y(rect.bottom()) - y).max(1);

    CellRect {
        x: i32::from(area.x) + x,
        y: i32::from(area.y) + y,
        cols: cols.min(i32::from(u16::MAX)) as u16,
        rows: rows.min(i32::from(u16::MAX)) as u16,
    }
}

/// Handles all rendering responsibilities for the game
pub struct GameRenderer {
    textures: Textures,
}

impl GameRenderer {
    pub fn new(textures: Textures) -> Self {
        Self { textures }
    }

    /// Main render method that dispatches to state-specific renderers
    pub fn render(&self, frame: &mut Frame, view: &RenderView) {
        match view.game_state {
            GameState::Playing => self.render_game(frame, view),
            GameState::Paused => self.render_paused(frame, view),
            GameState::GameOver => self.render_game_over(frame, view),
        }
    }

    /// Renders the active gameplay screen
    fn render_game(&self, frame: &mut Frame, view: &RenderView) {
        let area = view.area;
        let (r, g, b) = BACKGROUND;
        frame.render_widget(
            Block::default().style(Style::default().bg(Color::Rgb(r, g, b))),
            area,
        );

        let buffer = frame.buffer_mut();
        for (_, enemy) in view.enemies {
            self.blit(buffer, &enemy.entity, area);
        }
        for (_, bullet) in view.bullets {
            self.blit(buffer, &bullet.entity, area);
        }
        if view.player.is_alive() {
            self.blit(buffer, &view.player.entity, area);
        }

        // Stats overlay at the top
        let stats = Line::from(vec![
            Span::styled("HP: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{}/{}", view.player.health, PLAYER_HEALTH),
                health_style(view.player.health, PLAYER_HEALTH),
            ),
            Span::styled("  Home: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{}/{}", view.player.home_health, HOME_HEALTH),
                health_style(view.player.home_health, HOME_HEALTH),
            ),
            Span::styled("  Score: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{}", view.score),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("  Enemies: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{}", view.enemies.len()),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
        ]);

        let stats_area = Rect {
            x: area.x + 1,
            y: area.y,
            width: area.width.saturating_sub(2),
            height: 1u16.min(area.height),
        };

        frame.render_widget(Paragraph::new(stats), stats_area);

        // Controls hint at bottom
        let controls = Line::from(vec![Span::styled(
            "[WASD/Arrows: Move] [Space/Enter: Fire] [P: Pause] [Q: Quit]",
            Style::default().fg(Color::DarkGray),
        )]);

        let controls_area = Rect {
            x: area.x + 1,
            y: area.y + area.height.saturating_sub(1),
            width: area.width.saturating_sub(2),
            height: 1u16.min(area.height),
        };

        frame.render_widget(Paragraph::new(controls).centered(), controls_area);
    }

    /// Draws an entity's texture, clipped to `area`
    fn blit(&self, buffer: &mut Buffer, entity: &Entity, area: Rect) {
        let placement = to_cells(&entity.rect(), area);
        let cells = self
            .textures
            .get(entity.texture)
            .cells(placement.cols, placement.rows);

        for (i, glyph) in cells.iter().enumerate() {
            let Some(glyph) = glyph else {
                continue;
            };
            let x = placement.x + (i % usize::from(placement.cols)) as i32;
            let y = placement.y + (i / usize::from(placement.cols)) as i32;
            if x < i32::from(area.left())
                || x >= i32::from(area.right())
                || y < i32::from(area.top())
                || y >= i32::from(area.bottom())
            {
                continue;
            }

            if let Some(cell) = buffer.cell_mut((x as u16, y as u16)) {
                cell.set_char(glyph.symbol).set_fg(glyph.fg);
                if let Some(bg) = glyph.bg {
                    cell.set_bg(bg);
                }
            }
        }
    }

    /// Renders the pause screen with overlay
    fn render_paused(&self, frame: &mut Frame, view: &RenderView) {
        // First render the game screen
        self.render_game(frame, view);

        let area = view.area;
        let pause_text = vec![
            Line::from(""),
            Line::from("PAUSED").centered().bold().yellow(),
            Line::from(""),
            Line::from("Press P to resume").centered().white(),
        ];

        let width = 30u16.min(area.width);
        let height = 6u16.min(area.height);
        let pause_area = Rect {
            x: area.x + (area.width - width) / 2,
            y: area.y + (area.height - height) / 2,
            width,
            height,
        };

        frame.render_widget(
            Paragraph::new(pause_text)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(Color::Yellow)),
                )
                .alignment(Alignment::Center),
            pause_area,
        );
    }

    /// Renders the game over screen
    fn render_game_over(&self, frame: &mut Frame, view: &RenderView) {
        let area = view.area;
        let cause = if view.player.home_health == 0 {
            "The home base has fallen"
        } else {
            "Your aircraft was shot down"
        };

        let game_over_text = vec![
            Line::from(""),
            Line::from("╔═══════════════════════════╗").centered().red(),
            Line::from("║      GAME OVER!           ║")
                .centered()
                .red()
                .bold(),
            Line::from("╚═══════════════════════════╝").centered().red(),
            Line::from(""),
            Line::from(cause).centered().white(),
            Line::from(format!("Final Score: {}", view.score))
                .centered()
                .yellow()
                .bold(),
            Line::from(""),
            Line::from("Press R to restart").centered().white(),
            Line::from("Press Q to quit").centered().white(),
        ];

        frame.render_widget(
            Paragraph::new(game_over_text)
                .block(Block::default().borders(Borders::ALL))
                .alignment(Alignment::Center),
            area,
        );
    }
}

fn health_style(current: u32, max: u32) -> Style {
    let color = if current * 2 > max {
        Color::Green
    } else if current * 4 > max {
        Color::Yellow
    } else {
        Color::Red
    };
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::PLAYER_SIZE;
    use crate::textures::Texture;
    use crate::world::World;
    use image::{Rgba, RgbaImage};
    use ratatui::{Terminal, backend::TestBackend};

    fn solid(color: [u8; 4]) -> Texture {
        Texture::from_image(RgbaImage::from_pixel(2, 2, Rgba(color)))
    }

    fn renderer() -> GameRenderer {
        GameRenderer::new(Textures::from_parts(
            solid([0, 255, 0, 255]),
            solid([255, 255, 0, 255]),
            solid([255, 0, 0, 255]),
        ))
    }

    fn draw(world: &World, width: u16, height: u16) -> Buffer {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        let renderer = renderer();
        terminal
            .draw(|frame| {
                let view = RenderView {
                    game_state: world.state,
                    player: &world.player,
                    enemies: &world.enemies,
                    bullets: &world.bullets,
                    score: world.score,
                    area: frame.area(),
                };
                renderer.render(frame, &view);
            })
            .unwrap();
        terminal.backend().buffer().clone()
    }

    #[test]
    fn test_full_screen_maps_to_full_area() {
        let area = Rect::new(0, 0, 140, 45);
        let cells = to_cells(&World::screen(), area);
        assert_eq!(
            cells,
            CellRect {
                x: 0,
                y: 0,
                cols: 140,
                rows: 45
            }
        );
    }

    #[test]
    fn test_scaling_respects_area_origin() {
        let area = Rect::new(5, 2, 140, 45);
        let cells = to_cells(&collision::Rect::new(700, 450, 100, 100), area);
        assert_eq!((cells.x, cells.y), (5 + 70, 2 + 22));
        assert_eq!((cells.cols, cells.rows), (10, 5));
    }

    #[test]
    fn test_tiny_rects_get_one_cell() {
        let area = Rect::new(0, 0, 14, 9);
        let cells = to_cells(&collision::Rect::new(0, 0, 5, 5), area);
        assert_eq!((cells.cols, cells.rows), (1, 1));
    }

    #[test]
    fn test_off_area_origin_is_negative() {
        let area = Rect::new(0, 0, 140, 45);
        let cells = to_cells(&collision::Rect::new(-100, 0, 60, 60), area);
        assert_eq!(cells.x, -10);
    }

    #[test]
    fn test_player_is_drawn_in_place() {
        let world = World::new(1);
        let buffer = draw(&world, SCREEN_WIDTH as u16 / 10, SCREEN_HEIGHT as u16 / 20);

        let placement = to_cells(&world.player.rect(), Rect::new(0, 0, 140, 45));
        let cell = &buffer[(placement.x as u16, placement.y as u16)];
        assert_eq!(cell.symbol(), "▀");
        assert_eq!(cell.fg, Color::Rgb(0, 255, 0));
        assert!(placement.cols >= (PLAYER_SIZE / 10) as u16);
    }

    #[test]
    fn test_hud_shows_health_and_home() {
        let world = World::new(1);
        let buffer = draw(&world, 140, 45);
        let top: String = (0u16..140).map(|x| buffer[(x, 0)].symbol().to_string()).collect();
        assert!(top.contains("HP: 5/5"));
        assert!(top.contains("Home: 5/5"));
    }

    #[test]
    fn test_game_over_screen() {
        let mut world = World::new(1);
        world.player.home_health = 0;
        world.state = GameState::GameOver;
        let buffer = draw(&world, 80, 24);
        let text: String = (0u16..24)
            .flat_map(|y| (0u16..80).map(move |x| (x, y)))
            .map(|pos| buffer[pos].symbol().to_string())
            .collect();
        assert!(text.contains("home base has fallen"));
        assert!(text.contains("Press R to restart"));
    }

    #[test]
    fn test_tiny_terminal_does_not_panic() {
        let mut world = World::new(1);
        draw(&world, 3, 2);
        world.pause();
        draw(&world, 3, 2);
    }
}
