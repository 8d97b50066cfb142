use color_eyre::Result;
use log::info;
use ratatui::{Terminal, backend::Backend};

use crate::consts::FRAME_DELAY;
use crate::input::{InputAction, InputManager};
use crate::renderer::{GameRenderer, RenderView};
use crate::textures::Textures;
use crate::world::{TickInput, World};

/// The main application which holds the state and logic of the application.
pub struct App {
    /// Is the application running?
    running: bool,
    /// Player, stages, score and game state
    world: World,
    /// Turns terminal key events into actions
    input_manager: InputManager,
    /// Draws the world each frame
    renderer: GameRenderer,
}

impl App {
    /// Construct a new instance of [`App`].
    pub fn new(textures: Textures, release_events: bool) -> Self {
        Self {
            running: true,
            world: World::new(rand::random()),
            input_manager: InputManager::new(release_events),
            renderer: GameRenderer::new(textures),
        }
    }

    /// Run the application's main loop.
    pub fn run<B: Backend>(mut self, terminal: &mut Terminal<B>) -> Result<()> {
        while self.running {
            // Poll input events and get actions
            self.input_manager.poll_events(&self.world.state)?;
            let actions = self.input_manager.get_actions(&self.world.state);

            let input = self.process_actions(&actions);
            if !self.running {
                break;
            }

            self.world.tick(&input);

            terminal.draw(|frame| {
                let view = RenderView {
                    game_state: self.world.state,
                    player: &self.world.player,
                    enemies: &self.world.enemies,
                    bullets: &self.world.bullets,
                    score: self.world.score,
                    area: frame.area(),
                };
                self.renderer.render(frame, &view);
            })?;

            std::thread::sleep(FRAME_DELAY);
        }

        info!("quit with score {}", self.world.score);
        Ok(())
    }

    /// Applies one-shot actions and returns the held controls for this tick
    fn process_actions(&mut self, actions: &[InputAction]) -> TickInput {
        for action in actions {
            match action {
                InputAction::Quit => {
                    self.running = false;
                    return TickInput::default();
                }
                InputAction::Pause => self.world.pause(),
                InputAction::Resume => self.world.resume(),
                InputAction::Restart => self.world.restart(),
                _ => {}
            }
        }

        InputAction::to_tick_input(actions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::GameState;
    use crate::textures::Texture;
    use image::RgbaImage;

    fn app() -> App {
        let blank = || Texture::from_image(RgbaImage::new(1, 1));
        App::new(Textures::from_parts(blank(), blank(), blank()), true)
    }

    #[test]
    fn test_quit_stops_immediately() {
        let mut app = app();
        let input = app.process_actions(&[InputAction::Quit, InputAction::Fire]);
        assert!(!app.running);
        assert_eq!(input, TickInput::default());
    }

    #[test]
    fn test_pause_and_resume() {
        let mut app = app();
        app.process_actions(&[InputAction::Pause]);
        assert_eq!(app.world.state, GameState::Paused);
        app.process_actions(&[InputAction::Resume]);
        assert_eq!(app.world.state, GameState::Playing);
    }

    #[test]
    fn test_restart_after_game_over() {
        let mut app = app();
        app.world.state = GameState::GameOver;
        app.world.score = 9;
        app.process_actions(&[InputAction::Restart]);
        assert_eq!(app.world.state, GameState::Playing);
        assert_eq!(app.world.score, 0);
    }

    #[test]
    fn test_held_actions_become_tick_input() {
        let mut app = app();
        let input = app.process_actions(&[InputAction::MoveLeft, InputAction::Fire]);
        assert!(input.left && input.fire);
        assert!(!input.right && !input.up && !input.down);
    }
}
