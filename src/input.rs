use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::debug;
use std::time::Duration;

use crate::entities::GameState;
use crate::world::TickInput;

/// Represents semantic game actions that can be triggered by input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    MoveLeft,
    MoveRight,
    MoveUp,
    MoveDown,
    Fire,
    Pause,
    Resume,
    Restart,
    Quit,
}

impl InputAction {
    /// Folds the held-key actions of a frame into the simulation's input
    pub fn to_tick_input(actions: &[InputAction]) -> TickInput {
        let mut input = TickInput::default();
        for action in actions {
            match action {
                InputAction::MoveLeft => input.left = true,
                InputAction::MoveRight => input.right = true,
                InputAction::MoveUp => input.up = true,
                InputAction::MoveDown => input.down = true,
                InputAction::Fire => input.fire = true,
                _ => {}
            }
        }
        input
    }
}

/// Keys that act for as long as they are held down
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HeldKey {
    Up,
    Down,
    Left,
    Right,
    Fire,
}

impl HeldKey {
    fn from_code(code: KeyCode) -> Option<Self> {
        match code {
            KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Up => Some(HeldKey::Up),
            KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Down => Some(HeldKey::Down),
            KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => Some(HeldKey::Left),
            KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => Some(HeldKey::Right),
            KeyCode::Char(' ') | KeyCode::Enter => Some(HeldKey::Fire),
            _ => None,
        }
    }

    fn opposite(self) -> Option<Self> {
        match self {
            HeldKey::Up => Some(HeldKey::Down),
            HeldKey::Down => Some(HeldKey::Up),
            HeldKey::Left => Some(HeldKey::Right),
            HeldKey::Right => Some(HeldKey::Left),
            HeldKey::Fire => None,
        }
    }
}

/// Tracks the state of keys that can be held down for continuous input
#[derive(Debug, Default)]
struct KeyState {
    up: bool,
    down: bool,
    left: bool,
    right: bool,
    fire: bool,
}

impl KeyState {
    fn set(&mut self, key: HeldKey, held: bool) {
        match key {
            HeldKey::Up => self.up = held,
            HeldKey::Down => self.down = held,
            HeldKey::Left => self.left = held,
            HeldKey::Right => self.right = held,
            HeldKey::Fire => self.fire = held,
        }
    }

    /// A new direction cancels the opposite one
    fn press(&mut self, key: HeldKey) {
        self.set(key, true);
        if let Some(opposite) = key.opposite() {
            self.set(opposite, false);
        }
    }

    fn actions(&self) -> impl Iterator<Item = InputAction> {
        [
            (self.left, InputAction::MoveLeft),
            (self.right, InputAction::MoveRight),
            (self.up, InputAction::MoveUp),
            (self.down, InputAction::MoveDown),
            (self.fire, InputAction::Fire),
        ]
        .into_iter()
        .filter_map(|(held, action)| held.then_some(action))
    }
}

/// Manages input polling and translates raw key events into game actions
pub struct InputManager {
    key_state: KeyState,
    oneshot_actions: Vec<InputAction>,
    /// Whether the terminal reports key releases. Without them every press
    /// only counts for the frame it arrives in and auto-repeat keeps the
    /// key "held".
    release_events: bool,
}

impl InputManager {
    pub fn new(release_events: bool) -> Self {
        Self {
            key_state: KeyState::default(),
            oneshot_actions: Vec::new(),
            release_events,
        }
    }

    /// Polls for all input events and stores one-shot actions
    /// Should be called once per frame before getting actions
    pub fn poll_events(&mut self, game_state: &GameState) -> color_eyre::Result<()> {
        self.begin_frame();

        // Poll for all available events without blocking
        while event::poll(Duration::from_millis(0))? {
            if let Event::Key(key_event) = event::read()? {
                self.handle_key_event(key_event, game_state);
            }
        }

        Ok(())
    }

    fn begin_frame(&mut self) {
        self.oneshot_actions.clear();
        if !self.release_events {
            self.key_state = KeyState::default();
        }
    }

    /// Processes a key event and updates key state and one-shot actions
    fn handle_key_event(&mut self, key_event: KeyEvent, game_state: &GameState) {
        debug!("key {:?} kind {:?}", key_event.code, key_event.kind);
        match key_event.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => {
                self.handle_key_press(key_event, game_state);
            }
            KeyEventKind::Release => {
                self.handle_key_release(key_event.code);
            }
        }
    }

    /// Handles key press events
    fn handle_key_press(&mut self, key_event: KeyEvent, game_state: &GameState) {
        // Quit works in any state
        if matches!(
            key_event.code,
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc
        ) || (key_event.code == KeyCode::Char('c')
            && key_event.modifiers.contains(KeyModifiers::CONTROL))
        {
            self.oneshot_actions.push(InputAction::Quit);
            return;
        }

        // Repeats only keep held keys held, they never re-trigger one-shots
        if key_event.kind == KeyEventKind::Press {
            let oneshot = match (game_state, key_event.code) {
                (GameState::Playing, KeyCode::Char('p') | KeyCode::Char('P')) => {
                    Some(InputAction::Pause)
                }
                (GameState::Paused, KeyCode::Char('p') | KeyCode::Char('P')) => {
                    Some(InputAction::Resume)
                }
                (GameState::GameOver, KeyCode::Char('r') | KeyCode::Char('R')) => {
                    Some(InputAction::Restart)
                }
                _ => None,
            };
            if let Some(action) = oneshot {
                self.oneshot_actions.push(action);
                return;
            }
        }

        // Continuous action keys (only tracked in Playing state)
        if let (GameState::Playing, Some(key)) =
            (game_state, HeldKey::from_code(key_event.code))
        {
            self.key_state.press(key);
        }
    }

    /// Handles key release events
    fn handle_key_release(&mut self, code: KeyCode) {
        if let Some(key) = HeldKey::from_code(code) {
            self.key_state.set(key, false);
        }
    }

    /// Returns all actions for this frame (both continuous and one-shot)
    /// Must be called after poll_events()
    pub fn get_actions(&self, game_state: &GameState) -> Vec<InputAction> {
        let mut actions = Vec::new();

        // Add one-shot actions first
        actions.extend_from_slice(&self.oneshot_actions);

        // Add continuous actions based on held keys (only in Playing state)
        if *game_state == GameState::Playing {
            actions.extend(self.key_state.actions());
        }

        actions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn release(code: KeyCode) -> KeyEvent {
        KeyEvent::new_with_kind(code, KeyModifiers::NONE, KeyEventKind::Release)
    }

    #[test]
    fn test_held_keys_become_actions() {
        let mut input = InputManager::new(true);
        input.handle_key_event(press(KeyCode::Up), &GameState::Playing);
        input.handle_key_event(press(KeyCode::Enter), &GameState::Playing);

        let actions = input.get_actions(&GameState::Playing);
        assert_eq!(actions, vec![InputAction::MoveUp, InputAction::Fire]);
    }

    #[test]
    fn test_release_clears_held_key() {
        let mut input = InputManager::new(true);
        input.handle_key_event(press(KeyCode::Char('d')), &GameState::Playing);
        input.begin_frame();
        assert_eq!(
            input.get_actions(&GameState::Playing),
            vec![InputAction::MoveRight]
        );

        input.handle_key_event(release(KeyCode::Char('d')), &GameState::Playing);
        assert!(input.get_actions(&GameState::Playing).is_empty());
    }

    #[test]
    fn test_without_release_events_keys_last_one_frame() {
        let mut input = InputManager::new(false);
        input.handle_key_event(press(KeyCode::Left), &GameState::Playing);
        assert_eq!(
            input.get_actions(&GameState::Playing),
            vec![InputAction::MoveLeft]
        );

        input.begin_frame();
        assert!(input.get_actions(&GameState::Playing).is_empty());
    }

    #[test]
    fn test_opposite_direction_replaces_held_one() {
        let mut input = InputManager::new(true);
        input.handle_key_event(press(KeyCode::Left), &GameState::Playing);
        input.handle_key_event(press(KeyCode::Right), &GameState::Playing);
        assert_eq!(
            input.get_actions(&GameState::Playing),
            vec![InputAction::MoveRight]
        );
    }

    #[test]
    fn test_pause_resume_and_restart_depend_on_state() {
        let mut input = InputManager::new(true);
        input.handle_key_event(press(KeyCode::Char('p')), &GameState::Playing);
        assert_eq!(input.get_actions(&GameState::Playing), vec![InputAction::Pause]);

        input.begin_frame();
        input.handle_key_event(press(KeyCode::Char('p')), &GameState::Paused);
        assert_eq!(input.get_actions(&GameState::Paused), vec![InputAction::Resume]);

        input.begin_frame();
        input.handle_key_event(press(KeyCode::Char('r')), &GameState::Playing);
        assert!(input.get_actions(&GameState::Playing).is_empty());

        input.handle_key_event(press(KeyCode::Char('r')), &GameState::GameOver);
        assert_eq!(
            input.get_actions(&GameState::GameOver),
            vec![InputAction::Restart]
        );
    }

    #[test]
    fn test_quit_works_everywhere() {
        let quit_keys = [
            press(KeyCode::Char('q')),
            press(KeyCode::Char('Q')),
            press(KeyCode::Esc),
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        ];
        for state in [GameState::Playing, GameState::Paused, GameState::GameOver] {
            for key in quit_keys {
                let mut input = InputManager::new(true);
                input.handle_key_event(key, &state);
                assert_eq!(input.get_actions(&state), vec![InputAction::Quit]);
            }
        }
    }

    #[test]
    fn test_plain_c_does_not_quit() {
        let mut input = InputManager::new(true);
        input.handle_key_event(press(KeyCode::Char('c')), &GameState::Playing);
        assert!(input.get_actions(&GameState::Playing).is_empty());
    }

    #[test]
    fn test_releasing_fire_stops_firing() {
        let mut input = InputManager::new(true);
        input.handle_key_event(press(KeyCode::Char(' ')), &GameState::Playing);
        input.handle_key_event(press(KeyCode::Up), &GameState::Playing);
        input.handle_key_event(release(KeyCode::Char(' ')), &GameState::Playing);
        assert_eq!(
            input.get_actions(&GameState::Playing),
            vec![InputAction::MoveUp]
        );
    }

    #[test]
    fn test_movement_ignored_while_paused() {
        let mut input = InputManager::new(true);
        input.handle_key_event(press(KeyCode::Up), &GameState::Paused);
        assert!(input.get_actions(&GameState::Paused).is_empty());
    }

    #[test]
    fn test_to_tick_input() {
        let input = InputAction::to_tick_input(&[
            InputAction::Pause,
            InputAction::MoveDown,
            InputAction::Fire,
        ]);
        assert_eq!(
            input,
            TickInput {
                down: true,
                fire: true,
                ..Default::default()
            }
        );
    }
}
