//! Raw input events folded into per-tick commands
//!
//! The windowing layer forwards key, pointer and button events here; the
//! frame loop asks for one [`TickInput`] per tick.

use crate::sim::TickInput;

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    A,
    D,
    Escape,
    /// Toggle idle/demo mode
    I,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    KeyDown(Key),
    KeyUp(Key),
    /// Cursor moved to window X (pixels from the left edge)
    PointerMoved { x: f32 },
    /// Primary button pressed
    PointerPressed,
    /// Window close request
    CloseRequested,
}

/// Held keys, pointer state and pending one-shot commands
#[derive(Debug, Clone, Default)]
pub struct InputTracker {
    left: bool,
    right: bool,
    a: bool,
    d: bool,
    pointer_x: f32,
    pointer_active: bool,
    start_pending: bool,
    quit: bool,
    idle_mode: bool,
}

impl InputTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle(&mut self, event: InputEvent) {
        match event {
            InputEvent::KeyDown(key) => match key {
                Key::Left => self.left = true,
                Key::Right => self.right = true,
                Key::A => self.a = true,
                Key::D => self.d = true,
                Key::Escape => self.quit = true,
                Key::I => {
                    self.idle_mode = !self.idle_mode;
                    log::info!("Idle mode: {}", self.idle_mode);
                }
                Key::Other => {}
            },
            InputEvent::KeyUp(key) => match key {
                Key::Left => self.left = false,
                Key::Right => self.right = false,
                Key::A => self.a = false,
                Key::D => self.d = false,
                _ => {}
            },
            InputEvent::PointerMoved { x } => {
                self.pointer_x = x;
                self.pointer_active = true;
            }
            InputEvent::PointerPressed => self.start_pending = true,
            InputEvent::CloseRequested => self.quit = true,
        }
    }

    pub fn set_idle_mode(&mut self, idle: bool) {
        self.idle_mode = idle;
    }

    pub fn quit_requested(&self) -> bool {
        self.quit
    }

    /// Whether the basket currently follows the pointer
    pub fn pointer_active(&self) -> bool {
        self.pointer_active
    }

    /// Commands for the next tick. Clears the pending start; a held move key
    /// hands control back to the keyboard until the pointer moves again.
    pub fn tick_input(&mut self) -> TickInput {
        let left = self.left || self.a;
        let right = self.right || self.d;
        if left || right {
            self.pointer_active = false;
        }

        let input = TickInput {
            left,
            right,
            pointer_x: self.pointer_active.then_some(self.pointer_x),
            start: self.start_pending,
            idle_mode: self.idle_mode,
        };
        self.start_pending = false;
        input
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_held_keys() {
        let mut input = InputTracker::new();
        input.handle(InputEvent::KeyDown(Key::A));
        assert!(input.tick_input().left);
        // Still held
        assert!(input.tick_input().left);
        input.handle(InputEvent::KeyUp(Key::A));
        input.handle(InputEvent::KeyDown(Key::Right));
        let cmd = input.tick_input();
        assert!(!cmd.left && cmd.right);
    }

    #[test]
    fn test_keyboard_disables_pointer_until_moved() {
        let mut input = InputTracker::new();
        input.handle(InputEvent::PointerMoved { x: 320.0 });
        assert_eq!(input.tick_input().pointer_x, Some(320.0));

        input.handle(InputEvent::KeyDown(Key::Left));
        assert_eq!(input.tick_input().pointer_x, None);
        input.handle(InputEvent::KeyUp(Key::Left));
        assert_eq!(input.tick_input().pointer_x, None);
        assert!(!input.pointer_active());

        input.handle(InputEvent::PointerMoved { x: 100.0 });
        assert_eq!(input.tick_input().pointer_x, Some(100.0));
    }

    #[test]
    fn test_click_is_one_shot() {
        let mut input = InputTracker::new();
        input.handle(InputEvent::PointerPressed);
        assert!(input.tick_input().start);
        assert!(!input.tick_input().start);
    }

    #[test]
    fn test_quit_and_idle_toggle() {
        let mut input = InputTracker::new();
        assert!(!input.quit_requested());
        input.handle(InputEvent::KeyDown(Key::I));
        assert!(input.tick_input().idle_mode);
        input.handle(InputEvent::KeyDown(Key::Escape));
        assert!(input.quit_requested());

        let mut closing = InputTracker::new();
        closing.handle(InputEvent::CloseRequested);
        assert!(closing.quit_requested());
    }
}
