//=========================================================================
// Input State
//=========================================================================
//
// Per-frame input snapshot with held state and frame deltas.
//
// Architecture:
//   InputEvent → process_events() → HashSet (held) + HashSet (deltas) → query
//
// Frame lifecycle: clear() → process_events() → finalize_frame() → query
//
// Keyboard and mouse are single devices; gamepad state is tracked per
// player slot.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashSet;

//=== Internal Dependencies ===============================================

use super::event::{GamepadButton, InputEvent, KeyCode, Modifiers, MouseButton, PlayerIndex};

//=== GamepadState ========================================================

#[derive(Debug, Default, Clone)]
struct GamepadState {
    down: HashSet<GamepadButton>,
    pressed_this_frame: HashSet<GamepadButton>,
    released_this_frame: HashSet<GamepadButton>,
}

//=== InputState ==========================================================

/// Tracks persistent state (held) and per-frame deltas (pressed/released).
///
/// Owned by the screen manager, which runs the frame lifecycle once per
/// update pass and lends `&InputState` to the screen holding focus.
#[derive(Debug)]
pub struct InputState {
    //--- Persistent State (survives frame boundary) ----------------------
    keys_down: HashSet<KeyCode>,
    mouse_buttons_down: HashSet<MouseButton>,
    mouse_position: (f32, f32),
    modifiers: Modifiers,

    //--- Frame Deltas (reset each frame via clear()) --------------------
    keys_pressed_this_frame: HashSet<KeyCode>,
    keys_released_this_frame: HashSet<KeyCode>,
    mouse_buttons_pressed_this_frame: HashSet<MouseButton>,
    mouse_buttons_released_this_frame: HashSet<MouseButton>,

    //--- Gamepads (one slot per player) ---------------------------------
    gamepads: [GamepadState; 4],

    //--- Continuous Input ------------------------------------------------
    mouse_delta: (f32, f32),
    last_mouse_position: (f32, f32),
}

impl InputState {
    /// Creates a new input state with nothing held.
    pub fn new() -> Self {
        Self {
            keys_down: HashSet::new(),
            mouse_buttons_down: HashSet::new(),
            mouse_position: (0.0, 0.0),
            modifiers: Modifiers::NONE,
            keys_pressed_this_frame: HashSet::new(),
            keys_released_this_frame: HashSet::new(),
            mouse_buttons_pressed_this_frame: HashSet::new(),
            mouse_buttons_released_this_frame: HashSet::new(),
            gamepads: Default::default(),
            mouse_delta: (0.0, 0.0),
            last_mouse_position: (0.0, 0.0),
        }
    }

    //--- Frame Processing -------------------------------------------------

    /// Clears frame-specific deltas (pressed/released flags).
    pub fn clear(&mut self) {
        self.keys_pressed_this_frame.clear();
        self.keys_released_this_frame.clear();
        self.mouse_buttons_pressed_this_frame.clear();
        self.mouse_buttons_released_this_frame.clear();
        for pad in &mut self.gamepads {
            pad.pressed_this_frame.clear();
            pad.released_this_frame.clear();
        }
        self.last_mouse_position = self.mouse_position;
    }

    /// Processes input events, updating internal state.
    pub fn process_events(&mut self, events: &[InputEvent]) {
        for event in events {
            self.process_event(event);
        }
    }

    /// Finalizes frame calculations (mouse delta).
    pub fn finalize_frame(&mut self) {
        self.mouse_delta = (
            self.mouse_position.0 - self.last_mouse_position.0,
            self.mouse_position.1 - self.last_mouse_position.1,
        );
    }

    /// Runs the whole frame lifecycle for one batch of events.
    pub fn advance_frame(&mut self, events: &[InputEvent]) {
        self.clear();
        self.process_events(events);
        self.finalize_frame();
    }

    //--- Internal Helpers -------------------------------------------------

    fn process_event(&mut self, event: &InputEvent) {
        match event {
            InputEvent::KeyDown { key, modifiers } => {
                self.modifiers = *modifiers;
                // Only mark as pressed if it wasn't already down
                if self.keys_down.insert(*key) {
                    self.keys_pressed_this_frame.insert(*key);
                }
            }

            InputEvent::KeyUp { key, modifiers } => {
                self.modifiers = *modifiers;
                if self.keys_down.remove(key) {
                    self.keys_released_this_frame.insert(*key);
                }
            }

            InputEvent::MouseButtonDown { button, modifiers } => {
                self.modifiers = *modifiers;
                if self.mouse_buttons_down.insert(*button) {
                    self.mouse_buttons_pressed_this_frame.insert(*button);
                }
            }

            InputEvent::MouseButtonUp { button, modifiers } => {
                self.modifiers = *modifiers;
                if self.mouse_buttons_down.remove(button) {
                    self.mouse_buttons_released_this_frame.insert(*button);
                }
            }

            InputEvent::MouseMoved { x, y } => {
                self.mouse_position = (*x, *y);
            }

            InputEvent::GamepadButtonDown { player, button } => {
                let pad = &mut self.gamepads[player.slot()];
                if pad.down.insert(*button) {
                    pad.pressed_this_frame.insert(*button);
                }
            }

            InputEvent::GamepadButtonUp { player, button } => {
                let pad = &mut self.gamepads[player.slot()];
                if pad.down.remove(button) {
                    pad.released_this_frame.insert(*button);
                }
            }

            InputEvent::Unidentified => {}
        }
    }

    //=====================================================================
    // Query API - Keyboard
    //=====================================================================

    /// Returns `true` if key transitioned UP → DOWN this frame.
    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed_this_frame.contains(&key)
    }

    /// Returns `true` while key is held.
    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.keys_down.contains(&key)
    }

    /// Returns `true` if key transitioned DOWN → UP this frame.
    pub fn is_key_released(&self, key: KeyCode) -> bool {
        self.keys_released_this_frame.contains(&key)
    }

    //=====================================================================
    // Query API - Mouse
    //=====================================================================

    /// Like [`is_key_pressed`](Self::is_key_pressed) but for mouse buttons.
    pub fn is_button_pressed(&self, button: MouseButton) -> bool {
        self.mouse_buttons_pressed_this_frame.contains(&button)
    }

    /// Like [`is_key_down`](Self::is_key_down) but for mouse buttons.
    pub fn is_button_down(&self, button: MouseButton) -> bool {
        self.mouse_buttons_down.contains(&button)
    }

    /// Like [`is_key_released`](Self::is_key_released) but for mouse buttons.
    pub fn is_button_released(&self, button: MouseButton) -> bool {
        self.mouse_buttons_released_this_frame.contains(&button)
    }

    /// Mouse position on the logical canvas.
    pub fn mouse_position(&self) -> (f32, f32) {
        self.mouse_position
    }

    /// Mouse movement since last frame.
    pub fn mouse_delta(&self) -> (f32, f32) {
        self.mouse_delta
    }

    /// Current modifier key state.
    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    //=====================================================================
    // Query API - Gamepads
    //=====================================================================

    /// Returns `true` if the player's pad button was pressed this frame.
    pub fn is_gamepad_pressed(&self, player: PlayerIndex, button: GamepadButton) -> bool {
        self.gamepads[player.slot()].pressed_this_frame.contains(&button)
    }

    /// Returns `true` while the player's pad button is held.
    pub fn is_gamepad_down(&self, player: PlayerIndex, button: GamepadButton) -> bool {
        self.gamepads[player.slot()].down.contains(&button)
    }

    /// Returns `true` if the player's pad button was released this frame.
    pub fn is_gamepad_released(&self, player: PlayerIndex, button: GamepadButton) -> bool {
        self.gamepads[player.slot()].released_this_frame.contains(&button)
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
