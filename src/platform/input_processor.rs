//=========================================================================
// Input Processor
//=========================================================================
//
// Translates Winit window events into engine InputEvents.
//
//   KeyboardInput  → KeyDown / KeyUp     (OS key repeats dropped)
//   MouseInput     → MouseButtonDown / Up
//   CursorMoved    → MouseMoved          (logical canvas coordinates)
//
// Modifier state is cached from ModifiersChanged and stamped onto every
// key and button event until the next change. Keys the engine has no
// code for are filtered out.
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::Vec2;
use log::trace;
use winit::{
    dpi::PhysicalPosition,
    event::{ElementState, KeyEvent, MouseButton as WinitMouseButton},
    keyboard::{KeyCode as WinitKeyCode, ModifiersState, PhysicalKey},
};

//=== Internal Dependencies ===============================================

use crate::core::display::DisplayTransform;
use crate::core::input::{InputEvent, KeyCode, Modifiers, MouseButton};

//=== InputProcessor ======================================================

pub(crate) struct InputProcessor {
    modifiers: Modifiers,
}

impl InputProcessor {
    pub(crate) fn new() -> Self {
        Self {
            modifiers: Modifiers::NONE,
        }
    }

    //--- Modifiers --------------------------------------------------------

    pub(crate) fn set_modifiers(&mut self, state: ModifiersState) {
        self.modifiers = Modifiers::from(state);
    }

    pub(crate) fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    //--- Keyboard ---------------------------------------------------------

    /// Returns `None` for OS auto-repeat and for keys without an engine code.
    ///
    /// Held keys are tracked by `InputState`, so a repeat would only
    /// re-trigger menu navigation.
    pub(crate) fn key_event(&self, event: &KeyEvent) -> Option<InputEvent> {
        if event.repeat {
            return None;
        }

        let PhysicalKey::Code(code) = event.physical_key else {
            trace!(target: "platform::input", "Key without physical code ignored");
            return None;
        };

        let Some(key) = map_key(code) else {
            trace!(target: "platform::input", "Unmapped key {:?} ignored", code);
            return None;
        };

        Some(self.key(key, event.state))
    }

    fn key(&self, key: KeyCode, state: ElementState) -> InputEvent {
        let modifiers = self.modifiers;
        match state {
            ElementState::Pressed => InputEvent::KeyDown { key, modifiers },
            ElementState::Released => InputEvent::KeyUp { key, modifiers },
        }
    }

    //--- Mouse ------------------------------------------------------------

    pub(crate) fn mouse_button(&self, button: WinitMouseButton, state: ElementState) -> InputEvent {
        let button = map_button(button);
        let modifiers = self.modifiers;
        match state {
            ElementState::Pressed => InputEvent::MouseButtonDown { button, modifiers },
            ElementState::Released => InputEvent::MouseButtonUp { button, modifiers },
        }
    }

    /// Cursor position mapped from window pixels onto the logical canvas.
    pub(crate) fn cursor_moved(
        &self,
        position: PhysicalPosition<f64>,
        transform: DisplayTransform,
    ) -> InputEvent {
        let logical = transform.unapply(Vec2::new(position.x as f32, position.y as f32));
        InputEvent::MouseMoved {
            x: logical.x,
            y: logical.y,
        }
    }
}

//=========================================================================
// Winit Conversions
//=========================================================================

/// Winit already folds macOS Cmd into the control flag.
impl From<ModifiersState> for Modifiers {
    fn from(state: ModifiersState) -> Self {
        Self {
            shift: state.shift_key(),
            ctrl: state.control_key(),
            alt: state.alt_key(),
        }
    }
}

fn map_key(code: WinitKeyCode) -> Option<KeyCode> {
    use WinitKeyCode as W;

    let key = match code {
        W::Digit0 => KeyCode::Digit0,
        W::Digit1 => KeyCode::Digit1,
        W::Digit2 => KeyCode::Digit2,
        W::Digit3 => KeyCode::Digit3,
        W::Digit4 => KeyCode::Digit4,
        W::Digit5 => KeyCode::Digit5,
        W::Digit6 => KeyCode::Digit6,
        W::Digit7 => KeyCode::Digit7,
        W::Digit8 => KeyCode::Digit8,
        W::Digit9 => KeyCode::Digit9,

        W::KeyA => KeyCode::KeyA,
        W::KeyB => KeyCode::KeyB,
        W::KeyC => KeyCode::KeyC,
        W::KeyD => KeyCode::KeyD,
        W::KeyE => KeyCode::KeyE,
        W::KeyF => KeyCode::KeyF,
        W::KeyG => KeyCode::KeyG,
        W::KeyH => KeyCode::KeyH,
        W::KeyI => KeyCode::KeyI,
        W::KeyJ => KeyCode::KeyJ,
        W::KeyK => KeyCode::KeyK,
        W::KeyL => KeyCode::KeyL,
        W::KeyM => KeyCode::KeyM,
        W::KeyN => KeyCode::KeyN,
        W::KeyO => KeyCode::KeyO,
        W::KeyP => KeyCode::KeyP,
        W::KeyQ => KeyCode::KeyQ,
        W::KeyR => KeyCode::KeyR,
        W::KeyS => KeyCode::KeyS,
        W::KeyT => KeyCode::KeyT,
        W::KeyU => KeyCode::KeyU,
        W::KeyV => KeyCode::KeyV,
        W::KeyW => KeyCode::KeyW,
        W::KeyX => KeyCode::KeyX,
        W::KeyY => KeyCode::KeyY,
        W::KeyZ => KeyCode::KeyZ,

        W::ArrowUp => KeyCode::ArrowUp,
        W::ArrowDown => KeyCode::ArrowDown,
        W::ArrowLeft => KeyCode::ArrowLeft,
        W::ArrowRight => KeyCode::ArrowRight,

        // Keypad Enter selects menu entries too
        W::Enter | W::NumpadEnter => KeyCode::Enter,
        W::Space => KeyCode::Space,
        W::Escape => KeyCode::Escape,
        W::Tab => KeyCode::Tab,
        W::Backspace => KeyCode::Backspace,
        W::Delete => KeyCode::Delete,

        _ => return None,
    };

    Some(key)
}

fn map_button(button: WinitMouseButton) -> MouseButton {
    match button {
        WinitMouseButton::Left => MouseButton::Left,
        WinitMouseButton::Right => MouseButton::Right,
        WinitMouseButton::Middle => MouseButton::Middle,
        _ => MouseButton::Other,
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn processor_with(state: ModifiersState) -> InputProcessor {
        let mut processor = InputProcessor::new();
        processor.set_modifiers(state);
        processor
    }

    //--- Modifiers --------------------------------------------------------

    #[test]
    fn starts_without_modifiers() {
        assert_eq!(InputProcessor::new().modifiers(), Modifiers::NONE);
    }

    #[test]
    fn modifiers_are_stamped_on_keys_and_buttons() {
        let processor = processor_with(ModifiersState::SHIFT | ModifiersState::ALT);

        let key = processor.key(KeyCode::Escape, ElementState::Pressed);
        let click = processor.mouse_button(WinitMouseButton::Left, ElementState::Released);

        let expected = Modifiers { shift: true, ctrl: false, alt: true };
        assert_eq!(key, InputEvent::KeyDown { key: KeyCode::Escape, modifiers: expected });
        assert_eq!(click, InputEvent::MouseButtonUp { button: MouseButton::Left, modifiers: expected });
    }

    #[test]
    fn released_key_becomes_key_up() {
        let processor = InputProcessor::new();
        let event = processor.key(KeyCode::Enter, ElementState::Released);
        assert_eq!(event, InputEvent::KeyUp { key: KeyCode::Enter, modifiers: Modifiers::NONE });
    }

    //--- Key Mapping ------------------------------------------------------

    #[test]
    fn menu_keys_are_mapped() {
        assert_eq!(map_key(WinitKeyCode::ArrowUp), Some(KeyCode::ArrowUp));
        assert_eq!(map_key(WinitKeyCode::ArrowDown), Some(KeyCode::ArrowDown));
        assert_eq!(map_key(WinitKeyCode::Escape), Some(KeyCode::Escape));
        assert_eq!(map_key(WinitKeyCode::Backspace), Some(KeyCode::Backspace));
    }

    #[test]
    fn numpad_enter_maps_to_enter() {
        assert_eq!(map_key(WinitKeyCode::NumpadEnter), Some(KeyCode::Enter));
    }

    #[test]
    fn unknown_keys_are_filtered() {
        assert_eq!(map_key(WinitKeyCode::F13), None);
        assert_eq!(map_key(WinitKeyCode::AudioVolumeUp), None);
    }

    #[test]
    fn extra_mouse_buttons_collapse_to_other() {
        assert_eq!(map_button(WinitMouseButton::Back), MouseButton::Other);
        assert_eq!(map_button(WinitMouseButton::Other(9)), MouseButton::Other);
        assert_eq!(map_button(WinitMouseButton::Middle), MouseButton::Middle);
    }

    //--- Cursor -----------------------------------------------------------

    #[test]
    fn cursor_is_mapped_onto_logical_canvas() {
        let processor = InputProcessor::new();
        let transform = DisplayTransform { scale: 0.5, offset: Vec2::new(40.0, 0.0) };

        let event = processor.cursor_moved(PhysicalPosition::new(540.0, 270.0), transform);

        match event {
            InputEvent::MouseMoved { x, y } => assert_eq!((x, y), (1000.0, 540.0)),
            other => panic!("Expected MouseMoved, got {:?}", other),
        }
    }
}
