//=========================================================================
// Input Event Types
//
// Engine-level representation of keyboard, mouse and gamepad input.
//
// The platform layer (Winit) converts OS events into these types; hosts
// that poll gamepads themselves feed `GamepadButtonDown/Up` directly.
//
// Event Flow:
// ```text
// Platform Layer (Winit) / host gamepad polling
//         ↓
//    InputEvent (this module)
//         ↓
//    InputState (per-frame snapshot)
//         ↓
//    InputAction (pause, menu select, ...)
// ```
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::hash::{Hash, Hasher};

//=== MouseButton =========================================================

/// Physical mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary button (typically left).
    Left,

    /// Secondary button (typically right).
    Right,

    /// Middle button (wheel click).
    Middle,

    /// Any other button (side buttons, thumb buttons, macro keys).
    Other,
}

//=== KeyCode =============================================================

/// Physical keyboard key identifier.
///
/// Represents the physical key location, not the character produced.
/// `KeyA` is always the same physical key regardless of layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    //--- Numeric Keys -----------------------------------------------------

    /// Number row: 0-9
    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    //--- Alphabetic Keys --------------------------------------------------

    /// Letter keys: A-Z (physical location, not character)
    KeyA, KeyB, KeyC, KeyD, KeyE, KeyF, KeyG, KeyH, KeyI,
    KeyJ, KeyK, KeyL, KeyM, KeyN, KeyO, KeyP, KeyQ, KeyR,
    KeyS, KeyT, KeyU, KeyV, KeyW, KeyX, KeyY, KeyZ,

    //--- Arrow Keys -------------------------------------------------------

    ArrowDown,
    ArrowLeft,
    ArrowRight,
    ArrowUp,

    //--- Special Keys -----------------------------------------------------

    Space,
    Enter,
    Escape,
    Tab,
    Backspace,
    Delete,

    /// Fallback for keys not explicitly mapped by the input layer.
    Unidentified,
}

//=== Gamepad =============================================================

/// Gamepad button identifier.
///
/// Winit does not poll gamepads; hosts that do push these through
/// [`InputEvent::GamepadButtonDown`] / [`InputEvent::GamepadButtonUp`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GamepadButton {
    A,
    B,
    X,
    Y,
    Start,
    Back,
    DPadUp,
    DPadDown,
    DPadLeft,
    DPadRight,
    LeftShoulder,
    RightShoulder,
}

/// Identifies one of the (up to four) local players.
///
/// The keyboard is attributed to [`PlayerIndex::One`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PlayerIndex {
    One,
    Two,
    Three,
    Four,
}

impl PlayerIndex {
    /// All players in index order.
    pub const ALL: [PlayerIndex; 4] = [
        PlayerIndex::One,
        PlayerIndex::Two,
        PlayerIndex::Three,
        PlayerIndex::Four,
    ];

    /// Zero-based slot used for per-player storage.
    #[inline]
    pub const fn slot(self) -> usize {
        match self {
            PlayerIndex::One => 0,
            PlayerIndex::Two => 1,
            PlayerIndex::Three => 2,
            PlayerIndex::Four => 3,
        }
    }
}

//=== InputEvent ==========================================================

/// Low-level input event consumed by [`super::InputState`].
///
/// # Equality & Hashing Semantics
///
/// Events compare by type + payload. `MouseMoved` events are equal
/// regardless of coordinates so a frame buffer can coalesce them (last
/// position wins).
///
/// ```text
/// KeyDown{A, CTRL} == KeyDown{A, CTRL}       ✓
/// KeyDown{A, CTRL} == KeyDown{A, SHIFT}      ✗ (different mods)
/// MouseMoved{...}  == MouseMoved{...}        ✓ (always equal)
/// ```
#[derive(Debug, Clone)]
pub enum InputEvent {
    /// Key pressed down.
    KeyDown {
        key: KeyCode,
        modifiers: Modifiers,
    },

    /// Key released.
    KeyUp {
        key: KeyCode,
        modifiers: Modifiers,
    },

    /// Mouse button pressed.
    MouseButtonDown {
        button: MouseButton,
        modifiers: Modifiers,
    },

    /// Mouse button released.
    MouseButtonUp {
        button: MouseButton,
        modifiers: Modifiers,
    },

    /// Mouse cursor moved (physical pixels, top-left origin).
    MouseMoved { x: f32, y: f32 },

    /// Gamepad button pressed on a player's pad.
    GamepadButtonDown {
        player: PlayerIndex,
        button: GamepadButton,
    },

    /// Gamepad button released on a player's pad.
    GamepadButtonUp {
        player: PlayerIndex,
        button: GamepadButton,
    },

    /// Unrecognized or unsupported event. Ignored by the input state.
    Unidentified,
}

//--- Trait Implementations -----------------------------------------------

impl PartialEq for InputEvent {
    fn eq(&self, other: &Self) -> bool {
        use InputEvent::*;
        match (self, other) {
            (KeyDown { key: a, modifiers: ma }, KeyDown { key: b, modifiers: mb })
            | (KeyUp { key: a, modifiers: ma }, KeyUp { key: b, modifiers: mb }) => {
                a == b && ma == mb
            }
            (
                MouseButtonDown { button: a, modifiers: ma },
                MouseButtonDown { button: b, modifiers: mb },
            )
            | (
                MouseButtonUp { button: a, modifiers: ma },
                MouseButtonUp { button: b, modifiers: mb },
            ) => a == b && ma == mb,
            (
                GamepadButtonDown { player: pa, button: a },
                GamepadButtonDown { player: pb, button: b },
            )
            | (
                GamepadButtonUp { player: pa, button: a },
                GamepadButtonUp { player: pb, button: b },
            ) => pa == pb && a == b,
            // MouseMoved: coordinates ignored, always equal
            (MouseMoved { .. }, MouseMoved { .. }) => true,
            (Unidentified, Unidentified) => true,
            _ => false,
        }
    }
}

impl Eq for InputEvent {}

/// Hashes discriminant + payload. `MouseMoved` coordinates are not
/// hashed (consistent with equality).
impl Hash for InputEvent {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);

        match self {
            Self::KeyDown { key, modifiers } | Self::KeyUp { key, modifiers } => {
                key.hash(state);
                modifiers.hash(state);
            }
            Self::MouseButtonDown { button, modifiers }
            | Self::MouseButtonUp { button, modifiers } => {
                button.hash(state);
                modifiers.hash(state);
            }
            Self::GamepadButtonDown { player, button }
            | Self::GamepadButtonUp { player, button } => {
                player.hash(state);
                button.hash(state);
            }
            _ => {}
        }
    }
}

//=== Modifiers ===========================================================

/// Modifier key state (Shift, Ctrl, Alt).
///
/// The system does not distinguish between left/right variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl Modifiers {
    /// No modifiers held.
    pub const NONE: Self = Self {
        shift: false,
        ctrl: false,
        alt: false,
    };

    /// Shift only.
    pub const SHIFT: Self = Self {
        shift: true,
        ctrl: false,
        alt: false,
    };

    /// Ctrl only.
    pub const CTRL: Self = Self {
        shift: false,
        ctrl: true,
        alt: false,
    };

    /// Alt only.
    pub const ALT: Self = Self {
        shift: false,
        ctrl: false,
        alt: true,
    };
}

impl Default for Modifiers {
    fn default() -> Self {
        Self::NONE
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
