//=========================================================================
// Input System
//=========================================================================
//
// Per-frame input snapshot and action triggers.
//
// Architecture:
//   InputEvent → InputState (held + frame deltas) → InputAction::occurred
//
// The screen manager owns the InputState and advances it once per update
// pass; only the screen holding focus receives it in `handle_input`.
//
//=========================================================================

//=== Module Declarations =================================================

mod action;
pub mod event;
mod input_state;

//=== Public API ==========================================================

pub use action::InputAction;
pub use event::{GamepadButton, InputEvent, KeyCode, Modifiers, MouseButton, PlayerIndex};
pub use input_state::InputState;
