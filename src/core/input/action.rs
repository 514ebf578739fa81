//=========================================================================
// Input Action
//=========================================================================
//
// A named trigger made of gamepad buttons and keyboard keys.
//
// An action either fires on a fresh press only (menu select, pause) or
// for as long as any trigger is held.
//
// Player attribution:
//   keyboard           → PlayerIndex::One
//   gamepad (player p) → p
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::event::{GamepadButton, KeyCode, PlayerIndex};
use super::InputState;

//=== InputAction =========================================================

/// Set of keys and buttons that trigger one logical action.
///
/// # Example
///
/// ```
/// use tilestack::core::input::{GamepadButton, InputAction, KeyCode};
///
/// let pause = InputAction::new(
///     &[GamepadButton::Start, GamepadButton::Back],
///     &[KeyCode::Backspace, KeyCode::Escape],
///     true,
/// );
/// assert!(pause.is_new_press_only());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputAction {
    buttons: Vec<GamepadButton>,
    keys: Vec<KeyCode>,
    new_press_only: bool,
}

impl InputAction {
    /// Creates an action from its gamepad and keyboard triggers.
    pub fn new(buttons: &[GamepadButton], keys: &[KeyCode], new_press_only: bool) -> Self {
        Self {
            buttons: buttons.to_vec(),
            keys: keys.to_vec(),
            new_press_only,
        }
    }

    /// Whether only a fresh press (not a held key) triggers the action.
    pub fn is_new_press_only(&self) -> bool {
        self.new_press_only
    }

    /// Checks whether the action occurred this frame.
    ///
    /// With `controlling_player` set, only that player's input counts.
    /// Otherwise every player is checked in index order and the first one
    /// that triggered the action is returned.
    pub fn occurred(
        &self,
        input: &InputState,
        controlling_player: Option<PlayerIndex>,
    ) -> Option<PlayerIndex> {
        match controlling_player {
            Some(player) => self.occurred_for(input, player).then_some(player),
            None => PlayerIndex::ALL
                .into_iter()
                .find(|&player| self.occurred_for(input, player)),
        }
    }

    fn occurred_for(&self, input: &InputState, player: PlayerIndex) -> bool {
        let button_hit = self.buttons.iter().any(|&button| {
            if self.new_press_only {
                input.is_gamepad_pressed(player, button)
            } else {
                input.is_gamepad_down(player, button)
            }
        });

        if button_hit {
            return true;
        }

        if player != PlayerIndex::One {
            return false;
        }

        self.keys.iter().any(|&key| {
            if self.new_press_only {
                input.is_key_pressed(key)
            } else {
                input.is_key_down(key)
            }
        })
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::{InputEvent, Modifiers};

    fn pause_action() -> InputAction {
        InputAction::new(
            &[GamepadButton::Start, GamepadButton::Back],
            &[KeyCode::Backspace, KeyCode::Escape],
            true,
        )
    }

    fn key_down(key: KeyCode) -> InputEvent {
        InputEvent::KeyDown { key, modifiers: Modifiers::NONE }
    }

    #[test]
    fn keyboard_press_is_attributed_to_player_one() {
        let mut input = InputState::new();
        input.advance_frame(&[key_down(KeyCode::Escape)]);

        assert_eq!(pause_action().occurred(&input, None), Some(PlayerIndex::One));
        assert_eq!(pause_action().occurred(&input, Some(PlayerIndex::One)), Some(PlayerIndex::One));
        assert_eq!(pause_action().occurred(&input, Some(PlayerIndex::Two)), None);
    }

    #[test]
    fn new_press_only_ignores_held_keys() {
        let mut input = InputState::new();
        input.advance_frame(&[key_down(KeyCode::Escape)]);
        input.advance_frame(&[]);

        assert_eq!(pause_action().occurred(&input, None), None);
    }

    #[test]
    fn held_action_fires_while_down() {
        let held = InputAction::new(&[], &[KeyCode::ArrowUp], false);
        let mut input = InputState::new();
        input.advance_frame(&[key_down(KeyCode::ArrowUp)]);
        input.advance_frame(&[]);

        assert_eq!(held.occurred(&input, None), Some(PlayerIndex::One));
    }

    #[test]
    fn gamepad_reports_the_triggering_player() {
        let mut input = InputState::new();
        input.advance_frame(&[InputEvent::GamepadButtonDown {
            player: PlayerIndex::Three,
            button: GamepadButton::Back,
        }]);

        assert_eq!(pause_action().occurred(&input, None), Some(PlayerIndex::Three));
        assert_eq!(pause_action().occurred(&input, Some(PlayerIndex::One)), None);
    }

    #[test]
    fn nothing_pressed_means_no_action() {
        let input = InputState::new();
        assert_eq!(pause_action().occurred(&input, None), None);
    }
}
