//=========================================================================
// Menu
//=========================================================================
//
// Vertical list of text entries shared by the menu screens.
//
//   up / down  → move selection (wraps around)
//   select     → MenuEvent::Selected
//   cancel     → MenuEvent::Cancelled
//
// Entries slide in from the left while the screen transitions on and out
// to the right while it transitions off.
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::Vec2;

//=== Internal Dependencies ===============================================

use crate::core::input::{GamepadButton, InputAction, InputState, KeyCode, PlayerIndex};
use crate::core::render::{Color, Font};
use crate::core::screen::{DrawContext, ScreenState, ScreenStatus};

//=== Layout ==============================================================

const FIRST_ENTRY_Y: f32 = 175.0;
const TITLE_Y: f32 = 80.0;
const SLIDE_IN_DISTANCE: f32 = 256.0;
const SLIDE_OUT_DISTANCE: f32 = 512.0;
const TITLE_RISE: f32 = 100.0;
const TITLE_COLOR: Color = Color::rgba(192.0 / 255.0, 192.0 / 255.0, 192.0 / 255.0, 1.0);

//=== MenuEntry ===========================================================

#[derive(Debug, Clone, PartialEq)]
pub struct MenuEntry {
    text: String,
}

impl MenuEntry {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

//=== MenuEvent ===========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuEvent {
    Selected { index: usize, player: PlayerIndex },
    Cancelled { player: PlayerIndex },
}

//=== Menu ================================================================

#[derive(Debug, Clone)]
pub struct Menu {
    title: String,
    entries: Vec<MenuEntry>,
    selected: usize,

    up: InputAction,
    down: InputAction,
    select: InputAction,
    cancel: InputAction,
}

impl Menu {
    pub fn new(title: impl Into<String>, entries: &[&str]) -> Self {
        Self {
            title: title.into(),
            entries: entries.iter().map(|&text| MenuEntry::new(text)).collect(),
            selected: 0,
            up: InputAction::new(&[GamepadButton::DPadUp], &[KeyCode::ArrowUp], true),
            down: InputAction::new(&[GamepadButton::DPadDown], &[KeyCode::ArrowDown], true),
            select: InputAction::new(
                &[GamepadButton::A, GamepadButton::Start],
                &[KeyCode::Enter, KeyCode::Space],
                true,
            ),
            cancel: InputAction::new(
                &[GamepadButton::B, GamepadButton::Back],
                &[KeyCode::Backspace, KeyCode::Escape],
                true,
            ),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn entries(&self) -> &[MenuEntry] {
        &self.entries
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    //--- Input ------------------------------------------------------------

    /// Moves the selection and reports select/cancel presses.
    ///
    /// Navigation is applied before select, so a frame with both selects
    /// the new entry.
    pub fn handle_input(
        &mut self,
        input: &InputState,
        controlling_player: Option<PlayerIndex>,
    ) -> Option<MenuEvent> {
        if self.entries.is_empty() {
            return None;
        }

        if self.up.occurred(input, controlling_player).is_some() {
            self.selected = self.selected.checked_sub(1).unwrap_or(self.entries.len() - 1);
        }

        if self.down.occurred(input, controlling_player).is_some() {
            self.selected = (self.selected + 1) % self.entries.len();
        }

        if let Some(player) = self.select.occurred(input, controlling_player) {
            return Some(MenuEvent::Selected {
                index: self.selected,
                player,
            });
        }

        self.cancel
            .occurred(input, controlling_player)
            .map(|player| MenuEvent::Cancelled { player })
    }

    //--- Layout -----------------------------------------------------------

    /// Horizontal slide for the current transition.
    pub fn slide_offset(status: &ScreenStatus) -> f32 {
        let transition = (1.0 - status.transition_alpha()).powi(2);
        if status.state == ScreenState::TransitionOn {
            -transition * SLIDE_IN_DISTANCE
        } else {
            transition * SLIDE_OUT_DISTANCE
        }
    }

    /// Top-left of every entry in logical coordinates.
    pub fn entry_positions(&self, status: &ScreenStatus, canvas: Vec2, line_spacing: f32) -> Vec<Vec2> {
        let x = canvas.x * 0.4 + Self::slide_offset(status);

        (0..self.entries.len())
            .map(|index| Vec2::new(x, FIRST_ENTRY_Y + index as f32 * line_spacing))
            .collect()
    }

    //--- Drawing ----------------------------------------------------------

    /// Draws title and entries in one batch, faded by the transition.
    pub fn draw(&self, ctx: &mut DrawContext, font: &Font) {
        let status = ctx.status;
        let alpha = status.transition_alpha();
        let canvas = ctx.display.logical_size();
        let positions = self.entry_positions(&status, canvas, font.line_spacing);

        ctx.begin_batch();

        let rise = (1.0 - alpha).powi(2) * TITLE_RISE;
        ctx.draw_string(
            font,
            &self.title,
            Vec2::new(canvas.x * 0.4, TITLE_Y - rise),
            TITLE_COLOR * alpha,
        );

        for (index, (entry, position)) in self.entries.iter().zip(positions).enumerate() {
            let color = if index == self.selected {
                Color::YELLOW
            } else {
                Color::WHITE
            };
            ctx.draw_string(font, entry.text(), position, color * alpha);
        }

        ctx.end_batch();
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
