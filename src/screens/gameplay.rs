//=========================================================================
// Gameplay Screen
//=========================================================================
//
// Draws the tile map scaled to the logical canvas height and opens the
// pause menu on demand. While another screen holds focus the game fades
// toward half black.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Duration;

use glam::Vec2;
use log::debug;

//=== Internal Dependencies ===============================================

use super::PauseMenuScreen;
use crate::core::input::{GamepadButton, InputAction, KeyCode};
use crate::core::render::Color;
use crate::core::screen::{ActivateContext, DrawContext, Screen, ScreenContext, ScreenError};
use crate::core::tilemap::Tilemap;

//=== Constants ===========================================================

pub const DEFAULT_MAP: &str = "map.txt";

const HINT: &str = "Press ESC to pause game";
const HINT_Y: f32 = 150.0;
const PAUSE_FADE_STEP: f32 = 1.0 / 32.0;

//=== GameplayScreen ======================================================

#[derive(Debug)]
pub struct GameplayScreen {
    tilemap: Tilemap,
    pause_action: InputAction,
    pause_alpha: f32,
}

impl GameplayScreen {
    /// Gameplay on the default map resource.
    pub fn new() -> Self {
        Self::with_map(DEFAULT_MAP)
    }

    pub fn with_map(filename: impl Into<String>) -> Self {
        Self {
            tilemap: Tilemap::new(filename),
            pause_action: InputAction::new(
                &[GamepadButton::Start, GamepadButton::Back],
                &[KeyCode::Backspace, KeyCode::Escape],
                true,
            ),
            pause_alpha: 0.0,
        }
    }

    pub fn tilemap(&self) -> &Tilemap {
        &self.tilemap
    }

    /// How far the pause dimming has faded in, 0..=1.
    pub fn pause_alpha(&self) -> f32 {
        self.pause_alpha
    }
}

impl Default for GameplayScreen {
    fn default() -> Self {
        Self::new()
    }
}

//--- Screen --------------------------------------------------------------

impl Screen for GameplayScreen {
    fn name(&self) -> &str {
        "GameplayScreen"
    }

    fn transition_on_time(&self) -> Duration {
        Duration::from_millis(1500)
    }

    fn transition_off_time(&self) -> Duration {
        Duration::from_millis(500)
    }

    fn hides_when_covered(&self) -> bool {
        false
    }

    fn activate(&mut self, ctx: &mut ActivateContext) -> Result<(), ScreenError> {
        let height = ctx.display.logical_size().y;
        self.tilemap.set_target_height(Some(height));
        self.tilemap.load_content(&mut *ctx.content)?;
        Ok(())
    }

    fn update(&mut self, ctx: &mut ScreenContext, _other_screen_has_focus: bool, _covered: bool) {
        if ctx.status.is_active() {
            self.pause_alpha = (self.pause_alpha - PAUSE_FADE_STEP).max(0.0);
        } else {
            self.pause_alpha = (self.pause_alpha + PAUSE_FADE_STEP).min(1.0);
        }
    }

    fn handle_input(&mut self, ctx: &mut ScreenContext) {
        let player = ctx.status.controlling_player;

        if self.pause_action.occurred(ctx.input, player).is_some() {
            debug!("Pausing game");
            ctx.add_screen(Box::new(PauseMenuScreen::new()), player);
        }
    }

    fn draw(&self, ctx: &mut DrawContext) {
        let canvas = ctx.display.logical_size();
        let font = ctx.resources.font;

        ctx.begin_batch();
        self.tilemap.draw(ctx.renderer());
        ctx.draw_string(&font, HINT, Vec2::new(2.0 * canvas.x / 3.0, HINT_Y), Color::WHITE);
        ctx.end_batch();

        if ctx.status.transition_position > 0.0 || self.pause_alpha > 0.0 {
            let from = 1.0 - ctx.status.transition_alpha();
            let alpha = from + (1.0 - from) * (self.pause_alpha / 2.0);
            ctx.fade_back_buffer_to_black(alpha);
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
