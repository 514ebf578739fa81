//=========================================================================
// Pause Menu Screen
//=========================================================================
//
// Popup over gameplay. The game beneath keeps drawing, dimmed.
//
//=========================================================================

use std::time::Duration;

use super::main_menu::MENU_FONT;
use super::menu::{Menu, MenuEvent};
use super::title_screens;
use crate::core::render::Font;
use crate::core::screen::{ActivateContext, DrawContext, Screen, ScreenContext, ScreenError};

const RESUME_GAME: usize = 0;
const QUIT_GAME: usize = 1;

/// Share of the transition alpha used to dim the screens beneath.
const DIM: f32 = 2.0 / 3.0;

#[derive(Debug)]
pub struct PauseMenuScreen {
    menu: Menu,
    font: Option<Font>,
}

impl PauseMenuScreen {
    pub fn new() -> Self {
        Self {
            menu: Menu::new("Paused", &["Resume Game", "Quit Game"]),
            font: None,
        }
    }
}

impl Default for PauseMenuScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen for PauseMenuScreen {
    fn name(&self) -> &str {
        "PauseMenuScreen"
    }

    fn transition_on_time(&self) -> Duration {
        Duration::from_millis(500)
    }

    fn transition_off_time(&self) -> Duration {
        Duration::from_millis(500)
    }

    fn is_popup(&self) -> bool {
        true
    }

    fn activate(&mut self, ctx: &mut ActivateContext) -> Result<(), ScreenError> {
        self.font = Some(ctx.content.load_font(MENU_FONT)?);
        Ok(())
    }

    fn unload(&mut self) {
        self.font = None;
    }

    fn handle_input(&mut self, ctx: &mut ScreenContext) {
        match self.menu.handle_input(ctx.input, ctx.status.controlling_player) {
            Some(MenuEvent::Selected { index: RESUME_GAME, .. }) | Some(MenuEvent::Cancelled { .. }) => {
                ctx.exit_screen();
            }
            Some(MenuEvent::Selected { index: QUIT_GAME, .. }) => {
                ctx.exit_all();
                for screen in title_screens() {
                    ctx.add_screen(screen, None);
                }
            }
            _ => {}
        }
    }

    fn draw(&self, ctx: &mut DrawContext) {
        ctx.fade_back_buffer_to_black(ctx.status.transition_alpha() * DIM);

        let font = self.font.unwrap_or(ctx.resources.font);
        self.menu.draw(ctx, &font);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::content::SharedResourceIds;
    use crate::core::display::DisplaySettings;
    use crate::core::input::{InputEvent, KeyCode, Modifiers};
    use crate::core::render::Color;
    use crate::core::screen::{FrameTime, ScreenManager, ScreenState};
    use crate::screens::BackgroundScreen;
    use crate::testing::{MemoryContent, RecordingRenderer};

    fn frame(ms: u64) -> FrameTime {
        FrameTime::new(Duration::from_millis(ms), Duration::from_millis(ms))
    }

    fn key(key: KeyCode) -> [InputEvent; 1] {
        [InputEvent::KeyDown { key, modifiers: Modifiers::NONE }]
    }

    fn paused() -> ScreenManager {
        let mut manager = ScreenManager::new(DisplaySettings::default(), SharedResourceIds::default());
        manager
            .initialize(Box::new(MemoryContent::with_shared_defaults()))
            .expect("content present");
        manager.add_screen(Box::new(BackgroundScreen::new()), None).expect("background");
        manager.add_screen(Box::new(PauseMenuScreen::new()), None).expect("pause menu");
        manager
    }

    #[test]
    fn resume_exits_only_the_pause_menu() {
        let mut manager = paused();

        manager.update(frame(16), &key(KeyCode::Enter)).expect("update");
        let exiting: Vec<bool> = manager.screens().map(|status| status.is_exiting).collect();
        assert_eq!(exiting, vec![false, true]);

        manager.update(frame(600), &[]).expect("update");
        assert_eq!(manager.len(), 1);
    }

    #[test]
    fn escape_resumes_too() {
        let mut manager = paused();
        manager.update(frame(16), &key(KeyCode::Escape)).expect("update");
        assert!(manager.screens().last().expect("pause menu").is_exiting);
    }

    #[test]
    fn quit_returns_to_title_screens() {
        let mut manager = paused();

        manager.update(frame(16), &key(KeyCode::ArrowDown)).expect("update");
        manager.update(frame(16), &key(KeyCode::Enter)).expect("update");

        // Old background + pause menu exiting, fresh background + main menu added
        let exiting: Vec<bool> = manager.screens().map(|status| status.is_exiting).collect();
        assert_eq!(exiting, vec![true, true, false, false]);

        manager.update(frame(600), &[]).expect("update");
        assert_eq!(manager.len(), 2);
    }

    #[test]
    fn dims_screens_beneath() {
        let mut manager = paused();
        manager.update(frame(1000), &[]).expect("settle");
        assert!(manager.screens().all(|status| status.state == ScreenState::Active));

        let mut renderer = RecordingRenderer::new();
        manager.draw(frame(16), &mut renderer);

        let blank = manager.shared_resources().expect("initialized").blank;
        let fade = renderer
            .sprites()
            .into_iter()
            .find(|sprite| sprite.texture == blank)
            .copied()
            .expect("fade overlay drawn");
        assert_eq!(fade.tint, Color::BLACK * DIM);
        assert_eq!(renderer.texts()[0], "Paused");
    }
}
