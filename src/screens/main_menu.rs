//=========================================================================
// Main Menu Screen
//=========================================================================

use std::time::Duration;

use log::info;

use super::menu::{Menu, MenuEvent};
use super::GameplayScreen;
use crate::core::render::Font;
use crate::core::screen::{ActivateContext, DrawContext, Screen, ScreenContext, ScreenError};

pub(crate) const MENU_FONT: &str = "menufont";

const PLAY_GAME: usize = 0;
const EXIT: usize = 1;

/// Title menu: start a game or quit.
#[derive(Debug)]
pub struct MainMenuScreen {
    menu: Menu,
    font: Option<Font>,
}

impl MainMenuScreen {
    pub fn new() -> Self {
        Self {
            menu: Menu::new("Main Menu", &["Play Game", "Exit"]),
            font: None,
        }
    }

    pub fn menu(&self) -> &Menu {
        &self.menu
    }
}

impl Default for MainMenuScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen for MainMenuScreen {
    fn name(&self) -> &str {
        "MainMenuScreen"
    }

    fn transition_on_time(&self) -> Duration {
        Duration::from_millis(500)
    }

    fn transition_off_time(&self) -> Duration {
        Duration::from_millis(500)
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
            Some(MenuEvent::Selected { index: PLAY_GAME, player }) => {
                ctx.exit_all();
                ctx.add_screen(Box::new(GameplayScreen::new()), Some(player));
            }
            Some(MenuEvent::Selected { index: EXIT, .. }) | Some(MenuEvent::Cancelled { .. }) => {
                info!("Exit selected from main menu");
                ctx.exit_game();
            }
            _ => {}
        }
    }

    fn draw(&self, ctx: &mut DrawContext) {
        let font = self.font.unwrap_or(ctx.resources.font);
        self.menu.draw(ctx, &font);
    }
}
