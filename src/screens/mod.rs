//=========================================================================
// Screens
//=========================================================================
//
// The game's screen set, built on the core screen system.
//
// Flow:
//   BackgroundScreen + MainMenuScreen
//     └─ "Play Game" → GameplayScreen
//          └─ pause   → PauseMenuScreen (popup)
//               └─ "Quit Game" → BackgroundScreen + MainMenuScreen
//
//=========================================================================

//=== Module Declarations =================================================

mod background;
mod gameplay;
mod main_menu;
mod menu;
mod pause_menu;

//=== Public API ==========================================================

pub use background::BackgroundScreen;
pub use gameplay::{GameplayScreen, DEFAULT_MAP};
pub use main_menu::MainMenuScreen;
pub use menu::{Menu, MenuEntry, MenuEvent};
pub use pause_menu::PauseMenuScreen;

use crate::core::screen::Screen;

/// The screens the game starts with, bottom first.
pub fn title_screens() -> Vec<Box<dyn Screen>> {
    vec![Box::new(BackgroundScreen::new()), Box::new(MainMenuScreen::new())]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_screens_put_background_below_menu() {
        let names: Vec<String> = title_screens().iter().map(|screen| screen.name().to_string()).collect();
        assert_eq!(names, vec!["BackgroundScreen", "MainMenuScreen"]);
    }
}
