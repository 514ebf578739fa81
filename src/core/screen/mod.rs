//=========================================================================
// Screen System
//=========================================================================
//
// Layered screens with timed transitions, popup semantics and focus.
//
// Architecture:
//   ScreenManager
//     ├─ stack: Vec<ScreenEntry>          bottom → top
//     │    └─ ScreenEntry { id, Box<dyn Screen>, ScreenLifecycle }
//     ├─ InputState                       advanced once per update
//     ├─ DisplaySettings                  letterbox transform
//     └─ SharedResources                  lent to draw calls
//
// Flow:
//   update() → top → bottom: lifecycle.advance → Screen::update
//                            → Screen::handle_input (first focus only)
//                            → apply ScreenCommands
//   draw()   → bottom → top: Screen::draw (Hidden skipped)
//
//=========================================================================

//=== Module Declarations =================================================

mod commands;
mod context;
mod lifecycle;
mod manager;

//=== Public API ==========================================================

pub use commands::{ScreenCommand, ScreenCommands};
pub use context::{ActivateContext, DrawContext, FrameTime, ScreenContext};
pub use lifecycle::{ScreenState, ScreenStatus};
pub use manager::ScreenManager;

//=== External Dependencies ===============================================

use std::fmt;
use std::time::Duration;

use thiserror::Error;

//=== Internal Dependencies ===============================================

use crate::core::content::ContentError;
use crate::core::tilemap::TilemapError;

//=== ScreenId ============================================================

/// Identity assigned by the manager when a screen is added.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScreenId(pub(crate) u64);

impl fmt::Display for ScreenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

//=== ScreenError =========================================================

/// Failure while loading shared or per-screen content.
#[derive(Debug, Error)]
pub enum ScreenError {
    #[error("content loading failed: {0}")]
    Content(#[from] ContentError),

    #[error("tile map loading failed: {0}")]
    Tilemap(#[from] TilemapError),
}

//=== Screen Trait ========================================================

/// One layer of the screen stack (menu, gameplay, popup...).
///
/// The manager owns the lifecycle; a screen only sees it through the
/// [`ScreenStatus`] in each context. Only `draw()` is required:
///
/// ```rust
/// use tilestack::core::screen::{DrawContext, Screen};
///
/// struct Splash;
///
/// impl Screen for Splash {
///     fn draw(&self, ctx: &mut DrawContext) {
///         ctx.fade_back_buffer_to_black(ctx.status.transition_alpha());
///     }
/// }
/// ```
pub trait Screen {
    /// Name used in logs.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Duration of the transition on. Zero starts the screen `Active`.
    fn transition_on_time(&self) -> Duration {
        Duration::ZERO
    }

    fn transition_off_time(&self) -> Duration {
        Duration::ZERO
    }

    /// Popups do not cover the screens beneath them.
    fn is_popup(&self) -> bool {
        false
    }

    /// Whether a non-popup screen above makes this one transition off.
    ///
    /// Screens that form a permanent backdrop return `false`.
    fn hides_when_covered(&self) -> bool {
        true
    }

    /// Loads per-screen content. Called once, when the manager is
    /// initialized or when the screen is added afterwards.
    fn activate(&mut self, _ctx: &mut ActivateContext) -> Result<(), ScreenError> {
        Ok(())
    }

    /// Releases per-screen content.
    fn unload(&mut self) {}

    /// Called every update pass, regardless of focus or coverage.
    fn update(
        &mut self,
        _ctx: &mut ScreenContext,
        _other_screen_has_focus: bool,
        _covered_by_other_screen: bool,
    ) {
    }

    /// Called only for the screen holding focus this pass.
    fn handle_input(&mut self, _ctx: &mut ScreenContext) {}

    /// Draws the screen. Not called while `Hidden`.
    fn draw(&self, ctx: &mut DrawContext);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn screen_id_displays_with_hash() {
        assert_eq!(ScreenId(12).to_string(), "#12");
    }

    #[test]
    fn errors_wrap_their_source() {
        let err: ScreenError = ContentError::NotFound {
            id: "blank".to_string(),
            root: "Content".into(),
        }
        .into();

        assert!(matches!(err, ScreenError::Content(_)));
        assert!(err.to_string().contains("blank"));
    }
}
