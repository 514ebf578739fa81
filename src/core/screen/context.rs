//=========================================================================
// Screen Contexts
//=========================================================================
//
// Explicit per-callback views of manager state.
//
//   ActivateContext → activate()              content loader + resources
//   ScreenContext   → update()/handle_input() time, input, commands
//   DrawContext     → draw()                  renderer, transform, resources
//
// Each context lives for exactly one callback.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Duration;

use glam::Vec2;

//=== Internal Dependencies ===============================================

use super::{Screen, ScreenCommand, ScreenCommands, ScreenStatus};
use crate::core::content::{ContentLoader, SharedResources};
use crate::core::display::{DisplaySettings, DisplayTransform, Viewport};
use crate::core::input::{InputState, PlayerIndex};
use crate::core::render::{Color, Font, Rect, Renderer, Sprite, Texture};

//=== FrameTime ===========================================================

/// Time of the current frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameTime {
    /// Time since the previous frame.
    pub elapsed: Duration,
    /// Time since the loop started.
    pub total: Duration,
}

impl FrameTime {
    pub fn new(elapsed: Duration, total: Duration) -> Self {
        Self { elapsed, total }
    }

    /// Next frame, `elapsed` after this one.
    pub fn advance(self, elapsed: Duration) -> Self {
        Self {
            elapsed,
            total: self.total + elapsed,
        }
    }
}

//=== ActivateContext =====================================================

/// Handed to [`Screen::activate`](super::Screen::activate).
pub struct ActivateContext<'a> {
    pub content: &'a mut dyn ContentLoader,
    pub resources: &'a SharedResources,
    pub display: DisplaySettings,
}

//=== ScreenContext =======================================================

/// Handed to `update` and `handle_input`.
///
/// Stack changes are queued through the command helpers and applied by the
/// manager when the callback returns.
pub struct ScreenContext<'a> {
    pub time: FrameTime,
    pub input: &'a InputState,
    pub status: ScreenStatus,
    pub display: DisplaySettings,
    commands: &'a mut ScreenCommands,
}

impl<'a> ScreenContext<'a> {
    pub(crate) fn new(
        time: FrameTime,
        input: &'a InputState,
        status: ScreenStatus,
        display: DisplaySettings,
        commands: &'a mut ScreenCommands,
    ) -> Self {
        Self {
            time,
            input,
            status,
            display,
            commands,
        }
    }

    pub fn commands(&mut self) -> &mut ScreenCommands {
        &mut *self.commands
    }

    /// Adds a screen on top of the stack.
    pub fn add_screen(&mut self, screen: Box<dyn Screen>, controlling_player: Option<PlayerIndex>) {
        self.commands.add(screen, controlling_player);
    }

    /// Starts this screen's exit transition.
    pub fn exit_screen(&mut self) {
        self.commands.push(ScreenCommand::Exit(self.status.id));
    }

    /// Removes this screen immediately.
    pub fn remove_screen(&mut self) {
        self.commands.push(ScreenCommand::Remove(self.status.id));
    }

    /// Starts the exit transition of every screen on the stack.
    pub fn exit_all(&mut self) {
        self.commands.push(ScreenCommand::ExitAll);
    }

    pub fn exit_game(&mut self) {
        self.commands.push(ScreenCommand::ExitGame);
    }
}

//=== DrawContext =========================================================

/// Handed to [`Screen::draw`](super::Screen::draw).
///
/// Batches opened with [`begin_batch`](Self::begin_batch) render through the
/// display transform, so screens draw in logical canvas coordinates.
pub struct DrawContext<'a> {
    pub time: FrameTime,
    pub status: ScreenStatus,
    pub display: DisplaySettings,
    pub resources: &'a SharedResources,
    renderer: &'a mut dyn Renderer,
}

impl<'a> DrawContext<'a> {
    pub(crate) fn new(
        time: FrameTime,
        status: ScreenStatus,
        display: DisplaySettings,
        resources: &'a SharedResources,
        renderer: &'a mut dyn Renderer,
    ) -> Self {
        Self {
            time,
            status,
            display,
            resources,
            renderer,
        }
    }

    pub fn renderer(&mut self) -> &mut dyn Renderer {
        &mut *self.renderer
    }

    /// Opens a batch using the display transform.
    pub fn begin_batch(&mut self) {
        self.renderer.begin_batch(self.display.transform());
    }

    pub fn end_batch(&mut self) {
        self.renderer.end_batch();
    }

    pub fn draw_sprite(&mut self, sprite: &Sprite) {
        self.renderer.draw_sprite(sprite);
    }

    pub fn draw_string(&mut self, font: &Font, text: &str, position: Vec2, color: Color) {
        self.renderer.draw_string(font, text, position, color);
    }

    /// Darkens the whole viewport. Must not be called inside an open batch.
    pub fn fade_back_buffer_to_black(&mut self, alpha: f32) {
        fade_to_black(&mut *self.renderer, self.resources.blank, self.display.viewport(), alpha);
    }
}

//=== Helpers =============================================================

/// Stretches `blank` over the viewport in black × `alpha`, in its own
/// untransformed batch.
pub(crate) fn fade_to_black(renderer: &mut dyn Renderer, blank: Texture, viewport: Viewport, alpha: f32) {
    let area = Rect::new(0, 0, viewport.width, viewport.height);

    renderer.begin_batch(DisplayTransform::IDENTITY);
    renderer.draw_sprite(&Sprite::stretched(blank, area).with_tint(Color::BLACK * alpha));
    renderer.end_batch();
}

//=========================================================================
// Unit Tests
//=========================================================================
