//=========================================================================
// Background Screen
//=========================================================================
//
// Full-canvas backdrop under the menus. Ignores coverage, so it stays
// visible whatever is stacked on top of it.
//
//=========================================================================

use std::time::Duration;

use crate::core::render::{Color, Rect, Sprite, Texture};
use crate::core::screen::{ActivateContext, DrawContext, Screen, ScreenError};

const TEXTURE_ID: &str = "background";

#[derive(Debug, Default)]
pub struct BackgroundScreen {
    texture: Option<Texture>,
}

impl BackgroundScreen {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Screen for BackgroundScreen {
    fn name(&self) -> &str {
        "BackgroundScreen"
    }

    fn transition_on_time(&self) -> Duration {
        Duration::from_millis(500)
    }

    fn transition_off_time(&self) -> Duration {
        Duration::from_millis(500)
    }

    fn hides_when_covered(&self) -> bool {
        false
    }

    fn activate(&mut self, ctx: &mut ActivateContext) -> Result<(), ScreenError> {
        self.texture = Some(ctx.content.load_texture(TEXTURE_ID)?);
        Ok(())
    }

    fn unload(&mut self) {
        self.texture = None;
    }

    fn draw(&self, ctx: &mut DrawContext) {
        let Some(texture) = self.texture else {
            return;
        };

        let canvas = ctx.display.resolution().size();
        let area = Rect::new(0, 0, canvas.0, canvas.1);
        let tint = Color::WHITE * ctx.status.transition_alpha();

        ctx.begin_batch();
        ctx.draw_sprite(&Sprite::stretched(texture, area).with_tint(tint));
        ctx.end_batch();
    }
}
