//=========================================================================
// Render Interface
//=========================================================================
//
// Contract between the screen stack / tile map and the host renderer.
//
// The crate never talks to a graphics API. It describes sprite batches
// through `Renderer`; a host backend (wgpu, SDL, a test recorder) turns
// them into pixels.
//
//   begin_batch(transform) → draw_sprite / draw_string ... → end_batch()
//
//=========================================================================

//=== External Dependencies ===============================================

use std::ops::Mul;

use glam::Vec2;

//=== Internal Dependencies ===============================================

use crate::core::display::{DisplayTransform, Viewport};

//=== Rect ================================================================

/// Integer rectangle in pixels (top-left origin).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }
}

//=== Color ===============================================================

/// Linear RGBA color, components in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Self = Self::rgba(1.0, 1.0, 1.0, 1.0);
    pub const BLACK: Self = Self::rgba(0.0, 0.0, 0.0, 1.0);
    pub const YELLOW: Self = Self::rgba(1.0, 1.0, 0.0, 1.0);
    pub const TRANSPARENT: Self = Self::rgba(0.0, 0.0, 0.0, 0.0);

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }
}

/// Premultiplied fade: every channel scaled by `alpha`.
impl Mul<f32> for Color {
    type Output = Color;

    fn mul(self, alpha: f32) -> Color {
        Color::rgba(self.r * alpha, self.g * alpha, self.b * alpha, self.a * alpha)
    }
}

//=== Handles =============================================================

/// Backend texture handle plus its pixel size.
///
/// Issued by the [`ContentLoader`](crate::core::content::ContentLoader);
/// the id is opaque to the crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Texture {
    pub id: u32,
    pub width: u32,
    pub height: u32,
}

impl Texture {
    /// Full image rectangle.
    pub fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.width, self.height)
    }
}

/// Backend font handle with its line spacing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Font {
    pub id: u32,
    pub line_spacing: f32,
}

//=== Sprite ==============================================================

/// Mirroring applied to a sprite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SpriteEffects {
    #[default]
    None,
    FlipHorizontally,
    FlipVertically,
}

/// Where a sprite lands: a point (scaled by `Sprite::scale`) or a
/// rectangle the source is stretched into.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Destination {
    Position(Vec2),
    Rect(Rect),
}

/// One textured quad in a batch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sprite {
    pub texture: Texture,
    pub destination: Destination,
    /// `None` draws the whole texture.
    pub source: Option<Rect>,
    pub tint: Color,
    pub rotation: f32,
    pub origin: Vec2,
    pub scale: f32,
    pub effects: SpriteEffects,
    pub layer_depth: f32,
}

impl Sprite {
    /// Untinted, unrotated, unscaled sprite at `position`.
    pub fn at(texture: Texture, position: Vec2) -> Self {
        Self {
            texture,
            destination: Destination::Position(position),
            source: None,
            tint: Color::WHITE,
            rotation: 0.0,
            origin: Vec2::ZERO,
            scale: 1.0,
            effects: SpriteEffects::None,
            layer_depth: 0.0,
        }
    }

    /// Sprite stretched over `rect`.
    pub fn stretched(texture: Texture, rect: Rect) -> Self {
        Self {
            destination: Destination::Rect(rect),
            ..Self::at(texture, Vec2::ZERO)
        }
    }

    pub fn with_source(mut self, source: Rect) -> Self {
        self.source = Some(source);
        self
    }

    pub fn with_tint(mut self, tint: Color) -> Self {
        self.tint = tint;
        self
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }
}

//=== Renderer ============================================================

/// Host sprite-batch renderer.
///
/// Calls always arrive as `begin_batch`, any number of draws, then
/// `end_batch`, on the frame-loop thread. The window loop brackets each
/// frame's batches with `begin_frame` / `end_frame`.
pub trait Renderer {
    /// Starts a batch; every draw until `end_batch` goes through `transform`.
    fn begin_batch(&mut self, transform: DisplayTransform);

    /// Queues one textured quad.
    fn draw_sprite(&mut self, sprite: &Sprite);

    /// Queues a string in `font` at `position`.
    fn draw_string(&mut self, font: &Font, text: &str, position: Vec2, color: Color);

    /// Flushes the batch.
    fn end_batch(&mut self);

    /// Called by the platform before the first batch of a frame.
    fn begin_frame(&mut self, _viewport: Viewport) {}

    /// Called by the platform after the last batch of a frame.
    fn end_frame(&mut self) {}
}

//=========================================================================
// Unit Tests
//=========================================================================
