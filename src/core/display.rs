//=========================================================================
// Display Transform
//=========================================================================
//
// Maps the fixed logical game canvas onto the physical viewport.
//
// Strategies:
//   ScaleToFit   → scale = min(sw/gw, sh/gh), letterbox the short axis
//   ScaleToCover → scale = max(sw/gw, sh/gh), crop the overflowing axis
//
// The offset always centers the canvas on the axis that does not match.
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::Vec2;

//=== GameResolution ======================================================

/// Logical resolution presets the game is authored against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameResolution {
    /// 1024×768
    FourToThree,

    /// 1920×1080
    #[default]
    SixteenToNine,
}

impl GameResolution {
    /// Logical canvas size in pixels.
    pub const fn size(self) -> (u32, u32) {
        match self {
            GameResolution::FourToThree => (1024, 768),
            GameResolution::SixteenToNine => (1920, 1080),
        }
    }

    /// Logical canvas as a viewport at the origin.
    pub const fn viewport(self) -> Viewport {
        let (width, height) = self.size();
        Viewport::new(width, height)
    }
}

//=== DisplayStrategy =====================================================

/// How the logical canvas is fitted into the physical viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DisplayStrategy {
    /// Whole canvas visible, padded on the excess axis.
    #[default]
    ScaleToFit,

    /// Viewport fully covered, overflow cropped.
    ScaleToCover,
}

//=== Viewport ============================================================

/// Physical drawing area in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width over height. Zero-height viewports report 0.
    pub fn aspect_ratio(&self) -> f32 {
        if self.height == 0 {
            return 0.0;
        }
        self.width as f32 / self.height as f32
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }
}

//=== DisplayTransform ====================================================

/// Uniform scale plus translation from logical canvas to viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayTransform {
    pub scale: f32,
    pub offset: Vec2,
}

impl DisplayTransform {
    /// No scaling, no translation.
    pub const IDENTITY: Self = Self {
        scale: 1.0,
        offset: Vec2::ZERO,
    };

    /// Computes the transform that places `game` inside `screen`.
    ///
    /// Pure function of its inputs: calling it again with the same
    /// arguments yields the same transform.
    pub fn compute(screen: Viewport, game: Viewport, strategy: DisplayStrategy) -> Self {
        if game.width == 0 || game.height == 0 || screen.width == 0 || screen.height == 0 {
            return Self::IDENTITY;
        }

        let width_ratio = screen.width as f32 / game.width as f32;
        let height_ratio = screen.height as f32 / game.height as f32;

        // A narrower screen is width-bound when fitting and height-bound when covering
        let width_bound = match strategy {
            DisplayStrategy::ScaleToFit => screen.aspect_ratio() < game.aspect_ratio(),
            DisplayStrategy::ScaleToCover => screen.aspect_ratio() >= game.aspect_ratio(),
        };

        if width_bound {
            let scale = width_ratio;
            Self {
                scale,
                offset: Vec2::new(0.0, (screen.height as f32 - game.height as f32 * scale) / 2.0),
            }
        } else {
            let scale = height_ratio;
            Self {
                scale,
                offset: Vec2::new((screen.width as f32 - game.width as f32 * scale) / 2.0, 0.0),
            }
        }
    }

    /// Maps a logical-canvas point to viewport pixels.
    pub fn apply(&self, point: Vec2) -> Vec2 {
        point * self.scale + self.offset
    }

    /// Maps a viewport pixel back onto the logical canvas.
    pub fn unapply(&self, point: Vec2) -> Vec2 {
        if self.scale == 0.0 {
            return point;
        }
        (point - self.offset) / self.scale
    }
}

impl Default for DisplayTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

//=== DisplaySettings =====================================================

/// Resolution, strategy and viewport with the transform derived from them.
///
/// Every setter recomputes the transform, so it never goes stale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplaySettings {
    resolution: GameResolution,
    strategy: DisplayStrategy,
    viewport: Viewport,
    transform: DisplayTransform,
}

impl DisplaySettings {
    pub fn new(resolution: GameResolution, strategy: DisplayStrategy, viewport: Viewport) -> Self {
        Self {
            resolution,
            strategy,
            viewport,
            transform: DisplayTransform::compute(viewport, resolution.viewport(), strategy),
        }
    }

    pub fn resolution(&self) -> GameResolution {
        self.resolution
    }

    pub fn strategy(&self) -> DisplayStrategy {
        self.strategy
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn transform(&self) -> DisplayTransform {
        self.transform
    }

    /// Logical canvas size in pixels.
    pub fn logical_size(&self) -> Vec2 {
        self.resolution.viewport().size()
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.recompute();
    }

    pub fn set_resolution(&mut self, resolution: GameResolution) {
        self.resolution = resolution;
        self.recompute();
    }

    pub fn set_strategy(&mut self, strategy: DisplayStrategy) {
        self.strategy = strategy;
        self.recompute();
    }

    fn recompute(&mut self) {
        self.transform =
            DisplayTransform::compute(self.viewport, self.resolution.viewport(), self.strategy);
    }
}

impl Default for DisplaySettings {
    /// Logical canvas shown 1:1 in a viewport of the same size.
    fn default() -> Self {
        let resolution = GameResolution::default();
        Self::new(resolution, DisplayStrategy::default(), resolution.viewport())
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
