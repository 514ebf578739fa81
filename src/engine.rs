//=========================================================================
// Engine
//
// Application entry point: configure, add the first screens, run.
//
// Architecture:
// ```text
//     EngineBuilder  ──build()──>  Engine  ──run(factory)──>  [Window loop]
//         │                          │                            │
//         ├─ with_title()            ├─ add_screen()              ├─ factory → Backend
//         ├─ with_window_size()      └─ manager_mut()             ├─ update
//         ├─ with_resolution()                                    └─ draw
//         ├─ with_display_strategy()
//         ├─ with_content_root()
//         └─ with_shared_resources()
// ```
//
// The renderer and content loader usually need the live window (GPU
// surface, DPI), so the host hands in a factory that builds them once
// the window exists.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::{error, info};
use thiserror::Error;
use winit::window::Window;

//=== Internal Dependencies ===============================================

use crate::core::content::{ContentLoader, SharedResourceIds};
use crate::core::display::{DisplaySettings, DisplayStrategy, GameResolution, Viewport};
use crate::core::input::{InputEvent, PlayerIndex};
use crate::core::render::Renderer;
use crate::core::screen::{Screen, ScreenError, ScreenId, ScreenManager};
use crate::platform::{Platform, PlatformError, WindowConfig};

//=== Errors ==============================================================

/// Error type host backend factories return.
pub type BackendError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Platform(#[from] PlatformError),

    #[error("backend construction failed: {0}")]
    Backend(#[source] BackendError),

    #[error(transparent)]
    Screen(#[from] ScreenError),
}

//=== Backend =============================================================

/// Polled each frame for input the window does not deliver (gamepads).
pub trait GamepadSource {
    /// Appends the button transitions seen since the previous poll.
    fn poll(&mut self, events: &mut Vec<InputEvent>);
}

/// Host services the engine draws and loads through.
pub struct Backend {
    pub renderer: Box<dyn Renderer>,
    pub content: Box<dyn ContentLoader>,
    pub gamepads: Option<Box<dyn GamepadSource>>,
}

impl Backend {
    pub fn new(renderer: Box<dyn Renderer>, content: Box<dyn ContentLoader>) -> Self {
        Self {
            renderer,
            content,
            gamepads: None,
        }
    }

    pub fn with_gamepads(mut self, gamepads: Box<dyn GamepadSource>) -> Self {
        self.gamepads = Some(gamepads);
        self
    }
}

//=== EngineBuilder =======================================================

/// Builder for configuring and constructing an [`Engine`].
///
/// # Default Values
///
/// - **Title**: "tilestack"
/// - **Window size**: 1280×720 logical pixels
/// - **Resolution**: [`GameResolution::SixteenToNine`]
/// - **Strategy**: [`DisplayStrategy::ScaleToFit`]
/// - **Content root**: `Content`
/// - **Shared resources**: [`SharedResourceIds::default`]
///
/// # Examples
///
/// ```
/// use tilestack::EngineBuilder;
/// use tilestack::core::display::{DisplayStrategy, GameResolution};
///
/// let engine = EngineBuilder::new()
///     .with_title("Dungeon")
///     .with_window_size(1024, 768)
///     .with_resolution(GameResolution::FourToThree)
///     .with_display_strategy(DisplayStrategy::ScaleToCover)
///     .build();
///
/// assert_eq!(engine.manager().display().resolution(), GameResolution::FourToThree);
/// ```
#[derive(Debug, Clone)]
pub struct EngineBuilder {
    title: String,
    window_size: (u32, u32),
    resolution: GameResolution,
    strategy: DisplayStrategy,
    content_root: PathBuf,
    shared_resources: SharedResourceIds,
}

impl EngineBuilder {
    pub fn new() -> Self {
        Self {
            title: "tilestack".to_string(),
            window_size: (1280, 720),
            resolution: GameResolution::default(),
            strategy: DisplayStrategy::default(),
            content_root: PathBuf::from("Content"),
            shared_resources: SharedResourceIds::default(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Initial inner size of the window in logical pixels.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        assert!(
            width > 0 && height > 0,
            "Window size must be non-zero, got {}x{}",
            width,
            height
        );
        self.window_size = (width, height);
        self
    }

    /// Logical canvas the screens are authored against.
    pub fn with_resolution(mut self, resolution: GameResolution) -> Self {
        self.resolution = resolution;
        self
    }

    pub fn with_display_strategy(mut self, strategy: DisplayStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Directory resource identifiers are resolved against.
    pub fn with_content_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.content_root = root.into();
        self
    }

    /// Font and textures loaded once and lent to every screen.
    pub fn with_shared_resources(mut self, ids: SharedResourceIds) -> Self {
        self.shared_resources = ids;
        self
    }

    pub fn build(self) -> Engine {
        let (width, height) = self.window_size;
        info!(
            "Building engine '{}' ({}x{} window, {:?} canvas, {:?})",
            self.title, width, height, self.resolution, self.strategy
        );

        // Until the window reports its real size
        let viewport = Viewport::new(width, height);
        let display = DisplaySettings::new(self.resolution, self.strategy, viewport);

        Engine {
            manager: ScreenManager::new(display, self.shared_resources),
            window: WindowConfig {
                title: self.title,
                width,
                height,
            },
            content_root: self.content_root,
        }
    }
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//=== Engine ==============================================================

/// A configured screen stack waiting for a window.
///
/// Screens added before [`run`](Self::run) are activated as soon as the
/// backend's content loader is available.
pub struct Engine {
    manager: ScreenManager,
    window: WindowConfig,
    content_root: PathBuf,
}

impl Engine {
    //--- Setup ------------------------------------------------------------

    pub fn add_screen(
        &mut self,
        screen: Box<dyn Screen>,
        controlling_player: Option<PlayerIndex>,
    ) -> Result<ScreenId, ScreenError> {
        self.manager.add_screen(screen, controlling_player)
    }

    pub fn manager(&self) -> &ScreenManager {
        &self.manager
    }

    pub fn manager_mut(&mut self) -> &mut ScreenManager {
        &mut self.manager
    }

    pub fn title(&self) -> &str {
        &self.window.title
    }

    pub fn content_root(&self) -> &Path {
        &self.content_root
    }

    //--- Execution --------------------------------------------------------

    /// Opens the window and runs the frame loop until the game exits.
    ///
    /// `factory` is called once, after the window is created, with the
    /// window and the configured content root.
    ///
    /// # Lifecycle
    ///
    /// 1. Event loop starts, window is created
    /// 2. `factory` builds the [`Backend`]; shared content and the queued
    ///    screens are loaded through it
    /// 3. Every redraw runs one update and one draw
    /// 4. The loop ends when the window closes, a screen calls
    ///    `exit_game`, the stack empties, or an error occurs
    ///
    /// # Errors
    ///
    /// Event loop and window failures, a failing `factory`, and screen
    /// activation errors all end the loop and are returned here.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use std::path::Path;
    /// use std::sync::Arc;
    ///
    /// use tilestack::{Backend, BackendError, EngineBuilder};
    /// use tilestack::screens::title_screens;
    /// # fn create_backend(_: Arc<winit::window::Window>, _: &Path) -> Result<Backend, BackendError> {
    /// #     unimplemented!()
    /// # }
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let mut engine = EngineBuilder::new().with_content_root("Content").build();
    /// for screen in title_screens() {
    ///     engine.add_screen(screen, None)?;
    /// }
    ///
    /// engine.run(create_backend)?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn run<F>(self, factory: F) -> Result<(), EngineError>
    where
        F: FnOnce(Arc<Window>, &Path) -> Result<Backend, BackendError> + 'static,
    {
        info!(
            "Starting engine with {} queued screen(s), content root {}",
            self.manager.len(),
            self.content_root.display()
        );

        let platform = Platform::new(self.manager, self.window, self.content_root, Box::new(factory));
        let result = platform.run();

        match &result {
            Ok(()) => info!("Engine shutdown complete"),
            Err(err) => error!("Engine stopped: {}", err),
        }
        result
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screens::title_screens;

    //=====================================================================
    // EngineBuilder Tests
    //=====================================================================

    #[test]
    fn builder_defaults() {
        let builder = EngineBuilder::new();
        assert_eq!(builder.title, "tilestack");
        assert_eq!(builder.window_size, (1280, 720));
        assert_eq!(builder.resolution, GameResolution::SixteenToNine);
        assert_eq!(builder.strategy, DisplayStrategy::ScaleToFit);
        assert_eq!(builder.content_root, PathBuf::from("Content"));
        assert_eq!(builder.shared_resources, SharedResourceIds::default());
    }

    #[test]
    fn builder_with_window_size() {
        let builder = EngineBuilder::new().with_window_size(800, 600);
        assert_eq!(builder.window_size, (800, 600));
    }

    #[test]
    #[should_panic(expected = "Window size must be non-zero")]
    fn builder_with_window_size_panics_on_zero_width() {
        EngineBuilder::new().with_window_size(0, 600);
    }

    #[test]
    #[should_panic(expected = "Window size must be non-zero")]
    fn builder_with_window_size_panics_on_zero_height() {
        EngineBuilder::new().with_window_size(800, 0);
    }

    #[test]
    fn builder_fluent_api_chaining() {
        let ids = SharedResourceIds {
            font: "menufont".to_string(),
            blank_texture: "white".to_string(),
            textures: Vec::new(),
        };

        let engine = EngineBuilder::new()
            .with_title("Tiles")
            .with_window_size(1024, 768)
            .with_resolution(GameResolution::FourToThree)
            .with_display_strategy(DisplayStrategy::ScaleToCover)
            .with_content_root("assets")
            .with_shared_resources(ids)
            .build();

        assert_eq!(engine.title(), "Tiles");
        assert_eq!(engine.content_root(), Path::new("assets"));

        let display = engine.manager().display();
        assert_eq!(display.resolution(), GameResolution::FourToThree);
        assert_eq!(display.strategy(), DisplayStrategy::ScaleToCover);
        assert_eq!(display.viewport(), Viewport::new(1024, 768));
    }

    #[test]
    fn build_derives_transform_from_window_size() {
        let engine = EngineBuilder::new().with_window_size(960, 540).build();
        assert_eq!(engine.manager().display_transform().scale, 0.5);
    }

    //=====================================================================
    // Engine Tests
    //=====================================================================

    #[test]
    fn screens_added_before_run_wait_for_content() {
        let mut engine = EngineBuilder::new().build();
        for screen in title_screens() {
            engine.add_screen(screen, None).expect("queued without content");
        }

        assert_eq!(engine.manager().len(), 2);
        assert!(!engine.manager().is_initialized());
    }

    #[test]
    fn backend_error_is_reported_with_source() {
        let err = EngineError::Backend("no adapter".into());
        assert_eq!(err.to_string(), "backend construction failed: no adapter");
        assert!(std::error::Error::source(&err).is_some());
    }
}
