//=========================================================================
// Platform Subsystem
//
// Runs the Winit event loop and drives the screen manager from it.
//
// Architecture:
// ```text
//  Main Thread
//  ┌──────────────────────────────────────────────────────┐
//  │  Winit Event Loop                                    │
//  │   ├─ resumed          → window, Backend, initialize  │
//  │   ├─ Resized          → ScreenManager::set_viewport  │
//  │   ├─ Focused          → ScreenManager focus flag     │
//  │   ├─ Keyboard / Mouse → InputProcessor → InputBuffer │
//  │   └─ RedrawRequested  (frame boundary)               │
//  │        ├─ poll gamepads into InputBuffer             │
//  │        ├─ ScreenManager::update(time, events)        │
//  │        ├─ exit if requested or stack empty           │
//  │        └─ ScreenManager::draw(time, renderer)        │
//  └──────────────────────────────────────────────────────┘
// ```
//
// Key Design Decisions:
// - **RedrawRequested = frame boundary**: all input since the previous
//   redraw reaches the manager as one ordered batch
// - **Sticky modifiers**: modifier state persists until ModifiersChanged
// - **Main thread requirement**: Winit mandates main thread on macOS/iOS,
//   so this runs on the thread that called `Engine::run()`
// - **Errors end the loop**: the first error is stored and returned from
//   `run()` once the event loop has exited
//
//=========================================================================

//=== Submodules ==========================================================

mod input_buffer;
mod input_processor;

//=== External Crates =====================================================

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use log::*;
use thiserror::Error;
use winit::{
    application::ApplicationHandler,
    dpi::{LogicalSize, PhysicalSize},
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::{Window, WindowAttributes, WindowId},
};

//=== Internal Imports ====================================================

use crate::core::display::Viewport;
use crate::core::input::InputEvent;
use crate::core::render::Renderer;
use crate::core::screen::{FrameTime, ScreenManager};
use crate::engine::{Backend, BackendError, EngineError, GamepadSource};
use input_buffer::InputBuffer;
use input_processor::InputProcessor;

//=== PlatformError =======================================================

/// Window system failures. All of them are fatal to the run.
#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("event loop creation failed: {0}")]
    EventLoopCreation(#[source] winit::error::EventLoopError),

    #[error("event loop error: {0}")]
    EventLoopExecution(#[source] winit::error::EventLoopError),

    #[error("window creation failed: {0}")]
    WindowCreation(#[source] winit::error::OsError),
}

//=== WindowConfig ========================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

pub(crate) type BackendFactory = Box<dyn FnOnce(Arc<Window>, &Path) -> Result<Backend, BackendError>>;

//=== FrameClock ==========================================================

/// Longest step a single frame may report.
const MAX_FRAME_STEP: Duration = Duration::from_millis(250);

/// Turns redraw instants into [`FrameTime`]s.
///
/// Long stalls (window drags, a debugger break) advance time by one
/// capped step.
struct FrameClock {
    last: Option<Instant>,
    time: FrameTime,
}

impl FrameClock {
    fn new() -> Self {
        Self {
            last: None,
            time: FrameTime::default(),
        }
    }

    fn tick(&mut self, now: Instant) -> FrameTime {
        let elapsed = self
            .last
            .map_or(Duration::ZERO, |last| now.saturating_duration_since(last))
            .min(MAX_FRAME_STEP);

        self.last = Some(now);
        self.time = self.time.advance(elapsed);
        self.time
    }
}

//=== FrameOutcome ========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FrameOutcome {
    Continue,
    Exit,
}

//=== Platform ============================================================

/// Owns the window, the backend and the screen manager for one run.
///
/// # Lifecycle
///
/// 1. **Construction**: `Platform::new(..)` stores the manager and factory
/// 2. **Execution**: `platform.run()` blocks in the Winit event loop
/// 3. **resumed**: window created, factory called, manager initialized
/// 4. **Shutdown**: close request, `exit_game`, empty stack or an error
///
/// This type is NOT Send/Sync; it stays on the main thread.
pub(crate) struct Platform {
    manager: ScreenManager,
    window_config: WindowConfig,
    content_root: PathBuf,
    factory: Option<BackendFactory>,

    /// None until `resumed()` is called.
    window: Option<Arc<Window>>,
    renderer: Option<Box<dyn Renderer>>,
    gamepads: Option<Box<dyn GamepadSource>>,

    buffer: InputBuffer,
    input_processor: InputProcessor,
    frame_events: Vec<InputEvent>,
    clock: FrameClock,

    error: Option<EngineError>,
}

impl Platform {
    //--- Construction -----------------------------------------------------

    pub(crate) fn new(
        manager: ScreenManager,
        window_config: WindowConfig,
        content_root: PathBuf,
        factory: BackendFactory,
    ) -> Self {
        info!(target: "platform", "Platform subsystem initialized");
        Self {
            manager,
            window_config,
            content_root,
            factory: Some(factory),
            window: None,
            renderer: None,
            gamepads: None,
            buffer: InputBuffer::new(),
            input_processor: InputProcessor::new(),
            frame_events: Vec::with_capacity(64),
            clock: FrameClock::new(),
            error: None,
        }
    }

    //--- Execution --------------------------------------------------------

    /// Runs the event loop until it exits, then reports the first error.
    pub(crate) fn run(mut self) -> Result<(), EngineError> {
        debug!(target: "platform", "Starting Winit event loop");

        let event_loop = EventLoop::new().map_err(PlatformError::EventLoopCreation)?;
        event_loop
            .run_app(&mut self)
            .map_err(PlatformError::EventLoopExecution)?;

        match self.error.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    //--- Setup ------------------------------------------------------------

    /// Builds the backend and loads shared content plus queued screens.
    fn attach_backend(&mut self, window: Arc<Window>) -> Result<(), EngineError> {
        let Some(factory) = self.factory.take() else {
            return Ok(());
        };

        let backend = factory(window, &self.content_root).map_err(EngineError::Backend)?;
        self.manager.initialize(backend.content)?;
        self.renderer = Some(backend.renderer);
        self.gamepads = backend.gamepads;
        Ok(())
    }

    fn resize(&mut self, size: PhysicalSize<u32>) {
        // Minimized windows report 0×0
        if size.width == 0 || size.height == 0 {
            return;
        }
        self.manager.set_viewport(Viewport::new(size.width, size.height));
    }

    /// Stores the first error and stops the loop.
    fn fail(&mut self, event_loop: &ActiveEventLoop, err: EngineError) {
        error!(target: "platform", "{}", err);
        if self.error.is_none() {
            self.error = Some(err);
        }
        event_loop.exit();
    }

    //--- Frame ------------------------------------------------------------

    /// One update then one draw. Does nothing before the backend exists.
    fn run_frame(&mut self, time: FrameTime) -> Result<FrameOutcome, EngineError> {
        if self.renderer.is_none() {
            return Ok(FrameOutcome::Continue);
        }

        if let Some(gamepads) = self.gamepads.as_mut() {
            let mut polled = Vec::new();
            gamepads.poll(&mut polled);
            self.buffer.extend_discrete(polled);
        }

        self.frame_events.clear();
        self.buffer.drain_into(&mut self.frame_events);
        if !self.frame_events.is_empty() {
            trace!(target: "platform::input", "Frame input: {} event(s)", self.frame_events.len());
        }

        self.manager.update(time, &self.frame_events)?;

        if self.manager.exit_requested() {
            info!(target: "platform", "Exit requested by a screen");
            return Ok(FrameOutcome::Exit);
        }
        if self.manager.is_empty() {
            info!(target: "platform", "Screen stack is empty");
            return Ok(FrameOutcome::Exit);
        }

        if let Some(renderer) = self.renderer.as_deref_mut() {
            renderer.begin_frame(self.manager.display().viewport());
            self.manager.draw(time, renderer);
            renderer.end_frame();
        }

        Ok(FrameOutcome::Continue)
    }

    //--- Test Accessors ---------------------------------------------------

    #[cfg(test)]
    pub(crate) fn window(&self) -> Option<&Window> {
        self.window.as_deref()
    }
}

//=== Winit Integration ===================================================

impl ApplicationHandler for Platform {
    /// Called when app becomes active (startup or mobile resume).
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            debug!(target: "platform", "Window already exists (mobile resume?)");
            return;
        }

        let attrs = WindowAttributes::default()
            .with_title(self.window_config.title.clone())
            .with_inner_size(LogicalSize::new(self.window_config.width, self.window_config.height));

        let window = match event_loop.create_window(attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                self.fail(event_loop, PlatformError::WindowCreation(e).into());
                return;
            }
        };

        let size = window.inner_size();
        info!(
            target: "platform",
            "Window created: {}x{} @ {}x DPI",
            size.width,
            size.height,
            window.scale_factor()
        );

        self.resize(size);
        self.window = Some(Arc::clone(&window));

        if let Err(err) = self.attach_backend(Arc::clone(&window)) {
            self.fail(event_loop, err);
            return;
        }

        window.request_redraw();
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                info!(target: "platform", "Window close requested");
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                self.resize(size);
            }

            WindowEvent::Focused(focused) => {
                debug!(target: "platform", "Window focus: {}", focused);
                self.manager.set_window_focused(focused);
            }

            WindowEvent::ModifiersChanged(modifiers) => {
                trace!(target: "platform::input", "Modifiers changed: {:?}", modifiers);
                self.input_processor.set_modifiers(modifiers.state());
            }

            WindowEvent::CursorMoved { position, .. } => {
                let event = self
                    .input_processor
                    .cursor_moved(position, self.manager.display_transform());
                self.buffer.push_continuous(event);
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if let Some(event) = self.input_processor.key_event(&event) {
                    self.buffer.push_discrete(event);
                }
            }

            WindowEvent::MouseInput { state, button, .. } => {
                let event = self.input_processor.mouse_button(button, state);
                self.buffer.push_discrete(event);
            }

            WindowEvent::RedrawRequested => {
                let time = self.clock.tick(Instant::now());

                match self.run_frame(time) {
                    Ok(FrameOutcome::Continue) => {
                        if let Some(window) = &self.window {
                            window.request_redraw();
                        }
                    }
                    Ok(FrameOutcome::Exit) => event_loop.exit(),
                    Err(err) => self.fail(event_loop, err),
                }
            }

            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        info!(target: "platform", "Event loop exiting");
        self.manager.unload_content();
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::content::SharedResourceIds;
    use crate::core::display::DisplaySettings;
    use crate::core::input::{GamepadButton, KeyCode, Modifiers, PlayerIndex};
    use crate::screens::MainMenuScreen;
    use crate::testing::{MemoryContent, RecordingRenderer};

    fn platform() -> Platform {
        let manager = ScreenManager::new(DisplaySettings::default(), SharedResourceIds::default());
        let config = WindowConfig {
            title: "test".to_string(),
            width: 640,
            height: 360,
        };
        let factory: BackendFactory = Box::new(|_: Arc<Window>, _: &Path| Err("no window in tests".into()));
        Platform::new(manager, config, PathBuf::from("Content"), factory)
    }

    /// Platform with an initialized manager and a recording renderer.
    fn attached() -> Platform {
        let mut platform = platform();
        platform
            .manager
            .initialize(Box::new(MemoryContent::with_shared_defaults()))
            .expect("shared content present");
        platform.renderer = Some(Box::new(RecordingRenderer::new()));
        platform
    }

    fn frame() -> FrameTime {
        FrameTime::new(Duration::from_millis(16), Duration::from_millis(16))
    }

    fn key_down(key: KeyCode) -> InputEvent {
        InputEvent::KeyDown { key, modifiers: Modifiers::NONE }
    }

    //=====================================================================
    // FrameClock Tests
    //=====================================================================

    #[test]
    fn first_tick_has_zero_elapsed() {
        let mut clock = FrameClock::new();
        let time = clock.tick(Instant::now());
        assert_eq!(time.elapsed, Duration::ZERO);
        assert_eq!(time.total, Duration::ZERO);
    }

    #[test]
    fn ticks_accumulate_total() {
        let start = Instant::now();
        let mut clock = FrameClock::new();
        clock.tick(start);
        clock.tick(start + Duration::from_millis(16));
        let time = clock.tick(start + Duration::from_millis(40));

        assert_eq!(time.elapsed, Duration::from_millis(24));
        assert_eq!(time.total, Duration::from_millis(40));
    }

    #[test]
    fn stalls_are_capped() {
        let start = Instant::now();
        let mut clock = FrameClock::new();
        clock.tick(start);
        let time = clock.tick(start + Duration::from_secs(5));
        assert_eq!(time.elapsed, MAX_FRAME_STEP);
    }

    //=====================================================================
    // Platform Tests
    //=====================================================================

    #[test]
    fn platform_creation() {
        let platform = platform();
        assert!(platform.window().is_none(), "Window should be created lazily");
        assert!(platform.factory.is_some());
    }

    #[test]
    fn frame_before_backend_is_noop() {
        let mut platform = platform();
        platform.buffer.push_discrete(key_down(KeyCode::Escape));

        assert_eq!(platform.run_frame(frame()).expect("no-op"), FrameOutcome::Continue);
        assert_eq!(platform.buffer.len(), 1, "Input kept until the backend exists");
    }

    #[test]
    fn empty_stack_ends_the_loop() {
        let mut platform = attached();
        assert_eq!(platform.run_frame(frame()).expect("update"), FrameOutcome::Exit);
    }

    #[test]
    fn buffered_input_reaches_the_focused_screen() {
        let mut platform = attached();
        platform
            .manager
            .add_screen(Box::new(MainMenuScreen::new()), None)
            .expect("menu loads");

        assert_eq!(platform.run_frame(frame()).expect("update"), FrameOutcome::Continue);

        // Escape on the main menu asks the game to exit
        platform.buffer.push_discrete(key_down(KeyCode::Escape));
        assert_eq!(platform.run_frame(frame()).expect("update"), FrameOutcome::Exit);
        assert!(platform.buffer.is_empty());
    }

    #[test]
    fn polled_gamepad_events_are_delivered() {
        struct StartOnce(bool);

        impl GamepadSource for StartOnce {
            fn poll(&mut self, events: &mut Vec<InputEvent>) {
                if !std::mem::replace(&mut self.0, true) {
                    events.push(InputEvent::GamepadButtonDown {
                        player: PlayerIndex::Two,
                        button: GamepadButton::B,
                    });
                }
            }
        }

        let mut platform = attached();
        platform.gamepads = Some(Box::new(StartOnce(false)));
        platform
            .manager
            .add_screen(Box::new(MainMenuScreen::new()), None)
            .expect("menu loads");

        // B cancels the main menu, which exits the game
        assert_eq!(platform.run_frame(frame()).expect("update"), FrameOutcome::Exit);
    }

    #[test]
    fn zero_size_resize_is_ignored() {
        let mut platform = platform();
        let before = platform.manager.display().viewport();

        platform.resize(PhysicalSize::new(0, 0));
        assert_eq!(platform.manager.display().viewport(), before);

        platform.resize(PhysicalSize::new(1280, 720));
        assert_eq!(platform.manager.display().viewport(), Viewport::new(1280, 720));
    }

    //=====================================================================
    // PlatformError Tests
    //=====================================================================

    #[test]
    fn platform_error_is_error_trait() {
        fn assert_error<T: std::error::Error + 'static>() {}
        assert_error::<PlatformError>();
    }
}
