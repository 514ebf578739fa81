//=========================================================================
// Screen Manager
//=========================================================================
//
// Owns the screen stack and drives each screen's lifecycle.
//
// Screens are stored bottom-to-top in a Vec and addressed by ScreenId.
// Update walks a snapshot of ids from the top down, so screens added
// during a pass wait for the next one and screens removed during a pass
// are skipped immediately.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, info, trace, warn};

//=== Internal Dependencies ===============================================

use super::commands::{ScreenCommand, ScreenCommands};
use super::context::{fade_to_black, ActivateContext, DrawContext, FrameTime, ScreenContext};
use super::lifecycle::{LifecycleStep, ScreenLifecycle, ScreenStatus};
use super::{Screen, ScreenError, ScreenId, ScreenState};
use crate::core::content::{ContentLoader, SharedResourceIds, SharedResources};
use crate::core::display::{
    DisplaySettings, DisplayStrategy, DisplayTransform, GameResolution, Viewport,
};
use crate::core::input::{InputEvent, InputState, PlayerIndex};
use crate::core::render::Renderer;

//=== ScreenEntry =========================================================

struct ScreenEntry {
    id: ScreenId,
    screen: Box<dyn Screen>,
    lifecycle: ScreenLifecycle,
    /// Focus flag seen during the last update, reused for draw status.
    other_screen_has_focus: bool,
}

impl ScreenEntry {
    fn status(&self) -> ScreenStatus {
        self.lifecycle
            .status(self.id, self.screen.is_popup(), self.other_screen_has_focus)
    }
}

//=== ScreenManager =======================================================

/// Stack of screens plus the state they share.
///
/// The manager is the only mutator of the stack and of every screen's
/// lifecycle. Screens request changes through [`ScreenCommands`].
///
/// # Example
///
/// ```rust
/// use tilestack::core::content::SharedResourceIds;
/// use tilestack::core::display::DisplaySettings;
/// use tilestack::core::screen::{DrawContext, Screen, ScreenManager};
///
/// struct Title;
/// impl Screen for Title {
///     fn draw(&self, _ctx: &mut DrawContext) {}
/// }
///
/// let mut manager = ScreenManager::new(DisplaySettings::default(), SharedResourceIds::default());
/// let id = manager.add_screen(Box::new(Title), None).expect("not initialized yet");
/// assert_eq!(manager.screens().next().map(|status| status.id), Some(id));
/// ```
pub struct ScreenManager {
    stack: Vec<ScreenEntry>,
    /// Ids still to be visited by the running update pass.
    pending: Vec<ScreenId>,
    commands: ScreenCommands,
    next_id: u64,

    input: InputState,
    display: DisplaySettings,

    resource_ids: SharedResourceIds,
    resources: Option<SharedResources>,
    content: Option<Box<dyn ContentLoader>>,

    window_focused: bool,
    exit_requested: bool,
}

impl ScreenManager {
    //--- Construction -----------------------------------------------------

    /// Creates an empty, uninitialized manager.
    ///
    /// Screens may be added right away; their content is loaded once
    /// [`initialize`](Self::initialize) runs.
    pub fn new(display: DisplaySettings, resource_ids: SharedResourceIds) -> Self {
        Self {
            stack: Vec::new(),
            pending: Vec::new(),
            commands: ScreenCommands::new(),
            next_id: 1,
            input: InputState::new(),
            display,
            resource_ids,
            resources: None,
            content: None,
            window_focused: true,
            exit_requested: false,
        }
    }

    //--- Content ----------------------------------------------------------

    /// Loads the shared resources, then activates every screen on the stack.
    ///
    /// A missing shared resource is fatal and leaves the manager
    /// uninitialized.
    pub fn initialize(&mut self, mut content: Box<dyn ContentLoader>) -> Result<(), ScreenError> {
        info!("Loading shared content from {}", content.root().display());

        let resources = SharedResources::load(content.as_mut(), &self.resource_ids)?;

        for entry in &mut self.stack {
            activate(entry, content.as_mut(), &resources, self.display)?;
        }

        info!("Screen manager initialized with {} screen(s)", self.stack.len());
        self.resources = Some(resources);
        self.content = Some(content);
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.resources.is_some()
    }

    /// Unloads every screen's content. Screens stay on the stack.
    pub fn unload_content(&mut self) {
        for entry in &mut self.stack {
            entry.screen.unload();
        }
        debug!("Unloaded content of {} screen(s)", self.stack.len());
    }

    pub fn shared_resources(&self) -> Option<&SharedResources> {
        self.resources.as_ref()
    }

    //--- Stack Operations -------------------------------------------------

    /// Adds a screen on top of the stack.
    ///
    /// The screen is activated immediately when the manager is initialized
    /// and receives its first update on the next pass.
    pub fn add_screen(
        &mut self,
        mut screen: Box<dyn Screen>,
        controlling_player: Option<PlayerIndex>,
    ) -> Result<ScreenId, ScreenError> {
        let id = ScreenId(self.next_id);
        self.next_id += 1;

        let lifecycle = ScreenLifecycle::new(screen.transition_on_time(), controlling_player);

        if let (Some(content), Some(resources)) = (self.content.as_deref_mut(), &self.resources) {
            screen.activate(&mut ActivateContext {
                content,
                resources,
                display: self.display,
            })?;
        }

        debug!("Adding screen {} ({}) in state {:?}", id, screen.name(), lifecycle.state());

        self.stack.push(ScreenEntry {
            id,
            screen,
            lifecycle,
            other_screen_has_focus: false,
        });

        Ok(id)
    }

    /// Removes a screen immediately, skipping its exit transition.
    ///
    /// Returns `None` (and logs a warning) for an id not on the stack.
    pub fn remove_screen(&mut self, id: ScreenId) -> Option<Box<dyn Screen>> {
        let Some(index) = self.index_of(id) else {
            warn!("Attempted to remove screen {} which is not on the stack", id);
            return None;
        };

        let mut entry = self.stack.remove(index);
        self.pending.retain(|&pending| pending != id);

        if self.is_initialized() {
            entry.screen.unload();
        }

        debug!("Removed screen {} ({})", id, entry.screen.name());
        Some(entry.screen)
    }

    /// Takes a screen off gracefully.
    ///
    /// Without a transition-off time the screen is removed right away,
    /// otherwise it is flagged as exiting and removed once hidden.
    pub fn exit_screen(&mut self, id: ScreenId) {
        let Some(index) = self.index_of(id) else {
            warn!("Attempted to exit screen {} which is not on the stack", id);
            return;
        };

        let entry = &mut self.stack[index];
        if entry.screen.transition_off_time().is_zero() {
            self.remove_screen(id);
        } else {
            debug!("Screen {} ({}) is exiting", id, entry.screen.name());
            entry.lifecycle.begin_exit();
        }
    }

    //--- Frame Loop -------------------------------------------------------

    /// Runs one update pass over the stack.
    ///
    /// Input events are digested first. Screens are then visited top to
    /// bottom; the first one that is transitioning on or active receives
    /// input, and every non-popup screen in that state covers the ones
    /// beneath it.
    pub fn update(&mut self, time: FrameTime, events: &[InputEvent]) -> Result<(), ScreenError> {
        self.input.advance_frame(events);

        self.pending.clear();
        self.pending.extend(self.stack.iter().map(|entry| entry.id));

        let mut other_screen_has_focus = !self.window_focused;
        let mut covered_by_other_screen = false;

        while let Some(id) = self.pending.pop() {
            let Some(index) = self.index_of(id) else {
                continue;
            };

            //--- Transition + per-frame update ------------------------------
            let entry = &mut self.stack[index];
            let is_popup = entry.screen.is_popup();
            let covered = covered_by_other_screen && entry.screen.hides_when_covered();

            let step = entry.lifecycle.advance(
                time.elapsed,
                entry.screen.transition_on_time(),
                entry.screen.transition_off_time(),
                covered,
            );
            entry.other_screen_has_focus = other_screen_has_focus;

            let mut ctx = ScreenContext::new(
                time,
                &self.input,
                entry.status(),
                self.display,
                &mut self.commands,
            );
            entry
                .screen
                .update(&mut ctx, other_screen_has_focus, covered_by_other_screen);

            self.apply_commands()?;

            if step == LifecycleStep::Finished {
                if self.index_of(id).is_some() {
                    trace!("Screen {} finished exiting", id);
                    self.remove_screen(id);
                }
                continue;
            }

            //--- Focus + coverage -------------------------------------------
            let Some(index) = self.index_of(id) else {
                continue;
            };
            let entry = &mut self.stack[index];

            if entry.lifecycle.state().is_visible_or_arriving() {
                if !other_screen_has_focus {
                    entry.other_screen_has_focus = false;

                    let mut ctx = ScreenContext::new(
                        time,
                        &self.input,
                        entry.status(),
                        self.display,
                        &mut self.commands,
                    );
                    entry.screen.handle_input(&mut ctx);

                    self.apply_commands()?;
                    other_screen_has_focus = true;
                }

                if !is_popup {
                    covered_by_other_screen = true;
                }
            }
        }

        Ok(())
    }

    /// Draws every non-hidden screen, bottom to top.
    pub fn draw(&self, time: FrameTime, renderer: &mut dyn Renderer) {
        let Some(resources) = &self.resources else {
            trace!("Skipping draw: shared content not loaded");
            return;
        };

        for entry in &self.stack {
            if entry.lifecycle.state() == ScreenState::Hidden {
                continue;
            }

            let mut ctx = DrawContext::new(time, entry.status(), self.display, resources, renderer);
            entry.screen.draw(&mut ctx);
        }
    }

    /// Darkens the whole viewport with the shared blank texture.
    ///
    /// Used by popups to dim the screens beneath them. Does nothing before
    /// [`initialize`](Self::initialize).
    pub fn fade_back_buffer_to_black(&self, renderer: &mut dyn Renderer, alpha: f32) {
        if let Some(resources) = &self.resources {
            fade_to_black(renderer, resources.blank, self.display.viewport(), alpha);
        }
    }

    //--- Display ----------------------------------------------------------

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.display.set_viewport(viewport);
        debug!(
            "Viewport {}x{} → display scale {:.3}",
            viewport.width,
            viewport.height,
            self.display.transform().scale
        );
    }

    pub fn set_resolution(&mut self, resolution: GameResolution) {
        self.display.set_resolution(resolution);
    }

    pub fn set_display_strategy(&mut self, strategy: DisplayStrategy) {
        self.display.set_strategy(strategy);
    }

    pub fn display(&self) -> DisplaySettings {
        self.display
    }

    pub fn display_transform(&self) -> DisplayTransform {
        self.display.transform()
    }

    //--- Window State -----------------------------------------------------

    /// An unfocused window gives focus to no screen.
    pub fn set_window_focused(&mut self, focused: bool) {
        self.window_focused = focused;
    }

    pub fn is_window_focused(&self) -> bool {
        self.window_focused
    }

    //--- Queries ----------------------------------------------------------

    /// Status of every screen, bottom to top.
    pub fn screens(&self) -> impl Iterator<Item = ScreenStatus> + '_ {
        self.stack.iter().map(ScreenEntry::status)
    }

    pub fn len(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    /// Whether a screen asked the game to shut down.
    pub fn exit_requested(&self) -> bool {
        self.exit_requested
    }

    //--- Internal Helpers -------------------------------------------------

    fn index_of(&self, id: ScreenId) -> Option<usize> {
        self.stack.iter().position(|entry| entry.id == id)
    }

    fn apply_commands(&mut self) -> Result<(), ScreenError> {
        for command in self.commands.take() {
            trace!("Applying screen command {:?}", command);

            match command {
                ScreenCommand::Add {
                    screen,
                    controlling_player,
                } => {
                    self.add_screen(screen, controlling_player)?;
                }
                ScreenCommand::Remove(id) => {
                    self.remove_screen(id);
                }
                ScreenCommand::Exit(id) => self.exit_screen(id),
                ScreenCommand::ExitAll => {
                    let ids: Vec<ScreenId> = self.stack.iter().map(|entry| entry.id).collect();
                    for id in ids {
                        self.exit_screen(id);
                    }
                }
                ScreenCommand::ExitGame => {
                    info!("Exit requested by a screen");
                    self.exit_requested = true;
                }
            }
        }

        Ok(())
    }
}

//=== Helpers =============================================================

fn activate(
    entry: &mut ScreenEntry,
    content: &mut dyn ContentLoader,
    resources: &SharedResources,
    display: DisplaySettings,
) -> Result<(), ScreenError> {
    debug!("Activating screen {} ({})", entry.id, entry.screen.name());
    entry.screen.activate(&mut ActivateContext {
        content,
        resources,
        display,
    })
}

//=========================================================================
// Unit Tests
//=========================================================================
