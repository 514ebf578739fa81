//=========================================================================
// Screen Lifecycle
//=========================================================================
//
// Transition state machine owned by the manager for every screen.
//
// States:
//   TransitionOn  → Active          position reached 0
//   Active        → TransitionOff   exiting, or covered
//   TransitionOn  → TransitionOff   exiting, or covered
//   TransitionOff → Hidden          position reached 1
//   Hidden        → TransitionOn    uncovered and not exiting
//   TransitionOff → TransitionOn    uncovered and not exiting
//
// An exiting screen that reaches position 1 reports `Finished` and the
// manager removes it.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Duration;

//=== Internal Dependencies ===============================================

use super::ScreenId;
use crate::core::input::PlayerIndex;

//=== ScreenState =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScreenState {
    TransitionOn,
    Active,
    TransitionOff,
    Hidden,
}

impl ScreenState {
    /// `TransitionOn` or `Active`: the states that can claim focus.
    pub fn is_visible_or_arriving(self) -> bool {
        matches!(self, ScreenState::TransitionOn | ScreenState::Active)
    }
}

//=== LifecycleStep =======================================================

/// Outcome of one state machine step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LifecycleStep {
    Continue,
    /// Exit transition completed; the screen must be removed.
    Finished,
}

//=== ScreenLifecycle =====================================================

/// Manager-side transition state of one screen.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ScreenLifecycle {
    state: ScreenState,
    position: f32,
    is_exiting: bool,
    controlling_player: Option<PlayerIndex>,
}

impl ScreenLifecycle {
    /// Initial state for a newly added screen.
    ///
    /// With a transition-on time the screen starts fully hidden at position
    /// 1.0, otherwise it is immediately `Active`.
    pub(crate) fn new(transition_on_time: Duration, controlling_player: Option<PlayerIndex>) -> Self {
        let (state, position) = if transition_on_time.is_zero() {
            (ScreenState::Active, 0.0)
        } else {
            (ScreenState::TransitionOn, 1.0)
        };

        Self {
            state,
            position,
            is_exiting: false,
            controlling_player,
        }
    }

    //--- Accessors --------------------------------------------------------

    pub(crate) fn state(&self) -> ScreenState {
        self.state
    }

    pub(crate) fn position(&self) -> f32 {
        self.position
    }

    pub(crate) fn is_exiting(&self) -> bool {
        self.is_exiting
    }

    pub(crate) fn controlling_player(&self) -> Option<PlayerIndex> {
        self.controlling_player
    }

    pub(crate) fn begin_exit(&mut self) {
        self.is_exiting = true;
    }

    //--- State Machine ----------------------------------------------------

    /// Advances the transition by `elapsed`.
    pub(crate) fn advance(
        &mut self,
        elapsed: Duration,
        on_time: Duration,
        off_time: Duration,
        covered: bool,
    ) -> LifecycleStep {
        if self.is_exiting {
            self.state = ScreenState::TransitionOff;
            if !self.step(elapsed, off_time, 1.0) {
                self.state = ScreenState::Hidden;
                return LifecycleStep::Finished;
            }
        } else if covered {
            self.state = if self.step(elapsed, off_time, 1.0) {
                ScreenState::TransitionOff
            } else {
                ScreenState::Hidden
            };
        } else {
            self.state = if self.step(elapsed, on_time, -1.0) {
                ScreenState::TransitionOn
            } else {
                ScreenState::Active
            };
        }

        LifecycleStep::Continue
    }

    /// Moves the position toward the end of `direction`.
    ///
    /// Returns `false` once the end is reached (position clamped).
    fn step(&mut self, elapsed: Duration, time: Duration, direction: f32) -> bool {
        let delta = if time.is_zero() {
            1.0
        } else {
            elapsed.as_secs_f32() / time.as_secs_f32()
        };

        self.position += delta * direction;

        if (direction < 0.0 && self.position <= 0.0) || (direction > 0.0 && self.position >= 1.0) {
            self.position = self.position.clamp(0.0, 1.0);
            return false;
        }

        true
    }

    //--- Snapshots --------------------------------------------------------

    pub(crate) fn status(&self, id: ScreenId, is_popup: bool, other_screen_has_focus: bool) -> ScreenStatus {
        ScreenStatus {
            id,
            state: self.state,
            transition_position: self.position,
            is_exiting: self.is_exiting,
            is_popup,
            controlling_player: self.controlling_player,
            other_screen_has_focus,
        }
    }
}

//=== ScreenStatus ========================================================

/// Read-only copy of a screen's lifecycle, handed to its callbacks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenStatus {
    pub id: ScreenId,
    pub state: ScreenState,
    /// 0.0 fully on, 1.0 fully off.
    pub transition_position: f32,
    pub is_exiting: bool,
    pub is_popup: bool,
    pub controlling_player: Option<PlayerIndex>,
    pub other_screen_has_focus: bool,
}

impl ScreenStatus {
    /// Opacity implied by the transition: 1.0 fully on, 0.0 fully off.
    pub fn transition_alpha(&self) -> f32 {
        1.0 - self.transition_position
    }

    /// True when this screen holds focus and is on its way in or fully in.
    pub fn is_active(&self) -> bool {
        !self.other_screen_has_focus && self.state.is_visible_or_arriving()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
