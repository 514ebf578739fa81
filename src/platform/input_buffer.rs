//=========================================================================
// Input Buffer
//
// Holds the InputEvents produced between two redraws.
//
// Two lanes:
// - `discrete`: presses and releases, kept in arrival order; an event
//   identical to the one just before it is dropped
// - `continuous`: cursor movement, coalesced so only the latest position
//   of the frame survives
//
// `drain()` hands the frame's events to the screen manager, discrete
// first, and leaves both lanes empty with their capacity intact.
//=========================================================================

//=== Standard Library Imports ============================================
use std::collections::HashSet;

//=== Internal Modules ====================================================
use crate::core::input::InputEvent;

//=== InputBuffer =========================================================

pub(crate) struct InputBuffer {
    discrete: Vec<InputEvent>,
    continuous: HashSet<InputEvent>,
}

impl InputBuffer {
    pub(crate) fn new() -> Self {
        const DISCRETE_BASE: usize = 64;
        const CONTINUOUS_BASE: usize = 4;

        Self {
            discrete: Vec::with_capacity(DISCRETE_BASE),
            continuous: HashSet::with_capacity(CONTINUOUS_BASE),
        }
    }

    //--- Recording --------------------------------------------------------

    /// Latest value wins (`MouseMoved` events compare equal).
    pub(crate) fn push_continuous(&mut self, event: InputEvent) {
        self.continuous.replace(event);
    }

    pub(crate) fn push_discrete(&mut self, event: InputEvent) {
        if self.discrete.last() != Some(&event) {
            self.discrete.push(event);
        }
    }

    /// Appends events collected outside the window (polled gamepads).
    pub(crate) fn extend_discrete(&mut self, events: impl IntoIterator<Item = InputEvent>) {
        for event in events {
            self.push_discrete(event);
        }
    }

    //--- Drain ------------------------------------------------------------

    /// Moves this frame's events into `out`, discrete before continuous.
    pub(crate) fn drain_into(&mut self, out: &mut Vec<InputEvent>) {
        out.extend(self.discrete.drain(..));
        out.extend(self.continuous.drain());
    }

    pub(crate) fn clear(&mut self) {
        self.discrete.clear();
        self.continuous.clear();
    }

    pub(crate) fn len(&self) -> usize {
        self.discrete.len() + self.continuous.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.discrete.is_empty() && self.continuous.is_empty()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
