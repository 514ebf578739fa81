//=========================================================================
// Screen Commands
//=========================================================================
//
// Queue of stack changes requested by screens.
//
// Screens never touch the stack directly. They push commands here from
// `update` / `handle_input`, and the manager applies them in FIFO order
// as soon as that callback returns.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;

//=== Internal Dependencies ===============================================

use super::{Screen, ScreenId};
use crate::core::input::PlayerIndex;

//=== ScreenCommand =======================================================

/// A requested stack operation.
pub enum ScreenCommand {
    /// Adds a screen on top of the stack.
    Add {
        screen: Box<dyn Screen>,
        controlling_player: Option<PlayerIndex>,
    },

    /// Removes a screen immediately, skipping its exit transition.
    Remove(ScreenId),

    /// Starts a screen's exit transition.
    Exit(ScreenId),

    /// Starts the exit transition of every screen currently on the stack.
    ExitAll,

    /// Asks the host to shut down.
    ExitGame,
}

impl fmt::Debug for ScreenCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScreenCommand::Add { screen, controlling_player } => f
                .debug_struct("Add")
                .field("screen", &screen.name())
                .field("controlling_player", controlling_player)
                .finish(),
            ScreenCommand::Remove(id) => f.debug_tuple("Remove").field(id).finish(),
            ScreenCommand::Exit(id) => f.debug_tuple("Exit").field(id).finish(),
            ScreenCommand::ExitAll => f.write_str("ExitAll"),
            ScreenCommand::ExitGame => f.write_str("ExitGame"),
        }
    }
}

//=== ScreenCommands ======================================================

/// FIFO of pending [`ScreenCommand`]s.
#[derive(Debug, Default)]
pub struct ScreenCommands {
    queue: Vec<ScreenCommand>,
}

impl ScreenCommands {
    pub fn new() -> Self {
        Self { queue: Vec::new() }
    }

    /// Queues a command.
    pub fn push(&mut self, command: ScreenCommand) {
        self.queue.push(command);
    }

    /// Queues a screen to be added on top of the stack.
    pub fn add(&mut self, screen: Box<dyn Screen>, controlling_player: Option<PlayerIndex>) {
        self.push(ScreenCommand::Add { screen, controlling_player });
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ScreenCommand> {
        self.queue.iter()
    }

    /// Takes all queued commands, leaving the queue empty.
    pub fn take(&mut self) -> Vec<ScreenCommand> {
        std::mem::take(&mut self.queue)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
