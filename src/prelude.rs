//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use tilestack::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Engine
pub use crate::engine::{Backend, Engine, EngineBuilder, EngineError, GamepadSource};

// Screen system
pub use crate::core::screen::{
    ActivateContext, DrawContext, FrameTime, Screen, ScreenContext, ScreenError, ScreenId,
    ScreenManager, ScreenState, ScreenStatus,
};

// Display
pub use crate::core::display::{DisplayStrategy, GameResolution, Viewport};

// Input
pub use crate::core::input::{
    GamepadButton, InputAction, InputEvent, InputState, KeyCode, Modifiers, PlayerIndex,
};

// Rendering and content
pub use crate::core::content::{ContentError, ContentLoader};
pub use crate::core::render::{Color, Font, Rect, Renderer, Sprite, Texture};

// Tile map
pub use crate::core::tilemap::{Tilemap, TilemapError};
