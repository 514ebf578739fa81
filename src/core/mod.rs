//=========================================================================
// Core Systems
//
// Everything the window loop drives, independent of Winit.
//
// Modules:
// - `screen`:  screen trait, lifecycle, stack manager, callback contexts
// - `tilemap`: map description parsing, tileset, scaled grid drawing
// - `input`:   per-frame input snapshot and action triggers
// - `display`: logical resolution, viewport and letterbox transform
// - `render`:  sprite-batch renderer contract and value types
// - `content`: resource loading contract and the shared resource set
//
// Notes:
// The host supplies `Renderer` and `ContentLoader`; nothing here touches
// a graphics API or decodes images.
//
//=========================================================================

pub mod content;
pub mod display;
pub mod input;
pub mod render;
pub mod screen;
pub mod tilemap;
