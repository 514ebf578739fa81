//=========================================================================
// tilestack Library Root
//
// A 2D game client core: a stack of transitioning screens (background,
// menus, pause popup, gameplay) and a tile-map renderer, driven by a
// Winit window.
//
// Responsibilities:
// - Expose the engine facade (`EngineBuilder`, `Engine`)
// - Expose the screen system, tile map, input and display types under
//   `core` for games that build their own screens
// - Ship the default screen set under `screens`
// - Keep the window loop (`platform`) out of the public API surface
//
// Typical usage:
// ```no_run
// use tilestack::EngineBuilder;
// use tilestack::screens::title_screens;
//
// let mut engine = EngineBuilder::new().with_title("Tiles").build();
// for screen in title_screens() {
//     engine.add_screen(screen, None)?;
// }
// engine.run(|window, content_root| my_backend::create(window, content_root))?;
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` holds the screen stack, tile map, input, display and the host
// collaborator traits (`Renderer`, `ContentLoader`).
//
// `screens` holds the concrete screens built on top of it.
//
pub mod core;
pub mod prelude;
pub mod screens;

//--- Internal Modules ----------------------------------------------------
//
// `platform` owns the Winit event loop and is driven through `Engine`.
//
// `engine` defines the builder and the run entry point.
//
mod engine;
mod platform;

#[cfg(test)]
mod testing;

//--- Public Exports ------------------------------------------------------

pub use engine::{Backend, BackendError, Engine, EngineBuilder, EngineError, GamepadSource};
pub use platform::PlatformError;
