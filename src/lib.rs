//=========================================================================
// Twin Paws Library Root
//
// A two-character platformer: a deterministic physics and gameplay core
// plus the runtime that drives it from a window.
//
// Responsibilities:
// - Expose the simulation (`game`) and its building blocks (`core`)
// - Expose the runtime entry point (`EngineBuilder` / `Engine`)
// - Keep the winit platform layer private
//
// Typical usage:
// ```no_run
// use twin_paws::EngineBuilder;
//
// fn main() {
//     EngineBuilder::new().build().expect("engine setup").run();
// }
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` holds engine-level systems: math, physics, input and the logic
// thread orchestrator. `game` is the platformer itself and can be driven
// headless through `Game::step`.
//
pub mod core;
pub mod game;
pub mod prelude;

//--- Internal Modules ----------------------------------------------------
//
// `platform` owns the window and OS event loop; `engine` wires it to the
// logic thread.
//
mod engine;
mod platform;

//--- Public Exports ------------------------------------------------------

pub use engine::{Engine, EngineBuilder, EngineError};
