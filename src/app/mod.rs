// ProfileLookup - app/mod.rs
//
// Application layer: lookup orchestration, view state, headless mode.
// Dependencies: core layer.
// Must NOT depend on: ui, platform specifics.

pub mod headless;
pub mod lookup;
pub mod state;
