// SkuFinder - app/mod.rs
//
// Application layer: session orchestration and presentation state.
// Dependencies: core layer, platform::fs.
// Must NOT depend on: ui.

pub mod session;
pub mod state;
