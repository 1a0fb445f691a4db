//! Window + runtime loop.
//!
//! Owns the `winit` EventLoop and windows, and acts as the windowing layer
//! for the surface-control bridge.

mod runtime;
mod tracker;

pub use runtime::{Runtime, RuntimeConfig};
