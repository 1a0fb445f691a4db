//! Surface-control lifecycle bridge.
//!
//! Receives the windowing layer's available / resized / lost events and
//! creates, reconfigures and destroys native surface controls in lock-step:
//! - at most one control per live surface
//! - resize and lost only act on a bound control
//! - a destroyed control is never reused; "available" again creates a new one

mod config;
mod error;
mod resource;
mod surface_bridge;

pub use config::{BridgeConfig, LostPolicy};
pub use error::{BridgeError, BridgeResult, SurfaceEvent, Violation};
pub use resource::{ResourceInfo, ResourceState};
pub use surface_bridge::SurfaceControlBridge;
