//! Native surface-control contract.
//!
//! This module defines what the bridge expects from the layer that actually
//! talks to the compositor:
//! - an opaque surface identity (`SurfaceId`)
//! - the geometry triple pushed on every resize (`Geometry`, `PixelFormat`)
//! - the `{create, update, destroy}` capability set (`SurfaceControlBackend`)
//!
//! It does not depend on any concrete backend. The wgpu implementation lives
//! in `crate::device`.

mod backend;
mod types;

#[cfg(test)]
pub(crate) mod mock;

pub use backend::{NativeOp, SurfaceControlBackend};
pub use types::{Geometry, PixelFormat, SurfaceId};
