//! wgpu-backed native surface control.
//!
//! This module is responsible for:
//! - one-time, process-wide initialization of the native layer (`init_native`)
//! - creating a wgpu surface per window and acquiring the adapter/device
//! - configuring the swapchain on every geometry update
//! - releasing the surface on destroy

mod control;
mod error;
mod init;
mod surface;

pub use control::{GpuControl, GpuSurfaceControl};
pub use error::SurfaceErrorAction;
pub use init::{init_native, ClearPolicy, NativeContext, NativeInit};
