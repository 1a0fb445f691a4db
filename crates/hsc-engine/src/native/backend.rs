use std::fmt;

use anyhow::Result;

use super::Geometry;

/// The native surface-control capability set.
///
/// Implementations wrap whatever foreign interface actually drives the
/// compositor. Calls are synchronous and may block; the bridge neither times
/// them out nor retries them.
///
/// Implementations must not call back into the bridge that owns them.
pub trait SurfaceControlBackend: Send + Sync {
    /// Surface object handed over by the windowing layer with the
    /// "available" event (for example a window handle).
    type Surface: ?Sized;

    /// Native control owned by the bridge between create and destroy.
    type Control: Send;

    /// Acquires one native surface control bound to `surface`.
    fn create(&self, surface: &Self::Surface, debug_name: &str) -> Result<Self::Control>;

    /// Applies the complete new geometry to `control`.
    ///
    /// On error the bridge keeps its previously recorded geometry.
    fn update(&self, control: &mut Self::Control, geometry: Geometry) -> Result<()>;

    /// Releases `control`. Ownership is consumed even when this fails.
    fn destroy(&self, control: Self::Control) -> Result<()>;
}

/// Which native call an error came from.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum NativeOp {
    Create,
    Update,
    Destroy,
}

impl fmt::Display for NativeOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            NativeOp::Create => "create",
            NativeOp::Update => "update",
            NativeOp::Destroy => "destroy",
        })
    }
}
