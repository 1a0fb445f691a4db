use std::sync::OnceLock;

use anyhow::Result;

/// Initialization parameters for the native surface-control layer.
///
/// Applied once per process by [`init_native`].
#[derive(Debug, Clone)]
pub struct NativeInit {
    /// Backends the wgpu instance may use.
    pub backends: wgpu::Backends,

    /// Prefer an sRGB surface format when the requested pixel format allows it.
    pub prefer_srgb: bool,

    /// Present mode. Falls back to FIFO if the surface does not support it.
    pub present_mode: wgpu::PresentMode,

    /// Optional alpha mode preference for the surface.
    ///
    /// If provided but unsupported on the current surface, a supported mode is selected.
    pub alpha_mode: Option<wgpu::CompositeAlphaMode>,

    pub required_features: wgpu::Features,
    pub required_limits: wgpu::Limits,

    /// Desired maximum frame latency for every configured surface.
    pub desired_maximum_frame_latency: u32,

    /// Color of the frame presented after geometry updates (see `clear_policy`).
    ///
    /// `None` configures the surface without presenting anything.
    pub clear_color: Option<wgpu::Color>,

    /// Which updates present the clear frame.
    pub clear_policy: ClearPolicy,
}

/// When a surface control presents its clear frame.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum ClearPolicy {
    /// After every geometry update, so a rotated surface never shows a stale size.
    #[default]
    EveryUpdate,
    /// Only until the first frame made it to the screen.
    FirstUpdate,
}

impl ClearPolicy {
    pub fn should_present(self, presented_before: bool) -> bool {
        match self {
            ClearPolicy::EveryUpdate => true,
            ClearPolicy::FirstUpdate => !presented_before,
        }
    }
}

impl Default for NativeInit {
    fn default() -> Self {
        Self {
            backends: wgpu::Backends::all(),
            prefer_srgb: true,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: None,
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::default(),
            desired_maximum_frame_latency: 2,
            clear_color: Some(wgpu::Color {
                r: 0.1,
                g: 0.2,
                b: 0.3,
                a: 1.0,
            }),
            clear_policy: ClearPolicy::EveryUpdate,
        }
    }
}

/// Process-wide native state shared by every surface-control backend.
pub struct NativeContext {
    pub(crate) instance: wgpu::Instance,
    pub(crate) init: NativeInit,
}

impl NativeContext {
    pub fn init(&self) -> &NativeInit {
        &self.init
    }
}

static NATIVE: OnceLock<NativeContext> = OnceLock::new();

/// Initializes the native layer for this process.
///
/// Must run before any `GpuSurfaceControl` is built; the backend constructor
/// takes the returned context, so the ordering is enforced by type. Later
/// calls return the existing context and ignore `init`.
///
/// Teardown: the context lives until process exit. Bridges built on it must
/// be shut down (or dropped) before the windows they reference go away.
pub fn init_native(init: NativeInit) -> Result<&'static NativeContext> {
    if let Some(ctx) = NATIVE.get() {
        log::debug!("native layer already initialized; ignoring new configuration");
        return Ok(ctx);
    }

    anyhow::ensure!(!init.backends.is_empty(), "no wgpu backends enabled");
    anyhow::ensure!(
        init.desired_maximum_frame_latency > 0,
        "desired_maximum_frame_latency must be at least 1"
    );

    let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
        backends: init.backends,
        ..Default::default()
    });

    let ctx = NATIVE.get_or_init(|| NativeContext { instance, init });
    log::info!("native surface-control layer initialized ({:?})", ctx.init.backends);
    Ok(ctx)
}
