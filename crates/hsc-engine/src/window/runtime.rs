use anyhow::{Context, Result};
use std::sync::Arc;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::bridge::{BridgeConfig, BridgeError, BridgeResult, SurfaceControlBridge};
use crate::device::{init_native, GpuSurfaceControl, NativeInit};
use crate::native::{PixelFormat, SurfaceId};

use super::tracker::SurfaceTracker;

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,

    /// Pixel format reported with every resize. winit has no notion of a
    /// surface format, so the host supplies one.
    pub format: PixelFormat,

    pub bridge: BridgeConfig,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "HelloSurfaceControl".to_string(),
            initial_size: LogicalSize::new(720.0, 1280.0),
            format: PixelFormat::RGBA_8888,
            bridge: BridgeConfig::default(),
        }
    }
}

type Tracker = SurfaceTracker<GpuSurfaceControl<Window>>;

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Initializes the native layer, opens one window and forwards its
    /// surface lifecycle to a bridge until the last window closes.
    pub fn run(config: RuntimeConfig, native_init: NativeInit) -> Result<()> {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;

        let native = init_native(native_init).context("failed to initialize native layer")?;
        let bridge = SurfaceControlBridge::with_config(
            GpuSurfaceControl::new(native),
            config.bridge.clone(),
        );
        let tracker = SurfaceTracker::new(bridge, config.format);

        let mut host = SurfaceHost::new(config, tracker);

        event_loop
            .run_app(&mut host)
            .context("winit event loop terminated with error")?;

        report_all(host.surfaces.teardown());
        Ok(())
    }
}

/// Windowing layer: turns winit lifecycle callbacks into bridge events.
struct SurfaceHost {
    config: RuntimeConfig,
    surfaces: Tracker,
    exit_requested: bool,
}

impl SurfaceHost {
    fn new(config: RuntimeConfig, surfaces: Tracker) -> Self {
        Self {
            config,
            surfaces,
            exit_requested: false,
        }
    }

    fn request_exit(&mut self) {
        self.exit_requested = true;
    }

    fn create_window(&mut self, event_loop: &ActiveEventLoop) -> Result<SurfaceId> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let id = SurfaceId::from(window.id());
        self.surfaces.insert(id, Arc::new(window));
        Ok(id)
    }
}

impl ApplicationHandler for SurfaceHost {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.surfaces.is_empty() {
            if let Err(e) = self.create_window(event_loop) {
                log::error!("failed to create initial window: {e:#}");
                self.request_exit();
                event_loop.exit();
                return;
            }
        }

        report_all(self.surfaces.resume(|window| window.inner_size()));
    }

    fn suspended(&mut self, _event_loop: &ActiveEventLoop) {
        // Mobile platforms destroy native windows while suspended.
        report_all(self.surfaces.suspend());
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        event_loop.set_control_flow(ControlFlow::Wait);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        let id = SurfaceId::from(window_id);

        match event {
            WindowEvent::Resized(new_size) => report(self.surfaces.resize(id, new_size)),

            WindowEvent::ScaleFactorChanged { .. } => {
                if let Some(new_size) = self.surfaces.surface(id).map(|w| w.inner_size()) {
                    report(self.surfaces.resize(id, new_size));
                }
            }

            WindowEvent::CloseRequested | WindowEvent::Destroyed => {
                report(self.surfaces.remove(id));
                if self.surfaces.is_empty() {
                    self.request_exit();
                }
            }

            _ => {}
        }

        if self.exit_requested {
            event_loop.exit();
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        report_all(self.surfaces.teardown());
    }
}

fn report(result: BridgeResult<()>) {
    if let Err(e) = result {
        log::error!("{:#}", anyhow::Error::new(e));
    }
}

fn report_all(errors: Vec<BridgeError>) {
    for e in errors {
        report(Err(e));
    }
}
