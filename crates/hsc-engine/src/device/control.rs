use std::marker::PhantomData;
use std::sync::{Arc, Mutex, PoisonError};

use anyhow::{Context, Result};
use raw_window_handle::{HasDisplayHandle, HasWindowHandle};

use crate::native::{Geometry, SurfaceControlBackend};

use super::surface;
use super::{NativeContext, SurfaceErrorAction};

/// Adapter, device and queue shared by every surface of one backend.
struct GpuDevice {
    adapter: wgpu::Adapter,
    device: wgpu::Device,
    queue: wgpu::Queue,
}

impl GpuDevice {
    /// Blocks until every submission made so far has finished.
    fn wait_idle(&self) -> Result<()> {
        self.device
            .poll(wgpu::PollType::wait_indefinitely())
            .context("device did not go idle")?;
        Ok(())
    }
}

/// Native surface control for one window.
pub struct GpuControl {
    surface: wgpu::Surface<'static>,
    gpu: Arc<GpuDevice>,
    config: Option<wgpu::SurfaceConfiguration>,
    presented: bool,
    label: String,
}

impl GpuControl {
    /// Active swapchain configuration, once the first geometry was applied.
    pub fn config(&self) -> Option<&wgpu::SurfaceConfiguration> {
        self.config.as_ref()
    }
}

/// wgpu implementation of the surface-control capability set.
///
/// `W` is the window type the windowing layer hands over with "available".
/// The adapter and device are acquired on the first create, against that
/// first surface, and reused afterwards.
pub struct GpuSurfaceControl<W> {
    native: &'static NativeContext,
    gpu: Mutex<Option<Arc<GpuDevice>>>,
    _window: PhantomData<fn() -> W>,
}

impl<W> GpuSurfaceControl<W> {
    pub fn new(native: &'static NativeContext) -> Self {
        Self {
            native,
            gpu: Mutex::new(None),
            _window: PhantomData,
        }
    }

    fn gpu_for(&self, surface: &wgpu::Surface<'_>, label: &str) -> Result<Arc<GpuDevice>> {
        let mut slot = self.gpu.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(gpu) = slot.as_ref() {
            anyhow::ensure!(
                gpu.adapter.is_surface_supported(surface),
                "adapter cannot present to this surface"
            );
            return Ok(Arc::clone(gpu));
        }

        let init = &self.native.init;

        let adapter = pollster::block_on(self.native.instance.request_adapter(
            &wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(surface),
                force_fallback_adapter: false,
            },
        ))
        .context("failed to find a suitable GPU adapter")?;

        let (device, queue) = pollster::block_on(adapter.request_device(&wgpu::DeviceDescriptor {
            label: Some(label),
            required_features: init.required_features,
            required_limits: init.required_limits.clone(),
            experimental_features: wgpu::ExperimentalFeatures::disabled(),
            memory_hints: wgpu::MemoryHints::Performance,
            trace: wgpu::Trace::Off,
        }))
        .context("failed to create wgpu device/queue")?;

        log::info!("using adapter {:?}", adapter.get_info().name);

        let gpu = Arc::new(GpuDevice { adapter, device, queue });
        *slot = Some(Arc::clone(&gpu));
        Ok(gpu)
    }

    /// Presents one cleared frame. `Ok(false)` when the frame was skipped.
    fn present_clear(&self, control: &GpuControl, clear: wgpu::Color) -> Result<bool> {
        let Some(config) = control.config.as_ref() else {
            return Ok(false);
        };
        let gpu = &control.gpu;

        let frame = match control.surface.get_current_texture() {
            Ok(frame) => frame,
            Err(err) => {
                let action = surface::map_surface_error(&control.surface, &gpu.device, config, err);
                anyhow::ensure!(action != SurfaceErrorAction::Fatal, "surface ran out of memory");
                log::debug!("{}: skipped clear frame ({action:?})", control.label);
                return Ok(false);
            }
        };

        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("surface control clear"),
            });

        {
            let _rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("surface control clear"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view:           &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load:  wgpu::LoadOp::Clear(clear),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes:         None,
                occlusion_query_set:      None,
                multiview_mask:           None,
            });
        }

        gpu.queue.submit(std::iter::once(encoder.finish()));
        frame.present();
        Ok(true)
    }
}

/// Folds the clear-frame outcome into `presented`.
///
/// Runs after the swapchain was configured, so the new geometry is already
/// live: a failed present is logged and never turns the update into an error.
fn record_clear(label: &str, presented: &mut bool, result: Result<bool>) {
    match result {
        Ok(shown) => *presented |= shown,
        Err(e) => log::warn!("{label}: clear frame not presented: {e:#}"),
    }
}

impl<W> SurfaceControlBackend for GpuSurfaceControl<W>
where
    W: HasWindowHandle + HasDisplayHandle + Send + Sync + 'static,
{
    type Surface = Arc<W>;
    type Control = GpuControl;

    fn create(&self, window: &Arc<W>, debug_name: &str) -> Result<GpuControl> {
        let surface = self
            .native
            .instance
            .create_surface(Arc::clone(window))
            .context("failed to create wgpu surface")?;

        let gpu = self.gpu_for(&surface, debug_name)?;

        Ok(GpuControl {
            surface,
            gpu,
            config: None,
            presented: false,
            label: debug_name.to_string(),
        })
    }

    fn update(&self, control: &mut GpuControl, geometry: Geometry) -> Result<()> {
        let init = &self.native.init;
        let gpu = Arc::clone(&control.gpu);

        let max = gpu.device.limits().max_texture_dimension_2d;
        anyhow::ensure!(
            geometry.width <= max && geometry.height <= max,
            "{}x{} exceeds the device limit of {max}",
            geometry.width,
            geometry.height
        );

        let caps = control.surface.get_capabilities(&gpu.adapter);
        let format = surface::choose_surface_format(&caps, geometry.format, init.prefer_srgb)
            .context("no supported surface formats")?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: geometry.width,
            height: geometry.height,
            present_mode: surface::choose_present_mode(&caps, init.present_mode),
            alpha_mode: surface::choose_alpha_mode(&caps, init.alpha_mode),
            view_formats: vec![],
            desired_maximum_frame_latency: init.desired_maximum_frame_latency,
        };

        control.surface.configure(&gpu.device, &config);
        log::debug!(
            "{}: configured {:?} ({:?}) {}x{}",
            control.label,
            format,
            geometry.format,
            geometry.width,
            geometry.height
        );
        control.config = Some(config);

        let clear = init
            .clear_color
            .filter(|_| init.clear_policy.should_present(control.presented));
        if let Some(clear) = clear {
            let result = self.present_clear(control, clear);
            record_clear(&control.label, &mut control.presented, result);
        }
        Ok(())
    }

    fn destroy(&self, control: GpuControl) -> Result<()> {
        log::debug!("{}: releasing surface", control.label);

        // In-flight frames may still reference the swapchain.
        let idle = control.gpu.wait_idle();
        drop(control);
        idle
    }
}
