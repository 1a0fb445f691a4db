use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::native::{Geometry, NativeOp, PixelFormat, SurfaceControlBackend, SurfaceId};

use super::error::{BridgeError, BridgeResult, SurfaceEvent, Violation};
use super::resource::{ResourceInfo, SurfaceControl};
use super::{BridgeConfig, LostPolicy};

struct Table<C> {
    controls: HashMap<SurfaceId, SurfaceControl<C>>,
    next_generation: u64,
}

/// Keeps exactly one native surface control per live surface.
///
/// The three `on_surface_*` entry points are called by the windowing layer
/// in whatever way its event loop dispatches them. Events for the same
/// surface must not overlap; events for different surfaces may arrive from
/// different threads.
///
/// The table lock is held across each native call. Backends never call back
/// into the bridge, so this cannot deadlock, and it keeps every
/// create/update/destroy ordered with the table mutation it belongs to.
pub struct SurfaceControlBridge<B: SurfaceControlBackend> {
    backend: B,
    config: BridgeConfig,
    table: Mutex<Table<B::Control>>,
}

impl<B: SurfaceControlBackend> SurfaceControlBridge<B> {
    pub fn new(backend: B) -> Self {
        Self::with_config(backend, BridgeConfig::default())
    }

    pub fn with_config(backend: B, config: BridgeConfig) -> Self {
        Self {
            backend,
            config,
            table: Mutex::new(Table {
                controls: HashMap::new(),
                next_generation: 0,
            }),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    /// A new surface became available: create and bind its control.
    pub fn on_surface_available(&self, id: SurfaceId, surface: &B::Surface) -> BridgeResult<()> {
        let mut table = self.lock();

        if table.controls.contains_key(&id) {
            log::warn!("{id}: available while still bound; missing 'lost'?");
            return Err(BridgeError::violation(id, SurfaceEvent::Available, Violation::AlreadyBound));
        }

        let native = self
            .backend
            .create(surface, &self.config.debug_name)
            .map_err(|e| BridgeError::native(id, NativeOp::Create, e))?;

        table.next_generation += 1;
        let mut control = SurfaceControl::new(table.next_generation, native);
        control.bind(id);
        table.controls.insert(id, control);

        log::debug!("{id}: surface control created (generation {})", table.next_generation);
        Ok(())
    }

    /// The surface changed format or size: push the full new geometry.
    pub fn on_surface_resized(
        &self,
        id: SurfaceId,
        format: PixelFormat,
        width: i32,
        height: i32,
    ) -> BridgeResult<()> {
        let mut table = self.lock();

        let Some(control) = table.controls.get_mut(&id).filter(|c| c.is_bound_to(id)) else {
            log::warn!("{id}: resized without a bound surface control");
            return Err(BridgeError::violation(id, SurfaceEvent::Resized, Violation::NotBound));
        };

        if width <= 0 || height <= 0 {
            log::warn!("{id}: resized to empty geometry {width}x{height}");
            return Err(BridgeError::violation(
                id,
                SurfaceEvent::Resized,
                Violation::EmptyGeometry { width, height },
            ));
        }
        let geometry = Geometry::new(format, width as u32, height as u32);

        let Some(native) = control.native_mut() else {
            return Err(BridgeError::violation(id, SurfaceEvent::Resized, Violation::NotBound));
        };
        self.backend
            .update(native, geometry)
            .map_err(|e| BridgeError::native(id, NativeOp::Update, e))?;

        control.commit_geometry(geometry);
        log::debug!("{id}: geometry {:?} {}x{}", geometry.format, geometry.width, geometry.height);
        Ok(())
    }

    /// The surface is gone: destroy its control and free the slot.
    ///
    /// The binding is removed even if the native destroy fails.
    pub fn on_surface_lost(&self, id: SurfaceId) -> BridgeResult<()> {
        let mut table = self.lock();

        let Some(mut control) = table.controls.remove(&id) else {
            return match self.config.lost_policy {
                LostPolicy::Strict => {
                    log::warn!("{id}: lost without a bound surface control");
                    Err(BridgeError::violation(id, SurfaceEvent::Lost, Violation::NotBound))
                }
                LostPolicy::Lenient => {
                    log::debug!("{id}: ignoring repeated 'lost'");
                    Ok(())
                }
            };
        };

        if let Some(native) = control.take_for_destroy() {
            self.backend
                .destroy(native)
                .map_err(|e| BridgeError::native(id, NativeOp::Destroy, e))?;
        }

        log::debug!("{id}: surface control destroyed");
        Ok(())
    }

    /// Snapshot of the control bound to `id`.
    pub fn resource(&self, id: SurfaceId) -> Option<ResourceInfo> {
        self.lock().controls.get(&id).map(|c| c.info(id))
    }

    pub fn is_bound(&self, id: SurfaceId) -> bool {
        self.lock().controls.contains_key(&id)
    }

    pub fn bound_surfaces(&self) -> Vec<SurfaceId> {
        let mut ids: Vec<_> = self.lock().controls.keys().copied().collect();
        ids.sort();
        ids
    }

    pub fn len(&self) -> usize {
        self.lock().controls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Destroys every remaining control. Returns how many were torn down.
    ///
    /// Native failures are logged; every binding is removed regardless.
    pub fn shutdown(&self) -> usize {
        let mut table = self.lock();
        let count = table.controls.len();

        for (id, mut control) in table.controls.drain() {
            let Some(native) = control.take_for_destroy() else {
                continue;
            };
            if let Err(e) = self.backend.destroy(native) {
                log::error!("{id}: native destroy failed during shutdown: {e:#}");
            }
        }

        if count > 0 {
            log::debug!("bridge shutdown released {count} surface control(s)");
        }
        count
    }

    fn lock(&self) -> MutexGuard<'_, Table<B::Control>> {
        // Each mutation is a single insert/remove, so a poisoned table is still consistent.
        self.table.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<B: SurfaceControlBackend> Drop for SurfaceControlBridge<B> {
    fn drop(&mut self) {
        if !self.is_empty() {
            log::warn!("bridge dropped with live surface controls; releasing them");
            self.shutdown();
        }
    }
}
