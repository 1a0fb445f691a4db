use std::collections::HashMap;

use winit::dpi::PhysicalSize;

use crate::bridge::{BridgeError, BridgeResult, SurfaceControlBridge};
use crate::native::{PixelFormat, SurfaceControlBackend, SurfaceId};

struct Tracked<S> {
    surface: S,
    /// "available" delivered and not yet matched by "lost".
    announced: bool,
}

/// Host-side record of which surfaces the bridge has been told about.
///
/// Keeps the event stream well formed no matter how the platform reorders
/// its callbacks: "lost" only for announced surfaces, no resize outside an
/// announcement, no empty geometry.
pub(crate) struct SurfaceTracker<B>
where
    B: SurfaceControlBackend,
    B::Surface: Sized,
{
    // Declared before `surfaces`: controls are released before their surfaces drop.
    bridge: SurfaceControlBridge<B>,
    surfaces: HashMap<SurfaceId, Tracked<B::Surface>>,
    format: PixelFormat,
}

impl<B> SurfaceTracker<B>
where
    B: SurfaceControlBackend,
    B::Surface: Sized,
{
    pub(crate) fn new(bridge: SurfaceControlBridge<B>, format: PixelFormat) -> Self {
        Self {
            bridge,
            surfaces: HashMap::new(),
            format,
        }
    }

    pub(crate) fn bridge(&self) -> &SurfaceControlBridge<B> {
        &self.bridge
    }

    pub(crate) fn insert(&mut self, id: SurfaceId, surface: B::Surface) {
        self.surfaces.insert(id, Tracked { surface, announced: false });
    }

    pub(crate) fn surface(&self, id: SurfaceId) -> Option<&B::Surface> {
        self.surfaces.get(&id).map(|t| &t.surface)
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.surfaces.is_empty()
    }

    pub(crate) fn is_announced(&self, id: SurfaceId) -> bool {
        self.surfaces.get(&id).is_some_and(|t| t.announced)
    }

    fn ids(&self) -> Vec<SurfaceId> {
        self.surfaces.keys().copied().collect()
    }

    /// Delivers "available" followed by the initial "resized".
    pub(crate) fn announce(&mut self, id: SurfaceId, size: PhysicalSize<u32>) -> BridgeResult<()> {
        let Some(tracked) = self.surfaces.get_mut(&id) else {
            return Ok(());
        };
        if tracked.announced {
            return Ok(());
        }

        self.bridge.on_surface_available(id, &tracked.surface)?;
        tracked.announced = true;

        self.resize(id, size)
    }

    pub(crate) fn resize(&self, id: SurfaceId, size: PhysicalSize<u32>) -> BridgeResult<()> {
        if !self.is_announced(id) {
            return Ok(());
        }

        // Minimized windows report 0x0; there is nothing to configure.
        if size.width == 0 || size.height == 0 {
            log::debug!("{id}: ignoring empty size");
            return Ok(());
        }

        self.bridge.on_surface_resized(
            id,
            self.format,
            i32::try_from(size.width).unwrap_or(i32::MAX),
            i32::try_from(size.height).unwrap_or(i32::MAX),
        )
    }

    /// Delivers "lost" if the surface was announced.
    pub(crate) fn retract(&mut self, id: SurfaceId) -> BridgeResult<()> {
        match self.surfaces.get_mut(&id) {
            Some(tracked) if tracked.announced => {
                tracked.announced = false;
                self.bridge.on_surface_lost(id)
            }
            _ => Ok(()),
        }
    }

    /// Retracts and forgets the surface. It is forgotten even if "lost" fails.
    pub(crate) fn remove(&mut self, id: SurfaceId) -> BridgeResult<()> {
        let result = self.retract(id);
        self.surfaces.remove(&id);
        result
    }

    /// Announces every surface that is not currently announced.
    pub(crate) fn resume(
        &mut self,
        size_of: impl Fn(&B::Surface) -> PhysicalSize<u32>,
    ) -> Vec<BridgeError> {
        let mut errors = Vec::new();
        for id in self.ids() {
            let Some(size) = self.surface(id).map(&size_of) else {
                continue;
            };
            if let Err(e) = self.announce(id, size) {
                errors.push(e);
            }
        }
        errors
    }

    /// Retracts every announced surface; the surfaces stay tracked.
    pub(crate) fn suspend(&mut self) -> Vec<BridgeError> {
        self.ids()
            .into_iter()
            .filter_map(|id| self.retract(id).err())
            .collect()
    }

    /// Retracts everything, releases whatever the bridge still holds and
    /// forgets all surfaces.
    pub(crate) fn teardown(&mut self) -> Vec<BridgeError> {
        let errors = self.suspend();
        self.bridge.shutdown();
        self.surfaces.clear();
        errors
    }
}
