use crate::native::{Geometry, SurfaceId};

/// Lifecycle state of one surface control.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ResourceState {
    Uninitialized,
    Bound,
    /// Terminal. A destroyed control is never rebound.
    Destroyed,
}

/// Read-only view of a bound surface control.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct ResourceInfo {
    pub surface: SurfaceId,
    pub state: ResourceState,
    /// Last successfully applied geometry; `None` before the first resize.
    pub geometry: Option<Geometry>,
    /// Creation serial, unique per bridge.
    pub generation: u64,
}

/// A native control plus the bookkeeping the bridge keeps about it.
pub(crate) struct SurfaceControl<C> {
    bound_surface: Option<SurfaceId>,
    geometry: Option<Geometry>,
    state: ResourceState,
    generation: u64,
    native: Option<C>,
}

impl<C> SurfaceControl<C> {
    pub(crate) fn new(generation: u64, native: C) -> Self {
        Self {
            bound_surface: None,
            geometry: None,
            state: ResourceState::Uninitialized,
            generation,
            native: Some(native),
        }
    }

    pub(crate) fn bind(&mut self, surface: SurfaceId) {
        debug_assert_eq!(self.state, ResourceState::Uninitialized);
        self.bound_surface = Some(surface);
        self.state = ResourceState::Bound;
    }

    pub(crate) fn is_bound_to(&self, surface: SurfaceId) -> bool {
        self.state == ResourceState::Bound && self.bound_surface == Some(surface)
    }

    pub(crate) fn native_mut(&mut self) -> Option<&mut C> {
        self.native.as_mut()
    }

    /// Records a geometry the native layer has accepted.
    pub(crate) fn commit_geometry(&mut self, geometry: Geometry) {
        self.geometry = Some(geometry);
    }

    /// Moves to `Destroyed` and hands back the native control for release.
    pub(crate) fn take_for_destroy(&mut self) -> Option<C> {
        debug_assert_eq!(self.state, ResourceState::Bound);
        self.state = ResourceState::Destroyed;
        self.bound_surface = None;
        self.native.take()
    }

    pub(crate) fn info(&self, surface: SurfaceId) -> ResourceInfo {
        ResourceInfo {
            surface,
            state: self.state,
            geometry: self.geometry,
            generation: self.generation,
        }
    }
}
