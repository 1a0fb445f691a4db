//! Recording backend for unit tests.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use super::{Geometry, SurfaceControlBackend};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Call {
    Create { surface: u64, control: u32 },
    Update { control: u32, geometry: Geometry },
    Destroy { control: u32 },
}

#[derive(Debug)]
pub(crate) struct MockControl(pub(crate) u32);

/// Records every native call; each capability can be told to fail.
#[derive(Default)]
pub(crate) struct MockBackend {
    pub(crate) calls: Arc<Mutex<Vec<Call>>>,
    pub(crate) debug_names: Mutex<Vec<String>>,
    next: AtomicU32,
    pub(crate) fail_create: AtomicBool,
    pub(crate) fail_update: AtomicBool,
    pub(crate) fail_destroy: AtomicBool,
}

impl MockBackend {
    pub(crate) fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| pred(c)).count()
    }

    pub(crate) fn creates(&self) -> usize {
        self.count(|c| matches!(c, Call::Create { .. }))
    }

    pub(crate) fn updates(&self) -> usize {
        self.count(|c| matches!(c, Call::Update { .. }))
    }

    pub(crate) fn destroys(&self) -> usize {
        self.count(|c| matches!(c, Call::Destroy { .. }))
    }
}

impl SurfaceControlBackend for MockBackend {
    type Surface = u64;
    type Control = MockControl;

    fn create(&self, surface: &u64, debug_name: &str) -> anyhow::Result<MockControl> {
        anyhow::ensure!(!self.fail_create.load(Ordering::SeqCst), "out of surface controls");
        let control = self.next.fetch_add(1, Ordering::SeqCst);
        self.debug_names.lock().unwrap().push(debug_name.to_string());
        self.calls.lock().unwrap().push(Call::Create { surface: *surface, control });
        Ok(MockControl(control))
    }

    fn update(&self, control: &mut MockControl, geometry: Geometry) -> anyhow::Result<()> {
        anyhow::ensure!(!self.fail_update.load(Ordering::SeqCst), "transaction rejected");
        self.calls.lock().unwrap().push(Call::Update { control: control.0, geometry });
        Ok(())
    }

    fn destroy(&self, control: MockControl) -> anyhow::Result<()> {
        self.calls.lock().unwrap().push(Call::Destroy { control: control.0 });
        anyhow::ensure!(!self.fail_destroy.load(Ordering::SeqCst), "release failed");
        Ok(())
    }
}
