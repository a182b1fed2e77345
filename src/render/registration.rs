use std::fmt;

use super::MountId;

/// Host-side registration released exactly once, explicitly or on drop.
///
/// Hosts hand these out for anything the chart must give back (mounted
/// wrappers, resize listeners), so a chart dropped without
/// `Chart::destroy` still leaves the host clean.
#[must_use = "dropping a registration releases it immediately"]
pub struct Registration {
    release: Option<Box<dyn FnOnce()>>,
}

impl Registration {
    pub fn new(release: impl FnOnce() + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    /// Registration with nothing to give back.
    pub fn detached() -> Self {
        Self { release: None }
    }

    pub fn release(mut self) {
        self.run();
    }

    fn run(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for Registration {
    fn drop(&mut self) {
        self.run();
    }
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("pending", &self.release.is_some())
            .finish()
    }
}

/// Wrapper element mounted into a host container; unmounted on release.
#[derive(Debug)]
#[must_use = "dropping a mount unmounts the wrapper"]
pub struct Mount {
    id: MountId,
    registration: Registration,
}

impl Mount {
    pub fn new(id: MountId, registration: Registration) -> Self {
        Self { id, registration }
    }

    #[must_use]
    pub fn id(&self) -> MountId {
        self.id
    }

    pub fn unmount(self) {
        self.registration.release();
    }
}
