//! Release acquired resources in reverse order.

/// A stack of release actions. Each resource registers its release as soon
/// as it is acquired and releases run last-acquired-first.
#[derive(Default)]
pub struct TeardownStack {
    releases: Vec<(&'static str, Box<dyn FnOnce()>)>,
}

impl TeardownStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the release action for a resource which was just acquired.
    pub fn push(&mut self, name: &'static str, release: impl FnOnce() + 'static) {
        log::trace!("Acquired {}", name);
        self.releases.push((name, Box::new(release)));
    }

    pub fn len(&self) -> usize {
        self.releases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.releases.is_empty()
    }

    /// Run every pending release, most recent first. Calling this again does
    /// nothing.
    pub fn release_all(&mut self) {
        while let Some((name, release)) = self.releases.pop() {
            log::debug!("Releasing {}", name);
            release();
        }
    }
}

impl Drop for TeardownStack {
    fn drop(&mut self) {
        self.release_all();
    }
}

/// Session teardown: the diagnostics hook is detached before any other
/// resource is released, then everything else unwinds in reverse order.
#[derive(Default)]
pub struct Teardown {
    pub diagnostics: TeardownStack,
    pub resources: TeardownStack,
}

impl Teardown {
    pub fn release_all(&mut self) {
        self.diagnostics.release_all();
        self.resources.release_all();
    }
}

impl Drop for Teardown {
    fn drop(&mut self) {
        self.release_all();
    }
}
