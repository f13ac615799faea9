//! Capabilities the controller needs from the host UI environment.

use std::fmt;
use std::rc::Rc;

use futures::future::LocalBoxFuture;

use crate::core::ContainerSpec;

/// Invoked on every container size change.
pub type ResizeCallback = Rc<dyn Fn()>;

/// Host environment a plot component is mounted into.
///
/// The host renders the container element, owns the cooperative event loop
/// that drives engine futures, and delivers container size notifications.
pub trait PlotHost: 'static {
    type Container: Clone + 'static;

    fn render_container(&self, spec: &ContainerSpec) -> Self::Container;

    /// Schedules `task` on the host's single-threaded executor.
    fn spawn_local(&self, task: LocalBoxFuture<'static, ()>);

    /// Starts observing `container`; observation stops when the returned
    /// guard is dropped.
    fn observe_resize(
        &self,
        container: &Self::Container,
        on_resize: ResizeCallback,
    ) -> ResizeObservation;
}

/// Scoped container-size observation. Disconnects on drop.
#[must_use = "dropping the observation disconnects it immediately"]
pub struct ResizeObservation {
    disconnect: Option<Box<dyn FnOnce()>>,
}

impl ResizeObservation {
    pub fn new(disconnect: impl FnOnce() + 'static) -> Self {
        Self {
            disconnect: Some(Box::new(disconnect)),
        }
    }

    pub fn disconnect(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(disconnect) = self.disconnect.take() {
            disconnect();
        }
    }
}

impl Drop for ResizeObservation {
    fn drop(&mut self) {
        self.release();
    }
}

impl fmt::Debug for ResizeObservation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResizeObservation")
            .field("connected", &self.disconnect.is_some())
            .finish()
    }
}
