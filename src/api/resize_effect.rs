use std::rc::Rc;

use tracing::trace;

use crate::engine::PlotEngine;
use crate::host::{PlotHost, ResizeCallback};

use super::controller::SharedInner;
use super::{LifecycleState, PlotController};

impl<E: PlotEngine, H: PlotHost<Container = E::Container>> PlotController<E, H> {
    /// Drops the current observation and re-acquires one when the plot is
    /// initialized with resizing enabled.
    pub(super) fn sync_resize_observation(inner: &SharedInner<E, H>) {
        let previous = inner.borrow_mut().resize_observation.take();
        if previous.is_some() {
            trace!("disconnecting container resize observer");
        }
        drop(previous);

        let (host, container) = {
            let guard = inner.borrow();
            if guard.state != LifecycleState::Initialized
                || !guard.props.resize_policy.is_enabled()
            {
                return;
            }
            (guard.host.clone(), guard.container.clone())
        };

        let weak = Rc::downgrade(inner);
        let on_resize: ResizeCallback = Rc::new(move || {
            if let Some(inner) = weak.upgrade() {
                Self::handle_container_resize(&inner);
            }
        });
        trace!("observing container resize");
        let observation = host.observe_resize(&container, on_resize);
        inner.borrow_mut().resize_observation = Some(observation);
    }

    fn handle_container_resize(inner: &SharedInner<E, H>) {
        let (engine, handle, on_resize) = {
            let guard = inner.borrow();
            let Some(handle) = guard.handle.clone() else {
                return;
            };
            if guard.state != LifecycleState::Initialized {
                return;
            }
            (guard.engine.clone(), handle, guard.props.on_resize.clone())
        };
        trace!("container resized");
        engine.resize(&handle);
        if let Some(on_resize) = on_resize {
            on_resize();
        }
    }
}
