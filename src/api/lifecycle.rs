use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::Figure;
use crate::engine::PlotEngine;
use crate::error::PlotResult;
use crate::events::{AttachedEvents, attach_events, detach_events};
use crate::host::PlotHost;

use super::controller::{ControllerInner, SharedInner};
use super::{PlotController, PlotProps};

/// Lifecycle of one mounted plot.
///
/// `Mounting -> Initialized | Failed` once per mount, then
/// `Initialized -> Unmounting -> Unmounted` on unmount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LifecycleState {
    Unmounted,
    Mounting,
    Initialized,
    Failed,
    Unmounting,
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Unmounted => "unmounted",
            Self::Mounting => "mounting",
            Self::Initialized => "initialized",
            Self::Failed => "failed",
            Self::Unmounting => "unmounting",
        };
        f.write_str(name)
    }
}

impl<E: PlotEngine, H: PlotHost<Container = E::Container>> PlotController<E, H> {
    /// Renders the container and issues the initial `create`.
    pub(super) fn mount(engine: Rc<E>, host: Rc<H>, props: PlotProps<E>) -> Self {
        let container = host.render_container(&props.container);
        if let Some(container_ref) = props.container_ref.clone() {
            container_ref(&container);
        }
        debug!(id = %props.container.id, traces = props.data.len(), "mounting plot");

        let controller = Self {
            inner: Rc::new(RefCell::new(ControllerInner {
                engine,
                host,
                container,
                props,
                state: LifecycleState::Mounting,
                handle: None,
                attached: AttachedEvents::new(),
                resize_observation: None,
                update_generation: 0,
                changed_while_mounting: false,
            })),
        };
        controller.spawn_create();
        controller
    }

    fn spawn_create(&self) {
        let (engine, host, container, request) = {
            let inner = self.inner.borrow();
            (
                inner.engine.clone(),
                inner.host.clone(),
                inner.container.clone(),
                inner.props.request(),
            )
        };
        let pending = engine.create(&container, &request);
        let weak = Rc::downgrade(&self.inner);
        host.spawn_local(Box::pin(async move {
            let result = pending.await;
            match weak.upgrade() {
                Some(inner) => Self::finish_create(&inner, result),
                None => {
                    warn!("plot create settled after its controller was dropped");
                    discard_late_create(engine.as_ref(), result);
                }
            }
        }));
    }

    fn finish_create(inner: &SharedInner<E, H>, result: PlotResult<E::Handle>) {
        let state = inner.borrow().state;
        if state != LifecycleState::Mounting {
            warn!(%state, "discarding plot create result; component no longer mounting");
            let engine = inner.borrow().engine.clone();
            discard_late_create(engine.as_ref(), result);
            return;
        }

        let handle = match result {
            Ok(handle) => handle,
            Err(err) => {
                warn!(error = %err, "plot creation failed");
                let on_error = {
                    let mut guard = inner.borrow_mut();
                    guard.state = LifecycleState::Failed;
                    guard.props.on_error.clone()
                };
                if let Some(on_error) = on_error {
                    on_error(&err);
                }
                return;
            }
        };

        let (engine, handlers) = {
            let guard = inner.borrow();
            (guard.engine.clone(), guard.props.handlers.clone())
        };
        engine.resize(&handle);
        let attached = attach_events(&handle, &handlers);

        let (on_initialized, catch_up) = {
            let mut guard = inner.borrow_mut();
            guard.handle = Some(handle.clone());
            guard.attached = attached;
            guard.state = LifecycleState::Initialized;
            let catch_up = std::mem::take(&mut guard.changed_while_mounting);
            (guard.props.on_initialized.clone(), catch_up)
        };
        debug!(events = handlers.len(), "plot initialized");

        if let Some(on_initialized) = on_initialized {
            on_initialized(&Figure::extract(&handle), &handle);
        }
        Self::sync_resize_observation(inner);
        if catch_up {
            debug!("re-rendering inputs changed during create");
            Self::run_update_effect(inner);
        }
    }

    /// Releases everything acquired since mount.
    pub(super) fn teardown(inner: &SharedInner<E, H>) {
        let state = inner.borrow().state;
        match state {
            LifecycleState::Unmounted | LifecycleState::Unmounting => return,
            LifecycleState::Mounting | LifecycleState::Failed => {
                debug!(%state, "unmounting plot without a live handle");
                inner.borrow_mut().state = LifecycleState::Unmounted;
                return;
            }
            LifecycleState::Initialized => {}
        }

        let (engine, handle, attached, observation, on_purge) = {
            let mut guard = inner.borrow_mut();
            guard.state = LifecycleState::Unmounting;
            (
                guard.engine.clone(),
                guard.handle.take(),
                std::mem::take(&mut guard.attached),
                guard.resize_observation.take(),
                guard.props.on_purge.clone(),
            )
        };
        drop(observation);

        if let Some(handle) = handle {
            detach_events(&handle, &attached);
            let figure = Figure::extract(&handle);
            engine.destroy(&handle);
            debug!(events = attached.len(), "plot destroyed");
            if let Some(on_purge) = on_purge {
                on_purge(&figure, &handle);
            }
        }

        inner.borrow_mut().state = LifecycleState::Unmounted;
    }
}

/// Destroys a plot whose `create` settled after its controller went away.
/// No events are attached and no callback fires.
fn discard_late_create<E: PlotEngine>(engine: &E, result: PlotResult<E::Handle>) {
    if let Ok(handle) = result {
        engine.destroy(&handle);
        debug!("destroyed plot created after unmount");
    }
}
