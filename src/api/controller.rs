use std::cell::RefCell;
use std::rc::Rc;

use tracing::debug;

use crate::core::{Figure, PlotConfig, PlotData, PlotFrame, PlotLayout, ResizePolicy};
use crate::engine::PlotEngine;
use crate::error::{PlotError, PlotResult};
use crate::events::AttachedEvents;
use crate::host::{PlotHost, ResizeObservation};

use super::{LifecycleState, PlotProps};

/// Per-mount state shared with in-flight engine continuations.
pub(super) struct ControllerInner<E: PlotEngine, H: PlotHost<Container = E::Container>> {
    pub(super) engine: Rc<E>,
    pub(super) host: Rc<H>,
    pub(super) container: E::Container,
    pub(super) props: PlotProps<E>,
    pub(super) state: LifecycleState,
    pub(super) handle: Option<E::Handle>,
    pub(super) attached: AttachedEvents,
    pub(super) resize_observation: Option<ResizeObservation>,
    pub(super) update_generation: u64,
    /// Inputs changed while `create` was still in flight.
    pub(super) changed_while_mounting: bool,
}

pub(super) type SharedInner<E, H> = Rc<RefCell<ControllerInner<E, H>>>;

/// Lifecycle controller of one mounted plot component.
///
/// Created by [`super::PlotComponent::mount`]. Dropping a mounted controller
/// unmounts it.
pub struct PlotController<E: PlotEngine, H: PlotHost<Container = E::Container>> {
    pub(super) inner: SharedInner<E, H>,
}

impl<E: PlotEngine, H: PlotHost<Container = E::Container>> PlotController<E, H> {
    #[must_use]
    pub fn state(&self) -> LifecycleState {
        self.inner.borrow().state
    }

    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.state() == LifecycleState::Initialized
    }

    #[must_use]
    pub fn container(&self) -> E::Container {
        self.inner.borrow().container.clone()
    }

    #[must_use]
    pub fn handle(&self) -> Option<E::Handle> {
        self.inner.borrow().handle.clone()
    }

    /// Fresh snapshot of the live plot, `None` before initialization.
    #[must_use]
    pub fn figure(&self) -> Option<Figure> {
        self.handle().as_ref().map(Figure::extract)
    }

    /// Copy of the current props.
    #[must_use]
    pub fn props(&self) -> PlotProps<E> {
        self.inner.borrow().props.clone()
    }

    #[must_use]
    pub fn is_observing_resize(&self) -> bool {
        self.inner.borrow().resize_observation.is_some()
    }

    pub fn set_data(&self, data: PlotData) -> PlotResult<()> {
        self.change_inputs("set_data", |props| props.data = data)
    }

    pub fn set_layout(&self, layout: PlotLayout) -> PlotResult<()> {
        self.change_inputs("set_layout", |props| props.layout = layout)
    }

    pub fn set_config(&self, config: PlotConfig) -> PlotResult<()> {
        self.change_inputs("set_config", |props| props.config = config)
    }

    pub fn set_frames(&self, frames: Vec<PlotFrame>) -> PlotResult<()> {
        self.change_inputs("set_frames", |props| props.frames = frames)
    }

    /// Switches the resize policy. Re-renders and re-scopes the resize
    /// observer only when the policy actually changes.
    pub fn set_resize_policy(&self, policy: impl Into<ResizePolicy>) -> PlotResult<()> {
        let policy = policy.into();
        let changed = {
            let mut inner = self.inner.borrow_mut();
            ensure_mounted(inner.state, "set_resize_policy")?;
            let changed = inner.props.resize_policy != policy;
            inner.props.resize_policy = policy;
            changed
        };
        if changed {
            self.notify_inputs_changed();
            Self::sync_resize_observation(&self.inner);
        }
        Ok(())
    }

    /// Applies an arbitrary props edit. An update is issued when the derived
    /// render inputs or the resize policy differ afterwards; handlers
    /// attached at mount stay attached.
    pub fn update_props(&self, edit: impl FnOnce(&mut PlotProps<E>)) -> PlotResult<()> {
        let (inputs_changed, policy_changed) = {
            let mut inner = self.inner.borrow_mut();
            ensure_mounted(inner.state, "update_props")?;
            let before_request = inner.props.request();
            let before_policy = inner.props.resize_policy;
            edit(&mut inner.props);
            (
                inner.props.request() != before_request,
                inner.props.resize_policy != before_policy,
            )
        };
        if inputs_changed || policy_changed {
            self.notify_inputs_changed();
        }
        if policy_changed {
            Self::sync_resize_observation(&self.inner);
        }
        Ok(())
    }

    /// Tears the plot down. Idempotent.
    pub fn unmount(&self) {
        Self::teardown(&self.inner);
    }

    fn change_inputs(
        &self,
        operation: &'static str,
        apply: impl FnOnce(&mut PlotProps<E>),
    ) -> PlotResult<()> {
        {
            let mut inner = self.inner.borrow_mut();
            ensure_mounted(inner.state, operation)?;
            apply(&mut inner.props);
        }
        self.notify_inputs_changed();
        Ok(())
    }

    fn notify_inputs_changed(&self) {
        let state = {
            let mut inner = self.inner.borrow_mut();
            if inner.state == LifecycleState::Mounting {
                inner.changed_while_mounting = true;
            }
            inner.state
        };
        debug!(%state, "plot inputs changed");
        Self::run_update_effect(&self.inner);
    }
}

impl<E: PlotEngine, H: PlotHost<Container = E::Container>> Drop for PlotController<E, H> {
    fn drop(&mut self) {
        Self::teardown(&self.inner);
    }
}

fn ensure_mounted(state: LifecycleState, operation: &'static str) -> PlotResult<()> {
    match state {
        LifecycleState::Unmounting | LifecycleState::Unmounted => {
            Err(PlotError::InvalidState { operation, state })
        }
        _ => Ok(()),
    }
}
