use std::rc::Rc;

use crate::engine::PlotEngine;
use crate::host::PlotHost;

use super::{PlotController, PlotProps};

/// Plot component type bound to one engine.
///
/// Clones share the engine reference; components built from different
/// engines are fully independent.
pub struct PlotComponent<E: PlotEngine> {
    engine: Rc<E>,
}

impl<E: PlotEngine> Clone for PlotComponent<E> {
    fn clone(&self) -> Self {
        Self {
            engine: Rc::clone(&self.engine),
        }
    }
}

impl<E: PlotEngine> PlotComponent<E> {
    #[must_use]
    pub fn new(engine: E) -> Self {
        Self::from_shared(Rc::new(engine))
    }

    #[must_use]
    pub fn from_shared(engine: Rc<E>) -> Self {
        Self { engine }
    }

    #[must_use]
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Mounts one instance into `host`: renders the container, forwards it to
    /// the ref callback and issues the initial `create`.
    pub fn mount<H>(&self, host: Rc<H>, props: PlotProps<E>) -> PlotController<E, H>
    where
        H: PlotHost<Container = E::Container>,
    {
        PlotController::mount(Rc::clone(&self.engine), host, props)
    }
}

/// Binds `engine` into a new plot component type. Performs no I/O.
#[must_use]
pub fn create_plot_component<E: PlotEngine>(engine: E) -> PlotComponent<E> {
    PlotComponent::new(engine)
}
