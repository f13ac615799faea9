use std::cell::{Cell, RefCell};
use std::rc::Rc;

use futures::executor::{LocalPool, LocalSpawner};
use futures::future::LocalBoxFuture;
use futures::task::LocalSpawnExt;
use tracing::warn;

use crate::core::ContainerSpec;
use crate::host::{PlotHost, ResizeCallback, ResizeObservation};

use super::{HeadlessContainer, WeakContainer};

/// Host backed by a `futures` [`LocalPool`].
///
/// Spawned engine continuations only run inside
/// [`HeadlessHost::run_until_stalled`], which stands in for the browser's
/// event loop turning over. Do not call it from inside a plot callback.
///
/// Containers and observers are held weakly; an element disappears from
/// [`HeadlessHost::containers`] once its controller is dropped.
pub struct HeadlessHost {
    pool: RefCell<LocalPool>,
    spawner: LocalSpawner,
    containers: RefCell<Vec<WeakContainer>>,
    observers: RefCell<Vec<Observer>>,
    observations_started: Cell<usize>,
}

struct Observer {
    container: WeakContainer,
    callback: ResizeCallback,
    connected: Rc<Cell<bool>>,
}

impl HeadlessHost {
    #[must_use]
    pub fn new() -> Self {
        let pool = LocalPool::new();
        let spawner = pool.spawner();
        Self {
            pool: RefCell::new(pool),
            spawner,
            containers: RefCell::new(Vec::new()),
            observers: RefCell::new(Vec::new()),
            observations_started: Cell::new(0),
        }
    }

    /// Runs every spawned task until none can make progress.
    pub fn run_until_stalled(&self) {
        self.pool.borrow_mut().run_until_stalled();
    }

    /// Rendered containers still owned by a controller, in render order.
    #[must_use]
    pub fn containers(&self) -> Vec<HeadlessContainer> {
        let mut containers = self.containers.borrow_mut();
        containers.retain(WeakContainer::is_alive);
        containers.iter().filter_map(WeakContainer::upgrade).collect()
    }

    #[must_use]
    pub fn container(&self, id: &str) -> Option<HeadlessContainer> {
        self.containers()
            .into_iter()
            .find(|container| container.id() == id)
    }

    #[must_use]
    pub fn active_observer_count(&self) -> usize {
        let mut observers = self.observers.borrow_mut();
        observers.retain(Observer::is_active);
        observers.len()
    }

    /// Bookkeeping entries currently held; pruned as elements and
    /// observations go away.
    #[must_use]
    pub fn tracked_entry_count(&self) -> usize {
        self.containers.borrow().len() + self.observers.borrow().len()
    }

    /// Total number of observations ever started.
    #[must_use]
    pub fn observations_started(&self) -> usize {
        self.observations_started.get()
    }

    /// Changes the container size and notifies its connected observers.
    /// Returns how many observers were notified.
    pub fn resize_container(&self, container: &HeadlessContainer, width: u32, height: u32) -> usize {
        container.set_size(width, height);
        let callbacks: Vec<ResizeCallback> = {
            let mut observers = self.observers.borrow_mut();
            observers.retain(Observer::is_active);
            observers
                .iter()
                .filter(|observer| observer.container.points_to(container))
                .map(|observer| observer.callback.clone())
                .collect()
        };
        for callback in &callbacks {
            callback();
        }
        callbacks.len()
    }
}

impl Observer {
    fn is_active(&self) -> bool {
        self.connected.get() && self.container.is_alive()
    }
}

impl Default for HeadlessHost {
    fn default() -> Self {
        Self::new()
    }
}

impl PlotHost for HeadlessHost {
    type Container = HeadlessContainer;

    fn render_container(&self, spec: &ContainerSpec) -> HeadlessContainer {
        let container = HeadlessContainer::new(spec.clone());
        let mut containers = self.containers.borrow_mut();
        containers.retain(WeakContainer::is_alive);
        containers.push(container.downgrade());
        container
    }

    fn spawn_local(&self, task: LocalBoxFuture<'static, ()>) {
        if let Err(err) = self.spawner.spawn_local(task) {
            warn!(error = %err, "headless host could not spawn plot task");
        }
    }

    fn observe_resize(
        &self,
        container: &HeadlessContainer,
        on_resize: ResizeCallback,
    ) -> ResizeObservation {
        let connected = Rc::new(Cell::new(true));
        {
            let mut observers = self.observers.borrow_mut();
            observers.retain(Observer::is_active);
            observers.push(Observer {
                container: container.downgrade(),
                callback: on_resize,
                connected: connected.clone(),
            });
        }
        self.observations_started
            .set(self.observations_started.get() + 1);
        ResizeObservation::new(move || connected.set(false))
    }
}
