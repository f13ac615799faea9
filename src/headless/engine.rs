use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use futures::channel::oneshot;
use futures::future::{self, LocalBoxFuture};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::engine::{PlotEngine, PlotRequest};
use crate::error::{EngineOperation, PlotError, PlotResult};

use super::{HeadlessContainer, HeadlessHandle};

/// One recorded engine invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EngineCall {
    Create {
        container_id: String,
        request: PlotRequest,
    },
    Update {
        container_id: String,
        request: PlotRequest,
    },
    Destroy,
    Resize,
}

/// When `create`/`update` futures resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Settlement {
    /// Resolved as soon as the future is polled.
    #[default]
    Immediate,
    /// Held until [`HeadlessEngine::settle_next`] / [`HeadlessEngine::settle_at`].
    Manual,
}

/// In-memory engine that records every call.
///
/// Clones share state, so a test keeps one clone for inspection and hands
/// the other to the component factory.
#[derive(Clone, Default)]
pub struct HeadlessEngine {
    state: Rc<EngineState>,
}

#[derive(Default)]
struct EngineState {
    calls: RefCell<Vec<EngineCall>>,
    create_failures: RefCell<VecDeque<PlotError>>,
    update_failures: RefCell<VecDeque<PlotError>>,
    settlement: Cell<Settlement>,
    pending: RefCell<Vec<PendingOperation>>,
}

struct PendingOperation {
    operation: EngineOperation,
    outcome: PlotResult<Rendered>,
    sender: oneshot::Sender<PlotResult<HeadlessHandle>>,
}

struct Rendered {
    container: HeadlessContainer,
    handle: HeadlessHandle,
    request: PlotRequest,
}

impl Rendered {
    fn commit(self) -> HeadlessHandle {
        self.handle.apply(&self.request);
        self.container.bind_plot(self.handle.clone());
        self.handle
    }
}

impl HeadlessEngine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_settlement(self, settlement: Settlement) -> Self {
        self.state.settlement.set(settlement);
        self
    }

    /// The next `create` rejects with `error`.
    pub fn fail_next_create(&self, error: PlotError) {
        self.state.create_failures.borrow_mut().push_back(error);
    }

    /// The next `update` rejects with `error`.
    pub fn fail_next_update(&self, error: PlotError) {
        self.state.update_failures.borrow_mut().push_back(error);
    }

    #[must_use]
    pub fn calls(&self) -> Vec<EngineCall> {
        self.state.calls.borrow().clone()
    }

    #[must_use]
    pub fn create_requests(&self) -> Vec<PlotRequest> {
        self.requests(EngineOperation::Create)
    }

    #[must_use]
    pub fn update_requests(&self) -> Vec<PlotRequest> {
        self.requests(EngineOperation::Update)
    }

    #[must_use]
    pub fn destroy_count(&self) -> usize {
        self.count(|call| matches!(call, EngineCall::Destroy))
    }

    #[must_use]
    pub fn resize_count(&self) -> usize {
        self.count(|call| matches!(call, EngineCall::Resize))
    }

    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.state.pending.borrow().len()
    }

    /// Settles the oldest pending operation. Returns `false` when none is pending.
    pub fn settle_next(&self) -> bool {
        self.settle_at(0)
    }

    /// Settles the pending operation at `index` (issue order).
    pub fn settle_at(&self, index: usize) -> bool {
        let pending = {
            let mut pending = self.state.pending.borrow_mut();
            if index >= pending.len() {
                return false;
            }
            pending.remove(index)
        };
        trace!(operation = %pending.operation, "settling headless operation");
        let result = pending.outcome.map(Rendered::commit);
        // The receiver is gone when its controller was dropped.
        let _ = pending.sender.send(result);
        true
    }

    fn record(&self, call: EngineCall) {
        self.state.calls.borrow_mut().push(call);
    }

    fn requests(&self, operation: EngineOperation) -> Vec<PlotRequest> {
        self.state
            .calls
            .borrow()
            .iter()
            .filter_map(|call| match (operation, call) {
                (EngineOperation::Create, EngineCall::Create { request, .. })
                | (EngineOperation::Update, EngineCall::Update { request, .. }) => {
                    Some(request.clone())
                }
                _ => None,
            })
            .collect()
    }

    fn count(&self, predicate: impl Fn(&EngineCall) -> bool) -> usize {
        self.state
            .calls
            .borrow()
            .iter()
            .filter(|call| predicate(call))
            .count()
    }

    fn begin(
        &self,
        operation: EngineOperation,
        container: &HeadlessContainer,
        request: &PlotRequest,
    ) -> LocalBoxFuture<'static, PlotResult<HeadlessHandle>> {
        let failures = match operation {
            EngineOperation::Create => &self.state.create_failures,
            EngineOperation::Update => &self.state.update_failures,
        };
        let outcome = match failures.borrow_mut().pop_front() {
            Some(error) => Err(error),
            None => {
                let handle = match operation {
                    EngineOperation::Create => HeadlessHandle::new(),
                    EngineOperation::Update => container
                        .plot()
                        .filter(|plot| !plot.is_destroyed())
                        .unwrap_or_else(HeadlessHandle::new),
                };
                Ok(Rendered {
                    container: container.clone(),
                    handle,
                    request: request.clone(),
                })
            }
        };

        match self.state.settlement.get() {
            Settlement::Immediate => Box::pin(future::ready(outcome.map(Rendered::commit))),
            Settlement::Manual => {
                let (sender, receiver) = oneshot::channel();
                self.state.pending.borrow_mut().push(PendingOperation {
                    operation,
                    outcome,
                    sender,
                });
                Box::pin(async move {
                    receiver.await.unwrap_or_else(|_| {
                        Err(PlotError::rejected(
                            operation,
                            "headless engine dropped the pending operation",
                        ))
                    })
                })
            }
        }
    }
}

impl PlotEngine for HeadlessEngine {
    type Container = HeadlessContainer;
    type Handle = HeadlessHandle;

    fn create(
        &self,
        container: &HeadlessContainer,
        request: &PlotRequest,
    ) -> LocalBoxFuture<'static, PlotResult<HeadlessHandle>> {
        self.record(EngineCall::Create {
            container_id: container.id().to_owned(),
            request: request.clone(),
        });
        self.begin(EngineOperation::Create, container, request)
    }

    fn update(
        &self,
        container: &HeadlessContainer,
        request: &PlotRequest,
    ) -> LocalBoxFuture<'static, PlotResult<HeadlessHandle>> {
        self.record(EngineCall::Update {
            container_id: container.id().to_owned(),
            request: request.clone(),
        });
        self.begin(EngineOperation::Update, container, request)
    }

    fn destroy(&self, handle: &HeadlessHandle) {
        self.record(EngineCall::Destroy);
        handle.purge();
    }

    fn resize(&self, handle: &HeadlessHandle) {
        self.record(EngineCall::Resize);
        handle.record_resize();
    }
}
