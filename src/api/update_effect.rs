use std::rc::Rc;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::core::Figure;
use crate::engine::PlotEngine;
use crate::error::PlotResult;
use crate::host::PlotHost;

use super::controller::SharedInner;
use super::{LifecycleState, PlotController};

/// Delivery rule for overlapping `update` completions.
///
/// In-flight updates are never cancelled; this only decides which settled
/// results reach `on_update`/`on_error`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum UpdateOrdering {
    /// Every settled update is reported, in settlement order.
    #[default]
    Settled,
    /// Only the most recently issued update is reported; older completions
    /// are dropped.
    LatestOnly,
}

impl<E: PlotEngine, H: PlotHost<Container = E::Container>> PlotController<E, H> {
    /// Issues one `update` with the current inputs. No-op until initialized.
    pub(super) fn run_update_effect(inner: &SharedInner<E, H>) {
        let (engine, host, container, request, generation) = {
            let mut guard = inner.borrow_mut();
            if guard.state != LifecycleState::Initialized {
                trace!(state = %guard.state, "skipping plot update");
                return;
            }
            guard.update_generation += 1;
            (
                guard.engine.clone(),
                guard.host.clone(),
                guard.container.clone(),
                guard.props.request(),
                guard.update_generation,
            )
        };

        debug!(generation, traces = request.data.len(), "issuing plot update");
        let pending = engine.update(&container, &request);
        let weak = Rc::downgrade(inner);
        host.spawn_local(Box::pin(async move {
            let result = pending.await;
            if let Some(inner) = weak.upgrade() {
                Self::finish_update(&inner, generation, result);
            }
        }));
    }

    fn finish_update(inner: &SharedInner<E, H>, generation: u64, result: PlotResult<E::Handle>) {
        let (on_update, on_error) = {
            let guard = inner.borrow();
            if guard.state != LifecycleState::Initialized {
                trace!(generation, state = %guard.state, "dropping update result");
                return;
            }
            if guard.props.update_ordering == UpdateOrdering::LatestOnly
                && generation != guard.update_generation
            {
                debug!(
                    generation,
                    latest = guard.update_generation,
                    "dropping stale update result"
                );
                return;
            }
            (guard.props.on_update.clone(), guard.props.on_error.clone())
        };

        match result {
            Ok(handle) => {
                trace!(generation, "plot update settled");
                if let Some(on_update) = on_update {
                    on_update(&Figure::extract(&handle), &handle);
                }
            }
            Err(err) => {
                warn!(generation, error = %err, "plot update failed");
                if let Some(on_error) = on_error {
                    on_error(&err);
                }
            }
        }
    }
}
