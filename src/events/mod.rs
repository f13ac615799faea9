//! Mapping between declarative handler props and the engine's imperative
//! subscription API.

mod handlers;
mod names;

pub use handlers::{EventHandler, EventHandlers, EventOutcome, EventPayload};
pub use names::{ENGINE_EVENT_NAMESPACE, HANDLER_PREFIX, PlotEvent, derive_engine_event_name};

use smallvec::SmallVec;
use tracing::trace;

use crate::engine::PlotHandle;

/// Events actually subscribed on one handle, in attach order.
pub type AttachedEvents = SmallVec<[PlotEvent; 8]>;

/// Subscribes every present handler on `handle` and returns what was attached.
pub fn attach_events<H: PlotHandle>(handle: &H, handlers: &EventHandlers) -> AttachedEvents {
    let mut attached = AttachedEvents::new();
    for (event, handler) in handlers.iter() {
        trace!(channel = event.engine_event_name(), "attach plot event");
        handle.on(event.engine_event_name(), handler.clone());
        attached.push(event);
    }
    attached
}

/// Removes the listeners previously attached to `handle`.
pub fn detach_events<H: PlotHandle>(handle: &H, attached: &[PlotEvent]) {
    for event in attached {
        trace!(channel = event.engine_event_name(), "detach plot event");
        handle.remove_all_listeners(event.engine_event_name());
    }
}
