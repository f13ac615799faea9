use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::PlotEvent;

/// Payload emitted by the engine for an interaction event.
pub type EventPayload = Value;

/// What a handler tells the engine after running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EventOutcome {
    #[default]
    Continue,
    /// Prevent the engine's default behavior (before-plot, legend clicks).
    Cancel,
}

/// Caller-supplied callback for one engine event.
#[derive(Clone)]
pub struct EventHandler {
    callback: Rc<dyn Fn(&EventPayload) -> EventOutcome>,
}

impl EventHandler {
    pub fn new(callback: impl Fn(&EventPayload) + 'static) -> Self {
        Self {
            callback: Rc::new(move |payload: &EventPayload| {
                callback(payload);
                EventOutcome::Continue
            }),
        }
    }

    /// Handler for vetoable events: returning `false` cancels the default.
    pub fn cancelable(callback: impl Fn(&EventPayload) -> bool + 'static) -> Self {
        Self {
            callback: Rc::new(move |payload: &EventPayload| {
                if callback(payload) {
                    EventOutcome::Continue
                } else {
                    EventOutcome::Cancel
                }
            }),
        }
    }

    pub fn call(&self, payload: &EventPayload) -> EventOutcome {
        (self.callback)(payload)
    }

    /// Whether both handlers wrap the same callback allocation.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.callback, &other.callback)
    }
}

impl fmt::Debug for EventHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventHandler").finish_non_exhaustive()
    }
}

/// Event handler props keyed by [`PlotEvent`]. Absent entries are never attached.
#[derive(Debug, Clone, Default)]
pub struct EventHandlers {
    entries: IndexMap<PlotEvent, EventHandler>,
}

impl EventHandlers {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, event: PlotEvent, handler: EventHandler) -> Self {
        self.insert(event, handler);
        self
    }

    pub fn insert(&mut self, event: PlotEvent, handler: EventHandler) -> Option<EventHandler> {
        self.entries.insert(event, handler)
    }

    /// Sets or clears the handler for `event`; `None` behaves like an unset prop.
    pub fn set(&mut self, event: PlotEvent, handler: Option<EventHandler>) {
        match handler {
            Some(handler) => {
                self.entries.insert(event, handler);
            }
            None => {
                self.entries.shift_remove(&event);
            }
        }
    }

    #[must_use]
    pub fn get(&self, event: PlotEvent) -> Option<&EventHandler> {
        self.entries.get(&event)
    }

    #[must_use]
    pub fn contains(&self, event: PlotEvent) -> bool {
        self.entries.contains_key(&event)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (PlotEvent, &EventHandler)> {
        self.entries.iter().map(|(event, handler)| (*event, handler))
    }

    pub fn events(&self) -> impl Iterator<Item = PlotEvent> + '_ {
        self.entries.keys().copied()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use serde_json::json;

    use super::*;

    #[test]
    fn cancelable_handler_maps_false_to_cancel() {
        let handler = EventHandler::cancelable(|payload| payload["allow"] == json!(true));
        assert_eq!(handler.call(&json!({ "allow": true })), EventOutcome::Continue);
        assert_eq!(handler.call(&json!({ "allow": false })), EventOutcome::Cancel);
    }

    #[test]
    fn clearing_an_entry_removes_it() {
        let hits = Rc::new(Cell::new(0));
        let counter = hits.clone();
        let mut handlers = EventHandlers::new()
            .with(PlotEvent::Click, EventHandler::new(move |_| counter.set(counter.get() + 1)))
            .with(PlotEvent::Hover, EventHandler::new(|_| {}));

        handlers.set(PlotEvent::Hover, None);
        assert_eq!(handlers.events().collect::<Vec<_>>(), vec![PlotEvent::Click]);

        handlers
            .get(PlotEvent::Click)
            .expect("click handler")
            .call(&Value::Null);
        assert_eq!(hits.get(), 1);
    }
}
