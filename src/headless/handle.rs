use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;

use crate::core::{PlotConfig, PlotData, PlotFrame, PlotLayout};
use crate::engine::{PlotHandle, PlotRequest};
use crate::events::{EventHandler, EventOutcome, EventPayload};

/// Live plot owned by [`super::HeadlessEngine`]. Clones share state.
#[derive(Clone)]
pub struct HeadlessHandle {
    state: Rc<RefCell<HandleState>>,
}

#[derive(Default)]
struct HandleState {
    data: PlotData,
    layout: PlotLayout,
    config: PlotConfig,
    frames: Option<Vec<PlotFrame>>,
    listeners: IndexMap<String, Vec<EventHandler>>,
    render_count: usize,
    resize_count: usize,
    destroyed: bool,
}

impl HeadlessHandle {
    pub(super) fn new() -> Self {
        Self {
            state: Rc::new(RefCell::new(HandleState::default())),
        }
    }

    /// Renders `request` in place. Frames are only recorded when present.
    pub(super) fn apply(&self, request: &PlotRequest) {
        let mut state = self.state.borrow_mut();
        state.data = request.data.clone();
        state.layout = request.layout.clone();
        state.config = request.config.clone();
        state.frames = (!request.frames.is_empty()).then(|| request.frames.clone());
        state.render_count += 1;
    }

    pub(super) fn record_resize(&self) {
        self.state.borrow_mut().resize_count += 1;
    }

    pub(super) fn purge(&self) {
        let mut state = self.state.borrow_mut();
        state.data.clear();
        state.layout.clear();
        state.config.clear();
        state.frames = None;
        state.destroyed = true;
    }

    #[must_use]
    pub fn config(&self) -> PlotConfig {
        self.state.borrow().config.clone()
    }

    /// Replaces the recorded animation frames, as an `animate` call would.
    pub fn set_transition_frames(&self, frames: Option<Vec<PlotFrame>>) {
        self.state.borrow_mut().frames = frames;
    }

    /// Delivers `payload` to every listener on `event_name`. Cancels when
    /// any listener cancels.
    pub fn emit(&self, event_name: &str, payload: &EventPayload) -> EventOutcome {
        let listeners = self
            .state
            .borrow()
            .listeners
            .get(event_name)
            .cloned()
            .unwrap_or_default();
        let mut outcome = EventOutcome::Continue;
        for listener in &listeners {
            if listener.call(payload) == EventOutcome::Cancel {
                outcome = EventOutcome::Cancel;
            }
        }
        outcome
    }

    #[must_use]
    pub fn listener_count(&self, event_name: &str) -> usize {
        self.state
            .borrow()
            .listeners
            .get(event_name)
            .map_or(0, Vec::len)
    }

    /// Channels with at least one listener, in subscription order.
    #[must_use]
    pub fn subscribed_events(&self) -> Vec<String> {
        self.state
            .borrow()
            .listeners
            .iter()
            .filter(|(_, listeners)| !listeners.is_empty())
            .map(|(name, _)| name.clone())
            .collect()
    }

    #[must_use]
    pub fn render_count(&self) -> usize {
        self.state.borrow().render_count
    }

    #[must_use]
    pub fn resize_count(&self) -> usize {
        self.state.borrow().resize_count
    }

    #[must_use]
    pub fn is_destroyed(&self) -> bool {
        self.state.borrow().destroyed
    }

    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.state, &other.state)
    }
}

impl PlotHandle for HeadlessHandle {
    fn data(&self) -> PlotData {
        self.state.borrow().data.clone()
    }

    fn layout(&self) -> PlotLayout {
        self.state.borrow().layout.clone()
    }

    fn transition_frames(&self) -> Option<Vec<PlotFrame>> {
        self.state.borrow().frames.clone()
    }

    fn on(&self, event_name: &str, handler: EventHandler) {
        self.state
            .borrow_mut()
            .listeners
            .entry(event_name.to_owned())
            .or_default()
            .push(handler);
    }

    fn remove_all_listeners(&self, event_name: &str) {
        self.state.borrow_mut().listeners.shift_remove(event_name);
    }
}

impl PartialEq for HeadlessHandle {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Debug for HeadlessHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("HeadlessHandle")
            .field("traces", &state.data.len())
            .field("listeners", &state.listeners.len())
            .field("destroyed", &state.destroyed)
            .finish_non_exhaustive()
    }
}
