//! Capability surface required from the charting engine.
//!
//! The engine is opaque: the controller only creates, updates, resizes and
//! destroys plots and subscribes to events on the handles it gets back.

use futures::future::LocalBoxFuture;
use serde::{Deserialize, Serialize};

use crate::core::{PlotConfig, PlotData, PlotFrame, PlotLayout};
use crate::error::PlotResult;
use crate::events::EventHandler;

/// Inputs for one `create`/`update` call. Layout and config are already
/// derived through the resize policy.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PlotRequest {
    pub data: PlotData,
    pub layout: PlotLayout,
    pub config: PlotConfig,
    #[serde(default)]
    pub frames: Vec<PlotFrame>,
}

/// Live chart instance returned by the engine.
///
/// Clones refer to the same chart. Engine-managed state is read back on
/// demand through the accessors.
pub trait PlotHandle: Clone + 'static {
    fn data(&self) -> PlotData;
    fn layout(&self) -> PlotLayout;
    /// Animation frames the engine recorded internally, if any.
    fn transition_frames(&self) -> Option<Vec<PlotFrame>>;
    fn on(&self, event_name: &str, handler: EventHandler);
    fn remove_all_listeners(&self, event_name: &str);
}

/// Charting engine bound by a plot component.
///
/// `create` and `update` are issued synchronously and settle asynchronously;
/// the returned futures are driven by the host's local executor.
pub trait PlotEngine: 'static {
    type Container: Clone + 'static;
    type Handle: PlotHandle;

    fn create(
        &self,
        container: &Self::Container,
        request: &PlotRequest,
    ) -> LocalBoxFuture<'static, PlotResult<Self::Handle>>;

    fn update(
        &self,
        container: &Self::Container,
        request: &PlotRequest,
    ) -> LocalBoxFuture<'static, PlotResult<Self::Handle>>;

    fn destroy(&self, handle: &Self::Handle);

    fn resize(&self, handle: &Self::Handle);
}
