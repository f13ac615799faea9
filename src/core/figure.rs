use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::engine::PlotHandle;
use crate::error::{PlotError, PlotResult};

/// One trace object (`{"x": [...], "y": [...], "type": "scatter"}`).
pub type PlotTrace = Value;
/// Ordered trace sequence passed to the engine.
pub type PlotData = Vec<PlotTrace>;
/// Layout object (axes, title, margins, `autosize`, ...).
pub type PlotLayout = Map<String, Value>;
/// Engine configuration object (`responsive`, `displayModeBar`, ...).
pub type PlotConfig = Map<String, Value>;
/// Animation frame object.
pub type PlotFrame = Value;

/// Read-only `{data, layout, frames}` projection of a live plot handle.
///
/// Always re-extracted from the handle; the controller never keeps its own
/// copy of engine-managed state.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Figure {
    pub data: PlotData,
    pub layout: PlotLayout,
    #[serde(default)]
    pub frames: Vec<PlotFrame>,
}

impl Figure {
    #[must_use]
    pub fn new(data: PlotData, layout: PlotLayout, frames: Vec<PlotFrame>) -> Self {
        Self {
            data,
            layout,
            frames,
        }
    }

    /// Reads the handle's current traces, layout and recorded animation frames.
    ///
    /// `frames` is empty when the engine keeps no transition frames.
    #[must_use]
    pub fn extract<H: PlotHandle>(handle: &H) -> Self {
        Self {
            data: handle.data(),
            layout: handle.layout(),
            frames: handle.transition_frames().unwrap_or_default(),
        }
    }

    #[must_use]
    pub fn trace_count(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn has_frames(&self) -> bool {
        !self.frames.is_empty()
    }

    pub fn to_json_pretty(&self) -> PlotResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| PlotError::InvalidData(format!("failed to serialize figure: {e}")))
    }

    /// Parses a `{data, layout, frames?}` figure; missing frames read as empty.
    pub fn from_json_str(input: &str) -> PlotResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| PlotError::InvalidData(format!("failed to parse figure: {e}")))
    }
}
