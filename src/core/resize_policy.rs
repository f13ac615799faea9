use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::figure::{PlotConfig, PlotLayout};

/// Layout key forced on while resizing is enabled.
pub const AUTOSIZE_KEY: &str = "autosize";
/// Config key forced on while resizing is enabled.
pub const RESPONSIVE_KEY: &str = "responsive";

/// Controls the autosize/responsive overrides and container-size observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ResizePolicy {
    #[default]
    Enabled,
    Disabled,
}

impl ResizePolicy {
    #[must_use]
    pub const fn is_enabled(self) -> bool {
        matches!(self, Self::Enabled)
    }

    /// Layout handed to the engine. Caller keys are preserved, `autosize`
    /// always wins while enabled.
    #[must_use]
    pub fn apply_layout(self, layout: &PlotLayout) -> PlotLayout {
        let mut derived = layout.clone();
        if self.is_enabled() {
            derived.insert(AUTOSIZE_KEY.to_owned(), Value::Bool(true));
        }
        derived
    }

    /// Config handed to the engine. Caller keys are preserved, `responsive`
    /// always wins while enabled.
    #[must_use]
    pub fn apply_config(self, config: &PlotConfig) -> PlotConfig {
        let mut derived = config.clone();
        if self.is_enabled() {
            derived.insert(RESPONSIVE_KEY.to_owned(), Value::Bool(true));
        }
        derived
    }
}

impl From<bool> for ResizePolicy {
    fn from(enabled: bool) -> Self {
        if enabled {
            Self::Enabled
        } else {
            Self::Disabled
        }
    }
}
