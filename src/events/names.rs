use serde::{Deserialize, Serialize};

/// Prefix every caller-facing handler name starts with.
pub const HANDLER_PREFIX: &str = "on";
/// Namespace the engine puts in front of its event channels.
pub const ENGINE_EVENT_NAMESPACE: &str = "plotly_";

/// Closed set of interaction events a plot component can forward.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum PlotEvent {
    AnimatingFrame,
    BeforePlot,
    Click,
    ClickAnnotation,
    Hover,
    LegendClick,
    LegendDoubleClick,
    Relayout,
    Relayouting,
    Restyle,
    Selected,
    Selecting,
    SliderChange,
    SliderEnd,
    SliderStart,
    SunburstClick,
    Unhover,
    AfterExport,
    AfterPlot,
    Animated,
    AnimationInterrupted,
    AutoSize,
    BeforeExport,
    Deselect,
    DoubleClick,
    Framework,
    Redraw,
    Transitioning,
    TransitionInterrupted,
    Event,
}

impl PlotEvent {
    pub const ALL: [Self; 30] = [
        Self::AnimatingFrame,
        Self::BeforePlot,
        Self::Click,
        Self::ClickAnnotation,
        Self::Hover,
        Self::LegendClick,
        Self::LegendDoubleClick,
        Self::Relayout,
        Self::Relayouting,
        Self::Restyle,
        Self::Selected,
        Self::Selecting,
        Self::SliderChange,
        Self::SliderEnd,
        Self::SliderStart,
        Self::SunburstClick,
        Self::Unhover,
        Self::AfterExport,
        Self::AfterPlot,
        Self::Animated,
        Self::AnimationInterrupted,
        Self::AutoSize,
        Self::BeforeExport,
        Self::Deselect,
        Self::DoubleClick,
        Self::Framework,
        Self::Redraw,
        Self::Transitioning,
        Self::TransitionInterrupted,
        Self::Event,
    ];

    /// `(handler name, engine channel)` for every event. Attach and detach
    /// both resolve channels here, so a listener is always removed from the
    /// channel it was added to.
    const fn names(self) -> (&'static str, &'static str) {
        match self {
            Self::AnimatingFrame => ("onAnimatingFrame", "plotly_animatingframe"),
            Self::BeforePlot => ("onBeforePlot", "plotly_beforeplot"),
            Self::Click => ("onClick", "plotly_click"),
            Self::ClickAnnotation => ("onClickAnnotation", "plotly_clickannotation"),
            Self::Hover => ("onHover", "plotly_hover"),
            Self::LegendClick => ("onLegendClick", "plotly_legendclick"),
            Self::LegendDoubleClick => ("onLegendDoubleClick", "plotly_legenddoubleclick"),
            Self::Relayout => ("onRelayout", "plotly_relayout"),
            Self::Relayouting => ("onRelayouting", "plotly_relayouting"),
            Self::Restyle => ("onRestyle", "plotly_restyle"),
            Self::Selected => ("onSelected", "plotly_selected"),
            Self::Selecting => ("onSelecting", "plotly_selecting"),
            Self::SliderChange => ("onSliderChange", "plotly_sliderchange"),
            Self::SliderEnd => ("onSliderEnd", "plotly_sliderend"),
            Self::SliderStart => ("onSliderStart", "plotly_sliderstart"),
            Self::SunburstClick => ("onSunburstClick", "plotly_sunburstclick"),
            Self::Unhover => ("onUnhover", "plotly_unhover"),
            Self::AfterExport => ("onAfterExport", "plotly_afterexport"),
            Self::AfterPlot => ("onAfterPlot", "plotly_afterplot"),
            Self::Animated => ("onAnimated", "plotly_animated"),
            Self::AnimationInterrupted => {
                ("onAnimationInterrupted", "plotly_animationinterrupted")
            }
            Self::AutoSize => ("onAutoSize", "plotly_autosize"),
            Self::BeforeExport => ("onBeforeExport", "plotly_beforeexport"),
            Self::Deselect => ("onDeselect", "plotly_deselect"),
            Self::DoubleClick => ("onDoubleClick", "plotly_doubleclick"),
            Self::Framework => ("onFramework", "plotly_framework"),
            Self::Redraw => ("onRedraw", "plotly_redraw"),
            Self::Transitioning => ("onTransitioning", "plotly_transitioning"),
            Self::TransitionInterrupted => {
                ("onTransitionInterrupted", "plotly_transitioninterrupted")
            }
            Self::Event => ("onEvent", "plotly_event"),
        }
    }

    /// Caller-facing prop name, e.g. `onClick`.
    #[must_use]
    pub const fn handler_name(self) -> &'static str {
        self.names().0
    }

    /// Engine channel, e.g. `plotly_click`.
    #[must_use]
    pub const fn engine_event_name(self) -> &'static str {
        self.names().1
    }

    /// Events whose handler may veto the engine's default behavior.
    #[must_use]
    pub const fn is_cancelable(self) -> bool {
        matches!(
            self,
            Self::BeforePlot | Self::LegendClick | Self::LegendDoubleClick
        )
    }

    #[must_use]
    pub fn from_handler_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|event| event.handler_name() == name)
    }

    #[must_use]
    pub fn from_engine_event_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|event| event.engine_event_name() == name)
    }
}

/// Applies the naming rule (drop `on`, lower-case, prefix the namespace) to
/// an arbitrary handler name. Returns `None` when the prefix is missing or
/// nothing follows it.
#[must_use]
pub fn derive_engine_event_name(handler_name: &str) -> Option<String> {
    let suffix = handler_name.strip_prefix(HANDLER_PREFIX)?;
    if suffix.is_empty() {
        return None;
    }
    Some(format!("{ENGINE_EVENT_NAMESPACE}{}", suffix.to_lowercase()))
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn table_agrees_with_naming_rule() {
        for event in PlotEvent::ALL {
            assert_eq!(
                derive_engine_event_name(event.handler_name()).as_deref(),
                Some(event.engine_event_name()),
                "{event:?}"
            );
        }
    }

    #[test]
    fn names_are_unique_in_both_directions() {
        let handlers: HashSet<_> = PlotEvent::ALL.iter().map(|e| e.handler_name()).collect();
        let channels: HashSet<_> = PlotEvent::ALL
            .iter()
            .map(|e| e.engine_event_name())
            .collect();
        assert_eq!(handlers.len(), PlotEvent::ALL.len());
        assert_eq!(channels.len(), PlotEvent::ALL.len());
    }

    #[test]
    fn rule_rejects_names_without_prefix() {
        assert_eq!(derive_engine_event_name("click"), None);
        assert_eq!(derive_engine_event_name("on"), None);
    }
}
