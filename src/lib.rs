//! reactive-plot: binds a Plotly-style charting engine to a reactive host
//! component lifecycle.
//!
//! A component created with [`create_plot_component`] mounts a plot into a
//! host-rendered container, re-renders it when its inputs change, observes
//! container resizes, forwards engine events to caller handlers and tears
//! everything down on unmount.

pub mod api;
pub mod core;
pub mod engine;
pub mod error;
pub mod events;
pub mod headless;
pub mod host;
pub mod telemetry;

pub use api::{
    LifecycleState, PlotComponent, PlotController, PlotProps, UpdateOrdering,
    create_plot_component,
};
pub use crate::core::{Figure, ResizePolicy};
pub use engine::{PlotEngine, PlotHandle, PlotRequest};
pub use error::{EngineOperation, PlotError, PlotResult};
pub use events::{EventHandler, EventHandlers, EventOutcome, PlotEvent};
pub use host::{PlotHost, ResizeObservation};
