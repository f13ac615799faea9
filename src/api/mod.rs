//! Component factory and per-mount lifecycle controller.

mod component;
mod controller;
mod lifecycle;
mod props;
mod resize_effect;
mod update_effect;

pub use component::{PlotComponent, create_plot_component};
pub use controller::PlotController;
pub use lifecycle::LifecycleState;
pub use props::{
    ContainerRefCallback, ErrorCallback, FigureCallback, PlotProps, ResizeNotifyCallback,
};
pub use update_effect::UpdateOrdering;
