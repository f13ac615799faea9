pub mod container;
pub mod figure;
pub mod resize_policy;

pub use container::{ContainerSpec, ContainerStyle, DEFAULT_CONTAINER_ID};
pub use figure::{Figure, PlotConfig, PlotData, PlotFrame, PlotLayout, PlotTrace};
pub use resize_policy::{AUTOSIZE_KEY, RESPONSIVE_KEY, ResizePolicy};
