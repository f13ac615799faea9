use std::rc::Rc;

use crate::core::{
    ContainerSpec, ContainerStyle, Figure, PlotConfig, PlotData, PlotFrame, PlotLayout,
    ResizePolicy,
};
use crate::engine::{PlotEngine, PlotRequest};
use crate::error::PlotError;
use crate::events::{EventHandler, EventHandlers, PlotEvent};

use super::UpdateOrdering;

/// Lifecycle callback receiving a figure snapshot and the live handle.
pub type FigureCallback<H> = Rc<dyn Fn(&Figure, &H)>;
pub type ErrorCallback = Rc<dyn Fn(&PlotError)>;
pub type ResizeNotifyCallback = Rc<dyn Fn()>;
pub type ContainerRefCallback<C> = Rc<dyn Fn(&C)>;

/// Props of a mounted plot component.
///
/// Reactive inputs (`data`, `layout`, `config`, `frames`, `resize_policy`)
/// are changed through the controller after mount; callbacks are read at the
/// moment they fire.
pub struct PlotProps<E: PlotEngine> {
    pub container: ContainerSpec,
    pub data: PlotData,
    pub layout: PlotLayout,
    pub config: PlotConfig,
    pub frames: Vec<PlotFrame>,
    pub handlers: EventHandlers,
    pub on_initialized: Option<FigureCallback<E::Handle>>,
    pub on_update: Option<FigureCallback<E::Handle>>,
    pub on_purge: Option<FigureCallback<E::Handle>>,
    pub on_resize: Option<ResizeNotifyCallback>,
    pub on_error: Option<ErrorCallback>,
    pub resize_policy: ResizePolicy,
    pub update_ordering: UpdateOrdering,
    pub container_ref: Option<ContainerRefCallback<E::Container>>,
}

impl<E: PlotEngine> Default for PlotProps<E> {
    fn default() -> Self {
        Self {
            container: ContainerSpec::default(),
            data: PlotData::new(),
            layout: PlotLayout::new(),
            config: PlotConfig::new(),
            frames: Vec::new(),
            handlers: EventHandlers::new(),
            on_initialized: None,
            on_update: None,
            on_purge: None,
            on_resize: None,
            on_error: None,
            resize_policy: ResizePolicy::default(),
            update_ordering: UpdateOrdering::default(),
            container_ref: None,
        }
    }
}

impl<E: PlotEngine> Clone for PlotProps<E> {
    fn clone(&self) -> Self {
        Self {
            container: self.container.clone(),
            data: self.data.clone(),
            layout: self.layout.clone(),
            config: self.config.clone(),
            frames: self.frames.clone(),
            handlers: self.handlers.clone(),
            on_initialized: self.on_initialized.clone(),
            on_update: self.on_update.clone(),
            on_purge: self.on_purge.clone(),
            on_resize: self.on_resize.clone(),
            on_error: self.on_error.clone(),
            resize_policy: self.resize_policy,
            update_ordering: self.update_ordering,
            container_ref: self.container_ref.clone(),
        }
    }
}

impl<E: PlotEngine> PlotProps<E> {
    #[must_use]
    pub fn new(data: PlotData) -> Self {
        Self {
            data,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.container.id = id.into();
        self
    }

    #[must_use]
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.container.class = Some(class.into());
        self
    }

    #[must_use]
    pub fn with_style(mut self, style: ContainerStyle) -> Self {
        self.container.style = style;
        self
    }

    #[must_use]
    pub fn with_layout(mut self, layout: PlotLayout) -> Self {
        self.layout = layout;
        self
    }

    #[must_use]
    pub fn with_config(mut self, config: PlotConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn with_frames(mut self, frames: Vec<PlotFrame>) -> Self {
        self.frames = frames;
        self
    }

    #[must_use]
    pub fn with_handler(mut self, event: PlotEvent, handler: EventHandler) -> Self {
        self.handlers.insert(event, handler);
        self
    }

    #[must_use]
    pub fn with_handlers(mut self, handlers: EventHandlers) -> Self {
        self.handlers = handlers;
        self
    }

    #[must_use]
    pub fn with_on_initialized(mut self, callback: impl Fn(&Figure, &E::Handle) + 'static) -> Self {
        let callback: FigureCallback<E::Handle> = Rc::new(callback);
        self.on_initialized = Some(callback);
        self
    }

    #[must_use]
    pub fn with_on_update(mut self, callback: impl Fn(&Figure, &E::Handle) + 'static) -> Self {
        let callback: FigureCallback<E::Handle> = Rc::new(callback);
        self.on_update = Some(callback);
        self
    }

    #[must_use]
    pub fn with_on_purge(mut self, callback: impl Fn(&Figure, &E::Handle) + 'static) -> Self {
        let callback: FigureCallback<E::Handle> = Rc::new(callback);
        self.on_purge = Some(callback);
        self
    }

    #[must_use]
    pub fn with_on_resize(mut self, callback: impl Fn() + 'static) -> Self {
        let callback: ResizeNotifyCallback = Rc::new(callback);
        self.on_resize = Some(callback);
        self
    }

    #[must_use]
    pub fn with_on_error(mut self, callback: impl Fn(&PlotError) + 'static) -> Self {
        let callback: ErrorCallback = Rc::new(callback);
        self.on_error = Some(callback);
        self
    }

    #[must_use]
    pub fn with_resize_policy(mut self, policy: impl Into<ResizePolicy>) -> Self {
        self.resize_policy = policy.into();
        self
    }

    #[must_use]
    pub fn with_update_ordering(mut self, ordering: UpdateOrdering) -> Self {
        self.update_ordering = ordering;
        self
    }

    #[must_use]
    pub fn with_container_ref(mut self, callback: impl Fn(&E::Container) + 'static) -> Self {
        let callback: ContainerRefCallback<E::Container> = Rc::new(callback);
        self.container_ref = Some(callback);
        self
    }

    /// Engine request built from the current inputs and the resize policy.
    #[must_use]
    pub fn request(&self) -> PlotRequest {
        PlotRequest {
            data: self.data.clone(),
            layout: self.resize_policy.apply_layout(&self.layout),
            config: self.resize_policy.apply_config(&self.config),
            frames: self.frames.clone(),
        }
    }
}
