use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use crate::core::ContainerSpec;

use super::HeadlessHandle;

/// In-memory container element. Clones refer to the same element.
#[derive(Clone)]
pub struct HeadlessContainer {
    inner: Rc<ContainerState>,
}

struct ContainerState {
    spec: ContainerSpec,
    plot: RefCell<Option<HeadlessHandle>>,
    size: Cell<(u32, u32)>,
}

impl HeadlessContainer {
    #[must_use]
    pub fn new(spec: ContainerSpec) -> Self {
        Self {
            inner: Rc::new(ContainerState {
                spec,
                plot: RefCell::new(None),
                size: Cell::new((0, 0)),
            }),
        }
    }

    #[must_use]
    pub fn spec(&self) -> &ContainerSpec {
        &self.inner.spec
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.inner.spec.id
    }

    #[must_use]
    pub fn class(&self) -> Option<&str> {
        self.inner.spec.class.as_deref()
    }

    #[must_use]
    pub fn style_attribute(&self) -> String {
        self.inner.spec.style.to_css()
    }

    /// Plot currently bound to this element by the engine.
    #[must_use]
    pub fn plot(&self) -> Option<HeadlessHandle> {
        self.inner.plot.borrow().clone()
    }

    pub(super) fn bind_plot(&self, handle: HeadlessHandle) {
        *self.inner.plot.borrow_mut() = Some(handle);
    }

    #[must_use]
    pub fn size(&self) -> (u32, u32) {
        self.inner.size.get()
    }

    pub(super) fn set_size(&self, width: u32, height: u32) {
        self.inner.size.set((width, height));
    }

    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    pub(super) fn downgrade(&self) -> WeakContainer {
        WeakContainer {
            inner: Rc::downgrade(&self.inner),
        }
    }
}

/// Non-owning reference the host keeps, so unmounted elements are released.
pub(super) struct WeakContainer {
    inner: Weak<ContainerState>,
}

impl WeakContainer {
    pub(super) fn upgrade(&self) -> Option<HeadlessContainer> {
        self.inner.upgrade().map(|inner| HeadlessContainer { inner })
    }

    pub(super) fn is_alive(&self) -> bool {
        self.inner.strong_count() > 0
    }

    pub(super) fn points_to(&self, container: &HeadlessContainer) -> bool {
        std::ptr::eq(self.inner.as_ptr(), Rc::as_ptr(&container.inner))
    }
}

impl PartialEq for HeadlessContainer {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Debug for HeadlessContainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HeadlessContainer")
            .field("id", &self.inner.spec.id)
            .field("size", &self.inner.size.get())
            .finish_non_exhaustive()
    }
}
