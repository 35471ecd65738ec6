use std::cell::RefCell;

use web_sys::Document;

pub(crate) trait ScrollLock {
    fn lock(&self);
    fn unlock(&self);
}

/// Suspends page scrolling via `body.style.overflow` and puts back whatever
/// inline value was there before.
pub(crate) struct BodyScrollLock {
    document: Document,
    saved_overflow: RefCell<Option<String>>,
}

impl BodyScrollLock {
    pub(crate) fn new(document: Document) -> Self {
        Self {
            document,
            saved_overflow: RefCell::new(None),
        }
    }

    pub(crate) fn is_locked(&self) -> bool {
        self.saved_overflow.borrow().is_some()
    }
}

impl ScrollLock for BodyScrollLock {
    fn lock(&self) {
        if self.is_locked() {
            return;
        }
        let Some(body) = self.document.body() else {
            return;
        };
        let style = body.style();
        let previous = style.get_property_value("overflow").unwrap_or_default();
        let _ = style.set_property("overflow", "hidden");
        *self.saved_overflow.borrow_mut() = Some(previous);
    }

    fn unlock(&self) {
        let Some(previous) = self.saved_overflow.borrow_mut().take() else {
            return;
        };
        let Some(body) = self.document.body() else {
            return;
        };
        let style = body.style();
        if previous.is_empty() {
            let _ = style.remove_property("overflow");
        } else {
            let _ = style.set_property("overflow", &previous);
        }
    }
}
