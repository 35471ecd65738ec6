use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::EventListener;
use js_sys::Reflect;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Document, Element, Event, HtmlImageElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit,
};

use photowall_core::LazyTracker;

use crate::boot::BootError;

const ATTR_DEFERRED_SRC: &str = "data-src";
const ATTR_LAZY_KEY: &str = "data-lazy-key";
const ERROR_CLASS: &str = "photo-error";
const ERROR_TEXT: &str = "Image unavailable";

type IntersectCallback = Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>;

fn lazy_key(element: &Element) -> Option<u32> {
    element.get_attribute(ATTR_LAZY_KEY)?.parse().ok()
}

/// Issues the one deferred fetch for `img`.
fn reveal(img: &Element) {
    if let Some(src) = img.get_attribute(ATTR_DEFERRED_SRC) {
        let _ = img.set_attribute("src", &src);
        let _ = img.remove_attribute(ATTR_DEFERRED_SRC);
    }
}

/// Deferred images anywhere plus every `img` under each grid selector.
/// Commas inside attribute values are not supported in `grid_selector`.
fn image_selector(grid_selector: &str) -> String {
    let mut parts = vec![format!("img[{ATTR_DEFERRED_SRC}]")];
    parts.extend(
        grid_selector
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(|part| format!("{part} img")),
    );
    parts.join(", ")
}

/// An eager image whose fetch already failed before listeners existed.
fn already_failed(img: &Element) -> bool {
    let Some(img) = img.dyn_ref::<HtmlImageElement>() else {
        return false;
    };
    !img.get_attribute("src").unwrap_or_default().is_empty()
        && img.complete()
        && img.natural_width() == 0
}

/// Hides a broken thumbnail and puts an inline indicator after it.
pub(crate) fn show_load_error(document: &Document, img: &Element) -> Result<(), JsValue> {
    img.set_attribute("hidden", "")?;
    let indicator = document.create_element("span")?;
    indicator.set_class_name(ERROR_CLASS);
    indicator.set_attribute("role", "img")?;
    indicator.set_attribute("aria-label", ERROR_TEXT)?;
    indicator.set_text_content(Some(ERROR_TEXT));
    img.after_with_node_1(&indicator)?;
    Ok(())
}

/// Deferred grid thumbnails: fetched once on first visibility, replaced by
/// an error indicator once on failure. Never retried.
pub(crate) struct LazyImages {
    observer: Option<IntersectionObserver>,
    _on_intersect: Option<IntersectCallback>,
    _error_listeners: Vec<EventListener>,
}

impl LazyImages {
    pub(crate) fn attach(
        document: &Document,
        grid_selector: &str,
        root_margin: &str,
    ) -> Result<Self, BootError> {
        let tracker = Rc::new(RefCell::new(LazyTracker::new()));
        let images = collect_images(document, &image_selector(grid_selector))?;

        let mut error_listeners = Vec::with_capacity(images.len());
        for (key, img) in images.iter().enumerate() {
            let key = key as u32;
            let _ = img.set_attribute(ATTR_LAZY_KEY, &key.to_string());
            if img.has_attribute(ATTR_DEFERRED_SRC) {
                tracker.borrow_mut().track(key);
            }
            let failed = tracker.clone();
            let target = img.clone();
            let owner = document.clone();
            let on_failure = move || {
                if !failed.borrow_mut().mark_failed(key) {
                    return;
                }
                gloo::console::warn!("thumbnail failed to load", key);
                if let Err(err) = show_load_error(&owner, &target) {
                    gloo::console::warn!("error indicator failed", crate::boot::js_err(err));
                }
            };
            if !img.has_attribute(ATTR_DEFERRED_SRC) && already_failed(img) {
                on_failure();
            }
            error_listeners.push(EventListener::new(img, "error", move |_event: &Event| {
                on_failure();
            }));
        }

        if !observer_supported() {
            gloo::console::log!("IntersectionObserver unavailable, loading thumbnails eagerly");
            let keys = tracker.borrow_mut().reveal_all();
            for img in &images {
                if lazy_key(img).is_some_and(|key| keys.contains(&key)) {
                    reveal(img);
                }
            }
            return Ok(Self {
                observer: None,
                _on_intersect: None,
                _error_listeners: error_listeners,
            });
        }

        let visible = tracker.clone();
        let on_intersect: IntersectCallback = Closure::new(
            move |entries: js_sys::Array, observer: IntersectionObserver| {
                for entry in entries.iter() {
                    let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                        continue;
                    };
                    if !entry.is_intersecting() {
                        continue;
                    }
                    let target = entry.target();
                    observer.unobserve(&target);
                    let Some(key) = lazy_key(&target) else {
                        continue;
                    };
                    if visible.borrow_mut().reveal(&key) {
                        reveal(&target);
                    }
                }
            },
        );
        let init = IntersectionObserverInit::new();
        init.set_root_margin(root_margin);
        let observer =
            IntersectionObserver::new_with_options(on_intersect.as_ref().unchecked_ref(), &init)?;
        for img in &images {
            if lazy_key(img).is_some_and(|key| tracker.borrow().is_deferred(&key)) {
                observer.observe(img);
            }
        }

        Ok(Self {
            observer: Some(observer),
            _on_intersect: Some(on_intersect),
            _error_listeners: error_listeners,
        })
    }
}

impl Drop for LazyImages {
    fn drop(&mut self) {
        if let Some(observer) = self.observer.take() {
            observer.disconnect();
        }
    }
}

fn observer_supported() -> bool {
    let Some(window) = web_sys::window() else {
        return false;
    };
    Reflect::has(&window, &JsValue::from_str("IntersectionObserver")).unwrap_or(false)
}

fn collect_images(document: &Document, selector: &str) -> Result<Vec<Element>, BootError> {
    let nodes = document.query_selector_all(selector)?;
    let mut images = Vec::with_capacity(nodes.length() as usize);
    for idx in 0..nodes.length() {
        if let Some(element) = nodes.item(idx).and_then(|node| node.dyn_into::<Element>().ok()) {
            images.push(element);
        }
    }
    Ok(images)
}
