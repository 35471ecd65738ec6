use std::rc::Rc;

use gloo::events::EventListener;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event};

use photowall_core::{PhotoCatalog, PhotoRecord};

use crate::boot::BootError;
use crate::controller::LightboxController;

const ATTR_PHOTO_ID: &str = "data-photo-id";
const ATTR_DISPLAY_URL: &str = "data-display-url";
const ATTR_PREVIEW_URL: &str = "data-preview-url";
const ATTR_CAPTION: &str = "data-caption";
const ATTR_ATTRIBUTION: &str = "data-attribution";
const ATTR_TIMESTAMP: &str = "data-timestamp";

fn attr(element: &Element, name: &str) -> Option<String> {
    let value = element.get_attribute(name)?;
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

fn thumbnail_src(element: &Element) -> Option<String> {
    let img = element.query_selector("img").ok().flatten()?;
    attr(&img, "src").or_else(|| attr(&img, "data-src"))
}

/// Builds a displayable record from server-rendered thumbnail markup, so a
/// photo outside the catalog can still be opened.
pub(crate) fn record_from_markup(element: &Element) -> Option<PhotoRecord> {
    let id = attr(element, ATTR_PHOTO_ID)?;
    let thumb = thumbnail_src(element);
    let display_url = attr(element, ATTR_DISPLAY_URL).or_else(|| thumb.clone())?;
    let mut record = PhotoRecord::new(id, display_url);
    record.preview_url = attr(element, ATTR_PREVIEW_URL).or(thumb);
    record.caption = attr(element, ATTR_CAPTION).unwrap_or_default();
    record.attribution_name = attr(element, ATTR_ATTRIBUTION);
    record.display_timestamp = attr(element, ATTR_TIMESTAMP);
    Some(record)
}

/// Catalog entry for the markup's id when there is one, else the markup.
pub(crate) fn resolve_open_request(catalog: &PhotoCatalog, record: PhotoRecord) -> PhotoRecord {
    catalog
        .index_of(&record.id)
        .map(|index| catalog.at(index).clone())
        .unwrap_or(record)
}

/// Click handlers on pre-rendered grid thumbnails.
pub(crate) struct GridBinding {
    _listeners: Vec<EventListener>,
}

impl GridBinding {
    pub(crate) fn attach(
        document: &Document,
        selector: &str,
        controller: Rc<LightboxController>,
    ) -> Result<Self, BootError> {
        let nodes = document.query_selector_all(selector)?;
        let mut listeners = Vec::with_capacity(nodes.length() as usize);
        for idx in 0..nodes.length() {
            let Some(element) = nodes.item(idx).and_then(|node| node.dyn_into::<Element>().ok())
            else {
                continue;
            };
            listeners.push(Self::bind(&element, controller.clone()));
        }
        Ok(Self {
            _listeners: listeners,
        })
    }

    pub(crate) fn bind(element: &Element, controller: Rc<LightboxController>) -> EventListener {
        let target = element.clone();
        EventListener::new(element, "click", move |event: &Event| {
            let Some(record) = record_from_markup(&target) else {
                gloo::console::warn!("thumbnail without photo data");
                return;
            };
            event.prevent_default();
            let record = resolve_open_request(&controller.catalog(), record);
            controller.open(&record);
        })
    }
}
