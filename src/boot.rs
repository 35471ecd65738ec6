use std::rc::Rc;

use wasm_bindgen::JsValue;
use web_sys::{Document, Element};

use photowall_core::{PhotoCatalog, PhotoCount};

use crate::config::{ViewerConfig, CONFIG_SCRIPT_ID, PHOTO_DATA_SCRIPT_ID};
use crate::controller::LightboxController;
use crate::grid::GridBinding;
use crate::image_loader::HtmlImageLoader;
use crate::input::ViewerInput;
use crate::lazy_images::LazyImages;
use crate::scroll_lock::BodyScrollLock;
use crate::view;

#[derive(Debug, thiserror::Error)]
pub(crate) enum BootError {
    #[error("window is not available")]
    NoWindow,
    #[error("document is not available")]
    NoDocument,
    #[error("missing element #{0}")]
    MissingElement(String),
    #[error("dom call failed: {0}")]
    Dom(String),
}

impl From<JsValue> for BootError {
    fn from(value: JsValue) -> Self {
        BootError::Dom(js_err(value))
    }
}

pub(crate) fn js_err(error: JsValue) -> String {
    if let Some(value) = error.as_string() {
        return value;
    }
    if let Ok(json) = js_sys::JSON::stringify(&error) {
        if let Some(value) = json.as_string() {
            return value;
        }
    }
    "js error".to_string()
}

/// Lightbox wiring. Dropping it detaches every listener.
pub(crate) struct Viewer {
    _controller: Rc<LightboxController>,
    _grid: GridBinding,
    _input: ViewerInput,
}

/// Everything started on the page. Lazy thumbnails run even when the
/// lightbox could not be wired.
#[allow(dead_code)]
pub(crate) struct Page {
    pub(crate) lazy: Option<LazyImages>,
    pub(crate) viewer: Option<Viewer>,
}

pub(crate) fn document() -> Result<Document, BootError> {
    let window = web_sys::window().ok_or(BootError::NoWindow)?;
    window.document().ok_or(BootError::NoDocument)
}

/// Text content of an embedded `<script type="application/json">`, if any.
pub(crate) fn embedded_json(document: &Document, id: &str) -> Option<String> {
    let element = document.get_element_by_id(id)?;
    element.text_content()
}

pub(crate) fn load_catalog(document: &Document) -> PhotoCatalog {
    let Some(raw) = embedded_json(document, PHOTO_DATA_SCRIPT_ID) else {
        return PhotoCatalog::empty();
    };
    match PhotoCatalog::from_json(&raw) {
        Ok(catalog) => catalog,
        Err(err) => {
            gloo::console::warn!("photo data rejected", err.to_string());
            PhotoCatalog::empty()
        }
    }
}

pub(crate) fn load_config(document: &Document) -> ViewerConfig {
    let Some(raw) = embedded_json(document, CONFIG_SCRIPT_ID) else {
        return ViewerConfig::default();
    };
    match ViewerConfig::from_json(&raw) {
        Ok(config) => config,
        Err(err) => {
            gloo::console::warn!("viewer config rejected", err.to_string());
            ViewerConfig::default()
        }
    }
}

pub(crate) fn update_count_indicator(document: &Document, id: &str, count: PhotoCount) {
    if let Some(element) = document.get_element_by_id(id) {
        element.set_text_content(Some(&count.to_string()));
    }
}

pub(crate) fn start() -> Result<Page, BootError> {
    let document = document()?;
    let config = load_config(&document);

    let lazy = match LazyImages::attach(
        &document,
        &config.grid_selector,
        &config.lazy_root_margin,
    ) {
        Ok(lazy) => Some(lazy),
        Err(err) => {
            gloo::console::warn!("lazy thumbnails disabled", err.to_string());
            None
        }
    };

    let catalog = Rc::new(load_catalog(&document));
    gloo::console::log!("photowall: catalog loaded", catalog.size());
    update_count_indicator(
        &document,
        &config.count_indicator_id,
        PhotoCount::all(catalog.size()),
    );

    let viewer = match start_viewer(&document, &config, catalog) {
        Ok(viewer) => Some(viewer),
        Err(err) => {
            gloo::console::error!("lightbox disabled", err.to_string());
            None
        }
    };

    Ok(Page { lazy, viewer })
}

fn start_viewer(
    document: &Document,
    config: &ViewerConfig,
    catalog: Rc<PhotoCatalog>,
) -> Result<Viewer, BootError> {
    let root: Element = document
        .get_element_by_id(&config.lightbox_root_id)
        .ok_or_else(|| BootError::MissingElement(config.lightbox_root_id.clone()))?;

    let controller = LightboxController::new(
        catalog,
        config.swipe_threshold_px,
        Rc::new(HtmlImageLoader),
        Rc::new(BodyScrollLock::new(document.clone())),
    );
    view::mount(root.clone(), controller.clone());

    let grid = GridBinding::attach(document, &config.grid_selector, controller.clone())?;
    let input = ViewerInput::attach(&root, controller.clone())?;

    Ok(Viewer {
        _controller: controller,
        _grid: grid,
        _input: input,
    })
}
