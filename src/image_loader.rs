use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{Event, HtmlImageElement};

use photowall_core::LoadOutcome;

/// Background image fetch. `done` runs on a later turn of the event loop.
pub(crate) trait ImageLoader {
    fn load(&self, src: &str, done: Box<dyn FnOnce(LoadOutcome)>);
}

/// Loads through a detached `<img>` so the browser cache is warm when the
/// visible element switches to the same source.
pub(crate) struct HtmlImageLoader;

impl ImageLoader for HtmlImageLoader {
    fn load(&self, src: &str, done: Box<dyn FnOnce(LoadOutcome)>) {
        let promise = image_promise(src);
        spawn_local(async move {
            let outcome = match promise {
                Ok(promise) => match JsFuture::from(promise).await {
                    Ok(_) => LoadOutcome::Loaded,
                    Err(_) => LoadOutcome::Failed,
                },
                Err(err) => {
                    gloo::console::warn!("image element unavailable", crate::boot::js_err(err));
                    LoadOutcome::Failed
                }
            };
            done(outcome);
        });
    }
}

fn image_promise(src: &str) -> Result<js_sys::Promise, JsValue> {
    let img = HtmlImageElement::new()?;
    let src = src.to_string();
    Ok(js_sys::Promise::new(&mut |resolve, reject| {
        let on_load = Closure::once(move |_event: Event| {
            let _ = resolve.call0(&JsValue::NULL);
        });
        let failed_src = src.clone();
        let on_error = Closure::once(move |_event: Event| {
            let _ = reject.call1(&JsValue::NULL, &JsValue::from_str(&failed_src));
        });
        img.set_onload(Some(on_load.as_ref().unchecked_ref()));
        img.set_onerror(Some(on_error.as_ref().unchecked_ref()));
        img.set_src(&src);
        on_load.forget();
        on_error.forget();
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    const PIXEL_GIF: &str =
        "data:image/gif;base64,R0lGODlhAQABAIAAAAAAAP///ywAAAAAAQABAAACAUwAOw==";

    async fn load_outcome(src: &str) -> LoadOutcome {
        let result = Rc::new(Cell::new(None));
        let slot = result.clone();
        let (sender, receiver) = futures_channel(slot);
        HtmlImageLoader.load(src, Box::new(sender));
        let _ = receiver.await;
        result.get().expect("completed")
    }

    fn futures_channel(
        slot: Rc<Cell<Option<LoadOutcome>>>,
    ) -> (impl FnOnce(LoadOutcome), JsFuture) {
        let mut resolve_slot: Option<js_sys::Function> = None;
        let promise = js_sys::Promise::new(&mut |resolve, _reject| {
            resolve_slot = Some(resolve);
        });
        let sender = move |outcome: LoadOutcome| {
            slot.set(Some(outcome));
            if let Some(resolve) = resolve_slot {
                let _ = resolve.call0(&JsValue::NULL);
            }
        };
        (sender, JsFuture::from(promise))
    }

    #[wasm_bindgen_test(async)]
    async fn completion_never_runs_inside_load() {
        let result = Rc::new(Cell::new(None));
        let (sender, receiver) = futures_channel(result.clone());
        HtmlImageLoader.load(PIXEL_GIF, Box::new(sender));
        assert_eq!(result.get(), None);
        let _ = receiver.await;
        assert_eq!(result.get(), Some(LoadOutcome::Loaded));
    }

    #[wasm_bindgen_test(async)]
    async fn data_url_loads() {
        assert_eq!(load_outcome(PIXEL_GIF).await, LoadOutcome::Loaded);
    }

    #[wasm_bindgen_test(async)]
    async fn garbage_source_fails() {
        let outcome = load_outcome("data:image/png;base64,bm90LWFuLWltYWdl").await;
        assert_eq!(outcome, LoadOutcome::Failed);
    }
}
