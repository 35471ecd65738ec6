use std::cell::RefCell;
use std::rc::{Rc, Weak};

use photowall_core::{
    Completion, Lightbox, LightboxEffect, LightboxSnapshot, LoadOutcome, LoadRequest,
    PhotoCatalog, PhotoRecord, ViewerKey,
};

use crate::image_loader::ImageLoader;
use crate::scroll_lock::ScrollLock;

pub(crate) type ViewerSubscriber = Rc<dyn Fn()>;

/// Host-owned handle to the lightbox. Wiring code receives a clone of the
/// `Rc`; there is no page-global instance.
pub(crate) struct LightboxController {
    lightbox: RefCell<Lightbox>,
    loader: Rc<dyn ImageLoader>,
    scroll_lock: Rc<dyn ScrollLock>,
    subscribers: Rc<RefCell<Vec<ViewerSubscriber>>>,
    weak_self: Weak<LightboxController>,
}

impl LightboxController {
    pub(crate) fn new(
        catalog: Rc<PhotoCatalog>,
        swipe_threshold: f32,
        loader: Rc<dyn ImageLoader>,
        scroll_lock: Rc<dyn ScrollLock>,
    ) -> Rc<Self> {
        Rc::new_cyclic(|weak_self| Self {
            lightbox: RefCell::new(Lightbox::new(catalog, swipe_threshold)),
            loader,
            scroll_lock,
            subscribers: Rc::new(RefCell::new(Vec::new())),
            weak_self: weak_self.clone(),
        })
    }

    pub(crate) fn subscribe(&self, subscriber: ViewerSubscriber) -> ViewerSubscription {
        self.subscribers.borrow_mut().push(subscriber.clone());
        ViewerSubscription {
            subscriber,
            subscribers: Rc::clone(&self.subscribers),
        }
    }

    pub(crate) fn snapshot(&self) -> LightboxSnapshot {
        self.lightbox.borrow().snapshot()
    }

    pub(crate) fn catalog(&self) -> Rc<PhotoCatalog> {
        self.lightbox.borrow().catalog().clone()
    }

    pub(crate) fn is_open(&self) -> bool {
        self.lightbox.borrow().is_open()
    }

    #[cfg(test)]
    pub(crate) fn current_index(&self) -> Option<usize> {
        self.lightbox.borrow().current_index()
    }

    pub(crate) fn open(&self, photo: &PhotoRecord) {
        let effect = self.lightbox.borrow_mut().open(photo);
        gloo::console::log!("lightbox open", photo.id.to_string());
        self.apply(Some(effect));
    }

    pub(crate) fn close(&self) {
        let effect = self.lightbox.borrow_mut().close();
        self.apply(effect);
    }

    pub(crate) fn next(&self) {
        let effect = self.lightbox.borrow_mut().next();
        self.apply(effect);
    }

    pub(crate) fn previous(&self) {
        let effect = self.lightbox.borrow_mut().previous();
        self.apply(effect);
    }

    /// Returns whether the key was consumed.
    pub(crate) fn handle_key(&self, key: &str) -> bool {
        let Some(key) = ViewerKey::from_key(key) else {
            return false;
        };
        let effect = self.lightbox.borrow_mut().handle_key(key);
        let consumed = effect.is_some();
        self.apply(effect);
        consumed
    }

    pub(crate) fn touch_start(&self, x: f32, y: f32) {
        self.lightbox.borrow_mut().touch_start(x, y);
    }

    pub(crate) fn touch_move(&self, x: f32, y: f32) {
        self.lightbox.borrow_mut().touch_move(x, y);
    }

    pub(crate) fn touch_end(&self, end: Option<(f32, f32)>) {
        let effect = self.lightbox.borrow_mut().touch_end(end);
        self.apply(effect);
    }

    pub(crate) fn touch_cancel(&self) {
        self.lightbox.borrow_mut().touch_cancel();
    }

    pub(crate) fn complete_load(&self, generation: u64, outcome: LoadOutcome) {
        let completion = self.lightbox.borrow_mut().complete_load(generation, outcome);
        match completion {
            Completion::Applied => {}
            Completion::Failed => {
                gloo::console::warn!("lightbox image failed to load", generation);
            }
            Completion::Stale => {
                gloo::console::log!("lightbox load dropped (stale)", generation);
                return;
            }
        }
        self.notify();
    }

    fn apply(&self, effect: Option<LightboxEffect>) {
        let Some(effect) = effect else {
            return;
        };
        match &effect {
            LightboxEffect::Open { load } => {
                self.scroll_lock.lock();
                self.start_load(load.clone());
            }
            LightboxEffect::Show { load } => {
                self.start_load(load.clone());
            }
            LightboxEffect::Close => {
                self.scroll_lock.unlock();
                gloo::console::log!("lightbox closed");
            }
        }
        self.notify();
    }

    fn start_load(&self, load: LoadRequest) {
        let controller = self.weak_self.clone();
        let generation = load.generation;
        self.loader.load(
            &load.src,
            Box::new(move |outcome| {
                if let Some(controller) = controller.upgrade() {
                    controller.complete_load(generation, outcome);
                }
            }),
        );
    }

    fn notify(&self) {
        let subscribers = self.subscribers.borrow().clone();
        for subscriber in subscribers {
            (subscriber)();
        }
    }
}

pub(crate) struct ViewerSubscription {
    subscriber: ViewerSubscriber,
    subscribers: Rc<RefCell<Vec<ViewerSubscriber>>>,
}

impl Drop for ViewerSubscription {
    fn drop(&mut self) {
        let mut subscribers = self.subscribers.borrow_mut();
        subscribers.retain(|item| !Rc::ptr_eq(item, &self.subscriber));
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::cell::Cell;
    use wasm_bindgen_test::*;

    use photowall_core::ImagePhase;

    wasm_bindgen_test_configure!(run_in_browser);

    type PendingLoad = (String, Box<dyn FnOnce(LoadOutcome)>);

    #[derive(Default)]
    pub(crate) struct ManualLoader {
        pending: RefCell<Vec<PendingLoad>>,
    }

    impl ManualLoader {
        pub(crate) fn pending_srcs(&self) -> Vec<String> {
            self.pending.borrow().iter().map(|(src, _)| src.clone()).collect()
        }

        pub(crate) fn finish(&self, index: usize, outcome: LoadOutcome) {
            let (_, done) = self.pending.borrow_mut().remove(index);
            done(outcome);
        }
    }

    impl ImageLoader for ManualLoader {
        fn load(&self, src: &str, done: Box<dyn FnOnce(LoadOutcome)>) {
            self.pending.borrow_mut().push((src.to_string(), done));
        }
    }

    #[derive(Default)]
    pub(crate) struct CountingScrollLock {
        pub(crate) locked: Cell<bool>,
        pub(crate) unlocks: Cell<u32>,
    }

    impl ScrollLock for CountingScrollLock {
        fn lock(&self) {
            self.locked.set(true);
        }

        fn unlock(&self) {
            self.locked.set(false);
            self.unlocks.set(self.unlocks.get() + 1);
        }
    }

    pub(crate) fn build(
        count: usize,
    ) -> (Rc<LightboxController>, Rc<ManualLoader>, Rc<CountingScrollLock>) {
        let records = (0..count)
            .map(|i| {
                PhotoRecord::new(format!("p{i}"), format!("full/{i}.jpg"))
                    .with_preview(format!("thumb/{i}.jpg"))
            })
            .collect();
        let catalog = Rc::new(PhotoCatalog::new(records).expect("catalog"));
        let loader = Rc::new(ManualLoader::default());
        let scroll = Rc::new(CountingScrollLock::default());
        let controller = LightboxController::new(catalog, 50.0, loader.clone(), scroll.clone());
        (controller, loader, scroll)
    }

    #[wasm_bindgen_test]
    fn open_locks_scroll_and_close_restores_it() {
        let (controller, _loader, scroll) = build(3);
        let photo = controller.catalog().at(1).clone();
        controller.open(&photo);
        assert!(scroll.locked.get());
        controller.close();
        controller.close();
        assert!(!scroll.locked.get());
        assert_eq!(scroll.unlocks.get(), 1);
    }

    #[wasm_bindgen_test]
    fn out_of_order_completions_keep_latest_image() {
        let (controller, loader, _scroll) = build(4);
        let photo = controller.catalog().at(0).clone();
        controller.open(&photo);
        loader.finish(0, LoadOutcome::Loaded);
        controller.next();
        controller.next();
        assert_eq!(loader.pending_srcs(), vec!["full/1.jpg", "full/2.jpg"]);

        loader.finish(1, LoadOutcome::Loaded);
        loader.finish(0, LoadOutcome::Loaded);
        let snapshot = controller.snapshot();
        assert_eq!(snapshot.image_src.as_deref(), Some("full/2.jpg"));
        assert_eq!(snapshot.image_phase, ImagePhase::Visible);
        assert_eq!(controller.current_index(), Some(2));
    }

    #[wasm_bindgen_test]
    fn load_failure_does_not_retry_or_advance() {
        let (controller, loader, _scroll) = build(3);
        let photo = controller.catalog().at(0).clone();
        controller.open(&photo);
        loader.finish(0, LoadOutcome::Loaded);
        controller.next();
        loader.finish(0, LoadOutcome::Failed);
        assert!(loader.pending_srcs().is_empty());
        assert_eq!(controller.current_index(), Some(1));
        assert_eq!(controller.snapshot().image_phase, ImagePhase::Failed);
    }

    #[wasm_bindgen_test]
    fn keys_only_count_while_open() {
        let (controller, _loader, _scroll) = build(3);
        assert!(!controller.handle_key("ArrowRight"));
        assert_eq!(controller.current_index(), None);
        let photo = controller.catalog().at(0).clone();
        controller.open(&photo);
        assert!(controller.handle_key("ArrowRight"));
        assert_eq!(controller.current_index(), Some(1));
        assert!(!controller.handle_key("Tab"));
        assert!(controller.handle_key("Escape"));
        assert!(!controller.is_open());
    }

    #[wasm_bindgen_test]
    fn subscribers_hear_changes_until_dropped() {
        let (controller, _loader, _scroll) = build(2);
        let hits = Rc::new(Cell::new(0u32));
        let counter = hits.clone();
        let subscription = controller.subscribe(Rc::new(move || counter.set(counter.get() + 1)));
        let photo = controller.catalog().at(0).clone();
        controller.open(&photo);
        controller.next();
        assert_eq!(hits.get(), 2);
        drop(subscription);
        controller.close();
        assert_eq!(hits.get(), 2);
    }
}
