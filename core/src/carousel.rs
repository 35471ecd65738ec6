use std::rc::Rc;

use crate::catalog::{PhotoCatalog, PhotoRecord};
use crate::gesture::{SwipeIntent, SwipeTracker};
use crate::transition::{Completion, ImagePhase, ImageTransition, LoadOutcome, LoadRequest};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewerKey {
    Escape,
    ArrowLeft,
    ArrowRight,
}

impl ViewerKey {
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "Escape" | "Esc" => Some(ViewerKey::Escape),
            "ArrowLeft" | "Left" => Some(ViewerKey::ArrowLeft),
            "ArrowRight" | "Right" => Some(ViewerKey::ArrowRight),
            _ => None,
        }
    }
}

/// What the host must do after a state change.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LightboxEffect {
    /// Present the overlay, lock page scroll and start `load`.
    Open { load: LoadRequest },
    /// Hide the overlay and restore page scroll.
    Close,
    /// Start `load` for the newly selected photo.
    Show { load: LoadRequest },
}

impl LightboxEffect {
    pub fn load(&self) -> Option<&LoadRequest> {
        match self {
            LightboxEffect::Open { load } | LightboxEffect::Show { load } => Some(load),
            LightboxEffect::Close => None,
        }
    }
}

#[derive(Clone, Debug)]
pub struct CarouselState {
    current_index: Option<usize>,
    is_open: bool,
    pending_gesture: SwipeTracker,
}

impl CarouselState {
    fn new(swipe_threshold: f32) -> Self {
        Self {
            current_index: None,
            is_open: false,
            pending_gesture: SwipeTracker::new(swipe_threshold),
        }
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current_index
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn pending_gesture(&self) -> &SwipeTracker {
        &self.pending_gesture
    }
}

/// Read model for the overlay.
#[derive(Clone, Debug, PartialEq)]
pub struct LightboxSnapshot {
    pub is_open: bool,
    pub current_index: Option<usize>,
    pub total: usize,
    pub photo: Option<PhotoRecord>,
    pub image_src: Option<String>,
    pub image_phase: ImagePhase,
    pub has_navigation: bool,
    /// False while showing a photo that was opened from outside the catalog.
    pub in_catalog: bool,
}

impl LightboxSnapshot {
    /// `k / N` for catalog photos; `None` for an ad-hoc open.
    pub fn position_label(&self) -> Option<String> {
        if !self.in_catalog {
            return None;
        }
        let index = self.current_index?;
        Some(format!("{} / {}", index + 1, self.total))
    }
}

/// Lightbox navigation state over a shared catalog.
pub struct Lightbox {
    catalog: Rc<PhotoCatalog>,
    state: CarouselState,
    transition: ImageTransition,
    shown: Option<PhotoRecord>,
    shown_in_catalog: bool,
}

impl Lightbox {
    pub fn new(catalog: Rc<PhotoCatalog>, swipe_threshold: f32) -> Self {
        Self {
            catalog,
            state: CarouselState::new(swipe_threshold),
            transition: ImageTransition::new(),
            shown: None,
            shown_in_catalog: false,
        }
    }

    pub fn catalog(&self) -> &Rc<PhotoCatalog> {
        &self.catalog
    }

    pub fn state(&self) -> &CarouselState {
        &self.state
    }

    pub fn current_index(&self) -> Option<usize> {
        self.state.current_index
    }

    pub fn is_open(&self) -> bool {
        self.state.is_open
    }

    pub fn generation(&self) -> u64 {
        self.transition.generation()
    }

    /// Opens on `photo`. A photo missing from the catalog is still shown
    /// from its own fields; navigation then starts from index 0.
    pub fn open(&mut self, photo: &PhotoRecord) -> LightboxEffect {
        let resolved = self.catalog.index_of(&photo.id);
        self.state.current_index = if self.catalog.is_empty() {
            None
        } else {
            Some(resolved.unwrap_or(0))
        };
        self.shown_in_catalog = resolved.is_some();
        self.state.is_open = true;
        self.state.pending_gesture.reset();
        self.shown = Some(photo.clone());
        let load = self
            .transition
            .present(photo.preview_src(), &photo.display_url);
        LightboxEffect::Open { load }
    }

    pub fn close(&mut self) -> Option<LightboxEffect> {
        if !self.state.is_open {
            return None;
        }
        self.state.is_open = false;
        self.state.pending_gesture.reset();
        self.transition.invalidate();
        Some(LightboxEffect::Close)
    }

    pub fn next(&mut self) -> Option<LightboxEffect> {
        self.step(true)
    }

    pub fn previous(&mut self) -> Option<LightboxEffect> {
        self.step(false)
    }

    pub fn handle_key(&mut self, key: ViewerKey) -> Option<LightboxEffect> {
        if !self.state.is_open {
            return None;
        }
        match key {
            ViewerKey::Escape => self.close(),
            ViewerKey::ArrowLeft => self.previous(),
            ViewerKey::ArrowRight => self.next(),
        }
    }

    pub fn touch_start(&mut self, x: f32, y: f32) {
        if !self.state.is_open {
            return;
        }
        self.state.pending_gesture.arm(x, y);
    }

    pub fn touch_move(&mut self, x: f32, y: f32) {
        if !self.state.is_open {
            return;
        }
        self.state.pending_gesture.update(x, y);
    }

    pub fn touch_end(&mut self, end: Option<(f32, f32)>) -> Option<LightboxEffect> {
        let intent = self.state.pending_gesture.finish(end);
        if !self.state.is_open {
            return None;
        }
        match intent? {
            SwipeIntent::Previous => self.previous(),
            SwipeIntent::Next => self.next(),
        }
    }

    pub fn touch_cancel(&mut self) {
        self.state.pending_gesture.reset();
    }

    /// Applies a load result; never touches `current_index`.
    pub fn complete_load(&mut self, generation: u64, outcome: LoadOutcome) -> Completion {
        self.transition.complete(generation, outcome)
    }

    pub fn snapshot(&self) -> LightboxSnapshot {
        LightboxSnapshot {
            is_open: self.state.is_open,
            current_index: self.state.current_index,
            total: self.catalog.size(),
            photo: self.shown.clone(),
            image_src: self.transition.src().map(str::to_string),
            image_phase: self.transition.phase(),
            has_navigation: self.catalog.size() > 1,
            in_catalog: self.shown_in_catalog,
        }
    }

    fn step(&mut self, forward: bool) -> Option<LightboxEffect> {
        if !self.state.is_open {
            return None;
        }
        let size = self.catalog.size();
        let current = self.state.current_index?;
        if size == 0 {
            return None;
        }
        let target = if forward {
            (current + 1) % size
        } else {
            (current + size - 1) % size
        };
        self.state.current_index = Some(target);
        let record = self.catalog.at(target).clone();
        let load = self.transition.advance(&record.display_url);
        self.shown = Some(record);
        self.shown_in_catalog = true;
        Some(LightboxEffect::Show { load })
    }
}
