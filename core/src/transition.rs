/// A background image fetch the host must perform and report back on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadRequest {
    pub generation: u64,
    pub src: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded,
    Failed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImagePhase {
    Empty,
    Visible,
    FadingOut,
    Failed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Completion {
    Applied,
    Failed,
    Stale,
}

#[derive(Clone, Debug)]
struct PendingLoad {
    src: String,
    // Open-time loads swap silently over the preview; a failure keeps it.
    keep_on_failure: bool,
}

/// Cross-fade state for the lightbox image.
///
/// Each request bumps `generation`; completions carrying an older generation
/// are stale and ignored. There is no real cancellation.
#[derive(Clone, Debug)]
pub struct ImageTransition {
    generation: u64,
    src: Option<String>,
    phase: ImagePhase,
    pending: Option<PendingLoad>,
}

impl ImageTransition {
    pub fn new() -> Self {
        Self {
            generation: 0,
            src: None,
            phase: ImagePhase::Empty,
            pending: None,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn src(&self) -> Option<&str> {
        self.src.as_deref()
    }

    pub fn phase(&self) -> ImagePhase {
        self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    /// Shows `preview` right away and requests `full` in the background.
    pub fn present(&mut self, preview: &str, full: &str) -> LoadRequest {
        self.src = Some(preview.to_string());
        self.phase = ImagePhase::Visible;
        self.request(full, true)
    }

    /// Fades the current image out and requests `full`.
    pub fn advance(&mut self, full: &str) -> LoadRequest {
        self.phase = ImagePhase::FadingOut;
        self.request(full, false)
    }

    pub fn complete(&mut self, generation: u64, outcome: LoadOutcome) -> Completion {
        if generation != self.generation {
            return Completion::Stale;
        }
        let Some(pending) = self.pending.take() else {
            return Completion::Stale;
        };
        match outcome {
            LoadOutcome::Loaded => {
                self.src = Some(pending.src);
                self.phase = ImagePhase::Visible;
                Completion::Applied
            }
            LoadOutcome::Failed => {
                if !pending.keep_on_failure {
                    self.phase = ImagePhase::Failed;
                }
                Completion::Failed
            }
        }
    }

    /// Drops any in-flight request so its completion is treated as stale.
    pub fn invalidate(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.pending = None;
    }

    fn request(&mut self, full: &str, keep_on_failure: bool) -> LoadRequest {
        self.generation = self.generation.wrapping_add(1);
        self.pending = Some(PendingLoad {
            src: full.to_string(),
            keep_on_failure,
        });
        LoadRequest {
            generation: self.generation,
            src: full.to_string(),
        }
    }
}

impl Default for ImageTransition {
    fn default() -> Self {
        Self::new()
    }
}
