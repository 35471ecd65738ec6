pub mod carousel;
pub mod catalog;
pub mod count;
pub mod gesture;
pub mod lazy;
pub mod transition;

pub use carousel::{CarouselState, Lightbox, LightboxEffect, LightboxSnapshot, ViewerKey};
pub use catalog::{CatalogError, PhotoCatalog, PhotoId, PhotoRecord};
pub use count::PhotoCount;
pub use gesture::{classify_swipe, SwipeIntent, SwipeTracker, SWIPE_THRESHOLD_MIN_PX};
pub use lazy::LazyTracker;
pub use transition::{Completion, ImagePhase, ImageTransition, LoadOutcome, LoadRequest};
