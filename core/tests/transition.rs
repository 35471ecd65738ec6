use std::rc::Rc;

use photowall_core::{
    Completion, ImagePhase, ImageTransition, Lightbox, LoadOutcome, PhotoCatalog, PhotoRecord,
};

fn open_lightbox(count: usize) -> Lightbox {
    let records = (0..count)
        .map(|i| {
            PhotoRecord::new(format!("p{i}"), format!("full/{i}.jpg"))
                .with_preview(format!("thumb/{i}.jpg"))
        })
        .collect();
    let catalog = Rc::new(PhotoCatalog::new(records).expect("catalog"));
    let mut lightbox = Lightbox::new(catalog, 50.0);
    let photo = lightbox.catalog().at(0).clone();
    let effect = lightbox.open(&photo);
    let load = effect.load().expect("open load").clone();
    assert_eq!(
        lightbox.complete_load(load.generation, LoadOutcome::Loaded),
        Completion::Applied
    );
    lightbox
}

#[test]
fn navigation_fades_then_swaps_on_load() {
    let mut lightbox = open_lightbox(3);
    let effect = lightbox.next().expect("navigated");
    let load = effect.load().expect("load").clone();
    let snapshot = lightbox.snapshot();
    assert_eq!(snapshot.image_phase, ImagePhase::FadingOut);
    assert_eq!(snapshot.image_src.as_deref(), Some("full/0.jpg"));

    assert_eq!(
        lightbox.complete_load(load.generation, LoadOutcome::Loaded),
        Completion::Applied
    );
    let snapshot = lightbox.snapshot();
    assert_eq!(snapshot.image_phase, ImagePhase::Visible);
    assert_eq!(snapshot.image_src.as_deref(), Some("full/1.jpg"));
}

#[test]
fn failed_load_stays_faded_and_keeps_index() {
    let mut lightbox = open_lightbox(3);
    let load = lightbox.next().and_then(|e| e.load().cloned()).expect("load");
    assert_eq!(
        lightbox.complete_load(load.generation, LoadOutcome::Failed),
        Completion::Failed
    );
    assert_eq!(lightbox.current_index(), Some(1));
    let snapshot = lightbox.snapshot();
    assert_eq!(snapshot.image_phase, ImagePhase::Failed);
    assert_eq!(snapshot.image_src.as_deref(), Some("full/0.jpg"));
    // A repeated failure report is not a retry trigger.
    assert_eq!(
        lightbox.complete_load(load.generation, LoadOutcome::Failed),
        Completion::Stale
    );
    assert_eq!(lightbox.current_index(), Some(1));
}

#[test]
fn slow_earlier_load_cannot_clobber_later_one() {
    let mut lightbox = open_lightbox(4);
    let first = lightbox.next().and_then(|e| e.load().cloned()).expect("first");
    let second = lightbox.next().and_then(|e| e.load().cloned()).expect("second");
    assert!(second.generation != first.generation);

    assert_eq!(
        lightbox.complete_load(second.generation, LoadOutcome::Loaded),
        Completion::Applied
    );
    assert_eq!(
        lightbox.complete_load(first.generation, LoadOutcome::Loaded),
        Completion::Stale
    );
    assert_eq!(lightbox.snapshot().image_src.as_deref(), Some("full/2.jpg"));
}

#[test]
fn stale_completion_before_latest_is_dropped() {
    let mut lightbox = open_lightbox(4);
    let first = lightbox.next().and_then(|e| e.load().cloned()).expect("first");
    let _second = lightbox.next().and_then(|e| e.load().cloned()).expect("second");
    assert_eq!(
        lightbox.complete_load(first.generation, LoadOutcome::Loaded),
        Completion::Stale
    );
    let snapshot = lightbox.snapshot();
    assert_eq!(snapshot.image_phase, ImagePhase::FadingOut);
    assert_eq!(snapshot.image_src.as_deref(), Some("full/0.jpg"));
}

#[test]
fn close_invalidates_pending_load() {
    let mut lightbox = open_lightbox(3);
    let load = lightbox.next().and_then(|e| e.load().cloned()).expect("load");
    lightbox.close();
    assert_eq!(
        lightbox.complete_load(load.generation, LoadOutcome::Loaded),
        Completion::Stale
    );
}

#[test]
fn open_failure_keeps_preview_visible() {
    let mut transition = ImageTransition::new();
    let load = transition.present("thumb.jpg", "full.jpg");
    assert_eq!(transition.phase(), ImagePhase::Visible);
    assert_eq!(
        transition.complete(load.generation, LoadOutcome::Failed),
        Completion::Failed
    );
    assert_eq!(transition.phase(), ImagePhase::Visible);
    assert_eq!(transition.src(), Some("thumb.jpg"));
    assert!(!transition.is_loading());
}
