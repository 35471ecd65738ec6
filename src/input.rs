use std::rc::Rc;

use gloo::events::{EventListener, EventListenerOptions, EventListenerPhase};
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, KeyboardEvent, TouchEvent};

use crate::boot::BootError;
use crate::controller::LightboxController;

/// First changed touch, in client coordinates.
pub(crate) fn changed_touch_point(event: &TouchEvent) -> Option<(f32, f32)> {
    let touch = event.changed_touches().item(0)?;
    Some((touch.client_x() as f32, touch.client_y() as f32))
}

/// Keyboard and touch listeners for an open lightbox. Dropping detaches.
pub(crate) struct ViewerInput {
    _listeners: Vec<EventListener>,
}

impl ViewerInput {
    pub(crate) fn attach(
        root: &Element,
        controller: Rc<LightboxController>,
    ) -> Result<Self, BootError> {
        let window = web_sys::window().ok_or(BootError::NoWindow)?;
        let mut listeners = Vec::with_capacity(5);

        let key_controller = controller.clone();
        listeners.push(EventListener::new_with_options(
            &window,
            "keydown",
            EventListenerOptions {
                phase: EventListenerPhase::Capture,
                passive: false,
            },
            move |event: &Event| {
                if !key_controller.is_open() {
                    return;
                }
                let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                    return;
                };
                if event.alt_key() || event.ctrl_key() || event.meta_key() {
                    return;
                }
                if key_controller.handle_key(&event.key()) {
                    event.prevent_default();
                }
            },
        ));

        let passive = EventListenerOptions {
            phase: EventListenerPhase::Bubble,
            passive: true,
        };

        let start_controller = controller.clone();
        listeners.push(EventListener::new_with_options(
            root,
            "touchstart",
            passive,
            move |event: &Event| {
                if let Some((x, y)) = event.dyn_ref::<TouchEvent>().and_then(changed_touch_point) {
                    start_controller.touch_start(x, y);
                }
            },
        ));

        let move_controller = controller.clone();
        listeners.push(EventListener::new_with_options(
            root,
            "touchmove",
            passive,
            move |event: &Event| {
                if let Some((x, y)) = event.dyn_ref::<TouchEvent>().and_then(changed_touch_point) {
                    move_controller.touch_move(x, y);
                }
            },
        ));

        let end_controller = controller.clone();
        listeners.push(EventListener::new_with_options(
            root,
            "touchend",
            passive,
            move |event: &Event| {
                let end = event.dyn_ref::<TouchEvent>().and_then(changed_touch_point);
                end_controller.touch_end(end);
            },
        ));

        let cancel_controller = controller;
        listeners.push(EventListener::new_with_options(
            root,
            "touchcancel",
            passive,
            move |_event: &Event| {
                cancel_controller.touch_cancel();
            },
        ));

        Ok(Self {
            _listeners: listeners,
        })
    }
}
