use std::rc::Rc;

use wasm_bindgen::JsValue;
use web_sys::{Element, MouseEvent};
use yew::prelude::*;

use photowall_core::{ImagePhase, LightboxSnapshot};

use crate::controller::LightboxController;

#[derive(Properties)]
pub(crate) struct LightboxViewProps {
    pub(crate) controller: Rc<LightboxController>,
}

impl PartialEq for LightboxViewProps {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.controller, &other.controller)
    }
}

fn phase_class(phase: ImagePhase) -> Option<&'static str> {
    match phase {
        ImagePhase::Empty => None,
        ImagePhase::Visible => Some("is-visible"),
        ImagePhase::FadingOut => Some("is-fading"),
        ImagePhase::Failed => Some("is-failed"),
    }
}

fn controller_callback(
    controller: &Rc<LightboxController>,
    action: fn(&LightboxController),
) -> Callback<MouseEvent> {
    let controller = controller.clone();
    Callback::from(move |event: MouseEvent| {
        event.stop_propagation();
        action(&controller);
    })
}

fn render_caption(snapshot: &LightboxSnapshot) -> Html {
    let Some(photo) = snapshot.photo.as_ref() else {
        return html! {};
    };
    let attribution = photo.attribution_name.as_ref().map(|name| {
        html! { <span class="lightbox-attribution">{ format!("by {name}") }</span> }
    });
    let timestamp = photo.display_timestamp.as_ref().map(|stamp| {
        html! { <time class="lightbox-timestamp">{ stamp.clone() }</time> }
    });
    html! {
        <figcaption class="lightbox-caption">
            <span class="lightbox-caption-text">{ photo.caption.clone() }</span>
            { for attribution }
            { for timestamp }
        </figcaption>
    }
}

#[function_component(LightboxView)]
pub(crate) fn lightbox_view(props: &LightboxViewProps) -> Html {
    let controller = props.controller.clone();
    let snapshot = use_state(|| controller.snapshot());

    {
        let snapshot = snapshot.clone();
        let controller = controller.clone();
        use_effect_with((), move |_| {
            let source = controller.clone();
            snapshot.set(controller.snapshot());
            let refreshed = snapshot.clone();
            let subscription = controller.subscribe(Rc::new(move || {
                refreshed.set(source.snapshot());
            }));
            move || drop(subscription)
        });
    }

    if !snapshot.is_open {
        return html! {};
    }

    let on_backdrop = {
        let controller = controller.clone();
        Callback::from(move |event: MouseEvent| {
            let on_backdrop = match (event.target(), event.current_target()) {
                (Some(target), Some(current)) => {
                    JsValue::from(target) == JsValue::from(current)
                }
                _ => false,
            };
            if on_backdrop {
                controller.close();
            }
        })
    };
    let on_close = controller_callback(&controller, LightboxController::close);
    let on_previous = controller_callback(&controller, LightboxController::previous);
    let on_next = controller_callback(&controller, LightboxController::next);

    let caption = snapshot
        .photo
        .as_ref()
        .map(|photo| photo.caption.clone())
        .unwrap_or_default();
    let image = snapshot.image_src.as_ref().map(|src| {
        html! {
            <img
                class={classes!("lightbox-image", phase_class(snapshot.image_phase))}
                src={src.clone()}
                alt={caption.clone()}
            />
        }
    });
    let navigation = snapshot.has_navigation.then(|| {
        html! {
            <>
                <button
                    type="button"
                    class="lightbox-nav lightbox-prev"
                    aria-label="Previous photo"
                    onclick={on_previous}
                >{ "‹" }</button>
                <button
                    type="button"
                    class="lightbox-nav lightbox-next"
                    aria-label="Next photo"
                    onclick={on_next}
                >{ "›" }</button>
            </>
        }
    });
    let position = snapshot.position_label().map(|label| {
        html! { <span class="lightbox-position">{ label }</span> }
    });

    html! {
        <div
            class="lightbox is-open"
            role="dialog"
            aria-modal="true"
            onclick={on_backdrop}
        >
            <button
                type="button"
                class="lightbox-close"
                aria-label="Close"
                onclick={on_close}
            >{ "×" }</button>
            { for navigation }
            <figure class="lightbox-figure">
                { for image }
                { render_caption(&snapshot) }
            </figure>
            { for position }
        </div>
    }
}

pub(crate) fn mount(root: Element, controller: Rc<LightboxController>) {
    let _app_handle =
        yew::Renderer::<LightboxView>::with_root_and_props(root, LightboxViewProps { controller })
            .render();
}
