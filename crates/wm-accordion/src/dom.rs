//! DOM-backed disclosure host
//!
//! Items are `<details>` elements; bodies are animated with the Web
//! Animations API. Completion is routed back into the shared controller
//! through a weak reference so a dropped accordion never keeps itself alive.

use std::cell::RefCell;
use std::rc::Weak;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Animation, HtmlDetailsElement, HtmlElement, Window};

use crate::controller::{AccordionController, DisclosureHost, ItemId, TransitionToken};
use crate::transition::{BodyFrame, BodyTransition};

const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";

/// Inline properties written while a body is animating
const TRANSITION_PROPERTIES: [&str; 4] = ["overflow", "height", "opacity", "transform"];

/// One `<details>` element and its optional body region
pub struct DomItem {
    pub details: HtmlDetailsElement,
    pub body: Option<HtmlElement>,
}

/// Running Web Animation plus the callback that reports its completion
pub struct DomTransition {
    animation: Animation,
    _on_finish: Closure<dyn FnMut()>,
}

impl Drop for DomTransition {
    fn drop(&mut self) {
        // The page must never call back into a dropped closure
        self.animation.set_onfinish(None);
    }
}

/// Disclosure host over live page elements
pub struct DomDisclosureHost {
    window: Window,
    items: Vec<DomItem>,
    controller: Weak<RefCell<AccordionController<DomDisclosureHost>>>,
}

impl DomDisclosureHost {
    pub fn new(
        window: Window,
        items: Vec<DomItem>,
        controller: Weak<RefCell<AccordionController<DomDisclosureHost>>>,
    ) -> Self {
        Self {
            window,
            items,
            controller,
        }
    }

    fn body(&self, item: ItemId) -> Option<&HtmlElement> {
        self.items.get(item).and_then(|i| i.body.as_ref())
    }
}

impl DisclosureHost for DomDisclosureHost {
    type Transition = DomTransition;

    fn item_count(&self) -> usize {
        self.items.len()
    }

    fn is_open(&self, item: ItemId) -> bool {
        self.items.get(item).is_some_and(|i| i.details.open())
    }

    fn has_body(&self, item: ItemId) -> bool {
        self.body(item).is_some()
    }

    fn prefers_reduced_motion(&self) -> bool {
        self.window
            .match_media(REDUCED_MOTION_QUERY)
            .ok()
            .flatten()
            .is_some_and(|query| query.matches())
    }

    fn set_open(&mut self, item: ItemId, open: bool) {
        if let Some(i) = self.items.get(item) {
            i.details.set_open(open);
        }
    }

    fn rendered_height(&self, item: ItemId) -> f64 {
        self.body(item)
            .map(|body| body.get_bounding_client_rect().height())
            .unwrap_or(0.0)
    }

    fn natural_height(&self, item: ItemId) -> f64 {
        self.body(item)
            .map(|body| body.scroll_height() as f64)
            .unwrap_or(0.0)
    }

    fn start_transition(
        &mut self,
        item: ItemId,
        transition: &BodyTransition,
        token: TransitionToken,
    ) -> Option<DomTransition> {
        let body = self.body(item)?;

        // Element.animate is missing on very old engines
        let animate = js_sys::Reflect::get(body, &"animate".into())
            .ok()?
            .dyn_into::<js_sys::Function>()
            .ok()?;

        apply_frame(body, &transition.from);
        // Force layout so the start frame is committed before animating
        body.get_bounding_client_rect();

        let keyframes = js_sys::Array::new();
        keyframes.push(&keyframe(&transition.from, Some(transition.easing.to_css().as_str())));
        keyframes.push(&keyframe(&transition.to, None));

        let animation = animate
            .call2(body, &keyframes, &JsValue::from_f64(transition.duration_ms as f64))
            .ok()?
            .dyn_into::<Animation>()
            .ok()?;

        // Hold the end frame inline so nothing flashes before `finish` runs
        apply_frame(body, &transition.to);

        let controller = self.controller.clone();
        let on_finish = Closure::wrap(Box::new(move || {
            if let Some(controller) = controller.upgrade() {
                if let Ok(mut controller) = controller.try_borrow_mut() {
                    controller.finish(item, token);
                }
            }
        }) as Box<dyn FnMut()>);
        animation.set_onfinish(Some(on_finish.as_ref().unchecked_ref()));

        Some(DomTransition {
            animation,
            _on_finish: on_finish,
        })
    }

    fn cancel_transition(&mut self, _item: ItemId, transition: DomTransition) {
        transition.animation.cancel();
    }

    fn clear_transition_styles(&mut self, item: ItemId) {
        if let Some(body) = self.body(item) {
            let style = body.style();
            for property in TRANSITION_PROPERTIES {
                let _ = style.remove_property(property);
            }
        }
    }
}

/// Pin the body's inline styles to a frame
fn apply_frame(body: &HtmlElement, frame: &BodyFrame) {
    let style = body.style();
    let _ = style.set_property("overflow", "hidden");
    let _ = style.set_property("height", &frame.css_height());
    let _ = style.set_property("opacity", &frame.css_opacity());
    let _ = style.set_property("transform", &frame.css_transform());
}

/// Build a Web Animations keyframe object
fn keyframe(frame: &BodyFrame, easing: Option<&str>) -> js_sys::Object {
    let object = js_sys::Object::new();
    let _ = js_sys::Reflect::set(&object, &"height".into(), &frame.css_height().into());
    let _ = js_sys::Reflect::set(&object, &"opacity".into(), &JsValue::from_f64(frame.opacity as f64));
    let _ = js_sys::Reflect::set(&object, &"transform".into(), &frame.css_transform().into());
    if let Some(easing) = easing {
        // Easing on the first keyframe governs the whole two-frame animation
        let _ = js_sys::Reflect::set(&object, &"easing".into(), &easing.into());
    }
    object
}
