//! WASM exports for the plasma background
//!
//! [`mount`] decides whether the banner gets a live renderer at all, and
//! [`PlasmaHandle`] owns everything the live renderer registered with the
//! browser: the frame callback, both observers and the pointer listener.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{HtmlElement, IntersectionObserver, IntersectionObserverEntry, MouseEvent, ResizeObserver, Window};

use crate::config::PlasmaConfig;
use crate::error::{PlasmaError, PlasmaStatus};
use crate::gpu::GpuSurface;
use crate::launch::{launch, PlasmaContainer};
use crate::renderer::{FrameRequest, FrameScheduler, PlasmaRenderer};
use crate::sizing::SurfaceSize;
use crate::uniforms::Uniforms;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console)]
    fn log(s: &str);

    #[wasm_bindgen(js_namespace = console, js_name = error)]
    fn console_error(s: &str);
}

/// Element id of the banner container
pub const CONTAINER_ID: &str = "wm-plasma";

/// Attribute that carries the fallback marker
pub const STATUS_ATTRIBUTE: &str = "data-plasma";

/// Visible fraction below which the banner counts as hidden
pub const VISIBILITY_THRESHOLD: f64 = 0.05;

type Renderer = PlasmaRenderer<GpuSurface, AnimationFrames>;

/// `requestAnimationFrame` scheduling with a single reusable callback
pub struct AnimationFrames {
    window: Window,
    callback: Closure<dyn FnMut(f64)>,
}

impl AnimationFrames {
    fn new(window: Window, renderer: Weak<RefCell<Renderer>>) -> Self {
        let callback = Closure::wrap(Box::new(move |_timestamp: f64| {
            if let Some(renderer) = renderer.upgrade() {
                if let Ok(mut renderer) = renderer.try_borrow_mut() {
                    renderer.render_frame();
                }
            }
        }) as Box<dyn FnMut(f64)>);

        Self { window, callback }
    }
}

impl FrameScheduler for AnimationFrames {
    fn now_ms(&self) -> f64 {
        match self.window.performance() {
            Some(performance) => performance.now(),
            None => js_sys::Date::now(),
        }
    }

    fn request_frame(&mut self) -> Option<FrameRequest> {
        self.window
            .request_animation_frame(self.callback.as_ref().unchecked_ref())
            .ok()
            .map(FrameRequest)
    }

    fn cancel_frame(&mut self, request: FrameRequest) {
        let _ = self.window.cancel_animation_frame(request.0);
    }
}

/// Result of [`mount`]
pub enum Mount {
    Running(PlasmaHandle),
    Skipped(PlasmaStatus),
}

/// Live plasma renderer bound to a container
#[wasm_bindgen]
pub struct PlasmaHandle {
    renderer: Rc<RefCell<Renderer>>,
    container: HtmlElement,
    resize_observer: Option<ResizeObserver>,
    on_resize: Option<Closure<dyn FnMut(js_sys::Array)>>,
    visibility_observer: Option<IntersectionObserver>,
    on_intersect: Option<Closure<dyn FnMut(js_sys::Array)>>,
    on_mouse_move: Option<Closure<dyn FnMut(MouseEvent)>>,
}

impl PlasmaHandle {
    fn new(window: Window, container: HtmlElement, surface: GpuSurface, config: PlasmaConfig) -> Self {
        let mouse_interactive = config.mouse_interactive;
        let renderer: Rc<RefCell<Renderer>> = Rc::new_cyclic(|weak| {
            let frames = AnimationFrames::new(window, weak.clone());
            RefCell::new(PlasmaRenderer::new(surface, frames, config))
        });

        let mut handle = Self {
            renderer,
            container,
            resize_observer: None,
            on_resize: None,
            visibility_observer: None,
            on_intersect: None,
            on_mouse_move: None,
        };
        handle.observe_resize();
        if mouse_interactive {
            handle.track_pointer();
        }
        handle
    }

    /// Current lifecycle status
    pub fn status(&self) -> PlasmaStatus {
        match self.renderer.try_borrow() {
            Ok(renderer) if renderer.is_disposed() => PlasmaStatus::Disposed,
            _ => PlasmaStatus::Running,
        }
    }

    /// Pause the frame loop while less than `threshold` of the container is
    /// on screen
    pub fn pause_when_hidden(&mut self, threshold: f64) {
        self.disconnect_visibility();

        let renderer = Rc::downgrade(&self.renderer);
        let callback = Closure::wrap(Box::new(move |entries: js_sys::Array| {
            let Some(entry) = entries
                .iter()
                .filter_map(|e| e.dyn_into::<IntersectionObserverEntry>().ok())
                .last()
            else {
                return;
            };
            with_renderer(&renderer, |r| r.set_visible(entry.is_intersecting()));
        }) as Box<dyn FnMut(js_sys::Array)>);

        let options = js_sys::Object::new();
        let _ = js_sys::Reflect::set(&options, &JsValue::from_str("threshold"), &JsValue::from_f64(threshold));

        match IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), options.unchecked_ref()) {
            Ok(observer) => {
                observer.observe(&self.container);
                self.visibility_observer = Some(observer);
                self.on_intersect = Some(callback);
            }
            Err(e) => log(&format!("[plasma] IntersectionObserver unavailable: {:?}", e)),
        }
    }

    fn observe_resize(&mut self) {
        let renderer = Rc::downgrade(&self.renderer);
        let callback = Closure::wrap(Box::new(move |_entries: js_sys::Array| {
            with_renderer(&renderer, |r| r.resize());
        }) as Box<dyn FnMut(js_sys::Array)>);

        match ResizeObserver::new(callback.as_ref().unchecked_ref()) {
            Ok(observer) => {
                observer.observe(&self.container);
                self.resize_observer = Some(observer);
                self.on_resize = Some(callback);
            }
            Err(e) => log(&format!("[plasma] ResizeObserver unavailable: {:?}", e)),
        }
    }

    fn track_pointer(&mut self) {
        let renderer = Rc::downgrade(&self.renderer);
        let container = self.container.clone();
        let callback = Closure::wrap(Box::new(move |event: MouseEvent| {
            let rect = container.get_bounding_client_rect();
            let x = event.client_x() as f64 - rect.left();
            let y = event.client_y() as f64 - rect.top();
            with_renderer(&renderer, |r| r.set_pointer(x, y));
        }) as Box<dyn FnMut(MouseEvent)>);

        match self
            .container
            .add_event_listener_with_callback("mousemove", callback.as_ref().unchecked_ref())
        {
            Ok(()) => self.on_mouse_move = Some(callback),
            Err(e) => log(&format!("[plasma] Failed to attach mousemove handler: {:?}", e)),
        }
    }

    fn disconnect_visibility(&mut self) {
        if let Some(observer) = self.visibility_observer.take() {
            observer.disconnect();
        }
        self.on_intersect = None;
    }

    fn teardown(&mut self) {
        if let Ok(mut renderer) = self.renderer.try_borrow_mut() {
            renderer.dispose();
        }

        if let Some(observer) = self.resize_observer.take() {
            observer.disconnect();
        }
        self.on_resize = None;
        self.disconnect_visibility();

        if let Some(callback) = self.on_mouse_move.take() {
            let _ = self
                .container
                .remove_event_listener_with_callback("mousemove", callback.as_ref().unchecked_ref());
        }
    }
}

#[wasm_bindgen]
impl PlasmaHandle {
    /// Resume or pause the frame loop
    #[wasm_bindgen(js_name = setVisible)]
    pub fn set_visible(&self, visible: bool) {
        self.renderer.borrow_mut().set_visible(visible);
    }

    #[wasm_bindgen(js_name = isVisible)]
    pub fn is_visible(&self) -> bool {
        self.renderer.borrow().is_visible()
    }

    /// Re-measure the container and resize the drawing buffer
    #[wasm_bindgen]
    pub fn resize(&self) {
        self.renderer.borrow_mut().resize();
    }

    /// Lifecycle status as a string ID
    #[wasm_bindgen(js_name = status)]
    pub fn status_id(&self) -> String {
        self.status().id().to_string()
    }

    /// Stop rendering and detach everything; safe to call repeatedly
    #[wasm_bindgen]
    pub fn dispose(&mut self) {
        self.teardown();
    }
}

impl Drop for PlasmaHandle {
    fn drop(&mut self) {
        self.teardown();
    }
}

fn with_renderer(renderer: &Weak<RefCell<Renderer>>, f: impl FnOnce(&mut Renderer)) {
    if let Some(renderer) = renderer.upgrade() {
        if let Ok(mut renderer) = renderer.try_borrow_mut() {
            f(&mut renderer);
        }
    }
}

/// Whether the user asked the system to minimise motion
pub fn prefers_reduced_motion(window: &Window) -> bool {
    window
        .match_media("(prefers-reduced-motion: reduce)")
        .ok()
        .flatten()
        .map(|query| query.matches())
        .unwrap_or(false)
}

/// Look up a container element by id
pub fn find_container(id: &str) -> Option<HtmlElement> {
    web_sys::window()?
        .document()?
        .get_element_by_id(id)?
        .dyn_into::<HtmlElement>()
        .ok()
}

/// Banner container as seen by [`launch`]
struct DomContainer<'a> {
    window: &'a Window,
    element: &'a HtmlElement,
}

impl PlasmaContainer for DomContainer<'_> {
    type Surface = GpuSurface;

    fn prefers_reduced_motion(&self) -> bool {
        prefers_reduced_motion(self.window)
    }

    fn set_marker(&mut self, marker: &'static str) {
        let _ = self.element.set_attribute(STATUS_ATTRIBUTE, marker);
    }

    fn attach(&mut self, surface: &GpuSurface) -> Result<(), PlasmaError> {
        surface.attach()
    }

    fn report(&mut self, error: &PlasmaError) {
        match error {
            PlasmaError::Unsupported(_) => log(&format!("[plasma] {}", error)),
            _ => console_error(&format!("[plasma] {}", error)),
        }
    }
}

/// Start the plasma on `container`, or leave the static background in place
///
/// Never fails outward: reduced motion and missing graphics support set the
/// container's marker, shader errors go to the console.
pub async fn mount(container: HtmlElement, config: PlasmaConfig) -> Mount {
    let Some(window) = web_sys::window() else {
        return Mount::Skipped(PlasmaStatus::Unsupported);
    };

    let rect = container.get_bounding_client_rect();
    let size = SurfaceSize::from_css(
        rect.width(),
        rect.height(),
        window.device_pixel_ratio(),
        config.max_pixel_ratio,
    );
    let uniforms = Uniforms::from_config(&config);

    let mut dom = DomContainer {
        window: &window,
        element: &container,
    };
    let launched = launch(&mut dom, || {
        GpuSurface::new(window.clone(), container.clone(), size, &uniforms)
    })
    .await;

    match launched {
        Ok(surface) => {
            log(&format!("[plasma] Rendering at {}x{}", size.width, size.height));
            Mount::Running(PlasmaHandle::new(window, container, surface, config))
        }
        Err(status) => Mount::Skipped(status),
    }
}

/// Mount the plasma on the element with `container_id`
///
/// Resolves to a `PlasmaHandle`, or `null` when the element is missing or
/// the static background was kept.
#[wasm_bindgen(js_name = mountPlasma)]
pub async fn mount_plasma(container_id: String, options_json: Option<String>) -> Result<JsValue, JsValue> {
    let config = match options_json.as_deref().map(PlasmaConfig::from_json) {
        None => PlasmaConfig::default(),
        Some(Ok(config)) => config,
        Some(Err(e)) => {
            console_error(&format!("[plasma] {}", e));
            return Ok(JsValue::NULL);
        }
    };

    let Some(container) = find_container(&container_id) else {
        return Ok(JsValue::NULL);
    };

    match mount(container, config).await {
        Mount::Running(handle) => Ok(handle.into()),
        Mount::Skipped(_) => Ok(JsValue::NULL),
    }
}
