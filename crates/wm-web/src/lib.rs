//! Browser bootstrap for Webmark pages
//!
//! `boot()` waits for the document, wires the FAQ accordion and mounts the
//! plasma banner, then hands the page script a [`Page`] that owns both.
//!
//! ## Module Structure
//!
//! - `wm-accordion` - disclosure group controller (`.wm-faq`)
//! - `wm-plasma` - animated banner background (`#wm-plasma`)

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::Document;

use wm_accordion::{AccordionHandle, AccordionOptions};
use wm_plasma::{find_container, mount, Mount, PlasmaConfig, PlasmaHandle, PlasmaStatus};

// Re-export the component handles for page scripts that mount them directly
pub use wm_accordion::init_accordion;
pub use wm_plasma::{mount_plasma, CONTAINER_ID, VISIBILITY_THRESHOLD};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console)]
    fn log(s: &str);
}

/// Components running on the current page
#[wasm_bindgen]
pub struct Page {
    accordion: Option<AccordionHandle>,
    plasma: Option<PlasmaHandle>,
    plasma_status: Option<PlasmaStatus>,
}

#[wasm_bindgen]
impl Page {
    /// Whether a disclosure group was found and wired
    #[wasm_bindgen(js_name = hasAccordion)]
    pub fn has_accordion(&self) -> bool {
        self.accordion.is_some()
    }

    /// Whether the plasma banner is rendering
    #[wasm_bindgen(js_name = hasPlasma)]
    pub fn has_plasma(&self) -> bool {
        self.plasma.is_some()
    }

    /// Pause or resume the banner by hand
    #[wasm_bindgen(js_name = setPlasmaVisible)]
    pub fn set_plasma_visible(&self, visible: bool) {
        if let Some(plasma) = &self.plasma {
            plasma.set_visible(visible);
        }
    }

    /// Banner status ID, or `undefined` when the page has no banner
    #[wasm_bindgen(js_name = plasmaStatus)]
    pub fn plasma_status(&self) -> Option<String> {
        let status = match &self.plasma {
            Some(plasma) => Some(plasma.status()),
            None => self.plasma_status,
        };
        status.map(|s| s.id().to_string())
    }

    /// Tear down both components; safe to call repeatedly
    #[wasm_bindgen]
    pub fn dispose(&mut self) {
        if let Some(mut accordion) = self.accordion.take() {
            accordion.dispose();
        }
        if let Some(mut plasma) = self.plasma.take() {
            plasma.dispose();
            self.plasma_status = Some(PlasmaStatus::Disposed);
        }
    }
}

/// Start every component the page's markup asks for
///
/// Resolves once the document has finished parsing. Missing markup is not an
/// error: the matching component is simply absent from the returned `Page`.
#[wasm_bindgen]
pub async fn boot() -> Result<Page, JsValue> {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;
    dom_ready(&document).await?;

    let accordion = AccordionHandle::initialize(AccordionOptions::default());
    if let Some(accordion) = &accordion {
        log(&format!("[boot] Accordion ready with {} items", accordion.item_count()));
    }

    let (plasma, plasma_status) = match find_container(CONTAINER_ID) {
        None => (None, None),
        Some(container) => match mount(container, PlasmaConfig::banner()).await {
            Mount::Running(mut handle) => {
                handle.pause_when_hidden(VISIBILITY_THRESHOLD);
                (Some(handle), Some(PlasmaStatus::Running))
            }
            Mount::Skipped(status) => {
                log(&format!("[boot] Plasma skipped: {}", status.id()));
                (None, Some(status))
            }
        },
    };

    Ok(Page {
        accordion,
        plasma,
        plasma_status,
    })
}

/// Wait for `DOMContentLoaded` unless it already fired
async fn dom_ready(document: &Document) -> Result<(), JsValue> {
    if document.ready_state() != "loading" {
        return Ok(());
    }

    let promise = js_sys::Promise::new(&mut |resolve, _reject| {
        // Later calls to a settled promise's resolver are no-ops
        let _ = document.add_event_listener_with_callback("DOMContentLoaded", &resolve);
    });
    JsFuture::from(promise).await.map(|_| ())
}
