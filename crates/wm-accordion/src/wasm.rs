//! WASM exports for the accordion
//!
//! Scans the page for a disclosure group, wires header click and key
//! handlers to a shared [`AccordionController`] and hands back an
//! [`AccordionHandle`] that owns those handlers.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, HtmlDetailsElement, HtmlElement, KeyboardEvent};

use crate::config::AccordionOptions;
use crate::controller::{AccordionController, ItemId};
use crate::dom::{DomDisclosureHost, DomItem};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console)]
    fn log(s: &str);
}

type SharedController = Rc<RefCell<AccordionController<DomDisclosureHost>>>;

/// An event listener this accordion registered and must remove
struct Listener {
    target: HtmlElement,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

/// Live accordion bound to the page
#[wasm_bindgen]
pub struct AccordionHandle {
    controller: SharedController,
    listeners: Vec<Listener>,
}

impl AccordionHandle {
    /// Locate the group and attach handlers; `None` if the markup is absent
    pub fn initialize(options: AccordionOptions) -> Option<Self> {
        let window = web_sys::window()?;
        let document = window.document()?;

        let root = document.query_selector(&options.root_selector).ok().flatten()?;
        let scanned = scan_items(&root, &options);
        if scanned.is_empty() {
            return None;
        }

        let summaries: Vec<Option<HtmlElement>> = scanned.iter().map(|(_, s)| s.clone()).collect();
        let items: Vec<DomItem> = scanned.into_iter().map(|(item, _)| item).collect();

        let controller: SharedController = Rc::new_cyclic(|weak| {
            RefCell::new(AccordionController::new(
                DomDisclosureHost::new(window, items, weak.clone()),
                options,
            ))
        });

        let mut listeners = Vec::new();
        for (item, summary) in summaries.into_iter().enumerate() {
            // Items without a header still take part in single-open closing
            let Some(summary) = summary else {
                continue;
            };
            listeners.push(listen(&summary, "click", click_handler(Rc::downgrade(&controller), item)));
            listeners.push(listen(&summary, "keydown", key_handler(Rc::downgrade(&controller), item)));
        }

        Some(Self {
            controller,
            listeners,
        })
    }

    fn detach(&mut self) {
        if let Ok(mut controller) = self.controller.try_borrow_mut() {
            controller.finish_all();
        }

        for listener in self.listeners.drain(..) {
            let _ = listener.target.remove_event_listener_with_callback(
                listener.event,
                listener.callback.as_ref().unchecked_ref(),
            );
        }
    }
}

#[wasm_bindgen]
impl AccordionHandle {
    /// Number of disclosure items found
    #[wasm_bindgen(js_name = itemCount)]
    pub fn item_count(&self) -> usize {
        self.controller.borrow().len()
    }

    /// Whether an item's open flag is set
    #[wasm_bindgen(js_name = isOpen)]
    pub fn is_open(&self, index: usize) -> bool {
        self.controller.borrow().is_open(index)
    }

    /// Toggle an item as if its header were clicked
    #[wasm_bindgen]
    pub fn toggle(&self, index: usize) {
        self.controller.borrow_mut().toggle(index);
    }

    /// Remove every handler this accordion attached
    #[wasm_bindgen]
    pub fn dispose(&mut self) {
        self.detach();
    }
}

impl Drop for AccordionHandle {
    fn drop(&mut self) {
        self.detach();
    }
}

/// Initialise the accordion from optional JSON options
#[wasm_bindgen(js_name = initAccordion)]
pub fn init_accordion(options_json: Option<String>) -> Option<AccordionHandle> {
    let options = match options_json.as_deref().map(AccordionOptions::from_json) {
        None => AccordionOptions::default(),
        Some(Ok(options)) => options,
        Some(Err(e)) => {
            log(&format!("[faq] {}", e));
            return None;
        }
    };
    AccordionHandle::initialize(options)
}

/// Find every item with its optional header
fn scan_items(root: &Element, options: &AccordionOptions) -> Vec<(DomItem, Option<HtmlElement>)> {
    let Ok(nodes) = root.query_selector_all(&options.item_selector) else {
        return Vec::new();
    };

    (0..nodes.length())
        .filter_map(|i| nodes.get(i))
        .filter_map(|node| node.dyn_into::<HtmlDetailsElement>().ok())
        .map(|details| {
            let summary = find(&details, &options.summary_selector);
            let body = find(&details, &options.body_selector);
            (DomItem { details, body }, summary)
        })
        .collect()
}

fn find(parent: &Element, selector: &str) -> Option<HtmlElement> {
    parent
        .query_selector(selector)
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
}

fn listen(target: &HtmlElement, event: &'static str, callback: Closure<dyn FnMut(Event)>) -> Listener {
    if let Err(e) = target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref()) {
        log(&format!("[faq] Failed to attach {} handler: {:?}", event, e));
    }
    Listener {
        target: target.clone(),
        event,
        callback,
    }
}

fn toggle_item(controller: &Weak<RefCell<AccordionController<DomDisclosureHost>>>, item: ItemId) {
    if let Some(controller) = controller.upgrade() {
        if let Ok(mut controller) = controller.try_borrow_mut() {
            controller.toggle(item);
        }
    }
}

fn click_handler(
    controller: Weak<RefCell<AccordionController<DomDisclosureHost>>>,
    item: ItemId,
) -> Closure<dyn FnMut(Event)> {
    Closure::wrap(Box::new(move |event: Event| {
        // The controller owns the open flag; keep the browser from flipping it
        event.prevent_default();
        toggle_item(&controller, item);
    }) as Box<dyn FnMut(Event)>)
}

fn key_handler(
    controller: Weak<RefCell<AccordionController<DomDisclosureHost>>>,
    item: ItemId,
) -> Closure<dyn FnMut(Event)> {
    Closure::wrap(Box::new(move |event: Event| {
        let Some(key) = event.dyn_ref::<KeyboardEvent>().map(KeyboardEvent::key) else {
            return;
        };
        if key == "Enter" || key == " " {
            event.prevent_default();
            toggle_item(&controller, item);
        }
    }) as Box<dyn FnMut(Event)>)
}
