//! Browser smoke tests, run with `wasm-pack test --headless --firefox`

#![cfg(target_arch = "wasm32")]

use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_test::*;
use web_sys::HtmlElement;

use wm_accordion::{AccordionHandle, AccordionOptions};
use wm_plasma::{mount, Mount, PlasmaConfig, STATUS_ATTRIBUTE};
use wm_web::{boot, mount_plasma, CONTAINER_ID};

wasm_bindgen_test_configure!(run_in_browser);

const FAQ_MARKUP: &str = r#"
<details class="wm-faq-item"><summary>One</summary><div class="wm-faq-body"><p>First</p></div></details>
<details class="wm-faq-item"><summary>Two</summary><div class="wm-faq-body"><p>Second</p></div></details>
"#;

fn document() -> web_sys::Document {
    web_sys::window().unwrap().document().unwrap()
}

fn insert_faq() -> web_sys::Element {
    let root = document().create_element("section").unwrap();
    root.set_class_name("wm-faq");
    root.set_inner_html(FAQ_MARKUP);
    document().body().unwrap().append_child(&root).unwrap();
    root
}

#[wasm_bindgen_test]
async fn test_boot_on_bare_page() {
    let mut page = boot().await.unwrap();

    assert!(!page.has_plasma());
    assert_eq!(page.plasma_status(), None);

    page.dispose();
    page.dispose();
}

#[wasm_bindgen_test]
fn test_accordion_opens_synchronously() {
    let root = insert_faq();
    let handle = AccordionHandle::initialize(AccordionOptions::default()).unwrap();

    assert_eq!(handle.item_count(), 2);
    handle.toggle(0);
    assert!(handle.is_open(0));

    handle.toggle(1);
    assert!(handle.is_open(1));

    drop(handle);
    root.remove();
}

fn insert_banner() -> HtmlElement {
    let banner = document().create_element("div").unwrap();
    banner.set_id(CONTAINER_ID);
    banner.set_attribute("style", "width:320px;height:180px;").unwrap();
    document().body().unwrap().append_child(&banner).unwrap();
    banner.dyn_into().unwrap()
}

#[wasm_bindgen_test]
fn test_dispose_mid_animation_clears_inline_styles() {
    let root = insert_faq();
    let mut handle = AccordionHandle::initialize(AccordionOptions::default()).unwrap();

    handle.toggle(0);
    handle.dispose();

    let body: HtmlElement = root
        .query_selector(".wm-faq-body")
        .unwrap()
        .unwrap()
        .dyn_into()
        .unwrap();
    assert_eq!(body.style().get_property_value("height").unwrap(), "");
    assert_eq!(body.style().get_property_value("overflow").unwrap(), "");
    assert!(root.query_selector("details").unwrap().unwrap().has_attribute("open"));

    root.remove();
}

#[wasm_bindgen_test]
async fn test_mount_fills_banner_or_marks_it() {
    let banner = insert_banner();

    match mount(banner.clone(), PlasmaConfig::default()).await {
        Mount::Running(mut handle) => {
            assert_eq!(banner.child_element_count(), 1);
            let canvas: HtmlElement = banner.first_element_child().unwrap().dyn_into().unwrap();
            assert_eq!(canvas.tag_name(), "CANVAS");

            // Sized by the banner's flow, not absolutely positioned
            let style = canvas.style();
            assert_eq!(style.get_property_value("display").unwrap(), "block");
            assert_eq!(style.get_property_value("width").unwrap(), "100%");
            assert_eq!(style.get_property_value("position").unwrap(), "");

            handle.dispose();
            assert_eq!(banner.child_element_count(), 0);
            assert_eq!(banner.get_attribute(STATUS_ATTRIBUTE), None);
        }
        Mount::Skipped(status) => {
            let marker = banner.get_attribute(STATUS_ATTRIBUTE);
            assert!(
                matches!(marker.as_deref(), Some("unsupported") | Some("reduced-motion")),
                "skipped with {:?} and marker {:?}",
                status,
                marker
            );
            assert_eq!(banner.child_element_count(), 0);
        }
    }

    banner.remove();
}

#[wasm_bindgen_test]
async fn test_mount_plasma_without_container() {
    let handle = mount_plasma("no-such-banner".to_string(), None).await.unwrap();
    assert_eq!(handle, JsValue::NULL);
}

#[wasm_bindgen_test]
async fn test_mount_plasma_rejects_bad_options() {
    let handle = mount_plasma("wm-plasma".to_string(), Some("{".to_string())).await.unwrap();
    assert_eq!(handle, JsValue::NULL);
}
