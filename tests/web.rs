#![cfg(target_arch = "wasm32")]

use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;

use scrollfade_wasm::progress::DEFAULT_SCROLL_DOMAIN;
use scrollfade_wasm::{ProgressMapper, ReferenceFrame};

wasm_bindgen_test_configure!(run_in_browser);

fn place(style: &str) -> web_sys::HtmlElement {
    let document = web_sys::window().unwrap().document().unwrap();
    let el = document
        .create_element("div")
        .unwrap()
        .dyn_into::<web_sys::HtmlElement>()
        .unwrap();
    el.set_attribute("style", style).unwrap();
    document.body().unwrap().append_child(&el).unwrap();
    el
}

#[wasm_bindgen_test]
fn laid_out_region_drives_the_mapper() {
    place("height: 300px");
    let tracked = place("height: 900px");
    let offset = tracked.offset_top() as f64;
    let length = tracked.get_bounding_client_rect().height();

    let mut mapper = ProgressMapper::new(3, DEFAULT_SCROLL_DOMAIN);
    mapper.on_resize(ReferenceFrame::new(offset, length, offset + length));

    assert_eq!(mapper.on_scroll(offset - 1.0).active_index, 0);
    let end = mapper.on_scroll(offset + length + 1.0);
    assert_eq!((end.active_index, end.local_progress), (1, 1.0));
}
