use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement, Window};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::progress::ReferenceFrame;

pub fn window() -> Result<Window> {
    web_sys::window().ok_or_else(|| Error::Js("no window".into()))
}

pub fn document(window: &Window) -> Result<Document> {
    window
        .document()
        .ok_or_else(|| Error::Js("no document".into()))
}

pub fn element_by_id(document: &Document, id: &str) -> Result<HtmlElement> {
    document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        .ok_or_else(|| Error::MissingElement(id.to_string()))
}

pub fn read_config(container: &HtmlElement) -> Result<Config> {
    Config::from_attributes(
        container.get_attribute("data-config").as_deref(),
        container.get_attribute("data-images").as_deref(),
    )
}

pub fn now_secs(window: &Window) -> f64 {
    window
        .performance()
        .map(|perf| perf.now() / 1000.0)
        .unwrap_or_default()
}

pub fn scroll_top(window: &Window) -> f64 {
    if let Ok(y) = window.scroll_y() {
        return y;
    }
    window
        .document()
        .and_then(|doc| doc.document_element())
        .map(|root| root.scroll_top() as f64)
        .unwrap_or_default()
}

/// Tallest of the body and root element extents.
pub fn document_height(document: &Document) -> f64 {
    let mut height: i32 = 0;
    if let Some(body) = document.body() {
        height = height
            .max(body.scroll_height())
            .max(body.offset_height())
            .max(body.client_height());
    }
    if let Some(root) = document.document_element() {
        height = height.max(root.scroll_height()).max(root.client_height());
        if let Some(root) = root.dyn_ref::<HtmlElement>() {
            height = height.max(root.offset_height());
        }
    }
    height as f64
}

pub fn measure(document: &Document, tracked: &HtmlElement) -> ReferenceFrame {
    ReferenceFrame::new(
        tracked.offset_top() as f64,
        tracked.get_bounding_client_rect().height(),
        document_height(document),
    )
}

pub fn device_pixel_ratio(window: &Window) -> f64 {
    let ratio = window.device_pixel_ratio();
    if ratio > 0.0 {
        ratio
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use wasm_bindgen_test::*;

    use super::*;

    fn place(document: &Document, id: &str, style: &str) -> HtmlElement {
        let el = document
            .create_element("div")
            .unwrap()
            .dyn_into::<HtmlElement>()
            .unwrap();
        el.set_id(id);
        el.set_attribute("style", style).unwrap();
        document.body().unwrap().append_child(&el).unwrap();
        el
    }

    #[wasm_bindgen_test]
    fn measure_reports_tracked_region_geometry() {
        let document = document(&window().unwrap()).unwrap();
        place(&document, "measure-spacer", "height: 250px");
        let tracked = place(&document, "measure-tracked", "height: 1200px");

        let frame = measure(&document, &tracked);
        assert_eq!(frame.region_offset, tracked.offset_top() as f64);
        assert!(frame.region_offset >= 250.0, "{frame:?}");
        assert!((frame.region_length - 1200.0).abs() < 1.0, "{frame:?}");
        assert!(frame.document_height >= frame.region_end(), "{frame:?}");
        assert_eq!(frame.document_height, document_height(&document));
    }

    #[wasm_bindgen_test]
    fn missing_element_is_named() {
        let document = document(&window().unwrap()).unwrap();
        let err = element_by_id(&document, "no-such-element").unwrap_err();
        assert!(matches!(err, Error::MissingElement(ref id) if id == "no-such-element"));
    }

    #[wasm_bindgen_test]
    fn read_config_merges_data_attributes() {
        let document = document(&window().unwrap()).unwrap();
        let container = place(&document, "config-container", "");
        container
            .set_attribute("data-images", r#"["img/1.jpg", "img/2.jpg", "img/3.jpg"]"#)
            .unwrap();
        container
            .set_attribute("data-config", r#"{"mode": "manual", "duration": 0.5}"#)
            .unwrap();

        let config = read_config(&container).unwrap();
        assert_eq!(config.images.len(), 3);
        assert_eq!(config.duration, 0.5);
    }

    #[wasm_bindgen_test]
    fn read_config_rejects_single_image() {
        let document = document(&window().unwrap()).unwrap();
        let container = place(&document, "config-single", "");
        container.set_attribute("data-images", r#"["img/1.jpg"]"#).unwrap();

        let err = read_config(&container).unwrap_err();
        assert!(matches!(err, Error::TooFewImages { found: 1 }));
    }
}
