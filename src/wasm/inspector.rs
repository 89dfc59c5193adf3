//! Debug panel of range inputs, one per configurable uniform.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{Document, HtmlElement, HtmlInputElement};

use super::sketch::Sketch;
use crate::error::{Error, Result};

const PANEL_STYLE: &str = "position:fixed;top:0;right:0;z-index:10;padding:8px;\
    background:rgba(0,0,0,0.6);color:#fff;font:12px monospace";

fn create<T: JsCast>(document: &Document, tag: &str) -> Result<T> {
    document
        .create_element(tag)?
        .dyn_into::<T>()
        .map_err(|_| Error::Js(format!("<{tag}> has an unexpected type")))
}

pub fn mount(document: &Document, sketch: &Rc<RefCell<Sketch>>) -> Result<()> {
    let settings: Vec<_> = sketch
        .borrow()
        .uniforms()
        .iter()
        .map(|(name, setting)| (name.to_string(), *setting))
        .collect();
    if settings.is_empty() {
        return Ok(());
    }

    let panel: HtmlElement = create(document, "div")?;
    panel.set_attribute("style", PANEL_STYLE)?;

    for (name, setting) in settings {
        let row: HtmlElement = create(document, "label")?;
        row.set_attribute("style", "display:block")?;
        row.set_text_content(Some(&name));

        let input: HtmlInputElement = create(document, "input")?;
        input.set_type("range");
        input.set_min(&setting.min.to_string());
        input.set_max(&setting.max.to_string());
        input.set_step("0.01");
        input.set_value(&setting.value.to_string());

        let on_input = {
            let sketch = sketch.clone();
            let input = input.clone();
            Closure::wrap(Box::new(move || {
                let value = input.value_as_number();
                if value.is_finite() {
                    sketch.borrow_mut().uniforms_mut().set(&name, value as f32);
                }
            }) as Box<dyn FnMut()>)
        };
        input.add_event_listener_with_callback("input", on_input.as_ref().unchecked_ref())?;
        on_input.forget();

        row.append_child(&input)?;
        panel.append_child(&row)?;
    }

    document
        .body()
        .ok_or_else(|| Error::MissingElement("body".into()))?
        .append_child(&panel)?;
    Ok(())
}
