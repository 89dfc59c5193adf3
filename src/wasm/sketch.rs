use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{HtmlElement, Window};

use super::dom;
use super::render::Renderer;
use crate::config::Config;
use crate::error::Result;
use crate::frame::FrameGate;
use crate::progress::{ProgressMapper, TexturePair};
use crate::slideshow::Slideshow;
use crate::uniforms::UniformSet;

enum Driver {
    Scroll {
        mapper: ProgressMapper,
        tracked: HtmlElement,
    },
    Manual(Slideshow),
}

/// Everything the event handlers and the frame loop share.
pub struct Sketch {
    renderer: Renderer,
    driver: Driver,
    gate: FrameGate,
    uniforms: UniformSet,
    container: HtmlElement,
    pair: TexturePair,
    started_at: f64,
}

impl Sketch {
    pub fn new(
        config: &Config,
        renderer: Renderer,
        container: HtmlElement,
        tracked: Option<HtmlElement>,
        now: f64,
    ) -> Self {
        let count = renderer.texture_count();
        let driver = match tracked {
            Some(tracked) => Driver::Scroll {
                mapper: ProgressMapper::new(count, config.scroll_domain),
                tracked,
            },
            None => Driver::Manual(Slideshow::new(count, config.duration, config.easing)),
        };
        let pair = match &driver {
            Driver::Scroll { mapper, .. } => mapper.state().pair(),
            Driver::Manual(show) => show.pair(),
        };
        Self {
            renderer,
            driver,
            gate: FrameGate::new(),
            uniforms: config.uniforms.clone(),
            container,
            pair,
            started_at: now,
        }
    }

    pub fn uniforms(&self) -> &UniformSet {
        &self.uniforms
    }

    pub fn uniforms_mut(&mut self) -> &mut UniformSet {
        &mut self.uniforms
    }

    /// Re-measures the container and the tracked region.
    pub fn resize(&mut self) -> Result<()> {
        let window = dom::window()?;
        let width = self.container.offset_width() as f64;
        let height = self.container.offset_height() as f64;
        self.renderer
            .resize(width, height, dom::device_pixel_ratio(&window));

        if let Driver::Scroll { mapper, tracked } = &mut self.driver {
            let document = dom::document(&window)?;
            let frame = dom::measure(&document, tracked);
            log::debug!(
                "tracked region at {}px, {}px long, document {}px",
                frame.region_offset,
                frame.region_length,
                frame.document_height
            );
            mapper.on_resize(frame);
        }
        Ok(())
    }

    pub fn update_scroll(&mut self, scroll_top: f64) {
        if let Driver::Scroll { mapper, .. } = &mut self.driver {
            self.pair = mapper.on_scroll(scroll_top).pair();
        }
    }

    pub fn next(&mut self, now: f64) -> bool {
        match &mut self.driver {
            Driver::Manual(show) => show.next(now),
            Driver::Scroll { .. } => {
                log::warn!("next() has no effect while scroll drives the transition");
                false
            }
        }
    }

    pub fn render(&mut self, now: f64) {
        if let Driver::Manual(show) = &mut self.driver {
            show.tick(now);
            self.pair = show.pair();
        }
        let time = (now - self.started_at) as f32;
        self.renderer.draw(self.pair, time, &self.uniforms);
    }
}

/// Resize re-measures and recomputes immediately; scroll recomputes at most
/// once per animation frame.
pub fn install_listeners(window: &Window, sketch: &Rc<RefCell<Sketch>>) -> Result<()> {
    let on_resize = {
        let sketch = sketch.clone();
        Closure::wrap(Box::new(move || {
            let Ok(window) = dom::window() else {
                return;
            };
            let mut sketch = sketch.borrow_mut();
            if let Err(err) = sketch.resize() {
                log::error!("resize failed: {err}");
                return;
            }
            sketch.update_scroll(dom::scroll_top(&window));
        }) as Box<dyn FnMut()>)
    };
    window.add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())?;
    on_resize.forget();

    if !matches!(sketch.borrow().driver, Driver::Scroll { .. }) {
        return Ok(());
    }

    let update = {
        let sketch = sketch.clone();
        Closure::wrap(Box::new(move || {
            let Ok(window) = dom::window() else {
                return;
            };
            let mut sketch = sketch.borrow_mut();
            sketch.gate.complete();
            sketch.update_scroll(dom::scroll_top(&window));
        }) as Box<dyn FnMut()>)
    };

    let on_scroll = {
        let sketch = sketch.clone();
        Closure::wrap(Box::new(move || {
            if !sketch.borrow_mut().gate.request() {
                return;
            }
            let scheduled = dom::window().map_err(JsValue::from).and_then(|window| {
                window.request_animation_frame(update.as_ref().unchecked_ref())
            });
            if let Err(err) = scheduled {
                sketch.borrow_mut().gate.complete();
                log::error!("failed to schedule scroll update: {:?}", err);
            }
        }) as Box<dyn FnMut()>)
    };
    window.add_event_listener_with_callback("scroll", on_scroll.as_ref().unchecked_ref())?;
    on_scroll.forget();
    Ok(())
}
