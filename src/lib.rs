#![cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]

pub mod config;
pub mod cover;
pub mod easing;
pub mod error;
pub mod frame;
pub mod progress;
pub mod slideshow;
pub mod uniforms;

pub use config::{Config, DriveMode};
pub use error::{Error, Result};
pub use progress::{map_progress, ProgressMapper, ReferenceFrame, TexturePair, TransitionState};

// Only compile wasm-specific code when targeting wasm32.

#[cfg(target_arch = "wasm32")]
mod wasm {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::prelude::*;
    use wasm_bindgen::JsCast;
    use wasm_bindgen_futures::spawn_local;

    use crate::config::DriveMode;
    use crate::error::{Error, Result};
    use crate::uniforms::UniformSetting;

    mod dom;
    mod inspector;
    mod render;
    mod sketch;
    mod textures;

    use sketch::Sketch;

    #[cfg(test)]
    wasm_bindgen_test::wasm_bindgen_test_configure!(run_in_browser);

    const CONTAINER_ID: &str = "sketch";

    thread_local! {
        static APP: RefCell<Option<App>> = const { RefCell::new(None) };
    }

    struct App {
        sketch: Rc<RefCell<Sketch>>,
        frame: render::FrameLoop,
    }

    #[wasm_bindgen(start)]
    pub fn main() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Debug).ok();
        log::set_max_level(log::LevelFilter::Info);

        spawn_local(async {
            if let Err(err) = init().await {
                log::error!("transition failed to start: {err}");
            }
        });
        Ok(())
    }

    async fn init() -> Result<()> {
        let window = dom::window()?;
        let document = dom::document(&window)?;
        let container = dom::element_by_id(&document, CONTAINER_ID)?;
        let mut config = dom::read_config(&container)?;
        if config.debug {
            log::set_max_level(log::LevelFilter::Debug);
        }
        if config.fragment_shader_source.is_none() && config.uniforms.get("intensity").is_none() {
            config
                .uniforms
                .insert("intensity", UniformSetting::new(0.3, 0.0, 2.0));
        }
        log::info!(
            "loading {} images ({:?} mode)",
            config.images.len(),
            config.mode
        );

        // One batch: the displacement map, when set, rides at the end.
        let mut urls = config.images.clone();
        urls.extend(config.displacement_map.iter().cloned());
        let mut images = textures::load_images(&urls).await?;
        let displacement = match config.displacement_map {
            Some(_) => images.pop(),
            None => None,
        };
        log::info!("textures loaded");

        let canvas = document
            .create_element("canvas")?
            .dyn_into::<web_sys::HtmlCanvasElement>()
            .map_err(|_| Error::WebGl("created element is not a canvas".into()))?;
        container.append_child(&canvas)?;

        let renderer = render::Renderer::new(
            canvas,
            config.fragment_shader_source.as_deref(),
            &images,
            displacement.as_ref(),
            config.uniforms.iter().map(|(name, _)| name),
        )?;

        let tracked = match config.mode {
            DriveMode::Scroll => Some(dom::element_by_id(&document, &config.tracked_element_id)?),
            DriveMode::Manual => None,
        };

        let sketch = Rc::new(RefCell::new(Sketch::new(
            &config,
            renderer,
            container,
            tracked,
            dom::now_secs(&window),
        )));

        // Reference frame must exist before the first progress computation.
        {
            let mut sketch = sketch.borrow_mut();
            sketch.resize()?;
            sketch.update_scroll(dom::scroll_top(&window));
        }

        sketch::install_listeners(&window, &sketch)?;
        if config.debug {
            inspector::mount(&document, &sketch)?;
        }

        let frame = render::FrameLoop::new(sketch.clone());
        frame.play()?;
        APP.with(|app| *app.borrow_mut() = Some(App { sketch, frame }));
        Ok(())
    }

    fn with_app(action: &str, f: impl FnOnce(&App) -> Result<()>) -> Result<(), JsValue> {
        APP.with(|app| match app.borrow().as_ref() {
            Some(app) => f(app).map_err(JsValue::from),
            None => {
                log::warn!("{action} ignored: textures are still loading");
                Ok(())
            }
        })
    }

    /// Starts a manual transition to the next image.
    #[wasm_bindgen]
    pub fn next() -> Result<(), JsValue> {
        with_app("next", |app| {
            let now = dom::now_secs(&dom::window()?);
            app.sketch.borrow_mut().next(now);
            Ok(())
        })
    }

    #[wasm_bindgen]
    pub fn stop() -> Result<(), JsValue> {
        with_app("stop", |app| {
            app.frame.stop();
            Ok(())
        })
    }

    #[wasm_bindgen]
    pub fn play() -> Result<(), JsValue> {
        with_app("play", |app| app.frame.play())
    }
}

// When compiling for non-wasm targets (e.g., `cargo test` on host),
// provide an empty stub so the crate still builds.
#[cfg(not(target_arch = "wasm32"))]
pub fn main() {}
