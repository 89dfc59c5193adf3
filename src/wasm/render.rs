use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{
    window, HtmlCanvasElement, HtmlImageElement, WebGl2RenderingContext as GL, WebGlProgram,
    WebGlShader, WebGlUniformLocation, WebGlVertexArrayObject,
};

use super::dom;
use super::sketch::Sketch;
use super::textures::{self, Texture};
use crate::cover::CoverFit;
use crate::error::{Error, Result};
use crate::progress::TexturePair;
use crate::frame::LoopState;
use crate::uniforms::{UniformSet, RESERVED_UNIFORMS};

const VERTEX_SHADER: &str = include_str!("../shaders/transition.vert");
const FRAGMENT_SHADER: &str = include_str!("../shaders/transition.frag");

// Full-screen triangle strip in clip space.
const QUAD: [f32; 8] = [-1.0, -1.0, 1.0, -1.0, -1.0, 1.0, 1.0, 1.0];

pub struct Renderer {
    gl: GL,
    canvas: HtmlCanvasElement,
    program: WebGlProgram,
    vao: WebGlVertexArrayObject,
    textures: Vec<Texture>,
    displacement: Texture,
    locations: HashMap<String, WebGlUniformLocation>,
    fit: CoverFit,
}

impl Renderer {
    pub fn new<'a>(
        canvas: HtmlCanvasElement,
        fragment_source: Option<&str>,
        images: &[HtmlImageElement],
        displacement: Option<&HtmlImageElement>,
        extra_uniforms: impl IntoIterator<Item = &'a str>,
    ) -> Result<Self> {
        let gl: GL = canvas
            .get_context_with_context_options("webgl2", &alpha_context_options())?
            .ok_or_else(|| Error::WebGl("WebGL2 not supported".into()))?
            .dyn_into()
            .map_err(|_| Error::WebGl("context is not WebGL2".into()))?;

        let vertex = compile_shader(&gl, GL::VERTEX_SHADER, VERTEX_SHADER)?;
        let fragment = compile_shader(
            &gl,
            GL::FRAGMENT_SHADER,
            fragment_source.unwrap_or(FRAGMENT_SHADER),
        )?;
        let program = link_program(&gl, &vertex, &fragment)?;

        let vao = gl
            .create_vertex_array()
            .ok_or_else(|| Error::WebGl("failed to create vertex array".into()))?;
        gl.bind_vertex_array(Some(&vao));
        let buffer = gl
            .create_buffer()
            .ok_or_else(|| Error::WebGl("failed to create buffer".into()))?;
        gl.bind_buffer(GL::ARRAY_BUFFER, Some(&buffer));
        let vertices = js_sys::Float32Array::from(&QUAD[..]);
        gl.buffer_data_with_array_buffer_view(GL::ARRAY_BUFFER, &vertices, GL::STATIC_DRAW);
        let position = gl.get_attrib_location(&program, "position");
        if position < 0 {
            return Err(Error::WebGl("vertex shader has no `position` attribute".into()));
        }
        gl.enable_vertex_attrib_array(position as u32);
        gl.vertex_attrib_pointer_with_i32(position as u32, 2, GL::FLOAT, false, 0, 0);
        gl.bind_vertex_array(None);

        let textures = images
            .iter()
            .map(|image| textures::upload(&gl, image))
            .collect::<Result<Vec<_>>>()?;
        let displacement = match displacement {
            Some(image) => textures::upload(&gl, image)?,
            None => textures::placeholder(&gl)?,
        };

        let mut names: Vec<&str> = RESERVED_UNIFORMS.to_vec();
        names.extend(extra_uniforms);
        let mut locations = HashMap::new();
        for name in names {
            // Uniforms the shader does not use are optimised away; skip them.
            if let Some(location) = gl.get_uniform_location(&program, name) {
                locations.insert(name.to_string(), location);
            }
        }

        gl.clear_color(0.0, 0.0, 0.0, 0.0);
        Ok(Self {
            gl,
            canvas,
            program,
            vao,
            textures,
            displacement,
            locations,
            fit: CoverFit::new(1.0, 1.0, 1.0, 1.0),
        })
    }

    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }

    /// Sizes the drawing buffer to `width`x`height` CSS pixels at `pixel_ratio`
    /// and recomputes the cover fit of the first texture.
    pub fn resize(&mut self, width: f64, height: f64, pixel_ratio: f64) {
        let buffer_width = (width * pixel_ratio).round().max(1.0) as u32;
        let buffer_height = (height * pixel_ratio).round().max(1.0) as u32;
        self.canvas.set_width(buffer_width);
        self.canvas.set_height(buffer_height);
        let style = self.canvas.style();
        for (property, value) in [("width", width), ("height", height)] {
            if let Err(err) = style.set_property(property, &format!("{value}px")) {
                log::warn!("failed to set canvas {property}: {:?}", err);
            }
        }
        self.gl
            .viewport(0, 0, buffer_width as i32, buffer_height as i32);

        let first = &self.textures[0];
        self.fit = CoverFit::new(
            width as f32,
            height as f32,
            first.width as f32,
            first.height as f32,
        );
    }

    fn location(&self, name: &str) -> Option<&WebGlUniformLocation> {
        self.locations.get(name)
    }

    fn bind(&self, unit: u32, texture: &Texture, uniform: &str) {
        self.gl.active_texture(GL::TEXTURE0 + unit);
        self.gl.bind_texture(GL::TEXTURE_2D, Some(&texture.handle));
        self.gl.uniform1i(self.location(uniform), unit as i32);
    }

    pub fn draw(&self, pair: TexturePair, time: f32, settings: &UniformSet) {
        let gl = &self.gl;
        gl.clear(GL::COLOR_BUFFER_BIT);
        gl.use_program(Some(&self.program));

        let last = self.textures.len() - 1;
        self.bind(0, &self.textures[pair.current.min(last)], "texture1");
        self.bind(1, &self.textures[pair.next.min(last)], "texture2");
        self.bind(2, &self.displacement, "displacement");

        gl.uniform1f(self.location("progress"), pair.progress);
        gl.uniform1f(self.location("time"), time);
        gl.uniform4fv_with_f32_array(self.location("resolution"), &self.fit.as_vec4());
        for (name, setting) in settings.iter() {
            gl.uniform1f(self.location(name), setting.value);
        }

        gl.bind_vertex_array(Some(&self.vao));
        gl.draw_arrays(GL::TRIANGLE_STRIP, 0, 4);
        gl.bind_vertex_array(None);
    }
}

fn alpha_context_options() -> JsValue {
    let options = js_sys::Object::new();
    js_sys::Reflect::set(&options, &"alpha".into(), &JsValue::TRUE).ok();
    js_sys::Reflect::set(&options, &"premultipliedAlpha".into(), &JsValue::FALSE).ok();
    options.into()
}

fn compile_shader(gl: &GL, kind: u32, source: &str) -> Result<WebGlShader> {
    let stage = if kind == GL::VERTEX_SHADER {
        "vertex"
    } else {
        "fragment"
    };
    let shader = gl
        .create_shader(kind)
        .ok_or_else(|| Error::WebGl(format!("failed to create {stage} shader")))?;
    gl.shader_source(&shader, source);
    gl.compile_shader(&shader);

    let compiled = gl
        .get_shader_parameter(&shader, GL::COMPILE_STATUS)
        .as_bool()
        .unwrap_or(false);
    if compiled {
        Ok(shader)
    } else {
        let log = gl.get_shader_info_log(&shader).unwrap_or_default();
        gl.delete_shader(Some(&shader));
        Err(Error::ShaderCompile { stage, log })
    }
}

fn link_program(gl: &GL, vertex: &WebGlShader, fragment: &WebGlShader) -> Result<WebGlProgram> {
    let program = gl
        .create_program()
        .ok_or_else(|| Error::WebGl("failed to create program".into()))?;
    gl.attach_shader(&program, vertex);
    gl.attach_shader(&program, fragment);
    gl.link_program(&program);

    let linked = gl
        .get_program_parameter(&program, GL::LINK_STATUS)
        .as_bool()
        .unwrap_or(false);
    if linked {
        Ok(program)
    } else {
        let log = gl.get_program_info_log(&program).unwrap_or_default();
        gl.delete_program(Some(&program));
        Err(Error::ProgramLink(log))
    }
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// requestAnimationFrame loop that stops rescheduling itself while paused.
pub struct FrameLoop {
    state: Rc<RefCell<LoopState>>,
    callback: FrameCallback,
}

impl FrameLoop {
    pub fn new(sketch: Rc<RefCell<Sketch>>) -> Self {
        let state = Rc::new(RefCell::new(LoopState::new()));
        // `callback` holds the animation-frame closure so that it can keep
        // calling `request_animation_frame` on itself.
        let callback: FrameCallback = Rc::new(RefCell::new(None));
        let this = callback.clone();
        let frame_state = state.clone();
        *callback.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            if !frame_state.borrow_mut().begin_frame() {
                return;
            }
            let Some(window) = window() else {
                frame_state.borrow_mut().schedule_failed();
                return;
            };
            sketch.borrow_mut().render(dom::now_secs(&window));
            if let Some(callback) = this.borrow().as_ref() {
                if let Err(err) = window.request_animation_frame(callback.as_ref().unchecked_ref()) {
                    frame_state.borrow_mut().schedule_failed();
                    log::error!("failed to schedule frame: {:?}", err);
                }
            }
        }) as Box<dyn FnMut()>));

        Self { state, callback }
    }

    pub fn play(&self) -> Result<()> {
        if !self.state.borrow_mut().play() {
            return Ok(());
        }
        let scheduled = window()
            .ok_or_else(|| Error::Js("no window".into()))
            .and_then(|window| match self.callback.borrow().as_ref() {
                Some(callback) => window
                    .request_animation_frame(callback.as_ref().unchecked_ref())
                    .map(|_| ())
                    .map_err(Error::from),
                None => Err(Error::Js("frame callback missing".into())),
            });
        if scheduled.is_err() {
            self.state.borrow_mut().schedule_failed();
        }
        scheduled
    }

    pub fn stop(&self) {
        self.state.borrow_mut().stop();
    }
}
