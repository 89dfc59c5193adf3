use wasm_bindgen::JsCast;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("at least 2 images are required for a transition, found {found}")]
    TooFewImages { found: usize },
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] serde_json::Error),
    #[error("element #{0} not found")]
    MissingElement(String),
    #[error("failed to load texture {url}: {reason}")]
    TextureLoad { url: String, reason: String },
    #[error("{stage} shader failed to compile: {log}")]
    ShaderCompile { stage: &'static str, log: String },
    #[error("shader program failed to link: {0}")]
    ProgramLink(String),
    #[error("webgl: {0}")]
    WebGl(String),
    #[error("javascript error: {0}")]
    Js(String),
}

impl From<wasm_bindgen::JsValue> for Error {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        let message = value
            .as_string()
            .or_else(|| {
                value
                    .dyn_ref::<js_sys::Error>()
                    .map(|err| String::from(err.message()))
            })
            .unwrap_or_else(|| format!("{value:?}"));
        Error::Js(message)
    }
}

impl From<Error> for wasm_bindgen::JsValue {
    fn from(err: Error) -> Self {
        js_sys::Error::new(&err.to_string()).into()
    }
}
