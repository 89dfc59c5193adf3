use wasm_bindgen_futures::JsFuture;
use web_sys::{HtmlImageElement, WebGl2RenderingContext as GL, WebGlTexture};

use crate::error::{Error, Result};

const PLACEHOLDER_TEXEL: [u8; 4] = [128, 128, 128, 255];

pub struct Texture {
    pub handle: WebGlTexture,
    pub width: u32,
    pub height: u32,
}

fn request(url: &str) -> Result<HtmlImageElement> {
    let image = HtmlImageElement::new()?;
    image.set_cross_origin(Some("anonymous"));
    image.set_src(url);
    Ok(image)
}

async fn decoded(url: &str, image: &HtmlImageElement) -> Result<()> {
    JsFuture::from(image.decode())
        .await
        .map(|_| ())
        .map_err(|err| Error::TextureLoad {
            url: url.to_string(),
            reason: Error::from(err).to_string(),
        })
}

/// Starts every request up front, then waits for all of them. The first
/// failure aborts the whole batch.
pub async fn load_images(urls: &[String]) -> Result<Vec<HtmlImageElement>> {
    let pending = urls
        .iter()
        .map(|url| request(url).map(|image| (url, image)))
        .collect::<Result<Vec<_>>>()?;

    let mut images = Vec::with_capacity(pending.len());
    for (url, image) in pending {
        decoded(url, &image).await?;
        log::debug!(
            "loaded {url} ({}x{})",
            image.natural_width(),
            image.natural_height()
        );
        images.push(image);
    }
    Ok(images)
}

fn create(gl: &GL) -> Result<WebGlTexture> {
    let texture = gl
        .create_texture()
        .ok_or_else(|| Error::WebGl("failed to create texture".into()))?;
    gl.bind_texture(GL::TEXTURE_2D, Some(&texture));
    gl.tex_parameteri(GL::TEXTURE_2D, GL::TEXTURE_MIN_FILTER, GL::LINEAR as i32);
    gl.tex_parameteri(GL::TEXTURE_2D, GL::TEXTURE_MAG_FILTER, GL::LINEAR as i32);
    gl.tex_parameteri(GL::TEXTURE_2D, GL::TEXTURE_WRAP_S, GL::CLAMP_TO_EDGE as i32);
    gl.tex_parameteri(GL::TEXTURE_2D, GL::TEXTURE_WRAP_T, GL::CLAMP_TO_EDGE as i32);
    Ok(texture)
}

pub fn upload(gl: &GL, image: &HtmlImageElement) -> Result<Texture> {
    let handle = create(gl)?;
    gl.pixel_storei(GL::UNPACK_FLIP_Y_WEBGL, 1);
    gl.tex_image_2d_with_u32_and_u32_and_html_image_element(
        GL::TEXTURE_2D,
        0,
        GL::RGBA as i32,
        GL::RGBA,
        GL::UNSIGNED_BYTE,
        image,
    )?;
    Ok(Texture {
        handle,
        width: image.natural_width(),
        height: image.natural_height(),
    })
}

/// Flat grey 1x1 texture bound when no displacement map is configured.
pub fn placeholder(gl: &GL) -> Result<Texture> {
    let handle = create(gl)?;
    gl.tex_image_2d_with_i32_and_i32_and_i32_and_format_and_type_and_opt_u8_array(
        GL::TEXTURE_2D,
        0,
        GL::RGBA as i32,
        1,
        1,
        0,
        GL::RGBA,
        GL::UNSIGNED_BYTE,
        Some(&PLACEHOLDER_TEXEL),
    )?;
    Ok(Texture {
        handle,
        width: 1,
        height: 1,
    })
}
