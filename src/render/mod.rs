//! Styled raster rendering.
//!
//! The pipeline paints one owned [`Canvas`] in a fixed order: background, data
//! modules, the three eyes, then the optional logo. Only logo acquisition is
//! async; everything else is a pure function of the matrix, style and config.

use std::io::Cursor;

use image::{ImageFormat, RgbaImage};

use crate::common::{
    config::RenderConfig,
    design::{Design, Style},
    error::QRResult,
    matrix::ModuleMatrix,
};

pub mod body;
pub mod canvas;
pub mod eyes;
pub mod logo;
pub mod shapes;

pub use canvas::{Canvas, Mark};
pub use logo::LogoLoader;

// Renderer
//------------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Renderer {
    config: RenderConfig,
    logos: LogoLoader,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(RenderConfig::default())
    }
}

impl Renderer {
    pub fn new(config: RenderConfig) -> Self {
        let logos = LogoLoader::new(config.logo_timeout_duration())
            .max_bytes(config.logo_max_bytes)
            .allow_local(config.local_logos);
        Self { config, logos }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Paints the styled symbol onto a fresh surface.
    pub fn render_surface(
        &self,
        matrix: &ModuleMatrix,
        style: &Style,
        logo: Option<&RgbaImage>,
    ) -> RgbaImage {
        let geo = self.config.profile.geometry(matrix.width());
        log::debug!(
            "Rendering {0}x{0} matrix on {1}px canvas, {2:.3}px modules",
            matrix.width(),
            geo.canvas,
            geo.cell
        );

        let mut canvas = Canvas::new(geo.canvas, style.background);
        body::render_body(&mut canvas, matrix, &geo, style);
        eyes::render_eyes(&mut canvas, matrix, &geo, style);
        if let Some(logo) = logo {
            logo::composite_logo(&mut canvas, logo, &style.logo, style.background);
        }
        canvas.into_image()
    }

    /// Renders with an already decoded logo and encodes the result as PNG.
    pub fn render_with_logo(
        &self,
        matrix: &ModuleMatrix,
        design: &Design,
        logo: Option<&RgbaImage>,
    ) -> QRResult<Vec<u8>> {
        encode_png(&self.render_surface(matrix, &design.resolve(), logo))
    }

    /// Fetches the design's logo, if any, then renders to PNG.
    pub async fn render(&self, matrix: &ModuleMatrix, design: &Design) -> QRResult<Vec<u8>> {
        let logo = match design.logo_url() {
            Some(url) => self.logos.load(url).await,
            None => None,
        };
        self.render_with_logo(matrix, design, logo.as_ref())
    }

    /// Encodes `payload` at the configured error correction level and renders it.
    pub async fn generate(&self, payload: &str, design: &Design) -> QRResult<Vec<u8>> {
        let matrix = ModuleMatrix::encode(payload.as_bytes(), self.config.ec_level)?;
        self.render(&matrix, design).await
    }
}

// Output encoder
//------------------------------------------------------------------------------

pub fn encode_png(img: &RgbaImage) -> QRResult<Vec<u8>> {
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, ImageFormat::Png)?;
    Ok(buf.into_inner())
}
