use std::time::Duration;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use image::{Rgba, RgbaImage};
use thiserror::Error;

use super::canvas::Canvas;
use crate::common::design::LogoStyle;

/// Pixels cleared past each logo edge when background dots are hidden.
pub const CLEAR_PADDING: f32 = 5.0;
/// Default cap on the encoded size of a logo.
pub const DEFAULT_MAX_LOGO_BYTES: usize = 8 << 20;

// Errors
//------------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum LogoError {
    #[error("http: {0}")]
    Http(#[from] reqwest::Error),
    #[error("http client unavailable")]
    NoClient,
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("base64: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("image: {0}")]
    Image(#[from] image::ImageError),
    #[error("unsupported logo source: {0}")]
    Unsupported(String),
    #[error("timed out after {0:?}")]
    Timeout(Duration),
    #[error("larger than {0} bytes")]
    TooLarge(usize),
    #[error("local logo files are disabled")]
    LocalDisabled,
}

// Loader
//------------------------------------------------------------------------------

/// Best effort logo acquisition. Any failure is logged and yields no logo.
///
/// Only `data:` and `http(s)://` sources are accepted unless local files are
/// allowed with [`LogoLoader::allow_local`].
#[derive(Debug, Clone)]
pub struct LogoLoader {
    client: Option<reqwest::Client>,
    timeout: Duration,
    max_bytes: usize,
    allow_local: bool,
}

impl LogoLoader {
    pub fn new(timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| log::warn!("Failed to build HTTP client, remote logos disabled: {e}"))
            .ok();
        Self { client, timeout, max_bytes: DEFAULT_MAX_LOGO_BYTES, allow_local: false }
    }

    /// Largest encoded logo, in bytes, that is read.
    pub fn max_bytes(mut self, max_bytes: usize) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    /// Whether `file://` URLs and plain filesystem paths are read.
    pub fn allow_local(mut self, allow_local: bool) -> Self {
        self.allow_local = allow_local;
        self
    }

    /// Loads and decodes the logo at `src`: a `data:` URI, an `http(s)://` or
    /// `file://` URL, or a filesystem path.
    pub async fn load(&self, src: &str) -> Option<RgbaImage> {
        let res = match tokio::time::timeout(self.timeout, self.fetch(src)).await {
            Ok(res) => res,
            Err(_) => Err(LogoError::Timeout(self.timeout)),
        };
        match res.and_then(|bytes| Ok(image::load_from_memory(&bytes)?.to_rgba8())) {
            Ok(img) => {
                log::debug!("Loaded {}x{} logo", img.width(), img.height());
                Some(img)
            }
            Err(e) => {
                log::warn!("Skipping logo {}: {e}", preview(src));
                None
            }
        }
    }

    async fn fetch(&self, src: &str) -> Result<Vec<u8>, LogoError> {
        let src = src.trim();
        if src.starts_with("data:") {
            // Base64 carries three bytes per four characters
            let encoded = src.split_once(',').map_or(0, |(_, data)| data.len());
            if encoded / 4 * 3 > self.max_bytes.saturating_add(3) {
                return Err(LogoError::TooLarge(self.max_bytes));
            }
            return self.capped(decode_data_uri(src)?);
        }
        if src.starts_with("http://") || src.starts_with("https://") {
            return self.download(src).await;
        }
        if src.contains("://") && !src.starts_with("file://") {
            return Err(LogoError::Unsupported(preview(src).to_string()));
        }
        if !self.allow_local {
            return Err(LogoError::LocalDisabled);
        }
        let path = src.strip_prefix("file://").unwrap_or(src);
        if tokio::fs::metadata(path).await?.len() > self.max_bytes as u64 {
            return Err(LogoError::TooLarge(self.max_bytes));
        }
        self.capped(tokio::fs::read(path).await?)
    }

    async fn download(&self, url: &str) -> Result<Vec<u8>, LogoError> {
        let client = self.client.as_ref().ok_or(LogoError::NoClient)?;
        let mut res = client.get(url).send().await?.error_for_status()?;
        if res.content_length().is_some_and(|len| len > self.max_bytes as u64) {
            return Err(LogoError::TooLarge(self.max_bytes));
        }
        let mut bytes = Vec::new();
        while let Some(chunk) = res.chunk().await? {
            if bytes.len() + chunk.len() > self.max_bytes {
                return Err(LogoError::TooLarge(self.max_bytes));
            }
            bytes.extend_from_slice(&chunk);
        }
        Ok(bytes)
    }

    fn capped(&self, bytes: Vec<u8>) -> Result<Vec<u8>, LogoError> {
        if bytes.len() > self.max_bytes {
            return Err(LogoError::TooLarge(self.max_bytes));
        }
        Ok(bytes)
    }
}

impl Default for LogoLoader {
    fn default() -> Self {
        Self::new(Duration::from_millis(5000))
    }
}

/// Decodes a base64 `data:` URI into raw bytes.
pub fn decode_data_uri(uri: &str) -> Result<Vec<u8>, LogoError> {
    let (meta, data) = uri
        .strip_prefix("data:")
        .and_then(|rest| rest.split_once(','))
        .ok_or_else(|| LogoError::Unsupported("data URI without payload".into()))?;
    if !meta.ends_with(";base64") {
        return Err(LogoError::Unsupported(format!("data URI encoding {meta:?}")));
    }
    let data: String = data.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    Ok(BASE64.decode(data)?)
}

// Truncates long sources such as data URIs for log lines
fn preview(src: &str) -> &str {
    match src.char_indices().nth(64) {
        Some((i, _)) => &src[..i],
        None => src,
    }
}

// Compositor
//------------------------------------------------------------------------------

/// Logo box (x, y, side) centered on a canvas of side `canvas`.
pub fn logo_box(canvas: u32, style: &LogoStyle) -> (f32, f32, f32) {
    let size = canvas as f32 * style.size;
    let origin = (canvas as f32 - size) / 2.0;
    (origin, origin, size)
}

/// Clears the area under the logo if requested, then draws the logo on top.
pub fn composite_logo(canvas: &mut Canvas, logo: &RgbaImage, style: &LogoStyle, background: Rgba<u8>) {
    let (x, y, size) = logo_box(canvas.size(), style);
    if style.hide_background_dots {
        let side = size + 2.0 * CLEAR_PADDING;
        canvas.fill_rect(x - CLEAR_PADDING, y - CLEAR_PADDING, side, side, background);
    }
    canvas.draw_image(logo, x, y, size);
    log::debug!("Composited logo at ({x}, {y}) size {size}");
}
