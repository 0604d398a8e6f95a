//! Design descriptor: the style configuration sent by the editor UI.
//!
//! Every field is optional and parsed leniently, so a descriptor never fails to
//! load. [`Design::resolve`] applies the fallback chains and produces a [`Style`]
//! with concrete colours and shapes.

use image::Rgba;
use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize};

use crate::render::shapes::{self, Shape};

pub const DEFAULT_LOGO_SIZE: f32 = 0.2;
pub const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);
pub const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

// Raw descriptor
//------------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Design {
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub background: Option<Fill>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub dots: Option<Part>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub corners_square: Option<Part>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub corners_dot: Option<Part>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub image: Option<Image>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub image_options: Option<ImageOptions>,

    // Fields used by the live preview editor
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub logo: Option<Image>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub color: Option<Palette>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Fill {
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Part {
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Image {
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub size: Option<f32>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub hide_background_dots: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImageOptions {
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub image_size: Option<f32>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub hide_background_dots: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub dark: Option<String>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub light: Option<String>,
}

/// Deserializes a field, treating a value of the wrong shape as absent.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

impl Design {
    /// Parses a descriptor. Malformed JSON yields the default design.
    pub fn from_json(json: &str) -> Self {
        serde_json::from_str(json).unwrap_or_else(|e| {
            log::warn!("Malformed design descriptor, using defaults: {e}");
            Self::default()
        })
    }

    pub fn from_value(value: serde_json::Value) -> Self {
        serde_json::from_value(value).unwrap_or_else(|e| {
            log::warn!("Malformed design descriptor, using defaults: {e}");
            Self::default()
        })
    }

    pub fn logo_url(&self) -> Option<&str> {
        self.image
            .as_ref()
            .and_then(|i| i.url.as_deref())
            .or_else(|| self.logo.as_ref().and_then(|l| l.url.as_deref()))
            .filter(|url| !url.trim().is_empty())
    }

    pub fn resolve(&self) -> Style {
        let dots = self.dots.as_ref();
        let palette = self.color.as_ref();

        let background = first_color([
            self.background.as_ref().and_then(|b| b.color.as_deref()),
            palette.and_then(|p| p.light.as_deref()),
        ])
        .unwrap_or(WHITE);
        let dot_color = first_color([
            dots.and_then(|d| d.color.as_deref()),
            palette.and_then(|p| p.dark.as_deref()),
        ])
        .unwrap_or(BLACK);
        let frame_color = first_color([self.corners_square.as_ref().and_then(|p| p.color.as_deref())])
            .unwrap_or(dot_color);
        let ball_color = first_color([self.corners_dot.as_ref().and_then(|p| p.color.as_deref())])
            .unwrap_or(dot_color);

        let dot_style = dots.and_then(|d| d.style.as_deref()).map_or(DotStyle::Square, DotStyle::parse);
        let frame_name = self.corners_square.as_ref().and_then(|p| p.style.as_deref()).unwrap_or("square");
        let ball_name = self.corners_dot.as_ref().and_then(|p| p.style.as_deref()).unwrap_or("dot");

        Style {
            background,
            dot_color,
            dot_style,
            frame_color,
            frame: shapes::frame(frame_name),
            ball_color,
            ball: shapes::ball(ball_name),
            logo: self.logo_style(),
        }
    }

    fn logo_style(&self) -> LogoStyle {
        let opts = self.image_options.as_ref();
        let image = self.image.as_ref();

        // Zero or unusable sizes fall through to the next source
        let usable = |s: &f32| s.is_finite() && *s > 0.0;
        let size = opts
            .and_then(|o| o.image_size)
            .filter(usable)
            .or_else(|| image.and_then(|i| i.size).filter(usable))
            .map_or(DEFAULT_LOGO_SIZE, |s| s.min(1.0));
        let hide_background_dots = opts.and_then(|o| o.hide_background_dots).unwrap_or(false)
            || image.and_then(|i| i.hide_background_dots).unwrap_or(false);

        LogoStyle { size, hide_background_dots }
    }
}

// Resolved style
//------------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DotStyle {
    #[default]
    Square,
    Dots,
    Rounded,
    ExtraRounded,
    Classy,
    ClassyRounded,
}

impl DotStyle {
    pub const ALL: [&'static str; 6] =
        ["square", "dots", "rounded", "extra-rounded", "classy", "classy-rounded"];

    /// Unknown names fall back to `Square`.
    pub fn parse(name: &str) -> Self {
        match name {
            "dots" => Self::Dots,
            "rounded" => Self::Rounded,
            "extra-rounded" => Self::ExtraRounded,
            "classy" => Self::Classy,
            "classy-rounded" => Self::ClassyRounded,
            _ => Self::Square,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogoStyle {
    /// Logo side as a fraction of the canvas side.
    pub size: f32,
    pub hide_background_dots: bool,
}

impl Default for LogoStyle {
    fn default() -> Self {
        Self { size: DEFAULT_LOGO_SIZE, hide_background_dots: false }
    }
}

/// Fully defaulted design. `frame`/`ball` are `None` when the style name is not
/// in the catalog, which selects the rectangular fallback.
#[derive(Debug, Clone, Copy)]
pub struct Style {
    pub background: Rgba<u8>,
    pub dot_color: Rgba<u8>,
    pub dot_style: DotStyle,
    pub frame_color: Rgba<u8>,
    pub frame: Option<&'static Shape>,
    pub ball_color: Rgba<u8>,
    pub ball: Option<&'static Shape>,
    pub logo: LogoStyle,
}

impl Default for Style {
    fn default() -> Self {
        Design::default().resolve()
    }
}

// Colors
//------------------------------------------------------------------------------

fn first_color<const N: usize>(candidates: [Option<&str>; N]) -> Option<Rgba<u8>> {
    candidates.into_iter().flatten().find_map(parse_color)
}

/// Parses `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa` and a few CSS names.
pub fn parse_color(s: &str) -> Option<Rgba<u8>> {
    let s = s.trim();
    match s.to_ascii_lowercase().as_str() {
        "black" => return Some(BLACK),
        "white" => return Some(WHITE),
        "transparent" => return Some(Rgba([0, 0, 0, 0])),
        _ => {}
    }

    let hex = s.strip_prefix('#')?;
    if !hex.is_ascii() {
        return None;
    }
    let nibble = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|v| v * 17);
    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();

    let [r, g, b, a] = match hex.len() {
        3 => [nibble(0)?, nibble(1)?, nibble(2)?, 255],
        4 => [nibble(0)?, nibble(1)?, nibble(2)?, nibble(3)?],
        6 => [byte(0)?, byte(2)?, byte(4)?, 255],
        8 => [byte(0)?, byte(2)?, byte(4)?, byte(6)?],
        _ => return None,
    };
    Some(Rgba([r, g, b, a]))
}
