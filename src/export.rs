//! Conversions for downstream formats: JPEG and PDF from the rendered PNG and a
//! plain SVG built directly from the module matrix.

use std::{fmt::Write, io::Cursor};

use image::{codecs::jpeg::JpegEncoder, Pixel, Rgba, RgbaImage};
use printpdf::{
    Mm, Op, PdfDocument, PdfPage, PdfSaveOptions, Pt, RawImage, RawImageData, RawImageFormat, XObjectTransform,
};

use crate::common::{
    design::{Style, BLACK, WHITE},
    error::QRResult,
    matrix::ModuleMatrix,
};

pub const DEFAULT_JPEG_QUALITY: u8 = 95;

// JPEG
//------------------------------------------------------------------------------

/// Re-encodes a PNG as JPEG. Transparent areas are flattened onto white.
pub fn png_to_jpeg(png: &[u8], quality: u8) -> QRResult<Vec<u8>> {
    let img = image::load_from_memory(png)?.to_rgba8();
    let flat = flatten(&img, WHITE);

    let mut buf = Cursor::new(Vec::new());
    JpegEncoder::new_with_quality(&mut buf, quality.clamp(1, 100)).encode_image(&flat)?;
    Ok(buf.into_inner())
}

fn flatten(img: &RgbaImage, backdrop: Rgba<u8>) -> image::RgbImage {
    image::RgbImage::from_fn(img.width(), img.height(), |x, y| {
        let mut px = backdrop;
        px.blend(img.get_pixel(x, y));
        px.to_rgb()
    })
}

// PDF
//------------------------------------------------------------------------------

/// Wraps a PNG in a single page PDF. The page measures one point per pixel and
/// transparent areas are flattened onto white.
pub fn png_to_pdf(png: &[u8]) -> QRResult<Vec<u8>> {
    let flat = flatten(&image::load_from_memory(png)?.to_rgba8(), WHITE);
    let (w, h) = flat.dimensions();

    let mut doc = PdfDocument::new("QR Code");
    let image = RawImage {
        pixels: RawImageData::U8(flat.into_raw()),
        width: w as usize,
        height: h as usize,
        data_format: RawImageFormat::RGB8,
        tag: Vec::new(),
    };
    let id = doc.add_image(&image);

    // At 72 dpi one pixel covers one point
    let ops = vec![Op::UseXobject {
        id,
        transform: XObjectTransform { dpi: Some(72.0), ..Default::default() },
    }];
    let (page_w, page_h): (Mm, Mm) = (Pt(w as f32).into(), Pt(h as f32).into());
    doc.pages.push(PdfPage::new(page_w, page_h, ops));

    let mut warnings = Vec::new();
    let pdf = doc.save(&PdfSaveOptions::default(), &mut warnings);
    if !warnings.is_empty() {
        log::debug!("PDF export produced {} warnings", warnings.len());
    }
    Ok(pdf)
}

// SVG
//------------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SvgOptions {
    pub dark: Rgba<u8>,
    pub light: Rgba<u8>,
    /// Margin in modules.
    pub quiet_zone: u32,
    /// Module side in SVG user units.
    pub module_size: u32,
}

impl Default for SvgOptions {
    fn default() -> Self {
        Self { dark: BLACK, light: WHITE, quiet_zone: 4, module_size: 10 }
    }
}

impl SvgOptions {
    /// Dot colour on the background colour of a resolved design.
    pub fn from_style(style: &Style) -> Self {
        Self { dark: style.dot_color, light: style.background, ..Self::default() }
    }
}

/// Plain square-module SVG of `matrix`, adjacent dark modules in a row merged
/// into one rect.
pub fn matrix_to_svg(matrix: &ModuleMatrix, opts: &SvgOptions) -> String {
    let w = matrix.width();
    let m = opts.module_size.max(1) as usize;
    let size = (w + 2 * opts.quiet_zone as usize) * m;
    let offset = opts.quiet_zone as usize * m;

    let mut svg = format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {size} {size}" width="{size}" height="{size}" shape-rendering="crispEdges">
<rect width="{size}" height="{size}"{}/>
"#,
        fill_attrs(opts.light)
    );

    let dark = fill_attrs(opts.dark);
    for r in 0..w {
        let mut c = 0;
        while c < w {
            if !matrix.get(r, c) {
                c += 1;
                continue;
            }
            let start = c;
            while c < w && matrix.get(r, c) {
                c += 1;
            }
            let _ = writeln!(
                svg,
                r#"<rect x="{}" y="{}" width="{}" height="{m}"{dark}/>"#,
                offset + start * m,
                offset + r * m,
                (c - start) * m,
            );
        }
    }

    svg.push_str("</svg>\n");
    svg
}

fn fill_attrs(color: Rgba<u8>) -> String {
    let [r, g, b, a] = color.0;
    let mut attrs = format!(r##" fill="#{r:02x}{g:02x}{b:02x}""##);
    if a != 255 {
        let _ = write!(attrs, r#" fill-opacity="{:.3}""#, a as f32 / 255.0);
    }
    attrs
}
