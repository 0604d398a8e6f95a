use image::{imageops, Rgba, RgbaImage};
use imageproc::{drawing::draw_filled_rect_mut, rect::Rect};
use kurbo::{BezPath, PathEl, Shape};
use tiny_skia::{FillRule, Mask, PathBuilder, Transform};

/// Accuracy, in pixels, used when curved marks are converted to paths.
pub const TOLERANCE: f64 = 0.01;

// Mark
//------------------------------------------------------------------------------

/// A filled area in canvas pixel space.
#[derive(Debug, Clone, PartialEq)]
pub enum Mark {
    Rect { x: f32, y: f32, w: f32, h: f32 },
    Path(BezPath),
}

impl Mark {
    pub fn bounds(&self) -> Option<kurbo::Rect> {
        match self {
            Self::Rect { x, y, w, h } => {
                let (x, y) = (f64::from(*x), f64::from(*y));
                Some(kurbo::Rect::new(x, y, x + f64::from(*w), y + f64::from(*h)))
            }
            Self::Path(path) if path.elements().is_empty() => None,
            Self::Path(path) => Some(path.bounding_box()),
        }
    }
}

// Canvas
//------------------------------------------------------------------------------

/// Square RGBA drawing surface owned by a single render.
///
/// A pixel belongs to a shape when its center lies inside it. Fills write the
/// colour as-is; only [`Canvas::draw_image`] blends.
#[derive(Debug, Clone)]
pub struct Canvas {
    img: RgbaImage,
}

impl Canvas {
    pub fn new(size: u32, background: Rgba<u8>) -> Self {
        Self { img: RgbaImage::from_pixel(size, size, background) }
    }

    pub fn size(&self) -> u32 {
        self.img.width()
    }

    pub fn image(&self) -> &RgbaImage {
        &self.img
    }

    pub fn into_image(self) -> RgbaImage {
        self.img
    }

    pub fn fill(&mut self, mark: &Mark, color: Rgba<u8>) {
        match mark {
            Mark::Rect { x, y, w, h } => self.fill_rect(*x, *y, *w, *h, color),
            Mark::Path(path) => self.fill_path(path, color),
        }
    }

    pub fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Rgba<u8>) {
        let (x0, x1) = self.span(x, x + w);
        let (y0, y1) = self.span(y, y + h);
        if x1 <= x0 || y1 <= y0 {
            return;
        }
        let rect = Rect::at(x0 as i32, y0 as i32).of_size((x1 - x0) as u32, (y1 - y0) as u32);
        draw_filled_rect_mut(&mut self.img, rect, color);
    }

    /// Fills `path` with the nonzero winding rule, without anti-aliasing.
    ///
    /// Coverage is rasterized into a mask the size of the path's pixel
    /// bounds, then every covered pixel takes `color`.
    pub fn fill_path(&mut self, path: &BezPath, color: Rgba<u8>) {
        if path.elements().is_empty() {
            return;
        }
        let Some(outline) = to_skia(path) else { return };

        let bounds = path.bounding_box();
        let size = f64::from(self.size());
        let (x0, y0) = (bounds.x0.floor().clamp(0.0, size), bounds.y0.floor().clamp(0.0, size));
        let (x1, y1) = (bounds.x1.ceil().clamp(0.0, size), bounds.y1.ceil().clamp(0.0, size));
        let Some(mut mask) = Mask::new((x1 - x0) as u32, (y1 - y0) as u32) else { return };

        let shift = Transform::from_translate(-x0 as f32, -y0 as f32);
        mask.fill_path(&outline, FillRule::Winding, false, shift);

        let (ox, oy, w) = (x0 as u32, y0 as u32, mask.width());
        for (i, &coverage) in mask.data().iter().enumerate() {
            if coverage != 0 {
                let i = i as u32;
                self.img.put_pixel(ox + i % w, oy + i / w, color);
            }
        }
    }

    /// Scales `src` into the `size` x `size` box at (x, y), alpha compositing it
    /// over the current contents.
    pub fn draw_image(&mut self, src: &RgbaImage, x: f32, y: f32, size: f32) {
        let side = size.round();
        if side < 1.0 || src.width() == 0 || src.height() == 0 {
            return;
        }
        let side = side as u32;
        let scaled = imageops::resize(src, side, side, imageops::FilterType::Lanczos3);
        imageops::overlay(&mut self.img, &scaled, x.round() as i64, y.round() as i64);
    }

    /// Half-open pixel range whose centers fall in [from, to), clamped to the canvas.
    fn span(&self, from: f32, to: f32) -> (i64, i64) {
        let size = self.size() as i64;
        let first = |v: f32| ((v - 0.5).ceil() as i64).clamp(0, size);
        (first(from), first(to))
    }
}

// Same outline in the rasterizer's single precision path type
fn to_skia(path: &BezPath) -> Option<tiny_skia::Path> {
    let pt = |p: kurbo::Point| (p.x as f32, p.y as f32);
    let mut pb = PathBuilder::new();
    for el in path.elements() {
        match *el {
            PathEl::MoveTo(p) => {
                let (x, y) = pt(p);
                pb.move_to(x, y);
            }
            PathEl::LineTo(p) => {
                let (x, y) = pt(p);
                pb.line_to(x, y);
            }
            PathEl::QuadTo(p1, p2) => {
                let ((x1, y1), (x, y)) = (pt(p1), pt(p2));
                pb.quad_to(x1, y1, x, y);
            }
            PathEl::CurveTo(p1, p2, p3) => {
                let ((x1, y1), (x2, y2), (x, y)) = (pt(p1), pt(p2), pt(p3));
                pb.cubic_to(x1, y1, x2, y2, x, y);
            }
            PathEl::ClosePath => pb.close(),
        }
    }
    pb.finish()
}
