use kurbo::{BezPath, Circle, RoundedRect, Shape};

use super::canvas::{Canvas, Mark, TOLERANCE};
use crate::common::{
    config::Geometry,
    design::{DotStyle, Style},
    matrix::ModuleMatrix,
};

/// Draws every dark module outside the finder patterns.
pub fn render_body(canvas: &mut Canvas, matrix: &ModuleMatrix, geo: &Geometry, style: &Style) {
    let mut drawn = 0;
    for (r, c) in matrix.data_modules() {
        let (x, y) = geo.module_origin(r, c);
        canvas.fill(&dot_mark(style.dot_style, x, y, geo.cell), style.dot_color);
        drawn += 1;
    }
    log::debug!("Drew {drawn} data modules as {:?}", style.dot_style);
}

/// Shape for one data module whose cell starts at (x, y).
pub fn dot_mark(dot_style: DotStyle, x: f32, y: f32, cell: f32) -> Mark {
    let (px, py, side) = (f64::from(x), f64::from(y), f64::from(cell));
    let half = side / 2.0;
    let path = match dot_style {
        DotStyle::Square => return Mark::Rect { x, y, w: cell, h: cell },
        DotStyle::Dots => Circle::new((px + half, py + half), half).to_path(TOLERANCE),
        DotStyle::Rounded => RoundedRect::new(px, py, px + side, py + side, 0.25 * side).to_path(TOLERANCE),
        DotStyle::ExtraRounded => RoundedRect::new(px, py, px + side, py + side, half).to_path(TOLERANCE),
        DotStyle::Classy | DotStyle::ClassyRounded => {
            let mut diamond = BezPath::new();
            diamond.move_to((px + half, py));
            diamond.line_to((px + side, py + half));
            diamond.line_to((px + half, py + side));
            diamond.line_to((px, py + half));
            diamond.close_path();
            diamond
        }
    };
    Mark::Path(path)
}

#[cfg(test)]
mod body_tests {
    use proptest::prelude::*;
    use test_case::test_case;

    use super::{dot_mark, render_body};
    use crate::{
        common::{
            config::CanvasProfile,
            design::{Design, DotStyle, Style, BLACK, WHITE},
            matrix::{ModuleMatrix, FINDER_SIZE},
        },
        render::canvas::{Canvas, Mark},
    };

    #[test_case(DotStyle::Square)]
    #[test_case(DotStyle::Dots)]
    #[test_case(DotStyle::Rounded)]
    #[test_case(DotStyle::ExtraRounded)]
    #[test_case(DotStyle::Classy)]
    #[test_case(DotStyle::ClassyRounded)]
    fn test_dot_mark_stays_in_cell(dot_style: DotStyle) {
        let b = dot_mark(dot_style, 30.0, 40.0, 12.0).bounds().unwrap();
        assert!(b.x0 >= 30.0 - 0.05 && b.y0 >= 40.0 - 0.05);
        assert!(b.x1 <= 42.0 + 0.05 && b.y1 <= 52.0 + 0.05);
        // Every style reaches the middle of each cell edge
        assert!((b.width() - 12.0).abs() < 0.1 && (b.height() - 12.0).abs() < 0.1);
    }

    #[test]
    fn test_square_is_plain_rect() {
        assert_eq!(
            dot_mark(DotStyle::Square, 1.0, 2.0, 3.0),
            Mark::Rect { x: 1.0, y: 2.0, w: 3.0, h: 3.0 }
        );
    }

    #[test]
    fn test_dot_center_pixel_filled() {
        for dot_style in DotStyle::ALL.map(DotStyle::parse) {
            let mut canvas = Canvas::new(20, WHITE);
            canvas.fill(&dot_mark(dot_style, 0.0, 0.0, 20.0), BLACK);
            let img = canvas.image();
            assert_eq!(*img.get_pixel(10, 10), BLACK, "{dot_style:?}");
            if dot_style != DotStyle::Square {
                assert_eq!(*img.get_pixel(0, 0), WHITE, "{dot_style:?}");
            }
        }
    }

    #[test]
    fn test_body_skips_finders() {
        let matrix = ModuleMatrix::from_modules(21, vec![true; 441]).unwrap();
        let geo = CanvasProfile::PerModule { module_size: 4, quiet_zone: 0 }.geometry(21);
        let mut canvas = Canvas::new(geo.canvas, WHITE);
        render_body(&mut canvas, &matrix, &geo, &Style::default());
        let img = canvas.image();
        assert_eq!(*img.get_pixel(2, 2), WHITE);
        assert_eq!(*img.get_pixel(4 * 20 + 2, 2), WHITE);
        assert_eq!(*img.get_pixel(2, 4 * 20 + 2), WHITE);
        assert_eq!(*img.get_pixel(4 * 20 + 2, 4 * 20 + 2), BLACK);
        assert_eq!(*img.get_pixel(4 * 7 + 2, 4 * 7 + 2), BLACK);
    }

    #[test]
    fn test_unknown_style_matches_square() {
        let matrix = ModuleMatrix::encode(b"body", Default::default()).unwrap();
        let geo = CanvasProfile::STORED.geometry(matrix.width());
        let render = |json: &str| {
            let mut canvas = Canvas::new(geo.canvas, WHITE);
            render_body(&mut canvas, &matrix, &geo, &Design::from_json(json).resolve());
            canvas.into_image()
        };
        assert_eq!(
            render(r#"{ "dots": { "style": "nonexistent" } }"#),
            render(r#"{ "dots": { "style": "square" } }"#)
        );
    }

    proptest! {
        #[test]
        fn proptest_data_marks_avoid_finders(
            w in 21usize..=57,
            seed in any::<u64>(),
            style_idx in 0usize..DotStyle::ALL.len(),
        ) {
            let grid = (0..w * w).map(|i| (seed.rotate_left(i as u32 % 64) ^ i as u64) & 1 == 1).collect();
            let matrix = ModuleMatrix::from_modules(w, grid).unwrap();
            let geo = CanvasProfile::STORED.geometry(w);
            let dot_style = DotStyle::parse(DotStyle::ALL[style_idx]);
            let finder_px = FINDER_SIZE as f64 * f64::from(geo.cell);
            let far_px = (w - FINDER_SIZE) as f64 * f64::from(geo.cell);

            for (r, c) in matrix.data_modules() {
                let (x, y) = geo.module_origin(r, c);
                let b = dot_mark(dot_style, x, y, geo.cell).bounds().unwrap();
                let margin = f64::from(geo.margin);
                let (lo_x, lo_y) = (b.x0 - margin, b.y0 - margin);
                let (hi_x, hi_y) = (b.x1 - margin, b.y1 - margin);
                let eps = 0.05;
                let overlaps = |x0: f64, y0: f64| {
                    lo_x < x0 + finder_px - eps && hi_x > x0 + eps && lo_y < y0 + finder_px - eps && hi_y > y0 + eps
                };
                prop_assert!(!overlaps(0.0, 0.0), "({}, {}) in top-left finder", r, c);
                prop_assert!(!overlaps(far_px, 0.0), "({}, {}) in top-right finder", r, c);
                prop_assert!(!overlaps(0.0, far_px), "({}, {}) in bottom-left finder", r, c);
            }
        }
    }
}
