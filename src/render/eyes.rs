use image::Rgba;

use super::canvas::{Canvas, Mark};
use crate::common::{
    config::Geometry,
    design::Style,
    matrix::{ModuleMatrix, FINDER_SIZE},
};

/// Ball box offset from the eye origin, in modules.
const BALL_OFFSET: f32 = 2.0;
/// Ball box side, in modules.
const BALL_SIZE: f32 = 3.0;
/// Inset of the rectangular fallback ring, in modules. Not a QR requirement,
/// kept so unknown frame styles render the same as before.
const FALLBACK_RING_INSET: f32 = 1.0;

/// Draws the frame and ball at each of the three finder pattern anchors.
pub fn render_eyes(canvas: &mut Canvas, matrix: &ModuleMatrix, geo: &Geometry, style: &Style) {
    for (r, c) in matrix.finder_anchors() {
        let (x, y) = geo.module_origin(r, c);
        render_eye(canvas, x, y, geo.cell, style);
    }
    log::debug!(
        "Drew eyes with frame {:?} and ball {:?}",
        style.frame.map(|s| s.name),
        style.ball.map(|s| s.name)
    );
}

pub fn render_eye(canvas: &mut Canvas, x: f32, y: f32, cell: f32, style: &Style) {
    for (mark, color) in eye_marks(x, y, cell, style) {
        canvas.fill(&mark, color);
    }
}

/// Marks of one eye whose top-left corner is (x, y), in painting order.
pub fn eye_marks(x: f32, y: f32, cell: f32, style: &Style) -> Vec<(Mark, Rgba<u8>)> {
    let eye = FINDER_SIZE as f32 * cell;
    let mut marks = Vec::with_capacity(3);

    match style.frame {
        Some(shape) => marks.push((Mark::Path(shape.fit(x, y, eye)), style.frame_color)),
        None => {
            let inset = FALLBACK_RING_INSET * cell;
            let hole = eye - 2.0 * inset;
            marks.push((Mark::Rect { x, y, w: eye, h: eye }, style.frame_color));
            marks.push((Mark::Rect { x: x + inset, y: y + inset, w: hole, h: hole }, style.background));
        }
    }

    let (bx, by) = (x + BALL_OFFSET * cell, y + BALL_OFFSET * cell);
    let ball = BALL_SIZE * cell;
    match style.ball {
        Some(shape) => marks.push((Mark::Path(shape.fit(bx, by, ball)), style.ball_color)),
        None => marks.push((Mark::Rect { x: bx, y: by, w: ball, h: ball }, style.ball_color)),
    }

    marks
}

#[cfg(test)]
mod eyes_tests {
    use image::Rgba;
    use test_case::test_case;

    use super::{eye_marks, render_eye, render_eyes};
    use crate::{
        common::{
            config::CanvasProfile,
            design::{Design, Style, BLACK, WHITE},
            matrix::ModuleMatrix,
        },
        render::{
            canvas::{Canvas, Mark},
            shapes,
        },
    };

    const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
    const BLUE: Rgba<u8> = Rgba([0, 0, 255, 255]);

    fn style(frame: &str, ball: &str) -> Style {
        Design::from_json(&format!(
            r##"{{
                "cornersSquare": {{ "style": "{frame}", "color": "#ff0000" }},
                "cornersDot": {{ "style": "{ball}", "color": "#0000ff" }}
            }}"##
        ))
        .resolve()
    }

    fn dims(mark: &Mark) -> (f64, f64) {
        let b = mark.bounds().unwrap();
        (b.width(), b.height())
    }

    #[test]
    fn test_default_eye_keeps_finder_ratio() {
        // 1:1:3:1:1 along the middle row
        let mut canvas = Canvas::new(70, WHITE);
        render_eye(&mut canvas, 0.0, 0.0, 10.0, &Style::default());
        let img = canvas.image();
        let row: Vec<bool> = (0..70).map(|x| *img.get_pixel(x, 35) == BLACK).collect();
        let exp: Vec<bool> = (0..70).map(|x| !(10..20).contains(&x) && !(50..60).contains(&x)).collect();
        assert_eq!(row, exp);
    }

    #[test]
    fn test_fallback_ring() {
        let style = style("nonexistent", "nonexistent");
        let marks = eye_marks(100.0, 200.0, 10.0, &style);
        assert_eq!(
            marks,
            vec![
                (Mark::Rect { x: 100.0, y: 200.0, w: 70.0, h: 70.0 }, RED),
                (Mark::Rect { x: 110.0, y: 210.0, w: 50.0, h: 50.0 }, WHITE),
                (Mark::Rect { x: 120.0, y: 220.0, w: 30.0, h: 30.0 }, BLUE),
            ]
        );
    }

    #[test]
    fn test_catalog_colors() {
        let mut canvas = Canvas::new(70, WHITE);
        render_eye(&mut canvas, 0.0, 0.0, 10.0, &style("square", "square"));
        let img = canvas.image();
        assert_eq!(*img.get_pixel(3, 3), RED);
        assert_eq!(*img.get_pixel(15, 15), WHITE);
        assert_eq!(*img.get_pixel(35, 35), BLUE);
    }

    #[test_case("circle", "star")]
    #[test_case("leaf-top-left", "leaf-2")]
    #[test_case("dashed", "cross")]
    #[test_case("nonexistent", "nonexistent")]
    fn test_eye_scale_invariance(frame: &str, ball: &str) {
        let style = style(frame, ball);
        let small = eye_marks(10.0, 10.0, 4.0, &style);
        let large = eye_marks(50.0, 70.0, 22.5, &style);
        assert_eq!(small.len(), large.len());
        for ((a, _), (b, _)) in small.iter().zip(&large) {
            let ((aw, ah), (bw, bh)) = (dims(a), dims(b));
            assert!((aw / ah - bw / bh).abs() < 1e-3);
            assert!((bw / aw - 22.5 / 4.0).abs() < 1e-3);
        }
    }

    #[test]
    fn test_every_style_paints_ball_center() {
        for frame in shapes::frame_names() {
            for ball in shapes::ball_names() {
                let mut canvas = Canvas::new(70, WHITE);
                render_eye(&mut canvas, 0.0, 0.0, 10.0, &style(frame, ball));
                assert_eq!(*canvas.image().get_pixel(35, 35), BLUE, "{frame} / {ball}");
            }
        }
    }

    #[test]
    fn test_render_eyes_three_corners() {
        let matrix = ModuleMatrix::from_modules(21, vec![false; 441]).unwrap();
        let geo = CanvasProfile::PerModule { module_size: 10, quiet_zone: 0 }.geometry(21);
        let mut canvas = Canvas::new(geo.canvas, WHITE);
        render_eyes(&mut canvas, &matrix, &geo, &style("square", "square"));
        let img = canvas.image();
        for (x, y) in [(35, 35), (175, 35), (35, 175)] {
            assert_eq!(*img.get_pixel(x, y), BLUE);
            assert_eq!(*img.get_pixel(x - 30, y - 30), RED);
        }
        assert_eq!(*img.get_pixel(175, 175), WHITE);
    }
}
