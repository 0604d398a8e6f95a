//! Vector shape catalog for finder pattern eyes.
//!
//! Every shape is authored in a 50x50 unit box. The outlines follow the classic
//! designer catalog, whose 40-unit artwork is scaled up to fill the whole box:
//! frames get a ring one module (50/7 units) thick and balls span the whole 3x3
//! module ball box, so plain eyes keep the 1:1:3:1:1 finder proportions.
//! Holes are wound opposite to their outline.

use std::{collections::HashMap, sync::OnceLock};

use kurbo::{Affine, BezPath};

/// Side of the authoring box.
pub const UNIT: f64 = 50.0;

// Outer edge shared by the rounded and leaf frames
macro_rules! rounded_outline {
    () => {
        "M8.75 0H41.25A8.75 8.75 0 0 1 50 8.75V41.25A8.75 8.75 0 0 1 41.25 50\
         H8.75A8.75 8.75 0 0 1 0 41.25V8.75A8.75 8.75 0 0 1 8.75 0Z "
    };
}

const FRAMES: &[(&str, &str)] = &[
    ("square", "M0 0H50V50H0Z M7.143 7.143V42.857H42.857V7.143Z"),
    (
        "rounded",
        concat!(
            rounded_outline!(),
            "M8.75 7.143A1.607 1.607 0 0 0 7.143 8.75V41.25A1.607 1.607 0 0 0 8.75 42.857",
            "H41.25A1.607 1.607 0 0 0 42.857 41.25V8.75A1.607 1.607 0 0 0 41.25 7.143Z",
        ),
    ),
    (
        "circle",
        "M25 0A25 25 0 1 1 25 50A25 25 0 1 1 25 0Z \
         M25 7.143A17.857 17.857 0 1 0 25 42.857A17.857 17.857 0 1 0 25 7.143Z",
    ),
    (
        "extra-rounded",
        "M16.25 0H33.75A16.25 16.25 0 0 1 50 16.25V33.75A16.25 16.25 0 0 1 33.75 50\
         H16.25A16.25 16.25 0 0 1 0 33.75V16.25A16.25 16.25 0 0 1 16.25 0Z \
         M16.25 7.143A9.107 9.107 0 0 0 7.143 16.25V33.75A9.107 9.107 0 0 0 16.25 42.857\
         H33.75A9.107 9.107 0 0 0 42.857 33.75V16.25A9.107 9.107 0 0 0 33.75 7.143Z",
    ),
    // Rounded ring whose hole is notched by a tab in the named corner
    (
        "leaf-top-left",
        concat!(
            rounded_outline!(),
            "M17.857 7.143V12.5H7.143V41.25A1.607 1.607 0 0 0 8.75 42.857H41.25",
            "A1.607 1.607 0 0 0 42.857 41.25V8.75A1.607 1.607 0 0 0 41.25 7.143Z",
        ),
    ),
    (
        "leaf-top-right",
        concat!(
            rounded_outline!(),
            "M42.857 12.5H32.143V7.143H8.75A1.607 1.607 0 0 0 7.143 8.75V41.25",
            "A1.607 1.607 0 0 0 8.75 42.857H41.25A1.607 1.607 0 0 0 42.857 41.25Z",
        ),
    ),
    (
        "leaf-bottom-left",
        concat!(
            rounded_outline!(),
            "M7.143 37.5H17.857V42.857H41.25A1.607 1.607 0 0 0 42.857 41.25V8.75",
            "A1.607 1.607 0 0 0 41.25 7.143H8.75A1.607 1.607 0 0 0 7.143 8.75Z",
        ),
    ),
    (
        "leaf-bottom-right",
        concat!(
            rounded_outline!(),
            "M32.143 42.857V37.5H42.857V8.75A1.607 1.607 0 0 0 41.25 7.143H8.75",
            "A1.607 1.607 0 0 0 7.143 8.75V41.25A1.607 1.607 0 0 0 8.75 42.857Z",
        ),
    ),
    (
        "dot-frame",
        "M0 0H50V50H0Z M7.143 7.143V42.857H42.857V7.143Z M25 15A10 10 0 1 1 25 35A10 10 0 1 1 25 15Z",
    ),
    // Corner brackets; only the top-left one has two long arms
    (
        "dashed",
        "M0 0H15V7.143H7.143V15H0Z M41.25 0H50V15H42.857V7.143H41.25Z \
         M0 41.25V50H15V42.857H7.143V41.25Z M41.25 50H50V35H42.857V42.857H41.25Z",
    ),
];

const BALLS: &[(&str, &str)] = &[
    ("dot", "M25 0A25 25 0 1 1 25 50A25 25 0 1 1 25 0Z"),
    ("square", "M0 0H50V50H0Z"),
    (
        "extra-rounded",
        "M15 0H35A15 15 0 0 1 50 15V35A15 15 0 0 1 35 50H15A15 15 0 0 1 0 35V15A15 15 0 0 1 15 0Z",
    ),
    ("leaf-1", "M0 25Q0 0 25 0H50V25Q50 50 25 50H0Z"),
    ("leaf-2", "M0 0H25Q50 0 50 25V50H25Q0 50 0 25Z"),
    ("leaf-3", "M0 0H50V25Q50 50 25 50Q0 50 0 25Z"),
    ("diamond", "M25 0L50 25L25 50L0 25Z"),
    (
        "star",
        "M25 2.344L32.813 17.969L50 19.531L35.938 30.469L40.625 47.656L25 38.281\
         L9.375 47.656L14.063 30.469L0 19.531L17.188 17.969Z",
    ),
    ("plus", "M16.667 0H33.333V16.667H50V33.333H33.333V50H16.667V33.333H0V16.667H16.667Z"),
    (
        "cross",
        "M8.333 0L25 16.667L41.667 0L50 8.333L33.333 25L50 41.667L41.667 50L25 33.333L8.333 50\
         L0 41.667L16.667 25L0 8.333Z",
    ),
];

// Shape
//------------------------------------------------------------------------------

#[derive(Debug)]
pub struct Shape {
    pub name: &'static str,
    /// Outline in the 50x50 authoring box.
    pub path: BezPath,
}

impl Shape {
    /// Places the shape in the `size` x `size` box whose top-left corner is (x, y).
    pub fn fit(&self, x: f32, y: f32, size: f32) -> BezPath {
        let place = Affine::translate((f64::from(x), f64::from(y))) * Affine::scale(f64::from(size) / UNIT);
        let mut path = self.path.clone();
        path.apply_affine(place);
        path
    }
}

// Catalog
//------------------------------------------------------------------------------

struct Catalog {
    frames: HashMap<&'static str, Shape>,
    balls: HashMap<&'static str, Shape>,
}

fn load(table: &[(&'static str, &str)]) -> HashMap<&'static str, Shape> {
    table
        .iter()
        .filter_map(|&(name, d)| match BezPath::from_svg(d) {
            Ok(path) => Some((name, Shape { name, path })),
            Err(e) => {
                log::error!("Dropping shape {name:?} from catalog: {e}");
                None
            }
        })
        .collect()
}

fn catalog() -> &'static Catalog {
    static CATALOG: OnceLock<Catalog> = OnceLock::new();
    CATALOG.get_or_init(|| Catalog { frames: load(FRAMES), balls: load(BALLS) })
}

/// Outer frame shape by style name.
pub fn frame(name: &str) -> Option<&'static Shape> {
    catalog().frames.get(name)
}

/// Inner ball shape by style name.
pub fn ball(name: &str) -> Option<&'static Shape> {
    catalog().balls.get(name)
}

pub fn frame_names() -> impl Iterator<Item = &'static str> {
    FRAMES.iter().map(|&(name, _)| name)
}

pub fn ball_names() -> impl Iterator<Item = &'static str> {
    BALLS.iter().map(|&(name, _)| name)
}
