//! # qrstyle
//!
//! A Rust library for rendering styled QR codes. The module matrix comes from a
//! standard QR encoder; this crate turns it into a designed bitmap with custom
//! dot shapes, vector finder pattern "eyes", colours and an optional center logo.
//!
//! ## Features
//!
//! - **Dot styles**: square, dots, rounded, extra-rounded, classy and classy-rounded data modules
//! - **Eye styles**: a catalog of frame and ball shapes authored as SVG paths and scaled to any size
//! - **Lenient designs**: every design field is optional and bad values fall back to defaults
//! - **Logos**: data URIs and http(s) URLs fetched asynchronously with a timeout and size cap;
//!   local files when enabled in [`RenderConfig`]
//! - **Two canvas profiles**: a fixed 512px stored profile and a per-module preview profile
//! - **Exports**: PNG output, plus JPEG and single page PDF conversion and plain SVG straight from the matrix
//!
//! ## Quick Start
//!
//! ### Default design
//!
//! ```rust
//! use qrstyle::{ECLevel, ModuleMatrix, Renderer, Style};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let matrix = ModuleMatrix::encode(b"https://example.com", ECLevel::H)?;
//! let img = Renderer::default().render_surface(&matrix, &Style::default(), None);
//! assert_eq!(img.dimensions(), (512, 512));
//! # Ok(())
//! # }
//! ```
//!
//! ### Styled design
//!
//! ```rust
//! use qrstyle::{Design, ECLevel, ModuleMatrix, RenderConfig, Renderer};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let design = Design::from_json(
//!     r##"{
//!         "dots": { "style": "dots", "color": "#1a237e" },
//!         "cornersSquare": { "style": "circle" },
//!         "cornersDot": { "style": "star", "color": "#c62828" },
//!         "background": { "color": "#ffffff" }
//!     }"##,
//! );
//!
//! let matrix = ModuleMatrix::encode(b"Hello, World!", ECLevel::H)?;
//! let renderer = Renderer::new(RenderConfig::preview()); // 20px modules, 4 module margin
//! let png = renderer.render_with_logo(&matrix, &design, None)?;
//! assert!(png.starts_with(b"\x89PNG"));
//! # Ok(())
//! # }
//! ```
//!
//! ### Logos
//!
//! ```rust,no_run
//! use qrstyle::{Design, Renderer};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let design = Design::from_json(
//!     r#"{ "image": { "url": "https://example.com/logo.png" },
//!          "imageOptions": { "imageSize": 0.25, "hideBackgroundDots": true } }"#,
//! );
//! // A logo that cannot be fetched or decoded is skipped, never an error
//! let png = Renderer::default().generate("https://example.com", &design).await?;
//! std::fs::write("logo_qr.png", png)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Design Descriptor
//!
//! ### Dots
//! `dots.style`: square, dots, rounded, extra-rounded, classy, classy-rounded. Unknown names render as square.
//!
//! ### Eyes
//! - **Frames** (`cornersSquare.style`): square, rounded, circle, extra-rounded, leaf-top-left,
//!   leaf-top-right, leaf-bottom-left, leaf-bottom-right, dot-frame, dashed
//! - **Balls** (`cornersDot.style`): dot, square, extra-rounded, leaf-1, leaf-2, leaf-3, diamond,
//!   star, plus, cross
//!
//! Unknown frame names render a rectangular ring, unknown ball names a solid square.
//!
//! ### Colours
//! Frame and ball colours fall back to the dot colour, which falls back to black.
//! The background defaults to white.

#![allow(clippy::items_after_test_module)]

pub mod common;
pub mod content;
pub mod export;
pub mod render;

pub use common::*;
pub use content::Content;
pub use export::{matrix_to_svg, png_to_jpeg, png_to_pdf, SvgOptions};
pub use render::{encode_png, LogoLoader, Renderer};
